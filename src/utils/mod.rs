// Utility functions and helpers

pub mod date;
pub mod lenient;
