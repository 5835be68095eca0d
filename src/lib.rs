// Famboard chore scheduling library
// Recurrence, rotation and auto-reset for household chores

pub mod models;
pub mod services;
pub mod utils;
