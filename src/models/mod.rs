// Module exports for models

pub mod chore;
pub mod household;
pub mod member;
pub mod occurrence;
pub mod recurrence;
pub mod reward;
pub mod settings;
pub mod ui;
