//! Database repositories
//!
//! Data access for the three per-user tables. Each repository is a unit
//! struct of async functions over a `PgPool`; bulk deletes take a connection
//! so they can run inside a caller's transaction.

pub mod calories;
pub mod fasting;
pub mod goals;

pub use calories::{DailyCaloriesRecord, DailyCaloriesRepository, UpsertDailyCalories};
pub use fasting::{
    CreateFastingPreset, FastingPresetRecord, FastingPresetRepository, UpdateFastingPreset,
};
pub use goals::{WeeklyGoalRecord, WeeklyGoalRepository};
