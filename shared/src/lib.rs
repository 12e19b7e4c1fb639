//! Calorie Tracker Shared Library
//!
//! The calculation core (calendar weeks, calorie status, fasting windows)
//! plus the types and validation rules shared by the backend and WASM
//! modules. Nothing in this crate reads a clock or touches storage; callers
//! pass "today" and "now" in explicitly.

pub mod calories;
pub mod energy;
pub mod errors;
pub mod fasting;
pub mod models;
pub mod presets;
pub mod types;
pub mod validation;
pub mod week;

// Re-export commonly used items
pub use calories::*;
pub use errors::*;
pub use fasting::*;
pub use models::{DailyRecord, WeeklyGoal};
pub use presets::{default_presets, find_preset, FastingPreset, PresetColor};
pub use types::*;
pub use week::*;
