//! Business logic services
//!
//! Services fetch records through the repositories, run them through the
//! shared calculation core, and translate failures into `ApiError`.

pub mod calories;
pub mod data;
pub mod fasting;
pub mod goals;
pub mod stats;

pub use calories::{CalorieService, DayView};
pub use data::DataService;
pub use fasting::{FastView, FastingService};
pub use goals::GoalService;
pub use stats::{StatsService, WeekStats};
