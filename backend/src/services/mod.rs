//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and the HTTP layer.

pub mod clock;
pub mod goals;
pub mod statistics;

pub use clock::{Clock, FixedClock, SystemClock};
pub use goals::GoalService;
pub use statistics::StatisticsService;
