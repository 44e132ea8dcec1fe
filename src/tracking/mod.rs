//! Activity tracking — logged workouts, meals, and progress measurements.

pub mod model;
pub mod routes;

pub use model::{MealRecord, MealSlot, ProgressRecord, WorkoutRecord};
pub use routes::{TrackingRouteState, tracking_routes};
