//! Recommendation engine — pure functions from a profile to a plan.
//!
//! Both generators are deterministic lookups with light branching: the
//! workout side selects a fixed exercise table by (fitness level, track),
//! the diet side runs the Mifflin–St Jeor BMR formula through an activity
//! multiplier and a goal adjustment. Neither touches any external state and
//! neither can fail.

pub mod diet;
pub mod routes;
pub mod workout;

pub use diet::{DietPlan, MacroSplit, MealPlan, diet_plan};
pub use routes::{PlanRouteState, plan_routes};
pub use workout::{Exercise, Track, WorkoutPlan, workout_plan};
