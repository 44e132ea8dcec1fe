//! User profile — the record every other component keys off.
//!
//! Built once by the conversational onboarding flow (or the profile form),
//! updated wholesale on re-submission, and read by the recommendation
//! engine and the coach chat.

pub mod model;
pub mod routes;

pub use model::{ActivityLevel, FitnessLevel, Gender, UserProfile};
pub use routes::{ProfileRouteState, profile_routes};
