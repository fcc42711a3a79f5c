//! Helpers shared by the backend's unit and integration tests: quiet log
//! initialisation and problem+json assertions.

pub mod logging;
pub mod problem_details;

pub use problem_details::assert_problem_details;
