//! Error handling for the lost & found pets backend.

pub mod error_code;

pub use error_code::ErrorCode;
