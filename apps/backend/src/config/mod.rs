pub mod app;
pub mod db;

use std::env;

use crate::error::AppError;

/// Required environment variable, non-empty after trimming.
pub(crate) fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            AppError::config(format!("Required environment variable '{name}' is not set"))
        })
}
