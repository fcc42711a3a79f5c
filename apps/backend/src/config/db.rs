use crate::config::must_var;
use crate::error::AppError;

/// Which database the process talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbProfile {
    /// `DATABASE_URL` (Postgres in deployment)
    Prod,
    /// Private in-memory SQLite, migrated on connect. Tests only.
    InMemory,
}

const IN_MEMORY_URL: &str = "sqlite::memory:";

pub fn db_url(profile: &DbProfile) -> Result<String, AppError> {
    match profile {
        DbProfile::Prod => must_var("DATABASE_URL"),
        DbProfile::InMemory => Ok(IN_MEMORY_URL.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use serial_test::serial;

    use super::{db_url, DbProfile};

    #[test]
    #[serial]
    fn prod_reads_database_url() {
        env::set_var("DATABASE_URL", "postgres://app:pw@localhost:5432/lostpets");
        assert_eq!(
            db_url(&DbProfile::Prod).unwrap(),
            "postgres://app:pw@localhost:5432/lostpets"
        );
        env::remove_var("DATABASE_URL");
    }

    #[test]
    #[serial]
    fn prod_without_database_url_is_config_error() {
        env::remove_var("DATABASE_URL");
        let err = db_url(&DbProfile::Prod).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn in_memory_needs_no_env() {
        assert_eq!(db_url(&DbProfile::InMemory).unwrap(), "sqlite::memory:");
    }
}
