//! Infrastructure: database bootstrap, state assembly, object storage.

pub mod db;
pub mod s3;
pub mod state;
