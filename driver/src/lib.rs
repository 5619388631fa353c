use error_stack::Report;

use kernel::KernelError;

pub mod database;
pub mod error;

pub(crate) fn env(key: &str) -> error_stack::Result<String, KernelError> {
    dotenvy::var(key).map_err(|error| {
        Report::from(error)
            .change_context(KernelError::Internal)
            .attach_printable(format!("Failed to read environment variable {key}"))
    })
}

/// Unset and empty variables both count as absent.
pub(crate) fn optional_env(key: &str) -> Option<String> {
    dotenvy::var(key).ok().filter(|value| !value.is_empty())
}
