use error_stack::Report;

use kernel::KernelError;

/// SQLSTATEs Postgres raises when a transaction lost against a concurrent one.
const SERIALIZATION_FAILURE: &str = "40001";
const DEADLOCK_DETECTED: &str = "40P01";

pub trait ConvertError: 'static + Sized {
    type Ok;
    fn convert_error(self) -> error_stack::Result<Self::Ok, KernelError>;
}

impl<T: 'static> ConvertError for Result<T, sqlx::Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| {
            let context = match &error {
                sqlx::Error::PoolTimedOut => KernelError::Timeout,
                sqlx::Error::Database(database)
                    if matches!(
                        database.code().as_deref(),
                        Some(SERIALIZATION_FAILURE | DEADLOCK_DETECTED)
                    ) =>
                {
                    KernelError::Concurrency
                }
                _ => KernelError::Internal,
            };
            Report::from(error).change_context(context)
        })
    }
}
