use error_stack::Report;
use kernel::KernelError;

pub(crate) trait ConvertError {
    type Ok;
    fn convert_error(self) -> error_stack::Result<Self::Ok, KernelError>;
}

// Partial unique index backing "one open rental per user".
pub(crate) const ONE_OPEN_RENTAL_PER_USER: &str = "rentals_one_open_per_user";
const SERIALIZATION_FAILURE: &str = "40001";

impl<T> ConvertError for Result<T, sqlx::Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| {
            let context = match &error {
                sqlx::Error::PoolTimedOut => KernelError::Timeout,
                sqlx::Error::Database(db) if db.constraint() == Some(ONE_OPEN_RENTAL_PER_USER) => {
                    KernelError::PendingRental
                }
                sqlx::Error::Database(db) if db.code().as_deref() == Some(SERIALIZATION_FAILURE) => {
                    KernelError::Concurrency
                }
                _ => KernelError::Internal,
            };
            Report::from(error).change_context(context)
        })
    }
}

impl<T> ConvertError for Result<T, sqlx::migrate::MigrateError> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| Report::from(error).change_context(KernelError::Internal))
    }
}
