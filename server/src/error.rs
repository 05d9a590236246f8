use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use error_stack::Report;
use kernel::KernelError;
use serde::Serialize;
use std::process::{ExitCode, Termination};

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

#[derive(Debug)]
pub enum ErrorStatus {
    Kernel(Report<KernelError>),
    /// Malformed path parameter.
    BadRequest(String),
    /// Body that does not match the request schema.
    Unprocessable(String),
}

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus::Kernel(e)
    }
}

pub fn status_of(error: &KernelError) -> StatusCode {
    match error {
        KernelError::NotFound(_) => StatusCode::NOT_FOUND,
        KernelError::PendingRental => StatusCode::PAYMENT_REQUIRED,
        KernelError::InsufficientAge => StatusCode::UNAUTHORIZED,
        KernelError::MovieInRental => StatusCode::CONFLICT,
        KernelError::Validation => StatusCode::UNPROCESSABLE_ENTITY,
        KernelError::Concurrency => StatusCode::CONFLICT,
        KernelError::Timeout => StatusCode::REQUEST_TIMEOUT,
        KernelError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ErrorStatus::Kernel(report) => {
                let context = *report.current_context();
                let status = status_of(&context);
                if status.is_server_error() {
                    tracing::error!("{:?}", report);
                    (status, String::from("Internal server error"))
                } else {
                    tracing::debug!("{:?}", report);
                    (status, context.to_string())
                }
            }
            ErrorStatus::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ErrorStatus::Unprocessable(message) => (StatusCode::UNPROCESSABLE_ENTITY, message),
        };
        (status, Json(ErrorBody { message })).into_response()
    }
}
