use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use error_stack::Report;
use kernel::KernelError;
use serde_json::{json, Map, Value};
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
pub struct ErrorStatus(Report<KernelError>);

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus(e)
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> axum::response::Response {
        let status = match self.0.current_context() {
            KernelError::Rejected(rejection) => {
                let message = json!([rejection.to_string()]);
                // Rejections of a create are keyed by the offending field,
                // everything else is a flat list of messages.
                let body = match rejection.field() {
                    Some(field) => {
                        let mut fields = Map::new();
                        fields.insert(field.to_string(), message);
                        Value::Object(fields)
                    }
                    None => message,
                };
                return (StatusCode::BAD_REQUEST, Json(body)).into_response();
            }
            KernelError::Concurrency => StatusCode::CONFLICT,
            KernelError::Timeout => StatusCode::REQUEST_TIMEOUT,
            KernelError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::error!("{:?}", self.0);
        status.into_response()
    }
}
