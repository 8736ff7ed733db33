use serde::Serialize;
use ts_rs::TS;

/// API error payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/error-response.ts"
)]
pub struct ErrorResponse {
    message: String,
    /// Form field the error belongs to, when it concerns a single field.
    field: Option<String>,
}

impl ErrorResponse {
    pub(super) fn new(message: String, field: Option<String>) -> Self {
        Self { message, field }
    }
}
