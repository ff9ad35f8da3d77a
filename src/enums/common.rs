use serde::Serialize;
use utoipa::ToSchema;

/// Envelope for failed requests; `data` is always null.
#[derive(Serialize, ToSchema, Debug)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[schema(value_type = Option<Object>)]
    pub data: Option<()>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub success: bool,
    pub message: String,
}
