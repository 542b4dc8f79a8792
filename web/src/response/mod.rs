use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub(crate) mod parse_response;

pub use parse_response::ParseResponse;

/// JSON body of every error answer: `{"error": "..."}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "Method not allowed")]
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
