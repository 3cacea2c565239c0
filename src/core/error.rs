use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Main application error type
///
/// Validation and combination errors are caller faults and map to 400.
/// `RateNotFound` means the catalog and the validator disagree, which is a
/// server-side defect.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Request body absent, `null` or an empty object
    #[error("Request body is empty. Please provide the calculation parameters.")]
    EmptyBody,

    /// A mandatory field is absent, `null` or `""`
    #[error("Missing required field: {0}. This field is mandatory for the calculation.")]
    MissingField(String),

    /// Tariff type outside the legal set for the calculation class
    #[error("Invalid tariff type for {class}. Must be {allowed}, received: {received}")]
    InvalidTariffType {
        class: String,
        allowed: String,
        received: String,
    },

    /// Voltage level outside the legal set for the provider
    #[error("Invalid voltage level for {provider}. Must be {allowed}, received: {received}")]
    InvalidVoltageLevel {
        provider: String,
        allowed: String,
        received: String,
    },

    /// A field has the wrong JSON type or does not parse as a finite number
    #[error("Invalid type for field: {field}. Expected {expected}.")]
    InvalidType {
        field: String,
        expected: &'static str,
    },

    /// A physical quantity or rate was negative
    #[error("Invalid value for field: {0}. Must be a non-negative number.")]
    NegativeValue(String),

    /// A number too large to bill without overflowing
    #[error("Invalid value for field: {field}. Must not exceed {max} in magnitude.")]
    ValueOutOfRange {
        field: String,
        max: rust_decimal::Decimal,
    },

    /// Structurally legal tariff type that the calculation class does not offer
    #[error("Tariff type \"{tariff}\" is not supported for {class}")]
    UnsupportedCombination { class: String, tariff: String },

    /// Validated input without a catalog entry
    #[error("No rate configured for {0}")]
    RateNotFound(String),

    /// Unknown provider or calculation class in the request path
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        if self.is_server_fault() {
            tracing::error!(error = %self, "Tariff engine fault");
        }

        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string(),
        }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::EmptyBody
            | AppError::MissingField(_)
            | AppError::InvalidTariffType { .. }
            | AppError::InvalidVoltageLevel { .. }
            | AppError::InvalidType { .. }
            | AppError::NegativeValue(_)
            | AppError::ValueOutOfRange { .. }
            | AppError::UnsupportedCombination { .. }
            | AppError::Json(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::RateNotFound(_)
            | AppError::Configuration(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Helper functions for common error scenarios
impl AppError {
    pub fn missing_field(field: impl Into<String>) -> Self {
        AppError::MissingField(field.into())
    }

    pub fn invalid_number(field: impl Into<String>) -> Self {
        AppError::InvalidType {
            field: field.into(),
            expected: "a finite number",
        }
    }

    pub fn negative_value(field: impl Into<String>) -> Self {
        AppError::NegativeValue(field.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        AppError::NotFound(resource.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// True for faults that should be blamed on the server, not the caller
    pub fn is_server_fault(&self) -> bool {
        self.status_code().is_server_error()
    }
}

/// Render a set of choices the way error messages list them:
/// `"a"`, `"a" or "b"`, `"a", "b" or "c"`.
pub fn format_choices<T: std::fmt::Display>(choices: &[T]) -> String {
    let quoted: Vec<String> = choices.iter().map(|c| format!("\"{}\"", c)).collect();
    match quoted.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
    }
}
