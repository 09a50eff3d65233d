use vpnc_log::StorageError;

/// Errors surfaced by engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("invalid {field} value `{value}`: {reason}")]
    InvalidFilterValue {
        field: &'static str,
        value: String,
        reason: String,
    },
}

impl EngineError {
    pub(crate) fn invalid_filter(
        field: &'static str,
        value: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidFilterValue {
            field,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
