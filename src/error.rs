use thiserror::Error;

/// Result type alias for shop operations that can fail.
pub type Result<T> = std::result::Result<T, ShopError>;

#[derive(Debug, Error)]
pub enum ShopError {
    #[error("Invalid order: {0}")]
    InvalidOrder(#[from] OrderError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Script error: {0}")]
    Script(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Raised when an order cannot be built from its intake data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("customer cannot be empty")]
    MissingCustomer,

    #[error("bicycle type cannot be empty")]
    MissingBicycleType,

    #[error("unknown bicycle type: {0}")]
    UnknownBicycleType(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_error_display() {
        assert_eq!(
            OrderError::MissingCustomer.to_string(),
            "customer cannot be empty"
        );
        assert_eq!(
            OrderError::UnknownBicycleType("tandem".into()).to_string(),
            "unknown bicycle type: tandem"
        );
    }

    #[test]
    fn order_error_converts_into_shop_error() {
        let err: ShopError = OrderError::MissingBicycleType.into();
        assert_eq!(
            err.to_string(),
            "Invalid order: bicycle type cannot be empty"
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ShopError>();
    }
}
