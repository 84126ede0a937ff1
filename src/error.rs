pub use crate::types::DorkerError;

pub type Result<T> = std::result::Result<T, DorkerError>;

pub trait ErrorContext<T> {
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::fmt::Display,
{
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| DorkerError::ConfigError(format!("{}: {}", f(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_context_prefixes_message() {
        let failed: std::result::Result<(), &str> = Err("missing field");
        let err = failed.with_context(|| "Failed to parse config".to_string()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: Failed to parse config: missing field"
        );
    }
}
