use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SetupError {
    /// A required element is not in the page. Features treat this as a skip.
    #[error("missing element `{selector}`")]
    Missing { selector: &'static str },
    #[error("{context}: {message}")]
    Js {
        context: &'static str,
        message: String,
    },
    #[error("invalid config: {message}")]
    Config { message: String },
}

impl SetupError {
    pub fn missing(selector: &'static str) -> Self {
        Self::Missing { selector }
    }

    pub fn js(context: &'static str, message: impl Into<String>) -> Self {
        Self::Js {
            context,
            message: message.into(),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing { .. })
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("submission rejected: {0}")]
    Rejected(String),
    #[error("submission controls unavailable")]
    Unavailable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_is_distinguished_from_failures() {
        assert!(SetupError::missing("#navbar").is_missing());
        assert!(!SetupError::js("observe", "TypeError").is_missing());
    }

    #[test]
    fn messages_name_the_failing_piece() {
        assert_eq!(
            SetupError::missing(".typing-text").to_string(),
            "missing element `.typing-text`"
        );
        assert_eq!(
            SetupError::js("IntersectionObserver::new", "not supported").to_string(),
            "IntersectionObserver::new: not supported"
        );
    }
}
