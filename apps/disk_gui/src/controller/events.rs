//! Worker-to-UI events and error modeling for the disk controller.

pub enum UiEvent {
    Info(String),
    /// Install finished; carries the manifest paths now held offline.
    CacheInstalled { assets: Vec<String> },
    /// Activation finished; carries the version tags that were deleted.
    CacheActivated { removed: Vec<String> },
    /// A probed asset was served, either from the cache or the network.
    ProbeLoaded {
        path: String,
        bytes: usize,
        from_cache: bool,
    },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Network,
    Io,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    WorkerStartup,
    Install,
    Activate,
    Probe,
    General,
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Network => "Network",
        UiErrorCategory::Io => "Storage",
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("fetch")
            || message_lower.contains("connection")
            || message_lower.contains("dns")
            || message_lower.contains("timed out")
            || message_lower.contains("status")
            || message_lower.contains("network")
        {
            UiErrorCategory::Network
        } else if message_lower.contains("permission denied")
            || message_lower.contains("read-only")
            || message_lower.contains("no space")
            || message_lower.contains("directory")
            || message_lower.contains("staging")
        {
            UiErrorCategory::Io
        } else if message_lower.contains("invalid")
            || message_lower.contains("empty")
            || message_lower.contains("relative path")
            || message_lower.contains("before its install")
        {
            UiErrorCategory::Validation
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_unreachable_host_as_network_error() {
        let err = UiError::from_message(
            UiErrorContext::Install,
            "manifest entry 'index.html' could not be fetched: connection refused",
        );
        assert_eq!(err.category(), UiErrorCategory::Network);
        assert_eq!(err.context(), UiErrorContext::Install);
    }

    #[test]
    fn classifies_premature_activation_as_validation_error() {
        let err = UiError::from_message(
            UiErrorContext::Activate,
            "cannot activate version 'v2' before its install completes",
        );
        assert_eq!(err.category(), UiErrorCategory::Validation);
    }

    #[test]
    fn classifies_discarded_staging_as_storage_error() {
        let err = UiError::from_message(
            UiErrorContext::Install,
            "asset cache install failed; staging discarded",
        );
        assert_eq!(err.category(), UiErrorCategory::Io);
    }

    #[test]
    fn unmatched_messages_fall_back_to_unknown() {
        let err = UiError::from_message(UiErrorContext::General, "something odd happened");
        assert_eq!(err.category(), UiErrorCategory::Unknown);
        assert_eq!(err.message(), "something odd happened");
    }
}
