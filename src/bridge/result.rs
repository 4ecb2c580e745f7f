use serde::{Deserialize, Serialize};

/// Message carried by operations that succeed without a payload.
pub const SUCCESS: &str = "Success";

/// Outcome of a bridge call: a success flag plus one string.
///
/// What `message` holds depends on the operation: an error description on
/// failure, and on success either [`SUCCESS`], file content, a directory
/// listing, a path, or `"true"`/`"false"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagResult {
    pub ok: bool,
    pub message: String,
}

impl FlagResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Errors collapse into their full context chain, `outer: inner: cause`.
impl From<anyhow::Result<String>> for FlagResult {
    fn from(result: anyhow::Result<String>) -> Self {
        match result {
            Ok(message) => Self::success(message),
            Err(err) => Self::failure(format!("{err:#}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn errors_keep_their_context() {
        let err: anyhow::Result<String> = Err(std::io::Error::other("disk on fire"))
            .context("write /tmp/x");
        let result = FlagResult::from(err);
        assert!(!result.ok);
        assert_eq!(result.message, "write /tmp/x: disk on fire");
    }

    #[test]
    fn serializes_as_two_fields() {
        let json = serde_json::to_string(&FlagResult::success(SUCCESS)).unwrap();
        assert_eq!(json, r#"{"ok":true,"message":"Success"}"#);
    }
}
