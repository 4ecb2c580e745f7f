use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// How file bytes travel over the string-typed content channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum Mode {
    /// Bytes are the UTF-8 text itself
    #[default]
    #[value(name = "text", alias = "Text")]
    Text,
    /// Bytes are carried as standard, padded base64
    #[value(name = "binary", alias = "Binary")]
    Binary,
}

impl Mode {
    /// Turn content received from the caller into the bytes to write.
    pub fn decode(self, content: &str) -> Result<Vec<u8>, base64::DecodeError> {
        match self {
            Mode::Text => Ok(content.as_bytes().to_vec()),
            Mode::Binary => STANDARD.decode(content),
        }
    }

    /// Turn file bytes into content for the caller.
    ///
    /// Text mode replaces invalid UTF-8 with U+FFFD.
    pub fn encode(self, bytes: &[u8]) -> String {
        match self {
            Mode::Text => String::from_utf8_lossy(bytes).into_owned(),
            Mode::Binary => STANDARD.encode(bytes),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Text => f.write_str("Text"),
            Mode::Binary => f.write_str("Binary"),
        }
    }
}

/// Options for read and write calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IOOptions {
    #[serde(default)]
    pub mode: Mode,
}

impl IOOptions {
    pub fn text() -> Self {
        Self { mode: Mode::Text }
    }

    pub fn binary() -> Self {
        Self { mode: Mode::Binary }
    }
}
