//! Call logging hook held by the bridge.

use std::fmt;

use log::{info, warn};

/// Receives a record of every bridge call.
///
/// The bridge owns one of these instead of writing to a global logger, so
/// hosts and tests can swap or silence it.
pub trait CallLog: Send + Sync {
    /// A call to `op` is about to run. `line` is the rendered record,
    /// e.g. `Writefile [Text]: notes.txt`.
    fn call(&self, op: &str, line: fmt::Arguments<'_>);

    /// A call failed with `message`.
    fn failed(&self, op: &str, message: &str);
}

/// Forwards records to the `log` facade under the `fsbridge` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogCallLog;

impl CallLog for LogCallLog {
    fn call(&self, _op: &str, line: fmt::Arguments<'_>) {
        info!(target: "fsbridge", "{line}");
    }

    fn failed(&self, op: &str, message: &str) {
        warn!(target: "fsbridge", "{op}: {message}");
    }
}

/// Drops every record.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentCallLog;

impl CallLog for SilentCallLog {
    fn call(&self, _op: &str, _line: fmt::Arguments<'_>) {}

    fn failed(&self, _op: &str, _message: &str) {}
}
