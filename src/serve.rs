//! Line-oriented JSON transport for hosts in another process.

use std::io::{BufRead, Write};

use anyhow::Result;
use log::debug;

use crate::bridge::{Bridge, FlagResult, Request};

/// Answer every non-empty line of `input` with one JSON [`FlagResult`] line.
///
/// Lines that are not a valid [`Request`] get a failed result; the loop
/// keeps going until `input` is exhausted. Returns the number of answers.
pub fn serve<R: BufRead, W: Write>(bridge: &Bridge, mut input: R, mut output: W) -> Result<usize> {
    let mut answered = 0;
    let mut raw = Vec::new();

    loop {
        raw.clear();
        if input.read_until(b'\n', &mut raw)? == 0 {
            break;
        }
        if raw.trim_ascii().is_empty() {
            continue;
        }

        let result = match parse_request(&raw) {
            Ok(request) => bridge.dispatch(&request),
            Err(e) => {
                debug!("rejecting request {:?}: {e}", String::from_utf8_lossy(&raw));
                FlagResult::failure(format!("invalid request: {e}"))
            }
        };

        serde_json::to_writer(&mut output, &result)?;
        output.write_all(b"\n")?;
        output.flush()?;
        answered += 1;
    }

    Ok(answered)
}

fn parse_request(raw: &[u8]) -> Result<Request> {
    let line = std::str::from_utf8(raw)?;
    Ok(serde_json::from_str(line.trim())?)
}
