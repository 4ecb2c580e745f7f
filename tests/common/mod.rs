#![allow(dead_code)]

use std::io::Write;
use std::path::Path;

use flate2::Compression;
use flate2::write::{DeflateEncoder, GzEncoder};

use fsbridge::{Bridge, PathResolver, SilentCallLog};

/// Bridge rooted at `base` that does not log.
pub fn quiet_bridge(base: &Path) -> Bridge {
    Bridge::new(PathResolver::new(base)).with_call_log(SilentCallLog)
}

pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

struct Entry {
    name: String,
    data: Vec<u8>,
    deflate: bool,
    unix_mode: Option<u32>,
    crc_override: Option<u32>,
}

/// Minimal ZIP writer for fixtures. Entry names are written verbatim, so it
/// can produce archives no well-behaved tool would.
#[derive(Default)]
pub struct ZipBuilder {
    entries: Vec<Entry>,
}

impl ZipBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, name: &str, data: &[u8], deflate: bool) -> Self {
        self.entries.push(Entry {
            name: name.to_string(),
            data: data.to_vec(),
            deflate,
            unix_mode: None,
            crc_override: None,
        });
        self
    }

    pub fn file(self, name: &str, data: &[u8]) -> Self {
        self.push(name, data, false)
    }

    pub fn deflated(self, name: &str, data: &[u8]) -> Self {
        self.push(name, data, true)
    }

    pub fn dir(self, name: &str) -> Self {
        self.push(name, b"", false)
    }

    /// Mark the last entry as made on unix with `mode`.
    pub fn mode(mut self, mode: u32) -> Self {
        if let Some(last) = self.entries.last_mut() {
            last.unix_mode = Some(mode);
        }
        self
    }

    /// Record a wrong CRC-32 for the last entry.
    pub fn bad_crc(mut self) -> Self {
        if let Some(last) = self.entries.last_mut() {
            last.crc_override = Some(!crc32fast::hash(&last.data));
        }
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        let mut central = Vec::new();

        for entry in &self.entries {
            let crc = entry
                .crc_override
                .unwrap_or_else(|| crc32fast::hash(&entry.data));
            let (method, payload) = if entry.deflate {
                let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(&entry.data).unwrap();
                (8u16, encoder.finish().unwrap())
            } else {
                (0u16, entry.data.clone())
            };
            let name = entry.name.as_bytes();
            let offset = out.len() as u32;

            out.extend_from_slice(b"PK\x03\x04");
            put16(&mut out, 20);
            put16(&mut out, 0);
            put16(&mut out, method);
            put16(&mut out, 0);
            put16(&mut out, 0x21);
            put32(&mut out, crc);
            put32(&mut out, payload.len() as u32);
            put32(&mut out, entry.data.len() as u32);
            put16(&mut out, name.len() as u16);
            put16(&mut out, 0);
            out.extend_from_slice(name);
            out.extend_from_slice(&payload);

            let (made_by, external) = match entry.unix_mode {
                Some(mode) => (0x0314, mode << 16),
                None => (0x0014, if entry.name.ends_with('/') { 0x10 } else { 0 }),
            };
            central.extend_from_slice(b"PK\x01\x02");
            put16(&mut central, made_by);
            put16(&mut central, 20);
            put16(&mut central, 0);
            put16(&mut central, method);
            put16(&mut central, 0);
            put16(&mut central, 0x21);
            put32(&mut central, crc);
            put32(&mut central, payload.len() as u32);
            put32(&mut central, entry.data.len() as u32);
            put16(&mut central, name.len() as u16);
            put16(&mut central, 0);
            put16(&mut central, 0);
            put16(&mut central, 0);
            put16(&mut central, 0);
            put32(&mut central, external);
            put32(&mut central, offset);
            central.extend_from_slice(name);
        }

        let cd_offset = out.len() as u32;
        out.extend_from_slice(&central);

        out.extend_from_slice(b"PK\x05\x06");
        put16(&mut out, 0);
        put16(&mut out, 0);
        put16(&mut out, self.entries.len() as u16);
        put16(&mut out, self.entries.len() as u16);
        put32(&mut out, central.len() as u32);
        put32(&mut out, cd_offset);
        put16(&mut out, 0);
        out
    }

    pub fn write_to(&self, path: &Path) {
        std::fs::write(path, self.build()).unwrap();
    }
}

fn put16(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn put32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_le_bytes());
}
