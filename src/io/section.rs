use std::io::{self, Read};

use super::ReadAt;

/// A [`Read`] view over `len` bytes of a [`ReadAt`] source, starting at `offset`.
///
/// Several sections can be open over the same source at once; none of them
/// share a cursor.
pub struct SectionReader<'a, R: ReadAt + ?Sized> {
    reader: &'a R,
    offset: u64,
    remaining: u64,
}

impl<'a, R: ReadAt + ?Sized> SectionReader<'a, R> {
    pub fn new(reader: &'a R, offset: u64, len: u64) -> Self {
        Self {
            reader,
            offset,
            remaining: len,
        }
    }
}

impl<R: ReadAt + ?Sized> Read for SectionReader<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.remaining == 0 || buf.is_empty() {
            return Ok(0);
        }

        let want = buf.len().min(usize::try_from(self.remaining).unwrap_or(usize::MAX));
        let n = self.reader.read_at(self.offset, &mut buf[..want])?;
        if n == 0 {
            // The container promised more bytes than the source holds
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "unexpected end of archive",
            ));
        }

        self.offset += n as u64;
        self.remaining -= n as u64;
        Ok(n)
    }
}
