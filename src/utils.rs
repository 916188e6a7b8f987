//! Helpers for fixed-width reads from a trace stream.
use std::io::{self, Read};

use crate::error::{Result, TraceError};

/// Read until `buf` is full or the stream ends, returning the number of
/// bytes read.
///
/// Unlike [`Read::read_exact`] this reports how much was available, so
/// callers can tell a clean end of stream (0 bytes) from a truncated field.
pub fn read_full<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Read a fixed-width header field, failing on any short read.
pub fn read_header_field<R: Read + ?Sized, const N: usize>(
    reader: &mut R,
    field: &'static str,
) -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    let got = read_full(reader, &mut buf)?;
    if got != N {
        return Err(TraceError::TruncatedHeader {
            field,
            expected: N,
            got,
        });
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reader that hands out at most one byte per call.
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.0.is_empty() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.0[0];
            self.0 = &self.0[1..];
            Ok(1)
        }
    }

    #[test]
    fn test_read_full_across_short_reads() {
        let mut reader = Trickle(&[1, 2, 3, 4, 5]);
        let mut buf = [0u8; 4];
        assert_eq!(read_full(&mut reader, &mut buf).unwrap(), 4);
        assert_eq!(buf, [1, 2, 3, 4]);
        assert_eq!(read_full(&mut reader, &mut buf).unwrap(), 1);
        assert_eq!(read_full(&mut reader, &mut buf).unwrap(), 0);
    }

    #[test]
    fn test_header_field_truncated() {
        let mut reader: &[u8] = &[0, 0];
        let err = read_header_field::<_, 4>(&mut reader, "object count").unwrap_err();
        match err {
            TraceError::TruncatedHeader {
                field,
                expected,
                got,
            } => {
                assert_eq!(field, "object count");
                assert_eq!(expected, 4);
                assert_eq!(got, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
