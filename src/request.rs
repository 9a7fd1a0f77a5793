//! Reading the header section of a request.
//!
//! Nothing here is parsed beyond line boundaries. The first line is
//! classified so it can be logged, and everything up to the blank line that
//! ends the header section is consumed and thrown away.

use std::fmt;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

/// Longest line accepted, terminator included.
pub const MAX_LINE_LEN: usize = 8 * 1024;

const EXPECTED_METHOD: &str = "GET";
const EXPECTED_VERSION: &str = "HTTP/1.1";

/// Shape of the first request line. Only ever logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestLineShape {
    /// Starts with `GET` and ends with `HTTP/1.1`
    WellFormed,
    Malformed,
}

impl RequestLineShape {
    pub fn of(line: &str) -> Self {
        if line.starts_with(EXPECTED_METHOD) && line.ends_with(EXPECTED_VERSION) {
            Self::WellFormed
        } else {
            Self::Malformed
        }
    }
}

impl fmt::Display for RequestLineShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WellFormed => f.write_str("well-formed"),
            Self::Malformed => f.write_str("malformed"),
        }
    }
}

/// What was seen of a request before the response went out.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestHead {
    /// First line, `None` if the client sent nothing or started with a blank line
    pub request_line: Option<String>,
    /// Non-empty lines read after the request line
    pub header_lines: usize,
    /// `true` if a blank line ended the section, `false` if the stream ended first
    pub terminated: bool,
}

impl RequestHead {
    pub fn shape(&self) -> Option<RequestLineShape> {
        self.request_line.as_deref().map(RequestLineShape::of)
    }

    pub fn is_empty(&self) -> bool {
        self.request_line.is_none() && self.header_lines == 0
    }
}

/// Reads lines until a blank line or end of stream, whichever comes first.
/// Bytes after the blank line are left unread. A line longer than
/// [`MAX_LINE_LEN`] fails with `InvalidData`.
pub async fn read_head<R>(reader: &mut R) -> io::Result<RequestHead>
where
    R: AsyncBufRead + Unpin,
{
    let mut head = RequestHead::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = (&mut *reader)
            .take(MAX_LINE_LEN as u64 + 1)
            .read_until(b'\n', &mut buf)
            .await?;
        if read == 0 {
            return Ok(head);
        }
        if buf.len() > MAX_LINE_LEN {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("request line exceeds {} bytes", MAX_LINE_LEN),
            ));
        }

        let line = strip_line_ending(&buf);
        if line.is_empty() {
            head.terminated = true;
            return Ok(head);
        }

        if head.request_line.is_none() {
            head.request_line = Some(String::from_utf8_lossy(line).into_owned());
        } else {
            head.header_lines += 1;
        }
    }
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
