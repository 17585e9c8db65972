use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;
use std::str;

use memchr::memchr;

use super::trim_cr;

/// The default initial buffer size for readers.
pub const BUFSIZE: usize = 64 * 1024;

/// Buffered source of text lines. Wraps `buffer_redux::BufReader` and
/// searches line ends with `memchr`. Both UNIX (LF) and Windows (CRLF)
/// line endings are removed. Lines must be valid UTF-8, otherwise an
/// error of kind `io::ErrorKind::InvalidData` is returned.
pub struct LineReader<R>
where
    R: io::Read,
{
    buf_reader: buffer_redux::BufReader<R>,
    line: Vec<u8>,
    // Number of lines returned so far
    line_num: u64,
    finished: bool,
}

impl LineReader<File> {
    /// Creates a line reader from a file path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(path: P) -> io::Result<LineReader<File>> {
        File::open(path).map(LineReader::new)
    }
}

impl<R> LineReader<R>
where
    R: io::Read,
{
    #[inline]
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, BUFSIZE)
    }

    /// Creates a new line reader with a given buffer capacity. The minimum
    /// allowed capacity is 3. Lines longer than the buffer are assembled
    /// from several reads.
    #[inline]
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        assert!(capacity >= 3);
        LineReader {
            buf_reader: buffer_redux::BufReader::with_capacity(capacity, reader),
            line: Vec::with_capacity(128),
            line_num: 0,
            finished: false,
        }
    }

    /// Number of lines returned so far. Equal to the index (0-based) of the
    /// next line.
    #[inline]
    pub fn line_num(&self) -> u64 {
        self.line_num
    }

    /// Returns the next line without its line terminator, or `None` if the
    /// input is exhausted. After an error, `None` is returned.
    pub fn next_line(&mut self) -> Option<io::Result<&str>> {
        if self.finished {
            return None;
        }
        self.line.clear();
        let mut has_data = false;
        loop {
            let available = match self.buf_reader.fill_buf() {
                Ok(b) => b,
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            };
            if available.is_empty() {
                self.finished = true;
                if !has_data {
                    return None;
                }
                break;
            }
            has_data = true;
            if let Some(pos) = memchr(b'\n', available) {
                self.line.extend_from_slice(&available[..pos]);
                self.buf_reader.consume(pos + 1);
                break;
            }
            let n = available.len();
            self.line.extend_from_slice(available);
            self.buf_reader.consume(n);
        }

        self.line_num += 1;
        let line = trim_cr(&self.line);
        match str::from_utf8(line) {
            Ok(s) => Some(Ok(s)),
            Err(e) => {
                self.finished = true;
                Some(Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("invalid UTF-8 in line {}: {}", self.line_num, e),
                )))
            }
        }
    }
}
