use std::fs::File;
use std::io;
use std::mem;
use std::path::Path;

use log::{debug, warn};

use crate::core::{col, first_word, LineReader, BUFSIZE};
use crate::ErrorPosition;

use super::feature::parse_features;
use super::header::parse_header;
use super::record::Record;
use super::sequence::parse_sequence;
use super::{Error, ErrorKind, MalformedReason, Result};

/// GenBank reader.
///
/// Reads lines and divides them into records, which are terminated by a
/// `//` line. The terminator line of a record is also the first line of
/// the lines collected for the next record.
pub struct Reader<R: io::Read> {
    lines: LineReader<R>,
    // lines of the current record
    window: Vec<String>,
    // line number of window[0]
    window_start: u64,
    feature_start: Option<usize>,
    sequence_start: Option<usize>,
    record_num: u64,
    finished: bool,
}

impl<R> Reader<R>
where
    R: io::Read,
{
    /// Creates a new reader with the default buffer size of 64 KiB
    ///
    /// # Example:
    ///
    /// ```
    /// use gbff_io::genbank::Reader;
    /// let gb = b"LOCUS       X1\nFEATURES             Location/Qualifiers\n//\n";
    ///
    /// let mut reader = Reader::new(&gb[..]);
    /// let record = reader.next().unwrap().unwrap();
    /// assert_eq!(record.name(), Some("X1"));
    /// assert!(reader.next().is_none());
    /// ```
    #[inline]
    pub fn new(reader: R) -> Reader<R> {
        Reader::with_capacity(reader, BUFSIZE)
    }

    /// Creates a new reader with a given buffer capacity. The minimum allowed
    /// capacity is 3.
    #[inline]
    pub fn with_capacity(reader: R, capacity: usize) -> Reader<R> {
        Reader {
            lines: LineReader::with_capacity(reader, capacity),
            window: vec![],
            window_start: 0,
            feature_start: None,
            sequence_start: None,
            record_num: 0,
            finished: false,
        }
    }
}

impl Reader<File> {
    /// Creates a reader from a file path.
    ///
    /// # Example:
    ///
    /// ```no_run
    /// use gbff_io::genbank::Reader;
    ///
    /// let mut reader = Reader::from_path("seqs.gbff").unwrap();
    ///
    /// // (... do something with the reader)
    /// ```
    #[inline]
    pub fn from_path<P: AsRef<Path>>(path: P) -> io::Result<Reader<File>> {
        File::open(path).map(Reader::new)
    }
}

impl<R> Reader<R>
where
    R: io::Read,
{
    /// Returns the next record, or `None` if the input is exhausted.
    ///
    /// Errors concerning a single record do not stop the reader, the next
    /// call returns the following record. After I/O errors, `None` is
    /// returned.
    #[inline]
    pub fn next(&mut self) -> Option<Result<Record>> {
        self.next_raw().map(|res| res.and_then(|raw| raw.parse()))
    }

    /// Collects the lines of the next record without parsing them. Only
    /// I/O errors are returned here, structural errors are reported by
    /// [`RawRecord::parse()`](RawRecord::parse).
    pub fn next_raw(&mut self) -> Option<Result<RawRecord>> {
        if self.finished {
            return None;
        }
        loop {
            let line = match self.lines.next_line() {
                Some(Ok(line)) => line,
                Some(Err(e)) => {
                    self.finished = true;
                    return Some(Err(e.into()));
                }
                None => break,
            };

            if line == "//" {
                let raw = RawRecord {
                    index: self.record_num,
                    first_line: self.window_start,
                    lines: mem::take(&mut self.window),
                    feature_start: self.feature_start.take(),
                    sequence_start: self.sequence_start.take(),
                    terminated: true,
                };
                self.window.push(line.to_string());
                self.window_start = self.lines.line_num() - 1;
                self.record_num += 1;
                debug!(
                    "record no. {} found at lines {}-{}",
                    raw.index + 1,
                    raw.first_line + 1,
                    self.window_start + 1
                );
                return Some(Ok(raw));
            }

            if line.starts_with("FEATURES") {
                self.feature_start = Some(self.window.len());
            } else if line.starts_with("ORIGIN") {
                self.sequence_start = Some(self.window.len());
            }
            self.window.push(line.to_string());
        }

        self.finished = true;
        self.unterminated()
    }

    /// Returns the lines remaining after the last `//` as a record, if
    /// there is anything but blank lines.
    fn unterminated(&mut self) -> Option<Result<RawRecord>> {
        let has_content = self
            .window
            .iter()
            .any(|l| l != "//" && !l.trim().is_empty());
        if !has_content {
            return None;
        }
        warn!(
            "input ends without '//' after line {}",
            self.window_start + self.window.len() as u64
        );
        let raw = RawRecord {
            index: self.record_num,
            first_line: self.window_start,
            lines: mem::take(&mut self.window),
            feature_start: self.feature_start.take(),
            sequence_start: self.sequence_start.take(),
            terminated: false,
        };
        self.record_num += 1;
        Some(Ok(raw))
    }

    /// Number of records (or record candidates) found so far
    #[inline]
    pub fn num_records(&self) -> u64 {
        self.record_num
    }

    /// Returns a borrowed iterator over all records.
    #[inline]
    pub fn records(&mut self) -> RecordsIter<R> {
        RecordsIter { rdr: self }
    }

    /// Returns an iterator over all records, consuming the reader.
    #[inline]
    pub fn into_records(self) -> RecordsIntoIter<R> {
        RecordsIntoIter { rdr: self }
    }
}

/// Borrowed iterator of `Record`
pub struct RecordsIter<'a, R>
where
    R: io::Read,
{
    rdr: &'a mut Reader<R>,
}

impl<'a, R> Iterator for RecordsIter<'a, R>
where
    R: io::Read,
{
    type Item = Result<Record>;
    fn next(&mut self) -> Option<Self::Item> {
        self.rdr.next()
    }
}

/// Iterator of `Record` that owns the underlying reader
pub struct RecordsIntoIter<R: io::Read> {
    rdr: Reader<R>,
}

impl<R> Iterator for RecordsIntoIter<R>
where
    R: io::Read,
{
    type Item = Result<Record>;
    fn next(&mut self) -> Option<Self::Item> {
        self.rdr.next()
    }
}

/// The lines of one record, together with the offsets of the feature
/// table and the sequence block. Owns its data, so it can be parsed in
/// another thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    index: u64,
    first_line: u64,
    lines: Vec<String>,
    feature_start: Option<usize>,
    sequence_start: Option<usize>,
    terminated: bool,
}

impl RawRecord {
    /// Index (0-based) of the record in the input
    #[inline]
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Line number (0-based) of the first line
    #[inline]
    pub fn first_line(&self) -> u64 {
        self.first_line
    }

    /// The lines of the record, starting with the `//` line of the
    /// previous record (if any) and excluding the own `//` line.
    #[inline]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// First word of the LOCUS line
    pub fn locus(&self) -> Option<&str> {
        self.lines
            .iter()
            .find(|l| l.starts_with("LOCUS "))
            .and_then(|l| first_word(col(l, 12)))
    }

    fn malformed(&self, reason: MalformedReason) -> Error {
        let pos = ErrorPosition::new(
            self.index,
            self.first_line,
            self.locus().map(str::to_string),
        );
        Error::new(ErrorKind::MalformedRecord { pos, reason })
    }

    /// Assembles the record from header, feature table and sequence.
    pub fn parse(&self) -> Result<Record> {
        if !self.terminated {
            return Err(self.malformed(MalformedReason::Unterminated));
        }
        let end = self.lines.len();
        let feature_start = self
            .feature_start
            .ok_or_else(|| self.malformed(MalformedReason::MissingFeatures))?;
        let sequence_start = self.sequence_start.unwrap_or(end);
        if sequence_start < feature_start {
            return Err(self.malformed(MalformedReason::ContradictoryRanges));
        }

        let lines: Vec<&str> = self.lines.iter().map(String::as_str).collect();
        let mut record = Record::default();

        parse_header(
            lines[..feature_start].iter().copied(),
            &mut record,
            self.first_line,
        );

        let pos = ErrorPosition::new(self.index, self.first_line + feature_start as u64, None);
        parse_features(&lines[feature_start..sequence_start], &mut record, &pos)
            .map_err(|e| e.with_locus(record.name().map(str::to_string)))?;

        if sequence_start < end {
            record.sequence = parse_sequence(lines[sequence_start..end].iter().copied());
        }
        Ok(record)
    }
}
