//! This library parses GenBank flat files (`.gb`, `.gbk`, `.gbff`) into
//! plain data structures and writes them back to text. Writing is the
//! exact inverse of parsing: a file parsed and written again is identical
//! to the input, line for line.
//!
//! The column-oriented format is read line by line: the
//! [`genbank::Reader`](genbank::Reader) divides the input into records,
//! and each record is assembled from its header fields, the feature table
//! (with the feature locations) and the sequence.
//!
//! # Example
//!
//! This code prints the name and the number of features of each record.
//!
//! ```no_run
//! use gbff_io::genbank::Reader;
//!
//! let mut reader = Reader::from_path("seqs.gbff").unwrap();
//!
//! while let Some(record) = reader.next() {
//!     let record = record.expect("Error reading record");
//!     println!("{}: {} features", record.name().unwrap_or(""), record.features.len());
//! }
//! ```
//!
//! # Records and errors
//!
//! Errors are of two kinds: I/O errors (including invalid UTF-8) stop the
//! reader, while errors in the structure of a record (see
//! [`genbank::ErrorKind`](genbank::ErrorKind)) only concern this record.
//! The reader then continues with the next one.
//!
//! # Parallel processing
//!
//! Functions for parallel processing can be found in the
//! [`parallel`](parallel/index.html) module. Records are parsed in a thread
//! pool and returned in the order of the input.

extern crate buffer_redux;
extern crate memchr;

#[macro_use]
extern crate serde_derive;
extern crate serde;

#[macro_use]
mod error;
pub mod core;
pub mod genbank;
pub mod parallel;

pub use crate::error::*;
