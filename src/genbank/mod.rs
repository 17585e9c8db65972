//! GenBank flat file reading and writing
//!
//! # Example
//!
//! The following example reads a record and writes it back. The output is
//! identical to the input. The sequence block is written with six
//! spaces after `ORIGIN`, as NCBI does.
//!
//! ```rust
//! use gbff_io::genbank::Reader;
//!
//! # fn main() {
//! let gb = "\
//! LOCUS       X1                        20 bp    DNA     linear   BCT 01-JAN-2020
//! DEFINITION  Example sequence.
//! ACCESSION   X1
//! VERSION     X1.1
//! KEYWORDS    .
//! SOURCE      Escherichia coli
//!   ORGANISM  Escherichia coli
//!             Bacteria; Pseudomonadota.
//! FEATURES             Location/Qualifiers
//!      gene            complement(<1..20)
//!                      /gene=\"abc\"
//! //
//! ";
//!
//! let mut reader = Reader::new(gb.as_bytes());
//! let mut output = vec![];
//!
//! while let Some(result) = reader.next() {
//!     let rec = result.unwrap();
//!     println!("{}: {} features", rec.name().unwrap(), rec.features.len());
//!     rec.write(&mut output).unwrap();
//! }
//!
//! assert_eq!(gb.as_bytes(), output.as_slice());
//! # }
//! ```
//!
//! As the parsing of record contents is more expensive than the division of
//! the input into records, records can also be parsed in parallel while
//! keeping their order, see the [`parallel`](crate::parallel) module.
//!
//! # Details on parsing behaviour
//!
//! * The parser handles UNIX (LF) and Windows (CRLF) line endings. Writing
//!   always uses UNIX line endings.
//! * A record ends with a line consisting of `//`. Its sections start
//!   with the first line starting with `FEATURES` and `ORIGIN`. Any lines
//!   before `FEATURES` are header lines.
//! * Header fields are recognized by the first 12 columns of a line. Lines
//!   with an unknown tag continue the last field; lines shorter than 12
//!   columns are ignored. Continuation lines are appended from column 11
//!   (keeping the space separating the words), except for `DBLINK` and
//!   `ORGANISM`, which store each line as separate list entry, `PUBMED`
//!   (from column 12) and `COMMENT`, which keeps line breaks. Continuation
//!   lines of `REFERENCE` and `REMARK` are not read.
//! * Accession numbers are the `[A-Z0-9_]+` words of the `ACCESSION` lines.
//! * Qualifier values are stored as written (including quotes). Qualifiers
//!   without '=' have no value. A new qualifier starts with '/' at column 21
//!   and a blank column 20; all other lines are appended from column 20,
//!   except for `/translation` (column 21).
//! * Feature locations are not validated beyond the number of positions
//!   (see [`Location::parse`]).
//! * In the sequence block, all letters are kept, all other characters
//!   are removed.
//! * Structural problems of a record (e.g. a missing `FEATURES` line or a
//!   location without positions) result in an error for this record, but the
//!   reader continues with the next one.

mod error;
mod feature;
mod header;
mod location;
mod order;
mod reader;
mod record;
mod sequence;
mod write;

pub use self::error::*;
pub use self::location::*;
pub use self::order::*;
pub use self::reader::*;
pub use self::record::*;
pub use self::write::*;

/// Parses all records from a string, returning the first error encountered.
pub fn parse_str(text: &str) -> Result<Vec<Record>> {
    Reader::new(text.as_bytes()).into_records().collect()
}
