//! Contains core routines shared by the parsers: the buffered line source
//! and helpers for the column-oriented slicing of flat file lines. The API
//! of this module is subject to change.
mod lines;
mod util;

pub use self::lines::*;
pub(crate) use self::util::*;
