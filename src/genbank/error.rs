use crate::ErrorPosition;
use std::fmt;
use std::io;

/// Reason why a record was rejected as a whole
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    /// No line starting with `FEATURES` was found within the record.
    MissingFeatures,
    /// The `ORIGIN` marker was found before the `FEATURES` marker.
    ContradictoryRanges,
    /// The input ended without a `//` line closing the record.
    Unterminated,
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MalformedReason::MissingFeatures => f.write_str("no FEATURES line found"),
            MalformedReason::ContradictoryRanges => {
                f.write_str("ORIGIN line found before the FEATURES line")
            }
            MalformedReason::Unterminated => f.write_str("record is not terminated by '//'"),
        }
    }
}

#[derive(Debug)]
pub enum ErrorKind {
    /// `std::io::Error` raised by the underlying reader, or invalid UTF-8.
    /// Errors of this kind abort reading.
    Io(io::Error),
    /// A location (part of a feature location expression) did not contain
    /// one or two numbers.
    LocationGrammar {
        /// Position of the feature line
        pos: ErrorPosition,
        /// The offending location, as written
        location: String,
        /// Number of digit runs found in the location
        found: usize,
    },
    /// The location expression of a feature was not followed by a qualifier
    /// or another feature before the end of the feature table.
    UnterminatedLocation {
        /// Position of the feature line
        pos: ErrorPosition,
        /// Feature type (key)
        feature: String,
    },
    /// The record could not be divided into its sections.
    MalformedRecord {
        /// `ErrorPosition::line()` returns the first line of the record
        pos: ErrorPosition,
        reason: MalformedReason,
    },
    /// Hints that destructuring should not be exhaustive,
    /// makes sure that adding new variants will not break the code.
    #[doc(hidden)]
    __Nonexhaustive,
}

impl ErrorKind {
    /// Returns the position for this error, if one exists.
    pub fn position(&self) -> Option<&ErrorPosition> {
        match self {
            ErrorKind::LocationGrammar { pos, .. } => Some(pos),
            ErrorKind::UnterminatedLocation { pos, .. } => Some(pos),
            ErrorKind::MalformedRecord { pos, .. } => Some(pos),
            _ => None,
        }
    }

    /// Returns `true` if the error concerns the input as a whole rather
    /// than a single record.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ErrorKind::Io(_))
    }

    pub(crate) fn position_mut(&mut self) -> Option<&mut ErrorPosition> {
        match self {
            ErrorKind::LocationGrammar { pos, .. } => Some(pos),
            ErrorKind::UnterminatedLocation { pos, .. } => Some(pos),
            ErrorKind::MalformedRecord { pos, .. } => Some(pos),
            _ => None,
        }
    }
}

impl_error!(ErrorKind);

impl Error {
    /// Fills in the LOCUS of the affected record
    pub(crate) fn with_locus(mut self, locus: Option<String>) -> Self {
        if let Some(pos) = self.kind.position_mut() {
            pos.set_locus(locus);
        }
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind() {
            ErrorKind::Io(ref e) => fmt::Display::fmt(e, f),
            ErrorKind::LocationGrammar {
                pos,
                location,
                found,
            } => write!(
                f,
                "GenBank parse error: expected one or two positions in location '{}', \
                 found {} ({}).",
                location.trim(),
                found,
                pos
            ),
            ErrorKind::UnterminatedLocation { pos, feature } => write!(
                f,
                "GenBank parse error: location of '{}' feature is not terminated ({}).",
                feature, pos
            ),
            ErrorKind::MalformedRecord { pos, reason } => {
                write!(f, "GenBank parse error: {} ({}).", reason, pos)
            }
            _ => Ok(()),
        }
    }
}
