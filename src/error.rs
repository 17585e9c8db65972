use std::fmt;

/// Position of a parsing error within the input
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorPosition {
    /// Index (0-based) of the record in the input
    pub(crate) record: u64,
    /// Line (0-based), at which the error occurred
    pub(crate) line: u64,
    /// LOCUS of the record, if it was reached before the error occurred
    pub(crate) locus: Option<String>,
}

impl ErrorPosition {
    pub fn new(record: u64, line: u64, locus: Option<String>) -> Self {
        ErrorPosition {
            record,
            line,
            locus,
        }
    }

    /// Returns the index of the record in the input (0-based).
    #[inline]
    pub fn record(&self) -> u64 {
        self.record
    }

    /// Returns the line number (0-based), at which the error occurred.
    /// For errors concerning the whole record, this is the first line
    /// of the record.
    #[inline]
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Returns the first word of the LOCUS line of the record where the
    /// error occurred, if available.
    #[inline]
    pub fn locus(&self) -> Option<&str> {
        self.locus.as_deref()
    }

    pub fn set_record(&mut self, record: u64) -> &mut Self {
        self.record = record;
        self
    }

    pub fn set_line(&mut self, line: u64) -> &mut Self {
        self.line = line;
        self
    }

    pub fn set_locus(&mut self, locus: Option<String>) -> &mut Self {
        self.locus = locus;
        self
    }
}

impl fmt::Display for ErrorPosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "record no. {}", self.record + 1)?;
        if let Some(locus) = self.locus.as_ref() {
            write!(f, " ('{}')", locus)?;
        }
        write!(f, " at line {}", self.line + 1)
    }
}

macro_rules! impl_error {
    ($ErrorKind:ident) => {
        pub type Result<T> = std::result::Result<T, Error>;

        /// Parsing error
        #[derive(Debug)]
        pub struct Error {
            kind: Box<$ErrorKind>,
        }

        impl Error {
            #[inline]
            pub fn new(kind: $ErrorKind) -> Self {
                Error {
                    kind: Box::new(kind),
                }
            }

            /// Returns a reference to the [`ErrorKind`](ErrorKind)
            /// associated with the error.
            #[inline]
            pub fn kind(&self) -> &$ErrorKind {
                &self.kind
            }

            /// Returns the [`ErrorKind`](ErrorKind) associated with
            /// the error, thereby consuming the error.
            #[inline]
            pub fn into_kind(self) -> $ErrorKind {
                *self.kind
            }

            /// Returns the [`ErrorPosition`](crate::ErrorPosition) of
            /// the error within the input.
            #[inline]
            pub fn position(&self) -> Option<&$crate::ErrorPosition> {
                self.kind().position()
            }
        }

        impl From<std::io::Error> for Error {
            fn from(e: std::io::Error) -> Error {
                Error {
                    kind: Box::new($ErrorKind::Io(e)),
                }
            }
        }

        impl From<Error> for std::io::Error {
            fn from(err: Error) -> std::io::Error {
                std::io::Error::new(std::io::ErrorKind::Other, err)
            }
        }

        impl std::error::Error for Error {
            fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
                match self.kind() {
                    $ErrorKind::Io(ref err) => Some(err),
                    _ => None,
                }
            }
        }
    };
}
