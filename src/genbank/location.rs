//! Parsing of feature location expressions such as
//! `complement(join(<1..206,4821.>4830))`.
//!
//! The expression is split at every comma, each part is parsed on its own
//! (see [`Location`]). Operators (`complement`, `join`, `order`) are only
//! detected as substrings of the whole expression; their nesting is not
//! recorded.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::digit_runs;
use crate::ErrorPosition;

use super::{Error, ErrorKind};

/// A single coordinate or range of a feature location.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Location {
    /// Accession of another record, if the location refers to it
    /// (`AB000001.1:1..100`)
    pub external_reference: Option<String>,
    /// 1-based start, as written
    pub start: u64,
    /// 1-based stop, as written. Equal to `start` for single positions.
    pub stop: u64,
    /// Written as a single coordinate (`467`) rather than a range, which
    /// may also have equal ends (`5..5`)
    #[serde(default)]
    pub single_position: bool,
    /// `start^stop`: site between two adjacent bases
    pub site_between: bool,
    /// `<`: the lower bound is unknown
    pub unknown_lower_bound: bool,
    /// `>`: the upper bound is unknown
    pub unknown_upper_bound: bool,
    /// `start.stop`: a single base somewhere within the range
    pub unknown_single_site: bool,
}

impl Location {
    /// Location spanning `start..stop`
    pub fn range(start: u64, stop: u64) -> Self {
        Location {
            start,
            stop,
            ..Default::default()
        }
    }

    /// Parses a single location. Anything but the coordinates and the
    /// `<`, `>`, `^`, `.` markers is ignored, so surrounding operator text
    /// (`join(`, `)`) and whitespace are allowed.
    ///
    /// Returns the number of digit runs found as error if it is neither
    /// one nor two.
    pub fn parse(text: &str) -> Result<Location, usize> {
        let (external_reference, body) = match text.find(':') {
            Some(p) => (accession_before(&text[..p]), &text[p + 1..]),
            None => (None, text),
        };

        let mut numbers = digit_runs(body);
        let first = numbers.next();
        let second = numbers.next();
        let extra = numbers.count();
        let (start, stop, single_position) = match (first, second, extra) {
            (Some(a), None, 0) => {
                let a = a.parse().map_err(|_| 1usize)?;
                (a, a, true)
            }
            (Some(a), Some(b), 0) => (
                a.parse().map_err(|_| 2usize)?,
                b.parse().map_err(|_| 2usize)?,
                false,
            ),
            (None, _, _) => return Err(0),
            (_, _, n) => return Err(2 + n),
        };

        Ok(Location {
            external_reference,
            start,
            stop,
            single_position,
            site_between: body.contains('^'),
            unknown_lower_bound: body.contains('<'),
            unknown_upper_bound: body.contains('>'),
            unknown_single_site: is_single_site(body),
        })
    }

    /// Location at the single position `pos`
    pub fn point(pos: u64) -> Self {
        Location {
            start: pos,
            stop: pos,
            single_position: true,
            ..Default::default()
        }
    }

    /// Returns `true` if the location is a single position
    #[inline]
    pub fn is_point(&self) -> bool {
        self.single_position
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(acc) = self.external_reference.as_ref() {
            write!(f, "{}:", acc)?;
        }
        if self.is_point() {
            if self.unknown_lower_bound {
                f.write_str("<")?;
            }
            if self.unknown_upper_bound {
                f.write_str(">")?;
            }
            return write!(f, "{}", self.start);
        }
        let sep = if self.site_between {
            "^"
        } else if self.unknown_single_site {
            "."
        } else {
            ".."
        };
        write!(
            f,
            "{}{}{}{}{}",
            if self.unknown_lower_bound { "<" } else { "" },
            self.start,
            sep,
            if self.unknown_upper_bound { ">" } else { "" },
            self.stop
        )
    }
}

/// Result of parsing a complete location expression
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocationExpr {
    pub is_complement: bool,
    pub is_joined: bool,
    pub is_ordered: bool,
    pub locations: Vec<Location>,
}

impl LocationExpr {
    /// Parses a location expression, which may have been merged from
    /// several lines. `pos` is used for reporting errors.
    pub fn parse(expr: &str, pos: &ErrorPosition) -> Result<LocationExpr, Error> {
        let locations = expr
            .split(',')
            .map(|part| {
                Location::parse(part).map_err(|found| {
                    Error::new(ErrorKind::LocationGrammar {
                        pos: pos.clone(),
                        location: part.to_string(),
                        found,
                    })
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(LocationExpr {
            is_complement: expr.contains("complement"),
            is_joined: expr.contains("join"),
            is_ordered: expr.contains("order"),
            locations,
        })
    }

    /// Start of the first location
    #[inline]
    pub fn min_position(&self) -> u64 {
        self.locations.first().map(|l| l.start).unwrap_or(0)
    }

    /// Stop of the last location
    #[inline]
    pub fn max_position(&self) -> u64 {
        self.locations.last().map(|l| l.stop).unwrap_or(0)
    }
}

/// Writes the expression: locations separated by commas, wrapped in
/// `join(...)` or `order(...)` and finally `complement(...)` according
/// to the flags.
pub(crate) fn format_expr(
    locations: &[Location],
    is_complement: bool,
    is_joined: bool,
    is_ordered: bool,
) -> String {
    let mut out = locations
        .iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join(",");
    if is_joined {
        out = format!("join({})", out);
    } else if is_ordered {
        out = format!("order({})", out);
    }
    if is_complement {
        out = format!("complement({})", out);
    }
    out
}

/// The accession is the last word before the ':', operators such as
/// `join(` are not part of it.
fn accession_before(text: &str) -> Option<String> {
    let acc = text
        .rsplit(|c: char| c == '(' || c.is_ascii_whitespace())
        .next()
        .unwrap_or("");
    if acc.is_empty() {
        None
    } else {
        Some(acc.to_string())
    }
}

/// `[<>0-9]+\.[<>0-9]+` anywhere in the text
fn is_single_site(body: &str) -> bool {
    let is_bound = |b: u8| b.is_ascii_digit() || b == b'<' || b == b'>';
    body.as_bytes()
        .windows(3)
        .any(|w| w[1] == b'.' && is_bound(w[0]) && is_bound(w[2]))
}
