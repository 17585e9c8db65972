//! Parsing of the feature table (from `FEATURES` up to `ORIGIN` or `//`).
//!
//! The first six columns decide how a line is interpreted:
//!
//! * blank: a qualifier (`/key=value` starting at column 21) or the
//!   continuation of the current qualifier value
//! * `CONTIG`: the contig assembly description of the record
//! * anything else: a new feature with its type in columns 0-20 and the
//!   location from column 21. The location continues on the following
//!   lines until a line contains a '/' or has a non-blank type column.

use log::warn;

use crate::core::{col, first_word, head};
use crate::ErrorPosition;

use super::location::LocationExpr;
use super::record::{Feature, Qualifier, Record};
use super::{Error, ErrorKind};

/// Column at which locations and qualifiers start
pub(crate) const QUALIFIER_COL: usize = 21;

/// Width of the feature type column (after 5 spaces of indentation)
pub(crate) const TYPE_WIDTH: usize = 16;

/// Key of the only qualifier whose continuation lines start at
/// `QUALIFIER_COL` instead of one column before
pub(crate) const TRANSLATION: &str = "/translation";

/// Column from which the text of a CONTIG continuation line is taken
const CONTIG_COL: usize = 12;

/// A feature and its qualifiers while they are being assembled
struct OpenFeature {
    feature: Feature,
    qualifier: Option<Qualifier>,
}

impl OpenFeature {
    fn close_qualifier(&mut self) {
        if let Some(q) = self.qualifier.take() {
            self.feature.qualifiers.push(q);
        }
    }

    fn finish(mut self) -> Feature {
        self.close_qualifier();
        self.feature
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Features,
    Contig,
}

struct FeatureParser<'r> {
    record: &'r mut Record,
    current: Option<OpenFeature>,
    section: Section,
}

impl<'r> FeatureParser<'r> {
    fn qualifier_line(&mut self, line: &str, line_num: u64) {
        if self.section == Section::Contig {
            self.record.contig.push_str(col(line, CONTIG_COL));
            return;
        }
        let current = match self.current.as_mut() {
            Some(c) => c,
            None => {
                warn!(
                    "qualifier line {} found before any feature, ignored",
                    line_num + 1
                );
                return;
            }
        };
        let text = col(line, QUALIFIER_COL);
        // continuation lines after a break within a word start at column 20
        if text.starts_with('/') && col(line, QUALIFIER_COL - 1).starts_with(' ') {
            current.close_qualifier();
            current.qualifier = Some(match text.find('=') {
                Some(p) => Qualifier::new(&text[..p], &text[p + 1..]),
                None => Qualifier::flag(text),
            });
        } else if let Some(q) = current.qualifier.as_mut() {
            let start = if q.key == TRANSLATION {
                QUALIFIER_COL
            } else {
                QUALIFIER_COL - 1
            };
            q.value
                .get_or_insert_with(String::new)
                .push_str(col(line, start));
        } else if !text.is_empty() {
            warn!(
                "continuation line {} without open qualifier, ignored",
                line_num + 1
            );
        }
    }

    fn open_feature(
        &mut self,
        kind: &str,
        expr: &str,
        pos: &ErrorPosition,
    ) -> Result<(), Error> {
        self.section = Section::Features;
        let location = LocationExpr::parse(col(expr, QUALIFIER_COL), pos)?;
        if let Some(prev) = self.current.take() {
            self.record.features.push(prev.finish());
        }
        self.current = Some(OpenFeature {
            feature: Feature {
                kind: kind.to_string(),
                is_complement: location.is_complement,
                is_joined: location.is_joined,
                is_ordered: location.is_ordered,
                min_position: location.min_position(),
                max_position: location.max_position(),
                locations: location.locations,
                qualifiers: vec![],
            },
            qualifier: None,
        });
        Ok(())
    }

    fn finish(mut self) {
        if let Some(last) = self.current.take() {
            self.record.features.push(last.finish());
        }
    }
}

#[inline]
fn is_blank_prefix(line: &str) -> bool {
    head(line, 6).bytes().all(|b| b == b' ')
}

/// Returns the feature type if the line starts a new feature (or section)
#[inline]
fn type_column(line: &str) -> Option<&str> {
    first_word(head(line, QUALIFIER_COL))
}

/// Parses the feature table lines into `record`. `pos` refers to the first
/// line, errors report the line of the affected feature.
pub(crate) fn parse_features(
    lines: &[&str],
    record: &mut Record,
    pos: &ErrorPosition,
) -> Result<(), Error> {
    let mut parser = FeatureParser {
        record,
        current: None,
        section: Section::Features,
    };

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        let line_num = pos.line() + i as u64;

        if is_blank_prefix(line) {
            parser.qualifier_line(line, line_num);
            i += 1;
            continue;
        }
        if head(line, 6) == "CONTIG" {
            parser.record.contig = col(line, CONTIG_COL).to_string();
            parser.section = Section::Contig;
            i += 1;
            continue;
        }

        let kind = type_column(line).unwrap_or("");
        if kind == "FEATURES" {
            i += 1;
            continue;
        }

        // merge location lines
        let mut expr = line.to_string();
        let mut next = i + 1;
        loop {
            if next >= lines.len() {
                let mut err_pos = pos.clone();
                err_pos.set_line(line_num);
                return Err(Error::new(ErrorKind::UnterminatedLocation {
                    pos: err_pos,
                    feature: kind.to_string(),
                }));
            }
            let cont = lines[next];
            if cont.contains('/') || type_column(cont).is_some() {
                break;
            }
            expr.push_str(cont);
            next += 1;
        }

        let mut feature_pos = pos.clone();
        feature_pos.set_line(line_num);
        parser.open_feature(kind, &expr, &feature_pos)?;
        i = next;
    }
    parser.finish();
    Ok(())
}
