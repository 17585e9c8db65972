//! Parsing of the header lines (everything before `FEATURES`).
//!
//! The first 12 columns of a line hold the field tag. Lines with a blank
//! tag continue the field opened last. How continuation lines are merged
//! depends on the field and is described by [`FIELDS`], which the writer
//! uses as well. Most fields append the text starting at column 11, thus
//! keeping the space that separated the words at the line break.

use log::warn;

use crate::core::{accession_tokens, col, head};

use super::record::{Record, Reference};

/// Header fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tag {
    Locus,
    Definition,
    Accession,
    Version,
    DbLink,
    Keywords,
    Source,
    Organism,
    Reference,
    Authors,
    Consrtm,
    Title,
    Journal,
    PubMed,
    Remark,
    Comment,
}

/// How the lines following a tagged line are merged into the value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Continuation {
    /// Append the text from the given column
    Append(usize),
    /// Append the accession tokens found from the given column
    Tokens(usize),
    /// Add the text from the given column as new list entry
    Push(usize),
    /// Append a newline and the text from the given column
    Newline(usize),
    /// Continuation lines are dropped
    Ignored,
}

#[derive(Debug)]
pub(crate) struct FieldRule {
    pub tag: Tag,
    /// The first 12 columns of the line
    pub label: &'static str,
    pub continuation: Continuation,
    /// Long values are wrapped by the writer. LOCUS and VERSION are always
    /// written on one line, even if it is longer than 79 columns.
    pub wrap: bool,
}

impl FieldRule {
    const fn new(tag: Tag, label: &'static str, continuation: Continuation) -> Self {
        let wrap = matches!(continuation, Continuation::Append(c) if c == TAG_WIDTH - 1);
        FieldRule {
            tag,
            label,
            continuation,
            wrap,
        }
    }

    const fn single_line(tag: Tag, label: &'static str) -> Self {
        FieldRule {
            tag,
            label,
            continuation: Continuation::Append(TAG_WIDTH - 1),
            wrap: false,
        }
    }
}

/// Width of the tag column
pub(crate) const TAG_WIDTH: usize = 12;

/// Indentation of continuation lines
pub(crate) const INDENT: &str = "            ";

/// All known header fields, in the order they are written.
pub(crate) static FIELDS: [FieldRule; 16] = [
    FieldRule::single_line(Tag::Locus, "LOCUS       "),
    FieldRule::new(Tag::Definition, "DEFINITION  ", Continuation::Append(11)),
    FieldRule::new(Tag::Accession, "ACCESSION   ", Continuation::Tokens(11)),
    FieldRule::single_line(Tag::Version, "VERSION     "),
    FieldRule::new(Tag::DbLink, "DBLINK      ", Continuation::Push(12)),
    FieldRule::new(Tag::Keywords, "KEYWORDS    ", Continuation::Append(11)),
    FieldRule::new(Tag::Source, "SOURCE      ", Continuation::Append(11)),
    FieldRule::new(Tag::Organism, "  ORGANISM  ", Continuation::Push(12)),
    FieldRule::new(Tag::Reference, "REFERENCE   ", Continuation::Ignored),
    FieldRule::new(Tag::Authors, "  AUTHORS   ", Continuation::Append(11)),
    FieldRule::new(Tag::Consrtm, "  CONSRTM   ", Continuation::Append(11)),
    FieldRule::new(Tag::Title, "  TITLE     ", Continuation::Append(11)),
    FieldRule::new(Tag::Journal, "  JOURNAL   ", Continuation::Append(11)),
    FieldRule::new(Tag::PubMed, "   PUBMED   ", Continuation::Append(12)),
    FieldRule::new(Tag::Remark, "  REMARK    ", Continuation::Ignored),
    FieldRule::new(Tag::Comment, "COMMENT     ", Continuation::Newline(12)),
];

impl Tag {
    #[inline]
    pub fn rule(self) -> &'static FieldRule {
        &FIELDS[self as usize]
    }

    fn from_label(label: &str) -> Option<Tag> {
        FIELDS.iter().find(|f| f.label == label).map(|f| f.tag)
    }

    #[inline]
    pub fn is_reference_field(self) -> bool {
        matches!(
            self,
            Tag::Authors | Tag::Consrtm | Tag::Title | Tag::Journal | Tag::PubMed | Tag::Remark
        )
    }
}

/// Returns the value of a scalar field, or `None` for list fields.
pub(crate) fn scalar(
    tag: Tag,
    record: &Record,
    reference: Option<&Reference>,
) -> Option<String> {
    let value = match tag {
        Tag::Locus => &record.locus,
        Tag::Definition => &record.definition,
        Tag::Version => &record.version,
        Tag::Keywords => &record.keywords,
        Tag::Source => &record.source,
        Tag::Comment => &record.comment,
        Tag::Reference => &reference?.origin,
        Tag::Authors => &reference?.authors,
        Tag::Consrtm => &reference?.consrtm,
        Tag::Title => &reference?.title,
        Tag::Journal => &reference?.journal,
        Tag::PubMed => &reference?.pubmed,
        Tag::Remark => &reference?.remark,
        Tag::Accession | Tag::DbLink | Tag::Organism => return None,
    };
    Some(value.clone())
}

/// Parser state of one record. Keeps track of the field opened last and
/// of the reference currently being assembled.
struct HeaderParser<'a> {
    record: &'a mut Record,
    open: Option<Tag>,
    reference: Option<Reference>,
    line_num: u64,
}

impl<'a> HeaderParser<'a> {
    fn new(record: &'a mut Record, first_line: u64) -> Self {
        HeaderParser {
            record,
            open: None,
            reference: None,
            line_num: first_line,
        }
    }

    fn parse_line(&mut self, line: &str) {
        if line.len() < TAG_WIDTH {
            return;
        }
        match Tag::from_label(head(line, TAG_WIDTH)) {
            Some(tag) => self.open(tag, col(line, TAG_WIDTH)),
            None => {
                if let Some(tag) = self.open {
                    self.continue_field(tag, line);
                }
            }
        }
    }

    fn open(&mut self, tag: Tag, value: &str) {
        self.open = Some(tag);
        match tag {
            Tag::Accession => {
                self.record.accession = accession_tokens(value).map(str::to_string).collect();
            }
            Tag::DbLink => self.record.dblink.push(value.to_string()),
            Tag::Organism => self.record.organism.push(value.to_string()),
            Tag::Reference => {
                if let Some(finished) = self.reference.take() {
                    self.record.references.push(finished);
                }
                self.reference = Some(Reference {
                    number: self.record.references.len() as u32 + 1,
                    origin: value.to_string(),
                    ..Default::default()
                });
            }
            _ => {
                if let Some(field) = self.scalar_mut(tag) {
                    field.clear();
                    field.push_str(value);
                }
            }
        }
    }

    fn continue_field(&mut self, tag: Tag, line: &str) {
        match tag.rule().continuation {
            Continuation::Append(c) => {
                if let Some(field) = self.scalar_mut(tag) {
                    field.push_str(col(line, c));
                }
            }
            Continuation::Tokens(c) => {
                let tokens = accession_tokens(col(line, c)).map(str::to_string);
                self.record.accession.extend(tokens);
            }
            Continuation::Push(c) => {
                let value = col(line, c).to_string();
                match tag {
                    Tag::DbLink => self.record.dblink.push(value),
                    Tag::Organism => self.record.organism.push(value),
                    _ => {}
                }
            }
            Continuation::Newline(c) => {
                if let Some(field) = self.scalar_mut(tag) {
                    field.push('\n');
                    field.push_str(col(line, c));
                }
            }
            Continuation::Ignored => {}
        }
    }

    fn scalar_mut(&mut self, tag: Tag) -> Option<&mut String> {
        if tag.is_reference_field() && self.reference.is_none() {
            warn!(
                "{} found before any REFERENCE line (line {}), ignored",
                tag.rule().label.trim(),
                self.line_num + 1
            );
            return None;
        }
        let field = match tag {
            Tag::Locus => &mut self.record.locus,
            Tag::Definition => &mut self.record.definition,
            Tag::Version => &mut self.record.version,
            Tag::Keywords => &mut self.record.keywords,
            Tag::Source => &mut self.record.source,
            Tag::Comment => &mut self.record.comment,
            Tag::Authors => &mut self.reference.as_mut()?.authors,
            Tag::Consrtm => &mut self.reference.as_mut()?.consrtm,
            Tag::Title => &mut self.reference.as_mut()?.title,
            Tag::Journal => &mut self.reference.as_mut()?.journal,
            Tag::PubMed => &mut self.reference.as_mut()?.pubmed,
            Tag::Remark => &mut self.reference.as_mut()?.remark,
            Tag::Reference | Tag::Accession | Tag::DbLink | Tag::Organism => return None,
        };
        Some(field)
    }

    fn finish(self) {
        if let Some(reference) = self.reference {
            self.record.references.push(reference);
        }
    }
}

/// Parses header lines into `record`. `first_line` is the line number of
/// the first line, used in log messages.
pub(crate) fn parse_header<'a, L>(lines: L, record: &mut Record, first_line: u64)
where
    L: IntoIterator<Item = &'a str>,
{
    let mut parser = HeaderParser::new(record, first_line);
    for line in lines {
        parser.parse_line(line);
        parser.line_num += 1;
    }
    parser.finish();
}
