//! Writing records in the GenBank format.
//!
//! Writing is the inverse of parsing: for input that was produced by
//! the writer itself or by NCBI, `write(parse(text)) == text`.
//!
//! Lines are wrapped to at most 79 columns. Text containing spaces is
//! wrapped at the last space that fits, and the space is dropped (it is
//! restored by the parser, which reads continuation lines starting one
//! column left of the text). If no space fits, the text is broken at the
//! width and the continuation line is indented by one column less, so that
//! no space is inserted when reading it again. `/translation` values are
//! read from the qualifier column and always broken into chunks of the
//! width.

use std::borrow::Cow;
use std::io;

use crate::core::floor_boundary;

use super::feature::{QUALIFIER_COL, TRANSLATION, TYPE_WIDTH};
use super::header::{scalar, Tag, FIELDS, INDENT, TAG_WIDTH};
use super::location::format_expr;
use super::order::QualifierOrder;
use super::record::{Feature, Qualifier, Record, Reference};
use super::sequence::write_sequence;

/// Maximum line width
pub const LINE_WIDTH: usize = 79;

const FEATURE_HEADER: &[u8] = b"FEATURES             Location/Qualifiers\n";

/// A line of wrapped text. `joined` is `true` if the line directly
/// continues the previous one, without a space dropped in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Wrapped<'a> {
    text: &'a str,
    joined: bool,
}

fn split_words(text: &str, width: usize) -> Vec<Wrapped> {
    assert!(width > 0);
    let bytes = text.as_bytes();
    let mut lines = vec![];
    let mut start = 0;
    let mut joined = false;
    while text.len() - start > width {
        let window = &bytes[start..=start + width];
        match window.iter().rposition(|&b| b == b' ') {
            Some(p) => {
                lines.push(Wrapped {
                    text: &text[start..start + p],
                    joined,
                });
                start += p + 1;
                joined = false;
            }
            None => {
                let end = floor_boundary(text, start + width).max(next_boundary(text, start));
                lines.push(Wrapped {
                    text: &text[start..end],
                    joined,
                });
                start = end;
                joined = true;
            }
        }
    }
    lines.push(Wrapped {
        text: &text[start..],
        joined,
    });
    lines
}

/// Splits `text` into line contents of at most `width` bytes, breaking at
/// the last space that fits. The space at the break is not part of any
/// line. If no space is found within a line, the text is broken at
/// `width`. Text without any space is split into chunks of `width`
/// (see [`wrap_chars`]).
pub fn wrap_words(text: &str, width: usize) -> Vec<&str> {
    split_words(text, width).into_iter().map(|l| l.text).collect()
}

/// Splits `text` into chunks of `width` bytes (characters in ASCII text).
pub fn wrap_chars(text: &str, width: usize) -> Vec<&str> {
    assert!(width > 0);
    let mut lines = vec![];
    let mut rest = text;
    while rest.len() > width {
        let end = floor_boundary(rest, width).max(next_boundary(rest, 0));
        let (line, r) = rest.split_at(end);
        lines.push(line);
        rest = r;
    }
    lines.push(rest);
    lines
}

/// Splits a location expression into lines of at most `width` bytes,
/// breaking after the last comma that fits.
pub fn wrap_locations(expr: &str, width: usize) -> Vec<&str> {
    assert!(width > 0);
    let bytes = expr.as_bytes();
    let mut lines = vec![];
    let mut start = 0;
    while expr.len() - start > width {
        let window = &bytes[start..start + width];
        let end = match window.iter().rposition(|&b| b == b',') {
            Some(p) => start + p + 1,
            None => floor_boundary(expr, start + width).max(next_boundary(expr, start)),
        };
        lines.push(&expr[start..end]);
        start = end;
    }
    lines.push(&expr[start..]);
    lines
}

/// End of the first character at or after `pos`
#[inline]
fn next_boundary(s: &str, pos: usize) -> usize {
    let mut end = pos + 1;
    while end < s.len() && !s.is_char_boundary(end) {
        end += 1;
    }
    end
}

/// Writes `lines`, the first prefixed with `first`, all others with `indent`
fn write_lines<W, I, S>(mut writer: W, first: &str, indent: &str, lines: I) -> io::Result<()>
where
    W: io::Write,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for (i, line) in lines.into_iter().enumerate() {
        let prefix = if i == 0 { first } else { indent };
        writer.write_all(prefix.as_bytes())?;
        writer.write_all(line.as_ref().as_bytes())?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// Writes word-wrapped lines, the first prefixed with `first`. Lines
/// following a space are indented with `indent`, lines following a hard
/// break with one space less.
fn write_words<W>(mut writer: W, first: &str, indent: &str, lines: &[Wrapped]) -> io::Result<()>
where
    W: io::Write,
{
    for (i, line) in lines.iter().enumerate() {
        let prefix = match (i, line.joined) {
            (0, _) => first,
            (_, true) => &indent[1..],
            (_, false) => indent,
        };
        writer.write_all(prefix.as_bytes())?;
        writer.write_all(line.text.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// Writes a header field value word-wrapped to 79 columns
pub fn write_wrapped_field<W>(writer: W, label: &str, value: &str) -> io::Result<()>
where
    W: io::Write,
{
    let lines = split_words(value, LINE_WIDTH - TAG_WIDTH);
    write_words(writer, label, INDENT, &lines)
}

/// Writes a record in the GenBank format, keeping the qualifier order
/// of each feature.
#[inline]
pub fn write_record<W>(writer: W, record: &Record) -> io::Result<()>
where
    W: io::Write,
{
    write_record_ordered(writer, record, None)
}

/// Writes a record in the GenBank format. If a [`QualifierOrder`] is
/// given, the qualifiers of each feature are sorted accordingly.
pub fn write_record_ordered<W>(
    mut writer: W,
    record: &Record,
    order: Option<&QualifierOrder>,
) -> io::Result<()>
where
    W: io::Write,
{
    write_header(&mut writer, record)?;
    writer.write_all(FEATURE_HEADER)?;
    for feature in &record.features {
        write_feature(&mut writer, feature, order)?;
    }
    if !record.contig.is_empty() {
        write_lines(
            &mut writer,
            "CONTIG      ",
            INDENT,
            wrap_locations(&record.contig, LINE_WIDTH - TAG_WIDTH),
        )?;
    }
    if !record.sequence.is_empty() {
        write_sequence(&mut writer, &record.sequence)?;
    }
    writer.write_all(b"//\n")
}

/// Writes all header lines (LOCUS up to COMMENT)
pub fn write_header<W>(mut writer: W, record: &Record) -> io::Result<()>
where
    W: io::Write,
{
    for rule in FIELDS.iter() {
        match rule.tag {
            Tag::Accession => {
                write_wrapped_field(&mut writer, rule.label, &record.accession.join(" "))?
            }
            Tag::DbLink => {
                if !record.dblink.is_empty() {
                    write_lines(&mut writer, rule.label, INDENT, &record.dblink)?;
                }
            }
            Tag::Organism => {
                if record.organism.is_empty() {
                    write_lines(&mut writer, rule.label, INDENT, Some(""))?;
                } else {
                    write_lines(&mut writer, rule.label, INDENT, &record.organism)?;
                }
            }
            Tag::Reference => {
                for reference in &record.references {
                    write_reference(&mut writer, record, reference)?;
                }
            }
            Tag::Comment => {
                if !record.comment.is_empty() {
                    write_lines(&mut writer, rule.label, INDENT, record.comment.split('\n'))?;
                }
            }
            tag if tag.is_reference_field() => {}
            tag => {
                if let Some(value) = scalar(tag, record, None) {
                    write_field(&mut writer, tag, &value)?;
                }
            }
        }
    }
    Ok(())
}

fn write_reference<W>(mut writer: W, record: &Record, reference: &Reference) -> io::Result<()>
where
    W: io::Write,
{
    let rule = Tag::Reference.rule();
    write_lines(&mut writer, rule.label, INDENT, Some(&reference.origin))?;
    for rule in FIELDS.iter().filter(|f| f.tag.is_reference_field()) {
        if let Some(value) = scalar(rule.tag, record, Some(reference)) {
            if !value.is_empty() {
                write_field(&mut writer, rule.tag, &value)?;
            }
        }
    }
    Ok(())
}

/// Writes a scalar field, wrapping it only if continuation lines are
/// merged at column 11 (the inverse of the parsing rule).
fn write_field<W>(writer: W, tag: Tag, value: &str) -> io::Result<()>
where
    W: io::Write,
{
    let rule = tag.rule();
    if rule.wrap {
        write_wrapped_field(writer, rule.label, value)
    } else {
        write_lines(writer, rule.label, INDENT, Some(value))
    }
}

/// Writes a feature with its location and qualifiers
pub fn write_feature<W>(
    mut writer: W,
    feature: &Feature,
    order: Option<&QualifierOrder>,
) -> io::Result<()>
where
    W: io::Write,
{
    let indent = " ".repeat(QUALIFIER_COL);
    let first = format!("     {:<width$}", feature.kind, width = TYPE_WIDTH);
    let expr = format_expr(
        &feature.locations,
        feature.is_complement,
        feature.is_joined,
        feature.is_ordered,
    );
    write_lines(
        &mut writer,
        &first,
        &indent,
        wrap_locations(&expr, LINE_WIDTH - QUALIFIER_COL),
    )?;

    let qualifiers: Cow<[Qualifier]> = match order {
        Some(o) => o.sort(&feature.kind, &feature.qualifiers).into(),
        None => (&feature.qualifiers[..]).into(),
    };
    for q in qualifiers.iter() {
        write_qualifier(&mut writer, q, &indent)?;
    }
    Ok(())
}

/// Writes `/key=value` wrapped at the qualifier column, or only `/key`
/// for flag qualifiers.
pub fn write_qualifier<W>(writer: W, qualifier: &Qualifier, indent: &str) -> io::Result<()>
where
    W: io::Write,
{
    let value = match qualifier.value.as_ref() {
        Some(v) => v,
        None => return write_lines(writer, indent, indent, Some(&qualifier.key)),
    };
    let text = format!("{}={}", qualifier.key, value);
    let width = LINE_WIDTH - QUALIFIER_COL;
    if qualifier.key == TRANSLATION {
        write_lines(writer, indent, indent, wrap_chars(&text, width))
    } else {
        write_words(writer, indent, indent, &split_words(&text, width))
    }
}
