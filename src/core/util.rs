/// Remove a final '\r' from a byte slice
#[inline]
pub(crate) fn trim_cr(line: &[u8]) -> &[u8] {
    if let Some((&b'\r', remaining)) = line.split_last() {
        remaining
    } else {
        line
    }
}

/// Returns the part of a line starting at column `start` (0-based), or an
/// empty string if the line is shorter. Never panics, also not with
/// non-ASCII text (the start is then moved to the next character boundary).
#[inline]
pub(crate) fn col(line: &str, start: usize) -> &str {
    if start >= line.len() {
        return "";
    }
    let mut start = start;
    while !line.is_char_boundary(start) {
        start += 1;
    }
    &line[start..]
}

/// Returns the first `end` columns of a line (or the whole line if shorter).
#[inline]
pub(crate) fn head(line: &str, end: usize) -> &str {
    if end >= line.len() {
        return line;
    }
    &line[..floor_boundary(line, end)]
}

/// Moves `pos` backwards to the closest character boundary.
#[inline]
pub(crate) fn floor_boundary(s: &str, mut pos: usize) -> usize {
    if pos >= s.len() {
        return s.len();
    }
    while !s.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

/// Returns the first whitespace-delimited word in `s`.
#[inline]
pub(crate) fn first_word(s: &str) -> Option<&str> {
    s.split_ascii_whitespace().next()
}

/// Iterator over maximal runs of bytes matching a predicate
pub(crate) struct Runs<'a, F> {
    text: &'a str,
    pos: usize,
    pred: F,
}

impl<'a, F> Iterator for Runs<'a, F>
where
    F: Fn(u8) -> bool,
{
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let bytes = self.text.as_bytes();
        while self.pos < bytes.len() && !(self.pred)(bytes[self.pos]) {
            self.pos += 1;
        }
        if self.pos == bytes.len() {
            return None;
        }
        let start = self.pos;
        while self.pos < bytes.len() && (self.pred)(bytes[self.pos]) {
            self.pos += 1;
        }
        Some(&self.text[start..self.pos])
    }
}

/// Returns an iterator over the maximal runs of ASCII bytes matching `pred`.
/// `pred` must only accept ASCII bytes.
#[inline]
pub(crate) fn runs<F>(text: &str, pred: F) -> Runs<F>
where
    F: Fn(u8) -> bool,
{
    Runs { text, pos: 0, pred }
}

fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

fn is_accession_char(b: u8) -> bool {
    b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_'
}

fn is_letter(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

/// Runs of decimal digits
#[inline]
pub(crate) fn digit_runs(text: &str) -> Runs<fn(u8) -> bool> {
    runs(text, is_digit as fn(u8) -> bool)
}

/// Runs of `[A-Z0-9_]`, the characters accession numbers are made of
#[inline]
pub(crate) fn accession_tokens(text: &str) -> Runs<fn(u8) -> bool> {
    runs(text, is_accession_char as fn(u8) -> bool)
}

/// Runs of ASCII letters
#[inline]
pub(crate) fn letter_runs(text: &str) -> Runs<fn(u8) -> bool> {
    runs(text, is_letter as fn(u8) -> bool)
}
