use std::io;

use crate::core::letter_runs;

/// Number of residues per line in the `ORIGIN` block
pub(crate) const LINE_WIDTH: usize = 60;

/// Number of residues per space-separated group
pub(crate) const GROUP_WIDTH: usize = 10;

/// Extracts the residues from the lines of the sequence block. The first
/// line (`ORIGIN`) is skipped, from the other lines only letters are
/// taken (position numbers and spaces are dropped).
pub(crate) fn parse_sequence<'a, L>(lines: L) -> String
where
    L: IntoIterator<Item = &'a str>,
{
    let mut seq = String::new();
    for line in lines.into_iter().skip(1) {
        for run in letter_runs(line) {
            seq.push_str(run);
        }
    }
    seq
}

/// Writes the sequence block including the `ORIGIN` line:
///
/// ```text
/// ORIGIN
///         1 gatcctccat atacaacggt atctccacct caggtttaga tctcaacaac ggaaccattg
///        61 ccgacatgag
/// ```
pub(crate) fn write_sequence<W>(mut writer: W, seq: &str) -> io::Result<()>
where
    W: io::Write,
{
    writer.write_all(b"ORIGIN      \n")?;
    for (i, line) in seq.as_bytes().chunks(LINE_WIDTH).enumerate() {
        write!(writer, "{:>9}", i * LINE_WIDTH + 1)?;
        for group in line.chunks(GROUP_WIDTH) {
            writer.write_all(b" ")?;
            writer.write_all(group)?;
        }
        writer.write_all(b"\n")?;
    }
    Ok(())
}
