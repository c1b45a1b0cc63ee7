use std::io::{self, Write};

use crate::table::Table;

/// Writes the summary line: entries sorted by raw key bytes, each formatted
/// as `key=min/mean/max` with one fractional digit.
///
/// Keys pass through as bytes; the output is only as UTF-8 as the input was.
pub fn write_summary<W: Write>(table: &Table<'_>, out: &mut W) -> io::Result<()> {
    let mut entries: Vec<_> = table.entries().collect();
    entries.sort_unstable_by_key(|(key, _)| *key);

    out.write_all(b"{")?;
    for (i, (key, agg)) in entries.iter().enumerate() {
        if i > 0 {
            out.write_all(b", ")?;
        }
        out.write_all(key)?;
        write!(
            out,
            "={min:.1}/{mean:.1}/{max:.1}",
            min = agg.min as f64 / 10.0,
            mean = agg.mean(),
            max = agg.max as f64 / 10.0
        )?;
    }
    out.write_all(b"}\n")
}
