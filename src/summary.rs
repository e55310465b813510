//! Shared helpers for the human-readable batch summaries.

use std::fmt;

/// How many entries of a long list are printed before it is truncated.
pub const LIST_LIMIT: usize = 10;

/// Writes at most [`LIST_LIMIT`] items as `  - <item>` lines, followed by an
/// `... and N more` line for the remainder.
pub(crate) fn write_capped_list<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
) -> fmt::Result {
    for item in items.iter().take(LIST_LIMIT) {
        writeln!(f, "  - {}", item)?;
    }
    if items.len() > LIST_LIMIT {
        writeln!(f, "  ... and {} more", items.len() - LIST_LIMIT)?;
    }
    Ok(())
}
