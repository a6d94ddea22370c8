//! Text rendering of a nutrient leaderboard.

use std::fmt;
use std::io::{self, Write};

use crate::processing::RankedRow;

/// Descriptions longer than this many characters are cut.
pub const DESCRIPTION_CHARS: usize = 49;
/// Category descriptions longer than this many characters are cut.
pub const CATEGORY_CHARS: usize = 29;

/// `0001. Egg, whole     (Dairy and Egg Products   ) --  Cholesterol           (372.00 MG)`
impl fmt::Display for RankedRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}. {:<50} ({:<30}) --  {:<20}  ({:.2} {})",
            self.rank,
            truncate_chars(&self.food.description, DESCRIPTION_CHARS),
            truncate_chars(&self.food.category_desc, CATEGORY_CHARS),
            self.nutrient.name,
            self.nutrient.amount,
            self.nutrient.unit_name,
        )
    }
}

/// Write the leaderboard for `query`: a blank line, a title, a blank line, then one line per row.
pub fn write_top_list<W: Write>(out: &mut W, query: &str, rows: &[RankedRow<'_>]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Top foods by nutrient '{query}'")?;
    writeln!(out)?;
    for row in rows {
        writeln!(out, "{row}")?;
    }
    Ok(())
}

fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
