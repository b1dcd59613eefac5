//! Verse paging over stored lyrics
//!
//! A verse is a paragraph separated from the next by a blank line.

/// Paragraph delimiter between verses
pub const VERSE_DELIMITER: &str = "\n\n";

/// Selected verses plus the total count for client-side paging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersePage {
    pub verses: String,
    pub total: usize,
}

/// Split lyrics into verses. Empty text is a single empty verse.
pub fn split_verses(text: &str) -> Vec<&str> {
    text.split(VERSE_DELIMITER).collect()
}

/// Select `limit` verses starting at `offset`.
///
/// Only `(0, 0)` returns the whole text; otherwise `limit == 0` selects
/// nothing. An offset past the end yields no verses; `total` is reported
/// either way.
pub fn paginate(text: &str, offset: usize, limit: usize) -> VersePage {
    let verses = split_verses(text);
    let total = verses.len();

    if offset == 0 && limit == 0 {
        return VersePage {
            verses: text.to_owned(),
            total,
        };
    }

    let selected: &[&str] = if offset >= total {
        &[]
    } else {
        let end = offset.saturating_add(limit).min(total);
        &verses[offset..end]
    };

    VersePage {
        verses: selected.join(VERSE_DELIMITER),
        total,
    }
}
