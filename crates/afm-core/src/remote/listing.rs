//! Parser for the platform CLI's directory-listing output.
//!
//! The CLI prints a banner ("Getting files for app ... OK"), a blank line,
//! then a whitespace-separated name/size table. Everything up to and
//! including the first blank line is discarded; each remaining non-blank
//! line contributes one entry.

/// One row of a remote directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// Entry name, with any trailing `/` stripped.
    pub name: String,
    /// Raw size column (e.g. `220B`, `1.5K`, or `-` for directories).
    pub size: String,
    /// Directory rows are rendered with a trailing `/` on the name.
    pub is_dir: bool,
}

/// Listing output that does not follow the banner/blank-line/table shape.
#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    /// No blank line separating the banner from the table.
    #[error("listing has no blank line after the banner")]
    MissingPreamble,
}

/// Parses raw listing text into entries.
pub fn parse_listing(raw: &str) -> Result<Vec<ListingEntry>, ListingError> {
    let mut lines = raw.lines();

    let mut found_blank = false;
    for line in &mut lines {
        if line.trim().is_empty() {
            found_blank = true;
            break;
        }
    }
    if !found_blank {
        return Err(ListingError::MissingPreamble);
    }

    let mut entries = Vec::new();
    for line in lines {
        let mut cols = line.split_whitespace();
        let Some(name) = cols.next() else { continue };
        let size = cols.next().unwrap_or("-").to_string();
        let is_dir = name.ends_with('/');
        entries.push(ListingEntry {
            name: name.trim_end_matches('/').to_string(),
            size,
            is_dir,
        });
    }

    Ok(entries)
}
