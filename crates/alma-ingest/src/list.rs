//! Plain-text ID lists: one ALMA ID per line.
//!
//! Blank lines and lines starting with `#` are ignored. IDs keep the order of
//! their first occurrence; later duplicates are dropped.

use std::collections::HashSet;
use std::path::Path;

use alma_model::{IdList, IdPolicy, extract_alma_ids};

use crate::error::{IngestError, Result};

/// How IDs are taken from each line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListParseMode {
    /// The whole line is one ID, normalized with the caller's [`IdPolicy`].
    #[default]
    Lines,
    /// Every long digit run in the line is an ID.
    Digits,
}

/// Parse list text into ordered, deduplicated IDs.
///
/// `policy` applies to whole-line IDs; digit runs need no normalization.
pub fn parse_id_list(text: &str, mode: ListParseMode, policy: IdPolicy) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();
    for line in text.lines() {
        let line = line
            .trim()
            .trim_start_matches(['\u{feff}', '\u{200f}', '\u{200e}'])
            .trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let ids = match mode {
            ListParseMode::Lines => vec![policy.normalize(line)],
            ListParseMode::Digits => extract_alma_ids(line),
        };
        for id in ids {
            if !id.is_empty() && seen.insert(id.clone()) {
                ordered.push(id);
            }
        }
    }
    ordered
}

/// Read ordered, deduplicated IDs from `path`. Invalid UTF-8 is replaced,
/// not rejected.
pub fn read_id_file(path: &Path, mode: ListParseMode, policy: IdPolicy) -> Result<Vec<String>> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::unreadable(path, e))?;
    Ok(parse_id_list(&String::from_utf8_lossy(&bytes), mode, policy))
}

/// Read a named ID list from `path`.
pub fn read_id_list(
    path: &Path,
    name: &str,
    mode: ListParseMode,
    policy: IdPolicy,
) -> Result<IdList> {
    let ids = read_id_file(path, mode, policy)?;
    tracing::debug!(list = name, path = %path.display(), ids = ids.len(), "Loaded ID list");
    Ok(IdList::new(name, ids))
}
