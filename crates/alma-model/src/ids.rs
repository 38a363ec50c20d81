//! ALMA ID normalization and delimited-field splitting.

/// Delimiter joining multiple parent IDs inside one `PARENT` cell.
pub const PARENT_SEPARATOR: &str = "|||";

/// Minimum length of a digit run treated as an ALMA ID by [`extract_alma_ids`].
pub const MIN_ALMA_DIGITS: usize = 8;

/// How raw cell or query text is turned into an ID.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdPolicy {
    /// Trim surrounding whitespace, nothing else.
    #[default]
    Exact,
    /// Also strip spreadsheet artifacts (see [`clean_id`]).
    Clean,
}

impl IdPolicy {
    /// Apply the policy to a raw value.
    pub fn normalize(self, raw: &str) -> String {
        match self {
            Self::Exact => raw.trim().to_string(),
            Self::Clean => clean_id(raw),
        }
    }
}

/// Normalize an ALMA ID copied out of a spreadsheet or a text list.
///
/// Removes the leading apostrophe Excel uses to force text cells, any
/// spaces or tabs (copy/paste artifacts), directional marks and BOMs.
/// Case is never changed.
pub fn clean_id(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('\'').unwrap_or(trimmed);
    trimmed
        .chars()
        .filter(|&ch| !matches!(ch, ' ' | '\t' | '\u{200f}' | '\u{200e}' | '\u{feff}'))
        .collect()
}

/// Split a `PARENT` cell on [`PARENT_SEPARATOR`].
///
/// Tokens are normalized with `policy`; empty tokens are dropped. Order and
/// duplicates are preserved.
pub fn split_parent_field(field: &str, policy: IdPolicy) -> Vec<String> {
    field
        .split(PARENT_SEPARATOR)
        .map(|token| policy.normalize(token))
        .filter(|token| !token.is_empty())
        .collect()
}

/// Extract every run of at least [`MIN_ALMA_DIGITS`] ASCII digits from a line.
pub fn extract_alma_ids(line: &str) -> Vec<String> {
    let mut ids = Vec::new();
    let mut current = String::new();
    for ch in line.chars() {
        if ch.is_ascii_digit() {
            current.push(ch);
            continue;
        }
        if current.len() >= MIN_ALMA_DIGITS {
            ids.push(std::mem::take(&mut current));
        } else {
            current.clear();
        }
    }
    if current.len() >= MIN_ALMA_DIGITS {
        ids.push(current);
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_policy_only_trims() {
        assert_eq!(IdPolicy::Exact.normalize("  99 12\u{200f} "), "99 12\u{200f}");
        assert_eq!(IdPolicy::Exact.normalize("'990001"), "'990001");
    }

    #[test]
    fn test_clean_id_strips_spreadsheet_artifacts() {
        assert_eq!(clean_id("  '990000907150205000 "), "990000907150205000");
        assert_eq!(clean_id("9900 0090\t7150"), "990000907150");
        assert_eq!(clean_id("\u{200f}990001\u{200e}"), "990001");
        assert_eq!(clean_id("\u{feff}990001"), "990001");
        assert_eq!(clean_id("   "), "");
    }

    #[test]
    fn test_clean_id_keeps_case() {
        assert_eq!(clean_id("abc"), "abc");
        assert_eq!(clean_id("ABC"), "ABC");
    }

    #[test]
    fn test_split_parent_field_drops_empty_tokens() {
        assert_eq!(
            split_parent_field(" 2002 ||| ||| 2003|||", IdPolicy::Exact),
            vec!["2002", "2003"]
        );
        assert!(split_parent_field("", IdPolicy::Exact).is_empty());
        assert!(split_parent_field("|||  |||", IdPolicy::Exact).is_empty());
    }

    #[test]
    fn test_split_parent_field_keeps_order_and_duplicates() {
        assert_eq!(
            split_parent_field("A|||A|||B", IdPolicy::Exact),
            vec!["A", "A", "B"]
        );
    }

    #[test]
    fn test_split_parent_field_single_pipe_is_not_a_separator() {
        assert_eq!(split_parent_field("A|B", IdPolicy::Exact), vec!["A|B"]);
    }

    #[test]
    fn test_extract_alma_ids() {
        assert_eq!(
            extract_alma_ids("ALMA 990000907150205000, see 99123456 and 1234567"),
            vec!["990000907150205000", "99123456"]
        );
        assert!(extract_alma_ids("no ids here 1234").is_empty());
        assert_eq!(extract_alma_ids("12345678"), vec!["12345678"]);
    }
}
