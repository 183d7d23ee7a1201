//! Text matching and number formatting helpers.

/// Case-insensitive substring test.
///
/// ```
/// use codearena_common::text::contains_ignore_case;
///
/// assert!(contains_ignore_case("Merge Intervals", "interval"));
/// assert!(!contains_ignore_case("LRU Cache", "heap"));
/// ```
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// A free-text search box value.
///
/// Blank input (empty or whitespace only) matches everything. Otherwise the
/// lowercased text, surrounding whitespace included, must appear in at least
/// one searched field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryText(Option<String>);

impl QueryText {
    /// Normalize raw input
    pub fn new(raw: &str) -> Self {
        if raw.trim().is_empty() {
            Self(None)
        } else {
            Self(Some(raw.to_lowercase()))
        }
    }

    /// Whether the query constrains anything
    pub fn is_blank(&self) -> bool {
        self.0.is_none()
    }

    /// Test the query against a set of fields
    pub fn matches<'a, I>(&self, fields: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        match &self.0 {
            None => true,
            Some(needle) => fields
                .into_iter()
                .any(|field| field.to_lowercase().contains(needle.as_str())),
        }
    }
}

impl From<&str> for QueryText {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<Option<&str>> for QueryText {
    fn from(raw: Option<&str>) -> Self {
        raw.map(Self::new).unwrap_or_default()
    }
}

/// Format an integer with comma thousands separators (`5000` -> `5,000`).
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
