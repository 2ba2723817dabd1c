//! Browser list selected on the command line

use crate::constants::DEFAULT_BROWSERS;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::ops::Deref;

/// Ordered list of browser identifiers handed to test-running targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserList(Vec<String>);

impl BrowserList {
    /// Parse the raw `--browsers` value.
    ///
    /// Entries are separated by commas with surrounding whitespace ignored.
    /// An absent or blank value yields the default list.
    pub fn parse(raw: Option<&str>) -> Self {
        let parsed: Vec<String> = raw
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_owned)
            .collect();

        if parsed.is_empty() {
            Self::default()
        } else {
            Self(parsed)
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Comma-joined form used for placeholder expansion
    pub fn joined(&self) -> String {
        self.0.join(",")
    }
}

impl Default for BrowserList {
    fn default() -> Self {
        Self(DEFAULT_BROWSERS.iter().map(|b| (*b).to_owned()).collect())
    }
}

impl Deref for BrowserList {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for BrowserList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.joined())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_absent_option_uses_default() {
        assert_eq!(BrowserList::parse(None).as_slice(), ["PhantomJS"]);
    }

    #[test]
    fn test_blank_option_uses_default() {
        assert_eq!(BrowserList::parse(Some("  ")).as_slice(), ["PhantomJS"]);
        assert_eq!(BrowserList::parse(Some(" , ")).as_slice(), ["PhantomJS"]);
    }

    #[test]
    fn test_comma_list_with_spaces() {
        let browsers = BrowserList::parse(Some("Chrome, Firefox"));
        assert_eq!(browsers.as_slice(), ["Chrome", "Firefox"]);
        assert_eq!(browsers.joined(), "Chrome,Firefox");
    }

    proptest! {
        #[test]
        fn prop_entries_are_trimmed_and_non_empty(raw in "[A-Za-z ,]{0,40}") {
            let browsers = BrowserList::parse(Some(&raw));
            prop_assert!(!browsers.is_empty());
            for entry in browsers.iter() {
                prop_assert!(!entry.is_empty());
                prop_assert_eq!(entry.trim(), entry.as_str());
                prop_assert!(!entry.contains(','));
            }
        }

        #[test]
        fn prop_joined_names_round_trip(names in prop::collection::vec("[A-Za-z]{1,10}", 1..5)) {
            let raw = names.join(" , ");
            let browsers = BrowserList::parse(Some(&raw));
            prop_assert_eq!(browsers.as_slice(), names.as_slice());
        }
    }
}
