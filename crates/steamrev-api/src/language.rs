use std::collections::HashSet;

/// Case-insensitive language predicate built from the caller-requested list.
///
/// An empty request or an `"all"` entry anywhere in it disables filtering
/// entirely.
#[derive(Debug, Clone)]
pub struct LanguageFilter {
    // None = accept everything.
    wanted: Option<HashSet<String>>,
}

impl LanguageFilter {
    pub fn new(requested: &[String]) -> Self {
        if requested.is_empty() || contains_all_sentinel(requested) {
            return Self { wanted: None };
        }
        let wanted = requested.iter().map(|l| l.to_lowercase()).collect();
        Self {
            wanted: Some(wanted),
        }
    }

    pub fn accepts(&self, language: &str) -> bool {
        match &self.wanted {
            None => true,
            Some(set) => set.contains(&language.to_lowercase()),
        }
    }
}

/// Value of the `language` query parameter for the appreviews endpoint.
///
/// The literal requested list joined by commas, or `"all"` when the set is
/// empty or carries the sentinel. Some languages cannot be filtered
/// server-side, so the predicate above is still applied to each record.
pub fn language_query_value(requested: &[String]) -> String {
    if requested.is_empty() || contains_all_sentinel(requested) {
        "all".to_string()
    } else {
        requested.join(",")
    }
}

fn contains_all_sentinel(requested: &[String]) -> bool {
    requested.iter().any(|l| l.eq_ignore_ascii_case("all"))
}
