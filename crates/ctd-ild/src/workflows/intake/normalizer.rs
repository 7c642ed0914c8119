pub(crate) fn normalize_label(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_lowercase()
}

/// Section keys compare without separators so `standard-bio`, `standardBio`
/// and `Standard Bio` land on the same entry.
pub(crate) fn section_lookup_key(value: &str) -> String {
    normalize_label(value)
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .collect()
}

#[cfg(test)]
pub(crate) fn normalize_for_tests(value: &str) -> String {
    normalize_label(value)
}
