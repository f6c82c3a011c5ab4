/// Canonical form used to compare texts: lower-cased, whitespace runs collapsed
/// to a single space, no leading or trailing whitespace.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
