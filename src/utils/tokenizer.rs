/// Tokenize text into an ordered sequence of terms.
///
/// Lowercases, splits on non-alphanumeric characters, and drops
/// single-character tokens. Duplicates are preserved in occurrence order;
/// collapsing repeated (term, document) pairs is the inverter's job.
/// Queries must pass through the same function so query terms line up with
/// indexed terms.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| s.len() > 1)
        .map(|s| s.to_string())
        .collect()
}
