/// Reduce a section body to its ordered, non-empty content lines.
/// Repeated lines are kept.
pub fn content_lines(body: &str) -> Vec<String> {
    body.split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty() && *l != "-")
        .map(str::to_string)
        .collect()
}
