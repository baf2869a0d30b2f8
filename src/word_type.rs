/// Returns the bracketed part of a label such as `"Verb (past)"`.
///
/// Labels without `(` come back unchanged. Only the last `)` after the
/// opening bracket is removed, so an unclosed label yields whatever follows
/// the `(`.
pub fn specific_word_type(label: &str) -> String {
    let Some((_, rest)) = label.split_once('(') else {
        return label.to_string();
    };
    match rest.rfind(')') {
        Some(close) => {
            let mut content = String::with_capacity(rest.len() - 1);
            content.push_str(&rest[..close]);
            content.push_str(&rest[close + 1..]);
            content.trim().to_string()
        }
        None => rest.trim().to_string(),
    }
}

/// Returns the text before the bracket, trimmed.
pub fn base_word_type(label: &str) -> &str {
    label
        .split_once('(')
        .map_or(label, |(base, _)| base)
        .trim()
}
