//! Conversions between JSON Pointer strings and path-token vectors.
//!
//! Used at the edge when interoperating with the JDDF test corpus, which
//! delivers `instance_path`/`schema_path` as JSON Pointer strings rather
//! than token arrays (spec §6).

/// Split a JSON Pointer string into its unescaped tokens, dropping the
/// leading empty element produced by the pointer's initial `/`.
///
/// `""` (the whole-document pointer) yields an empty vector.
pub fn tokens_from_json_pointer(pointer: &str) -> Vec<String> {
    if pointer.is_empty() {
        return Vec::new();
    }
    pointer
        .split('/')
        .skip(1)
        .map(|token| token.replace("~1", "/").replace("~0", "~"))
        .collect()
}

/// Render a sequence of path tokens back into a JSON Pointer string,
/// escaping `~` and `/` per RFC 6901.
pub fn json_pointer_from_tokens<I, S>(tokens: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for token in tokens {
        out.push('/');
        for ch in token.as_ref().chars() {
            match ch {
                '~' => out.push_str("~0"),
                '/' => out.push_str("~1"),
                _ => out.push(ch),
            }
        }
    }
    out
}
