//! Shared string utilities.

/// Convert a camelCase or snake_case option name to kebab-case
/// (e.g., "logLevel" -> "log-level", "keep_names" -> "keep-names")
pub fn to_kebab_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                result.push('-');
            }
            result.extend(c.to_lowercase());
        } else if c == '_' {
            result.push('-');
        } else {
            result.push(c);
        }
    }
    result
}
