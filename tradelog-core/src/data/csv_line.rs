//! Single-line CSV splitting.
//!
//! The broker export quotes fields with `"` and never escapes quotes inside a
//! field, so a quote simply toggles the in-field state. Unbalanced quotes give
//! a best-effort split; numeric parsing later reports the damage.

/// Split one line into trimmed field values.
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());
    fields
}
