//! Placeholder substitution engine for templates.
//!
//! Recognizes `$name` and `${name}` placeholders where `name` is an
//! identifier (`[A-Za-z_][A-Za-z0-9_]*`), plus `$$` as an escaped dollar.
//! Substitution is partial: placeholders whose key is absent from the
//! context are copied through verbatim, so rendering never fails.

use super::Context;

/// Substitute `$name` / `${name}` placeholders in `template` using `context`.
pub fn substitute(template: &str, context: &Context) -> String {
    let bytes = template.as_bytes();
    let mut out = String::with_capacity(template.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'$' {
            let start = i;
            while i < bytes.len() && bytes[i] != b'$' {
                i += 1;
            }
            out.push_str(&template[start..i]);
            continue;
        }

        // A '$' with nothing after it is literal.
        if i + 1 >= bytes.len() {
            out.push('$');
            break;
        }

        match bytes[i + 1] {
            b'$' => {
                out.push('$');
                i += 2;
            }
            b'{' => {
                let rest = &template[i + 2..];
                match rest.find('}') {
                    Some(end) if is_identifier(&rest[..end]) => {
                        let key = &rest[..end];
                        match context.get(key) {
                            Some(value) => out.push_str(&value_text(value)),
                            None => out.push_str(&template[i..i + end + 3]),
                        }
                        i += end + 3;
                    }
                    // Unterminated or malformed braces stay literal.
                    _ => {
                        out.push_str("${");
                        i += 2;
                    }
                }
            }
            c if c == b'_' || c.is_ascii_alphabetic() => {
                let start = i + 1;
                let mut end = start + 1;
                while end < bytes.len()
                    && (bytes[end] == b'_' || bytes[end].is_ascii_alphanumeric())
                {
                    end += 1;
                }
                let key = &template[start..end];
                match context.get(key) {
                    Some(value) => out.push_str(&value_text(value)),
                    None => out.push_str(&template[i..end]),
                }
                i = end;
            }
            _ => {
                out.push('$');
                i += 1;
            }
        }
    }

    out
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// Textual form of a context value as it appears in rendered output.
fn value_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Null => String::new(),
        // Arrays and objects render as their JSON representation.
        other => other.to_string(),
    }
}
