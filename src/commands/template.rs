//! Replacement-field extraction for command argument templates.
//!
//! Understands the usual format-string syntax: `{name}`, `{name!r}`,
//! `{name:>10}`, nested fields inside a format spec (`{name:{width}}`),
//! and doubled braces (`{{`, `}}`) as literals. Only top-level field names
//! are reported.

use std::collections::BTreeSet;

use thiserror::Error;

/// Brace mismatch in an argument template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("single '}}' encountered at position {0}")]
    UnmatchedClose(usize),

    #[error("expected '}}' before end of string")]
    Unclosed,
}

/// Collect the distinct field names referenced by `template`.
///
/// Anonymous fields (`{}`) are not reported.
pub fn extract_params(template: &str) -> Result<BTreeSet<String>, TemplateError> {
    let chars: Vec<char> = template.chars().collect();
    let mut params = BTreeSet::new();
    let mut i = 0;
    while let Some(&c) = chars.get(i) {
        match c {
            '{' if chars.get(i + 1) == Some(&'{') => i += 2,
            '{' => {
                let (field, next) = read_field(&chars, i + 1)?;
                if !field.is_empty() {
                    params.insert(field);
                }
                i = next;
            }
            '}' if chars.get(i + 1) == Some(&'}') => i += 2,
            '}' => return Err(TemplateError::UnmatchedClose(i)),
            _ => i += 1,
        }
    }
    Ok(params)
}

/// Read a replacement field starting just after its `{`.
///
/// Returns the field name and the index following the closing `}`.
fn read_field(chars: &[char], start: usize) -> Result<(String, usize), TemplateError> {
    let mut depth = 1;
    let mut i = start;
    while let Some(&c) = chars.get(i) {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let body = &chars[start..i];
                    let name: String = body
                        .iter()
                        .take_while(|&&c| c != '!' && c != ':')
                        .collect();
                    return Ok((name, i + 1));
                }
            }
            _ => {}
        }
        i += 1;
    }
    Err(TemplateError::Unclosed)
}
