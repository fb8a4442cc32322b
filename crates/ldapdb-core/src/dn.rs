//! Distinguished name helpers (RFC 4514 string form).

use crate::{Error, Result, Value};
use std::borrow::Cow;

/// Appends `base_dn` to `rdn`. An empty base yields the RDN alone.
pub fn join(rdn: &str, base_dn: &str) -> String {
    if base_dn.is_empty() {
        rdn.to_string()
    } else {
        format!("{rdn},{base_dn}")
    }
}

/// Renders a field value as the text of an RDN component.
pub fn rdn_value(field: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(value) if !value.is_empty() => Ok(value.clone()),
        Value::I64(value) => Ok(value.to_string()),
        Value::Bool(true) => Ok("TRUE".to_string()),
        Value::Bool(false) => Ok("FALSE".to_string()),
        Value::Null | Value::String(_) => Err(Error::identity(format!(
            "key field `{field}` has no value"
        ))),
        _ => Err(Error::type_conversion(value.clone(), "RDN value")),
    }
}

/// Escapes the characters RFC 4514 reserves in attribute values.
pub fn escape_value(value: &str) -> Cow<'_, str> {
    let needs_escape = |(i, c): (usize, char)| {
        matches!(c, '"' | '+' | ',' | ';' | '<' | '>' | '\\' | '=' | '\0')
            || (i == 0 && (c == '#' || c == ' '))
            || (i + c.len_utf8() == value.len() && c == ' ')
    };

    if !value.char_indices().any(needs_escape) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 4);
    for (i, c) in value.char_indices() {
        if c == '\0' {
            escaped.push_str("\\00");
        } else {
            if needs_escape((i, c)) {
                escaped.push('\\');
            }
            escaped.push(c);
        }
    }
    Cow::Owned(escaped)
}

/// Splits a DN into its leading RDN and the parent DN.
pub fn split_rdn(dn: &str) -> (&str, Option<&str>) {
    match find_unescaped(dn, ',') {
        Some(pos) => (dn[..pos].trim(), Some(dn[pos + 1..].trim())),
        None => (dn.trim(), None),
    }
}

/// Parses an RDN into its `(attribute, value)` pairs, unescaping values.
pub fn parse_rdn(rdn: &str) -> Result<Vec<(String, String)>> {
    split_unescaped(rdn, '+')
        .into_iter()
        .map(|ava| {
            let Some(pos) = find_unescaped(ava, '=') else {
                return Err(Error::identity(format!("malformed RDN `{rdn}`")));
            };
            let attribute = ava[..pos].trim();
            if attribute.is_empty() {
                return Err(Error::identity(format!("malformed RDN `{rdn}`")));
            }
            Ok((attribute.to_string(), unescape(ava[pos + 1..].trim())))
        })
        .collect()
}

/// Canonical form used to compare DNs: attribute names and values are
/// case-folded and whitespace around separators is dropped.
pub fn normalize(dn: &str) -> Result<String> {
    let mut rdns = vec![];
    for rdn in split_unescaped(dn, ',') {
        let rdn = rdn.trim();
        if rdn.is_empty() {
            continue;
        }
        let avas = parse_rdn(rdn)?
            .into_iter()
            .map(|(attribute, value)| {
                format!(
                    "{}={}",
                    attribute.to_ascii_lowercase(),
                    escape_value(&value.to_lowercase())
                )
            })
            .collect::<Vec<_>>();
        rdns.push(avas.join("+"));
    }
    Ok(rdns.join(","))
}

fn find_unescaped(s: &str, needle: char) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == needle {
            return Some(i);
        }
    }
    None
}

fn split_unescaped(s: &str, separator: char) -> Vec<&str> {
    let mut parts = vec![];
    let mut rest = s;
    while let Some(pos) = find_unescaped(rest, separator) {
        parts.push(&rest[..pos]);
        rest = &rest[pos + separator.len_utf8()..];
    }
    parts.push(rest);
    parts
}

fn unescape(value: &str) -> String {
    let mut bytes = Vec::with_capacity(value.len());
    let mut chars = value.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c != '\\' {
            let mut buf = [0; 4];
            bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            continue;
        }

        // `\XX` hex pair or `\c` escaped character
        let hex = value.get(i + 1..i + 3).and_then(|h| u8::from_str_radix(h, 16).ok());
        match hex {
            Some(byte) => {
                bytes.push(byte);
                chars.next();
                chars.next();
            }
            None => {
                if let Some((_, next)) = chars.next() {
                    let mut buf = [0; 4];
                    bytes.extend_from_slice(next.encode_utf8(&mut buf).as_bytes());
                }
            }
        }
    }

    String::from_utf8_lossy(&bytes).into_owned()
}
