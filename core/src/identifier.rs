//! Media type identifiers.
//!
//! An identifier follows the usual media type syntax, `type/subtype; name=value`.
//! Parsing lowercases the base type and parameter names; formatting orders the
//! parameters by name so that two identifiers denoting the same media type have
//! byte-equal canonical forms.

use crate::IdentifierError;
use heck::ToUpperCamelCase;
use std::collections::BTreeMap;
use std::fmt;

/// A parsed, canonical media type identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaTypeIdentifier {
    /// Lowercased `type` or `type/subtype`.
    base: String,
    /// Parameters keyed by lowercased name.
    params: BTreeMap<String, String>,
}

impl MediaTypeIdentifier {
    /// Parse an identifier as written by the author.
    pub fn parse(input: &str) -> Result<Self, IdentifierError> {
        let (base_part, mut rest) = match input.find(';') {
            Some(i) => (&input[..i], &input[i..]),
            None => (input, ""),
        };
        let base = parse_base(base_part.trim())?;

        let mut params = BTreeMap::new();
        loop {
            rest = rest.trim_start_matches([' ', '\t']);
            if rest.is_empty() {
                break;
            }
            // A lone trailing semicolon is tolerated.
            if rest.trim() == ";" {
                break;
            }
            let (name, value, remaining) = consume_param(rest)?;
            if params.contains_key(&name) {
                return Err(IdentifierError::DuplicateParameter(name));
            }
            params.insert(name, value);
            rest = remaining;
        }

        Ok(Self { base, params })
    }

    /// Parse `input` and append `default_subtype` when the base has no subtype.
    pub fn normalize(input: &str, default_subtype: &str) -> Result<Self, IdentifierError> {
        let mut identifier = Self::parse(input)?;
        if !identifier.base.contains('/') {
            identifier.base.push('/');
            identifier.base.push_str(&default_subtype.to_ascii_lowercase());
        }
        Ok(identifier)
    }

    /// The base `type/subtype` without parameters.
    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn has_param(&self, name: &str) -> bool {
        self.params.contains_key(&name.to_ascii_lowercase())
    }

    /// Set a parameter, replacing any previous value.
    pub fn set_param(&mut self, name: &str, value: impl Into<String>) {
        self.params.insert(name.to_ascii_lowercase(), value.into());
    }

    /// Parameters in canonical (name) order.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The canonical string form.
    pub fn canonical(&self) -> String {
        self.to_string()
    }

    /// Default type name for a media type declared under this identifier.
    ///
    /// Takes the last dot-delimited segment of the base, drops anything from the
    /// slash on, and camel-cases the result. `None` when that leaves nothing.
    pub fn type_name_candidate(&self) -> Option<String> {
        let last = self.base.rsplit('.').next().unwrap_or_default();
        let head = last.split('/').next().unwrap_or_default();
        let name = head.to_upper_camel_case();
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }
}

impl fmt::Display for MediaTypeIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)?;
        for (name, value) in &self.params {
            write!(f, "; {}=", name)?;
            if !value.is_empty() && value.chars().all(is_token_char) {
                f.write_str(value)?;
            } else {
                f.write_str("\"")?;
                for c in value.chars() {
                    if c == '"' || c == '\\' {
                        f.write_str("\\")?;
                    }
                    write!(f, "{}", c)?;
                }
                f.write_str("\"")?;
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for MediaTypeIdentifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn is_tspecial(c: char) -> bool {
    matches!(
        c,
        '(' | ')' | '<' | '>' | '@' | ',' | ';' | ':' | '\\' | '"' | '/' | '[' | ']' | '?' | '='
    )
}

fn is_token_char(c: char) -> bool {
    c.is_ascii() && c > ' ' && c != '\x7f' && !is_tspecial(c)
}

/// Split the leading token off `s`.
fn consume_token(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !is_token_char(c)).unwrap_or(s.len());
    s.split_at(end)
}

fn parse_base(s: &str) -> Result<String, IdentifierError> {
    let (major, rest) = consume_token(s);
    if major.is_empty() {
        return Err(IdentifierError::NoMediaType);
    }
    if rest.is_empty() {
        return Ok(major.to_ascii_lowercase());
    }
    let Some(after_slash) = rest.strip_prefix('/') else {
        return Err(IdentifierError::UnexpectedContent(rest.to_string()));
    };
    let (minor, rest) = consume_token(after_slash);
    if minor.is_empty() {
        return Err(IdentifierError::ExpectedTokenAfterSlash);
    }
    if !rest.is_empty() {
        return Err(IdentifierError::UnexpectedContent(rest.to_string()));
    }
    Ok(format!("{}/{}", major, minor).to_ascii_lowercase())
}

/// Consume one `; name=value` parameter, returning it and the remaining input.
fn consume_param(s: &str) -> Result<(String, String, &str), IdentifierError> {
    let invalid = || IdentifierError::InvalidParameter(s.to_string());

    let rest = s.strip_prefix(';').ok_or_else(invalid)?;
    let rest = rest.trim_start_matches([' ', '\t']);
    let (name, rest) = consume_token(rest);
    if name.is_empty() {
        return Err(invalid());
    }
    let rest = rest.trim_start_matches([' ', '\t']);
    let rest = rest.strip_prefix('=').ok_or_else(invalid)?;
    let rest = rest.trim_start_matches([' ', '\t']);
    let (value, rest) = consume_value(rest).ok_or_else(invalid)?;
    Ok((name.to_ascii_lowercase(), value, rest))
}

/// Consume a token or a quoted string.
fn consume_value(s: &str) -> Option<(String, &str)> {
    let Some(quoted) = s.strip_prefix('"') else {
        let (token, rest) = consume_token(s);
        if token.is_empty() {
            return None;
        }
        return Some((token.to_string(), rest));
    };

    let mut value = String::new();
    let mut chars = quoted.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Some((value, &quoted[i + 1..])),
            '\\' => {
                let (_, escaped) = chars.next()?;
                value.push(escaped);
            }
            '\r' | '\n' => return None,
            _ => value.push(c),
        }
    }
    None
}
