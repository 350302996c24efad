//! Directive argument parsing.
//!
//! Parses the `[label]{#id .class key="value" flag}` syntax from directives.

use std::collections::HashMap;

/// Parsed arguments from directive syntax.
///
/// Represents the label and attributes extracted from a directive:
/// `:name[label]{#id .class key="value" flag}`
///
/// Attributes without a value (`{reset}`) are stored with an empty string,
/// so presence checks work the same for `{reset}` and `{reset="3"}`.
///
/// # Example
///
/// ```
/// use cnt_tree::DirectiveArgs;
///
/// let args = DirectiveArgs::parse("", r#"name="fig" reset"#);
/// assert_eq!(args.get("name"), Some("fig"));
/// assert_eq!(args.get("reset"), Some(""));
/// assert_eq!(args.get("up"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectiveArgs {
    /// Label from brackets: `[label]` (empty string if not provided).
    pub label: String,
    /// ID from attributes: `{#id}`.
    pub id: Option<String>,
    /// Classes from attributes: `{.class1 .class2}`.
    pub classes: Vec<String>,
    /// Key-value attributes: `{key="value"}` or bare `{key}`.
    pub attrs: HashMap<String, String>,
}

impl DirectiveArgs {
    /// Parse label and attributes string into structured arguments.
    ///
    /// # Arguments
    ///
    /// * `label` - The label from brackets `[label]`
    /// * `attrs_str` - The attributes string from braces `{...}` (without braces)
    #[must_use]
    pub fn parse(label: &str, attrs_str: &str) -> Self {
        let mut args = Self {
            label: label.to_owned(),
            ..Default::default()
        };

        let mut remaining = attrs_str.trim();

        while !remaining.is_empty() {
            if let Some(rest) = remaining.strip_prefix('#') {
                let end = shorthand_end(rest);
                if end > 0 {
                    args.id = Some(rest[..end].to_owned());
                }
                remaining = &rest[end..];
            } else if let Some(rest) = remaining.strip_prefix('.') {
                let end = shorthand_end(rest);
                if end > 0 {
                    args.classes.push(rest[..end].to_owned());
                }
                remaining = &rest[end..];
            } else if let Some((key, value, rest)) = parse_attribute(remaining) {
                args.attrs.insert(key.to_owned(), value.to_owned());
                remaining = rest;
            } else {
                // Skip unrecognized character
                let mut chars = remaining.chars();
                chars.next();
                remaining = chars.as_str();
            }

            remaining = remaining.trim_start();
        }

        args
    }

    /// Get an attribute value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Check whether an attribute is present, with or without a value.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.attrs.contains_key(key)
    }

    /// Reconstruct the directive syntax `[label]{attrs}`.
    ///
    /// Keys are sorted so the output is deterministic. Attributes with an
    /// empty value are written as bare keys.
    ///
    /// # Example
    ///
    /// ```
    /// use cnt_tree::DirectiveArgs;
    ///
    /// let args = DirectiveArgs::parse("Figure", r#"reset name="fig""#);
    /// assert_eq!(args.to_syntax(), r#"[Figure]{name="fig" reset}"#);
    /// ```
    #[must_use]
    pub fn to_syntax(&self) -> String {
        let mut result = String::new();

        if !self.label.is_empty() {
            result.push('[');
            result.push_str(&self.label);
            result.push(']');
        }

        let mut attrs_parts = Vec::new();

        if let Some(id) = &self.id {
            attrs_parts.push(format!("#{id}"));
        }

        for class in &self.classes {
            attrs_parts.push(format!(".{class}"));
        }

        let mut keys: Vec<_> = self.attrs.keys().collect();
        keys.sort();
        for key in keys {
            let value = &self.attrs[key];
            if value.is_empty() {
                attrs_parts.push(key.clone());
            } else {
                let escaped = value.replace('"', "&quot;");
                attrs_parts.push(format!(r#"{key}="{escaped}""#));
            }
        }

        if !attrs_parts.is_empty() {
            result.push('{');
            result.push_str(&attrs_parts.join(" "));
            result.push('}');
        }

        result
    }
}

/// Check if a name is a valid directive name.
///
/// Names start with a letter and continue with alphanumeric characters,
/// hyphens, or underscores.
#[must_use]
pub fn is_valid_directive_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(char::is_alphabetic)
        && chars.all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

/// Byte length of an `#id` or `.class` shorthand token.
fn shorthand_end(s: &str) -> usize {
    s.find(|c: char| c.is_whitespace() || c == '.' || c == '#')
        .unwrap_or(s.len())
}

/// Parse one attribute from the attributes string.
///
/// Supports: `key="value"`, `key='value'`, `key=value` and bare `key`.
/// Returns `(key, value, rest)`.
fn parse_attribute(s: &str) -> Option<(&str, &str, &str)> {
    let key_end = s
        .find(|c: char| c.is_whitespace() || c == '=')
        .unwrap_or(s.len());
    let key = &s[..key_end];

    if key.is_empty() || key.starts_with(['#', '.', '"', '\'']) {
        return None;
    }

    let after_key = s[key_end..].trim_start();
    let Some(after_eq) = after_key.strip_prefix('=') else {
        return Some((key, "", &s[key_end..]));
    };
    let after_eq = after_eq.trim_start();

    if let Some(stripped) = after_eq.strip_prefix('"') {
        let end_quote = stripped.find('"')?;
        Some((key, &stripped[..end_quote], &stripped[end_quote + 1..]))
    } else if let Some(stripped) = after_eq.strip_prefix('\'') {
        let end_quote = stripped.find('\'')?;
        Some((key, &stripped[..end_quote], &stripped[end_quote + 1..]))
    } else {
        let end = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
        Some((key, &after_eq[..end], &after_eq[end..]))
    }
}
