//! Directive syntax parsing.
//!
//! Parses `CommonMark` directive syntax: `:name` (text) and `:::name`
//! (container open) / `:::` (container close).

use cnt_tree::DirectiveArgs;

/// Container fence line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ContainerFence {
    /// Container opening: `:::name[label]{attrs}`
    Open {
        name: String,
        args: DirectiveArgs,
        colon_count: usize,
    },
    /// Container closing: `:::`
    Close { colon_count: usize },
}

/// Parse a whole line for a container fence.
///
/// Returns `None` if the line is not a container fence.
pub(crate) fn parse_container_line(line: &str) -> Option<ContainerFence> {
    let trimmed = line.trim();

    if !trimmed.starts_with(":::") {
        return None;
    }

    let colon_count = trimmed.chars().take_while(|&c| c == ':').count();
    let after_colons = trimmed[colon_count..].trim_start();

    if after_colons.is_empty() {
        return Some(ContainerFence::Close { colon_count });
    }

    let name_len = name_len(after_colons)?;
    let name = &after_colons[..name_len];
    let after_name = &after_colons[name_len..];

    let (label, label_consumed) = parse_brackets(after_name);
    let (attrs_str, _) = parse_braces(&after_name[label_consumed..]);

    Some(ContainerFence::Open {
        name: name.to_owned(),
        args: DirectiveArgs::parse(label, attrs_str),
        colon_count,
    })
}

/// Parse a text directive at the start of `s`, which must begin with `:`.
///
/// Returns `(name, args, bytes_consumed)`.
pub(crate) fn parse_text_directive(s: &str) -> Option<(&str, DirectiveArgs, usize)> {
    let after_colon = s.strip_prefix(':')?;
    let name_len = name_len(after_colon)?;
    let name = &after_colon[..name_len];

    let mut pos = 1 + name_len;

    let (label, label_consumed) = parse_brackets(&s[pos..]);
    pos += label_consumed;

    let (attrs_str, attrs_consumed) = parse_braces(&s[pos..]);
    pos += attrs_consumed;

    Some((name, DirectiveArgs::parse(label, attrs_str), pos))
}

/// Byte length of the directive name at the start of `s`.
///
/// Names start with a letter and continue with alphanumeric characters,
/// hyphens, or underscores.
fn name_len(s: &str) -> Option<usize> {
    let mut chars = s.char_indices();
    let (_, first) = chars.next()?;
    if !first.is_alphabetic() {
        return None;
    }

    let end = chars
        .find(|&(_, c)| !(c.is_alphanumeric() || c == '-' || c == '_'))
        .map_or(s.len(), |(i, _)| i);
    Some(end)
}

/// Parse label from brackets: `[label]`, handling nesting.
///
/// Returns (label, `bytes_consumed`). Unclosed brackets consume nothing.
fn parse_brackets(s: &str) -> (&str, usize) {
    if !s.starts_with('[') {
        return ("", 0);
    }

    let mut depth = 0;

    for (i, c) in s.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return (&s[1..i], i + 1);
                }
            }
            _ => {}
        }
    }

    ("", 0)
}

/// Parse attributes from braces: `{#id .class key="value"}`.
///
/// Braces inside quoted values do not count. Returns (`attrs_str` without
/// braces, `bytes_consumed`). Unclosed braces consume nothing.
fn parse_braces(s: &str) -> (&str, usize) {
    if !s.starts_with('{') {
        return ("", 0);
    }

    let mut depth = 0;
    let mut quote: Option<char> = None;

    for (i, c) in s.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '{') => depth += 1,
            (None, '}') => {
                depth -= 1;
                if depth == 0 {
                    return (&s[1..i], i + 1);
                }
            }
            (None, _) => {}
        }
    }

    ("", 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_directive_with_attrs() {
        let (name, args, consumed) = parse_text_directive(r#":cnt{name="fig" up} rest"#).unwrap();
        assert_eq!(name, "cnt");
        assert_eq!(args.get("name"), Some("fig"));
        assert_eq!(args.get("up"), Some(""));
        assert_eq!(consumed, r#":cnt{name="fig" up}"#.len());
    }

    #[test]
    fn test_text_directive_with_label() {
        let (name, args, consumed) = parse_text_directive(":abbr[HTML]{title='Markup'}").unwrap();
        assert_eq!(name, "abbr");
        assert_eq!(args.label, "HTML");
        assert_eq!(args.get("title"), Some("Markup"));
        assert_eq!(consumed, ":abbr[HTML]{title='Markup'}".len());
    }

    #[test]
    fn test_text_directive_name_only() {
        let (name, args, consumed) = parse_text_directive(":note, then").unwrap();
        assert_eq!(name, "note");
        assert_eq!(args, DirectiveArgs::default());
        assert_eq!(consumed, 5);
    }

    #[test]
    fn test_text_directive_invalid_name() {
        assert!(parse_text_directive(": cnt").is_none());
        assert!(parse_text_directive(":30").is_none());
        assert!(parse_text_directive(":").is_none());
        assert!(parse_text_directive("cnt").is_none());
    }

    #[test]
    fn test_container_open() {
        let fence = parse_container_line(":::cnt{reset}").unwrap();
        match fence {
            ContainerFence::Open {
                name,
                args,
                colon_count,
            } => {
                assert_eq!(name, "cnt");
                assert!(args.has("reset"));
                assert_eq!(colon_count, 3);
            }
            ContainerFence::Close { .. } => panic!("expected container open"),
        }
    }

    #[test]
    fn test_container_open_with_label_and_space() {
        let fence = parse_container_line("::: details[Click to expand]").unwrap();
        match fence {
            ContainerFence::Open { name, args, .. } => {
                assert_eq!(name, "details");
                assert_eq!(args.label, "Click to expand");
            }
            ContainerFence::Close { .. } => panic!("expected container open"),
        }
    }

    #[test]
    fn test_container_close() {
        assert_eq!(
            parse_container_line(":::"),
            Some(ContainerFence::Close { colon_count: 3 })
        );
        assert_eq!(
            parse_container_line("::::  "),
            Some(ContainerFence::Close { colon_count: 4 })
        );
    }

    #[test]
    fn test_not_container() {
        assert!(parse_container_line("regular text").is_none());
        assert!(parse_container_line("::leaf").is_none());
        assert!(parse_container_line(":::@bad").is_none());
    }

    #[test]
    fn test_parse_brackets() {
        assert_eq!(parse_brackets("[hello] rest"), ("hello", 7));
        assert_eq!(
            parse_brackets("[nested [brackets]]"),
            ("nested [brackets]", 19)
        );
        assert_eq!(parse_brackets("no brackets"), ("", 0));
        assert_eq!(parse_brackets("[unclosed"), ("", 0));
    }

    #[test]
    fn test_parse_braces() {
        assert_eq!(parse_braces("{#id}"), ("#id", 5));
        assert_eq!(parse_braces(r#"{name="a}b"} x"#), (r#"name="a}b""#, 12));
        assert_eq!(parse_braces("no braces"), ("", 0));
        assert_eq!(parse_braces("{unclosed"), ("", 0));
    }
}
