//! # Message template parsing
//!
//! Translated messages may carry `{{placeholder}}` tokens that get filled in
//! at display time (e.g. `"Delete \"{{name}}\"?"`). This module parses a
//! message into literal and placeholder parts and renders it against a
//! replacement map. A `{{` that does not open a valid placeholder is plain
//! literal text, so rendering never fails on arbitrary catalog content.

use nom::IResult;
use nom::Parser;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_until, take_while_m_n};
use nom::combinator::{all_consuming, map, rest, verify};
use nom::multi::many0;
use nom::sequence::delimited;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum MessagePart {
    Literal(String),
    Placeholder(String),
}

pub fn parse_message(input: &str) -> IResult<&str, Vec<MessagePart>> {
    all_consuming(many0(parse_part)).parse(input)
}

fn parse_part(input: &str) -> IResult<&str, MessagePart> {
    alt((
        map(parse_placeholder, |name| {
            MessagePart::Placeholder(name.to_string())
        }),
        map(parse_literal_text, |text: &str| {
            MessagePart::Literal(text.to_string())
        }),
        // Braces that open no placeholder stay literal.
        map(tag("{{"), |text: &str| MessagePart::Literal(text.to_string())),
    ))
    .parse(input)
}

fn parse_placeholder(input: &str) -> IResult<&str, &str> {
    delimited(tag("{{"), identifier, tag("}}")).parse(input)
}

fn parse_literal_text(input: &str) -> IResult<&str, &str> {
    verify(alt((take_until("{{"), rest)), |s: &&str| !s.is_empty()).parse(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    // Placeholder names are 1-64 alphanumeric, dash or underscore characters
    take_while_m_n(1, 64, |c: char| {
        c.is_alphanumeric() || c == '-' || c == '_'
    })
    .parse(input)
}

/// Substitutes `{{placeholder}}` tokens in `message` from `replacements`.
///
/// Placeholders without a replacement are emitted back verbatim, and a
/// message that fails to parse is returned unchanged.
pub fn render_message(message: &str, replacements: &HashMap<String, String>) -> String {
    let Ok((_, parts)) = parse_message(message) else {
        return message.to_string();
    };

    let mut out = String::new();
    for part in parts {
        match part {
            MessagePart::Literal(text) => out.push_str(&text),
            MessagePart::Placeholder(name) => match replacements.get(&name) {
                Some(value) => out.push_str(value),
                None => {
                    out.push_str("{{");
                    out.push_str(&name);
                    out.push_str("}}");
                }
            },
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replacements(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_plain_literal() {
        let (remaining, parts) = parse_message("Hello there!").unwrap();
        assert_eq!(remaining, "");
        assert_eq!(parts, vec![MessagePart::Literal("Hello there!".to_string())]);
    }

    #[test]
    fn test_parse_placeholder() {
        let result = parse_placeholder("{{name}} rest");
        assert_eq!(result, Ok((" rest", "name")));
    }

    #[test]
    fn test_parse_mixed_message() {
        let (_, parts) = parse_message("Delete \"{{name}}\"?").unwrap();
        assert_eq!(
            parts,
            vec![
                MessagePart::Literal("Delete \"".to_string()),
                MessagePart::Placeholder("name".to_string()),
                MessagePart::Literal("\"?".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_consecutive_placeholders() {
        let (_, parts) = parse_message("{{a}}{{b}}").unwrap();
        assert_eq!(parts.len(), 2);
    }

    #[test]
    fn test_stray_braces_are_literal() {
        let (_, parts) = parse_message("a {{ not a placeholder").unwrap();
        assert!(parts.iter().all(|p| matches!(p, MessagePart::Literal(_))));
    }

    #[test]
    fn test_placeholder_rejects_whitespace() {
        assert!(parse_placeholder("{{ name }}").is_err());
    }

    #[test]
    fn test_render_substitutes() {
        let out = render_message("Hello {{name}}!", &replacements(&[("name", "Ada")]));
        assert_eq!(out, "Hello Ada!");
    }

    #[test]
    fn test_render_leaves_unknown_placeholders() {
        let out = render_message("Hello {{name}}!", &HashMap::new());
        assert_eq!(out, "Hello {{name}}!");
    }

    #[test]
    fn test_render_multiple_occurrences() {
        let out = render_message(
            "{{name}} and {{name}} again",
            &replacements(&[("name", "Bob")]),
        );
        assert_eq!(out, "Bob and Bob again");
    }

    #[test]
    fn test_render_keeps_stray_braces() {
        let out = render_message("set {{x}} to {{{{", &replacements(&[("x", "1")]));
        assert_eq!(out, "set 1 to {{{{");
    }
}
