// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::collections::HashMap;

use crate::{
    scanner::is_identifier_char, Attribute, AttributeValue, Attributes, ParseConfig, RawAttribute,
    Scanner, SourceString,
};

/// Turns an attribute-bearing span into the attribute collection of the
/// owning declaration.
///
/// The span is expected to either start at an `@` introducer (possibly
/// preceded by whitespace, possibly followed by type text) or to be a single
/// bare modifier word such as `required`. Anything malformed degrades to a
/// best-effort partial result; this parser never returns an error.
pub struct AttributeParser {
    config: ParseConfig,
}

impl AttributeParser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ParseConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(config: ParseConfig) -> Self {
        Self {
            config,
        }
    }

    pub fn parse(&self, source: impl Into<SourceString>) -> Attributes {
        let source = source.into();
        let mut attributes = Attributes::new();

        if !source.contains('@') {
            if let Some(word) = bare_word(&source) {
                if self.config.is_modifier_keyword(&word) {
                    attributes.insert(Attribute::modifier(word));
                }
            }

            return attributes;
        }

        let mut scanner = Scanner::new(&source);
        while let Some(raw) = scanner.next() {
            attributes.insert(build_attribute(raw));
        }

        attributes
    }
}

impl Default for AttributeParser {
    fn default() -> Self {
        Self::new()
    }
}

fn build_attribute(raw: RawAttribute) -> Attribute {
    let arguments = match &raw.raw_arguments {
        Some(text) => parse_arguments(text),
        None => HashMap::new(),
    };

    Attribute::new(raw.name.into_value(), arguments, raw.full_text)
}

fn parse_arguments(raw: &SourceString) -> HashMap<SourceString, AttributeValue> {
    let mut arguments = HashMap::new();

    for token in split_top_level(raw, ',') {
        let token = token.trimmed();
        if token.is_empty() {
            continue;
        }

        let Some((key, value)) = classify_argument(token) else {
            continue;
        };

        arguments.insert(key, value);
    }

    arguments
}

/// Classify one comma-separated argument token. Always produces an entry,
/// except for the positional wildcard `*`, which is discarded.
fn classify_argument(token: SourceString) -> Option<(SourceString, AttributeValue)> {
    if token.as_str() == "*" {
        return None;
    }

    if let Some(offset) = top_level_colon(&token) {
        let value = token.sliced(offset + 1, token.len()).trimmed();

        if !value.is_empty() {
            let key = token.sliced(0, offset).trimmed();
            return Some((key, AttributeValue::Text(unquoted(value))));
        }

        // A trailing colon stays part of the key, as in `@objc(objcName:)`.
        return Some((token, AttributeValue::Flag));
    }

    if token.chars().any(char::is_whitespace) {
        // Platform/version pairs such as `iOS 10.0` collapse to one key.
        let key = SourceString::new(token.split_whitespace().collect::<Vec<_>>().join("_"));
        return Some((key, AttributeValue::Flag));
    }

    Some((token, AttributeValue::Flag))
}

/// Split on `separator`, ignoring occurrences inside quotes or nested
/// parentheses.
fn split_top_level(raw: &SourceString, separator: char) -> Vec<SourceString> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut in_quote = false;
    let mut start = 0;

    for (offset, c) in raw.char_indices() {
        match c {
            '"' => in_quote = !in_quote,
            _ if in_quote => {}
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c == separator && depth == 0 => {
                parts.push(raw.sliced(start, offset));
                start = offset + c.len_utf8();
            }
            _ => {}
        }
    }

    parts.push(raw.sliced(start, raw.len()));
    parts
}

fn top_level_colon(token: &SourceString) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_quote = false;

    for (offset, c) in token.char_indices() {
        match c {
            '"' => in_quote = !in_quote,
            _ if in_quote => {}
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ':' if depth == 0 => return Some(offset),
            _ => {}
        }
    }

    None
}

/// Strip one pair of surrounding quotes. No further escape processing.
fn unquoted(value: SourceString) -> SourceString {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        value.sliced(1, value.len() - 1)
    } else {
        value
    }
}

fn bare_word(source: &SourceString) -> Option<SourceString> {
    let word = source.trimmed();

    if word.is_empty() || !word.chars().all(is_identifier_char) {
        return None;
    }

    Some(word)
}
