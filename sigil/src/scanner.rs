// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::str::CharIndices;

use strum::AsRefStr;

use crate::{FileLocation, FileRange, Ranged, SourceString};

/// One `@name` or `@name(...)` occurrence, exactly as it appeared.
///
/// `raw_arguments` is the text between the parentheses, exclusive, and is
/// `Some("")` for the `@name()` form. `full_text` runs from the `@` through
/// the closing parenthesis, or through the name when there are no arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAttribute {
    pub name: Ranged<SourceString>,
    pub raw_arguments: Option<SourceString>,
    pub full_text: SourceString,
    pub range: FileRange,
}

/// Walks a span and yields the top-level attribute occurrences in order of
/// appearance.
///
/// Parenthesized regions that do not belong to an attribute (a function type
/// such as `(@escaping ()->())->()`) are skipped as opaque text, so an
/// attribute nested inside a type expression is never reported as a sibling
/// of the enclosing span. Quoted strings are equally opaque.
///
/// The scanner never fails: unbalanced parentheses and unterminated strings
/// end the capture at the end of the span, and the problem is recorded as a
/// [`ScanDiagnostic`].
pub struct Scanner<'source> {
    source: &'source SourceString,
    chars: CharIndices<'source>,

    current: Option<(FileLocation, char)>,
    line: usize,
    column: usize,
    depth: usize,
    diagnostics: Vec<ScanDiagnostic>,
}

impl<'source> Scanner<'source> {
    pub fn new(source: &'source SourceString) -> Self {
        Self {
            source,
            chars: source.as_str().char_indices(),
            current: None,
            line: 0,
            column: 0,
            depth: 0,
            diagnostics: Vec::new(),
        }
    }

    pub fn next(&mut self) -> Option<RawAttribute> {
        loop {
            self.skip_to_introducer()?;

            let begin = self.current_location();
            self.consume_char();

            let name = self.consume_identifier();
            if name.value().is_empty() {
                // An `@` without an identifier is not an attribute.
                continue;
            }

            // Only a parenthesis glued to the name opens an argument list;
            // `@escaping (...)->()` is a bare attribute followed by a type.
            let raw_arguments = if self.peek_char() == Some('(') {
                Some(self.capture_arguments())
            } else {
                None
            };

            let end = self.current_location();
            let full_text = self.source.sliced(begin.offset(), end.offset());
            log::trace!("scanned attribute `{}` at {begin}", name.value());

            return Some(RawAttribute {
                name,
                raw_arguments,
                full_text,
                range: FileRange::new(begin, end),
            });
        }
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[ScanDiagnostic] {
        &self.diagnostics
    }

    #[must_use]
    pub fn into_diagnostics(self) -> Vec<ScanDiagnostic> {
        self.diagnostics
    }

    fn skip_to_introducer(&mut self) -> Option<()> {
        loop {
            let c = self.peek_char()?;

            match c {
                '"' => self.skip_quoted(),

                '(' => {
                    self.depth += 1;
                    self.consume_char();
                }

                ')' => {
                    self.depth = self.depth.saturating_sub(1);
                    self.consume_char();
                }

                '@' if self.depth == 0 => return Some(()),

                _ => self.consume_char(),
            }
        }
    }

    fn skip_quoted(&mut self) {
        let start = self.current_location();
        self.consume_char();

        loop {
            match self.peek_char() {
                Some('"') => {
                    self.consume_char();
                    return;
                }

                Some(_) => self.consume_char(),

                None => {
                    self.emit_diagnostic(ScanDiagnostic::UnterminatedString { location: start });
                    return;
                }
            }
        }
    }

    fn consume_identifier(&mut self) -> Ranged<SourceString> {
        let begin = self.current_location();

        loop {
            let Some(c) = self.peek_char() else {
                break;
            };

            if !is_identifier_char(c) {
                break;
            }

            self.consume_char();
        }

        let end = self.current_location();
        let str = self.source.sliced(begin.offset(), end.offset());

        Ranged::new(FileRange::new(begin, end), str)
    }

    fn capture_arguments(&mut self) -> SourceString {
        let open = self.current_location();
        self.consume_char();

        let start = self.current_location().offset();
        let mut depth = 1usize;

        loop {
            match self.peek_char() {
                Some('"') => self.skip_quoted(),

                Some('(') => {
                    depth += 1;
                    self.consume_char();
                }

                Some(')') => {
                    depth -= 1;

                    if depth == 0 {
                        let end = self.current_location().offset();
                        self.consume_char();
                        return self.source.sliced(start, end);
                    }

                    self.consume_char();
                }

                Some(_) => self.consume_char(),

                None => {
                    let range = FileRange::new(open, self.current_location());
                    self.emit_diagnostic(ScanDiagnostic::UnbalancedParenthesis { range });
                    return self.source.sliced(start, self.current_location().offset());
                }
            }
        }
    }

    fn emit_diagnostic(&mut self, diagnostic: ScanDiagnostic) {
        log::warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    fn peek_char(&mut self) -> Option<char> {
        if let Some((_, c)) = self.current {
            return Some(c);
        }

        self.current = self.chars.next()
            .map(|(offset, char)| {
                let location = FileLocation::new(offset, self.line, self.column);

                if char == '\n' {
                    self.line += 1;
                    self.column = 0;
                } else {
                    self.column += 1;
                }

                (location, char)
            });
        Some(self.current?.1)
    }

    fn consume_char(&mut self) {
        self.current = None;
        _ = self.peek_char();
    }

    fn current_location(&mut self) -> FileLocation {
        _ = self.peek_char();
        match self.current {
            Some((location, _)) => location,
            None => FileLocation::new(self.source.len(), self.line, self.column),
        }
    }
}

impl<'source> Iterator for Scanner<'source> {
    type Item = RawAttribute;

    fn next(&mut self) -> Option<Self::Item> {
        self.next()
    }
}

pub(crate) fn is_identifier_char(c: char) -> bool {
    ('a'..='z').contains(&c)
        || ('A'..='Z').contains(&c)
        || ('0'..='9').contains(&c)
        || c == '_'
}

/// Advisory problem found while scanning. The scan itself always runs to the
/// end of the span and keeps whatever it captured.
#[derive(Clone, Debug, thiserror::Error, AsRefStr)]
pub enum ScanDiagnostic {
    #[error("unbalanced parenthesis in attribute arguments opened at {}", range.start())]
    UnbalancedParenthesis { range: FileRange },

    #[error("unterminated string literal starting at {location}")]
    UnterminatedString { location: FileLocation },
}

impl ScanDiagnostic {
    #[must_use]
    pub fn location(&self) -> FileLocation {
        match self {
            Self::UnbalancedParenthesis { range } => range.start(),
            Self::UnterminatedString { location } => *location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn scan(input: &'static str) -> Vec<RawAttribute> {
        let source = SourceString::new_static(input);
        Scanner::new(&source).collect()
    }

    #[rstest]
    #[case("@escaping", "escaping", None, "@escaping")]
    #[case("  @escaping  ", "escaping", None, "@escaping")]
    #[case("@objc(some) var name: String", "objc", Some("some"), "@objc(some)")]
    #[case("@available(*, unavailable)", "available", Some("*, unavailable"), "@available(*, unavailable)")]
    #[case("@objc()", "objc", Some(""), "@objc()")]
    #[case("@foo(a, (b, c), d)", "foo", Some("a, (b, c), d"), "@foo(a, (b, c), d)")]
    fn single_occurrence(
        #[case] input: &'static str,
        #[case] name: &str,
        #[case] raw_arguments: Option<&str>,
        #[case] full_text: &str,
    ) {
        let occurrences = scan(input);

        assert_eq!(occurrences.len(), 1, "input: {input}");
        let raw = &occurrences[0];
        assert_eq!(raw.name.value().as_str(), name);
        assert_eq!(raw.raw_arguments.as_ref().map(|x| x.as_str()), raw_arguments);
        assert_eq!(raw.full_text.as_str(), full_text);
    }

    #[rstest]
    #[case("()->()", 0)]
    #[case("", 0)]
    #[case("@", 0)]
    #[case("@ escaping", 0)]
    #[case("@autoclosure @convention(swift) @escaping (@escaping ()->())->()", 3)]
    #[case("@convention(swift) (@escaping ()->())->()", 1)]
    #[case("@discardableResult\n@objc(some)", 2)]
    fn occurrence_count(#[case] input: &'static str, #[case] expected: usize) {
        assert_eq!(scan(input).len(), expected, "input: {input}");
    }

    #[rstest]
    fn attribute_followed_by_type_has_no_arguments() {
        let occurrences = scan("@escaping (@escaping ()->())->()");

        assert_eq!(occurrences.len(), 1);
        assert_eq!(occurrences[0].name.value().as_str(), "escaping");
        assert_eq!(occurrences[0].raw_arguments, None);
        assert_eq!(occurrences[0].full_text.as_str(), "@escaping");
    }

    #[rstest]
    fn quoted_parenthesis_is_opaque() {
        let occurrences = scan("@foo(message: \"a, b (c)\")");

        assert_eq!(occurrences.len(), 1);
        assert_eq!(
            occurrences[0].raw_arguments.as_ref().map(|x| x.as_str()),
            Some("message: \"a, b (c)\"")
        );
    }

    #[rstest]
    fn unbalanced_arguments_capture_until_end_of_span() {
        let source = SourceString::new_static("@available(iOS 10.0");
        let mut scanner = Scanner::new(&source);

        let raw = scanner.next().unwrap();
        assert_eq!(raw.raw_arguments.as_ref().map(|x| x.as_str()), Some("iOS 10.0"));
        assert_eq!(raw.full_text, "@available(iOS 10.0");

        assert_eq!(scanner.next(), None);
        assert_eq!(scanner.diagnostics().len(), 1);
        assert!(matches!(
            scanner.diagnostics()[0],
            ScanDiagnostic::UnbalancedParenthesis { .. }
        ));
    }

    #[rstest]
    fn locations_track_lines_and_columns() {
        let occurrences = scan("@discardableResult\n@objc(some)");

        let objc = &occurrences[1];
        assert_eq!(objc.range.start(), FileLocation::new(19, 1, 0));
        assert_eq!(objc.range.end(), FileLocation::new(30, 1, 11));
    }
}
