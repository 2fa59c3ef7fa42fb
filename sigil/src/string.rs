// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{borrow::Borrow, fmt::{Debug, Display}, hash::Hash, ops::{Deref, Index, Range}, sync::Arc};

/// A cheaply clonable substring of a scanned source buffer. Every name,
/// argument key, value and description the parser produces is sliced out of
/// the same allocation, so the original spelling survives verbatim.
#[derive(Clone)]
pub struct SourceString {
    inner: SourceStringImpl,
}

impl SourceString {
    #[must_use]
    pub const fn empty() -> Self {
        Self::new_static("")
    }

    #[must_use]
    pub const fn new_static(str: &'static str) -> SourceString {
        Self {
            inner: SourceStringImpl::Static { str },
        }
    }

    #[must_use]
    pub fn new(str: impl Into<Arc<str>>) -> Self {
        let str = str.into();
        let start = 0;
        let end = str.len();

        Self {
            inner: SourceStringImpl::Dynamic {
                data: Arc::from(str),
                start,
                end,
            },
        }
    }

    #[must_use]
    pub fn sliced(&self, start: usize, end: usize) -> Self {
        if start == end {
            return Self::empty();
        }

        let (new_start, new_end) = (start, end);

        match &self.inner {
            SourceStringImpl::Dynamic { data, start: cur_start, end: cur_end } => {
                let (cur_start, cur_end) = (*cur_start, *cur_end);

                let start = cur_start + new_start;
                let end = cur_start + new_end;

                debug_assert!(start <= data.len(), "Start {start} > length {}, for inputs=({new_start}, {new_end}) current string({cur_start}, {cur_end})='{old_str}'", data.len(), old_str = &data[cur_start..cur_end]);
                debug_assert!(end <= data.len(), "End {end} > length {}, for inputs=({new_start}, {new_end}) current string='{old_str}'", data.len(), old_str = &data[cur_start..cur_end]);

                Self {
                    inner: SourceStringImpl::Dynamic {
                        data: Arc::clone(data),
                        start,
                        end,
                    }
                }
            }

            SourceStringImpl::Static { str } => {
                debug_assert!(start <= str.len());
                debug_assert!(end <= str.len());

                Self {
                    inner: SourceStringImpl::Static {
                        str: &str.index(start..end),
                    },
                }
            }
        }
    }

    /// Slice away the surrounding whitespace, keeping the shared buffer.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        let str = self.as_str();
        let without_leading = str.trim_start();
        let start = str.len() - without_leading.len();
        let end = start + without_leading.trim_end().len();
        self.sliced(start, end)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match &self.inner {
            SourceStringImpl::Dynamic { data, start, end } => {
                &data[*start..*end]
            }

            SourceStringImpl::Static { str } => str,
        }
    }
}

impl Debug for SourceString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(self.as_str(), f)
    }
}

#[derive(Debug, Clone)]
enum SourceStringImpl {
    Dynamic {
        data: Arc<str>,
        start: usize,
        end: usize,
    },
    Static {
        str: &'static str,
    }
}

impl Deref for SourceString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl Borrow<str> for SourceString {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl From<String> for SourceString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SourceString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl PartialEq for SourceString {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for SourceString {}

impl Hash for SourceString {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl PartialEq<str> for SourceString {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for SourceString {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<SourceString> for str {
    fn eq(&self, other: &SourceString) -> bool {
        self == other.as_str()
    }
}

impl Display for SourceString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self.as_str(), f)
    }
}

pub trait Slice<T> {
    fn slice(&self, t: T) -> Self;
}

impl Slice<Range<usize>> for SourceString {
    fn slice(&self, t: Range<usize>) -> Self {
        self.sliced(t.start, t.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("  iOS 10.0  ", "iOS 10.0")]
    #[case("unavailable", "unavailable")]
    #[case("   ", "")]
    #[case("", "")]
    fn trimmed_text(#[case] input: &str, #[case] expected: &str) {
        let actual = SourceString::new(input).trimmed();

        assert_eq!(actual, expected);
    }

    #[rstest]
    fn sliced_shares_content() {
        let full = SourceString::new("@objc(some)");
        let name = full.sliced(1, 5);

        assert_eq!(name, "objc");
        assert_eq!(full.slice(6..10), "some");
    }
}
