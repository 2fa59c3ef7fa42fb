// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::collections::HashMap;
use std::collections::hash_map;

use crate::{AttributeIdentifier, SourceString};

/// The value of one attribute argument: a bare flag (`unavailable`,
/// `swift`, `iOS_10.0`) or a textual payload (`renamed: "Use ..."`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    Flag,
    Text(SourceString),
}

impl AttributeValue {
    #[must_use]
    pub const fn is_flag(&self) -> bool {
        matches!(self, Self::Flag)
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::Flag => None,
        }
    }
}

/// One parsed declaration attribute.
///
/// `description` is the attribute exactly as it was written (`@name`,
/// `@name(raw arguments)`, or a bare modifier word); the argument mapping is
/// lossy with respect to the source, the description never is. Equality is
/// structural, and the argument mapping compares independent of insertion
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    name: SourceString,
    arguments: HashMap<SourceString, AttributeValue>,
    description: SourceString,
}

impl Attribute {
    #[must_use]
    pub fn new(
        name: SourceString,
        arguments: HashMap<SourceString, AttributeValue>,
        description: SourceString,
    ) -> Self {
        debug_assert!(!name.is_empty());
        debug_assert!(!description.is_empty());

        Self {
            name,
            arguments,
            description,
        }
    }

    /// An argumentless `@name` attribute.
    #[must_use]
    pub fn named(name: impl Into<SourceString>) -> Self {
        let name = name.into();
        let description = SourceString::new(format!("@{name}"));

        Self::new(name, HashMap::new(), description)
    }

    /// A keyword-style declaration modifier such as `required` or
    /// `convenience`: no introducer, no arguments, the word is its own
    /// description.
    #[must_use]
    pub fn modifier(word: impl Into<SourceString>) -> Self {
        let word = word.into();

        Self::new(word.clone(), HashMap::new(), word)
    }

    #[must_use]
    pub fn name(&self) -> &SourceString {
        &self.name
    }

    #[must_use]
    pub fn arguments(&self) -> &HashMap<SourceString, AttributeValue> {
        &self.arguments
    }

    #[must_use]
    pub fn description(&self) -> &SourceString {
        &self.description
    }

    /// The well-known identifier this attribute corresponds to, if any.
    #[must_use]
    pub fn identifier(&self) -> Option<AttributeIdentifier> {
        AttributeIdentifier::parse(&self.name)
    }

    #[must_use]
    pub fn argument(&self, key: &str) -> Option<&AttributeValue> {
        self.arguments.get(key)
    }

    #[must_use]
    pub fn has_flag(&self, key: &str) -> bool {
        matches!(self.arguments.get(key), Some(AttributeValue::Flag))
    }

    #[must_use]
    pub fn string_argument(&self, key: &str) -> Option<&str> {
        self.arguments.get(key)?.as_text()
    }
}

/// The attributes owned by one declaration, keyed by attribute name.
///
/// Inserting an attribute whose name is already present overwrites the
/// earlier entry, so repeated occurrences in one span collapse to the last
/// one. A declaration without attributes owns an empty collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: HashMap<SourceString, Attribute>,
}

impl Attributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, attribute: Attribute) {
        self.entries.insert(attribute.name.clone(), attribute);
    }

    pub fn merge(&mut self, other: Attributes) {
        for attribute in other {
            self.insert(attribute);
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.entries.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.entries.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &SourceString> {
        self.entries.keys()
    }
}

impl IntoIterator for Attributes {
    type Item = Attribute;
    type IntoIter = hash_map::IntoValues<SourceString, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_values()
    }
}

impl FromIterator<Attribute> for Attributes {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        let mut attributes = Self::new();

        for attribute in iter {
            attributes.insert(attribute);
        }

        attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn arguments(entries: &[(&str, AttributeValue)]) -> HashMap<SourceString, AttributeValue> {
        entries
            .iter()
            .map(|(key, value)| (SourceString::new(*key), value.clone()))
            .collect()
    }

    #[rstest]
    fn equality_ignores_argument_order() {
        let left = Attribute::new(
            SourceString::new("available"),
            arguments(&[
                ("unavailable", AttributeValue::Flag),
                ("renamed", AttributeValue::Text(SourceString::new("X"))),
            ]),
            SourceString::new("@available(unavailable, renamed: \"X\")"),
        );
        let right = Attribute::new(
            SourceString::new("available"),
            arguments(&[
                ("renamed", AttributeValue::Text(SourceString::new("X"))),
                ("unavailable", AttributeValue::Flag),
            ]),
            SourceString::new("@available(unavailable, renamed: \"X\")"),
        );

        assert_eq!(left, right);
    }

    #[rstest]
    fn named_and_modifier_descriptions() {
        assert_eq!(Attribute::named("escaping").description().as_str(), "@escaping");
        assert_eq!(Attribute::modifier("required").description().as_str(), "required");
        assert_eq!(Attribute::modifier("required").name().as_str(), "required");
    }

    #[rstest]
    fn insert_overwrites_existing_name() {
        let mut attributes = Attributes::new();
        attributes.insert(Attribute::named("objc"));
        attributes.insert(Attribute::new(
            SourceString::new("objc"),
            arguments(&[("some", AttributeValue::Flag)]),
            SourceString::new("@objc(some)"),
        ));

        assert_eq!(attributes.len(), 1);
        assert!(attributes.get("objc").unwrap().has_flag("some"));
    }

    #[rstest]
    fn merge_combines_collections() {
        let mut first = Attributes::from_iter([Attribute::named("escaping")]);
        let second = Attributes::from_iter([Attribute::modifier("required")]);

        first.merge(second);

        assert_eq!(first.len(), 2);
        assert!(first.contains("escaping"));
        assert!(first.contains("required"));
    }

    #[rstest]
    fn known_identifier_lookup() {
        assert_eq!(
            Attribute::named("escaping").identifier(),
            Some(AttributeIdentifier::Escaping)
        );
        assert_eq!(Attribute::named("somethingElse").identifier(), None);
    }
}
