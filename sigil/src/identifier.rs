// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use strum::IntoEnumIterator;

/// Well-known attribute names, for callers that want to branch on the usual
/// suspects without string-matching. Attributes whose name is not in this
/// list are still parsed and represented in full; nothing is validated
/// against it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[derive(strum::AsRefStr, strum::EnumIter)]
pub enum AttributeIdentifier {
    #[strum(serialize = "autoclosure")]
    Autoclosure,
    #[strum(serialize = "available")]
    Available,
    #[strum(serialize = "convention")]
    Convention,
    #[strum(serialize = "discardableResult")]
    DiscardableResult,
    #[strum(serialize = "escaping")]
    Escaping,
    #[strum(serialize = "GKInspectable")]
    GkInspectable,
    #[strum(serialize = "IBAction")]
    IbAction,
    #[strum(serialize = "IBDesignable")]
    IbDesignable,
    #[strum(serialize = "IBInspectable")]
    IbInspectable,
    #[strum(serialize = "IBOutlet")]
    IbOutlet,
    #[strum(serialize = "nonobjc")]
    NonObjc,
    #[strum(serialize = "NSApplicationMain")]
    NsApplicationMain,
    #[strum(serialize = "NSCopying")]
    NsCopying,
    #[strum(serialize = "NSManaged")]
    NsManaged,
    #[strum(serialize = "objc")]
    Objc,
    #[strum(serialize = "objcMembers")]
    ObjcMembers,
    #[strum(serialize = "UIApplicationMain")]
    UiApplicationMain,
}

impl AttributeIdentifier {
    pub fn parse(input: &str) -> Option<Self> {
        Self::iter().find(|x| x.as_ref() == input)
    }

    /// Whether this attribute commonly carries an argument list. A hint
    /// only; the argument grammar accepts parentheses on any attribute.
    #[must_use]
    pub const fn has_arguments(&self) -> bool {
        match self {
            Self::Available | Self::Convention | Self::Objc => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn parse_roundtrips_every_variant() {
        for identifier in AttributeIdentifier::iter() {
            assert_eq!(AttributeIdentifier::parse(identifier.as_ref()), Some(identifier));
        }
    }

    #[rstest]
    #[case("discardableResult", Some(AttributeIdentifier::DiscardableResult))]
    #[case("NSCopying", Some(AttributeIdentifier::NsCopying))]
    #[case("nscopying", None)]
    #[case("madeUpAttribute", None)]
    fn parse_text(#[case] input: &str, #[case] expected: Option<AttributeIdentifier>) {
        assert_eq!(AttributeIdentifier::parse(input), expected);
    }

    #[rstest]
    fn argument_hints() {
        assert!(AttributeIdentifier::Available.has_arguments());
        assert!(AttributeIdentifier::Objc.has_arguments());
        assert!(!AttributeIdentifier::Escaping.has_arguments());
    }
}
