// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use serde::Deserialize;

const DEFAULT_MODIFIER_KEYWORDS: &[&str] = &[
    "class",
    "convenience",
    "dynamic",
    "final",
    "indirect",
    "infix",
    "lazy",
    "mutating",
    "nonmutating",
    "optional",
    "override",
    "postfix",
    "prefix",
    "required",
    "static",
    "unowned",
    "weak",
];

/// Parser settings, deserializable from the host tool's configuration file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
#[serde(rename_all = "kebab-case")]
pub struct ParseConfig {
    /// Bare words the parser accepts as keyword-style modifier attributes
    /// when a span contains no introducer.
    pub modifier_keywords: Vec<String>,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            modifier_keywords: DEFAULT_MODIFIER_KEYWORDS
                .iter()
                .map(|word| (*word).to_string())
                .collect(),
        }
    }
}

impl ParseConfig {
    #[must_use]
    pub fn is_modifier_keyword(&self, word: &str) -> bool {
        self.modifier_keywords.iter().any(|keyword| keyword == word)
    }
}
