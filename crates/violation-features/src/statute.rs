//! Statute citation parsing
//!
//! Reduces a free-text legal citation such as `"§ 125c odst. 1 písm. k)"`
//! to a canonical `paragraph[/subclause]` token (`"125c/k"`).

use crate::error::Result;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;

/// Code for citations without a recognizable paragraph
pub const OTHER_LAW: &str = "OTHER";

/// First digit run with an optional trailing letter, optionally after `§`
const PARAGRAPH_PATTERN: &str = r"(?:§\s*|^)?(\d+[a-z]?)";

/// A single letter closed by a parenthesis, e.g. `k)`
const SUBCLAUSE_PATTERN: &str = r"([a-z])\)";

/// Canonical identity of a citation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StatuteToken {
    /// Digits plus optional letter, e.g. `125c`
    pub paragraph: String,
    /// Subclause letter, e.g. `k`
    pub subclause: Option<char>,
}

impl fmt::Display for StatuteToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.subclause {
            Some(letter) => write!(f, "{}/{}", self.paragraph, letter),
            None => f.write_str(&self.paragraph),
        }
    }
}

/// Law code feature value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LawCode {
    Statute(StatuteToken),
    Other,
}

impl LawCode {
    pub fn token(&self) -> Option<&StatuteToken> {
        match self {
            LawCode::Statute(token) => Some(token),
            LawCode::Other => None,
        }
    }
}

impl fmt::Display for LawCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LawCode::Statute(token) => token.fmt(f),
            LawCode::Other => f.write_str(OTHER_LAW),
        }
    }
}

impl Serialize for LawCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Regex-driven citation parser
#[derive(Debug, Clone)]
pub struct StatuteParser {
    paragraph: Regex,
    subclause: Regex,
}

impl StatuteParser {
    /// Compile the citation patterns
    pub fn new() -> Result<Self> {
        Ok(Self {
            paragraph: Regex::new(PARAGRAPH_PATTERN)?,
            subclause: Regex::new(SUBCLAUSE_PATTERN)?,
        })
    }

    /// Parse a citation into its canonical token
    pub fn parse(&self, text: Option<&str>) -> LawCode {
        let Some(text) = text else {
            return LawCode::Other;
        };
        let text = text.to_lowercase();
        let text = text.trim();

        let Some(paragraph) = self
            .paragraph
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
        else {
            return LawCode::Other;
        };

        let subclause = self
            .subclause
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().chars().next());

        LawCode::Statute(StatuteToken {
            paragraph,
            subclause,
        })
    }
}
