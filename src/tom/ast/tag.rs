//! Tag names
//!
//! Tag names are case sensitive and closed: text after `[` that is not one of these (or the
//! legacy `clr<colour>` spelling) is literal content.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Every tag the parser recognises
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagName {
    /// Coloured text, `[clr colour glow?]`
    Clr,
    /// Furigana: attributes are the reading, children the base text
    Ruby,
    /// Dice roll, `[dice min max]`
    Dice,
    /// Spoiler
    Spo,
    /// Small/subdued text
    Sub,
    /// Embedded video, `[youtube url-or-id]`
    Youtube,
    /// Prefix arithmetic, `[calc (op a b ...)]`
    Calc,
    /// Infix arithmetic, `[calcn a op b ...]`
    Calcn,
    /// Ascii art block
    Aa,
    /// Horizontal rule
    Hr,
    /// Bold
    Bld,
    /// Italic
    Itl,
}

impl TagName {
    pub const ALL: [TagName; 12] = [
        TagName::Clr,
        TagName::Ruby,
        TagName::Dice,
        TagName::Spo,
        TagName::Sub,
        TagName::Youtube,
        TagName::Calc,
        TagName::Calcn,
        TagName::Aa,
        TagName::Hr,
        TagName::Bld,
        TagName::Itl,
    ];

    /// Look up a tag by its exact source spelling
    pub fn from_name(name: &str) -> Option<Self> {
        let tag = match name {
            "clr" => TagName::Clr,
            "ruby" => TagName::Ruby,
            "dice" => TagName::Dice,
            "spo" => TagName::Spo,
            "sub" => TagName::Sub,
            "youtube" => TagName::Youtube,
            "calc" => TagName::Calc,
            "calcn" => TagName::Calcn,
            "aa" => TagName::Aa,
            "hr" => TagName::Hr,
            "bld" => TagName::Bld,
            "itl" => TagName::Itl,
            _ => return None,
        };
        Some(tag)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TagName::Clr => "clr",
            TagName::Ruby => "ruby",
            TagName::Dice => "dice",
            TagName::Spo => "spo",
            TagName::Sub => "sub",
            TagName::Youtube => "youtube",
            TagName::Calc => "calc",
            TagName::Calcn => "calcn",
            TagName::Aa => "aa",
            TagName::Hr => "hr",
            TagName::Bld => "bld",
            TagName::Itl => "itl",
        }
    }

    /// The calc flavour of this tag, if it is one of the arithmetic tags
    pub fn calc_kind(self) -> Option<CalcKind> {
        match self {
            TagName::Calc => Some(CalcKind::Calc),
            TagName::Calcn => Some(CalcKind::Calcn),
            _ => None,
        }
    }

    /// How many plain-text attributes a display tag accepts
    ///
    /// Tags whose attributes are evaluated (dice, calc, calcn) or free-form return `None`.
    pub fn text_attribute_arity(self) -> Option<RangeInclusive<usize>> {
        match self {
            TagName::Clr => Some(1..=2),
            TagName::Youtube => Some(1..=1),
            _ => None,
        }
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two arithmetic tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalcKind {
    /// Prefix S-expression form
    Calc,
    /// Infix form with operator precedence
    Calcn,
}

impl CalcKind {
    pub fn tag(self) -> TagName {
        match self {
            CalcKind::Calc => TagName::Calc,
            CalcKind::Calcn => TagName::Calcn,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.tag().as_str()
    }
}

impl fmt::Display for CalcKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for tag in TagName::ALL {
            assert_eq!(TagName::from_name(tag.as_str()), Some(tag));
        }
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert_eq!(TagName::from_name("BLD"), None);
        assert_eq!(TagName::from_name("bold"), None);
    }

    #[test]
    fn test_calc_kind() {
        assert_eq!(TagName::Calcn.calc_kind(), Some(CalcKind::Calcn));
        assert_eq!(TagName::Dice.calc_kind(), None);
        assert_eq!(CalcKind::Calc.tag(), TagName::Calc);
    }

    #[test]
    fn test_text_attribute_arity() {
        assert_eq!(TagName::Clr.text_attribute_arity(), Some(1..=2));
        assert_eq!(TagName::Youtube.text_attribute_arity(), Some(1..=1));
        assert_eq!(TagName::Ruby.text_attribute_arity(), None);
        assert_eq!(TagName::Dice.text_attribute_arity(), None);
    }

    #[test]
    fn test_serde_uses_source_spelling() {
        let json = serde_json::to_string(&TagName::Youtube).unwrap();
        assert_eq!(json, "\"youtube\"");
        let tag: TagName = serde_json::from_str("\"calcn\"").unwrap();
        assert_eq!(tag, TagName::Calcn);
    }
}
