//! Parser configuration
//!
//! A configuration is the self-closing tag table plus the resource ceilings. Write and read
//! mode differ only in whether `dice` is self-closing.

use crate::tom::ast::TagName;
use crate::tom::limits::Limits;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    pub self_closing: BTreeSet<TagName>,
    pub limits: Limits,
}

impl ParserConfig {
    /// Write mode: `youtube`, `hr` and `dice` are self-closing
    pub fn write() -> Self {
        Self::with_self_closing([TagName::Youtube, TagName::Hr, TagName::Dice])
    }

    /// Read mode: `youtube` and `hr` are self-closing
    pub fn read() -> Self {
        Self::with_self_closing([TagName::Youtube, TagName::Hr])
    }

    pub fn with_self_closing(tags: impl IntoIterator<Item = TagName>) -> Self {
        Self {
            self_closing: tags.into_iter().collect(),
            limits: Limits::default(),
        }
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn is_self_closing(&self, tag: TagName) -> bool {
        self.self_closing.contains(&tag)
    }
}
