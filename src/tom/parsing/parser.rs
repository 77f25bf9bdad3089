//! Frame-stack parser
//!
//! The parser walks the token stream once, keeping an explicit stack of [frames](super::frame)
//! instead of recursing. The depth ceiling is checked before every push, so adversarial
//! nesting is rejected deterministically no matter how deep the host call stack could go.
//!
//! Transitions
//!
//!     `[`     Expect a tag name next. `[[` emits a literal `[` and keeps expecting.
//!     name    A known tag (or legacy `clr<colour>`) pushes the element's children frame and
//!             then its attribute frame. `/name` matching the innermost open element closes
//!             it. Anything else is literal `[` + text, absorbing a directly following `]`.
//!     `]`     Swallowed right after a closing tag. Pops an attribute frame, and for a
//!             self-closing tag the children frame too. Otherwise literal.
//!     `(`     Opens a nested group inside attribute or nested context. Otherwise literal.
//!     `)`     Closes a nested group. Otherwise literal.
//!     space   Separator inside attribute or nested context, literal in a body.
//!     text    Own node inside attribute or nested context, merged in a body.
//!
//! End of input
//!
//!     A pending `[` becomes literal. An unclosed group is flattened to `(` + contents. An
//!     element whose attribute section never closed is demoted to the literal `[name attr...`.
//!     An element whose body never closed is kept, implicitly closed.

use super::config::ParserConfig;
use super::frame::{Context, Frame};
use crate::tom::ast::{Node, Root, TagName};
use crate::tom::error::Result;
use crate::tom::serializer;
use crate::tom::token::Token;
use once_cell::sync::Lazy;
use regex::Regex;
use std::iter::Peekable;
use std::slice::Iter;

/// Legacy colour spelling, `[clrred]...[/clrred]`
static LEGACY_COLOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^clr([a-z0-9-]+)$").unwrap());

type TokenIter<'a> = Peekable<Iter<'a, Token>>;

/// Parse a token stream into a tree under the given configuration
pub fn parse_tokens(tokens: &[Token], config: &ParserConfig) -> Result<Root> {
    config.limits.check_tokens(tokens.len())?;

    let mut machine = Machine::new(config);
    let mut rest = tokens.iter().peekable();
    while let Some(token) = rest.next() {
        machine.step(token, &mut rest)?;
    }
    Ok(machine.finish())
}

struct Machine<'c> {
    config: &'c ParserConfig,
    root: Frame,
    stack: Vec<Frame>,
    expecting_tag: bool,
    just_closed: bool,
}

impl<'c> Machine<'c> {
    fn new(config: &'c ParserConfig) -> Self {
        Self {
            config,
            root: Frame::root(),
            stack: Vec::new(),
            expecting_tag: false,
            just_closed: false,
        }
    }

    fn top(&mut self) -> &mut Frame {
        self.stack.last_mut().unwrap_or(&mut self.root)
    }

    /// Frames currently open, root included
    fn depth(&self) -> usize {
        self.stack.len() + 1
    }

    fn push_frame(&mut self, frame: Frame) -> Result<()> {
        self.config.limits.check_depth(self.depth())?;
        log::trace!(
            target: "tom.parser",
            "push {:?} frame for {:?} at depth {}",
            frame.context,
            frame.tag,
            self.depth()
        );
        self.stack.push(frame);
        Ok(())
    }

    fn step(&mut self, token: &Token, rest: &mut TokenIter<'_>) -> Result<()> {
        let just_closed = std::mem::take(&mut self.just_closed);

        if self.expecting_tag {
            match token {
                Token::Text(text) => {
                    self.expecting_tag = false;
                    return self.tag_name(text, rest);
                }
                Token::OpenBracket => {
                    self.top().push_text("[");
                    return Ok(());
                }
                _ => {
                    self.expecting_tag = false;
                    self.top().push_text("[");
                }
            }
        }

        match token {
            Token::OpenBracket => self.expecting_tag = true,
            Token::CloseBracket => {
                if !just_closed {
                    self.close_bracket();
                }
            }
            Token::OpenParen => {
                if self.top().context.is_argument() {
                    self.push_frame(Frame::nested())?;
                } else {
                    self.top().push_text("(");
                }
            }
            Token::CloseParen => {
                if self.top().context == Context::Nested {
                    self.close_nested();
                } else {
                    self.top().push_text(")");
                }
            }
            Token::Space => {
                if self.top().context == Context::Children {
                    self.top().push_text(" ");
                }
            }
            Token::Text(text) => self.top().push_text(text),
        }
        Ok(())
    }

    fn tag_name(&mut self, text: &str, rest: &mut TokenIter<'_>) -> Result<()> {
        if let Some(closing) = text.strip_prefix('/') {
            if let Some(tag) = resolve_closing(closing) {
                let top = self.top();
                if top.context == Context::Children && top.tag == Some(tag) {
                    self.close_element();
                    self.just_closed = true;
                    return Ok(());
                }
            }
        } else if let Some(tag) = TagName::from_name(text) {
            return self.open_element(tag, None);
        } else if let Some(caps) = LEGACY_COLOR.captures(text) {
            let colour = caps[1].to_string();
            return self.open_element(TagName::Clr, Some((text.to_string(), colour)));
        }

        let mut literal = String::with_capacity(text.len() + 2);
        literal.push('[');
        literal.push_str(text);
        if rest.next_if(|t| matches!(t, Token::CloseBracket)).is_some() {
            literal.push(']');
        }
        self.top().push_text(&literal);
        Ok(())
    }

    /// Push the children frame and the attribute frame of a new element
    ///
    /// `legacy` carries the tag text as written and the colour it embeds.
    fn open_element(&mut self, tag: TagName, legacy: Option<(String, String)>) -> Result<()> {
        let self_closing = self.config.is_self_closing(tag);
        self.push_frame(Frame::children(tag, self_closing))?;

        let (alias, colour) = match legacy {
            Some((alias, colour)) => (Some(alias), Some(colour)),
            None => (None, None),
        };
        let mut section = Frame::attribute(tag, self_closing, alias);
        if let Some(colour) = colour {
            section.nodes.push(Node::text(colour));
        }
        self.push_frame(section)
    }

    fn close_bracket(&mut self) {
        if self.top().context != Context::Attribute {
            self.top().push_text("]");
            return;
        }
        if let Some(section) = self.stack.pop() {
            let self_closing = section.self_closing;
            self.top().attributes = section.nodes;
            if self_closing {
                self.close_element();
            }
        }
    }

    fn close_element(&mut self) {
        if let Some(frame) = self.stack.pop() {
            if let Some(element) = frame.into_element() {
                self.top().push_node(element);
            }
        }
    }

    fn close_nested(&mut self) {
        if let Some(frame) = self.stack.pop() {
            self.top().push_node(Node::nested(frame.nodes));
        }
    }

    fn finish(mut self) -> Root {
        if self.expecting_tag {
            self.top().push_text("[");
        }

        while let Some(frame) = self.stack.pop() {
            match frame.context {
                Context::Children => {
                    if let Some(element) = frame.into_element() {
                        self.top().push_node(element);
                    }
                }
                Context::Nested => {
                    let literal = format!(
                        "({}",
                        serializer::stringify_spaced(&frame.nodes, self.config)
                    );
                    log::debug!(target: "tom.parser", "unclosed group flattened: {}", literal);
                    self.top().push_text(&literal);
                }
                Context::Attribute => {
                    // The element's children frame is right below and still empty
                    self.stack.pop();
                    let literal = self.unclosed_opener(frame);
                    log::debug!(target: "tom.parser", "unclosed tag demoted: {}", literal);
                    self.top().push_text(&literal);
                }
            }
        }

        Root::new(self.root.nodes)
    }

    /// Literal text for an element whose attribute section never closed
    fn unclosed_opener(&self, section: Frame) -> String {
        let (name, attributes) = match (&section.alias, section.tag) {
            // The colour attribute came from the alias itself
            (Some(alias), _) => (alias.clone(), section.nodes.get(1..).unwrap_or_default()),
            (None, Some(tag)) => (tag.as_str().to_string(), &section.nodes[..]),
            (None, None) => (String::new(), &section.nodes[..]),
        };
        format!(
            "[{}{}",
            name,
            serializer::stringify_attributes(attributes, self.config)
        )
    }
}

fn resolve_closing(name: &str) -> Option<TagName> {
    TagName::from_name(name).or_else(|| LEGACY_COLOR.is_match(name).then_some(TagName::Clr))
}
