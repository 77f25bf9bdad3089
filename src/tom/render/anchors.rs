//! Anchor extraction
//!
//! An anchor points at a response, optionally in another thread or board:
//!
//!     >>12        response 12 of the current thread
//!     >>12-15     responses 12 to 15
//!     >345>12     response 12 of thread 345 on the current board
//!     news>345>12 response 12 of thread 345 on board "news"
//!
//! Anchors are only looked for in body text, never inside attribute sections.

use crate::tom::ast::{Node, Root};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;

static ANCHOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?P<board>[A-Za-z][A-Za-z0-9_-]*)?>(?P<thread>\d{1,10})?>(?P<start>\d{1,10})(?:-(?P<end>\d{1,10}))?",
    )
    .unwrap()
});

/// Board and thread the text was posted in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorContext {
    pub board: String,
    pub thread: u64,
}

impl AnchorContext {
    pub fn new(board: impl Into<String>, thread: u64) -> Self {
        Self {
            board: board.into(),
            thread,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Anchor {
    pub board: String,
    pub thread: u64,
    pub start: u64,
    pub end: Option<u64>,
}

/// Piece of a text split around its anchors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    /// The anchor and the text it was written as
    Anchor(Anchor, &'a str),
}

fn to_anchor(caps: &Captures<'_>, ctx: &AnchorContext) -> Option<Anchor> {
    let number = |name: &str| caps.name(name).and_then(|m| m.as_str().parse::<u64>().ok());
    Some(Anchor {
        board: caps
            .name("board")
            .map_or_else(|| ctx.board.clone(), |m| m.as_str().to_string()),
        thread: number("thread").unwrap_or(ctx.thread),
        start: number("start")?,
        end: number("end"),
    })
}

/// All anchors in a piece of text, in order
pub fn find_anchors(text: &str, ctx: &AnchorContext) -> Vec<Anchor> {
    ANCHOR
        .captures_iter(text)
        .filter_map(|caps| to_anchor(&caps, ctx))
        .collect()
}

/// Split text into plain runs and anchors
pub fn split_anchors<'a>(text: &'a str, ctx: &AnchorContext) -> Vec<Segment<'a>> {
    let mut segments = Vec::new();
    let mut last = 0;
    for caps in ANCHOR.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        let Some(anchor) = to_anchor(&caps, ctx) else {
            continue;
        };
        if whole.start() > last {
            segments.push(Segment::Plain(&text[last..whole.start()]));
        }
        segments.push(Segment::Anchor(anchor, whole.as_str()));
        last = whole.end();
    }
    if last < text.len() {
        segments.push(Segment::Plain(&text[last..]));
    }
    segments
}

/// Anchors in the body text of a whole tree
pub fn collect_anchors(root: &Root, ctx: &AnchorContext) -> Vec<Anchor> {
    let mut anchors = Vec::new();
    collect(&root.children, ctx, &mut anchors);
    anchors
}

fn collect(nodes: &[Node], ctx: &AnchorContext, out: &mut Vec<Anchor>) {
    for node in nodes {
        match node {
            Node::Text { value } => out.extend(find_anchors(value, ctx)),
            Node::Nested { .. } => {}
            other => collect(other.children(), ctx, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tom::parsing::parse;

    fn ctx() -> AnchorContext {
        AnchorContext::new("main", 7)
    }

    fn anchor(board: &str, thread: u64, start: u64, end: Option<u64>) -> Anchor {
        Anchor {
            board: board.to_string(),
            thread,
            start,
            end,
        }
    }

    #[test]
    fn test_anchor_forms() {
        assert_eq!(find_anchors(">>12", &ctx()), vec![anchor("main", 7, 12, None)]);
        assert_eq!(
            find_anchors("see >>12-15", &ctx()),
            vec![anchor("main", 7, 12, Some(15))]
        );
        assert_eq!(
            find_anchors(">345>12", &ctx()),
            vec![anchor("main", 345, 12, None)]
        );
        assert_eq!(
            find_anchors("news>345>12 and >>3", &ctx()),
            vec![anchor("news", 345, 12, None), anchor("main", 7, 3, None)]
        );
    }

    #[test]
    fn test_not_anchors() {
        assert!(find_anchors("a > b", &ctx()).is_empty());
        assert!(find_anchors(">12", &ctx()).is_empty());
        assert!(find_anchors(">>", &ctx()).is_empty());
    }

    #[test]
    fn test_split_keeps_all_text() {
        let segments = split_anchors("hi >>2, bye", &ctx());
        assert_eq!(
            segments,
            vec![
                Segment::Plain("hi "),
                Segment::Anchor(anchor("main", 7, 2, None), ">>2"),
                Segment::Plain(", bye"),
            ]
        );
    }

    #[test]
    fn test_collect_skips_attributes() {
        let root = parse("[clr >>1]>>2[/clr] [bld]>>3[/bld]").unwrap();
        let starts: Vec<u64> = collect_anchors(&root, &ctx())
            .into_iter()
            .map(|a| a.start)
            .collect();
        assert_eq!(starts, vec![2, 3]);
    }
}
