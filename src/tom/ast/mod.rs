//! AST definitions for TOM markup
//!
//! The tree is an owned sum type: every child list belongs to exactly one parent and there
//! are no back references. Trees are built fresh per call and dropped after serialization or
//! rendering.
//!
//! ## Modules
//!
//! - `tag` - The closed set of tag names and the calc flavours
//! - `node` - Node variants, the root container and the evaluated node payloads

pub mod node;
pub mod tag;

pub use node::{CalcResult, DiceResult, Element, Node, Root};
pub use tag::{CalcKind, TagName};
