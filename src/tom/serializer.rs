//! Serializer: tree back to canonical TOM text
//!
//! This is the structural inverse of the parser under the same configuration. Attribute
//! operands and the members of a nested group are written separated by single spaces, so the
//! first parse of hand-written text may normalise spacing inside attribute sections; after
//! that `stringify(parse(x))` is a fixed point.
//!
//! One shape escapes this: an unclosed opener demoted to text inside a body that is then
//! closed implicitly. `[itl]a[bld` writes `[itl]a[bld[/itl]`, which reparses as a `bld` opener
//! holding the closer in its attribute section and writes `[itl]a[bld [/itl][/itl]`.
//!
//! Evaluated nodes serialize as markup too: a `DiceResult` becomes the read-mode form
//! `[dice min max]RESULT[/dice]`, and a `CalcResult` is written back as the element it was
//! computed from (calc results are never persisted).

use crate::tom::ast::{Node, Root, TagName};
use crate::tom::parsing::ParserConfig;

/// Serialize a whole tree
///
/// Not a fixed point for a demoted opener inside an implicitly closed body; see the module docs.
pub fn stringify(root: &Root, config: &ParserConfig) -> String {
    stringify_nodes(&root.children, config)
}

/// Serialize a body: nodes are concatenated as they are
pub fn stringify_nodes(nodes: &[Node], config: &ParserConfig) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(&mut out, node, config);
    }
    out
}

/// Serialize the members of a group, separated by single spaces
pub fn stringify_spaced(nodes: &[Node], config: &ParserConfig) -> String {
    let mut out = String::new();
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        write_node(&mut out, node, config);
    }
    out
}

/// Serialize an attribute section, each attribute preceded by its separator
pub fn stringify_attributes(nodes: &[Node], config: &ParserConfig) -> String {
    let mut out = String::new();
    write_attributes(&mut out, nodes, config);
    out
}

pub fn stringify_node(node: &Node, config: &ParserConfig) -> String {
    let mut out = String::new();
    write_node(&mut out, node, config);
    out
}

fn write_node(out: &mut String, node: &Node, config: &ParserConfig) {
    match node {
        Node::Text { value } => out.push_str(value),
        Node::Element(element) => write_element(
            out,
            element.name,
            &element.attributes,
            &element.children,
            config,
        ),
        Node::Nested { children } => {
            out.push('(');
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                write_node(out, child, config);
            }
            out.push(')');
        }
        Node::DiceResult(dice) => {
            out.push_str(&format!(
                "[dice {} {}]{}[/dice]",
                dice.min, dice.max, dice.result
            ));
        }
        Node::CalcResult(calc) => write_element(
            out,
            calc.name.tag(),
            &calc.attributes,
            &calc.children,
            config,
        ),
    }
}

fn write_element(
    out: &mut String,
    name: TagName,
    attributes: &[Node],
    children: &[Node],
    config: &ParserConfig,
) {
    out.push('[');
    out.push_str(name.as_str());
    write_attributes(out, attributes, config);
    out.push(']');
    // A self-closing tag only omits its closer when there is no body to close
    if config.is_self_closing(name) && children.is_empty() {
        return;
    }
    for child in children {
        write_node(out, child, config);
    }
    out.push_str("[/");
    out.push_str(name.as_str());
    out.push(']');
}

fn write_attributes(out: &mut String, attributes: &[Node], config: &ParserConfig) {
    for attribute in attributes {
        out.push(' ');
        write_node(out, attribute, config);
    }
}
