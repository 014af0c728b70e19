//! Directive flattening.
//!
//! Authors nest `top/middle/last/sup/lead` for readability, but the output
//! contract wants them as flat siblings. For a node of one of those kinds,
//! its nested family members are lifted out and placed right after it, in
//! their original order; everything else stays where it was.

use super::{blocks::BlockNode, node::Node};

/// Flattens a sequence of sibling nodes.
pub fn flatten(nodes: Vec<Node>) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Node::Block(block) => flatten_block(block, &mut out),
            other => out.push(other),
        }
    }
    out
}

fn flatten_block(mut block: BlockNode, out: &mut Vec<Node>) {
    let children = std::mem::take(&mut block.children);

    if !block.kind.is_flattenable() {
        block.children = flatten(children);
        out.push(Node::Block(block));
        return;
    }

    let mut own = Vec::with_capacity(children.len());
    let mut promoted = vec![];
    for child in children {
        match child {
            Node::Block(b) if b.kind.is_flattenable() => flatten_block(b, &mut promoted),
            Node::Block(b) => flatten_block(b, &mut own),
            other => own.push(other),
        }
    }

    block.children = own;
    out.push(Node::Block(block));
    out.extend(promoted);
}
