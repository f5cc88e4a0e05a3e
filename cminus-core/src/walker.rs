//! Generic syntax tree traversal.
//!
//! [`walk`] calls `pre` on a node, walks its children, calls `post`, then
//! moves on to the next node of the same list. Passing [`no_op`] for one
//! of the two actions gives a preorder-only or postorder-only pass.

use crate::ast::Node;

/// Visit action that does nothing.
pub fn no_op(_: &mut Node) {}

pub fn walk<Pre, Post>(nodes: &mut [Node], pre: &mut Pre, post: &mut Post)
where
    Pre: FnMut(&mut Node),
    Post: FnMut(&mut Node),
{
    for node in nodes {
        walk_node(node, pre, post);
    }
}

fn walk_node<Pre, Post>(node: &mut Node, pre: &mut Pre, post: &mut Post)
where
    Pre: FnMut(&mut Node),
    Post: FnMut(&mut Node),
{
    pre(node);
    for child in node.children_mut() {
        walk_node(child, pre, post);
    }
    post(node);
}

pub fn preorder<F>(nodes: &mut [Node], mut visit: F)
where
    F: FnMut(&mut Node),
{
    walk(nodes, &mut visit, &mut no_op);
}

pub fn postorder<F>(nodes: &mut [Node], mut visit: F)
where
    F: FnMut(&mut Node),
{
    walk(nodes, &mut no_op, &mut visit);
}
