//! HTML to arena conversion.

use scraper::Html;

use crate::node::{Element, Node, NodeData, NodeId};

/// Build arena nodes from markup. Index 0 is the document node.
///
/// Walks with an explicit stack; third-party pages may nest arbitrarily deep.
pub(crate) fn parse_nodes(html: &str) -> Vec<Node> {
    let parsed = Html::parse_document(html);
    let mut nodes = vec![Node {
        parent: None,
        children: Vec::new(),
        data: NodeData::Document,
    }];

    let mut stack = vec![(NodeId(0), *parsed.root_element())];
    while let Some((parent, node)) = stack.pop() {
        match node.value() {
            scraper::Node::Element(value) => {
                let attrs: Vec<(String, String)> = value
                    .attrs()
                    .map(|(name, value)| (name.to_string(), value.to_string()))
                    .collect();
                let element = Element::new(value.name(), attrs);
                let id = push(&mut nodes, parent, NodeData::Element(element));
                // Reversed so children pop, and get appended, in source order.
                stack.extend(node.children().rev().map(|child| (id, child)));
            }
            scraper::Node::Text(text) => {
                let text: &str = text;
                push(&mut nodes, parent, NodeData::Text(text.to_string()));
            }
            _ => {}
        }
    }

    for index in 0..nodes.len() {
        let is_textarea = matches!(
            &nodes[index].data,
            NodeData::Element(el) if el.tag_name.eq_ignore_ascii_case("textarea")
        );
        if !is_textarea {
            continue;
        }
        let initial = collect_text(&nodes, NodeId(index));
        if let NodeData::Element(el) = &mut nodes[index].data {
            el.value = initial.strip_prefix('\n').unwrap_or(&initial).to_string();
        }
    }
    nodes
}

fn push(nodes: &mut Vec<Node>, parent: NodeId, data: NodeData) -> NodeId {
    let id = NodeId(nodes.len());
    nodes.push(Node {
        parent: Some(parent),
        children: Vec::new(),
        data,
    });
    nodes[parent.0].children.push(id);
    id
}

fn collect_text(nodes: &[Node], id: NodeId) -> String {
    let mut out = String::new();
    let mut stack: Vec<NodeId> = nodes[id.0].children.iter().rev().copied().collect();
    while let Some(child) = stack.pop() {
        match &nodes[child.0].data {
            NodeData::Text(text) => out.push_str(text),
            NodeData::Element(_) => stack.extend(nodes[child.0].children.iter().rev().copied()),
            NodeData::Document => {}
        }
    }
    out
}
