//! Level-order pretty-printer.
//!
//! Output format, top line first:
//!
//! ```text
//! root: [ 10: 100, 20: 200 ]
//! 1-level: [ 5: 50 ], [ 12: 120, 17: 170 ], [ 30: 300 ]
//! ```
//!
//! An empty tree prints `Árvore vazia`.

use crate::node::Node;
use crate::store::NodeStore;
use crate::tree::BTree;
use arbor_common::Result;
use std::io::Write;

fn format_node(node: &Node) -> String {
    let entries: Vec<String> = node
        .keys
        .iter()
        .zip(&node.values)
        .map(|(key, value)| format!("{}: {}", key, value))
        .collect();
    format!("[ {} ]", entries.join(", "))
}

/// Writes the level-order dump of `tree` into `out`.
pub fn write_tree<S: NodeStore, W: Write>(tree: &mut BTree<S>, out: &mut W) -> Result<()> {
    let levels = tree.traverse()?;
    let Some((root_level, deeper)) = levels.split_first() else {
        writeln!(out, "Árvore vazia")?;
        return Ok(());
    };

    writeln!(out, "root: {}", format_node(&root_level[0]))?;
    for (depth, level) in deeper.iter().enumerate() {
        let nodes: Vec<String> = level.iter().map(format_node).collect();
        writeln!(out, "{}-level: {}", depth + 1, nodes.join(", "))?;
    }
    Ok(())
}

/// Renders the level-order dump as a string.
pub fn render_tree<S: NodeStore>(tree: &mut BTree<S>) -> Result<String> {
    let mut buf = Vec::new();
    write_tree(tree, &mut buf)?;
    // the writer only ever receives UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryNodeStore;

    fn build(order: usize, keys: &[i32]) -> BTree<MemoryNodeStore> {
        let mut tree = BTree::new(order).unwrap();
        for &key in keys {
            tree.insert(key, key * 10).unwrap();
        }
        tree
    }

    #[test]
    fn test_empty_tree_prints_placeholder() {
        let mut tree = BTree::new(4).unwrap();
        assert_eq!(render_tree(&mut tree).unwrap(), "Árvore vazia\n");
    }

    #[test]
    fn test_single_node_prints_root_line_only() {
        let mut tree = build(4, &[2, 1]);
        assert_eq!(render_tree(&mut tree).unwrap(), "root: [ 1: 10, 2: 20 ]\n");
    }

    #[test]
    fn test_two_level_dump() {
        let mut tree = build(4, &[10, 20, 5, 6, 12, 30, 7, 17]);
        let rendered = render_tree(&mut tree).unwrap();
        assert_eq!(
            rendered,
            "root: [ 10: 100, 20: 200 ]\n\
             1-level: [ 5: 50, 6: 60, 7: 70 ], [ 12: 120, 17: 170 ], [ 30: 300 ]\n"
        );
    }

    #[test]
    fn test_three_level_dump_has_level_lines() {
        let mut tree = build(3, &(1..=20).collect::<Vec<_>>());
        let rendered = render_tree(&mut tree).unwrap();
        assert!(rendered.starts_with("root: "));
        assert!(rendered.contains("1-level: "));
        assert!(rendered.contains("2-level: "));
    }
}
