//! Text rendering of permission trees.
//!
//! ```text
//! [-] Departments (department)
//!     [x] Read (department.read)
//!     [ ] Edit (department.edit)
//! ```

use std::fmt::Write;

use keystone_core::tree::{CheckStatus, PermissionTree, TreeNodeRef};

const INDENT: &str = "    ";

pub fn marker(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Checked => "[x]",
        CheckStatus::Partial => "[-]",
        CheckStatus::Unchecked => "[ ]",
    }
}

pub fn render_tree(tree: &PermissionTree) -> String {
    let mut out = String::new();
    for root in tree.roots() {
        render_node(&mut out, root);
    }
    out
}

fn render_node(out: &mut String, node: TreeNodeRef<'_>) {
    let _ = writeln!(
        out,
        "{}{} {} ({})",
        INDENT.repeat(node.depth()),
        marker(node.status()),
        node.label(),
        node.id()
    );
    for child in node.children() {
        render_node(out, child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keystone_core::catalog::{PermissionCatalog, PermissionCatalogNode};
    use keystone_core::projection::build_tree;
    use std::sync::Arc;

    #[test]
    fn test_render_tree() {
        let catalog = Arc::new(
            PermissionCatalog::new(vec![PermissionCatalogNode::group(
                "department",
                "Departments",
                vec![
                    PermissionCatalogNode::leaf("department.read", "Read"),
                    PermissionCatalogNode::leaf("department.edit", "Edit"),
                ],
            )])
            .unwrap(),
        );
        let tree = build_tree(catalog, ["department.read"]);

        assert_eq!(
            render_tree(&tree),
            "[-] Departments (department)\n    [x] Read (department.read)\n    [ ] Edit (department.edit)\n"
        );
    }
}
