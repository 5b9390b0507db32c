//! Commands accepted by the interactive editor.

use keystone_core::errors::TreeError;
use keystone_core::projection::build_tree;
use keystone_core::tree::PermissionTree;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorCommand {
    Toggle(String),
    SelectAll,
    ClearAll,
    Reset,
    Done,
}

impl EditorCommand {
    /// Parses one prompt line. A blank line finishes the session; anything
    /// that is not a keyword is a node id to toggle.
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            "" | ":done" | ":q" => EditorCommand::Done,
            ":all" => EditorCommand::SelectAll,
            ":none" => EditorCommand::ClearAll,
            ":reset" => EditorCommand::Reset,
            id => EditorCommand::Toggle(id.to_string()),
        }
    }
}

/// A tree plus the grants it was opened with, so it can be reset.
#[derive(Debug, Clone)]
pub struct Editor {
    initial: Vec<String>,
    tree: PermissionTree,
}

impl Editor {
    pub fn new(tree: PermissionTree, initial: Vec<String>) -> Self {
        Self { initial, tree }
    }

    pub fn tree(&self) -> &PermissionTree {
        &self.tree
    }

    pub fn into_tree(self) -> PermissionTree {
        self.tree
    }

    /// Applies a command. Returns `Ok(false)` once the session is done.
    pub fn apply(&mut self, command: &EditorCommand) -> Result<bool, TreeError> {
        match command {
            EditorCommand::Toggle(id) => {
                self.tree.toggle(id)?;
            }
            EditorCommand::SelectAll => self.tree.select_all(),
            EditorCommand::ClearAll => self.tree.clear_all(),
            EditorCommand::Reset => {
                self.tree = build_tree(self.tree.catalog().clone(), &self.initial);
            }
            EditorCommand::Done => return Ok(false),
        }
        Ok(true)
    }
}
