//! Internal module for rendering a [`TreeNode`] as text.

use crate::classify::Verdict;
use crate::output::format_size;
use crate::types::TreeNode;

/// Renders the children of `root` like the `tree` command.
///
/// Directories end in `/`; files show their size and `✓` when included or
/// `✗` when only listed.
pub(crate) fn render_tree(root: &TreeNode) -> String {
    let mut out = String::new();
    if let TreeNode::Directory { children, .. } = root {
        render_children(children, "", &mut out);
    }
    out
}

fn render_children(children: &[TreeNode], prefix: &str, out: &mut String) {
    for (i, node) in children.iter().enumerate() {
        let is_last = i + 1 == children.len();
        let connector = if is_last { "└── " } else { "├── " };
        match node {
            TreeNode::Directory { name, children } => {
                out.push_str(&format!("{}{}{}/\n", prefix, connector, name));
                let nested = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
                render_children(children, &nested, out);
            }
            TreeNode::File {
                name,
                size,
                verdict,
            } => {
                let indicator = if *verdict == Verdict::Include { "✓" } else { "✗" };
                out.push_str(&format!(
                    "{}{}{} ({}) {}\n",
                    prefix,
                    connector,
                    name,
                    format_size(*size),
                    indicator
                ));
            }
        }
    }
}
