//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use tabled::{Table, Tabled};

use foldertree_entity::folder::FolderNode;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Print a list of items in the selected format
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No results found.");
            } else {
                println!("{}", Table::new(items));
            }
        }
        OutputFormat::Json => print_json(&items, "[]"),
    }
}

/// Print a single item in the selected format
pub fn print_item<T: Serialize + Tabled>(item: &T, format: OutputFormat) {
    match format {
        OutputFormat::Table => println!("{}", Table::new([item])),
        OutputFormat::Json => print_json(item, "{}"),
    }
}

/// Print a folder forest, drawn as an indented tree or as nested JSON
pub fn print_tree(nodes: &[FolderNode], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if nodes.is_empty() {
                println!("No folders.");
                return;
            }
            let mut out = String::new();
            for (i, node) in nodes.iter().enumerate() {
                render_node(node, "", i + 1 == nodes.len(), &mut out);
            }
            print!("{out}");
        }
        OutputFormat::Json => print_json(&nodes, "[]"),
    }
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

fn print_json<T: Serialize + ?Sized>(value: &T, fallback: &str) {
    let json = serde_json::to_string_pretty(value).unwrap_or_else(|_| fallback.to_string());
    println!("{json}");
}

fn render_node(node: &FolderNode, prefix: &str, last: bool, out: &mut String) {
    let mut stack = vec![(node, prefix.to_string(), last)];

    while let Some((node, prefix, last)) = stack.pop() {
        let branch = if last { "└── " } else { "├── " };
        out.push_str(&format!(
            "{prefix}{branch}{} [{}] ({})\n",
            node.name, node.id, node.total_item_count
        ));

        let child_prefix = format!("{prefix}{}", if last { "    " } else { "│   " });
        let count = node.children.len();
        for (i, child) in node.children.iter().enumerate().rev() {
            stack.push((child, child_prefix.clone(), i + 1 == count));
        }
    }
}
