// tree.rs - Tree serialization (Newick, NEXUS, ASCII)

use std::io::Write;
use crate::core::tree::{NodeIndex, Tree};
use crate::output::ascii::draw_ascii;
use crate::output::create_writer;

/// Serialize a tree to a Newick string, terminated with `;`.
///
/// Branch lengths are written with `:` when present; labels that contain
/// Newick metacharacters or whitespace get single-quoted.
pub fn to_newick(tree: &Tree) -> String {
    let mut out = String::new();
    if !tree.is_empty() {
        write_clade(tree, tree.root(), &mut out);
    }
    out.push(';');
    out
}

fn write_clade(tree: &Tree, index: NodeIndex, out: &mut String) {
    let node = tree.node(index);
    if !node.is_leaf() {
        out.push('(');
        for (pos, &child) in node.children.iter().enumerate() {
            if pos > 0 {
                out.push(',');
            }
            write_clade(tree, child, out);
        }
        out.push(')');
    }
    out.push_str(&quote_label(node.label()));
    if let Some(length) = node.branch_length {
        out.push(':');
        out.push_str(&format!("{}", length));
    }
}

fn quote_label(label: &str) -> String {
    let needs_quoting = label
        .bytes()
        .any(|b| b.is_ascii_whitespace() || b"(),:;[]'".contains(&b));
    if needs_quoting {
        format!("'{}'", label.replace('\'', "''"))
    } else {
        label.to_string()
    }
}

/// Write a tree as a Newick file (one tree per line, no comments)
pub fn write_newick(file_path: &str, tree: &Tree) -> Result<(), String> {
    let mut writer = create_writer(file_path)?;
    writeln!(writer, "{}", to_newick(tree)).map_err(|e| format!("Write error: {}", e))?;
    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    println!("✅ Tree written to: {}", file_path);
    Ok(())
}

/// Write a tree as a NEXUS file with a TAXA and a TREES block
pub fn write_nexus(file_path: &str, tree: &Tree, command_line: &str) -> Result<(), String> {
    let mut writer = create_writer(file_path)?;

    writeln!(writer, "#NEXUS").map_err(|e| format!("Write error: {}", e))?;
    writeln!(writer, "[Command: {}]", command_line).map_err(|e| format!("Write error: {}", e))?;
    writeln!(writer, "[Generated: {}]", chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")).map_err(|e| format!("Write error: {}", e))?;
    writeln!(writer, "[phylogen v{}]", env!("CARGO_PKG_VERSION")).map_err(|e| format!("Write error: {}", e))?;

    let names = tree.leaf_names();
    writeln!(writer, "BEGIN TAXA;").map_err(|e| format!("Write error: {}", e))?;
    writeln!(writer, "    DIMENSIONS NTAX={};", names.len()).map_err(|e| format!("Write error: {}", e))?;
    write!(writer, "    TAXLABELS").map_err(|e| format!("Write error: {}", e))?;
    for name in &names {
        write!(writer, " {}", quote_label(name)).map_err(|e| format!("Write error: {}", e))?;
    }
    writeln!(writer, ";").map_err(|e| format!("Write error: {}", e))?;
    writeln!(writer, "END;").map_err(|e| format!("Write error: {}", e))?;

    writeln!(writer, "BEGIN TREES;").map_err(|e| format!("Write error: {}", e))?;
    writeln!(writer, "    TREE tree1 = {}", to_newick(tree)).map_err(|e| format!("Write error: {}", e))?;
    writeln!(writer, "END;").map_err(|e| format!("Write error: {}", e))?;

    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    println!("✅ Tree written to: {} (NEXUS format)", file_path);
    Ok(())
}

/// Write a tree rendered as an ASCII drawing
pub fn write_ascii(file_path: &str, tree: &Tree) -> Result<(), String> {
    let mut writer = create_writer(file_path)?;
    write!(writer, "{}", draw_ascii(tree, 80)).map_err(|e| format!("Write error: {}", e))?;
    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    println!("✅ Tree written to: {} (ASCII drawing)", file_path);
    Ok(())
}

/// Write a tree in the specified format
pub fn write_tree(
    file_path: &str,
    format: &str,
    tree: &Tree,
    command_line: &str,
) -> Result<(), String> {
    match format.to_lowercase().as_str() {
        "newick" => write_newick(file_path, tree),
        "nexus" => write_nexus(file_path, tree, command_line),
        "ascii" => write_ascii(file_path, tree),
        _ => Err(format!(
            "Unsupported tree format: {}. Use: newick, nexus, ascii",
            format
        )),
    }
}
