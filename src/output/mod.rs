// mod.rs - Output formatters module

use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use crate::core::matrix::DistanceMatrix;

pub mod ascii;
pub mod tree;

pub use ascii::draw_ascii;
pub use tree::{to_newick, write_tree};

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &str) -> Result<(), String> {
    if let Some(parent) = Path::new(file_path).parent() {
        create_dir_all(parent)
            .map_err(|e| format!("Failed to create parent directory '{}': {}", parent.display(), e))?;
    }
    Ok(())
}

pub(crate) fn create_writer(file_path: &str) -> Result<BufWriter<File>, String> {
    ensure_parent_dir(file_path)?;
    let file = File::create(file_path)
        .map_err(|e| format!("Failed to create output file '{}': {}", file_path, e))?;
    Ok(BufWriter::new(file))
}

/// Write distance matrix in TSV format
pub fn write_tsv(
    file_path: &str,
    dm: &DistanceMatrix,
    command_line: &str,
) -> Result<(), String> {
    let mut writer = create_writer(file_path)?;

    // Write command header
    writeln!(writer, "# Command: {}", command_line).map_err(|e| format!("Write error: {}", e))?;
    writeln!(writer, "# Generated: {}", chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")).map_err(|e| format!("Write error: {}", e))?;
    writeln!(writer, "# phylogen v{}", env!("CARGO_PKG_VERSION")).map_err(|e| format!("Write error: {}", e))?;

    // Write header
    write!(writer, "Taxon").map_err(|e| format!("Write error: {}", e))?;
    for name in dm.names() {
        write!(writer, "\t{}", name).map_err(|e| format!("Write error: {}", e))?;
    }
    writeln!(writer).map_err(|e| format!("Write error: {}", e))?;

    // Write matrix
    for (i, name) in dm.names().iter().enumerate() {
        write!(writer, "{}", name).map_err(|e| format!("Write error: {}", e))?;
        for j in 0..dm.len() {
            write!(writer, "\t{}", dm.get(i, j)).map_err(|e| format!("Write error: {}", e))?;
        }
        writeln!(writer).map_err(|e| format!("Write error: {}", e))?;
    }

    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    println!("✅ Distance matrix written to: {}", file_path);
    Ok(())
}

/// Write distance matrix in CSV format
pub fn write_csv(
    file_path: &str,
    dm: &DistanceMatrix,
    command_line: &str,
) -> Result<(), String> {
    let mut writer = create_writer(file_path)?;

    writeln!(writer, "# Command: {}", command_line).map_err(|e| format!("Write error: {}", e))?;
    writeln!(writer, "# Generated: {}", chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")).map_err(|e| format!("Write error: {}", e))?;
    writeln!(writer, "# phylogen v{}", env!("CARGO_PKG_VERSION")).map_err(|e| format!("Write error: {}", e))?;

    write!(writer, "Taxon").map_err(|e| format!("Write error: {}", e))?;
    for name in dm.names() {
        write!(writer, ",{}", name).map_err(|e| format!("Write error: {}", e))?;
    }
    writeln!(writer).map_err(|e| format!("Write error: {}", e))?;

    for (i, name) in dm.names().iter().enumerate() {
        write!(writer, "{}", name).map_err(|e| format!("Write error: {}", e))?;
        for j in 0..dm.len() {
            write!(writer, ",{}", dm.get(i, j)).map_err(|e| format!("Write error: {}", e))?;
        }
        writeln!(writer).map_err(|e| format!("Write error: {}", e))?;
    }

    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    println!("✅ Distance matrix written to: {}", file_path);
    Ok(())
}

/// Write distance matrix in PHYLIP format (lower triangle)
pub fn write_phylip(
    file_path: &str,
    dm: &DistanceMatrix,
    command_line: &str,
) -> Result<(), String> {
    let mut writer = create_writer(file_path)?;

    writeln!(writer, "    {}", dm.len()).map_err(|e| format!("Write error: {}", e))?;

    for (i, name) in dm.names().iter().enumerate() {
        write!(writer, "{:<10}", name).map_err(|e| format!("Write error: {}", e))?;
        for j in 0..=i {
            write!(writer, "  {}", dm.get(i, j)).map_err(|e| format!("Write error: {}", e))?;
        }
        writeln!(writer).map_err(|e| format!("Write error: {}", e))?;
    }

    // Command info as trailing comments (some PHYLIP parsers ignore trailing content)
    writeln!(writer).map_err(|e| format!("Write error: {}", e))?;
    writeln!(writer, "# Command: {}", command_line).map_err(|e| format!("Write error: {}", e))?;
    writeln!(writer, "# Generated: {}", chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")).map_err(|e| format!("Write error: {}", e))?;
    writeln!(writer, "# phylogen v{}", env!("CARGO_PKG_VERSION")).map_err(|e| format!("Write error: {}", e))?;

    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    println!("✅ Distance matrix written to: {} (PHYLIP format)", file_path);
    Ok(())
}

/// Write distance matrix in NEXUS format
pub fn write_nexus(
    file_path: &str,
    dm: &DistanceMatrix,
    command_line: &str,
) -> Result<(), String> {
    let mut writer = create_writer(file_path)?;

    writeln!(writer, "#NEXUS").map_err(|e| format!("Write error: {}", e))?;
    writeln!(writer, "[Command: {}]", command_line).map_err(|e| format!("Write error: {}", e))?;
    writeln!(writer, "[Generated: {}]", chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")).map_err(|e| format!("Write error: {}", e))?;
    writeln!(writer, "[phylogen v{}]", env!("CARGO_PKG_VERSION")).map_err(|e| format!("Write error: {}", e))?;
    writeln!(writer, "BEGIN DISTANCES;").map_err(|e| format!("Write error: {}", e))?;
    writeln!(writer, "    DIMENSIONS NTAX={};", dm.len()).map_err(|e| format!("Write error: {}", e))?;
    writeln!(writer, "    FORMAT LABELS LOWER DIAGONAL;").map_err(|e| format!("Write error: {}", e))?;
    writeln!(writer, "    MATRIX").map_err(|e| format!("Write error: {}", e))?;

    for (i, name) in dm.names().iter().enumerate() {
        write!(writer, "        {}", name).map_err(|e| format!("Write error: {}", e))?;
        for j in 0..=i {
            write!(writer, " {}", dm.get(i, j)).map_err(|e| format!("Write error: {}", e))?;
        }
        writeln!(writer).map_err(|e| format!("Write error: {}", e))?;
    }

    writeln!(writer, "    ;").map_err(|e| format!("Write error: {}", e))?;
    writeln!(writer, "END;").map_err(|e| format!("Write error: {}", e))?;

    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    println!("✅ Distance matrix written to: {} (NEXUS format)", file_path);
    Ok(())
}

/// Write distance matrix in the specified format
pub fn write_matrix(
    file_path: &str,
    format: &str,
    dm: &DistanceMatrix,
    command_line: &str,
) -> Result<(), String> {
    match format.to_lowercase().as_str() {
        "tsv" => write_tsv(file_path, dm, command_line),
        "csv" => write_csv(file_path, dm, command_line),
        "phylip" => write_phylip(file_path, dm, command_line),
        "nexus" => write_nexus(file_path, dm, command_line),
        _ => Err(format!(
            "Unsupported matrix format: {}. Use: tsv, csv, phylip, nexus",
            format
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_matrix_unknown_format() {
        let dm = DistanceMatrix::new(vec!["a".to_string(), "b".to_string()]).unwrap();
        assert!(write_matrix("/tmp/x", "xml", &dm, "cmd").is_err());
    }
}
