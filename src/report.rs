//! Reading code lists and writing result files.

use crate::error::{ErrorKind, Result};
use crate::pipeline::Resolution;
use exn::ResultExt;
use std::path::{Path, PathBuf};

/// Read a newline-separated list of codes, trimming surrounding whitespace
/// and dropping blank lines.
pub fn read_codes(path: &Path) -> Result<Vec<String>> {
    let contents =
        std::fs::read_to_string(path).or_raise(|| ErrorKind::Input(path.to_path_buf()))?;
    Ok(contents.lines().map(str::trim).filter(|line| !line.is_empty()).map(String::from).collect())
}

/// Write the result rows as CSV with a `code,device,comment` header.
pub fn write_csv(path: &Path, rows: &[Resolution]) -> Result<()> {
    let mut contents = String::from("code,device,comment\n");
    for row in rows {
        contents.push_str(&csv_line(&[&row.code, &row.device, &row.comment]));
    }
    ensure_parent(path)?;
    std::fs::write(path, contents).or_raise(|| ErrorKind::Output(path.to_path_buf()))?;
    Ok(())
}

/// Write plain lines, one per entry.
pub fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    ensure_parent(path)?;
    std::fs::write(path, lines.join("\n")).or_raise(|| ErrorKind::Output(path.to_path_buf()))?;
    Ok(())
}

/// The not-found companion file lives next to the main output:
/// `output/device_info.csv` -> `output/device_info_not-found.txt`.
pub fn not_found_path(output: &Path) -> PathBuf {
    let stem = output.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    output.with_file_name(format!("{stem}_not-found.txt"))
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).or_raise(|| ErrorKind::Output(path.to_path_buf()))?;
    }
    Ok(())
}

fn csv_line(fields: &[&str]) -> String {
    let mut line = String::new();
    for (index, field) in fields.iter().enumerate() {
        if index > 0 {
            line.push(',');
        }
        line.push_str(&csv_field(field));
    }
    line.push('\n');
    line
}

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
