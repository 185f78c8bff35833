// src/output/writer.rs
//! The only place results leave the process.

use crate::error::AppError;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Where a rendered result goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryTarget {
    Stdout,
    File(PathBuf),
}

impl DeliveryTarget {
    pub fn from_output_file(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }
}

/// Pretty-printed JSON with a trailing newline.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String, AppError> {
    let mut rendered = serde_json::to_string_pretty(value)?;
    rendered.push('\n');
    Ok(rendered)
}

/// Writes `content` to `target`, returning the number of bytes written.
pub fn deliver(content: &str, target: &DeliveryTarget) -> Result<usize, AppError> {
    match target {
        DeliveryTarget::Stdout => print_to_stdout(content)?,
        DeliveryTarget::File(path) => write_file(path, content)?,
    }
    Ok(content.len())
}

fn write_file(path: &Path, content: &str) -> Result<(), AppError> {
    log::debug!("Writing {} bytes to {}", content.len(), path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;

    log::info!("Wrote file: {}", path.display());
    Ok(())
}

fn print_to_stdout(content: &str) -> Result<(), AppError> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(content.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_pretty_json_with_newline() {
        let rendered = render_json(&json!({"uid": "1"})).unwrap();
        assert_eq!(rendered, "{\n  \"uid\": \"1\"\n}\n");
    }

    #[test]
    fn file_delivery_creates_parent_directories() {
        let dir = std::env::temp_dir().join(format!("swapi_bridge_out_{}", std::process::id()));
        let path = dir.join("nested").join("page.json");

        let written = deliver("{}\n", &DeliveryTarget::File(path.clone())).unwrap();
        assert_eq!(written, 3);
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}\n");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn target_defaults_to_stdout() {
        assert_eq!(DeliveryTarget::from_output_file(None), DeliveryTarget::Stdout);
    }
}
