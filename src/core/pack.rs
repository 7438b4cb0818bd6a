//! Packs normalized SVG files into one Typst dictionary.
//!
//! ```text
//! #let _data = (
//!   "0001": "viewBox=\"0 0 10 10\"><path d=\"M0 0\"/>",
//! )
//! ```

use crate::core::Storage;
use crate::utils::error::{EtlError, Result};
use std::path::Path;

const SVG_OPEN: &str = "<svg ";
const SVG_CLOSE: &str = "</svg>";

/// Inner part of a normalized file: everything between `<svg ` and `</svg>`.
pub fn strip_svg_wrapper<'a>(file: &str, content: &'a str) -> Result<&'a str> {
    let content = content.trim();
    if !content.starts_with(SVG_OPEN) {
        return Err(EtlError::PackError {
            file: file.to_string(),
            message: format!("unexpected start: {}", content.chars().take(20).collect::<String>()),
        });
    }
    if !content.ends_with(SVG_CLOSE) || content.len() < SVG_OPEN.len() + SVG_CLOSE.len() {
        let tail: String = content.chars().rev().take(20).collect::<Vec<_>>().into_iter().rev().collect();
        return Err(EtlError::PackError {
            file: file.to_string(),
            message: format!("unexpected end: {}", tail),
        });
    }
    Ok(&content[SVG_OPEN.len()..content.len() - SVG_CLOSE.len()])
}

/// Escape for a Typst string literal.
pub fn escape_typst(fragment: &str) -> String {
    fragment.replace('\\', "\\\\").replace('"', "\\\"")
}

/// One dictionary line for `name`.
pub fn pack_entry(name: &str, content: &str) -> Result<String> {
    let fragment = strip_svg_wrapper(name, content)?;
    Ok(format!("  \"{}\": \"{}\",", name, escape_typst(fragment)))
}

/// 把目錄中所有 `*.svg` 打包成 Typst 字典，回傳內容與檔案數
pub async fn pack_directory<S: Storage>(storage: &S, dir: &str) -> Result<(String, usize)> {
    let files = storage.list_files(dir, "svg").await?;
    if files.is_empty() {
        return Err(EtlError::PackError {
            file: dir.to_string(),
            message: "No SVG files found".to_string(),
        });
    }

    let mut lines = vec!["#let _data = (".to_string()];
    for file in &files {
        let name = Path::new(file)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default();
        let data = storage.read_file(file).await?;
        let content = String::from_utf8_lossy(&data);
        lines.push(pack_entry(name, &content)?);
    }
    lines.push(")".to_string());
    lines.push(String::new());

    Ok((lines.join("\n"), files.len()))
}
