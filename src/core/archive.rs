//! Raw cache bootstrap from a gzip tarball (`sources/raw.tgz`).

use crate::utils::error::Result;
use flate2::read::GzDecoder;
use std::io::Read;
use std::path::Path;
use tar::Archive;

/// Archive path next to the raw cache directory.
pub fn archive_path(raw_dir: &str) -> String {
    format!("{}.tgz", raw_dir.trim_end_matches('/'))
}

/// `(file name, content)` of every SVG file in a `.tgz` archive.
///
/// Directory structure inside the archive is ignored; only the file name is
/// kept, so entries can never land outside the raw cache.
pub fn unpack_svgs(data: &[u8]) -> Result<Vec<(String, Vec<u8>)>> {
    let mut archive = Archive::new(GzDecoder::new(data));
    let mut files = Vec::new();

    for entry in archive.entries()? {
        let mut entry = entry?;
        if !entry.header().entry_type().is_file() {
            continue;
        }

        let path = entry.path()?.into_owned();
        let Some(name) = path.file_name().and_then(|n| n.to_str()).map(str::to_owned) else {
            continue;
        };
        // macOS 資源分支檔
        if name.starts_with("._") {
            continue;
        }
        if Path::new(&name).extension().and_then(|ext| ext.to_str()) != Some("svg") {
            continue;
        }

        let mut contents = Vec::new();
        entry.read_to_end(&mut contents)?;
        files.push((name, contents));
    }

    files.sort();
    Ok(files)
}
