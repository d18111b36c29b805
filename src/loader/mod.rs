//! Input discovery: the saved search pages to process.

use crate::config::InputConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// True for names shaped like `<prefix>*.<extension>`, case-sensitive.
pub fn matches_input_name(name: &str, prefix: &str, extension: &str) -> bool {
    let suffix = format!(".{}", extension);
    name.len() >= prefix.len() + suffix.len() && name.starts_with(prefix) && name.ends_with(&suffix)
}

/// Matching files directly inside `cfg.dir`, sorted by file name.
///
/// A missing directory is treated as "no input", not as an error.
pub fn discover_input_files(cfg: &InputConfig) -> Result<Vec<PathBuf>> {
    discover_in(&cfg.dir, &cfg.file_prefix, &cfg.file_extension)
}

fn discover_in(dir: &Path, prefix: &str, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        debug!("Input dir {:?} does not exist", dir);
        return Ok(vec![]);
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("Could not list {:?}", dir))? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if path.is_file() && matches_input_name(name, prefix, extension) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(dir: &Path) -> InputConfig {
        InputConfig {
            dir: dir.to_path_buf(),
            ..InputConfig::default()
        }
    }

    #[test]
    fn test_matches_input_name() {
        assert!(matches_input_name("zem.html", "zem", "html"));
        assert!(matches_input_name("zem_pagina2.html", "zem", "html"));
        assert!(!matches_input_name("zem.htm", "zem", "html"));
        assert!(!matches_input_name("page_zem.html", "zem", "html"));
        assert!(!matches_input_name("ZEM1.html", "zem", "html"));
        assert!(!matches_input_name("zem1.html.bak", "zem", "html"));
        assert!(!matches_input_name("zemhtml", "zem", "html"));
    }

    #[test]
    fn finds_only_matching_files_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["zem2.html", "zem1.html", "other.html", "zem3.txt"] {
            std::fs::write(dir.path().join(name), "<html></html>").unwrap();
        }
        std::fs::create_dir(dir.path().join("zem_dir.html")).unwrap();

        let files = discover_input_files(&cfg(dir.path())).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["zem1.html", "zem2.html"]);
    }

    #[test]
    fn missing_dir_means_no_input() {
        let dir = tempfile::tempdir().unwrap();
        let files = discover_input_files(&cfg(&dir.path().join("nope"))).unwrap();
        assert!(files.is_empty());
    }
}
