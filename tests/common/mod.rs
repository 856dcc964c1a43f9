#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs::{self, create_dir_all};
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

/// Creates every `(relative path, content)` pair below `root`
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (relative, content) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            create_dir_all(parent).expect("Failed to create test directory");
        }
        fs::write(&path, content).expect("Failed to write test file");
    }
}

/// Every file below `root`, keyed by its `/`-separated relative path
pub fn snapshot(root: &Path) -> BTreeMap<String, String> {
    let mut files = BTreeMap::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(directory) = pending.pop() {
        for entry in fs::read_dir(&directory).expect("Failed to list test directory") {
            let path = entry.expect("Failed to read entry").path();
            if path.is_dir() {
                pending.push(path);
            } else {
                let relative = path
                    .strip_prefix(root)
                    .unwrap()
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect::<Vec<_>>()
                    .join("/");
                let content = fs::read_to_string(&path).unwrap_or_default();
                files.insert(relative, content);
            }
        }
    }
    files
}

/// Root-relative image references (`/assets/img/...`) that point at missing files
pub fn dangling_references(root: &Path) -> Vec<String> {
    static REFERENCE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r#"src="/(assets/img/[^"]+)""#).unwrap());

    snapshot(root)
        .into_iter()
        .filter(|(path, _)| path.ends_with(".html"))
        .flat_map(|(_, content)| {
            REFERENCE
                .captures_iter(&content)
                .map(|caps| caps[1].to_string())
                .collect::<Vec<_>>()
        })
        .filter(|reference| !root.join(PathBuf::from(reference)).exists())
        .collect()
}
