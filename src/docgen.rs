//! Project documentation site.
//!
//! Renders `README.md` to `docs/index.html` and converts every notebook in
//! `notebooks/` to a page next to it.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::notebook::{self, markdown_to_html, page};

/// Directory the pages are written to.
pub const DOCS_DIR: &str = "docs";
/// Directory scanned for notebooks.
pub const NOTEBOOKS_DIR: &str = "notebooks";

/// Generate the documentation under `root`.
///
/// Returns every page written, index first. A missing notebooks directory
/// is not an error.
///
/// # Errors
///
/// A missing `README.md`, I/O failures, or a malformed notebook.
pub fn generate(root: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    let docs = root.join(DOCS_DIR);
    fs::create_dir_all(&docs)?;

    let readme = fs::read_to_string(root.join("README.md"))?;
    let index = docs.join("index.html");
    fs::write(&index, page(&markdown_to_html(&readme)))?;
    let mut written = vec![index];

    let notebooks = root.join(NOTEBOOKS_DIR);
    if !notebooks.is_dir() {
        log::debug!("no {} directory under {}", NOTEBOOKS_DIR, root.display());
        return Ok(written);
    }

    let mut inputs: Vec<PathBuf> = fs::read_dir(&notebooks)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "ipynb"))
        .collect();
    inputs.sort();

    for input in inputs {
        let Some(stem) = input.file_stem() else {
            continue;
        };
        let output = docs.join(format!("{}.html", stem.to_string_lossy()));
        written.push(notebook::convert(&input, Some(output.as_path()))?);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generate_readme_only() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("README.md"), "# trueno-vega\n\nPlots.").unwrap();

        let written = generate(dir.path()).unwrap();
        assert_eq!(written, vec![dir.path().join("docs/index.html")]);
        let html = fs::read_to_string(&written[0]).unwrap();
        assert!(html.contains("<h1>trueno-vega</h1>"));
    }

    #[test]
    fn test_generate_converts_notebooks() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("README.md"), "readme").unwrap();
        fs::create_dir(dir.path().join("notebooks")).unwrap();
        fs::write(
            dir.path().join("notebooks/intro.ipynb"),
            r##"{"cells": [{"cell_type": "markdown", "source": "# Intro"}]}"##,
        )
        .unwrap();
        fs::write(dir.path().join("notebooks/notes.txt"), "skip").unwrap();

        let written = generate(dir.path()).unwrap();
        assert_eq!(written.len(), 2);
        let page = fs::read_to_string(dir.path().join("docs/intro.html")).unwrap();
        assert!(page.contains("<h1>Intro</h1>"));
        assert!(!dir.path().join("docs/notes.html").exists());
    }

    #[test]
    fn test_generate_requires_readme() {
        let dir = TempDir::new().unwrap();
        assert!(generate(dir.path()).is_err());
    }
}
