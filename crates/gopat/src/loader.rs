//! Reads and parses Go files to search.

use camino::{Utf8Path, Utf8PathBuf};
use gopat_syntax::{Node, SyntaxErrorInfo, parse_file};
use tracing::{debug, warn};

use crate::error::LoadError;

/// One parsed file.
#[derive(Debug, Clone)]
pub struct Target {
    path: Utf8PathBuf,
    tree: Node,
    diagnostics: Vec<SyntaxErrorInfo>,
}

impl Target {
    /// Returns the path the file was read from.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Returns the parsed file.
    #[must_use]
    pub const fn tree(&self) -> &Node {
        &self.tree
    }

    /// Returns the file for rewriting.
    pub const fn tree_mut(&mut self) -> &mut Node {
        &mut self.tree
    }

    /// Returns the syntax errors the parser recovered from.
    #[must_use]
    pub fn diagnostics(&self) -> &[SyntaxErrorInfo] {
        &self.diagnostics
    }

    /// Consumes the target, returning its tree.
    #[must_use]
    pub fn into_tree(self) -> Node {
        self.tree
    }
}

/// Reads and parses `paths` in the order given.
///
/// Files with recoverable syntax errors still load; their errors are kept as
/// diagnostics.
///
/// # Errors
///
/// Returns a [`LoadError`] for the first file that cannot be read or parsed.
pub fn load_targets<P: AsRef<Utf8Path>>(paths: &[P]) -> Result<Vec<Target>, LoadError> {
    paths.iter().map(|path| load(path.as_ref())).collect()
}

fn load(path: &Utf8Path) -> Result<Target, LoadError> {
    let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })?;
    let (tree, diagnostics) = parse_file(&source).map_err(|source| LoadError::Parse {
        path: path.to_owned(),
        source,
    })?;
    if diagnostics.is_empty() {
        debug!(%path, "loaded target");
    } else {
        warn!(%path, errors = diagnostics.len(), "loaded target with syntax errors");
    }
    Ok(Target {
        path: path.to_owned(),
        tree,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    use super::*;

    #[fixture]
    fn dir() -> TempDir {
        TempDir::new().expect("temp dir")
    }

    fn write(dir: &TempDir, name: &str, contents: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::from_path_buf(dir.path().join(name)).expect("utf-8 path");
        fs::write(&path, contents).expect("write file");
        path
    }

    #[rstest]
    fn targets_keep_the_order_given(dir: TempDir) {
        let b = write(&dir, "b.go", "package b\n");
        let a = write(&dir, "a.go", "package a\n\nfunc f() {}\n");
        let targets = load_targets(&[&b, &a]).expect("load");
        let paths: Vec<_> = targets.iter().map(Target::path).collect();
        assert_eq!(paths, [b.as_path(), a.as_path()]);
        assert!(targets.iter().all(|target| target.diagnostics().is_empty()));
    }

    #[rstest]
    fn syntax_errors_become_diagnostics(dir: TempDir) {
        let path = write(&dir, "broken.go", "package p\n\nfunc f() { x := }\n");
        let targets = load_targets(&[path]).expect("load");
        let target = targets.first().expect("target");
        assert!(!target.diagnostics().is_empty());
    }

    #[rstest]
    fn missing_files_report_their_path(dir: TempDir) {
        let path = Utf8PathBuf::from_path_buf(dir.path().join("absent.go")).expect("utf-8 path");
        let error = load_targets(&[&path]).expect_err("missing file");
        assert!(matches!(&error, LoadError::Io { path: failed, .. } if failed == &path));
        assert!(error.to_string().contains("absent.go"));
    }
}
