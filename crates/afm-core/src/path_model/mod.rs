//! Path modeling for remote-to-local mirroring.
//!
//! Turns loosely-formatted path arguments into a canonical server-side
//! starting path plus the local destination root that mirrors it. Glob
//! expansion happens before this layer; everything here treats its input as
//! a literal path.

mod normalize;

pub use normalize::{normalize, NormalizeError};

use std::path::{Path, PathBuf};

/// Resolved pairing of a canonical remote path and its mirrored local root.
///
/// `starting_path_server` is always absolute and, outside file mode, always
/// carries a trailing `/`. `root_working_dir_local` is the local directory
/// (or file, in file mode) named after the last server path segment, beneath
/// the current working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryContext {
    pub starting_path_server: String,
    pub root_working_dir_local: PathBuf,
}

impl DirectoryContext {
    /// Context for downloading the whole app: server root `/` mirrored into
    /// `cwd/<app_name>`. Used when no path arguments were given.
    pub fn whole_app(cwd: &Path, app_name: &str) -> Self {
        Self {
            starting_path_server: "/".to_string(),
            root_working_dir_local: cwd.join(app_name),
        }
    }
}

/// Context building failed; carries the index of the offending argument.
#[derive(Debug, thiserror::Error)]
#[error("path argument {index}: {source}")]
pub struct ContextError {
    pub index: usize,
    #[source]
    pub source: NormalizeError,
}

/// Resolves each path argument to a `DirectoryContext`, one per argument,
/// preserving input order. The first argument that fails to normalize fails
/// the whole build.
pub fn build_contexts(
    cwd: &Path,
    paths: &[String],
    is_file: bool,
) -> Result<Vec<DirectoryContext>, ContextError> {
    paths
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            normalize(cwd, raw, is_file).map_err(|source| ContextError { index, source })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_paths_no_contexts() {
        let contexts = build_contexts(Path::new("/work"), &[], false).unwrap();
        assert!(contexts.is_empty());
    }

    #[test]
    fn one_context_per_path_in_order() {
        let paths = vec![
            "/app/src/".to_string(),
            "app/logs/".to_string(),
            "app/files".to_string(),
        ];
        let contexts = build_contexts(Path::new("/work"), &paths, false).unwrap();
        assert_eq!(contexts.len(), 3);
        assert_eq!(contexts[0].starting_path_server, "/app/src/");
        assert_eq!(contexts[1].starting_path_server, "/app/logs/");
        assert_eq!(contexts[2].starting_path_server, "/app/files/");
    }

    #[test]
    fn sibling_paths_resolve_independently() {
        let paths = vec!["/app/src/".to_string(), "app/logs/".to_string()];
        let contexts = build_contexts(Path::new("/work/mirror"), &paths, false).unwrap();
        assert_eq!(
            contexts[0].root_working_dir_local,
            PathBuf::from("/work/mirror/src")
        );
        assert_eq!(
            contexts[1].root_working_dir_local,
            PathBuf::from("/work/mirror/logs")
        );
    }

    #[test]
    fn failing_path_reports_its_index() {
        let paths = vec!["app/src".to_string(), "//".to_string()];
        let err = build_contexts(Path::new("/work"), &paths, false).unwrap_err();
        assert_eq!(err.index, 1);
    }

    #[test]
    fn whole_app_rooted_at_server_root() {
        let ctx = DirectoryContext::whole_app(Path::new("/work"), "billing");
        assert_eq!(ctx.starting_path_server, "/");
        assert_eq!(ctx.root_working_dir_local, PathBuf::from("/work/billing"));
    }
}
