//! Canonical server path and mirrored local root from one raw path argument.

use std::path::Path;

use super::DirectoryContext;

/// A path argument that carries no path segments (empty or all slashes).
#[derive(Debug, thiserror::Error)]
#[error("path argument '{raw}' has no path segments")]
pub struct NormalizeError {
    pub raw: String,
}

/// Normalizes one raw path argument into a `DirectoryContext`.
///
/// Leading and trailing slashes are stripped before processing, so every
/// slash variant of the same path (`p`, `/p`, `p/`, `/p/`) produces the same
/// context. Outside file mode the server path gets a trailing `/`; in file
/// mode it does not. The local root mirrors the last path segment beneath
/// `cwd`, with OS-native separators.
pub fn normalize(cwd: &Path, raw: &str, is_file: bool) -> Result<DirectoryContext, NormalizeError> {
    let cleaned = raw.trim_start_matches('/').trim_end_matches('/');
    // Glob substitution yields "./name"; canonicalize that prefix away.
    let cleaned = cleaned.strip_prefix("./").unwrap_or(cleaned);
    if cleaned.is_empty() || cleaned == "." {
        return Err(NormalizeError {
            raw: raw.to_string(),
        });
    }

    let last_segment = cleaned.rsplit('/').next().unwrap_or(cleaned);

    let starting_path_server = if is_file {
        format!("/{cleaned}")
    } else {
        format!("/{cleaned}/")
    };

    Ok(DirectoryContext {
        starting_path_server,
        root_working_dir_local: cwd.join(last_segment),
    })
}
