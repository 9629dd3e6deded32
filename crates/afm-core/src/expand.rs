//! Glob expansion of path arguments against the remote current directory.
//!
//! A pattern is any argument containing `*`, `?` or `[`. Each pattern costs
//! one listing of the remote current directory; matches replace the pattern
//! in place as `./<name>`. Literal arguments pass through unchanged, and a
//! pattern with no match stays literal so later stages treat it as a path.

use glob::Pattern;

use crate::remote::{RemoteError, RemoteFiles};

/// How many listing matches substitute for one pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Substitute the first match only.
    #[default]
    First,
    /// Substitute every match, in listing order.
    All,
}

/// Expansion failure, naming the pattern being expanded.
#[derive(Debug, thiserror::Error)]
pub enum ExpandError {
    /// The remote listing for a pattern could not be obtained or parsed.
    #[error("listing remote directory for pattern '{pattern}': {source}")]
    Listing {
        pattern: String,
        #[source]
        source: RemoteError,
    },

    /// The pattern itself is not valid glob syntax.
    #[error("invalid glob pattern '{pattern}': {source}")]
    BadPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// True when `path` contains a glob metacharacter.
pub fn is_glob(path: &str) -> bool {
    path.contains(['*', '?', '['])
}

/// Expands glob-bearing entries of `paths` against the remote
/// current-directory listing, preserving argument order. Literal entries
/// never touch the remote.
pub fn expand_globs<R: RemoteFiles>(
    remote: &R,
    paths: Vec<String>,
    instance: u32,
    mode: MatchMode,
) -> Result<Vec<String>, ExpandError> {
    let mut expanded = Vec::with_capacity(paths.len());

    for path in paths {
        if !is_glob(&path) {
            expanded.push(path);
            continue;
        }

        let pattern = Pattern::new(&path).map_err(|source| ExpandError::BadPattern {
            pattern: path.clone(),
            source,
        })?;

        let entries = remote
            .list_directory("./", instance)
            .map_err(|source| ExpandError::Listing {
                pattern: path.clone(),
                source,
            })?;

        let mut matches = entries
            .iter()
            .filter(|entry| pattern.matches(&entry.name))
            .map(|entry| format!("./{}", entry.name))
            .peekable();

        if matches.peek().is_none() {
            tracing::warn!(pattern = %path, "glob matched nothing; keeping it literal");
            expanded.push(path);
            continue;
        }

        match mode {
            MatchMode::First => {
                if let Some(first) = matches.next() {
                    expanded.push(first);
                }
            }
            MatchMode::All => expanded.extend(matches),
        }
    }

    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{parse_listing, ListingEntry};

    const LISTING: &str =
        "Getting files for app billing in org acme / space dev as dev@acme.io...\nOK\n\nxyz.txt                                   220B\na.go                                      675B\nab.go                                     333B\nyz.go                                     123B\n\n";

    struct FakeRemote {
        raw: &'static str,
    }

    impl RemoteFiles for FakeRemote {
        fn list_directory(
            &self,
            _path: &str,
            _instance: u32,
        ) -> Result<Vec<ListingEntry>, RemoteError> {
            Ok(parse_listing(self.raw)?)
        }

        fn read_file(&self, _path: &str, _instance: u32) -> Result<Vec<u8>, RemoteError> {
            unreachable!("expansion never reads files")
        }
    }

    fn expand_one(pattern: &str, mode: MatchMode) -> Vec<String> {
        let remote = FakeRemote { raw: LISTING };
        expand_globs(&remote, vec![pattern.to_string()], 0, mode).unwrap()
    }

    #[test]
    fn star_matches_by_extension() {
        assert_eq!(expand_one("*.txt", MatchMode::First), ["./xyz.txt"]);
    }

    #[test]
    fn question_mark_matches_single_character() {
        assert_eq!(expand_one("?.go", MatchMode::First), ["./a.go"]);
    }

    #[test]
    fn bracket_class_matches_one_from_class() {
        assert_eq!(expand_one("[a-z]b.go", MatchMode::First), ["./ab.go"]);
    }

    #[test]
    fn literal_paths_pass_through_in_order() {
        let remote = FakeRemote { raw: LISTING };
        let paths = vec!["app/src".to_string(), "*.txt".to_string(), "app/logs".to_string()];
        let expanded = expand_globs(&remote, paths, 0, MatchMode::First).unwrap();
        assert_eq!(expanded, ["app/src", "./xyz.txt", "app/logs"]);
    }

    #[test]
    fn unmatched_pattern_stays_literal() {
        assert_eq!(expand_one("*.rs", MatchMode::First), ["*.rs"]);
    }

    #[test]
    fn all_mode_substitutes_every_match() {
        assert_eq!(
            expand_one("*.go", MatchMode::All),
            ["./a.go", "./ab.go", "./yz.go"]
        );
    }

    #[test]
    fn first_mode_substitutes_exactly_one() {
        assert_eq!(expand_one("*.go", MatchMode::First), ["./a.go"]);
    }

    #[test]
    fn listing_failure_names_the_pattern() {
        let remote = FakeRemote { raw: "no blank line" };
        let err =
            expand_globs(&remote, vec!["*.txt".to_string()], 0, MatchMode::First).unwrap_err();
        match err {
            ExpandError::Listing { pattern, .. } => assert_eq!(pattern, "*.txt"),
            other => panic!("expected Listing error, got {other:?}"),
        }
    }

    #[test]
    fn glob_detection() {
        assert!(is_glob("*.txt"));
        assert!(is_glob("?.go"));
        assert!(is_glob("[a-z]b.go"));
        assert!(!is_glob("app/src/node"));
    }
}
