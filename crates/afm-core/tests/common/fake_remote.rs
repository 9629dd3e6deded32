//! In-memory `RemoteFiles` fake backed by a path → content map.
//!
//! Directory listings are derived from the file paths, the way the real
//! platform CLI derives them from the app's filesystem.

use std::collections::{BTreeMap, BTreeSet};
use std::io;

use afm_core::remote::{ListingEntry, RemoteError, RemoteFiles};

pub struct FakeRemote {
    files: BTreeMap<String, Vec<u8>>,
    fail_paths: Vec<String>,
}

impl FakeRemote {
    /// Builds a fake from absolute server paths and their contents.
    pub fn new(files: &[(&str, &str)]) -> Self {
        Self {
            files: files
                .iter()
                .map(|(path, content)| (path.to_string(), content.as_bytes().to_vec()))
                .collect(),
            fail_paths: Vec::new(),
        }
    }

    /// Marks one file path as failing on read.
    pub fn fail_on(mut self, path: &str) -> Self {
        self.fail_paths.push(path.to_string());
        self
    }
}

impl RemoteFiles for FakeRemote {
    fn list_directory(&self, path: &str, _instance: u32) -> Result<Vec<ListingEntry>, RemoteError> {
        // Accept "./", "/" and "/a/b/" spellings of the same directory.
        let mut prefix = path.trim_start_matches('.').to_string();
        if !prefix.starts_with('/') {
            prefix.insert(0, '/');
        }
        if !prefix.ends_with('/') {
            prefix.push('/');
        }

        let mut dirs = BTreeSet::new();
        let mut files = Vec::new();
        for (file, content) in &self.files {
            let Some(rest) = file.strip_prefix(&prefix) else {
                continue;
            };
            match rest.split_once('/') {
                Some((dir, _)) => {
                    dirs.insert(dir.to_string());
                }
                None => files.push(ListingEntry {
                    name: rest.to_string(),
                    size: format!("{}B", content.len()),
                    is_dir: false,
                }),
            }
        }

        let mut entries: Vec<ListingEntry> = dirs
            .into_iter()
            .map(|name| ListingEntry {
                name,
                size: "-".to_string(),
                is_dir: true,
            })
            .collect();
        entries.extend(files);
        Ok(entries)
    }

    fn read_file(&self, path: &str, _instance: u32) -> Result<Vec<u8>, RemoteError> {
        if self.fail_paths.iter().any(|p| p == path) {
            return Err(RemoteError::Spawn {
                program: "fake".to_string(),
                source: io::Error::other("injected failure"),
            });
        }
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| RemoteError::Spawn {
                program: "fake".to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, format!("no such file: {path}")),
            })
    }
}
