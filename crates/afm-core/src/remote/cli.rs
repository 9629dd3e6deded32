//! `RemoteFiles` implementation that shells out to the platform CLI.

use std::process::Command;

use super::listing::{parse_listing, ListingEntry};
use super::{RemoteError, RemoteFiles};

/// Remote access through `<program> files <app> <path> -i <instance>`.
///
/// Every call runs the external command to completion, so this type is
/// blocking end to end; call from `spawn_blocking` in async code.
#[derive(Debug, Clone)]
pub struct PlatformCli {
    program: String,
    app_name: String,
}

impl PlatformCli {
    pub fn new(program: impl Into<String>, app_name: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            app_name: app_name.into(),
        }
    }

    /// Runs one `files` invocation and returns its stdout.
    fn run_files(&self, path: &str, instance: u32) -> Result<Vec<u8>, RemoteError> {
        let output = Command::new(&self.program)
            .arg("files")
            .arg(&self.app_name)
            .arg(path)
            .arg("-i")
            .arg(instance.to_string())
            .output()
            .map_err(|source| RemoteError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(RemoteError::CommandFailed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output.stdout)
    }
}

impl RemoteFiles for PlatformCli {
    fn list_directory(&self, path: &str, instance: u32) -> Result<Vec<ListingEntry>, RemoteError> {
        tracing::debug!(path, instance, "listing remote directory");
        let stdout = self.run_files(path, instance)?;
        let text = String::from_utf8_lossy(&stdout);
        Ok(parse_listing(&text)?)
    }

    fn read_file(&self, path: &str, instance: u32) -> Result<Vec<u8>, RemoteError> {
        tracing::debug!(path, instance, "reading remote file");
        let stdout = self.run_files(path, instance)?;
        Ok(strip_preamble(stdout))
    }
}

/// File reads share the listing banner: drop everything through the first
/// blank line so only the file's bytes remain.
fn strip_preamble(stdout: Vec<u8>) -> Vec<u8> {
    match stdout.windows(2).position(|w| w == b"\n\n") {
        Some(idx) => stdout[idx + 2..].to_vec(),
        None => stdout,
    }
}
