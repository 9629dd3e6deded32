//! The mirror walk: sequential remote listings, file downloads fanned out
//! in a bounded `JoinSet`.
//!
//! Contexts are independent, read-only values, so they are processed one
//! after another against a single shared download set; the cap applies to
//! the whole run.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::task::JoinSet;

use crate::path_model::DirectoryContext;
use crate::remote::RemoteFiles;

use super::filter::OmitFilter;

/// Knobs for one mirror run.
#[derive(Debug, Clone)]
pub struct MirrorOptions {
    /// App instance index passed to every remote command.
    pub instance: u32,
    /// Treat each context's server path as a single file.
    pub is_file: bool,
    pub omit: OmitFilter,
    /// Cap on concurrently running file downloads.
    pub max_concurrent: usize,
    /// Print each file as it finishes downloading.
    pub verbose: bool,
}

/// End-of-run accounting.
#[derive(Debug, Default)]
pub struct MirrorSummary {
    pub files: u64,
    pub directories: u64,
    /// Entries dropped by the omit filter.
    pub skipped: u64,
    /// Per-path failure descriptions; non-empty means a partial mirror.
    pub failures: Vec<String>,
}

type DownloadSet = JoinSet<(String, Result<()>)>;

/// Walks each context's server subtree and mirrors it beneath the context's
/// local root. Individual download failures are recorded in the summary
/// rather than aborting the run; a directory that fails to list is recorded
/// and its subtree is skipped.
pub async fn mirror_contexts<R>(
    remote: Arc<R>,
    contexts: Vec<DirectoryContext>,
    opts: &MirrorOptions,
) -> Result<MirrorSummary>
where
    R: RemoteFiles + Send + Sync + 'static,
{
    let mut summary = MirrorSummary::default();
    let mut downloads: DownloadSet = JoinSet::new();
    let cap = opts.max_concurrent.max(1);

    for ctx in contexts {
        tracing::info!(server = %ctx.starting_path_server, dest = %ctx.root_working_dir_local.display(), "mirroring");

        if opts.is_file {
            spawn_download(
                &mut downloads,
                &remote,
                ctx.starting_path_server.clone(),
                ctx.root_working_dir_local.clone(),
                opts,
                cap,
                &mut summary,
            )
            .await?;
            continue;
        }

        fs::create_dir_all(&ctx.root_working_dir_local)
            .with_context(|| format!("creating {}", ctx.root_working_dir_local.display()))?;

        let mut pending: VecDeque<(String, PathBuf)> = VecDeque::new();
        pending.push_back((
            ctx.starting_path_server.clone(),
            ctx.root_working_dir_local.clone(),
        ));

        while let Some((server_dir, local_dir)) = pending.pop_front() {
            let listed = {
                let remote = Arc::clone(&remote);
                let dir = server_dir.clone();
                let instance = opts.instance;
                tokio::task::spawn_blocking(move || remote.list_directory(&dir, instance))
                    .await
                    .context("listing task join")?
            };

            let entries = match listed {
                Ok(entries) => entries,
                Err(err) => {
                    summary.failures.push(format!("{server_dir}: {err}"));
                    continue;
                }
            };

            for entry in entries {
                let server_path = format!("{server_dir}{}", entry.name);
                if opts.omit.omits(&server_path) {
                    tracing::debug!(path = %server_path, "omitted");
                    summary.skipped += 1;
                    continue;
                }

                if entry.is_dir {
                    let local_sub = local_dir.join(&entry.name);
                    fs::create_dir_all(&local_sub)
                        .with_context(|| format!("creating {}", local_sub.display()))?;
                    summary.directories += 1;
                    pending.push_back((format!("{server_path}/"), local_sub));
                } else {
                    spawn_download(
                        &mut downloads,
                        &remote,
                        server_path,
                        local_dir.join(&entry.name),
                        opts,
                        cap,
                        &mut summary,
                    )
                    .await?;
                }
            }
        }
    }

    while let Some(joined) = downloads.join_next().await {
        record(joined, &mut summary, opts.verbose)?;
    }

    Ok(summary)
}

/// Spawns one blocking download, first draining the set down below the cap.
async fn spawn_download<R>(
    downloads: &mut DownloadSet,
    remote: &Arc<R>,
    server_path: String,
    dest: PathBuf,
    opts: &MirrorOptions,
    cap: usize,
    summary: &mut MirrorSummary,
) -> Result<()>
where
    R: RemoteFiles + Send + Sync + 'static,
{
    while downloads.len() >= cap {
        let Some(joined) = downloads.join_next().await else {
            break;
        };
        record(joined, summary, opts.verbose)?;
    }

    let remote = Arc::clone(remote);
    let instance = opts.instance;
    downloads.spawn_blocking(move || {
        let res = download_one(remote.as_ref(), &server_path, &dest, instance);
        (server_path, res)
    });
    Ok(())
}

fn record(
    joined: Result<(String, Result<()>), tokio::task::JoinError>,
    summary: &mut MirrorSummary,
    verbose: bool,
) -> Result<()> {
    let (server_path, res) = joined.map_err(|e| anyhow::anyhow!("download task join: {e}"))?;
    match res {
        Ok(()) => {
            summary.files += 1;
            if verbose {
                println!("Downloaded {server_path}");
            }
        }
        Err(err) => summary.failures.push(format!("{server_path}: {err:#}")),
    }
    Ok(())
}

fn download_one<R: RemoteFiles>(
    remote: &R,
    server_path: &str,
    dest: &Path,
    instance: u32,
) -> Result<()> {
    let bytes = remote.read_file(server_path, instance)?;
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    fs::write(dest, &bytes).with_context(|| format!("writing {}", dest.display()))?;
    tracing::debug!(path = server_path, bytes = bytes.len(), "downloaded");
    Ok(())
}
