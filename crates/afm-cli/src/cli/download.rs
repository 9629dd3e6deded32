//! The download operation: resolve paths, then mirror.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{bail, Context, Result};

use afm_core::config;
use afm_core::expand::{expand_globs, is_glob, MatchMode};
use afm_core::mirror::{ensure_destination, mirror_contexts, MirrorOptions, OmitFilter};
use afm_core::path_model::{build_contexts, DirectoryContext};
use afm_core::remote::PlatformCli;

use super::Cli;

pub async fn run_download(cli: Cli) -> Result<()> {
    let started = Instant::now();

    let cfg = config::load_or_init()?;
    tracing::debug!("loaded config: {:?}", cfg);

    let cwd = std::env::current_dir().context("could not determine current directory")?;
    let remote = Arc::new(PlatformCli::new(&cfg.platform_cli, &cli.app_name));

    let contexts = if cli.paths.is_empty() {
        // Whole-app download: server root mirrored into ./<app_name>.
        vec![DirectoryContext::whole_app(&cwd, &cli.app_name)]
    } else {
        let mode = if cli.all_matches {
            MatchMode::All
        } else {
            MatchMode::First
        };

        let paths = if cli.paths.iter().any(|p| is_glob(p)) {
            let remote = Arc::clone(&remote);
            let raw_paths = cli.paths.clone();
            let instance = cli.instance;
            tokio::task::spawn_blocking(move || {
                expand_globs(remote.as_ref(), raw_paths, instance, mode)
            })
            .await
            .context("glob expansion task failed")??
        } else {
            cli.paths.clone()
        };

        build_contexts(&cwd, &paths, cli.file)?
    };

    // Destination pre-flight. A conflicting context is skipped, not fatal,
    // unless nothing is left to mirror.
    let mut ready = Vec::with_capacity(contexts.len());
    for ctx in contexts {
        match ensure_destination(&ctx, cli.overwrite) {
            Ok(()) => ready.push(ctx),
            Err(err) => eprintln!("Skipping {}: {}", ctx.starting_path_server, err),
        }
    }
    if ready.is_empty() {
        bail!("every destination already exists; re-run with --overwrite");
    }

    let opts = MirrorOptions {
        instance: cli.instance,
        is_file: cli.file,
        omit: OmitFilter::new(cli.omit.as_deref()).context("invalid --omit pattern")?,
        max_concurrent: cfg.max_concurrent_downloads,
        verbose: cli.verbose,
    };

    let summary = mirror_contexts(remote, ready, &opts).await?;

    println!(
        "Mirrored {} file(s) and {} dir(s) in {:.1}s ({} omitted)",
        summary.files,
        summary.directories,
        started.elapsed().as_secs_f64(),
        summary.skipped
    );

    if !summary.failures.is_empty() {
        for failure in &summary.failures {
            eprintln!("failed: {failure}");
        }
        bail!("{} path(s) failed to download", summary.failures.len());
    }

    Ok(())
}
