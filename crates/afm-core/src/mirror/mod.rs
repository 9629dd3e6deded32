//! Mirrors resolved directory contexts from the remote app to local disk.

mod filter;
mod run;

pub use filter::OmitFilter;
pub use run::{mirror_contexts, MirrorOptions, MirrorSummary};

use crate::path_model::DirectoryContext;

/// Local destination already exists and overwriting was not requested.
#[derive(Debug, thiserror::Error)]
#[error("local destination '{path}' already exists (use --overwrite)")]
pub struct DestinationError {
    pub path: String,
}

/// Pre-flight check for one context's local destination.
///
/// With overwrite set, an existing destination is written over in place.
/// Otherwise an existing destination rejects the context before any remote
/// interaction happens for it.
pub fn ensure_destination(
    ctx: &DirectoryContext,
    overwrite: bool,
) -> Result<(), DestinationError> {
    let dest = &ctx.root_working_dir_local;
    if !overwrite && dest.exists() {
        return Err(DestinationError {
            path: dest.display().to_string(),
        });
    }
    Ok(())
}
