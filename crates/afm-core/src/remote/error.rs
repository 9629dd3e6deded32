//! Error type for platform-CLI invocations.

use super::listing::ListingError;

/// Failure talking to the remote app through the platform CLI.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// The platform CLI binary could not be started.
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The platform CLI ran but exited unsuccessfully.
    #[error("'{program}' {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    /// The listing output did not have the expected shape.
    #[error(transparent)]
    Listing(#[from] ListingError),
}
