//! Access to the remote application's filesystem through the platform CLI.
//!
//! The engine depends only on the `RemoteFiles` trait. The concrete
//! `PlatformCli` implementation shells out to the external command and
//! parses its human-oriented listing output, so pattern matching and the
//! walker never see the scrape format.

mod cli;
mod error;
mod listing;

pub use cli::PlatformCli;
pub use error::RemoteError;
pub use listing::{parse_listing, ListingEntry, ListingError};

/// Capability the mirroring engine needs from the remote host.
///
/// Implementations are blocking; async callers run them inside
/// `tokio::task::spawn_blocking`.
pub trait RemoteFiles {
    /// Lists the remote directory at `path` on the given app instance.
    fn list_directory(&self, path: &str, instance: u32) -> Result<Vec<ListingEntry>, RemoteError>;

    /// Reads the remote file at `path` on the given app instance.
    fn read_file(&self, path: &str, instance: u32) -> Result<Vec<u8>, RemoteError>;
}
