//! Pre-parse usage checks that must run before clap sees the argv.

/// Invocation shapes rejected before flag parsing.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    #[error("missing app name. usage: 'afm APP_NAME [PATHS]... [--flags]'")]
    MissingAppName,

    #[error("app name begins with '-' or '--'. usage: 'afm APP_NAME [PATHS]... [--flags]'")]
    AppNameIsFlag,
}

/// The app name must be the first argument; flags may not precede it.
/// Help and version requests are let through to clap.
pub fn check_invocation(argv: &[String]) -> Result<(), UsageError> {
    match argv.get(1).map(String::as_str) {
        None => Err(UsageError::MissingAppName),
        Some("-h" | "--help" | "-V" | "--version") => Ok(()),
        Some(first) if first.starts_with('-') => Err(UsageError::AppNameIsFlag),
        Some(_) => Ok(()),
    }
}
