//! Omit filtering for the mirror walk.

use glob::Pattern;

/// Compiled omit rule: skip server paths that glob-match the pattern or
/// equal it literally. Default options let `*` cross `/`, so `*.log` omits
/// logs at any depth.
#[derive(Debug, Clone, Default)]
pub struct OmitFilter {
    rule: Option<(String, Pattern)>,
}

impl OmitFilter {
    /// Builds a filter from the `--omit` value; `None` or empty omits
    /// nothing. Slashes at either end of the value are ignored, matching how
    /// path arguments are cleaned.
    pub fn new(omit: Option<&str>) -> Result<Self, glob::PatternError> {
        let rule = match omit {
            Some(raw) if !raw.is_empty() => {
                let cleaned = raw.trim_start_matches('/').trim_end_matches('/').to_string();
                let pattern = Pattern::new(&cleaned)?;
                Some((cleaned, pattern))
            }
            _ => None,
        };
        Ok(Self { rule })
    }

    /// True when the server path is omitted. An omitted directory prunes its
    /// whole subtree, since the walk never descends into it.
    pub fn omits(&self, server_path: &str) -> bool {
        let Some((literal, pattern)) = &self.rule else {
            return false;
        };
        let path = server_path.trim_start_matches('/').trim_end_matches('/');
        path == literal || pattern.matches(path)
    }
}
