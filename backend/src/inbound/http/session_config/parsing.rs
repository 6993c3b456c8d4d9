//! Environment parsing helpers shared by the configuration loaders.

use super::BuildMode;

/// Return `fallback` after warning in debug builds, or `error` in release.
pub(crate) fn debug_warn_or_error<T, E, F>(
    mode: BuildMode,
    fallback: T,
    error: E,
    warn_fn: F,
) -> Result<T, E>
where
    F: FnOnce(),
{
    if mode.is_debug() {
        warn_fn();
        Ok(fallback)
    } else {
        Err(error)
    }
}

/// Parse the boolean spellings accepted in environment toggles.
pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
