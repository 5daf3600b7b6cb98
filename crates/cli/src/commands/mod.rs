//! CLI command implementations.

pub mod catalog;
pub mod seed;

use std::path::PathBuf;

use nepfit_storefront::backend::seed::SeedError;
use thiserror::Error;

/// Errors returned by CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Seed(#[from] SeedError),

    #[error("no seed file given; pass --seed or set NEPFIT_SEED_PATH")]
    NoSeedPath,

    #[error("{0} problem(s) found in seed file")]
    InvalidSeed(usize),
}

/// Resolve the seed path from the flag, falling back to `NEPFIT_SEED_PATH`.
///
/// # Errors
///
/// Returns `CommandError::NoSeedPath` if neither is set.
pub fn seed_path(flag: Option<PathBuf>) -> Result<PathBuf, CommandError> {
    seed_path_from(flag, |key| std::env::var(key).ok())
}

fn seed_path_from(
    flag: Option<PathBuf>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<PathBuf, CommandError> {
    flag.or_else(|| {
        lookup("NEPFIT_SEED_PATH")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
    })
    .ok_or(CommandError::NoSeedPath)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_wins_over_env() {
        let path = seed_path_from(Some(PathBuf::from("a.json")), |_| Some("b.json".into()));
        assert_eq!(path.ok(), Some(PathBuf::from("a.json")));
    }

    #[test]
    fn test_env_fallback_ignores_blank() {
        let path = seed_path_from(None, |_| Some("b.json".into()));
        assert_eq!(path.ok(), Some(PathBuf::from("b.json")));

        let missing = seed_path_from(None, |_| Some("  ".into()));
        assert!(matches!(missing, Err(CommandError::NoSeedPath)));
    }
}
