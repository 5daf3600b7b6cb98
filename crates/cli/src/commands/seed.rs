//! Seed file validation.

use std::path::Path;

use nepfit_storefront::backend::seed::SeedData;
use tracing::{error, info};

use super::CommandError;

/// `nepfit seed check`: parse a seed file and report consistency problems.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or any problem is found.
pub fn check(path: &Path) -> Result<(), CommandError> {
    let data = SeedData::load(path)?;
    info!(
        path = %path.display(),
        products = data.products.len(),
        discount_codes = data.discount_codes.len(),
        "Parsed seed file"
    );

    let problems = data.problems();
    if !problems.is_empty() {
        error!("Seed validation failed:");
        for problem in &problems {
            error!("  - {problem}");
        }
        return Err(CommandError::InvalidSeed(problems.len()));
    }

    info!("Seed file validated successfully");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn write_seed(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("nepfit-cli-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_check_accepts_clean_seed() {
        let path = write_seed(
            "clean.json",
            r#"{"products":[{"id":"mat","name":"Yoga Mat","price":"25.00","category":"Yoga"}],
                "discount_codes":[{"code":"SAVE10","percent_off":"10"}]}"#,
        );
        assert!(check(&path).is_ok());
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_check_counts_problems() {
        let path = write_seed(
            "dupes.json",
            r#"{"products":[
                {"id":"mat","name":"Yoga Mat","price":"25.00","category":"Yoga"},
                {"id":"mat","name":"","price":"25.00","category":"Yoga"}]}"#,
        );
        let result = check(&path);
        assert!(matches!(result, Err(CommandError::InvalidSeed(2))));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_check_reports_missing_file() {
        let result = check(Path::new("/nonexistent/nepfit-seed.json"));
        assert!(matches!(result, Err(CommandError::Seed(_))));
    }
}
