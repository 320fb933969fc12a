use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::item::Catalog;
use super::parse::parse_catalog;

pub fn load_catalog(path: &Path) -> Result<Catalog> {
    tracing::info!(path = %path.display(), "loading dataset");

    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset file {}", path.display()))?;
    let catalog = parse_catalog(&raw)
        .with_context(|| format!("failed to parse dataset file {}", path.display()))?;

    if catalog.skipped() > 0 {
        tracing::warn!(
            skipped = catalog.skipped(),
            "dropped malformed dataset records"
        );
    }
    tracing::info!(items = catalog.len(), "dataset loaded");

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn loads_dataset_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"a": {{"title": "Heat", "userScore": 4.5, "communityScore": 4.1}}}}"#
        )
        .unwrap();

        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("a").unwrap().title, "Heat");
    }

    #[test]
    fn missing_file_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let error = load_catalog(&path).unwrap_err();
        assert!(format!("{error:#}").contains("absent.json"));
    }
}
