use anyhow::Result;
use prism_facets::config::Config;
use std::path::Path;

pub fn run_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it.",
            path.display()
        );
    }
    Config::example().save(path)?;
    println!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("facets.toml");

        run_init(&path, false).unwrap();
        assert!(run_init(&path, false).is_err());
        run_init(&path, true).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.facets.len(), Config::example().facets.len());
    }
}
