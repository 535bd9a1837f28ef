use anyhow::Result;
use prism_facets::config::Config;

/// Print the request body the configured search would send
pub fn run_compile(config: &Config) -> Result<()> {
    let source = config.to_search_source()?;
    tracing::info!("Compiled {} facets", source.facets().len());
    println!("{}", serde_json::to_string_pretty(&source.to_value())?);
    Ok(())
}
