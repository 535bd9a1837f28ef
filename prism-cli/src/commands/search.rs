use super::decode::print_facets;
use anyhow::{Context, Result};
use prism_facets::config::Config;
use prism_facets::{HttpTransport, SearchService};

pub async fn run_search(
    mut config: Config,
    url: Option<String>,
    index: Option<String>,
    json: bool,
) -> Result<()> {
    if let Some(url) = url {
        config.server.url = url;
    }
    let index = index.or_else(|| config.search.index.clone());

    let source = config.to_search_source()?;
    let transport = HttpTransport::from_config(&config.server)
        .with_context(|| format!("connecting to {}", config.server.url))?;

    let mut service = SearchService::new(&transport).source(source);
    if let Some(index) = index {
        service = service.index(index);
    }
    let result = service.execute().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result.facets)?);
    } else {
        println!(
            "{} hits in {}ms{}",
            result.total_hits(),
            result.took,
            if result.timed_out { " (timed out)" } else { "" }
        );
        print_facets(&result.facets);
    }
    Ok(())
}
