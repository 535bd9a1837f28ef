use anyhow::{Context, Result};
use prism_facets::{Facet, Facets, SearchResult};
use std::io::Read;
use std::path::Path;

/// Decode a saved response body and print its facets
pub fn run_decode(input: &Path, json: bool) -> Result<()> {
    let bytes = if input.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        buf
    } else {
        std::fs::read(input).with_context(|| format!("reading {}", input.display()))?
    };

    let result = SearchResult::from_slice(&bytes)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result.facets)?);
    } else {
        print_facets(&result.facets);
    }
    Ok(())
}

pub fn print_facets(facets: &Facets) {
    if facets.is_empty() {
        println!("No facets in response");
        return;
    }
    for name in facets.names() {
        if let Some(facet) = facets.get(name) {
            println!();
            for line in render_facet(name, facet) {
                println!("{}", line);
            }
        }
    }
}

fn render_facet(name: &str, facet: &Facet) -> Vec<String> {
    let mut lines = vec![match facet.total() {
        Some(total) => format!("{} [{}] total={}", name, facet.facet_type(), total),
        None => format!("{} [{}]", name, facet.facet_type()),
    }];

    if let Facet::Statistical(stats) = facet {
        lines.push(format!(
            "  min={} max={} mean={}",
            fmt_opt(stats.min),
            fmt_opt(stats.max),
            fmt_opt(stats.mean)
        ));
    }

    for bucket in facet.buckets() {
        lines.push(format!("  {:<32} {:>10}", bucket.key.to_string(), bucket.count));
    }
    lines
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
