//! Provider configuration loading
//!
//! Tile providers are described either as a JSON array of provider records or
//! as a providers CSV file with one `name,minzoom,maxzoom,scale,url,attribution`
//! record per line. Lines starting with `#` are comments. A bracketed group in
//! the URL (`https://[abc].tile.example.org/...`) is shorthand for the `{s}`
//! placeholder with those characters as sub-domains.

use crate::{layers::tile::TileLayerSpec, MapError, Result};
use std::path::Path;

/// Number of fields in one providers CSV record
const CSV_FIELDS: usize = 6;

/// Loads provider records from a file; `.json` files are read as JSON, anything else as CSV.
pub fn load_providers(path: impl AsRef<Path>) -> Result<Vec<TileLayerSpec>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));

    let specs = if is_json {
        parse_providers_json(&contents)?
    } else {
        parse_providers_csv(&contents)?
    };

    log::info!("loaded {} providers from {}", specs.len(), path.display());
    Ok(specs)
}

/// Parses a JSON array of provider records.
pub fn parse_providers_json(contents: &str) -> Result<Vec<TileLayerSpec>> {
    let specs: Vec<TileLayerSpec> = serde_json::from_str(contents)?;
    Ok(specs.into_iter().map(expand_subdomain_group).collect())
}

/// Parses providers CSV records.
///
/// Fields follow the usual CSV quoting rules, so a quoted URL or attribution
/// may contain commas and doubled quotes. Records without exactly six fields
/// are skipped with a warning; malformed numbers fail the whole file.
pub fn parse_providers_csv(contents: &str) -> Result<Vec<TileLayerSpec>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(contents.as_bytes());

    let mut specs = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| MapError::ParseError(err.to_string()))?;
        let line_no = record.position().map_or(0, |pos| pos.line());

        if record.len() != CSV_FIELDS {
            log::warn!(
                "skipping provider record on line {} ({} of {} fields)",
                line_no,
                record.len(),
                CSV_FIELDS
            );
            continue;
        }

        let spec = TileLayerSpec::new(
            &record[0],
            &record[4],
            parse_field(&record[1], "minzoom", line_no)?,
            parse_field(&record[2], "maxzoom", line_no)?,
            &record[5],
        )
        .with_scale(parse_field(&record[3], "scale", line_no)?);

        specs.push(expand_subdomain_group(spec));
    }

    Ok(specs)
}

fn parse_field<T: std::str::FromStr>(value: &str, field: &str, line_no: u64) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|err| {
        MapError::ParseError(format!(
            "line {}: invalid {} '{}': {}",
            line_no, field, value, err
        ))
    })
}

/// Rewrites `[abc]` in the URL to `{s}` when the record declares no sub-domains.
fn expand_subdomain_group(mut spec: TileLayerSpec) -> TileLayerSpec {
    if spec.declared_subdomains().is_some() {
        return spec;
    }
    if let Some((url, subdomains)) = split_subdomain_group(&spec.url) {
        spec.url = url;
        spec.subdomains = Some(subdomains);
    }
    spec
}

/// Finds the first `[...]` group of lowercase letters and digits.
fn split_subdomain_group(url: &str) -> Option<(String, String)> {
    let mut search_from = 0;
    while let Some(open) = url[search_from..].find('[').map(|i| i + search_from) {
        let close = open + url[open..].find(']')?;
        let group = &url[open + 1..close];

        let valid = !group.is_empty()
            && group
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
        if valid {
            let rewritten = format!("{}{{s}}{}", &url[..open], &url[close + 1..]);
            return Some((rewritten, group.to_string()));
        }
        search_from = open + 1;
    }
    None
}
