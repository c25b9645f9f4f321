//! Sites list loaded at startup

use crate::models::Site;
use crate::Result;
use std::fs;
use std::path::Path;

/// Site used when no usable sites file is available.
pub const DEFAULT_SITE: &str = "Default Site";

/// Parse a JSON array of `{ "name": ... }` objects.
pub fn read_sites(path: &Path) -> Result<Vec<Site>> {
    let raw = fs::read_to_string(path)?;
    let sites: Vec<Site> = serde_json::from_str(&raw)?;
    Ok(sites)
}

/// Load the sites list, falling back to a single [`DEFAULT_SITE`] when the
/// file is missing, unparsable or empty. Never fails.
#[must_use]
pub fn load_sites(path: &Path) -> Vec<Site> {
    match read_sites(path) {
        Ok(sites) => {
            let sites: Vec<Site> = sites
                .into_iter()
                .filter(|s| !s.name.trim().is_empty())
                .collect();
            if sites.is_empty() {
                log::warn!("No sites listed in {}", path.display());
                vec![Site::new(DEFAULT_SITE)]
            } else {
                sites
            }
        }
        Err(e) => {
            log::error!("Failed to load sites from {}: {e}", path.display());
            vec![Site::new(DEFAULT_SITE)]
        }
    }
}

/// Find a site by exact name, case-insensitive name, or 1-based index.
#[must_use]
pub fn resolve_site<'a>(sites: &'a [Site], query: &str) -> Option<&'a Site> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    if let Some(site) = sites.iter().find(|s| s.name == query) {
        return Some(site);
    }
    if let Some(site) = sites.iter().find(|s| s.name.eq_ignore_ascii_case(query)) {
        return Some(site);
    }

    query
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|idx| sites.get(idx))
}
