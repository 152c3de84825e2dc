use crate::arena::models::PlaylistSummary;

use super::entities;

/// Text a playlist is matched against: `"<owner> / <title>"`, decoded and lower-cased.
pub fn search_text(item: &PlaylistSummary) -> String {
    entities::decode(&format!("{} / {}", item.owner, item.title)).to_lowercase()
}

/// Keep the items whose search text contains `predicate`, case-insensitively.
///
/// Always call this with the full source list, never with a previous result,
/// so widening the query brings excluded items back.
pub fn filter(items: &[PlaylistSummary], predicate: &str) -> Vec<PlaylistSummary> {
    let needle = predicate.to_lowercase();
    items
        .iter()
        .filter(|item| search_text(item).contains(&needle))
        .cloned()
        .collect()
}
