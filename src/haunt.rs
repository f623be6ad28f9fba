//! Haunt (tenant) resolution and session isolation.
//!
//! A browser location is ambiguous about which haunt it belongs to: the id
//! can arrive as a query parameter, a hash parameter, a bare hash value, or
//! a `/h/:id` path segment, and older sessions may have preserved one in
//! the store. Resolution walks a fixed priority order and takes the first
//! candidate that passes validation.

use crate::storage::KeyValueStore;
use crate::types::HauntId;

/// Store key holding the last-known haunt
pub const CURRENT_HAUNT_KEY: &str = "current-haunt";

/// Store key holding a haunt preserved across a reload
pub const PRESERVED_HAUNT_KEY: &str = "preserved-haunt";

const MIN_HAUNT_ID_LEN: usize = 2;
const MAX_HAUNT_ID_LEN: usize = 50;

/// Allowlist check: alphanumeric, dash, underscore, length 2-50
pub fn is_valid_haunt_id(id: &str) -> bool {
    (MIN_HAUNT_ID_LEN..=MAX_HAUNT_ID_LEN).contains(&id.len())
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// The pieces of a browser location that can carry a haunt id
#[derive(Debug, Clone, Default)]
pub struct Location {
    /// Raw query string without the leading `?`
    pub query: Option<String>,
    /// Raw fragment without the leading `#`
    pub hash: Option<String>,
    /// Path component, e.g. `/h/mansion-of-dread/game`
    pub path: String,
}

fn query_param(query: &str, key: &str) -> Option<String> {
    for pair in query.split('&') {
        if let Some((k, v)) = pair.split_once('=') {
            if k == key && !v.is_empty() {
                return Some(v.to_string());
            }
        }
    }
    None
}

/// Haunt id from the hash, either as `route?haunt=<id>` or a bare value
fn haunt_from_hash(hash: &str) -> (Option<String>, Option<String>) {
    let trimmed = hash.trim_start_matches('/');

    let param = trimmed
        .split_once('?')
        .and_then(|(_, query)| query_param(query, "haunt"));

    let direct = if !trimmed.is_empty() && !trimmed.contains('?') && !trimmed.contains('=') {
        Some(trimmed.to_string())
    } else {
        None
    };

    (param, direct)
}

/// Haunt id from a `/h/:id` path segment
fn haunt_from_path(path: &str) -> Option<String> {
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    match (segments.next(), segments.next()) {
        (Some("h"), Some(id)) => Some(id.to_string()),
        _ => None,
    }
}

/// Resolve the haunt for a location, falling back through the strategy
/// order: query param, hash param, hash direct value, `/h/:id` path
/// segment, preserved session value, last-known haunt. The winner is
/// recorded as the current haunt (clearing the previous tenant's keys on
/// a switch).
pub fn resolve_haunt(location: &Location, store: &dyn KeyValueStore) -> Option<HauntId> {
    let (hash_param, hash_direct) = location
        .hash
        .as_deref()
        .map(haunt_from_hash)
        .unwrap_or((None, None));

    let candidates = [
        location
            .query
            .as_deref()
            .and_then(|q| query_param(q, "haunt")),
        hash_param,
        hash_direct,
        haunt_from_path(&location.path),
        store.get(PRESERVED_HAUNT_KEY),
        store.get(CURRENT_HAUNT_KEY),
    ];

    for candidate in candidates.into_iter().flatten() {
        if is_valid_haunt_id(&candidate) {
            switch_haunt(store, &candidate);
            return Some(candidate);
        }
        tracing::warn!("Rejected haunt id candidate: {:?}", candidate);
    }

    None
}

/// Record `new_id` as the current haunt. On a tenant change, every store
/// key namespaced to the previous tenant is removed first so no data
/// leaks across haunts.
pub fn switch_haunt(store: &dyn KeyValueStore, new_id: &str) {
    if let Some(previous) = store.get(CURRENT_HAUNT_KEY) {
        if previous != new_id {
            clear_haunt_keys(store, &previous);
            tracing::info!("Switched haunt: {} -> {}", previous, new_id);
        }
    }
    store.set(CURRENT_HAUNT_KEY, new_id.to_string());
}

/// Remove every key namespaced to `haunt_id` (suffix `-<id>` convention,
/// e.g. `game-progress-mansion-of-dread`)
pub fn clear_haunt_keys(store: &dyn KeyValueStore, haunt_id: &str) {
    let suffix = format!("-{}", haunt_id);
    for key in store.keys() {
        if key.ends_with(&suffix) && key != CURRENT_HAUNT_KEY {
            store.remove(&key);
        }
    }
}
