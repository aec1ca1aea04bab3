//! Entity catalog derived from the live sensor snapshot
//!
//! The catalog is a pure function of `(snapshot, prefixes)`. It is rebuilt on
//! every call because the host refreshes the snapshot on its own cadence and
//! a stale list is never acceptable.

use crate::types::{EntityDescriptor, SensorSnapshot};

/// Domains every picker in the panel offers
pub const DEFAULT_DOMAINS: [&str; 2] = ["sensor", "input_number"];

/// Builds the selectable entity list for pickers
pub struct EntityCatalog;

impl EntityCatalog {
    /// List all entities whose domain is in `allowed_prefixes`, sorted by id
    pub fn list(snapshot: &SensorSnapshot, allowed_prefixes: &[&str]) -> Vec<EntityDescriptor> {
        let mut entries: Vec<EntityDescriptor> = snapshot
            .iter()
            .filter(|(id, _)| {
                domain_of(id).is_some_and(|domain| allowed_prefixes.contains(&domain))
            })
            .map(|(id, state)| {
                let display_name = match state.friendly_name.as_deref() {
                    Some(name) if !name.is_empty() => format!("{} ({})", name, id),
                    _ => id.clone(),
                };
                EntityDescriptor {
                    id: id.clone(),
                    display_name,
                }
            })
            .collect();

        entries.sort_by(|a, b| a.id.cmp(&b.id));
        entries
    }

    /// Look up a single entity's descriptor in an already built list
    pub fn find<'a>(entries: &'a [EntityDescriptor], id: &str) -> Option<&'a EntityDescriptor> {
        entries.iter().find(|e| e.id == id)
    }
}

/// Domain part of an entity id (text before the first `.`)
pub fn domain_of(entity_id: &str) -> Option<&str> {
    entity_id.split_once('.').map(|(domain, _)| domain)
}
