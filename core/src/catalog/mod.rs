//! Zone catalog and relevance ranking
//!
//! The catalog is built wholesale from a [`ZoneSource`] and re-sorted every
//! time the player's context changes. Ranking never mutates zones in place;
//! [`rank_zones`] is a pure function and [`ZoneCatalog::rerank`] just swaps
//! in its output.

mod source;

pub use source::{TomlZoneSource, ZoneSource, builtin_zones};

use zonenotes_types::Zone;

/// Order zones by relevance to the current context.
///
/// 1. The zone matching `current_zone_id`
/// 2. Zones for which `is_enabled` returns true
/// 3. Ascending id
///
/// The sort is stable, so duplicate ids keep their input order.
pub fn rank_zones<I, F>(zones: I, is_enabled: F, current_zone_id: u32) -> Vec<Zone>
where
    I: IntoIterator<Item = Zone>,
    F: Fn(&Zone) -> bool,
{
    let mut ranked: Vec<Zone> = zones.into_iter().collect();
    ranked.sort_by_cached_key(|zone| (zone.id != current_zone_id, !is_enabled(zone), zone.id));
    ranked
}

/// Ranked list of known zones.
#[derive(Debug, Clone, Default)]
pub struct ZoneCatalog {
    zones: Vec<Zone>,
}

impl ZoneCatalog {
    /// Build a catalog, skipping zones without a display name.
    pub fn new(zones: impl IntoIterator<Item = Zone>) -> Self {
        let zones: Vec<Zone> = zones.into_iter().filter(|z| !z.name.is_empty()).collect();
        tracing::debug!(count = zones.len(), "Zone catalog built");
        Self { zones }
    }

    pub fn from_source(source: &dyn ZoneSource) -> Result<Self, crate::context::ConfigError> {
        Ok(Self::new(source.list_zones()?))
    }

    /// Replace the current order with a fresh ranking.
    pub fn rerank<F>(&mut self, is_enabled: F, current_zone_id: u32)
    where
        F: Fn(&Zone) -> bool,
    {
        let zones = std::mem::take(&mut self.zones);
        self.zones = rank_zones(zones, is_enabled, current_zone_id);
    }

    pub fn find(&self, id: u32) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id == id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.find(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter()
    }

    /// Zones whose `"{id} - {name}"` label contains `query`, ignoring case.
    pub fn filter<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a Zone> + use<'a> {
        let needle = query.to_lowercase();
        self.zones
            .iter()
            .filter(move |z| needle.is_empty() || z.to_string().to_lowercase().contains(&needle))
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn zones(ids: &[u32]) -> Vec<Zone> {
        ids.iter().map(|&id| Zone::new(id, format!("Zone {}", id))).collect()
    }

    fn ids(zones: &[Zone]) -> Vec<u32> {
        zones.iter().map(|z| z.id).collect()
    }

    #[test]
    fn test_rank_current_then_enabled_then_id() {
        let enabled: HashSet<u32> = [40, 7].into_iter().collect();
        let ranked = rank_zones(zones(&[50, 7, 3, 40, 12]), |z| enabled.contains(&z.id), 12);
        assert_eq!(ids(&ranked), vec![12, 7, 40, 3, 50]);
    }

    #[test]
    fn test_rank_current_zone_beats_enabled() {
        let ranked = rank_zones(zones(&[1, 2, 3]), |z| z.id == 1, 3);
        assert_eq!(ids(&ranked), vec![3, 1, 2]);
    }

    #[test]
    fn test_rank_empty() {
        let ranked = rank_zones(Vec::new(), |_| true, 1);
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_rank_is_deterministic_for_any_input_order() {
        let enabled = |z: &Zone| z.id % 3 == 0;
        let forward = rank_zones(zones(&[9, 4, 6, 1, 12, 5]), enabled, 4);
        let reversed = rank_zones(zones(&[5, 12, 1, 6, 4, 9]), enabled, 4);
        assert_eq!(forward, reversed);
        assert_eq!(ids(&forward), vec![4, 6, 9, 12, 1, 5]);
    }

    #[test]
    fn test_rank_stable_for_duplicate_ids() {
        let input = vec![
            Zone::new(8, "first"),
            Zone::new(2, "other"),
            Zone::new(8, "second"),
        ];
        let ranked = rank_zones(input, |_| false, 0);
        let names: Vec<&str> = ranked.iter().map(|z| z.name.as_str()).collect();
        assert_eq!(names, vec!["other", "first", "second"]);
    }

    #[test]
    fn test_catalog_skips_unnamed_zones() {
        let catalog = ZoneCatalog::new(vec![Zone::new(1, ""), Zone::new(2, "Named")]);
        assert_eq!(catalog.len(), 1);
        assert!(!catalog.contains(1));
        assert_eq!(catalog.find(2).map(|z| z.name.as_str()), Some("Named"));
    }

    #[test]
    fn test_catalog_rerank_and_filter() {
        let mut catalog = ZoneCatalog::new(vec![
            Zone::new(30, "Eden's Promise"),
            Zone::new(10, "Limsa Lominsa"),
            Zone::new(20, "Eden's Verse"),
        ]);
        catalog.rerank(|z| z.id == 30, 0);
        assert_eq!(catalog.iter().map(|z| z.id).collect::<Vec<_>>(), vec![30, 10, 20]);

        let hits: Vec<u32> = catalog.filter("eden").map(|z| z.id).collect();
        assert_eq!(hits, vec![30, 20]);

        let by_id: Vec<u32> = catalog.filter("10 -").map(|z| z.id).collect();
        assert_eq!(by_id, vec![10]);

        assert_eq!(catalog.filter("").count(), 3);
    }
}
