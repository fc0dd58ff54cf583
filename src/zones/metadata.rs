//! Startup metadata describing every configured zone.

use zonewatch_types::{Delta, PathConfig, PathMeta, ZoneMeta, ZoneMetaEntry, ZoneState};

/// Describe the zones of one path.
pub fn zone_meta(path: &PathConfig) -> ZoneMeta {
    let mut meta = ZoneMeta {
        zones: path.zones.iter().map(ZoneMetaEntry::from).collect(),
        ..Default::default()
    };

    for state in ZoneState::ALL {
        *meta.method_for_mut(state) = path
            .zones
            .iter()
            .find(|zone| zone.state == state)
            .map(|zone| zone.method.clone());
    }

    meta
}

/// Build the metadata delta for all paths with zones.
///
/// Inactive paths are included: metadata describes configuration, not
/// which paths are being classified. Returns `None` when no path has zones.
pub fn metadata_delta(self_id: &str, paths: &[PathConfig]) -> Option<Delta> {
    let entries: Vec<PathMeta> = paths
        .iter()
        .filter(|path| !path.zones.is_empty())
        .map(|path| PathMeta {
            path: path.key.clone(),
            value: zone_meta(path),
        })
        .collect();

    if entries.is_empty() {
        None
    } else {
        Some(Delta::meta(self_id, entries))
    }
}
