// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Merge per-version manifests into one.
//!
//! | field                      | source                                    |
//! |----------------------------|-------------------------------------------|
//! | name, author, url          | first snapshot                            |
//! | packageId                  | last snapshot                             |
//! | supportedVersions          | every snapshot, in walk order             |
//! | description, dependencies  | shared if all equal, else one per version |

use tracing::debug;

use crate::manifest::{Consolidated, ConsolidatedManifest, Manifest};

/// Version a snapshot describes. Snapshots read during a merge are always
/// tagged; untagged ones fall back to their own supported versions.
fn version_key(manifest: &Manifest) -> String {
    manifest
        .game_version
        .clone()
        .or_else(|| manifest.supported_versions.last().cloned())
        .unwrap_or_default()
}

fn consolidate_field<T: Clone + PartialEq>(
    snapshots: &[Manifest],
    field: impl Fn(&Manifest) -> &Option<T>,
) -> Consolidated<T> {
    let Some(first) = snapshots.first().map(&field) else {
        return Consolidated::Shared(None);
    };
    if snapshots.iter().all(|m| field(m) == first) {
        return Consolidated::Shared(first.clone());
    }
    Consolidated::ByVersion(
        snapshots
            .iter()
            .map(|m| (version_key(m), field(m).clone()))
            .collect(),
    )
}

/// Merge `snapshots`, ordered oldest version first.
#[must_use]
pub fn consolidate(snapshots: &[Manifest]) -> ConsolidatedManifest {
    let (Some(first), Some(last)) = (snapshots.first(), snapshots.last()) else {
        return ConsolidatedManifest::default();
    };

    if snapshots.iter().any(|m| m.package_id != last.package_id) {
        debug!(
            package_id = %last.package_id,
            "packageId differs between versions, using the newest"
        );
    }

    let description = consolidate_field(snapshots, |m| &m.description);
    let default_description = match &description {
        Consolidated::ByVersion(entries) => entries
            .iter()
            .find(|(version, _)| version == "1.0")
            .and_then(|(_, text)| text.clone()),
        Consolidated::Shared(_) => None,
    };

    ConsolidatedManifest {
        name: first.name.clone(),
        author: first.author.clone(),
        package_id: last.package_id.clone(),
        url: first.url.clone(),
        supported_versions: snapshots.iter().map(version_key).collect(),
        description,
        default_description,
        mod_dependencies: consolidate_field(snapshots, |m| &m.mod_dependencies),
        incompatible_with: consolidate_field(snapshots, |m| &m.incompatible_with),
        load_before: consolidate_field(snapshots, |m| &m.load_before),
        load_after: consolidate_field(snapshots, |m| &m.load_after),
    }
}
