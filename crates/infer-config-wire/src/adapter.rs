//! Version gating of update fields
//!
//! [`FIELD_GATES`] is the single table of fields that older peers do not
//! understand. Both [`downgrade`] and the stream codec consult it; no other
//! code compares versions per field.

use crate::version::TransportVersion;
use infer_config::{ConfigUpdate, UpdateField};

/// Fields introduced after the oldest supported version, with the version
/// that introduced them
pub const FIELD_GATES: &[(UpdateField, TransportVersion)] =
    &[(UpdateField::Tokenization, TransportVersion::V_8_1_0)];

/// Version that introduced a field, if it is gated
#[must_use]
pub fn min_version(field: UpdateField) -> Option<TransportVersion> {
    FIELD_GATES
        .iter()
        .find(|(gated, _)| *gated == field)
        .map(|(_, version)| *version)
}

/// Whether a peer at `version` understands `field`
#[inline]
#[must_use]
pub fn supports(version: TransportVersion, field: UpdateField) -> bool {
    min_version(field).map_or(true, |min| version.on_or_after(min))
}

/// Project an update onto what a peer at `target` can observe
///
/// Fields gated above `target` are forced unset; everything else passes
/// through. Lossy and one-directional: only used when writing for a peer,
/// never on the canonical in-memory update.
#[must_use]
pub fn downgrade(update: ConfigUpdate, target: TransportVersion) -> ConfigUpdate {
    FIELD_GATES
        .iter()
        .filter(|(_, min)| target.before(*min))
        .fold(update, |update, (field, min)| {
            if update.is_set(*field) {
                tracing::debug!(%field, %min, %target, "dropping field unsupported by peer");
            }
            update.without(*field)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use infer_config::{TokenizationUpdate, Truncate};
    use pretty_assertions::assert_eq;

    fn full_update() -> ConfigUpdate {
        ConfigUpdate::builder()
            .labels(["foo"])
            .multi_label(true)
            .results_field("out")
            .tokenization_update(TokenizationUpdate::Bert {
                truncate: Truncate::Second,
            })
            .build()
    }

    #[test]
    fn tokenization_gated_at_8_1_0() {
        assert_eq!(
            min_version(UpdateField::Tokenization),
            Some(TransportVersion::V_8_1_0)
        );
        assert_eq!(min_version(UpdateField::Labels), None);
        assert!(!supports(TransportVersion::V_8_0_0, UpdateField::Tokenization));
        assert!(supports(TransportVersion::V_8_1_0, UpdateField::Tokenization));
        assert!(supports(TransportVersion::V_7_17_0, UpdateField::Labels));
    }

    #[test]
    fn downgrade_below_threshold_drops_tokenization() {
        let downgraded = downgrade(full_update(), TransportVersion::V_8_0_0);

        assert_eq!(downgraded.tokenization_update(), None);
        assert_eq!(downgraded, full_update().without(UpdateField::Tokenization));
    }

    #[test]
    fn downgrade_at_threshold_is_identity() {
        assert_eq!(downgrade(full_update(), TransportVersion::V_8_1_0), full_update());
        assert_eq!(downgrade(full_update(), TransportVersion::CURRENT), full_update());
    }

    #[test]
    fn downgrade_of_noop_stays_noop() {
        assert!(downgrade(ConfigUpdate::default(), TransportVersion::V_7_17_0).is_noop());
    }
}
