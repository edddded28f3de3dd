//! Pass entity: the rule holder for exhibition access.
//!
//! A pass is either fixed-access (an explicit set of exhibitions chosen at
//! creation) or all-access (filled with every known exhibition when it is
//! purchased). Both kinds can be extended afterwards through an upgrade, and
//! both answer access checks the same way.

use crate::types::{ExhibitionId, Money, PassId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// The kind of pass, carrying its access set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassKind {
    /// Access to an explicit set of exhibitions
    FixedAccess {
        /// Exhibitions this pass grants
        exhibitions: BTreeSet<ExhibitionId>,
    },
    /// Access to every exhibition known when the pass was last purchased
    AllAccess {
        /// Snapshot of exhibitions taken at purchase time
        exhibitions: BTreeSet<ExhibitionId>,
    },
}

/// A pass on sale in the registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pass {
    /// Pass identifier
    pub id: PassId,
    /// Price of the pass
    pub price: Money,
    /// Perks printed on the pass ("Priority seating", ...)
    pub features: Vec<String>,
    /// Kind and access set
    pub kind: PassKind,
}

impl Pass {
    /// Creates a fixed-access pass for the given exhibitions
    #[must_use]
    pub fn fixed_access(
        id: PassId,
        price: Money,
        exhibitions: impl IntoIterator<Item = ExhibitionId>,
    ) -> Self {
        Self {
            id,
            price,
            features: Vec::new(),
            kind: PassKind::FixedAccess {
                exhibitions: exhibitions.into_iter().collect(),
            },
        }
    }

    /// Creates an all-access pass with an empty access set
    #[must_use]
    pub const fn all_access(id: PassId, price: Money) -> Self {
        Self {
            id,
            price,
            features: Vec::new(),
            kind: PassKind::AllAccess {
                exhibitions: BTreeSet::new(),
            },
        }
    }

    /// Attaches a list of features
    #[must_use]
    pub fn with_features(mut self, features: Vec<String>) -> Self {
        self.features = features;
        self
    }

    /// Whether this is an all-access pass
    #[must_use]
    pub const fn is_all_access(&self) -> bool {
        matches!(self.kind, PassKind::AllAccess { .. })
    }

    /// Exhibitions this pass currently grants
    #[must_use]
    pub const fn exhibitions(&self) -> &BTreeSet<ExhibitionId> {
        match &self.kind {
            PassKind::FixedAccess { exhibitions } | PassKind::AllAccess { exhibitions } => {
                exhibitions
            }
        }
    }

    fn exhibitions_mut(&mut self) -> &mut BTreeSet<ExhibitionId> {
        match &mut self.kind {
            PassKind::FixedAccess { exhibitions } | PassKind::AllAccess { exhibitions } => {
                exhibitions
            }
        }
    }

    /// Whether the pass grants access to `exhibition_id`
    #[must_use]
    pub fn allows_exhibition(&self, exhibition_id: ExhibitionId) -> bool {
        self.exhibitions().contains(&exhibition_id)
    }

    /// Grants access to `exhibition_id`; no-op if already granted.
    pub fn add_exhibition(&mut self, exhibition_id: ExhibitionId) {
        self.exhibitions_mut().insert(exhibition_id);
    }

    /// Replaces the access set of an all-access pass.
    ///
    /// Fixed-access passes are left untouched.
    pub fn grant_all(&mut self, exhibitions: impl IntoIterator<Item = ExhibitionId>) {
        if let PassKind::AllAccess { exhibitions: granted } = &mut self.kind {
            *granted = exhibitions.into_iter().collect();
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_all_access() { "AllAccess" } else { "FixedAccess" };
        let access: Vec<String> = self.exhibitions().iter().map(ToString::to_string).collect();
        write!(
            f,
            "{kind}Pass({}) price={} access=[{}]",
            self.id,
            self.price,
            access.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ex(id: u32) -> ExhibitionId {
        ExhibitionId::new(id)
    }

    #[test]
    fn fixed_access_checks_membership() {
        let pass = Pass::fixed_access(PassId::new(1), Money::from_dollars(30), [ex(1)]);

        assert!(pass.allows_exhibition(ex(1)));
        assert!(!pass.allows_exhibition(ex(2)));
        assert!(!pass.is_all_access());
    }

    #[test]
    fn add_exhibition_is_idempotent() {
        let mut pass = Pass::fixed_access(PassId::new(1), Money::from_dollars(30), [ex(1)]);

        pass.add_exhibition(ex(2));
        pass.add_exhibition(ex(2));
        pass.add_exhibition(ex(1));

        assert_eq!(pass.exhibitions().len(), 2);
        assert!(pass.allows_exhibition(ex(2)));
    }

    #[test]
    fn all_access_starts_empty() {
        let pass = Pass::all_access(PassId::new(99), Money::from_dollars(100));

        assert!(pass.is_all_access());
        assert!(pass.exhibitions().is_empty());
        assert!(!pass.allows_exhibition(ex(1)));
    }

    #[test]
    fn grant_all_only_touches_all_access() {
        let mut all = Pass::all_access(PassId::new(99), Money::from_dollars(100));
        let mut fixed = Pass::fixed_access(PassId::new(1), Money::from_dollars(30), [ex(1)]);

        all.grant_all([ex(1), ex(2), ex(3)]);
        fixed.grant_all([ex(2), ex(3)]);

        assert_eq!(all.exhibitions().len(), 3);
        assert_eq!(fixed.exhibitions().iter().copied().collect::<Vec<_>>(), vec![ex(1)]);
    }

    #[test]
    fn features_are_attached_at_construction() {
        let plain = Pass::all_access(PassId::new(99), Money::from_dollars(100));
        let perks = plain.clone().with_features(vec!["Priority seating".to_string()]);

        assert!(plain.features.is_empty());
        assert_eq!(perks.features, vec!["Priority seating".to_string()]);
        assert_eq!(perks.kind, plain.kind);
    }

    #[test]
    fn display_lists_access() {
        let pass = Pass::fixed_access(PassId::new(2), Money::from_dollars(45), [ex(2), ex(1)]);
        assert_eq!(pass.to_string(), "FixedAccessPass(2) price=$45.00 access=[1, 2]");
    }
}
