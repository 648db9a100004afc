// firmware/group.rs from fwpatch (c) 2026 fwpatch Contributors
//
// Implements patch groups, the named user-toggleable bundles of byte edits,
// and the maturity scale used to filter which groups are offered.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use crate::firmware::edit::ByteEdit;

#[derive(Debug, Error)]
pub enum GroupError {
    #[error("unknown maturity level `{0}`, expected devonly, alpha, beta, or released")]
    UnknownMaturity(String),
}

/// Development-readiness ranking of a patch group. The declaration order gives
/// the ordering used for filtering: DevOnly < Alpha < Beta < Released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Maturity {
    DevOnly,
    Alpha,
    Beta,
    Released,
}

impl fmt::Display for Maturity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Maturity::DevOnly => write!(f, "DevOnly"),
            Maturity::Alpha => write!(f, "Alpha"),
            Maturity::Beta => write!(f, "Beta"),
            Maturity::Released => write!(f, "Released"),
        }
    }
}

impl FromStr for Maturity {
    type Err = GroupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "devonly" => Ok(Maturity::DevOnly),
            "alpha" => Ok(Maturity::Alpha),
            "beta" => Ok(Maturity::Beta),
            "released" => Ok(Maturity::Released),
            _ => Err(GroupError::UnknownMaturity(s.to_string())),
        }
    }
}

/// A named collection of byte edits that is enabled or disabled as a unit.
///
/// Incompatibility with other groups is declared by the identity of the other
/// group's edit set rather than by name, so the edits are held behind an `Arc`
/// and conflicts are compared with pointer identity. Cloning a group (as the
/// matcher does when it returns a filtered profile) preserves that identity.
#[derive(Debug, Clone)]
pub struct PatchGroup {
    name: String,
    description: String,
    maturity: Maturity,
    edits: Arc<[ByteEdit]>,
    conflicts: Vec<Arc<[ByteEdit]>>,
    enabled: bool,
}

impl PatchGroup {
    /// Creates a new PatchGroup. Groups start out disabled; the enabled flag
    /// is only ever toggled through the owning profile so that the conflict
    /// rule and change notifications apply.
    pub fn new(
        maturity: Maturity,
        name: &str,
        description: &str,
        edits: Arc<[ByteEdit]>,
        conflicts: Vec<Arc<[ByteEdit]>>,
    ) -> PatchGroup {
        PatchGroup {
            name: name.to_string(),
            description: description.to_string(),
            maturity,
            edits,
            conflicts,
            enabled: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn maturity(&self) -> Maturity {
        self.maturity
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn edits(&self) -> &[ByteEdit] {
        &self.edits
    }

    /// A handle to this group's edit set, suitable for listing in another
    /// group's conflict declarations.
    pub fn edit_set(&self) -> Arc<[ByteEdit]> {
        Arc::clone(&self.edits)
    }

    /// True if the other group's edit set appears in this group's conflict
    /// declarations.
    pub fn conflicts_with(&self, other: &PatchGroup) -> bool {
        self.conflicts.iter().any(|set| Arc::ptr_eq(set, &other.edits))
    }

    pub(crate) fn set_enabled_flag(&mut self, value: bool) {
        self.enabled = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maturity_ordering() {
        assert!(Maturity::DevOnly < Maturity::Alpha);
        assert!(Maturity::Alpha < Maturity::Beta);
        assert!(Maturity::Beta < Maturity::Released);
    }

    #[test]
    fn test_maturity_from_str() {
        assert_eq!(Maturity::from_str("beta").unwrap(), Maturity::Beta);
        assert_eq!(Maturity::from_str("Released").unwrap(), Maturity::Released);
        assert!(Maturity::from_str("stable").is_err());
    }

    #[test]
    fn test_conflict_is_by_edit_set_identity() {
        let set_a: Arc<[ByteEdit]> = vec![ByteEdit::new(0, &[0x00], &[0x01])].into();
        let set_b: Arc<[ByteEdit]> = vec![ByteEdit::new(0, &[0x00], &[0x01])].into();
        let a = PatchGroup::new(Maturity::Beta, "A", "", Arc::clone(&set_a), vec![Arc::clone(&set_b)]);
        let b = PatchGroup::new(Maturity::Beta, "B", "", Arc::clone(&set_b), vec![set_a]);
        // The two edit sets hold equal bytes, but only pointer identity counts.
        let unrelated = PatchGroup::new(
            Maturity::Beta,
            "C",
            "",
            vec![ByteEdit::new(0, &[0x00], &[0x01])].into(),
            Vec::new(),
        );
        assert!(a.conflicts_with(&b));
        assert!(b.conflicts_with(&a));
        assert!(!a.conflicts_with(&unrelated));
        assert!(!unrelated.conflicts_with(&a));
        // Identity survives cloning, as happens when a profile is filtered.
        assert!(a.clone().conflicts_with(&b.clone()));
    }
}
