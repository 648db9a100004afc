// firmware/profile.rs from fwpatch (c) 2026 fwpatch Contributors
//
// Implements the firmware profile: one identified model + firmware version,
// the patch groups known for it, and the verify/apply routines.

use std::fmt;
use thiserror::Error;
use crate::firmware::group::{Maturity, PatchGroup};
use crate::firmware::matcher::Signature;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("no patch group named `{0}` exists for this firmware")]
    UnknownGroup(String),
    #[error("edit {index} of patch group `{group}` writes outside the image (offset {offset:#x}, {len} bytes, image is {image_len} bytes)")]
    EditOutOfRange {
        group: String,
        index: usize,
        offset: usize,
        len: usize,
        image_len: usize,
    },
}

/// A recorded edit whose original bytes no longer match the actual image: the
/// signature matched but the catalog entry is stale for this sub-revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub group: String,
    pub edit: usize,
    pub offset: usize,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (edit {} at offset {:#x})", self.group, self.edit, self.offset)
    }
}

/// Two enabled groups whose edits touch the same byte range. The conflict rule
/// should make this impossible; seeing one means the catalog entry is defective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlap {
    pub first: String,
    pub second: String,
    pub offset: usize,
}

impl fmt::Display for Overlap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "`{}` and `{}` both write offset {:#x}", self.first, self.second, self.offset)
    }
}

/// Callback invoked synchronously whenever a group's enabled flag changes,
/// with the group's name and its new state.
pub type EnabledObserver = Box<dyn FnMut(&str, bool)>;

/// A specific device model + firmware version and the patches known for it.
///
/// Profiles are built once when the catalog is constructed and are immutable
/// apart from each group's enabled flag, which the consumer toggles through
/// [`FirmwareProfile::set_enabled`] during a single run.
pub struct FirmwareProfile {
    model: String,
    version: String,
    signature: Signature,
    groups: Vec<PatchGroup>,
    observers: Vec<EnabledObserver>,
}

impl fmt::Debug for FirmwareProfile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("FirmwareProfile")
            .field("model", &self.model)
            .field("version", &self.version)
            .field("signature", &self.signature)
            .field("groups", &self.groups)
            .finish()
    }
}

impl FirmwareProfile {
    pub fn new(model: &str, version: &str, signature: Signature, groups: Vec<PatchGroup>) -> FirmwareProfile {
        FirmwareProfile {
            model: model.to_string(),
            version: version.to_string(),
            signature,
            groups,
            observers: Vec::new(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn groups(&self) -> &[PatchGroup] {
        &self.groups
    }

    /// A copy of this profile limited to the groups at or below the given
    /// maturity ceiling, relative order preserved. All groups in the copy are
    /// disabled and no observers are carried over.
    pub(crate) fn filtered(&self, max_maturity: Maturity) -> FirmwareProfile {
        let groups = self
            .groups
            .iter()
            .filter(|group| group.maturity() <= max_maturity)
            .cloned()
            .collect();
        FirmwareProfile::new(&self.model, &self.version, self.signature.clone(), groups)
    }

    /// Registers an observer for enabled-flag changes. Observers are invoked
    /// synchronously, before the `set_enabled` call that caused the change
    /// returns.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&str, bool) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Checks every recorded edit of every group, enabled or not, against the
    /// actual image bytes and returns the edits whose original bytes no longer
    /// match. A non-empty result means the catalog entry is stale for this
    /// exact image and `apply` must not be run.
    pub fn verify(&self, image: &[u8]) -> Vec<Mismatch> {
        let mut mismatches = Vec::new();
        for group in &self.groups {
            for (index, edit) in group.edits().iter().enumerate() {
                if !edit.matches(image) {
                    mismatches.push(Mismatch {
                        group: group.name().to_string(),
                        edit: index,
                        offset: edit.offset(),
                    });
                }
            }
        }
        mismatches
    }

    /// Toggles the named group's enabled flag. Enabling a group automatically
    /// disables every currently-enabled group whose edit set appears in this
    /// group's conflict declarations, so no two mutually incompatible groups
    /// are ever enabled at once. Every flag that actually changes is reported
    /// to the registered observers; setting a flag to its current value does
    /// nothing. Forced disables never re-enter the enabling logic, so this
    /// cannot recurse.
    pub fn set_enabled(&mut self, name: &str, value: bool) -> Result<(), ProfileError> {
        let index = self
            .groups
            .iter()
            .position(|group| group.name() == name)
            .ok_or_else(|| ProfileError::UnknownGroup(name.to_string()))?;

        let mut changes: Vec<(String, bool)> = Vec::new();
        if value {
            let enabling = self.groups[index].clone();
            for (other_index, other) in self.groups.iter_mut().enumerate() {
                if other_index != index && other.enabled() && enabling.conflicts_with(other) {
                    other.set_enabled_flag(false);
                    changes.push((other.name().to_string(), false));
                }
            }
        }
        let group = &mut self.groups[index];
        if group.enabled() != value {
            group.set_enabled_flag(value);
            changes.push((group.name().to_string(), value));
        }

        for (changed_name, enabled) in &changes {
            for observer in &mut self.observers {
                observer(changed_name, *enabled);
            }
        }
        Ok(())
    }

    /// Reports byte ranges written by more than one enabled group. The
    /// conflict rule prevents this for declared-incompatible groups, so any
    /// result indicates a cataloging defect; callers should surface it as a
    /// diagnostic but may still apply.
    pub fn overlapping_edits(&self) -> Vec<Overlap> {
        let mut overlaps = Vec::new();
        let enabled: Vec<&PatchGroup> = self.groups.iter().filter(|g| g.enabled()).collect();
        for (i, first) in enabled.iter().enumerate() {
            for second in &enabled[i + 1..] {
                for a in first.edits() {
                    for b in second.edits() {
                        let start = a.offset().max(b.offset());
                        let end = match (a.end(), b.end()) {
                            (Some(a_end), Some(b_end)) => a_end.min(b_end),
                            _ => continue,
                        };
                        if start < end {
                            overlaps.push(Overlap {
                                first: first.name().to_string(),
                                second: second.name().to_string(),
                                offset: start,
                            });
                        }
                    }
                }
            }
        }
        overlaps
    }

    /// Produces a patched copy of the image: for every enabled group, in
    /// catalog order, each edit's replacement bytes are written at its offset.
    /// The caller is expected to have run [`FirmwareProfile::verify`] first;
    /// this is a pure transform and does not re-check original bytes. An edit
    /// extending past the end of the image means the catalog itself is corrupt
    /// and is a hard error.
    pub fn apply(&self, image: &[u8]) -> Result<Vec<u8>, ProfileError> {
        let mut patched = image.to_vec();
        for group in self.groups.iter().filter(|g| g.enabled()) {
            for (index, edit) in group.edits().iter().enumerate() {
                let end = edit.end().filter(|end| *end <= patched.len()).ok_or_else(|| {
                    ProfileError::EditOutOfRange {
                        group: group.name().to_string(),
                        index,
                        offset: edit.offset(),
                        len: edit.len(),
                        image_len: patched.len(),
                    }
                })?;
                patched[edit.offset()..end].copy_from_slice(edit.replacement());
            }
        }
        Ok(patched)
    }
}
