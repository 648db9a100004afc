// firmware/matcher.rs from fwpatch (c) 2026 fwpatch Contributors
//
// Implements firmware identification: the signature rules that tie raw image
// bytes to a profile, and the catalog lookup over all known profiles.

use sha1::{Digest, Sha1};
use crate::firmware::group::Maturity;
use crate::firmware::profile::FirmwareProfile;

/// Identification rule tying raw image bytes to one firmware profile. Purely
/// a lookup; matching has no side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signature {
    /// SHA-1 digest of the entire image. Firmware dumps are identified this
    /// way in the catalog since whole-file hashes are stable per release.
    Sha1([u8; 20]),
    /// A fixed byte pattern at a fixed offset within the image.
    Magic { offset: usize, bytes: Vec<u8> },
}

impl Signature {
    /// Parses a 40-character hex digest into a SHA-1 signature. Catalog
    /// digests are static data, so a malformed one aborts at startup.
    pub fn from_sha1_hex(digest: &str) -> Signature {
        let bytes: [u8; 20] = hex::decode(digest)
            .expect("catalog digest is not valid hex")
            .try_into()
            .expect("catalog digest is not 20 bytes");
        Signature::Sha1(bytes)
    }

    /// Checks whether this signature identifies the given image bytes.
    pub fn matches(&self, data: &[u8]) -> bool {
        match self {
            Signature::Sha1(digest) => {
                let mut hasher = Sha1::new();
                hasher.update(data);
                hasher.finalize().as_slice() == digest
            }
            Signature::Magic { offset, bytes } => match offset.checked_add(bytes.len()) {
                Some(end) => data.get(*offset..end) == Some(bytes.as_slice()),
                None => false,
            },
        }
    }
}

/// All known firmware profiles, built once at startup and read-only after.
#[derive(Debug)]
pub struct ProfileCatalog {
    profiles: Vec<FirmwareProfile>,
}

impl ProfileCatalog {
    pub fn new(profiles: Vec<FirmwareProfile>) -> ProfileCatalog {
        ProfileCatalog { profiles }
    }

    pub fn profiles(&self) -> &[FirmwareProfile] {
        &self.profiles
    }

    /// Identifies the firmware image and returns a copy of the matching
    /// profile, limited to patch groups at or below the given maturity
    /// ceiling. Profiles are tried in catalog order and the first signature
    /// match wins. `None` is the normal outcome for an unrecognized or
    /// corrupted image, not a fault.
    pub fn match_firmware(&self, data: &[u8], max_maturity: Maturity) -> Option<FirmwareProfile> {
        self.profiles
            .iter()
            .find(|profile| profile.signature().matches(data))
            .map(|profile| profile.filtered(max_maturity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::firmware::edit::ByteEdit;
    use crate::firmware::group::PatchGroup;

    fn magic(offset: usize, bytes: &[u8]) -> Signature {
        Signature::Magic { offset, bytes: bytes.to_vec() }
    }

    fn group(maturity: Maturity, name: &str) -> PatchGroup {
        let edits: Arc<[ByteEdit]> = vec![ByteEdit::new(100, &[0x00], &[0xff])].into();
        PatchGroup::new(maturity, name, "", edits, Vec::new())
    }

    fn test_catalog() -> ProfileCatalog {
        ProfileCatalog::new(vec![
            FirmwareProfile::new(
                "D5100",
                "1.01",
                magic(0, &[0xde, 0xad, 0xbe, 0xef]),
                vec![group(Maturity::Released, "Fix-A")],
            ),
            FirmwareProfile::new(
                "D7000",
                "1.04",
                magic(0, &[0xca, 0xfe, 0xf0, 0x0d]),
                vec![group(Maturity::Released, "Fix-B")],
            ),
        ])
    }

    #[test]
    fn test_sha1_signature_matches_digest() {
        let image = vec![0x42u8; 256];
        let mut hasher = Sha1::new();
        hasher.update(&image);
        let signature = Signature::Sha1(hasher.finalize().into());
        assert!(signature.matches(&image));
        assert!(!signature.matches(&vec![0x43u8; 256]));
    }

    #[test]
    fn test_magic_signature_bounds() {
        let signature = magic(4, &[0x01, 0x02]);
        assert!(signature.matches(&[0, 0, 0, 0, 0x01, 0x02]));
        assert!(!signature.matches(&[0, 0, 0, 0, 0x01]));
        assert!(!signature.matches(&[]));
    }

    #[test]
    fn test_match_returns_only_the_matching_profile() {
        let catalog = test_catalog();
        let mut image = vec![0u8; 1024];
        image[..4].copy_from_slice(&[0xde, 0xad, 0xbe, 0xef]);
        let profile = catalog.match_firmware(&image, Maturity::Released).unwrap();
        assert_eq!(profile.model(), "D5100");
        let names: Vec<&str> = profile.groups().iter().map(|g| g.name()).collect();
        assert_eq!(names, vec!["Fix-A"]);
    }

    #[test]
    fn test_unrecognized_image_is_not_found() {
        let catalog = test_catalog();
        assert!(catalog.match_firmware(&vec![0u8; 1024], Maturity::Released).is_none());
    }

    #[test]
    fn test_maturity_ceiling_is_inclusive() {
        let catalog = ProfileCatalog::new(vec![FirmwareProfile::new(
            "D5100",
            "1.01",
            magic(0, &[0xde, 0xad, 0xbe, 0xef]),
            vec![
                group(Maturity::DevOnly, "Dev"),
                group(Maturity::Beta, "Beta"),
                group(Maturity::Released, "Released"),
            ],
        )]);
        let mut image = vec![0u8; 1024];
        image[..4].copy_from_slice(&[0xde, 0xad, 0xbe, 0xef]);
        let profile = catalog.match_firmware(&image, Maturity::Beta).unwrap();
        let names: Vec<&str> = profile.groups().iter().map(|g| g.name()).collect();
        assert_eq!(names, vec!["Dev", "Beta"]);
    }

    // End-to-end: magic match, verify, drift detection, and a patched byte.
    #[test]
    fn test_identify_verify_and_patch() {
        let catalog = test_catalog();
        let mut image = vec![0u8; 1024];
        image[..4].copy_from_slice(&[0xde, 0xad, 0xbe, 0xef]);

        let mut profile = catalog.match_firmware(&image, Maturity::Released).unwrap();
        assert!(profile.verify(&image).is_empty());

        profile.set_enabled("Fix-A", true).unwrap();
        let patched = profile.apply(&image).unwrap();
        let mut expected = image.clone();
        expected[100] = 0xff;
        assert_eq!(patched, expected);

        // Simulated sub-revision drift at the recorded offset.
        let mut drifted = image.clone();
        drifted[100] = 0x01;
        let mismatches = profile.verify(&drifted);
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].group, "Fix-A");
    }
}
