// firmware/database.rs from fwpatch (c) 2026 fwpatch Contributors
//
// The built-in table of known firmware profiles and their patch sets. The rest
// of the crate is agnostic to how this table is populated; it only sees the
// ProfileCatalog built here once at startup.

use std::sync::Arc;
use crate::firmware::edit::ByteEdit;
use crate::firmware::group::{Maturity, PatchGroup};
use crate::firmware::matcher::{ProfileCatalog, Signature};
use crate::firmware::profile::FirmwareProfile;

// Whole-file SHA-1 digests of the supported firmware dumps.
const D5100_0101_SHA1: &str = "2c4b5a17894a81d1d1a4912b1f9235d241da4e4a";
const D7000_0104_SHA1: &str = "4a8127a005e2f1b1566c7a1a0ba4dd6f08061cb9";
const D3100_0101_SHA1: &str = "93f2356163fd6571e93ee243a6a0317c30e341a1";

fn edit(offset: usize, original: &[u8], replacement: &[u8]) -> ByteEdit {
    ByteEdit::new(offset, original, replacement)
}

fn d5100_0101() -> FirmwareProfile {
    // The two NEF compression modes rewrite the same decision table, so they
    // are declared mutually incompatible by edit-set identity.
    let nef_off: Arc<[ByteEdit]> = vec![
        edit(0x0037_0a24, &[0x00, 0x01], &[0x00, 0x00]),
        edit(0x0037_0a30, &[0x9a, 0x7b], &[0x00, 0x00]),
    ]
    .into();
    let nef_lossless: Arc<[ByteEdit]> = vec![
        edit(0x0037_0a24, &[0x00, 0x01], &[0x00, 0x02]),
    ]
    .into();
    let video_limit: Arc<[ByteEdit]> = vec![
        edit(0x0021_66b8, &[0x29, 0x81], &[0x7f, 0xff]),
        edit(0x0021_66c4, &[0x0e, 0x10], &[0x7f, 0xff]),
    ]
    .into();
    let liveview_iso: Arc<[ByteEdit]> = vec![
        edit(0x0041_2290, &[0xd0, 0x06], &[0xe0, 0x06]),
    ]
    .into();

    let groups = vec![
        PatchGroup::new(
            Maturity::Released,
            "Remove Time Based Video Restrictions",
            "Removes the 20/30 minute video clip length limits",
            video_limit,
            Vec::new(),
        ),
        PatchGroup::new(
            Maturity::Released,
            "NEF Compression Off",
            "Stores NEF (raw) files uncompressed",
            Arc::clone(&nef_off),
            vec![Arc::clone(&nef_lossless)],
        ),
        PatchGroup::new(
            Maturity::Released,
            "NEF Compression Lossless",
            "Stores NEF (raw) files with lossless compression",
            nef_lossless,
            vec![nef_off],
        ),
        PatchGroup::new(
            Maturity::Beta,
            "Liveview Manual Control ISO/Shutter",
            "Allows manual exposure control while in liveview",
            liveview_iso,
            Vec::new(),
        ),
    ];
    FirmwareProfile::new("D5100", "1.01", Signature::from_sha1_hex(D5100_0101_SHA1), groups)
}

fn d7000_0104() -> FirmwareProfile {
    let video_limit: Arc<[ByteEdit]> = vec![
        edit(0x0028_444c, &[0x29, 0x81], &[0x7f, 0xff]),
    ]
    .into();
    let jpeg_compression: Arc<[ByteEdit]> = vec![
        edit(0x003a_1188, &[0x6a, 0x00], &[0x6a, 0x01]),
    ]
    .into();

    let groups = vec![
        PatchGroup::new(
            Maturity::Released,
            "Remove Time Based Video Restrictions",
            "Removes the 20/30 minute video clip length limits",
            video_limit,
            Vec::new(),
        ),
        PatchGroup::new(
            Maturity::Alpha,
            "Jpeg Compression - Quality",
            "Sets jpeg compression to optimal quality rather than size",
            jpeg_compression,
            Vec::new(),
        ),
    ];
    FirmwareProfile::new("D7000", "1.04", Signature::from_sha1_hex(D7000_0104_SHA1), groups)
}

fn d3100_0101() -> FirmwareProfile {
    // Known dump, no patches ported to this version yet.
    FirmwareProfile::new("D3100", "1.01", Signature::from_sha1_hex(D3100_0101_SHA1), Vec::new())
}

/// Builds the catalog of all built-in firmware profiles, in the order they
/// are tried during matching.
pub fn builtin_catalog() -> ProfileCatalog {
    ProfileCatalog::new(vec![d5100_0101(), d7000_0104(), d3100_0101()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_builds() {
        let catalog = builtin_catalog();
        assert_eq!(catalog.profiles().len(), 3);
    }

    #[test]
    fn test_nef_compression_groups_conflict_mutually() {
        let catalog = builtin_catalog();
        let d5100 = &catalog.profiles()[0];
        let off = &d5100.groups()[1];
        let lossless = &d5100.groups()[2];
        assert!(off.conflicts_with(lossless));
        assert!(lossless.conflicts_with(off));
        assert!(!off.conflicts_with(&d5100.groups()[0]));
    }

    #[test]
    fn test_all_groups_start_disabled() {
        let catalog = builtin_catalog();
        for profile in catalog.profiles() {
            for group in profile.groups() {
                assert!(!group.enabled());
            }
        }
    }
}
