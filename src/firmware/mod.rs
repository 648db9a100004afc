// firmware/mod.rs from fwpatch (c) 2026 fwpatch Contributors
//
// Root for all firmware-related modules, re-exporting the types that make up
// the identification-and-patching pipeline.

pub mod database;
pub mod edit;
pub mod group;
pub mod matcher;
pub mod profile;

pub use edit::ByteEdit;
pub use group::{Maturity, PatchGroup};
pub use matcher::{ProfileCatalog, Signature};
pub use profile::{FirmwareProfile, Mismatch, Overlap, ProfileError};
