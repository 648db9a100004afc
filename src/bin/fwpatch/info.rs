// info.rs from fwpatch (c) 2026 fwpatch Contributors
//
// Code for the info and verify commands in the fwpatch CLI.

use anyhow::{bail, Result};
use fwpatch::firmware::database;
use crate::shared::{parse_level, read_firmware};

pub fn info(input: &str, max_level: &str) -> Result<()> {
    let data = read_firmware(input)?;
    let level = parse_level(max_level)?;
    let catalog = database::builtin_catalog();
    match catalog.match_firmware(&data, level) {
        Some(profile) => {
            println!("{}_{}", profile.model(), profile.version());
            if profile.groups().is_empty() {
                println!("No patches presently exist for this model/firmware version.");
            } else {
                for group in profile.groups() {
                    println!("  {}: {} [{}]", group.name(), group.description(), group.maturity());
                }
            }
        },
        None => {
            println!("No matching model/firmware versions were found.");
        }
    }
    Ok(())
}

pub fn verify(input: &str, max_level: &str) -> Result<()> {
    let data = read_firmware(input)?;
    let level = parse_level(max_level)?;
    let catalog = database::builtin_catalog();
    let profile = match catalog.match_firmware(&data, level) {
        Some(profile) => profile,
        None => bail!("No matching model/firmware versions were found."),
    };
    println!("{}_{}", profile.model(), profile.version());
    let mismatches = profile.verify(&data);
    if mismatches.is_empty() {
        println!("All recorded patch bytes match this image.");
        Ok(())
    } else {
        for mismatch in &mismatches {
            eprintln!("  mismatch: {}", mismatch);
        }
        bail!("A sub-patch failed to map to this model/firmware version - please report.");
    }
}
