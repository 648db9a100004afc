// patch.rs from fwpatch (c) 2026 fwpatch Contributors
//
// Code for the patch command in the fwpatch CLI.

use std::fs;
use std::path::Path;
use anyhow::{bail, Context, Result};
use fwpatch::firmware::database;
use crate::shared::{parse_level, read_firmware};

pub fn patch(input: &str, output: &str, enable: &[String], all: bool, max_level: &str) -> Result<()> {
    let data = read_firmware(input)?;
    let level = parse_level(max_level)?;
    let catalog = database::builtin_catalog();
    let mut profile = match catalog.match_firmware(&data, level) {
        Some(profile) => profile,
        None => bail!("No matching model/firmware versions were found."),
    };
    println!("{}_{}", profile.model(), profile.version());
    if profile.groups().is_empty() {
        bail!("No patches presently exist for this model/firmware version.");
    }

    // The catalog entry must still map onto this exact image before any
    // patch is allowed to be applied.
    let mismatches = profile.verify(&data);
    if !mismatches.is_empty() {
        for mismatch in &mismatches {
            eprintln!("  mismatch: {}", mismatch);
        }
        bail!("A sub-patch failed to map to this model/firmware version - please report.");
    }

    let selected: Vec<String> = if all {
        profile.groups().iter().map(|group| group.name().to_string()).collect()
    } else {
        enable.to_vec()
    };
    if selected.is_empty() {
        bail!("No patch groups selected; use --enable <name> or --all.");
    }
    // Enabling goes through the profile so that mutually incompatible groups
    // resolve automatically (last one enabled wins).
    for name in &selected {
        profile.set_enabled(name, true)
            .with_context(|| format!("Could not enable patch group \"{}\".", name))?;
    }
    for group in profile.groups().iter().filter(|group| group.enabled()) {
        println!("  applying {}: {}", group.name(), group.description());
    }
    for overlap in profile.overlapping_edits() {
        eprintln!("Warning: overlapping patch groups: {}", overlap);
    }

    let patched = profile.apply(&data)
        .with_context(|| "The patch data for this firmware is corrupt.")?;
    fs::write(Path::new(output), patched)
        .with_context(|| "Could not open output file for writing.")?;
    println!("Patched firmware written to \"{}\".", output);
    Ok(())
}
