// shared.rs from fwpatch (c) 2026 fwpatch Contributors
//
// Helpers shared between the fwpatch CLI commands.

use std::fs;
use std::path::Path;
use std::str::FromStr;
use anyhow::{bail, Context, Result};
use fwpatch::firmware::Maturity;

/// Largest firmware image the tool will accept. Anything bigger is rejected
/// before the core ever sees it and no output is produced.
pub const MAX_FIRMWARE_SIZE: u64 = 48 * 1024 * 1024;

/// Reads a firmware image fully into memory, enforcing the size cap.
pub fn read_firmware(input: &str) -> Result<Vec<u8>> {
    let in_path = Path::new(input);
    if !in_path.exists() {
        bail!("Firmware file \"{}\" does not exist.", in_path.display());
    }
    let metadata = fs::metadata(in_path)
        .with_context(|| "Could not read firmware file metadata.")?;
    if metadata.len() > MAX_FIRMWARE_SIZE {
        bail!(
            "Firmware file \"{}\" is larger than the maximum supported size of 48 MiB.",
            in_path.display()
        );
    }
    fs::read(in_path).with_context(|| "Could not open firmware file for reading.")
}

/// Parses a maturity ceiling given on the command line.
pub fn parse_level(level: &str) -> Result<Maturity> {
    Maturity::from_str(level).with_context(|| format!("Invalid maturity level \"{}\".", level))
}
