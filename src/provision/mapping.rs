//! Master mapping file registration.
//!
//! # Responsibilities
//! - Append one `virtualHost <domain> <domain>` record to the master
//!   config when that file exists
//! - Skip silently when it does not (the file is seeded by the web server
//!   installation, never created here)
//!
//! # Design Decisions
//! - Append-only: records are never updated or removed, and duplicates
//!   accumulate when the same domain is provisioned twice

use std::fs::OpenOptions;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::provision::domain::Domain;

/// Append the mapping record for `domain` to `map_file`.
///
/// Returns `Ok(true)` when a record was appended, `Ok(false)` when the map
/// file does not exist and the step was skipped.
pub fn append_mapping(domain: &Domain, map_file: &Path) -> io::Result<bool> {
    if !map_file.exists() {
        return Ok(false);
    }

    let mut file = OpenOptions::new().read(true).append(true).open(map_file)?;

    // keep one record per line even when the seeded file lacks a trailing
    // newline
    let len = file.seek(SeekFrom::End(0))?;
    if len > 0 {
        file.seek(SeekFrom::End(-1))?;
        let mut last = [0u8; 1];
        file.read_exact(&mut last)?;
        if last[0] != b'\n' {
            file.write_all(b"\n")?;
        }
    }

    writeln!(file, "virtualHost {} {}", domain, domain)?;
    Ok(true)
}
