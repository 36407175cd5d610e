//! Document root provisioning.
//!
//! # Responsibilities
//! - Ensure `base_dir/<domain>/public_html` exists
//! - Create missing parents with mode 0755
//! - Stay idempotent across repeated calls

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::provision::domain::Domain;

/// Directory served for each domain, relative to the domain's home.
pub const PUBLIC_HTML: &str = "public_html";

/// Recursively create a directory with mode 0755 on unix.
pub(crate) fn create_dir_all_0755(path: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder.create(path)
}

/// Ensure the document root for `domain` exists under `base_dir`.
///
/// Existing directories are a no-op success. A pre-existing non-directory
/// at the target path is an error; all other io failures propagate
/// unchanged.
pub fn ensure_document_root(domain: &Domain, base_dir: &Path) -> io::Result<PathBuf> {
    let docroot = base_dir.join(domain.as_str()).join(PUBLIC_HTML);

    match fs::metadata(&docroot) {
        Ok(meta) if meta.is_dir() => Ok(docroot),
        Ok(_) => Err(io::Error::new(
            io::ErrorKind::NotADirectory,
            format!("{} exists and is not a directory", docroot.display()),
        )),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            create_dir_all_0755(&docroot)?;
            Ok(docroot)
        }
        Err(e) => Err(e),
    }
}
