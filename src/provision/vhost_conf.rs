//! Vhost config rendering and writing.
//!
//! # Responsibilities
//! - Render the per-domain vhost configuration body
//! - Write it to `<vhost_conf_dir>/<domain>/vhost.conf`, creating parents
//! - Overwrite any previous file in full (last write wins, no merging)
//!
//! # Design Decisions
//! - `$SERVER_ROOT` in the log paths is emitted literally; the web server
//!   expands it at its own reload time
//! - The rendered output is not syntax-checked here; the server's reload
//!   is the authority on config validity

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::provision::docroot::create_dir_all_0755;
use crate::provision::domain::Domain;

/// File name of the per-domain vhost config.
pub const VHOST_CONF_FILE: &str = "vhost.conf";

/// Render the vhost configuration body for `domain`.
pub fn render_vhost_config(
    domain: &Domain,
    doc_root: &Path,
    admin_email: &str,
    enable_gzip: bool,
) -> String {
    format!(
        "docRoot {doc_root}\n\
         vhDomain {domain}\n\
         vhAliases *\n\
         adminEmails {admin_email}\n\
         enableGzip {gzip}\n\
         errorlog $SERVER_ROOT/logs/{domain}_error.log\n\
         accesslog $SERVER_ROOT/logs/{domain}_access.log\n\
         index {{ useServer 0 indexFiles index.html }}\n",
        doc_root = doc_root.display(),
        domain = domain,
        admin_email = admin_email,
        gzip = if enable_gzip { 1 } else { 0 },
    )
}

/// Write the vhost config for `domain`, overwriting any existing file.
///
/// Returns the path of the written file.
pub fn write_vhost_config(
    domain: &Domain,
    doc_root: &Path,
    vhost_conf_dir: &Path,
    admin_email: &str,
    enable_gzip: bool,
) -> io::Result<PathBuf> {
    let conf_path = vhost_conf_dir.join(domain.as_str()).join(VHOST_CONF_FILE);
    if let Some(parent) = conf_path.parent() {
        create_dir_all_0755(parent)?;
    }

    let body = render_vhost_config(domain, doc_root, admin_email, enable_gzip);
    fs::write(&conf_path, body)?;

    Ok(conf_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provision::domain::validate;

    #[test]
    fn test_rendered_body() {
        let domain = validate("example.com").unwrap();
        let body = render_vhost_config(
            &domain,
            Path::new("/home/example.com/public_html"),
            "admin@example.com",
            true,
        );

        assert!(body.contains("docRoot /home/example.com/public_html\n"));
        assert!(body.contains("vhDomain example.com\n"));
        assert!(body.contains("vhAliases *\n"));
        assert!(body.contains("adminEmails admin@example.com\n"));
        assert!(body.contains("enableGzip 1\n"));
        assert!(body.contains("index { useServer 0 indexFiles index.html }\n"));
    }

    #[test]
    fn test_server_root_left_unexpanded() {
        let domain = validate("example.com").unwrap();
        let body = render_vhost_config(&domain, Path::new("/home/x"), "a@b.c", false);

        assert!(body.contains("errorlog $SERVER_ROOT/logs/example.com_error.log\n"));
        assert!(body.contains("accesslog $SERVER_ROOT/logs/example.com_access.log\n"));
        assert!(body.contains("enableGzip 0\n"));
    }

    #[test]
    fn test_write_creates_parents() {
        let conf_dir = tempfile::tempdir().unwrap();
        let domain = validate("example.com").unwrap();

        let path = write_vhost_config(
            &domain,
            Path::new("/home/example.com/public_html"),
            conf_dir.path(),
            "admin@example.com",
            true,
        )
        .unwrap();

        assert_eq!(
            path,
            conf_dir.path().join("example.com").join("vhost.conf")
        );
        assert!(path.is_file());
    }

    #[test]
    fn test_rewrite_overwrites_in_full() {
        let conf_dir = tempfile::tempdir().unwrap();
        let domain = validate("example.com").unwrap();

        write_vhost_config(
            &domain,
            Path::new("/old/root"),
            conf_dir.path(),
            "admin@example.com",
            true,
        )
        .unwrap();
        let path = write_vhost_config(
            &domain,
            Path::new("/new/root"),
            conf_dir.path(),
            "admin@example.com",
            true,
        )
        .unwrap();

        let body = fs::read_to_string(path).unwrap();
        assert!(body.contains("docRoot /new/root\n"));
        assert!(!body.contains("/old/root"));
    }
}
