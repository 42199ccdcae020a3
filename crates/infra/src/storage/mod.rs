//! File-backed session storage
//!
//! - [`FileTokenPersistence`]: access token in `<data_dir>/access_token`
//! - [`PersistentCookieJar`]: session cookies mirrored to
//!   `<data_dir>/cookies.json`

pub mod cookie_file;
pub mod token_file;

pub use cookie_file::PersistentCookieJar;
pub use token_file::FileTokenPersistence;

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Write `contents` to `path` through a uniquely named sibling temp file.
///
/// The temp file is created owner-only on unix before any byte is written,
/// then renamed over `path`.
pub(crate) fn write_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|err| err.error)?;
    Ok(())
}
