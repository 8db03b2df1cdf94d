//! Test/recording helpers for persisting HTTP fixtures.
//! Compiled only when the `test-mode` feature is enabled.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub(crate) fn get_fixture_dir() -> PathBuf {
    env::var("SIGNALIST_FIXDIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"))
}

pub(crate) fn record_fixture(endpoint: &str, key: &str, body: &str) -> Result<(), std::io::Error> {
    let dir = get_fixture_dir();
    fs::create_dir_all(&dir)?;
    let endpoint = endpoint.replace('/', "_");
    let path = dir.join(format!("{endpoint}_{key}.json"));
    fs::write(&path, body)?;
    tracing::debug!("SIGNALIST_RECORD: wrote fixture to {}", path.display());
    Ok(())
}
