//! Chamber persistence: a single JSON document on disk
//!
//! The chamber lives at `<data dir>/innsikt/chamber.json` unless overridden
//! with `--store`. Writes go through a temporary file in the same directory
//! and are renamed into place, so a crash never leaves a half-written
//! chamber behind.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use innsikt_core::Chamber;
use tracing::info;

/// Default chamber path: `<data dir>/innsikt/chamber.json`
pub fn default_store_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("innsikt")
        .join("chamber.json")
}

/// Default backup directory: `<data dir>/innsikt/backups`
pub fn default_backup_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("innsikt")
        .join("backups")
}

pub struct ChamberStore {
    path: PathBuf,
}

impl ChamberStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the chamber; a missing file is an empty chamber
    pub fn load(&self) -> Result<Chamber> {
        if !self.path.exists() {
            return Ok(Chamber::new());
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open chamber: {}", self.path.display()))?;
        let chamber = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse chamber: {}", self.path.display()))?;
        Ok(chamber)
    }

    /// Write the chamber atomically (temp file + rename)
    pub fn save(&self, chamber: &Chamber) -> Result<()> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create store directory: {}", dir.display()))?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)
            .context("Failed to create temporary chamber file")?;
        serde_json::to_writer_pretty(BufWriter::new(&mut tmp), chamber)
            .context("Failed to serialize chamber")?;
        tmp.persist(&self.path)
            .with_context(|| format!("Failed to write chamber: {}", self.path.display()))?;

        info!(path = %self.path.display(), insights = chamber.len(), "chamber saved");
        Ok(())
    }

    /// Compress the chamber into `<dir>/chamber-<timestamp>.json.gz`
    pub fn backup_to(&self, dir: &Path) -> Result<PathBuf> {
        if !self.path.exists() {
            anyhow::bail!("No chamber to back up: {}", self.path.display());
        }
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create backup directory: {}", dir.display()))?;

        let stamp = chrono::Utc::now().format("%Y%m%d-%H%M%S");
        let dest_path = dir.join(format!("chamber-{stamp}.json.gz"));

        let source = File::open(&self.path)
            .with_context(|| format!("Failed to open chamber: {}", self.path.display()))?;
        let mut reader = BufReader::new(source);

        let dest = File::create(&dest_path)
            .with_context(|| format!("Failed to create backup: {}", dest_path.display()))?;
        let mut encoder = GzEncoder::new(BufWriter::new(dest), Compression::default());

        let mut buffer = [0u8; 8192];
        loop {
            let bytes_read = reader.read(&mut buffer)?;
            if bytes_read == 0 {
                break;
            }
            encoder.write_all(&buffer[..bytes_read])?;
        }
        encoder.finish()?;

        info!(path = %dest_path.display(), "backup stored");
        Ok(dest_path)
    }

    /// Delete the chamber file. Returns false when there was none.
    pub fn reset(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)
            .with_context(|| format!("Failed to delete chamber: {}", self.path.display()))?;
        Ok(true)
    }
}
