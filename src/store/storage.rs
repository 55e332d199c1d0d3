use super::types::{Ledger, LEDGER_VERSION};
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Get the default ledger file path (~/.config/volley-picks/ledger.json)
pub fn get_ledger_path() -> PathBuf {
    crate::config::get_config_dir().join("ledger.json")
}

/// Load the ledger from a JSON file
///
/// If the file doesn't exist, returns a new empty ledger.
/// If the file exists but has an unsupported version, returns an error.
pub fn load_ledger(path: &Path) -> Result<Ledger> {
    if !path.exists() {
        tracing::debug!("No ledger at {}, starting empty", path.display());
        return Ok(Ledger::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open ledger at {}", path.display()))?;

    let ledger: Ledger = serde_json::from_reader(file)
        .with_context(|| format!("Failed to parse ledger at {}", path.display()))?;

    if ledger.version != LEDGER_VERSION {
        anyhow::bail!("Unsupported ledger version: {}", ledger.version);
    }

    Ok(ledger)
}

/// Save the ledger to a JSON file atomically
///
/// The file is never left half-written. Creates the parent directory if needed.
pub fn save_ledger(path: &Path, ledger: &Ledger) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, ledger).context("Failed to serialize ledger")?;

    file.commit().context("Failed to save ledger")?;

    tracing::debug!("Saved ledger to {}", path.display());
    Ok(())
}
