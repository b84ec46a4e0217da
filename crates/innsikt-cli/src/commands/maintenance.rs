//! Backup and reset commands

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;

use crate::store::{default_backup_dir, ChamberStore};

/// Compress the chamber into the backup directory
pub fn cmd_backup(store: &ChamberStore, dir: Option<PathBuf>) -> Result<()> {
    let dir = dir.unwrap_or_else(default_backup_dir);
    let dest = store.backup_to(&dir)?;

    let size = std::fs::metadata(&dest).map(|m| m.len()).unwrap_or(0);
    println!("✅ Backup created: {}", dest.display());
    println!("   Size: {}", format_size(size));

    Ok(())
}

/// Delete the chamber file, asking first unless `--yes` was given
pub fn cmd_reset(store: &ChamberStore, yes: bool) -> Result<()> {
    if !yes {
        print!(
            "⚠️  This will DELETE the chamber at {} and all its insights.\n\n",
            store.path().display()
        );
        print!("Are you sure? [y/N] ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    if store.reset()? {
        println!("✅ Chamber deleted: {}", store.path().display());
    } else {
        println!("Nothing to reset: {}", store.path().display());
    }

    Ok(())
}

fn format_size(bytes: u64) -> String {
    if bytes >= 1_048_576 {
        format!("{:.1} MB", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{bytes} B")
    }
}
