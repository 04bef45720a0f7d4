use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use providertone_application::ToneSession;

pub fn run(session: &ToneSession, output: Option<PathBuf>) -> Result<()> {
    let export = session.export();
    if export.is_empty() {
        bail!("No completed tracks to export");
    }

    let path = output.unwrap_or_else(|| PathBuf::from(export.default_file_name()));
    let json = export.to_json_pretty()?;
    fs::write(&path, json + "\n")
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Exported style profile to {}", path.display());
    Ok(())
}
