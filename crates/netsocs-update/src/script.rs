//! Replacement script for the installed binary
//!
//! The swap into the install path runs in a detached shell, outside the
//! process that downloaded the new binary.

use std::fs;
use std::path::Path;

use netsocs_core::error::Result;
use tracing::debug;

use crate::download::make_executable;

/// Render the script that swaps `new_binary` into `install_path` with sudo
pub fn render_update_script(new_binary: &Path, install_path: &Path) -> String {
    let new_binary = new_binary.display();
    let install_path = install_path.display();

    format!(
        "#!/bin/bash\n\
         set -e\n\
         echo \"Updating CLI...\"\n\
         sudo rm -f \"{install_path}\"\n\
         sudo cp \"{new_binary}\" \"{install_path}\"\n\
         sudo chmod +x \"{install_path}\"\n\
         echo \"Update complete!\"\n"
    )
}

/// Write the script to `path`, replacing any previous one
pub fn write_update_script(path: &Path, new_binary: &Path, install_path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render_update_script(new_binary, install_path))?;
    make_executable(path)?;
    debug!("Wrote update script: {}", path.display());
    Ok(())
}
