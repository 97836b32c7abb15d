//! Auto-install command - copy the running executable to the system path

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use netsocs_core::{Error, RuntimeConfig};
use tracing::debug;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use crate::output;

pub fn run(config: RuntimeConfig) -> Result<()> {
    let target = &config.update.install_path;
    let source = std::env::current_exe().context("Could not get current executable path")?;

    match install_binary(&source, target) {
        Ok(()) => {}
        Err(e @ Error::Permission { .. }) => {
            output::error(&format!(
                "You need to run this command as root (with sudo) to install system-wide in {}.",
                target
                    .parent()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| target.display().to_string())
            ));
            return Err(e.into());
        }
        Err(e) => return Err(e).context("Error copying binary"),
    }

    println!(
        "CLI installed as '{}'.\nYou can now run 'netsocs' from any user or location.",
        target.display()
    );
    Ok(())
}

/// Copy `source` to `target` with mode 0755
///
/// The copy lands in a sibling file first and is renamed over the target, so
/// a running binary at `target` is replaced rather than rewritten in place.
pub(crate) fn install_binary(source: &Path, target: &Path) -> netsocs_core::Result<()> {
    if source == target {
        debug!("{} is already the installed binary", target.display());
        return Ok(());
    }

    let staging = target.with_extension("new");
    fs::copy(source, &staging).map_err(|e| map_permission(e, target))?;

    #[cfg(unix)]
    fs::set_permissions(&staging, fs::Permissions::from_mode(0o755))?;

    fs::rename(&staging, target).map_err(|e| map_permission(e, target))?;
    Ok(())
}

fn map_permission(err: io::Error, target: &Path) -> Error {
    if err.kind() == io::ErrorKind::PermissionDenied {
        Error::permission(target.display().to_string())
    } else {
        Error::Io(err)
    }
}
