//! Release asset selection

use std::env::consts;

use tracing::debug;

use crate::releases::{Release, ReleaseAsset};

/// Pick the asset to install from a release
///
/// An asset named exactly `binary_name` always wins. With `platform_fallback`
/// set, an asset whose name starts with `binary_name` and mentions both the
/// current OS and architecture is accepted instead.
pub fn select_asset<'a>(
    release: &'a Release,
    binary_name: &str,
    platform_fallback: bool,
) -> Option<&'a ReleaseAsset> {
    select_asset_for(
        release,
        binary_name,
        platform_fallback,
        consts::OS,
        consts::ARCH,
    )
}

/// [`select_asset`] for an explicit os/arch pair
pub fn select_asset_for<'a>(
    release: &'a Release,
    binary_name: &str,
    platform_fallback: bool,
    os: &str,
    arch: &str,
) -> Option<&'a ReleaseAsset> {
    if let Some(asset) = release.assets.iter().find(|a| a.name == binary_name) {
        return Some(asset);
    }

    if !platform_fallback {
        return None;
    }

    let os_names = os_aliases(os);
    let arch_names = arch_aliases(arch);
    debug!(
        "No exact '{}' asset in {}; trying {:?}/{:?}",
        binary_name, release.tag_name, os_names, arch_names
    );

    release.assets.iter().find(|a| {
        let name = a.name.to_lowercase();
        name.starts_with(binary_name)
            && !name.ends_with(".sha256")
            && os_names.iter().any(|o| name.contains(o))
            && arch_names.iter().any(|r| name.contains(r))
    })
}

fn os_aliases(os: &str) -> Vec<&str> {
    match os {
        "macos" => vec!["macos", "darwin"],
        other => vec![other],
    }
}

fn arch_aliases(arch: &str) -> Vec<&str> {
    match arch {
        "x86_64" => vec!["x86_64", "amd64"],
        "aarch64" => vec!["aarch64", "arm64"],
        other => vec![other],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(names: &[&str]) -> Release {
        Release {
            tag_name: "v1.0.0".to_string(),
            name: None,
            prerelease: false,
            assets: names
                .iter()
                .map(|n| ReleaseAsset {
                    name: n.to_string(),
                    browser_download_url: format!("https://example.invalid/{}", n),
                    size: 0,
                })
                .collect(),
            published_at: None,
        }
    }

    #[test]
    fn test_exact_name_wins() {
        let r = release(&["other", "netsocs"]);
        let asset = select_asset_for(&r, "netsocs", true, "linux", "x86_64").unwrap();
        assert_eq!(asset.name, "netsocs");
    }

    #[test]
    fn test_exact_name_preferred_over_platform_asset() {
        let r = release(&["netsocs-linux-amd64", "netsocs"]);
        let asset = select_asset_for(&r, "netsocs", true, "linux", "x86_64").unwrap();
        assert_eq!(asset.name, "netsocs");
    }

    #[test]
    fn test_platform_fallback() {
        let r = release(&[
            "netsocs-darwin-arm64",
            "netsocs-linux-amd64.sha256",
            "netsocs-linux-amd64",
        ]);
        let asset = select_asset_for(&r, "netsocs", true, "linux", "x86_64").unwrap();
        assert_eq!(asset.name, "netsocs-linux-amd64");

        let asset = select_asset_for(&r, "netsocs", true, "macos", "aarch64").unwrap();
        assert_eq!(asset.name, "netsocs-darwin-arm64");
    }

    #[test]
    fn test_fallback_disabled() {
        let r = release(&["netsocs-linux-amd64"]);
        assert!(select_asset_for(&r, "netsocs", false, "linux", "x86_64").is_none());
    }

    #[test]
    fn test_no_match() {
        let r = release(&["checksums.txt", "other"]);
        assert!(select_asset_for(&r, "netsocs", true, "linux", "x86_64").is_none());
    }
}
