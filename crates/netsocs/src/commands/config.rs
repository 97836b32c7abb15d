//! Config command - set the server address in the values file

use anyhow::{Context, Result};
use dialoguer::Input;
use netsocs_core::address::{is_valid_address, validate_address, INVALID_ADDRESS_MESSAGE};
use netsocs_core::values::update_field;
use netsocs_core::RuntimeConfig;
use netsocs_helm::HelmClient;

use crate::cli::ConfigArgs;
use crate::commands::require_installed;
use crate::output;

/// Values key holding the public URL of the deployment
const HOSTNAME_FIELD: &str = "httpHostname";

pub async fn run(args: ConfigArgs, config: RuntimeConfig) -> Result<()> {
    output::banner();

    let helm = HelmClient::new(config);
    require_installed(&helm).await?;

    let address = match args.address {
        Some(address) => {
            validate_address(&address)?;
            address
        }
        None => prompt_address()?,
    };

    let values_path = helm.config().values_path()?;
    update_field(&values_path, HOSTNAME_FIELD, format!("https://{}", address))
        .context("Failed to update configuration")?;
    output::kv("Address", &address);

    if args.skip_apply {
        output::info(&format!("Values written to {}", values_path.display()));
        return Ok(());
    }

    helm.apply_values().await.context("Failed to run Helm")?;

    output::success("Configuration completed!");
    Ok(())
}

fn prompt_address() -> Result<String> {
    output::info("Example: 192.168.1.1 or server.netsocs.com");

    let address: String = Input::new()
        .with_prompt("NETSOCS address")
        .validate_with(|input: &String| -> Result<(), &str> {
            if is_valid_address(input) {
                Ok(())
            } else {
                Err(INVALID_ADDRESS_MESSAGE)
            }
        })
        .interact_text()
        .context("Failed to read the address")?;

    Ok(address)
}
