// Decrypt the SOPS secrets file and publish the InfluxDB values to SSM.
// Run once before deploying the gateway.
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use sensor_data_gateway::application::secrets_publisher::SecretsPublisher;
use sensor_data_gateway::infrastructure::config::load_secrets_config;
use sensor_data_gateway::infrastructure::sops::SopsDecryptor;
use sensor_data_gateway::infrastructure::ssm_store::SsmParameterStore;
use sensor_data_gateway::init_tracing;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let config = load_secrets_config()?;

    let decryptor = Arc::new(SopsDecryptor::new(config.sops_binary));
    let store = Arc::new(SsmParameterStore::from_env().await);
    let publisher = SecretsPublisher::new(decryptor, store);

    println!("🔓 Decrypting secrets from {}...", config.secrets_file);
    let secrets = publisher.decrypt(Path::new(&config.secrets_file)).await?;

    println!("\n📦 Storing secrets in AWS SSM Parameter Store...");
    let stored = publisher
        .publish(&secrets, |name| println!("✓ Stored {}", name))
        .await?;

    println!(
        "\n✅ All {} secrets successfully stored in SSM Parameter Store",
        stored.len()
    );
    Ok(())
}
