use serde::Deserialize;

const DEFAULT_INFLUXDB_URL: &str = "http://localhost:8086";
const DEFAULT_LISTEN: &str = "0.0.0.0:8080";

#[derive(Debug, Deserialize, Clone)]
pub struct GatewayConfig {
    pub influxdb: InfluxSettings,
    pub listen: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InfluxSettings {
    pub url: String,
    pub token: String,
    pub org: String,
    pub bucket: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SecretsConfig {
    pub secrets_file: String,
    pub sops_binary: String,
}

/// Variables the config sources read instead of the process environment
pub type EnvOverride = Option<config::Map<String, String>>;

/// Defaults, then `config/gateway.*` if present, then `INFLUXDB_URL`,
/// `INFLUXDB_TOKEN`, `INFLUXDB_ORG`, `INFLUXDB_BUCKET` and `GATEWAY_LISTEN`.
pub fn load_gateway_config() -> anyhow::Result<GatewayConfig> {
    gateway_config_from(None)
}

fn gateway_config_from(env: EnvOverride) -> anyhow::Result<GatewayConfig> {
    let settings = config::Config::builder()
        .set_default("influxdb.url", DEFAULT_INFLUXDB_URL)?
        .set_default("influxdb.token", "")?
        .set_default("influxdb.org", "myorg")?
        .set_default("influxdb.bucket", "mybucket")?
        .set_default("listen", DEFAULT_LISTEN)?
        .add_source(config::File::with_name("config/gateway").required(false))
        .add_source(
            config::Environment::with_prefix("INFLUXDB")
                .separator("_")
                .keep_prefix(true)
                .source(env.clone()),
        )
        .add_source(config::Environment::with_prefix("GATEWAY").source(env))
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// `SECRETS_FILE` and `SOPS_BINARY` override the defaults.
pub fn load_secrets_config() -> anyhow::Result<SecretsConfig> {
    secrets_config_from(None)
}

fn secrets_config_from(env: EnvOverride) -> anyhow::Result<SecretsConfig> {
    let settings = config::Config::builder()
        .set_default("secrets_file", "secrets.yaml")?
        .set_default("sops_binary", "sops")?
        .set_override_option("secrets_file", env_var(&env, "SECRETS_FILE"))?
        .set_override_option("sops_binary", env_var(&env, "SOPS_BINARY"))?
        .build()?;

    Ok(settings.try_deserialize()?)
}

fn env_var(env: &EnvOverride, name: &str) -> Option<String> {
    match env {
        Some(vars) => vars.get(name).cloned(),
        None => std::env::var(name).ok(),
    }
}
