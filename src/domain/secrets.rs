// InfluxDB secrets and the parameter names they are published under
use serde_json::Value;

pub const PARAMETER_DESCRIPTION: &str = "InfluxDB secret managed by SOPS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretParameter {
    pub name: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfluxSecrets {
    pub admin_password: String,
    pub auth_token: String,
    pub organization: String,
    pub bucket: String,
}

impl InfluxSecrets {
    /// Read the `influxdb` section of a decrypted secrets document. Missing
    /// keys fall back to the local development values.
    pub fn from_document(document: &Value) -> Self {
        let section = document.get("influxdb");
        let lookup = |key: &str, default: &str| {
            section
                .and_then(|s| s.get(key))
                .and_then(scalar_to_string)
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            admin_password: lookup("admin_password", "adminpassword123"),
            auth_token: lookup("auth_token", "my-super-secret-auth-token"),
            organization: lookup("organization", "myorg"),
            bucket: lookup("bucket", "mybucket"),
        }
    }

    /// Parameters in the order they are written.
    pub fn parameters(&self) -> Vec<SecretParameter> {
        vec![
            SecretParameter {
                name: "/influxdb/admin-password",
                value: self.admin_password.clone(),
            },
            SecretParameter {
                name: "/influxdb/auth-token",
                value: self.auth_token.clone(),
            },
            SecretParameter {
                name: "/influxdb/organization",
                value: self.organization.clone(),
            },
            SecretParameter {
                name: "/influxdb/bucket",
                value: self.bucket.clone(),
            },
        ]
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
