use secrecy::SecretString;
use serde::Deserialize;

/// Verification key for bearer tokens presented to the command endpoint.
/// Tokens are issued elsewhere; this service only validates them.
#[derive(Debug, Deserialize)]
pub struct JwtSettings {
    pub secret: SecretString,
}

impl JwtSettings {
    pub fn new(secret: String) -> Self {
        Self {
            secret: SecretString::new(secret.into_boxed_str()),
        }
    }
}
