use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    /// Reject registration when a mobile number or email is already taken.
    /// When disabled, duplicate identifiers are accepted and login resolves
    /// the oldest matching record.
    pub enforce_unique_identifiers: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL is not set"))?;

        // No insecure default: a missing or empty secret is a startup error.
        let jwt_secret = std::env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET is not set"))?;
        if jwt_secret.trim().is_empty() {
            anyhow::bail!("JWT_SECRET must not be empty");
        }

        let enforce_unique_identifiers = std::env::var("ENFORCE_UNIQUE_IDENTIFIERS")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(true);

        Ok(Self {
            database_url,
            jwt_secret,
            enforce_unique_identifiers,
        })
    }
}
