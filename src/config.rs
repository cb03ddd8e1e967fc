use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_days: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub endpoint: String,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
    /// Base URL under which stored objects are publicly reachable.
    /// Defaults to the endpoint itself (path-style access).
    pub public_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            ttl_days: std::env::var("JWT_TTL_DAYS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(7),
        };
        let endpoint = std::env::var("S3_ENDPOINT")?;
        let storage = StorageConfig {
            public_url: std::env::var("S3_PUBLIC_URL").unwrap_or_else(|_| endpoint.clone()),
            endpoint,
            bucket: std::env::var("S3_BUCKET").unwrap_or_else(|_| "bookbridge-listings".into()),
            access_key: std::env::var("S3_ACCESS_KEY")?,
            secret_key: std::env::var("S3_SECRET_KEY")?,
        };
        Ok(Self {
            database_url,
            jwt,
            storage,
        })
    }
}
