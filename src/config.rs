use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    /// Largest accepted request body in bytes. Logos are inline SVG.
    pub body_limit: usize,
}

pub const DEFAULT_BODY_LIMIT: usize = 25 * 1024 * 1024;

pub fn load() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();

    let port = match std::env::var("SERVICE_CATALOG_PORT") {
        Ok(v) => v
            .parse()
            .with_context(|| format!("SERVICE_CATALOG_PORT is not a valid port: {}", v))?,
        Err(_) => 8080,
    };

    let body_limit = match std::env::var("SERVICE_CATALOG_BODY_LIMIT") {
        Ok(v) => v
            .parse()
            .with_context(|| format!("SERVICE_CATALOG_BODY_LIMIT is not a byte count: {}", v))?,
        Err(_) => DEFAULT_BODY_LIMIT,
    };

    Ok(Config {
        port,
        body_limit,
        database_url: std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/services".into()),
    })
}
