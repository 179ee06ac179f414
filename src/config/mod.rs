use std::env;
use std::time::Duration;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub jwt_secret: String,
    pub admin_password_hash: String,
    pub admin_token_expiration_secs: u64,
    pub server_host: String,
    pub server_port: u16,
    pub upload_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        // 通过环境开关在本地库和远程库之间切换
        let database_url = if env::var("USE_REMOTE_DB").as_deref() == Ok("true") {
            env::var("DATABASE_URL_REMOTE")?
        } else {
            env::var("DATABASE_URL")?
        };

        let admin_token_expiration = env::var("ADMIN_TOKEN_EXPIRATION")
            .unwrap_or_else(|_| "24".into())
            .trim_end_matches('h')
            .parse::<u64>()
            .unwrap_or(24);

        Ok(Config {
            database_url,
            redis_url: env::var("REDIS_URL")?,
            jwt_secret: env::var("JWT_SECRET")?,
            admin_password_hash: env::var("ADMIN_PASSWORD_HASH")?,
            admin_token_expiration_secs: admin_token_expiration * 3600,
            server_host: env::var("SERVER_HOST")?,
            server_port: env::var("SERVER_PORT")
                .map(|p| p.parse().unwrap_or(3000))
                .unwrap_or(3000),
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into()),
        })
    }

    pub fn admin_token_expiration(&self) -> Duration {
        Duration::from_secs(self.admin_token_expiration_secs)
    }
}
