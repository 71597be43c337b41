use anyhow::Result;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cloudinary: CloudinaryConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub uri: String,
    pub database: String,
}

#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            server: ServerConfig {
                host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("PORT")
                    .unwrap_or_else(|_| "4000".to_string())
                    .parse()?,
            },
            database: DatabaseConfig {
                uri: std::env::var("MONGODB_URI")?,
                database: std::env::var("MONGODB_DATABASE")
                    .unwrap_or_else(|_| "portfolio".to_string()),
            },
            cloudinary: CloudinaryConfig {
                cloud_name: std::env::var("CLOUDINARY_CLOUD_NAME")?,
                api_key: std::env::var("CLOUDINARY_API_KEY")?,
                api_secret: std::env::var("CLOUDINARY_API_SECRET")?,
            },
        })
    }
}
