use crate::error::Error;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub vision: VisionConfig,
    pub db: DbConfig,
}

#[derive(Debug, Clone)]
pub struct VisionConfig {
    pub endpoint: String,
    pub key: String,
}

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
}

impl Config {
    pub fn from_env() -> Result<Config, Error> {
        Ok(Config {
            vision: VisionConfig::from_env()?,
            db: DbConfig::from_env()?,
        })
    }
}

impl VisionConfig {
    pub fn from_env() -> Result<VisionConfig, Error> {
        Ok(VisionConfig {
            endpoint: required("VISION_ENDPOINT")?,
            key: required("VISION_KEY")?,
        })
    }
}

impl DbConfig {
    pub fn from_env() -> Result<DbConfig, Error> {
        Ok(DbConfig {
            host: required("DB_HOST")?,
            port: required("DB_PORT")?
                .parse()
                .map_err(|_| Error::InvalidEnv("DB_PORT"))?,
            name: required("DB_NAME")?,
            user: required("DB_USER")?,
            password: required("DB_PASSWORD")?,
        })
    }
}

fn required(name: &'static str) -> Result<String, Error> {
    env::var(name).map_err(|_| Error::MissingEnv(name))
}
