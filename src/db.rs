use crate::config::DbConfig;
use crate::error::Error;
use log::{debug, error};
use tokio_postgres::NoTls;

#[allow(async_fn_in_trait)]
pub trait Registry {
    /// Fail-closed: any lookup error reads as "not authorized".
    async fn is_authorized(&self, plate: &str) -> bool;
}

/// Exact-match lookup against the `vehicles` table.
pub struct PgRegistry {
    config: DbConfig,
}

impl PgRegistry {
    pub fn new(config: DbConfig) -> PgRegistry {
        PgRegistry { config }
    }

    async fn lookup(&self, plate: &str) -> Result<bool, Error> {
        let (client, connection) = tokio_postgres::Config::new()
            .host(&self.config.host)
            .port(self.config.port)
            .dbname(&self.config.name)
            .user(&self.config.user)
            .password(&self.config.password)
            .connect(NoTls)
            .await?;
        debug!("DB connected");
        let driver = tokio::spawn(connection);

        let rows = client
            .query(
                "SELECT vehicle_no FROM vehicles WHERE vehicle_no = $1",
                &[&plate],
            )
            .await;

        // Dropping the client ends the connection on every exit path; wait
        // for the driver so nothing is left open past this call.
        drop(client);
        let _ = driver.await;
        Ok(!rows?.is_empty())
    }
}

impl Registry for PgRegistry {
    async fn is_authorized(&self, plate: &str) -> bool {
        match self.lookup(plate).await {
            Ok(found) => found,
            Err(e) => {
                error!("Registry lookup failed, treating as not authorized: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_database_fails_closed() {
        let registry = PgRegistry::new(DbConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            name: "pump".to_string(),
            user: "gate".to_string(),
            password: "none".to_string(),
        });
        assert!(!registry.is_authorized("ABC123").await);
    }
}
