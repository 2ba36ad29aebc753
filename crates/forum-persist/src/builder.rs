use crate::dbs::sqlite::SqlitePersistenceClient;
use crate::error::{Result, PersistError};

pub struct PersistClientBuilder {
    database_url: Option<String>,
    max_connections: u32,
    run_migrations: bool,
}

impl PersistClientBuilder {
    pub fn new() -> Self {
        Self {
            database_url: None,
            max_connections: 5,
            run_migrations: true,
        }
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    pub fn run_migrations(mut self, run_migrations: bool) -> Self {
        self.run_migrations = run_migrations;
        self
    }

    pub async fn build(self) -> Result<SqlitePersistenceClient> {
        let database_url = self.database_url
            .ok_or_else(|| PersistError::Internal("database_url is required".to_string()))?;

        SqlitePersistenceClient::connect(
            &database_url,
            self.max_connections,
            self.run_migrations,
        ).await
    }
}

impl Default for PersistClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
