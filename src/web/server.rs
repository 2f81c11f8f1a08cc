//! Web server for Medoka.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::config::Config;
use crate::db::{Database, RecoveryTokenRepository, VerificationTokenRepository};
use crate::mail::Mailer;

use super::handlers::AppState;
use super::router::{create_health_router, create_router};

/// Web server for the API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// Allowed CORS origins.
    cors_origins: Vec<String>,
}

impl WebServer {
    /// Create a new web server.
    pub fn new(config: &Config, db: Database, mailer: Mailer) -> Self {
        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .expect("Invalid web server address");

        let app_state = AppState::new(db, &config.web, mailer);

        Self {
            addr,
            app_state: Arc::new(app_state),
            cors_origins: config.web.cors_origins.clone(),
        }
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Start the token cleanup background task.
    ///
    /// Runs every hour and removes expired verification codes and recovery
    /// tokens.
    fn start_token_cleanup_task(db: Database) {
        tokio::spawn(async move {
            // Token cleanup interval: 1 hour
            const CLEANUP_INTERVAL_SECS: u64 = 3600;

            let mut interval = tokio::time::interval(Duration::from_secs(CLEANUP_INTERVAL_SECS));

            // Skip the first immediate tick
            interval.tick().await;

            loop {
                interval.tick().await;

                let verification_repo = VerificationTokenRepository::new(db.pool());
                match verification_repo.cleanup_expired().await {
                    Ok(count) if count > 0 => {
                        tracing::info!(deleted_count = count, "Cleaned up expired verification codes");
                    }
                    Ok(_) => tracing::debug!("No expired verification codes to clean up"),
                    Err(e) => tracing::warn!(error = %e, "Failed to cleanup verification codes"),
                }

                let recovery_repo = RecoveryTokenRepository::new(db.pool());
                match recovery_repo.cleanup_expired().await {
                    Ok(count) if count > 0 => {
                        tracing::info!(deleted_count = count, "Cleaned up expired recovery tokens");
                    }
                    Ok(_) => tracing::debug!("No expired recovery tokens to clean up"),
                    Err(e) => tracing::warn!(error = %e, "Failed to cleanup recovery tokens"),
                }
            }
        });
    }

    /// Run the web server.
    pub async fn run(self) -> Result<(), std::io::Error> {
        let db = self.app_state.db.clone();

        let router = create_router(self.app_state, &self.cors_origins)
            .merge(create_health_router());

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        // Start token cleanup background task after successful bind
        Self::start_token_cleanup_task(db);
        tracing::info!("Token cleanup task started (runs every hour)");

        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router).await
    }

    /// Run the server and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> Result<SocketAddr, std::io::Error> {
        let db = self.app_state.db.clone();

        let router = create_router(self.app_state, &self.cors_origins)
            .merge(create_health_router());

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        Self::start_token_cleanup_task(db);
        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn create_test_config() -> Config {
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 0; // Use random port
        config.web.jwt_secret = "test-secret-key".to_string();
        config
    }

    #[tokio::test]
    async fn test_web_server_new() {
        let config = create_test_config();
        let db = Database::open_in_memory().await.unwrap();
        let mailer = Mailer::spawn(&config.mail);

        let server = WebServer::new(&config, db, mailer);
        assert_eq!(server.addr().ip().to_string(), "127.0.0.1");
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let config = create_test_config();
        let db = Database::open_in_memory().await.unwrap();
        let mailer = Mailer::spawn(&config.mail);

        let server = WebServer::new(&config, db, mailer);
        let addr = server.run_with_addr().await.unwrap();

        let stream = tokio::net::TcpStream::connect(addr).await;
        assert!(stream.is_ok());
    }
}
