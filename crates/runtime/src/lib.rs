use std::sync::Arc;

use anyhow::{Context, Result};
use roster_config::AppConfig;
use roster_database::{initialize_database, MemberRepository};
use roster_members::{
    AuthenticationService, DirectoryQueryService, MembershipService, PasswordHasher,
    RegistrationService, TokenIssuer,
};
use sqlx::SqlitePool;
use tracing::info;

pub mod telemetry {
    use anyhow::Result;
    use tracing::Level;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = SubscriberBuilder::default()
            .with_max_level(Level::DEBUG)
            .with_env_filter(env_filter)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

/// Everything the HTTP layer needs, built once at startup.
#[derive(Clone)]
pub struct RosterServices {
    pub db_pool: SqlitePool,
    pub tokens: Arc<TokenIssuer>,
    pub registration: Arc<RegistrationService>,
    pub authentication: Arc<AuthenticationService>,
    pub directory: Arc<DirectoryQueryService>,
    pub membership: Arc<MembershipService>,
}

impl RosterServices {
    pub async fn initialise(config: &AppConfig) -> Result<Self> {
        let db_pool = initialize_database(&config.database)
            .await
            .context("failed to initialise database")?;

        let hasher = Arc::new(
            PasswordHasher::new(&config.auth.hashing)
                .context("invalid password hashing parameters")?,
        );
        let tokens = Arc::new(
            TokenIssuer::from_config(&config.auth).context("invalid token configuration")?,
        );
        let repository = MemberRepository::new(db_pool.clone());

        let services = Self {
            registration: Arc::new(RegistrationService::new(
                repository.clone(),
                Arc::clone(&hasher),
            )),
            authentication: Arc::new(AuthenticationService::new(
                repository.clone(),
                Arc::clone(&hasher),
                Arc::clone(&tokens),
            )),
            directory: Arc::new(DirectoryQueryService::new(
                repository.clone(),
                config.directory.max_page_size,
            )),
            membership: Arc::new(MembershipService::new(repository, hasher)),
            tokens,
            db_pool,
        };

        info!(
            issuer = services.tokens.issuer(),
            max_page_size = services.directory.max_page_size(),
            "roster services ready"
        );

        Ok(services)
    }
}

pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(?error, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
