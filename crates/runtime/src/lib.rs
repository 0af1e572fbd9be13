use std::sync::Arc;

use anyhow::{Context, Result};
use relay_config::AppConfig;
use relay_database::{initialize_database, SqlitePool, UserRepository};
use relay_push::FcmGateway;
use relay_users::{
    CredentialHasher, CredentialManager, DeviceAddressRegistry, NotificationDispatcher,
    PushGateway, UserStore,
};
use tracing::info;

pub mod telemetry {
    use anyhow::Result;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = SubscriberBuilder::default()
            .with_env_filter(env_filter)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

#[derive(Clone)]
pub struct BackendServices {
    pub db_pool: SqlitePool,
    pub store: Arc<dyn UserStore>,
    pub gateway: Arc<dyn PushGateway>,
    pub credentials: CredentialManager,
    pub devices: DeviceAddressRegistry,
    pub notifications: NotificationDispatcher,
}

impl BackendServices {
    pub async fn initialise(config: &AppConfig) -> Result<Self> {
        let db_pool = initialize_database(&config.database)
            .await
            .context("failed to initialise database")?;
        let store: Arc<dyn UserStore> = Arc::new(UserRepository::new(db_pool.clone()));

        let hasher = CredentialHasher::new(&config.auth.password_hash)
            .context("failed to configure password hashing")?;

        let fcm = FcmGateway::from_config(&config.push).context("failed to build push gateway")?;
        info!(
            endpoint = %config.push.endpoint,
            configured = fcm.is_configured(),
            "push gateway ready"
        );
        let gateway: Arc<dyn PushGateway> = Arc::new(fcm);

        Ok(Self {
            credentials: CredentialManager::new(store.clone(), hasher),
            devices: DeviceAddressRegistry::new(store.clone()),
            notifications: NotificationDispatcher::new(store.clone(), gateway.clone()),
            db_pool,
            store,
            gateway,
        })
    }
}

pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(?error, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
