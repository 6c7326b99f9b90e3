//! FitDesk server binary.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fitdesk::adapters::http::{router, AppState};
use fitdesk::adapters::notification::ProviderNotificationGateway;
use fitdesk::adapters::postgres::{
    connect, PostgresAccountStore, PostgresMemberRepository, PostgresPaymentRepository,
};
use fitdesk::config::AppConfig;
use fitdesk::domain::billing::CheckoutVerifier;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_new(&config.server.log_level)
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = connect(&config.database).await?;

    let state = AppState {
        account_store: Arc::new(PostgresAccountStore::new(pool.clone())),
        members: Arc::new(PostgresMemberRepository::new(pool.clone())),
        payments: Arc::new(PostgresPaymentRepository::new(pool)),
        gateway: Arc::new(ProviderNotificationGateway::new(&config.notification)?),
        checkout_verifier: Arc::new(CheckoutVerifier::new(
            config.payment.checkout_key_secret.clone(),
        )),
    };

    let app = router(
        state,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, "fitdesk listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
