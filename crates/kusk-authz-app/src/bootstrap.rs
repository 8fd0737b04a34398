use std::future::Future;
use std::sync::Arc;

use kusk_authz_api::{AdminServer, AuthzServer, build_checker};
use kusk_authz_config::AuthzConfig;
use kusk_authz_core::CredentialProvider;
use kusk_authz_telemetry::{LogFormat, LoggingConfig, Metrics};
use tokio::signal;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::error::{AppError, AppResult};

/// Dependencies required to bootstrap the checker.
pub(crate) struct BootstrapDependencies {
    config: AuthzConfig,
    telemetry: Metrics,
}

impl BootstrapDependencies {
    /// Construct production dependencies from the process environment.
    pub(crate) fn from_env() -> AppResult<Self> {
        let config =
            AuthzConfig::from_env().map_err(|err| AppError::config("config.from_env", err))?;
        Self::new(config)
    }

    pub(crate) fn new(config: AuthzConfig) -> AppResult<Self> {
        let telemetry =
            Metrics::new().map_err(|err| AppError::telemetry("telemetry.metrics", err))?;
        Ok(Self { config, telemetry })
    }
}

/// Entry point for the checker boot sequence.
///
/// # Errors
///
/// Returns an error if configuration is invalid, logging cannot be installed,
/// or a listener fails to bind or serve.
pub async fn run_app() -> AppResult<()> {
    let dependencies = BootstrapDependencies::from_env()?;
    let logging = LoggingConfig {
        level: &dependencies.config.log_level,
        format: LogFormat::from_setting(dependencies.config.log_format.as_deref()),
        ..LoggingConfig::default()
    };
    kusk_authz_telemetry::init_logging(&logging)
        .map_err(|err| AppError::telemetry("telemetry.init", err))?;
    run_app_with(dependencies, shutdown_signal()).await
}

/// Serve both listeners until `shutdown` resolves or one of them fails.
pub(crate) async fn run_app_with<F>(dependencies: BootstrapDependencies, shutdown: F) -> AppResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let BootstrapDependencies { config, telemetry } = dependencies;

    if config.reveal_hint {
        warn!("deny responses reveal the accepted credentials; set AUTHZ_REVEAL_HINT=false to hide them");
    }

    let provider: Arc<dyn CredentialProvider> = Arc::new(config.credentials.clone());
    let checker = build_checker(provider, config.reveal_hint, &telemetry);

    let (stop_tx, stop_rx) = watch::channel(false);
    let relay = tokio::spawn(async move {
        shutdown.await;
        let _ = stop_tx.send(true);
    });

    let authz_addr = config.listen_addr();
    info!(
        addr = %authz_addr,
        username = config.credentials.username(),
        "launching ext-authz listener"
    );
    let authz = AuthzServer::new(checker, telemetry.clone()).serve(authz_addr, stopped(stop_rx.clone()));

    let result = match config.admin_addr() {
        Some(admin_addr) => {
            info!(addr = %admin_addr, "launching admin listener");
            let admin = AdminServer::new(telemetry).serve(admin_addr, stopped(stop_rx));
            tokio::try_join!(authz, admin).map(|_| ())
        }
        None => authz.await,
    };

    relay.abort();
    result.map_err(|err| AppError::api_server("api_server.serve", err))?;
    info!("authorization checker stopped");
    Ok(())
}

/// Resolves once the relay flips the stop flag or goes away.
async fn stopped(mut stop: watch::Receiver<bool>) {
    let _ = stop.wait_for(|stopped| *stopped).await;
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received SIGINT"),
        () = terminate => info!("received SIGTERM"),
    }
}
