use crate::cli::ServeArgs;
use crate::infra::{AppState, DiskDocumentStore, InMemoryLoanRepository, StaticAdminToken};
use crate::routes::with_portal_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use loanflow::config::AppConfig;
use loanflow::error::AppError;
use loanflow::origination::{DocumentStore, LoanOriginationService, StaticBankDirectory};
use loanflow::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let directory = Arc::new(StaticBankDirectory::seeded());
    let repository = Arc::new(InMemoryLoanRepository::default());
    let service = Arc::new(LoanOriginationService::new(directory, repository));
    let admin = Arc::new(StaticAdminToken::new(config.admin.token.clone()));
    let documents: Arc<dyn DocumentStore> =
        Arc::new(DiskDocumentStore::new(config.storage.upload_dir.clone()));

    let app = with_portal_routes(service, admin, documents)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "loan origination portal ready");

    axum::serve(listener, app).await?;
    Ok(())
}
