use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryAccountRepository, InMemoryComplaintRepository};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use complaint_desk::accounts::AccountService;
use complaint_desk::complaints::ComplaintService;
use complaint_desk::config::{AppConfig, MailConfig};
use complaint_desk::error::AppError;
use complaint_desk::mail::{LogMailTransport, MailNotifier, MailTransport, SmtpMailTransport};
use complaint_desk::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

const FALLBACK_SENDER: &str = "complaints@localhost";
const FALLBACK_ADMIN: &str = "admin@localhost";

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

    let notifier = Arc::new(mail_notifier(config.mail.as_ref())?);
    let complaint_service = Arc::new(
        ComplaintService::new(Arc::new(InMemoryComplaintRepository::default()), notifier)
            .with_dispatch(config.notifications.dispatch),
    );
    let account_service = Arc::new(AccountService::new(Arc::new(
        InMemoryAccountRepository::default(),
    )));

    if args.seed_demo_users {
        let report = account_service.seed_demo_users().await?;
        info!(
            created = report.created.len(),
            existing = report.existing.len(),
            "{}",
            report.message()
        );
    }

    let app = with_service_routes(complaint_service, account_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        dispatch = ?config.notifications.dispatch,
        "complaint desk ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

fn mail_notifier(
    config: Option<&MailConfig>,
) -> Result<MailNotifier<dyn MailTransport>, AppError> {
    let Some(config) = config else {
        warn!("SMTP_HOST not set; notification e-mails will only be logged");
        let transport: Arc<dyn MailTransport> = Arc::new(LogMailTransport);
        return Ok(MailNotifier::new(transport, FALLBACK_SENDER, FALLBACK_ADMIN));
    };

    let transport: Arc<dyn MailTransport> = Arc::new(SmtpMailTransport::from_config(config)?);
    info!(host = %config.host, port = config.port, admin = %config.admin, "smtp notifications enabled");
    Ok(MailNotifier::new(
        transport,
        config.from.clone(),
        config.admin.clone(),
    ))
}
