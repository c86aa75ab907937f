use std::{process, sync::Arc};

use scriptorium::{
    application::error::AppError,
    config,
    infra::{bootstrap, error::InfraError, http, telemetry},
};
use tokio::sync::Notify;
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::GenApiKey(_) => run_gen_api_key(settings).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let state = bootstrap::build_router_state(&settings);
    let app = http::build_app(state, settings.server.max_body_bytes);

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;
    info!(
        addr = %settings.server.addr,
        content_dir = %settings.storage.content_dir.display(),
        summary = %settings.storage.summary_path.display(),
        "scriptorium listening"
    );

    let draining = Arc::new(Notify::new());
    let signal = draining.clone();
    let server = axum::serve(listener, app.into_make_service()).with_graceful_shutdown(async move {
        wait_for_shutdown_signal().await;
        info!("shutdown signal received, draining requests");
        signal.notify_one();
    });

    let grace = settings.server.graceful_shutdown;
    tokio::select! {
        result = server => {
            result.map_err(|err| AppError::unexpected(format!("server error: {err}")))?;
        }
        _ = async {
            draining.notified().await;
            tokio::time::sleep(grace).await;
        } => {
            warn!(grace_secs = grace.as_secs(), "graceful shutdown timed out");
        }
    }

    Ok(())
}

async fn run_gen_api_key(settings: config::Settings) -> Result<(), AppError> {
    let service = bootstrap::build_api_key_service(&settings);
    let key = service
        .issue()
        .await
        .map_err(|err| AppError::unexpected(format!("failed to issue api key: {err}")))?;

    println!("The generated API key is: {key}");
    println!(
        "Only its digest was stored in {}. Save the key now.",
        settings.storage.key_digests_path.display()
    );
    Ok(())
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = ctrl_c() => {}
                }
            }
            Err(err) => {
                warn!(error = %err, "failed to register SIGTERM handler");
                ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c().await;
    }
}

async fn ctrl_c() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
