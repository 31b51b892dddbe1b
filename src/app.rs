/*
 * Responsibility
 * - tracing + panic hook
 * - Config -> services -> AppState -> Router
 * - Gate order: service key (outer) -> session token -> handlers
 * - axum::serve()
 */
use std::{panic, process};

use anyhow::Result;
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::services::auth::{build_service_key, build_session_tokens};
use crate::state::AppState;
use crate::{api, middleware};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,notes_gate=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Surface panics through tracing; stderr may be hidden depending on the launcher.
        tracing::error!(?info, "panic");

        // Development: crash so it gets noticed. Production: default hook, keep serving.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();

    // No service key, no traffic: a config error ends the process here.
    let config = Config::from_env().inspect_err(|e| {
        tracing::error!(error = %e, "refusing to start");
    })?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        app_env = ?config.app_env,
        addr = %config.addr,
        jwt_algorithm = ?config.jwt_algorithm,
        issuer = %config.auth_issuer,
        token_ttl_seconds = config.access_token_ttl_seconds,
        "starting notes API"
    );

    let state = AppState::new(build_service_key(&config), build_session_tokens(&config));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub(crate) fn build_router(state: AppState) -> Router {
    let router = api::routes().with_state(state.clone());

    // Layers wrap outward: the last one applied runs first.
    let router = middleware::auth::session::apply(router, state.clone());
    let router = middleware::auth::service_key::apply(router, state);
    middleware::http::apply(router)
}
