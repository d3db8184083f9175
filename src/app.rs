/*
 * Responsibility
 * - Config読み込み → 依存生成 → Router 組み立て
 * - Middleware の適用 (http/CORS/security headers/error body)
 * - axum::serve() で起動
 */
use anyhow::Result;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use std::{panic, process, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::services::auth::jwt::{AccessTokenVerifier, JwtIssuer};
use crate::services::auth::otp::OtpService;
use crate::services::auth::throttle::{ThrottleStore, ValkeyThrottleStore};
use crate::services::mailer::{LogMailer, OtpMailer, SmtpMailer};
use crate::state::AppState;
use crate::{api, middleware, web};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,sport_performance_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Always surface panics via tracing so they don't get "lost"
        // (stderr can be hidden depending on how the process is launched.)
        tracing::error!(?info, "panic");

        // In development, fail fast: crash the whole process so we notice immediately.
        // In production, prefer the default behavior (stderr) and let the server keep running.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    let abort_on_panic = !config.app_env.is_production();
    init_panic_hook(abort_on_panic);

    tracing::info!(
        "starting sport-performance-api in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let db = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&db).await?;

    let verifier = AccessTokenVerifier::new(
        &config.access_jwt_public_key_pem,
        &config.auth_issuer,
        &config.auth_audience,
        config.access_token_leeway_seconds,
    )?;

    let jwt = JwtIssuer::new(
        &config.access_jwt_private_key_pem,
        config.auth_issuer.clone(),
        config.auth_audience.clone(),
        config.access_token_ttl_seconds,
    )?;

    let mailer: Arc<dyn OtpMailer> = match &config.smtp {
        Some(smtp) => {
            tracing::info!(host = %smtp.host, "SMTP mailer configured");
            Arc::new(SmtpMailer::new(smtp)?)
        }
        None => {
            tracing::warn!("no SMTP configuration; OTP codes go to the log (development only)");
            Arc::new(LogMailer)
        }
    };

    // Throttling is an optional protection layer: a missing or unreachable
    // backend downgrades to "no cooldown" instead of blocking startup.
    let throttle: Option<Arc<dyn ThrottleStore>> = match &config.valkey_url {
        Some(url) => match ValkeyThrottleStore::new(url).await {
            Ok(store) => Some(Arc::new(store)),
            Err(e) => {
                tracing::warn!(error = %e, "valkey unavailable, OTP throttling disabled");
                None
            }
        },
        None => None,
    };

    let otp = OtpService::new(
        db.clone(),
        jwt,
        mailer,
        throttle,
        config.otp_ttl_minutes,
        config.otp_max_attempts,
        config.otp_request_cooldown_seconds,
    );

    Ok(AppState::new(
        db,
        Arc::new(verifier),
        Arc::new(otp),
        config.public_base_url.clone(),
    ))
}

fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .merge(web::routes())
        .nest("/api/v1", api::v1::routes(state.clone()))
        .with_state(state);

    // error_context first so it sits innermost: headers/CORS applied by the
    // outer layers still decorate rebuilt error responses.
    let router = middleware::error_context::apply(router);
    let router = middleware::security_headers::apply(router);
    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router)
}

#[cfg(test)]
#[path = "app_test.rs"]
mod tests;
