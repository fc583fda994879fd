use std::{env, process::ExitCode, sync::Arc};

use housing_hub::{
    AppState, ChannelNavigator, Navigation, NavigatorState,
    config::{AppConfig, Env},
    routes::Access,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Session probe: wires the client core against the configured API, optionally
/// logs in, reports the gate's verdict for each requested path, then logs out.
///
/// Paths come from the command line; with none given, every protected route is
/// checked.
#[tokio::main]
async fn main() -> ExitCode {
    // 1. Configuration & Environment Loading (Fail-Fast)
    dotenv::dotenv().ok();
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // 2. Logging Filter Setup
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "housing_hub=debug,reqwest=info".into());

    // 3. Pretty output locally, JSON for log aggregation in production.
    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!(api = %config.api_url, "probe starting in {:?} mode", config.env);

    // 4. Unified State Assembly
    let (navigator, mut redirects) = ChannelNavigator::channel();
    let state = match AppState::new(config, Arc::new(navigator) as NavigatorState) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "failed to build client state");
            return ExitCode::FAILURE;
        }
    };

    // 5. Optional login
    if let (Ok(email), Ok(password)) = (
        env::var("HOUSING_HUB_EMAIL"),
        env::var("HOUSING_HUB_PASSWORD"),
    ) {
        match state.session.login(&email, &password).await {
            Ok(identity) => tracing::info!(
                user = %identity.email,
                role = %identity.role,
                landing = identity.role.landing_path(),
                "logged in"
            ),
            Err(e) => tracing::warn!(error = %e, "login failed, probing anonymously"),
        }
    }

    // 6. Gate report
    let mut paths: Vec<String> = env::args().skip(1).collect();
    if paths.is_empty() {
        paths = state
            .routes
            .entries()
            .iter()
            .filter(|entry| matches!(entry.access, Access::Protected(_)))
            .map(|entry| entry.pattern.to_string())
            .collect();
    }

    for path in &paths {
        match state.navigate(path) {
            Navigation::Render(target) => {
                tracing::info!(path = %path, pattern = target.entry.pattern, "allow")
            }
            Navigation::Redirected(to) => {
                tracing::info!(path = %path, to = to.path(), "redirect")
            }
            Navigation::NotFound => tracing::warn!(path = %path, "no such route"),
        }
    }

    // 7. Teardown
    state.session.logout().await;

    redirects.close();
    let mut issued = 0usize;
    while let Ok(to) = redirects.try_recv() {
        issued += 1;
        tracing::debug!(to = to.path(), "redirect issued");
    }
    tracing::info!(checked = paths.len(), redirects = issued, "probe finished");

    ExitCode::SUCCESS
}
