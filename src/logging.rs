use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// RUST_LOG でログレベルを設定する。未設定なら `default_log_settings` を使う
pub fn setup_logging(default_log_settings: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_log_settings.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init()
}
