use aerorhythm_core::config::Config;
use std::str::FromStr;
use tracing::Subscriber;
use tracing_subscriber::filter::{Filtered, LevelFilter};
use tracing_subscriber::Layer;

pub fn create_stdout_layer<S>(
    config: &Config,
) -> anyhow::Result<Option<Filtered<tracing_subscriber::fmt::Layer<S>, LevelFilter, S>>>
where
    S: Subscriber + for<'span> tracing_subscriber::registry::LookupSpan<'span>,
{
    let stdout_config = match &config.telemetry.stdout {
        Some(v) => v,
        None => return Ok(None),
    };

    let level = LevelFilter::from_str(&stdout_config.level).map_err(|e| {
        anyhow::anyhow!("invalid stdout log level '{}', {}", stdout_config.level, e)
    })?;

    let stdout_log = tracing_subscriber::fmt::layer().with_filter(level);

    Ok(Some(stdout_log))
}
