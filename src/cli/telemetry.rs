use anyhow::Result;
use tracing::Level;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt};

/// Builds the filter: `RUST_LOG` wins, otherwise the CLI verbosity.
fn env_filter(verbosity_level: Option<Level>) -> Result<EnvFilter> {
    let verbosity_level = verbosity_level.unwrap_or(Level::ERROR);

    Ok(EnvFilter::builder()
        .with_default_directive(verbosity_level.into())
        .from_env_lossy()
        .add_directive("hyper=error".parse()?)
        .add_directive("hyper_util=error".parse()?)
        .add_directive("reqwest=warn".parse()?))
}

/// Initialize logging on stderr; stdout is reserved for command output.
///
/// # Errors
///
/// Returns an error if the subscriber cannot be installed
pub fn init(verbosity_level: Option<Level>) -> Result<()> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_target(false);

    let subscriber = Registry::default()
        .with(fmt_layer)
        .with(env_filter(verbosity_level)?);
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
