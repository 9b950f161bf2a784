use crate::{AuthRequest, FetchOptions, cli::globals::GlobalArgs, navigator::NoopNavigator};
use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Args {
    pub globals: GlobalArgs,
    pub request: AuthRequest,
    pub options: FetchOptions,
}

/// Runs the request through `auth_fetch` and reports status and body. JSON
/// bodies are embedded as JSON, anything else as text.
///
/// # Errors
/// Returns an error if the client cannot be built or the transport fails.
pub async fn handle(args: &Args) -> Result<Value> {
    let gate = args.globals.gate(Arc::new(NoopNavigator))?;

    let response = gate
        .auth_fetch(&args.request, &args.options)
        .await
        .with_context(|| format!("{} {}", args.request.method(), args.request.target()))?;

    let status = response.status();
    let text = response.text().await?;
    let body = serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text));

    Ok(json!({ "status": status.as_u16(), "body": body }))
}
