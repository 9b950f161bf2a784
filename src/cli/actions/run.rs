use super::{Action, fetch, session};
use anyhow::{Result, anyhow};
use serde_json::Value;
use tokio::time::timeout;

pub(super) async fn execute(action: Action) -> Result<()> {
    let limit = action.globals().timeout;

    let output = match limit {
        Some(limit) => timeout(limit, perform(action))
            .await
            .map_err(|_| anyhow!("operation timed out after {}s", limit.as_secs()))??,
        None => perform(action).await?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

async fn perform(action: Action) -> Result<Value> {
    match action {
        Action::Csrf(globals) => session::csrf(&globals),
        Action::Logout(args) => session::logout(&args).await,
        Action::Refresh(args) => session::refresh(&args).await,
        Action::WhoAmI(args) => session::whoami(&args).await,
        Action::Fetch(args) => fetch::handle(&args).await,
    }
}
