use crate::{
    Audience, FetchOptions, LogoutOptions,
    cli::globals::GlobalArgs,
    navigator::{NoopNavigator, RecordingNavigator},
};
use anyhow::Result;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone)]
pub struct LogoutArgs {
    pub globals: GlobalArgs,
    pub redirect_to: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AudienceArgs {
    pub globals: GlobalArgs,
    pub audience: Audience,
}

/// Reports whether the CSRF cookie is set. The token itself is never printed.
pub fn csrf(globals: &GlobalArgs) -> Result<Value> {
    let gate = globals.gate(Arc::new(NoopNavigator))?;
    Ok(json!({ "present": gate.csrf_token().is_some() }))
}

/// # Errors
/// Returns an error if the client cannot be built; logout failures are reported in the output.
pub async fn logout(args: &LogoutArgs) -> Result<Value> {
    let navigator = Arc::new(RecordingNavigator::new());
    let gate = args.globals.gate(navigator.clone())?;

    let options = LogoutOptions {
        redirect_to: args.redirect_to.clone(),
    };

    let output = match gate.logout(&options).await {
        Ok(()) => {
            let navigated = navigator.last();
            if let Some(target) = &navigated {
                info!("logged out, navigate to {target}");
            }
            json!({ "ok": true, "navigate_to": navigated })
        }
        Err(reason) => json!({ "ok": false, "reason": reason }),
    };

    Ok(output)
}

/// # Errors
/// Returns an error if the client cannot be built.
pub async fn refresh(args: &AudienceArgs) -> Result<Value> {
    let gate = args.globals.gate(Arc::new(NoopNavigator))?;
    let ok = gate.refresh_session(&args.audience).await;
    Ok(json!({ "ok": ok, "audience": args.audience.as_str() }))
}

/// # Errors
/// Returns an error if the client cannot be built.
pub async fn whoami(args: &AudienceArgs) -> Result<Value> {
    let gate = args.globals.gate(Arc::new(NoopNavigator))?;
    let user = gate
        .current_user(&FetchOptions {
            audience: args.audience.clone(),
        })
        .await;
    Ok(serde_json::to_value(user)?)
}
