pub mod fetch;
pub mod session;

// Internal "interpreter" for `Action`.
// The match lives in `run` so this module stays small as actions are added.
mod run;

use crate::cli::globals::GlobalArgs;

#[derive(Debug)]
pub enum Action {
    Csrf(GlobalArgs),
    Logout(session::LogoutArgs),
    Refresh(session::AudienceArgs),
    WhoAmI(session::AudienceArgs),
    Fetch(fetch::Args),
}

impl Action {
    #[must_use]
    pub fn globals(&self) -> &GlobalArgs {
        match self {
            Self::Csrf(globals) => globals,
            Self::Logout(args) => &args.globals,
            Self::Refresh(args) | Self::WhoAmI(args) => &args.globals,
            Self::Fetch(args) => &args.globals,
        }
    }

    /// Execute the action and print its JSON result on stdout.
    /// # Errors
    /// Returns an error if the action fails or exceeds the configured timeout.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
