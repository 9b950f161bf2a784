use crate::{
    client::AuthGate,
    config::{FetchOptions, USER_PATH},
    fetch::AuthRequest,
};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

/// The signed-in user as reported by the auth service.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct CurrentUser {
    /// Auth services differ on whether ids are strings or numbers; both land
    /// here as text.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub email: String,
    pub username: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

impl AuthGate {
    /// Fetches the current user through [`AuthGate::auth_fetch`].
    ///
    /// Every failure (transport error, non-success status, unexpected body)
    /// is reported as `None`, the same as having no session.
    pub async fn current_user(&self, options: &FetchOptions) -> Option<CurrentUser> {
        let response = match self.auth_fetch(&AuthRequest::get(USER_PATH), options).await {
            Ok(response) => response,
            Err(err) => {
                debug!("current user lookup failed: {err}");
                return None;
            }
        };

        if !response.status().is_success() {
            debug!("current user lookup returned {}", response.status());
            return None;
        }

        match response.json::<CurrentUser>().await {
            Ok(user) => Some(user),
            Err(err) => {
                debug!("current user response did not decode: {err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn id_accepts_strings_and_numbers() -> Result<(), serde_json::Error> {
        let text: CurrentUser =
            serde_json::from_value(json!({"id": "u-1", "email": "a@b", "username": "a"}))?;
        assert_eq!(text.id, "u-1");

        let number: CurrentUser =
            serde_json::from_value(json!({"id": 7, "email": "a@b", "username": "a"}))?;
        assert_eq!(number.id, "7");
        Ok(())
    }

    #[test]
    fn id_rejects_other_shapes() {
        let result = serde_json::from_value::<CurrentUser>(
            json!({"id": {"nested": 1}, "email": "a@b", "username": "a"}),
        );
        assert!(result.is_err());
    }
}
