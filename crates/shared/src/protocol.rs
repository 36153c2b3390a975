use serde::{Deserialize, Serialize};

use crate::{domain::User, error::MappingError};

/// Outer JSON document served by the profile endpoint.
///
/// `user` is optional on the wire so that a document without it still parses
/// and can be reported as a [`MappingError`] instead of a decode failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub user: Option<User>,
}

impl ApiResponse {
    pub fn into_user(self) -> Result<User, MappingError> {
        self.user.ok_or(MappingError::MissingField("user"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: &str = r#"{"user": {"username":"alice", "name":"Alice A", "avatar":"https://x/a.png",
        "location":{"city":"Lima","country":"Peru"},
        "social":{"profiles":[{"platform":"instagram","url":"https://instagram.com/alice"},
                              {"platform":"facebook","url":"https://facebook.com/alice"}],
                  "website":"https://alice.dev"},
        "statistics":{"followers":120,"following":30,"activity":{"shots":5,"collections":0}}}}"#;

    #[test]
    fn parses_full_profile_document() {
        let envelope: ApiResponse = serde_json::from_str(ALICE).expect("envelope");
        let user = envelope.into_user().expect("user");

        assert_eq!(user.username, "alice");
        assert_eq!(user.location.city, "Lima");
        assert_eq!(user.social.profiles.len(), 2);
        assert_eq!(user.social.website.as_deref(), Some("https://alice.dev"));
        assert_eq!(user.statistics.followers, 120);
        assert_eq!(user.statistics.activity.collections, 0);
    }

    #[test]
    fn missing_user_key_is_a_mapping_error() {
        let envelope: ApiResponse = serde_json::from_str(r#"{"profile": {}}"#).expect("envelope");
        let err = envelope.into_user().expect_err("missing user");
        assert!(matches!(err, MappingError::MissingField("user")));
    }

    #[test]
    fn incomplete_user_fails_to_parse() {
        let result = serde_json::from_str::<ApiResponse>(r#"{"user": {"username": "alice"}}"#);
        assert!(result.is_err());
    }
}
