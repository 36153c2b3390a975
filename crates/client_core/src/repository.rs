use async_trait::async_trait;
use shared::{domain::User, error::ProfileError};

use crate::transport::ProfileTransport;

/// Anything that can produce the domain profile; the controller only sees this.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn get_profile(&self) -> Result<User, ProfileError>;
}

/// Unwraps the wire envelope into a [`User`]. Every call hits the transport.
pub struct ProfileRepository<T> {
    transport: T,
}

impl<T: ProfileTransport> ProfileRepository<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub async fn get_profile(&self) -> Result<User, ProfileError> {
        let envelope = self.transport.fetch_profile_document().await?;
        Ok(envelope.into_user()?)
    }
}

#[async_trait]
impl<T: ProfileTransport> ProfileSource for ProfileRepository<T> {
    async fn get_profile(&self) -> Result<User, ProfileError> {
        ProfileRepository::get_profile(self).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use shared::{
        domain::{Activity, Location, Social, Statistics},
        error::{MappingError, TransportError},
        protocol::ApiResponse,
    };

    use super::*;

    struct CannedTransport {
        response: Result<ApiResponse, TransportError>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ProfileTransport for CannedTransport {
        async fn fetch_profile_document(&self) -> Result<ApiResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response.clone()
        }
    }

    fn bob() -> User {
        User {
            username: "bob".into(),
            name: "Bob B".into(),
            avatar: "https://x/b.png".into(),
            location: Location {
                city: "Quito".into(),
                country: "Ecuador".into(),
            },
            social: Social {
                profiles: Vec::new(),
                website: None,
            },
            statistics: Statistics {
                followers: 1,
                following: 2,
                activity: Activity {
                    shots: 3,
                    collections: 4,
                },
            },
        }
    }

    fn repository(
        response: Result<ApiResponse, TransportError>,
    ) -> (ProfileRepository<CannedTransport>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let transport = CannedTransport {
            response,
            calls: calls.clone(),
        };
        (ProfileRepository::new(transport), calls)
    }

    #[tokio::test]
    async fn returns_enveloped_user_unchanged() {
        let (repo, _) = repository(Ok(ApiResponse { user: Some(bob()) }));
        assert_eq!(repo.get_profile().await.expect("profile"), bob());
    }

    #[tokio::test]
    async fn transport_errors_pass_through_untouched() {
        let original = TransportError::Connect("connection refused".into());
        let (repo, _) = repository(Err(original.clone()));

        let err = repo.get_profile().await.expect_err("must fail");
        assert_eq!(err, ProfileError::Transport(original));
    }

    #[tokio::test]
    async fn missing_user_is_reported_as_mapping_error() {
        let (repo, _) = repository(Ok(ApiResponse { user: None }));

        let err = repo.get_profile().await.expect_err("must fail");
        assert_eq!(
            err,
            ProfileError::Mapping(MappingError::MissingField("user"))
        );
    }

    #[tokio::test]
    async fn every_call_reaches_the_transport() {
        let (repo, calls) = repository(Ok(ApiResponse { user: Some(bob()) }));

        repo.get_profile().await.expect("first");
        repo.get_profile().await.expect("second");

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
