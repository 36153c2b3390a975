//! Client side of the profile viewer: settings, HTTP transport, repository and
//! the state controller the UI observes.

pub mod config;
pub mod controller;
pub mod error;
pub mod repository;
pub mod transport;

pub use config::{load_settings, ClientSettings};
pub use controller::{ProfileController, ProfileUiState, FALLBACK_ERROR_MESSAGE};
pub use error::{ClientBuildError, SettingsError};
pub use repository::{ProfileRepository, ProfileSource};
pub use transport::{HttpProfileClient, ProfileTransport};

use tracing::info;

/// Wires transport → repository → controller from `settings`. Run once at
/// startup from within a Tokio runtime; the returned controller is already fetching.
pub fn compose_profile_controller(
    settings: &ClientSettings,
) -> Result<ProfileController, ClientBuildError> {
    let transport = HttpProfileClient::from_settings(settings)?;
    info!(endpoint = %transport.endpoint(), "loading profile");
    Ok(ProfileController::new(ProfileRepository::new(transport)))
}

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
