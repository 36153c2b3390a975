//! Profile screen state: one fetch per controller, published over a latest-value channel.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use shared::{domain::User, error::ProfileError};
use tokio::{sync::watch, task::JoinHandle};
use tokio_stream::wrappers::WatchStream;

use crate::repository::ProfileSource;

/// Shown when a failure carries no description of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProfileUiState {
    #[default]
    Loading,
    Loaded(User),
    Failed(String),
}

impl ProfileUiState {
    /// Builds `Failed`, substituting [`FALLBACK_ERROR_MESSAGE`] for a blank message.
    pub fn failed(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self::Failed(FALLBACK_ERROR_MESSAGE.to_string())
        } else {
            Self::Failed(message)
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Loaded(user) => Some(user),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// `Loaded` and `Failed` end a fetch attempt.
    pub fn is_terminal(&self) -> bool {
        !self.is_loading()
    }
}

impl From<Result<User, ProfileError>> for ProfileUiState {
    fn from(result: Result<User, ProfileError>) -> Self {
        match result {
            Ok(user) => Self::Loaded(user),
            Err(err) => Self::failed(err.to_string()),
        }
    }
}

/// Owns the profile state for one screen and fetches it once on creation.
///
/// The spawned task holds the only [`watch::Sender`]. Dropping the controller
/// closes the publisher and aborts the task, so nothing is published after
/// teardown.
pub struct ProfileController {
    state: watch::Receiver<ProfileUiState>,
    closed: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl ProfileController {
    /// Starts the fetch on the current Tokio runtime. The state reads
    /// `Loading` immediately, before the task gets a chance to run.
    ///
    /// # Panics
    ///
    /// Panics if called outside the context of a Tokio runtime.
    pub fn new<S>(source: S) -> Self
    where
        S: ProfileSource + 'static,
    {
        let (tx, rx) = watch::channel(ProfileUiState::Loading);
        let closed = Arc::new(AtomicBool::new(false));
        let publisher = StatePublisher {
            tx,
            closed: closed.clone(),
        };
        let task = tokio::spawn(fetch_profile(source, publisher));
        Self {
            state: rx,
            closed,
            task,
        }
    }

    pub fn current(&self) -> ProfileUiState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ProfileUiState> {
        self.state.clone()
    }

    /// Stream of state values starting with the current one. Intermediate
    /// values a slow reader misses are not replayed.
    pub fn updates(&self) -> WatchStream<ProfileUiState> {
        WatchStream::new(self.state.clone())
    }

    /// Waits for the fetch to settle. If the task is gone without settling,
    /// returns whatever was last published.
    pub async fn settled(&self) -> ProfileUiState {
        let mut rx = self.state.clone();
        let outcome = rx
            .wait_for(ProfileUiState::is_terminal)
            .await
            .map(|state| state.clone());
        match outcome {
            Ok(state) => state,
            Err(_) => rx.borrow().clone(),
        }
    }
}

impl Drop for ProfileController {
    fn drop(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
        // Publications check `closed` under the channel's write lock; taking the
        // read lock here waits out one that is already in progress.
        drop(self.state.borrow());
        self.task.abort();
    }
}

/// Write side of the state channel, owned by the fetch task.
struct StatePublisher {
    tx: watch::Sender<ProfileUiState>,
    closed: Arc<AtomicBool>,
}

impl StatePublisher {
    /// Replaces the state and notifies observers. A no-op once the controller
    /// is torn down or when `next` equals the current value.
    fn publish(&self, next: ProfileUiState) -> bool {
        self.tx.send_if_modified(|state| {
            if self.closed.load(Ordering::SeqCst) || *state == next {
                return false;
            }
            *state = next;
            true
        })
    }
}

async fn fetch_profile<S: ProfileSource>(source: S, publisher: StatePublisher) {
    // Reset explicitly so a repeated attempt always passes through Loading.
    publisher.publish(ProfileUiState::Loading);

    let next = ProfileUiState::from(source.get_profile().await);
    publisher.publish(next);
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
