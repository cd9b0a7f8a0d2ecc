//! Test doubles for the profile capabilities
//!
//! Every double owns its state, so each test builds its own environment and
//! nothing leaks between tests. Failures can be injected per operation to
//! exercise the short-circuit paths of a task.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use readertask::profile::{Deps, ProfileError, UserId};
//! use readertask::testing::{InMemoryProfileStore, RecordingNotifier};
//!
//! let store = Arc::new(
//!     InMemoryProfileStore::new()
//!         .with_profile(UserId(1), "foo", "a@x.com")
//!         .fail_writes_with(ProfileError::Storage("read-only".into())),
//! );
//! let deps = Deps::new(store.clone(), Arc::new(RecordingNotifier::new()));
//! assert_eq!(store.writes(), 0);
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use futures::future::{BoxFuture, FutureExt};

use crate::profile::{Notifier, ProfileError, ProfileStore, UserId};

/// A stored profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
}

/// A [`ProfileStore`] backed by a map, counting reads and writes.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: Mutex<HashMap<UserId, Profile>>,
    reads: AtomicUsize,
    writes: AtomicUsize,
    read_failure: Option<ProfileError>,
    write_failure: Option<ProfileError>,
}

impl InMemoryProfileStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a profile.
    pub fn with_profile(
        mut self,
        user_id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        self.profiles
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                user_id,
                Profile {
                    name: name.into(),
                    email: email.into(),
                },
            );
        self
    }

    /// Make every `get_email` call fail with `error`.
    pub fn fail_reads_with(mut self, error: ProfileError) -> Self {
        self.read_failure = Some(error);
        self
    }

    /// Make every `update_profile` call fail with `error`.
    pub fn fail_writes_with(mut self, error: ProfileError) -> Self {
        self.write_failure = Some(error);
        self
    }

    /// The profile currently stored for `user_id`.
    pub fn profile(&self, user_id: UserId) -> Option<Profile> {
        self.profiles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&user_id)
            .cloned()
    }

    /// Number of `get_email` calls so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of `update_profile` calls so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn get_email(&self, user_id: UserId) -> BoxFuture<'_, Result<String, ProfileError>> {
        async move {
            self.reads.fetch_add(1, Ordering::SeqCst);
            if let Some(err) = &self.read_failure {
                return Err(err.clone());
            }
            self.profile(user_id)
                .map(|profile| profile.email)
                .ok_or(ProfileError::NotFound(user_id))
        }
        .boxed()
    }

    fn update_profile(
        &self,
        user_id: UserId,
        name: String,
        email: String,
    ) -> BoxFuture<'_, Result<(), ProfileError>> {
        async move {
            self.writes.fetch_add(1, Ordering::SeqCst);
            if let Some(err) = &self.write_failure {
                return Err(err.clone());
            }
            let mut profiles = self.profiles.lock().unwrap_or_else(PoisonError::into_inner);
            match profiles.get_mut(&user_id) {
                Some(profile) => {
                    *profile = Profile { name, email };
                    Ok(())
                }
                None => Err(ProfileError::NotFound(user_id)),
            }
        }
        .boxed()
    }
}

/// A [`Notifier`] that records `(new_email, old_email)` pairs instead of sending.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, String)>>,
    failure: Option<ProfileError>,
}

impl RecordingNotifier {
    /// A notifier that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every send fail with `error`. Failed sends are not recorded.
    pub fn failing_with(mut self, error: ProfileError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Notifications sent so far, oldest first.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn send_email_changed_notification(
        &self,
        new_email: String,
        old_email: String,
    ) -> BoxFuture<'_, Result<(), ProfileError>> {
        async move {
            if let Some(err) = &self.failure {
                return Err(err.clone());
            }
            self.sent
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push((new_email, old_email));
            Ok(())
        }
        .boxed()
    }
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
impl Arbitrary for crate::profile::UpdateProfileRequest {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        (
            any::<u64>(),
            "[A-Z][a-z]{1,10}",
            "[a-z]{1,8}@[a-z]{1,6}\\.com",
        )
            .prop_map(|(id, name, email)| {
                crate::profile::UpdateProfileRequest::new(UserId(id), name, email)
            })
            .boxed()
    }
}
