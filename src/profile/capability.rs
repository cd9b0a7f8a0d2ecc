//! Capabilities needed by the profile operation
//!
//! Each capability is a plain trait whose methods return a boxed future. The
//! operation never names an implementation; it reaches them through the
//! `Has*` accessor traits on whatever environment it is run with.

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;

use super::{ProfileError, UserId};

/// Profile storage.
pub trait ProfileStore: Send + Sync {
    /// Fetch the email currently stored for `user_id`.
    fn get_email(&self, user_id: UserId) -> BoxFuture<'_, Result<String, ProfileError>>;

    /// Persist a new name and email for `user_id`.
    fn update_profile(
        &self,
        user_id: UserId,
        name: String,
        email: String,
    ) -> BoxFuture<'_, Result<(), ProfileError>>;
}

/// Outgoing notifications.
pub trait Notifier: Send + Sync {
    /// Tell the user their address moved from `old_email` to `new_email`.
    fn send_email_changed_notification(
        &self,
        new_email: String,
        old_email: String,
    ) -> BoxFuture<'_, Result<(), ProfileError>>;
}

/// An environment that can hand out a [`ProfileStore`].
pub trait HasProfileStore {
    /// The store to use for this run.
    fn profile_store(&self) -> &dyn ProfileStore;
}

/// An environment that can hand out a [`Notifier`].
pub trait HasNotifier {
    /// The notifier to use for this run.
    fn notifier(&self) -> &dyn Notifier;
}

/// The stock environment: one store and one notifier.
///
/// Cloning shares both implementations.
#[derive(Clone)]
pub struct Deps {
    /// Profile storage
    pub db: Arc<dyn ProfileStore>,
    /// Notification sender
    pub email: Arc<dyn Notifier>,
}

impl Deps {
    /// Bundle a store and a notifier.
    pub fn new(db: Arc<dyn ProfileStore>, email: Arc<dyn Notifier>) -> Self {
        Deps { db, email }
    }
}

impl fmt::Debug for Deps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deps")
            .field("db", &"<ProfileStore>")
            .field("email", &"<Notifier>")
            .finish()
    }
}

impl HasProfileStore for Deps {
    fn profile_store(&self) -> &dyn ProfileStore {
        self.db.as_ref()
    }
}

impl HasNotifier for Deps {
    fn notifier(&self) -> &dyn Notifier {
        self.email.as_ref()
    }
}
