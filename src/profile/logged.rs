//! Logging decorator for capabilities

use futures::future::{BoxFuture, FutureExt};
use tracing::info;

use super::{Notifier, ProfileError, ProfileStore, UserId};

/// Wraps a capability implementation and logs every call through `tracing`.
///
/// The wrapped implementation still does all the work; results and errors
/// pass through unchanged. Before a profile update the current email is read
/// through the wrapped store, so a change of address shows up in the log. If
/// that lookup fails the update is logged without it.
///
/// ```
/// use readertask::profile::{Logged, ProfileStore, UserId};
/// use readertask::testing::InMemoryProfileStore;
///
/// # tokio_test::block_on(async {
/// let store = Logged::new(InMemoryProfileStore::new().with_profile(UserId(1), "foo", "a@x.com"));
/// assert_eq!(store.get_email(UserId(1)).await, Ok("a@x.com".to_string()));
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct Logged<C> {
    inner: C,
}

impl<C> Logged<C> {
    /// Wrap `inner`.
    pub fn new(inner: C) -> Self {
        Logged { inner }
    }

    /// The wrapped implementation.
    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: ProfileStore> ProfileStore for Logged<C> {
    fn get_email(&self, user_id: UserId) -> BoxFuture<'_, Result<String, ProfileError>> {
        async move {
            let email = self.inner.get_email(user_id).await?;
            info!("getting email for {}: {}", user_id, email);
            Ok(email)
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
            match self.inner.get_email(user_id).await {
                Ok(current) if current != email => info!(
                    %user_id,
                    %name,
                    "updating profile and changing email from {} to {}",
                    current,
                    email
                ),
                _ => info!(%user_id, %name, %email, "updating profile"),
            }
            self.inner.update_profile(user_id, name, email).await
        }
        .boxed()
    }
}

impl<C: Notifier> Notifier for Logged<C> {
    fn send_email_changed_notification(
        &self,
        new_email: String,
        old_email: String,
    ) -> BoxFuture<'_, Result<(), ProfileError>> {
        async move {
            info!(%old_email, "sending change notification to {}", new_email);
            self.inner
                .send_email_changed_notification(new_email, old_email)
                .await
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tracing_test::traced_test;

    use super::*;
    use crate::profile::{update_customer_profile, Deps, UpdateProfileRequest};
    use crate::testing::{InMemoryProfileStore, RecordingNotifier};

    #[tokio::test]
    #[traced_test]
    async fn test_logs_each_capability_call() {
        let deps = Deps::new(
            Arc::new(Logged::new(
                InMemoryProfileStore::new().with_profile(UserId(1), "foo", "a@x.com"),
            )),
            Arc::new(Logged::new(RecordingNotifier::new())),
        );

        let program = update_customer_profile(UpdateProfileRequest::new(1, "foo", "b@x.com"));
        assert_eq!(program.run(&deps).await, Ok(true));

        assert!(logs_contain("getting email for 1: a@x.com"));
        assert!(logs_contain(
            "updating profile and changing email from a@x.com to b@x.com"
        ));
        assert!(logs_contain("sending change notification to b@x.com"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_unchanged_email_is_not_reported_as_change() {
        let deps = Deps::new(
            Arc::new(Logged::new(
                InMemoryProfileStore::new().with_profile(UserId(1), "foo", "a@x.com"),
            )),
            Arc::new(Logged::new(RecordingNotifier::new())),
        );

        let program = update_customer_profile(UpdateProfileRequest::new(1, "bar", "a@x.com"));
        assert_eq!(program.run(&deps).await, Ok(false));

        assert!(logs_contain("updating profile"));
        assert!(!logs_contain("changing email"));
        assert!(!logs_contain("sending change notification"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_update_of_unknown_user_still_logged_and_fails() {
        let store = Logged::new(InMemoryProfileStore::new());

        assert_eq!(
            store
                .update_profile(UserId(9), "foo".into(), "b@x.com".into())
                .await,
            Err(ProfileError::NotFound(UserId(9)))
        );
        assert!(logs_contain("updating profile"));
        assert!(!logs_contain("changing email"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_errors_pass_through() {
        let store = Logged::new(
            InMemoryProfileStore::new().fail_reads_with(ProfileError::Storage("offline".into())),
        );

        assert_eq!(
            store.get_email(UserId(1)).await,
            Err(ProfileError::Storage("offline".into()))
        );
        assert_eq!(store.inner().reads(), 1);
        assert!(!logs_contain("getting email for"));
    }
}
