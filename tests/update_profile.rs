//! Integration tests for the update-profile operation
//!
//! Each test owns its environment; the doubles keep their state per instance.

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use readertask::profile::{
    update_customer_profile, Deps, HasNotifier, HasProfileStore, Notifier, ProfileError,
    ProfileStore, UpdateProfileRequest, UserId,
};
use readertask::testing::{InMemoryProfileStore, Profile, RecordingNotifier};

fn fixture(email: &str) -> (Arc<InMemoryProfileStore>, Arc<RecordingNotifier>, Deps) {
    let store = Arc::new(InMemoryProfileStore::new().with_profile(UserId(1), "foo", email));
    let notifier = Arc::new(RecordingNotifier::new());
    let deps = Deps::new(store.clone(), notifier.clone());
    (store, notifier, deps)
}

#[tokio::test]
async fn changed_email_updates_and_notifies() {
    let (store, notifier, deps) = fixture("a@x.com");
    let program = update_customer_profile(UpdateProfileRequest::new(1, "foo", "b@x.com"));

    assert_eq!(program.run(&deps).await, Ok(true));
    assert_eq!(
        store.profile(UserId(1)),
        Some(Profile {
            name: "foo".to_string(),
            email: "b@x.com".to_string()
        })
    );
    assert_eq!(
        notifier.sent(),
        vec![("b@x.com".to_string(), "a@x.com".to_string())]
    );
}

#[tokio::test]
async fn unchanged_email_updates_without_notifying() {
    let (store, notifier, deps) = fixture("a@x.com");
    let program = update_customer_profile(UpdateProfileRequest::new(1, "bar", "a@x.com"));

    assert_eq!(program.run(&deps).await, Ok(false));
    assert_eq!(store.writes(), 1);
    assert_eq!(store.profile(UserId(1)).map(|p| p.name), Some("bar".to_string()));
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn building_the_program_touches_nothing() {
    let (store, notifier, _deps) = fixture("a@x.com");
    let _program = update_customer_profile::<Deps>(UpdateProfileRequest::new(1, "foo", "b@x.com"));

    assert_eq!(store.reads(), 0);
    assert_eq!(store.writes(), 0);
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn running_twice_repeats_every_effect() {
    let (store, notifier, deps) = fixture("a@x.com");
    let program = update_customer_profile(UpdateProfileRequest::new(1, "foo", "b@x.com"));

    let first = program.run(&deps).await;
    let second = program.run(&deps).await;

    // the second run sees the email written by the first one
    assert_eq!(first, Ok(true));
    assert_eq!(second, Ok(false));
    assert_eq!(store.reads(), 2);
    assert_eq!(store.writes(), 2);
    assert_eq!(notifier.sent().len(), 1);
}

#[tokio::test]
async fn program_chained_with_itself() {
    let (store, notifier, deps) = fixture("a@x.com");
    let program = update_customer_profile(UpdateProfileRequest::new(1, "foo", "b@x.com"));
    let again = program.clone();
    let both = program.and_then(move |notified| again.clone().map(move |n2| notified || n2));

    assert_eq!(both.run(&deps).await, Ok(true));
    assert_eq!(store.writes(), 2);
    assert_eq!(notifier.sent().len(), 1);
}

#[tokio::test]
async fn read_failure_stops_before_update() {
    let store = Arc::new(
        InMemoryProfileStore::new()
            .with_profile(UserId(1), "foo", "a@x.com")
            .fail_reads_with(ProfileError::Storage("offline".into())),
    );
    let notifier = Arc::new(RecordingNotifier::new());
    let deps = Deps::new(store.clone(), notifier.clone());

    let program = update_customer_profile(UpdateProfileRequest::new(1, "foo", "b@x.com"));

    assert_eq!(
        program.run(&deps).await,
        Err(ProfileError::Storage("offline".into()))
    );
    assert_eq!(store.writes(), 0);
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn write_failure_stops_before_notification() {
    let store = Arc::new(
        InMemoryProfileStore::new()
            .with_profile(UserId(1), "foo", "a@x.com")
            .fail_writes_with(ProfileError::Storage("read-only".into())),
    );
    let notifier = Arc::new(RecordingNotifier::new());
    let deps = Deps::new(store.clone(), notifier.clone());

    let program = update_customer_profile(UpdateProfileRequest::new(1, "foo", "b@x.com"));

    assert_eq!(
        program.run(&deps).await,
        Err(ProfileError::Storage("read-only".into()))
    );
    assert_eq!(store.profile(UserId(1)).map(|p| p.email), Some("a@x.com".to_string()));
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn notification_failure_is_returned_after_update() {
    let store = Arc::new(InMemoryProfileStore::new().with_profile(UserId(1), "foo", "a@x.com"));
    let notifier = Arc::new(
        RecordingNotifier::new().failing_with(ProfileError::Notification("smtp down".into())),
    );
    let deps = Deps::new(store.clone(), notifier.clone());

    let program = update_customer_profile(UpdateProfileRequest::new(1, "foo", "b@x.com"));

    assert_eq!(
        program.run(&deps).await,
        Err(ProfileError::Notification("smtp down".into()))
    );
    assert_eq!(store.profile(UserId(1)).map(|p| p.email), Some("b@x.com".to_string()));
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let (_store, notifier, deps) = fixture("a@x.com");
    let program = update_customer_profile(UpdateProfileRequest::new(42, "foo", "b@x.com"));

    assert_eq!(
        program.run(&deps).await,
        Err(ProfileError::NotFound(UserId(42)))
    );
    assert!(notifier.sent().is_empty());
}

// Any environment exposing the two capabilities works, not just `Deps`.

struct FixedStore;

impl ProfileStore for FixedStore {
    fn get_email(&self, _user_id: UserId) -> BoxFuture<'_, Result<String, ProfileError>> {
        async { Ok("fixed@x.com".to_string()) }.boxed()
    }

    fn update_profile(
        &self,
        _user_id: UserId,
        _name: String,
        _email: String,
    ) -> BoxFuture<'_, Result<(), ProfileError>> {
        async { Ok(()) }.boxed()
    }
}

struct AppEnv {
    store: FixedStore,
    notifier: RecordingNotifier,
}

impl HasProfileStore for AppEnv {
    fn profile_store(&self) -> &dyn ProfileStore {
        &self.store
    }
}

impl HasNotifier for AppEnv {
    fn notifier(&self) -> &dyn Notifier {
        &self.notifier
    }
}

#[tokio::test]
async fn custom_environment() {
    let env = AppEnv {
        store: FixedStore,
        notifier: RecordingNotifier::new(),
    };

    let program = update_customer_profile(UpdateProfileRequest::new(5, "foo", "new@x.com"));

    assert_eq!(program.run(&env).await, Ok(true));
    assert_eq!(
        env.notifier.sent(),
        vec![("new@x.com".to_string(), "fixed@x.com".to_string())]
    );
}
