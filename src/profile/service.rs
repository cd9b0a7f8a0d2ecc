//! The update-profile operation, written against capabilities only

use std::sync::Arc;

use tracing::debug;

use super::{HasNotifier, HasProfileStore, ProfileError, UpdateProfileRequest, UserId};
use crate::ReaderTask;

/// Read the stored email of `user_id`.
pub fn get_email<Env>(user_id: UserId) -> ReaderTask<String, ProfileError, Env>
where
    Env: HasProfileStore + Sync + 'static,
{
    ReaderTask::from_capability(move |env: &Env| env.profile_store().get_email(user_id))
}

/// Persist the name and email carried by `request`.
pub fn update_profile<Env>(request: &UpdateProfileRequest) -> ReaderTask<(), ProfileError, Env>
where
    Env: HasProfileStore + Sync + 'static,
{
    let user_id = request.user_id;
    let name = request.name.clone();
    let email = request.email.clone();
    ReaderTask::from_capability(move |env: &Env| {
        env.profile_store()
            .update_profile(user_id, name.clone(), email.clone())
    })
}

/// Notify the owner of `old_email` that the address changed to `new_email`.
pub fn send_email_changed_notification<Env>(
    new_email: String,
    old_email: String,
) -> ReaderTask<(), ProfileError, Env>
where
    Env: HasNotifier + Sync + 'static,
{
    ReaderTask::from_capability(move |env: &Env| {
        env.notifier()
            .send_email_changed_notification(new_email.clone(), old_email.clone())
    })
}

/// Update a customer's profile, notifying the old address if the email changed.
///
/// Yields `true` when a notification was sent. The stored profile is always
/// written before the notification decision is acted on, and no notification
/// is sent when the email is unchanged. Any capability failure ends the run
/// with that error and skips the remaining steps.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use readertask::profile::{update_customer_profile, Deps, UpdateProfileRequest, UserId};
/// use readertask::testing::{InMemoryProfileStore, RecordingNotifier};
///
/// # tokio_test::block_on(async {
/// let store = Arc::new(InMemoryProfileStore::new().with_profile(UserId(1), "foo", "a@x.com"));
/// let notifier = Arc::new(RecordingNotifier::new());
/// let deps = Deps::new(store.clone(), notifier.clone());
///
/// let program = update_customer_profile(UpdateProfileRequest::new(1, "foo", "b@x.com"));
///
/// assert_eq!(program.run(&deps).await, Ok(true));
/// assert_eq!(notifier.sent(), vec![("b@x.com".to_string(), "a@x.com".to_string())]);
/// # });
/// ```
pub fn update_customer_profile<Env>(
    request: UpdateProfileRequest,
) -> ReaderTask<bool, ProfileError, Env>
where
    Env: HasProfileStore + HasNotifier + Sync + 'static,
{
    let request = Arc::new(request);
    get_email(request.user_id)
        .and_then(move |old_email| {
            let request = Arc::clone(&request);
            update_profile(&request).and_then(move |()| {
                if request.email != old_email {
                    debug!(user_id = %request.user_id, "email changed, notifying old address");
                    send_email_changed_notification(request.email.clone(), old_email.clone())
                        .map(|()| true)
                } else {
                    debug!(user_id = %request.user_id, "email unchanged");
                    ReaderTask::pure(false)
                }
            })
        })
        .named("update_customer_profile")
}
