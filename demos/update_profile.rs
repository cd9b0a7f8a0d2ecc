//! Running the update-profile program against logged in-memory capabilities
//!
//! Run with: cargo run --example update_profile

use std::sync::Arc;

use readertask::profile::{
    update_customer_profile, Deps, Logged, ProfileError, UpdateProfileRequest, UserId,
};
use readertask::testing::{InMemoryProfileStore, RecordingNotifier};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let deps = Deps::new(
        Arc::new(Logged::new(
            InMemoryProfileStore::new()
                .with_profile(UserId(1), "foo", "a@x.com")
                .with_profile(UserId(2), "bar", "c@x.com"),
        )),
        Arc::new(Logged::new(RecordingNotifier::new())),
    );

    // Nothing runs until the environment is supplied
    let change_email = update_customer_profile(UpdateProfileRequest::new(1, "foo", "b@x.com"));
    let rename_only = update_customer_profile(UpdateProfileRequest::new(2, "baz", "c@x.com"));

    tracing::info!("Changing email");
    report(change_email.run(&deps).await);

    tracing::info!("Renaming without changing email");
    report(rename_only.run(&deps).await);

    // The same program composes with itself; the second run sees the first write
    tracing::info!("Running the email change twice in one program");
    let again = change_email.clone();
    let twice = change_email.and_then(move |first| again.clone().map(move |second| (first, second)));
    match twice.run(&deps).await {
        Ok((first, second)) => {
            tracing::info!("Notified on first run: {}, on second run: {}", first, second)
        }
        Err(e) => tracing::error!("Program failed: {}", e),
    }

    tracing::info!("Updating an unknown user");
    report(
        update_customer_profile(UpdateProfileRequest::new(42, "nobody", "n@x.com"))
            .run(&deps)
            .await,
    );
}

fn report(result: Result<bool, ProfileError>) {
    match result {
        Ok(true) => tracing::info!("Profile updated, old address notified"),
        Ok(false) => tracing::info!("Profile updated, email unchanged"),
        Err(e) => tracing::error!("Program failed: {}", e),
    }
}
