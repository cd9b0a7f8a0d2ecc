//! Customer profile updates with injected dependencies
//!
//! The operation needs two capabilities, storage ([`ProfileStore`]) and
//! notification ([`Notifier`]). It is written entirely as a [`ReaderTask`]
//! over any environment that provides both, so the concrete implementations
//! are chosen once, by whoever calls `run`.
//!
//! ```
//! use std::sync::Arc;
//! use readertask::profile::{update_customer_profile, Deps, Logged, UpdateProfileRequest, UserId};
//! use readertask::testing::{InMemoryProfileStore, RecordingNotifier};
//!
//! # tokio_test::block_on(async {
//! let deps = Deps::new(
//!     Arc::new(Logged::new(InMemoryProfileStore::new().with_profile(UserId(1), "foo", "a@x.com"))),
//!     Arc::new(Logged::new(RecordingNotifier::new())),
//! );
//!
//! // Same email: stored, but nobody is notified
//! let program = update_customer_profile(UpdateProfileRequest::new(1, "bar", "a@x.com"));
//! assert_eq!(program.run(&deps).await, Ok(false));
//! # });
//! ```
//!
//! [`ReaderTask`]: crate::ReaderTask

mod capability;
mod error;
mod logged;
mod request;
mod service;

pub use capability::{Deps, HasNotifier, HasProfileStore, Notifier, ProfileStore};
pub use error::ProfileError;
pub use logged::Logged;
pub use request::{UpdateProfileRequest, UserId};
pub use service::{
    get_email, send_email_changed_notification, update_customer_profile, update_profile,
};
