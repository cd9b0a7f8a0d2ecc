//! # readertask
//!
//! Two small composition patterns:
//!
//! - **Ordering as a monoid**: single-field [`Comparator`]s are lifted with
//!   `contramap`, flipped with `reverse` and folded into priority orders
//!   ([`ord`]).
//! - **Deferred dependencies**: a [`ReaderTask`] is an async computation that
//!   asks for its environment only when it is run, so business code composes
//!   capability calls without ever threading dependencies by hand
//!   ([`reader_task`], [`profile`]).
//!
//! ## Quick Example
//!
//! ```rust
//! use std::sync::Arc;
//! use readertask::profile::{update_customer_profile, Deps, UpdateProfileRequest, UserId};
//! use readertask::testing::{InMemoryProfileStore, RecordingNotifier};
//!
//! # tokio_test::block_on(async {
//! // Build the program first; no dependency is needed yet
//! let program = update_customer_profile(UpdateProfileRequest::new(1, "foo", "b@x.com"));
//!
//! // Supply the environment once, at the edge
//! let store = Arc::new(InMemoryProfileStore::new().with_profile(UserId(1), "foo", "a@x.com"));
//! let deps = Deps::new(store.clone(), Arc::new(RecordingNotifier::new()));
//!
//! assert_eq!(program.run(&deps).await, Ok(true));
//! assert_eq!(store.profile(UserId(1)).unwrap().email, "b@x.com");
//! # });
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod monoid;
pub mod ord;
pub mod profile;
pub mod reader_task;
pub mod semigroup;
pub mod testing;

// Re-exports
pub use monoid::Monoid;
pub use ord::Comparator;
pub use reader_task::ReaderTask;
pub use semigroup::Semigroup;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::monoid::{fold, fold_all, Monoid};
    pub use crate::ord::{combine, contramap, reverse, sort_by, Comparator};
    pub use crate::reader_task::ReaderTask;
    pub use crate::semigroup::Semigroup;
}
