//! Semigroup trait for associative operations
//!
//! A Semigroup is a type with an associative binary operation. Here it is the
//! glue for priority orderings: combining two orderings keeps the first one
//! unless it is a tie, in which case the second one decides.
//!
//! # Mathematical Properties
//!
//! For a type to be a valid Semigroup, the `combine` operation must be associative:
//! ```text
//! a.combine(b).combine(c) == a.combine(b.combine(c))
//! ```
//!
//! # Examples
//!
//! ```
//! use std::cmp::Ordering;
//! use readertask::Semigroup;
//!
//! // The first decisive ordering wins
//! assert_eq!(Ordering::Equal.combine(Ordering::Less), Ordering::Less);
//! assert_eq!(Ordering::Greater.combine(Ordering::Less), Ordering::Greater);
//! ```

use std::cmp::Ordering;

/// A type that supports an associative binary operation
///
/// # Laws
///
/// Implementations must satisfy the associativity law:
/// ```text
/// a.combine(b).combine(c) == a.combine(b.combine(c))
/// ```
///
/// # Note on Ownership
///
/// The `combine` method takes `self` by value. Clone first if you need to keep
/// the original values around.
pub trait Semigroup: Sized {
    /// Combine this value with another value associatively
    fn combine(self, other: Self) -> Self;
}

/// Lexicographic combination: `Equal` defers to `other`, anything else wins.
impl Semigroup for Ordering {
    #[inline]
    fn combine(self, other: Self) -> Self {
        self.then(other)
    }
}
