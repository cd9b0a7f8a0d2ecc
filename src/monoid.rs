//! Monoid trait for types with identity elements
//!
//! A `Monoid` extends `Semigroup` with an identity element, which makes a whole
//! list of values foldable without a starting value. For orderings this is what
//! turns "primary key, then tie-breakers" into a plain fold.
//!
//! # Mathematical Properties
//!
//! 1. **Associativity** (from Semigroup):
//!    ```text
//!    a.combine(b).combine(c) == a.combine(b.combine(c))
//!    ```
//! 2. **Right Identity**: `a.combine(M::empty()) == a`
//! 3. **Left Identity**: `M::empty().combine(a) == a`
//!
//! # Examples
//!
//! ```
//! use std::cmp::Ordering;
//! use readertask::monoid::fold_all;
//!
//! let decided = fold_all([Ordering::Equal, Ordering::Greater, Ordering::Less]);
//! assert_eq!(decided, Ordering::Greater);
//!
//! let undecided: Ordering = fold_all(Vec::new());
//! assert_eq!(undecided, Ordering::Equal);
//! ```

use std::cmp::Ordering;

use crate::Semigroup;

/// A `Monoid` is a `Semigroup` with an identity element.
///
/// # Laws
///
/// ```text
/// a.combine(M::empty()) == a           (right identity)
/// M::empty().combine(a) == a           (left identity)
/// ```
pub trait Monoid: Semigroup {
    /// The identity element for this monoid.
    fn empty() -> Self;
}

impl Monoid for Ordering {
    fn empty() -> Self {
        Ordering::Equal
    }
}

/// Fold all values using the monoid's identity as the starting point.
///
/// An empty iterator yields `M::empty()`.
///
/// # Example
///
/// ```
/// use std::cmp::Ordering;
/// use readertask::monoid::fold_all;
///
/// let decided = fold_all(vec![Ordering::Equal, Ordering::Less]);
/// assert_eq!(decided, Ordering::Less);
/// ```
pub fn fold_all<M, I>(iter: I) -> M
where
    M: Monoid,
    I: IntoIterator<Item = M>,
{
    fold(M::empty(), iter)
}

/// Fold values onto an explicit first element.
///
/// Only needs a `Semigroup`: the first element plays the role of the start
/// value, so an empty iterator returns `initial` unchanged.
///
/// # Example
///
/// ```
/// use std::cmp::Ordering;
/// use readertask::monoid::fold;
///
/// assert_eq!(fold(Ordering::Equal, [Ordering::Greater, Ordering::Less]), Ordering::Greater);
/// assert_eq!(fold(Ordering::Less, []), Ordering::Less);
/// ```
pub fn fold<S, I>(initial: S, rest: I) -> S
where
    S: Semigroup,
    I: IntoIterator<Item = S>,
{
    rest.into_iter().fold(initial, |acc, x| acc.combine(x))
}
