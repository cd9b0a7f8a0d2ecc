//! Composable total orders
//!
//! A [`Comparator`] is a shareable, pure function from a pair of values to an
//! [`Ordering`]. Comparators over single fields are lifted to whole records with
//! [`Comparator::contramap`], flipped with [`Comparator::reverse`] and chained
//! into priority orders through their [`Semigroup`] / [`Monoid`] instances: the
//! first comparator is the primary key and every following one only breaks ties
//! left by the ones before it.
//!
//! # Examples
//!
//! ```
//! use readertask::ord::{combine, sort_by, Comparator};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct User {
//!     name: String,
//!     age: u32,
//! }
//!
//! let by_name = Comparator::<String>::natural().contramap(|u: &User| &u.name);
//! let by_age = Comparator::<u32>::natural().contramap(|u: &User| &u.age);
//!
//! let users = vec![
//!     User { name: "Guido".into(), age: 47 },
//!     User { name: "Guido".into(), age: 46 },
//!     User { name: "Giulio".into(), age: 44 },
//! ];
//!
//! let sorted = sort_by(&combine(by_name, [by_age]), users);
//! let ages: Vec<u32> = sorted.iter().map(|u| u.age).collect();
//! assert_eq!(ages, vec![44, 46, 47]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::monoid::{fold, Monoid};
use crate::Semigroup;

type CompareFn<'a, A> = Arc<dyn Fn(&A, &A) -> Ordering + Send + Sync + 'a>;

/// A total order over values of type `A`.
///
/// Comparators are expected to be reflexive, antisymmetric and transitive. The
/// combinators in this module only sequence existing comparators, so they keep
/// those properties; they do not guard against comparators that break them.
///
/// The lifetime `'a` bounds whatever the comparison function captures and
/// lets `A` borrow, so a `Comparator<'_, &User>` can sort a view over local
/// records. Cloning is cheap: the comparison function is shared.
pub struct Comparator<'a, A: ?Sized> {
    compare_fn: CompareFn<'a, A>,
}

impl<A: ?Sized> Clone for Comparator<'_, A> {
    fn clone(&self) -> Self {
        Comparator {
            compare_fn: Arc::clone(&self.compare_fn),
        }
    }
}

impl<A: ?Sized> fmt::Debug for Comparator<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comparator")
            .field("compare_fn", &"<function>")
            .finish()
    }
}

impl<'a, A: ?Sized + 'a> Comparator<'a, A> {
    /// Wrap a comparison function.
    ///
    /// ```
    /// use std::cmp::Ordering;
    /// use readertask::ord::Comparator;
    ///
    /// let by_len = Comparator::new(|a: &str, b: &str| a.len().cmp(&b.len()));
    /// assert_eq!(by_len.compare("ab", "c"), Ordering::Greater);
    /// ```
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&A, &A) -> Ordering + Send + Sync + 'a,
    {
        Comparator {
            compare_fn: Arc::new(f),
        }
    }

    /// The comparator that considers every pair equal.
    ///
    /// This is the identity of [`Semigroup::combine`] for comparators.
    pub fn identity() -> Self {
        Comparator::new(|_: &A, _: &A| Ordering::Equal)
    }

    /// Compare two values.
    #[inline]
    pub fn compare(&self, a: &A, b: &A) -> Ordering {
        (self.compare_fn)(a, b)
    }

    /// Lift this comparator to a record type through a field projection.
    ///
    /// The projection runs on both arguments before delegating; no other
    /// work is added.
    pub fn contramap<B, P>(self, project: P) -> Comparator<'a, B>
    where
        B: ?Sized + 'a,
        P: Fn(&B) -> &A + Send + Sync + 'a,
    {
        Comparator::new(move |a: &B, b: &B| self.compare(project(a), project(b)))
    }

    /// The same order with less and greater swapped. Ties stay ties.
    pub fn reverse(self) -> Self {
        Comparator::new(move |a: &A, b: &A| self.compare(a, b).reverse())
    }

    /// `true` when the two values compare equal.
    pub fn equals(&self, a: &A, b: &A) -> bool {
        self.compare(a, b) == Ordering::Equal
    }

    /// `true` when `a` sorts strictly before `b`.
    pub fn lt(&self, a: &A, b: &A) -> bool {
        self.compare(a, b) == Ordering::Less
    }

    /// `true` when `a` sorts strictly after `b`.
    pub fn gt(&self, a: &A, b: &A) -> bool {
        self.compare(a, b) == Ordering::Greater
    }

    /// The smaller of two values; `a` on ties.
    pub fn min<'v>(&self, a: &'v A, b: &'v A) -> &'v A {
        if self.gt(a, b) {
            b
        } else {
            a
        }
    }

    /// The larger of two values; `a` on ties.
    pub fn max<'v>(&self, a: &'v A, b: &'v A) -> &'v A {
        if self.lt(a, b) {
            b
        } else {
            a
        }
    }

    /// Restrict `value` to the inclusive range `low..=high`.
    pub fn clamp<'v>(&self, value: &'v A, low: &'v A, high: &'v A) -> &'v A {
        self.min(self.max(value, low), high)
    }

    /// `true` when `low <= value <= high` under this order.
    pub fn between(&self, value: &A, low: &A, high: &A) -> bool {
        !(self.lt(value, low) || self.gt(value, high))
    }
}

impl<'a, A: Ord + ?Sized + 'a> Comparator<'a, A> {
    /// The order given by `A`'s [`Ord`] implementation.
    pub fn natural() -> Self {
        Comparator::new(<A as Ord>::cmp)
    }

    /// Natural order of a field reached through `project`.
    ///
    /// Shorthand for `Comparator::<K>::natural().contramap(project)`.
    ///
    /// ```
    /// use readertask::ord::Comparator;
    ///
    /// let by_first = Comparator::by(|pair: &(i32, &'static str)| &pair.0);
    /// assert!(by_first.lt(&(1, "z"), &(2, "a")));
    /// ```
    pub fn by<B, P>(project: P) -> Comparator<'a, B>
    where
        B: ?Sized + 'a,
        P: Fn(&B) -> &A + Send + Sync + 'a,
    {
        Comparator::<A>::natural().contramap(project)
    }
}

impl<'a, A: 'a> Comparator<'a, A> {
    /// Natural order of a key computed from each value.
    ///
    /// The key is recomputed on every comparison, like [`slice::sort_by_key`].
    pub fn by_key<K, P>(key: P) -> Self
    where
        K: Ord,
        P: Fn(&A) -> K + Send + Sync + 'a,
    {
        Comparator::new(move |a: &A, b: &A| key(a).cmp(&key(b)))
    }

    /// Stable sort of `items` under this order.
    pub fn sort<I>(&self, items: I) -> Vec<A>
    where
        I: IntoIterator<Item = A>,
    {
        let mut sorted: Vec<A> = items.into_iter().collect();
        sorted.sort_by(|a, b| self.compare(a, b));
        sorted
    }
}

/// Priority combination: `self` decides unless it reports a tie, then `other`.
///
/// `other` is only consulted on ties.
impl<'a, A: ?Sized + 'a> Semigroup for Comparator<'a, A> {
    fn combine(self, other: Self) -> Self {
        Comparator::new(move |a: &A, b: &A| {
            self.compare(a, b).then_with(|| other.compare(a, b))
        })
    }
}

impl<'a, A: ?Sized + 'a> Monoid for Comparator<'a, A> {
    fn empty() -> Self {
        Comparator::identity()
    }
}

/// Lift `cmp` to a record type through `project`.
pub fn contramap<'a, A, B, P>(project: P, cmp: Comparator<'a, A>) -> Comparator<'a, B>
where
    A: ?Sized + 'a,
    B: ?Sized + 'a,
    P: Fn(&B) -> &A + Send + Sync + 'a,
{
    cmp.contramap(project)
}

/// Swap less and greater.
pub fn reverse<'a, A: ?Sized + 'a>(cmp: Comparator<'a, A>) -> Comparator<'a, A> {
    cmp.reverse()
}

/// Build a priority order from a primary comparator and tie-breakers.
///
/// Tie-breakers are tried left to right and the first non-equal answer wins.
/// With no tie-breakers the result orders exactly like `primary`.
pub fn combine<'a, A, I>(primary: Comparator<'a, A>, tiebreakers: I) -> Comparator<'a, A>
where
    A: ?Sized + 'a,
    I: IntoIterator<Item = Comparator<'a, A>>,
{
    fold(primary, tiebreakers)
}

/// Stable sort: elements that compare equal keep their input order.
pub fn sort_by<'a, A, I>(cmp: &Comparator<'a, A>, items: I) -> Vec<A>
where
    A: 'a,
    I: IntoIterator<Item = A>,
{
    cmp.sort(items)
}
