//! Deferred-dependency async computations
//!
//! This module provides [`ReaderTask`], a computation that needs an environment
//! of capability implementations before it can produce its asynchronous effect.
//! Composition with [`map`](ReaderTask::map) and [`and_then`](ReaderTask::and_then)
//! never touches the environment; it is supplied exactly once, at the edge, by
//! [`run`](ReaderTask::run).
//!
//! # Core Concepts
//!
//! - **Deferred binding**: business logic is written against capabilities it
//!   reads from `Env`, without knowing which implementation it will get
//! - **Lazy**: nothing happens until the future returned by `run` is awaited
//! - **Repeatable**: a task is a description, so running it twice performs its
//!   effects twice; no result is cached
//! - **Short-circuiting**: the first `Err` stops the chain and is returned as is
//!
//! # Examples
//!
//! ## Basic usage
//!
//! ```
//! use readertask::ReaderTask;
//!
//! # tokio_test::block_on(async {
//! let task = ReaderTask::<_, String, ()>::pure(5)
//!     .map(|x| x * 2)
//!     .and_then(|x| ReaderTask::pure(x + 10));
//!
//! assert_eq!(task.run(&()).await, Ok(20));
//! # });
//! ```
//!
//! ## Reading the environment
//!
//! ```
//! use readertask::ReaderTask;
//!
//! # tokio_test::block_on(async {
//! struct Env {
//!     multiplier: i32,
//! }
//!
//! let task = ReaderTask::<_, String, Env>::asks(|env: &Env| env.multiplier)
//!     .and_then(|m| ReaderTask::from_fn(move |_: &Env| Ok(m * 2)));
//!
//! assert_eq!(task.run(&Env { multiplier: 21 }).await, Ok(42));
//! # });
//! ```

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt};
use tracing::Instrument;

/// Function type for ReaderTask internals
type RunFn<T, E, Env> =
    Arc<dyn for<'a> Fn(&'a Env) -> BoxFuture<'a, Result<T, E>> + Send + Sync>;

/// A computation that needs an environment to produce an async result
///
/// `ReaderTask<T, E, Env>` wraps a single function `&Env -> future of Result<T, E>`.
/// It is immutable once built; every combinator returns a new task that shares
/// the functions of the tasks it was built from.
///
/// # Type Parameters
///
/// * `T` - The type of the success value
/// * `E` - The type of the error value (defaults to `std::convert::Infallible`)
/// * `Env` - The type of the environment (defaults to `()`)
pub struct ReaderTask<T, E = std::convert::Infallible, Env = ()> {
    run_fn: RunFn<T, E, Env>,
}

impl<T, E, Env> Clone for ReaderTask<T, E, Env> {
    fn clone(&self) -> Self {
        ReaderTask {
            run_fn: Arc::clone(&self.run_fn),
        }
    }
}

impl<T, E, Env> fmt::Debug for ReaderTask<T, E, Env> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReaderTask")
            .field("run_fn", &"<function>")
            .finish()
    }
}

impl<T, E, Env> ReaderTask<T, E, Env>
where
    T: Send + 'static,
    E: Send + 'static,
    Env: Sync + 'static,
{
    /// Lift a capability call into a task
    ///
    /// `selector` picks a capability out of the environment and invokes it. It
    /// is called once per run, with the environment given to `run`.
    ///
    /// # Examples
    ///
    /// ```
    /// use futures::future::{BoxFuture, FutureExt};
    /// use readertask::ReaderTask;
    ///
    /// struct Clock;
    ///
    /// impl Clock {
    ///     fn now(&self) -> BoxFuture<'_, Result<u64, String>> {
    ///         async { Ok(1_700_000_000) }.boxed()
    ///     }
    /// }
    ///
    /// struct Env {
    ///     clock: Clock,
    /// }
    ///
    /// # tokio_test::block_on(async {
    /// let task = ReaderTask::from_capability(|env: &Env| env.clock.now());
    /// assert_eq!(task.run(&Env { clock: Clock }).await, Ok(1_700_000_000));
    /// # });
    /// ```
    pub fn from_capability<F>(selector: F) -> Self
    where
        F: for<'a> Fn(&'a Env) -> BoxFuture<'a, Result<T, E>> + Send + Sync + 'static,
    {
        ReaderTask {
            run_fn: Arc::new(selector),
        }
    }

    /// Create a task that ignores the environment and succeeds with `value`
    ///
    /// The value is cloned on every run. This is the identity of `and_then`.
    ///
    /// # Examples
    ///
    /// ```
    /// use readertask::ReaderTask;
    ///
    /// # tokio_test::block_on(async {
    /// let task = ReaderTask::<_, String, ()>::pure(42);
    /// assert_eq!(task.run(&()).await, Ok(42));
    /// # });
    /// ```
    pub fn pure(value: T) -> Self
    where
        T: Clone + Sync,
    {
        ReaderTask::from_capability(move |_: &Env| future::ready(Ok(value.clone())).boxed())
    }

    /// Create a task that always fails with `error`
    ///
    /// # Examples
    ///
    /// ```
    /// use readertask::ReaderTask;
    ///
    /// # tokio_test::block_on(async {
    /// let task = ReaderTask::<i32, _, ()>::fail("error");
    /// assert_eq!(task.run(&()).await, Err("error"));
    /// # });
    /// ```
    pub fn fail(error: E) -> Self
    where
        E: Clone + Sync,
    {
        ReaderTask::from_capability(move |_: &Env| future::ready(Err(error.clone())).boxed())
    }

    /// Create from a synchronous function of the environment
    ///
    /// `f` runs when the future returned by `run` is first polled.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&Env) -> Result<T, E> + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        ReaderTask::from_capability(move |env: &Env| {
            let f = Arc::clone(&f);
            async move { f(env) }.boxed()
        })
    }

    /// Create from an async function whose future owns its data
    ///
    /// # Examples
    ///
    /// ```
    /// use readertask::ReaderTask;
    ///
    /// # tokio_test::block_on(async {
    /// let task = ReaderTask::from_async(|_: &()| async { Ok::<_, String>(42) });
    /// assert_eq!(task.run(&()).await, Ok(42));
    /// # });
    /// ```
    pub fn from_async<F, Fut>(f: F) -> Self
    where
        F: Fn(&Env) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        ReaderTask::from_capability(move |env: &Env| f(env).boxed())
    }

    /// Query a value out of the environment
    pub fn asks<F>(f: F) -> Self
    where
        F: Fn(&Env) -> T + Send + Sync + 'static,
    {
        ReaderTask::from_fn(move |env: &Env| Ok(f(env)))
    }

    /// Transform the success value
    ///
    /// The upstream task runs once per run; `f` only sees its result.
    ///
    /// # Examples
    ///
    /// ```
    /// use readertask::ReaderTask;
    ///
    /// # tokio_test::block_on(async {
    /// let task = ReaderTask::<_, String, ()>::pure(5).map(|x| x * 2);
    /// assert_eq!(task.run(&()).await, Ok(10));
    /// # });
    /// ```
    pub fn map<U, F>(self, f: F) -> ReaderTask<U, E, Env>
    where
        F: Fn(T) -> U + Send + Sync + 'static,
        U: Send + 'static,
    {
        let inner = self.run_fn;
        let f = Arc::new(f);
        ReaderTask::from_capability(move |env: &Env| {
            let inner = Arc::clone(&inner);
            let f = Arc::clone(&f);
            async move { inner(env).await.map(|value| f(value)) }.boxed()
        })
    }

    /// Chain a dependent task
    ///
    /// Runs `self`, feeds its value to `f`, then runs the resulting task against
    /// the same environment. The second task never starts before the first one
    /// has finished, and a failure of the first one skips `f` entirely.
    ///
    /// # Examples
    ///
    /// ```
    /// use readertask::ReaderTask;
    ///
    /// # tokio_test::block_on(async {
    /// let task = ReaderTask::<_, String, ()>::pure(5)
    ///     .and_then(|x| ReaderTask::pure(x * 2));
    /// assert_eq!(task.run(&()).await, Ok(10));
    ///
    /// let task = ReaderTask::<i32, _, ()>::fail("error".to_string())
    ///     .and_then(|x| ReaderTask::pure(x * 2));
    /// assert_eq!(task.run(&()).await, Err("error".to_string()));
    /// # });
    /// ```
    pub fn and_then<U, F>(self, f: F) -> ReaderTask<U, E, Env>
    where
        F: Fn(T) -> ReaderTask<U, E, Env> + Send + Sync + 'static,
        U: Send + 'static,
    {
        let inner = self.run_fn;
        let f = Arc::new(f);
        ReaderTask::from_capability(move |env: &Env| {
            let inner = Arc::clone(&inner);
            let f = Arc::clone(&f);
            async move {
                let value = inner(env).await?;
                let next = f(value);
                (next.run_fn)(env).await
            }
            .boxed()
        })
    }

    /// Transform the error value
    pub fn map_err<E2, F>(self, f: F) -> ReaderTask<T, E2, Env>
    where
        F: Fn(E) -> E2 + Send + Sync + 'static,
        E2: Send + 'static,
    {
        let inner = self.run_fn;
        let f = Arc::new(f);
        ReaderTask::from_capability(move |env: &Env| {
            let inner = Arc::clone(&inner);
            let f = Arc::clone(&f);
            async move { inner(env).await.map_err(|err| f(err)) }.boxed()
        })
    }

    /// Recover from errors
    ///
    /// If the task fails, `f` builds a replacement task from the error, which
    /// runs against the same environment.
    pub fn or_else<F>(self, f: F) -> Self
    where
        F: Fn(E) -> ReaderTask<T, E, Env> + Send + Sync + 'static,
    {
        let inner = self.run_fn;
        let f = Arc::new(f);
        ReaderTask::from_capability(move |env: &Env| {
            let inner = Arc::clone(&inner);
            let f = Arc::clone(&f);
            async move {
                match inner(env).await {
                    Ok(value) => Ok(value),
                    Err(err) => {
                        let recovery = f(err);
                        (recovery.run_fn)(env).await
                    }
                }
            }
            .boxed()
        })
    }

    /// Run a side task on the success value and keep the original value
    ///
    /// If the side task fails, the whole task fails.
    pub fn tap<F>(self, f: F) -> Self
    where
        F: Fn(&T) -> ReaderTask<(), E, Env> + Send + Sync + 'static,
    {
        let inner = self.run_fn;
        let f = Arc::new(f);
        ReaderTask::from_capability(move |env: &Env| {
            let inner = Arc::clone(&inner);
            let f = Arc::clone(&f);
            async move {
                let value = inner(env).await?;
                let side = f(&value);
                (side.run_fn)(env).await?;
                Ok(value)
            }
            .boxed()
        })
    }

    /// Run this task under an environment derived from a wider one
    ///
    /// `f` builds the inner environment once per run.
    ///
    /// # Examples
    ///
    /// ```
    /// use readertask::ReaderTask;
    ///
    /// # tokio_test::block_on(async {
    /// struct Outer {
    ///     base: i32,
    /// }
    ///
    /// let inner = ReaderTask::<_, String, i32>::asks(|n: &i32| n * 2);
    /// let task = inner.local(|outer: &Outer| outer.base + 1);
    /// assert_eq!(task.run(&Outer { base: 20 }).await, Ok(42));
    /// # });
    /// ```
    pub fn local<Env2, F>(self, f: F) -> ReaderTask<T, E, Env2>
    where
        Env: Send,
        Env2: Sync + 'static,
        F: Fn(&Env2) -> Env + Send + Sync + 'static,
    {
        let inner = self.run_fn;
        let f = Arc::new(f);
        ReaderTask::from_capability(move |outer: &Env2| {
            let inner = Arc::clone(&inner);
            let f = Arc::clone(&f);
            async move {
                let env = f(outer);
                inner(&env).await
            }
            .boxed()
        })
    }

    /// Run every execution of this task inside `span`
    pub fn instrument(self, span: tracing::Span) -> Self {
        let inner = self.run_fn;
        ReaderTask::from_capability(move |env: &Env| {
            let inner = Arc::clone(&inner);
            let span = span.clone();
            async move { inner(env).instrument(span).await }.boxed()
        })
    }

    /// Run every execution of this task inside a fresh `reader_task` span tagged with `name`
    pub fn named(self, name: &'static str) -> Self {
        let inner = self.run_fn;
        ReaderTask::from_capability(move |env: &Env| {
            let inner = Arc::clone(&inner);
            let span = tracing::debug_span!("reader_task", task = name);
            async move { inner(env).instrument(span).await }.boxed()
        })
    }

    /// Bind the environment and return the async effect
    ///
    /// The returned future does nothing until it is awaited. Calling `run`
    /// again, with the same or another environment, starts an independent
    /// execution.
    ///
    /// # Examples
    ///
    /// ```
    /// use readertask::ReaderTask;
    ///
    /// # tokio_test::block_on(async {
    /// let task = ReaderTask::<_, String, ()>::pure(42);
    /// let pending = task.run(&());
    /// assert_eq!(pending.await, Ok(42));
    /// # });
    /// ```
    pub fn run<'a>(&self, env: &'a Env) -> BoxFuture<'a, Result<T, E>> {
        let run_fn = Arc::clone(&self.run_fn);
        async move { run_fn(env).await }.boxed()
    }
}

impl<E, Env> ReaderTask<Env, E, Env>
where
    E: Send + 'static,
    Env: Clone + Send + Sync + 'static,
{
    /// Get a clone of the whole environment
    pub fn ask() -> Self {
        ReaderTask::from_fn(|env: &Env| Ok(env.clone()))
    }
}
