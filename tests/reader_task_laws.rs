//! Property-based tests for the ReaderTask composition laws

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use proptest::prelude::*;
use readertask::ReaderTask;

type Task = ReaderTask<i64, String, i64>;

fn add_env(x: i64) -> Task {
    ReaderTask::asks(move |env: &i64| x.wrapping_add(*env))
}

fn double_unless_multiple_of_three(x: i64) -> Task {
    if x % 3 == 0 {
        ReaderTask::fail(format!("multiple of three: {}", x))
    } else {
        ReaderTask::pure(x.wrapping_mul(2))
    }
}

fn run(task: &Task, env: i64) -> Result<i64, String> {
    tokio_test::block_on(task.run(&env))
}

fn arb_task() -> impl Strategy<Value = Task> {
    prop_oneof![
        any::<i64>().prop_map(Task::pure),
        "[a-z]{1,8}".prop_map(Task::fail),
        any::<i64>().prop_map(|k| Task::asks(move |env: &i64| env.wrapping_sub(k))),
    ]
}

proptest! {
    #[test]
    fn prop_left_identity(x in any::<i64>(), env in any::<i64>()) {
        let left = Task::pure(x).and_then(add_env);
        prop_assert_eq!(run(&left, env), run(&add_env(x), env));
    }

    #[test]
    fn prop_right_identity(m in arb_task(), env in any::<i64>()) {
        let left = m.clone().and_then(Task::pure);
        prop_assert_eq!(run(&left, env), run(&m, env));
    }

    #[test]
    fn prop_associativity(m in arb_task(), env in any::<i64>()) {
        let left = m
            .clone()
            .and_then(add_env)
            .and_then(double_unless_multiple_of_three);
        let right = m.and_then(|x| add_env(x).and_then(double_unless_multiple_of_three));
        prop_assert_eq!(run(&left, env), run(&right, env));
    }

    #[test]
    fn prop_map_identity(m in arb_task(), env in any::<i64>()) {
        let mapped = m.clone().map(|x| x);
        prop_assert_eq!(run(&mapped, env), run(&m, env));
    }

    #[test]
    fn prop_map_composition(m in arb_task(), env in any::<i64>()) {
        let twice = m.clone().map(|x| x.wrapping_add(1)).map(|x| x.wrapping_mul(3));
        let once = m.map(|x| x.wrapping_add(1).wrapping_mul(3));
        prop_assert_eq!(run(&twice, env), run(&once, env));
    }

    #[test]
    fn prop_failure_short_circuits(msg in "[a-z]{1,8}", env in any::<i64>()) {
        let reached = Arc::new(AtomicUsize::new(0));
        let reached_clone = Arc::clone(&reached);
        let task = Task::fail(msg.clone()).and_then(move |x| {
            reached_clone.fetch_add(1, Ordering::SeqCst);
            Task::pure(x)
        });

        prop_assert_eq!(run(&task, env), Err(msg));
        prop_assert_eq!(reached.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn prop_each_run_repeats_effects(runs in 1usize..8) {
        let counter = Arc::new(AtomicUsize::new(0));
        let task = ReaderTask::<usize, String, Arc<AtomicUsize>>::from_fn(|counter| {
            Ok(counter.fetch_add(1, Ordering::SeqCst))
        })
        .map(|previous| previous + 1);

        for expected in 1..=runs {
            let result = tokio_test::block_on(task.run(&counter));
            prop_assert_eq!(result, Ok(expected));
        }
        prop_assert_eq!(counter.load(Ordering::SeqCst), runs);
    }
}
