//! Sorting records with comparators built from single fields
//!
//! Run with: cargo run --example sort_users

use readertask::prelude::*;

#[derive(Debug, Clone)]
struct User {
    id: u32,
    name: String,
    age: u32,
    remember_me: bool,
}

fn user(id: u32, name: &str, age: u32, remember_me: bool) -> User {
    User {
        id,
        name: name.to_string(),
        age,
        remember_me,
    }
}

fn print_users(title: &str, users: &[User]) {
    println!("{}", title);
    for u in users {
        println!(
            "  #{} {:<7} age {:>2} remember_me={}",
            u.id, u.name, u.age, u.remember_me
        );
    }
    println!();
}

fn main() {
    let users = vec![
        user(1, "Guido", 47, false),
        user(2, "Guido", 46, true),
        user(3, "Giulio", 44, false),
        user(4, "Giulio", 44, true),
    ];

    let by_name = Comparator::by(|u: &User| &u.name);
    let by_age = Comparator::by(|u: &User| &u.age);
    let by_remember_me = Comparator::by(|u: &User| &u.remember_me);

    // name, then age, then remember_me
    let priority = combine(
        by_name.clone(),
        [by_age.clone(), by_remember_me.clone()],
    );
    print_users(
        "By name, age, remember_me:",
        &sort_by(&priority, users.clone()),
    );

    // users who asked to be remembered first, then by name and age
    let remembered_first = combine(reverse(by_remember_me), [by_name.clone(), by_age]);
    print_users(
        "Remembered first, then name and age:",
        &sort_by(&remembered_first, users.clone()),
    );

    // equal names keep their input order
    print_users("By name only (stable):", &sort_by(&by_name, users));

    // plain values use their natural order
    let ages = Comparator::<u32>::natural();
    println!("clamp(50, 18..=47) = {}", ages.clamp(&50, &18, &47));
    println!("between(44, 18..=47) = {}", ages.between(&44, &18, &47));
}
