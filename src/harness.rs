// src/harness.rs

use crate::errors::{ClientError, ErrorKind, Result};

/// Pass/attempt tally for one scenario group. A plain value, reset by
/// constructing a fresh one per group; nestable (a suite-level counter plus
/// local counters for sub-groups). Groups run strictly sequentially, so no
/// synchronization is needed.
#[derive(Debug, Default, Clone)]
pub struct Counter {
    attempted: u32,
    passed: u32,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_attempt(&mut self) {
        self.attempted += 1;
    }

    pub fn record_pass(&mut self) {
        self.passed += 1;
    }

    /// Returns `(passed, attempted)`.
    pub fn snapshot(&self) -> (u32, u32) {
        (self.passed, self.attempted)
    }

    pub fn all_passed(&self) -> bool {
        self.passed == self.attempted
    }

    pub fn none_passed(&self) -> bool {
        self.passed == 0
    }

    /// Folds a sub-group's tally into a parent counter.
    pub fn absorb(&mut self, other: &Counter) {
        self.attempted += other.attempted;
        self.passed += other.passed;
    }
}

/// What a scenario expects from one client call. Scenarios inspect the
/// returned `Result` against this predicate instead of treating any error
/// as a catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    /// The call must succeed.
    Success,
    /// The call must fail, with any error.
    Rejection,
    /// The call must fail with this specific classified kind.
    Kind(ErrorKind),
}

impl Expect {
    pub fn satisfied_by<T>(&self, outcome: &Result<T>) -> bool {
        match (self, outcome) {
            (Expect::Success, Ok(_)) => true,
            (Expect::Rejection, Err(_)) => true,
            (Expect::Kind(kind), Err(e)) => e.kind() == *kind,
            _ => false,
        }
    }
}

/// Records one assertion against `counter`: an attempt always, a pass when
/// the outcome satisfies the expectation. Prints the labeled verdict line
/// and returns whether the assertion passed.
pub fn check<T>(counter: &mut Counter, label: &str, expect: Expect, outcome: &Result<T>) -> bool {
    counter.record_attempt();
    if expect.satisfied_by(outcome) {
        counter.record_pass();
        pass(label);
        true
    } else {
        match outcome {
            Err(e) => fail_with(label, e),
            Ok(_) => fail(label),
        }
        false
    }
}

pub fn pass(label: &str) {
    println!("✅ {}", label);
}

pub fn fail(label: &str) {
    println!("❌ {}", label);
}

pub fn fail_with(label: &str, err: &ClientError) {
    println!("❌ {}: {}", label, err);
}

pub fn partial(label: &str) {
    println!("⚠️  {}", label);
}

/// Bold section header between scenario groups.
pub fn section(title: &str) {
    let separator = "=".repeat(60);
    println!("\n{}", separator);
    println!("\x1b[1m{}\x1b[0m", title);
    println!("{}", separator);
}

/// Prints the group's closing `passed/attempted` ratio line.
pub fn ratio(counter: &Counter) {
    let (passed, attempted) = counter.snapshot();
    println!("Passed: ({}/{})\n", passed, attempted);
}
