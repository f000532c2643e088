// src/scenarios.rs

use uuid::Uuid;

use crate::client::{CalcClient, Credential};
use crate::errors::ErrorKind;
use crate::harness::{self, check, Counter, Expect};

/// The account a conformance run registers and reuses across groups.
/// Generated fresh per run so reruns against a persistent service don't
/// collide with earlier registrations.
#[derive(Debug, Clone)]
pub struct ScenarioIdentity {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl ScenarioIdentity {
    pub fn random() -> Self {
        let tag = Uuid::new_v4().simple().to_string();
        Self {
            username: format!("user_{}", &tag[..8]),
            email: format!("{}@{}.com", &tag[..8], &tag[8..14]),
            password: "password123".to_string(),
        }
    }
}

/// Registration group: happy path, empty username, duplicate username.
/// A happy-path failure aborts the group early since the remaining
/// assertions depend on the account existing.
pub async fn registration_suite(client: &CalcClient, identity: &ScenarioIdentity) -> Counter {
    harness::section("Registration");
    let mut c = Counter::new();

    let outcome = client
        .register(&identity.username, &identity.email, &identity.password)
        .await;
    if !check(
        &mut c,
        "registration accepted for a fresh username",
        Expect::Success,
        &outcome,
    ) {
        harness::ratio(&c);
        return c;
    }

    let outcome = client
        .register("", &identity.email, &identity.password)
        .await;
    check(
        &mut c,
        "empty username rejected",
        Expect::Kind(ErrorKind::BadRequest),
        &outcome,
    );

    let outcome = client
        .register(&identity.username, &identity.email, &identity.password)
        .await;
    check(
        &mut c,
        "duplicate registration rejected",
        Expect::Rejection,
        &outcome,
    );

    harness::ratio(&c);
    c
}

/// Login group: happy path, wrong password, nonexistent user.
pub async fn login_suite(client: &CalcClient, identity: &ScenarioIdentity) -> Counter {
    harness::section("Login");
    let mut c = Counter::new();

    let outcome = client.login(&identity.username, &identity.password).await;
    if !check(
        &mut c,
        "login accepted with correct credentials",
        Expect::Success,
        &outcome,
    ) {
        harness::ratio(&c);
        return c;
    }

    let outcome = client.login(&identity.username, "wrongpassword").await;
    check(
        &mut c,
        "wrong password rejected",
        Expect::Kind(ErrorKind::Unauthorized),
        &outcome,
    );

    let outcome = client.login("nonexistentuser", &identity.password).await;
    check(
        &mut c,
        "nonexistent user rejected",
        Expect::Rejection,
        &outcome,
    );

    harness::ratio(&c);
    c
}

const COMPOUND_EXPRESSIONS: &[(&str, f64)] = &[
    ("(5+3)*2-4/2", 14.0),
    ("2+2*2+2/2", 7.0),
    ("(8+2*5)/(2+3)", 3.6),
    ("3*3/(2+1)-1", 2.0),
    ("10-2*3+4/2", 6.0),
];

const INVALID_EXPRESSIONS: &[&str] =
    &["2++2", "2+2*", "(2+2", "2+2)", "2 $ 2", "2+2/0", "a+b*2"];

const RESULT_TOLERANCE: f64 = 1e-9;

/// Calculation group: one simple expression, a compound battery with
/// partial reporting, a list of invalid expressions all expected rejected,
/// and an unauthenticated call. Logs in with the run identity first; the
/// whole group is skipped if that login fails.
pub async fn calculation_suite(client: &CalcClient, identity: &ScenarioIdentity) -> Counter {
    harness::section("Calculation");
    let mut c = Counter::new();

    let credential = match client.login(&identity.username, &identity.password).await {
        Ok(credential) => credential,
        Err(e) => {
            c.record_attempt();
            harness::fail_with("login before calculation", &e);
            harness::ratio(&c);
            return c;
        }
    };

    simple_expression(client, &credential, &mut c).await;
    compound_expressions(client, &credential, &mut c).await;
    invalid_expressions(client, &credential, &mut c).await;

    let outcome = client
        .calculate("2+2", &Credential::new("invalid_token"))
        .await;
    check(
        &mut c,
        "unauthenticated calculation rejected",
        Expect::Kind(ErrorKind::Unauthorized),
        &outcome,
    );

    harness::ratio(&c);
    c
}

async fn simple_expression(client: &CalcClient, credential: &Credential, c: &mut Counter) {
    c.record_attempt();
    match client.calculate("2+2*2", credential).await {
        Ok(result) if (result - 6.0).abs() < RESULT_TOLERANCE => {
            c.record_pass();
            harness::pass("2+2*2 resolved to 6");
        }
        Ok(result) => harness::fail(&format!("2+2*2 resolved to {} instead of 6", result)),
        Err(e) => harness::fail_with("2+2*2", &e),
    }
}

async fn compound_expressions(client: &CalcClient, credential: &Credential, c: &mut Counter) {
    let mut local = Counter::new();

    for (expression, expected) in COMPOUND_EXPRESSIONS {
        local.record_attempt();
        match client.calculate(expression, credential).await {
            Ok(result) if (result - expected).abs() < RESULT_TOLERANCE => local.record_pass(),
            Ok(result) => {
                println!("\t{} resolved to {}, expected {}", expression, result, expected)
            }
            Err(e) => println!("\t{} failed: {}", expression, e),
        }
    }

    if local.all_passed() {
        harness::pass("compound expressions resolved correctly");
    } else if local.none_passed() {
        harness::fail("no compound expression resolved correctly");
    } else {
        let (passed, attempted) = local.snapshot();
        harness::partial(&format!(
            "compound expressions partially correct ({}/{})",
            passed, attempted
        ));
    }

    c.absorb(&local);
}

async fn invalid_expressions(client: &CalcClient, credential: &Credential, c: &mut Counter) {
    let mut local = Counter::new();

    for expression in INVALID_EXPRESSIONS {
        local.record_attempt();
        let outcome = client.calculate(expression, credential).await;
        if Expect::Rejection.satisfied_by(&outcome) {
            local.record_pass();
        } else {
            println!("\t{} should have been rejected", expression);
        }
    }

    if local.all_passed() {
        harness::pass("invalid expressions rejected");
    } else if local.none_passed() {
        harness::fail("no invalid expression was rejected");
    } else {
        let (passed, attempted) = local.snapshot();
        harness::partial(&format!(
            "invalid expressions partially rejected ({}/{})",
            passed, attempted
        ));
    }

    c.absorb(&local);
}

/// Runs the whole battery in order and returns the aggregate tally.
pub async fn run_battery(client: &CalcClient) -> Counter {
    let identity = ScenarioIdentity::random();
    log::info!("running battery as {}", identity.username);

    let mut total = Counter::new();
    total.absorb(&registration_suite(client, &identity).await);
    total.absorb(&login_suite(client, &identity).await);
    total.absorb(&calculation_suite(client, &identity).await);
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_identity_is_unique_and_well_formed() {
        let a = ScenarioIdentity::random();
        let b = ScenarioIdentity::random();

        assert_ne!(a.username, b.username);
        assert!(a.username.starts_with("user_"));
        assert!(a.email.contains('@'));
        assert!(!a.password.is_empty());
    }
}
