// src/client.rs

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::errors::{ClientError, Result};
use crate::transport::Dispatcher;

/// Opaque bearer token returned by registration or login. Not persisted;
/// passed explicitly on every authenticated call.
#[derive(Debug, Clone)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// How often `calculate` re-polls a pending submission, and how long it
/// waits before giving up with a `Timeout` error.
#[derive(Debug, Clone)]
pub struct PollPolicy {
    pub interval: Duration,
    pub deadline: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(100),
            deadline: Duration::from_secs(30),
        }
    }
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct CalculateRequest<'a> {
    expression: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

#[derive(Deserialize)]
struct SubmitResponse {
    id: i64,
}

/// One observation of a submission's state, as reported by the
/// `/expressions/{id}` endpoint. `status == false` with an absent `result`
/// is the pending state; both fields settle together on resolution.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExpressionState {
    pub status: bool,
    #[serde(default)]
    pub result: Option<f64>,
}

/// Client for the remote calculation orchestrator. Owns the submit → poll
/// lifecycle of an expression; all validation of inputs is delegated to the
/// remote service.
pub struct CalcClient {
    dispatcher: Dispatcher,
    poll: PollPolicy,
}

impl CalcClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_policy(endpoint, PollPolicy::default())
    }

    pub fn with_policy(endpoint: impl Into<String>, poll: PollPolicy) -> Self {
        Self {
            dispatcher: Dispatcher::new(endpoint),
            poll,
        }
    }

    /// Registers a new user and returns the session credential.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Credential> {
        let body = RegisterRequest {
            username,
            email,
            password,
        };
        let resp = self.dispatcher.send("/auth/register", Some(&body), None).await?;
        let token: TokenResponse = resp.json().await?;
        Ok(Credential::new(token.token))
    }

    /// Logs an existing user in and returns the session credential.
    pub async fn login(&self, username: &str, password: &str) -> Result<Credential> {
        let body = LoginRequest { username, password };
        let resp = self.dispatcher.send("/auth/login", Some(&body), None).await?;
        let token: TokenResponse = resp.json().await?;
        Ok(Credential::new(token.token))
    }

    /// Submits an expression for evaluation and waits for its result.
    ///
    /// Two phases: the submit POST yields a submission id, then the id is
    /// polled at the configured interval until the server marks it resolved.
    /// The wait is bounded by the poll deadline and raises `Timeout` when it
    /// lapses. A classified error in either phase aborts the whole call; a
    /// submission already created server-side is abandoned, not cleaned up.
    pub async fn calculate(&self, expression: &str, credential: &Credential) -> Result<f64> {
        self.calculate_with_cancel(expression, credential, &CancellationToken::new())
            .await
    }

    /// Same as [`calculate`](Self::calculate), but the poll phase also stops
    /// with `Cancelled` as soon as `cancel` is triggered.
    pub async fn calculate_with_cancel(
        &self,
        expression: &str,
        credential: &Credential,
        cancel: &CancellationToken,
    ) -> Result<f64> {
        let body = CalculateRequest { expression };
        let resp = self
            .dispatcher
            .send("/calculate", Some(&body), Some(credential.as_str()))
            .await?;
        let submitted: SubmitResponse = resp.json().await?;
        log::info!("expression submitted, id={}", submitted.id);

        self.wait_for_result(submitted.id, credential, cancel).await
    }

    /// Fetches the current state of a submission by id. One round trip, no
    /// waiting; polling an already-resolved id returns the same state every
    /// time.
    pub async fn expression(&self, id: i64, credential: &Credential) -> Result<ExpressionState> {
        let path = format!("/expressions/{}", id);
        let resp = self
            .dispatcher
            .send(&path, None::<&()>, Some(credential.as_str()))
            .await?;
        Ok(resp.json().await?)
    }

    async fn wait_for_result(
        &self,
        id: i64,
        credential: &Credential,
        cancel: &CancellationToken,
    ) -> Result<f64> {
        let started = Instant::now();

        loop {
            let state = self.expression(id, credential).await?;
            if state.status {
                // status=true with no result would break the server contract
                return state.result.ok_or_else(|| {
                    ClientError::UnexpectedResponse(format!(
                        "submission {} resolved without a result",
                        id
                    ))
                });
            }

            if started.elapsed() >= self.poll.deadline {
                return Err(ClientError::Timeout(self.poll.deadline));
            }

            tokio::select! {
                _ = cancel.cancelled() => return Err(ClientError::Cancelled),
                _ = tokio::time::sleep(self.poll.interval) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_poll_policy() {
        let policy = PollPolicy::default();
        assert_eq!(policy.interval, Duration::from_millis(100));
        assert_eq!(policy.deadline, Duration::from_secs(30));
    }

    #[test]
    fn test_expression_state_pending_decodes_without_result() {
        let state: ExpressionState = serde_json::from_str(r#"{"status": false}"#).unwrap();
        assert!(!state.status);
        assert_eq!(state.result, None);
    }

    #[test]
    fn test_expression_state_resolved() {
        let state: ExpressionState =
            serde_json::from_str(r#"{"status": true, "result": 6.0}"#).unwrap();
        assert!(state.status);
        assert_eq!(state.result, Some(6.0));
    }
}
