//! HTTP transport abstraction
//!
//! The client talks to the remote API through the [`Transport`] trait so
//! tests can script responses. [`UreqTransport`] is the real implementation.

use crate::error::{HarmlessError, HarmlessResult};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A request to the remote API
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    /// Form fields sent as `application/x-www-form-urlencoded` (POST only)
    pub form: Vec<(String, String)>,
    /// Upper bound the transport may apply to the whole exchange
    pub timeout: Option<Duration>,
}

impl ApiRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            form: vec![],
            timeout: None,
        }
    }

    /// Create a POST request with form fields
    pub fn post(url: impl Into<String>, form: Vec<(String, String)>) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            form,
            timeout: None,
        }
    }

    /// Form field value by name
    pub fn field(&self, name: &str) -> Option<&str> {
        self.form
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response: status code and body text
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

/// Sends one request and waits for its response
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> HarmlessResult<ApiResponse>;
}

/// Blocking `ureq` agent driven from the tokio blocking pool
pub struct UreqTransport {
    agent: ureq::Agent,
    user_agent: String,
}

/// Extra time given to the blocking call so the caller's timeout fires first
const TRANSPORT_TIMEOUT_SLACK: Duration = Duration::from_secs(1);

impl UreqTransport {
    /// Create a transport that identifies itself as `user_agent`
    pub fn new(user_agent: impl Into<String>) -> Self {
        let config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build();

        Self {
            agent: ureq::Agent::new_with_config(config),
            user_agent: user_agent.into(),
        }
    }
}

fn transport_timeout(timeout: Option<Duration>) -> Option<Duration> {
    timeout.map(|t| t.saturating_add(TRANSPORT_TIMEOUT_SLACK))
}

#[async_trait]
impl Transport for UreqTransport {
    async fn send(&self, request: ApiRequest) -> HarmlessResult<ApiResponse> {
        let agent = self.agent.clone();
        let user_agent = self.user_agent.clone();
        let timeout = transport_timeout(request.timeout);

        debug!("{:?} {}", request.method, request.url);

        tokio::task::spawn_blocking(move || {
            let result = match request.method {
                Method::Get => agent
                    .get(&request.url)
                    .header("User-Agent", &user_agent)
                    .config()
                    .timeout_global(timeout)
                    .build()
                    .call(),
                Method::Post => agent
                    .post(&request.url)
                    .header("User-Agent", &user_agent)
                    .config()
                    .timeout_global(timeout)
                    .build()
                    .send_form(request.form.iter().map(|(k, v)| (k.as_str(), v.as_str()))),
            };

            let mut response = result.map_err(|e| HarmlessError::Transport(e.to_string()))?;
            let status = response.status().as_u16();
            let body = response
                .body_mut()
                .read_to_string()
                .map_err(|e| HarmlessError::Transport(e.to_string()))?;

            Ok(ApiResponse { status, body })
        })
        .await
        .map_err(|e| HarmlessError::Internal(format!("request task failed: {}", e)))?
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_builders() {
        let get = ApiRequest::get("https://www.reddit.com/by_id/t3_a.json");
        assert_eq!(get.method, Method::Get);
        assert!(get.form.is_empty());

        let post = ApiRequest::post(
            "https://www.reddit.com/api/save",
            vec![("id".to_string(), "t3_a".to_string())],
        );
        assert_eq!(post.method, Method::Post);
        assert_eq!(post.field("id"), Some("t3_a"));
        assert_eq!(post.field("uh"), None);
    }

    #[test]
    fn transport_timeout_adds_slack() {
        assert_eq!(transport_timeout(None), None);
        assert_eq!(
            transport_timeout(Some(Duration::from_secs(5))),
            Some(Duration::from_secs(6))
        );
        assert_eq!(
            transport_timeout(Some(Duration::from_secs(u64::MAX))),
            Some(Duration::MAX)
        );
    }
}
