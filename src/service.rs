//! Inference backend reachability probe.
//!
//! A single bounded-timeout GET against the backend's tags endpoint. The
//! backend being down degrades the chat feature but must never block the
//! launch: the user sees the degraded state inside the application instead
//! of being stopped at the command line, so unreachability is always a
//! warning, never fatal.

use crate::outcome::StepOutcome;
use serde::Deserialize;
use std::time::Duration;

/// Network endpoint of the inference backend.
#[derive(Debug, Clone)]
pub struct ServiceEndpoint {
    /// Host name or address.
    pub host: String,

    /// TCP port.
    pub port: u16,

    /// Read-only health/status path queried by the probe.
    pub health_path: String,
}

impl ServiceEndpoint {
    /// The default local Ollama endpoint.
    pub fn ollama_default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 11434,
            health_path: "/api/tags".to_string(),
        }
    }

    /// Full probe URL.
    pub fn url(&self) -> String {
        format!("http://{}:{}{}", self.host, self.port, self.health_path)
    }
}

/// Classified result of one reachability probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceHealth {
    /// Connection accepted and a non-error status returned.
    Reachable {
        /// Model names the backend reported, if the payload was parseable.
        models: Vec<String>,
    },

    /// Connection refused, timed out, or an error status returned.
    Unreachable { reason: String },
}

/// Tags-endpoint payload. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    name: String,
}

/// Probe the endpoint once with a bounded timeout.
pub fn probe(endpoint: &ServiceEndpoint, timeout: Duration) -> ServiceHealth {
    let client = match reqwest::blocking::Client::builder()
        .user_agent("gantry")
        .timeout(timeout)
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            return ServiceHealth::Unreachable {
                reason: e.to_string(),
            }
        }
    };

    let response = match client.get(endpoint.url()).send() {
        Ok(response) => response,
        Err(e) => {
            return ServiceHealth::Unreachable {
                reason: e.to_string(),
            }
        }
    };

    if !response.status().is_success() {
        return ServiceHealth::Unreachable {
            reason: format!("status {}", response.status()),
        };
    }

    // A reachable backend with an unparseable payload is still reachable.
    let models = response
        .json::<TagsResponse>()
        .map(|tags| tags.models.into_iter().map(|m| m.name).collect())
        .unwrap_or_default();

    ServiceHealth::Reachable { models }
}

/// Probe the endpoint and fold the result into a step outcome.
///
/// Unreachability is a warning. A reachable backend that does not list the
/// expected model is also a warning: the application starts either way and
/// surfaces the gap itself.
pub fn probe_outcome(endpoint: &ServiceEndpoint, timeout: Duration, model: &str) -> StepOutcome {
    match probe(endpoint, timeout) {
        ServiceHealth::Reachable { models } => {
            if models.iter().any(|name| name.contains(model)) {
                tracing::info!("service reachable, model '{}' available", model);
                StepOutcome::Success
            } else {
                StepOutcome::Warning(format!(
                    "service reachable but model '{model}' not found (available: {})",
                    if models.is_empty() {
                        "none".to_string()
                    } else {
                        models.join(", ")
                    }
                ))
            }
        }
        ServiceHealth::Unreachable { reason } => {
            tracing::warn!("service not detected: {}", reason);
            StepOutcome::Warning(format!("service not detected at {}", endpoint.url()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn endpoint_for(server: &MockServer) -> ServiceEndpoint {
        ServiceEndpoint {
            host: server.host(),
            port: server.port(),
            health_path: "/api/tags".to_string(),
        }
    }

    fn timeout() -> Duration {
        Duration::from_millis(800)
    }

    #[test]
    fn endpoint_url_is_well_formed() {
        let endpoint = ServiceEndpoint::ollama_default();
        assert_eq!(endpoint.url(), "http://localhost:11434/api/tags");
    }

    #[test]
    fn reachable_backend_lists_models() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/tags");
            then.status(200).json_body(json!({
                "models": [{"name": "llama2:latest"}, {"name": "mistral:7b"}]
            }));
        });

        let health = probe(&endpoint_for(&server), timeout());
        assert_eq!(
            health,
            ServiceHealth::Reachable {
                models: vec!["llama2:latest".to_string(), "mistral:7b".to_string()]
            }
        );
    }

    #[test]
    fn error_status_is_unreachable() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/tags");
            then.status(500);
        });

        let health = probe(&endpoint_for(&server), timeout());
        assert!(matches!(health, ServiceHealth::Unreachable { .. }));
    }

    #[test]
    fn connection_refused_is_unreachable() {
        // Port 9 (discard) is almost never listening locally
        let endpoint = ServiceEndpoint {
            host: "127.0.0.1".to_string(),
            port: 9,
            health_path: "/api/tags".to_string(),
        };
        let health = probe(&endpoint, timeout());
        assert!(matches!(health, ServiceHealth::Unreachable { .. }));
    }

    #[test]
    fn unparseable_payload_is_still_reachable() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/tags");
            then.status(200).body("not json");
        });

        let health = probe(&endpoint_for(&server), timeout());
        assert_eq!(health, ServiceHealth::Reachable { models: vec![] });
    }

    #[test]
    fn probe_outcome_success_when_model_present() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/tags");
            then.status(200)
                .json_body(json!({"models": [{"name": "llama2:latest"}]}));
        });

        let outcome = probe_outcome(&endpoint_for(&server), timeout(), "llama2");
        assert_eq!(outcome, StepOutcome::Success);
    }

    #[test]
    fn probe_outcome_warns_when_model_missing() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/tags");
            then.status(200)
                .json_body(json!({"models": [{"name": "mistral:7b"}]}));
        });

        let outcome = probe_outcome(&endpoint_for(&server), timeout(), "llama2");
        assert!(outcome.is_warning());
        assert!(outcome.reason().unwrap().contains("llama2"));
    }

    #[test]
    fn probe_outcome_warns_when_unreachable() {
        let endpoint = ServiceEndpoint {
            host: "127.0.0.1".to_string(),
            port: 9,
            health_path: "/api/tags".to_string(),
        };
        let outcome = probe_outcome(&endpoint, timeout(), "llama2");
        assert!(outcome.is_warning());
        // Never fatal: the launch must proceed regardless
        assert!(outcome.can_proceed());
    }
}
