//! HTTP client for the console data-structures API.
//!
//! Three remote operations: exchanging the API key for a bearer token,
//! submitting a validation request, and submitting a deployment
//! (promotion) request. Validation and promotion share one response
//! interpreter, which is the single source of truth for whether a remote
//! operation succeeded.

use anyhow::{anyhow, Context, Result};
use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::error;

use crate::config::Config;
use crate::schema::Deployment;

/// Data structure types the validation endpoint accepts.
pub const SCHEMA_TYPES: [&str; 2] = ["event", "entity"];

pub struct ConsoleClient {
    pub config: Config,
    client: Client,
}

impl ConsoleClient {
    pub fn new(config: Config) -> Self {
        ConsoleClient {
            config,
            client: Client::new(),
        }
    }

    /// Exchanges the API key for a short-lived bearer token.
    ///
    /// Any failure (unreachable host, non-JSON body, missing or
    /// non-string `accessToken`) collapses into a single error; the
    /// cause is carried only in the message. Callers branch on
    /// success/failure, never on cause.
    pub async fn get_token(&self) -> Result<String> {
        let url = format!("{}/credentials/v2/token", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .header("X-API-Key", &self.config.api_key)
            .send()
            .await
            .context("could not contact the console")?;
        let body: Value = response
            .json()
            .await
            .context("get_token: response was not valid JSON")?;
        match body.get("accessToken").and_then(Value::as_str) {
            Some(token) => Ok(token.to_string()),
            None => Err(anyhow!("get_token: invalid response body: {body}")),
        }
    }

    /// Submits a data structure for validation.
    ///
    /// Unless the document already carries a meta envelope
    /// (`contains_meta`), it is wrapped as
    /// `{meta: {hidden, schemaType, customData}, data: document}` before
    /// posting. An unknown `schema_type` fails before any I/O.
    pub async fn validate(
        &self,
        document: &Value,
        token: &str,
        schema_type: &str,
        contains_meta: bool,
    ) -> bool {
        if !SCHEMA_TYPES.contains(&schema_type) {
            error!("data structure type must be either \"event\" or \"entity\"");
            return false;
        }

        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct ValidationMeta<'a> {
            hidden: bool,
            schema_type: &'a str,
            custom_data: Value,
        }

        #[derive(Serialize)]
        struct ValidationRequest<'a> {
            meta: ValidationMeta<'a>,
            data: &'a Value,
        }

        let url = format!("{}/validation-requests", self.config.ds_url);
        let request = self.client.post(&url).bearer_auth(token);
        let request = if contains_meta {
            request.json(document)
        } else {
            request.json(&ValidationRequest {
                meta: ValidationMeta {
                    hidden: false,
                    schema_type,
                    custom_data: json!({}),
                },
                data: document,
            })
        };
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                error!("could not contact the console: {e}");
                return false;
            }
        };

        handle_response(response, "validation").await
    }

    /// Requests promotion of a validated data structure version.
    ///
    /// Moves validated → dev by default, dev → prod with `to_production`.
    /// `request_patch` asks the registry to patch the deployed version
    /// instead of creating a new one.
    pub async fn promote(
        &self,
        deployment: &Deployment,
        token: &str,
        message: &str,
        to_production: bool,
        request_patch: bool,
    ) -> bool {
        #[derive(Serialize)]
        struct DeploymentRequest<'a> {
            name: &'a str,
            vendor: &'a str,
            format: &'a str,
            version: String,
            source: &'a str,
            target: &'a str,
            message: &'a str,
        }

        let (source, target) = if to_production {
            ("DEV", "PROD")
        } else {
            ("VALIDATED", "DEV")
        };
        let payload = DeploymentRequest {
            name: &deployment.data_structure.name,
            vendor: &deployment.data_structure.vendor,
            format: &deployment.data_structure.format,
            version: deployment.version.to_string(),
            source,
            target,
            message,
        };

        let url = format!("{}/deployment-requests", self.config.ds_url);
        let response = match self
            .client
            .post(&url)
            .query(&[("patch", request_patch)])
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!("could not contact the console: {e}");
                return false;
            }
        };

        handle_response(response, "promotion").await
    }
}

/// Decides whether a validation or promotion response reports success.
pub async fn handle_response(response: Response, action: &str) -> bool {
    let status_ok = response.status().is_success();
    let body = response.text().await.unwrap_or_default();
    interpret_response(status_ok, &body, action)
}

fn interpret_response(status_ok: bool, body: &str, action: &str) -> bool {
    if !status_ok {
        error!("data structure {action} failed: {body}");
        return false;
    }
    match serde_json::from_str::<Value>(body) {
        Ok(parsed) => {
            let succeeded = parsed
                .as_object()
                .and_then(|object| object.get("success"))
                .map_or(false, is_truthy);
            if !succeeded {
                error!("data structure {action} failed: {parsed}");
            }
            succeeded
        }
        Err(_) => {
            error!("handle_response: response was not valid JSON: {body}");
            false
        }
    }
}

// Mirrors the truthiness rules the registry responses were written
// against: false, 0, "", [], {} and null all count as failure.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
