//! HTTP binding of the gateway
//!
//! Queries are `GET {api}/rspc/{procedure}?input=<json>`, mutations are
//! `POST {api}/rspc/{procedure}` with the input as the JSON body. Replies
//! use the `{"result": {"type": ..., "data": ...}}` envelope. Response
//! parsing is kept in free functions so it can be tested without a server.
//!
//! A request rejected as unauthorised is retried once after renewing the
//! session at `{auth}/api/auth/session/refresh`, when a refresh token is held.

use super::gateway::{Gateway, GatewayError, Request, Response};
use crate::config::Config;
use crate::model::{CloudLocation, Device, FileObject, SessionContext, User};
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info, warn};

const CONNECT_TIMEOUT_SECS: u64 = 5;
const UNAUTHORISED_MARKER: &str = "unauthorised";
const ACCESS_TOKEN_HEADER: &str = "st-access-token";
const REFRESH_TOKEN_HEADER: &str = "st-refresh-token";

pub struct HttpGateway {
    http: reqwest::blocking::Client,
    rpc_url: String,
    identity_endpoint: Option<String>,
    refresh_url: String,
    session: SessionContext,
}

impl HttpGateway {
    pub fn new(config: &Config, session: SessionContext) -> Result<Self, GatewayError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let base = config.api_url.trim_end_matches('/');
        let identity_endpoint = config.identity_endpoint.as_ref().map(|endpoint| {
            if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
                endpoint.clone()
            } else {
                format!("{}/{}", base, endpoint.trim_start_matches('/'))
            }
        });

        Ok(Self {
            http,
            rpc_url: format!("{}/rspc", base),
            identity_endpoint,
            refresh_url: format!(
                "{}/api/auth/session/refresh",
                config.auth_base().trim_end_matches('/')
            ),
            session,
        })
    }

    fn authorize(
        &self,
        builder: reqwest::blocking::RequestBuilder,
    ) -> reqwest::blocking::RequestBuilder {
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn send(&self, builder: reqwest::blocking::RequestBuilder) -> Result<(u16, String), GatewayError> {
        let response = self
            .authorize(builder)
            .send()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        Ok((status, body))
    }

    fn query(&self, procedure: &str, input: Option<Value>) -> Result<Value, GatewayError> {
        let mut builder = self.http.get(format!("{}/{}", self.rpc_url, procedure));
        if let Some(input) = input {
            builder = builder.query(&[("input", input.to_string())]);
        }
        let (status, body) = self.send(builder)?;
        parse_envelope(status, &body)
    }

    fn mutation(&self, procedure: &str, input: Value) -> Result<Value, GatewayError> {
        let builder = self
            .http
            .post(format!("{}/{}", self.rpc_url, procedure))
            .json(&input);
        let (status, body) = self.send(builder)?;
        parse_envelope(status, &body)
    }

    /// One capability for "who is signed in", whichever channel is configured
    fn current_user(&self) -> Result<Option<User>, GatewayError> {
        match &self.identity_endpoint {
            Some(endpoint) => {
                let (status, body) = self.send(self.http.get(endpoint))?;
                parse_identity(status, &body)
            }
            None => {
                let value = self.query(Request::CurrentUser.procedure(), None)?;
                identity_from_value(value)
            }
        }
    }

    /// Trade the refresh token for a new token pair.
    ///
    /// `Ok(false)` when there is no refresh token to trade.
    fn refresh_session(&self) -> Result<bool, GatewayError> {
        let Some(refresh_token) = self.session.refresh_token() else {
            return Ok(false);
        };
        let response = self
            .http
            .post(&self.refresh_url)
            .header("rid", "session")
            .bearer_auth(refresh_token)
            .send()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            return Err(GatewayError::Status {
                status,
                body: response.text().unwrap_or_default(),
            });
        }
        let (access, refresh) = tokens_from_headers(response.headers())?;
        self.session.set_tokens(access, refresh);
        info!("session tokens refreshed");
        Ok(true)
    }

    fn perform(&self, request: &Request) -> Result<Response, GatewayError> {
        let procedure = request.procedure();
        match request {
            Request::CurrentUser => self.current_user().map(Response::CurrentUser),
            Request::ListLocations => {
                let value = self.query(procedure, None)?;
                decode::<Vec<CloudLocation>>(value).map(Response::Locations)
            }
            Request::CreateLocation { name } => {
                let value = self.mutation(procedure, json!(name))?;
                decode::<CloudLocation>(value).map(Response::LocationCreated)
            }
            Request::RemoveLocation { id } => {
                self.mutation(procedure, json!(id))?;
                Ok(Response::LocationRemoved)
            }
            Request::TestLocation { id, path } => {
                self.mutation(procedure, json!({ "id": id, "path": path }))?;
                Ok(Response::LocationTested)
            }
            Request::SearchObjects(args) => {
                let input =
                    serde_json::to_value(args).map_err(|e| GatewayError::Decode(e.to_string()))?;
                let value = self.query(procedure, Some(input))?;
                decode::<ObjectPage>(value).map(|page| Response::Objects(page.into_items()))
            }
            Request::ListDevices => {
                let value = self.query(procedure, None)?;
                decode::<Vec<Device>>(value).map(Response::Devices)
            }
            Request::GetDevice { pub_id } => {
                let value = self.query(procedure, Some(json!({ "pub_id": pub_id })))?;
                decode::<Device>(value).map(Response::Device)
            }
            Request::DeleteDevice { pub_id } => {
                self.mutation(procedure, json!({ "pub_id": pub_id }))?;
                Ok(Response::DeviceDeleted)
            }
        }
    }
}

impl Gateway for HttpGateway {
    fn execute(&self, request: &Request) -> Result<Response, GatewayError> {
        debug!(procedure = request.procedure(), "executing request");
        let result = retry_after_refresh(|| self.perform(request), || self.refresh_session());
        match (request, result) {
            // A rejected identity check means nobody is signed in
            (Request::CurrentUser, Err(GatewayError::Unauthorised)) => {
                Ok(Response::CurrentUser(None))
            }
            (_, result) => result,
        }
    }
}

/// Run `attempt`, and once more after `refresh` when it was unauthorised
fn retry_after_refresh<T>(
    mut attempt: impl FnMut() -> Result<T, GatewayError>,
    refresh: impl FnOnce() -> Result<bool, GatewayError>,
) -> Result<T, GatewayError> {
    match attempt() {
        Err(GatewayError::Unauthorised) => match refresh() {
            Ok(true) => attempt(),
            Ok(false) => Err(GatewayError::Unauthorised),
            Err(e) => {
                warn!(error = %e, "session refresh failed");
                Err(GatewayError::Unauthorised)
            }
        },
        other => other,
    }
}

/// Both renewed tokens must be present and readable
fn tokens_from_headers(headers: &HeaderMap) -> Result<(String, String), GatewayError> {
    let read = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };
    match (read(ACCESS_TOKEN_HEADER), read(REFRESH_TOKEN_HEADER)) {
        (Some(access), Some(refresh)) => Ok((access, refresh)),
        _ => Err(GatewayError::Decode(
            "refresh response carried no tokens".to_string(),
        )),
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Deserialize)]
struct Envelope {
    result: EnvelopeResult,
}

#[derive(Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
enum EnvelopeResult {
    Response(Value),
    Error(RemoteError),
}

#[derive(Deserialize)]
struct RemoteError {
    #[serde(default)]
    code: u16,
    #[serde(default)]
    message: String,
}

/// `search.objects` may answer with a bare list or a page object
#[derive(Deserialize)]
#[serde(untagged)]
enum ObjectPage {
    Bare(Vec<FileObject>),
    Paged { items: Vec<FileObject> },
}

impl ObjectPage {
    fn into_items(self) -> Vec<FileObject> {
        match self {
            ObjectPage::Bare(items) | ObjectPage::Paged { items } => items,
        }
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, GatewayError> {
    serde_json::from_value(value).map_err(|e| GatewayError::Decode(e.to_string()))
}

/// Unwrap an RPC envelope into its data payload
pub fn parse_envelope(status: u16, body: &str) -> Result<Value, GatewayError> {
    if let Ok(envelope) = serde_json::from_str::<Envelope>(body) {
        return match envelope.result {
            EnvelopeResult::Response(data) => Ok(data),
            EnvelopeResult::Error(error) if error.code == 401 => Err(GatewayError::Unauthorised),
            EnvelopeResult::Error(error) => Err(GatewayError::Remote {
                code: error.code,
                message: error.message,
            }),
        };
    }

    if status == 401 {
        return Err(GatewayError::Unauthorised);
    }
    if !(200..300).contains(&status) {
        return Err(GatewayError::Status {
            status,
            body: body.to_string(),
        });
    }
    Err(GatewayError::Decode(format!("missing result envelope: {}", body)))
}

/// Interpret the body of the plain identity endpoint
pub fn parse_identity(status: u16, body: &str) -> Result<Option<User>, GatewayError> {
    if status == 401 || status == 403 {
        return Err(GatewayError::Unauthorised);
    }
    if !(200..300).contains(&status) {
        return Err(GatewayError::Status {
            status,
            body: body.to_string(),
        });
    }
    let value: Value =
        serde_json::from_str(body).map_err(|e| GatewayError::Decode(e.to_string()))?;
    identity_from_value(value)
}

/// `null` and `{"message": "unauthorised"}` both mean nobody is signed in
fn identity_from_value(value: Value) -> Result<Option<User>, GatewayError> {
    if value.is_null() {
        return Ok(None);
    }
    if value.get("message").and_then(Value::as_str) == Some(UNAUTHORISED_MARKER) {
        return Ok(None);
    }
    decode::<User>(value).map(Some)
}
