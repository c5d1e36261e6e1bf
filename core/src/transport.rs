//! Blocking HTTP round-trips on top of the pure build/parse pair.
//!
//! # Design
//! One request, one response, no retries. The agent carries a single global
//! timeout and returns 4xx/5xx responses as data so status interpretation
//! stays in `client::check_status`. Response bodies are always read to the
//! end as raw bytes before parsing, whatever the status and however large.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::client::PakkClient;
use crate::entity::{ApiEntity, ApiListEntity, ApiSingleEntity};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::list::ListSpec;

pub(crate) fn new_agent(timeout: Duration) -> ureq::Agent {
    ureq::Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .new_agent()
}

impl PakkClient {
    /// Fetch the records matching `spec` into `entities`, replacing its
    /// contents.
    #[instrument(skip_all, fields(resource = entities.entity_list_name()))]
    pub fn get_entity_list<E>(&self, entities: &mut E, spec: &ListSpec) -> Result<(), ApiError>
    where
        E: ApiListEntity + Serialize + DeserializeOwned,
    {
        let request = self.build_list(entities, spec)?;
        let response = self.execute(request)?;
        self.parse_list(response, entities)
    }

    /// PATCH `body` onto the record identified by `entity` and decode the
    /// server's copy back into it.
    #[instrument(skip_all, fields(resource = entity.entity_single_name(), id = %entity.entity_id()))]
    pub fn update_entity<E>(&self, entity: &mut E, body: &[u8]) -> Result<(), ApiError>
    where
        E: ApiSingleEntity + Serialize + DeserializeOwned,
    {
        let request = self.build_update(entity, body)?;
        let response = self.execute(request)?;
        self.parse_update(response, entity)
    }

    /// POST `body` to the create endpoint and decode the new record into
    /// `entity`.
    #[instrument(skip_all, fields(resource = entity.entity_single_name()))]
    pub fn create_entity<E>(&self, entity: &mut E, body: &[u8]) -> Result<(), ApiError>
    where
        E: ApiEntity + Serialize + DeserializeOwned,
    {
        let request = self.build_create(entity, body)?;
        let response = self.execute(request)?;
        self.parse_create(response, entity)
    }

    /// Send a built request and read the whole response.
    pub fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = request.method.as_str(), url = %request.url, "sending request");

        let body = request.body.unwrap_or_default();
        let result = match request.method {
            HttpMethod::Post => with_headers(self.agent.post(&request.url), &request.headers).send(body.as_bytes()),
            HttpMethod::Patch => with_headers(self.agent.patch(&request.url), &request.headers).send(body.as_bytes()),
        };
        let mut response = result.map_err(|e| {
            warn!(url = %request.url, error = %e, "request failed");
            transport_error(e)
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        // ureq caps bodies at 10 MiB by default; list pages may be larger.
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(transport_error)?;

        if (200..300).contains(&status) {
            debug!(status, bytes = body.len(), "response received");
        } else {
            warn!(status, url = %request.url, "non-OK response from Pakk");
        }

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn transport_error(err: ureq::Error) -> ApiError {
    match &err {
        ureq::Error::BadUri(_) | ureq::Error::Http(_) => ApiError::Request(err.to_string()),
        _ => ApiError::Transport(err.to_string()),
    }
}
