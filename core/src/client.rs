//! Request builder and response parser for the Pakk API.
//!
//! # Design
//! `PakkClient` holds its configuration and a transport agent and carries no
//! mutable state between calls. Each operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that consumes
//! an `HttpResponse`; both are pure. The blocking operations in
//! `transport` glue them together around one HTTP round-trip.
//!
//! Parse methods write into a caller-supplied `&mut` value instead of
//! returning a new one: the caller decides which concrete type receives the
//! payload, and fields the server leaves out keep their current contents.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::decode::decode_in_place;
use crate::endpoint::EndpointBuilder;
use crate::entity::{ApiEntity, ApiListEntity, ApiSingleEntity};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::list::ListSpec;
use crate::transport;

/// Synchronous, stateless client for the Pakk back-office API.
///
/// Cheap to clone; clones share the transport's connection pool.
#[derive(Clone)]
pub struct PakkClient {
    config: ClientConfig,
    endpoints: EndpointBuilder,
    pub(crate) agent: ureq::Agent,
}

impl PakkClient {
    pub fn new(config: ClientConfig) -> Self {
        let endpoints = EndpointBuilder::new(&config.scheme, &config.domain, config.flavour.api_root());
        let agent = transport::new_agent(config.timeout);
        Self {
            config,
            endpoints,
            agent,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn endpoints(&self) -> &EndpointBuilder {
        &self.endpoints
    }

    pub fn build_list<E>(&self, entities: &E, spec: &ListSpec) -> Result<HttpRequest, ApiError>
    where
        E: ApiListEntity + ?Sized,
    {
        let body = serde_json::to_string(spec).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.json_request(
            HttpMethod::Post,
            self.endpoints.list(entities.entity_list_name()),
            body,
        ))
    }

    /// `body` is sent as-is and should hold only the fields to change. It must
    /// be UTF-8 (JSON always is); anything else fails with
    /// `ApiError::Request` before a request is built.
    pub fn build_update<E>(&self, entity: &E, body: &[u8]) -> Result<HttpRequest, ApiError>
    where
        E: ApiSingleEntity + ?Sized,
    {
        let body = utf8_body(body)?;
        Ok(self.json_request(
            HttpMethod::Patch,
            self.endpoints
                .single(entity.entity_single_name(), entity.entity_id()),
            body,
        ))
    }

    /// Same body rules as `build_update`: sent unchanged, UTF-8 or
    /// `ApiError::Request`.
    pub fn build_create<E>(&self, entity: &E, body: &[u8]) -> Result<HttpRequest, ApiError>
    where
        E: ApiEntity + ?Sized,
    {
        let body = utf8_body(body)?;
        Ok(self.json_request(
            HttpMethod::Post,
            self.endpoints.create(entity.entity_single_name()),
            body,
        ))
    }

    /// Decode a list response into `entities`, replacing the collection.
    pub fn parse_list<E>(&self, response: HttpResponse, entities: &mut E) -> Result<(), ApiError>
    where
        E: ApiListEntity + Serialize + DeserializeOwned,
    {
        let body = check_status(response)?;
        decode_in_place(&body, entities)
    }

    /// Decode an update response into `entity`. Fields absent from the
    /// response keep their current values.
    pub fn parse_update<E>(&self, response: HttpResponse, entity: &mut E) -> Result<(), ApiError>
    where
        E: ApiSingleEntity + Serialize + DeserializeOwned,
    {
        let body = check_status(response)?;
        decode_in_place(&body, entity)
    }

    pub fn parse_create<E>(&self, response: HttpResponse, entity: &mut E) -> Result<(), ApiError>
    where
        E: ApiEntity + Serialize + DeserializeOwned,
    {
        let body = check_status(response)?;
        decode_in_place(&body, entity)
    }

    fn json_request(&self, method: HttpMethod, url: String, body: String) -> HttpRequest {
        HttpRequest {
            method,
            url,
            headers: vec![
                ("content-type".to_string(), "application/json".to_string()),
                ("authorization".to_string(), self.config.authorization()),
            ],
            body: Some(body),
        }
    }
}

impl fmt::Debug for PakkClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PakkClient")
            .field("config", &self.config)
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

fn utf8_body(body: &[u8]) -> Result<String, ApiError> {
    String::from_utf8(body.to_vec()).map_err(|e| ApiError::Request(format!("body is not UTF-8: {e}")))
}

/// Map non-2xx responses to `ApiError::Http`, otherwise hand back the body.
fn check_status(response: HttpResponse) -> Result<Vec<u8>, ApiError> {
    if response.is_success() {
        return Ok(response.body);
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body_text().into_owned(),
    })
}
