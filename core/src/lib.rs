//! Synchronous client for the Pakk e-commerce back-office API.
//!
//! # Overview
//! Lists, updates and creates server-side records (orders and their nested
//! value objects) over HTTPS with JSON bodies and a fixed request timeout.
//!
//! # Design
//! - `PakkClient` is stateless: configuration plus a transport agent.
//! - Each operation is split into `build_*` (produces an `HttpRequest`) and
//!   `parse_*` (consumes an `HttpResponse`), both pure; the blocking
//!   `get_entity_list` / `update_entity` / `create_entity` run one round-trip
//!   between them.
//! - Responses decode into a caller-supplied `&mut` value.
//! - Records opt in to operations through the `ApiEntity` family of traits.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
mod decode;
pub mod endpoint;
pub mod entity;
pub mod error;
pub mod http;
pub mod list;
pub mod object_id;
mod transport;
pub mod types;

pub use client::PakkClient;
pub use config::{ApiFlavour, ClientConfig, DEFAULT_TIMEOUT};
pub use endpoint::{EndpointBuilder, Operation, API_ROOT_PAKK_V2, API_ROOT_SCRIPT_V1};
pub use entity::{ApiEntity, ApiListEntity, ApiSingleEntity, ENTITY_ORDER};
pub use error::{ApiError, ObjectIdError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use list::{Filter, FilterSet, ListSpec};
pub use object_id::ObjectId;
pub use types::{Address, Customer, Order, OrderLine, OrderTotals, Orders, Shipping};
