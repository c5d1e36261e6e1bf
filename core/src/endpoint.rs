//! Absolute URLs for each API operation.
//!
//! Pure formatting: `{scheme}://{domain}/{root}/{operation path}`. A bad
//! domain is the caller's problem and only shows up when the request is sent.

use crate::object_id::ObjectId;

pub const API_ROOT_SCRIPT_V1: &str = "scriptapi/v1";
pub const API_ROOT_PAKK_V2: &str = "pakkapi/v2";

/// The three kinds of path the API exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation<'a> {
    /// `get/{resource}`
    List { resource: &'a str },
    /// `{resource}/{id}`
    Single { resource: &'a str, id: ObjectId },
    /// `{resource}`
    Create { resource: &'a str },
}

impl Operation<'_> {
    /// Path below the API root.
    pub fn path(&self) -> String {
        match self {
            Operation::List { resource } => format!("get/{resource}"),
            Operation::Single { resource, id } => format!("{resource}/{id}"),
            Operation::Create { resource } => resource.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointBuilder {
    base: String,
}

impl EndpointBuilder {
    pub fn new(scheme: &str, domain: &str, api_root: &str) -> Self {
        Self {
            base: format!(
                "{scheme}://{}/{}",
                domain.trim_end_matches('/'),
                api_root.trim_matches('/')
            ),
        }
    }

    pub fn url(&self, operation: &Operation<'_>) -> String {
        format!("{}/{}", self.base, operation.path())
    }

    pub fn list(&self, resource: &str) -> String {
        self.url(&Operation::List { resource })
    }

    pub fn single(&self, resource: &str, id: ObjectId) -> String {
        self.url(&Operation::Single { resource, id })
    }

    pub fn create(&self, resource: &str) -> String {
        self.url(&Operation::Create { resource })
    }
}
