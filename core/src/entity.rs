//! Capability contracts for records the API can address.
//!
//! A record that can be listed names its singular and list resources; a
//! record that can be updated on its own names its singular resource and
//! exposes its id. Implementing the accessors is all it takes.

use crate::object_id::ObjectId;

pub const ENTITY_ORDER: &str = "order";

pub trait ApiEntity {
    /// Path segment for single-record operations, e.g. `order`.
    fn entity_single_name(&self) -> &str;
}

pub trait ApiListEntity: ApiEntity {
    /// Path segment used after `get/` by the list endpoint.
    fn entity_list_name(&self) -> &str;
}

pub trait ApiSingleEntity: ApiEntity {
    fn entity_id(&self) -> ObjectId;
}
