//! Domain DTOs for the Pakk back-office API.
//!
//! # Design
//! These records carry no behavior beyond naming their resource. Every field
//! defaults, so a partial payload from the server still decodes. Monetary
//! amounts are integer minor currency units (pence, cents).

use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::entity::{ApiEntity, ApiListEntity, ApiSingleEntity, ENTITY_ORDER};
use crate::object_id::ObjectId;

/// A single order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// Human-facing order number.
    #[serde(rename = "ref")]
    pub reference: i64,
    pub status: String,
    pub customer: Customer,
    pub billing_address: Address,
    pub shipping_address: Address,
    pub lines: Vec<OrderLine>,
    pub totals: OrderTotals,
    pub shipping: Shipping,
    /// Soft-deleted orders are only listed with `include_inactives`.
    pub inactive: bool,
}

impl ApiEntity for Order {
    fn entity_single_name(&self) -> &str {
        ENTITY_ORDER
    }
}

impl ApiSingleEntity for Order {
    fn entity_id(&self) -> ObjectId {
        self.id
    }
}

/// A page of orders, as returned by the list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Orders(pub Vec<Order>);

impl Deref for Orders {
    type Target = Vec<Order>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Orders {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<Order>> for Orders {
    fn from(orders: Vec<Order>) -> Self {
        Self(orders)
    }
}

impl ApiEntity for Orders {
    fn entity_single_name(&self) -> &str {
        ENTITY_ORDER
    }
}

impl ApiListEntity for Orders {
    fn entity_list_name(&self) -> &str {
        ENTITY_ORDER
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    pub email: String,
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Address {
    pub name: String,
    pub company: String,
    pub line1: String,
    pub line2: String,
    pub city: String,
    pub postcode: String,
    pub region: String,
    /// ISO 3166-1 alpha-2.
    pub country_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderLine {
    pub sku: String,
    pub name: String,
    pub quantity: i64,
    pub unit_price: i64,
    pub total: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderTotals {
    pub currency: String,
    pub sub_total: i64,
    pub discount: i64,
    pub shipping: i64,
    pub tax: i64,
    pub grand_total: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Shipping {
    pub method: String,
    pub carrier: String,
    pub tracking_number: String,
    pub cost: i64,
}
