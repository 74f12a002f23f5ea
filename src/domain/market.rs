//! Supply vendors (hardware, tools, paint shops).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::patch::double_option;
use super::{Coordinate, MarketId};

/// An item on a market's price list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MarketItem {
    /// Item name.
    pub name: String,
    /// Price in minor currency units.
    pub price: i64,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A supply vendor.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Market {
    /// Market identifier.
    pub id: MarketId,
    /// Shop name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Vendor type, matched exactly (case-sensitive) by nearby search.
    #[serde(rename = "type")]
    pub market_type: String,
    /// Shop location; markets without one never appear in nearby search.
    pub location: Option<Coordinate>,
    /// Street address.
    pub address: String,
    /// Contact phone.
    pub phone: Option<String>,
    /// Average rating.
    pub rating: f64,
    /// Price list, in the order given.
    pub items: Vec<MarketItem>,
}

/// Fields supplied when registering a market.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct NewMarket {
    /// Shop name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Vendor type.
    #[serde(rename = "type")]
    pub market_type: String,
    /// Shop location.
    #[serde(default)]
    pub location: Option<Coordinate>,
    /// Street address.
    pub address: String,
    /// Contact phone.
    #[serde(default)]
    pub phone: Option<String>,
    /// Price list.
    #[serde(default)]
    pub items: Vec<MarketItem>,
}

impl NewMarket {
    /// Materialises the record with its assigned id and a zero rating.
    #[must_use]
    pub fn into_market(self, id: MarketId) -> Market {
        Market {
            id,
            name: self.name,
            description: self.description,
            market_type: self.market_type,
            location: self.location,
            address: self.address,
            phone: self.phone,
            rating: 0.0,
            items: self.items,
        }
    }
}

/// Partial update for a [`Market`].
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct MarketPatch {
    /// New name.
    #[serde(default)]
    pub name: Option<String>,
    /// New description, or `null` to clear.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    /// New vendor type.
    #[serde(default, rename = "type")]
    pub market_type: Option<String>,
    /// New location, or `null` to clear.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Coordinate>)]
    pub location: Option<Option<Coordinate>>,
    /// New address.
    #[serde(default)]
    pub address: Option<String>,
    /// New phone, or `null` to clear.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub phone: Option<Option<String>>,
    /// Replacement price list.
    #[serde(default)]
    pub items: Option<Vec<MarketItem>>,
}

impl MarketPatch {
    /// Merges the supplied fields into `market`.
    pub fn apply(self, market: &mut Market) {
        if let Some(name) = self.name {
            market.name = name;
        }
        if let Some(description) = self.description {
            market.description = description;
        }
        if let Some(market_type) = self.market_type {
            market.market_type = market_type;
        }
        if let Some(location) = self.location {
            market.location = location;
        }
        if let Some(address) = self.address {
            market.address = address;
        }
        if let Some(phone) = self.phone {
            market.phone = phone;
        }
        if let Some(items) = self.items {
            market.items = items;
        }
    }
}
