//! Types embedded in several resources.
//!
//! These are not resources themselves; they appear as nested data inside
//! orders, customers and products.

use serde::{Deserialize, Serialize};

/// A postal address used for shipping or billing.
///
/// # Example
///
/// ```rust
/// use shopline_api::rest::resources::Address;
///
/// let address = Address {
///     first_name: "Jane".to_string(),
///     last_name: "Doe".to_string(),
///     address1: "1 Harbour Road".to_string(),
///     city: "Hong Kong".to_string(),
///     country: "HK".to_string(),
///     ..Default::default()
/// };
///
/// let json = serde_json::to_value(&address).unwrap();
/// assert_eq!(json["city"], "Hong Kong");
/// assert!(json.get("zip").is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Address {
    /// The recipient's first name.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub first_name: String,

    /// The recipient's last name.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub last_name: String,

    /// Street address.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub address1: String,

    /// Apartment, suite, floor.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub address2: String,

    /// City or district.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub city: String,

    /// Province, state or region.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub province: String,

    /// Country name or code.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub country: String,

    /// Postal code.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub zip: String,

    /// Contact phone number.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone: String,
}

/// A money amount as rendered by Shopline.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Price {
    /// Amount in minor units.
    pub cents: i64,
    /// Display symbol, e.g. `HK$`.
    pub currency_symbol: String,
    /// ISO 4217 code, e.g. `HKD`.
    pub currency_iso: String,
    /// Formatted amount, e.g. `HK$120.00`.
    pub label: String,
    /// Amount in major units.
    pub dollars: f64,
}
