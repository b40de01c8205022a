//! Product record and the request payloads that create or modify it.

use crate::service::{coerce_bool, coerce_text};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Public projection of a row in `products`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Product {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "TV Samsung")]
    pub name: String,
    #[schema(example = 300.5)]
    pub price: f64,
    #[schema(example = true)]
    pub availability: bool,
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct NewProduct {
    #[serde(deserialize_with = "de_name")]
    pub name: String,
    #[serde(deserialize_with = "de_price")]
    pub price: f64,
    #[serde(default, deserialize_with = "de_opt_availability")]
    pub availability: Option<bool>,
}

/// Partial update: absent fields keep their stored value.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct ProductPatch {
    #[serde(default, deserialize_with = "de_opt_name")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_price")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_availability")]
    pub availability: Option<bool>,
}

impl ProductPatch {
    pub fn apply(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(availability) = self.availability {
            product.availability = availability;
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    String(String),
}

impl NumberOrString {
    fn into_f64<E: serde::de::Error>(self) -> Result<f64, E> {
        match self {
            NumberOrString::Number(n) => Ok(n),
            NumberOrString::String(s) => s
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("price is not numeric: {}", s))),
        }
    }
}

// Clients may send prices as numeric strings ("89").
fn de_price<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    NumberOrString::deserialize(d)?.into_f64()
}

fn de_opt_price<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    match Option::<NumberOrString>::deserialize(d)? {
        Some(v) => v.into_f64().map(Some),
        None => Ok(None),
    }
}

// Scalar names are stored as text; availability accepts the same forms validation admits.
fn de_name<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let v = Value::deserialize(d)?;
    coerce_text(&v).ok_or_else(|| D::Error::custom(format!("name is not text: {}", v)))
}

fn de_opt_name<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(d)? {
        None | Some(Value::Null) => Ok(None),
        Some(v) => coerce_text(&v)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("name is not text: {}", v))),
    }
}

fn de_opt_availability<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    match Option::<Value>::deserialize(d)? {
        None | Some(Value::Null) => Ok(None),
        Some(v) => coerce_bool(&v)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("availability is not a boolean: {}", v))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_product_accepts_numeric_string_price() {
        let p: NewProduct = serde_json::from_value(json!({ "name": "Mouse", "price": "89" })).unwrap();
        assert_eq!(p.price, 89.0);
        assert_eq!(p.availability, None);
    }

    #[test]
    fn loose_name_and_availability_are_coerced() {
        let p: NewProduct =
            serde_json::from_value(json!({ "name": 123, "price": 10, "availability": "false" })).unwrap();
        assert_eq!(p.name, "123");
        assert_eq!(p.availability, Some(false));

        let patch: ProductPatch = serde_json::from_value(json!({ "availability": 1 })).unwrap();
        assert_eq!(patch.availability, Some(true));
        assert!(serde_json::from_value::<ProductPatch>(json!({ "availability": "yes" })).is_err());
    }

    #[test]
    fn patch_only_touches_present_fields() {
        let mut product = Product {
            id: 7,
            name: "Keyboard".into(),
            price: 40.0,
            availability: true,
        };
        let patch: ProductPatch = serde_json::from_value(json!({ "availability": false })).unwrap();
        patch.apply(&mut product);
        assert_eq!(product.name, "Keyboard");
        assert_eq!(product.price, 40.0);
        assert!(!product.availability);
    }
}
