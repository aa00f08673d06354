//! Write gate middleware.
//!
//! Runs ahead of the create, update and delete handlers. The body is read
//! once and the outcome is left in the depot as a [`WriteGate`]; the gate
//! itself never rejects a request.

use salvo::{
    handler,
    prelude::{Depot, FlowCtrl, Request, Response},
};
use serde_json::{Map, Number, Value};
use tracing::debug;

const REQUIRED_FIELDS: [&str; 6] = ["name", "description", "code", "url", "price", "stock"];

/// Client-editable product fields.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ProductFields {
    pub name: String,
    pub description: String,
    pub code: String,
    pub url: String,
    pub price: Number,
    pub stock: Number,
}

impl ProductFields {
    /// Text fields take any non-null value, non-strings as their JSON text.
    /// Numeric fields take a JSON number or a string holding one.
    fn from_object(object: &Map<String, Value>) -> Option<Self> {
        if let Some(field) = REQUIRED_FIELDS
            .into_iter()
            .find(|field| object.get(*field).is_none_or(Value::is_null))
        {
            debug!(field, "product body is missing a required field");

            return None;
        }

        let (Some(price), Some(stock)) =
            (number_field(object, "price"), number_field(object, "stock"))
        else {
            debug!("product body has a non-numeric price or stock");

            return None;
        };

        Some(Self {
            name: text_field(object, "name")?,
            description: text_field(object, "description")?,
            code: text_field(object, "code")?,
            url: text_field(object, "url")?,
            price,
            stock,
        })
    }
}

fn text_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

fn number_field(object: &Map<String, Value>, key: &str) -> Option<Number> {
    match object.get(key)? {
        Value::Number(number) => Some(number.clone()),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// What the gate learned from a write request body.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WriteGate {
    /// `admin` was present and truthy.
    pub authorized: bool,

    /// `None` when a required field is missing or null, or when price or
    /// stock is not numeric.
    pub product: Option<ProductFields>,
}

impl WriteGate {
    pub(crate) fn from_body(body: &[u8]) -> Self {
        let mut object = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(object)) => object,
            _ => Map::new(),
        };

        let authorized = object.remove("admin").as_ref().is_some_and(is_truthy);

        let product = ProductFields::from_object(&object);

        Self {
            authorized,
            product,
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n.abs() > 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Parse the request body into a [`WriteGate`] and store it in the depot.
#[handler]
pub(crate) async fn write_gate(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let gate = match req.payload().await {
        Ok(body) => WriteGate::from_body(body),
        Err(error) => {
            debug!("could not read request body: {error}");

            WriteGate::from_body(&[])
        }
    };

    depot.inject(gate);

    ctrl.call_next(req, depot, res).await;
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    fn gate(body: &Value) -> WriteGate {
        WriteGate::from_body(body.to_string().as_bytes())
    }

    fn full_body() -> Value {
        json!({
            "name": "A",
            "description": "d",
            "code": "C1",
            "url": "u",
            "price": 10,
            "stock": 5,
        })
    }

    #[test]
    fn complete_admin_body_is_authorized_and_valid() {
        let mut body = full_body();
        body["admin"] = json!(true);

        let gate = gate(&body);

        assert!(gate.authorized);
        assert_eq!(
            gate.product,
            Some(ProductFields {
                name: "A".to_string(),
                description: "d".to_string(),
                code: "C1".to_string(),
                url: "u".to_string(),
                price: Number::from(10),
                stock: Number::from(5),
            })
        );
    }

    #[test]
    fn each_missing_or_null_field_invalidates_body() {
        for field in ["name", "description", "code", "url", "price", "stock"] {
            let mut missing = full_body();
            if let Some(object) = missing.as_object_mut() {
                object.remove(field);
            }

            let mut null = full_body();
            null[field] = Value::Null;

            assert!(gate(&missing).product.is_none(), "missing {field}");
            assert!(gate(&null).product.is_none(), "null {field}");
        }
    }

    #[test]
    fn fractional_stock_is_accepted_as_sent() -> TestResult {
        let mut body = full_body();
        body["stock"] = json!(5.0);

        let product = gate(&body).product.ok_or("body should be valid")?;

        assert_eq!(product.stock, Number::from_f64(5.0).ok_or("finite")?);

        Ok(())
    }

    #[test]
    fn numeric_strings_are_accepted_for_price_and_stock() -> TestResult {
        let mut body = full_body();
        body["price"] = json!("10");
        body["stock"] = json!(" 5 ");

        let product = gate(&body).product.ok_or("body should be valid")?;

        assert_eq!(product.price, Number::from(10));
        assert_eq!(product.stock, Number::from(5));

        Ok(())
    }

    #[test]
    fn non_string_text_fields_keep_their_json_text() -> TestResult {
        let mut body = full_body();
        body["code"] = json!(123);
        body["url"] = json!(true);

        let product = gate(&body).product.ok_or("body should be valid")?;

        assert_eq!(product.code, "123");
        assert_eq!(product.url, "true");

        Ok(())
    }

    #[test]
    fn non_numeric_price_or_stock_invalidates_body() {
        for (field, value) in [
            ("price", json!("ten")),
            ("price", json!([10])),
            ("stock", json!({ "count": 5 })),
            ("stock", json!(false)),
        ] {
            let mut body = full_body();
            body[field] = value.clone();

            assert!(gate(&body).product.is_none(), "{field} = {value}");
        }
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let mut body = full_body();
        body["colour"] = json!("red");

        assert!(gate(&body).product.is_some());
    }

    #[test]
    fn admin_uses_javascript_truthiness() {
        for (admin, expected) in [
            (json!(true), true),
            (json!(1), true),
            (json!("yes"), true),
            (json!("false"), true),
            (json!({}), true),
            (json!([]), true),
            (json!(false), false),
            (json!(0), false),
            (json!(""), false),
            (Value::Null, false),
        ] {
            let body = json!({ "admin": admin.clone() });

            assert_eq!(gate(&body).authorized, expected, "admin = {admin}");
        }
    }

    #[test]
    fn missing_admin_is_unauthorized() {
        assert!(!gate(&full_body()).authorized);
    }

    #[test]
    fn empty_and_non_object_bodies_read_as_empty_object() {
        let bodies: [&[u8]; 4] = [b"", b"not json", b"[1, 2]", b"42"];

        for body in bodies {
            let gate = WriteGate::from_body(body);

            assert!(!gate.authorized);
            assert!(gate.product.is_none());
        }
    }
}
