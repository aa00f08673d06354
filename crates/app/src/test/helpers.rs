//! Test Helpers

use jiff::Timestamp;
use serde_json::Number;

use crate::products::models::ProductData;

pub(crate) fn product_data(name: &str) -> ProductData {
    ProductData {
        name: name.to_string(),
        description: "d".to_string(),
        code: "C1".to_string(),
        url: "u".to_string(),
        price: Number::from(10),
        stock: Number::from(5),
        timestamp: Timestamp::UNIX_EPOCH,
    }
}
