//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use serde_json::{Number, Value, json};

use catalog_app::{
    context::AppContext,
    products::{MockProductsStore, models::ProductData},
};

use crate::{router::products_router, state::State};

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

/// A complete product body carrying the given `admin` value.
pub(crate) fn valid_body(admin: Value) -> Value {
    json!({
        "name": "A",
        "description": "d",
        "code": "C1",
        "url": "u",
        "price": 10,
        "stock": 5,
        "admin": admin,
    })
}

/// A store that fails the test if it is touched at all.
pub(crate) fn strict_store() -> MockProductsStore {
    let mut store = MockProductsStore::new();

    store.expect_list_products().never();
    store.expect_get_product().never();
    store.expect_save_product().never();
    store.expect_update_product().never();
    store.expect_delete_product().never();

    store
}

pub(crate) fn products_service(store: MockProductsStore) -> Service {
    let app = AppContext::new("mock", Arc::new(store));

    Service::new(
        Router::new()
            .hoop(inject(State::from_app_context(app)))
            .push(products_router()),
    )
}
