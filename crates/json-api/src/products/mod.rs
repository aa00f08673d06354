//! Products

mod errors;
mod gate;
mod handlers;

pub(crate) use errors::{ApiError, ErrorBody};
pub(crate) use gate::{WriteGate, write_gate};
pub(crate) use handlers::*;
