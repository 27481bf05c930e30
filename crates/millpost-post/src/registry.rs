//! The closed set of shipped dialects.
//!
//! Dialects are resolved by name from a fixed table; there is no dynamic
//! loading at this layer.

use millpost_core::PostError;

use crate::dialect::PostProcessor;
use crate::din::DinPost;
use crate::fanuc::FanucPost;
use crate::heidenhain::HeidenhainPost;
use crate::sinumerik::Sinumerik840D;

/// Names of all shipped dialects, in registry order.
pub fn available() -> &'static [&'static str] {
    &["din", "fanuc", "heidenhain", "sinumerik840d"]
}

/// Instantiate a dialect by its registry name.
pub fn create(name: &str) -> Result<Box<dyn PostProcessor>, PostError> {
    match name {
        "din" => Ok(Box::new(DinPost)),
        "fanuc" => Ok(Box::new(FanucPost)),
        "heidenhain" => Ok(Box::new(HeidenhainPost)),
        "sinumerik840d" => Ok(Box::new(Sinumerik840D)),
        other => Err(PostError::UnknownDialect {
            name: other.to_string(),
        }),
    }
}
