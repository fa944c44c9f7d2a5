//! Payload tap: observe every successfully parsed structured body.

use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::catalog::Catalog;

use super::scan::scan_payload;

/// The structured-payload parsing primitive being decorated.
pub trait PayloadParse {
    fn parse(&self, text: &str) -> Result<Value, serde_json::Error>;
}

/// Plain serde_json parsing; the default inner primitive.
#[derive(Debug, Default)]
pub struct JsonParse;

impl PayloadParse for JsonParse {
    fn parse(&self, text: &str) -> Result<Value, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Observing decorator around a [`PayloadParse`].
///
/// A genuine parse failure propagates untouched; the tap never masks the
/// host's own error. On success the value is scanned for content
/// descriptors before being returned unchanged.
pub struct PayloadTap<P> {
    inner: P,
    catalog: Arc<Mutex<Catalog>>,
}

impl<P: PayloadParse> PayloadTap<P> {
    pub fn new(inner: P, catalog: Arc<Mutex<Catalog>>) -> Self {
        Self { inner, catalog }
    }
}

impl<P: PayloadParse> PayloadParse for PayloadTap<P> {
    fn parse(&self, text: &str) -> Result<Value, serde_json::Error> {
        let value = self.inner.parse(text)?;
        for candidate in scan_payload(&value) {
            if let Ok(mut catalog) = self.catalog.lock() {
                catalog.submit(candidate);
            }
        }
        Ok(value)
    }
}
