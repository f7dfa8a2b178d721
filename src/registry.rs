//! Static dispatch table from declared type names to converters.
//!
//! Hosts register converters once at composition time and resolve them per
//! field, instead of inspecting runtime type information.

use std::{collections::HashMap, sync::Arc};

use tracing::debug;

use crate::codec::DateConverter;
use crate::token::TypeTag;

#[derive(Debug, Clone, Default)]
pub struct ConverterRegistry {
    converters: HashMap<String, Arc<dyn DateConverter>>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes `converter` under every name it reports. A later registration
    /// for the same name replaces the earlier one.
    pub fn register(&mut self, converter: Arc<dyn DateConverter>) {
        for name in converter.type_names() {
            if self.converters.insert((*name).to_owned(), Arc::clone(&converter)).is_some() {
                debug!(type_name = *name, "replaced converter");
            } else {
                debug!(type_name = *name, "registered converter");
            }
        }
    }

    /// The converter for `declared`, if one is registered under its name and
    /// accepts its nullability.
    pub fn resolve(&self, declared: &TypeTag) -> Option<&dyn DateConverter> {
        self.converters
            .get(declared.name())
            .map(Arc::as_ref)
            .filter(|converter| converter.can_handle(declared))
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}
