//! Domain DTOs for the todo service.
//!
//! A todo is nothing more than its text, so it travels as a plain `String`.
//! Only the category has a JSON shape of its own.

use serde::{Deserialize, Serialize};

/// A named grouping of todos, sent upstream as `{"name": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
