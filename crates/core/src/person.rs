//! Person identity shared by people-like records.
//!
//! Records such as owners embed a [`Person`] rather than extending a base type.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::id::OwnerId;

/// Identity of a person: storage id plus first/last name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    id: Option<OwnerId>,
    first_name: String,
    last_name: String,
}

impl Person {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    pub fn set_id(&mut self, id: Option<OwnerId>) {
        self.id = id;
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn set_first_name(&mut self, first_name: impl Into<String>) {
        self.first_name = first_name.into();
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn set_last_name(&mut self, last_name: impl Into<String>) {
        self.last_name = last_name.into();
    }
}

impl Entity for Person {
    type Id = OwnerId;

    fn id(&self) -> Option<OwnerId> {
        self.id
    }
}
