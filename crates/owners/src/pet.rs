//! Pets owned by an [`Owner`](crate::Owner).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use petclinic_core::{Entity, PetId, PetTypeId};

use crate::visit::Visit;

/// Kind of animal ("cat", "dog", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetType {
    pub id: Option<PetTypeId>,
    pub name: String,
}

impl PetType {
    pub fn new(id: PetTypeId, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }
}

/// An animal record belonging to exactly one owner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    id: Option<PetId>,
    name: Option<String>,
    birth_date: Option<NaiveDate>,
    pet_type: Option<PetType>,
    #[serde(default)]
    visits: Vec<Visit>,
}

impl Pet {
    /// A new (unsaved) pet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// A pet that already has a storage identity.
    pub fn persisted(id: PetId, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            ..Self::new(name)
        }
    }

    pub fn set_id(&mut self, id: Option<PetId>) {
        self.id = id;
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date
    }

    pub fn set_birth_date(&mut self, birth_date: Option<NaiveDate>) {
        self.birth_date = birth_date;
    }

    pub fn pet_type(&self) -> Option<&PetType> {
        self.pet_type.as_ref()
    }

    pub fn set_pet_type(&mut self, pet_type: Option<PetType>) {
        self.pet_type = pet_type;
    }

    /// Visits, most recent first.
    pub fn visits(&self) -> Vec<&Visit> {
        let mut visits: Vec<&Visit> = self.visits.iter().collect();
        visits.sort_by(|a, b| b.date().cmp(&a.date()));
        visits
    }

    pub fn add_visit(&mut self, visit: Visit) {
        self.visits.push(visit);
    }
}

impl Entity for Pet {
    type Id = PetId;

    fn id(&self) -> Option<PetId> {
        self.id
    }
}
