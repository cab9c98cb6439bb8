//! Persistence mapping for owners, consumed by a storage adapter.
//!
//! Nothing in the aggregate reads these values at runtime except the pet
//! ordering applied by [`Owner::from_storage`](crate::Owner::from_storage).

use serde::{Deserialize, Serialize};

use petclinic_core::DomainError;

/// What happens to pets when their owner is saved or deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CascadePolicy {
    /// Inserts, updates and deletes on the owner apply to its pets too.
    #[default]
    All,
    None,
}

/// When pets are loaded relative to their owner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchPolicy {
    #[default]
    Lazy,
    Eager,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OwnerColumns {
    pub address: String,
    pub city: String,
    pub telephone: String,
}

impl Default for OwnerColumns {
    fn default() -> Self {
        Self {
            address: "address".to_string(),
            city: "city".to_string(),
            telephone: "telephone".to_string(),
        }
    }
}

/// One-to-many relation from an owner to its pets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PetsRelation {
    /// Foreign key column on the pets table.
    pub join_column: String,
    pub order_by: String,
    pub cascade: CascadePolicy,
    pub fetch: FetchPolicy,
}

impl Default for PetsRelation {
    fn default() -> Self {
        Self {
            join_column: "owner_id".to_string(),
            order_by: "name".to_string(),
            cascade: CascadePolicy::All,
            fetch: FetchPolicy::Lazy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OwnerMapping {
    pub table: String,
    pub columns: OwnerColumns,
    pub pets: PetsRelation,
}

impl Default for OwnerMapping {
    fn default() -> Self {
        Self {
            table: "owners".to_string(),
            columns: OwnerColumns::default(),
            pets: PetsRelation::default(),
        }
    }
}

impl OwnerMapping {
    /// Parse a mapping; fields left out keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, DomainError> {
        serde_json::from_str(json)
            .map_err(|e| DomainError::validation(format!("owner mapping: {e}")))
    }

    /// Columns written for an owner row, in storage order.
    pub fn owner_columns(&self) -> [&str; 3] {
        [
            self.columns.address.as_str(),
            self.columns.city.as_str(),
            self.columns.telephone.as_str(),
        ]
    }
}
