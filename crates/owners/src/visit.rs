use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use petclinic_core::{Entity, VisitId};

/// A clinic visit recorded against a pet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    id: Option<VisitId>,
    date: NaiveDate,
    description: String,
}

impl Visit {
    /// A new visit dated today (UTC).
    pub fn new(description: impl Into<String>) -> Self {
        Self::on(Utc::now().date_naive(), description)
    }

    pub fn on(date: NaiveDate, description: impl Into<String>) -> Self {
        Self {
            id: None,
            date,
            description: description.into(),
        }
    }

    pub fn set_id(&mut self, id: Option<VisitId>) {
        self.id = id;
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }
}

impl Entity for Visit {
    type Id = VisitId;

    fn id(&self) -> Option<VisitId> {
        self.id
    }
}
