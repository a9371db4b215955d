use serde::{Deserialize, Serialize};

use super::{AttributeProbe, CategoricalAttribute};

/// One named entity of the dataset.
///
/// Missing attribute values are empty strings, never absent. `alive` is
/// derived from `death_date` and kept in sync by [`CandidateRecord::with_death_date`].
/// Scores are not stored here; they live in the pool that references the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    /// Unique key within a dataset.
    pub name: String,
    pub gender: String,
    pub country: String,
    pub occupation: String,
    pub birth_date: String,
    pub death_date: String,
    /// Opaque image reference (usually a URL); never interpreted by the engine.
    pub image_ref: String,
    pub description: String,
    pub alive: bool,
}

impl CandidateRecord {
    /// Create a record with only a name; every other attribute is empty.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            gender: String::new(),
            country: String::new(),
            occupation: String::new(),
            birth_date: String::new(),
            death_date: String::new(),
            image_ref: String::new(),
            description: String::new(),
            alive: true,
        }
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = gender.into();
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    pub fn with_occupation(mut self, occupation: impl Into<String>) -> Self {
        self.occupation = occupation.into();
        self
    }

    pub fn with_birth_date(mut self, birth_date: impl Into<String>) -> Self {
        self.birth_date = birth_date.into();
        self
    }

    /// Set the death date and re-derive `alive`.
    pub fn with_death_date(mut self, death_date: impl Into<String>) -> Self {
        self.death_date = death_date.into();
        self.alive = Self::derive_alive(&self.death_date);
        self
    }

    pub fn with_image_ref(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = image_ref.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// A candidate is alive iff its death date is blank.
    pub fn derive_alive(death_date: &str) -> bool {
        death_date.trim().is_empty()
    }

    /// Value of a categorical attribute.
    pub fn value(&self, attribute: CategoricalAttribute) -> &str {
        match attribute {
            CategoricalAttribute::Gender => &self.gender,
            CategoricalAttribute::Country => &self.country,
            CategoricalAttribute::Occupation => &self.occupation,
        }
    }

    /// Whether this record falls on the "yes" side of `probe`.
    pub fn matches(&self, probe: &AttributeProbe) -> bool {
        match probe {
            AttributeProbe::Alive => self.alive,
            AttributeProbe::Categorical { attribute, value } => self.value(*attribute) == value,
        }
    }
}
