use serde::{Deserialize, Serialize};

use crate::candidate::CandidateRecord;
use crate::constants::CARD_DESCRIPTION_CHARS;

/// Read-only copy of a candidate and its current score, handed to front ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateView {
    pub name: String,
    pub gender: String,
    pub country: String,
    pub occupation: String,
    pub birth_date: String,
    pub death_date: String,
    pub alive: bool,
    pub description: String,
    pub image_ref: String,
    pub score: f64,
}

impl CandidateView {
    pub fn new(record: &CandidateRecord, score: f64) -> Self {
        Self {
            name: record.name.clone(),
            gender: record.gender.clone(),
            country: record.country.clone(),
            occupation: record.occupation.clone(),
            birth_date: record.birth_date.clone(),
            death_date: record.death_date.clone(),
            alive: record.alive,
            description: record.description.clone(),
            image_ref: record.image_ref.clone(),
            score,
        }
    }

    /// Description cut to the length shown on a person card.
    pub fn short_description(&self) -> &str {
        match self.description.char_indices().nth(CARD_DESCRIPTION_CHARS) {
            Some((idx, _)) => &self.description[..idx],
            None => &self.description,
        }
    }
}

/// One line of the remaining-candidate listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingEntry {
    pub name: String,
    pub occupation: String,
    pub alive: bool,
    pub score: f64,
}

impl ListingEntry {
    pub fn new(record: &CandidateRecord, score: f64) -> Self {
        Self {
            name: record.name.clone(),
            occupation: record.occupation.clone(),
            alive: record.alive,
            score,
        }
    }

    /// "Alive" or "Deceased".
    pub fn status(&self) -> &'static str {
        if self.alive {
            "Alive"
        } else {
            "Deceased"
        }
    }
}
