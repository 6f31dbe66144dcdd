//! Patient record, matching the backend's JSON wire shape (camelCase).
//!
//! `id` is absent only for a not-yet-persisted draft; once the backend
//! assigns it, it never changes. `createdAt`/`updatedAt` are
//! backend-assigned and immutable from this side — the client never
//! fabricates them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::api::Resource;
use crate::listing::ListRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => write!(f, "Male"),
            Self::Female => write!(f, "Female"),
            Self::Other => write!(f, "Other"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub address: String,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub medical_history: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Resource for Patient {
    const COLLECTION: &'static str = "patients";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl ListRow for Patient {
    fn search_fields(&self) -> Vec<String> {
        let mut fields = vec![self.full_name(), self.email.clone()];
        if let Some(id) = &self.id {
            fields.push(id.clone());
        }
        fields
    }

    fn sort_field(&self, key: &str) -> String {
        match key {
            "id" => self.id.clone().unwrap_or_default(),
            "name" => self.full_name(),
            "email" => self.email.clone(),
            "dateOfBirth" => self.date_of_birth.to_string(),
            _ => String::new(),
        }
    }
}
