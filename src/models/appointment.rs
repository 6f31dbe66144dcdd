//! Appointments list entries.
//!
//! The appointments backend is not wired up yet; list pages run on the
//! seed collection below until it is.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::listing::ListRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Confirmed,
    Pending,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "Confirmed",
            Self::Pending => "Pending",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub time: NaiveTime,
    pub duration_min: u16,
    pub patient_name: String,
    pub reason: String,
    pub practitioner: String,
    pub status: AppointmentStatus,
}

impl ListRow for Appointment {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.patient_name.clone(),
            self.reason.clone(),
            self.practitioner.clone(),
        ]
    }

    fn sort_field(&self, key: &str) -> String {
        match key {
            "time" => self.time.format("%H:%M").to_string(),
            "patient" => self.patient_name.clone(),
            "status" => self.status.to_string(),
            _ => String::new(),
        }
    }
}

/// Today's schedule as shown on the appointments page.
pub fn seed_appointments() -> Vec<Appointment> {
    vec![
        Appointment {
            id: "A001".to_string(),
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            duration_min: 30,
            patient_name: "John Doe".to_string(),
            reason: "General Checkup".to_string(),
            practitioner: "Dr. House".to_string(),
            status: AppointmentStatus::Confirmed,
        },
        Appointment {
            id: "A002".to_string(),
            time: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
            duration_min: 45,
            patient_name: "Jane Smith".to_string(),
            reason: "Follow-up Visit".to_string(),
            practitioner: "Dr. House".to_string(),
            status: AppointmentStatus::Pending,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_schedule_is_ordered_by_time() {
        let appointments = seed_appointments();
        assert!(!appointments.is_empty());
        assert!(appointments.windows(2).all(|w| w[0].time <= w[1].time));
    }

    #[test]
    fn status_labels_match_display() {
        assert_eq!(AppointmentStatus::Confirmed.to_string(), "Confirmed");
        assert_eq!(AppointmentStatus::Pending.as_str(), "Pending");
    }

    #[test]
    fn search_fields_cover_patient_and_reason() {
        let fields = seed_appointments()[0].search_fields();
        assert!(fields.contains(&"John Doe".to_string()));
        assert!(fields.contains(&"General Checkup".to_string()));
    }
}
