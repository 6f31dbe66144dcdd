//! Medical report gallery entries.
//!
//! Like appointments, the report store is not wired up yet; the gallery
//! runs on the seed collection below.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::listing::ListRow;

/// Document kind, which drives the gallery icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportKind {
    Pdf,
    Image,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub title: String,
    pub kind: ReportKind,
    pub uploaded: NaiveDate,
}

impl ListRow for Report {
    fn search_fields(&self) -> Vec<String> {
        vec![self.title.clone()]
    }

    fn sort_field(&self, key: &str) -> String {
        match key {
            "title" => self.title.clone(),
            "uploaded" => self.uploaded.to_string(),
            _ => String::new(),
        }
    }
}

/// The report gallery's current contents.
pub fn seed_reports() -> Vec<Report> {
    vec![
        Report {
            id: "R001".to_string(),
            title: "Blood Work - John Doe".to_string(),
            kind: ReportKind::Pdf,
            uploaded: NaiveDate::from_ymd_opt(2023, 10, 24).unwrap(),
        },
        Report {
            id: "R002".to_string(),
            title: "X-Ray Chest - Jane Smith".to_string(),
            kind: ReportKind::Image,
            uploaded: NaiveDate::from_ymd_opt(2023, 10, 20).unwrap(),
        },
        Report {
            id: "R003".to_string(),
            title: "MRI Scan Analysis - P003".to_string(),
            kind: ReportKind::Pdf,
            uploaded: NaiveDate::from_ymd_opt(2023, 10, 15).unwrap(),
        },
    ]
}
