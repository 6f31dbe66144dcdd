//! Domain records: backend-held resources and locally seeded collections.

pub mod appointment;
pub mod patient;
pub mod report;

pub use appointment::{seed_appointments, Appointment, AppointmentStatus};
pub use patient::{Gender, Patient};
pub use report::{seed_reports, Report, ReportKind};
