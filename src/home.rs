//! Dashboard home summary.

use crate::api::{ApiError, ResourceClient};
use crate::models::Patient;
use crate::session::Session;

/// What the dashboard landing view shows above the fold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    /// First name for the greeting line.
    pub greeting_name: String,
    pub total_patients: usize,
}

/// Build the landing summary: greeting from the session, patient count
/// from the backend. A failed count surfaces as an [`ApiError`] for the
/// view to render; it is never swallowed into a zero.
pub async fn load_summary(
    session: &Session,
    patients: &ResourceClient<Patient>,
) -> Result<DashboardSummary, ApiError> {
    let all = patients.list().await?;
    Ok(DashboardSummary {
        greeting_name: greeting_name(session),
        total_patients: all.len(),
    })
}

fn greeting_name(session: &Session) -> String {
    session
        .display_name()
        .split_whitespace()
        .next()
        .unwrap_or("User")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn session(name: &str) -> Session {
        Session::new(name, BTreeSet::new())
    }

    #[test]
    fn greeting_uses_the_first_name() {
        assert_eq!(greeting_name(&session("Gregory House")), "Gregory");
        assert_eq!(greeting_name(&session("ghouse")), "ghouse");
        assert_eq!(greeting_name(&session("")), "User");
    }

    #[tokio::test]
    async fn summary_counts_nothing_without_a_backend() {
        // Nothing listening: the failure must surface, not read as zero.
        let client: ResourceClient<Patient> = ResourceClient::new("http://127.0.0.1:1");
        let result = load_summary(&session("Gregory House"), &client).await;
        assert!(matches!(result, Err(ApiError::Network(_))));
    }
}
