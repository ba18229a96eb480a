use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::models::job_candidate::InvitedCandidate;

/// What an invited candidate is allowed to see about an offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfferView {
    pub job_offer_id: i32,
    pub candidate_id: i32,
    pub phone: String,
    pub department: String,
    pub manager: String,
    pub salary: i32,
    pub create_date: DateTime<Utc>,
    pub accepted_by: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub employer_name: String,
}

impl OfferView {
    pub fn is_open(&self) -> bool {
        self.accepted_by.is_none()
    }

    pub(crate) fn from_invitation(row: InvitedCandidate, phone: &str) -> Self {
        Self {
            job_offer_id: row.job_offer_id,
            candidate_id: row.candidate_id,
            phone: row.phone.unwrap_or_else(|| phone.to_string()),
            department: row.department,
            manager: row.manager,
            salary: row.salary,
            create_date: row.create_date,
            accepted_by: row.accepted_by,
            start_date: row.start_date,
            employer_name: row.employer_name,
        }
    }
}
