use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct JobCandidate {
    pub id: i32,
    pub job_offer_id: i32,
    pub candidate_id: i32,
}

/// One roster entry joined with the invited candidate, the offer and its employer.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct InvitedCandidate {
    pub job_offer_id: i32,
    pub candidate_id: i32,
    pub phone: Option<String>,
    pub department: String,
    pub manager: String,
    pub salary: i32,
    pub create_date: DateTime<Utc>,
    pub accepted_by: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub employer_name: String,
}
