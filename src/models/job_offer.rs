use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct JobOffer {
    pub id: i32,
    pub employer_id: i32,
    pub department: String,
    pub manager: String,
    pub salary: i32,
    pub create_date: DateTime<Utc>,
    pub accepted_by: Option<i32>,
    pub start_date: Option<NaiveDate>,
}

impl JobOffer {
    pub fn is_open(&self) -> bool {
        self.accepted_by.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct NewJobOffer {
    pub employer_id: i32,
    pub department: String,
    pub manager: String,
    pub salary: i32,
}

/// Acceptance columns of an offer as they stand after a conditional accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct Acceptance {
    pub accepted_by: Option<i32>,
    pub start_date: Option<NaiveDate>,
}
