//! Storage port used by the offer services.
//!
//! Every service operation opens one [`OfferTx`], issues its reads and writes
//! through it and commits. Dropping a transaction without committing rolls it
//! back, so an aborted request never leaves partial rows behind.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::job_candidate::InvitedCandidate;
use crate::models::job_offer::{Acceptance, JobOffer, NewJobOffer};
use crate::models::user::User;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("constraint violated: {0}")]
    Conflict(String),

    #[error("transaction already finished")]
    TransactionClosed,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OfferStore: Send + Sync {
    async fn begin(&self) -> StoreResult<Box<dyn OfferTx>>;
}

#[async_trait]
pub trait OfferTx: Send {
    /// Looks the user up among employers only.
    async fn find_employer(&mut self, employer_id: i32) -> StoreResult<Option<User>>;

    /// Candidates with a non-empty phone contained in `phones`.
    async fn find_candidates_by_phones(&mut self, phones: &[String]) -> StoreResult<Vec<User>>;

    async fn insert_offer(&mut self, offer: &NewJobOffer) -> StoreResult<JobOffer>;

    async fn insert_roster(&mut self, job_offer_id: i32, candidate_ids: &[i32])
        -> StoreResult<u64>;

    /// Roster of the offer joined with candidate users, ordered by candidate id.
    async fn invited_candidates(&mut self, job_offer_id: i32)
        -> StoreResult<Vec<InvitedCandidate>>;

    /// Sets `accepted_by`/`start_date` only while `accepted_by` is empty and
    /// returns the stored pair after the write, whoever set it. `None` when the
    /// offer row does not exist.
    async fn accept_if_open(
        &mut self,
        job_offer_id: i32,
        candidate_id: i32,
        start_date: NaiveDate,
    ) -> StoreResult<Option<Acceptance>>;

    async fn commit(&mut self) -> StoreResult<()>;
}
