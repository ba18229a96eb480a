use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use tracing::info;

use crate::database::store::OfferStore;
use crate::dto::job_offer_dto::CreateJobOfferPayload;
use crate::error::{Error, Result};
use crate::models::job_offer::{JobOffer, NewJobOffer};
use crate::models::offer_view::OfferView;
use crate::services::eligibility_service;
use crate::utils::time::today;

/// Latest allowed start date, in days after today.
pub const START_DATE_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone)]
pub struct CreatedOffer {
    pub offer: JobOffer,
    pub candidate_ids: Vec<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptedOffer {
    pub job_offer_id: i32,
    pub candidate_id: i32,
    pub start_date: NaiveDate,
}

/// Bounds of the start date window `(today, today + 30]`, both inclusive.
pub fn start_date_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (
        today + Duration::days(1),
        today + Duration::days(START_DATE_WINDOW_DAYS),
    )
}

pub fn validate_start_date(start_date: NaiveDate, today: NaiveDate) -> Result<()> {
    let (min, max) = start_date_bounds(today);
    if start_date < min || start_date > max {
        return Err(Error::StartDateOutOfRange {
            min,
            max,
            provided: start_date,
        });
    }
    Ok(())
}

#[derive(Clone)]
pub struct OfferService {
    store: Arc<dyn OfferStore>,
}

impl OfferService {
    pub fn new(store: Arc<dyn OfferStore>) -> Self {
        Self { store }
    }

    /// Creates the offer and its roster in one transaction. Every phone must
    /// belong to a known candidate, otherwise nothing is written.
    pub async fn create_offer(&self, payload: CreateJobOfferPayload) -> Result<CreatedOffer> {
        let requested: BTreeSet<&str> = payload.phone_list.iter().map(String::as_str).collect();
        if requested.is_empty() {
            return Err(Error::EmptyRoster);
        }

        let mut tx = self.store.begin().await?;

        if tx.find_employer(payload.employer_id).await?.is_none() {
            info!(employer_id = payload.employer_id, "offer rejected, unknown employer");
            return Err(Error::UnknownEmployer(payload.employer_id));
        }

        let phones: Vec<String> = requested.iter().map(|p| p.to_string()).collect();
        let candidates = tx.find_candidates_by_phones(&phones).await?;
        let matched: BTreeSet<&str> = candidates
            .iter()
            .filter_map(|c| c.phone.as_deref())
            .collect();
        let missing: Vec<String> = requested
            .difference(&matched)
            .map(|p| p.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(Error::UnmatchedPhones(missing));
        }

        let mut candidate_ids: Vec<i32> = candidates.iter().map(|c| c.id).collect();
        candidate_ids.sort_unstable();
        candidate_ids.dedup();

        let offer = tx
            .insert_offer(&NewJobOffer {
                employer_id: payload.employer_id,
                department: payload.department,
                manager: payload.manager,
                salary: payload.salary,
            })
            .await?;
        tx.insert_roster(offer.id, &candidate_ids).await?;
        tx.commit().await?;

        info!(
            job_offer_id = offer.id,
            employer_id = offer.employer_id,
            candidates = candidate_ids.len(),
            "job offer created"
        );
        Ok(CreatedOffer {
            offer,
            candidate_ids,
        })
    }

    pub async fn offer_details(&self, job_offer_id: i32, phone: &str) -> Result<OfferView> {
        let mut tx = self.store.begin().await?;
        let view = eligibility_service::resolve(&mut *tx, job_offer_id, phone).await?;
        tx.commit().await?;
        Ok(view)
    }

    pub async fn accept_offer(
        &self,
        job_offer_id: i32,
        phone: &str,
        start_date: NaiveDate,
    ) -> Result<AcceptedOffer> {
        self.accept_offer_on(job_offer_id, phone, start_date, today())
            .await
    }

    /// First acceptance wins. The store sets the acceptance only while the
    /// offer is open; the caller won if the stored acceptor is the resolved
    /// candidate, which includes accepting the same offer twice.
    pub async fn accept_offer_on(
        &self,
        job_offer_id: i32,
        phone: &str,
        start_date: NaiveDate,
        today: NaiveDate,
    ) -> Result<AcceptedOffer> {
        validate_start_date(start_date, today)?;

        let mut tx = self.store.begin().await?;
        let view = eligibility_service::resolve(&mut *tx, job_offer_id, phone).await?;
        let acceptance = tx
            .accept_if_open(job_offer_id, view.candidate_id, start_date)
            .await?
            .ok_or(Error::OfferNotFound(job_offer_id))?;
        tx.commit().await?;

        if acceptance.accepted_by != Some(view.candidate_id) {
            info!(
                job_offer_id,
                candidate_id = view.candidate_id,
                accepted_by = ?acceptance.accepted_by,
                "job offer already taken"
            );
            return Err(Error::OfferTaken(job_offer_id));
        }

        let start_date = acceptance.start_date.ok_or_else(|| {
            Error::Internal(format!(
                "job offer {} accepted without a start date",
                job_offer_id
            ))
        })?;
        info!(
            job_offer_id,
            candidate_id = view.candidate_id,
            %start_date,
            "job offer accepted"
        );
        Ok(AcceptedOffer {
            job_offer_id,
            candidate_id: view.candidate_id,
            start_date,
        })
    }
}
