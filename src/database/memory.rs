//! In-process [`OfferStore`] for tests and database-less local runs.
//!
//! Transactions are serialized behind one async mutex. Each transaction works
//! on a private copy of the tables that replaces the shared state only when it
//! commits.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::database::seed::{SAMPLE_CANDIDATES, SAMPLE_EMPLOYERS, SAMPLE_OFFERS};
use crate::database::store::{OfferStore, OfferTx, StoreError, StoreResult};
use crate::models::job_candidate::{InvitedCandidate, JobCandidate};
use crate::models::job_offer::{Acceptance, JobOffer, NewJobOffer};
use crate::models::user::User;
use crate::models::user_group::{UserGroup, CANDIDATE_GROUP, EMPLOYER_GROUP};
use crate::utils::time::now;

#[derive(Debug, Clone, Default)]
struct Tables {
    user_groups: Vec<UserGroup>,
    users: Vec<User>,
    job_offers: Vec<JobOffer>,
    job_candidates: Vec<JobCandidate>,
}

impl Tables {
    fn with_groups() -> Self {
        let user_groups = [EMPLOYER_GROUP, CANDIDATE_GROUP]
            .iter()
            .zip(1..)
            .map(|(name, id)| UserGroup {
                id,
                name: name.to_string(),
            })
            .collect();
        Self {
            user_groups,
            ..Self::default()
        }
    }

    fn group_id(&self, name: &str) -> Option<i32> {
        self.user_groups
            .iter()
            .find(|g| g.name == name)
            .map(|g| g.id)
    }

    fn in_group(&self, user: &User, group: &str) -> bool {
        self.group_id(group) == Some(user.user_group_id)
    }

    fn insert_user(&mut self, group: &str, name: &str, phone: Option<&str>) -> StoreResult<i32> {
        let user_group_id = self
            .group_id(group)
            .ok_or_else(|| StoreError::Conflict(format!("unknown user group {group}")))?;
        if let Some(phone) = phone.filter(|p| !p.is_empty()) {
            if self.users.iter().any(|u| u.phone.as_deref() == Some(phone)) {
                return Err(StoreError::Conflict(format!(
                    "phone {phone} is already registered"
                )));
            }
        }
        let id = self.users.len() as i32 + 1;
        self.users.push(User {
            id,
            user_group_id,
            name: name.to_string(),
            phone: phone.map(str::to_string),
        });
        Ok(id)
    }

    fn insert_offer(&mut self, offer: &NewJobOffer) -> StoreResult<JobOffer> {
        if !self.users.iter().any(|u| u.id == offer.employer_id) {
            return Err(StoreError::Conflict(format!(
                "employer {} does not exist",
                offer.employer_id
            )));
        }
        let created = JobOffer {
            id: self.job_offers.len() as i32 + 1,
            employer_id: offer.employer_id,
            department: offer.department.clone(),
            manager: offer.manager.clone(),
            salary: offer.salary,
            create_date: now(),
            accepted_by: None,
            start_date: None,
        };
        self.job_offers.push(created.clone());
        Ok(created)
    }

    fn insert_roster(&mut self, job_offer_id: i32, candidate_ids: &[i32]) -> StoreResult<u64> {
        if !self.job_offers.iter().any(|o| o.id == job_offer_id) {
            return Err(StoreError::Conflict(format!(
                "job offer {job_offer_id} does not exist"
            )));
        }
        for &candidate_id in candidate_ids {
            if !self.users.iter().any(|u| u.id == candidate_id) {
                return Err(StoreError::Conflict(format!(
                    "candidate {candidate_id} does not exist"
                )));
            }
            if self
                .job_candidates
                .iter()
                .any(|jc| jc.job_offer_id == job_offer_id && jc.candidate_id == candidate_id)
            {
                return Err(StoreError::Conflict(format!(
                    "candidate {candidate_id} is already invited to job offer {job_offer_id}"
                )));
            }
            let id = self.job_candidates.len() as i32 + 1;
            self.job_candidates.push(JobCandidate {
                id,
                job_offer_id,
                candidate_id,
            });
        }
        Ok(candidate_ids.len() as u64)
    }
}

#[derive(Clone)]
pub struct MemoryOfferStore {
    tables: Arc<Mutex<Tables>>,
}

impl Default for MemoryOfferStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryOfferStore {
    /// Empty store holding only the employer and candidate groups.
    pub fn new() -> Self {
        Self {
            tables: Arc::new(Mutex::new(Tables::with_groups())),
        }
    }

    /// Store preloaded with the sample employers, candidates and offers.
    pub async fn with_sample_data() -> StoreResult<Self> {
        let store = Self::new();
        {
            let mut tables = store.tables.lock().await;
            let mut employer_ids = Vec::with_capacity(SAMPLE_EMPLOYERS.len());
            for name in SAMPLE_EMPLOYERS {
                employer_ids.push(tables.insert_user(EMPLOYER_GROUP, name, None)?);
            }
            for (name, phone) in SAMPLE_CANDIDATES {
                tables.insert_user(CANDIDATE_GROUP, name, Some(*phone))?;
            }
            for sample in SAMPLE_OFFERS {
                let employer_id = employer_ids[sample.employer];
                let offer = tables.insert_offer(&NewJobOffer {
                    employer_id,
                    department: sample.department.to_string(),
                    manager: sample.manager.to_string(),
                    salary: sample.salary,
                })?;
                let candidate_ids: Vec<i32> = tables
                    .users
                    .iter()
                    .filter(|u| {
                        u.phone
                            .as_deref()
                            .is_some_and(|p| sample.candidate_phones.contains(&p))
                    })
                    .map(|u| u.id)
                    .collect();
                tables.insert_roster(offer.id, &candidate_ids)?;
            }
        }
        Ok(store)
    }

    pub async fn add_employer(&self, name: &str) -> StoreResult<i32> {
        self.tables.lock().await.insert_user(EMPLOYER_GROUP, name, None)
    }

    /// Rejects a phone already held by another user.
    pub async fn add_candidate(&self, name: &str, phone: Option<&str>) -> StoreResult<i32> {
        self.tables
            .lock()
            .await
            .insert_user(CANDIDATE_GROUP, name, phone)
    }

    pub async fn job_offers(&self) -> Vec<JobOffer> {
        self.tables.lock().await.job_offers.clone()
    }

    pub async fn job_candidates(&self) -> Vec<JobCandidate> {
        self.tables.lock().await.job_candidates.clone()
    }
}

#[async_trait]
impl OfferStore for MemoryOfferStore {
    async fn begin(&self) -> StoreResult<Box<dyn OfferTx>> {
        let guard = self.tables.clone().lock_owned().await;
        let working = (*guard).clone();
        Ok(Box::new(MemoryOfferTx {
            guard: Some(guard),
            working,
        }))
    }
}

pub struct MemoryOfferTx {
    guard: Option<OwnedMutexGuard<Tables>>,
    working: Tables,
}

impl MemoryOfferTx {
    fn tables(&mut self) -> StoreResult<&mut Tables> {
        if self.guard.is_none() {
            return Err(StoreError::TransactionClosed);
        }
        Ok(&mut self.working)
    }
}

#[async_trait]
impl OfferTx for MemoryOfferTx {
    async fn find_employer(&mut self, employer_id: i32) -> StoreResult<Option<User>> {
        let tables: &Tables = self.tables()?;
        Ok(tables
            .users
            .iter()
            .find(|u| u.id == employer_id && tables.in_group(u, EMPLOYER_GROUP))
            .cloned())
    }

    async fn find_candidates_by_phones(&mut self, phones: &[String]) -> StoreResult<Vec<User>> {
        let tables: &Tables = self.tables()?;
        Ok(tables
            .users
            .iter()
            .filter(|u| tables.in_group(u, CANDIDATE_GROUP))
            .filter(|u| match u.phone.as_deref() {
                Some(phone) if !phone.is_empty() => phones.iter().any(|p| p == phone),
                _ => false,
            })
            .cloned()
            .collect())
    }

    async fn insert_offer(&mut self, offer: &NewJobOffer) -> StoreResult<JobOffer> {
        self.tables()?.insert_offer(offer)
    }

    async fn insert_roster(
        &mut self,
        job_offer_id: i32,
        candidate_ids: &[i32],
    ) -> StoreResult<u64> {
        self.tables()?.insert_roster(job_offer_id, candidate_ids)
    }

    async fn invited_candidates(
        &mut self,
        job_offer_id: i32,
    ) -> StoreResult<Vec<InvitedCandidate>> {
        let tables: &Tables = self.tables()?;
        let Some(offer) = tables.job_offers.iter().find(|o| o.id == job_offer_id) else {
            return Ok(Vec::new());
        };
        let Some(employer) = tables.users.iter().find(|u| u.id == offer.employer_id) else {
            return Ok(Vec::new());
        };

        let mut rows: Vec<InvitedCandidate> = tables
            .job_candidates
            .iter()
            .filter(|jc| jc.job_offer_id == job_offer_id)
            .filter_map(|jc| tables.users.iter().find(|u| u.id == jc.candidate_id))
            .filter(|c| tables.in_group(c, CANDIDATE_GROUP))
            .map(|c| InvitedCandidate {
                job_offer_id,
                candidate_id: c.id,
                phone: c.phone.clone(),
                department: offer.department.clone(),
                manager: offer.manager.clone(),
                salary: offer.salary,
                create_date: offer.create_date,
                accepted_by: offer.accepted_by,
                start_date: offer.start_date,
                employer_name: employer.name.clone(),
            })
            .collect();
        rows.sort_by_key(|r| r.candidate_id);
        Ok(rows)
    }

    async fn accept_if_open(
        &mut self,
        job_offer_id: i32,
        candidate_id: i32,
        start_date: NaiveDate,
    ) -> StoreResult<Option<Acceptance>> {
        let tables = self.tables()?;
        let Some(offer) = tables.job_offers.iter_mut().find(|o| o.id == job_offer_id) else {
            return Ok(None);
        };
        if offer.accepted_by.is_none() {
            offer.accepted_by = Some(candidate_id);
            offer.start_date = Some(start_date);
        }
        Ok(Some(Acceptance {
            accepted_by: offer.accepted_by,
            start_date: offer.start_date,
        }))
    }

    async fn commit(&mut self) -> StoreResult<()> {
        let mut guard = self.guard.take().ok_or(StoreError::TransactionClosed)?;
        *guard = std::mem::take(&mut self.working);
        Ok(())
    }
}
