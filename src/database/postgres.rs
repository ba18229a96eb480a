use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use crate::database::store::{OfferStore, OfferTx, StoreError, StoreResult};
use crate::models::job_candidate::InvitedCandidate;
use crate::models::job_offer::{Acceptance, JobOffer, NewJobOffer};
use crate::models::user::User;
use crate::models::user_group::{CANDIDATE_GROUP, EMPLOYER_GROUP};

#[derive(Clone)]
pub struct PgOfferStore {
    pool: PgPool,
}

impl PgOfferStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OfferStore for PgOfferStore {
    async fn begin(&self) -> StoreResult<Box<dyn OfferTx>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgOfferTx { tx: Some(tx) }))
    }
}

pub struct PgOfferTx {
    tx: Option<Transaction<'static, Postgres>>,
}

impl PgOfferTx {
    fn conn(&mut self) -> StoreResult<&mut PgConnection> {
        self.tx.as_deref_mut().ok_or(StoreError::TransactionClosed)
    }
}

#[async_trait]
impl OfferTx for PgOfferTx {
    async fn find_employer(&mut self, employer_id: i32) -> StoreResult<Option<User>> {
        let employer = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.user_group_id, u.name, u.phone
            FROM users u
            JOIN user_groups g ON g.id = u.user_group_id
            WHERE g.name = $1 AND u.id = $2
            "#,
        )
        .bind(EMPLOYER_GROUP)
        .bind(employer_id)
        .fetch_optional(self.conn()?)
        .await?;

        Ok(employer)
    }

    async fn find_candidates_by_phones(&mut self, phones: &[String]) -> StoreResult<Vec<User>> {
        let candidates = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.user_group_id, u.name, u.phone
            FROM users u
            JOIN user_groups g ON g.id = u.user_group_id
            WHERE g.name = $1
              AND u.phone IS NOT NULL
              AND u.phone <> ''
              AND u.phone = ANY($2)
            ORDER BY u.id
            "#,
        )
        .bind(CANDIDATE_GROUP)
        .bind(phones.to_vec())
        .fetch_all(self.conn()?)
        .await?;

        Ok(candidates)
    }

    async fn insert_offer(&mut self, offer: &NewJobOffer) -> StoreResult<JobOffer> {
        let created = sqlx::query_as::<_, JobOffer>(
            r#"
            INSERT INTO job_offers (employer_id, department, manager, salary, create_date)
            VALUES ($1, $2, $3, $4, NOW())
            RETURNING id, employer_id, department, manager, salary, create_date, accepted_by, start_date
            "#,
        )
        .bind(offer.employer_id)
        .bind(&offer.department)
        .bind(&offer.manager)
        .bind(offer.salary)
        .fetch_one(self.conn()?)
        .await?;

        Ok(created)
    }

    async fn insert_roster(
        &mut self,
        job_offer_id: i32,
        candidate_ids: &[i32],
    ) -> StoreResult<u64> {
        let res = sqlx::query(
            r#"
            INSERT INTO job_candidates (job_offer_id, candidate_id)
            SELECT $1, UNNEST($2::int4[])
            "#,
        )
        .bind(job_offer_id)
        .bind(candidate_ids.to_vec())
        .execute(self.conn()?)
        .await?;

        Ok(res.rows_affected())
    }

    async fn invited_candidates(
        &mut self,
        job_offer_id: i32,
    ) -> StoreResult<Vec<InvitedCandidate>> {
        let rows = sqlx::query_as::<_, InvitedCandidate>(
            r#"
            SELECT
                jc.job_offer_id,
                c.id AS candidate_id,
                c.phone,
                jo.department,
                jo.manager,
                jo.salary,
                jo.create_date,
                jo.accepted_by,
                jo.start_date,
                e.name AS employer_name
            FROM job_candidates jc
            JOIN users c ON c.id = jc.candidate_id
            JOIN user_groups g ON g.id = c.user_group_id AND g.name = $2
            JOIN job_offers jo ON jo.id = jc.job_offer_id
            JOIN users e ON e.id = jo.employer_id
            WHERE jc.job_offer_id = $1
            ORDER BY c.id
            "#,
        )
        .bind(job_offer_id)
        .bind(CANDIDATE_GROUP)
        .fetch_all(self.conn()?)
        .await?;

        Ok(rows)
    }

    async fn accept_if_open(
        &mut self,
        job_offer_id: i32,
        candidate_id: i32,
        start_date: NaiveDate,
    ) -> StoreResult<Option<Acceptance>> {
        // The right-hand sides see the row as it was before this UPDATE, and a
        // concurrent writer is re-evaluated against the committed winner.
        let acceptance = sqlx::query_as::<_, Acceptance>(
            r#"
            UPDATE job_offers
            SET
                accepted_by = COALESCE(accepted_by, $2),
                start_date = CASE WHEN accepted_by IS NULL THEN $3 ELSE start_date END
            WHERE id = $1
            RETURNING accepted_by, start_date
            "#,
        )
        .bind(job_offer_id)
        .bind(candidate_id)
        .bind(start_date)
        .fetch_optional(self.conn()?)
        .await?;

        Ok(acceptance)
    }

    async fn commit(&mut self) -> StoreResult<()> {
        let tx = self.tx.take().ok_or(StoreError::TransactionClosed)?;
        tx.commit().await?;
        Ok(())
    }
}
