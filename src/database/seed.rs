//! Sample data set loaded by the in-memory store and, on request, into an
//! empty PostgreSQL database.

use sqlx::PgPool;
use tracing::info;

use crate::error::Result;
use crate::models::user_group::{CANDIDATE_GROUP, EMPLOYER_GROUP};

pub struct SampleOffer {
    /// Index into [`SAMPLE_EMPLOYERS`].
    pub employer: usize,
    pub department: &'static str,
    pub manager: &'static str,
    pub salary: i32,
    pub candidate_phones: &'static [&'static str],
}

pub const SAMPLE_EMPLOYERS: &[&str] = &["sberbank", "domclick"];

pub const SAMPLE_CANDIDATES: &[(&str, &str)] = &[
    ("candidate_1", "+111111111"),
    ("candidate_2", "+222222222"),
    ("candidate_3", "+333333333"),
    ("candidate_4", "+444444444"),
];

pub const SAMPLE_OFFERS: &[SampleOffer] = &[
    SampleOffer {
        employer: 0,
        department: "department_1",
        manager: "manager_1",
        salary: 500_000,
        candidate_phones: &["+111111111", "+222222222"],
    },
    SampleOffer {
        employer: 1,
        department: "department_2",
        manager: "manager_2",
        salary: 100_000_000,
        candidate_phones: &["+333333333", "+444444444"],
    },
];

/// Inserts the sample data set unless the database already has users.
/// Returns whether anything was written.
pub async fn seed_sample_data(pool: &PgPool) -> Result<bool> {
    let mut tx = pool.begin().await?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&mut *tx)
        .await?;
    if existing > 0 {
        info!(existing, "users present, skipping sample data");
        return Ok(false);
    }

    let mut employer_ids = Vec::with_capacity(SAMPLE_EMPLOYERS.len());
    for name in SAMPLE_EMPLOYERS {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO users (user_group_id, name, phone)
            SELECT id, $2, NULL FROM user_groups WHERE name = $1
            RETURNING id
            "#,
        )
        .bind(EMPLOYER_GROUP)
        .bind(*name)
        .fetch_one(&mut *tx)
        .await?;
        employer_ids.push(id);
    }

    for (name, phone) in SAMPLE_CANDIDATES {
        sqlx::query(
            r#"
            INSERT INTO users (user_group_id, name, phone)
            SELECT id, $2, $3 FROM user_groups WHERE name = $1
            "#,
        )
        .bind(CANDIDATE_GROUP)
        .bind(*name)
        .bind(*phone)
        .execute(&mut *tx)
        .await?;
    }

    for sample in SAMPLE_OFFERS {
        let offer_id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO job_offers (employer_id, department, manager, salary, create_date)
            VALUES ($1, $2, $3, $4, NOW())
            RETURNING id
            "#,
        )
        .bind(employer_ids[sample.employer])
        .bind(sample.department)
        .bind(sample.manager)
        .bind(sample.salary)
        .fetch_one(&mut *tx)
        .await?;

        let phones: Vec<String> = sample
            .candidate_phones
            .iter()
            .map(|p| p.to_string())
            .collect();
        sqlx::query(
            r#"
            INSERT INTO job_candidates (job_offer_id, candidate_id)
            SELECT $1, u.id FROM users u WHERE u.phone = ANY($2)
            "#,
        )
        .bind(offer_id)
        .bind(phones)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    info!(
        employers = SAMPLE_EMPLOYERS.len(),
        candidates = SAMPLE_CANDIDATES.len(),
        offers = SAMPLE_OFFERS.len(),
        "sample data inserted"
    );
    Ok(true)
}
