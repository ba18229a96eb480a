//! Decides whether a phone number belongs to a candidate invited to an offer.
//!
//! An offer with no roster at all is reported as missing, while a populated
//! roster that lacks the phone means the caller is not invited. Callers expose
//! these two outcomes with different status codes.

use crate::database::store::OfferTx;
use crate::error::{Error, Result};
use crate::models::job_candidate::InvitedCandidate;
use crate::models::offer_view::OfferView;

/// Resolves `phone` against the roster of `job_offer_id` inside `tx`, so a
/// following write in the same transaction acts on what was read here.
pub async fn resolve(tx: &mut dyn OfferTx, job_offer_id: i32, phone: &str) -> Result<OfferView> {
    let roster = tx.invited_candidates(job_offer_id).await?;
    select_invitation(job_offer_id, phone, roster)
}

/// Picks the roster entry whose phone equals `phone` verbatim. Should several
/// invited candidates share the phone, the lowest candidate id wins.
pub fn select_invitation(
    job_offer_id: i32,
    phone: &str,
    roster: Vec<InvitedCandidate>,
) -> Result<OfferView> {
    if roster.is_empty() {
        return Err(Error::OfferNotFound(job_offer_id));
    }

    roster
        .into_iter()
        .filter(|row| row.phone.as_deref() == Some(phone))
        .min_by_key(|row| row.candidate_id)
        .map(|row| OfferView::from_invitation(row, phone))
        .ok_or_else(|| Error::NotInvited {
            job_offer_id,
            phone: phone.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn row(candidate_id: i32, phone: Option<&str>) -> InvitedCandidate {
        InvitedCandidate {
            job_offer_id: 7,
            candidate_id,
            phone: phone.map(str::to_string),
            department: "department_1".into(),
            manager: "manager_1".into(),
            salary: 500_000,
            create_date: Utc.with_ymd_and_hms(2026, 10, 1, 9, 0, 0).unwrap(),
            accepted_by: None,
            start_date: None,
            employer_name: "sberbank".into(),
        }
    }

    #[test]
    fn empty_roster_means_offer_not_found() {
        let err = select_invitation(7, "+111111111", Vec::new()).unwrap_err();
        assert!(matches!(err, Error::OfferNotFound(7)));
    }

    #[test]
    fn uninvited_phone_is_forbidden() {
        let roster = vec![row(3, Some("+111111111")), row(4, Some("+222222222"))];
        let err = select_invitation(7, "+999999999", roster).unwrap_err();
        match err {
            Error::NotInvited {
                job_offer_id,
                phone,
            } => {
                assert_eq!(job_offer_id, 7);
                assert_eq!(phone, "+999999999");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn phone_is_matched_verbatim() {
        let roster = vec![row(3, Some("+111111111"))];
        assert!(select_invitation(7, "111111111", roster.clone()).is_err());
        assert!(select_invitation(7, "+111111111 ", roster).is_err());
    }

    #[test]
    fn invited_phone_yields_offer_view() {
        let mut accepted = row(4, Some("+222222222"));
        accepted.accepted_by = Some(4);
        accepted.start_date = NaiveDate::from_ymd_opt(2026, 11, 1);
        let roster = vec![row(3, Some("+111111111")), accepted];

        let view = select_invitation(7, "+222222222", roster).unwrap();
        assert_eq!(view.candidate_id, 4);
        assert_eq!(view.employer_name, "sberbank");
        assert_eq!(view.start_date, NaiveDate::from_ymd_opt(2026, 11, 1));
        assert!(!view.is_open());
    }

    #[test]
    fn shared_phone_resolves_to_lowest_candidate_id() {
        let roster = vec![row(9, Some("+555")), row(5, Some("+555")), row(6, None)];
        let view = select_invitation(7, "+555", roster).unwrap();
        assert_eq!(view.candidate_id, 5);
    }
}
