pub mod job_candidate;
pub mod job_offer;
pub mod offer_view;
pub mod user;
pub mod user_group;
