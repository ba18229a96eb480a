pub mod eligibility_service;
pub mod offer_service;
