pub mod job_offer_dto;
