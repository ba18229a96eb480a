//! OpenAPI document served at `/docs/openapi.json`.

use utoipa::OpenApi;

use crate::dto::job_offer_dto::{
    CreateJobOfferPayload, CreateJobOfferResponse, ErrorResponse, JobOfferDetailsResponse,
    ShowJobOfferPayload, SignJobOfferPayload, SignJobOfferResponse,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Great Job API",
        description = "Employers post job offers to invited candidates; the first candidate to accept takes the offer."
    ),
    paths(
        crate::routes::health::index,
        crate::routes::health::health,
        crate::routes::job_offer::create_job_offer,
        crate::routes::job_offer::get_job_offer_details,
        crate::routes::job_offer::sign_job_offer,
    ),
    components(schemas(
        CreateJobOfferPayload,
        CreateJobOfferResponse,
        ShowJobOfferPayload,
        JobOfferDetailsResponse,
        SignJobOfferPayload,
        SignJobOfferResponse,
        ErrorResponse,
    )),
    tags(
        (name = "job_offer", description = "Creating, showing and signing job offers"),
        (name = "health", description = "Liveness endpoints")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in ["/", "/health", "/add_job_offer", "/get_job_offer_details", "/sign_job_offer"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn payload_schemas_are_registered() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.expect("components").schemas;
        assert!(schemas.contains_key("CreateJobOfferPayload"));
        assert!(schemas.contains_key("SignJobOfferPayload"));
    }
}
