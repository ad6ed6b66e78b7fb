use crate::routes::api;
use crate::routes::health;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(info(
    title = "bridelab-server",
    description = "Bridal styling portal API",
    version = "0.1.0",
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(health::HealthApi::openapi());
    root.merge(api::api_docs());
    root
}
