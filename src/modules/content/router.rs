use axum::{
    Router,
    routing::{get, patch},
};

use schoolhub_models::Resource;
use schoolhub_models::about::{Facility, Milestone};
use schoolhub_models::curriculum::{CurriculumActivity, CurriculumProgram};
use schoolhub_models::events::Event;
use schoolhub_models::faqs::Faq;
use schoolhub_models::news::News;
use schoolhub_models::people::{Administrator, Staff};
use schoolhub_models::students::{StudentAchievement, StudentActivity};

use crate::state::AppState;

use super::controller::{
    create_item, delete_item, get_item, list_items, set_visibility, update_item,
};

/// `/`, `/{id}` and `/{id}/visibility` for one resource.
pub fn resource_router<R: Resource>() -> Router<AppState> {
    Router::new()
        .route("/", get(list_items::<R>).post(create_item::<R>))
        .route(
            "/{id}",
            get(get_item::<R>)
                .put(update_item::<R>)
                .delete(delete_item::<R>),
        )
        .route("/{id}/visibility", patch(set_visibility::<R>))
}

fn nest<R: Resource>(router: Router<AppState>) -> Router<AppState> {
    router.nest(&format!("/{}", R::SLUG), resource_router::<R>())
}

/// Every content panel except gallery albums, which carry photo routes and
/// are mounted by the gallery module.
pub fn init_content_router() -> Router<AppState> {
    let router = Router::new();
    let router = nest::<News>(router);
    let router = nest::<Event>(router);
    let router = nest::<Administrator>(router);
    let router = nest::<Staff>(router);
    let router = nest::<StudentAchievement>(router);
    let router = nest::<StudentActivity>(router);
    let router = nest::<CurriculumProgram>(router);
    let router = nest::<CurriculumActivity>(router);
    let router = nest::<Facility>(router);
    let router = nest::<Milestone>(router);
    nest::<Faq>(router)
}
