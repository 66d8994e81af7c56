//! Aggregates served to the public pages.

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

use schoolhub_core::PaginationMeta;

pub use schoolhub_models::about::{Facility, Milestone};
pub use schoolhub_models::contact::ContactPage;
pub use schoolhub_models::curriculum::CurriculumPage;
pub use schoolhub_models::events::{CalendarQuery, Event, UpcomingQuery};
pub use schoolhub_models::news::{News, NewsQuery};
pub use schoolhub_models::people::{Administrator, Staff};
pub use schoolhub_models::settings::SiteSettings;
pub use schoolhub_models::students::StudentsPage;

/// Latest news items shown on the home page.
pub const HOME_NEWS_LIMIT: i64 = 3;
/// Upcoming events shown on the home page.
pub const HOME_EVENTS_LIMIT: i64 = 4;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct SiteStats {
    pub staff: i64,
    pub programs: i64,
    pub facilities: i64,
    pub albums: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HomePage {
    pub settings: SiteSettings,
    pub news: Vec<News>,
    pub upcoming_events: Vec<Event>,
    pub stats: SiteStats,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AboutPage {
    pub settings: BTreeMap<String, String>,
    pub facilities: Vec<Facility>,
    pub milestones: Vec<Milestone>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedNewsResponse {
    pub data: Vec<News>,
    pub meta: PaginationMeta,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub events: Vec<Event>,
}
