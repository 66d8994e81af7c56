use serde::Serialize;
use serde_json::Value;
use sqlx::PgPool;
use tracing::instrument;

use schoolhub_core::{AppError, PaginationParams};
use schoolhub_models::about::{Facility, Milestone};
use schoolhub_models::admissions::{AdmissionFilterParams, AdmissionStatus};
use schoolhub_models::contact::ContactMessageFilterParams;
use schoolhub_models::curriculum::{CurriculumActivity, CurriculumPage, CurriculumProgram};
use schoolhub_models::events::Event;
use schoolhub_models::faqs::Faq;
use schoolhub_models::gallery::GalleryAlbum;
use schoolhub_models::news::News;
use schoolhub_models::people::{Administrator, Staff};
use schoolhub_models::students::{StudentAchievement, StudentActivity, StudentsPage};
use schoolhub_models::Resource;

use crate::modules::admissions::AdmissionService;
use crate::modules::contact::ContactService;
use crate::modules::content::ContentService;
use crate::modules::gallery::GalleryService;
use crate::modules::settings::SettingsService;

use super::model::{DashboardCounts, DashboardResponse, DashboardTab};

fn to_value<T: Serialize>(value: T) -> Result<Value, AppError> {
    Ok(serde_json::to_value(value)?)
}

async fn admin_list<R: Resource>(db: &PgPool) -> Result<Value, AppError> {
    to_value(ContentService::list_admin::<R>(db).await?)
}

pub struct DashboardService;

impl DashboardService {
    #[instrument(skip(db))]
    pub async fn counts(db: &PgPool) -> Result<DashboardCounts, AppError> {
        let upcoming_events = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM events
             WHERE is_published = TRUE AND COALESCE(end_date, event_date) >= CURRENT_DATE",
        )
        .fetch_one(db)
        .await?;

        Ok(DashboardCounts {
            published_news: ContentService::count::<News>(db, true).await?,
            upcoming_events,
            active_staff: ContentService::count::<Staff>(db, true).await?,
            albums: ContentService::count::<GalleryAlbum>(db, false).await?,
            photos: GalleryService::count_photos(db).await?,
            pending_admissions: AdmissionService::count_by_status(db, AdmissionStatus::Pending)
                .await?,
            unread_messages: ContactService::unread_count(db).await?,
        })
    }

    /// Admin list of the panel a tab stands for.
    #[instrument(skip(db))]
    pub async fn items(db: &PgPool, tab: DashboardTab) -> Result<Option<Value>, AppError> {
        let items = match tab {
            DashboardTab::Overview => return Ok(None),
            DashboardTab::News => admin_list::<News>(db).await?,
            DashboardTab::Events => admin_list::<Event>(db).await?,
            DashboardTab::Gallery => admin_list::<GalleryAlbum>(db).await?,
            DashboardTab::Administrators => admin_list::<Administrator>(db).await?,
            DashboardTab::Staff => admin_list::<Staff>(db).await?,
            DashboardTab::Students => to_value(StudentsPage {
                achievements: ContentService::list_admin::<StudentAchievement>(db).await?,
                activities: ContentService::list_admin::<StudentActivity>(db).await?,
            })?,
            DashboardTab::Curriculum => to_value(CurriculumPage {
                programs: ContentService::list_admin::<CurriculumProgram>(db).await?,
                activities: ContentService::list_admin::<CurriculumActivity>(db).await?,
            })?,
            DashboardTab::Facilities => admin_list::<Facility>(db).await?,
            DashboardTab::Milestones => admin_list::<Milestone>(db).await?,
            DashboardTab::Faqs => admin_list::<Faq>(db).await?,
            DashboardTab::Admissions => to_value(
                AdmissionService::list(
                    db,
                    AdmissionFilterParams {
                        search: None,
                        status: None,
                        pagination: PaginationParams::default(),
                    },
                )
                .await?,
            )?,
            DashboardTab::Messages => to_value(
                ContactService::list(
                    db,
                    ContactMessageFilterParams {
                        unread_only: None,
                        pagination: PaginationParams::default(),
                    },
                )
                .await?,
            )?,
            DashboardTab::Settings => to_value(SettingsService::get_response(db).await?)?,
        };

        Ok(Some(items))
    }

    pub async fn load(db: &PgPool, tab: DashboardTab) -> Result<DashboardResponse, AppError> {
        Ok(DashboardResponse {
            tab,
            counts: Self::counts(db).await?,
            items: Self::items(db, tab).await?,
        })
    }
}
