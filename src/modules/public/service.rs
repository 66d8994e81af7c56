use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use schoolhub_core::{AppError, PaginationMeta};
use schoolhub_models::Resource;
use schoolhub_models::curriculum::{CurriculumActivity, CurriculumProgram};
use schoolhub_models::faqs::Faq;
use schoolhub_models::gallery::GalleryAlbum;
use schoolhub_models::students::{StudentAchievement, StudentActivity};

use crate::modules::content::ContentService;
use crate::modules::settings::SettingsService;

use super::model::{
    AboutPage, ContactPage, CurriculumPage, Event, Facility, HOME_EVENTS_LIMIT, HOME_NEWS_LIMIT,
    HomePage, Milestone, News, NewsQuery, PaginatedNewsResponse, SiteStats, Staff, StudentsPage,
};

fn push_news_filter(builder: &mut QueryBuilder<'_, Postgres>, category: Option<&str>) {
    builder.push(" WHERE ");
    builder.push(News::public_predicate());
    if let Some(category) = category.map(str::trim).filter(|c| !c.is_empty()) {
        builder.push(" AND category = ");
        builder.push_bind(category.to_string());
    }
}

pub struct PublicService;

impl PublicService {
    #[instrument(skip(db))]
    pub async fn home(db: &PgPool) -> Result<HomePage, AppError> {
        let news = sqlx::query_as::<_, News>(&format!(
            "SELECT {} FROM news WHERE {} ORDER BY published_at DESC LIMIT $1",
            News::COLUMNS,
            News::public_predicate()
        ))
        .bind(HOME_NEWS_LIMIT)
        .fetch_all(db)
        .await?;

        Ok(HomePage {
            settings: SettingsService::get_typed(db).await?,
            news,
            upcoming_events: Self::upcoming_events(db, HOME_EVENTS_LIMIT).await?,
            stats: Self::stats(db).await?,
        })
    }

    pub async fn stats(db: &PgPool) -> Result<SiteStats, AppError> {
        Ok(SiteStats {
            staff: ContentService::count::<Staff>(db, true).await?,
            programs: ContentService::count::<CurriculumProgram>(db, true).await?,
            facilities: ContentService::count::<Facility>(db, true).await?,
            albums: ContentService::count::<GalleryAlbum>(db, true).await?,
        })
    }

    #[instrument(skip(db))]
    pub async fn about(db: &PgPool) -> Result<AboutPage, AppError> {
        Ok(AboutPage {
            settings: SettingsService::get_all(db).await?,
            facilities: ContentService::list_public::<Facility>(db).await?,
            milestones: ContentService::list_public::<Milestone>(db).await?,
        })
    }

    pub async fn students(db: &PgPool) -> Result<StudentsPage, AppError> {
        Ok(StudentsPage {
            achievements: ContentService::list_public::<StudentAchievement>(db).await?,
            activities: ContentService::list_public::<StudentActivity>(db).await?,
        })
    }

    pub async fn curriculum(db: &PgPool) -> Result<CurriculumPage, AppError> {
        Ok(CurriculumPage {
            programs: ContentService::list_public::<CurriculumProgram>(db).await?,
            activities: ContentService::list_public::<CurriculumActivity>(db).await?,
        })
    }

    pub async fn contact_page(db: &PgPool) -> Result<ContactPage, AppError> {
        Ok(ContactPage {
            settings: SettingsService::get_all(db).await?,
            faqs: ContentService::list_public::<Faq>(db).await?,
        })
    }

    /// Published news, newest first. Items scheduled for later stay hidden.
    #[instrument(skip(db))]
    pub async fn list_news(db: &PgPool, query: NewsQuery) -> Result<PaginatedNewsResponse, AppError> {
        let category = query.category.as_deref();

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM news");
        push_news_filter(&mut count, category);
        let total = count.build_query_scalar::<i64>().fetch_one(db).await?;

        let mut select = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM news", News::COLUMNS));
        push_news_filter(&mut select, category);
        select.push(" ORDER BY published_at DESC, created_at DESC LIMIT ");
        select.push_bind(query.pagination.limit());
        select.push(" OFFSET ");
        select.push_bind(query.pagination.offset());
        let data = select.build_query_as::<News>().fetch_all(db).await?;

        Ok(PaginatedNewsResponse {
            data,
            meta: PaginationMeta::new(total, &query.pagination),
        })
    }

    /// Events still running or starting from today on.
    #[instrument(skip(db))]
    pub async fn upcoming_events(db: &PgPool, limit: i64) -> Result<Vec<Event>, AppError> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {} FROM events
             WHERE is_published = TRUE AND COALESCE(end_date, event_date) >= CURRENT_DATE
             ORDER BY event_date ASC, order_position ASC LIMIT $1",
            Event::COLUMNS
        ))
        .bind(limit)
        .fetch_all(db)
        .await?;

        Ok(events)
    }

    /// Events overlapping `[start, end)`; multi-day events show up in every
    /// month they touch.
    #[instrument(skip(db))]
    pub async fn calendar(
        db: &PgPool,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Event>, AppError> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {} FROM events
             WHERE is_published = TRUE
               AND event_date < $2
               AND COALESCE(end_date, event_date) >= $1
             ORDER BY event_date ASC, order_position ASC",
            Event::COLUMNS
        ))
        .bind(start)
        .bind(end)
        .fetch_all(db)
        .await?;

        Ok(events)
    }
}
