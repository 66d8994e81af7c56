//! News, events, staff and FAQ seeding.

use std::time::Instant;

use chrono::{Duration, Utc};
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::faker::name::en::Name;
use rayon::prelude::*;
use schoolhub_db::{OrderScope, next_order_position};
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::models::{EventSeed, FaqSeed, NewsSeed, StaffSeed};
use super::picsum_url;

const NEWS_CATEGORIES: [&str; 4] = ["general", "academic", "activity", "announcement"];
const EVENT_CATEGORIES: [&str; 3] = ["academic", "activity", "holiday"];
const POSITIONS: [(&str, &str); 5] = [
    ("Teacher", "Mathematics"),
    ("Teacher", "Science"),
    ("Teacher", "Thai Language"),
    ("Teacher", "Foreign Languages"),
    ("Counselor", "Student Affairs"),
];

// Postgres caps a statement at 65535 binds.
const BATCH_SIZE: usize = 500;

type SeedResult<T> = Result<T, Box<dyn std::error::Error>>;

pub fn generate_news(count: usize) -> Vec<NewsSeed> {
    (0..count)
        .into_par_iter()
        .map(|i| NewsSeed {
            title: Sentence(4..9).fake(),
            summary: Sentence(10..20).fake(),
            content: Paragraph(3..6).fake(),
            category: NEWS_CATEGORIES[i % NEWS_CATEGORIES.len()],
            cover_image_url: picsum_url("news", i),
            published_at: Utc::now() - Duration::days(i as i64 * 3),
        })
        .collect()
}

/// Half the events lie ahead of today so the upcoming list is never empty.
pub fn generate_events(count: usize) -> Vec<EventSeed> {
    let today = Utc::now().date_naive();
    (0..count)
        .into_par_iter()
        .map(|i| {
            let offset = i as i64 * 7 - (count as i64 / 2) * 7;
            let event_date = today + Duration::days(offset);
            EventSeed {
                title: Sentence(3..7).fake(),
                description: Paragraph(1..3).fake(),
                event_date,
                end_date: (i % 3 == 0).then(|| event_date + Duration::days(2)),
                location: format!("Building {}", i % 4 + 1),
                category: EVENT_CATEGORIES[i % EVENT_CATEGORIES.len()],
            }
        })
        .collect()
}

pub fn generate_staff(count: usize) -> Vec<StaffSeed> {
    (0..count)
        .into_par_iter()
        .map(|i| {
            let (position, department) = POSITIONS[i % POSITIONS.len()];
            let email: String = SafeEmail().fake();
            StaffSeed {
                full_name: Name().fake(),
                position,
                department,
                email,
            }
        })
        .collect()
}

pub fn generate_faqs(count: usize) -> Vec<FaqSeed> {
    (0..count)
        .map(|_| {
            let question: String = Sentence(5..10).fake();
            FaqSeed {
                question: format!("{}?", question.trim_end_matches('.')),
                answer: Paragraph(1..3).fake(),
            }
        })
        .collect()
}

/// Inserts `rows` after the current last `order_position` of `table`.
async fn insert_ordered<T>(
    db: &PgPool,
    table: &'static str,
    columns: &str,
    rows: &[T],
    push: impl Fn(&mut sqlx::query_builder::Separated<'_, '_, Postgres, &'static str>, &T),
) -> SeedResult<u64> {
    let mut tx = db.begin().await?;
    let first = next_order_position(&mut tx, OrderScope::Table(table)).await?;
    let mut inserted = 0;

    for (chunk_idx, chunk) in rows.chunks(BATCH_SIZE).enumerate() {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "INSERT INTO {} ({}, order_position) ",
            table, columns
        ));
        builder.push_values(chunk.iter().enumerate(), |mut b, (i, row)| {
            push(&mut b, row);
            b.push_bind(first + (chunk_idx * BATCH_SIZE + i) as i32);
        });
        inserted += builder.build().execute(&mut *tx).await?.rows_affected();
    }

    tx.commit().await?;
    Ok(inserted)
}

pub async fn seed_news(db: &PgPool, count: usize) -> SeedResult<u64> {
    let start_time = Instant::now();
    println!("📰 Seeding {} news items...", count);

    let rows = generate_news(count);
    let inserted = insert_ordered(
        db,
        "news",
        "title, summary, content, category, cover_image_url, published_at",
        &rows,
        |b, row| {
            b.push_bind(row.title.clone())
                .push_bind(row.summary.clone())
                .push_bind(row.content.clone())
                .push_bind(row.category)
                .push_bind(row.cover_image_url.clone())
                .push_bind(row.published_at);
        },
    )
    .await?;

    println!("   ✓ Inserted {} news items in {:?}", inserted, start_time.elapsed());
    Ok(inserted)
}

pub async fn seed_events(db: &PgPool, count: usize) -> SeedResult<u64> {
    let start_time = Instant::now();
    println!("📅 Seeding {} events...", count);

    let rows = generate_events(count);
    let inserted = insert_ordered(
        db,
        "events",
        "title, description, event_date, end_date, location, category",
        &rows,
        |b, row| {
            b.push_bind(row.title.clone())
                .push_bind(row.description.clone())
                .push_bind(row.event_date)
                .push_bind(row.end_date)
                .push_bind(row.location.clone())
                .push_bind(row.category);
        },
    )
    .await?;

    println!("   ✓ Inserted {} events in {:?}", inserted, start_time.elapsed());
    Ok(inserted)
}

pub async fn seed_staff(db: &PgPool, count: usize) -> SeedResult<u64> {
    let start_time = Instant::now();
    println!("👥 Seeding {} staff members...", count);

    let rows = generate_staff(count);
    let inserted = insert_ordered(
        db,
        "staff",
        "full_name, position, department, email",
        &rows,
        |b, row| {
            b.push_bind(row.full_name.clone())
                .push_bind(row.position)
                .push_bind(row.department)
                .push_bind(row.email.clone());
        },
    )
    .await?;

    println!("   ✓ Inserted {} staff members in {:?}", inserted, start_time.elapsed());
    Ok(inserted)
}

pub async fn seed_faqs(db: &PgPool, count: usize) -> SeedResult<u64> {
    let start_time = Instant::now();
    println!("❓ Seeding {} FAQ items...", count);

    let rows = generate_faqs(count);
    let inserted = insert_ordered(db, "faqs", "question, answer", &rows, |b, row| {
        b.push_bind(row.question.clone()).push_bind(row.answer.clone());
    })
    .await?;

    println!("   ✓ Inserted {} FAQ items in {:?}", inserted, start_time.elapsed());
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_news_spreads_categories() {
        let news = generate_news(8);
        assert_eq!(news.len(), 8);
        assert!(NEWS_CATEGORIES.iter().all(|c| news.iter().any(|n| n.category == *c)));
        assert!(news.iter().all(|n| n.published_at <= Utc::now()));
    }

    #[test]
    fn test_generate_events_has_valid_ranges() {
        let events = generate_events(10);
        let today = Utc::now().date_naive();
        assert!(events.iter().any(|e| e.event_date >= today));
        assert!(events.iter().any(|e| e.event_date < today));
        assert!(
            events
                .iter()
                .all(|e| e.end_date.is_none_or(|end| end >= e.event_date))
        );
    }

    #[test]
    fn test_generate_faqs_are_questions() {
        assert!(generate_faqs(5).iter().all(|f| f.question.ends_with('?')));
    }
}
