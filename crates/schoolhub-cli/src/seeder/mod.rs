//! Demo data for local development.
//!
//! Content is generated in parallel with Rayon and inserted in batches.
//! New rows are appended after the current last `order_position`, so seeding
//! an existing database keeps its ordering intact.

pub mod content;
pub mod gallery;
pub mod models;

use std::time::Instant;

use sqlx::PgPool;

pub use models::SeedConfig;

/// Tables emptied by [`clear_all`]. Admin accounts and site settings stay.
pub const SEEDED_TABLES: [&str; 13] = [
    "gallery_photos",
    "gallery_albums",
    "news",
    "events",
    "administrators",
    "staff",
    "student_achievements",
    "student_activities",
    "curriculum_programs",
    "curriculum_activities",
    "facilities",
    "milestones",
    "faqs",
];

/// Stable placeholder image for the n-th seeded row of a kind.
pub(crate) fn picsum_url(kind: &str, n: usize) -> String {
    format!("https://picsum.photos/seed/schoolhub-{}-{}/800/600", kind, n)
}

pub async fn seed_all(db: &PgPool, config: SeedConfig) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🌱 Seeding demo data...\n");

    content::seed_news(db, config.news).await?;
    content::seed_events(db, config.events).await?;
    content::seed_staff(db, config.staff).await?;
    content::seed_faqs(db, config.faqs).await?;
    gallery::seed_gallery(db, config.albums, config.photos_per_album).await?;
    gallery::seed_messages(db, config.messages).await?;

    println!("\n✅ Seeding finished in {:?}", start_time.elapsed());
    Ok(())
}

/// Empties every content table plus the inbox and admissions.
pub async fn clear_all(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing content...");

    let mut tx = db.begin().await?;
    let mut deleted = 0;

    for table in SEEDED_TABLES
        .iter()
        .chain(["contact_messages", "admissions"].iter())
    {
        deleted += sqlx::query(&format!("DELETE FROM {}", table))
            .execute(&mut *tx)
            .await?
            .rows_affected();
    }

    tx.commit().await?;

    println!("   ✓ Deleted {} rows in {:?}", deleted, start_time.elapsed());
    Ok(deleted)
}
