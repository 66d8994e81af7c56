//! Rows generated for demo data.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

pub struct NewsSeed {
    pub title: String,
    pub summary: String,
    pub content: String,
    pub category: &'static str,
    pub cover_image_url: String,
    pub published_at: DateTime<Utc>,
}

pub struct EventSeed {
    pub title: String,
    pub description: String,
    pub event_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub location: String,
    pub category: &'static str,
}

pub struct StaffSeed {
    pub full_name: String,
    pub position: &'static str,
    pub department: &'static str,
    pub email: String,
}

pub struct FaqSeed {
    pub question: String,
    pub answer: String,
}

pub struct AlbumSeed {
    pub title: String,
    pub description: String,
    pub cover_image_url: String,
    pub event_date: NaiveDate,
}

pub struct PhotoSeed {
    pub album_id: Uuid,
    pub image_url: String,
    pub caption: String,
    pub order_position: i32,
}

pub struct MessageSeed {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

/// How many rows of each kind to generate.
#[derive(Clone, Debug)]
pub struct SeedConfig {
    pub news: usize,
    pub events: usize,
    pub staff: usize,
    pub faqs: usize,
    pub albums: usize,
    pub photos_per_album: usize,
    pub messages: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            news: 20,
            events: 12,
            staff: 30,
            faqs: 8,
            albums: 6,
            photos_per_album: 12,
            messages: 15,
        }
    }
}
