//! Albums with photos, and contact messages.

use std::time::Instant;

use chrono::{Duration, Utc};
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::faker::name::en::Name;
use rayon::prelude::*;
use schoolhub_db::{OrderScope, next_order_position};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::models::{AlbumSeed, MessageSeed, PhotoSeed};
use super::picsum_url;

type SeedResult<T> = Result<T, Box<dyn std::error::Error>>;

pub fn generate_albums(count: usize) -> Vec<AlbumSeed> {
    let today = Utc::now().date_naive();
    (0..count)
        .into_par_iter()
        .map(|i| AlbumSeed {
            title: Sentence(2..5).fake(),
            description: Sentence(8..16).fake(),
            cover_image_url: picsum_url("album", i),
            event_date: today - Duration::days(i as i64 * 14),
        })
        .collect()
}

pub fn generate_photos(album_ids: &[Uuid], per_album: usize) -> Vec<PhotoSeed> {
    album_ids
        .par_iter()
        .enumerate()
        .flat_map(|(album_idx, &album_id)| {
            (0..per_album)
                .map(|photo_idx| PhotoSeed {
                    album_id,
                    image_url: picsum_url("photo", album_idx * 1000 + photo_idx),
                    caption: Sentence(3..8).fake(),
                    order_position: photo_idx as i32 + 1,
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

pub fn generate_messages(count: usize) -> Vec<MessageSeed> {
    (0..count)
        .into_par_iter()
        .map(|i| MessageSeed {
            name: Name().fake(),
            email: SafeEmail().fake(),
            phone: format!("08{:08}", (i * 7_919) % 100_000_000),
            subject: Sentence(3..7).fake(),
            message: Paragraph(1..4).fake(),
        })
        .collect()
}

/// Seeds albums and their photos in one transaction.
pub async fn seed_gallery(
    db: &PgPool,
    albums: usize,
    photos_per_album: usize,
) -> SeedResult<(usize, usize)> {
    let start_time = Instant::now();
    println!(
        "🖼️  Seeding {} albums with {} photos each...",
        albums, photos_per_album
    );

    let album_rows = generate_albums(albums);
    let mut tx = db.begin().await?;
    let first = next_order_position(&mut tx, OrderScope::Table("gallery_albums")).await?;

    let mut album_ids = Vec::with_capacity(album_rows.len());
    for (i, album) in album_rows.iter().enumerate() {
        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO gallery_albums (title, description, cover_image_url, event_date, order_position)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(&album.title)
        .bind(&album.description)
        .bind(&album.cover_image_url)
        .bind(album.event_date)
        .bind(first + i as i32)
        .fetch_one(&mut *tx)
        .await?;
        album_ids.push(id);
    }

    let photos = generate_photos(&album_ids, photos_per_album);
    for chunk in photos.chunks(500) {
        let mut builder = QueryBuilder::<Postgres>::new(
            "INSERT INTO gallery_photos (album_id, image_url, caption, order_position) ",
        );
        builder.push_values(chunk, |mut b, photo| {
            b.push_bind(photo.album_id)
                .push_bind(photo.image_url.clone())
                .push_bind(photo.caption.clone())
                .push_bind(photo.order_position);
        });
        builder.build().execute(&mut *tx).await?;
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} albums and {} photos in {:?}",
        album_ids.len(),
        photos.len(),
        start_time.elapsed()
    );
    Ok((album_ids.len(), photos.len()))
}

pub async fn seed_messages(db: &PgPool, count: usize) -> SeedResult<u64> {
    let start_time = Instant::now();
    println!("✉️  Seeding {} contact messages...", count);

    let rows = generate_messages(count);
    let mut inserted = 0;
    for chunk in rows.chunks(500) {
        let mut builder = QueryBuilder::<Postgres>::new(
            "INSERT INTO contact_messages (name, email, phone, subject, message) ",
        );
        builder.push_values(chunk, |mut b, row| {
            b.push_bind(row.name.clone())
                .push_bind(row.email.clone())
                .push_bind(row.phone.clone())
                .push_bind(row.subject.clone())
                .push_bind(row.message.clone());
        });
        inserted += builder.build().execute(db).await?.rows_affected();
    }

    println!(
        "   ✓ Inserted {} messages in {:?}",
        inserted,
        start_time.elapsed()
    );
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_photos_per_album() {
        let albums = vec![Uuid::new_v4(), Uuid::new_v4()];
        let photos = generate_photos(&albums, 3);
        assert_eq!(photos.len(), 6);
        assert_eq!(
            photos.iter().filter(|p| p.album_id == albums[1]).count(),
            3
        );
    }

    #[test]
    fn test_photo_positions_start_at_one_per_album() {
        let albums = vec![Uuid::new_v4()];
        let photos = generate_photos(&albums, 3);
        let positions: Vec<i32> = photos.iter().map(|p| p.order_position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }

    #[test]
    fn test_message_phones_are_ten_digits() {
        for message in generate_messages(20) {
            assert_eq!(message.phone.len(), 10);
            assert!(message.phone.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
