//! Site-wide settings stored as key/value pairs.
//!
//! The raw table backs a flat `{key: value}` map used by the public pages.
//! [`SiteSettings`] is the typed view of the well-known keys; social links
//! live under [`SOCIAL_LINKS_KEY`] as a JSON array of [`SocialLink`].

use std::borrow::Cow;
use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::validation::{validate_http_url, validate_setting_key};

pub const SOCIAL_LINKS_KEY: &str = "social_links";
pub const MAX_SOCIAL_LINKS: usize = 10;
const MAX_VALUE_LENGTH: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SocialPlatform {
    Facebook,
    Line,
    Youtube,
    Instagram,
    Tiktok,
    X,
    Website,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SocialLink {
    pub platform: SocialPlatform,
    pub url: String,
}

/// Typed view of the settings table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct SiteSettings {
    pub school_name: Option<String>,
    pub school_name_en: Option<String>,
    pub motto: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub office_hours: Option<String>,
    pub map_embed_url: Option<String>,
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub stat_students: Option<String>,
    pub stat_teachers: Option<String>,
    pub stat_years: Option<String>,
    pub social_links: Vec<SocialLink>,
}

impl SiteSettings {
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| map.get(key).filter(|v| !v.is_empty()).cloned();

        Self {
            school_name: get("school_name"),
            school_name_en: get("school_name_en"),
            motto: get("motto"),
            address: get("address"),
            phone: get("phone"),
            email: get("email"),
            office_hours: get("office_hours"),
            map_embed_url: get("map_embed_url"),
            hero_title: get("hero_title"),
            hero_subtitle: get("hero_subtitle"),
            stat_students: get("stat_students"),
            stat_teachers: get("stat_teachers"),
            stat_years: get("stat_years"),
            social_links: map
                .get(SOCIAL_LINKS_KEY)
                .map(|raw| parse_social_links(raw))
                .unwrap_or_default(),
        }
    }
}

/// Parses the stored JSON array. Malformed data yields an empty list.
pub fn parse_social_links(raw: &str) -> Vec<SocialLink> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<Vec<SocialLink>>(raw) {
        Ok(links) => links,
        Err(e) => {
            tracing::warn!(error = %e, "Stored social_links is not valid JSON, ignoring");
            Vec::new()
        }
    }
}

fn invalid(code: &'static str, message: String) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Owned(message))
}

fn validate_setting_values(values: &BTreeMap<String, String>) -> Result<(), ValidationError> {
    for (key, value) in values {
        if key == SOCIAL_LINKS_KEY {
            return Err(invalid(
                "reserved_key",
                "social_links must be sent as a list, not a raw value".to_string(),
            ));
        }
        if validate_setting_key(key).is_err() {
            return Err(invalid("setting_key", format!("Invalid setting key: {}", key)));
        }
        if value.len() > MAX_VALUE_LENGTH {
            return Err(invalid(
                "value_length",
                format!("Value of {} exceeds {} characters", key, MAX_VALUE_LENGTH),
            ));
        }
    }
    Ok(())
}

fn validate_social_links(links: &[SocialLink]) -> Result<(), ValidationError> {
    if links.len() > MAX_SOCIAL_LINKS {
        return Err(invalid(
            "too_many",
            format!("At most {} social links are allowed", MAX_SOCIAL_LINKS),
        ));
    }

    let mut seen = HashSet::new();
    for link in links {
        if !seen.insert(link.platform) {
            return Err(invalid(
                "duplicate_platform",
                format!("Duplicate social platform: {:?}", link.platform).to_lowercase(),
            ));
        }
        if validate_http_url(&link.url).is_err() {
            return Err(invalid(
                "url",
                format!("Invalid URL for {:?}: {}", link.platform, link.url),
            ));
        }
    }
    Ok(())
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateSettingsDto {
    #[serde(default)]
    #[validate(custom(function = "validate_setting_values"))]
    pub values: BTreeMap<String, String>,
    #[validate(custom(function = "validate_social_links"))]
    pub social_links: Option<Vec<SocialLink>>,
}

impl UpdateSettingsDto {
    /// Key/value pairs to upsert, with social links serialized to JSON.
    pub fn into_entries(self) -> Result<Vec<(String, String)>, serde_json::Error> {
        let mut entries: Vec<(String, String)> = self.values.into_iter().collect();
        if let Some(links) = self.social_links {
            entries.push((SOCIAL_LINKS_KEY.to_string(), serde_json::to_string(&links)?));
        }
        Ok(entries)
    }
}

/// Response of the settings endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct SettingsResponse {
    pub values: BTreeMap<String, String>,
    pub typed: SiteSettings,
}

impl SettingsResponse {
    pub fn from_map(values: BTreeMap<String, String>) -> Self {
        let typed = SiteSettings::from_map(&values);
        Self { values, typed }
    }
}
