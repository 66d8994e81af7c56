//! Admin dashboard: counters plus the list of the selected panel.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DashboardTab {
    Overview,
    News,
    Events,
    Gallery,
    Administrators,
    Staff,
    Students,
    Curriculum,
    Facilities,
    Milestones,
    Faqs,
    Admissions,
    Messages,
    Settings,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 14] = [
        DashboardTab::Overview,
        DashboardTab::News,
        DashboardTab::Events,
        DashboardTab::Gallery,
        DashboardTab::Administrators,
        DashboardTab::Staff,
        DashboardTab::Students,
        DashboardTab::Curriculum,
        DashboardTab::Facilities,
        DashboardTab::Milestones,
        DashboardTab::Faqs,
        DashboardTab::Admissions,
        DashboardTab::Messages,
        DashboardTab::Settings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DashboardTab::Overview => "overview",
            DashboardTab::News => "news",
            DashboardTab::Events => "events",
            DashboardTab::Gallery => "gallery",
            DashboardTab::Administrators => "administrators",
            DashboardTab::Staff => "staff",
            DashboardTab::Students => "students",
            DashboardTab::Curriculum => "curriculum",
            DashboardTab::Facilities => "facilities",
            DashboardTab::Milestones => "milestones",
            DashboardTab::Faqs => "faqs",
            DashboardTab::Admissions => "admissions",
            DashboardTab::Messages => "messages",
            DashboardTab::Settings => "settings",
        }
    }
}

impl fmt::Display for DashboardTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DashboardTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.as_str() == s)
            .ok_or_else(|| format!("Unknown dashboard tab: {}", s))
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    /// Panel whose list to include (default: overview)
    pub tab: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct DashboardCounts {
    pub published_news: i64,
    pub upcoming_events: i64,
    pub active_staff: i64,
    pub albums: i64,
    pub photos: i64,
    pub pending_admissions: i64,
    pub unread_messages: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub tab: DashboardTab,
    pub counts: DashboardCounts,
    /// List of the selected panel; absent for `overview`
    #[schema(value_type = Object)]
    pub items: Option<serde_json::Value>,
}
