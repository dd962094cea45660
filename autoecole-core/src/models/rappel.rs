use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priorite {
    Basse,
    Moyenne,
    Haute,
}

impl Priorite {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basse => "basse",
            Self::Moyenne => "moyenne",
            Self::Haute => "haute",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "basse" => Some(Self::Basse),
            "moyenne" => Some(Self::Moyenne),
            "haute" => Some(Self::Haute),
            _ => None,
        }
    }
}

/// A staff reminder shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rappel {
    pub id: i64,
    pub titre: String,
    pub description: Option<String>,
    pub date_rappel: NaiveDate,
    pub type_rappel: String,
    pub priorite: Priorite,
    /// True once the reminder has been handled.
    pub traite: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NouveauRappel {
    pub titre: String,
    pub description: Option<String>,
    pub date_rappel: NaiveDate,
    pub type_rappel: String,
    pub priorite: Priorite,
    pub traite: bool,
}

/// Badge counts for the sidebar: reminders due soon, split by priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RappelsRecents {
    pub recents: i64,
    pub importants_recents: i64,
}

impl RappelsRecents {
    pub fn total(&self) -> i64 {
        self.recents + self.importants_recents
    }
}
