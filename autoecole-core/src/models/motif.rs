use serde::{Deserialize, Serialize};

/// Reason a student is enrolled. Immutable once the enrollment exists:
/// switching it resets the category selection and the stage list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Motif {
    Permis,
    Recyclage,
}

impl Motif {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Permis => "permis",
            Self::Recyclage => "recyclage",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "permis" => Some(Self::Permis),
            "recyclage" => Some(Self::Recyclage),
            _ => None,
        }
    }
}
