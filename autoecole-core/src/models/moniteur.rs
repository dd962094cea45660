use serde::{Deserialize, Serialize};

/// What an instructor teaches; used to filter the assignment list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Specialite {
    Code,
    Conduite,
}

impl Specialite {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Conduite => "conduite",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "code" => Some(Self::Code),
            "conduite" => Some(Self::Conduite),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Moniteur {
    pub id: i64,
    pub nom: String,
    pub prenom: String,
    pub num_telephone: String,
    pub specialite: Specialite,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NouveauMoniteur {
    pub nom: String,
    pub prenom: String,
    pub num_telephone: String,
    pub specialite: Specialite,
}
