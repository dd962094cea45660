use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ExamenType;

/// A recorded exam outcome.
///
/// `retire` tracks whether the resulting document has been picked up; it has
/// no effect on the student's progression, which stays a manual staff action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resultat {
    pub id: i64,
    pub etudiant_id: i64,
    pub libelle: ExamenType,
    pub retire: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NouveauResultat {
    pub etudiant_id: i64,
    pub libelle: ExamenType,
    pub retire: bool,
}
