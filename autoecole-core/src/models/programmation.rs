use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ExamenType;

/// A scheduled exam session and the students registered for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Programmation {
    pub id: i64,
    pub examen: ExamenType,
    pub date_prog: NaiveDate,
    pub etudiant_ids: Vec<i64>,
    pub created_at: DateTime<Utc>,
}

/// Session creation payload. Every listed student must currently be at the
/// exam's `prêt_pour_examen_*` stage; scheduling moves them to
/// `programmé_pour_*`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NouvelleProgrammation {
    pub examen: ExamenType,
    pub date_prog: NaiveDate,
    pub etudiant_ids: Vec<i64>,
}
