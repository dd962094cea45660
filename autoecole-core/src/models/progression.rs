use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Etape;

/// Per-enrollment progression record.
///
/// Created alongside the student at `inscription`, advanced by staff action,
/// deleted only with the student. The instructor reference is set while the
/// student is at a lesson stage and persists across later advances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    pub etudiant_id: i64,
    pub etape: Etape,
    pub moniteur_id: Option<i64>,
    pub updated_at: DateTime<Utc>,
}
