use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{Categorie, Motif};

/// An enrolled student.
///
/// `scolarite` is the tuition computed at enrollment time by the rule table;
/// `montant_paye` accumulates recorded payments and never exceeds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Etudiant {
    pub id: i64,
    pub nom: String,
    pub prenom: String,
    pub date_naissance: NaiveDate,
    pub lieu_naissance: String,
    pub commune: String,
    pub num_telephone: String,
    pub num_telephone2: Option<String>,
    pub nom_auto_ec: String,
    pub type_piece: String,
    pub num_piece: String,
    pub motif: Motif,
    pub categorie: Option<Categorie>,
    pub reduction: bool,
    pub scolarite: i64,
    pub montant_paye: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Etudiant {
    /// Outstanding tuition balance, never negative.
    pub fn reste_a_payer(&self) -> i64 {
        (self.scolarite - self.montant_paye).max(0)
    }

    pub fn solde(&self) -> bool {
        self.montant_paye >= self.scolarite
    }
}

/// Enrollment form payload. The repository computes `scolarite`, creates the
/// progression record at `inscription`, and stamps the timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NouvelEtudiant {
    pub nom: String,
    pub prenom: String,
    pub date_naissance: NaiveDate,
    pub lieu_naissance: String,
    pub commune: String,
    pub num_telephone: String,
    pub num_telephone2: Option<String>,
    pub nom_auto_ec: String,
    pub type_piece: String,
    pub num_piece: String,
    pub motif: Motif,
    pub categorie: Option<Categorie>,
    pub reduction: bool,
    pub montant_paye: i64,
}
