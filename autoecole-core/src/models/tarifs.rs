use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Server-supplied pricing overrides, keyed by tariff rule name.
///
/// The table may be partial or missing entirely; every key resolves through a
/// hardcoded default, so an absent entry is never an error. All amounts are
/// whole FCFA.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tarifs(HashMap<String, i64>);

/// Known tariff keys, in the order the rule table consults them.
pub mod cles {
    pub const SCOLARITE_A: &str = "scolarite_A";
    pub const SCOLARITE_B: &str = "scolarite_B";
    pub const SCOLARITE_AB: &str = "scolarite_AB";
    pub const SCOLARITE_BCDE: &str = "scolarite_BCDE";
    pub const SCOLARITE_ABCDE: &str = "scolarite_ABCDE";
    pub const SCOLARITE_RECYCLAGE: &str = "scolarite_recyclage";
    pub const SCOLARITE_REDUCTION: &str = "scolarite_reduction";
    pub const SCOLARITE_PAR_CATEGORIE: &str = "scolarite_par_categorie";

    pub const TOUTES: &[&str] = &[
        SCOLARITE_A,
        SCOLARITE_B,
        SCOLARITE_AB,
        SCOLARITE_BCDE,
        SCOLARITE_ABCDE,
        SCOLARITE_RECYCLAGE,
        SCOLARITE_REDUCTION,
        SCOLARITE_PAR_CATEGORIE,
    ];
}

fn defaut(cle: &str) -> i64 {
    match cle {
        cles::SCOLARITE_A => 30_000,
        cles::SCOLARITE_B => 50_000,
        cles::SCOLARITE_AB => 100_000,
        cles::SCOLARITE_BCDE => 120_000,
        cles::SCOLARITE_ABCDE => 150_000,
        cles::SCOLARITE_RECYCLAGE => 60_000,
        cles::SCOLARITE_REDUCTION => 25_000,
        cles::SCOLARITE_PAR_CATEGORIE => 25_000,
        _ => 0,
    }
}

impl Tarifs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Amount for `cle`, falling back to the documented default when the
    /// server did not supply an override.
    pub fn montant(&self, cle: &str) -> i64 {
        self.0.get(cle).copied().unwrap_or_else(|| defaut(cle))
    }

    /// Override set by the server for `cle`, if any.
    pub fn override_pour(&self, cle: &str) -> Option<i64> {
        self.0.get(cle).copied()
    }

    pub fn definir(&mut self, cle: impl Into<String>, montant: i64) {
        self.0.insert(cle.into(), montant);
    }

    /// Builder form of [`Tarifs::definir`].
    pub fn avec(mut self, cle: impl Into<String>, montant: i64) -> Self {
        self.definir(cle, montant);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn est_vide(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, i64)> for Tarifs {
    fn from_iter<I: IntoIterator<Item = (String, i64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
