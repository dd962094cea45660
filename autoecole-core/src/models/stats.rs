use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Headline counters for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totaux {
    pub etudiants: i64,
    pub moniteurs: i64,
    pub programmations: i64,
    pub resultats: i64,
}

/// One slice of a distribution chart (per catégorie, étape, moniteur or
/// réduction). `libelle` is the raw grouping key; empty groups are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepartitionEntry {
    pub libelle: String,
    pub count: i64,
}

/// Enrollment count for one calendar day, for the evolution line chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionPoint {
    pub date: NaiveDate,
    pub count: i64,
}
