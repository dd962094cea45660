//! Progression stage tracker.
//!
//! Each enrollment motif has a fixed, ordered stage sequence. A stage carries
//! a display label, Bootstrap color tokens for the progress bar, and a
//! percentage weight; weights within a sequence sum to exactly 100, so the
//! cumulative percentage at the terminal stage is always 100.
//!
//! The tracker resolves a stored stage key against the sequence and reports
//! index, cumulative percentage and display attributes. An unknown key is a
//! recoverable [`ProgressionError::EtapeInconnue`] — the caller renders an
//! explicit "invalid stage" state instead of defaulting to stage zero. The
//! same signal fires when an enrollment's motif is switched and its stored
//! stage does not exist in the new sequence, forcing the caller to reset to
//! `inscription`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Etape, Motif};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProgressionError {
    /// The stored stage key is not part of the selected motif's sequence.
    #[error("étape « {0} » absente de la séquence du motif")]
    EtapeInconnue(String),
}

/// One stage of a motif's sequence: key, display label, progress-bar color
/// tokens and percentage weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EtapeDef {
    pub etape: Etape,
    pub libelle: &'static str,
    pub couleur: &'static str,
    pub couleur_fond: &'static str,
    pub pourcentage: u8,
}

const ETAPES_PERMIS: [EtapeDef; 9] = [
    EtapeDef {
        etape: Etape::Inscription,
        libelle: "Inscription",
        couleur: "primary",
        couleur_fond: "primary",
        pourcentage: 5,
    },
    EtapeDef {
        etape: Etape::VisiteMedicale,
        libelle: "Visite Médicale",
        couleur: "warning",
        couleur_fond: "warning",
        pourcentage: 10,
    },
    EtapeDef {
        etape: Etape::CoursDeCode,
        libelle: "Cours de Code",
        couleur: "info",
        couleur_fond: "info",
        pourcentage: 30,
    },
    EtapeDef {
        etape: Etape::PretPourExamenCode,
        libelle: "Prêt pour Examen de Code",
        couleur: "success",
        couleur_fond: "success",
        pourcentage: 10,
    },
    EtapeDef {
        etape: Etape::ProgrammePourLeCode,
        libelle: "Programmé pour le Code",
        couleur: "success",
        couleur_fond: "success-subtle",
        pourcentage: 5,
    },
    EtapeDef {
        etape: Etape::CoursDeConduite,
        libelle: "Cours de Conduite",
        couleur: "info",
        couleur_fond: "info",
        pourcentage: 25,
    },
    EtapeDef {
        etape: Etape::PretPourExamenConduite,
        libelle: "Prêt pour Examen de Conduite",
        couleur: "success",
        couleur_fond: "success",
        pourcentage: 5,
    },
    EtapeDef {
        etape: Etape::ProgrammePourLaConduite,
        libelle: "Programmé pour la Conduite",
        couleur: "success",
        couleur_fond: "success-subtle",
        pourcentage: 5,
    },
    EtapeDef {
        etape: Etape::Termine,
        libelle: "Terminé",
        couleur: "success",
        couleur_fond: "success",
        pourcentage: 5,
    },
];

// Refresher candidates skip the medical visit and the whole code track.
const ETAPES_RECYCLAGE: [EtapeDef; 5] = [
    EtapeDef {
        etape: Etape::Inscription,
        libelle: "Inscription",
        couleur: "primary",
        couleur_fond: "primary",
        pourcentage: 30,
    },
    EtapeDef {
        etape: Etape::CoursDeConduite,
        libelle: "Cours de Conduite",
        couleur: "info",
        couleur_fond: "info",
        pourcentage: 30,
    },
    EtapeDef {
        etape: Etape::PretPourExamenConduite,
        libelle: "Prêt pour Examen de Conduite",
        couleur: "success",
        couleur_fond: "success",
        pourcentage: 20,
    },
    EtapeDef {
        etape: Etape::ProgrammePourLaConduite,
        libelle: "Programmé pour la Conduite",
        couleur: "success",
        couleur_fond: "success-subtle",
        pourcentage: 10,
    },
    EtapeDef {
        etape: Etape::Termine,
        libelle: "Terminé",
        couleur: "success",
        couleur_fond: "success",
        pourcentage: 10,
    },
];

/// Fixed stage sequence for a motif.
pub fn etapes_pour(motif: Motif) -> &'static [EtapeDef] {
    match motif {
        Motif::Permis => &ETAPES_PERMIS,
        Motif::Recyclage => &ETAPES_RECYCLAGE,
    }
}

/// Resolved position of a stored stage key within a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EtapeCourante {
    pub index: usize,
    /// Sum of the weights of every stage at or before `index`.
    pub pourcentage_cumule: u8,
    pub libelle: &'static str,
    pub couleur: &'static str,
    pub couleur_fond: &'static str,
}

/// Locates `etape` in `etapes` and computes the cumulative percentage.
///
/// # Errors
///
/// [`ProgressionError::EtapeInconnue`] when the key is not in the sequence.
pub fn etape_courante(
    etapes: &[EtapeDef],
    etape: Etape,
) -> Result<EtapeCourante, ProgressionError> {
    let index = etapes
        .iter()
        .position(|def| def.etape == etape)
        .ok_or_else(|| ProgressionError::EtapeInconnue(etape.as_str().to_string()))?;

    let pourcentage_cumule = etapes[..=index]
        .iter()
        .map(|def| def.pourcentage)
        .sum();

    let def = &etapes[index];
    Ok(EtapeCourante {
        index,
        pourcentage_cumule,
        libelle: def.libelle,
        couleur: def.couleur,
        couleur_fond: def.couleur_fond,
    })
}

/// Whether the "rattacher un moniteur" action is offered at this stage.
///
/// Exactly the two lesson stages. The assignment lives on the progression
/// record and persists once the student moves on.
pub fn moniteur_assignable(etape: Etape) -> bool {
    matches!(etape, Etape::CoursDeCode | Etape::CoursDeConduite)
}

/// Direction of a proposed stage change within one sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    Avance,
    Recul,
    Identique,
}

/// Classifies a proposed move from `de` to `vers`.
///
/// Nothing is forbidden — backward moves stay available for manual
/// correction — but callers can now surface a regression for confirmation
/// instead of applying it silently.
pub fn classer_transition(
    etapes: &[EtapeDef],
    de: Etape,
    vers: Etape,
) -> Result<Transition, ProgressionError> {
    let depart = etape_courante(etapes, de)?.index;
    let arrivee = etape_courante(etapes, vers)?.index;

    Ok(match arrivee.cmp(&depart) {
        std::cmp::Ordering::Greater => Transition::Avance,
        std::cmp::Ordering::Less => Transition::Recul,
        std::cmp::Ordering::Equal => Transition::Identique,
    })
}
