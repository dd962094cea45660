//! Tuition rule table.
//!
//! Maps the enrollment inputs (category selection, discount flag, motif) to a
//! tuition amount in FCFA, consulting the server-supplied [`Tarifs`] table and
//! falling back to its documented per-key defaults.
//!
//! Rules overlap, so evaluation order is part of the contract:
//!
//! 1. `recyclage` motif wins outright — category and discount are ignored.
//! 2. Otherwise the discount flag wins — category is ignored.
//! 3. Otherwise the class set is matched exactly, in priority:
//!    {A}, {B}, {A,B}, {B,C,D,E}, {A,B,C,D,E}.
//! 4. Anything else pays the per-category rate times the number of classes.
//!    An empty selection therefore yields 0; validating that a category was
//!    chosen is the caller's job, not the calculator's.
//!
//! # Example
//!
//! ```
//! use autoecole_core::calculations::scolarite;
//! use autoecole_core::{Categorie, Motif, Tarifs};
//!
//! let tarifs = Tarifs::new();
//!
//! // Recyclage ignores both the category and the discount flag.
//! assert_eq!(
//!     scolarite(Some(Categorie::AB), true, Motif::Recyclage, &tarifs),
//!     60_000
//! );
//! // Exact combinations beat the per-category fallback.
//! assert_eq!(
//!     scolarite(Some(Categorie::AB), false, Motif::Permis, &tarifs),
//!     100_000
//! );
//! ```

use std::collections::BTreeSet;

use tracing::debug;

use crate::models::tarifs::cles;
use crate::models::{Categorie, Motif, PermisClasse, Tarifs};

/// Tuition for an enrollment form selection.
///
/// Pure and total: no input combination fails, and identical inputs always
/// produce identical amounts.
pub fn scolarite(
    categorie: Option<Categorie>,
    reduction: bool,
    motif: Motif,
    tarifs: &Tarifs,
) -> i64 {
    let classes: BTreeSet<PermisClasse> = categorie
        .map(|c| c.classes().iter().copied().collect())
        .unwrap_or_default();
    scolarite_pour_classes(&classes, reduction, motif, tarifs)
}

/// Tuition for an arbitrary set of permit classes.
///
/// The enrollment UI only ever produces the sets behind [`Categorie`], but
/// the rule table itself is defined over class sets, so unlisted combinations
/// (say {A,C}) still price via the per-category fallback.
pub fn scolarite_pour_classes(
    classes: &BTreeSet<PermisClasse>,
    reduction: bool,
    motif: Motif,
    tarifs: &Tarifs,
) -> i64 {
    use PermisClasse::*;

    if motif == Motif::Recyclage {
        return tarifs.montant(cles::SCOLARITE_RECYCLAGE);
    }

    if reduction {
        return tarifs.montant(cles::SCOLARITE_REDUCTION);
    }

    // BTreeSet iterates in class order, so an exact match is a slice compare.
    let triees: Vec<PermisClasse> = classes.iter().copied().collect();
    match triees.as_slice() {
        [A] => tarifs.montant(cles::SCOLARITE_A),
        [B] => tarifs.montant(cles::SCOLARITE_B),
        [A, B] => tarifs.montant(cles::SCOLARITE_AB),
        [B, C, D, E] => tarifs.montant(cles::SCOLARITE_BCDE),
        [A, B, C, D, E] => tarifs.montant(cles::SCOLARITE_ABCDE),
        autres => {
            if !autres.is_empty() {
                debug!(classes = autres.len(), "combinaison sans tarif dédié, tarif par catégorie");
            }
            autres.len() as i64 * tarifs.montant(cles::SCOLARITE_PAR_CATEGORIE)
        }
    }
}
