//! Pure rule engines backing the enrollment screens.
//!
//! Both engines are synchronous, total functions over small enumerated
//! domains: the tuition rule table and the progression stage tracker. They
//! share no state and communicate only through the stage key.

pub mod progression;
pub mod scolarite;

pub use progression::{
    classer_transition, etape_courante, etapes_pour, moniteur_assignable, EtapeCourante, EtapeDef,
    ProgressionError, Transition,
};
pub use scolarite::{scolarite, scolarite_pour_classes};
