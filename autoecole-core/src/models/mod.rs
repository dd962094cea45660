mod categorie;
mod etape;
mod etudiant;
mod moniteur;
mod motif;
mod progression;
mod programmation;
mod rappel;
mod resultat;
mod stats;
pub mod tarifs;

pub use categorie::{Categorie, PermisClasse};
pub use etape::{Etape, ExamenType};
pub use etudiant::{Etudiant, NouvelEtudiant};
pub use moniteur::{Moniteur, NouveauMoniteur, Specialite};
pub use motif::Motif;
pub use progression::Progression;
pub use programmation::{NouvelleProgrammation, Programmation};
pub use rappel::{NouveauRappel, Priorite, Rappel, RappelsRecents};
pub use resultat::{NouveauResultat, Resultat};
pub use stats::{EvolutionPoint, RepartitionEntry, Totaux};
pub use tarifs::Tarifs;
