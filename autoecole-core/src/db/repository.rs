use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    Etape, Etudiant, EvolutionPoint, Moniteur, NouveauMoniteur, NouveauRappel, NouveauResultat,
    NouvelEtudiant, NouvelleProgrammation, Programmation, Progression, Rappel, RappelsRecents,
    RepartitionEntry, Resultat, Specialite, Tarifs, Totaux,
};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),
}

/// Persistence seam for the back office. One implementation per backend;
/// everything above it (loaders, screens, reports) talks to this trait.
#[async_trait]
pub trait EcoleRepository: Send + Sync {
    // Tarifs
    async fn get_tarifs(&self) -> Result<Tarifs, RepositoryError>;
    async fn set_tarif(&self, cle: &str, montant: i64) -> Result<(), RepositoryError>;

    // Étudiants. Creation computes the tuition from the current tariff table
    // and inserts the progression record at `inscription` in the same
    // transaction.
    async fn create_etudiant(&self, etudiant: NouvelEtudiant) -> Result<Etudiant, RepositoryError>;
    async fn get_etudiant(&self, id: i64) -> Result<Etudiant, RepositoryError>;
    async fn list_etudiants(&self) -> Result<Vec<Etudiant>, RepositoryError>;
    async fn update_etudiant(&self, etudiant: &Etudiant) -> Result<(), RepositoryError>;
    async fn delete_etudiant(&self, id: i64) -> Result<(), RepositoryError>;

    /// Records an additional payment, capped at the outstanding balance.
    /// Returns the new total paid.
    async fn enregistrer_paiement(&self, id: i64, montant: i64) -> Result<i64, RepositoryError>;

    // Progression
    async fn get_progression(&self, etudiant_id: i64) -> Result<Progression, RepositoryError>;
    async fn update_progression(
        &self,
        etudiant_id: i64,
        etape: Etape,
        moniteur_id: Option<i64>,
    ) -> Result<(), RepositoryError>;

    // Moniteurs
    async fn create_moniteur(&self, moniteur: NouveauMoniteur) -> Result<Moniteur, RepositoryError>;
    async fn get_moniteur(&self, id: i64) -> Result<Moniteur, RepositoryError>;
    async fn list_moniteurs(
        &self,
        specialite: Option<Specialite>,
    ) -> Result<Vec<Moniteur>, RepositoryError>;
    async fn update_moniteur(&self, moniteur: &Moniteur) -> Result<(), RepositoryError>;
    async fn delete_moniteur(&self, id: i64) -> Result<(), RepositoryError>;

    // Programmations. Creation advances every listed student from
    // `prêt_pour_examen_*` to `programmé_pour_*`; a student at any other
    // stage fails the whole session.
    async fn create_programmation(
        &self,
        programmation: NouvelleProgrammation,
    ) -> Result<Programmation, RepositoryError>;
    async fn list_programmations(&self) -> Result<Vec<Programmation>, RepositoryError>;
    async fn delete_programmation(&self, id: i64) -> Result<(), RepositoryError>;

    // Résultats
    async fn create_resultat(&self, resultat: NouveauResultat) -> Result<Resultat, RepositoryError>;
    async fn list_resultats(&self) -> Result<Vec<Resultat>, RepositoryError>;

    // Rappels
    async fn create_rappel(&self, rappel: NouveauRappel) -> Result<Rappel, RepositoryError>;
    async fn list_rappels(&self) -> Result<Vec<Rappel>, RepositoryError>;
    async fn update_rappel(&self, rappel: &Rappel) -> Result<(), RepositoryError>;
    async fn delete_rappel(&self, id: i64) -> Result<(), RepositoryError>;

    /// Counts of unprocessed reminders due within the next seven days, split
    /// by priority, for the sidebar badge.
    async fn rappels_recents(&self) -> Result<RappelsRecents, RepositoryError>;

    // Reporting
    async fn totaux(&self) -> Result<Totaux, RepositoryError>;
    async fn repartition_par_categorie(&self) -> Result<Vec<RepartitionEntry>, RepositoryError>;
    async fn repartition_par_etape(&self) -> Result<Vec<RepartitionEntry>, RepositoryError>;
    async fn repartition_par_moniteur(&self) -> Result<Vec<RepartitionEntry>, RepositoryError>;
    async fn repartition_reduction(&self) -> Result<Vec<RepartitionEntry>, RepositoryError>;
    async fn evolution_inscriptions(&self) -> Result<Vec<EvolutionPoint>, RepositoryError>;
}
