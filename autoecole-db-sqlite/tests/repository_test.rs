//! Integration tests for the SQLite repository on an in-memory database.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use sqlx::sqlite::SqlitePoolOptions;

use autoecole_core::{
    Categorie, EcoleRepository, Etape, ExamenType, Motif, NouveauMoniteur, NouveauRappel,
    NouveauResultat, NouvelEtudiant, NouvelleProgrammation, Priorite, RepositoryError, Specialite,
};
use autoecole_db_sqlite::SqliteRepository;

async fn setup_test_db() -> SqliteRepository {
    // One connection: each sqlite::memory: connection is its own database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    let repo = SqliteRepository::new_with_pool(pool).await;
    repo.run_migrations()
        .await
        .expect("Failed to run migrations");

    repo
}

fn date(annee: i32, mois: u32, jour: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(annee, mois, jour).expect("date valide")
}

fn nouvel_etudiant(motif: Motif, categorie: Option<Categorie>) -> NouvelEtudiant {
    NouvelEtudiant {
        nom: "Diallo".to_string(),
        prenom: "Awa".to_string(),
        date_naissance: date(2000, 4, 12),
        lieu_naissance: "Abidjan".to_string(),
        commune: "Cocody".to_string(),
        num_telephone: "0102030405".to_string(),
        num_telephone2: None,
        nom_auto_ec: "Auto-École Centrale".to_string(),
        type_piece: "CNI".to_string(),
        num_piece: "CI-123456".to_string(),
        motif,
        categorie,
        reduction: false,
        montant_paye: 0,
    }
}

// =============================================================================
// Enrollment
// =============================================================================

#[tokio::test]
async fn create_etudiant_calcule_la_scolarite_et_cree_la_progression() {
    let repo = setup_test_db().await;

    let etudiant = repo
        .create_etudiant(nouvel_etudiant(Motif::Permis, Some(Categorie::AB)))
        .await
        .expect("création");

    assert_eq!(etudiant.scolarite, 100_000);
    assert_eq!(etudiant.montant_paye, 0);

    let progression = repo
        .get_progression(etudiant.id)
        .await
        .expect("progression créée avec l'étudiant");
    assert_eq!(progression.etape, Etape::Inscription);
    assert_eq!(progression.moniteur_id, None);
}

#[tokio::test]
async fn create_etudiant_applique_les_overrides_de_tarif() {
    let repo = setup_test_db().await;
    repo.set_tarif("scolarite_AB", 111_000).await.expect("tarif");

    let etudiant = repo
        .create_etudiant(nouvel_etudiant(Motif::Permis, Some(Categorie::AB)))
        .await
        .expect("création");

    assert_eq!(etudiant.scolarite, 111_000);
}

#[tokio::test]
async fn recyclage_force_la_categorie_vide_et_son_tarif() {
    let repo = setup_test_db().await;

    let mut demande = nouvel_etudiant(Motif::Recyclage, Some(Categorie::ABCDE));
    demande.reduction = true;

    let etudiant = repo.create_etudiant(demande).await.expect("création");

    assert_eq!(etudiant.categorie, None);
    assert_eq!(etudiant.scolarite, 60_000);
}

#[tokio::test]
async fn le_paiement_initial_est_plafonne_a_la_scolarite() {
    let repo = setup_test_db().await;

    let mut demande = nouvel_etudiant(Motif::Permis, Some(Categorie::A));
    demande.montant_paye = 999_999;

    let etudiant = repo.create_etudiant(demande).await.expect("création");

    assert_eq!(etudiant.scolarite, 30_000);
    assert_eq!(etudiant.montant_paye, 30_000);
    assert!(etudiant.solde());
}

#[tokio::test]
async fn delete_etudiant_supprime_la_progression() {
    let repo = setup_test_db().await;
    let etudiant = repo
        .create_etudiant(nouvel_etudiant(Motif::Permis, Some(Categorie::B)))
        .await
        .expect("création");

    repo.delete_etudiant(etudiant.id).await.expect("suppression");

    assert!(matches!(
        repo.get_progression(etudiant.id).await,
        Err(RepositoryError::NotFound)
    ));
}

// =============================================================================
// Payments
// =============================================================================

#[tokio::test]
async fn enregistrer_paiement_cumule_et_plafonne() {
    let repo = setup_test_db().await;
    let etudiant = repo
        .create_etudiant(nouvel_etudiant(Motif::Permis, Some(Categorie::A)))
        .await
        .expect("création");

    let apres_premier = repo
        .enregistrer_paiement(etudiant.id, 10_000)
        .await
        .expect("paiement");
    assert_eq!(apres_premier, 10_000);

    // 10 000 + 50 000 dépasse la scolarité de 30 000 : plafonné.
    let apres_second = repo
        .enregistrer_paiement(etudiant.id, 50_000)
        .await
        .expect("paiement");
    assert_eq!(apres_second, 30_000);

    let relu = repo.get_etudiant(etudiant.id).await.expect("lecture");
    assert_eq!(relu.reste_a_payer(), 0);
}

#[tokio::test]
async fn paiement_negatif_refuse() {
    let repo = setup_test_db().await;
    let etudiant = repo
        .create_etudiant(nouvel_etudiant(Motif::Permis, Some(Categorie::A)))
        .await
        .expect("création");

    let erreur = repo.enregistrer_paiement(etudiant.id, -1).await;

    assert!(matches!(erreur, Err(RepositoryError::Database(_))));
}

// =============================================================================
// Progression
// =============================================================================

#[tokio::test]
async fn update_progression_refuse_une_etape_hors_motif() {
    let repo = setup_test_db().await;
    let etudiant = repo
        .create_etudiant(nouvel_etudiant(Motif::Recyclage, None))
        .await
        .expect("création");

    // La visite médicale n'existe pas dans la séquence recyclage.
    let erreur = repo
        .update_progression(etudiant.id, Etape::VisiteMedicale, None)
        .await;

    assert!(matches!(erreur, Err(RepositoryError::Database(_))));
}

#[tokio::test]
async fn le_moniteur_reste_rattache_apres_avancement() {
    let repo = setup_test_db().await;
    let etudiant = repo
        .create_etudiant(nouvel_etudiant(Motif::Permis, Some(Categorie::B)))
        .await
        .expect("création");
    let moniteur = repo
        .create_moniteur(NouveauMoniteur {
            nom: "Koné".to_string(),
            prenom: "Issa".to_string(),
            num_telephone: "0708091011".to_string(),
            specialite: Specialite::Conduite,
        })
        .await
        .expect("moniteur");

    repo.update_progression(etudiant.id, Etape::CoursDeConduite, Some(moniteur.id))
        .await
        .expect("rattachement");
    repo.update_progression(
        etudiant.id,
        Etape::PretPourExamenConduite,
        Some(moniteur.id),
    )
    .await
    .expect("avancement");

    let progression = repo.get_progression(etudiant.id).await.expect("lecture");
    assert_eq!(progression.etape, Etape::PretPourExamenConduite);
    assert_eq!(progression.moniteur_id, Some(moniteur.id));
}

// =============================================================================
// Exam sessions
// =============================================================================

#[tokio::test]
async fn create_programmation_avance_les_etudiants_eligibles() {
    let repo = setup_test_db().await;
    let etudiant = repo
        .create_etudiant(nouvel_etudiant(Motif::Permis, Some(Categorie::B)))
        .await
        .expect("création");
    repo.update_progression(etudiant.id, Etape::PretPourExamenCode, None)
        .await
        .expect("avancement");

    let programmation = repo
        .create_programmation(NouvelleProgrammation {
            examen: ExamenType::Code,
            date_prog: date(2026, 9, 15),
            etudiant_ids: vec![etudiant.id],
        })
        .await
        .expect("programmation");

    assert_eq!(programmation.etudiant_ids, vec![etudiant.id]);

    let progression = repo.get_progression(etudiant.id).await.expect("lecture");
    assert_eq!(progression.etape, Etape::ProgrammePourLeCode);
}

#[tokio::test]
async fn create_programmation_rejette_un_etudiant_non_eligible() {
    let repo = setup_test_db().await;
    let etudiant = repo
        .create_etudiant(nouvel_etudiant(Motif::Permis, Some(Categorie::B)))
        .await
        .expect("création");

    // Encore à l'inscription : pas prêt pour l'examen de code.
    let erreur = repo
        .create_programmation(NouvelleProgrammation {
            examen: ExamenType::Code,
            date_prog: date(2026, 9, 15),
            etudiant_ids: vec![etudiant.id],
        })
        .await;

    assert!(matches!(erreur, Err(RepositoryError::Database(_))));

    // La transaction a été annulée : l'étudiant n'a pas bougé.
    let progression = repo.get_progression(etudiant.id).await.expect("lecture");
    assert_eq!(progression.etape, Etape::Inscription);
    assert!(repo
        .list_programmations()
        .await
        .expect("liste")
        .is_empty());
}

// =============================================================================
// Results and reminders
// =============================================================================

#[tokio::test]
async fn resultats_lies_a_un_etudiant_existant() {
    let repo = setup_test_db().await;
    let etudiant = repo
        .create_etudiant(nouvel_etudiant(Motif::Permis, Some(Categorie::B)))
        .await
        .expect("création");

    let resultat = repo
        .create_resultat(NouveauResultat {
            etudiant_id: etudiant.id,
            libelle: ExamenType::Code,
            retire: false,
        })
        .await
        .expect("résultat");
    assert!(!resultat.retire);

    let inexistant = repo
        .create_resultat(NouveauResultat {
            etudiant_id: 9999,
            libelle: ExamenType::Code,
            retire: false,
        })
        .await;
    assert!(matches!(inexistant, Err(RepositoryError::NotFound)));
}

#[tokio::test]
async fn rappels_recents_compte_par_priorite() {
    let repo = setup_test_db().await;
    let aujourd_hui = chrono::Utc::now().date_naive();

    for (titre, priorite, traite, decalage) in [
        ("Assurance véhicule", Priorite::Haute, false, 1),
        ("Commande de fournitures", Priorite::Basse, false, 3),
        ("Déjà traité", Priorite::Haute, true, 2),
        ("Trop lointain", Priorite::Moyenne, false, 30),
    ] {
        repo.create_rappel(NouveauRappel {
            titre: titre.to_string(),
            description: None,
            date_rappel: aujourd_hui + chrono::Duration::days(decalage),
            type_rappel: "administratif".to_string(),
            priorite,
            traite,
        })
        .await
        .expect("rappel");
    }

    let recents = repo.rappels_recents().await.expect("comptage");

    assert_eq!(recents.importants_recents, 1);
    assert_eq!(recents.recents, 1);
    assert_eq!(recents.total(), 2);
}

// =============================================================================
// Reporting
// =============================================================================

#[tokio::test]
async fn totaux_et_repartitions() {
    let repo = setup_test_db().await;

    let mut avec_reduction = nouvel_etudiant(Motif::Permis, Some(Categorie::A));
    avec_reduction.reduction = true;
    repo.create_etudiant(avec_reduction).await.expect("création");
    repo.create_etudiant(nouvel_etudiant(Motif::Permis, Some(Categorie::AB)))
        .await
        .expect("création");
    repo.create_etudiant(nouvel_etudiant(Motif::Recyclage, None))
        .await
        .expect("création");

    let totaux = repo.totaux().await.expect("totaux");
    assert_eq!(totaux.etudiants, 3);
    assert_eq!(totaux.moniteurs, 0);

    let par_etape = repo.repartition_par_etape().await.expect("répartition");
    assert_eq!(par_etape.len(), 1);
    assert_eq!(par_etape[0].libelle, "inscription");
    assert_eq!(par_etape[0].count, 3);

    let par_reduction = repo.repartition_reduction().await.expect("répartition");
    let avec = par_reduction
        .iter()
        .find(|e| e.libelle == "avec_reduction")
        .expect("entrée avec réduction");
    assert_eq!(avec.count, 1);

    let evolution = repo.evolution_inscriptions().await.expect("évolution");
    assert_eq!(evolution.len(), 1);
    assert_eq!(evolution[0].count, 3);
}

// =============================================================================
// Tariff table
// =============================================================================

#[tokio::test]
async fn set_tarif_upsert_et_refus_du_negatif() {
    let repo = setup_test_db().await;

    repo.set_tarif("scolarite_A", 32_000).await.expect("insert");
    repo.set_tarif("scolarite_A", 34_000).await.expect("update");

    let tarifs = repo.get_tarifs().await.expect("lecture");
    assert_eq!(tarifs.montant("scolarite_A"), 34_000);
    // Les clés absentes retombent sur les défauts.
    assert_eq!(tarifs.montant("scolarite_B"), 50_000);

    let erreur = repo.set_tarif("scolarite_B", -5).await;
    assert!(matches!(erreur, Err(RepositoryError::Database(_))));
}
