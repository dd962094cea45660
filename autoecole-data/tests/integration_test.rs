//! Integration tests for tariff loading using the actual database backend.

use pretty_assertions::assert_eq;
use sqlx::sqlite::SqlitePoolOptions;

use autoecole_core::EcoleRepository;
use autoecole_data::{TarifLoader, TarifLoaderError, TarifRecord};
use autoecole_db_sqlite::SqliteRepository;

const TEST_CSV: &str = include_str!("../test-data/tarifs.csv");

async fn setup_test_db() -> SqliteRepository {
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

#[tokio::test]
async fn charge_le_csv_dans_la_table_des_tarifs() {
    let repo = setup_test_db().await;

    let records = TarifLoader::parse(TEST_CSV.as_bytes()).expect("csv valide");
    let inserted = TarifLoader::load(&repo, &records).await.expect("chargement");

    assert_eq!(inserted, 3);

    let tarifs = repo.get_tarifs().await.expect("lecture");
    assert_eq!(tarifs.montant("scolarite_A"), 35_000);
    assert_eq!(tarifs.montant("scolarite_B"), 55_000);
    assert_eq!(tarifs.montant("scolarite_recyclage"), 70_000);
    // Clé non chargée : défaut codé en dur.
    assert_eq!(tarifs.montant("scolarite_AB"), 100_000);
}

#[tokio::test]
async fn recharger_le_meme_fichier_est_idempotent() {
    let repo = setup_test_db().await;
    let records = TarifLoader::parse(TEST_CSV.as_bytes()).expect("csv valide");

    TarifLoader::load(&repo, &records).await.expect("premier");
    TarifLoader::load(&repo, &records).await.expect("second");

    let tarifs = repo.get_tarifs().await.expect("lecture");
    assert_eq!(tarifs.iter().count(), 3);
    assert_eq!(tarifs.montant("scolarite_A"), 35_000);
}

#[tokio::test]
async fn une_cle_inconnue_bloque_le_chargement() {
    let repo = setup_test_db().await;

    let records = vec![
        TarifRecord {
            cle: "scolarite_A".to_string(),
            montant: 35_000,
        },
        TarifRecord {
            cle: "scolarite_inexistante".to_string(),
            montant: 1,
        },
    ];

    let erreur = TarifLoader::load(&repo, &records).await;

    assert!(matches!(erreur, Err(TarifLoaderError::CleInconnue(_))));
    // La validation précède toute écriture.
    assert!(repo.get_tarifs().await.expect("lecture").est_vide());
}

#[tokio::test]
async fn un_montant_negatif_bloque_le_chargement() {
    let repo = setup_test_db().await;

    let records = vec![TarifRecord {
        cle: "scolarite_B".to_string(),
        montant: -1,
    }];

    let erreur = TarifLoader::load(&repo, &records).await;

    assert!(matches!(
        erreur,
        Err(TarifLoaderError::MontantNegatif { .. })
    ));
}
