use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use tracing::debug;

use autoecole_core::calculations::{etape_courante, etapes_pour, scolarite};
use autoecole_core::{
    Categorie, EcoleRepository, Etape, Etudiant, EvolutionPoint, ExamenType, Moniteur, Motif,
    NouveauMoniteur, NouveauRappel, NouveauResultat, NouvelEtudiant, NouvelleProgrammation,
    Priorite, Programmation, Progression, Rappel, RappelsRecents, RepartitionEntry,
    RepositoryError, Resultat, Specialite, Tarifs, Totaux,
};

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    /// Load and execute all SQL seed files from the specified directory.
    /// Files are executed in alphabetical order by filename.
    pub async fn run_seeds(&self, seeds_dir: &Path) -> Result<()> {
        let mut entries: Vec<_> = std::fs::read_dir(seeds_dir)
            .with_context(|| format!("Failed to read seeds directory '{}'", seeds_dir.display()))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "sql"))
            .collect();

        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let path = entry.path();
            let sql = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read seed file '{}'", path.display()))?;

            sqlx::raw_sql(&sql)
                .execute(&self.pool)
                .await
                .with_context(|| format!("Failed to execute seed file '{}'", path.display()))?;
        }

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn db_err(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Database(e.to_string())
}

fn get_column<T>(row: &SqliteRow, name: &str) -> Result<T, RepositoryError>
where
    T: for<'r> sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(name)
        .map_err(|e| RepositoryError::Database(format!("Failed to get {}: {}", name, e)))
}

fn parse_motif(s: &str) -> Result<Motif, RepositoryError> {
    Motif::parse(s).ok_or_else(|| RepositoryError::Database(format!("motif inconnu: {s}")))
}

fn parse_etape(s: &str) -> Result<Etape, RepositoryError> {
    Etape::parse(s).ok_or_else(|| RepositoryError::Database(format!("étape inconnue: {s}")))
}

fn parse_examen(s: &str) -> Result<ExamenType, RepositoryError> {
    ExamenType::parse(s)
        .ok_or_else(|| RepositoryError::Database(format!("type d'examen inconnu: {s}")))
}

fn parse_specialite(s: &str) -> Result<Specialite, RepositoryError> {
    Specialite::parse(s)
        .ok_or_else(|| RepositoryError::Database(format!("spécialité inconnue: {s}")))
}

fn parse_priorite(s: &str) -> Result<Priorite, RepositoryError> {
    Priorite::parse(s).ok_or_else(|| RepositoryError::Database(format!("priorité inconnue: {s}")))
}

fn row_to_etudiant(row: &SqliteRow) -> Result<Etudiant, RepositoryError> {
    let motif: String = get_column(row, "motif")?;
    let categorie: Option<String> = get_column(row, "categorie")?;
    let categorie = match categorie {
        Some(s) => Some(
            Categorie::parse(&s)
                .ok_or_else(|| RepositoryError::Database(format!("catégorie inconnue: {s}")))?,
        ),
        None => None,
    };

    Ok(Etudiant {
        id: get_column(row, "id")?,
        nom: get_column(row, "nom")?,
        prenom: get_column(row, "prenom")?,
        date_naissance: get_column::<NaiveDate>(row, "date_naissance")?,
        lieu_naissance: get_column(row, "lieu_naissance")?,
        commune: get_column(row, "commune")?,
        num_telephone: get_column(row, "num_telephone")?,
        num_telephone2: get_column(row, "num_telephone2")?,
        nom_auto_ec: get_column(row, "nom_auto_ec")?,
        type_piece: get_column(row, "type_piece")?,
        num_piece: get_column(row, "num_piece")?,
        motif: parse_motif(&motif)?,
        categorie,
        reduction: get_column(row, "reduction")?,
        scolarite: get_column(row, "scolarite")?,
        montant_paye: get_column(row, "montant_paye")?,
        created_at: get_column::<DateTime<Utc>>(row, "created_at")?,
        updated_at: get_column::<DateTime<Utc>>(row, "updated_at")?,
    })
}

fn row_to_moniteur(row: &SqliteRow) -> Result<Moniteur, RepositoryError> {
    let specialite: String = get_column(row, "specialite")?;
    Ok(Moniteur {
        id: get_column(row, "id")?,
        nom: get_column(row, "nom")?,
        prenom: get_column(row, "prenom")?,
        num_telephone: get_column(row, "num_telephone")?,
        specialite: parse_specialite(&specialite)?,
    })
}

fn row_to_progression(row: &SqliteRow) -> Result<Progression, RepositoryError> {
    let etape: String = get_column(row, "etape")?;
    Ok(Progression {
        etudiant_id: get_column(row, "etudiant_id")?,
        etape: parse_etape(&etape)?,
        moniteur_id: get_column(row, "moniteur_id")?,
        updated_at: get_column::<DateTime<Utc>>(row, "updated_at")?,
    })
}

fn row_to_rappel(row: &SqliteRow) -> Result<Rappel, RepositoryError> {
    let priorite: String = get_column(row, "priorite")?;
    Ok(Rappel {
        id: get_column(row, "id")?,
        titre: get_column(row, "titre")?,
        description: get_column(row, "description")?,
        date_rappel: get_column::<NaiveDate>(row, "date_rappel")?,
        type_rappel: get_column(row, "type_rappel")?,
        priorite: parse_priorite(&priorite)?,
        traite: get_column(row, "traite")?,
        created_at: get_column::<DateTime<Utc>>(row, "created_at")?,
    })
}

fn row_to_resultat(row: &SqliteRow) -> Result<Resultat, RepositoryError> {
    let libelle: String = get_column(row, "libelle")?;
    Ok(Resultat {
        id: get_column(row, "id")?,
        etudiant_id: get_column(row, "etudiant_id")?,
        libelle: parse_examen(&libelle)?,
        retire: get_column(row, "retire")?,
        created_at: get_column::<DateTime<Utc>>(row, "created_at")?,
    })
}

#[async_trait]
impl EcoleRepository for SqliteRepository {
    async fn get_tarifs(&self) -> Result<Tarifs, RepositoryError> {
        let rows = sqlx::query("SELECT cle, montant FROM tarifs")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        rows.iter()
            .map(|row| {
                Ok((
                    get_column::<String>(row, "cle")?,
                    get_column::<i64>(row, "montant")?,
                ))
            })
            .collect::<Result<Tarifs, RepositoryError>>()
    }

    async fn set_tarif(&self, cle: &str, montant: i64) -> Result<(), RepositoryError> {
        if montant < 0 {
            return Err(RepositoryError::Database(format!(
                "montant négatif refusé pour {cle}: {montant}"
            )));
        }

        sqlx::query(
            "INSERT INTO tarifs (cle, montant) VALUES (?, ?)
             ON CONFLICT(cle) DO UPDATE SET montant = excluded.montant",
        )
        .bind(cle)
        .bind(montant)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(())
    }

    async fn create_etudiant(&self, etudiant: NouvelEtudiant) -> Result<Etudiant, RepositoryError> {
        if etudiant.montant_paye < 0 {
            return Err(RepositoryError::Database(format!(
                "montant payé négatif refusé: {}",
                etudiant.montant_paye
            )));
        }
        // Recyclage forces an empty category selection.
        let categorie = match etudiant.motif {
            Motif::Recyclage => None,
            Motif::Permis => etudiant.categorie,
        };

        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let rows = sqlx::query("SELECT cle, montant FROM tarifs")
            .fetch_all(&mut *tx)
            .await
            .map_err(db_err)?;
        let tarifs: Tarifs = rows
            .iter()
            .map(|row| {
                Ok((
                    get_column::<String>(row, "cle")?,
                    get_column::<i64>(row, "montant")?,
                ))
            })
            .collect::<Result<Tarifs, RepositoryError>>()?;

        let montant_scolarite = scolarite(categorie, etudiant.reduction, etudiant.motif, &tarifs);
        let montant_paye = etudiant.montant_paye.min(montant_scolarite);
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO etudiants (
                nom, prenom, date_naissance, lieu_naissance, commune,
                num_telephone, num_telephone2, nom_auto_ec, type_piece, num_piece,
                motif, categorie, reduction, scolarite, montant_paye,
                created_at, updated_at
             ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&etudiant.nom)
        .bind(&etudiant.prenom)
        .bind(etudiant.date_naissance)
        .bind(&etudiant.lieu_naissance)
        .bind(&etudiant.commune)
        .bind(&etudiant.num_telephone)
        .bind(&etudiant.num_telephone2)
        .bind(&etudiant.nom_auto_ec)
        .bind(&etudiant.type_piece)
        .bind(&etudiant.num_piece)
        .bind(etudiant.motif.as_str())
        .bind(categorie.map(|c| c.as_str()))
        .bind(etudiant.reduction)
        .bind(montant_scolarite)
        .bind(montant_paye)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        let id = result.last_insert_rowid();

        sqlx::query(
            "INSERT INTO progressions (etudiant_id, etape, moniteur_id, updated_at)
             VALUES (?, ?, NULL, ?)",
        )
        .bind(id)
        .bind(Etape::Inscription.as_str())
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;

        debug!(id, scolarite = montant_scolarite, "étudiant inscrit");
        self.get_etudiant(id).await
    }

    async fn get_etudiant(&self, id: i64) -> Result<Etudiant, RepositoryError> {
        let row = sqlx::query("SELECT * FROM etudiants WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?
            .ok_or(RepositoryError::NotFound)?;

        row_to_etudiant(&row)
    }

    async fn list_etudiants(&self) -> Result<Vec<Etudiant>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM etudiants ORDER BY created_at DESC, id DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        rows.iter().map(row_to_etudiant).collect()
    }

    async fn update_etudiant(&self, etudiant: &Etudiant) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE etudiants SET
                nom = ?, prenom = ?, date_naissance = ?, lieu_naissance = ?,
                commune = ?, num_telephone = ?, num_telephone2 = ?,
                nom_auto_ec = ?, type_piece = ?, num_piece = ?,
                motif = ?, categorie = ?, reduction = ?, scolarite = ?,
                montant_paye = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&etudiant.nom)
        .bind(&etudiant.prenom)
        .bind(etudiant.date_naissance)
        .bind(&etudiant.lieu_naissance)
        .bind(&etudiant.commune)
        .bind(&etudiant.num_telephone)
        .bind(&etudiant.num_telephone2)
        .bind(&etudiant.nom_auto_ec)
        .bind(&etudiant.type_piece)
        .bind(&etudiant.num_piece)
        .bind(etudiant.motif.as_str())
        .bind(etudiant.categorie.map(|c| c.as_str()))
        .bind(etudiant.reduction)
        .bind(etudiant.scolarite)
        .bind(etudiant.montant_paye)
        .bind(Utc::now())
        .bind(etudiant.id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn delete_etudiant(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM etudiants WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn enregistrer_paiement(&self, id: i64, montant: i64) -> Result<i64, RepositoryError> {
        if montant < 0 {
            return Err(RepositoryError::Database(format!(
                "paiement négatif refusé: {montant}"
            )));
        }

        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let row = sqlx::query("SELECT scolarite, montant_paye FROM etudiants WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_err)?
            .ok_or(RepositoryError::NotFound)?;

        let scolarite: i64 = get_column(&row, "scolarite")?;
        let paye: i64 = get_column(&row, "montant_paye")?;
        // Never record more than the outstanding balance.
        let nouveau = (paye + montant).min(scolarite);

        sqlx::query("UPDATE etudiants SET montant_paye = ?, updated_at = ? WHERE id = ?")
            .bind(nouveau)
            .bind(Utc::now())
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;
        Ok(nouveau)
    }

    async fn get_progression(&self, etudiant_id: i64) -> Result<Progression, RepositoryError> {
        let row = sqlx::query("SELECT * FROM progressions WHERE etudiant_id = ?")
            .bind(etudiant_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?
            .ok_or(RepositoryError::NotFound)?;

        row_to_progression(&row)
    }

    async fn update_progression(
        &self,
        etudiant_id: i64,
        etape: Etape,
        moniteur_id: Option<i64>,
    ) -> Result<(), RepositoryError> {
        let etudiant = self.get_etudiant(etudiant_id).await?;

        // The stage must belong to the enrollment's motif sequence; an
        // orphaned key would otherwise render as an invalid stage everywhere.
        etape_courante(etapes_pour(etudiant.motif), etape)
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let result = sqlx::query(
            "UPDATE progressions SET etape = ?, moniteur_id = ?, updated_at = ?
             WHERE etudiant_id = ?",
        )
        .bind(etape.as_str())
        .bind(moniteur_id)
        .bind(Utc::now())
        .bind(etudiant_id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn create_moniteur(
        &self,
        moniteur: NouveauMoniteur,
    ) -> Result<Moniteur, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO moniteurs (nom, prenom, num_telephone, specialite)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&moniteur.nom)
        .bind(&moniteur.prenom)
        .bind(&moniteur.num_telephone)
        .bind(moniteur.specialite.as_str())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        self.get_moniteur(result.last_insert_rowid()).await
    }

    async fn get_moniteur(&self, id: i64) -> Result<Moniteur, RepositoryError> {
        let row = sqlx::query("SELECT * FROM moniteurs WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?
            .ok_or(RepositoryError::NotFound)?;

        row_to_moniteur(&row)
    }

    async fn list_moniteurs(
        &self,
        specialite: Option<Specialite>,
    ) -> Result<Vec<Moniteur>, RepositoryError> {
        let rows = match specialite {
            Some(s) => {
                sqlx::query("SELECT * FROM moniteurs WHERE specialite = ? ORDER BY nom, prenom")
                    .bind(s.as_str())
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                sqlx::query("SELECT * FROM moniteurs ORDER BY nom, prenom")
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(db_err)?;

        rows.iter().map(row_to_moniteur).collect()
    }

    async fn update_moniteur(&self, moniteur: &Moniteur) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE moniteurs SET nom = ?, prenom = ?, num_telephone = ?, specialite = ?
             WHERE id = ?",
        )
        .bind(&moniteur.nom)
        .bind(&moniteur.prenom)
        .bind(&moniteur.num_telephone)
        .bind(moniteur.specialite.as_str())
        .bind(moniteur.id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn delete_moniteur(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM moniteurs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn create_programmation(
        &self,
        programmation: NouvelleProgrammation,
    ) -> Result<Programmation, RepositoryError> {
        if programmation.etudiant_ids.is_empty() {
            return Err(RepositoryError::Database(
                "une programmation exige au moins un étudiant".to_string(),
            ));
        }

        let eligible = programmation.examen.etape_eligible();
        let programmee = programmation.examen.etape_programmee();
        let now = Utc::now();

        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let result = sqlx::query(
            "INSERT INTO programmations (examen, date_prog, created_at) VALUES (?, ?, ?)",
        )
        .bind(programmation.examen.as_str())
        .bind(programmation.date_prog)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        let id = result.last_insert_rowid();

        for etudiant_id in &programmation.etudiant_ids {
            let row = sqlx::query("SELECT etape FROM progressions WHERE etudiant_id = ?")
                .bind(etudiant_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(db_err)?
                .ok_or(RepositoryError::NotFound)?;

            let etape = parse_etape(&get_column::<String>(&row, "etape")?)?;
            if etape != eligible {
                return Err(RepositoryError::Database(format!(
                    "étudiant {} à l'étape « {} », attendu « {} »",
                    etudiant_id,
                    etape.as_str(),
                    eligible.as_str()
                )));
            }

            sqlx::query(
                "UPDATE progressions SET etape = ?, updated_at = ? WHERE etudiant_id = ?",
            )
            .bind(programmee.as_str())
            .bind(now)
            .bind(etudiant_id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

            sqlx::query(
                "INSERT INTO programmation_etudiants (programmation_id, etudiant_id)
                 VALUES (?, ?)",
            )
            .bind(id)
            .bind(etudiant_id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        }

        tx.commit().await.map_err(db_err)?;

        Ok(Programmation {
            id,
            examen: programmation.examen,
            date_prog: programmation.date_prog,
            etudiant_ids: programmation.etudiant_ids,
            created_at: now,
        })
    }

    async fn list_programmations(&self) -> Result<Vec<Programmation>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, examen, date_prog, created_at FROM programmations
             ORDER BY date_prog DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        let mut programmations = Vec::with_capacity(rows.len());
        for row in &rows {
            let id: i64 = get_column(row, "id")?;
            let examen: String = get_column(row, "examen")?;

            let ids = sqlx::query(
                "SELECT etudiant_id FROM programmation_etudiants
                 WHERE programmation_id = ? ORDER BY etudiant_id",
            )
            .bind(id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?
            .iter()
            .map(|r| get_column::<i64>(r, "etudiant_id"))
            .collect::<Result<Vec<i64>, RepositoryError>>()?;

            programmations.push(Programmation {
                id,
                examen: parse_examen(&examen)?,
                date_prog: get_column::<NaiveDate>(row, "date_prog")?,
                etudiant_ids: ids,
                created_at: get_column::<DateTime<Utc>>(row, "created_at")?,
            });
        }

        Ok(programmations)
    }

    async fn delete_programmation(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM programmations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn create_resultat(
        &self,
        resultat: NouveauResultat,
    ) -> Result<Resultat, RepositoryError> {
        // Ensure the student exists so the FK error does not leak as SQL.
        self.get_etudiant(resultat.etudiant_id).await?;

        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO resultats (etudiant_id, libelle, retire, created_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(resultat.etudiant_id)
        .bind(resultat.libelle.as_str())
        .bind(resultat.retire)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(Resultat {
            id: result.last_insert_rowid(),
            etudiant_id: resultat.etudiant_id,
            libelle: resultat.libelle,
            retire: resultat.retire,
            created_at: now,
        })
    }

    async fn list_resultats(&self) -> Result<Vec<Resultat>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM resultats ORDER BY created_at DESC, id DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        rows.iter().map(row_to_resultat).collect()
    }

    async fn create_rappel(&self, rappel: NouveauRappel) -> Result<Rappel, RepositoryError> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO rappels (titre, description, date_rappel, type_rappel,
                                  priorite, traite, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&rappel.titre)
        .bind(&rappel.description)
        .bind(rappel.date_rappel)
        .bind(&rappel.type_rappel)
        .bind(rappel.priorite.as_str())
        .bind(rappel.traite)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(Rappel {
            id: result.last_insert_rowid(),
            titre: rappel.titre,
            description: rappel.description,
            date_rappel: rappel.date_rappel,
            type_rappel: rappel.type_rappel,
            priorite: rappel.priorite,
            traite: rappel.traite,
            created_at: now,
        })
    }

    async fn list_rappels(&self) -> Result<Vec<Rappel>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM rappels ORDER BY date_rappel, id")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        rows.iter().map(row_to_rappel).collect()
    }

    async fn update_rappel(&self, rappel: &Rappel) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE rappels SET titre = ?, description = ?, date_rappel = ?,
                                type_rappel = ?, priorite = ?, traite = ?
             WHERE id = ?",
        )
        .bind(&rappel.titre)
        .bind(&rappel.description)
        .bind(rappel.date_rappel)
        .bind(&rappel.type_rappel)
        .bind(rappel.priorite.as_str())
        .bind(rappel.traite)
        .bind(rappel.id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn delete_rappel(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM rappels WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn rappels_recents(&self) -> Result<RappelsRecents, RepositoryError> {
        let row = sqlx::query(
            "SELECT
                COALESCE(SUM(CASE WHEN priorite = 'haute' THEN 1 ELSE 0 END), 0)
                    AS importants,
                COALESCE(SUM(CASE WHEN priorite <> 'haute' THEN 1 ELSE 0 END), 0)
                    AS autres
             FROM rappels
             WHERE traite = 0
               AND date_rappel BETWEEN date('now') AND date('now', '+7 days')",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(RappelsRecents {
            recents: get_column(&row, "autres")?,
            importants_recents: get_column(&row, "importants")?,
        })
    }

    async fn totaux(&self) -> Result<Totaux, RepositoryError> {
        let row = sqlx::query(
            "SELECT
                (SELECT COUNT(*) FROM etudiants) AS etudiants,
                (SELECT COUNT(*) FROM moniteurs) AS moniteurs,
                (SELECT COUNT(*) FROM programmations) AS programmations,
                (SELECT COUNT(*) FROM resultats) AS resultats",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(Totaux {
            etudiants: get_column(&row, "etudiants")?,
            moniteurs: get_column(&row, "moniteurs")?,
            programmations: get_column(&row, "programmations")?,
            resultats: get_column(&row, "resultats")?,
        })
    }

    async fn repartition_par_categorie(&self) -> Result<Vec<RepartitionEntry>, RepositoryError> {
        repartition(
            &self.pool,
            "SELECT COALESCE(categorie, '') AS libelle, COUNT(*) AS count
             FROM etudiants GROUP BY COALESCE(categorie, '') ORDER BY count DESC",
        )
        .await
    }

    async fn repartition_par_etape(&self) -> Result<Vec<RepartitionEntry>, RepositoryError> {
        repartition(
            &self.pool,
            "SELECT etape AS libelle, COUNT(*) AS count
             FROM progressions GROUP BY etape ORDER BY count DESC",
        )
        .await
    }

    async fn repartition_par_moniteur(&self) -> Result<Vec<RepartitionEntry>, RepositoryError> {
        repartition(
            &self.pool,
            "SELECT m.nom || ' ' || m.prenom AS libelle, COUNT(*) AS count
             FROM progressions p
             JOIN moniteurs m ON m.id = p.moniteur_id
             GROUP BY m.id ORDER BY count DESC",
        )
        .await
    }

    async fn repartition_reduction(&self) -> Result<Vec<RepartitionEntry>, RepositoryError> {
        repartition(
            &self.pool,
            "SELECT CASE reduction WHEN 1 THEN 'avec_reduction' ELSE 'sans_reduction' END
                 AS libelle,
                 COUNT(*) AS count
             FROM etudiants GROUP BY reduction ORDER BY count DESC",
        )
        .await
    }

    async fn evolution_inscriptions(&self) -> Result<Vec<EvolutionPoint>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT date(created_at) AS jour, COUNT(*) AS count
             FROM etudiants GROUP BY date(created_at) ORDER BY jour",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter()
            .map(|row| {
                let jour: String = get_column(row, "jour")?;
                let date = NaiveDate::parse_from_str(&jour, "%Y-%m-%d").map_err(|e| {
                    RepositoryError::Database(format!("date invalide '{jour}': {e}"))
                })?;
                Ok(EvolutionPoint {
                    date,
                    count: get_column(row, "count")?,
                })
            })
            .collect()
    }
}

async fn repartition(
    pool: &SqlitePool,
    sql: &str,
) -> Result<Vec<RepartitionEntry>, RepositoryError> {
    let rows = sqlx::query(sql).fetch_all(pool).await.map_err(db_err)?;

    rows.iter()
        .map(|row| {
            Ok(RepartitionEntry {
                libelle: get_column(row, "libelle")?,
                count: get_column(row, "count")?,
            })
        })
        .collect()
}
