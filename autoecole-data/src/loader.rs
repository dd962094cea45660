use std::io::Read;

use serde::Deserialize;
use thiserror::Error;

use autoecole_core::models::tarifs::cles;
use autoecole_core::{EcoleRepository, RepositoryError};

/// Errors that can occur when loading tariff data.
#[derive(Debug, Error)]
pub enum TarifLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Clé de tarif inconnue: '{0}'")]
    CleInconnue(String),

    #[error("Montant négatif pour '{cle}': {montant}")]
    MontantNegatif { cle: String, montant: i64 },

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<csv::Error> for TarifLoaderError {
    fn from(err: csv::Error) -> Self {
        TarifLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from the tariff CSV file.
///
/// The CSV has two columns:
/// - `cle`: one of the known tariff keys (e.g. `scolarite_AB`)
/// - `montant`: the amount in whole FCFA
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TarifRecord {
    pub cle: String,
    pub montant: i64,
}

/// Loader for tariff overrides from CSV files.
///
/// Reads CSV data and upserts it through the `EcoleRepository` trait, so it
/// works with any database backend. Loading is idempotent: re-running the
/// same file leaves the table in the same state.
pub struct TarifLoader;

impl TarifLoader {
    /// Parse tariff records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<TarifRecord>, TarifLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: TarifRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Validate and upsert tariff records into the database.
    ///
    /// Each key must belong to the known tariff vocabulary and carry a
    /// non-negative amount; the first invalid record aborts the load.
    /// Returns the number of records written.
    pub async fn load<R: EcoleRepository>(
        repo: &R,
        records: &[TarifRecord],
    ) -> Result<usize, TarifLoaderError> {
        for record in records {
            if !cles::TOUTES.contains(&record.cle.as_str()) {
                return Err(TarifLoaderError::CleInconnue(record.cle.clone()));
            }
            if record.montant < 0 {
                return Err(TarifLoaderError::MontantNegatif {
                    cle: record.cle.clone(),
                    montant: record.montant,
                });
            }
        }

        for record in records {
            repo.set_tarif(&record.cle, record.montant).await?;
        }

        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const TEST_CSV: &str = "cle,montant\nscolarite_A,35000\nscolarite_recyclage,70000\n";

    #[test]
    fn parse_lit_les_deux_colonnes() {
        let records = TarifLoader::parse(TEST_CSV.as_bytes()).expect("csv valide");

        assert_eq!(
            records,
            vec![
                TarifRecord {
                    cle: "scolarite_A".to_string(),
                    montant: 35_000,
                },
                TarifRecord {
                    cle: "scolarite_recyclage".to_string(),
                    montant: 70_000,
                },
            ]
        );
    }

    #[test]
    fn parse_signale_un_csv_malforme() {
        let result = TarifLoader::parse("cle,montant\nscolarite_A,pas_un_nombre\n".as_bytes());

        assert!(matches!(result, Err(TarifLoaderError::CsvParse(_))));
    }
}
