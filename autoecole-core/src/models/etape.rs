use serde::{Deserialize, Serialize};

/// A named step in a student's progression through training and examination.
///
/// `as_str` returns the exact keys used by the stored progression records and
/// the reporting endpoints, accents included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Etape {
    #[serde(rename = "inscription")]
    Inscription,
    #[serde(rename = "visite_médicale")]
    VisiteMedicale,
    #[serde(rename = "cours_de_code")]
    CoursDeCode,
    #[serde(rename = "prêt_pour_examen_code")]
    PretPourExamenCode,
    #[serde(rename = "programmé_pour_le_code")]
    ProgrammePourLeCode,
    #[serde(rename = "cours_de_conduite")]
    CoursDeConduite,
    #[serde(rename = "prêt_pour_examen_conduite")]
    PretPourExamenConduite,
    #[serde(rename = "programmé_pour_la_conduite")]
    ProgrammePourLaConduite,
    #[serde(rename = "terminé")]
    Termine,
}

impl Etape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inscription => "inscription",
            Self::VisiteMedicale => "visite_médicale",
            Self::CoursDeCode => "cours_de_code",
            Self::PretPourExamenCode => "prêt_pour_examen_code",
            Self::ProgrammePourLeCode => "programmé_pour_le_code",
            Self::CoursDeConduite => "cours_de_conduite",
            Self::PretPourExamenConduite => "prêt_pour_examen_conduite",
            Self::ProgrammePourLaConduite => "programmé_pour_la_conduite",
            Self::Termine => "terminé",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "inscription" => Some(Self::Inscription),
            "visite_médicale" => Some(Self::VisiteMedicale),
            "cours_de_code" => Some(Self::CoursDeCode),
            "prêt_pour_examen_code" => Some(Self::PretPourExamenCode),
            "programmé_pour_le_code" => Some(Self::ProgrammePourLeCode),
            "cours_de_conduite" => Some(Self::CoursDeConduite),
            "prêt_pour_examen_conduite" => Some(Self::PretPourExamenConduite),
            "programmé_pour_la_conduite" => Some(Self::ProgrammePourLaConduite),
            "terminé" => Some(Self::Termine),
            _ => None,
        }
    }
}

/// Which of the two examinations a session or result concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExamenType {
    Code,
    Conduite,
}

impl ExamenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Conduite => "conduite",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "code" => Some(Self::Code),
            "conduite" => Some(Self::Conduite),
            _ => None,
        }
    }

    /// Stage a student must be at to be listed for an exam session.
    pub fn etape_eligible(&self) -> Etape {
        match self {
            Self::Code => Etape::PretPourExamenCode,
            Self::Conduite => Etape::PretPourExamenConduite,
        }
    }

    /// Stage a student is moved to once a session is scheduled, and from
    /// which a result may be recorded.
    pub fn etape_programmee(&self) -> Etape {
        match self {
            Self::Code => Etape::ProgrammePourLeCode,
            Self::Conduite => Etape::ProgrammePourLaConduite,
        }
    }
}
