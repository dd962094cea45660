use serde::{Deserialize, Serialize};

/// A single permit class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PermisClasse {
    A,
    B,
    C,
    D,
    E,
}

impl PermisClasse {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            "D" => Some(Self::D),
            "E" => Some(Self::E),
            _ => None,
        }
    }
}

/// The selectable category combinations offered on the enrollment form.
///
/// The enrollment UI captures exactly one of these despite the legacy field
/// being named in the plural, so the selection is modeled as a single value
/// (`Option<Categorie>` on the student record). Each combination expands to
/// its permit classes via [`Categorie::classes`], which is what the tuition
/// rule table actually matches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Categorie {
    A,
    B,
    AB,
    BCDE,
    ABCDE,
    CDE,
}

impl Categorie {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::AB => "AB",
            Self::BCDE => "BCDE",
            Self::ABCDE => "ABCDE",
            Self::CDE => "CDE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "AB" => Some(Self::AB),
            "BCDE" => Some(Self::BCDE),
            "ABCDE" => Some(Self::ABCDE),
            "CDE" => Some(Self::CDE),
            _ => None,
        }
    }

    /// Permit classes covered by this combination.
    pub fn classes(&self) -> &'static [PermisClasse] {
        use PermisClasse::*;
        match self {
            Self::A => &[A],
            Self::B => &[B],
            Self::AB => &[A, B],
            Self::BCDE => &[B, C, D, E],
            Self::ABCDE => &[A, B, C, D, E],
            Self::CDE => &[C, D, E],
        }
    }

    pub fn toutes() -> &'static [Categorie] {
        &[
            Self::A,
            Self::B,
            Self::AB,
            Self::BCDE,
            Self::ABCDE,
            Self::CDE,
        ]
    }
}
