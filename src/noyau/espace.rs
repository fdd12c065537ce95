// src/noyau/espace.rs
//
// Espace de noms (table figée identifiant -> opération)
// -----------------------------------------------------
// - fonctions unaires : sin, cos, tan, asin, acos, atan, sinh, cosh, tanh,
//                       log, ln, sqrt, cbrt, abs, exp, factorial
// - constantes        : PI, E
//
// La même table sert à la validation (liste blanche) ET aux jetons :
// un nom absent d’ici n’existe pas pour l’évaluateur.

use num_traits::{FloatConst, ToPrimitive};

use super::erreur::{ErreurCalcul, ResultatCalcul};

/// Plus grand n tel que n! reste fini en f64.
pub const FACTORIELLE_MAX: u32 = 170;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModeAngle {
    #[default]
    Radians,
    Degres,
}

impl ModeAngle {
    pub fn bascule(self) -> ModeAngle {
        match self {
            ModeAngle::Radians => ModeAngle::Degres,
            ModeAngle::Degres => ModeAngle::Radians,
        }
    }

    /// Libellé court (bouton "Mode: RAD/DEG").
    pub fn libelle(self) -> &'static str {
        match self {
            ModeAngle::Radians => "RAD",
            ModeAngle::Degres => "DEG",
        }
    }

    /// Angle saisi -> radians.
    fn vers_radians(self, x: f64) -> f64 {
        match self {
            ModeAngle::Radians => x,
            ModeAngle::Degres => x * f64::PI() / 180.0,
        }
    }

    /// Radians -> angle affiché.
    fn depuis_radians(self, x: f64) -> f64 {
        match self {
            ModeAngle::Radians => x,
            ModeAngle::Degres => x * 180.0 / f64::PI(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Log,
    Ln,
    Sqrt,
    Cbrt,
    Abs,
    Exp,
    Factorielle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constante {
    Pi,
    E,
}

impl Constante {
    pub fn valeur(self) -> f64 {
        match self {
            Constante::Pi => f64::PI(),
            Constante::E => f64::E(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entree {
    Fonction(Fonction),
    Constante(Constante),
}

/// Table complète : ordre = ordre d’affichage des boutons.
const TABLE: [(&str, Entree); 18] = [
    ("sin", Entree::Fonction(Fonction::Sin)),
    ("cos", Entree::Fonction(Fonction::Cos)),
    ("tan", Entree::Fonction(Fonction::Tan)),
    ("asin", Entree::Fonction(Fonction::Asin)),
    ("acos", Entree::Fonction(Fonction::Acos)),
    ("atan", Entree::Fonction(Fonction::Atan)),
    ("sinh", Entree::Fonction(Fonction::Sinh)),
    ("cosh", Entree::Fonction(Fonction::Cosh)),
    ("tanh", Entree::Fonction(Fonction::Tanh)),
    ("log", Entree::Fonction(Fonction::Log)),
    ("ln", Entree::Fonction(Fonction::Ln)),
    ("sqrt", Entree::Fonction(Fonction::Sqrt)),
    ("cbrt", Entree::Fonction(Fonction::Cbrt)),
    ("abs", Entree::Fonction(Fonction::Abs)),
    ("exp", Entree::Fonction(Fonction::Exp)),
    ("factorial", Entree::Fonction(Fonction::Factorielle)),
    ("PI", Entree::Constante(Constante::Pi)),
    ("E", Entree::Constante(Constante::E)),
];

/// Recherche exacte (sensible à la casse : "pi" n’est PAS "PI").
pub fn chercher(nom: &str) -> Option<Entree> {
    TABLE.iter().find(|(n, _)| *n == nom).map(|(_, e)| *e)
}

/// Noms connus (liste blanche).
pub fn noms() -> impl Iterator<Item = &'static str> {
    TABLE.iter().map(|(n, _)| *n)
}

impl Fonction {
    pub fn nom(self) -> &'static str {
        TABLE
            .iter()
            .find(|(_, e)| *e == Entree::Fonction(self))
            .map(|(n, _)| *n)
            .unwrap_or("?")
    }

    /// Applique la fonction. Seule la factorielle peut échouer ici ;
    /// les NaN/∞ des autres sont rejetés en fin de pipeline.
    pub fn appliquer(self, x: f64, mode: ModeAngle) -> ResultatCalcul<f64> {
        use Fonction::*;

        let v = match self {
            Sin => mode.vers_radians(x).sin(),
            Cos => mode.vers_radians(x).cos(),
            Tan => mode.vers_radians(x).tan(),
            Asin => mode.depuis_radians(x.asin()),
            Acos => mode.depuis_radians(x.acos()),
            Atan => mode.depuis_radians(x.atan()),
            Sinh => x.sinh(),
            Cosh => x.cosh(),
            Tanh => x.tanh(),
            Log => x.log10(),
            Ln => x.ln(),
            Sqrt => x.sqrt(),
            Cbrt => x.cbrt(),
            Abs => x.abs(),
            Exp => x.exp(),
            Factorielle => factorielle(x)?,
        };
        Ok(v)
    }
}

/// n! par produit itératif 2·3·…·n (1 pour 0 et 1).
/// Domaine vérifié AVANT la borne : factorial(171.5) est une erreur de domaine.
pub fn factorielle(x: f64) -> ResultatCalcul<f64> {
    if !x.is_finite() || x.fract() != 0.0 || x < 0.0 {
        return Err(ErreurCalcul::FactorialDomainError);
    }
    let n = match x.to_u32() {
        Some(n) if n <= FACTORIELLE_MAX => n,
        _ => return Err(ErreurCalcul::ResultTooLarge),
    };

    let mut produit = 1.0_f64;
    for i in 2..=n {
        produit *= f64::from(i);
    }
    Ok(produit)
}
