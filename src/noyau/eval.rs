//! Noyau : évaluation (pipeline réel)
//!
//! sucre (Ans, π/ℯ, ^, !, %) -> validation -> jetons -> RPN -> Expr -> f64 fini
//!
//! Le contexte (Ans + mode d’angle) est passé explicitement : aucun état global.

use tracing::debug;

use super::erreur::{ErreurCalcul, ResultatCalcul};
use super::espace::ModeAngle;
use super::jetons::{format_tokens, tokenize};
use super::rpn::{from_rpn, to_rpn};
use super::sucre::reecrire;
use super::validation::valider;

/// Entrées en lecture seule d’une évaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Contexte {
    pub dernier_resultat: f64,
    pub mode_angle: ModeAngle,
}

impl Contexte {
    pub fn new(dernier_resultat: f64, mode_angle: ModeAngle) -> Self {
        Self {
            dernier_resultat,
            mode_angle,
        }
    }
}

/// Réécriture + validation : renvoie la forme canonique.
/// Sans sucre, la sortie est identique à l’entrée.
pub fn assainir(brut: &str, dernier_resultat: f64) -> ResultatCalcul<String> {
    let s = reecrire(brut, dernier_resultat)?;
    valider(&s)?;
    Ok(s)
}

/// API publique : évalue une saisie et retourne un f64 fini.
pub fn evaluate(brut: &str, ctx: &Contexte) -> ResultatCalcul<f64> {
    if brut.trim().is_empty() {
        return Err(ErreurCalcul::EmptyExpression);
    }

    // 1) Sucre + validation
    let canonique = assainir(brut, ctx.dernier_resultat)?;
    debug!(%brut, %canonique, "forme canonique");

    // 2) Jetons -> RPN -> Expr
    let jetons = tokenize(&canonique)?;
    let rpn = to_rpn(&jetons)?;
    debug!(rpn = %format_tokens(&rpn), "rpn");
    let expr = from_rpn(&rpn)?;

    // 3) Valeur (NaN / ±∞ refusés)
    let v = expr.evaluer(ctx.mode_angle)?;
    if !v.is_finite() {
        debug!(%expr, valeur = v, "résultat non fini");
        return Err(ErreurCalcul::ComputationFailed);
    }
    Ok(v)
}
