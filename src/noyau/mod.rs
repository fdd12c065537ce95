//! Noyau flottant : processeur d’expressions
//!
//! Organisation interne :
//! - sucre.rs      : Ans, π/ℯ, ^, factorielles, pourcentages
//! - validation.rs : liste blanche caractères + identifiants
//! - espace.rs     : table des fonctions/constantes + mode d’angle + factorielle
//! - jetons.rs     : tokenisation de la forme canonique
//! - rpn.rs        : shunting-yard + construction Expr
//! - expr.rs       : AST f64 + évaluation
//! - format.rs     : affichage d’un résultat
//! - eval.rs       : pipeline complet
//! - erreur.rs     : erreurs typées

pub mod erreur;
pub mod espace;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod rpn;
pub mod sucre;
pub mod validation;

#[cfg(test)]
mod tests_proprietes;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::ErreurCalcul;
pub use espace::ModeAngle;
pub use eval::{assainir, evaluate, Contexte};
pub use format::format_nombre;
