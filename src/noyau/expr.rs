// src/noyau/expr.rs
//
// AST flottant (f64).
// - Nombre : littéral
// - Const  : PI / E (résolues via l’espace)
// - Appel  : fonction unaire de l’espace
//
// Évaluation récursive : les seules erreurs levées en cours de route viennent de
// factorial ; NaN/∞ sont rejetés une seule fois, en sortie (eval.rs).

use std::fmt;

use super::erreur::ResultatCalcul;
use super::espace::{Constante, Fonction, ModeAngle};

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(f64),
    Const(Constante),

    Neg(Box<Expr>),

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Puissance(Box<Expr>, Box<Expr>),

    Appel(Fonction, Box<Expr>),
}

impl Expr {
    pub fn evaluer(&self, mode: ModeAngle) -> ResultatCalcul<f64> {
        use Expr::*;

        let v = match self {
            Nombre(v) => *v,
            Const(k) => k.valeur(),
            Neg(x) => -x.evaluer(mode)?,
            Add(a, b) => a.evaluer(mode)? + b.evaluer(mode)?,
            Sub(a, b) => a.evaluer(mode)? - b.evaluer(mode)?,
            Mul(a, b) => a.evaluer(mode)? * b.evaluer(mode)?,
            Div(a, b) => a.evaluer(mode)? / b.evaluer(mode)?,
            Puissance(a, b) => a.evaluer(mode)?.powf(b.evaluer(mode)?),
            Appel(f, x) => f.appliquer(x.evaluer(mode)?, mode)?,
        };
        Ok(v)
    }
}

/// Affichage entièrement parenthésé (journal / démarche).
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;

        match self {
            Nombre(v) => write!(f, "{v}"),
            Const(Constante::Pi) => write!(f, "PI"),
            Const(Constante::E) => write!(f, "E"),
            Neg(x) => write!(f, "(-{x})"),
            Add(a, b) => write!(f, "({a} + {b})"),
            Sub(a, b) => write!(f, "({a} - {b})"),
            Mul(a, b) => write!(f, "({a} * {b})"),
            Div(a, b) => write!(f, "({a} / {b})"),
            Puissance(a, b) => write!(f, "({a} ** {b})"),
            Appel(fonc, x) => write!(f, "{}({x})", fonc.nom()),
        }
    }
}
