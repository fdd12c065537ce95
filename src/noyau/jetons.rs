// src/noyau/jetons.rs

use super::erreur::{ErreurCalcul, ResultatCalcul};
use super::espace::{self, Constante, Entree, Fonction};

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Const(Constante),

    // Seulement des noms de l’espace : le reste est refusé dès la tokenisation.
    Fonc(Fonction),

    Plus,
    Minus,
    Star,
    Slash,
    Puissance, // **

    // Produits par le shunting-yard (jamais par tokenize)
    Neg,
    Pos,

    LPar,
    RPar,
    Virgule,
}

/// Tokenize une forme canonique (déjà réécrite + validée).
/// Supporte:
/// - nombres [0-9.]+ (un seul point : 12, 1.5, .5, 5.)
/// - opérateurs + - * / **
/// - parenthèses ( ) et virgule
/// - identifiants [A-Za-z_]+ résolus dans l’espace (fonctions + PI/E)
pub fn tokenize(s: &str) -> ResultatCalcul<Vec<Tok>> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            ',' => Some(Tok::Virgule),
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '/' => Some(Tok::Slash),
            '*' if chars.get(i + 1) == Some(&'*') => {
                i += 1;
                Some(Tok::Puissance)
            }
            '*' => Some(Tok::Star),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        // Identifiants : [A-Za-z_]+ (mêmes suites que la validation)
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_alphabetic() || chars[i] == '_') {
                i += 1;
            }
            let nom: String = chars[start..i].iter().collect();
            let t = match espace::chercher(&nom) {
                Some(Entree::Fonction(f)) => Tok::Fonc(f),
                Some(Entree::Constante(k)) => Tok::Const(k),
                None => return Err(ErreurCalcul::UnsupportedIdentifier(nom)),
            };
            out.push(t);
            continue;
        }

        // Nombre décimal
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let txt: String = chars[start..i].iter().collect();
            if txt.matches('.').count() > 1 {
                return Err(ErreurCalcul::MalformedExpression(format!(
                    "nombre invalide: {txt}"
                )));
            }
            let v = txt.parse::<f64>().map_err(|_| {
                ErreurCalcul::MalformedExpression(format!("nombre invalide: {txt}"))
            })?;
            out.push(Tok::Num(v));
            continue;
        }

        return Err(ErreurCalcul::MalformedExpression(format!(
            "caractère inattendu: '{c}'"
        )));
    }

    Ok(out)
}

/// Format utilitaire (journal) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(v) => format!("{v}"),
            Tok::Const(Constante::Pi) => "PI".to_string(),
            Tok::Const(Constante::E) => "E".to_string(),
            Tok::Fonc(f) => f.nom().to_string(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Puissance => "**".to_string(),
            Tok::Neg => "neg".to_string(),
            Tok::Pos => "pos".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
            Tok::Virgule => ",".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
