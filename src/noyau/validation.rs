// src/noyau/validation.rs
//
// Garde-fou après réécriture :
// 1) liste blanche de caractères  [0-9 + - * / ( ) . , % ! espaces A-Z a-z _]
// 2) chaque suite maximale de lettres/_ doit être un nom de l’espace (espace.rs)
//
// PI / E ne sont pas réécrits ici : les jetons les résolvent via l’espace.

use super::erreur::{ErreurCalcul, ResultatCalcul};
use super::espace;

fn car_autorise(c: char) -> bool {
    c.is_ascii_digit()
        || c.is_ascii_alphabetic()
        || c.is_whitespace()
        || matches!(c, '+' | '-' | '*' | '/' | '(' | ')' | '.' | ',' | '%' | '!' | '_')
}

fn car_identifiant(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Suites maximales `[A-Za-z_]+`, dans l’ordre d’apparition.
pub fn identifiants(s: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut debut: Option<usize> = None;

    for (i, c) in s.char_indices() {
        match (car_identifiant(c), debut) {
            (true, None) => debut = Some(i),
            (false, Some(d)) => {
                out.push(&s[d..i]);
                debut = None;
            }
            _ => {}
        }
    }
    if let Some(d) = debut {
        out.push(&s[d..]);
    }
    out
}

/// Vérifie la forme réécrite. Renvoie l’entrée telle quelle si elle passe.
pub fn valider(s: &str) -> ResultatCalcul<&str> {
    if !s.chars().all(car_autorise) {
        return Err(ErreurCalcul::InvalidCharacters);
    }

    if let Some(nom) = identifiants(s)
        .into_iter()
        .find(|nom| !espace::noms().any(|connu| connu == *nom))
    {
        return Err(ErreurCalcul::UnsupportedIdentifier(nom.to_string()));
    }

    Ok(s)
}
