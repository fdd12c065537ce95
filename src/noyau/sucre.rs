// src/noyau/sucre.rs
//
// Réécriture du “sucre” de saisie vers la forme canonique
// -------------------------------------------------------
// Ordre FIXE :
//   1) Ans      -> (dernier résultat)
//   2) π / ℯ    -> PI / E
//   3) ^        -> **
//   4) x!       -> factorial(x)   (boucle jusqu’à épuisement des '!')
//   5) x%       -> (x/100)        (seulement APRÈS toutes les factorielles)
//
// Les positions sont en caractères (π et ℯ sont multi-octets).

use super::erreur::{ErreurCalcul, ResultatCalcul};

pub const SYMBOLE_PI: char = 'π';
pub const SYMBOLE_E: char = 'ℯ';
pub const JETON_ANS: &str = "Ans";

/// Jeton puissance attendu par l’évaluateur.
pub const JETON_PUISSANCE: &str = "**";

/// Suffixe traité par `resoudre_suffixes`.
#[derive(Clone, Copy, Debug)]
enum Suffixe {
    Factorielle,
    Pourcentage,
}

impl Suffixe {
    fn symbole(self) -> char {
        match self {
            Suffixe::Factorielle => '!',
            Suffixe::Pourcentage => '%',
        }
    }

    fn usage_invalide(self) -> ErreurCalcul {
        match self {
            Suffixe::Factorielle => ErreurCalcul::InvalidFactorialUsage,
            Suffixe::Pourcentage => ErreurCalcul::InvalidPercentageUsage,
        }
    }

    fn envelopper(self, operande: &str) -> String {
        match self {
            Suffixe::Factorielle => format!("factorial({operande})"),
            Suffixe::Pourcentage => format!("({operande}/100)"),
        }
    }
}

/// Applique les 5 réécritures dans l’ordre.
pub fn reecrire(brut: &str, dernier_resultat: f64) -> ResultatCalcul<String> {
    let s = remplacer_ans(brut, dernier_resultat);
    let s = remplacer_constantes(&s);
    let s = s.replace('^', JETON_PUISSANCE);
    let s = resoudre_suffixes(&s, Suffixe::Factorielle)?;
    resoudre_suffixes(&s, Suffixe::Pourcentage)
}

/// `Display` de f64 : jamais de notation exposant, aller-retour exact.
pub fn remplacer_ans(s: &str, dernier_resultat: f64) -> String {
    s.replace(JETON_ANS, &format!("({dernier_resultat})"))
}

pub fn remplacer_constantes(s: &str) -> String {
    s.replace(SYMBOLE_PI, "PI").replace(SYMBOLE_E, "E")
}

/// Remplace chaque suffixe, le plus à gauche d’abord, en re-cherchant après
/// chaque réécriture (les positions bougent).
fn resoudre_suffixes(s: &str, suffixe: Suffixe) -> ResultatCalcul<String> {
    let mut chars: Vec<char> = s.chars().collect();

    while let Some(pos) = chars.iter().position(|&c| c == suffixe.symbole()) {
        let debut = debut_operande(&chars, pos, suffixe)?;
        let operande: String = chars[debut..pos].iter().collect();
        let remplacement = suffixe.envelopper(&operande);

        chars.splice(debut..=pos, remplacement.chars());
    }

    Ok(chars.into_iter().collect())
}

/// Caractères admis dans un opérande “nu” (sans parenthèses).
fn est_car_operande(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == SYMBOLE_PI || c == SYMBOLE_E
}

/// Début de l’opérande qui précède `chars[pos]`, par balayage arrière.
///
/// - `)` juste avant : on remonte jusqu’à la `(` correspondante (profondeur).
/// - sinon : on remonte tant que `est_car_operande`.
fn debut_operande(chars: &[char], pos: usize, suffixe: Suffixe) -> ResultatCalcul<usize> {
    if pos == 0 {
        return Err(suffixe.usage_invalide());
    }

    if chars[pos - 1] == ')' {
        let mut profondeur = 1usize;
        let mut i = pos - 1;
        while i > 0 {
            i -= 1;
            match chars[i] {
                ')' => profondeur += 1,
                '(' => {
                    profondeur -= 1;
                    if profondeur == 0 {
                        return Ok(i);
                    }
                }
                _ => {}
            }
        }
        return Err(ErreurCalcul::UnbalancedParentheses);
    }

    let mut debut = pos;
    while debut > 0 && est_car_operande(chars[debut - 1]) {
        debut -= 1;
    }

    if debut == pos {
        return Err(suffixe.usage_invalide());
    }
    Ok(debut)
}
