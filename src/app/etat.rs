//! src/app/etat.rs
//!
//! État de session (sans vue).
//!
//! Rôle : contenir l’état de la calculatrice (expression, dernier résultat, mémoire,
//! mode d’angle, historique) et offrir chaque action utilisateur comme une méthode simple.
//!
//! Contrats :
//! - Toute évaluation passe par `noyau::evaluate` avec un `Contexte` explicite.
//! - Un échec ne modifie ni l’expression, ni Ans, ni la mémoire : seul l’affichage change.
//! - Aucune dépendance egui ici (testable tel quel).

use tracing::{debug, info, warn};

use crate::noyau::espace::Constante;
use crate::noyau::sucre::{JETON_ANS, SYMBOLE_E, SYMBOLE_PI};
use crate::noyau::{evaluate, format_nombre, Contexte, ModeAngle};

/// Affiché quand l’expression est vide.
const AFFICHAGE_VIDE: &str = "0";

/// Aperçu quand l’expression en cours ne s’évalue pas (encore).
const APERCU_INDISPONIBLE: &str = "…";

#[derive(Clone, Debug, PartialEq)]
pub struct EntreeHistorique {
    pub expression: String,
    pub valeur: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionMemoire {
    Effacer,
    Rappeler,
    Ajouter,
    Soustraire,
}

/// Boutons du pavé (équivalent d’un `data-action`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bouton {
    Valeur(&'static str),
    Operateur(&'static str),
    Fonction(&'static str),
    Constante(Constante),
    Effacer,
    Supprimer,
    Egal,
    Memoire(ActionMemoire),
}

/// Touches clavier reconnues.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Touche {
    Caractere(char),
    Entree,
    Retour,
    Suppr,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- saisie ---
    pub expression: String,

    // --- sortie (aperçu, résultat ou message d’erreur) ---
    pub resultat: String,

    // --- session ---
    pub dernier_resultat: f64,
    pub memoire: Option<f64>,
    pub mode_angle: ModeAngle,

    /// Plus récent en tête.
    pub historique: Vec<EntreeHistorique>,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            expression: String::new(),
            resultat: AFFICHAGE_VIDE.to_string(),
            dernier_resultat: 0.0,
            memoire: None,
            mode_angle: ModeAngle::default(),
            historique: Vec::new(),
        }
    }
}

/// Faut-il glisser " * " entre `precedent` et `suivant` ?
///
/// Après une valeur fermée (Ans, π, ℯ, !, `)`) : oui devant un nombre, un point, une
/// lettre, `(`, π, ℯ. Après un chiffre ou un point : seulement devant ce qui n’est pas
/// numérique (on ne coupe pas un nombre en cours de frappe), sauf si `suivant` est une
/// valeur complète (rappel mémoire) : `3` puis MR donne `3 * 5`, jamais `35`.
fn doit_inserer_multiplication(precedent: &str, suivant: &str, valeur_complete: bool) -> bool {
    let prev = precedent.trim_end();
    let Some(dernier) = prev.chars().last() else {
        return false;
    };

    let fin_fermee = prev.ends_with(JETON_ANS)
        || matches!(dernier, '!' | ')')
        || dernier == SYMBOLE_PI
        || dernier == SYMBOLE_E;
    let fin_numerique = dernier.is_ascii_digit() || dernier == '.';

    if !fin_fermee && !fin_numerique {
        return false;
    }

    let Some(premier) = suivant.chars().next() else {
        return false;
    };
    let debut_numerique = premier.is_ascii_digit() || premier == '.';

    if debut_numerique {
        return fin_fermee || valeur_complete;
    }

    premier.is_ascii_alphabetic() || premier == '(' || premier == SYMBOLE_PI || premier == SYMBOLE_E
}

impl AppCalc {
    fn contexte(&self) -> Contexte {
        Contexte::new(self.dernier_resultat, self.mode_angle)
    }

    /* ------------------------ Saisie ------------------------ */

    /// Ajoute du texte à l’expression (avec multiplication implicite si demandé).
    pub fn ajouter(&mut self, texte: &str, implicite: bool) {
        let inserer = implicite && doit_inserer_multiplication(&self.expression, texte, false);
        self.pousser(texte, inserer);
    }

    /// Ajoute une valeur déjà formée (mémoire) : jamais collée au nombre qui précède.
    fn ajouter_valeur_complete(&mut self, texte: &str) {
        let inserer = doit_inserer_multiplication(&self.expression, texte, true);
        self.pousser(texte, inserer);
    }

    fn pousser(&mut self, texte: &str, multiplication: bool) {
        if multiplication {
            let base = self.expression.trim_end().len();
            self.expression.truncate(base);
            self.expression.push_str(" * ");
        }

        self.expression.push_str(texte);
        self.rafraichir_apercu();
    }

    /// Bouton valeur : chiffres, point, parenthèses, Ans.
    pub fn ajouter_valeur(&mut self, valeur: &str) {
        let implicite = valeur == "("
            || valeur == JETON_ANS
            || valeur.starts_with(|c: char| c.is_ascii_digit() || c == '.');
        self.ajouter(valeur, implicite);
    }

    pub fn ajouter_operateur(&mut self, op: &str) {
        self.ajouter(&format!(" {op} "), false);
    }

    /// `factorial` devient le suffixe `!` ; les autres ouvrent un appel `nom(`.
    pub fn ajouter_fonction(&mut self, nom: &str) {
        if nom == "factorial" {
            self.ajouter("!", false);
            return;
        }
        self.ajouter(&format!("{nom}("), true);
    }

    pub fn ajouter_constante(&mut self, k: Constante) {
        let symbole = match k {
            Constante::Pi => SYMBOLE_PI,
            Constante::E => SYMBOLE_E,
        };
        self.ajouter(&symbole.to_string(), true);
    }

    /// C : vide l’expression.
    pub fn effacer_expression(&mut self) {
        self.expression.clear();
        self.rafraichir_apercu();
    }

    /// DEL : retire le dernier caractère.
    pub fn supprimer_dernier(&mut self) {
        self.expression.pop();
        self.rafraichir_apercu();
    }

    /* ------------------------ Calcul ------------------------ */

    /// "=" : évalue, range dans l’historique, remplace l’expression par le résultat.
    pub fn calculer(&mut self) {
        if self.expression.is_empty() {
            return;
        }

        match evaluate(&self.expression, &self.contexte()) {
            Ok(v) => {
                info!(expression = %self.expression, valeur = v, "calcul");
                self.dernier_resultat = v;
                self.resultat = format_nombre(v);
                self.historique.insert(
                    0,
                    EntreeHistorique {
                        expression: std::mem::take(&mut self.expression),
                        valeur: v,
                    },
                );
                self.expression = format_nombre(v);
            }
            Err(e) => {
                warn!(expression = %self.expression, erreur = %e, "calcul refusé");
                self.resultat = e.to_string();
            }
        }
    }

    /// Aperçu en direct : "0" si vide, "…" si l’expression ne s’évalue pas.
    fn rafraichir_apercu(&mut self) {
        if self.expression.is_empty() {
            self.resultat = AFFICHAGE_VIDE.to_string();
            return;
        }

        self.resultat = match evaluate(&self.expression, &self.contexte()) {
            Ok(v) => format_nombre(v),
            Err(e) => {
                debug!(expression = %self.expression, erreur = %e, "aperçu indisponible");
                APERCU_INDISPONIBLE.to_string()
            }
        };
    }

    /* ------------------------ Historique ------------------------ */

    pub fn rappeler_historique(&mut self, index: usize) {
        if let Some(h) = self.historique.get(index) {
            self.expression = h.expression.clone();
            self.rafraichir_apercu();
        }
    }

    pub fn vider_historique(&mut self) {
        self.historique.clear();
    }

    /* ------------------------ Mémoire ------------------------ */

    pub fn memoire(&mut self, action: ActionMemoire) {
        match action {
            ActionMemoire::Effacer => self.memoire = None,
            ActionMemoire::Rappeler => {
                if let Some(m) = self.memoire {
                    let v = format_nombre(m);
                    let texte = if m < 0.0 { format!("({v})") } else { v };
                    self.ajouter_valeur_complete(&texte);
                }
            }
            ActionMemoire::Ajouter => self.cumuler_memoire(self.dernier_resultat, 1.0),
            ActionMemoire::Soustraire => self.cumuler_memoire(self.dernier_resultat, -1.0),
        }
    }

    fn cumuler_memoire(&mut self, montant: f64, signe: f64) {
        if montant.is_nan() {
            return;
        }
        let base = self.memoire.unwrap_or(0.0);
        self.memoire = Some(base + montant * signe);
    }

    pub fn memoire_active(&self) -> bool {
        self.memoire.is_some()
    }

    /* ------------------------ Mode d’angle ------------------------ */

    pub fn basculer_mode_angle(&mut self) {
        self.mode_angle = self.mode_angle.bascule();
        self.rafraichir_apercu();
    }

    /* ------------------------ Entrées UI ------------------------ */

    pub fn appuyer(&mut self, bouton: Bouton) {
        match bouton {
            Bouton::Valeur(v) => self.ajouter_valeur(v),
            Bouton::Operateur(op) => self.ajouter_operateur(op),
            Bouton::Fonction(nom) => self.ajouter_fonction(nom),
            Bouton::Constante(k) => self.ajouter_constante(k),
            Bouton::Effacer => self.effacer_expression(),
            Bouton::Supprimer => self.supprimer_dernier(),
            Bouton::Egal => self.calculer(),
            Bouton::Memoire(a) => self.memoire(a),
        }
    }

    /// Clavier. Renvoie `false` si la touche n’est pas gérée.
    pub fn touche(&mut self, touche: Touche) -> bool {
        match touche {
            Touche::Entree | Touche::Caractere('=') => self.calculer(),
            Touche::Retour => self.supprimer_dernier(),
            Touche::Suppr => self.effacer_expression(),
            Touche::Caractere(c) if c.is_ascii_digit() || c == '.' => {
                self.ajouter(&c.to_string(), true)
            }
            Touche::Caractere(c @ ('+' | '-' | '*' | '/' | '^')) => {
                self.ajouter_operateur(&c.to_string())
            }
            Touche::Caractere('%') => self.ajouter("%", false),
            Touche::Caractere('(') => self.ajouter("(", true),
            Touche::Caractere(')') => self.ajouter(")", false),
            Touche::Caractere(_) => return false,
        }
        true
    }
}
