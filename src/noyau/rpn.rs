// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis reconstruire Expr
//
// Règles:
// - Fonc(f): toujours suivie de '(' ; sortie après la parenthèse fermante
// - +/- en position de valeur => unaires (Pos/Neg), préfixes, sans dépiler
// - Précédences: + - (1) < * / (2) < unaires (3) < ** (4, associatif à droite)
//   donc -2**2 = -(2**2) et 2**-1 = 2**(-1)
// - Virgule : dans un appel, les arguments après le premier sont lus puis ignorés
//   (sin(30, 5) = sin(30)) ; ailleurs, séquence dont on garde la droite ((1, 2) = 2)
// - Deux valeurs côte à côte (ex: "2(3)", "2 PI") sont refusées
// - Profondeur de l’arbre bornée (PROFONDEUR_MAX) : l’évaluation est récursive

use super::erreur::{ErreurCalcul, ResultatCalcul};
use super::expr::Expr;
use super::jetons::Tok;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Neg | Tok::Pos => 3,
        Tok::Puissance => 4,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Puissance)
}

/// Profondeur maximale de l’Expr construite (unaires + opérateurs + appels imbriqués).
pub const PROFONDEUR_MAX: usize = 500;

/// Groupe en cours : racine, `(` simple ou `(` d’un appel de fonction.
struct Groupe {
    /// taille de `out` à l’ouverture
    debut: usize,
    appel: bool,
    /// taille de `out` à la fin du premier argument (appel avec virgule)
    fin_premier: Option<usize>,
}

fn mal_forme(msg: &str) -> ErreurCalcul {
    ErreurCalcul::MalformedExpression(msg.to_string())
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Fonc(Sin), LPar, Const(Pi), Slash, Num(2), RPar]
///   rpn:    [Const(Pi), Num(2), Slash, Fonc(Sin)]
pub fn to_rpn(tokens: &[Tok]) -> ResultatCalcul<Vec<Tok>> {
    if tokens.is_empty() {
        return Err(ErreurCalcul::EmptyExpression);
    }

    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    let mut groupes: Vec<Groupe> = vec![Groupe {
        debut: 0,
        appel: false,
        fin_premier: None,
    }];

    // true tant qu’on attend un opérande (début, après opérateur, après '(')
    let mut attend_valeur = true;

    for (idx, tok) in tokens.iter().enumerate() {
        match tok {
            Tok::Num(_) | Tok::Const(_) => {
                if !attend_valeur {
                    return Err(mal_forme("opérande inattendu (opérateur manquant)"));
                }
                out.push(tok.clone());
                attend_valeur = false;
            }

            Tok::Fonc(f) => {
                if !attend_valeur {
                    return Err(mal_forme("fonction inattendue (opérateur manquant)"));
                }
                if tokens.get(idx + 1) != Some(&Tok::LPar) {
                    return Err(ErreurCalcul::MalformedExpression(format!(
                        "'(' attendue après {}",
                        f.nom()
                    )));
                }
                ops.push(tok.clone());
            }

            Tok::LPar => {
                if !attend_valeur {
                    return Err(mal_forme("'(' inattendue (opérateur manquant)"));
                }
                groupes.push(Groupe {
                    debut: out.len(),
                    appel: matches!(ops.last(), Some(Tok::Fonc(_))),
                    fin_premier: None,
                });
                ops.push(Tok::LPar);
            }

            Tok::RPar => {
                if attend_valeur {
                    return Err(mal_forme("opérande manquant avant ')'"));
                }

                // dépile jusqu’à '('
                loop {
                    match ops.pop() {
                        Some(Tok::LPar) => break,
                        Some(op) => out.push(op),
                        None => return Err(ErreurCalcul::UnbalancedParentheses),
                    }
                }

                // arguments en trop : lus (syntaxe vérifiée) puis retirés
                if let Some(n) = groupes.pop().and_then(|g| g.fin_premier) {
                    out.truncate(n);
                }

                // si une fonction est au sommet, on la sort aussi
                if matches!(ops.last(), Some(Tok::Fonc(_))) {
                    if let Some(f) = ops.pop() {
                        out.push(f);
                    }
                }
            }

            Tok::Plus | Tok::Minus if attend_valeur => {
                // unaire : préfixe, rien à dépiler
                let unaire = if matches!(tok, Tok::Minus) {
                    Tok::Neg
                } else {
                    Tok::Pos
                };
                ops.push(unaire);
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Puissance => {
                if attend_valeur {
                    return Err(mal_forme("opérateur inattendu (opérande manquant)"));
                }

                // dépile tant que:
                // - on n'est pas bloqué par '(' ou une fonction
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar | Tok::Fonc(_)) {
                        break;
                    }

                    let p_top = precedence(top);
                    let p_tok = precedence(tok);

                    let doit_pop = if is_right_associative(tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if !doit_pop {
                        break;
                    }
                    if let Some(op) = ops.pop() {
                        out.push(op);
                    }
                }

                ops.push(tok.clone());
                attend_valeur = true;
            }

            Tok::Virgule => {
                if attend_valeur {
                    return Err(mal_forme("virgule inattendue (opérande manquant)"));
                }

                // termine l’opérande courant, sans toucher à la '(' du groupe
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar) {
                        break;
                    }
                    if let Some(op) = ops.pop() {
                        out.push(op);
                    }
                }

                if let Some(g) = groupes.last_mut() {
                    if g.appel {
                        g.fin_premier.get_or_insert(out.len());
                    } else {
                        out.truncate(g.debut);
                    }
                }
                attend_valeur = true;
            }

            Tok::Neg | Tok::Pos => return Err(mal_forme("jeton interne en entrée")),
        }
    }

    if attend_valeur {
        return Err(mal_forme("expression incomplète"));
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(ErreurCalcul::UnbalancedParentheses);
        }
        out.push(op);
    }

    Ok(out)
}

fn profondeur_bornee(p: usize) -> ResultatCalcul<usize> {
    if p > PROFONDEUR_MAX {
        return Err(ErreurCalcul::MalformedExpression(format!(
            "expression trop imbriquée (profondeur > {PROFONDEUR_MAX})"
        )));
    }
    Ok(p)
}

/// Construit une Expr à partir d’une RPN.
///
/// Chaque entrée de pile garde sa profondeur : on refuse avant de construire un arbre
/// que l’évaluation (récursive) ne pourrait pas parcourir.
pub fn from_rpn(rpn: &[Tok]) -> ResultatCalcul<Expr> {
    let mut st: Vec<(Expr, usize)> = Vec::new();

    for tok in rpn {
        match tok {
            Tok::Num(v) => st.push((Expr::Nombre(*v), 1)),
            Tok::Const(k) => st.push((Expr::Const(*k), 1)),

            Tok::Neg | Tok::Pos => {
                let (x, p) = st.pop().ok_or_else(|| mal_forme("opérande manquant"))?;
                if matches!(tok, Tok::Neg) {
                    st.push((Expr::Neg(Box::new(x)), profondeur_bornee(p + 1)?));
                } else {
                    st.push((x, p));
                }
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Puissance => {
                let (b, pb) = st.pop().ok_or_else(|| mal_forme("opérande manquant"))?;
                let (a, pa) = st.pop().ok_or_else(|| mal_forme("opérande manquant"))?;
                let p = profondeur_bornee(pa.max(pb) + 1)?;
                let (a, b) = (Box::new(a), Box::new(b));

                let e = match tok {
                    Tok::Plus => Expr::Add(a, b),
                    Tok::Minus => Expr::Sub(a, b),
                    Tok::Star => Expr::Mul(a, b),
                    Tok::Slash => Expr::Div(a, b),
                    _ => Expr::Puissance(a, b),
                };
                st.push((e, p));
            }

            Tok::Fonc(f) => {
                let (x, p) = st.pop().ok_or_else(|| mal_forme("fonction sans argument"))?;
                st.push((Expr::Appel(*f, Box::new(x)), profondeur_bornee(p + 1)?));
            }

            Tok::LPar | Tok::RPar | Tok::Virgule => {
                return Err(mal_forme("parenthèse inattendue en RPN"))
            }
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some((e, _)), true) => Ok(e),
        _ => Err(mal_forme("expression invalide")),
    }
}
