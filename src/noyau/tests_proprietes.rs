//! Tests de propriétés (campagne) : invariants du processeur.
//!
//! - factorielle : produit itératif exact sur tout le domaine 0..=170
//! - sucre : neutre sur une forme canonique, quel que soit Ans
//! - liste blanche : espace et validation partagent les mêmes noms
//! - non finis : NaN / ±∞ refusés en sortie seulement

use super::espace::{self, Entree, ModeAngle};
use super::{assainir, evaluate, Contexte, ErreurCalcul};

fn eval_ok(expr: &str, ctx: &Contexte) -> f64 {
    evaluate(expr, ctx).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_proche(expr: &str, ctx: &Contexte, attendu: f64) {
    let v = eval_ok(expr, ctx);
    assert!(
        (v - attendu).abs() <= 1e-9 * attendu.abs().max(1.0),
        "expr={expr:?} attendu={attendu} obtenu={v}"
    );
}

/* ------------------------ Factorielle ------------------------ */

#[test]
fn prop_factorielle_suffixe_egale_produit() {
    let ctx = Contexte::default();
    let mut produit = 1.0_f64;
    for n in 0..=170u32 {
        if n >= 2 {
            produit *= f64::from(n);
        }
        assert_eq!(eval_ok(&format!("{n}!"), &ctx), produit, "n={n}");
        assert_eq!(eval_ok(&format!("factorial({n})"), &ctx), produit, "n={n}");
    }
}

#[test]
fn prop_factorielle_hors_domaine() {
    let ctx = Contexte::default();
    assert_eq!(evaluate("171!", &ctx), Err(ErreurCalcul::ResultTooLarge));
    assert_eq!(evaluate("factorial(171)", &ctx), Err(ErreurCalcul::ResultTooLarge));
    assert_eq!(
        evaluate("factorial(-1)", &ctx),
        Err(ErreurCalcul::FactorialDomainError)
    );
    assert_eq!(
        evaluate("factorial(1.5)", &ctx),
        Err(ErreurCalcul::FactorialDomainError)
    );
}

/* ------------------------ Sucre ------------------------ */

#[test]
fn prop_canonique_stable() {
    let canoniques = [
        "2 + 3 * 4",
        "sin(PI/2)",
        "factorial(5)",
        "(50/100)",
        "2**3**2",
        "log(1000) - ln(E)",
        "abs(-2) * cbrt(27) / exp(0)",
    ];
    for s in canoniques {
        for ans in [0.0, -1.5, 1e21, 3.25] {
            let c = assainir(s, ans).unwrap_or_else(|e| panic!("{s:?}: {e}"));
            assert_eq!(c, s);
            // et la deuxième passe aussi
            assert_eq!(assainir(&c, ans).as_deref(), Ok(s));
        }
    }
}

#[test]
fn prop_sucre_equivaut_a_canonique() {
    let ctx = Contexte::new(4.0, ModeAngle::Radians);
    let paires = [
        ("5!", "factorial(5)"),
        ("50%", "50/100"),
        ("2^3", "2**3"),
        ("π", "PI"),
        ("ℯ^2", "E**2"),
        ("Ans + 1", "4 + 1"),
        ("3!*50%", "factorial(3)*50/100"),
    ];
    for (sucre, canon) in paires {
        assert_eq!(eval_ok(sucre, &ctx), eval_ok(canon, &ctx), "{sucre:?}");
    }
}

/* ------------------------ Liste blanche ------------------------ */

#[test]
fn prop_chaque_nom_de_l_espace_est_accepte() {
    let ctx = Contexte::default();
    for nom in espace::noms() {
        let expr = match espace::chercher(nom) {
            Some(Entree::Fonction(_)) => format!("{nom}(1)"),
            Some(Entree::Constante(_)) => nom.to_string(),
            None => unreachable!(),
        };
        // acos(1)=0, asin(1)… : tout est fini sur 1
        assert!(evaluate(&expr, &ctx).is_ok(), "{expr:?}");
    }
}

#[test]
fn prop_nom_hors_espace_refuse_avant_evaluation() {
    let ctx = Contexte::default();
    for (expr, nom) in [
        ("foo(1)", "foo"),
        ("1 + Math", "Math"),
        ("sin(1) * pi", "pi"),
        ("SIN(1)", "SIN"),
        ("eval(1)", "eval"),
        ("constructor", "constructor"),
        ("1e5", "e"),
    ] {
        assert_eq!(
            evaluate(expr, &ctx),
            Err(ErreurCalcul::UnsupportedIdentifier(nom.into())),
            "{expr:?}"
        );
    }
}

/* ------------------------ Angles ------------------------ */

#[test]
fn prop_trig_coherente_entre_modes() {
    let rad = Contexte::new(0.0, ModeAngle::Radians);
    let deg = Contexte::new(0.0, ModeAngle::Degres);

    for d in [0, 30, 45, 60, 90, 120, 180, 270] {
        let r = format!("{d}*PI/180");
        for f in ["sin", "cos"] {
            let vd = eval_ok(&format!("{f}({d})"), &deg);
            let vr = eval_ok(&format!("{f}({r})"), &rad);
            assert!((vd - vr).abs() < 1e-12, "{f}({d})");
        }
    }

    assert_proche("sin(90)", &deg, 1.0);
    assert_proche("sin(PI/2)", &rad, 1.0);
    assert_proche("acos(0)", &deg, 90.0);
    assert_proche("atan(1)", &deg, 45.0);
    // hyperboliques : insensibles au mode
    assert_proche("sinh(1)", &deg, 1.0_f64.sinh());
}

/* ------------------------ Résultats non finis ------------------------ */

#[test]
fn prop_non_finis_refuses() {
    let ctx = Contexte::default();
    for expr in ["1/0", "-1/0", "0/0", "sqrt(-4)", "log(-1)", "10**400", "exp(1000)"] {
        assert_eq!(
            evaluate(expr, &ctx),
            Err(ErreurCalcul::ComputationFailed),
            "{expr:?}"
        );
    }
    // l’infini intermédiaire est toléré si le résultat final est fini
    assert_eq!(eval_ok("1/(1/0)", &ctx), 0.0);
}
