//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - expressions bien formées : seules les erreurs de calcul sont acceptées
//! - invariants clés : Ok => fini ; forme canonique => même résultat

use std::time::{Duration, Instant};

use super::erreur::ErreurCalcul;
use super::espace::ModeAngle;
use super::{assainir, evaluate, Contexte};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn is_erreur_attendue(e: &ErreurCalcul) -> bool {
    // Domaine volontairement limité : factorielle non entière, débordement, NaN/∞.
    matches!(
        e,
        ErreurCalcul::FactorialDomainError
            | ErreurCalcul::ResultTooLarge
            | ErreurCalcul::ComputationFailed
    )
}

const FONCTIONS: [&str; 15] = [
    "sin", "cos", "tan", "asin", "acos", "atan", "sinh", "cosh", "tanh", "log", "ln", "sqrt",
    "cbrt", "abs", "exp",
];

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => "0".to_string(),
        1 => format!("{}", rng.pick(10)),
        2 => format!("{}", rng.pick(200)),
        3 => format!("{}.{}", rng.pick(10), rng.pick(100)),
        4 => format!(".{}", 1 + rng.pick(9)),
        _ => format!("{}", 1 + rng.pick(6)),
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(8) {
        0 | 1 | 2 => gen_nombre(rng),
        3 => "π".to_string(),
        4 => "ℯ".to_string(),
        5 => "Ans".to_string(),
        6 => format!("{}!", rng.pick(12)),
        _ => format!("{}%", gen_nombre(rng)),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    let a = gen_expr(rng, depth - 1);
    match rng.pick(11) {
        0 => gen_atom(rng),
        1 => format!("({a}+{})", gen_expr(rng, depth - 1)),
        2 => format!("({a} - {})", gen_expr(rng, depth - 1)),
        3 => format!("{a}*{}", gen_expr(rng, depth - 1)),
        4 => format!("({a})/({})", gen_expr(rng, depth - 1)),
        5 => format!("({a})^{}", rng.pick(4)),
        6 => format!("(-{a})"),
        7 => format!("({a})!"),
        8 => format!("({a})%"),
        _ => {
            let f = FONCTIONS[rng.pick(FONCTIONS.len() as u32) as usize];
            format!("{f}({a})")
        }
    }
}

fn contexte_aleatoire(rng: &mut Rng) -> Contexte {
    let ans = match rng.pick(4) {
        0 => 0.0,
        1 => -2.5,
        2 => 4.0,
        _ => 1e-3,
    };
    let mode = if rng.coin() {
        ModeAngle::Degres
    } else {
        ModeAngle::Radians
    };
    Contexte::new(ans, mode)
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_invariant_fini() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // Même seed => mêmes expressions => mêmes sorties (déterminisme)
    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        let ctx = contexte_aleatoire(&mut rng);

        let r1 = evaluate(&expr, &ctx);
        let r2 = evaluate(&expr, &ctx);
        assert_eq!(r1, r2, "non déterministe: expr={expr:?}");

        match r1 {
            Ok(v) => {
                assert!(v.is_finite(), "Ok non fini: expr={expr:?} v={v}");
                seen_ok += 1;
            }
            Err(e) => {
                assert!(
                    is_erreur_attendue(&e),
                    "erreur non attendue: expr={expr:?} err={e}"
                );
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_forme_canonique_meme_resultat() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 3);
        let ctx = contexte_aleatoire(&mut rng);

        let canon = match assainir(&expr, ctx.dernier_resultat) {
            Ok(c) => c,
            Err(e) => panic!("assainir({expr:?}) erreur: {e}"),
        };

        // plus de sucre : seconde passe neutre
        assert_eq!(
            assainir(&canon, ctx.dernier_resultat).as_deref(),
            Ok(canon.as_str())
        );
        assert_eq!(evaluate(&expr, &ctx), evaluate(&canon, &ctx), "expr={expr:?}");
    }
}

#[test]
fn fuzz_safe_entrees_quelconques_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let alphabet: Vec<char> = "0123456789+-*/^().,%! πℯAnsincoPIE_x$".chars().collect();
    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..500 {
        budget(t0, max);

        let n = 1 + rng.pick(16) as usize;
        let s: String = (0..n)
            .map(|_| alphabet[rng.pick(alphabet.len() as u32) as usize])
            .collect();

        // tout est permis sauf paniquer ou renvoyer un non fini
        if let Ok(v) = evaluate(&s, &Contexte::default()) {
            assert!(v.is_finite(), "s={s:?}");
        }
    }
}

#[test]
fn fuzz_safe_parentheses_profondes() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let mut expr = "1".to_string();
    for _ in 0..200 {
        expr = format!("({expr}+1)");
    }
    budget(t0, max);

    assert_eq!(evaluate(&expr, &Contexte::default()), Ok(201.0));
    assert_eq!(
        evaluate(&format!("({expr}"), &Contexte::default()),
        Err(ErreurCalcul::UnbalancedParentheses)
    );
}
