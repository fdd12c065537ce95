// src/noyau/format.rs
//
// Affichage d’un résultat flottant.
// - très grand (≥ 1e9) ou très petit (< 1e-6, hors zéro) : exposant, 6 décimales (1.234568e+9)
// - sinon : arrondi à 10 décimales, zéros finaux retirés (0.1+0.2 -> 0.3)

/// Seuil haut de la notation exposant.
const SEUIL_GRAND: f64 = 1e9;
/// Seuil bas de la notation exposant.
const SEUIL_PETIT: f64 = 1e-6;
const DECIMALES_EXPOSANT: usize = 6;
const DECIMALES_FIXES: usize = 10;

pub fn format_nombre(v: f64) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    if v == 0.0 {
        // couvre -0
        return "0".to_string();
    }

    let a = v.abs();
    if a >= SEUIL_GRAND || a < SEUIL_PETIT {
        return format_exposant(v);
    }

    let fixe = format!("{:.*}", DECIMALES_FIXES, v);
    match fixe.parse::<f64>() {
        Ok(arrondi) if arrondi == 0.0 => "0".to_string(),
        Ok(arrondi) => format!("{arrondi}"),
        Err(_) => fixe,
    }
}

/// "1.234568e9" (Rust) -> "1.234568e+9"
fn format_exposant(v: f64) -> String {
    let brut = format!("{:.*e}", DECIMALES_EXPOSANT, v);
    match brut.split_once('e') {
        Some((mantisse, exp)) if !exp.starts_with('-') => format!("{mantisse}e+{exp}"),
        _ => brut,
    }
}
