// src/noyau/format.rs

/// Précision d’affichage/transport des points du tracé.
pub const DECIMALES_POINT: i32 = 4;

/// Au-delà, un f64 n’a plus de partie fractionnaire significative à 4 décimales
/// (et v * 10^4 risquerait de déborder).
const SEUIL_ENTIER: f64 = 1e15;

/// Texte d’un résultat de calcul.
/// - entier => sans ".0" (4 et non 4.0)
/// - sinon, plus courte écriture qui redonne le même f64
/// - très grand / très petit => notation scientifique (1e21, 1e-7)
/// - jamais "-0"
pub fn format_nombre(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }

    let a = v.abs();
    if !(1e-6..1e21).contains(&a) {
        return format!("{v:e}");
    }

    format!("{v}")
}

/// Arrondi à 4 décimales (moitié loin de zéro), -0 ramené à 0.
pub fn arrondi4(v: f64) -> f64 {
    if !v.is_finite() || v.abs() >= SEUIL_ENTIER {
        return v;
    }

    let facteur = 10f64.powi(DECIMALES_POINT);
    let r = (v * facteur).round() / facteur;
    if r == 0.0 {
        0.0
    } else {
        r
    }
}
