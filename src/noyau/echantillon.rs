// src/noyau/echantillon.rs
//
// Balayage en x pour le tracé
// ---------------------------
// pas = (x_max - x_min) / n ; i = 0..=n (n + 1 échantillons) ; x = x_min + i·pas
//
// Contrats :
// - un point raté (erreur, NaN, ±∞) est ignoré : jamais de null, jamais de zéro
//   de remplacement, jamais d’arrêt du balayage
// - ordre croissant de i, donc x croissant (pas de tri)
// - coordonnées arrondies à 4 décimales
// - n = 0 => un seul échantillon, en x_min

use serde::{Deserialize, Serialize};

use super::eval::parse;
use super::expr::Portee;
use super::format::arrondi4;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnsembleEchantillons {
    /// Texte tel que reçu.
    pub expression: String,
    pub x_min: f64,
    pub x_max: f64,
    pub points: Vec<Point>,
}

/// Au-delà, le vecteur grandit à la demande.
const RESERVE_MAX: usize = 100_000;

/// Réserve initiale pour `point_count` pas, bornée (point_count vient de l’appelant).
fn capacite(point_count: u32) -> usize {
    usize::try_from(point_count)
        .unwrap_or(usize::MAX)
        .min(RESERVE_MAX)
        .saturating_add(1)
}

/// Échantillonne `expr` (normalisée) sur [x_min, x_max] en `point_count` pas.
///
/// L’expression est analysée une fois ; si elle est malformée, aucun point
/// n’est retenu.
pub fn sample(expr: &str, x_min: f64, x_max: f64, point_count: u32) -> EnsembleEchantillons {
    let mut points = Vec::new();

    if let Ok(arbre) = parse(expr) {
        let n = f64::from(point_count.max(1));

        points.reserve(capacite(point_count));

        for i in 0..=point_count {
            // combinaison convexe : jamais de débordement, même si x_max - x_min
            // n’est pas représentable ; i = 0 donne exactement x_min
            let t = f64::from(i) / n;
            let x = x_min * (1.0 - t) + x_max * t;
            let portee = Portee::x(x);

            match arbre.eval(Some(&portee)) {
                Ok(y) if x.is_finite() && y.is_finite() => points.push(Point {
                    x: arrondi4(x),
                    y: arrondi4(y),
                }),
                _ => {}
            }
        }
    }

    EnsembleEchantillons {
        expression: expr.to_string(),
        x_min,
        x_max,
        points,
    }
}
