//! Tests scientifiques (campagne) : identités numériques + robustesse + limites contrôlées.
//!
//! But : vérifier le noyau f64 sur des invariants mathématiques connus.
//! - tolérance relative fixe (pas d’égalité stricte sur la trigo)
//! - budget temps global
//! - tailles bornées (profondeur, longueur)
//!
//! Notes :
//! - Toute entrée passe par normalize() comme en production.
//! - Le moins unaire lie plus fort que ^ : -x^2 vaut (-x)^2.
//! - Stress : profondeur modérée, l’AST est récursif (risque stack overflow).

use std::time::{Duration, Instant};

use super::{evaluate, normalize, sample, ErreurCalcul, Portee};

const TOLERANCE: f64 = 1e-9;

fn eval_ok(expr: &str) -> f64 {
    evaluate(&normalize(expr), None)
        .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
        .nombre
}

fn eval_x(expr: &str, x: f64) -> Result<f64, ErreurCalcul> {
    evaluate(&normalize(expr), Some(&Portee::x(x))).map(|v| v.nombre)
}

fn assert_proche(expr: &str, attendu: f64) {
    let v = eval_ok(expr);
    let ecart = (v - attendu).abs() / attendu.abs().max(1.0);
    assert!(ecart < TOLERANCE, "expr={expr:?} v={v} attendu={attendu}");
}

/// Budget global anti-gel (scientifique + safe).
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Identités trig ------------------------ */

#[test]
fn sci_angles_remarquables() {
    assert_proche("sin(π÷6)", 0.5);
    assert_proche("cos(π÷3)", 0.5);
    assert_proche("tan(π÷4)", 1.0);
    assert_proche("sin(π÷4)", 2f64.sqrt() / 2.0);
    assert_proche("cos(π)", -1.0);
}

#[test]
fn sci_pythagore_sur_grille() {
    for k in -20..=20 {
        let x = f64::from(k) * 0.37;
        let v = eval_x("sin(x)^2+cos(x)^2", x).unwrap();
        assert!((v - 1.0).abs() < TOLERANCE, "x={x} v={v}");
    }
}

#[test]
fn sci_symetries() {
    for k in 1..=10 {
        let x = f64::from(k) * 0.21;
        let s = eval_x("sin(x)", x).unwrap();
        let s_neg = eval_x("sin(0-x)", x).unwrap();
        assert!((s + s_neg).abs() < TOLERANCE);

        let c = eval_x("cos(x)", x).unwrap();
        let c_neg = eval_x("cos(0-x)", x).unwrap();
        assert!((c - c_neg).abs() < TOLERANCE);
    }
}

/* ------------------------ Logarithmes ------------------------ */

#[test]
fn sci_log_base_dix_et_ln_naturel() {
    // log = base 10 (calculatrice), ln = naturel : ne pas inverser
    assert_proche("log(100)", 2.0);
    assert_proche("log(0.001)", -3.0);
    assert_proche("ln(e^3)", 3.0);
    assert_proche("ln(10)", std::f64::consts::LN_10);
}

#[test]
fn sci_log_produit() {
    // log(a·b) = log(a) + log(b)
    let gauche = eval_ok("log(7×13)");
    let droite = eval_ok("log(7)+log(13)");
    assert!((gauche - droite).abs() < TOLERANCE);
}

#[test]
fn sci_racine_carree() {
    assert_proche("√(2)×√(2)", 2.0);
    assert_proche("√(144)", 12.0);
    assert_proche("(√7)^2", 7.0);
}

/* ------------------------ Domaines ------------------------ */

#[test]
fn sci_echecs_de_domaine() {
    for s in ["1÷0", "√(-4)", "log(0)", "ln(-1)", "0^-1", "(-8)^(1÷3)"] {
        let r = evaluate(&normalize(s), None);
        assert!(
            matches!(r, Err(ErreurCalcul::Domaine(_))),
            "s={s:?} r={r:?}"
        );
    }
}

#[test]
fn sci_tan_pres_asymptote_reste_fini() {
    // tan(π/2) en f64 : énorme mais fini (π/2 n’est pas représentable)
    let v = eval_ok("tan(π÷2)");
    assert!(v.is_finite());
    assert!(v.abs() > 1e15);
}

/* ------------------------ Échantillonnage ------------------------ */

#[test]
fn sci_echantillons_tan_restent_finis() {
    let e = sample(&normalize("tan(x)"), -5.0, 5.0, 400);
    assert!(!e.points.is_empty());
    assert!(e.points.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    assert!(e.points.windows(2).all(|w| w[0].x < w[1].x));
}

#[test]
fn sci_echantillons_ln_moitie_domaine() {
    // ln(x) sur [-1, 1] en 20 pas : x <= 0 ignorés (11 points), restent 10
    let e = sample(&normalize("ln(x)"), -1.0, 1.0, 20);
    assert_eq!(e.points.len(), 10);
    assert!(e.points.iter().all(|p| p.x > 0.0));
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_profondeur_parentheses_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let mut expr = "1".to_string();
    for _ in 0..60 {
        expr = format!("({expr}+1)");
        budget(t0, max);
    }

    assert_eq!(eval_ok(&expr), 61.0);
}

#[test]
fn sci_stress_taille_somme_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // 80 termes (suffisant pour détecter régressions, sans exploser la pile)
    let mut expr = String::new();
    for k in 0..80 {
        if k > 0 {
            expr.push_str(" + ");
        }
        expr.push_str("1÷2");
        budget(t0, max);
    }

    assert_eq!(eval_ok(&expr), 40.0);
}

#[test]
fn sci_stress_balayage_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let e = sample(&normalize("sin(x)×√(abs(x))+log(x^2+1)"), -100.0, 100.0, 10_000);
    budget(t0, max);
    assert_eq!(e.points.len(), 10_001);
}
