//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - on accepte les erreurs typées (domaine, syntaxe...) : jamais de panique
//! - invariants clés :
//!     succès => nombre fini
//!     normalize(normalize(s)) == normalize(s)
//!     points échantillonnés finis et x strictement croissant

use std::time::{Duration, Instant};

use super::{evaluate, normalize, sample, ErreurCalcul, Portee};

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

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_atome(rng: &mut Rng, avec_x: bool) -> String {
    match rng.pick(if avec_x { 6 } else { 5 }) {
        0 => format!("{}", rng.pick(10)),
        1 => format!("{}.{}", rng.pick(10), rng.pick(100)),
        2 => "π".to_string(),
        3 => "e".to_string(),
        4 => format!("{}π", 1 + rng.pick(4)),
        _ => "x".to_string(),
    }
}

fn gen_expr(rng: &mut Rng, profondeur: u32, avec_x: bool) -> String {
    if profondeur == 0 || rng.pick(4) == 0 {
        return gen_atome(rng, avec_x);
    }

    let p = profondeur - 1;
    match rng.pick(8) {
        0 => format!("{}+{}", gen_expr(rng, p, avec_x), gen_expr(rng, p, avec_x)),
        1 => format!("{}-{}", gen_expr(rng, p, avec_x), gen_expr(rng, p, avec_x)),
        2 => format!("{}×{}", gen_expr(rng, p, avec_x), gen_expr(rng, p, avec_x)),
        3 => format!("({})÷({})", gen_expr(rng, p, avec_x), gen_expr(rng, p, avec_x)),
        4 => format!("({})^{}", gen_expr(rng, p, avec_x), rng.pick(4)),
        5 => {
            let f = ["sin", "cos", "tan", "log", "ln", "√"][rng.pick(6) as usize];
            format!("{f}({})", gen_expr(rng, p, avec_x))
        }
        6 => format!("-({})", gen_expr(rng, p, avec_x)),
        _ => format!("({})", gen_expr(rng, p, avec_x)),
    }
}

/// Abîme une expression (suppression / insertion d’un caractère).
fn abimer(rng: &mut Rng, s: &str) -> String {
    let mut chars: Vec<char> = s.chars().collect();
    if chars.is_empty() {
        return "(".to_string();
    }
    let pos = rng.pick(chars.len() as u32) as usize;
    if rng.coin() {
        chars.remove(pos);
    } else {
        let c = ['(', ')', '+', '×', '^', '.', '√', 'π'][rng.pick(8) as usize];
        chars.insert(pos, c);
    }
    chars.into_iter().collect()
}

/* ------------------------ Campagnes ------------------------ */

#[test]
fn fuzz_evaluation_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(800);
    let mut rng = Rng::new(0xC0FFEE);

    let mut succes = 0usize;
    for _ in 0..2_000 {
        let s = gen_expr(&mut rng, 4, false);
        match evaluate(&normalize(&s), None) {
            Ok(v) => {
                assert!(v.nombre.is_finite(), "s={s:?}");
                assert!(!v.texte.is_empty());
                succes += 1;
            }
            Err(ErreurCalcul::IdentifiantInconnu(nom)) => {
                panic!("identifiant inconnu {nom:?} pour une expression générée s={s:?}")
            }
            Err(_) => {}
        }
        budget(t0, max);
    }

    // la majorité des expressions générées sont bien formées et définies
    assert!(succes > 500, "succès={succes}");
}

#[test]
fn fuzz_entrees_abimees_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(800);
    let mut rng = Rng::new(42);

    for _ in 0..2_000 {
        let g = gen_expr(&mut rng, 3, true);
        let s = abimer(&mut rng, &g);
        let _ = evaluate(&normalize(&s), Some(&Portee::x(0.5)));
        budget(t0, max);
    }
}

#[test]
fn fuzz_normalisation_idempotente() {
    let mut rng = Rng::new(7);

    for _ in 0..1_000 {
        let g = gen_expr(&mut rng, 3, true);
        let s = abimer(&mut rng, &g);
        let une = normalize(&s);
        assert_eq!(normalize(&une), une, "s={s:?}");
    }
}

#[test]
fn fuzz_determinisme() {
    let mut rng = Rng::new(1234);

    for _ in 0..500 {
        let s = normalize(&gen_expr(&mut rng, 4, false));
        assert_eq!(evaluate(&s, None), evaluate(&s, None), "s={s:?}");
    }
}

#[test]
fn fuzz_echantillons_finis_et_ordonnes() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1_500);
    let mut rng = Rng::new(99);

    for _ in 0..200 {
        let s = normalize(&gen_expr(&mut rng, 3, true));
        let n = rng.pick(100);
        let e = sample(&s, -10.0, 10.0, n);

        assert!(e.points.len() <= n as usize + 1);
        assert!(e.points.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        assert!(
            e.points.windows(2).all(|w| w[0].x < w[1].x),
            "s={s:?} n={n}"
        );
        budget(t0, max);
    }
}
