//! Configuration (constantes par défaut + surcharge par variables d’environnement).
//!
//! - CALC_DB            : chemin de la base SQLite
//! - CALC_HISTORY_LIMIT : nombre d’entrées d’historique renvoyées par défaut
//! - CALC_POINTS_MAX    : plafond du nombre de pas d’un tracé (anti-abus)
//!
//! Une valeur illisible est ignorée (avec un avertissement), jamais fatale.

use std::path::PathBuf;

use tracing::warn;

/// Fenêtre de tracé par défaut.
pub const X_MIN_DEFAUT: f64 = -10.0;
pub const X_MAX_DEFAUT: f64 = 10.0;
pub const POINTS_DEFAUT: u32 = 200;

const CHEMIN_BASE_DEFAUT: &str = "calculator.db";
const LIMITE_HISTORIQUE_DEFAUT: usize = 50;

/// Garde-fou : un balayage plus fin n’apporte rien à l’écran.
const POINTS_MAX_DEFAUT: u32 = 10_000;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub chemin_base: PathBuf,
    pub limite_historique: usize,
    pub points_max: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chemin_base: PathBuf::from(CHEMIN_BASE_DEFAUT),
            limite_historique: LIMITE_HISTORIQUE_DEFAUT,
            points_max: POINTS_MAX_DEFAUT,
        }
    }
}

impl Config {
    /// Lit l’environnement du processus.
    pub fn depuis_env() -> Self {
        Self::depuis_lecteur(|cle| std::env::var(cle).ok())
    }

    /// Lecture injectable (tests sans toucher à l’environnement global).
    pub fn depuis_lecteur(lire: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(chemin) = lire("CALC_DB").filter(|c| !c.trim().is_empty()) {
            config.chemin_base = PathBuf::from(chemin);
        }
        if let Some(n) = lire_nombre(&lire, "CALC_HISTORY_LIMIT") {
            config.limite_historique = n;
        }
        if let Some(n) = lire_nombre(&lire, "CALC_POINTS_MAX") {
            config.points_max = n;
        }

        config
    }
}

fn lire_nombre<T: std::str::FromStr>(
    lire: &impl Fn(&str) -> Option<String>,
    cle: &str,
) -> Option<T> {
    let brut = lire(cle)?;
    match brut.trim().parse::<T>() {
        Ok(n) => Some(n),
        Err(_) => {
            warn!(cle, valeur = %brut, "valeur de configuration ignorée");
            None
        }
    }
}
