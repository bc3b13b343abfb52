//! Stockage : historique des calculs + fonctions enregistrées
//!
//! Collaborateur externe du noyau : le service l’appelle après un calcul
//! réussi (écriture seule), l’interface le relit pour l’affichage.
//!
//! Deux implémentations :
//! - StockageSqlite  : fichier SQLite (natif seulement)
//! - StockageMemoire : Vec protégé par Mutex (wasm, tests, repli)
//!
//! Ajout seulement : rien n’est modifié ni supprimé ici.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod memoire;
pub use memoire::StockageMemoire;

#[cfg(not(target_arch = "wasm32"))]
mod base_sqlite;
#[cfg(not(target_arch = "wasm32"))]
pub use base_sqlite::StockageSqlite;

#[derive(Debug, Error)]
pub enum ErreurStockage {
    #[cfg(not(target_arch = "wasm32"))]
    #[error("erreur SQLite : {0}")]
    Sqlite(#[from] sqlite::Error),

    #[error("stockage indisponible : {0}")]
    Indisponible(String),
}

/// Une ligne de `calculation_history`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntreeHistorique {
    pub id: i64,
    #[serde(rename = "formula")]
    pub formule: String,
    #[serde(rename = "result")]
    pub resultat: String,
    #[serde(rename = "timestamp")]
    pub horodatage: String,
}

/// Une ligne de `saved_functions`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FonctionEnregistree {
    pub id: i64,
    #[serde(rename = "function_name")]
    pub nom: String,
    #[serde(rename = "function_string")]
    pub chaine: String,
    #[serde(rename = "timestamp")]
    pub horodatage: String,
}

/// Interface de persistance consommée par le service.
///
/// Les listes sont triées du plus récent au plus ancien.
pub trait Stockage {
    /// Nom court pour l’état de santé ("sqlite", "mémoire").
    fn nom(&self) -> &'static str;

    fn ajouter_historique(
        &self,
        formule: &str,
        resultat: &str,
    ) -> Result<EntreeHistorique, ErreurStockage>;

    fn lister_historique(&self, limite: usize) -> Result<Vec<EntreeHistorique>, ErreurStockage>;

    fn enregistrer_fonction(
        &self,
        nom: &str,
        chaine: &str,
    ) -> Result<FonctionEnregistree, ErreurStockage>;

    fn lister_fonctions(&self) -> Result<Vec<FonctionEnregistree>, ErreurStockage>;
}

/// Même format que CURRENT_TIMESTAMP de SQLite (UTC, à la seconde).
pub(crate) fn horodatage_maintenant() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
