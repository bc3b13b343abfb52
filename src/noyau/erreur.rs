// src/noyau/erreur.rs

use thiserror::Error;

/// Échec d’évaluation. Le message nomme la condition fautive quand c’est possible.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ErreurCalcul {
    /// Parenthèses, opérande manquant, caractère inattendu, entrée vide...
    #[error("syntaxe invalide : {0}")]
    Syntaxe(String),

    /// Variable absente de la portée ou fonction inconnue.
    #[error("identifiant inconnu : {0}")]
    IdentifiantInconnu(String),

    /// Division par zéro, √ d’un négatif, log d’un non positif...
    #[error("domaine invalide : {0}")]
    Domaine(String),

    /// NaN ou ±∞ (dépassement, etc.)
    #[error("résultat non fini")]
    NonFini,
}

impl ErreurCalcul {
    pub(crate) fn syntaxe(msg: impl Into<String>) -> Self {
        Self::Syntaxe(msg.into())
    }

    pub(crate) fn domaine(msg: impl Into<String>) -> Self {
        Self::Domaine(msg.into())
    }
}
