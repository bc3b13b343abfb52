//! Noyau numérique (f64)
//!
//! Organisation interne :
//! - normalisation.rs : notation calculatrice (×, ÷, π, √, log, ln) -> grammaire du noyau
//! - jetons.rs        : tokenisation
//! - rpn.rs           : shunting-yard + construction Expr
//! - expr.rs          : AST + table des fonctions + évaluation
//! - eval.rs          : pipeline complet (texte normalisé -> Resultat)
//! - echantillon.rs   : balayage en x pour le tracé
//! - format.rs        : affichage des nombres
//! - erreur.rs        : erreurs typées

pub mod echantillon;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod normalisation;
pub mod rpn;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use echantillon::{sample, EnsembleEchantillons, Point};
pub use erreur::ErreurCalcul;
pub use eval::{decomposer, evaluate, parse, Demarche, Resultat, Valeur};
pub use expr::Portee;
pub use normalisation::normalize;
