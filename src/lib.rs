//! Calculatrice graphique : bibliothèque
//!
//! - noyau    : normalisation, évaluation, échantillonnage (pur, sans état)
//! - stockage : historique + fonctions enregistrées (SQLite ou mémoire)
//! - service  : opérations logiques (calcul, tracé, historique, santé)
//! - routeur  : contrat JSON de l’ancien serveur, indépendant du transport
//! - config   : défauts + surcharge par l’environnement

pub mod config;
pub mod noyau;
pub mod routeur;
pub mod service;
pub mod stockage;
