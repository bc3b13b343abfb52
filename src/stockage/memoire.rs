// src/stockage/memoire.rs

use std::sync::{Mutex, MutexGuard};

use super::{
    horodatage_maintenant, EntreeHistorique, ErreurStockage, FonctionEnregistree, Stockage,
};

#[derive(Debug, Default)]
struct Contenu {
    historique: Vec<EntreeHistorique>,
    fonctions: Vec<FonctionEnregistree>,
    dernier_id: i64,
}

impl Contenu {
    fn prochain_id(&mut self) -> i64 {
        self.dernier_id += 1;
        self.dernier_id
    }
}

/// Stockage volatil (wasm, tests, repli si SQLite ne s’ouvre pas).
#[derive(Debug, Default)]
pub struct StockageMemoire {
    contenu: Mutex<Contenu>,
}

impl StockageMemoire {
    pub fn new() -> Self {
        Self::default()
    }

    fn verrou(&self) -> Result<MutexGuard<'_, Contenu>, ErreurStockage> {
        self.contenu
            .lock()
            .map_err(|_| ErreurStockage::Indisponible("verrou empoisonné".into()))
    }
}

impl Stockage for StockageMemoire {
    fn nom(&self) -> &'static str {
        "mémoire"
    }

    fn ajouter_historique(
        &self,
        formule: &str,
        resultat: &str,
    ) -> Result<EntreeHistorique, ErreurStockage> {
        let mut c = self.verrou()?;
        let entree = EntreeHistorique {
            id: c.prochain_id(),
            formule: formule.to_string(),
            resultat: resultat.to_string(),
            horodatage: horodatage_maintenant(),
        };
        c.historique.push(entree.clone());
        Ok(entree)
    }

    fn lister_historique(&self, limite: usize) -> Result<Vec<EntreeHistorique>, ErreurStockage> {
        let c = self.verrou()?;
        Ok(c.historique.iter().rev().take(limite).cloned().collect())
    }

    fn enregistrer_fonction(
        &self,
        nom: &str,
        chaine: &str,
    ) -> Result<FonctionEnregistree, ErreurStockage> {
        let mut c = self.verrou()?;
        let f = FonctionEnregistree {
            id: c.prochain_id(),
            nom: nom.to_string(),
            chaine: chaine.to_string(),
            horodatage: horodatage_maintenant(),
        };
        c.fonctions.push(f.clone());
        Ok(f)
    }

    fn lister_fonctions(&self) -> Result<Vec<FonctionEnregistree>, ErreurStockage> {
        let c = self.verrou()?;
        Ok(c.fonctions.iter().rev().cloned().collect())
    }
}
