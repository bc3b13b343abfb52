// src/stockage/base_sqlite.rs
//
// Historique persistant (SQLite)
// ------------------------------
// Tables compatibles avec l’ancien serveur :
//   calculation_history (id, formula, result, timestamp)
//   saved_functions     (id, function_name, function_string, timestamp)
//
// L’horodatage est écrit par nous (même format que CURRENT_TIMESTAMP) pour que
// mémoire et SQLite se comportent pareil. Tri : timestamp DESC puis id DESC
// (plusieurs lignes peuvent partager la même seconde).

use std::path::Path;

use sqlite::{Connection, State, Statement};
use tracing::info;

use super::{
    horodatage_maintenant, EntreeHistorique, ErreurStockage, FonctionEnregistree, Stockage,
};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS calculation_history (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        formula TEXT NOT NULL,
        result TEXT NOT NULL,
        timestamp DATETIME DEFAULT CURRENT_TIMESTAMP
    );
    CREATE TABLE IF NOT EXISTS saved_functions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        function_name TEXT NOT NULL,
        function_string TEXT NOT NULL,
        timestamp DATETIME DEFAULT CURRENT_TIMESTAMP
    );
";

pub struct StockageSqlite {
    conn: Connection,
}

impl std::fmt::Debug for StockageSqlite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StockageSqlite").finish_non_exhaustive()
    }
}

impl StockageSqlite {
    /// Ouvre (ou crée) la base et les tables.
    pub fn ouvrir(chemin: impl AsRef<Path>) -> Result<Self, ErreurStockage> {
        let chemin = chemin.as_ref();
        let conn = Connection::open(chemin)?;
        conn.execute(SCHEMA)?;

        info!(chemin = %chemin.display(), "base SQLite ouverte");
        Ok(Self { conn })
    }

    /// Base volatile (tests).
    pub fn en_memoire() -> Result<Self, ErreurStockage> {
        Self::ouvrir(":memory:")
    }

    fn dernier_id(&self) -> Result<i64, ErreurStockage> {
        let mut stmt = self.conn.prepare("SELECT last_insert_rowid()")?;
        stmt.next()?;
        Ok(stmt.read::<i64, _>(0)?)
    }
}

fn lire_entree(stmt: &Statement<'_>) -> Result<EntreeHistorique, ErreurStockage> {
    Ok(EntreeHistorique {
        id: stmt.read::<i64, _>("id")?,
        formule: stmt.read::<String, _>("formula")?,
        resultat: stmt.read::<String, _>("result")?,
        horodatage: stmt.read::<String, _>("timestamp")?,
    })
}

fn lire_fonction(stmt: &Statement<'_>) -> Result<FonctionEnregistree, ErreurStockage> {
    Ok(FonctionEnregistree {
        id: stmt.read::<i64, _>("id")?,
        nom: stmt.read::<String, _>("function_name")?,
        chaine: stmt.read::<String, _>("function_string")?,
        horodatage: stmt.read::<String, _>("timestamp")?,
    })
}

impl Stockage for StockageSqlite {
    fn nom(&self) -> &'static str {
        "sqlite"
    }

    fn ajouter_historique(
        &self,
        formule: &str,
        resultat: &str,
    ) -> Result<EntreeHistorique, ErreurStockage> {
        let horodatage = horodatage_maintenant();

        let mut stmt = self.conn.prepare(
            "INSERT INTO calculation_history (formula, result, timestamp) VALUES (?, ?, ?)",
        )?;
        stmt.bind((1, formule))?;
        stmt.bind((2, resultat))?;
        stmt.bind((3, horodatage.as_str()))?;
        stmt.next()?;

        Ok(EntreeHistorique {
            id: self.dernier_id()?,
            formule: formule.to_string(),
            resultat: resultat.to_string(),
            horodatage,
        })
    }

    fn lister_historique(&self, limite: usize) -> Result<Vec<EntreeHistorique>, ErreurStockage> {
        let limite = i64::try_from(limite).unwrap_or(i64::MAX);

        let mut stmt = self.conn.prepare(
            "SELECT id, formula, result, timestamp FROM calculation_history \
             ORDER BY timestamp DESC, id DESC LIMIT ?",
        )?;
        stmt.bind((1, limite))?;

        let mut out = Vec::new();
        while let State::Row = stmt.next()? {
            out.push(lire_entree(&stmt)?);
        }
        Ok(out)
    }

    fn enregistrer_fonction(
        &self,
        nom: &str,
        chaine: &str,
    ) -> Result<FonctionEnregistree, ErreurStockage> {
        let horodatage = horodatage_maintenant();

        let mut stmt = self.conn.prepare(
            "INSERT INTO saved_functions (function_name, function_string, timestamp) \
             VALUES (?, ?, ?)",
        )?;
        stmt.bind((1, nom))?;
        stmt.bind((2, chaine))?;
        stmt.bind((3, horodatage.as_str()))?;
        stmt.next()?;

        Ok(FonctionEnregistree {
            id: self.dernier_id()?,
            nom: nom.to_string(),
            chaine: chaine.to_string(),
            horodatage,
        })
    }

    fn lister_fonctions(&self) -> Result<Vec<FonctionEnregistree>, ErreurStockage> {
        let mut stmt = self.conn.prepare(
            "SELECT id, function_name, function_string, timestamp FROM saved_functions \
             ORDER BY timestamp DESC, id DESC",
        )?;

        let mut out = Vec::new();
        while let State::Row = stmt.next()? {
            out.push(lire_fonction(&stmt)?);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::NamedTempFile;

    use super::StockageSqlite;
    use crate::stockage::Stockage;

    #[test]
    fn historique_aller_retour() {
        let s = StockageSqlite::en_memoire().unwrap();
        let a = s.ajouter_historique("2×π", "6.283185307179586").unwrap();
        let b = s.ajouter_historique("1+1", "2").unwrap();
        assert!(b.id > a.id);

        let h = s.lister_historique(10).unwrap();
        assert_eq!(h.len(), 2);
        assert_eq!(h[0], b);
        assert_eq!(h[1], a);

        assert_eq!(s.lister_historique(1).unwrap(), vec![b]);
    }

    #[test]
    fn fonctions_aller_retour() {
        let s = StockageSqlite::en_memoire().unwrap();
        s.enregistrer_fonction("parabole", "x^2-2x-3").unwrap();
        let f = s.enregistrer_fonction("inverse", "1÷x").unwrap();

        let liste = s.lister_fonctions().unwrap();
        assert_eq!(liste.len(), 2);
        assert_eq!(liste[0], f);
        assert_eq!(liste[1].chaine, "x^2-2x-3");
    }

    #[test]
    fn persiste_sur_fichier() {
        let fichier = NamedTempFile::new().unwrap();

        {
            let s = StockageSqlite::ouvrir(fichier.path()).unwrap();
            s.ajouter_historique("√(16)", "4").unwrap();
        }

        let s = StockageSqlite::ouvrir(fichier.path()).unwrap();
        let h = s.lister_historique(50).unwrap();
        assert_eq!(h.len(), 1);
        assert_eq!(h[0].formule, "√(16)");
        assert_eq!(h[0].resultat, "4");
    }
}
