// src/main.rs
//
// Calculatrice graphique : point d’entrée NATIF + WEB (WASM)
// ----------------------------------------------------------
// - NATIF : traces (RUST_LOG), config par l’environnement, historique SQLite
//           (repli en mémoire si la base ne s’ouvre pas), eframe::run_native
// - WEB   : historique en mémoire, eframe::WebRunner sur <canvas>
//
// Côté WEB (WASM) : index.html doit contenir un canvas :
//   <canvas id="the_canvas_id"></canvas>

#![cfg_attr(target_arch = "wasm32", allow(unused_imports))]

use eframe::egui;

mod app;

use app::AppCalc;
use calculatrice_graphique::config::Config;
use calculatrice_graphique::service::Service;
use calculatrice_graphique::stockage::{Stockage, StockageMemoire};

/// Titre unique (natif + web).
const TITRE_APP: &str = "Calculatrice graphique";

/* ------------------------ Entrée NATIF (PC) ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
fn ouvrir_stockage(config: &Config) -> Box<dyn Stockage> {
    use calculatrice_graphique::stockage::StockageSqlite;

    match StockageSqlite::ouvrir(&config.chemin_base) {
        Ok(s) => Box::new(s),
        Err(e) => {
            tracing::warn!(
                erreur = %e,
                chemin = %config.chemin_base.display(),
                "base indisponible, historique en mémoire"
            );
            Box::new(StockageMemoire::new())
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::depuis_env();
    let service = Service::new(ouvrir_stockage(&config), config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITRE_APP)
            .with_inner_size([760.0, 780.0])
            .with_min_inner_size([480.0, 620.0]),
        ..Default::default()
    };

    eframe::run_native(
        TITRE_APP,
        options,
        Box::new(move |_cc| Ok(Box::new(AppCalc::new(service)))),
    )
}

/* ------------------------ Entrée WEB (WASM) ------------------------ */

#[cfg(target_arch = "wasm32")]
fn main() {
    // En wasm32, le démarrage réel passe par `start()` (wasm_bindgen).
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{AppCalc, Config, Service, StockageMemoire, TITRE_APP};

    use wasm_bindgen::JsCast;
    use web_sys::{window, HtmlCanvasElement};

    /// ID du canvas attendu dans index.html.
    const CANVAS_ID: &str = "the_canvas_id";

    /// Point d’entrée automatique au chargement de la page.
    #[wasm_bindgen::prelude::wasm_bindgen(start)]
    pub async fn start() -> Result<(), wasm_bindgen::JsValue> {
        let w = window().ok_or_else(|| js_err("window() indisponible"))?;
        let d = w
            .document()
            .ok_or_else(|| js_err("document() indisponible"))?;
        d.set_title(TITRE_APP);

        let canvas: HtmlCanvasElement = d
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| js_err("canvas introuvable (id incorrect dans index.html)"))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| js_err("l’élément trouvé n’est pas un <canvas>"))?;

        // Pas de fichier côté navigateur : historique de session seulement.
        let service = Service::new(Box::new(StockageMemoire::new()), Config::default());

        eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(move |_cc| Ok(Box::new(AppCalc::new(service)))),
            )
            .await
    }

    fn js_err(msg: &str) -> wasm_bindgen::JsValue {
        wasm_bindgen::JsValue::from_str(msg)
    }
}
