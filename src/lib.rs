// ============================================================================
// Huiji - Library
// ============================================================================
// Registre de changes CNY ↔ AUD : statistiques (coût moyen, extrema,
// écarts sur une base de 2000 AUD), données de graphique, import/export JSON
// ============================================================================

pub mod app;     // État de l'application (registre + résumé)
pub mod error;   // Erreurs typées de validation
pub mod models;  // Structures de données et calculs
pub mod report;  // Rapport texte pour la console
pub mod storage; // Import/export JSON

pub use app::App;
pub use error::LedgerError;
