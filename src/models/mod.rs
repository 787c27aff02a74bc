// ============================================================================
// Module : models
// ============================================================================
// Ce module contient les structures de données et les calculs purs :
// transactions, registre, résumé statistique, données de graphique
// ============================================================================

pub mod chart;       // Points et bornes d'axes pour les graphiques
pub mod ledger;      // Registre ordonné des transactions
pub mod sample;      // Registre d'exemple
pub mod summary;     // Agrégateur : moyennes cumulées, extrema, écarts
pub mod transaction; // Transaction et sens du change

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use huiji::models::transaction::Transaction;
// On peut faire : use huiji::models::Transaction;
pub use chart::{chart_points, chart_ranges, ChartPoint, ChartRanges};
pub use ledger::Ledger;
pub use sample::sample_ledger;
pub use summary::{
    cumulative_average_rates, summarize, summarize_with_baseline, Differences, Summary,
    BASELINE_AMOUNT,
};
pub use transaction::{Direction, Transaction};
