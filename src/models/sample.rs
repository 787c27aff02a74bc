// ============================================================================
// Données d'exemple
// ============================================================================
// Historique réel de 35 achats d'AUD, utilisé pour découvrir l'outil
// sans avoir à saisir de données.
// ============================================================================

use crate::models::{Ledger, Transaction};

/// (taux, montant) des achats d'exemple, dans l'ordre chronologique
const SAMPLE_EXCHANGES: [(f64, f64); 35] = [
    (4.6604, 2688.88),
    (4.6445, 2222.22),
    (4.6428, 2000.0),
    (4.6360, 2500.0),
    (4.6474, 2000.0),
    (4.5660, 2000.0),
    (4.5713, 2000.0),
    (4.5701, 6600.0),
    (4.5666, 4000.0),
    (4.5635, 6000.0),
    (4.5542, 6000.0),
    (4.5227, 4000.0),
    (4.5897, 2000.0),
    (4.6564, 2000.0),
    (4.5485, 4000.0),
    (4.5495, 2000.0),
    (4.5473, 2000.0),
    (4.5434, 2000.0),
    (4.5434, 2000.0),
    (4.5434, 8000.0),
    (4.5391, 4000.0),
    (4.5412, 4000.0),
    (4.5419, 1000.0),
    (4.4481, 2000.0),
    (4.4481, 4000.0),
    (4.4633, 2000.0),
    (4.4633, 4000.0),
    (4.4607, 2000.0),
    (4.4269, 2000.0),
    (4.4269, 6000.0),
    (4.4269, 2000.0),
    (4.3886, 2000.0),
    (4.3994, 4000.0),
    (4.3943, 4000.0),
    (4.3854, 2000.0),
];

/// Registre d'exemple (uniquement des achats, sans note)
pub fn sample_ledger() -> Ledger {
    // Les constantes sont toutes strictement positives : rien n'est filtré
    let transactions: Vec<Transaction> = SAMPLE_EXCHANGES
        .iter()
        .filter_map(|&(rate, amount)| Transaction::buy(rate, amount).ok())
        .collect();
    Ledger::from_transactions(transactions).unwrap_or_default()
}
