// ============================================================================
// Données de graphique
// ============================================================================
// Prépare les séries à tracer (un point par transaction) et les bornes
// des axes Y. Aucun rendu ici : ces structures sont sérialisées en JSON
// et consommées par n'importe quel outil de tracé.
//
// CONCEPTS RUST :
// 1. Iterator chaining : transformer les transactions en points (x, y)
// 2. Tuples : (min, max) pour les bornes d'un axe
// ============================================================================

use serde::Serialize;

use crate::models::{Direction, Ledger, Summary};

/// Marge ajoutée de chaque côté d'un axe, en fraction de l'étendue
const RANGE_BUFFER: f64 = 0.1;

/// Un point du graphique (une transaction)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    /// Numéro du change (base 1)
    pub exchange: usize,
    pub rate: f64,
    pub amount: f64,
    pub direction: Direction,
    /// Moyenne cumulée après ce change (0 si indisponible)
    pub average_rate: f64,
    /// Coût en CNY de la quantité de référence à ce taux
    pub cost_for_baseline: f64,
}

/// Bornes des trois axes Y
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartRanges {
    /// Taux et moyennes cumulées
    pub rate: (f64, f64),
    /// Montants en AUD
    pub amount: (f64, f64),
    /// Coûts de la quantité de référence
    pub cost: (f64, f64),
}

/// Construit un point par transaction, dans l'ordre du registre
pub fn chart_points(ledger: &Ledger, summary: Option<&Summary>) -> Vec<ChartPoint> {
    let baseline = summary
        .map(|s| s.baseline_amount)
        .unwrap_or(crate::models::BASELINE_AMOUNT);

    ledger
        .iter()
        .enumerate()
        .map(|(index, tx)| ChartPoint {
            exchange: index + 1,
            rate: tx.rate,
            amount: tx.amount,
            direction: tx.direction,
            average_rate: summary
                .and_then(|s| s.average_rates.get(index).copied())
                .unwrap_or(0.0),
            cost_for_baseline: tx.rate * baseline,
        })
        .collect()
}

/// Calcule les bornes des axes, None si le registre est vide
pub fn chart_ranges(ledger: &Ledger, summary: Option<&Summary>) -> Option<ChartRanges> {
    if ledger.is_empty() {
        return None;
    }

    let baseline = summary
        .map(|s| s.baseline_amount)
        .unwrap_or(crate::models::BASELINE_AMOUNT);
    let averages = summary.map(|s| s.average_rates.as_slice()).unwrap_or(&[]);

    let rates = ledger.iter().map(|tx| tx.rate).chain(averages.iter().copied());
    let amounts = ledger.iter().map(|tx| tx.amount);
    let costs = ledger.iter().map(|tx| tx.rate * baseline);

    Some(ChartRanges {
        rate: padded_range(rates)?,
        amount: padded_range(amounts)?,
        cost: padded_range(costs)?,
    })
}

/// (min - 10%, max + 10%) de l'étendue, sans descendre sous 0
fn padded_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let (min, max) = values.fold(None, |acc: Option<(f64, f64)>, v| match acc {
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        None => Some((v, v)),
    })?;

    let buffer = (max - min) * RANGE_BUFFER;
    Some(((min - buffer).max(0.0), max + buffer))
}

// ============================================================================
// Tests unitaires
// ============================================================================
