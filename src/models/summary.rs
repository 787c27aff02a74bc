// ============================================================================
// Agrégateur : Summary
// ============================================================================
// Calcule les statistiques dérivées du registre :
// - moyenne pondérée cumulée du taux (coût de revient)
// - positions nettes AUD / CNY (achats moins ventes)
// - extrema des taux d'achat
// - écarts de coût ramenés à une base fixe de 2000 AUD
//
// CONCEPTS RUST :
// 1. Fonction pure : &Ledger en entrée, Option<Summary> en sortie
// 2. Option : registre vide => None, comparateur absent => None
// 3. Iterator + fold : extrema sans partial_cmp().unwrap()
//
// Le résumé est recalculé en entier à chaque mutation du registre.
// ============================================================================

use serde::Serialize;

use crate::models::{Direction, Ledger};

/// Quantité de référence (en AUD) pour comparer des coûts à taux différents
pub const BASELINE_AMOUNT: f64 = 2000.0;

/// Écarts de coût (en CNY) pour `BASELINE_AMOUNT` AUD
///
/// Chaque champ vaut None si le comparateur n'existe pas
/// (ex : pas d'achat précédent).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Differences {
    /// coût(dernier) - coût(précédent)
    pub last_previous: Option<f64>,
    /// coût(dernier) - coût(plus haut)
    pub last_max: Option<f64>,
    /// coût(dernier) - coût(plus bas)
    pub last_min: Option<f64>,
}

/// Statistiques dérivées d'un registre non vide
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Nombre total de transactions
    pub exchange_count: usize,

    /// AUD achetés (somme des Buy)
    pub total_bought: f64,
    /// AUD vendus (somme des Sell)
    pub total_sold: f64,
    /// Position nette en AUD (achetés - vendus)
    pub net_amount: f64,

    /// CNY dépensés sur les achats
    pub quote_spent: f64,
    /// CNY récupérés sur les ventes
    pub quote_received: f64,
    /// Coût net en CNY (dépensés - récupérés)
    pub net_quote_cost: f64,

    /// Taux moyen global (coût net / position nette), 0 si position <= 0
    pub average_rate: f64,

    /// Moyenne cumulée après chaque transaction (même longueur que le registre)
    pub average_rates: Vec<f64>,

    /// Variation de la moyenne due à la dernière transaction
    /// (None s'il n'y a qu'une transaction)
    pub average_rate_change: Option<f64>,

    /// Taux du dernier achat
    pub latest_rate: Option<f64>,
    /// Taux d'achat le plus haut
    pub highest_rate: Option<f64>,
    /// Taux d'achat le plus bas
    pub lowest_rate: Option<f64>,
    /// Taux de l'avant-dernier achat
    pub previous_rate: Option<f64>,
    /// Nombre d'achats
    pub buy_count: usize,

    /// Quantité de référence utilisée pour `differences`
    pub baseline_amount: f64,
    /// Écarts de coût pour la quantité de référence
    pub differences: Differences,
}

/// Calcule le résumé du registre avec la base de 2000 AUD
///
/// Retourne None si le registre est vide.
pub fn summarize(ledger: &Ledger) -> Option<Summary> {
    summarize_with_baseline(ledger, BASELINE_AMOUNT)
}

/// Calcule le résumé du registre avec une quantité de référence explicite
pub fn summarize_with_baseline(ledger: &Ledger, baseline: f64) -> Option<Summary> {
    if ledger.is_empty() {
        return None;
    }

    let average_rates = cumulative_average_rates(ledger);

    // Totaux par sens
    let mut total_bought = 0.0;
    let mut total_sold = 0.0;
    let mut quote_spent = 0.0;
    let mut quote_received = 0.0;
    for tx in ledger {
        match tx.direction {
            Direction::Buy => {
                total_bought += tx.amount;
                quote_spent += tx.quote_value();
            }
            Direction::Sell => {
                total_sold += tx.amount;
                quote_received += tx.quote_value();
            }
        }
    }
    let net_amount = total_bought - total_sold;
    let net_quote_cost = quote_spent - quote_received;
    let average_rate = if net_amount > 0.0 {
        net_quote_cost / net_amount
    } else {
        0.0
    };

    // Statistiques sur les achats uniquement
    let buy_rates: Vec<f64> = ledger
        .iter()
        .filter(|tx| tx.is_buy())
        .map(|tx| tx.rate)
        .collect();
    let latest_rate = buy_rates.last().copied();
    let previous_rate = buy_rates
        .len()
        .checked_sub(2)
        .map(|index| buy_rates[index]);
    let highest_rate = buy_rates.iter().copied().reduce(f64::max);
    let lowest_rate = buy_rates.iter().copied().reduce(f64::min);

    // CONCEPT RUST : slice pattern
    // - [.., a, b] : les deux derniers éléments, si au moins deux
    let average_rate_change = match average_rates.as_slice() {
        [.., before, last] => Some(last - before),
        _ => None,
    };

    let differences = baseline_differences(
        latest_rate,
        previous_rate,
        highest_rate,
        lowest_rate,
        baseline,
    );

    Some(Summary {
        exchange_count: ledger.len(),
        total_bought,
        total_sold,
        net_amount,
        quote_spent,
        quote_received,
        net_quote_cost,
        average_rate,
        average_rates,
        average_rate_change,
        latest_rate,
        highest_rate,
        lowest_rate,
        previous_rate,
        buy_count: buy_rates.len(),
        baseline_amount: baseline,
        differences,
    })
}

/// Moyenne pondérée cumulée après chaque transaction
///
/// Les sommes courantes sont accumulées de gauche à droite : l'entrée `i`
/// ne dépend que des transactions `0..=i`. Si la position nette n'est pas
/// strictement positive, on reprend la moyenne précédente (0 au départ).
pub fn cumulative_average_rates(ledger: &Ledger) -> Vec<f64> {
    let mut net_amount = 0.0;
    let mut net_quote = 0.0;
    let mut previous = 0.0;

    ledger
        .iter()
        .map(|tx| {
            let sign = tx.direction.sign();
            net_amount += sign * tx.amount;
            net_quote += sign * tx.quote_value();

            if net_amount > 0.0 {
                previous = net_quote / net_amount;
            }
            previous
        })
        .collect()
}

fn baseline_differences(
    latest: Option<f64>,
    previous: Option<f64>,
    highest: Option<f64>,
    lowest: Option<f64>,
    baseline: f64,
) -> Differences {
    let cost = |rate: Option<f64>| rate.map(|r| r * baseline);
    let latest_cost = cost(latest);
    let delta = |other: Option<f64>| Some(latest_cost? - cost(other)?);

    Differences {
        last_previous: delta(previous),
        last_max: delta(highest),
        last_min: delta(lowest),
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
