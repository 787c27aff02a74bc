// ============================================================================
// Rapport texte
// ============================================================================
// Formatte le résumé et le registre en lignes de texte pour la console.
//
// CONCEPT RUST : String building
// - format! pour créer des strings formatées
// - match sur les Option pour les valeurs absentes
// ============================================================================

use crate::models::{Ledger, Summary};

/// Formatte un écart signé avec une flèche : "▲ +120.00" / "▼ -320.00"
fn signed(value: Option<f64>) -> String {
    match value {
        Some(v) => {
            let arrow = if v >= 0.0 { "▲" } else { "▼" };
            format!("{} {:+.2}", arrow, v)
        }
        None => "—".to_string(),
    }
}

fn rate(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.4}", v),
        None => "N/A".to_string(),
    }
}

/// Lignes du résumé statistique
pub fn render_summary(summary: &Summary) -> Vec<String> {
    let change = match summary.average_rate_change {
        Some(c) => {
            let arrow = if c >= 0.0 { "▲" } else { "▼" };
            format!("{} {:+.4}", arrow, c)
        }
        None => "—".to_string(),
    };

    vec![
        format!(
            "Changes          : {} ({} achats)",
            summary.exchange_count, summary.buy_count
        ),
        format!(
            "AUD              : {:.2} achetés, {:.2} vendus, {:.2} net",
            summary.total_bought, summary.total_sold, summary.net_amount
        ),
        format!(
            "CNY              : {:.2} dépensés, {:.2} récupérés, {:.2} net",
            summary.quote_spent, summary.quote_received, summary.net_quote_cost
        ),
        format!(
            "Taux moyen       : {:.4}  (variation {})",
            summary.average_rate, change
        ),
        format!(
            "Taux d'achat     : dernier {}, précédent {}, haut {}, bas {}",
            rate(summary.latest_rate),
            rate(summary.previous_rate),
            rate(summary.highest_rate),
            rate(summary.lowest_rate)
        ),
        format!(
            "Écart pour {:.0} AUD : vs précédent {}, vs haut {}, vs bas {}",
            summary.baseline_amount,
            signed(summary.differences.last_previous),
            signed(summary.differences.last_max),
            signed(summary.differences.last_min)
        ),
    ]
}

/// Lignes du tableau des transactions (numérotées à partir de 1)
pub fn render_table(ledger: &Ledger) -> Vec<String> {
    let mut lines = vec![format!(
        "{:>4} {:>8} {:>12} {:>12}  {:<8} {}",
        "#", "Taux", "AUD", "CNY", "Sens", "Note"
    )];

    lines.extend(
        ledger
            .iter()
            .enumerate()
            .map(|(i, tx)| format!("{:>4} {}", i + 1, tx.display())),
    );
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{summarize, Transaction};

    #[test]
    fn test_render_summary() {
        let mut ledger = Ledger::new();
        for rate in [4.66, 4.64, 4.50] {
            ledger.push(Transaction::buy(rate, 2000.0).unwrap()).unwrap();
        }
        let lines = render_summary(&summarize(&ledger).unwrap());

        assert_eq!(lines.len(), 6);
        assert!(lines[0].contains("3 (3 achats)"));
        assert!(lines[5].contains("▼ -280.00"));
        assert!(lines[5].contains("▼ -320.00"));
        assert!(lines[5].contains("▲ +0.00"));
    }

    #[test]
    fn test_render_summary_without_buys() {
        let mut ledger = Ledger::new();
        ledger.push(Transaction::sell(4.8, 100.0).unwrap()).unwrap();
        let lines = render_summary(&summarize(&ledger).unwrap());
        assert!(lines[4].contains("dernier N/A"));
    }

    #[test]
    fn test_render_table() {
        let mut ledger = Ledger::new();
        let tx = Transaction::new(4.5, 100.0, crate::models::Direction::Sell, "x").unwrap();
        ledger.push(tx).unwrap();
        let lines = render_table(&ledger);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].trim_start().starts_with('1'));
        assert!(lines[1].contains("AUD→CNY"));
    }
}
