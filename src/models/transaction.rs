// ============================================================================
// Structure : Transaction
// ============================================================================
// Représente un change de devises enregistré (CNY ↔ AUD)
//
// CONCEPTS RUST :
// 1. #[derive(...)] : Serialize/Deserialize pour l'import/export JSON
// 2. #[serde(default)] : champs optionnels dans le fichier (direction, note)
// 3. Constructeur validant : Transaction::new retourne un Result
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Sens d'un change
///
/// Les noms sérialisés sont ceux du format de fichier :
/// - "cny_to_aud" : on dépense des CNY pour acheter des AUD (Buy)
/// - "aud_to_cny" : on vend des AUD pour récupérer des CNY (Sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Achat de la devise de base (AUD) contre la devise de cotation (CNY)
    #[serde(rename = "cny_to_aud")]
    Buy,

    /// Vente de la devise de base (AUD) contre la devise de cotation (CNY)
    #[serde(rename = "aud_to_cny")]
    Sell,
}

impl Direction {
    /// Label court pour l'affichage
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Buy => "CNY→AUD",
            Direction::Sell => "AUD→CNY",
        }
    }

    /// Signe appliqué aux positions nettes (+1 pour Buy, -1 pour Sell)
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Buy => 1.0,
            Direction::Sell => -1.0,
        }
    }

    pub fn is_buy(&self) -> bool {
        matches!(self, Direction::Buy)
    }
}

impl Default for Direction {
    /// Les anciens fichiers n'ont pas de direction : ce sont des achats
    fn default() -> Self {
        Direction::Buy
    }
}

/// Un change enregistré dans le registre
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Prix d'1 AUD en CNY
    pub rate: f64,

    /// Quantité d'AUD échangée
    pub amount: f64,

    /// Sens du change (Buy si absent du fichier)
    #[serde(default)]
    pub direction: Direction,

    /// Annotation libre, sans effet sur les calculs
    #[serde(default)]
    pub note: String,
}

impl Transaction {
    /// Crée une transaction après validation du taux et du montant
    ///
    /// CONCEPT RUST : Constructeur faillible
    /// - Retourne Result<Self, LedgerError> plutôt que Self
    /// - Impossible de construire une transaction avec rate <= 0 par ce chemin
    pub fn new(
        rate: f64,
        amount: f64,
        direction: Direction,
        note: impl Into<String>,
    ) -> Result<Self, LedgerError> {
        let transaction = Self {
            rate,
            amount,
            direction,
            note: note.into(),
        };
        transaction.validate()?;
        Ok(transaction)
    }

    /// Raccourci pour un achat sans note
    pub fn buy(rate: f64, amount: f64) -> Result<Self, LedgerError> {
        Self::new(rate, amount, Direction::Buy, "")
    }

    /// Raccourci pour une vente sans note
    pub fn sell(rate: f64, amount: f64) -> Result<Self, LedgerError> {
        Self::new(rate, amount, Direction::Sell, "")
    }

    /// Vérifie les invariants : rate > 0 et amount > 0 (valeurs finies)
    ///
    /// NaN échoue aussi : `NaN > 0.0` est faux
    pub fn validate(&self) -> Result<(), LedgerError> {
        if !(self.rate.is_finite() && self.rate > 0.0) {
            return Err(LedgerError::InvalidRate(self.rate));
        }
        if !(self.amount.is_finite() && self.amount > 0.0) {
            return Err(LedgerError::InvalidAmount(self.amount));
        }
        Ok(())
    }

    /// Montant en CNY correspondant (rate × amount)
    pub fn quote_value(&self) -> f64 {
        self.rate * self.amount
    }

    pub fn is_buy(&self) -> bool {
        self.direction.is_buy()
    }

    /// Formatte la transaction pour l'affichage dans un tableau
    ///
    /// Format : "4.6604   2688.88   12531.26  CNY→AUD  note"
    pub fn display(&self) -> String {
        format!(
            "{:>8.4} {:>12.2} {:>12.2}  {:<8} {}",
            self.rate,
            self.amount,
            self.quote_value(),
            self.direction.label(),
            self.note
        )
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_creation() {
        let tx = Transaction::new(4.6604, 2688.88, Direction::Buy, "first").unwrap();
        assert_eq!(tx.rate, 4.6604);
        assert_eq!(tx.amount, 2688.88);
        assert!(tx.is_buy());
        assert_eq!(tx.note, "first");
    }

    #[test]
    fn test_rejects_non_positive_values() {
        assert!(matches!(
            Transaction::buy(-1.0, 10.0),
            Err(LedgerError::InvalidRate(_))
        ));
        assert!(matches!(
            Transaction::buy(4.5, 0.0),
            Err(LedgerError::InvalidAmount(_))
        ));
        assert!(Transaction::buy(f64::NAN, 10.0).is_err());
        assert!(Transaction::sell(4.5, f64::INFINITY).is_err());
    }

    #[test]
    fn test_direction_defaults_to_buy() {
        let tx: Transaction = serde_json::from_str(r#"{"rate": 4.5, "amount": 100}"#).unwrap();
        assert_eq!(tx.direction, Direction::Buy);
        assert_eq!(tx.note, "");
    }

    #[test]
    fn test_direction_wire_names() {
        let tx: Transaction =
            serde_json::from_str(r#"{"rate": 4.5, "amount": 100, "direction": "aud_to_cny"}"#)
                .unwrap();
        assert_eq!(tx.direction, Direction::Sell);

        let json = serde_json::to_string(&Transaction::buy(4.5, 100.0).unwrap()).unwrap();
        assert!(json.contains("\"direction\":\"cny_to_aud\""));
    }

    #[test]
    fn test_quote_value() {
        let tx = Transaction::sell(4.5, 200.0).unwrap();
        assert!((tx.quote_value() - 900.0).abs() < 1e-9);
        assert_eq!(tx.direction.sign(), -1.0);
    }
}
