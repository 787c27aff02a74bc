// ============================================================================
// Structure : Ledger
// ============================================================================
// Le registre : liste ordonnée des changes, dans l'ordre de saisie
//
// CONCEPTS RUST :
// 1. Newtype pattern : Ledger enveloppe un Vec<Transaction>
// 2. Encapsulation : le Vec est privé, toutes les mutations passent par
//    des méthodes qui valident (rate > 0, amount > 0, index valide)
// 3. #[serde(transparent)] : sérialisé comme un simple tableau JSON
//
// L'ordre est significatif : il définit "dernier", "précédent" et la
// séquence des moyennes cumulées.
// ============================================================================

use serde::Serialize;

use crate::error::LedgerError;
use crate::models::Transaction;

/// Registre ordonné des transactions
///
/// Pas de Deserialize : un registre chargé depuis un fichier doit passer
/// par `storage::json::parse_ledger`, qui valide chaque enregistrement.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    /// Crée un registre vide
    pub fn new() -> Self {
        Self::default()
    }

    /// Crée un registre à partir d'une liste, en validant chaque élément
    pub fn from_transactions(transactions: Vec<Transaction>) -> Result<Self, LedgerError> {
        for tx in &transactions {
            tx.validate()?;
        }
        Ok(Self { transactions })
    }

    /// Ajoute une transaction à la fin du registre
    pub fn push(&mut self, transaction: Transaction) -> Result<(), LedgerError> {
        transaction.validate()?;
        self.transactions.push(transaction);
        Ok(())
    }

    /// Remplace la transaction à la position `index`
    ///
    /// Retourne l'ancienne transaction
    pub fn replace(
        &mut self,
        index: usize,
        transaction: Transaction,
    ) -> Result<Transaction, LedgerError> {
        transaction.validate()?;
        let len = self.transactions.len();
        let slot = self
            .transactions
            .get_mut(index)
            .ok_or(LedgerError::IndexOutOfRange { index, len })?;
        Ok(std::mem::replace(slot, transaction))
    }

    /// Supprime la transaction à la position `index`
    pub fn remove(&mut self, index: usize) -> Result<Transaction, LedgerError> {
        if index >= self.transactions.len() {
            return Err(LedgerError::IndexOutOfRange {
                index,
                len: self.transactions.len(),
            });
        }
        Ok(self.transactions.remove(index))
    }

    /// Vide le registre
    pub fn clear(&mut self) {
        self.transactions.clear();
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Transaction> {
        self.transactions.get(index)
    }

    /// Dernière transaction saisie
    pub fn last(&self) -> Option<&Transaction> {
        self.transactions.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.transactions.iter()
    }

    pub fn as_slice(&self) -> &[Transaction] {
        &self.transactions
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.transactions.iter()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Direction;

    fn ledger_of(rates: &[f64]) -> Ledger {
        let mut ledger = Ledger::new();
        for &rate in rates {
            ledger.push(Transaction::buy(rate, 1000.0).unwrap()).unwrap();
        }
        ledger
    }

    #[test]
    fn test_push_keeps_entry_order() {
        let ledger = ledger_of(&[4.66, 4.64, 4.50]);
        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.get(0).unwrap().rate, 4.66);
        assert_eq!(ledger.last().unwrap().rate, 4.50);
    }

    #[test]
    fn test_push_rejects_invalid_transaction() {
        let mut ledger = Ledger::new();
        let bad = Transaction {
            rate: 0.0,
            amount: 10.0,
            direction: Direction::Buy,
            note: String::new(),
        };
        assert!(ledger.push(bad).is_err());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_replace_in_place() {
        let mut ledger = ledger_of(&[4.66, 4.64, 4.50]);
        let old = ledger.replace(1, Transaction::sell(4.70, 500.0).unwrap()).unwrap();

        assert_eq!(old.rate, 4.64);
        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.get(1).unwrap().direction, Direction::Sell);
        assert_eq!(ledger.get(2).unwrap().rate, 4.50);
    }

    #[test]
    fn test_replace_and_remove_out_of_range() {
        let mut ledger = ledger_of(&[4.66]);
        assert!(matches!(
            ledger.replace(3, Transaction::buy(4.5, 1.0).unwrap()),
            Err(LedgerError::IndexOutOfRange { index: 3, len: 1 })
        ));
        assert!(ledger.remove(1).is_err());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_remove_by_position() {
        let mut ledger = ledger_of(&[4.66, 4.64, 4.50]);
        let removed = ledger.remove(0).unwrap();
        assert_eq!(removed.rate, 4.66);
        assert_eq!(ledger.get(0).unwrap().rate, 4.64);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let ledger = ledger_of(&[4.5]);
        let json = serde_json::to_value(&ledger).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["rate"], 4.5);
    }
}
