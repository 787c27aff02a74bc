// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état de l'application : le registre et le résumé qui en dérive
//
// CONCEPTS RUST :
// 1. State Management : centraliser l'état dans une seule structure
// 2. Encapsulation : champs privés, mutations uniquement via les méthodes
// 3. Cohérence : chaque mutation recalcule le résumé (jamais périmé)
//
// PATTERN : "Application State"
// - Un seul écrivain (l'utilisateur, via les méthodes de App)
// - Le résumé est un cache dérivé du registre
// - Un import refusé laisse le registre intact
// ============================================================================

use tracing::{debug, info, warn};

use crate::error::LedgerError;
use crate::models::{
    chart_points, chart_ranges, sample_ledger, summarize, ChartPoint, ChartRanges, Ledger,
    Summary, Transaction,
};
use crate::storage;

/// État principal de l'application
#[derive(Debug, Default)]
pub struct App {
    /// Registre courant
    ledger: Ledger,

    /// Résumé du registre (None si vide)
    summary: Option<Summary>,

    /// Dernier message à afficher à l'utilisateur
    /// - Some(msg) : ex "35 transactions importées"
    /// - None : rien à signaler
    status_message: Option<String>,
}

impl App {
    /// Crée une App avec un registre vide
    pub fn new() -> Self {
        Self::default()
    }

    /// Crée une App avec un registre préchargé
    pub fn with_ledger(ledger: Ledger) -> Self {
        let mut app = Self::new();
        app.set_ledger(ledger);
        app
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Résumé à jour du registre
    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Ajoute une transaction à la fin du registre
    pub fn add_transaction(&mut self, transaction: Transaction) -> Result<(), LedgerError> {
        self.ledger.push(transaction)?;
        debug!(len = self.ledger.len(), "Transaction added");
        self.refresh();
        Ok(())
    }

    /// Remplace la transaction à la position `index` (base 0)
    pub fn edit_transaction(
        &mut self,
        index: usize,
        transaction: Transaction,
    ) -> Result<(), LedgerError> {
        self.ledger.replace(index, transaction)?;
        debug!(index, "Transaction edited");
        self.refresh();
        Ok(())
    }

    /// Supprime la transaction à la position `index` (base 0)
    pub fn delete_transaction(&mut self, index: usize) -> Result<Transaction, LedgerError> {
        let removed = self.ledger.remove(index)?;
        debug!(index, len = self.ledger.len(), "Transaction deleted");
        self.refresh();
        Ok(removed)
    }

    /// Remplace tout le registre par le contenu d'un fichier JSON
    ///
    /// CONCEPT : Tout ou rien
    /// - Le texte est entièrement validé avant de toucher au registre
    /// - En cas d'erreur, le registre courant reste inchangé
    pub fn import_json(&mut self, text: &str) -> Result<usize, LedgerError> {
        match storage::parse_ledger(text) {
            Ok(ledger) => {
                let count = ledger.len();
                self.set_ledger(ledger);
                self.status_message = Some(format!("{} transactions importées", count));
                info!(count, "Ledger replaced by import");
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, "Import rejected, ledger unchanged");
                self.status_message = Some(format!("Import refusé : {}", e));
                Err(e)
            }
        }
    }

    /// Sérialise le registre courant, tel quel
    pub fn export_json(&self) -> Result<String, LedgerError> {
        storage::to_json_string(&self.ledger)
    }

    /// Remplace le registre par les données d'exemple
    pub fn load_sample(&mut self) {
        self.set_ledger(sample_ledger());
        info!(count = self.ledger.len(), "Sample ledger loaded");
    }

    /// Vide le registre
    pub fn clear(&mut self) {
        self.set_ledger(Ledger::new());
    }

    // ========================================================================
    // Données dérivées
    // ========================================================================

    pub fn chart_points(&self) -> Vec<ChartPoint> {
        chart_points(&self.ledger, self.summary.as_ref())
    }

    pub fn chart_ranges(&self) -> Option<ChartRanges> {
        chart_ranges(&self.ledger, self.summary.as_ref())
    }

    fn set_ledger(&mut self, ledger: Ledger) {
        self.ledger = ledger;
        self.refresh();
    }

    /// Recalcule le résumé à partir du registre
    ///
    /// Le message précédent ne décrit plus le registre : il est effacé
    fn refresh(&mut self) {
        self.summary = summarize(&self.ledger);
        self.status_message = None;
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_creation() {
        let app = App::new();
        assert!(app.is_empty());
        assert!(app.summary().is_none());
        assert!(app.status_message().is_none());
    }

    #[test]
    fn test_summary_follows_mutations() {
        let mut app = App::new();
        app.add_transaction(Transaction::buy(4.0, 100.0).unwrap()).unwrap();
        app.add_transaction(Transaction::buy(5.0, 100.0).unwrap()).unwrap();
        assert!((app.summary().unwrap().average_rate - 4.5).abs() < 1e-9);

        app.edit_transaction(1, Transaction::buy(6.0, 100.0).unwrap()).unwrap();
        assert!((app.summary().unwrap().average_rate - 5.0).abs() < 1e-9);

        app.delete_transaction(0).unwrap();
        assert!((app.summary().unwrap().average_rate - 6.0).abs() < 1e-9);

        app.delete_transaction(0).unwrap();
        assert!(app.summary().is_none());
    }

    #[test]
    fn test_invalid_edit_keeps_ledger() {
        let mut app = App::new();
        app.add_transaction(Transaction::buy(4.0, 100.0).unwrap()).unwrap();

        assert!(app.edit_transaction(5, Transaction::buy(4.1, 1.0).unwrap()).is_err());
        assert!(app.delete_transaction(1).is_err());
        assert_eq!(app.ledger().len(), 1);
        assert_eq!(app.ledger().get(0).unwrap().rate, 4.0);
    }

    #[test]
    fn test_import_replaces_ledger() {
        let mut app = App::new();
        app.load_sample();

        let count = app.import_json(r#"[{"rate": 4.5, "amount": 10}]"#).unwrap();
        assert_eq!(count, 1);
        assert_eq!(app.ledger().len(), 1);
        assert_eq!(app.summary().unwrap().exchange_count, 1);
        assert!(app.status_message().unwrap().contains('1'));
    }

    #[test]
    fn test_mutation_clears_import_message() {
        let mut app = App::new();
        app.import_json(r#"[{"rate": 4.5, "amount": 10}]"#).unwrap();
        assert!(app.status_message().is_some());

        app.add_transaction(Transaction::buy(4.6, 20.0).unwrap()).unwrap();
        assert!(app.status_message().is_none());

        app.import_json(r#"[{"rate": 4.5, "amount": 10}]"#).unwrap();
        app.edit_transaction(0, Transaction::buy(4.7, 5.0).unwrap()).unwrap();
        assert!(app.status_message().is_none());

        app.import_json(r#"[{"rate": 4.5, "amount": 10}]"#).unwrap();
        app.delete_transaction(0).unwrap();
        assert!(app.status_message().is_none());
    }

    #[test]
    fn test_rejected_import_keeps_its_message() {
        let mut app = App::new();
        assert!(app.import_json("[{").is_err());
        assert!(app.status_message().unwrap().starts_with("Import refusé"));
    }

    #[test]
    fn test_rejected_import_leaves_ledger_unchanged() {
        let mut app = App::new();
        app.load_sample();
        let before = app.ledger().clone();

        assert!(app.import_json(r#"[{"rate": -1, "amount": 10}]"#).is_err());
        assert!(app.import_json("not json").is_err());
        assert!(app.import_json(r#"{"rate": 4.5}"#).is_err());

        assert_eq!(app.ledger(), &before);
        assert_eq!(app.summary().unwrap().exchange_count, 35);
    }

    #[test]
    fn test_export_then_import_round_trip() {
        let mut app = App::new();
        app.load_sample();
        app.add_transaction(Transaction::sell(4.8, 1000.0).unwrap()).unwrap();
        let exported = app.export_json().unwrap();

        let mut other = App::new();
        other.import_json(&exported).unwrap();
        assert_eq!(other.ledger(), app.ledger());
        assert_eq!(other.summary(), app.summary());
    }

    #[test]
    fn test_clear_and_chart_data() {
        let mut app = App::with_ledger(sample_ledger());
        assert_eq!(app.chart_points().len(), 35);
        assert!(app.chart_ranges().is_some());

        app.clear();
        assert!(app.chart_points().is_empty());
        assert!(app.chart_ranges().is_none());
    }
}
