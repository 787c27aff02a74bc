// ============================================================================
// Stockage : fichiers JSON
// ============================================================================
// Import et export du registre au format :
//   [{"rate": 4.66, "amount": 2000, "direction": "cny_to_aud", "note": ""}, ...]
//
// CONCEPTS RUST :
// 1. serde_json::Value : parser d'abord en JSON générique pour valider
//    la forme (tableau, objets) avant la désérialisation typée
// 2. Tout ou rien : le moindre enregistrement invalide rejette l'import
// 3. anyhow::Context : messages d'erreur pour les accès fichiers
// ============================================================================

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::error::LedgerError;
use crate::models::{Ledger, Transaction};

/// Nom de fichier par défaut pour l'export
pub const DEFAULT_EXPORT_FILE: &str = "huiji_exchange_data.json";

/// Nom de fichier par défaut pour les données d'exemple
pub const SAMPLE_EXPORT_FILE: &str = "huiji_sample_exchange_data.json";

/// Parse et valide le contenu d'un fichier d'import
///
/// Règles :
/// - la racine doit être un tableau
/// - chaque élément doit être un objet avec `rate` et `amount` numériques > 0
/// - `direction` absent => achat, `note` absent => ""
///
/// Retourne la première erreur rencontrée ; aucun import partiel.
pub fn parse_ledger(text: &str) -> Result<Ledger, LedgerError> {
    let root: Value = serde_json::from_str(text)?;

    let items = match root {
        Value::Array(items) => items,
        _ => return Err(LedgerError::NotAnArray),
    };

    let mut transactions = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        transactions.push(parse_record(index, item)?);
    }

    debug!(records = transactions.len(), "Parsed ledger records");
    Ledger::from_transactions(transactions)
}

/// Valide un élément du tableau et le convertit en Transaction
fn parse_record(index: usize, item: Value) -> Result<Transaction, LedgerError> {
    let invalid = |reason: String| LedgerError::InvalidRecord { index, reason };

    let object = item
        .as_object()
        .ok_or_else(|| invalid("l'élément n'est pas un objet".to_string()))?;

    for field in ["rate", "amount"] {
        match object.get(field) {
            Some(Value::Number(_)) => {}
            Some(_) => return Err(invalid(format!("`{field}` doit être un nombre"))),
            None => return Err(invalid(format!("champ `{field}` manquant"))),
        }
    }

    let transaction: Transaction =
        serde_json::from_value(item).map_err(|e| invalid(e.to_string()))?;

    transaction.validate().map_err(|e| invalid(e.to_string()))?;
    Ok(transaction)
}

/// Sérialise le registre (JSON indenté de 2 espaces)
pub fn to_json_string(ledger: &Ledger) -> Result<String, LedgerError> {
    Ok(serde_json::to_string_pretty(ledger)?)
}

/// Charge un registre depuis un fichier
#[instrument(skip_all, fields(path = %path.display()))]
pub fn import_file(path: &Path) -> Result<Ledger> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;

    let ledger = match parse_ledger(&text) {
        Ok(ledger) => ledger,
        Err(e) => {
            warn!(error = %e, "Import rejected");
            return Err(e).with_context(|| format!("Import de {} refusé", path.display()));
        }
    };

    info!(records = ledger.len(), "Ledger imported");
    Ok(ledger)
}

/// Écrit le registre dans un fichier (écrase le fichier existant)
#[instrument(skip_all, fields(path = %path.display(), records = ledger.len()))]
pub fn export_file(path: &Path, ledger: &Ledger) -> Result<()> {
    let json = to_json_string(ledger).context("Échec de la sérialisation du registre")?;

    fs::write(path, json).with_context(|| format!("Impossible d'écrire {}", path.display()))?;

    info!("Ledger exported");
    Ok(())
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{sample_ledger, Direction};

    #[test]
    fn test_parse_minimal_records() {
        let text = r#"[{"rate": 4.66, "amount": 2000}, {"rate": 4.5, "amount": 1000.5}]"#;
        let ledger = parse_ledger(text).unwrap();
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.get(0).unwrap().direction, Direction::Buy);
        assert_eq!(ledger.get(1).unwrap().amount, 1000.5);
    }

    #[test]
    fn test_parse_full_records() {
        let ledger = parse_ledger(
            r#"[{"rate": 4.9, "amount": 500, "direction": "aud_to_cny", "note": "voyage"}]"#,
        )
        .unwrap();
        let tx = ledger.get(0).unwrap();
        assert_eq!(tx.direction, Direction::Sell);
        assert_eq!(tx.note, "voyage");
    }

    #[test]
    fn test_rejects_invalid_json() {
        assert!(matches!(parse_ledger("[{"), Err(LedgerError::InvalidJson(_))));
    }

    #[test]
    fn test_rejects_non_array() {
        assert!(matches!(
            parse_ledger(r#"{"rate": 4.5, "amount": 10}"#),
            Err(LedgerError::NotAnArray)
        ));
    }

    #[test]
    fn test_rejects_negative_rate() {
        assert!(matches!(
            parse_ledger(r#"[{"rate": -1, "amount": 10}]"#),
            Err(LedgerError::InvalidRecord { index: 0, .. })
        ));
    }

    #[test]
    fn test_rejects_whole_file_on_one_bad_record() {
        let result = parse_ledger(concat!(
            r#"[{"rate": 4.5, "amount": 10}, {"rate": 4.5, "amount": 0}, "#,
            r#"{"rate": 4.4, "amount": 5}]"#,
        ));
        assert!(matches!(result, Err(LedgerError::InvalidRecord { index: 1, .. })));
    }

    #[test]
    fn test_rejects_malformed_records() {
        for text in [
            r#"[42]"#,
            r#"[{"amount": 10}]"#,
            r#"[{"rate": "4.5", "amount": 10}]"#,
            r#"[{"rate": 4.5, "amount": null}]"#,
            r#"[{"rate": 4.5, "amount": 10, "direction": "sideways"}]"#,
            r#"[{"rate": 4.5, "amount": 10, "note": 3}]"#,
        ] {
            assert!(
                matches!(parse_ledger(text), Err(LedgerError::InvalidRecord { .. })),
                "should reject {text}"
            );
        }
    }

    #[test]
    fn test_empty_array_is_valid() {
        assert!(parse_ledger("[]").unwrap().is_empty());
    }

    #[test]
    fn test_export_writes_every_field() {
        let ledger = parse_ledger(r#"[{"rate": 4.5, "amount": 10}]"#).unwrap();
        let json = to_json_string(&ledger).unwrap();
        assert!(json.contains("\"direction\": \"cny_to_aud\""));
        assert!(json.contains("\"note\": \"\""));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_EXPORT_FILE);

        let mut ledger = sample_ledger();
        ledger
            .push(Transaction::new(4.91, 300.0, Direction::Sell, "retour").unwrap())
            .unwrap();

        export_file(&path, &ledger).unwrap();
        let imported = import_file(&path).unwrap();

        assert_eq!(imported, ledger);
    }

    #[test]
    fn test_full_precision_round_trip() {
        let mut ledger = Ledger::new();
        ledger
            .push(Transaction::buy(1.3148210638902849, 1824.3521453552403).unwrap())
            .unwrap();
        ledger
            .push(Transaction::sell(9.999999999999998, 0.30000000000000004).unwrap())
            .unwrap();

        let imported = parse_ledger(&to_json_string(&ledger).unwrap()).unwrap();

        assert_eq!(imported, ledger);
        assert_eq!(imported.get(0).unwrap().rate.to_bits(), 1.3148210638902849f64.to_bits());
        assert_eq!(imported.get(0).unwrap().amount.to_bits(), 1824.3521453552403f64.to_bits());
    }

    #[test]
    fn test_import_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(import_file(&dir.path().join("absent.json")).is_err());
    }
}
