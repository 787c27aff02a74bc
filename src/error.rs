// ============================================================================
// Erreurs du registre
// ============================================================================
// Erreurs typées levées à la frontière import/édition.
// L'agrégateur lui-même ne peut pas échouer : tout est validé avant.
// ============================================================================

/// Erreurs de validation et de mutation du registre
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Le fichier n'est pas du JSON valide
    #[error("fichier JSON illisible : {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// La valeur racine n'est pas un tableau
    #[error("le fichier doit contenir un tableau de transactions")]
    NotAnArray,

    /// Un élément du tableau n'a pas la forme attendue
    #[error("enregistrement #{index} invalide : {reason}")]
    InvalidRecord {
        /// Position de l'élément (base 0)
        index: usize,
        /// Description du problème
        reason: String,
    },

    /// Taux nul, négatif ou non fini
    #[error("taux invalide : {0} (doit être strictement positif)")]
    InvalidRate(f64),

    /// Montant nul, négatif ou non fini
    #[error("montant invalide : {0} (doit être strictement positif)")]
    InvalidAmount(f64),

    /// Édition ou suppression hors du registre
    #[error("index {index} hors limites (registre de {len} transactions)")]
    IndexOutOfRange {
        /// Index demandé (base 0)
        index: usize,
        /// Taille du registre
        len: usize,
    },
}
