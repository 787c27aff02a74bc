// ============================================================================
// Module : storage
// ============================================================================
// Lecture et écriture du registre sur disque (fichiers JSON).
// Pas d'autre persistance : le registre vit en mémoire entre deux exports.
// ============================================================================

pub mod json; // Import/export au format tableau JSON

// Re-export des fonctions principales
pub use json::{
    export_file, import_file, parse_ledger, to_json_string, DEFAULT_EXPORT_FILE,
    SAMPLE_EXPORT_FILE,
};
