// ============================================================================
// Huiji - Ligne de commande
// ============================================================================
// Charge un fichier de changes, applique une commande, affiche ou réécrit
// le fichier.
//
// CONCEPTS RUST CLÉS :
// 1. clap derive : sous-commandes déclarées comme un enum
// 2. anyhow : erreurs avec contexte jusqu'à main()
// 3. Tout ou rien : le fichier n'est réécrit qu'après une mutation réussie
// ============================================================================

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, error, info};

use huiji::models::{sample_ledger, Direction, Transaction};
use huiji::report::{render_summary, render_table};
use huiji::storage::{self, DEFAULT_EXPORT_FILE, SAMPLE_EXPORT_FILE};
use huiji::App;

#[derive(Parser)]
#[command(name = "huiji")]
#[command(about = "Suivi des changes CNY ↔ AUD : coût moyen, extrema, écarts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Affiche le résumé statistique
    Summary {
        #[arg(default_value = DEFAULT_EXPORT_FILE)]
        file: PathBuf,
    },

    /// Affiche le tableau des transactions
    List {
        #[arg(default_value = DEFAULT_EXPORT_FILE)]
        file: PathBuf,
    },

    /// Ajoute une transaction (crée le fichier s'il n'existe pas)
    Add {
        #[arg(default_value = DEFAULT_EXPORT_FILE)]
        file: PathBuf,

        #[command(flatten)]
        entry: EntryArgs,
    },

    /// Remplace une transaction
    Edit {
        #[arg(default_value = DEFAULT_EXPORT_FILE)]
        file: PathBuf,

        /// Numéro de la ligne (base 1, comme dans `list`)
        #[arg(long)]
        index: usize,

        #[command(flatten)]
        entry: EntryArgs,
    },

    /// Supprime une transaction
    Delete {
        #[arg(default_value = DEFAULT_EXPORT_FILE)]
        file: PathBuf,

        /// Numéro de la ligne (base 1, comme dans `list`)
        #[arg(long)]
        index: usize,
    },

    /// Affiche les points et bornes des graphiques en JSON
    Chart {
        #[arg(default_value = DEFAULT_EXPORT_FILE)]
        file: PathBuf,
    },

    /// Écrit les données d'exemple dans un fichier
    Sample {
        #[arg(default_value = SAMPLE_EXPORT_FILE)]
        file: PathBuf,
    },
}

/// Champs d'une transaction saisie en ligne de commande
#[derive(Args)]
struct EntryArgs {
    /// Prix d'1 AUD en CNY
    #[arg(long)]
    rate: f64,

    /// Quantité d'AUD
    #[arg(long)]
    amount: f64,

    /// Vente d'AUD (aud_to_cny) au lieu d'un achat
    #[arg(long)]
    sell: bool,

    /// Annotation libre
    #[arg(long, default_value = "")]
    note: String,
}

impl EntryArgs {
    fn into_transaction(self) -> Result<Transaction> {
        let direction = if self.sell {
            Direction::Sell
        } else {
            Direction::Buy
        };
        Transaction::new(self.rate, self.amount, direction, self.note)
            .context("Transaction refusée")
    }
}

// ============================================================================
// Initialisation du logging
// ============================================================================
// Les logs vont dans un fichier à rotation quotidienne pour ne pas polluer
// la sortie standard (qui porte le rapport ou le JSON des graphiques).
// ============================================================================

/// Initialise le système de logging vers fichier
///
/// Les logs sont écrits dans :
/// - Linux : ~/.local/share/huiji/logs/huiji.log
/// - macOS : ~/Library/Application Support/huiji/logs/huiji.log
/// - sinon : ./logs/huiji.log
///
/// ```bash
/// RUST_LOG=huiji=trace huiji summary
/// ```
fn init_logging() -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = dirs::data_local_dir()
        .map(|dir| dir.join("huiji").join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"));

    std::fs::create_dir_all(&log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir.clone(), "huiji.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(
            // Par défaut : debug pour huiji, info pour les dépendances
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "huiji=debug,info".into()),
        )
        .try_init()
        .context("Échec de l'initialisation du subscriber")?;

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

fn main() -> Result<()> {
    init_logging().unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    let cli = Cli::parse();
    let result = run(cli.command);

    match &result {
        Ok(_) => info!("Command completed"),
        Err(e) => error!(error = ?e, "Command failed"),
    }
    result
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Summary { file } => {
            let app = load_app(&file)?;
            match app.summary() {
                Some(summary) => render_summary(summary)
                    .iter()
                    .for_each(|line| println!("{}", line)),
                None => println!("Aucune transaction dans {}", file.display()),
            }
        }

        Commands::List { file } => {
            let app = load_app(&file)?;
            render_table(app.ledger())
                .iter()
                .for_each(|line| println!("{}", line));
        }

        Commands::Add { file, entry } => {
            // Premier ajout : le fichier n'existe pas encore
            let mut app = if file.exists() {
                load_app(&file)?
            } else {
                debug!(path = %file.display(), "Starting a new ledger");
                App::new()
            };
            app.add_transaction(entry.into_transaction()?)?;
            save_app(&file, &app)?;
            println!("✓ Transaction #{} ajoutée", app.ledger().len());
        }

        Commands::Edit { file, index, entry } => {
            let mut app = load_app(&file)?;
            let position = to_position(index)?;
            app.edit_transaction(position, entry.into_transaction()?)?;
            save_app(&file, &app)?;
            println!("✓ Transaction #{} modifiée", index);
        }

        Commands::Delete { file, index } => {
            let mut app = load_app(&file)?;
            let position = to_position(index)?;
            app.delete_transaction(position)?;
            save_app(&file, &app)?;
            println!("✓ Transaction #{} supprimée", index);
        }

        Commands::Chart { file } => {
            let app = load_app(&file)?;
            let chart = serde_json::json!({
                "points": app.chart_points(),
                "ranges": app.chart_ranges(),
            });
            println!("{}", serde_json::to_string_pretty(&chart)?);
        }

        Commands::Sample { file } => {
            let ledger = sample_ledger();
            storage::export_file(&file, &ledger)?;
            println!(
                "✓ {} transactions d'exemple écrites dans {}",
                ledger.len(),
                file.display()
            );
        }
    }

    Ok(())
}

/// Charge le fichier dans une App (import tout ou rien)
fn load_app(path: &Path) -> Result<App> {
    let ledger = storage::import_file(path)?;
    Ok(App::with_ledger(ledger))
}

fn save_app(path: &Path, app: &App) -> Result<()> {
    storage::export_file(path, app.ledger())
}

/// Convertit un numéro de ligne (base 1) en position (base 0)
fn to_position(index: usize) -> Result<usize> {
    index
        .checked_sub(1)
        .context("Les numéros de ligne commencent à 1")
}
