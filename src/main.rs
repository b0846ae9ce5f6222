//! `molscope` command-line front end.

#![allow(clippy::print_stdout)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use glam::DVec3;
use molscope::cache::{CacheStore, MemoryStore, SqliteStore, StructureCache};
use molscope::catalog::{COMPARISON_PRESETS, FEATURED_PROTEINS};
use molscope::chat::{ChatClient, ChatMessage};
use molscope::compare::ComparisonTable;
use molscope::export::{
    comparison_to_csv, default_comparison_filename, format_metadata_for_export,
    CsvDelimiter, CsvOptions,
};
use molscope::fetch::{FetchState, ProteinDataLoader};
use molscope::input::{KeyAction, ShortcutCategory};
use molscope::measurement::{create_measurement, AtomSelection};
use molscope::metadata::ProteinMetadata;
use molscope::options::Options;
use molscope::repository::RcsbClient;

#[derive(Parser)]
#[command(name = "molscope")]
#[command(about = "Explore protein structures from the RCSB PDB", long_about = None)]
struct Cli {
    /// Options TOML file (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download a structure file (cache first)
    Fetch {
        /// Structure identifier, e.g. 1CRN
        id: String,
        /// Where to write the structure file (defaults to {ID}.pdb)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the metadata record of a structure
    Info {
        /// Structure identifier
        id: String,
    },
    /// Compare two structures side by side
    Compare {
        /// First structure identifier
        #[arg(required_unless_present = "preset")]
        a: Option<String>,
        /// Second structure identifier
        #[arg(required_unless_present = "preset")]
        b: Option<String>,
        /// Use a built-in comparison preset (1-based, see `featured`)
        #[arg(long, conflicts_with_all = ["a", "b"])]
        preset: Option<usize>,
        /// Write the comparison as CSV ("-" for the default filename)
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,
        /// CSV delimiter: comma, semicolon or tab
        #[arg(long, default_value = "comma")]
        delimiter: String,
        /// Omit the CSV header row
        #[arg(long)]
        no_headers: bool,
    },
    /// Inspect or clear the structure cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
    /// Ask the biochemistry assistant a question
    Chat {
        /// The question
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// Distance between two points in Ångströms
    Measure {
        /// x1 y1 z1 x2 y2 z2
        #[arg(num_args = 6, allow_negative_numbers = true)]
        coords: Vec<f64>,
    },
    /// List featured structures and comparison presets
    Featured,
    /// List keyboard shortcuts
    Shortcuts,
    /// Options file utilities
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Entry counts and payload size
    Stats,
    /// Remove every entry
    Clear,
    /// Remove one structure's entries
    Remove {
        /// Structure identifier
        id: String,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the options JSON schema
    Schema,
    /// Write the default options to the config path
    Init,
    /// Print the config path in use
    Path,
}

const FETCH_TIMEOUT: Duration = Duration::from_secs(120);

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("org", "molscope", "molscope")
}

fn config_path(cli: &Cli) -> Option<PathBuf> {
    cli.config.clone().or_else(|| {
        project_dirs().map(|dirs| dirs.config_dir().join("molscope.toml"))
    })
}

fn load_options(path: Option<&Path>) -> anyhow::Result<Options> {
    match path {
        Some(path) if path.exists() => Options::load(path)
            .with_context(|| format!("loading options from {}", path.display())),
        _ => Ok(Options::default()),
    }
}

fn open_store(options: &Options) -> Box<dyn CacheStore> {
    let path = options
        .cache
        .database_path
        .clone()
        .or_else(SqliteStore::default_path);
    let Some(path) = path else {
        log::warn!("no cache directory available; using in-memory cache");
        return Box::new(MemoryStore::new());
    };
    match SqliteStore::open(&path) {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!(
                "could not open cache at {}: {e}; using in-memory cache",
                path.display()
            );
            Box::new(MemoryStore::new())
        }
    }
}

fn open_cache(options: &Options) -> Arc<StructureCache> {
    Arc::new(StructureCache::new(open_store(options), options.cache.clone()))
}

fn load(
    loader: &mut ProteinDataLoader,
    id: &str,
) -> anyhow::Result<(String, ProteinMetadata)> {
    loader.request(Some(id))?;
    if !loader.wait(FETCH_TIMEOUT) {
        bail!("timed out fetching {id}");
    }
    match loader.state().clone() {
        FetchState {
            data: Some(data),
            metadata: Some(metadata),
            ..
        } => Ok((data, metadata)),
        FetchState {
            error: Some(error), ..
        } => bail!(error),
        _ => bail!("failed to load {id}"),
    }
}

fn print_record(metadata: &ProteinMetadata) {
    for (field, value) in format_metadata_for_export(metadata) {
        println!("{field:<24}{value}");
    }
}

fn print_table(table: &ComparisonTable) {
    println!("{:<24}{:<32}{:<32}", "Property", table.id_a, table.id_b);
    for row in &table.rows {
        let marker = if row.is_match() { "=" } else { "*" };
        println!(
            "{:<24}{:<32}{:<32}{marker}",
            row.property, row.value_a, row.value_b
        );
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = config_path(cli);
    let options = load_options(config.as_deref())?;
    let loader = || {
        ProteinDataLoader::new(
            open_cache(&options),
            Arc::new(RcsbClient::new(options.repository.clone())),
        )
    };

    match &cli.command {
        Commands::Fetch { id, output } => {
            let (data, metadata) = load(&mut loader(), id)?;
            let path = output.clone().unwrap_or_else(|| {
                PathBuf::from(format!("{}.pdb", metadata.structure_id))
            });
            std::fs::write(&path, &data)
                .with_context(|| format!("writing {}", path.display()))?;
            println!(
                "{} ({}) -> {}",
                metadata.structure_id,
                metadata.title,
                path.display()
            );
        }
        Commands::Info { id } => {
            let (_, metadata) = load(&mut loader(), id)?;
            print_record(&metadata);
        }
        Commands::Compare {
            a,
            b,
            preset,
            csv,
            delimiter,
            no_headers,
        } => {
            let (id_a, id_b) = match (preset, a, b) {
                (Some(n), _, _) => {
                    let Some(p) = n.checked_sub(1).and_then(|i| COMPARISON_PRESETS.get(i))
                    else {
                        bail!("no preset {n}; see `molscope featured`");
                    };
                    (p.a.id.to_owned(), p.b.id.to_owned())
                }
                (None, Some(a), Some(b)) => (a.clone(), b.clone()),
                _ => bail!("two structure identifiers are required"),
            };
            let mut loader = loader();
            let (_, meta_a) = load(&mut loader, &id_a)?;
            let (_, meta_b) = load(&mut loader, &id_b)?;
            print_table(&ComparisonTable::new(&meta_a, &meta_b));

            if let Some(csv) = csv {
                let Some(delimiter) = CsvDelimiter::parse(delimiter) else {
                    bail!("unknown delimiter {delimiter:?}");
                };
                let options = CsvOptions {
                    include_headers: !no_headers,
                    delimiter,
                };
                let path = if csv.as_os_str() == "-" {
                    PathBuf::from(default_comparison_filename(&meta_a, &meta_b))
                } else {
                    csv.clone()
                };
                let text = comparison_to_csv(&meta_a, &meta_b, options)?;
                std::fs::write(&path, text)
                    .with_context(|| format!("writing {}", path.display()))?;
                println!("wrote {}", path.display());
            }
        }
        Commands::Cache { action } => {
            let cache = open_cache(&options);
            match action {
                CacheAction::Stats => {
                    let stats = cache.stats();
                    println!("structure files: {}", stats.file_count);
                    println!("metadata records: {}", stats.metadata_count);
                    println!("total bytes: {}", stats.total_bytes);
                }
                CacheAction::Clear => {
                    cache.clear_all();
                    println!("cache cleared");
                }
                CacheAction::Remove { id } => {
                    cache.delete_structure_file(id);
                    cache.delete_metadata(id);
                    println!("removed {}", id.to_uppercase());
                }
            }
        }
        Commands::Chat { message } => {
            let client = ChatClient::from_env(options.chat.clone())?;
            let reply = client.send(&[ChatMessage::user(message.join(" "))])?;
            println!("{reply}");
        }
        Commands::Measure { coords } => {
            let &[x1, y1, z1, x2, y2, z2] = coords.as_slice() else {
                bail!("expected six coordinates");
            };
            let point = |serial, position| {
                AtomSelection::new(serial, "C", "A", 1, "UNK", position)
            };
            let m = create_measurement(
                point(1, DVec3::new(x1, y1, z1)),
                point(2, DVec3::new(x2, y2, z2)),
            );
            println!("{}", m.label_text());
        }
        Commands::Featured => {
            for p in &FEATURED_PROTEINS {
                println!("{:<6}{:<28}{:<14}{}", p.id, p.name, p.category, p.description);
            }
            println!();
            for (i, preset) in COMPARISON_PRESETS.iter().enumerate() {
                println!(
                    "{}. {} ({} vs {}): {}",
                    i + 1,
                    preset.label,
                    preset.a.id,
                    preset.b.id,
                    preset.description
                );
            }
        }
        Commands::Shortcuts => {
            for (category, title) in [
                (ShortcutCategory::Navigation, "Navigation"),
                (ShortcutCategory::Visualization, "Visualization"),
                (ShortcutCategory::General, "General"),
            ] {
                println!("{title}");
                for action in KeyAction::in_category(category) {
                    let key = options.keybindings.key_for(action).unwrap_or("-");
                    println!("  {key:<8}{}", action.description());
                }
            }
        }
        Commands::Config { action } => match action {
            ConfigAction::Schema => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&Options::json_schema())?
                );
            }
            ConfigAction::Init => {
                let Some(path) = config else {
                    bail!("no config directory available; pass --config");
                };
                options.save(&path)?;
                println!("wrote {}", path.display());
            }
            ConfigAction::Path => match config {
                Some(path) => println!("{}", path.display()),
                None => println!("(none)"),
            },
        },
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}
