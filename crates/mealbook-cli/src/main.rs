//! Mealbook CLI: terminal recipe browser with on-device favorites

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;

use mealbook::recipe::RecipeSnapshot;
use mealbook_app::app::{RecipeCard, RecipeSession};
use mealbook_app::data::{
    ensure_config_dir, FavoriteFilter, FavoriteSort, FileStore, KeyValueStore, MemoryStore,
    PersistMode, Settings, Toggle,
};
use mealbook_app::error::{AppError, Result};
use mealbook_app::providers::MealDbProvider;

#[derive(Parser)]
#[command(name = "mealbook", about = "Browse recipes and keep favorites", version)]
struct Cli {
    /// Directory holding favorites and settings (defaults to the config dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Recipe API base URL (overrides settings)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Keep favorites in memory only
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search recipes by name (no query lists the default set)
    Search { query: Vec<String> },
    /// List recipe categories
    Categories,
    /// List recipes in a category (defaults to the last one used)
    Category { name: Option<String> },
    /// Show a recipe in full
    Show { id: String },
    /// List favorites
    Favorites {
        /// Only names containing this text
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        area: Option<String>,
        /// added, name or category
        #[arg(long, default_value = "added")]
        sort: FavoriteSort,
    },
    /// Add or remove a favorite
    Toggle { id: String },
    /// Print whether a recipe is a favorite
    IsFavorite { id: String },
}

/// Resolve the log level from `RUST_LOG`, with `-v` forcing debug
fn resolve_log_level(verbose: bool) -> LevelFilter {
    if verbose {
        return LevelFilter::DEBUG;
    }

    match std::env::var("RUST_LOG") {
        Ok(val) => match val.to_lowercase().as_str() {
            "trace" => LevelFilter::TRACE,
            "debug" => LevelFilter::DEBUG,
            "info" => LevelFilter::INFO,
            "warn" | "warning" => LevelFilter::WARN,
            "error" => LevelFilter::ERROR,
            "off" => LevelFilter::OFF,
            _ => LevelFilter::WARN,
        },
        Err(_) => LevelFilter::WARN,
    }
}

fn init_logging(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(resolve_log_level(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => ensure_config_dir()?,
    };

    let mut settings = Settings::load_in(&data_dir).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not load settings, using defaults");
        Settings::default()
    });

    let api_url = cli.api_url.unwrap_or_else(|| settings.api_base_url.clone());
    let provider = MealDbProvider::with_base_url(api_url)?;

    let store: Arc<dyn KeyValueStore> = if cli.ephemeral {
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(FileStore::new(&data_dir))
    };
    let mut session = RecipeSession::open(Box::new(provider), store, PersistMode::Background);

    let result = match cli.command {
        Command::Search { query } => {
            let query = query.join(" ");
            session.home(&query, None).map(|cards| print_cards(&cards))
        }
        Command::Categories => session.categories().map(|categories| {
            for category in categories {
                println!("{}", category.name);
            }
        }),
        Command::Category { name } => {
            let name = name
                .or_else(|| settings.last_category.clone())
                .ok_or_else(|| AppError::Config("no category given and none used before".into()))?;
            let listing = session.home("", Some(&name));
            if listing.is_ok() && !cli.ephemeral {
                settings.set_last_category(&name);
                if let Err(e) = settings.save_in(&data_dir) {
                    tracing::warn!(error = %e, "could not save settings");
                }
            }
            listing.map(|cards| print_cards(&cards))
        }
        Command::Show { id } => session.recipe(&id).map(|card| print_recipe(&card)),
        Command::Favorites {
            search,
            category,
            area,
            sort,
        } => {
            let filter = FavoriteFilter {
                search,
                category,
                area,
            };
            let cards = session.favorites_query(&filter, sort);
            if cards.is_empty() && session.store().is_empty() {
                println!("No favorites yet.");
            } else {
                print_cards(&cards);
            }
            Ok(())
        }
        Command::Toggle { id } => session.toggle_by_id(&id).map(|outcome| {
            let name = session
                .store()
                .get(&id)
                .map(|r| r.name.clone())
                .unwrap_or_else(|| id.clone());
            match outcome {
                Toggle::Added => println!("♥ Added {name} to favorites"),
                Toggle::Removed => println!("Removed {id} from favorites"),
            }
        }),
        Command::IsFavorite { id } => {
            println!("{}", session.is_favorite(&id));
            Ok(())
        }
    };

    session.flush();
    let failures = session.store().write_failures();
    if failures > 0 {
        eprintln!("warning: {failures} favorites write(s) failed; changes may not be saved");
    }

    result
}

fn marker(card: &RecipeCard) -> &'static str {
    if card.favorited {
        "♥"
    } else {
        " "
    }
}

fn print_cards(cards: &[RecipeCard]) {
    if cards.is_empty() {
        println!("No recipes found.");
        return;
    }

    for card in cards {
        let recipe = &card.snapshot;
        let subtitle = recipe.subtitle();
        if subtitle.is_empty() {
            println!("{} {:>6}  {}", marker(card), recipe.id, recipe.name);
        } else {
            println!("{} {:>6}  {}  ({})", marker(card), recipe.id, recipe.name, subtitle);
        }
    }
}

fn print_recipe(card: &RecipeCard) {
    let recipe: &RecipeSnapshot = &card.snapshot;

    println!("{} {}", marker(card), recipe.name);
    let subtitle = recipe.subtitle();
    if !subtitle.is_empty() {
        println!("  {subtitle}");
    }
    if !recipe.tags.is_empty() {
        println!("  Tags: {}", recipe.tags.join(", "));
    }

    if !recipe.ingredients().is_empty() {
        println!("\nIngredients");
        for ingredient in recipe.ingredients() {
            println!("  - {ingredient}");
        }
    }

    if let Some(instructions) = &recipe.instructions {
        println!("\nInstructions\n{instructions}");
    }

    for link in [&recipe.youtube, &recipe.source].into_iter().flatten() {
        println!("\n{link}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_favorites_flags() {
        let cli = Cli::try_parse_from([
            "mealbook",
            "--ephemeral",
            "favorites",
            "--category",
            "Chicken",
            "--sort",
            "name",
        ])
        .unwrap();
        assert!(cli.ephemeral);
        match cli.command {
            Command::Favorites { category, sort, .. } => {
                assert_eq!(category.as_deref(), Some("Chicken"));
                assert_eq!(sort, FavoriteSort::Name);
            }
            _ => panic!("expected favorites command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_sort() {
        let result = Cli::try_parse_from(["mealbook", "favorites", "--sort", "rating"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_search_joins_words() {
        let cli = Cli::try_parse_from(["mealbook", "search", "chicken", "curry"]).unwrap();
        match cli.command {
            Command::Search { query } => assert_eq!(query.join(" "), "chicken curry"),
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["mealbook", "toggle", "52772", "--data-dir", "/tmp/mb"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/mb")));
    }

    #[test]
    fn test_verbose_forces_debug() {
        assert_eq!(resolve_log_level(true), LevelFilter::DEBUG);
    }

    #[test]
    fn test_marker() {
        let card = RecipeCard {
            snapshot: RecipeSnapshot::new("52772", "Teriyaki Chicken"),
            favorited: true,
        };
        assert_eq!(marker(&card), "♥");
        let card = RecipeCard {
            favorited: false,
            ..card
        };
        assert_eq!(marker(&card), " ");
    }
}
