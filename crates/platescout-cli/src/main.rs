use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use platescout_core::{
    Catalog, Config, DietTag, FavoritesStore, FileStorage, Intolerance, RecipeDetail,
    RecipeSummary, SearchQuery,
};

#[derive(Parser)]
#[command(name = "platescout")]
#[command(version, about = "Terminal recipe discovery with a local favorites list", long_about = None)]
struct Cli {
    /// Spoonacular API key (falls back to the config file)
    #[arg(long, env = "SPOONACULAR_API_KEY", global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Search the recipe catalog
    Search {
        /// Free-text query (empty is a valid, if unusual, search)
        #[arg(default_value = "")]
        query: String,

        /// Diet filter, e.g. vegan or gluten-free
        #[arg(long, value_parser = parse_diet)]
        diet: Option<DietTag>,

        /// Intolerance filter, repeatable: --intolerance gluten --intolerance dairy
        #[arg(long = "intolerance", value_parser = parse_intolerance)]
        intolerances: Vec<Intolerance>,

        /// Max number of results
        #[arg(long, short = 'n')]
        number: Option<u32>,
    },
    /// Suggest a random sample of recipes
    Random {
        /// Sample size
        #[arg(long, short = 'n')]
        number: Option<u32>,
    },
    /// Show full detail for one recipe
    Show {
        /// Catalog recipe id
        id: u64,
    },
    /// Manage the local favorites list
    Fav {
        #[command(subcommand)]
        command: FavCommands,
    },
}

#[derive(clap::Subcommand)]
enum FavCommands {
    /// List saved recipes
    List,
    /// Save a recipe, or un-save it if already present
    /// (fetches the recipe from the catalog when saving)
    Toggle {
        /// Catalog recipe id
        id: u64,
    },
    /// Drop a recipe from the list (no-op if absent)
    Remove {
        /// Catalog recipe id
        id: u64,
    },
}

fn parse_diet(s: &str) -> Result<DietTag, String> {
    s.parse()
}

fn parse_intolerance(s: &str) -> Result<Intolerance, String> {
    s.parse()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging - helps when things go sideways
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "platescout=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let api_key = cli.api_key.or_else(|| config.catalog.api_key.clone());
    let catalog = Catalog::with_base_url(api_key, config.catalog.api_url.clone());
    let store = FavoritesStore::new(FileStorage::default_dir()?);

    match cli.command {
        Commands::Search {
            query,
            diet,
            intolerances,
            number,
        } => {
            let mut search = SearchQuery::new(query);
            search.diet = diet;
            for intolerance in intolerances {
                search = search.intolerance(intolerance);
            }
            search.number = number.unwrap_or(config.search.result_count);

            tracing::debug!(query = %search.query, "running catalog search");
            let results = catalog
                .search(&search)
                .await
                .context("Recipe search failed - the catalog may be unavailable, try again")?;
            print_summaries(&results, &store);
        }
        Commands::Random { number } => {
            let number = number.unwrap_or(config.search.random_count);
            let results = catalog
                .random(number)
                .await
                .context("Could not fetch suggestions - the catalog may be unavailable, try again")?;
            print_summaries(&results, &store);
        }
        Commands::Show { id } => {
            let detail = catalog
                .details(id)
                .await
                .context("Could not fetch the recipe - the catalog may be unavailable, try again")?;
            print_detail(&detail, &store);
        }
        Commands::Fav { command } => match command {
            FavCommands::List => {
                let favorites = store.favorites();
                if favorites.is_empty() {
                    println!("No favorites saved yet.");
                } else {
                    for f in &favorites {
                        println!(
                            "{:>8}  {}  (saved {})",
                            f.id,
                            f.title,
                            f.saved_at.format("%Y-%m-%d")
                        );
                    }
                }
            }
            FavCommands::Toggle { id } => {
                // Reuse the stored entry when un-saving so no network trip
                // is needed to drop a favorite
                let summary = match store.favorites().iter().find(|f| f.id == id) {
                    Some(existing) => existing.summary(),
                    None => catalog
                        .details(id)
                        .await
                        .context("Could not fetch the recipe - the catalog may be unavailable, try again")?
                        .to_summary(),
                };

                let outcome = store.toggle(&summary);
                if outcome.added {
                    println!(
                        "Saved \"{}\" ({} favorites)",
                        summary.title,
                        outcome.favorites.len()
                    );
                } else {
                    println!(
                        "Removed \"{}\" ({} favorites)",
                        summary.title,
                        outcome.favorites.len()
                    );
                }
            }
            FavCommands::Remove { id } => {
                let favorites = store.remove(id);
                println!("Done ({} favorites)", favorites.len());
            }
        },
    }

    Ok(())
}

fn print_summaries(recipes: &[RecipeSummary], store: &FavoritesStore<FileStorage>) {
    if recipes.is_empty() {
        println!("No recipes found.");
        return;
    }

    for r in recipes {
        let heart = if store.is_favorite(r.id) { "♥" } else { " " };
        let time = r
            .ready_in_minutes
            .map(|m| format!("{} min", m))
            .unwrap_or_else(|| "-".to_string());
        let servings = r
            .servings
            .map(|s| format!("serves {}", s))
            .unwrap_or_else(|| "-".to_string());
        println!("{} {:>8}  {}  [{}, {}]", heart, r.id, r.title, time, servings);
    }
}

fn print_detail(detail: &RecipeDetail, store: &FavoritesStore<FileStorage>) {
    let heart = if store.is_favorite(detail.id) {
        " ♥"
    } else {
        ""
    };
    println!("{} (#{}){}", detail.title, detail.id, heart);

    let mut meta = Vec::new();
    if let Some(minutes) = detail.ready_in_minutes {
        meta.push(format!("{} min", minutes));
    }
    if let Some(servings) = detail.servings {
        meta.push(format!("serves {}", servings));
    }
    if !meta.is_empty() {
        println!("{}", meta.join(" | "));
    }

    if let Some(ref summary) = detail.summary {
        println!("\n{}", summary);
    }

    if !detail.ingredients.is_empty() {
        println!("\nIngredients:");
        for line in &detail.ingredients {
            println!("  - {}", line);
        }
    }

    if let Some(ref instructions) = detail.instructions {
        println!("\nInstructions:\n{}", instructions);
    }

    if !detail.nutrients.is_empty() {
        println!("\nNutrition:");
        for n in &detail.nutrients {
            println!("  {}: {} {}", n.name, n.amount, n.unit);
        }
    }

    if let Some(ref url) = detail.source_url {
        println!("\nSource: {}", url);
    }
}
