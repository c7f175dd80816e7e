use pokedex_client::client::PokeApiClient;
use pokedex_client::config::Config;
use pokedex_client::evolution::{EvolutionNode, build_evolution_tree};
use pokedex_client::normalize::{TypeMatchups, normalize_types};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let client = match PokeApiClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let query = std::env::args().nth(1).unwrap_or_else(|| {
        let id: u32 = rand::random_range(1..=1025);
        tracing::info!("No argument given, picking random pokemon ID: {}", id);
        id.to_string()
    });

    let Some(pokemon) = client.fetch_pokemon(&query).await else {
        tracing::error!("No data available for '{}'", query);
        std::process::exit(1);
    };

    println!("#{} {}", pokemon.id, pokemon.name);
    let types = normalize_types(pokemon.types.iter().map(|t| t.r#type.name.as_str()));
    println!("types: {}", types.join(", "));
    for stat in &pokemon.stats {
        println!("  {}: {}", stat.stat.name, stat.base_stat);
    }

    if let Some(first_type) = types.first() {
        if let Some(relations) = client.fetch_type_relations(first_type).await {
            let matchups = TypeMatchups::from_relations(&relations.damage_relations);
            println!("weak to: {}", matchups.weaknesses.join(", "));
            println!("resists: {}", matchups.resistances.join(", "));
            println!("immune to: {}", matchups.immunities.join(", "));
        }
    }

    if let Some(species) = client.fetch_species(pokemon.id).await {
        if let Some(tree) = build_evolution_tree(&client, &species).await {
            println!("evolution line:");
            print_tree(&tree, 1);
        }
    }
}

fn print_tree(node: &EvolutionNode, depth: usize) {
    let label = if node.details.is_empty() {
        node.name.clone()
    } else {
        format!("{} ({})", node.name, node.details)
    };
    println!("{}{}", "  ".repeat(depth), label);
    for child in &node.next {
        print_tree(child, depth + 1);
    }
}
