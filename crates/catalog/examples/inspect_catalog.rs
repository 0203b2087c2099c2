//! Example: Load a catalog snapshot and print a summary
//!
//! Run with: cargo run --package catalog --example inspect_catalog -- data/anime.json

use catalog::CatalogIndex;
use std::path::PathBuf;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/anime.json"));

    println!("Loading catalog from {}...\n", path.display());

    let start = Instant::now();
    let index = CatalogIndex::load_from_file(&path)?;
    let elapsed = start.elapsed();

    let (anime, genres, studios) = index.counts();
    let unranked = index.iter().filter(|a| a.rank.is_none()).count();
    let without_genres = index.iter().filter(|a| a.genres.is_empty()).count();

    println!("=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Anime: {}", anime);
    println!("Genres: {}", genres);
    println!("Studios: {}", studios);
    println!("Unranked: {}", unranked);
    println!("Without genres: {}", without_genres);

    Ok(())
}
