mod data;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use dotenv::dotenv;
use sqlx::postgres::PgPoolOptions;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "seeder")]
#[command(about = "Database seeding utility for the contacts backend")]
struct Args {
    /// How many contacts to generate
    #[arg(long, default_value = "50")]
    count: usize,

    /// RNG seed for reproducible data sets
    #[arg(long)]
    seed: Option<u64>,

    /// Overrides DATABASE_URL from the environment
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let args = Args::parse();

    println!("{}", "=".repeat(72).cyan());
    println!("{}", "Contacts Backend Database Seeder".bold().cyan());
    println!("{}", "=".repeat(72).cyan());
    println!();

    let database_url = args
        .database_url
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .context("DATABASE_URL must be set (env or --database-url)")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("../migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let mut rng: rand::rngs::StdRng = if let Some(seed) = args.seed {
        println!("{} Using seed: {}", "i".blue(), seed);
        rand::SeedableRng::seed_from_u64(seed)
    } else {
        rand::SeedableRng::from_entropy()
    };

    let start_time = Instant::now();
    let contacts = data::seed_contacts(&pool, &mut rng, args.count).await?;

    let favorites = contacts.iter().filter(|c| c.is_favorite).count();
    println!(
        "{} Inserted {} contacts ({} favorites) in {:.2}s",
        "✓".green(),
        contacts.len(),
        favorites,
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}
