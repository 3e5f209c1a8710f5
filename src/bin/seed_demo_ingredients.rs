// ABOUTME: Demo ingredient seeding utility for the Nutrifuse server
// ABOUTME: Inserts a small set of per-source ingredient records for local testing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Demo ingredient seeder.
//!
//! Values are per 100 g. Several ingredients carry records from more than one
//! source so the fuse endpoint has disagreements to reconcile.
//!
//! Usage:
//! ```bash
//! # Seed demo ingredients (uses DATABASE_URL from environment)
//! cargo run --bin seed-demo-ingredients
//!
//! # Override database URL
//! cargo run --bin seed-demo-ingredients -- --database-url sqlite:./data/nutrifuse.db
//!
//! # Force re-seed (replaces existing records)
//! cargo run --bin seed-demo-ingredients -- --force
//! ```

use anyhow::Result;
use clap::Parser;
use nutrifuse_server::constants::defaults::DEFAULT_DATABASE_URL;
use nutrifuse_server::database::Database;
use nutrifuse_server::models::IngredientRecord;
use std::collections::BTreeMap;
use std::env;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "seed-demo-ingredients",
    about = "Nutrifuse demo ingredient seeder",
    long_about = "Insert demo per-source ingredient records into the Nutrifuse database"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Replace existing ingredient records
    #[arg(long)]
    force: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

struct DemoRecord {
    text: &'static str,
    source_id: &'static str,
    confidence: f64,
    nutrients: &'static [(&'static str, f64)],
}

const DEMO_RECORDS: &[DemoRecord] = &[
    DemoRecord {
        text: "Chicken breast",
        source_id: "usda_fdc",
        confidence: 0.9,
        nutrients: &[
            ("calories", 165.0),
            ("protein", 31.0),
            ("fat", 3.6),
            ("saturated_fat", 1.0),
            ("sodium", 74.0),
            ("potassium", 256.0),
        ],
    },
    DemoRecord {
        text: "Chicken breast",
        source_id: "open_food_facts",
        confidence: 0.8,
        nutrients: &[("calories", 158.0), ("protein", 29.0), ("fat", 3.2), ("sodium", 70.0)],
    },
    DemoRecord {
        text: "Apple",
        source_id: "usda_fdc",
        confidence: 0.95,
        nutrients: &[
            ("calories", 52.0),
            ("carbohydrates", 13.8),
            ("fiber", 2.4),
            ("sugar", 10.4),
            ("potassium", 107.0),
        ],
    },
    DemoRecord {
        text: "Apple",
        source_id: "nutritionix",
        confidence: 0.7,
        nutrients: &[("calories", 54.0), ("carbohydrates", 14.3), ("sugar", 10.8)],
    },
    DemoRecord {
        text: "Brown rice, cooked",
        source_id: "usda_fdc",
        confidence: 0.9,
        nutrients: &[
            ("calories", 123.0),
            ("protein", 2.7),
            ("carbohydrates", 25.6),
            ("fat", 1.0),
            ("fiber", 1.6),
        ],
    },
    DemoRecord {
        text: "Salmon fillet",
        source_id: "usda_fdc",
        confidence: 0.85,
        nutrients: &[
            ("calories", 208.0),
            ("protein", 20.4),
            ("fat", 13.4),
            ("saturated_fat", 3.1),
            ("sodium", 59.0),
        ],
    },
    DemoRecord {
        text: "Salmon fillet",
        source_id: "user_submitted",
        confidence: 0.6,
        nutrients: &[("calories", 230.0), ("protein", 22.0), ("fat", 15.0)],
    },
    DemoRecord {
        text: "Broccoli",
        source_id: "llm_estimate",
        confidence: 0.5,
        nutrients: &[
            ("calories", 34.0),
            ("protein", 2.8),
            ("carbohydrates", 6.6),
            ("fiber", 2.6),
            ("potassium", 316.0),
        ],
    },
];

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    info!("=== Nutrifuse Demo Ingredient Seeder ===");

    let database_url = args
        .database_url
        .or_else(|| env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.into());

    info!("Connecting to database: {}", database_url);
    let database = Database::new(&database_url).await?;
    let ingredients = database.ingredients();

    let existing = ingredients.count_records().await?;
    if existing > 0 && !args.force {
        info!(
            "Ingredient records already present ({} rows). Use --force to re-seed.",
            existing
        );
        return Ok(());
    }

    if args.force {
        sqlx::query("DELETE FROM ingredient_records")
            .execute(database.pool())
            .await?;
        info!("Removed {} existing ingredient records", existing);
    }

    info!("Seeding {} demo ingredient records...", DEMO_RECORDS.len());
    for demo in DEMO_RECORDS {
        let nutrients: BTreeMap<String, f64> = demo
            .nutrients
            .iter()
            .map(|(name, value)| ((*name).to_owned(), *value))
            .collect();
        let record = IngredientRecord::new(demo.text, demo.source_id, nutrients, demo.confidence);
        ingredients.insert_record(&record).await?;
    }

    info!("Demo ingredients seeded");
    Ok(())
}
