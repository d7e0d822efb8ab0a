//! Demo-data seeder for Tackle POS.
//!
//! Creates the database (running migrations), then populates a set of
//! demo fishing-tackle products through the Catalog facade so SKU
//! generation runs exactly as it does in production. Skips seeding when
//! products already exist.
//!
//! ## Usage
//! ```text
//! cargo run -p tackle-db --bin seed
//! cargo run -p tackle-db --bin seed -- --db ./tackle.db --count 20
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{error, info};

use tackle_core::ProductDraft;
use tackle_db::{Catalog, Database, DbConfig};

/// Demo catalog: (name, category, brand, price_cents, stock).
const DEMO_PRODUCTS: &[(&str, &str, &str, i64, i64)] = &[
    ("Anzuelo Owner #4", "Anzuelos", "Owner", 1050, 120),
    ("Anzuelo Owner #6", "Anzuelos", "Owner", 980, 80),
    ("Anzuelo Gamakatsu circle 2/0", "Anzuelos", "Gamakatsu", 1500, 40),
    ("Caña Shimano Catana 2.10m", "Cañas", "Shimano", 85000, 6),
    ("Caña Daiwa Crossfire 2.40m", "Cañas", "Daiwa", 92000, 4),
    ("Carrete Shimano Sedona 2500", "Carretes", "Shimano", 120000, 5),
    ("Carrete Daiwa Revros 3000", "Carretes", "Daiwa", 98000, 3),
    ("Línea PE multifilamento 0.20mm", "Líneas", "Sufix", 15500, 25),
    ("Línea monofilamento 0.35mm", "Líneas", "Trilene", 6800, 30),
    ("Señuelo Rapala CD-9", "Señuelos", "Rapala", 25500, 12),
    ("Señuelo paseante superficie", "Señuelos", "Strike Pro", 18900, 0),
    ("Pinza quitaanzuelos", "Accesorios", "", 7200, 15),
    ("Caja organizadora doble", "Accesorios", "Plano", 21000, 8),
    ("Mojarra viva (docena)", "Carnadas", "", 3500, 0),
    ("Chaleco de pesca talle L", "Indumentaria", "", 28000, 7),
    ("Red de arrastre plegable", "Equipamiento", "", 33500, 2),
];

struct Args {
    db_path: PathBuf,
    count: usize,
}

fn parse_args() -> Args {
    let mut args = Args {
        db_path: PathBuf::from("./tackle.db"),
        count: DEMO_PRODUCTS.len(),
    };

    let mut iter = std::env::args().skip(1);
    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "--db" => {
                if let Some(path) = iter.next() {
                    args.db_path = PathBuf::from(path);
                }
            }
            "--count" => {
                if let Some(n) = iter.next().and_then(|n| n.parse().ok()) {
                    args.count = n;
                }
            }
            other => {
                eprintln!("Unknown argument: {other}");
                eprintln!("Usage: seed [--db PATH] [--count N]");
            }
        }
    }

    args
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = parse_args();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Seeding failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    info!(path = %args.db_path.display(), "Opening database");
    let db = Database::new(DbConfig::new(&args.db_path)).await?;

    let (total, applied) = tackle_db::migrations::migration_status(db.pool()).await?;
    info!(total, applied, "Migration status");

    let catalog = Catalog::new(db.clone());

    let existing = db.products().count().await?;
    if existing > 0 {
        info!(existing, "Products already present, skipping seed");
        db.close().await;
        return Ok(());
    }

    let mut created = 0usize;
    for (i, (name, category, brand, price_cents, stock)) in
        DEMO_PRODUCTS.iter().cycle().take(args.count).enumerate()
    {
        // Cycling past the template list needs distinct names
        let name = if i < DEMO_PRODUCTS.len() {
            (*name).to_string()
        } else {
            format!("{name} ({})", i / DEMO_PRODUCTS.len() + 1)
        };

        let draft = ProductDraft {
            name,
            category: Some((*category).to_string()),
            brand: (!brand.is_empty()).then(|| (*brand).to_string()),
            price_cents: Some(*price_cents),
            stock: Some(*stock),
            ..ProductDraft::default()
        };

        let product = catalog.create_product(draft).await?;
        info!(sku = %product.sku, name = %product.name, "Seeded product");
        created += 1;
    }

    let stats = catalog.get_statistics().await;
    info!(
        created,
        total = stats.total_products,
        inventory_value = %stats.inventory_value(),
        "Seed complete"
    );

    db.close().await;
    Ok(())
}
