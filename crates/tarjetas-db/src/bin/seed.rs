//! # Seed Data Generator
//!
//! Populates the database with sample topics and cards for development,
//! and optionally walks a user through the full CRUD cycle.
//!
//! ## Usage
//! ```bash
//! # Seed ./tarjetas.db (or $TARJETAS_DB_PATH)
//! cargo run -p tarjetas-db --bin seed
//!
//! # Specify database path
//! cargo run -p tarjetas-db --bin seed -- --db ./data/tarjetas.db
//!
//! # Also run the user create/read/update/delete walkthrough
//! cargo run -p tarjetas-db --bin seed -- --demo
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::env;

use tarjetas_core::{NewTarjeta, NewTema, NewUsuario, UsuarioUpdate};
use tarjetas_db::{Database, DbConfig, Repository};
use tracing_subscriber::EnvFilter;

/// (question, answer, [option a, option b, option c])
type Card = (&'static str, &'static str, [&'static str; 3]);

/// Sample topics with their cards
const CATALOG: &[(&str, &[Card])] = &[
    (
        "Capitales",
        &[
            ("¿Cuál es la capital de Francia?", "París", ["Berlín", "Madrid", "París"]),
            ("¿Cuál es la capital de España?", "Madrid", ["Barcelona", "Madrid", "Valencia"]),
            ("¿Cuál es la capital de Italia?", "Roma", ["Milán", "Roma", "Nápoles"]),
            ("¿Cuál es la capital de Alemania?", "Berlín", ["Múnich", "Berlín", "Hamburgo"]),
        ],
    ),
    (
        "Ciencias",
        &[
            ("¿Cuál es el símbolo químico del oro?", "Au", ["Ag", "Au", "Fe"]),
            ("¿Qué planeta es el más cercano al Sol?", "Mercurio", ["Venus", "Marte", "Mercurio"]),
            ("¿Cuántos huesos tiene el cuerpo humano adulto?", "206", ["206", "198", "212"]),
        ],
    ),
    (
        "Historia",
        &[
            ("¿En qué año cayó Constantinopla?", "1453", ["1453", "1492", "1517"]),
            ("¿Quién escribió Don Quijote?", "Cervantes", ["Lope de Vega", "Cervantes", "Quevedo"]),
        ],
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut config = DbConfig::from_env()?;
    let mut demo = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    config.database_path = args[i + 1].clone().into();
                    i += 1;
                }
            }
            "--demo" => demo = true,
            "--help" | "-h" => {
                println!("Tarjetas Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: $TARJETAS_DB_PATH or ./tarjetas.db)");
                println!("      --demo         Run the user CRUD walkthrough after seeding");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
        i += 1;
    }

    println!("Tarjetas Seed Data Generator");
    println!("============================");
    println!("Database: {}", config.database_path.display());
    println!();

    let db = Database::new(config).await?;
    println!("✓ Connected to database");
    println!("✓ Schema applied");

    seed_catalog(&db).await?;

    if demo {
        println!();
        run_user_walkthrough(&db).await?;
    }

    db.close().await;
    Ok(())
}

/// Inserts [`CATALOG`] unless topics already exist.
///
/// Returns the number of cards actually stored; zero when skipped.
async fn seed_catalog(db: &Database) -> Result<usize, Box<dyn std::error::Error>> {
    let existing = db.temas().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} temas", existing);
        println!("  Skipping seed to avoid duplicates.");
        return Ok(0);
    }

    let mut total = 0;
    for (nombre_tema, tarjetas) in CATALOG {
        let tema = db.temas().create(&NewTema::new(*nombre_tema)).await?;

        let mut stored = 0;
        for (pregunta, respuesta, [a, b, c]) in tarjetas.iter() {
            let input = NewTarjeta {
                pregunta: pregunta.to_string(),
                respuesta: respuesta.to_string(),
                opcion_a: a.to_string(),
                opcion_b: b.to_string(),
                opcion_c: c.to_string(),
                id_tema: tema.id_tema,
            };

            if let Err(e) = db.tarjetas().create(&input).await {
                eprintln!("Failed to insert '{}': {}", pregunta, e);
                continue;
            }
            stored += 1;
        }

        println!(
            "  {} (id {}): {}/{} tarjetas",
            tema.nombre_tema,
            tema.id_tema,
            stored,
            tarjetas.len()
        );
        total += stored;
    }

    println!();
    println!("✓ Seeded {} temas and {} tarjetas", CATALOG.len(), total);
    Ok(total)
}

/// Create, read, list, update, re-read and delete one user, then confirm
/// the row is gone.
async fn run_user_walkthrough(db: &Database) -> Result<(), Box<dyn std::error::Error>> {
    let usuarios = db.usuarios();

    let created = usuarios
        .create(&NewUsuario::new(
            "John Doe",
            "john.doe@example.com",
            "securepassword",
        ))
        .await?;
    println!("Created user: {}", serde_json::to_string(&created)?);

    let fetched = usuarios.get_by_id(created.id_usuario).await?;
    println!("Retrieved user: {}", serde_json::to_string(&fetched)?);

    let all = usuarios.list().await?;
    println!("All users: {}", serde_json::to_string(&all)?);

    usuarios
        .update(&UsuarioUpdate {
            id_usuario: created.id_usuario,
            nombre_usuario: "Johnny Doe".to_string(),
            email: "johnny.doe@example.com".to_string(),
        })
        .await?;
    println!("User updated successfully");

    let updated = usuarios.get_by_id(created.id_usuario).await?;
    println!("Updated user: {}", serde_json::to_string(&updated)?);

    usuarios.delete(created.id_usuario).await?;
    println!("User deleted successfully");

    match usuarios.get_by_id(created.id_usuario).await {
        Err(e) if e.is_not_found() => println!("User not found after deletion"),
        Err(e) => return Err(e.into()),
        Ok(still_there) => {
            return Err(format!("user {} survived deletion", still_there.id_usuario).into())
        }
    }

    Ok(())
}
