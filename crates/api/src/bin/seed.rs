//! `studio-seed`: apply migrations and insert the demo accounts.
//!
//! ```text
//! studio-seed            # seed only when the users table is empty
//! studio-seed --reset    # truncate every table first (destroys data)
//! ```

use std::collections::HashMap;

use anyhow::Context;
use clap::Parser;
use studio_api::auth::password::hash_password;
use studio_core::roles::Role;
use studio_core::types::DbId;
use studio_db::models::user::CreateUser;
use studio_db::repositories::UserRepo;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "studio-seed")]
#[command(about = "Create the studio schema and demo accounts")]
#[command(version)]
struct Cli {
    #[arg(long, help = "Truncate all tables and restart ids before seeding")]
    reset: bool,

    #[arg(long, env = "DATABASE_URL", help = "PostgreSQL connection string")]
    database_url: String,
}

/// One demo account. `owner` names the email of the owning photographer.
struct DemoUser {
    name: &'static str,
    email: &'static str,
    password: &'static str,
    role: Role,
    owner: Option<&'static str>,
}

/// Demo accounts in insertion order; on an empty database they get ids 1..=8.
const DEMO_USERS: &[DemoUser] = &[
    DemoUser {
        name: "Admin",
        email: "admin@example.com",
        password: "admin123",
        role: Role::Admin,
        owner: None,
    },
    DemoUser {
        name: "Photographer",
        email: "photographer@example.com",
        password: "photo1234",
        role: Role::Photographer,
        owner: None,
    },
    DemoUser {
        name: "Client",
        email: "client@example.com",
        password: "client123",
        role: Role::Client,
        owner: Some("photographer@example.com"),
    },
    DemoUser {
        name: "Client 4",
        email: "client4@example.com",
        password: "client123",
        role: Role::Client,
        owner: Some("photographer@example.com"),
    },
    DemoUser {
        name: "Client 5",
        email: "client5@example.com",
        password: "client123",
        role: Role::Client,
        owner: Some("photographer@example.com"),
    },
    DemoUser {
        name: "Photographer 6",
        email: "photographer6@example.com",
        password: "photo1234",
        role: Role::Photographer,
        owner: None,
    },
    DemoUser {
        name: "Client 7",
        email: "client7@example.com",
        password: "client123",
        role: Role::Client,
        owner: Some("photographer6@example.com"),
    },
    DemoUser {
        name: "Client 8",
        email: "client8@example.com",
        password: "client123",
        role: Role::Client,
        owner: Some("photographer6@example.com"),
    },
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "studio_seed=info,studio_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let pool = studio_db::create_pool(&cli.database_url)
        .await
        .context("connecting to the database")?;
    studio_db::run_migrations(&pool)
        .await
        .context("applying migrations")?;
    tracing::info!("Schema is up to date");

    if cli.reset {
        studio_db::truncate_all(&pool).await.context("resetting tables")?;
    }

    let mut tx = pool.begin().await?;
    let existing = UserRepo::count(&mut *tx).await?;
    if existing > 0 {
        tracing::info!(existing, "Users already present, skipping demo data");
        return Ok(());
    }

    let mut ids: HashMap<&str, DbId> = HashMap::new();
    for demo in DEMO_USERS {
        let photographer_id = demo
            .owner
            .map(|owner| {
                ids.get(owner)
                    .copied()
                    .with_context(|| format!("owner {owner} must be seeded before {}", demo.email))
            })
            .transpose()?;

        let password_hash = hash_password(demo.password)
            .map_err(|e| anyhow::anyhow!("hashing password for {}: {e}", demo.email))?;

        let user = UserRepo::create(
            &mut *tx,
            &CreateUser {
                name: demo.name.to_string(),
                email: demo.email.to_string(),
                password_hash,
                role: demo.role,
                photographer_id,
            },
        )
        .await
        .with_context(|| format!("inserting {}", demo.email))?;

        tracing::info!(user_id = user.id, email = %user.email, role = %user.role, "Seeded user");
        ids.insert(demo.email, user.id);
    }

    tx.commit().await?;
    tracing::info!(count = DEMO_USERS.len(), "Demo users created");
    Ok(())
}
