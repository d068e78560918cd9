//! Operator tool: create (or reset) the admin account directly against the
//! database, for deployments where the HTTP bootstrap route is closed off.
use anyhow::{bail, Context, Result};
use clap::Parser;

use estate_api::auth::hash_password;
use estate_api::database::manager::DatabaseManager;
use estate_api::database::models::user::ROLE_ADMIN;

#[derive(Parser, Debug)]
#[command(name = "create-admin", about = "Create or reset the admin user")]
struct Args {
    /// Admin login email
    #[arg(long)]
    email: String,

    /// Plaintext password; stored only as a bcrypt hash
    #[arg(long)]
    password: String,

    /// Display name
    #[arg(long, default_value = "Administrator")]
    name: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    if !args.email.contains('@') {
        bail!("--email must be a valid email address");
    }
    if args.password.len() < 8 {
        bail!("--password must be at least 8 characters");
    }

    let pool = DatabaseManager::init()
        .await
        .context("database connection failed")?;

    let hashed = hash_password(&args.password).context("password hashing failed")?;
    let email = args.email.trim().to_lowercase();

    let (id,): (uuid::Uuid,) = sqlx::query_as(
        "INSERT INTO users (email, password, name, role) \
         VALUES ($1, $2, $3, $4) \
         ON CONFLICT (email) DO UPDATE \
           SET password = EXCLUDED.password, \
               name = EXCLUDED.name, \
               role = EXCLUDED.role, \
               updated_at = now() \
         RETURNING id",
    )
    .bind(&email)
    .bind(hashed)
    .bind(&args.name)
    .bind(ROLE_ADMIN)
    .fetch_one(&pool)
    .await
    .context("failed to upsert admin user")?;

    println!("Admin user {} ready (id {})", email, id);
    Ok(())
}
