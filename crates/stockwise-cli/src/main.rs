use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use dotenvy::dotenv;
use stockwise_cli::commands;
use stockwise_config::{JwtConfig, PermissionsConfig, permissions::load_structure_file};
use stockwise_db::{PgUserRepository, init_db_pool};
use stockwise_models::{CreateUserDto, UserId};
use stockwise_permissions::{PermissionStructure, Role};

#[derive(Parser)]
#[command(name = "stockwise-cli")]
#[command(about = "Stockwise CLI - Permission administration tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the permission structure tree
    ShowStructure {
        /// JSON structure file (defaults to PERMISSION_STRUCTURE_PATH or the built-in catalog)
        #[arg(short = 'p', long)]
        path: Option<PathBuf>,
    },
    /// Validate a JSON permission structure file
    ValidateStructure {
        path: PathBuf,
    },
    /// Create a manager (or admin) account
    CreateManager {
        #[arg(short = 'n', long)]
        name: String,

        #[arg(short = 'e', long)]
        email: String,

        /// Create an admin instead of a manager
        #[arg(long)]
        admin: bool,
    },
    /// Replace one user's permissions with a copy of another's
    ClonePermissions {
        /// Source user id
        #[arg(long)]
        from: UserId,

        /// Target user id
        #[arg(long)]
        to: UserId,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Convert a user's legacy module access into granular permissions
    UpgradeLegacy {
        id: UserId,
    },
    /// Print an access token for a user (signed with JWT_SECRET)
    IssueToken {
        id: UserId,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stockwise=warn".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::ShowStructure { path } => {
            let structure = load(path);
            print!("{}", commands::render_structure(&structure));
        }
        Commands::ValidateStructure { path } => match load_structure_file(&path) {
            Ok(structure) => {
                let submodules = structure.all_submodule_ids().len();
                println!(
                    "✅ {} is valid (v{}, {} sections, {} submodules)",
                    path.display(),
                    structure.version(),
                    structure.sections().len(),
                    submodules
                );
            }
            Err(e) => fail(format!("{} is invalid: {}", path.display(), e)),
        },
        Commands::CreateManager { name, email, admin } => {
            let repo = connect().await;
            let structure = load(None);
            let dto = CreateUserDto {
                name,
                email,
                role: if admin { Role::Admin } else { Role::Manager },
            };
            match commands::create_manager(&repo, &structure, dto).await {
                Ok(user) => {
                    println!("\n✅ {} created successfully!", user.role);
                    println!("   ID: {}", user.id);
                    println!("   Name: {}", user.name);
                    println!("   Email: {}", user.email);
                }
                Err(e) => fail(format!("Error creating user: {}", e.error)),
            }
        }
        Commands::ClonePermissions { from, to, yes } => {
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!(
                        "Replace all permissions of {} with those of {}?",
                        to, from
                    ))
                    .default(false)
                    .interact()
                    .unwrap_or(false);
                if !confirmed {
                    println!("Aborted.");
                    return;
                }
            }

            let repo = connect().await;
            match commands::clone_user_permissions(&repo, from, to).await {
                Ok(store) => println!(
                    "\n✅ Permissions cloned ({} actions granted)",
                    store.granted_count()
                ),
                Err(e) => fail(format!("Error cloning permissions: {}", e.error)),
            }
        }
        Commands::UpgradeLegacy { id } => {
            let repo = connect().await;
            let structure = load(None);
            match commands::upgrade_legacy(&repo, &structure, id).await {
                Ok(store) => println!(
                    "\n✅ Legacy access upgraded ({} actions granted)",
                    store.granted_count()
                ),
                Err(e) => fail(format!("Error upgrading user: {}", e.error)),
            }
        }
        Commands::IssueToken { id } => {
            let repo = connect().await;
            match commands::issue_token(&repo, &JwtConfig::from_env(), id).await {
                Ok(token) => println!("{}", token),
                Err(e) => fail(format!("Error issuing token: {}", e.error)),
            }
        }
    }
}

fn load(path: Option<PathBuf>) -> PermissionStructure {
    let result = match path {
        Some(path) => load_structure_file(&path),
        None => PermissionsConfig::from_env().load_structure(),
    };
    result.unwrap_or_else(|e| fail(format!("Cannot load permission structure: {}", e)))
}

async fn connect() -> PgUserRepository {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        fail("DATABASE_URL must be set".to_string());
    };
    match init_db_pool(&database_url).await {
        Ok(pool) => PgUserRepository::new(pool),
        Err(e) => fail(format!("Failed to connect to database: {}", e)),
    }
}

fn fail(message: String) -> ! {
    eprintln!("\n❌ {}", message);
    process::exit(1);
}
