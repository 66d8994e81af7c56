use clap::{Parser, Subcommand};
use dialoguer::{Confirm, Input, Password, Select};
use dotenvy::dotenv;
use schoolhub_auth::AdminRole;
use schoolhub_cli::admin::{create_admin, deactivate_admin, parse_role};
use schoolhub_cli::seeder::{self, SeedConfig};
use schoolhub_models::admins::CreateAdminDto;
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "schoolhub-cli")]
#[command(about = "SchoolHub CLI - admin accounts and demo data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an admin account
    CreateAdmin {
        /// Email address used to sign in
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Display name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// `super-admin` or `editor`
        #[arg(short = 'r', long, value_parser = parse_role)]
        role: Option<AdminRole>,

        /// Password (prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Deactivate an admin account
    DeactivateAdmin {
        #[arg(short = 'e', long)]
        email: String,
    },
    /// Fill the content tables with demo data
    Seed {
        #[arg(long, default_value = "20")]
        news: usize,

        #[arg(long, default_value = "12")]
        events: usize,

        #[arg(long, default_value = "30")]
        staff: usize,

        #[arg(long, default_value = "8")]
        faqs: usize,

        #[arg(long, default_value = "6")]
        albums: usize,

        #[arg(long, default_value = "12")]
        photos_per_album: usize,

        #[arg(long, default_value = "15")]
        messages: usize,
    },
    /// Delete all content, messages and applications (keeps admins and settings)
    ClearSeed {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    let cli = Cli::parse();

    match cli.command {
        Commands::CreateAdmin {
            email,
            name,
            role,
            password,
        } => handle_create_admin(&pool, email, name, role, password).await,
        Commands::DeactivateAdmin { email } => handle_deactivate_admin(&pool, &email).await,
        Commands::Seed {
            news,
            events,
            staff,
            faqs,
            albums,
            photos_per_album,
            messages,
        } => {
            let config = SeedConfig {
                news,
                events,
                staff,
                faqs,
                albums,
                photos_per_album,
                messages,
            };
            if let Err(e) = seeder::seed_all(&pool, config).await {
                eprintln!("\n❌ Error seeding database: {}", e);
                std::process::exit(1);
            }
        }
        Commands::ClearSeed { yes } => handle_clear_seed(&pool, yes).await,
    }
}

async fn handle_create_admin(
    pool: &PgPool,
    email: Option<String>,
    name: Option<String>,
    role: Option<AdminRole>,
    password: Option<String>,
) {
    let email = email.unwrap_or_else(|| {
        Input::new()
            .with_prompt("Email address")
            .interact_text()
            .expect("Failed to read email")
    });

    let full_name = name.unwrap_or_else(|| {
        Input::new()
            .with_prompt("Full name")
            .interact_text()
            .expect("Failed to read name")
    });

    let role = role.unwrap_or_else(|| {
        let choice = Select::new()
            .with_prompt("Role")
            .items(&["super admin", "editor"])
            .default(0)
            .interact()
            .expect("Failed to read role");
        if choice == 0 {
            AdminRole::SuperAdmin
        } else {
            AdminRole::Editor
        }
    });

    let password = password.unwrap_or_else(|| {
        Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .expect("Failed to read password")
    });

    let dto = CreateAdminDto {
        email: email.clone(),
        password,
        full_name: full_name.clone(),
        role,
    };

    match create_admin(pool, dto).await {
        Ok(id) => {
            println!("\n✅ Admin created successfully!");
            println!("   ID: {}", id);
            println!("   Email: {}", email);
            println!("   Name: {}", full_name);
            println!("   Role: {}", role);
        }
        Err(e) => {
            eprintln!("\n❌ Error creating admin: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_deactivate_admin(pool: &PgPool, email: &str) {
    match deactivate_admin(pool, email).await {
        Ok(true) => println!("✅ Deactivated {}", email),
        Ok(false) => {
            eprintln!("❌ No admin with email {}", email);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("\n❌ Error deactivating admin: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_clear_seed(pool: &PgPool, yes: bool) {
    let confirmed = yes
        || Confirm::new()
            .with_prompt("Delete all content, messages and applications?")
            .default(false)
            .interact()
            .expect("Failed to read confirmation");

    if !confirmed {
        println!("Aborted");
        return;
    }

    if let Err(e) = seeder::clear_all(pool).await {
        eprintln!("\n❌ Error clearing data: {}", e);
        std::process::exit(1);
    }
}
