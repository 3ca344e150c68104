use anyhow::Result;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cs", version, about = "Chaladshare backend CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the post service
    PostApi,
    /// Apply database migrations against DATABASE_URL
    Migrate,
    /// Print a signed access token for a user
    Token(TokenArgs),
}

#[derive(Args)]
struct TokenArgs {
    /// User id placed in the token subject
    #[arg(long)]
    user_id: i64,

    /// Token lifetime; defaults to JWT_TTL_SECONDS
    #[arg(long)]
    ttl_seconds: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::PostApi => {
            let config = cs_post_api::load_config()?;
            cs_post_api::run(config).await?;
        }
        Commands::Migrate => {
            cs_core::logging::init("cs-cli");
            let db = cs_core::db::DbConfig::from_env(2)?;
            let pool = cs_core::db::connect(&db).await?;
            cs_core::migrations::run(&pool).await?;
            tracing::info!("migrations applied");
        }
        Commands::Token(args) => {
            let mut jwt_config = cs_post_api::load_jwt_config()?;
            if let Some(ttl_seconds) = args.ttl_seconds {
                jwt_config.ttl_seconds = ttl_seconds;
            }
            let (token, claims) = cs_core::auth::issue_token(args.user_id, &jwt_config)?;
            eprintln!("expires at {} (unix seconds)", claims.exp);
            println!("{token}");
        }
    }

    Ok(())
}
