use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use murmur::app::AppContext;
use murmur::cli::{commands, Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut ctx = AppContext::new(cli.backend, cli.path)?;

    match cli.command {
        Commands::List => commands::list_posts(&mut ctx)?,
        Commands::Add { content } => commands::add_post(&mut ctx, &content)?,
        Commands::Edit { id, content } => commands::edit_post(&mut ctx, id, &content)?,
        Commands::Like { id } => commands::like_post(&mut ctx, id)?,
        Commands::Share { id } => commands::share_post(&mut ctx, id)?,
        Commands::Remove { id } => commands::remove_post(&mut ctx, id)?,
        Commands::Open { id } => commands::open_post(&mut ctx, id)?,
    }

    Ok(())
}
