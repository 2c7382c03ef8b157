//! CLI entry point for notes-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "notes-rs")]
#[command(version)]
#[command(about = "Content loader and site data generator for a personal notes blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new notes site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Mark the post as a draft
        #[arg(long)]
        draft: bool,

        /// File name for the new post (without extension)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Generate the site data files
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Clean the output folder
    Clean,

    /// List site information
    List {
        /// Type of content to list (post, tag, category, nav, sidebar)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "notes_rs=debug,info"
    } else {
        "notes_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing notes site in {:?}", target_dir);
            notes_rs::commands::init::init_site(&target_dir)?;
            println!("Initialized notes site in {:?}", target_dir);
        }

        Commands::New { title, draft, path } => {
            let site = notes_rs::Site::new(&base_dir)?;
            tracing::info!("Creating new post with title: {}", title);
            let file = notes_rs::commands::new::create_post(&site, &title, draft, path.as_deref())?;
            println!("Created: {:?}", file);
        }

        Commands::Generate { watch } => {
            let site = notes_rs::Site::new(&base_dir)?;
            tracing::info!("Generating site data...");

            site.generate()?;
            println!("Generated successfully!");

            if watch {
                tracing::info!("Watching for file changes...");
                notes_rs::commands::generate::watch(&site).await?;
            }
        }

        Commands::Clean => {
            let site = notes_rs::Site::new(&base_dir)?;
            tracing::info!("Cleaning output folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let site = notes_rs::Site::new(&base_dir)?;
            notes_rs::commands::list::run(&site, &r#type)?;
        }

        Commands::Version => {
            println!("notes-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
