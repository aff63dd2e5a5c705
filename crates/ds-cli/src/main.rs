use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ds")]
#[command(about = "DailySunnah hadith reader", long_about = None)]
struct Cli {
    /// Layered config paths in merge order
    #[arg(long = "config", global = true)]
    config_paths: Vec<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the sections of the active book
    Sections,

    /// Show the featured hadith (changes once a day)
    Featured {
        /// Entry to show instead of today's
        #[arg(long)]
        number: Option<u32>,
    },

    /// Read a section page by page
    Read {
        /// Section id (e.g. 1, 2, 10)
        section: String,

        /// Number of pages to show
        #[arg(long, default_value_t = 1)]
        pages: usize,

        /// Keep paging until this hadith number is shown
        #[arg(long)]
        seek: Option<u64>,
    },

    /// Bookmark commands
    Bookmark {
        #[command(subcommand)]
        cmd: BookmarkCmd,
    },

    /// Toggle a reaction on a hadith (same emoji again clears it)
    React {
        section: String,
        number: u64,
        emoji: String,
    },

    /// List every stored reaction
    Reactions,

    /// Active book / language
    Settings {
        #[command(subcommand)]
        cmd: SettingsCmd,
    },

    /// Print a hadith as share text, optionally exporting it to a file
    Share {
        section: String,
        number: u64,

        /// Also write the text to this file
        #[arg(long)]
        out: Option<String>,
    },

    /// Configuration utilities
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },
}

#[derive(Subcommand)]
enum BookmarkCmd {
    /// Add the bookmark if absent, remove it if present
    Toggle { section: String, number: u64 },

    /// Saved bookmarks, newest first
    List,

    /// Remove a bookmark by id
    Remove { id: String },

    /// Re-open the section of a bookmark at its hadith
    Open { id: String },
}

#[derive(Subcommand)]
enum SettingsCmd {
    Show,

    SetBook { code: String },

    SetLang { code: String },

    /// Selectable books, languages and reactions
    Catalog,
}

#[derive(Subcommand)]
enum ConfigCmd {
    /// Print the effective config as JSON
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Silent if the file does not exist.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();
    let config = commands::load_config(&cli.config_paths)?;

    let mut rt = commands::Runtime::open(config);

    match cli.cmd {
        Commands::Sections => commands::browse::sections(&rt).await?,
        Commands::Featured { number } => commands::browse::featured(&rt, number).await?,
        Commands::Read {
            section,
            pages,
            seek,
        } => commands::browse::read(&rt, &section, pages, seek).await?,

        Commands::Bookmark { cmd } => match cmd {
            BookmarkCmd::Toggle { section, number } => {
                commands::annotate::bookmark_toggle(&mut rt, &section, number).await?
            }
            BookmarkCmd::List => commands::annotate::bookmark_list(&rt),
            BookmarkCmd::Remove { id } => commands::annotate::bookmark_remove(&mut rt, &id)?,
            BookmarkCmd::Open { id } => commands::annotate::bookmark_open(&rt, &id).await?,
        },
        Commands::React {
            section,
            number,
            emoji,
        } => commands::annotate::react(&mut rt, &section, number, &emoji)?,
        Commands::Reactions => commands::annotate::reactions(&rt),

        Commands::Settings { cmd } => match cmd {
            SettingsCmd::Show => commands::settings::show(&rt),
            SettingsCmd::SetBook { code } => commands::settings::set_book(&mut rt, &code)?,
            SettingsCmd::SetLang { code } => commands::settings::set_lang(&mut rt, &code)?,
            SettingsCmd::Catalog => commands::settings::catalog()?,
        },

        Commands::Share {
            section,
            number,
            out,
        } => commands::share::share(&rt, &section, number, out.as_deref()).await?,

        Commands::Config { cmd } => match cmd {
            ConfigCmd::Show => commands::settings::config_show(&rt.config)?,
        },
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
