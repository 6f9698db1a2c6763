mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tipsy", version, about = "Minimal todo list backed by SQLite")]
struct Cli {
    /// Path to the database file (default: tipsy.db in current dir)
    #[arg(long, env = "TIPSY_DB", global = true)]
    db: Option<PathBuf>,

    /// Output as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database
    Init,
    /// Register a new user
    Register {
        /// Login email (must be unique)
        email: String,
        /// Display name
        name: String,
        /// Password
        #[arg(long, env = "TIPSY_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Check a user's credentials
    Login {
        /// Login email
        email: String,
        /// Password
        #[arg(long, env = "TIPSY_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Show a user by id
    User {
        /// User ID
        id: i64,
    },
    /// Create a new task
    Add {
        /// Task title
        title: String,
        /// Owning user ID (omit for an unowned task)
        #[arg(short, long)]
        user: Option<i64>,
    },
    /// Mark a task complete
    Done {
        /// Task ID
        id: i64,
    },
    /// List tasks (all users unless --user is given)
    List {
        /// Only tasks owned by this user ID
        #[arg(short, long)]
        user: Option<i64>,
    },
    /// Show detailed info for a task
    Show {
        /// Task ID
        id: i64,
    },
}

fn main() {
    let cli = Cli::parse();
    tipsy::logging::init(cli.verbose);

    let db_path = cli.db.unwrap_or_else(|| PathBuf::from("tipsy.db"));

    let result = match cli.command {
        Commands::Init => commands::init::run(&db_path),
        Commands::Register {
            email,
            name,
            password,
        } => commands::register::run(&db_path, &email, &password, &name, cli.json),
        Commands::Login { email, password } => {
            commands::login::run(&db_path, &email, &password, cli.json)
        }
        Commands::User { id } => commands::user::run(&db_path, id, cli.json),
        Commands::Add { title, user } => commands::add::run(&db_path, &title, user, cli.json),
        Commands::Done { id } => commands::done::run(&db_path, id, cli.json),
        Commands::List { user } => commands::list::run(&db_path, user, cli.json),
        Commands::Show { id } => commands::show::run(&db_path, id, cli.json),
    };

    if let Err(e) = result {
        log::debug!("command failed: {e:?}");
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
