use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ember")]
#[command(about = concat!(
    ">>============================<<\n",
    "||  ___       _               ||\n",
    "|| | __|_ __ | |__  ___ _ _   ||\n",
    "|| | _|| '  \\| '_ \\/ -_) '_|  ||\n",
    "|| |___|_|_|_|_.__/\\___|_|    ||\n",
    ">>============================<<\n",
    "~Little wins, kept warm~"
))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_version = concat!(
    "v",
    env!("CARGO_PKG_VERSION"),
    "\nCodeName: ",
    env!("CODENAME")
))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Adds a task
    Add {
        /// Task text; whitespace-only input is silently ignored
        #[arg(num_args = 0..)]
        text: Vec<String>,
    },

    /// Lists tasks with progress, points, streak, and badges
    List {
        /// Disable colors
        #[arg(long)]
        no_color: bool,
    },

    /// Toggles task completion status
    Check {
        #[arg(value_parser = clap::value_parser!(u32))]
        id: u32,
    },

    /// Removes a task
    Remove {
        #[arg(value_parser = clap::value_parser!(u32))]
        id: u32,
        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Moves a task to a new position in the list
    Move {
        /// Task ID to move
        #[arg(value_parser = clap::value_parser!(u32))]
        id: u32,
        /// Target position, 1-based
        #[arg(value_parser = clap::value_parser!(usize))]
        pos: usize,
    },

    /// Shows points, streak, progress, and badges
    Stats {
        /// Disable colors
        #[arg(long)]
        no_color: bool,
    },

    /// Prints a fresh motivational quote
    Quote,

    /// Recover tasks from backup file
    Recover {
        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },
}
