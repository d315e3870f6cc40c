use arfs::{cat, glob, list, stat};
use clap::{Parser, Subcommand};
use tracing::{debug, Level};

#[derive(Parser, Debug)]
#[command(name = "arfs")]
#[command(version)]
#[command(about = "Inspect the members of a Unix ar archive", long_about = None)]
struct Args {
    /// Print debug detail while working
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every member with its metadata
    List {
        /// Archive file to read
        archive: String,
    },
    /// Copy one member to standard output
    Cat {
        /// Archive file to read
        archive: String,
        /// Member name, bare or /-rooted
        name: String,
    },
    /// Print one member's metadata
    Stat {
        /// Archive file to read
        archive: String,
        /// Member name, bare or /-rooted
        name: String,
    },
    /// Print member names matching a shell-style pattern
    Glob {
        /// Archive file to read
        archive: String,
        /// Pattern with *, ? and [..] classes
        pattern: String,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    match args.command {
        Command::List { archive } => {
            debug!("listing members of {archive}");
            list(&archive)?;
        }
        Command::Cat { archive, name } => {
            debug!("dumping {name} from {archive}");
            cat(&archive, &name)?;
        }
        Command::Stat { archive, name } => {
            debug!("stat of {name} from {archive}");
            stat(&archive, &name)?;
        }
        Command::Glob { archive, pattern } => {
            debug!("matching {pattern} against {archive}");
            glob(&archive, &pattern)?;
        }
    }
    Ok(())
}
