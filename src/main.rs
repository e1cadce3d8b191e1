use clap::{ArgAction, Parser, Subcommand};
use dotgit::areas::repository::Repository;
use dotgit::artifacts::core::PagerWriter;
use dotgit::artifacts::core::errors::{RepositoryError, is_kind};
use dotgit::commands::porcelain::log::LogOptions;
use is_terminal::IsTerminal;
use minus::Pager;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "DOTGIT_LOG";
const NO_PAGER_ENV: &str = "NO_PAGER";

#[derive(Parser)]
#[command(
    name = "dotgit",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A minimal local version-control engine",
    long_about = "dotgit stores whole-file snapshot commits in a local .dotgit directory. \
    It keeps a staging area, content-addressed commit objects and named branches, \
    without remotes, diffs or merges.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(
        short,
        long,
        global = true,
        action = ArgAction::Count,
        help = "Increase log verbosity (-v info, -vv debug, -vvv trace)"
    )]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command creates the .dotgit layout in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(
        name = "ignore",
        about = "Show the effective ignore rules",
        long_about = "This command prints the built-in ignore rules followed by the rules read from .dotgitignore."
    )]
    Ignore,
    #[command(
        name = "add",
        about = "Stage files for the next commit",
        long_about = "This command records the current content of the given files in the staging area. \
        Directories are expanded recursively and ignored paths are skipped."
    )]
    Add {
        #[arg(index = 1, required = true, num_args = 1.., help = "Files or directories to stage")]
        paths: Vec<String>,
    },
    #[command(
        name = "commit",
        about = "Create a new commit from the staged files",
        long_about = "This command snapshots every staged file into a new commit object and clears the staging area."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "log",
        about = "Show stored commits",
        long_about = "This command prints every stored commit with its date, message and file sizes."
    )]
    Log {
        #[arg(long, help = "Order commits by their timestamp, oldest first")]
        date_order: bool,
    },
    #[command(
        name = "branch",
        about = "List, create, or delete branches",
        long_about = "Without arguments this command lists branches. With a name it creates a branch, \
        and with --delete it removes one."
    )]
    Branch {
        #[arg(index = 1, help = "The name of the branch to create")]
        name: Option<String>,
        #[arg(
            short,
            long,
            value_name = "NAME",
            conflicts_with = "name",
            help = "Delete the named branch"
        )]
        delete: Option<String>,
    },
    #[command(
        name = "cat-file",
        about = "Print a stored commit object",
        long_about = "This command pretty-prints one commit object. \
        The id may be abbreviated to a unique prefix of at least four characters."
    )]
    CatFile {
        #[arg(index = 1, help = "The commit id to print")]
        id: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let is_init = matches!(cli.command, Commands::Init { .. });
    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {:#}", error);

            let missing_repository =
                is_kind(&error, |kind| matches!(kind, RepositoryError::NotARepository(_)));
            if is_init || missing_repository {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
    }
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("dotgit={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn use_pager() -> bool {
    std::env::var_os(NO_PAGER_ENV).is_none() && std::io::stdout().is_terminal()
}

fn open_repository(pwd: &Path) -> anyhow::Result<Repository> {
    Repository::discover(pwd, Box::new(std::io::stdout()))
}

async fn run(command: Commands) -> anyhow::Result<()> {
    let pwd = std::env::current_dir()?;

    match command {
        Commands::Init { path } => {
            let path = path.map(PathBuf::from).unwrap_or(pwd);
            let mut repository = Repository::new(&path, Box::new(std::io::stdout()))?;

            repository.init().await?
        }
        Commands::Ignore => {
            let repository = open_repository(&pwd)?;

            repository.show_ignore_rules()?
        }
        Commands::Add { paths } => {
            let mut repository = open_repository(&pwd)?;

            let failures = repository.add(&paths).await?;
            for failure in failures {
                eprintln!("error: {}: {:#}", failure.path, failure.error);
            }
        }
        Commands::Commit { message } => {
            let mut repository = open_repository(&pwd)?;

            repository.commit(&message).await?;
        }
        Commands::Log { date_order } => {
            let options = LogOptions { date_order };

            let failures = if use_pager() {
                let pager = Pager::new();
                let repository =
                    Repository::discover(&pwd, Box::new(PagerWriter::new(pager.clone())))?;
                let failures = repository.log(&options)?;
                drop(repository);

                debug!("handing log output to the pager");
                minus::page_all(pager)?;
                failures
            } else {
                let repository = open_repository(&pwd)?;

                repository.log(&options)?
            };

            for failure in failures {
                eprintln!("error: {}: {:#}", failure.id, failure.error);
            }
        }
        Commands::Branch { name, delete } => {
            let mut repository = open_repository(&pwd)?;

            match (name, delete) {
                (_, Some(name)) => repository.delete_branch(&name)?,
                (Some(name), None) => repository.create_branch(&name)?,
                (None, None) => repository.list_branches()?,
            }
        }
        Commands::CatFile { id } => {
            let repository = open_repository(&pwd)?;

            repository.cat_file(&id)?
        }
    }

    Ok(())
}
