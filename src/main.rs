use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use sit::areas::repository::Repository;
use sit::artifacts::branch::branch_name::SymRefName;
use sit::artifacts::diff::tree_diff::TreeChangeType;
use sit::artifacts::objects::object_id::ObjectId;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives
const LOG_ENV: &str = "SIT_LOG";

#[derive(Parser)]
#[command(
    name = "sit",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A minimal content-addressed version control system",
    long_about = "This is a small version control system written in Rust. \
    It stores blobs, trees and commits under the SHA-256 digest of their bytes \
    and keeps branches, tags and HEAD as plain reference files.",
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
        short = 'C',
        long = "path",
        global = true,
        help = "Run as if started in this directory"
    )]
    path: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(
        name = "hash-object",
        about = "Hash a file as a blob and optionally write it to the object database"
    )]
    HashObject {
        #[arg(short, long, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(name = "cat-file", about = "Print the payload of an object")]
    CatFile {
        #[arg(short = 't', long = "type", help = "Print the object type instead of its payload")]
        show_type: bool,
        #[arg(index = 1, help = "Object ID or name of the object")]
        object: String,
    },
    #[command(
        name = "write-tree",
        about = "Store the working directory as a tree and print its ID"
    )]
    WriteTree,
    #[command(
        name = "read-tree",
        about = "Replace the working directory with the contents of a tree"
    )]
    ReadTree {
        #[arg(index = 1, help = "Object ID or name of the tree")]
        tree: String,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command snapshots the working directory and records it as a new commit on the current branch."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "log", about = "Show commit history")]
    Log {
        #[arg(index = 1, help = "Name to start from (defaults to HEAD)")]
        revision: Option<String>,
    },
    #[command(
        name = "checkout",
        about = "Switch to a branch or detach HEAD at a commit"
    )]
    Checkout {
        #[arg(index = 1)]
        target: String,
    },
    #[command(name = "branch", about = "List, create, or delete branches")]
    Branch {
        #[arg(index = 1, help = "Name of the branch to create")]
        name: Option<String>,
        #[arg(index = 2, help = "Where the new branch starts (defaults to HEAD)")]
        start: Option<String>,
        #[arg(short, long, requires = "name", help = "Delete the named branch")]
        delete: bool,
    },
    #[command(name = "tag", about = "List or create tags")]
    Tag {
        #[arg(index = 1, help = "Name of the tag to create")]
        name: Option<String>,
        #[arg(index = 2, help = "Object to tag (defaults to HEAD)")]
        start: Option<String>,
    },
    #[command(name = "show-ref", about = "List references and their values")]
    ShowRef {
        #[arg(index = 1, help = "Only show references starting with this prefix")]
        prefix: Option<String>,
    },
    #[command(name = "diff", about = "List paths that differ between two commits")]
    Diff {
        #[arg(index = 1)]
        from: String,
        #[arg(index = 2)]
        to: String,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn open_repository(path: &Path) -> Result<Repository> {
    Repository::open(path).with_context(|| format!("failed to open repository at {}", path.display()))
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let root = match cli.path {
        Some(path) => path,
        None => std::env::current_dir()?,
    };
    let mut stdout = std::io::stdout().lock();

    match &cli.command {
        Commands::Init { path } => {
            let path = path.as_ref().map_or_else(|| root.clone(), |path| root.join(path));
            let repository = Repository::new(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let reinitialized = repository.is_initialized();
            repository.init().context("failed to initialize repository")?;

            let action = if reinitialized {
                "Reinitialized existing"
            } else {
                "Initialized empty"
            };
            writeln!(
                stdout,
                "{action} sit repository in {}",
                repository.storage_path().display()
            )?;
        }
        Commands::HashObject { write, file } => {
            let repository = open_repository(&root)?;
            let oid = repository
                .hash_object(file, *write)
                .with_context(|| format!("failed to hash {}", file.display()))?;

            writeln!(stdout, "{oid}")?;
        }
        Commands::CatFile { show_type, object } => {
            let repository = open_repository(&root)?;
            let oid = repository.resolve_name(object)?;
            let object = repository.cat_file(&oid)?;

            if *show_type {
                writeln!(stdout, "{}", object.object_type())?;
            } else {
                stdout.write_all(&object.payload())?;
            }
        }
        Commands::WriteTree => {
            let repository = open_repository(&root)?;
            writeln!(stdout, "{}", repository.write_tree()?)?;
        }
        Commands::ReadTree { tree } => {
            let repository = open_repository(&root)?;
            let oid = repository.resolve_name(tree)?;
            repository
                .checkout_tree(&oid)
                .with_context(|| format!("failed to read tree {oid}"))?;
        }
        Commands::Commit { message } => {
            let repository = open_repository(&root)?;
            let oid = repository.commit(message).context("failed to commit")?;
            let commit = repository.get_commit(&oid)?;

            let is_root = match commit.parent() {
                Some(_) => "",
                None => "(root-commit) ",
            };
            writeln!(
                stdout,
                "[{is_root}{}] {}",
                oid.to_short_oid(),
                commit.short_message()
            )?;
        }
        Commands::Log { revision } => {
            let repository = open_repository(&root)?;
            let reverse_refs = repository.refs().reverse_refs()?;
            let current_ref = repository.refs().current_ref()?;

            for entry in repository.log(revision.as_deref())? {
                let (oid, commit) = entry?;

                writeln!(
                    stdout,
                    "{}{}",
                    format!("commit {oid}").yellow(),
                    decoration(&oid, &reverse_refs, &current_ref)
                )?;
                writeln!(stdout)?;
                for message_line in commit.message().lines() {
                    writeln!(stdout, "    {message_line}")?;
                }
                writeln!(stdout)?;
            }
        }
        Commands::Checkout { target } => {
            let repository = open_repository(&root)?;
            let outcome = repository
                .checkout(target)
                .with_context(|| format!("failed to check out {target}"))?;

            match &outcome.branch {
                Some(branch) if SymRefName::branch(branch) == outcome.previous_ref => {
                    eprintln!("Already on '{branch}'")
                }
                Some(branch) => eprintln!("Switched to branch '{branch}'"),
                None => {
                    let commit = repository.get_commit(&outcome.oid)?;
                    eprintln!(
                        "HEAD is now at {} {}",
                        outcome.oid.to_short_oid(),
                        commit.short_message()
                    );
                }
            }
        }
        Commands::Branch {
            name,
            start,
            delete,
        } => {
            let repository = open_repository(&root)?;

            match name {
                Some(name) if *delete => {
                    let oid = repository.delete_branch(name)?;
                    writeln!(stdout, "Deleted branch {name} (was {}).", oid.to_short_oid())?;
                }
                Some(name) => {
                    repository.branch(name, start.as_deref())?;
                }
                None => {
                    for branch in repository.branches()? {
                        if branch.is_current {
                            writeln!(stdout, "* {}", branch.name.green())?;
                        } else {
                            writeln!(stdout, "  {}", branch.name)?;
                        }
                    }
                }
            }
        }
        Commands::Tag { name, start } => {
            let repository = open_repository(&root)?;

            match name {
                Some(name) => {
                    repository.tag(name, start.as_deref())?;
                }
                None => {
                    for tag in repository.tags()? {
                        writeln!(stdout, "{tag}")?;
                    }
                }
            }
        }
        Commands::ShowRef { prefix } => {
            let repository = open_repository(&root)?;

            for (name, value) in repository.show_ref(prefix.as_deref().unwrap_or(""), true)? {
                if let Some(value) = value.value {
                    writeln!(stdout, "{value} {name}")?;
                }
            }
        }
        Commands::Diff { from, to } => {
            let repository = open_repository(&root)?;

            for (path, change) in repository.diff(from, to)? {
                let status = change.status_char().to_string();
                let status = match change {
                    TreeChangeType::Added(_) => status.green(),
                    TreeChangeType::Deleted(_) => status.red(),
                    TreeChangeType::Modified { .. } => status.yellow(),
                };
                writeln!(stdout, "{status}\t{path}")?;
            }
        }
    }

    Ok(())
}

/// ` (HEAD -> master, tag: v1)` style list of the references naming `oid`
fn decoration(
    oid: &ObjectId,
    reverse_refs: &HashMap<ObjectId, Vec<SymRefName>>,
    current_ref: &SymRefName,
) -> String {
    let Some(ref_names) = reverse_refs.get(oid) else {
        return String::new();
    };

    let names = ref_names
        .iter()
        .filter(|ref_name| !ref_name.is_head() || current_ref.is_head())
        .map(|ref_name| {
            if ref_name.is_head() {
                "HEAD".cyan().bold().to_string()
            } else if ref_name == current_ref {
                format!(
                    "{} -> {}",
                    "HEAD".cyan().bold(),
                    ref_name.short_name().green().bold()
                )
            } else if ref_name.branch_name().is_some() {
                ref_name.short_name().green().bold().to_string()
            } else {
                format!("tag: {}", ref_name.short_name()).yellow().bold().to_string()
            }
        })
        .collect::<Vec<_>>();

    if names.is_empty() {
        String::new()
    } else {
        format!(" ({})", names.join(", "))
    }
}
