// src/bin/passvault.rs
//! passvault: command-line front end for the encrypted credential vault

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use passvault::enums::SymbolSet;
use passvault::error::{CoreError, StorageError};
use passvault::{
    generate_password, load_config, FileStorage, GeneratorOptions, Passphrase, Session,
    VaultEntry, VaultStore,
};
use rpassword::prompt_password;
use tracing::info;
use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;

const MIN_MASTER_LEN: usize = 8;
const MIN_ENTRY_PASSWORD_LEN: usize = 6;

#[derive(Parser)]
#[command(name = "passvault", about = "AES-GCM encrypted personal password vault")]
struct Cli {
    /// Vault file (defaults to the configured path)
    #[arg(long = "vault", global = true)]
    vault_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new vault
    Init,
    /// Add an entry
    Add(AddArgs),
    /// List entries
    List {
        /// Search in service, username and tags
        #[arg(long)]
        filter: Option<String>,
    },
    /// Show a single entry
    Show {
        #[arg(long)]
        id: String,
        /// Print the password in clear text
        #[arg(long)]
        reveal: bool,
    },
    /// Delete an entry
    Delete {
        #[arg(long)]
        id: String,
    },
    /// Generate a standalone password
    Generate(GenerateArgs),
    /// Change the master passphrase
    Passwd,
}

#[derive(Args)]
struct AddArgs {
    #[arg(long)]
    service: String,
    #[arg(long)]
    username: String,
    /// Password value; prompted for when omitted
    #[arg(long)]
    password: Option<String>,
    #[arg(long)]
    notes: Option<String>,
    /// Comma-separated tags
    #[arg(long)]
    tags: Option<String>,
    /// Generate the password
    #[arg(long)]
    auto: bool,
    #[arg(long)]
    length: Option<usize>,
    #[arg(long, value_enum)]
    symbols: Option<SymbolSet>,
    #[arg(long)]
    allow_ambiguous: bool,
}

#[derive(Args)]
struct GenerateArgs {
    #[arg(long, default_value_t = 28)]
    length: usize,
    #[arg(long, value_enum, default_value_t = SymbolSet::Hard)]
    symbols: SymbolSet,
    #[arg(long)]
    allow_ambiguous: bool,
    /// Do not force one character from every group
    #[arg(long)]
    no_require_each: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config();
    let vault_path = cli
        .vault_path
        .unwrap_or_else(|| config.storage.vault_path.clone());
    let store = VaultStore::with_config(FileStorage::new(&vault_path), config);

    match cli.command {
        Command::Init => {
            let passphrase = prompt_master(true)?;
            match store.init(&passphrase) {
                Ok(_) => println!("Vault created at {}", vault_path.display()),
                Err(CoreError::Storage(StorageError::AlreadyExists)) => {
                    bail!("a vault already exists at {}", vault_path.display())
                }
                Err(err) => return Err(err).context("failed to create vault"),
            }
        }
        Command::Generate(args) => {
            let options = GeneratorOptions {
                length: args.length,
                symbols: args.symbols,
                allow_ambiguous: args.allow_ambiguous,
                require_each_category: !args.no_require_each,
            };
            println!("{}", generate_password(&options)?);
        }
        command => {
            if !store.storage().path().exists() {
                bail!("no vault at {}, run `passvault init` first", vault_path.display());
            }
            let mut session = Session::new(store);
            session
                .unlock(prompt_master(false)?)
                .context("could not open vault")?;
            run_unlocked(&mut session, command, config)?;
            session.lock();
        }
    }
    Ok(())
}

fn run_unlocked(
    session: &mut Session<FileStorage>,
    command: Command,
    config: &passvault::config::Config,
) -> Result<()> {
    match command {
        Command::Add(args) => {
            let password = if args.auto {
                let mut options = config.generator.options();
                options.length = args.length.unwrap_or(options.length);
                options.symbols = args.symbols.unwrap_or(options.symbols);
                options.allow_ambiguous |= args.allow_ambiguous;
                generate_password(&options)?
            } else {
                match args.password {
                    Some(password) => password,
                    None => prompt_entry_password()?.to_string(),
                }
            };
            let tags = args
                .tags
                .as_deref()
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_owned)
                .collect::<Vec<_>>();
            let mut entry = VaultEntry::new(args.service, args.username, password).with_tags(tags);
            if let Some(notes) = args.notes.filter(|n| !n.is_empty()) {
                entry = entry.with_notes(notes);
            }
            let id = session.vault_mut()?.add_entry(entry)?.entry_id.clone();
            session.save()?;
            info!(%id, "entry added");
            println!("Added entry {id}");
        }
        Command::List { filter } => {
            let vault = session.vault()?;
            let entries = vault.list_entries(filter.as_deref());
            if entries.is_empty() {
                println!("No entries.");
            }
            for entry in entries {
                println!(
                    "{:<24}  {:<20}  {:<24}  {}",
                    entry.entry_id,
                    entry.service,
                    entry.username,
                    entry.tags.join(", ")
                );
            }
        }
        Command::Show { id, reveal } => {
            let entry = session.vault()?.get_entry(&id)?;
            println!("id:       {}", entry.entry_id);
            println!("service:  {}", entry.service);
            println!("username: {}", entry.username);
            if reveal {
                println!("password: {}", entry.password.reveal());
            } else {
                println!("password: {}", passvault::vault::EntryPassword::MASK);
            }
            println!("tags:     {}", entry.tags.join(", "));
            println!("notes:    {}", entry.notes.as_deref().unwrap_or(""));
            println!("created:  {}", entry.created_at.to_rfc3339());
            println!("updated:  {}", entry.updated_at.to_rfc3339());
        }
        Command::Delete { id } => {
            session.vault_mut()?.delete_entry(&id)?;
            session.save()?;
            println!("Deleted entry {id}");
        }
        Command::Passwd => {
            let new_passphrase = prompt_master(true)?;
            session.change_passphrase(new_passphrase)?;
            println!("Master passphrase changed");
        }
        Command::Init | Command::Generate(_) => unreachable!("handled before unlocking"),
    }
    Ok(())
}

fn prompt_master(confirm: bool) -> Result<Passphrase> {
    loop {
        let input = Zeroizing::new(prompt_password("Master passphrase: ")?);
        if input.trim().chars().count() < MIN_MASTER_LEN {
            eprintln!("The master passphrase must be at least {MIN_MASTER_LEN} characters.");
            continue;
        }
        if confirm {
            let again = Zeroizing::new(prompt_password("Master passphrase (again): ")?);
            if again.trim() != input.trim() {
                eprintln!("Passphrases did not match, try again.");
                continue;
            }
        }
        return Ok(Passphrase::from_input(input));
    }
}

/// Entry password as typed; the caller hands it straight to `VaultEntry`
fn prompt_entry_password() -> Result<Zeroizing<String>> {
    loop {
        let input = Zeroizing::new(prompt_password("Entry password: ")?);
        let password = input.trim();
        if password.chars().count() < MIN_ENTRY_PASSWORD_LEN {
            eprintln!("The password must be at least {MIN_ENTRY_PASSWORD_LEN} characters.");
            continue;
        }
        let again = Zeroizing::new(prompt_password("Entry password (again): ")?);
        if again.trim() != password {
            eprintln!("Passwords did not match, try again.");
            continue;
        }
        return Ok(Zeroizing::new(password.to_owned()));
    }
}
