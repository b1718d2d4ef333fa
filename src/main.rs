use anyhow::{bail, Result};
use clap::Parser;
use std::path::Path;

use securevault::cli::commands::CliCommand;
use securevault::cli::{handlers, Args};
use securevault::core::session::SessionManager;
use securevault::{Config, CredentialStore, RemoteVault};

/// Restore the persisted session and hand back a store bound to it.
fn attach_store(manager: &SessionManager, remote: RemoteVault) -> Result<CredentialStore> {
    let Some(session) = manager.current()? else {
        bail!("not logged in - run `securevault login` first");
    };
    let mut store = CredentialStore::new(remote);
    store.attach_session(session);
    Ok(store)
}

#[tokio::main]
async fn main() -> Result<()> {
    if Path::new(".env").exists() {
        dotenvy::dotenv().ok();
    }

    let args = Args::parse();

    // The logger has to be up before Config::load, which warns about
    // malformed environment values.
    env_logger::Builder::new()
        .filter_level(Config::bootstrap_log_level())
        .format_timestamp_secs()
        .init();

    let mut config = Config::load();
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(api_url) = args.api_url {
        config.api_url = Some(api_url);
    }

    log::debug!("Using data dir {:?}", config.data_dir);

    let manager = SessionManager::new(config.data_dir.clone());
    let remote = RemoteVault::from_config(&config);

    match args.command {
        CliCommand::Register => handlers::handle_register(&manager)?,
        CliCommand::Login => handlers::handle_login(&manager)?,
        CliCommand::Logout => {
            let mut store = CredentialStore::new(remote);
            handlers::handle_logout(&manager, &mut store)?;
        }
        CliCommand::Whoami => handlers::handle_whoami(&manager)?,
        CliCommand::List => {
            let mut store = attach_store(&manager, remote)?;
            handlers::handle_list(&mut store).await?;
        }
        CliCommand::Get { id } => {
            let mut store = attach_store(&manager, remote)?;
            handlers::handle_get(&mut store, &id).await?;
        }
        CliCommand::Add { service, login, url, notes, generate } => {
            let mut store = attach_store(&manager, remote)?;
            handlers::handle_add(
                &mut store,
                service,
                login,
                url,
                notes,
                generate,
                config.default_password_length,
            )
            .await?;
        }
        CliCommand::Update { id, service, login, url, notes, secret } => {
            let mut store = attach_store(&manager, remote)?;
            handlers::handle_update(&mut store, &id, service, login, url, notes, secret).await?;
        }
        CliCommand::Delete { id } => {
            let mut store = attach_store(&manager, remote)?;
            handlers::handle_delete(&mut store, &id).await?;
        }
        CliCommand::Generate { length, no_uppercase, no_numbers, no_symbols } => {
            handlers::handle_generate(
                length,
                no_uppercase,
                no_numbers,
                no_symbols,
                config.default_password_length,
            )?;
        }
        CliCommand::Strength { password } => handlers::handle_strength(password)?,
        CliCommand::Breach { email } => handlers::handle_breach(&email)?,
    }

    Ok(())
}
