// src/cli/handlers.rs
use anyhow::{bail, Result};
use inquire::{Password, PasswordDisplayMode, Text};
use uuid::Uuid;

use crate::core::session::SessionManager;
use crate::core::store::CredentialStore;
use crate::generators::{evaluate_strength, generate_password};
use crate::models::{EntryPatch, GeneratorOptions, NewEntry};
use crate::tools::breach::mock_breach_check;

// Handlers for CLI commands

pub fn handle_register(manager: &SessionManager) -> Result<()> {
    let name = Text::new("Name:").prompt()?;
    let email = Text::new("Email:").prompt()?;

    let password = Password::new("Account password:")
        .with_display_mode(PasswordDisplayMode::Hidden)
        .without_confirmation()
        .prompt()?;
    let confirm = Password::new("Confirm password:")
        .with_display_mode(PasswordDisplayMode::Hidden)
        .without_confirmation()
        .prompt()?;

    if password != confirm {
        println!("❌ Passwords do not match.");
        return Ok(());
    }

    let strength = evaluate_strength(&password);
    println!("Password strength: {} ({}/4)", strength.label, strength.score);

    let session = manager.register(&name, &email, &password)?;
    println!("✅ Registered and logged in as {}", session.principal.email);
    Ok(())
}

pub fn handle_login(manager: &SessionManager) -> Result<()> {
    let email = Text::new("Email:").prompt()?;
    let password = Password::new("Account password:")
        .with_display_mode(PasswordDisplayMode::Hidden)
        .without_confirmation()
        .prompt()?;

    let session = manager.login(&email, &password)?;
    println!("✅ Logged in as {}", session.principal.email);
    Ok(())
}

pub fn handle_logout(manager: &SessionManager, store: &mut CredentialStore) -> Result<()> {
    store.detach();
    manager.logout()?;
    println!("✅ Logged out");
    Ok(())
}

pub fn handle_whoami(manager: &SessionManager) -> Result<()> {
    match manager.current()? {
        Some(session) => {
            println!("{} <{}>", session.principal.name, session.principal.email);
            println!("id: {}", session.principal.id);
        }
        None => println!("Not logged in."),
    }
    Ok(())
}

pub async fn handle_list(store: &mut CredentialStore) -> Result<()> {
    if !store.load().await {
        bail!("failed to load entries: {}", store.last_error().unwrap_or("unknown error"));
    }

    if store.entries().is_empty() {
        println!("No entries stored.");
        return Ok(());
    }

    for entry in store.entries() {
        println!("{}  {:<20} {}", entry.id, entry.service_name, entry.login_identifier);
    }
    Ok(())
}

pub async fn handle_get(store: &mut CredentialStore, id: &str) -> Result<()> {
    let id = Uuid::parse_str(id)?;

    if !store.load().await {
        bail!("failed to load entries: {}", store.last_error().unwrap_or("unknown error"));
    }

    let Some(entry) = store.get(id) else {
        bail!("no entry with id {id}");
    };

    println!("Service:  {}", entry.service_name);
    println!("Login:    {}", entry.login_identifier);
    println!("Secret:   {}", entry.secret);
    if let Some(url) = &entry.url {
        println!("URL:      {url}");
    }
    if let Some(notes) = &entry.notes {
        println!("Notes:    {notes}");
    }
    println!("Created:  {}", entry.created_at.to_rfc3339());
    println!("Updated:  {}", entry.updated_at.to_rfc3339());
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub async fn handle_add(
    store: &mut CredentialStore,
    service: String,
    login: String,
    url: Option<String>,
    notes: Option<String>,
    generate: bool,
    default_length: usize,
) -> Result<()> {
    let secret = if generate {
        let options = GeneratorOptions { length: default_length, ..Default::default() };
        let secret = generate_password(&options);
        println!("Generated secret: {secret}");
        secret
    } else {
        Password::new("Secret for this entry:")
            .with_display_mode(PasswordDisplayMode::Hidden)
            .without_confirmation()
            .prompt()?
    };

    let strength = evaluate_strength(&secret);
    println!("Secret strength: {} ({}/4)", strength.label, strength.score);

    if !store.load().await {
        bail!("failed to load entries: {}", store.last_error().unwrap_or("unknown error"));
    }
    let fields = NewEntry { service_name: service, login_identifier: login, secret, url, notes };
    if !store.add(fields).await {
        bail!("failed to add entry: {}", store.last_error().unwrap_or("unknown error"));
    }

    // Confirm-then-apply: the entry we just pushed is the remote's
    // acknowledged record, id and timestamps included.
    if let Some(entry) = store.entries().last() {
        println!("✅ Added {} ({})", entry.service_name, entry.id);
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub async fn handle_update(
    store: &mut CredentialStore,
    id: &str,
    service: Option<String>,
    login: Option<String>,
    url: Option<String>,
    notes: Option<String>,
    prompt_secret: bool,
) -> Result<()> {
    let id = Uuid::parse_str(id)?;

    let secret = if prompt_secret {
        let secret = Password::new("New secret:")
            .with_display_mode(PasswordDisplayMode::Hidden)
            .without_confirmation()
            .prompt()?;
        let strength = evaluate_strength(&secret);
        println!("Secret strength: {} ({}/4)", strength.label, strength.score);
        Some(secret)
    } else {
        None
    };

    if !store.load().await {
        bail!("failed to load entries: {}", store.last_error().unwrap_or("unknown error"));
    }
    let patch = EntryPatch {
        service_name: service,
        login_identifier: login,
        secret,
        url,
        notes,
    };
    if !store.update(id, patch).await {
        bail!("failed to update entry: {}", store.last_error().unwrap_or("unknown error"));
    }

    println!("✅ Updated {id}");
    Ok(())
}

pub async fn handle_delete(store: &mut CredentialStore, id: &str) -> Result<()> {
    let id = Uuid::parse_str(id)?;

    if !store.load().await {
        bail!("failed to load entries: {}", store.last_error().unwrap_or("unknown error"));
    }
    if !store.delete(id).await {
        bail!("failed to delete entry: {}", store.last_error().unwrap_or("unknown error"));
    }

    println!("✅ Deleted {id}");
    Ok(())
}

pub fn handle_generate(
    length: Option<usize>,
    no_uppercase: bool,
    no_numbers: bool,
    no_symbols: bool,
    default_length: usize,
) -> Result<()> {
    let options = GeneratorOptions {
        length: length.unwrap_or(default_length),
        include_uppercase: !no_uppercase,
        include_numbers: !no_numbers,
        include_symbols: !no_symbols,
    };

    let password = generate_password(&options);
    let strength = evaluate_strength(&password);
    println!("{password}");
    println!("Strength: {} ({}/4)", strength.label, strength.score);
    Ok(())
}

pub fn handle_strength(password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => Password::new("Password to score:")
            .with_display_mode(PasswordDisplayMode::Hidden)
            .without_confirmation()
            .prompt()?,
    };

    let strength = evaluate_strength(&password);
    println!("Strength: {} ({}/4)", strength.label, strength.score);
    Ok(())
}

pub fn handle_breach(email: &str) -> Result<()> {
    let report = mock_breach_check(email);
    if report.breached {
        println!("❌ {} found in {} breach(es): {}", report.email, report.count, report.services.join(", "));
    } else {
        println!("✅ {} not found in any known breach", report.email);
    }
    println!("(mock result - not a real breach lookup)");
    Ok(())
}
