//! Interactive session commands: login, logout, status, whoami

use std::sync::Arc;

use anyhow::{bail, Result};

use crate::api::{self, client::SilentExpiry, error::ApiError};
use crate::auth::SessionStore;
use crate::config::{self, Config};

/// Sign in and persist tokens. A rejected login is reported as bad
/// credentials rather than as an expired session, so the client is built
/// with a quiet expiry handler here.
pub async fn login(username: String, password: String) -> Result<()> {
    let client = api::client_with(Arc::new(SilentExpiry))?;
    let resp = match client.login(&username, &password).await {
        Ok(resp) => resp,
        Err(ApiError::SessionExpired) | Err(ApiError::Http { status: 401, .. }) => {
            bail!("Login failed: invalid username or password")
        }
        Err(err) => return Err(err.into()),
    };

    let name = resp
        .user
        .full_name
        .as_deref()
        .unwrap_or(&resp.user.username);
    println!("Login successful. Signed in as {}.", name);
    Ok(())
}

/// Notify the backend, then drop the local session. The server call is
/// best-effort; local state is cleared even when it fails.
pub async fn logout() -> Result<()> {
    let client = api::client_with(Arc::new(SilentExpiry))?;
    if client.store().access_token().is_some() {
        if let Err(err) = client.logout().await {
            tracing::warn!("Logout request failed: {err}");
        }
    }
    client.store().clear();
    println!("Logged out.");
    Ok(())
}

/// Print local session state without touching the network.
pub fn status() -> Result<()> {
    let config = Config::load()?;

    println!("\nSession status:");
    println!("{:-<60}", "");
    println!("{:<20} {}", "Base URL:", config::resolve_base_url(&config));
    println!(
        "{:<20} {}",
        "Access token:",
        if config.access_token.is_some() {
            "present"
        } else {
            "not set"
        }
    );
    println!(
        "{:<20} {}",
        "Refresh token:",
        if config.refresh_token.is_some() {
            "present"
        } else {
            "not set"
        }
    );
    match config.get_user() {
        Some(user) => println!("{:<20} {} ({})", "Signed in as:", user.username, user.email),
        None => println!("{:<20} none", "Signed in as:"),
    }
    Ok(())
}

/// Ask the backend who the current token belongs to.
pub async fn whoami() -> Result<()> {
    let client = api::client()?;
    let user = client.me().await?;

    println!("\nSigned-in user:");
    println!("{:-<60}", "");
    println!("{:<20} {}", "Username:", user.username);
    println!("{:<20} {}", "Email:", user.email);
    if let Some(name) = &user.full_name {
        println!("{:<20} {}", "Full name:", name);
    }
    if let Some(role) = &user.role {
        println!("{:<20} {}", "Role:", role);
    }
    if let Some(last) = &user.last_login {
        println!("{:<20} {}", "Last login:", last);
    }
    Ok(())
}

pub async fn change_password(old: String, new: String) -> Result<()> {
    let client = api::client()?;
    let ack = client.change_password(&old, &new).await?;
    println!(
        "{}",
        ack.message.as_deref().unwrap_or("Password changed.")
    );
    Ok(())
}
