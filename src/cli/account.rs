// src/cli/account.rs — login, register, logout, whoami, profile, password

use anyhow::Context;

use super::context::AppContext;
use crate::client::types::{PasswordChange, ProfileUpdate};
use crate::session::User;

fn prompt_password(label: &str) -> anyhow::Result<String> {
    let password = inquire::Password::new(label)
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("password prompt cancelled")?;
    Ok(password)
}

fn print_user(user: &User) {
    println!("  Name:   {}", user.name);
    println!("  Email:  {}", user.email);
    println!("  Role:   {}", user.role);
    println!("  Grade:  {}", user.grade);
    if let Some(avatar) = &user.avatar {
        println!("  Avatar: {avatar}");
    }
}

pub async fn run_login(ctx: &AppContext, email: &str, password: Option<String>) -> anyhow::Result<()> {
    if email.trim().is_empty() {
        anyhow::bail!("Email is required.");
    }
    let password = match password {
        Some(p) => p,
        None => prompt_password("Password:")?,
    };
    let user = ctx.sessions.login(email.trim(), &password).await?;
    println!("Logged in as {}.", user.name);
    Ok(())
}

pub async fn run_register(
    ctx: &AppContext,
    name: &str,
    email: &str,
    grade: Option<&str>,
    password: Option<String>,
) -> anyhow::Result<()> {
    if name.trim().is_empty() || email.trim().is_empty() {
        anyhow::bail!("Name and email are required.");
    }
    let password = match password {
        Some(p) => p,
        None => inquire::Password::new("Password:")
            .with_display_mode(inquire::PasswordDisplayMode::Masked)
            .prompt()
            .context("password prompt cancelled")?,
    };
    let user = ctx
        .sessions
        .register(name.trim(), email.trim(), &password, grade)
        .await?;
    println!("Welcome, {}! Your account is ready.", user.name);
    Ok(())
}

pub async fn run_logout(ctx: &AppContext) -> anyhow::Result<()> {
    let was_logged_in = ctx.sessions.is_authenticated();
    ctx.sessions.logout().await?;
    if was_logged_in {
        println!("Logged out.");
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

pub fn run_whoami(ctx: &AppContext) -> anyhow::Result<()> {
    match ctx.sessions.current_user() {
        Some(user) => {
            print_user(&user);
            Ok(())
        }
        None => {
            println!("Not logged in.");
            Ok(())
        }
    }
}

pub async fn run_profile(ctx: &AppContext, update: ProfileUpdate) -> anyhow::Result<()> {
    ctx.require_login()?;
    if update.is_empty() {
        return run_whoami(ctx);
    }
    let user = ctx.api.update_profile(&update).await?;
    println!("Profile updated.");
    print_user(&user);
    Ok(())
}

pub async fn run_change_password(ctx: &AppContext) -> anyhow::Result<()> {
    ctx.require_login()?;
    let current_password = prompt_password("Current password:")?;
    let new_password = inquire::Password::new("New password:")
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .prompt()
        .context("password prompt cancelled")?;
    ctx.api
        .change_password(&PasswordChange {
            current_password,
            new_password,
        })
        .await?;
    println!("Password changed.");
    Ok(())
}
