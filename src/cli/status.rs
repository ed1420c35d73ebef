// src/cli/status.rs — Configuration, storage and session summary

use super::context::AppContext;
use crate::infra::paths;
use crate::records::RecordKind;
use crate::storage::schema;

pub async fn show_status(ctx: &AppContext) -> anyhow::Result<()> {
    println!("studydesk v{}", env!("CARGO_PKG_VERSION"));
    println!();

    let config_path = paths::config_file_path()?;
    if config_path.exists() {
        println!("  Config:     {} (loaded)", config_path.display());
    } else {
        println!("  Config:     (using defaults)");
    }
    println!("  API:        {}", ctx.api.base_url());

    let db_path = ctx.config.storage.resolve_path()?;
    match &ctx.db {
        Some(db) => {
            let size = std::fs::metadata(&db_path).map(|m| m.len()).unwrap_or(0);
            println!("  Database:   {} ({})", db_path.display(), format_bytes(size));
            println!(
                "  Schema:     v{} (latest v{})",
                db.schema_version()?,
                schema::latest_version()
            );
            println!("  Keys:       {}", db.keys()?.join(", "));
        }
        None => println!("  Database:   (not opened)"),
    }

    for kind in RecordKind::ALL {
        match ctx.records.count(kind).await {
            Ok(n) => println!("  {:<11} {n}", format!("{kind}:")),
            Err(e) => println!("  {:<11} unreadable ({e})", format!("{kind}:")),
        }
    }

    match ctx.sessions.current_user() {
        Some(user) => println!("  Session:    {} <{}>", user.name, user.email),
        None => println!("  Session:    (not logged in)"),
    }
    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    match bytes {
        b if b < 1024 => format!("{b} B"),
        b if b < 1024 * 1024 => format!("{:.1} KB", b as f64 / 1024.0),
        b => format!("{:.1} MB", b as f64 / (1024.0 * 1024.0)),
    }
}
