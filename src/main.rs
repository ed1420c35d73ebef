// src/main.rs — studydesk entry point

use clap::Parser;

use studydesk::cli::context::AppContext;
use studydesk::cli::{account, browse, records, status, Cli, Commands};
use studydesk::client::types::{ProfileUpdate, ProgressUpdate};
use studydesk::infra::config::Config;
use studydesk::infra::logger;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging (respects RUST_LOG)
    logger::init_logging(if cli.verbose { "debug" } else { "warn" });

    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Load config (falls back to defaults if no config.toml)
    let config = if let Some(ref path) = cli.config {
        Config::load_from(std::path::Path::new(path))?.with_env_overrides()
    } else {
        Config::load()?
    };

    let ctx = AppContext::init(config).await?;

    match cli.command {
        Commands::Login { email, password } => account::run_login(&ctx, &email, password).await,
        Commands::Register {
            name,
            email,
            grade,
            password,
        } => account::run_register(&ctx, &name, &email, grade.as_deref(), password).await,
        Commands::Logout => account::run_logout(&ctx).await,
        Commands::Whoami => account::run_whoami(&ctx),
        Commands::Profile {
            name,
            email,
            phone,
            location,
            bio,
        } => {
            let update = ProfileUpdate {
                name,
                email,
                phone,
                location,
                bio,
            };
            account::run_profile(&ctx, update).await
        }
        Commands::Password => account::run_change_password(&ctx).await,
        Commands::Courses { category } => browse::run_courses(&ctx, category.as_deref()).await,
        Commands::Course { id } => browse::run_course(&ctx, &id).await,
        Commands::Chapter { id } => browse::run_chapter(&ctx, &id).await,
        Commands::Progress {
            course,
            chapter,
            percentage,
        } => {
            let update = course.map(|course_id| ProgressUpdate {
                course_id,
                chapter_id: chapter,
                percentage,
                study_hours: None,
            });
            browse::run_progress(&ctx, update).await
        }
        Commands::Dashboard => browse::run_dashboard(&ctx).await,
        Commands::Bookmarks { action } => browse::run_bookmarks(&ctx, action).await,
        Commands::Notes { action } => records::run_notes(&ctx, action).await,
        Commands::Quiz { action } => records::run_quiz(&ctx, action).await,
        Commands::Status => status::show_status(&ctx).await,
    }
}
