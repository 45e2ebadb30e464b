// Binary entry point for the command-line shell.
use anyhow::{Context, Result};
use eventdeck::cli::{self, Command, ShowMore};
use eventdeck::client::{EventBackend, LocalBackend, backend_from_config};
use eventdeck::config::Config;
use eventdeck::context::{AppContext, SharedContext, StandardContext};
use eventdeck::controller::ListingController;
use eventdeck::filter::{FilterCriteria, ListingPage};
use eventdeck::model::{Category, Event};
use eventdeck::model::display::EventDisplay;
use eventdeck::moderation::ModerationDashboard;
use eventdeck::store::EventStore;
use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let parsed = match cli::parse_args(&args) {
        Ok(parsed) => parsed,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            eprintln!("Run 'eventdeck --help' for usage.");
            std::process::exit(2);
        }
    };

    if parsed.command == Command::Help {
        cli::print_help("eventdeck");
        return Ok(());
    }

    let ctx: SharedContext = Arc::new(StandardContext::new(parsed.root.clone()));
    let config = Config::load_or_default(ctx.as_ref())?;

    let level = if parsed.verbose {
        LevelFilter::Debug
    } else {
        config.level_filter()
    };
    init_logging(ctx.as_ref(), level);

    let backend = backend_from_config(&config, ctx.clone())?;
    run(parsed.command, &config, backend, ctx).await
}

fn init_logging(ctx: &dyn AppContext, level: LevelFilter) {
    let log_config = ConfigBuilder::new()
        .add_filter_ignore_str("hyper")
        .add_filter_ignore_str("rustls")
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        log_config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];
    if let Some(path) = ctx.get_log_file_path() {
        match std::fs::OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => loggers.push(WriteLogger::new(level, log_config, file)),
            Err(e) => eprintln!("Warning: cannot open log file {:?}: {}", path, e),
        }
    }
    // Only fails if a logger is already set.
    let _ = CombinedLogger::init(loggers);
}

async fn run(
    command: Command,
    config: &Config,
    backend: Arc<dyn EventBackend>,
    ctx: SharedContext,
) -> Result<()> {
    match command {
        Command::List {
            page,
            search,
            free_only,
            date,
            more,
        } => {
            let controller = ListingController::new(
                page,
                config.page_size,
                backend,
                config.user_email.clone(),
            );
            controller.load().await;
            controller
                .set_criteria(FilterCriteria {
                    search_query: search.unwrap_or_default(),
                    free_only,
                    ..Default::default()
                })
                .await;
            if let Some(shortcut) = date {
                controller.toggle_date_shortcut(shortcut).await;
            }
            match more {
                Some(ShowMore::Times(n)) => {
                    for _ in 0..n {
                        controller.show_more().await;
                    }
                }
                Some(ShowMore::All) => controller.show_all().await,
                None => {}
            }

            let session = controller.session.lock().await;
            if let Some(msg) = session.message() {
                eprintln!("{}", msg);
            }
            println!(
                "{} · {} of {} events",
                page,
                session.visible().len(),
                session.filtered().len()
            );
            for event in session.visible() {
                print_event(event, session.is_favorite(event), config.preview_words);
            }
            if session.has_more() {
                println!("(more available: --more <n> or --all)");
            }
        }
        Command::Show(id) => {
            let event = backend
                .fetch_event(&id)
                .await
                .with_context(|| format!("Failed to load {}", id))?;
            print_event_detail(&event);
        }
        Command::Highlights => {
            let events = backend.fetch_all_events().await?;
            let store = EventStore::new(events);
            let mut rng = fastrand::Rng::new();
            for event in store.highlights(config.highlight_count, &mut rng) {
                print_event(event, false, config.preview_words);
            }
        }
        Command::Pending => {
            let mut dashboard = ModerationDashboard::new(backend);
            dashboard.refresh().await?;
            println!("{} events awaiting review", dashboard.pending().len());
            for event in dashboard.pending() {
                print_event(event, false, config.preview_words);
            }
        }
        Command::Propose(draft) => {
            let controller = ListingController::new(
                ListingPage::Home,
                config.page_size,
                backend,
                config.user_email.clone(),
            );
            let event = controller.submit_proposal(draft).await?;
            println!(
                "Submitted '{}' ({}); it will be listed once reviewed.",
                event.title_or_default(),
                event.id
            );
        }
        Command::Publish(id) => {
            let mut dashboard = ModerationDashboard::new(backend);
            dashboard
                .publish(&id)
                .await
                .with_context(|| format!("Failed to publish {}", id))?;
            println!("Published {}", id);
        }
        Command::Remove(id) => {
            let mut dashboard = ModerationDashboard::new(backend);
            dashboard
                .remove(&id)
                .await
                .with_context(|| format!("Failed to remove {}", id))?;
            println!("Removed {}", id);
        }
        Command::Favorite(id) => {
            let controller = ListingController::new(
                ListingPage::Home,
                config.page_size,
                backend,
                config.user_email.clone(),
            );
            controller.load().await;
            let now_favorite = controller.toggle_favorite(&id).await?;
            println!(
                "{} {} favourites",
                id,
                if now_favorite { "added to" } else { "removed from" }
            );
        }
        Command::Favorites => {
            let controller = ListingController::new(
                ListingPage::Home,
                config.page_size,
                backend,
                config.user_email.clone(),
            );
            let favorites = controller
                .favorites()
                .await
                .context("Set user_email in config.toml to keep favourites")?;
            println!("{} favourites", favorites.len());
            for entry in &favorites {
                let category = entry
                    .color
                    .as_deref()
                    .and_then(Category::from_color)
                    .map(|c| format!("  ({})", c))
                    .unwrap_or_default();
                match entry.id.as_deref() {
                    Some(id) => println!("  {}  [{}]{}", entry.title, id, category),
                    None => println!("  {}{}", entry.title, category),
                }
            }
        }
        Command::Import(path) => {
            if let Some(url) = config.backend_url() {
                anyhow::bail!(
                    "import only fills the local catalog, but backend_url is set to {}",
                    url
                );
            }
            let count = LocalBackend::new(ctx).import_file(&path)?;
            println!("Imported {} events from {}", count, path.display());
        }
        Command::Help => cli::print_help("eventdeck"),
    }
    Ok(())
}

fn print_event(event: &Event, favorite: bool, preview_words: usize) {
    let star = if favorite { "★ " } else { "" };
    println!();
    println!("{}{}  [{}]", star, event.title_or_default(), event.id);
    let mut meta: Vec<String> = Vec::new();
    if let Some(location) = event.location.as_deref() {
        meta.push(location.to_string());
    }
    let dates = event.date_label();
    if !dates.is_empty() {
        meta.push(dates);
    }
    if let Some(price) = event.price_label() {
        meta.push(price);
    }
    if let Some(category) = event.category() {
        meta.push(category.to_string());
    }
    if !meta.is_empty() {
        println!("    {}", meta.join(" · "));
    }
    let preview = event.preview(preview_words);
    if !preview.is_empty() {
        println!("    {}", preview);
    }
}

fn print_event_detail(event: &Event) {
    println!("{}  [{}]", event.title_or_default(), event.id);
    if let Some(long_title) = event.long_title.as_deref() {
        println!("{}", long_title);
    }
    if let Some(location) = event.location.as_deref() {
        println!("Where:    {}", location);
    }
    let dates = event.date_label();
    if !dates.is_empty() {
        println!("When:     {}", dates);
    }
    if let Some(price) = event.price_label() {
        println!("Price:    {}", price);
    }
    if let Some(category) = event.category() {
        println!("Category: {}", category);
    }
    if let Some(tags) = event.tags.as_deref().filter(|t| !t.is_empty()) {
        println!("Tags:     {}", tags.join(", "));
    }
    if let Some(image) = event.image.as_deref() {
        println!("Image:    {}", image);
    }
    if let Some(description) = event.description.as_deref() {
        println!();
        println!("{}", description);
    }
    if let Some(article) = event.article.as_deref() {
        println!();
        println!("{}", article);
    }
}
