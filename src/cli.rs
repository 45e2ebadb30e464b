// File: ./src/cli.rs
//! Shared command-line interface logic: argument parsing and help text.
use crate::filter::{DateShortcut, ListingPage};
use crate::model::EventDraft;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShowMore {
    /// Press "show more" this many times.
    Times(usize),
    All,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List {
        page: ListingPage,
        search: Option<String>,
        free_only: bool,
        date: Option<DateShortcut>,
        more: Option<ShowMore>,
    },
    Highlights,
    Pending,
    Propose(EventDraft),
    Publish(String),
    Remove(String),
    Favorite(String),
    Favorites,
    Show(String),
    /// Replace the local catalog with the events in a JSON file.
    Import(PathBuf),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub root: Option<PathBuf>,
    pub verbose: bool,
    pub command: Command,
}

fn take_value(args: &[String], i: &mut usize, flag: &str) -> Result<String, String> {
    *i += 1;
    args.get(*i)
        .cloned()
        .ok_or_else(|| format!("Missing value for {}", flag))
}

/// Parses everything after the binary name.
pub fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut root: Option<PathBuf> = None;
    let mut verbose = false;
    let mut rest: Vec<String> = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--root" | "-r" => root = Some(take_value(args, &mut i, "--root")?.into()),
            "--verbose" | "-v" => verbose = true,
            "--help" | "-h" if rest.is_empty() => rest.push("help".to_string()),
            _ => rest.push(args[i].clone()),
        }
        i += 1;
    }

    let command = match rest.first().map(String::as_str) {
        None | Some("list") => parse_list(rest.get(1..).unwrap_or_default())?,
        Some("highlights") => Command::Highlights,
        Some("pending") => Command::Pending,
        Some("favorites") => Command::Favorites,
        Some("propose") => Command::Propose(parse_propose(&rest[1..])?),
        Some("import") => Command::Import(
            rest.get(1)
                .map(PathBuf::from)
                .ok_or_else(|| "'import' needs a JSON file".to_string())?,
        ),
        Some(cmd @ ("show" | "publish" | "remove" | "favorite")) => {
            let id = rest
                .get(1)
                .cloned()
                .ok_or_else(|| format!("'{}' needs an event id", cmd))?;
            match cmd {
                "show" => Command::Show(id),
                "publish" => Command::Publish(id),
                "remove" => Command::Remove(id),
                _ => Command::Favorite(id),
            }
        }
        Some("help") => Command::Help,
        Some(other) => return Err(format!("Unknown command '{}'", other)),
    };

    Ok(CliArgs {
        root,
        verbose,
        command,
    })
}

fn parse_list(args: &[String]) -> Result<Command, String> {
    let mut page = ListingPage::default();
    let mut search = None;
    let mut free_only = false;
    let mut date = None;
    let mut more = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--page" | "-p" => {
                let name = take_value(args, &mut i, "--page")?;
                page = ListingPage::from_name(&name)
                    .ok_or_else(|| format!("Unknown page '{}'", name))?;
            }
            "--search" | "-s" => search = Some(take_value(args, &mut i, "--search")?),
            "--free" => free_only = true,
            "--today" => date = Some(DateShortcut::Today),
            "--tomorrow" => date = Some(DateShortcut::Tomorrow),
            "--next-week" => date = Some(DateShortcut::NextWeek),
            "--all" => more = Some(ShowMore::All),
            "--more" => {
                let n = take_value(args, &mut i, "--more")?;
                let n = n
                    .parse::<usize>()
                    .map_err(|_| format!("--more expects a number, got '{}'", n))?;
                more = Some(ShowMore::Times(n));
            }
            other => return Err(format!("Unknown option for list: '{}'", other)),
        }
        i += 1;
    }

    Ok(Command::List {
        page,
        search,
        free_only,
        date,
        more,
    })
}

fn parse_propose(args: &[String]) -> Result<EventDraft, String> {
    let mut draft = EventDraft::default();
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].clone();
        let value = take_value(args, &mut i, &flag)?;
        match flag.as_str() {
            "--title" => draft.title = value,
            "--location" => draft.location = value,
            "--description" => draft.description = value,
            "--start" => draft.date_start = value,
            "--end" => draft.date_end = value,
            "--price" => draft.price = value,
            "--category" => draft.category = value,
            "--image" => draft.image = value,
            "--tag" => draft.tags.push(value),
            "--article" => draft.article = Some(value),
            other => return Err(format!("Unknown option for propose: '{}'", other)),
        }
        i += 1;
    }
    Ok(draft)
}

pub fn print_help(binary_name: &str) {
    println!(
        "Eventdeck v{} - Browse, filter and propose local events",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [--root <path>] [--verbose] <command>", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -v, --verbose         Log at debug level regardless of config.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("COMMANDS:");
    println!("    list                  List published events (default command)");
    println!("        --page <name>         home, activities, culture or food");
    println!("        --search <text>       Match title, location or tags");
    println!("        --free                Only free entry");
    println!("        --today | --tomorrow | --next-week");
    println!("        --more <n>            Press \"show more\" n times");
    println!("        --all                 Show every match");
    println!("    show <id>             Full description and article of one event");
    println!("    highlights            A few random published events");
    println!("    pending               Events awaiting review");
    println!("    propose               Submit an event for review");
    println!("        --title --location --description --price <text>");
    println!("        --start <YYYY-MM-DD> --end <YYYY-MM-DD>");
    println!("        --category <foods|activities|cultures>");
    println!("        [--tag <tag>]... [--image <url>] [--article <text>]");
    println!("    publish <id>          Approve a pending event");
    println!("    remove <id>           Delete an event");
    println!("    favorite <id>         Add or remove an event from your favourites");
    println!("    favorites             List your favourites (needs user_email)");
    println!("    import <file>         Replace the local catalog with a JSON event list");
    println!();
    println!("EXAMPLES:");
    println!("    {} list --page food --free --next-week", binary_name);
    println!("    {} list --search concerto --all", binary_name);
    println!(
        "    {} propose --title Sagra --location Piazza --description \"...\" \\",
        binary_name
    );
    println!("        --start 2024-06-10 --end 2024-06-12 --price 0 --category foods");
    println!();
    println!("CONFIG:");
    println!("    backend_url, user_email, page_size, highlight_count, preview_words,");
    println!("    request_timeout_secs, log_level (in config.toml)");
}
