use chrono::{Local, NaiveDate};
use clap::Parser;
use std::path::Path;
use travel_diary::application::{
    find_entry, find_orphans, init::init, list_entries, RecordEntryService, Reply, Sticker,
    StoryService, TextStamp,
};
use travel_diary::cli::{format_entry, format_entry_list, markdown_to_text, Cli, Commands};
use travel_diary::domain::{DraftEntry, StickerPlacement};
use travel_diary::error::DiaryError;
use travel_diary::infrastructure::{ChatClient, Config, JsonEntryRepository, StoryTeller};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = run(cli);

    match result {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

/// Log to stderr; RUST_LOG wins over --verbose
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Pick up API keys from `<root>/.env`, then from `.env` files above the cwd
fn load_env(root: &Path) {
    if let Err(e) = dotenvy::from_path(root.join(".env")) {
        if !e.not_found() {
            tracing::warn!(error = %e, "ignoring unreadable .env file");
        }
    }
    let _ = dotenvy::dotenv();
}

fn run(cli: Cli) -> Result<(), DiaryError> {
    let root = match cli.root {
        Some(root) => root,
        None => JsonEntryRepository::discover()?,
    };
    load_env(&root);

    match cli.command {
        Commands::Init { path } => {
            let path = path.unwrap_or(root);
            init(&path)?;
            println!("Initialized travel diary at {}", path.display());
            Ok(())
        }
        Commands::Add {
            location,
            date,
            text,
            photo,
            title,
            sticker,
            sticker_at,
            stamp_text,
            stamp_at,
            font,
            doodle,
            keyword,
            auto_keyword,
        } => {
            if location.trim().is_empty() {
                return Err(DiaryError::InvalidInput(
                    "Location cannot be empty".to_string(),
                ));
            }

            let config = Config::load_from_dir(&root)?;
            let date = resolve_date(date)?;
            let repo = JsonEntryRepository::new(root, &config);
            let service = RecordEntryService::new(repo, config.photo_max_width);

            let mut draft = DraftEntry::new(date, location, text);
            if let Some(title) = title {
                draft = draft.with_memory_title(title);
            }
            if let Some(keyword) = keyword {
                draft = draft.with_keyword(keyword);
            }
            if let Some(photo) = photo {
                let placement = parse_placement(sticker_at)?;
                let sticker = sticker.as_deref().map(|path| Sticker { path, placement });

                let placement = parse_placement(stamp_at)?;
                let text = stamp_text.as_deref().map(|text| TextStamp {
                    text,
                    placement,
                    font: font.as_deref(),
                });

                draft = service.attach_photo(draft, &photo, sticker, text)?;
            }
            if let Some(doodle) = doodle {
                draft = service.attach_doodle(draft, &doodle)?;
            }

            let client = if auto_keyword {
                match ChatClient::from_config(&config.ai) {
                    Ok(client) => Some(client),
                    Err(e) => {
                        tracing::warn!(error = %e, "AI service unavailable, saving without keyword");
                        None
                    }
                }
            } else {
                None
            };
            let teller = client.as_ref().map(|c| c as &dyn StoryTeller);

            let entry = service.execute(draft, teller)?;
            println!(
                "Saved entry {} ({} - {})",
                entry.id, entry.date, entry.location
            );
            Ok(())
        }
        Commands::List {
            limit,
            oldest_first,
        } => {
            let config = Config::load_from_dir(&root)?;
            let repo = JsonEntryRepository::new(root, &config);
            let entries = list_entries(&repo, !oldest_first, limit)?;
            println!("{}", format_entry_list(&entries).trim_end());
            Ok(())
        }
        Commands::Show { id } => {
            let config = Config::load_from_dir(&root)?;
            let repo = JsonEntryRepository::new(root, &config);
            let entry = find_entry(&repo, &id)?;
            print!("{}", format_entry(&entry));
            Ok(())
        }
        Commands::Story {
            id,
            location,
            notes,
        } => {
            let config = Config::load_from_dir(&root)?;
            let (location, notes) = match (id, location) {
                (Some(id), _) => {
                    let repo = JsonEntryRepository::new(root, &config);
                    let entry = find_entry(&repo, &id)?;
                    (entry.location, entry.text)
                }
                (None, Some(location)) => (location, notes.unwrap_or_default()),
                (None, None) => {
                    return Err(DiaryError::InvalidInput(
                        "Give an entry id or --location".to_string(),
                    ));
                }
            };

            let reply = ask(&config, |service| service.story(&location, &notes));
            print_reply(&reply);
            Ok(())
        }
        Commands::Recommend { destination } => {
            let config = Config::load_from_dir(&root)?;
            let reply = ask(&config, |service| service.recommend(&destination));
            print_reply(&reply);
            Ok(())
        }
        Commands::Orphans => {
            let config = Config::load_from_dir(&root)?;
            let repo = JsonEntryRepository::new(root, &config);
            let orphans = find_orphans(&repo)?;
            if orphans.is_empty() {
                println!("No orphaned images");
            } else {
                for path in orphans {
                    println!("{}", path.display());
                }
            }
            Ok(())
        }
        Commands::Config { key, value, list } => {
            let mut config = Config::load_from_dir(&root)?;

            if list {
                for key in Config::keys() {
                    println!("{} = {}", key, config.get(key)?);
                }
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    config.set(&k, &v)?;
                    config.save_to_dir(&root)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", config.get(&k)?);
                }
                Ok(())
            } else {
                println!("Usage: diary config [--list | <key> [<value>]]");
                println!("Valid keys: {}", Config::keys().join(", "));
                Ok(())
            }
        }
    }
}

/// Validate a YYYY-MM-DD date, defaulting to today
fn resolve_date(date: Option<String>) -> Result<String, DiaryError> {
    match date {
        None => Ok(Local::now().date_naive().format("%Y-%m-%d").to_string()),
        Some(value) => NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
            .map(|d| d.format("%Y-%m-%d").to_string())
            .map_err(|_| DiaryError::InvalidDate(value)),
    }
}

fn parse_placement(value: Option<String>) -> Result<StickerPlacement, DiaryError> {
    value.map_or(Ok(StickerPlacement::default()), |value| value.parse())
}

/// Run a request against the configured AI service. A client that cannot
/// even be built is reported the same way as a failed request.
fn ask(config: &Config, request: impl FnOnce(&StoryService<ChatClient>) -> Reply) -> Reply {
    match ChatClient::from_config(&config.ai) {
        Ok(client) => request(&StoryService::new(client)),
        Err(e) => Reply::Fallback(format!("Oopsie! El servicio de IA no está disponible. ({})", e)),
    }
}

fn print_reply(reply: &Reply) {
    match reply {
        Reply::Generated(text) => println!("{}", markdown_to_text(text)),
        Reply::Fallback(message) => eprintln!("{}", message),
    }
}
