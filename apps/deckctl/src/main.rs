use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use deckcore_config::default_settings_path;
use deckcore_query::{SortKey, SortOrder};
use deckcore_store::Strategy;
use deckd::AppService;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: deckctl [--settings PATH] [--library PATH] [--category ID] \
[--search TEXT] [--sort name|date|size|type] [--desc] [--auto artist,kind,year,genre] \
[--counts] [--json]";

#[derive(Debug, Default)]
struct Args {
    settings: Option<PathBuf>,
    library: Option<PathBuf>,
    category: Option<String>,
    search: Option<String>,
    sort: Option<SortKey>,
    descending: bool,
    auto: Vec<Strategy>,
    counts: bool,
    json: bool,
}

fn parse_strategies(value: &str) -> Result<Vec<Strategy>> {
    value
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| Strategy::parse(part).with_context(|| format!("unknown strategy {part:?}")))
        .collect()
}

fn parse_args(raw: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut args = Args::default();
    let mut raw = raw.into_iter();

    while let Some(arg) = raw.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };
        let mut value = |name: &str| -> Result<String> {
            match inline.clone() {
                Some(v) => Ok(v),
                None => raw.next().with_context(|| format!("{name} needs a value")),
            }
        };

        match flag.as_str() {
            "--settings" => args.settings = Some(PathBuf::from(value("--settings")?)),
            "--library" => args.library = Some(PathBuf::from(value("--library")?)),
            "--category" => args.category = Some(value("--category")?),
            "--search" => args.search = Some(value("--search")?),
            "--sort" => {
                let key = value("--sort")?;
                args.sort = Some(key.parse()?);
            }
            "--auto" => args.auto = parse_strategies(&value("--auto")?)?,
            "--desc" => args.descending = true,
            "--counts" => args.counts = true,
            "--json" => args.json = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other => bail!("unexpected argument {other:?}\n{USAGE}"),
        }
    }

    Ok(args)
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "deckctl=info,deckd=info,deckcore_store=info".into()),
        )
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = parse_args(env::args().skip(1))?;

    let settings_path = args.settings.clone().unwrap_or_else(default_settings_path);
    let mut service = AppService::from_settings_path(&settings_path)
        .with_context(|| format!("loading settings from {}", settings_path.display()))?;

    if let Some(library) = &args.library {
        service
            .import_snapshot(library)
            .with_context(|| format!("importing library {}", library.display()))?;
    }

    if !args.auto.is_empty() {
        let created = service.auto_categorize(&args.auto);
        info!(created, "Auto-categorization finished");
    }

    let store = service.store_mut();
    if let Some(category) = args.category {
        store.set_selected_category(category);
    }
    if let Some(search) = args.search {
        store.set_search_query(search);
    }
    if let Some(sort) = args.sort {
        store.set_sort_by(sort);
    }
    if args.descending {
        store.set_sort_order(SortOrder::Desc);
    }

    let now = Utc::now();
    if args.counts {
        let store = service.store();
        for (category, count) in store.sidebar_counts(now).iter() {
            println!("{}\t{count}", category.id());
        }
        for category in store.categories() {
            let live = store.category_live_count(&category.id).unwrap_or(category.count);
            println!("{}\t{live}\t{}", category.id, category.name);
        }
        return Ok(());
    }

    let view = service.current_view(now);
    if args.json {
        println!("{}", serde_json::to_string_pretty(view)?);
        return Ok(());
    }
    if view.show_favorite_clips {
        info!("Favorite clips selected; listing every file");
    }
    for item in &view.items {
        let star = if item.is_favorite { "*" } else { " " };
        println!(
            "{star} {}\t{}\t{}\t{}",
            item.file_id, item.kind, item.size, item.display_name
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn parses_flags_and_values() {
        let parsed = args(&["--category", "videos", "--sort=size", "--desc", "--auto", "artist,type"]).unwrap();
        assert_eq!(parsed.category.as_deref(), Some("videos"));
        assert_eq!(parsed.sort, Some(SortKey::Size));
        assert!(parsed.descending);
        assert_eq!(parsed.auto, vec![Strategy::Artist, Strategy::Kind]);
    }

    #[test]
    fn rejects_unknown_input() {
        assert!(args(&["--bogus"]).is_err());
        assert!(args(&["--auto", "mood"]).is_err());
        assert!(args(&["--search"]).is_err());
    }
}
