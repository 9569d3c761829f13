mod config;
mod insights;
mod logging;
mod models;
mod run;
mod store;
mod ui;
mod validate;

use anyhow::Result;

use config::Config;
use logging::LogTarget;

fn main() -> Result<()> {
    let (args, config_flag) = split_config_flag(std::env::args().collect())?;

    let target = if args.len() > 1 {
        LogTarget::Stderr
    } else {
        LogTarget::File
    };
    logging::init(target);

    let source = Config::locate(config_flag.as_deref());
    let config = Config::load(&source)?;
    tracing::info!(
        source = ?source,
        categories = config.categories.len(),
        "loaded config"
    );

    let mut store = config.build_store();
    store.subscribe(logging::log_event);

    match args.len() {
        1 => run::as_tui(&mut store),
        2.. => run::as_cli(&args, &store, &source),
        _ => {
            eprintln!("Usage: budget-manager [--config <path>] [command]");
            Ok(())
        }
    }
}

/// Pull `--config <path>` out of the argument list so the remaining arguments
/// are just the program name and an optional command.
fn split_config_flag(args: Vec<String>) -> Result<(Vec<String>, Option<String>)> {
    let mut rest = Vec::with_capacity(args.len());
    let mut config = None;
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            let path = iter
                .next()
                .ok_or_else(|| anyhow::anyhow!("--config requires a path"))?;
            config = Some(path);
        } else if let Some(path) = arg.strip_prefix("--config=") {
            config = Some(path.to_string());
        } else {
            rest.push(arg);
        }
    }
    Ok((rest, config))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::split_config_flag;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn config_flag_is_removed_from_args() {
        let (rest, path) =
            split_config_flag(args(&["budget-manager", "--config", "b.json", "summary"])).unwrap();
        assert_eq!(rest, args(&["budget-manager", "summary"]));
        assert_eq!(path.as_deref(), Some("b.json"));
    }

    #[test]
    fn config_flag_accepts_equals_form() {
        let (rest, path) = split_config_flag(args(&["budget-manager", "--config=b.json"])).unwrap();
        assert_eq!(rest, args(&["budget-manager"]));
        assert_eq!(path.as_deref(), Some("b.json"));
    }

    #[test]
    fn config_flag_without_path_is_an_error() {
        assert!(split_config_flag(args(&["budget-manager", "--config"])).is_err());
    }

    #[test]
    fn no_flag_leaves_args_untouched() {
        let (rest, path) = split_config_flag(args(&["budget-manager", "insights"])).unwrap();
        assert_eq!(rest, args(&["budget-manager", "insights"]));
        assert!(path.is_none());
    }
}
