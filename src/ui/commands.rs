use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

use super::app::{App, InputMode};
use crate::form::build_transaction;
use crate::models::{Category, Currency};
use crate::store::Store;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &Store) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit CoinKeeper", cmd_quit, r);
    register_command!("quit", "Quit CoinKeeper", cmd_quit, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Add transaction (e.g. :add 20 Food 2024-01-01)",
        cmd_add,
        r
    );
    register_command!("a", "Add transaction (e.g. :a 4.50 Other 2024-01-02)", cmd_add, r);
    register_command!("delete", "Delete selected transaction", cmd_delete, r);
    register_command!("del", "Delete selected transaction", cmd_delete, r);
    register_command!(
        "currency",
        "Set display currency (e.g. :currency EUR, no code opens picker)",
        cmd_currency,
        r
    );
    register_command!("cur", "Set display currency (e.g. :cur JPY)", cmd_currency, r);
    register_command!(
        "export",
        "Export transactions to CSV (e.g. :export ~/coinkeeper.csv)",
        cmd_export,
        r
    );
    register_command!("today", "Fill the form date with today", cmd_today, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, store: &Store) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if cmd_name.is_empty() {
        return Ok(());
    }

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, store)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _store: &Store) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _store: &Store) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, store: &Store) -> anyhow::Result<()> {
    let parts: Vec<&str> = args.split_whitespace().collect();
    let [amount, category, date] = parts.as_slice() else {
        app.set_status("Usage: :add <amount> <category> <YYYY-MM-DD>");
        return Ok(());
    };

    let Some(category) = Category::parse(category) else {
        let names: Vec<&str> = Category::all().iter().map(|c| c.as_str()).collect();
        app.set_status(format!(
            "Unknown category '{category}'. Use one of: {}",
            names.join(", ")
        ));
        return Ok(());
    };

    match build_transaction(amount, category, date) {
        Ok(txn) => {
            let shown = app.currency.format(txn.amount);
            app.add_transaction(txn, store)?;
            app.set_status(format!("Added {shown} to {category}"));
        }
        Err(e) => app.set_status(format!("Not added: {e}")),
    }
    Ok(())
}

fn cmd_delete(_args: &str, app: &mut App, _store: &Store) -> anyhow::Result<()> {
    app.request_delete();
    Ok(())
}

fn cmd_currency(args: &str, app: &mut App, store: &Store) -> anyhow::Result<()> {
    if args.is_empty() {
        app.open_picker();
        return Ok(());
    }
    match Currency::parse(args) {
        Some(currency) => app.select_currency(currency, store),
        None => app.set_status(format!("Unknown currency: {args}")),
    }
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, _store: &Store) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        default_export_path()
    } else {
        PathBuf::from(crate::export::expand_home(args))
    };

    match crate::export::export_to_path(app.ledger.transactions(), &path) {
        Ok(count) => app.set_status(format!(
            "Exported {count} transactions to {}",
            path.display()
        )),
        Err(e) => app.set_status(format!("Export failed: {e:#}")),
    }
    Ok(())
}

fn cmd_today(_args: &str, app: &mut App, _store: &Store) -> anyhow::Result<()> {
    app.form.fill_date(chrono::Local::now().date_naive());
    app.form.focus = crate::form::FormField::Date;
    app.input_mode = InputMode::Form;
    Ok(())
}

pub(crate) fn default_export_path() -> PathBuf {
    let home = directories::BaseDirs::new()
        .map(|d| d.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    home.join("coinkeeper-export.csv")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use rust_decimal_macros::dec;

    use super::*;

    fn setup() -> (App, Store) {
        let store = Store::open_in_memory().unwrap();
        (App::load(&store), store)
    }

    #[test]
    fn test_add_command() {
        let (mut app, store) = setup();
        handle_command("add 20 food 2024-01-01", &mut app, &store).unwrap();
        assert_eq!(app.ledger.len(), 1);
        assert_eq!(app.ledger.transactions()[0].amount, dec!(20));
        assert_eq!(app.ledger.transactions()[0].category, Category::Food);
        assert_eq!(app.status_message, "Added $20.00 to Food");
    }

    #[test]
    fn test_add_command_reports_bad_input() {
        let (mut app, store) = setup();
        handle_command("add -5 Food 2024-01-01", &mut app, &store).unwrap();
        assert!(app.ledger.is_empty());
        assert!(app.status_message.starts_with("Not added"));

        handle_command("add 5 Travel 2024-01-01", &mut app, &store).unwrap();
        assert!(app.status_message.starts_with("Unknown category"));

        handle_command("add 1e28 Food 2024-01-01", &mut app, &store).unwrap();
        assert_eq!(
            app.status_message,
            "Not added: amount must not exceed 999999999999.99"
        );

        handle_command("add 5", &mut app, &store).unwrap();
        assert!(app.status_message.starts_with("Usage"));
        assert!(app.ledger.is_empty());
    }

    #[test]
    fn test_currency_command() {
        let (mut app, store) = setup();
        handle_command("cur eur", &mut app, &store).unwrap();
        assert_eq!(app.currency, Currency::Eur);

        handle_command("currency XYZ", &mut app, &store).unwrap();
        assert_eq!(app.currency, Currency::Eur);
        assert_eq!(app.status_message, "Unknown currency: XYZ");

        handle_command("currency", &mut app, &store).unwrap();
        assert_eq!(app.input_mode, InputMode::Picker);
    }

    #[test]
    fn test_quit_command() {
        let (mut app, store) = setup();
        handle_command("q", &mut app, &store).unwrap();
        assert!(!app.running);
    }

    #[test]
    fn test_unknown_command_suggests() {
        let (mut app, store) = setup();
        handle_command("exprot", &mut app, &store).unwrap();
        assert_eq!(
            app.status_message,
            "Unknown command: :exprot. Did you mean :export?"
        );
    }

    #[test]
    fn test_export_command_writes_file() {
        let (mut app, store) = setup();
        handle_command("add 3 Bills 2024-01-01", &mut app, &store).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        handle_command(&format!("export {}", path.display()), &mut app, &store).unwrap();
        assert!(app.status_message.starts_with("Exported 1 transactions"));
        assert!(path.exists());
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("same", "same"), 0);
    }
}
