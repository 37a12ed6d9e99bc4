use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

use super::app::{App, InputMode, PendingAction, Screen};
use super::form::Form;
use crate::dashboard::{page_count, SIMULATION_PAGE_SIZE};
use crate::db::Database;
use crate::models::Series;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &Database) -> anyhow::Result<()>,
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

    register_command!("q", "Quit Migas", cmd_quit, r);
    register_command!("quit", "Quit Migas", cmd_quit, r);
    register_command!("b", "Go to Beranda", cmd_beranda, r);
    register_command!("beranda", "Go to Beranda", cmd_beranda, r);
    register_command!("cp", "Go to CP Aramco", cmd_cp, r);
    register_command!("kurs", "Go to Kurs", cmd_kurs, r);
    register_command!("nasional", "Go to LPG Nasional", cmd_nasional, r);
    register_command!("provinsi", "Go to LPG Provinsi", cmd_provinsi, r);
    register_command!(
        "add",
        "New record (e.g. :add kurs, default current tab)",
        cmd_add,
        r
    );
    register_command!("a", "New record", cmd_add, r);
    register_command!("edit", "Edit selected record", cmd_edit, r);
    register_command!("e", "Edit selected record", cmd_edit, r);
    register_command!("delete", "Delete selected record", cmd_delete, r);
    register_command!("refresh", "Reload every series now", cmd_refresh, r);
    register_command!("r", "Reload every series now", cmd_refresh, r);
    register_command!(
        "export",
        "Export a series to CSV (e.g. :export kurs ~/kurs.csv)",
        cmd_export,
        r
    );
    register_command!(
        "page",
        "Jump to a simulation table page (e.g. :page 2)",
        cmd_page,
        r
    );
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, db: &Database) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, db)?;
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
        .min_by_key(|k| levenshtein(input, k))
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

fn cmd_quit(_args: &str, app: &mut App, _db: &Database) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_beranda(_args: &str, app: &mut App, _db: &Database) -> anyhow::Result<()> {
    app.switch_screen(Screen::Beranda);
    Ok(())
}

fn cmd_cp(_args: &str, app: &mut App, _db: &Database) -> anyhow::Result<()> {
    app.switch_screen(Screen::CpAramco);
    Ok(())
}

fn cmd_kurs(_args: &str, app: &mut App, _db: &Database) -> anyhow::Result<()> {
    app.switch_screen(Screen::Kurs);
    Ok(())
}

fn cmd_nasional(_args: &str, app: &mut App, _db: &Database) -> anyhow::Result<()> {
    app.switch_screen(Screen::LpgNasional);
    Ok(())
}

fn cmd_provinsi(_args: &str, app: &mut App, _db: &Database) -> anyhow::Result<()> {
    app.switch_screen(Screen::LpgProvinsi);
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _db: &Database) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

/// Series named in `args`, or the one on the current tab.
fn target_series(args: &str, app: &App) -> Result<Series, String> {
    let name = args.split_whitespace().next().unwrap_or("");
    if name.is_empty() {
        return Ok(app.screen.series());
    }
    Series::parse(name).ok_or_else(|| {
        format!("Unknown series '{name}'. Use cp-aramco, kurs, lpg-nasional, lpg-provinsi or simulasi")
    })
}

pub(crate) fn cmd_add(args: &str, app: &mut App, _db: &Database) -> anyhow::Result<()> {
    let series = match target_series(args, app) {
        Ok(series) => series,
        Err(msg) => {
            app.set_status(msg);
            return Ok(());
        }
    };
    match Form::create(series) {
        Some(form) => {
            app.switch_screen(Screen::for_series(series));
            app.open_form(form);
            app.set_status("Tab/Shift-Tab move between fields, Enter saves, Esc cancels");
        }
        None => app.set_status(format!("{} is read-only", series.label())),
    }
    Ok(())
}

pub(crate) fn cmd_edit(_args: &str, app: &mut App, _db: &Database) -> anyhow::Result<()> {
    if !app.screen.series().is_writable() {
        app.set_status("Switch to a data tab and select a record first");
        return Ok(());
    }
    match app.selected_form() {
        Some(form) => {
            app.open_form(form);
            app.set_status("Editing. Enter saves, Esc cancels");
        }
        None => app.set_status("No record selected"),
    }
    Ok(())
}

pub(crate) fn cmd_delete(_args: &str, app: &mut App, _db: &Database) -> anyhow::Result<()> {
    let series = app.screen.series();
    if !series.is_writable() {
        app.set_status(format!("{} is read-only", series.label()));
        return Ok(());
    }
    match app.selected_record() {
        Some((id, date)) => {
            app.confirm_message = format!("Delete {} record for {date}?", series.label());
            app.pending_action = Some(PendingAction::Delete { series, id });
            app.input_mode = InputMode::Confirm;
        }
        None => app.set_status("No record selected"),
    }
    Ok(())
}

fn cmd_refresh(_args: &str, app: &mut App, db: &Database) -> anyhow::Result<()> {
    app.refresh_all(db)?;
    app.set_status("Reloaded all series");
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, db: &Database) -> anyhow::Result<()> {
    let series = match target_series(args, app) {
        Ok(series) => series,
        Err(msg) => {
            app.set_status(msg);
            return Ok(());
        }
    };
    let path = args
        .split_once(' ')
        .map(|(_, p)| p.trim())
        .filter(|p| !p.is_empty())
        .map(crate::run::shellexpand)
        .unwrap_or_else(|| crate::run::default_export_path(series));

    let count = db.export_to_csv(series, &PathBuf::from(&path))?;
    if count == 0 {
        app.set_status(format!("No {} data to export", series.label()));
    } else {
        app.set_status(format!("Exported {count} rows to {path}"));
    }
    Ok(())
}

fn cmd_page(args: &str, app: &mut App, _db: &Database) -> anyhow::Result<()> {
    let pages = page_count(app.dashboard.simulation_table.len(), SIMULATION_PAGE_SIZE);
    match args.parse::<usize>() {
        Ok(n) if n >= 1 && n <= pages => {
            app.switch_screen(Screen::Beranda);
            app.simulation_page = n - 1;
        }
        _ => app.set_status(format!("Page must be between 1 and {}", pages.max(1))),
    }
    Ok(())
}
