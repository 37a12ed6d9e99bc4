#![allow(clippy::unwrap_used)]

use std::time::Duration;

use rust_decimal_macros::dec;

use super::app::{App, InputMode, PendingAction, Screen};
use super::commands::{cmd_add, cmd_delete, cmd_edit, handle_command};
use super::form::FieldId;
use crate::db::Database;
use crate::models::*;

fn app() -> App {
    App::new(Duration::from_secs(3600))
}

fn seed_price(db: &Database, date: &str, blended: &str) -> i64 {
    let rec = PriceReference::new(
        date,
        "Jan 2024",
        Some(dec!(500)),
        Some(dec!(480)),
        Some(blended.parse().unwrap()),
    );
    db.insert_price_reference(&rec, "admin").unwrap()
}

fn seed_simulation(db: &Database, count: usize) {
    for day in 1..=count {
        let row = SimulationRow {
            date: format!("2024-01-{day:02}"),
            month: "Jan 2024".into(),
            subsidy: Some(dec!(100)),
            ..Default::default()
        };
        db.insert_simulation_feed(&row).unwrap();
    }
}

fn fill(app: &mut App, field: FieldId, text: &str) {
    let form = app.form.as_mut().unwrap();
    form.focus = form.fields().iter().position(|f| *f == field).unwrap();
    for c in text.chars() {
        form.push_char(c);
    }
}

#[test]
fn test_refresh_all_loads_every_series() {
    let db = Database::open_in_memory().unwrap();
    seed_price(&db, "2024-01-01", "490");
    seed_simulation(&db, 3);

    let mut app = app();
    app.refresh_all(&db).unwrap();

    assert_eq!(app.price_references.len(), 1);
    assert_eq!(app.dashboard.price_reference.recent.len(), 1);
    assert_eq!(app.dashboard.simulation_table.len(), 3);
    assert!(app.last_update.is_some());
    assert!(!app.bus.has_pending());
}

#[test]
fn test_submitted_form_shows_after_reload() {
    let db = Database::open_in_memory().unwrap();
    let mut app = app();
    app.refresh_all(&db).unwrap();

    cmd_add("cp", &mut app, &db).unwrap();
    assert_eq!(app.screen, Screen::CpAramco);
    assert_eq!(app.input_mode, InputMode::Form);

    fill(&mut app, FieldId::Date, "2024-01-01");
    fill(&mut app, FieldId::Label, "Jan 2024");
    fill(&mut app, FieldId::First, "500");
    fill(&mut app, FieldId::Second, "480");
    app.submit_form(&db).unwrap();

    assert!(app.form.is_none());
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.status_message, "CP Aramco data added");
    assert!(app.bus.has_pending());

    app.process_refresh(&db).unwrap();
    let recent = &app.dashboard.price_reference.recent;
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].blended, Some(dec!(490.00)));
}

#[test]
fn test_validation_error_keeps_form_open() {
    let db = Database::open_in_memory().unwrap();
    let mut app = app();
    cmd_add("provinsi", &mut app, &db).unwrap();
    app.submit_form(&db).unwrap();

    assert!(app.form.is_some());
    assert_eq!(app.input_mode, InputMode::Form);
    assert!(app.status_message.contains("Tanggal"));
    assert_eq!(db.count_records(Series::ProvincialVolume).unwrap(), 0);
}

#[test]
fn test_edit_prefills_and_updates() {
    let db = Database::open_in_memory().unwrap();
    seed_price(&db, "2024-01-01", "490");
    let mut app = app();
    app.refresh_all(&db).unwrap();
    app.switch_screen(Screen::CpAramco);

    cmd_edit("", &mut app, &db).unwrap();
    assert_eq!(app.form.as_ref().unwrap().value(FieldId::First), "500");

    app.form.as_mut().unwrap().set_value(FieldId::Dependent, "495");
    app.submit_form(&db).unwrap();
    app.process_refresh(&db).unwrap();

    assert_eq!(app.status_message, "CP Aramco data updated");
    assert_eq!(
        app.dashboard.price_reference.recent[0].blended,
        Some(dec!(495))
    );
}

#[test]
fn test_delete_asks_then_removes() {
    let db = Database::open_in_memory().unwrap();
    let id = seed_price(&db, "2024-01-01", "490");
    let mut app = app();
    app.refresh_all(&db).unwrap();
    app.switch_screen(Screen::CpAramco);

    cmd_delete("", &mut app, &db).unwrap();
    assert_eq!(app.input_mode, InputMode::Confirm);
    assert_eq!(
        app.pending_action,
        Some(PendingAction::Delete {
            series: Series::PriceReference,
            id
        })
    );
    assert!(app.confirm_message.contains("01 Jan 2024"));

    app.input_mode = InputMode::Normal;
    app.confirm_pending(&db).unwrap();
    app.process_refresh(&db).unwrap();

    assert!(app.pending_action.is_none());
    assert_eq!(app.status_message, "CP Aramco data deleted");
    assert!(app.dashboard.price_reference.recent.is_empty());
    assert_eq!(app.list_index, 0);
}

#[test]
fn test_beranda_is_read_only() {
    let db = Database::open_in_memory().unwrap();
    seed_simulation(&db, 2);
    let mut app = app();
    app.refresh_all(&db).unwrap();

    cmd_delete("", &mut app, &db).unwrap();
    assert!(app.pending_action.is_none());
    assert_eq!(app.status_message, "Simulasi LPG 3 Kg is read-only");

    cmd_add("", &mut app, &db).unwrap();
    assert!(app.form.is_none());
    assert_eq!(app.input_mode, InputMode::Normal);
}

#[test]
fn test_tick_reloads_only_when_due() {
    let db = Database::open_in_memory().unwrap();
    let mut app = app();
    app.refresh_all(&db).unwrap();
    seed_price(&db, "2024-01-01", "490");

    app.tick(&db).unwrap();
    assert!(app.price_references.is_empty());

    let mut eager = App::new(Duration::ZERO);
    eager.tick(&db).unwrap();
    assert_eq!(eager.price_references.len(), 1);
    assert_eq!(eager.until_refresh(), Duration::ZERO);
}

#[test]
fn test_simulation_pages_clamp() {
    let db = Database::open_in_memory().unwrap();
    seed_simulation(&db, 25);
    let mut app = app();
    app.refresh_all(&db).unwrap();

    app.prev_page();
    assert_eq!(app.simulation_page, 0);
    app.next_page();
    app.next_page();
    app.next_page();
    assert_eq!(app.simulation_page, 2);

    handle_command("page 2", &mut app, &db).unwrap();
    assert_eq!(app.simulation_page, 1);
    handle_command("page 9", &mut app, &db).unwrap();
    assert_eq!(app.simulation_page, 1);
    assert_eq!(app.status_message, "Page must be between 1 and 3");
}

#[test]
fn test_unknown_command_suggests_closest() {
    let db = Database::open_in_memory().unwrap();
    let mut app = app();
    handle_command("refresj", &mut app, &db).unwrap();
    assert_eq!(
        app.status_message,
        "Unknown command: :refresj. Did you mean :refresh?"
    );
}

#[test]
fn test_screen_cycle_and_labels() {
    assert_eq!(Screen::Beranda.next(), Screen::CpAramco);
    assert_eq!(Screen::Beranda.prev(), Screen::LpgProvinsi);
    assert_eq!(Screen::LpgProvinsi.next(), Screen::Beranda);
    assert_eq!(Screen::Kurs.to_string(), "Kurs");
    assert_eq!(Screen::Beranda.to_string(), "Beranda");
    for series in Series::all() {
        assert_eq!(Screen::for_series(*series).series(), *series);
    }
}
