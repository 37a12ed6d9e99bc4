use anyhow::Result;
use chrono::Local;
use std::time::{Duration, Instant};

use crate::dashboard::{self, Dashboard, Sources, SIMULATION_PAGE_SIZE};
use crate::db::{Database, FactTable};
use crate::events::RefreshBus;
use crate::models::*;
use crate::ui::form::Form;
use crate::ui::util::clamp_cursor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Beranda,
    CpAramco,
    Kurs,
    LpgNasional,
    LpgProvinsi,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Beranda,
            Self::CpAramco,
            Self::Kurs,
            Self::LpgNasional,
            Self::LpgProvinsi,
        ]
    }

    /// The series a tab lists. Beranda shows the simulation view.
    pub(crate) fn series(&self) -> Series {
        match self {
            Self::Beranda => Series::Simulation,
            Self::CpAramco => Series::PriceReference,
            Self::Kurs => Series::ExchangeRate,
            Self::LpgNasional => Series::NationalVolume,
            Self::LpgProvinsi => Series::ProvincialVolume,
        }
    }

    pub(crate) fn for_series(series: Series) -> Self {
        match series {
            Series::Simulation => Self::Beranda,
            Series::PriceReference => Self::CpAramco,
            Series::ExchangeRate => Self::Kurs,
            Series::NationalVolume => Self::LpgNasional,
            Series::ProvincialVolume => Self::LpgProvinsi,
        }
    }

    pub(crate) fn next(&self) -> Self {
        let all = Self::all();
        let i = all.iter().position(|s| s == self).unwrap_or(0);
        all[(i + 1) % all.len()]
    }

    pub(crate) fn prev(&self) -> Self {
        let all = Self::all();
        let i = all.iter().position(|s| s == self).unwrap_or(0);
        all[(i + all.len() - 1) % all.len()]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Beranda => write!(f, "Beranda"),
            other => write!(f, "{}", other.series().label()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Form,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Form => write!(f, "FORM"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    Delete { series: Series, id: i64 },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Raw series as last read from the store
    pub(crate) price_references: Vec<PriceReference>,
    pub(crate) exchange_rates: Vec<ExchangeRate>,
    pub(crate) national_volumes: Vec<NationalVolume>,
    pub(crate) provincial_volumes: Vec<ProvincialVolume>,
    pub(crate) simulation: Vec<SimulationRow>,

    pub(crate) dashboard: Dashboard,

    // Cursor in the recent list of the current fact tab
    pub(crate) list_index: usize,
    pub(crate) list_scroll: usize,
    pub(crate) simulation_page: usize,

    pub(crate) form: Option<Form>,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Refresh
    pub(crate) bus: RefreshBus<App, Database>,
    pub(crate) refresh_interval: Duration,
    pub(crate) last_refresh: Instant,
    pub(crate) last_update: Option<String>,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

fn reload_price_references(app: &mut App, db: &Database) -> Result<()> {
    app.price_references = PriceReference::list(db)?;
    Ok(())
}

fn reload_exchange_rates(app: &mut App, db: &Database) -> Result<()> {
    app.exchange_rates = ExchangeRate::list(db)?;
    Ok(())
}

fn reload_national_volumes(app: &mut App, db: &Database) -> Result<()> {
    app.national_volumes = NationalVolume::list(db)?;
    Ok(())
}

fn reload_provincial_volumes(app: &mut App, db: &Database) -> Result<()> {
    app.provincial_volumes = ProvincialVolume::list(db)?;
    Ok(())
}

fn reload_simulation(app: &mut App, db: &Database) -> Result<()> {
    app.simulation = db.get_simulation_rows()?;
    Ok(())
}

impl App {
    pub(crate) fn new(refresh_interval: Duration) -> Self {
        let mut bus = RefreshBus::new();
        bus.subscribe(Series::PriceReference, reload_price_references);
        bus.subscribe(Series::ExchangeRate, reload_exchange_rates);
        bus.subscribe(Series::NationalVolume, reload_national_volumes);
        bus.subscribe(Series::ProvincialVolume, reload_provincial_volumes);
        bus.subscribe(Series::Simulation, reload_simulation);

        Self {
            running: true,
            screen: Screen::Beranda,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            price_references: Vec::new(),
            exchange_rates: Vec::new(),
            national_volumes: Vec::new(),
            provincial_volumes: Vec::new(),
            simulation: Vec::new(),

            dashboard: Dashboard::default(),

            list_index: 0,
            list_scroll: 0,
            simulation_page: 0,

            form: None,

            pending_action: None,
            confirm_message: String::new(),

            bus,
            refresh_interval,
            last_refresh: Instant::now(),
            last_update: None,

            visible_rows: 20,
        }
    }

    /// Reloads every series now.
    pub(crate) fn refresh_all(&mut self, db: &Database) -> Result<()> {
        self.bus.publish_all();
        self.last_refresh = Instant::now();
        self.process_refresh(db)
    }

    pub(crate) fn refresh_due(&self) -> bool {
        self.last_refresh.elapsed() >= self.refresh_interval
    }

    /// Time left until the periodic reload, used as the input poll timeout.
    pub(crate) fn until_refresh(&self) -> Duration {
        self.refresh_interval
            .saturating_sub(self.last_refresh.elapsed())
    }

    /// One event-loop tick: queue the periodic reload if it is due, then run
    /// whatever reloads are waiting.
    pub(crate) fn tick(&mut self, db: &Database) -> Result<()> {
        if self.refresh_due() {
            self.bus.publish_all();
            self.last_refresh = Instant::now();
        }
        self.process_refresh(db)
    }

    /// Runs the queued reloads, then rebuilds the dashboard once.
    pub(crate) fn process_refresh(&mut self, db: &Database) -> Result<()> {
        if !self.bus.has_pending() {
            return Ok(());
        }
        let jobs = self.bus.take_jobs();
        let mut failure = None;
        for job in jobs {
            if let Err(e) = job(self, db) {
                failure.get_or_insert(e);
            }
        }
        self.rebuild_dashboard();
        self.last_update = Some(Local::now().format("%H:%M:%S").to_string());
        match failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub(crate) fn rebuild_dashboard(&mut self) {
        self.dashboard = dashboard::build(&Sources {
            price_references: &self.price_references,
            exchange_rates: &self.exchange_rates,
            national_volumes: &self.national_volumes,
            provincial_volumes: &self.provincial_volumes,
            simulation: &self.simulation,
        });
        let len = self.list_len();
        clamp_cursor(&mut self.list_index, &mut self.list_scroll, len);
        self.simulation_page = dashboard::clamp_page(
            self.simulation_page,
            self.dashboard.simulation_table.len(),
            SIMULATION_PAGE_SIZE,
        );
    }

    pub(crate) fn switch_screen(&mut self, screen: Screen) {
        if self.screen != screen {
            self.screen = screen;
            self.list_index = 0;
            self.list_scroll = 0;
        }
    }

    pub(crate) fn next_page(&mut self) {
        self.simulation_page = dashboard::clamp_page(
            self.simulation_page + 1,
            self.dashboard.simulation_table.len(),
            SIMULATION_PAGE_SIZE,
        );
    }

    pub(crate) fn prev_page(&mut self) {
        self.simulation_page = self.simulation_page.saturating_sub(1);
    }

    /// Rows in the recent list of the current tab.
    pub(crate) fn list_len(&self) -> usize {
        let d = &self.dashboard;
        match self.screen.series() {
            Series::PriceReference => d.price_reference.recent.len(),
            Series::ExchangeRate => d.exchange_rate.recent.len(),
            Series::NationalVolume => d.national_volume.recent.len(),
            Series::ProvincialVolume => d.provincial_volume.recent.len(),
            Series::Simulation => d.simulation_table.len(),
        }
    }

    /// Id and display date of the record under the cursor.
    pub(crate) fn selected_record(&self) -> Option<(i64, String)> {
        fn pick<T: Dated>(rows: &[T], index: usize, id: fn(&T) -> Option<i64>) -> Option<(i64, String)> {
            let row = rows.get(index)?;
            Some((id(row)?, dashboard::format::format_date(row.record_date())))
        }
        let d = &self.dashboard;
        let i = self.list_index;
        match self.screen.series() {
            Series::PriceReference => pick(&d.price_reference.recent, i, |r| r.id),
            Series::ExchangeRate => pick(&d.exchange_rate.recent, i, |r| r.id),
            Series::NationalVolume => pick(&d.national_volume.recent, i, |r| r.id),
            Series::ProvincialVolume => pick(&d.provincial_volume.recent, i, |r| r.id),
            Series::Simulation => None,
        }
    }

    /// Edit form prefilled from the record under the cursor.
    pub(crate) fn selected_form(&self) -> Option<Form> {
        let d = &self.dashboard;
        let i = self.list_index;
        match self.screen.series() {
            Series::PriceReference => d.price_reference.recent.get(i).map(Form::from),
            Series::ExchangeRate => d.exchange_rate.recent.get(i).map(Form::from),
            Series::NationalVolume => d.national_volume.recent.get(i).map(Form::from),
            Series::ProvincialVolume => d.provincial_volume.recent.get(i).map(Form::from),
            Series::Simulation => None,
        }
    }

    pub(crate) fn open_form(&mut self, form: Form) {
        self.form = Some(form);
        self.input_mode = InputMode::Form;
    }

    pub(crate) fn close_form(&mut self) {
        self.form = None;
        self.input_mode = InputMode::Normal;
    }

    /// Validates and saves the open form. A validation error keeps the form
    /// open; a saved record queues a reload of its series.
    pub(crate) fn submit_form(&mut self, db: &Database) -> Result<()> {
        let Some(form) = self.form.as_ref() else {
            return Ok(());
        };
        let output = match form.build() {
            Ok(output) => output,
            Err(e) => {
                self.set_status(e.to_string());
                return Ok(());
            }
        };
        let editing = form.editing_id;
        let series = output.series();
        match output.save(db, editing, crate::db::DEFAULT_ACTOR)? {
            Some(id) => {
                tracing::info!(collection = series.as_str(), id, "record saved from TUI");
                let verb = if editing.is_some() { "updated" } else { "added" };
                self.set_status(format!("{} data {verb}", series.label()));
            }
            None => self.set_status(format!("{} data not found", series.label())),
        }
        self.close_form();
        self.bus.publish(series);
        Ok(())
    }

    /// Carries out the action the user just confirmed.
    pub(crate) fn confirm_pending(&mut self, db: &Database) -> Result<()> {
        let Some(action) = self.pending_action.take() else {
            return Ok(());
        };
        match action {
            PendingAction::Delete { series, id } => {
                if db.delete_record(series, id)? {
                    tracing::info!(collection = series.as_str(), id, "record deleted from TUI");
                    self.set_status(format!("{} data deleted", series.label()));
                } else {
                    self.set_status(format!("{} data not found", series.label()));
                }
                self.bus.publish(series);
            }
        }
        Ok(())
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
