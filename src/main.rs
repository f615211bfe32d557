use std::io;
use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use nbashot_terminal::assets::{fg_band, headshot_url, team_logo, FgBand};
use nbashot_terminal::cache::SeasonCache;
use nbashot_terminal::config::Config;
use nbashot_terminal::player_stats::{records_from_table, PlayerRecord};
use nbashot_terminal::season::detect_latest_season;
use nbashot_terminal::state::{AppState, Screen};
use nbashot_terminal::stats_api::{load_player_stats, load_shot_locations, probe_season_rows};
use nbashot_terminal::zones::{display_zone, WideZoneTable, ZoneRow};

struct App {
    config: Config,
    state: AppState,
    stats_cache: SeasonCache<Vec<PlayerRecord>>,
    shots_cache: SeasonCache<WideZoneTable>,
    should_quit: bool,
}

impl App {
    fn new(config: Config) -> Self {
        let state = AppState::new(config.fallback_season.clone(), config.season_type.clone());
        let stats_cache = SeasonCache::new(config.cache_ttl);
        let shots_cache = SeasonCache::new(config.cache_ttl);
        Self {
            config,
            state,
            stats_cache,
            shots_cache,
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Esc => {
                if self.state.help_overlay {
                    self.state.help_overlay = false;
                } else {
                    self.state.screen = Screen::Overview;
                }
            }
            KeyCode::Tab | KeyCode::Char('z') => {
                self.state.screen = match self.state.screen {
                    Screen::Overview => Screen::Zones,
                    Screen::Zones => Screen::Overview,
                };
            }
            KeyCode::Enter => self.state.screen = Screen::Zones,
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char('l') | KeyCode::Right => self.state.cycle_team(true),
            KeyCode::Char('h') | KeyCode::Left => self.state.cycle_team(false),
            KeyCode::Char('r') => self.refresh(),
            KeyCode::Char('s') => self.detect_season(),
            _ => {}
        }
    }

    /// Cache-served load of both season tables. A fetch error kills this
    /// render pass only; the message lands in the UI, never a panic.
    fn load_season_data(&mut self) {
        let season = self.state.season.clone();

        let players = match self.stats_cache.get(&season) {
            Some(cached) => cached,
            None => {
                self.state
                    .push_log(format!("[INFO] Fetching player stats for {season}"));
                match load_player_stats(&self.config, &season) {
                    Ok(table) => {
                        let records = records_from_table(&table);
                        self.stats_cache.insert(&season, records.clone());
                        records
                    }
                    Err(err) => {
                        self.fail_load(err);
                        return;
                    }
                }
            }
        };

        let shots = match self.shots_cache.get(&season) {
            Some(cached) => cached,
            None => {
                self.state
                    .push_log(format!("[INFO] Fetching shot locations for {season}"));
                match load_shot_locations(&self.config, &season) {
                    Ok(table) => {
                        self.shots_cache.insert(&season, table.clone());
                        table
                    }
                    Err(err) => {
                        self.fail_load(err);
                        return;
                    }
                }
            }
        };

        let count = players.len();
        self.state.set_data(players, shots);
        self.state
            .push_log(format!("[INFO] Loaded {count} players for {season}"));
    }

    fn fail_load(&mut self, err: anyhow::Error) {
        self.state.push_log(format!("[WARN] Load failed: {err:#}"));
        self.state.fetch_error = Some(
            "NBA.com blocked the request or timed out. Press r to refresh or try later."
                .to_string(),
        );
    }

    fn refresh(&mut self) {
        self.stats_cache.clear();
        self.shots_cache.clear();
        self.state.push_log("[INFO] Cache cleared, refreshing");
        self.load_season_data();
    }

    /// Probe the candidate list for the newest season with data. Never
    /// errors; falls back to the configured default.
    fn detect_season(&mut self) {
        self.state.push_log("[INFO] Detecting latest season...");
        let config = self.config.clone();
        let season = detect_latest_season(
            Local::now().date_naive(),
            config.season_lookback,
            |candidate| probe_season_rows(&config, candidate),
            &config.fallback_season,
        );
        if season != self.state.season {
            self.state.push_log(format!("[INFO] Season set to {season}"));
            self.state.season = season;
        } else {
            self.state.push_log(format!("[INFO] Season unchanged: {season}"));
        }
        self.refresh();
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(Config::from_env());
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    // First frame before the initial (blocking) load so the user is not
    // staring at an empty terminal during the fetch.
    terminal.draw(|f| ui(f, app))?;
    app.load_season_data();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    if let Some(message) = &app.state.fetch_error {
        let error = Paragraph::new(message.as_str()).style(Style::default().fg(Color::Red));
        frame.render_widget(error, chunks[1]);
    } else {
        match app.state.screen {
            Screen::Overview => render_overview(frame, chunks[1], &app.state),
            Screen::Zones => render_zones(frame, chunks[1], &app.state),
        }
    }

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(&app.state));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let view = match state.screen {
        Screen::Overview => "OVERVIEW",
        Screen::Zones => "ZONES",
    };
    format!(
        "NBA SHOOTING | {} {} | Team: {} | {}",
        state.season, state.season_type, state.team_filter, view
    )
}

fn footer_text(state: &AppState) -> String {
    match state.screen {
        Screen::Overview => {
            "Tab/z Zones | j/k Move | h/l Team | r Refresh | s Latest season | ? Help | q Quit"
                .to_string()
        }
        Screen::Zones => {
            "Tab/Esc Overview | j/k Player | h/l Team | r Refresh | ? Help | q Quit".to_string()
        }
    }
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(2)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn overview_columns() -> [Constraint; 8] {
    [
        Constraint::Min(22),
        Constraint::Length(6),
        Constraint::Length(5),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(6),
    ]
}

fn render_overview(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let widths = overview_columns();
    render_overview_header(frame, sections[0], &widths);

    let list_area = sections[1];
    let players = state.filtered_players();
    if players.is_empty() {
        let empty = Paragraph::new("No players loaded. Press r to refresh.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, list_area);
        return;
    }
    if list_area.height == 0 {
        return;
    }

    let visible = list_area.height as usize;
    let (start, end) = visible_range(state.selected, players.len(), visible);

    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + i as u16,
            width: list_area.width,
            height: 1,
        };

        let selected = idx == state.selected;
        let row_style = if selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        if selected {
            frame.render_widget(Block::default().style(row_style), row_area);
        }

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths)
            .split(row_area);

        let p = players[idx];
        render_cell_text(frame, cols[0], &p.name, row_style);
        render_cell_text(frame, cols[1], &p.team, row_style);
        render_cell_text(frame, cols[2], &fmt_count(p.gp), row_style);
        render_cell_text(frame, cols[3], &fmt1(p.min_per_game), row_style);
        render_cell_text(frame, cols[4], &fmt1(p.pts_per_game), row_style);
        render_cell_text(frame, cols[5], &fmt_pct(p.fg_pct), band_style(p.fg_pct, row_style));
        render_cell_text(frame, cols[6], &fmt_pct(p.fg3_pct), row_style);
        render_cell_text(frame, cols[7], &fmt_pct(p.ft_pct), row_style);
    }
}

fn render_overview_header(frame: &mut Frame, area: Rect, widths: &[Constraint]) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(area);
    let style = Style::default().add_modifier(Modifier::BOLD);

    render_cell_text(frame, cols[0], "Player", style);
    render_cell_text(frame, cols[1], "Team", style);
    render_cell_text(frame, cols[2], "GP", style);
    render_cell_text(frame, cols[3], "MIN", style);
    render_cell_text(frame, cols[4], "PTS", style);
    render_cell_text(frame, cols[5], "FG%", style);
    render_cell_text(frame, cols[6], "3P%", style);
    render_cell_text(frame, cols[7], "FT%", style);
}

fn zone_columns() -> [Constraint; 7] {
    [
        Constraint::Min(24),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(9),
        Constraint::Length(7),
    ]
}

fn render_zones(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(area);

    let Some(player) = state.selected_player() else {
        let empty = Paragraph::new("No player selected. Pick one on the overview.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    };

    let profile = Paragraph::new(player_profile_text(player, state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(profile, sections[0]);

    let widths = zone_columns();
    render_zone_header(frame, sections[1], &widths);

    let rows = state.zone_breakdown();
    let list_area = sections[2];
    if rows.is_empty() {
        let empty = Paragraph::new("No zone data available for this player.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, list_area);
        return;
    }

    for (i, zone) in rows.iter().enumerate() {
        if i as u16 >= list_area.height {
            break;
        }
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + i as u16,
            width: list_area.width,
            height: 1,
        };
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths)
            .split(row_area);

        render_zone_row(frame, &cols, zone);
    }
}

fn render_zone_row(frame: &mut Frame, cols: &[Rect], zone: &ZoneRow) {
    let style = Style::default();
    render_cell_text(frame, cols[0], &display_zone(&zone.zone), style);
    render_cell_text(frame, cols[1], &fmt1(zone.fgm), style);
    render_cell_text(frame, cols[2], &fmt1(zone.fga), style);
    render_cell_text(frame, cols[3], &fmt_pct(zone.fg_pct), band_style(zone.fg_pct, style));
    render_cell_text(frame, cols[4], &fmt1(zone.pts), style);
    render_cell_text(frame, cols[5], &fmt1(zone.pts_per_shot), style);
    render_cell_text(frame, cols[6], &fmt_pct(zone.shot_share), style);
}

fn render_zone_header(frame: &mut Frame, area: Rect, widths: &[Constraint]) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(area);
    let style = Style::default().add_modifier(Modifier::BOLD);

    render_cell_text(frame, cols[0], "Zone", style);
    render_cell_text(frame, cols[1], "FGM", style);
    render_cell_text(frame, cols[2], "FGA", style);
    render_cell_text(frame, cols[3], "FG%", style);
    render_cell_text(frame, cols[4], "PTS", style);
    render_cell_text(frame, cols[5], "PTS/shot", style);
    render_cell_text(frame, cols[6], "Share", style);
}

fn player_profile_text(player: &PlayerRecord, state: &AppState) -> String {
    let mut lines = vec![
        format!(
            "{} ({}) - {} {}",
            player.name, player.team, state.season, state.season_type
        ),
        format!(
            "GP: {} | PTS: {} | FG%: {} | 3P%: {} | FT%: {}",
            fmt_count(player.gp),
            fmt1(player.pts_per_game),
            fmt_pct(player.fg_pct),
            fmt_pct(player.fg3_pct),
            fmt_pct(player.ft_pct),
        ),
    ];
    if let Some(id) = player.player_id {
        lines.push(format!("Headshot: {}", headshot_url(id)));
    }
    if let Some(logo) = team_logo(&player.team) {
        lines.push(format!("Logo: {logo}"));
    }
    lines.join("\n")
}

fn render_cell_text(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let paragraph = Paragraph::new(text).style(style);
    frame.render_widget(paragraph, area);
}

fn band_style(pct: Option<f64>, base: Style) -> Style {
    match fg_band(pct) {
        Some(FgBand::Low) => base.fg(Color::Red),
        Some(FgBand::Mid) => base.fg(Color::Yellow),
        Some(FgBand::High) => base.fg(Color::Green),
        None => base,
    }
}

fn fmt1(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.1}")).unwrap_or_default()
}

fn fmt_pct(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.0}%", (v * 100.0).round()))
        .unwrap_or_default()
}

fn fmt_count(value: Option<f64>) -> String {
    value.map(|v| format!("{}", v as i64)).unwrap_or_default()
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "NBA Shooting Terminal - Help",
        "",
        "Global:",
        "  Tab / z      Switch Overview/Zones",
        "  Enter        Zone breakdown",
        "  Esc          Back / close help",
        "  h/l or arrows  Cycle team filter",
        "  r            Refresh (clear cache)",
        "  s            Detect latest season",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Overview:",
        "  j/k or up/down  Move player selection",
        "",
        "FG% bands: red < 30%, yellow 30-40%, green > 40%",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
