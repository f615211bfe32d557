use std::collections::VecDeque;

use crate::player_stats::PlayerRecord;
use crate::zones::{free_throw_row, zones_for_player, WideZoneTable, ZoneRow};

pub const ALL_TEAMS: &str = "All";

const LOG_CAP: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Overview,
    Zones,
}

/// Everything the render pass reads. Data is replaced wholesale on each
/// refresh; nothing in here is mutated incrementally.
#[derive(Debug)]
pub struct AppState {
    pub season: String,
    pub season_type: String,
    pub players: Vec<PlayerRecord>,
    pub shot_table: WideZoneTable,
    pub team_filter: String,
    pub selected: usize,
    pub screen: Screen,
    pub help_overlay: bool,
    pub fetch_error: Option<String>,
    pub logs: VecDeque<String>,
}

impl AppState {
    pub fn new(season: String, season_type: String) -> Self {
        Self {
            season,
            season_type,
            players: Vec::new(),
            shot_table: WideZoneTable::default(),
            team_filter: ALL_TEAMS.to_string(),
            selected: 0,
            screen: Screen::Overview,
            help_overlay: false,
            fetch_error: None,
            logs: VecDeque::new(),
        }
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        self.logs.push_back(line.into());
        while self.logs.len() > LOG_CAP {
            self.logs.pop_front();
        }
    }

    /// Swap in a freshly loaded season. Stale selection and filter are
    /// clamped rather than carried over blindly.
    pub fn set_data(&mut self, players: Vec<PlayerRecord>, shot_table: WideZoneTable) {
        self.players = players;
        self.shot_table = shot_table;
        self.fetch_error = None;
        if self.team_filter != ALL_TEAMS && !self.team_list().contains(&self.team_filter) {
            self.team_filter = ALL_TEAMS.to_string();
        }
        self.clamp_selection();
    }

    /// "All" plus every team abbreviation present, sorted.
    pub fn team_list(&self) -> Vec<String> {
        let mut teams: Vec<String> = self
            .players
            .iter()
            .map(|p| p.team.clone())
            .filter(|t| !t.is_empty())
            .collect();
        teams.sort();
        teams.dedup();
        let mut out = vec![ALL_TEAMS.to_string()];
        out.extend(teams);
        out
    }

    pub fn cycle_team(&mut self, forward: bool) {
        let teams = self.team_list();
        let current = teams
            .iter()
            .position(|t| *t == self.team_filter)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % teams.len()
        } else {
            (current + teams.len() - 1) % teams.len()
        };
        self.team_filter = teams[next].clone();
        self.clamp_selection();
    }

    /// Players under the team filter, highest per-game scorers first.
    pub fn filtered_players(&self) -> Vec<&PlayerRecord> {
        let mut players: Vec<&PlayerRecord> = self
            .players
            .iter()
            .filter(|p| self.team_filter == ALL_TEAMS || p.team == self.team_filter)
            .collect();
        players.sort_by(|a, b| {
            let pts_a = a.pts_per_game.unwrap_or(f64::NEG_INFINITY);
            let pts_b = b.pts_per_game.unwrap_or(f64::NEG_INFINITY);
            pts_b
                .partial_cmp(&pts_a)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });
        players
    }

    pub fn selected_player(&self) -> Option<&PlayerRecord> {
        let filtered = self.filtered_players();
        filtered.get(self.selected).copied()
    }

    pub fn select_next(&mut self) {
        let len = self.filtered_players().len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Zone breakdown for the selected player, free-throw row appended.
    /// Empty when the player has no zone data; the UI shows a notice for
    /// that case instead of a bare table.
    pub fn zone_breakdown(&self) -> Vec<ZoneRow> {
        let Some(player) = self.selected_player() else {
            return Vec::new();
        };
        let mut rows = zones_for_player(&player.name, &self.shot_table);
        if rows.is_empty() {
            return rows;
        }
        rows.push(free_throw_row(player));
        rows
    }

    fn clamp_selection(&mut self) {
        let len = self.filtered_players().len();
        self.selected = if len == 0 { 0 } else { self.selected.min(len - 1) };
    }
}
