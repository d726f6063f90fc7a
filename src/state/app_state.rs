use crate::app::MenuItem;
use chrono::Local;
use sports_api::{Category, LoadState, NormalizedRecord, RequestSequence, RequestTicket, SportId};

// ---------------------------------------------------------------------------
// Sport selection
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct SportPicker {
    pub sports: Vec<SportId>,
    pub selected: usize,
}

impl SportPicker {
    pub fn new(sports: Vec<SportId>, initial: &SportId) -> Self {
        let mut picker = Self { sports, selected: 0 };
        picker.select(initial);
        picker
    }

    pub fn current(&self) -> Option<&SportId> {
        self.sports.get(self.selected)
    }

    /// Replace the list, keeping the current sport selected when it is still
    /// offered. A sport missing from the new list is kept at the front so the
    /// view the user is looking at does not jump.
    pub fn replace(&mut self, sports: Vec<SportId>) {
        if sports.is_empty() {
            return;
        }
        let current = self.current().cloned();
        self.sports = sports;
        self.selected = 0;
        if let Some(current) = current {
            self.select(&current);
        }
    }

    fn select(&mut self, sport: &SportId) {
        match self.sports.iter().position(|s| s == sport) {
            Some(idx) => self.selected = idx,
            None => {
                self.sports.insert(0, sport.clone());
                self.selected = 0;
            }
        }
    }

    /// Returns true when the selection changed.
    pub fn next(&mut self) -> bool {
        if self.sports.len() < 2 {
            return false;
        }
        self.selected = (self.selected + 1) % self.sports.len();
        true
    }

    pub fn prev(&mut self) -> bool {
        if self.sports.len() < 2 {
            return false;
        }
        self.selected = (self.selected + self.sports.len() - 1) % self.sports.len();
        true
    }
}

// ---------------------------------------------------------------------------
// League filter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct League {
    pub id: u32,
    pub name: String,
    pub country: String,
}

impl League {
    pub fn new(id: u32, name: &str, country: &str) -> Self {
        Self { id, name: name.to_owned(), country: country.to_owned() }
    }
}

/// Cycles through the configured leagues plus an unfiltered "all leagues" slot.
#[derive(Debug, Default)]
pub struct LeaguePicker {
    pub leagues: Vec<League>,
    /// None = no league filter.
    pub selected: Option<usize>,
}

impl LeaguePicker {
    /// An initial id missing from `leagues` is added as an unnamed entry.
    pub fn new(mut leagues: Vec<League>, initial: Option<u32>) -> Self {
        let selected = initial.map(|id| match leagues.iter().position(|l| l.id == id) {
            Some(idx) => idx,
            None => {
                leagues.push(League::new(id, &format!("League {id}"), ""));
                leagues.len() - 1
            }
        });
        Self { leagues, selected }
    }

    pub fn current(&self) -> Option<&League> {
        self.selected.and_then(|idx| self.leagues.get(idx))
    }

    pub fn current_id(&self) -> Option<u32> {
        self.current().map(|l| l.id)
    }

    /// Returns true when the selection changed.
    pub fn next(&mut self) -> bool {
        if self.leagues.is_empty() {
            return false;
        }
        self.selected = match self.selected {
            None => Some(0),
            Some(idx) if idx + 1 < self.leagues.len() => Some(idx + 1),
            Some(_) => None,
        };
        true
    }

    pub fn prev(&mut self) -> bool {
        if self.leagues.is_empty() {
            return false;
        }
        self.selected = match self.selected {
            None => Some(self.leagues.len() - 1),
            Some(0) => None,
            Some(idx) => Some(idx - 1),
        };
        true
    }
}

// ---------------------------------------------------------------------------
// Dashboard content for the active (sport, category)
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct DashboardState {
    pub category: Category,
    pub view: LoadState,
    pub scroll_offset: u16,
    /// "HH:MM" of the last accepted response.
    pub last_loaded_at: Option<String>,
    requests: RequestSequence,
}

impl DashboardState {
    /// Start a fetch for `category`. Anything still in flight becomes stale.
    pub fn begin(&mut self, category: Category) -> RequestTicket {
        self.category = category;
        self.view = LoadState::Loading;
        self.scroll_offset = 0;
        self.requests.issue()
    }

    /// Apply a response. Stale tickets are dropped and false is returned.
    pub fn finish(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<NormalizedRecord>, String>,
    ) -> bool {
        if !self.requests.is_current(ticket) {
            return false;
        }
        self.view = LoadState::from_result(result);
        self.last_loaded_at = Some(Local::now().format("%H:%M").to_string());
        true
    }

    pub fn row_count(&self) -> usize {
        self.view.records().len()
    }

    pub fn scroll_down(&mut self) {
        let max = self.row_count().saturating_sub(1) as u16;
        self.scroll_offset = (self.scroll_offset + 1).min(max);
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    /// Errors outside the dashboard view, e.g. the sport list failing to load.
    pub last_error: Option<String>,
    pub sports: SportPicker,
    pub leagues: LeaguePicker,
    pub dashboard: DashboardState,
}

impl AppState {
    pub fn new(sports: Vec<SportId>, initial: &SportId, leagues: LeaguePicker) -> Self {
        Self {
            sports: SportPicker::new(sports, initial),
            leagues,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sports_api::TeamRecord;

    fn ids(names: &[&str]) -> Vec<SportId> {
        names.iter().copied().map(SportId::new).collect()
    }

    fn team(name: &str) -> NormalizedRecord {
        NormalizedRecord::Team(TeamRecord { team_name: name.into(), ..Default::default() })
    }

    #[test]
    fn picker_starts_on_initial_sport() {
        let picker = SportPicker::new(ids(&["baseball", "football"]), &SportId::new("football"));
        assert_eq!(picker.current().map(SportId::as_str), Some("football"));
    }

    #[test]
    fn picker_keeps_unknown_initial_sport() {
        let picker = SportPicker::new(ids(&["baseball"]), &SportId::new("rugby"));
        assert_eq!(picker.sports.len(), 2);
        assert_eq!(picker.current().map(SportId::as_str), Some("rugby"));
    }

    #[test]
    fn picker_wraps_in_both_directions() {
        let mut picker = SportPicker::new(ids(&["a", "b", "c"]), &SportId::new("a"));
        assert!(picker.prev());
        assert_eq!(picker.current().map(SportId::as_str), Some("c"));
        assert!(picker.next());
        assert!(picker.next());
        assert_eq!(picker.current().map(SportId::as_str), Some("b"));
    }

    #[test]
    fn picker_with_single_sport_never_changes() {
        let mut picker = SportPicker::new(ids(&["football"]), &SportId::new("football"));
        assert!(!picker.next());
        assert!(!picker.prev());
    }

    #[test]
    fn replacing_list_preserves_selection() {
        let mut picker = SportPicker::new(ids(&["football", "tennis"]), &SportId::new("tennis"));
        picker.replace(ids(&["baseball", "basketball", "tennis"]));
        assert_eq!(picker.current().map(SportId::as_str), Some("tennis"));
        assert_eq!(picker.selected, 2);

        picker.replace(vec![]);
        assert_eq!(picker.sports.len(), 3);
    }

    fn presets() -> Vec<League> {
        vec![League::new(39, "Premier League", "England"), League::new(78, "Bundesliga", "Germany")]
    }

    #[test]
    fn league_picker_starts_on_configured_league() {
        let picker = LeaguePicker::new(presets(), Some(78));
        assert_eq!(picker.current_id(), Some(78));

        let unfiltered = LeaguePicker::new(presets(), None);
        assert_eq!(unfiltered.current_id(), None);
    }

    #[test]
    fn league_picker_adds_unknown_configured_league() {
        let picker = LeaguePicker::new(presets(), Some(61));
        assert_eq!(picker.leagues.len(), 3);
        assert_eq!(picker.current().map(|l| l.name.as_str()), Some("League 61"));
    }

    #[test]
    fn league_picker_cycles_through_all_leagues_slot() {
        let mut picker = LeaguePicker::new(presets(), None);
        assert!(picker.next());
        assert_eq!(picker.current_id(), Some(39));
        assert!(picker.next());
        assert_eq!(picker.current_id(), Some(78));
        assert!(picker.next());
        assert_eq!(picker.current_id(), None);
        assert!(picker.prev());
        assert_eq!(picker.current_id(), Some(78));

        let mut empty = LeaguePicker::new(vec![], None);
        assert!(!empty.next());
        assert!(!empty.prev());
    }

    #[test]
    fn stale_responses_do_not_overwrite_newer_selection() {
        let mut dashboard = DashboardState::default();
        let games = dashboard.begin(Category::Games);
        let standings = dashboard.begin(Category::Standings);

        assert!(!dashboard.finish(games, Ok(vec![team("late")])));
        assert!(dashboard.view.is_loading());
        assert_eq!(dashboard.category, Category::Standings);

        assert!(dashboard.finish(standings, Ok(vec![])));
        assert_eq!(dashboard.view, LoadState::Empty);
        assert!(dashboard.last_loaded_at.is_some());
    }

    #[test]
    fn failures_become_failed_view() {
        let mut dashboard = DashboardState::default();
        let ticket = dashboard.begin(Category::Teams);
        assert!(dashboard.finish(ticket, Err("API returned 500".into())));
        assert_eq!(dashboard.view, LoadState::Failed("API returned 500".into()));
    }

    #[test]
    fn scrolling_is_clamped_to_rows() {
        let mut dashboard = DashboardState::default();
        let ticket = dashboard.begin(Category::Teams);
        dashboard.finish(ticket, Ok(vec![team("a"), team("b")]));

        dashboard.scroll_up();
        assert_eq!(dashboard.scroll_offset, 0);
        dashboard.scroll_down();
        dashboard.scroll_down();
        dashboard.scroll_down();
        assert_eq!(dashboard.scroll_offset, 1);

        dashboard.begin(Category::Games);
        assert_eq!(dashboard.scroll_offset, 0);
    }
}
