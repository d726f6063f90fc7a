use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, LeaguePicker};
use crate::state::messages::NetworkRequest;
use sports_api::client::Query;
use sports_api::{Category, NormalizedRecord, RequestTicket, SportId};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Games,
    Standings,
    Teams,
    Help,
}

impl MenuItem {
    pub fn category(self) -> Option<Category> {
        match self {
            MenuItem::Games => Some(Category::Games),
            MenuItem::Standings => Some(Category::Standings),
            MenuItem::Teams => Some(Category::Teams),
            MenuItem::Help => None,
        }
    }
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        let leagues = LeaguePicker::new(settings.leagues.clone(), settings.query.league);
        let state = AppState::new(
            settings.fallback_sports.clone(),
            &settings.initial_sport,
            leagues,
        );

        log::set_max_level(settings.log_level);
        tui_logger::set_default_level(settings.log_level);

        Self { settings, state }
    }

    pub fn current_sport(&self) -> SportId {
        self.state
            .sports
            .current()
            .cloned()
            .unwrap_or_else(|| self.settings.initial_sport.clone())
    }

    /// Build a fetch for the active tab, invalidating whatever is in flight.
    /// None on the Help screen.
    pub fn request_current(&mut self) -> Option<NetworkRequest> {
        let category = self.state.active_tab.category()?;
        let ticket = self.state.dashboard.begin(category);
        Some(NetworkRequest::LoadCategory {
            ticket,
            sport: self.current_sport(),
            category,
            query: self.current_query(),
        })
    }

    /// Configured season plus whichever league the picker is on.
    pub fn current_query(&self) -> Query {
        Query {
            league: self.state.leagues.current_id(),
            season: self.settings.query.season.clone(),
        }
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_sports_loaded(&mut self, sports: Vec<String>) {
        self.state.last_error = None;
        self.state
            .sports
            .replace(sports.iter().map(SportId::new).collect());
    }

    /// Returns false when the response was stale and dropped.
    pub fn on_category_loaded(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<NormalizedRecord>, String>,
    ) -> bool {
        self.state.dashboard.finish(ticket, result)
    }

    pub fn on_error(&mut self, message: String) {
        self.state.last_error = Some(message);
    }

    // -----------------------------------------------------------------------
    // Tab and sport selection: each returns true when a refetch is needed
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) -> bool {
        if self.state.active_tab == next {
            return false;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
        match next.category() {
            // Leaving Help back onto the category already on screen keeps it.
            Some(category) => {
                self.state.previous_tab != MenuItem::Help
                    || category != self.state.dashboard.category
            }
            None => false,
        }
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn next_sport(&mut self) -> bool {
        self.state.active_tab.category().is_some() && self.state.sports.next()
    }

    pub fn prev_sport(&mut self) -> bool {
        self.state.active_tab.category().is_some() && self.state.sports.prev()
    }

    pub fn next_league(&mut self) -> bool {
        self.state.active_tab.category().is_some() && self.state.leagues.next()
    }

    pub fn prev_league(&mut self) -> bool {
        self.state.active_tab.category().is_some() && self.state.leagues.prev()
    }

    pub fn scroll_down(&mut self) {
        self.state.dashboard.scroll_down();
    }

    pub fn scroll_up(&mut self) {
        self.state.dashboard.scroll_up();
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with_league(league: Option<u32>) -> App {
        let mut settings = AppSettings::default();
        settings.query = Query { league, season: Some("2023".into()) };
        App::new(settings)
    }

    fn query_of(request: Option<NetworkRequest>) -> Query {
        match request {
            Some(NetworkRequest::LoadCategory { query, .. }) => query,
            other => panic!("expected a category fetch, got {other:?}"),
        }
    }

    #[test]
    fn requests_carry_selected_league_and_season() {
        let mut app = app_with_league(Some(135));
        let query = query_of(app.request_current());
        assert_eq!(query.league, Some(135));
        assert_eq!(query.season.as_deref(), Some("2023"));
    }

    #[test]
    fn changing_league_reissues_fetch_and_drops_older_response() {
        let mut app = app_with_league(None);
        let first = app.request_current();
        let Some(NetworkRequest::LoadCategory { ticket: old, .. }) = first else {
            panic!("expected a category fetch");
        };

        assert!(app.next_league());
        let Some(NetworkRequest::LoadCategory { ticket: new, query, .. }) = app.request_current()
        else {
            panic!("expected a category fetch");
        };
        assert_eq!(query.league, Some(39));

        assert!(!app.on_category_loaded(old, Ok(vec![])));
        assert!(app.state.dashboard.view.is_loading());
        assert!(app.on_category_loaded(new, Ok(vec![])));
    }

    #[test]
    fn league_keys_do_nothing_on_help() {
        let mut app = app_with_league(None);
        app.update_tab(MenuItem::Help);
        assert!(!app.next_league());
        assert_eq!(app.current_query().league, None);
        assert!(app.request_current().is_none());
    }
}
