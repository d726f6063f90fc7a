use chrono::Local;
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Row, Table, Tabs, Wrap};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use sports_api::{GameRecord, LoadState, NormalizedRecord, StandingRecord, TeamRecord};

static TABS: &[&str; 3] = &["Games", "Standings", "Teams"];

const HELP_TEXT: &str = "q=quit  1=Games  2=Standings  3=Teams  ←/→ or h/l=sport  [/]=league  ↑/↓ or j/k=scroll  \
r=retry/refresh  f=full screen  \"=logs  Esc=close help";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
            draw_sport_bar(f, layout.sport_bar, app);
        }

        match app.state.active_tab {
            MenuItem::Help => draw_placeholder(f, layout.main, HELP_TEXT),
            _ => draw_dashboard(f, layout.main, app),
        }

        if app.state.show_logs {
            draw_logs(f, layout.logs);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });

    if let Err(e) = result {
        log::error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Games => 0,
        MenuItem::Standings => 1,
        MenuItem::Teams => 2,
        MenuItem::Help => match app.state.previous_tab {
            MenuItem::Standings => 1,
            MenuItem::Teams => 2,
            _ => 0,
        },
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_sport_bar(f: &mut Frame, area: Rect, app: &App) {
    let picker = &app.state.sports;
    let sport = app.current_sport();

    let mut spans = vec![
        Span::styled(" Sport: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("◀ {} ▶", sport.display_name()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  ({}/{})", picker.selected + 1, picker.sports.len().max(1)),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    let league = match app.state.leagues.current() {
        Some(l) if l.country.is_empty() => l.name.clone(),
        Some(l) => format!("{} ({})", l.name, l.country),
        None => "All leagues".to_string(),
    };
    spans.push(Span::raw(format!("  League: [ {league} ]")));
    if let Some(season) = app.settings.query.season.as_deref() {
        spans.push(Span::raw(format!("  season {season}")));
    }
    if let Some(at) = app.state.dashboard.last_loaded_at.as_deref() {
        spans.push(Span::styled(
            format!("  updated {at}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if let Some(err) = app.state.last_error.as_deref() {
        spans.push(Span::styled(format!("  {err}"), Style::default().fg(Color::Red)));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_dashboard(f: &mut Frame, area: Rect, app: &App) {
    let dashboard = &app.state.dashboard;
    let category = dashboard.category;
    let title = format!(" {} Updates: {} ", app.current_sport().display_name(), category.label());
    let block = default_border(Color::White).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    match &dashboard.view {
        LoadState::Loading => draw_message(
            f,
            inner,
            format!("Loading {category}..."),
            Color::DarkGray,
        ),
        LoadState::Failed(err) => draw_message(
            f,
            inner,
            format!("Error loading {category}:\n{err}\n\nPress r to retry"),
            Color::Red,
        ),
        LoadState::Empty => draw_message(
            f,
            inner,
            format!("No {category} available for this sport at the moment.\n\nPress r to refresh"),
            Color::DarkGray,
        ),
        LoadState::Loaded(records) => {
            let skip = dashboard.scroll_offset as usize;
            match records.first() {
                Some(NormalizedRecord::Game(_)) => draw_games(f, inner, records, skip),
                Some(NormalizedRecord::Standing(_)) => draw_standings(f, inner, records, skip),
                Some(NormalizedRecord::Team(_)) => draw_teams(f, inner, records, skip),
                None => {}
            }
        }
    }
}

fn draw_message(f: &mut Frame, area: Rect, msg: String, color: Color) {
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(color))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_games(f: &mut Frame, area: Rect, records: &[NormalizedRecord], skip: usize) {
    let lines: Vec<Line> = records
        .iter()
        .skip(skip)
        .filter_map(|r| match r {
            NormalizedRecord::Game(game) => Some(game_line(game)),
            _ => None,
        })
        .collect();
    f.render_widget(Paragraph::new(lines), area);
}

fn game_line(game: &GameRecord) -> Line<'static> {
    let date = game
        .date
        .map(|d| d.with_timezone(&Local).format("%m/%d %H:%M").to_string())
        .unwrap_or_else(|| "--/-- --:--".to_string());
    let status_color = if game.is_finished() { Color::Green } else { Color::Yellow };

    Line::from(vec![
        Span::styled(format!("{date}  "), Style::default().fg(Color::DarkGray)),
        Span::raw(format!(
            "{} {} - {} {}  ",
            game.home_team,
            game.home_score_label(),
            game.away_score_label(),
            game.away_team
        )),
        Span::styled(format!("[{}]", game.status_label), Style::default().fg(status_color)),
    ])
}

fn draw_standings(f: &mut Frame, area: Rect, records: &[NormalizedRecord], skip: usize) {
    let header = Row::new(["#", "Team", "P", "W", "D", "L", "GD", "Pts"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = records
        .iter()
        .skip(skip)
        .filter_map(|r| match r {
            NormalizedRecord::Standing(s) => Some(standing_row(s)),
            _ => None,
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(5),
        Constraint::Length(5),
    ];
    f.render_widget(Table::new(rows, widths).header(header), area);
}

fn standing_row(s: &StandingRecord) -> Row<'static> {
    Row::new([
        s.rank.to_string(),
        s.team_name.clone(),
        s.played.to_string(),
        s.wins.to_string(),
        s.draws.to_string(),
        s.losses.to_string(),
        s.goals_diff.map(|gd| format!("{gd:+}")).unwrap_or_else(|| "-".to_string()),
        s.points.to_string(),
    ])
}

fn draw_teams(f: &mut Frame, area: Rect, records: &[NormalizedRecord], skip: usize) {
    let lines: Vec<Line> = records
        .iter()
        .skip(skip)
        .filter_map(|r| match r {
            NormalizedRecord::Team(team) => Some(team_line(team)),
            _ => None,
        })
        .collect();
    f.render_widget(Paragraph::new(lines), area);
}

fn team_line(team: &TeamRecord) -> Line<'static> {
    // No images in a terminal; the initial stands in for a missing logo.
    let badge = match team.logo_url {
        Some(_) => "●".to_string(),
        None => team.team_name.chars().next().unwrap_or('?').to_string(),
    };
    let mut spans = vec![
        Span::styled(format!("{badge} "), Style::default().fg(Color::Cyan)),
        Span::raw(team.team_name.clone()),
        Span::styled(format!("  #{}", team.team_id), Style::default().fg(Color::DarkGray)),
    ];
    if let Some(logo) = team.logo_url.as_deref() {
        spans.push(Span::styled(format!("  {logo}"), Style::default().fg(Color::DarkGray)));
    }
    Line::from(spans)
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner,
    );
}

fn draw_logs(f: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let widget = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Cyan))
        .style_debug(Style::default().fg(Color::DarkGray));
    f.render_widget(widget, area);
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}
