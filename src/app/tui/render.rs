use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Cell, Padding, Paragraph, Row, Table, TableState, Wrap,
};
use rand::Rng;

use super::super::flow::{Choice, FlowController, Menu, Stage};
use super::super::store::WatchStore;
use super::super::truncate;

const ACCENT: Color = Color::Rgb(207, 52, 118);

pub(super) fn draw_tui<S, R>(frame: &mut Frame, controller: &FlowController<'_, S, R>)
where
    S: WatchStore + ?Sized,
    R: Rng,
{
    let bg = Block::default().style(Style::default().bg(Color::Black));
    frame.render_widget(bg, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let menu = controller.menu();
    let active = menu.entries.iter().filter(|show| !show.deleted).count();
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "RANDOM EPISODE",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled("   ", Style::default()),
        Span::styled(
            format!("{active} shows"),
            Style::default().fg(Color::Rgb(185, 195, 210)),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(panel_block("Dashboard"));
    frame.render_widget(header, chunks[0]);

    let controls = match controller.stage() {
        Stage::Menu => {
            draw_menu(frame, chunks[1], menu);
            "↑/↓ or j/k move  Enter select  d delete  u restore  q quit"
        }
        Stage::AddShow { prompt, input, .. } => {
            draw_add_show(frame, chunks[1], prompt, input);
            "type a value  Enter submit  Backspace erase  Ctrl-C quit"
        }
        Stage::Result {
            show,
            outcome,
            choice,
        } => {
            let body = match outcome {
                Ok(episode) => format!("{}\n\n{episode}", truncate(&show.name, 60)),
                Err(err) => format!("{}\n\nError: {err}", truncate(&show.name, 60)),
            };
            draw_result(frame, chunks[1], &body, outcome.is_ok().then_some(*choice));
            if outcome.is_ok() {
                "↑/↓ or j/k toggle  Enter confirm  q quit"
            } else {
                "Enter back to menu  q quit"
            }
        }
    };

    let command_bar = Paragraph::new(Line::from(Span::styled(
        controls,
        Style::default().fg(Color::Rgb(185, 195, 210)),
    )))
    .alignment(Alignment::Center)
    .block(panel_block("Controls"));
    frame.render_widget(command_bar, chunks[2]);

    let status = controller.status();
    let status_widget = Paragraph::new(status.to_string())
        .style(status_style(status))
        .block(panel_block("Status"));
    frame.render_widget(status_widget, chunks[3]);
}

fn draw_menu(frame: &mut Frame, area: Rect, menu: &Menu) {
    let mut rows = vec![Row::new(vec![
        Cell::from("Add show"),
        Cell::from(""),
        Cell::from(""),
    ])];
    rows.extend(menu.entries.iter().map(|show| {
        if show.deleted {
            Row::new(vec![
                Cell::from(format!("{} (deleted, press u to undo)", truncate(&show.name, 40))),
                Cell::from(show.season_count().to_string()),
                Cell::from(show.episode_count().to_string()),
            ])
            .style(
                Style::default()
                    .fg(Color::Rgb(125, 135, 150))
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            Row::new(vec![
                Cell::from(truncate(&show.name, 56)),
                Cell::from(show.season_count().to_string()),
                Cell::from(show.episode_count().to_string()),
            ])
        }
    }));

    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(9),
            Constraint::Length(10),
        ],
    )
    .header(
        Row::new(vec!["Show", "Seasons", "Episodes"])
            .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
    )
    .block(panel_block("What do you want to do?"))
    .row_highlight_style(
        Style::default()
            .bg(ACCENT)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("> ");

    let mut table_state = TableState::default();
    table_state.select(Some(menu.cursor));
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn draw_add_show(frame: &mut Frame, area: Rect, prompt: &str, input: &str) {
    let text = vec![
        Line::from(Span::styled(
            prompt.to_string(),
            Style::default().fg(Color::Rgb(230, 230, 230)),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                input.to_string(),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::styled("█", Style::default().fg(ACCENT)),
        ]),
    ];
    let form = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(modal_block("Add show"));
    frame.render_widget(form, area);
}

fn draw_result(frame: &mut Frame, area: Rect, body: &str, choice: Option<Choice>) {
    let mut lines: Vec<Line> = body
        .lines()
        .map(|line| Line::from(line.to_string()))
        .collect();
    if let Some(current) = choice {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(" Watched ", choice_pill_style(Choice::Watched, current)),
            Span::styled("  ", Style::default()),
            Span::styled(" Later ", choice_pill_style(Choice::Later, current)),
        ]));
    }
    let result = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Rgb(230, 230, 230)))
        .wrap(Wrap { trim: true })
        .block(modal_block("Your episode"));
    frame.render_widget(result, area);
}

fn panel_block(title: &'static str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(125, 135, 150)))
        .title(title)
}

fn modal_block(title: &'static str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .title(title)
        .padding(Padding::new(2, 2, 1, 1))
}

fn choice_pill_style(choice: Choice, current: Choice) -> Style {
    if choice == current {
        Style::default()
            .bg(ACCENT)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .bg(Color::Rgb(72, 82, 96))
            .fg(Color::Rgb(230, 235, 242))
    }
}

fn status_style(status: &str) -> Style {
    if status.starts_with("ERROR:") {
        Style::default()
            .fg(Color::Rgb(255, 145, 120))
            .add_modifier(Modifier::BOLD)
    } else if status.starts_with("INFO:") {
        Style::default().fg(Color::Rgb(205, 165, 255))
    } else {
        Style::default().fg(Color::Rgb(230, 235, 242))
    }
}
