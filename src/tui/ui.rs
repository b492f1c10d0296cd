use ratatui::prelude::*;
use ratatui::widgets::{Block, Clear, Gauge, List, ListItem, Paragraph, Wrap};

use crate::tui::app::{App, InputMode, Screen};

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 8 || area.width < 30 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Body(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1), // Title bar
        Constraint::Fill(1),   // Screen body
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    match app.screen {
        Screen::Picker => render_picker(frame, chunks[1], app),
        Screen::Question => render_question(frame, chunks[1], app),
        Screen::Result => render_result(frame, chunks[1], app),
    }
    render_status_bar(frame, chunks[2], app);

    if app.input_mode == InputMode::Help {
        render_help_popup(frame, app);
    }
}

fn text_alignment(app: &App) -> Alignment {
    if app.lang.is_rtl() {
        Alignment::Right
    } else {
        Alignment::Left
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let left = match app.active_quiz() {
        Some(quiz) => quiz.assessment().title.get(app.lang).to_string(),
        None => "Lead Quiz".to_string(),
    };
    let right = match app.lang {
        crate::assessment::Lang::En => "EN",
        crate::assessment::Lang::Ar => "AR",
    };

    let padding_len = (area.width as usize)
        .saturating_sub(left.chars().count() + right.len());
    let title = Line::from(vec![
        Span::styled(left, Style::default().fg(app.theme.title_color).bold()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right, Style::default().fg(app.theme.muted)),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn render_picker(frame: &mut Frame, area: Rect, app: &mut App) {
    if app.quizzes.is_empty() {
        let empty_msg = Paragraph::new("No assessments configured").alignment(Alignment::Center);
        frame.render_widget(empty_msg, area);
        return;
    }

    let lang = app.lang;
    let items: Vec<ListItem> = app
        .quizzes
        .iter()
        .enumerate()
        .map(|(idx, quiz)| {
            let assessment = quiz.assessment();
            let mut lines = vec![Line::from(vec![
                Span::styled(
                    format!("{}. ", idx + 1),
                    Style::default().fg(app.theme.option_index),
                ),
                Span::raw(assessment.title.get(lang).to_string()).bold(),
                Span::styled(
                    format!("  ({} questions)", assessment.len()),
                    Style::default().fg(app.theme.muted),
                ),
            ])];
            if let Some(ref description) = assessment.description {
                lines.push(Line::styled(
                    format!("   {}", description.get(lang)),
                    Style::default().fg(app.theme.muted),
                ));
            }
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items)
        .block(Block::bordered().title(" Choose an assessment "))
        .highlight_style(app.theme.option_selected)
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.picker_state);
}

fn render_question(frame: &mut Frame, area: Rect, app: &mut App) {
    let Some(session) = app.session.as_ref() else {
        return;
    };
    let progress = session.progress();
    let previous = app.previous_choice();
    let lang = app.lang;
    let alignment = text_alignment(app);

    let Some(question) = app.current_question() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1), // Progress gauge
        Constraint::Length(1), // Spacer
        Constraint::Length(3), // Prompt
        Constraint::Fill(1),   // Options
    ])
    .split(area);

    let gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(app.theme.gauge_filled)
                .bg(app.theme.gauge_empty),
        )
        .ratio((progress.percent / 100.0).clamp(0.0, 1.0))
        .label(format!(
            "Question {} of {}",
            progress.step_display, progress.total
        ));
    frame.render_widget(gauge, chunks[0]);

    let prompt = Paragraph::new(question.prompt.get(lang).to_string())
        .style(Style::default().fg(app.theme.text).bold())
        .alignment(alignment)
        .wrap(Wrap { trim: true });
    frame.render_widget(prompt, chunks[2]);

    let items: Vec<ListItem> = question
        .options
        .iter()
        .enumerate()
        .map(|(idx, option)| {
            let marker = if previous == Some(idx) { " *" } else { "" };
            let line = Line::from(vec![
                Span::styled(
                    format!("{}. ", idx + 1),
                    Style::default().fg(app.theme.option_index),
                ),
                Span::raw(option.label.get(lang).to_string()),
                Span::styled(marker, Style::default().fg(app.theme.option_previous)),
            ])
            .alignment(alignment);
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .block(Block::bordered())
        .highlight_style(app.theme.option_selected)
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, chunks[3], &mut app.option_state);
}

fn render_result(frame: &mut Frame, area: Rect, app: &App) {
    let (Some(quiz), Some(outcome)) = (app.active_quiz(), app.outcome()) else {
        return;
    };
    let assessment = quiz.assessment();
    let lang = app.lang;
    let min = assessment.min_score();
    let max = assessment.max_score();
    let tier_color = app.theme.tier_color(outcome.score, min, max);

    let bar = crate::output::score_bar(outcome.score, min, max, 24);
    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Score  ", Style::default().fg(app.theme.muted)),
            Span::styled(format!("{} / {}", outcome.score, max), Style::default().bold()),
        ]),
        Line::styled(bar, Style::default().fg(tier_color)),
        Line::from(""),
        Line::from(vec![
            Span::styled("Tier   ", Style::default().fg(app.theme.muted)),
            Span::styled(
                outcome.tier.name.get(lang).to_string(),
                Style::default().fg(tier_color).bold(),
            ),
        ]),
    ];

    if let Some(ref message) = outcome.tier.message {
        lines.push(Line::from(""));
        lines.push(Line::from(message.get(lang).to_string()));
    }

    if app.follow_up.is_some() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::raw("Press "),
            Span::styled("o", Style::default().fg(app.theme.status_key_color).bold()),
            Span::raw(" to get in touch"),
        ]));
    }

    let result = Paragraph::new(lines)
        .block(Block::bordered().title(" Your result "))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(result, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let text = if let Some((ref msg, _)) = app.flash_message {
        let msg_color = if msg.starts_with("Failed") || msg.starts_with("No ") {
            app.theme.flash_error
        } else {
            app.theme.flash_success
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let hints: &[(&str, &str)] = match app.screen {
            Screen::Picker => &[
                ("j/k", ":nav "),
                ("Enter", ":start "),
                ("l", ":language "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
            Screen::Question => &[
                ("j/k", ":nav "),
                ("Enter/1-9", ":answer "),
                ("b", ":back "),
                ("r", ":restart "),
                ("l", ":language "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
            Screen::Result => &[
                ("o", ":follow up "),
                ("r", ":retake "),
                ("Esc", ":assessments "),
                ("l", ":language "),
                ("q", ":quit"),
            ],
        };

        let mut spans = Vec::new();
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                *key,
                Style::default().fg(app.theme.status_key_color),
            ));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(app.theme.status_bar_bg)),
        area,
    );
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

fn render_help_popup(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect_fixed(50, 15, frame.area());

    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(Span::styled(" Keyboard Shortcuts ", app.theme.popup_title))
        .border_style(Style::default().fg(app.theme.popup_border));
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let key_style = Style::default().fg(app.theme.status_key_color).bold();
    let rows = [
        ("j / Down      ", "Next option"),
        ("k / Up        ", "Previous option"),
        ("Enter         ", "Answer with selected option"),
        ("1-9           ", "Answer with option N"),
        ("b / Backspace ", "Previous question"),
        ("r             ", "Restart assessment"),
        ("o             ", "Open follow-up link (result)"),
        ("Esc           ", "Back to assessment list"),
        ("l             ", "Switch English/Arabic"),
        ("?             ", "Show/hide this help"),
        ("q / Ctrl-c    ", "Quit"),
    ];

    let mut help_lines: Vec<Line> = rows
        .iter()
        .map(|(key, desc)| Line::from(vec![Span::styled(*key, key_style), Span::raw(*desc)]))
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(app.theme.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{catalog, Lang, Quiz};
    use crate::tui::theme::ThemeColors;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn app() -> App {
        let quizzes = catalog::builtin()
            .into_iter()
            .map(|a| Quiz::new(a).unwrap())
            .collect();
        App::new(quizzes, Lang::En, ThemeColors::dark(), None, None)
    }

    fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_centered_rect_fixed() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect_fixed(50, 10, area);
        assert_eq!(rect, Rect::new(25, 15, 50, 10));

        let small = centered_rect_fixed(50, 10, Rect::new(0, 0, 20, 5));
        assert_eq!(small.width, 20);
        assert_eq!(small.height, 5);
    }

    #[test]
    fn test_picker_lists_assessments() {
        let mut app = app();
        let screen = render(&mut app);
        assert!(screen.contains("AI Readiness Quiz"));
        assert!(screen.contains("Lead Qualification"));
    }

    #[test]
    fn test_question_screen_shows_progress() {
        let mut app = app();
        app.start_selected();
        let screen = render(&mut app);
        assert!(screen.contains("Question 1 of 5"));
        assert!(screen.contains("How is your business data stored today?"));
    }

    #[test]
    fn test_result_screen_shows_tier() {
        let mut app = app();
        app.start_selected();
        for _ in 0..5 {
            app.choose_option(3);
        }
        let screen = render(&mut app);
        assert!(screen.contains("Pioneer"));
        assert!(screen.contains("20 / 20"));
    }
}
