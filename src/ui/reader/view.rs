use crate::app::{AppMode, RenderState, StatusKind, StatusLine, WordDisplay};
use crate::reading::PlaybackState;
use crate::ui::theme::Palette;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const HELP_LINES: [&str; 12] = [
    "space        play / pause",
    "← →          previous / next word",
    "+ -          faster / slower by 25 WPM",
    "0-9          jump to 0%-90%",
    "r            back to the first word",
    "esc          close the document",
    "t            light / dark theme",
    "@path  @@    open a file / the clipboard",
    ":wpm N       set the speed",
    ":seek N%     jump to a position (or :seek N for word N)",
    ":theme light|dark   :reset   :close",
    "q  :q        quit",
];

/// Reading time banded the way a person would say it.
pub fn format_estimate(seconds: f64) -> String {
    let minutes = (seconds / 60.0).round() as u64;
    match minutes {
        0 => "Less than 1 minute".to_string(),
        1 => "1 minute".to_string(),
        n => format!("{} minutes", n),
    }
}

pub fn render_word_display(display: &WordDisplay, palette: &Palette) -> Paragraph<'static> {
    let base = Style::default().bg(palette.background);
    let line = match display {
        WordDisplay::Word { text, .. } => Line::from(Span::styled(
            text.clone(),
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        )),
        WordDisplay::Finished => Line::from(Span::styled(
            "Finished!",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )),
        WordDisplay::Empty => return render_placeholder(palette),
    };

    Paragraph::new(line).alignment(Alignment::Center).style(base)
}

pub fn render_placeholder(palette: &Palette) -> Paragraph<'static> {
    let text = "Type @path to open a PDF, EPUB or text file\nOr @@ to read the clipboard\n? for keys, q to quit";
    Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(palette.dimmed).bg(palette.background))
}

pub fn render_progress_bar(progress: f64, width: usize, palette: &Palette) -> Line<'static> {
    let progress = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    let filled_len = ((progress * width as f64).round() as usize).min(width);
    let empty_len = width - filled_len;

    Line::from(vec![
        Span::styled("━".repeat(filled_len), Style::default().fg(palette.accent)),
        Span::styled("─".repeat(empty_len), Style::default().fg(palette.dimmed)),
    ])
    .alignment(Alignment::Center)
}

/// "Word 3/120 · 300 WPM · 1 minute" plus live stats when there are any.
pub fn status_text(state: &RenderState) -> String {
    let mut parts = Vec::new();

    if let Some((word, total)) = state.position {
        parts.push(format!("Word {}/{}", word, total));
    }
    parts.push(format!("{} WPM", state.base_rate));
    if let Some(seconds) = state.estimated_seconds {
        parts.push(format_estimate(seconds));
    }
    if let Some(stats) = state.stats {
        parts.push(format!(
            "{} words in {:.0}s ({:.0} WPM actual)",
            stats.words_read,
            stats.elapsed_seconds(),
            stats.effective_wpm
        ));
    }
    let playback = match state.playback {
        PlaybackState::Playing => "PLAYING",
        PlaybackState::Paused => "PAUSED",
        PlaybackState::Idle => "IDLE",
    };
    parts.push(playback.to_string());

    parts.join(" · ")
}

pub fn render_status_line(state: &RenderState, palette: &Palette) -> Line<'static> {
    Line::from(Span::styled(
        status_text(state),
        Style::default().fg(palette.dimmed),
    ))
    .alignment(Alignment::Center)
}

pub fn render_message(
    status: Option<&StatusLine>,
    loading: Option<&str>,
    palette: &Palette,
) -> Line<'static> {
    if let Some(label) = loading {
        return Line::from(Span::styled(
            format!("Loading {}...", label),
            Style::default().fg(palette.dimmed),
        ));
    }
    let Some(status) = status else {
        return Line::default();
    };
    let color = match status.kind {
        StatusKind::Info => palette.text,
        StatusKind::Warning | StatusKind::Error => palette.error,
    };
    Line::from(Span::styled(status.text.clone(), Style::default().fg(color)))
}

pub fn render_command_deck(frame: &mut Frame, area: Rect, state: &RenderState, palette: &Palette) {
    frame.render_widget(Clear, area);

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let accent_bar = Paragraph::new("▌")
        .style(Style::default().fg(palette.accent).bg(palette.surface));
    frame.render_widget(accent_bar, layout[0]);

    let body = if state.mode == AppMode::Command {
        Line::from(vec![
            Span::styled(state.mode.label(), Style::default().fg(palette.accent)),
            Span::styled(state.input.clone(), Style::default().fg(palette.text)),
            Span::styled("█", Style::default().fg(palette.dimmed)),
        ])
    } else {
        let hint = match &state.document {
            Some(title) => format!("{} · space play · ? keys", title),
            None => "@path, @@, ? keys or :q".to_string(),
        };
        Line::from(vec![
            Span::styled(state.mode.label(), Style::default().fg(palette.dimmed)),
            Span::styled(hint, Style::default().fg(palette.dimmed)),
        ])
    };

    let input_widget = Paragraph::new(body)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(palette.dimmed)),
        )
        .style(Style::default().fg(palette.text).bg(palette.surface));
    frame.render_widget(input_widget, layout[1]);
}

pub fn render_help(frame: &mut Frame, area: Rect, palette: &Palette) {
    let width = HELP_LINES
        .iter()
        .map(|line| line.chars().count() as u16)
        .max()
        .unwrap_or(0)
        + 4;
    let height = HELP_LINES.len() as u16 + 2;
    let popup = centered(area, width, height);

    let text: Vec<Line> = HELP_LINES.iter().map(|line| Line::from(*line)).collect();
    let help = Paragraph::new(text)
        .block(
            Block::default()
                .title(" keys ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent)),
        )
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(palette.text).bg(palette.surface));

    frame.render_widget(Clear, popup);
    frame.render_widget(help, popup);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Lay out and draw one frame.
pub fn render_reader(frame: &mut Frame, state: &RenderState) {
    let palette = Palette::for_theme(state.theme);
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background)),
        area,
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // word
            Constraint::Length(1), // progress
            Constraint::Length(1), // status
            Constraint::Length(1), // message
            Constraint::Length(2), // command deck
        ])
        .split(area);

    // Keep the word on the middle row of its area.
    let word_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Min(3),
            Constraint::Percentage(45),
        ])
        .split(rows[0]);
    frame.render_widget(render_word_display(&state.display, &palette), word_rows[1]);

    let bar_width = (rows[1].width as usize).saturating_sub(4).min(60);
    frame.render_widget(
        render_progress_bar(state.progress, bar_width, &palette),
        rows[1],
    );
    frame.render_widget(render_status_line(state, &palette), rows[2]);
    frame.render_widget(
        render_message(state.status.as_ref(), state.loading.as_deref(), &palette),
        rows[3],
    );
    render_command_deck(frame, rows[4], state, &palette);

    if state.help_visible {
        render_help(frame, area, &palette);
    }
}
