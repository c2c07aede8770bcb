//! UI rendering for the TUI.

use chronos_core::format::{format_clock_time, format_duration, format_local_date};
use chronos_core::{EngagementLevel, LogKind, TeachingAction, TeachingMode};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::app::{App, InputMode, ViewMode};

// ========== Palette ==========

/// Gold accent for the active mode and headings
const AMBER: Color = Color::Rgb(245, 158, 11);
/// Action counters and action log lines
const RUST_RED: Color = Color::Rgb(220, 38, 38);
/// Secondary text
const SLATE: Color = Color::Rgb(100, 116, 139);
/// Panel borders
const BORDER: Color = Color::Rgb(51, 65, 85);
const ENGAGEMENT_LOW: Color = Color::Rgb(239, 68, 68);
const ENGAGEMENT_MID: Color = Color::Rgb(234, 179, 8);
const ENGAGEMENT_HIGH: Color = Color::Rgb(34, 197, 94);

/// Render the application UI.
pub fn render(frame: &mut Frame, app: &App) {
    render_dashboard(frame, app);
    if app.view_mode == ViewMode::Summary {
        render_summary(frame, app);
    }
}

/// Render the tracking dashboard.
fn render_dashboard(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Layout: header, body, footer controls, key hints
    let chunks = Layout::vertical([
        Constraint::Length(3), // Header
        Constraint::Min(10),   // Modes | Actions + Log
        Constraint::Length(4), // Engagement + Note
        Constraint::Length(1), // Key hints
    ])
    .split(area);

    render_header(frame, app, chunks[0]);

    let body = Layout::horizontal([
        Constraint::Percentage(35), // Modes
        Constraint::Percentage(65), // Actions + Log
    ])
    .split(chunks[1]);

    render_modes_panel(frame, app, body[0]);

    let right = Layout::vertical([
        Constraint::Length(4), // Action counters
        Constraint::Min(4),    // Log stream
    ])
    .split(body[1]);

    render_actions_panel(frame, app, right[0]);
    render_log_panel(frame, app, right[1]);
    render_controls(frame, app, chunks[2]);
    render_key_hints(frame, app, chunks[3]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(BORDER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::horizontal([
        Constraint::Length(12), // App name
        Constraint::Min(10),    // Subject selector
        Constraint::Length(34), // Status + clock
    ])
    .split(inner);

    let app_name = Paragraph::new(Line::from(vec![
        Span::styled(" CHRONOS", Style::default().fg(AMBER).bold()),
    ]));
    frame.render_widget(app_name, chunks[0]);

    let session = app.tracker.session();
    let subject_line = if session.is_active {
        Line::from(vec![
            Span::styled("科目 ", Style::default().fg(SLATE)),
            Span::styled(session.subject.clone(), Style::default().bold()),
        ])
    } else {
        Line::from(vec![
            Span::styled("科目 ", Style::default().fg(SLATE)),
            Span::styled("◀ ", Style::default().fg(SLATE)),
            Span::styled(app.subject().to_string(), Style::default().fg(AMBER).bold()),
            Span::styled(" ▶", Style::default().fg(SLATE)),
        ])
    };
    frame.render_widget(Paragraph::new(subject_line), chunks[1]);

    let now = app.tracker.now();
    let mut status = Vec::new();
    if session.is_active {
        let elapsed = app
            .tracker
            .elapsed()
            .map(|d| d.num_seconds().max(0) as u64)
            .unwrap_or(0);
        status.push(Span::styled("● REC ", Style::default().fg(RUST_RED).bold()));
        status.push(Span::styled(
            format!("{}  ", format_duration(elapsed)),
            Style::default().fg(Color::White),
        ));
    } else {
        status.push(Span::styled("○ 待機  ", Style::default().fg(SLATE)));
    }
    status.push(Span::styled(
        format_clock_time(now),
        Style::default().fg(AMBER),
    ));
    frame.render_widget(
        Paragraph::new(Line::from(status)).alignment(Alignment::Right),
        chunks[2],
    );
}

fn render_modes_panel(frame: &mut Frame, app: &App, area: Rect) {
    let session = app.tracker.session();
    let block = Block::default()
        .title(" 教學模式 (States) ")
        .title_style(Style::default().fg(SLATE).bold())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER));

    let rows = TeachingMode::ALL.iter().enumerate().map(|(idx, mode)| {
        let active = session.active_mode == Some(*mode);
        let (marker, style) = if active {
            ("▶", Style::default().fg(AMBER).bold())
        } else {
            (" ", Style::default().fg(Color::Gray))
        };
        Row::new([
            Cell::from(format!("[{}]", idx + 1)).style(Style::default().fg(SLATE)),
            Cell::from(marker).style(style),
            Cell::from(mode.label()).style(style),
            Cell::from(format_duration(session.mode_durations.get(*mode)))
                .style(style.add_modifier(Modifier::BOLD)),
        ])
        .height(2)
    });

    let widths = [
        Constraint::Length(4),
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(8),
    ];
    frame.render_widget(Table::new(rows, widths).block(block), area);
}

fn render_actions_panel(frame: &mut Frame, app: &App, area: Rect) {
    let counts = app.tracker.session().action_counts;
    let block = Block::default()
        .title(" 教學行為 (Actions) ")
        .title_style(Style::default().fg(SLATE).bold())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER));

    let header = Row::new(TeachingAction::ALL.iter().enumerate().map(|(idx, action)| {
        Cell::from(format!("[{}] {}", idx + 5, action.label()))
            .style(Style::default().fg(Color::Gray))
    }));
    let values = Row::new(TeachingAction::ALL.iter().map(|action| {
        Cell::from(counts.get(*action).to_string()).style(Style::default().fg(RUST_RED).bold())
    }));

    let widths = [Constraint::Ratio(1, 5); 5];
    frame.render_widget(
        Table::new([values], widths).header(header).block(block),
        area,
    );
}

fn render_log_panel(frame: &mut Frame, app: &App, area: Rect) {
    let log = &app.tracker.session().log;
    let block = Block::default()
        .title(format!(" 即時紀錄流 (Log Stream) {} ", log.len()))
        .title_style(Style::default().fg(SLATE).bold())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER));

    if log.is_empty() {
        let placeholder = Paragraph::new("等待紀錄中...")
            .style(Style::default().fg(SLATE).add_modifier(Modifier::ITALIC))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let lines: Vec<Line> = log
        .iter()
        .map(|entry| {
            let label_color = match entry.kind {
                LogKind::Action => RUST_RED,
                LogKind::Mode => AMBER,
                LogKind::Note | LogKind::Engagement => Color::White,
            };
            let mut spans = vec![
                Span::styled(format!("{} ", entry.timestamp), Style::default().fg(SLATE)),
                Span::styled(entry.label.clone(), Style::default().fg(label_color)),
            ];
            if let Some(detail) = &entry.detail {
                spans.push(Span::styled(
                    format!("  {}", detail),
                    Style::default().fg(SLATE).add_modifier(Modifier::ITALIC),
                ));
            }
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Engagement selector and note input; highlighted while the inactivity warning is up.
fn render_controls(frame: &mut Frame, app: &App, area: Rect) {
    let stale = app.tracker.is_stale();
    let border_style = if stale {
        Style::default().fg(AMBER).add_modifier(Modifier::SLOW_BLINK)
    } else {
        Style::default().fg(BORDER)
    };

    let chunks = Layout::horizontal([
        Constraint::Percentage(35), // Engagement
        Constraint::Percentage(65), // Note input
    ])
    .split(area);

    // Engagement
    let mut title = vec![Span::styled(
        " 學生專注度 (Engagement) ",
        Style::default().fg(SLATE).bold(),
    )];
    if stale {
        title.push(Span::styled(
            "請更新現況! ",
            Style::default().fg(AMBER).bold(),
        ));
    }
    let block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style);

    let current = app.tracker.session().engagement;
    let buttons: Vec<Span> = EngagementLevel::ALL
        .iter()
        .flat_map(|level| {
            let (key, color) = match level {
                EngagementLevel::Low => ('l', ENGAGEMENT_LOW),
                EngagementLevel::Mid => ('m', ENGAGEMENT_MID),
                EngagementLevel::High => ('h', ENGAGEMENT_HIGH),
            };
            let style = if *level == current {
                Style::default().fg(Color::Black).bg(color).bold()
            } else {
                Style::default().fg(color)
            };
            [
                Span::styled(format!(" {} [{}] ", level.short_label(), key), style),
                Span::raw(" "),
            ]
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(buttons))
            .alignment(Alignment::Center)
            .block(block),
        chunks[0],
    );

    // Note input
    let editing = app.input_mode == InputMode::Note;
    let draft = app.tracker.note_draft();
    let note_block = Block::default()
        .title(" 質性筆記 (Note) ")
        .title_style(Style::default().fg(SLATE).bold())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if editing {
            Style::default().fg(AMBER)
        } else {
            border_style
        });

    let note_line = if draft.is_empty() && !editing {
        Line::from(Span::styled(
            "輸入質性觀察筆記... [n]",
            Style::default().fg(SLATE),
        ))
    } else {
        let mut spans = vec![Span::raw(draft.to_string())];
        if editing {
            spans.push(Span::styled("▏", Style::default().fg(AMBER)));
        }
        Line::from(spans)
    };
    frame.render_widget(Paragraph::new(note_line).block(note_block), chunks[1]);
}

fn render_key_hints(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(notice) = &app.notice {
        let color = if notice.is_error { RUST_RED } else { ENGAGEMENT_HIGH };
        let paragraph = Paragraph::new(Line::from(Span::styled(
            format!(" {}", notice.text),
            Style::default().fg(color).bold(),
        )));
        frame.render_widget(paragraph, area);
        return;
    }

    let key_style = Style::default().fg(AMBER).bold();
    let label_style = Style::default().fg(Color::DarkGray);
    let separator = Span::styled("  │  ", Style::default().fg(Color::DarkGray));

    let spans = match (app.input_mode, app.view_mode) {
        (InputMode::Note, _) => vec![
            Span::styled(" [Enter]", key_style),
            Span::styled(" 發送  ", label_style),
            separator,
            Span::styled("[Esc]", key_style),
            Span::styled(" 返回", label_style),
        ],
        (InputMode::Normal, ViewMode::Summary) => vec![
            Span::styled(" [c]", key_style),
            Span::styled(" 複製紀錄  ", label_style),
            separator.clone(),
            Span::styled("[w]", key_style),
            Span::styled(" 下載 TXT  ", label_style),
            separator.clone(),
            Span::styled("[j/k]", key_style),
            Span::styled(" 捲動  ", label_style),
            separator.clone(),
            Span::styled("[Esc]", key_style),
            Span::styled(" 關閉  ", label_style),
            separator,
            Span::styled("[q]", key_style),
            Span::styled(" 離開", label_style),
        ],
        (InputMode::Normal, ViewMode::Dashboard) => vec![
            Span::styled(" [s]", key_style),
            Span::styled(
                if app.tracker.is_active() {
                    " 結束  "
                } else {
                    " 開始  "
                },
                label_style,
            ),
            separator.clone(),
            Span::styled("[←/→]", key_style),
            Span::styled(" 科目  ", label_style),
            separator.clone(),
            Span::styled("[1-4]", key_style),
            Span::styled(" 模式  ", label_style),
            separator.clone(),
            Span::styled("[5-9]", key_style),
            Span::styled(" 行為  ", label_style),
            separator.clone(),
            Span::styled("[r]", key_style),
            Span::styled(" 報告  ", label_style),
            separator,
            Span::styled("[q]", key_style),
            Span::styled(" 離開", label_style),
        ],
    };

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Summary overlay: totals plus a scrollable report preview.
fn render_summary(frame: &mut Frame, app: &App) {
    let area = centered_rect(80, 85, frame.area());
    frame.render_widget(Clear, area);

    let session = app.tracker.session();
    let date = session
        .start_time
        .map(format_local_date)
        .unwrap_or_else(|| "-".to_string());

    let block = Block::default()
        .title(Line::from(vec![
            Span::styled(" 觀課總結報告 ", Style::default().fg(AMBER).bold()),
            Span::styled(
                format!("{} | {} ", session.subject, date),
                Style::default().fg(SLATE),
            ),
        ]))
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(AMBER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([
        Constraint::Length(8), // Totals
        Constraint::Min(4),    // Report preview
    ])
    .split(inner);

    let totals = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    let mode_rows = session.mode_durations.iter().map(|(mode, secs)| {
        Row::new([
            Cell::from(mode.label()).style(Style::default().fg(Color::Gray)),
            Cell::from(format_duration(secs)).style(Style::default().fg(AMBER)),
        ])
    });
    frame.render_widget(
        Table::new(mode_rows, [Constraint::Fill(1), Constraint::Length(8)]).block(
            Block::default()
                .title(" 教學模式分佈 ")
                .title_style(Style::default().fg(SLATE).bold())
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER)),
        ),
        totals[0],
    );

    let action_rows = session.action_counts.iter().map(|(action, count)| {
        Row::new([
            Cell::from(action.label()).style(Style::default().fg(Color::Gray)),
            Cell::from(count.to_string()).style(Style::default().fg(RUST_RED)),
        ])
    });
    frame.render_widget(
        Table::new(action_rows, [Constraint::Fill(1), Constraint::Length(6)]).block(
            Block::default()
                .title(" 教學行為計數 ")
                .title_style(Style::default().fg(SLATE).bold())
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER)),
        ),
        totals[1],
    );

    let preview = Paragraph::new(app.tracker.generate_report())
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: false })
        .scroll((app.summary_scroll, 0))
        .block(
            Block::default()
                .title(" 原始紀錄預覽 ")
                .title_style(Style::default().fg(SLATE).bold())
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER)),
        );
    frame.render_widget(preview, chunks[1]);
}

/// A rectangle centred in `area` taking the given percentages of it.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(vertical[1])[1]
}

