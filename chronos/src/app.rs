//! Application state for the TUI.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, Local, Timelike};
use chronos_core::export::{copy_report, save_report, ClipboardSink, FileSink};
use chronos_core::{EngagementLevel, SessionTracker, TeachingAction, TeachingMode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// How long a notice stays in the footer.
const NOTICE_SECS: i64 = 3;

/// Current screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Live tracking dashboard
    #[default]
    Dashboard,
    /// End-of-session summary with report preview and export actions
    Summary,
}

/// Where key presses go
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the note draft
    Note,
}

/// Transient message shown in the footer.
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
    expires_at: DateTime<Local>,
}

/// Main application state.
pub struct App {
    /// Session state and timers
    pub tracker: SessionTracker,
    /// Subject catalogue
    pub subjects: Vec<String>,
    /// Selected subject
    pub subject_index: usize,
    pub view_mode: ViewMode,
    pub input_mode: InputMode,
    /// Scroll offset for the report preview
    pub summary_scroll: u16,
    pub notice: Option<Notice>,
    /// Whether the app should exit
    pub should_quit: bool,
    clipboard: Box<dyn ClipboardSink>,
    exporter: Box<dyn FileSink>,
    /// Set by the tracker's change listener, cleared on redraw
    dirty: Arc<AtomicBool>,
    /// Wall-clock second of the last redraw (the header clock)
    last_drawn_second: Option<u32>,
}

impl App {
    /// Create a new App around a tracker and its export collaborators.
    pub fn new(
        mut tracker: SessionTracker,
        subjects: Vec<String>,
        subject_index: usize,
        clipboard: Box<dyn ClipboardSink>,
        exporter: Box<dyn FileSink>,
    ) -> Self {
        let dirty = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&dirty);
        tracker.subscribe(Box::new(move |_, _| {
            flag.store(true, Ordering::Relaxed);
        }));

        let subject_index = subject_index.min(subjects.len().saturating_sub(1));
        if let Some(subject) = subjects.get(subject_index) {
            // A fresh tracker has no running session, so this cannot fail
            let _ = tracker.set_subject(subject.clone());
        }

        Self {
            tracker,
            subjects,
            subject_index,
            view_mode: ViewMode::default(),
            input_mode: InputMode::default(),
            summary_scroll: 0,
            notice: None,
            should_quit: false,
            clipboard,
            exporter,
            dirty,
            last_drawn_second: None,
        }
    }

    /// Currently selected subject.
    pub fn subject(&self) -> &str {
        self.subjects
            .get(self.subject_index)
            .map(String::as_str)
            .unwrap_or(self.tracker.session().subject.as_str())
    }

    /// Fire due timers and expire notices (call each loop iteration).
    pub fn pump(&mut self) {
        self.tracker.pump();

        let now = self.tracker.now();
        if self.notice.as_ref().is_some_and(|n| n.expires_at <= now) {
            self.notice = None;
            self.mark_dirty();
        }
    }

    /// Whether anything visible changed since the last redraw.
    pub fn needs_redraw(&self) -> bool {
        self.dirty.load(Ordering::Relaxed)
            || self.last_drawn_second != Some(self.tracker.now().second())
    }

    /// Record that a frame was drawn.
    pub fn mark_drawn(&mut self) {
        self.dirty.store(false, Ordering::Relaxed);
        self.last_drawn_second = Some(self.tracker.now().second());
    }

    fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::Relaxed);
    }

    /// Tear down: cancel the tracker's timers.
    pub fn shutdown(&mut self) {
        self.tracker.shutdown();
    }

    // ========== Key Handling ==========

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        // Every key press can change what is on screen (mode, scroll, notice)
        self.mark_dirty();

        match self.input_mode {
            InputMode::Note => self.handle_note_key(key),
            InputMode::Normal => match self.view_mode {
                ViewMode::Dashboard => self.handle_dashboard_key(key),
                ViewMode::Summary => self.handle_summary_key(key),
            },
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('s') => self.toggle_session(),
            KeyCode::Left | KeyCode::Char('[') => self.cycle_subject(false),
            KeyCode::Right | KeyCode::Char(']') => self.cycle_subject(true),
            KeyCode::Char(c @ '1'..='4') => {
                let mode = TeachingMode::ALL[(c as usize) - ('1' as usize)];
                if !self.tracker.toggle_mode(mode) {
                    self.set_notice("請先開始觀課 (s)", true);
                }
            }
            KeyCode::Char(c @ '5'..='9') => {
                let action = TeachingAction::ALL[(c as usize) - ('5' as usize)];
                if !self.tracker.record_action(action) {
                    self.set_notice("請先開始觀課 (s)", true);
                }
            }
            KeyCode::Char('l') => self.tracker.set_engagement(EngagementLevel::Low),
            KeyCode::Char('m') => self.tracker.set_engagement(EngagementLevel::Mid),
            KeyCode::Char('h') => self.tracker.set_engagement(EngagementLevel::High),
            KeyCode::Char('n') | KeyCode::Char('i') => {
                self.input_mode = InputMode::Note;
            }
            KeyCode::Char('r') => self.open_summary(),
            _ => {}
        }
    }

    fn handle_note_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                // Draft is kept for later
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => {
                if self.tracker.submit_draft() {
                    self.input_mode = InputMode::Normal;
                }
            }
            KeyCode::Backspace => self.tracker.pop_note_char(),
            KeyCode::Char(c) => self.tracker.push_note_char(c),
            _ => {}
        }
    }

    /// Last scroll offset that still shows a report line.
    fn max_summary_scroll(&self) -> u16 {
        let lines = self.tracker.generate_report().lines().count();
        u16::try_from(lines.saturating_sub(1)).unwrap_or(u16::MAX)
    }

    fn handle_summary_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Esc | KeyCode::Char('r') => {
                self.view_mode = ViewMode::Dashboard;
            }
            KeyCode::Char('c') => self.copy_report(),
            KeyCode::Char('w') => self.save_report(),
            KeyCode::Down | KeyCode::Char('j') => {
                let max = self.max_summary_scroll();
                self.summary_scroll = self.summary_scroll.saturating_add(1).min(max);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.summary_scroll = self.summary_scroll.saturating_sub(1);
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.summary_scroll = 0;
            }
            _ => {}
        }
    }

    // ========== Actions ==========

    fn toggle_session(&mut self) {
        if self.tracker.is_active() {
            if let Err(e) = self.tracker.stop_session() {
                tracing::warn!(error = %e, "Failed to stop session");
                return;
            }
            self.open_summary();
        } else {
            let subject = self.subject().to_string();
            if let Err(e) = self.tracker.start_session(subject) {
                tracing::warn!(error = %e, "Failed to start session");
            }
        }
    }

    fn cycle_subject(&mut self, forward: bool) {
        if self.tracker.is_active() {
            self.set_notice("觀課進行中，無法更換科目", true);
            return;
        }
        if self.subjects.is_empty() {
            return;
        }

        let len = self.subjects.len();
        self.subject_index = if forward {
            (self.subject_index + 1) % len
        } else {
            (self.subject_index + len - 1) % len
        };

        let subject = self.subjects[self.subject_index].clone();
        if let Err(e) = self.tracker.set_subject(subject) {
            tracing::warn!(error = %e, "Failed to change subject");
        }
    }

    fn open_summary(&mut self) {
        self.summary_scroll = 0;
        self.view_mode = ViewMode::Summary;
    }

    fn copy_report(&mut self) {
        match copy_report(&self.tracker, self.clipboard.as_mut()) {
            Ok(()) => self.set_notice("已複製到剪貼簿", false),
            Err(e) => self.set_notice(format!("複製失敗：{}", e), true),
        }
    }

    fn save_report(&mut self) {
        match save_report(&self.tracker, self.exporter.as_mut()) {
            Ok(path) => self.set_notice(format!("已儲存：{}", path.display()), false),
            Err(e) => self.set_notice(format!("儲存失敗：{}", e), true),
        }
    }

    fn set_notice(&mut self, text: impl Into<String>, is_error: bool) {
        self.notice = Some(Notice {
            text: text.into(),
            is_error,
            expires_at: self.tracker.now() + Duration::seconds(NOTICE_SECS),
        });
        self.mark_dirty();
    }
}
