//! Session tracker: the single owner of observation state.
//!
//! All mutations go through [`SessionTracker`]. Every operation that records
//! something appends a [`LogEntry`], which also resets the inactivity clock.
//! Durations only change through [`SessionTracker::tick`], driven by the
//! 1-second timer while a session is active.
//!
//! The tracker is single-threaded by construction: the owner (the TUI loop)
//! calls [`SessionTracker::pump`] between key events, so timer firings and
//! user operations never interleave.

use chrono::{DateTime, Duration, Local};

use crate::activity_log::ActivityLog;
use crate::clock::{Clock, SystemClock};
use crate::config::{Config, MAX_INACTIVITY_SECS};
use crate::error::{Error, Result};
use crate::format::format_clock_time;
use crate::report;
use crate::timer::PeriodicTimer;
use crate::types::{
    ActionCounts, EngagementLevel, LogEntry, LogKind, ModeDurations, TeachingAction, TeachingMode,
};

pub const LABEL_SESSION_START: &str = "觀課開始";
pub const LABEL_SESSION_END: &str = "觀課結束";
pub const LABEL_MODE_SWITCH: &str = "切換模式";
pub const LABEL_MODE_STOP: &str = "停止模式";
pub const LABEL_NOTE: &str = "質性筆記";

/// Observation state. Read through [`SessionTracker::session`].
#[derive(Debug, Clone)]
pub struct Session {
    pub subject: String,
    pub is_active: bool,
    /// Set on every start, `None` until the first one
    pub start_time: Option<DateTime<Local>>,
    pub active_mode: Option<TeachingMode>,
    pub mode_durations: ModeDurations,
    pub action_counts: ActionCounts,
    /// Not reset when a new session starts
    pub engagement: EngagementLevel,
    pub last_interaction: DateTime<Local>,
    /// Inactivity warning flag
    pub stale: bool,
    pub log: ActivityLog,
}

impl Session {
    fn new(subject: String, now: DateTime<Local>) -> Self {
        Self {
            subject,
            is_active: false,
            start_time: None,
            active_mode: None,
            mode_durations: ModeDurations::default(),
            action_counts: ActionCounts::default(),
            engagement: EngagementLevel::default(),
            last_interaction: now,
            stale: false,
            log: ActivityLog::new(),
        }
    }
}

/// What a change notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Subject,
    Started,
    Stopped,
    Mode,
    Action,
    Engagement,
    Note,
    NoteDraft,
    Tick,
    Inactivity,
}

/// Callback fired after every state change.
pub type Listener = Box<dyn FnMut(&Session, Change) + Send>;

/// Timer periods and the inactivity threshold.
#[derive(Debug, Clone)]
pub struct TrackerSettings {
    pub tick_interval: Duration,
    pub inactivity_check_interval: Duration,
    pub inactivity_threshold: Duration,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::seconds(1),
            inactivity_check_interval: Duration::seconds(10),
            inactivity_threshold: Duration::seconds(300),
        }
    }
}

impl From<&Config> for TrackerSettings {
    /// Values above [`MAX_INACTIVITY_SECS`] are clamped, so an unvalidated
    /// config still yields representable durations.
    fn from(config: &Config) -> Self {
        let seconds = |secs: u64| Duration::seconds(secs.min(MAX_INACTIVITY_SECS) as i64);
        Self {
            inactivity_check_interval: seconds(config.inactivity.check_interval_secs),
            inactivity_threshold: seconds(config.inactivity.threshold_secs),
            ..Default::default()
        }
    }
}

/// Result of one [`SessionTracker::pump`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpOutcome {
    pub ticks: u32,
    pub inactivity_checked: bool,
}

pub struct SessionTracker {
    session: Session,
    note_draft: String,
    settings: TrackerSettings,
    clock: Box<dyn Clock>,
    tick_timer: PeriodicTimer,
    inactivity_timer: PeriodicTimer,
    listeners: Vec<Listener>,
}

impl SessionTracker {
    /// Tracker on the system clock.
    pub fn new(subject: impl Into<String>, settings: TrackerSettings) -> Self {
        Self::with_clock(subject, settings, Box::new(SystemClock))
    }

    /// Tracker on an explicit clock. The inactivity timer starts immediately
    /// and runs until [`shutdown`](Self::shutdown).
    pub fn with_clock(
        subject: impl Into<String>,
        settings: TrackerSettings,
        clock: Box<dyn Clock>,
    ) -> Self {
        let now = clock.now();
        let mut inactivity_timer = PeriodicTimer::new(settings.inactivity_check_interval);
        inactivity_timer.start(now);

        Self {
            session: Session::new(subject.into(), now),
            note_draft: String::new(),
            tick_timer: PeriodicTimer::new(settings.tick_interval),
            inactivity_timer,
            settings,
            clock,
            listeners: Vec::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn now(&self) -> DateTime<Local> {
        self.clock.now()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_active
    }

    pub fn is_stale(&self) -> bool {
        self.session.stale
    }

    /// Wall time since the current (or last) session started.
    pub fn elapsed(&self) -> Option<Duration> {
        self.session
            .start_time
            .map(|start| self.clock.now().signed_duration_since(start))
    }

    /// Register a change listener.
    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    // ========== Session Lifecycle ==========

    /// Change the subject. Locked while a session is active.
    pub fn set_subject(&mut self, subject: impl Into<String>) -> Result<()> {
        if self.session.is_active {
            return Err(Error::SessionAlreadyActive);
        }
        self.session.subject = subject.into();
        self.notify(Change::Subject);
        Ok(())
    }

    /// Start a new session, discarding the previous session's data.
    pub fn start_session(&mut self, subject: impl Into<String>) -> Result<()> {
        if self.session.is_active {
            return Err(Error::SessionAlreadyActive);
        }

        let now = self.clock.now();
        let session = &mut self.session;
        session.subject = subject.into();
        session.is_active = true;
        session.start_time = Some(now);
        session.active_mode = None;
        session.mode_durations = ModeDurations::default();
        session.action_counts = ActionCounts::default();
        session.log.clear();

        self.tick_timer.start(now);

        let detail = format!("科目：{}", self.session.subject);
        self.add_log(LogKind::Note, LABEL_SESSION_START, Some(detail));

        tracing::info!(subject = %self.session.subject, "Observation session started");
        self.notify(Change::Started);
        Ok(())
    }

    /// End the running session. Accumulated data stays readable.
    pub fn stop_session(&mut self) -> Result<()> {
        if !self.session.is_active {
            return Err(Error::SessionNotActive);
        }

        self.tick_timer.cancel();
        self.session.active_mode = None;
        self.session.is_active = false;
        self.add_log(LogKind::Note, LABEL_SESSION_END, None);

        tracing::info!(
            subject = %self.session.subject,
            mode_secs = self.session.mode_durations.total(),
            actions = self.session.action_counts.total(),
            "Observation session stopped"
        );
        self.notify(Change::Stopped);
        Ok(())
    }

    // ========== Recording ==========

    /// Switch to `mode`, or switch it off when it is already active.
    ///
    /// Returns `false` (and does nothing) when no session is active.
    pub fn toggle_mode(&mut self, mode: TeachingMode) -> bool {
        if !self.session.is_active {
            return false;
        }

        if self.session.active_mode == Some(mode) {
            self.session.active_mode = None;
            self.add_log(LogKind::Mode, LABEL_MODE_STOP, Some(mode.label().to_string()));
        } else {
            self.session.active_mode = Some(mode);
            self.add_log(
                LogKind::Mode,
                LABEL_MODE_SWITCH,
                Some(mode.label().to_string()),
            );
        }

        tracing::debug!(mode = ?self.session.active_mode, "Teaching mode toggled");
        self.notify(Change::Mode);
        true
    }

    /// Count one occurrence of `action`. Returns `false` when inactive.
    pub fn record_action(&mut self, action: TeachingAction) -> bool {
        if !self.session.is_active {
            return false;
        }

        self.session.action_counts.increment(action);
        self.add_log(LogKind::Action, action.label(), None);
        self.notify(Change::Action);
        true
    }

    /// Update the engagement rating. Allowed with or without a session.
    pub fn set_engagement(&mut self, level: EngagementLevel) {
        self.session.engagement = level;
        let label = format!("專注度：{}", level.as_str().to_uppercase());
        self.add_log(LogKind::Engagement, &label, None);
        self.notify(Change::Engagement);
    }

    /// Log a qualitative note. Blank text is ignored and leaves the draft alone.
    pub fn submit_note(&mut self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }

        self.add_log(LogKind::Note, LABEL_NOTE, Some(trimmed.to_string()));
        self.note_draft.clear();
        self.notify(Change::Note);
        true
    }

    // ========== Note Draft ==========

    pub fn note_draft(&self) -> &str {
        &self.note_draft
    }

    pub fn set_note_draft(&mut self, text: impl Into<String>) {
        self.note_draft = text.into();
        self.notify(Change::NoteDraft);
    }

    pub fn push_note_char(&mut self, c: char) {
        self.note_draft.push(c);
        self.notify(Change::NoteDraft);
    }

    pub fn pop_note_char(&mut self) {
        if self.note_draft.pop().is_some() {
            self.notify(Change::NoteDraft);
        }
    }

    /// Submit the pending draft as a note.
    pub fn submit_draft(&mut self) -> bool {
        let draft = self.note_draft.clone();
        self.submit_note(&draft)
    }

    // ========== Timers ==========

    /// Accrue one second to the active mode.
    pub fn tick(&mut self) {
        if !self.session.is_active {
            return;
        }
        if let Some(mode) = self.session.active_mode {
            self.session.mode_durations.increment(mode);
            self.notify(Change::Tick);
        }
    }

    /// Raise or clear the inactivity warning as of `now`.
    pub fn check_inactivity(&mut self, now: DateTime<Local>) {
        let idle = now.signed_duration_since(self.session.last_interaction);
        let stale = self.session.is_active && idle > self.settings.inactivity_threshold;

        if stale != self.session.stale {
            self.session.stale = stale;
            if stale {
                tracing::info!(idle_secs = idle.num_seconds(), "Inactivity warning raised");
            }
            self.notify(Change::Inactivity);
        }
    }

    /// Fire every timer period that has elapsed on the clock.
    pub fn pump(&mut self) -> PumpOutcome {
        let now = self.clock.now();

        let ticks = self.tick_timer.poll(now);
        for _ in 0..ticks {
            self.tick();
        }

        let inactivity_checked = self.inactivity_timer.poll(now) > 0;
        if inactivity_checked {
            self.check_inactivity(now);
        }

        PumpOutcome {
            ticks,
            inactivity_checked,
        }
    }

    /// Cancel both timers. Called when the owner tears the tracker down.
    pub fn shutdown(&mut self) {
        self.tick_timer.cancel();
        self.inactivity_timer.cancel();
        tracing::debug!("Tracker timers cancelled");
    }

    pub fn timers_running(&self) -> (bool, bool) {
        (
            self.tick_timer.is_running(),
            self.inactivity_timer.is_running(),
        )
    }

    // ========== Reports ==========

    /// Plain-text report as of the clock's current time.
    pub fn generate_report(&self) -> String {
        report::render_report(&self.session, self.clock.now())
    }

    /// Export file name for a report generated now.
    pub fn report_filename(&self) -> String {
        report::export_filename(&self.session.subject, self.clock.now().date_naive())
    }

    // ========== Internals ==========

    fn add_log(&mut self, kind: LogKind, label: &str, detail: Option<String>) {
        let now = self.clock.now();
        self.session.log.push(LogEntry {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: format_clock_time(now),
            kind,
            label: label.to_string(),
            detail,
        });
        self.session.last_interaction = now;
        self.session.stale = false;
    }

    fn notify(&mut self, change: Change) {
        for listener in &mut self.listeners {
            listener(&self.session, change);
        }
    }
}

impl Drop for SessionTracker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity_log::LOG_CAPACITY;
    use crate::clock::ManualClock;
    use chrono::TimeZone;
    use std::sync::{Arc, Mutex};

    fn t0() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 3, 9, 0, 0).unwrap()
    }

    fn tracker() -> (SessionTracker, ManualClock) {
        let clock = ManualClock::new(t0());
        let tracker = SessionTracker::with_clock(
            "數學",
            TrackerSettings::default(),
            Box::new(clock.clone()),
        );
        (tracker, clock)
    }

    fn started() -> (SessionTracker, ManualClock) {
        let (mut tracker, clock) = tracker();
        tracker.start_session("數學").unwrap();
        (tracker, clock)
    }

    #[test]
    fn test_new_tracker_is_idle() {
        let (tracker, _) = tracker();
        let session = tracker.session();
        assert!(!session.is_active);
        assert!(session.start_time.is_none());
        assert!(session.active_mode.is_none());
        assert!(session.log.is_empty());
        assert_eq!(session.engagement, EngagementLevel::Mid);
        assert_eq!(tracker.timers_running(), (false, true));
    }

    #[test]
    fn test_start_session_logs_subject() {
        let (tracker, _) = started();
        let session = tracker.session();

        assert!(session.is_active);
        assert_eq!(session.start_time, Some(t0()));
        assert_eq!(session.log.len(), 1);

        let entry = session.log.latest().unwrap();
        assert_eq!(entry.kind, LogKind::Note);
        assert_eq!(entry.label, LABEL_SESSION_START);
        assert_eq!(entry.detail.as_deref(), Some("科目：數學"));
        assert_eq!(entry.timestamp, "09:00:00");
        assert_eq!(tracker.timers_running(), (true, true));
    }

    #[test]
    fn test_start_while_active_is_rejected() {
        let (mut tracker, _) = started();
        tracker.toggle_mode(TeachingMode::Lecture);
        tracker.tick();

        let err = tracker.start_session("英文").unwrap_err();
        assert!(matches!(err, Error::SessionAlreadyActive));
        assert_eq!(tracker.session().subject, "數學");
        assert_eq!(tracker.session().mode_durations.lecture, 1);
    }

    #[test]
    fn test_stop_session_keeps_accumulators() {
        let (mut tracker, _) = started();
        tracker.toggle_mode(TeachingMode::Discussion);
        tracker.tick();
        tracker.record_action(TeachingAction::Patrol);

        tracker.stop_session().unwrap();
        let session = tracker.session();

        assert!(!session.is_active);
        assert!(session.active_mode.is_none());
        assert_eq!(session.mode_durations.discussion, 1);
        assert_eq!(session.action_counts.patrol, 1);
        assert_eq!(session.log.latest().unwrap().label, LABEL_SESSION_END);
        assert_eq!(tracker.timers_running(), (false, true));
    }

    #[test]
    fn test_stop_without_session_is_rejected() {
        let (mut tracker, _) = tracker();
        assert!(matches!(
            tracker.stop_session(),
            Err(Error::SessionNotActive)
        ));
        assert!(tracker.session().log.is_empty());
    }

    #[test]
    fn test_restart_resets_accumulators_but_not_engagement() {
        let (mut tracker, _) = started();
        tracker.toggle_mode(TeachingMode::Lecture);
        for _ in 0..5 {
            tracker.tick();
        }
        tracker.record_action(TeachingAction::Encourage);
        tracker.set_engagement(EngagementLevel::High);
        tracker.stop_session().unwrap();

        tracker.start_session("英文").unwrap();
        let session = tracker.session();

        assert_eq!(session.subject, "英文");
        assert_eq!(session.mode_durations, ModeDurations::default());
        assert_eq!(session.action_counts, ActionCounts::default());
        assert_eq!(session.log.len(), 1);
        assert_eq!(session.engagement, EngagementLevel::High);
    }

    #[test]
    fn test_modes_are_mutually_exclusive() {
        let (mut tracker, _) = started();
        let sequence = [
            TeachingMode::Lecture,
            TeachingMode::Discussion,
            TeachingMode::Discussion,
            TeachingMode::Digital,
            TeachingMode::Practice,
            TeachingMode::Lecture,
        ];

        for mode in sequence {
            tracker.toggle_mode(mode);
            let active: Vec<_> = TeachingMode::ALL
                .into_iter()
                .filter(|m| tracker.session().active_mode == Some(*m))
                .collect();
            assert!(active.len() <= 1);
        }
        assert_eq!(tracker.session().active_mode, Some(TeachingMode::Lecture));
    }

    #[test]
    fn test_toggle_same_mode_turns_it_off() {
        let (mut tracker, _) = started();
        tracker.toggle_mode(TeachingMode::Practice);
        let entry = tracker.session().log.latest().unwrap().clone();
        assert_eq!(entry.label, LABEL_MODE_SWITCH);
        assert_eq!(entry.detail.as_deref(), Some("實作/演算"));

        tracker.toggle_mode(TeachingMode::Practice);
        assert!(tracker.session().active_mode.is_none());
        let entry = tracker.session().log.latest().unwrap();
        assert_eq!(entry.kind, LogKind::Mode);
        assert_eq!(entry.label, LABEL_MODE_STOP);
    }

    #[test]
    fn test_recording_ignored_when_inactive() {
        let (mut tracker, _) = tracker();
        assert!(!tracker.toggle_mode(TeachingMode::Lecture));
        assert!(!tracker.record_action(TeachingAction::Correct));
        tracker.tick();

        let session = tracker.session();
        assert!(session.active_mode.is_none());
        assert_eq!(session.action_counts.total(), 0);
        assert!(session.log.is_empty());
    }

    #[test]
    fn test_ticks_accrue_only_to_active_mode() {
        let (mut tracker, _) = started();
        tracker.toggle_mode(TeachingMode::Lecture);
        for _ in 0..30 {
            tracker.tick();
        }
        tracker.toggle_mode(TeachingMode::Lecture);
        tracker.tick();

        let durations = tracker.session().mode_durations;
        assert_eq!(durations.lecture, 30);
        assert_eq!(durations.discussion + durations.practice + durations.digital, 0);
    }

    #[test]
    fn test_record_action_counts_each_tap() {
        let (mut tracker, _) = started();
        for _ in 0..3 {
            tracker.record_action(TeachingAction::Encourage);
        }
        tracker.record_action(TeachingAction::Correct);

        let counts = tracker.session().action_counts;
        assert_eq!(counts.encourage, 3);
        assert_eq!(counts.correct, 1);
        assert_eq!(counts.open_question, 0);
        assert_eq!(counts.closed_question, 0);
        assert_eq!(counts.patrol, 0);

        let entry = tracker.session().log.latest().unwrap();
        assert_eq!(entry.kind, LogKind::Action);
        assert_eq!(entry.label, "糾正規範");
        assert!(entry.detail.is_none());
    }

    #[test]
    fn test_set_engagement_allowed_when_inactive() {
        let (mut tracker, _) = tracker();
        tracker.set_engagement(EngagementLevel::Low);

        assert_eq!(tracker.session().engagement, EngagementLevel::Low);
        let entry = tracker.session().log.latest().unwrap();
        assert_eq!(entry.kind, LogKind::Engagement);
        assert_eq!(entry.label, "專注度：LOW");
    }

    #[test]
    fn test_submit_note_trims_and_clears_draft() {
        let (mut tracker, _) = started();
        tracker.set_note_draft("  學生分組討論熱烈  ");

        assert!(tracker.submit_draft());
        assert_eq!(tracker.note_draft(), "");
        let entry = tracker.session().log.latest().unwrap();
        assert_eq!(entry.label, LABEL_NOTE);
        assert_eq!(entry.detail.as_deref(), Some("學生分組討論熱烈"));
    }

    #[test]
    fn test_blank_note_is_ignored() {
        let (mut tracker, _) = started();
        tracker.set_note_draft("  ");

        assert!(!tracker.submit_draft());
        assert!(!tracker.submit_note(""));
        assert_eq!(tracker.note_draft(), "  ");
        assert_eq!(tracker.session().log.len(), 1);
    }

    #[test]
    fn test_note_draft_editing() {
        let (mut tracker, _) = tracker();
        tracker.push_note_char('好');
        tracker.push_note_char('!');
        tracker.pop_note_char();
        assert_eq!(tracker.note_draft(), "好");
    }

    #[test]
    fn test_log_is_bounded() {
        let (mut tracker, _) = started();
        for _ in 0..60 {
            tracker.record_action(TeachingAction::OpenQuestion);
        }

        let log = &tracker.session().log;
        assert_eq!(log.len(), LOG_CAPACITY);
        assert!(log.iter().all(|e| e.label == "開放提問"));
        assert_eq!(tracker.session().action_counts.open_question, 60);
    }

    #[test]
    fn test_inactivity_warning_raised_and_cleared() {
        let (mut tracker, clock) = started();

        clock.advance_secs(300);
        tracker.check_inactivity(clock.now());
        assert!(!tracker.is_stale());

        clock.advance_secs(1);
        tracker.check_inactivity(clock.now());
        assert!(tracker.is_stale());

        tracker.record_action(TeachingAction::Patrol);
        assert!(!tracker.is_stale());
    }

    #[test]
    fn test_inactivity_never_raised_without_session() {
        let (mut tracker, clock) = tracker();
        clock.advance_secs(3600);
        tracker.check_inactivity(clock.now());
        assert!(!tracker.is_stale());
    }

    #[test]
    fn test_stopping_clears_warning() {
        let (mut tracker, clock) = started();
        clock.advance_secs(400);
        tracker.check_inactivity(clock.now());
        assert!(tracker.is_stale());

        tracker.stop_session().unwrap();
        assert!(!tracker.is_stale());
    }

    #[test]
    fn test_pump_drives_ticks_from_clock() {
        let (mut tracker, clock) = started();
        tracker.toggle_mode(TeachingMode::Digital);

        clock.advance_secs(3);
        let outcome = tracker.pump();
        assert_eq!(outcome.ticks, 3);
        assert!(!outcome.inactivity_checked);
        assert_eq!(tracker.session().mode_durations.digital, 3);

        clock.advance_secs(7);
        let outcome = tracker.pump();
        assert_eq!(outcome.ticks, 7);
        assert!(outcome.inactivity_checked);
    }

    #[test]
    fn test_pump_after_stop_does_not_tick() {
        let (mut tracker, clock) = started();
        tracker.toggle_mode(TeachingMode::Lecture);
        tracker.stop_session().unwrap();

        clock.advance_secs(5);
        assert_eq!(tracker.pump().ticks, 0);
        assert_eq!(tracker.session().mode_durations.lecture, 0);
    }

    #[test]
    fn test_pump_raises_inactivity_warning() {
        let (mut tracker, clock) = started();
        for _ in 0..31 {
            clock.advance_secs(10);
            tracker.pump();
        }
        assert!(tracker.is_stale());
    }

    #[test]
    fn test_shutdown_cancels_timers() {
        let (mut tracker, clock) = started();
        tracker.toggle_mode(TeachingMode::Lecture);
        tracker.shutdown();

        clock.advance_secs(20);
        assert_eq!(tracker.pump(), PumpOutcome::default());
        assert_eq!(tracker.timers_running(), (false, false));
    }

    #[test]
    fn test_subject_locked_while_active() {
        let (mut tracker, _) = tracker();
        tracker.set_subject("自然").unwrap();
        assert_eq!(tracker.session().subject, "自然");

        tracker.start_session("自然").unwrap();
        assert!(tracker.set_subject("國文").is_err());
        assert_eq!(tracker.session().subject, "自然");
    }

    #[test]
    fn test_listeners_are_notified() {
        let (mut tracker, _) = tracker();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        tracker.subscribe(Box::new(move |session, change| {
            sink.lock().unwrap().push((change, session.is_active));
        }));

        tracker.start_session("數學").unwrap();
        tracker.toggle_mode(TeachingMode::Lecture);
        tracker.tick();
        tracker.stop_session().unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                (Change::Started, true),
                (Change::Mode, true),
                (Change::Tick, true),
                (Change::Stopped, false),
            ]
        );
    }

    #[test]
    fn test_elapsed_follows_clock() {
        let (tracker, clock) = started();
        clock.advance_secs(95);
        assert_eq!(tracker.elapsed(), Some(Duration::seconds(95)));
    }

    #[test]
    fn test_settings_from_config() {
        let mut config = Config::default();
        config.inactivity.threshold_secs = 60;
        config.inactivity.check_interval_secs = 5;

        let settings = TrackerSettings::from(&config);
        assert_eq!(settings.inactivity_threshold, Duration::seconds(60));
        assert_eq!(settings.inactivity_check_interval, Duration::seconds(5));
        assert_eq!(settings.tick_interval, Duration::seconds(1));
    }

    #[test]
    fn test_oversized_config_values_are_clamped() {
        let mut config = Config::default();
        config.inactivity.threshold_secs = 10_000_000_000_000_000;
        config.inactivity.check_interval_secs = 9_000_000_000_000_000;

        let settings = TrackerSettings::from(&config);
        let max = Duration::seconds(MAX_INACTIVITY_SECS as i64);
        assert_eq!(settings.inactivity_threshold, max);
        assert_eq!(settings.inactivity_check_interval, max);

        let clock = ManualClock::new(t0());
        let mut tracker = SessionTracker::with_clock("數學", settings, Box::new(clock.clone()));
        tracker.start_session("數學").unwrap();
        clock.advance_secs(MAX_INACTIVITY_SECS as i64 + 1);
        assert!(tracker.pump().inactivity_checked);
        assert!(tracker.is_stale());
    }

    #[test]
    fn test_report_filename_uses_local_date() {
        let clock = ManualClock::new(Local.with_ymd_and_hms(2024, 5, 3, 0, 30, 0).unwrap());
        let tracker =
            SessionTracker::with_clock("數學", TrackerSettings::default(), Box::new(clock));
        assert_eq!(tracker.report_filename(), "觀課紀錄_數學_2024-05-03.txt");
    }
}
