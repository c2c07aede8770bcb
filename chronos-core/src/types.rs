//! Core domain types for chronos
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Session** | One timed classroom observation, from start to stop |
//! | **Mode** | A teaching state (lecture, discussion, ...); at most one is active |
//! | **Action** | A discrete teaching behaviour the observer taps to count |
//! | **Engagement** | The observer's current rating of student attention |
//! | **Log entry** | One line of the activity stream, created by every recorded event |
//!
//! Modes and actions are closed enumerations. Per-variant accumulators are
//! fixed-shape records ([`ModeDurations`], [`ActionCounts`]) so every variant
//! always has a value and nothing can be inserted or removed.

use serde::{Deserialize, Serialize};

// ============================================
// Teaching Modes
// ============================================

/// Mutually exclusive teaching state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeachingMode {
    Lecture,
    Discussion,
    Practice,
    Digital,
}

impl TeachingMode {
    /// All modes in display order.
    pub const ALL: [TeachingMode; 4] = [
        TeachingMode::Lecture,
        TeachingMode::Discussion,
        TeachingMode::Practice,
        TeachingMode::Digital,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TeachingMode::Lecture => "lecture",
            TeachingMode::Discussion => "discussion",
            TeachingMode::Practice => "practice",
            TeachingMode::Digital => "digital",
        }
    }

    /// Label shown in the UI and in reports.
    pub fn label(&self) -> &'static str {
        match self {
            TeachingMode::Lecture => "講述教學",
            TeachingMode::Discussion => "小組討論",
            TeachingMode::Practice => "實作/演算",
            TeachingMode::Digital => "數位運用",
        }
    }
}

impl std::fmt::Display for TeachingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for TeachingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lecture" => Ok(TeachingMode::Lecture),
            "discussion" => Ok(TeachingMode::Discussion),
            "practice" => Ok(TeachingMode::Practice),
            "digital" => Ok(TeachingMode::Digital),
            _ => Err(format!("unknown teaching mode: {}", s)),
        }
    }
}

// ============================================
// Teaching Actions
// ============================================

/// Countable teaching behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeachingAction {
    /// Positive reinforcement
    Encourage,
    /// Behaviour correction
    Correct,
    /// Open-ended question
    OpenQuestion,
    /// Closed question
    ClosedQuestion,
    /// Walking around the room
    Patrol,
}

impl TeachingAction {
    /// All actions in display order.
    pub const ALL: [TeachingAction; 5] = [
        TeachingAction::Encourage,
        TeachingAction::Correct,
        TeachingAction::OpenQuestion,
        TeachingAction::ClosedQuestion,
        TeachingAction::Patrol,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TeachingAction::Encourage => "encourage",
            TeachingAction::Correct => "correct",
            TeachingAction::OpenQuestion => "open_question",
            TeachingAction::ClosedQuestion => "closed_question",
            TeachingAction::Patrol => "patrol",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TeachingAction::Encourage => "正向鼓勵",
            TeachingAction::Correct => "糾正規範",
            TeachingAction::OpenQuestion => "開放提問",
            TeachingAction::ClosedQuestion => "封閉提問",
            TeachingAction::Patrol => "巡視走動",
        }
    }
}

impl std::fmt::Display for TeachingAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for TeachingAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "encourage" => Ok(TeachingAction::Encourage),
            "correct" => Ok(TeachingAction::Correct),
            "open_question" => Ok(TeachingAction::OpenQuestion),
            "closed_question" => Ok(TeachingAction::ClosedQuestion),
            "patrol" => Ok(TeachingAction::Patrol),
            _ => Err(format!("unknown teaching action: {}", s)),
        }
    }
}

// ============================================
// Engagement
// ============================================

/// Observer's rating of student engagement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementLevel {
    Low,
    #[default]
    Mid,
    High,
}

impl EngagementLevel {
    pub const ALL: [EngagementLevel; 3] = [
        EngagementLevel::Low,
        EngagementLevel::Mid,
        EngagementLevel::High,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EngagementLevel::Low => "low",
            EngagementLevel::Mid => "mid",
            EngagementLevel::High => "high",
        }
    }

    /// Short label for buttons (低 / 中 / 高).
    pub fn short_label(&self) -> &'static str {
        match self {
            EngagementLevel::Low => "低",
            EngagementLevel::Mid => "中",
            EngagementLevel::High => "高",
        }
    }
}

impl std::str::FromStr for EngagementLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(EngagementLevel::Low),
            "mid" => Ok(EngagementLevel::Mid),
            "high" => Ok(EngagementLevel::High),
            _ => Err(format!("unknown engagement level: {}", s)),
        }
    }
}

// ============================================
// Accumulators
// ============================================

/// Seconds accrued per teaching mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeDurations {
    pub lecture: u64,
    pub discussion: u64,
    pub practice: u64,
    pub digital: u64,
}

impl ModeDurations {
    pub fn get(&self, mode: TeachingMode) -> u64 {
        match mode {
            TeachingMode::Lecture => self.lecture,
            TeachingMode::Discussion => self.discussion,
            TeachingMode::Practice => self.practice,
            TeachingMode::Digital => self.digital,
        }
    }

    fn slot_mut(&mut self, mode: TeachingMode) -> &mut u64 {
        match mode {
            TeachingMode::Lecture => &mut self.lecture,
            TeachingMode::Discussion => &mut self.discussion,
            TeachingMode::Practice => &mut self.practice,
            TeachingMode::Digital => &mut self.digital,
        }
    }

    /// Add one second to `mode`.
    pub fn increment(&mut self, mode: TeachingMode) {
        *self.slot_mut(mode) += 1;
    }

    /// (mode, seconds) pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (TeachingMode, u64)> + '_ {
        TeachingMode::ALL.into_iter().map(|mode| (mode, self.get(mode)))
    }

    pub fn total(&self) -> u64 {
        self.iter().map(|(_, secs)| secs).sum()
    }
}

/// Tap counts per teaching action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCounts {
    pub encourage: u64,
    pub correct: u64,
    pub open_question: u64,
    pub closed_question: u64,
    pub patrol: u64,
}

impl ActionCounts {
    pub fn get(&self, action: TeachingAction) -> u64 {
        match action {
            TeachingAction::Encourage => self.encourage,
            TeachingAction::Correct => self.correct,
            TeachingAction::OpenQuestion => self.open_question,
            TeachingAction::ClosedQuestion => self.closed_question,
            TeachingAction::Patrol => self.patrol,
        }
    }

    fn slot_mut(&mut self, action: TeachingAction) -> &mut u64 {
        match action {
            TeachingAction::Encourage => &mut self.encourage,
            TeachingAction::Correct => &mut self.correct,
            TeachingAction::OpenQuestion => &mut self.open_question,
            TeachingAction::ClosedQuestion => &mut self.closed_question,
            TeachingAction::Patrol => &mut self.patrol,
        }
    }

    pub fn increment(&mut self, action: TeachingAction) {
        *self.slot_mut(action) += 1;
    }

    /// (action, count) pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (TeachingAction, u64)> + '_ {
        TeachingAction::ALL
            .into_iter()
            .map(|action| (action, self.get(action)))
    }

    pub fn total(&self) -> u64 {
        self.iter().map(|(_, count)| count).sum()
    }
}

// ============================================
// Log Entries
// ============================================

/// Category of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    Mode,
    Action,
    Note,
    Engagement,
}

/// A single entry in the activity stream. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Unique identifier (UUID v4)
    pub id: String,
    /// Local wall-clock time, `HH:MM:SS`
    pub timestamp: String,
    pub kind: LogKind,
    pub label: String,
    pub detail: Option<String>,
}

impl LogEntry {
    /// Render as a report line: `[timestamp] label: detail`.
    pub fn report_line(&self) -> String {
        match &self.detail {
            Some(detail) => format!("[{}] {}: {}", self.timestamp, self.label, detail),
            None => format!("[{}] {}", self.timestamp, self.label),
        }
    }
}
