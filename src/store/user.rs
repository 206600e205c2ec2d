use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{StateChange, StoreObserver};
use crate::badges::UserBadge;
use crate::chat::{ChatMessage, ChatSession};
use crate::profile::{ProfileUpdate, UserProfile};
use crate::progress::ProgressEntry;
use crate::tracking::DailyLog;

/// The persisted subset of the user store: what survives a restart.
///
/// `today_log`, chat sessions, the active-session pointer, and the
/// streak counter are deliberately excluded; they are rebuilt each
/// session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStateSnapshot {
    pub profile: Option<UserProfile>,
    pub is_authenticated: bool,
    #[serde(default)]
    pub badges: Vec<UserBadge>,
    #[serde(default)]
    pub progress_entries: Vec<ProgressEntry>,
}

/// Authoritative holder of the signed-in user's state.
#[derive(Default)]
pub struct UserStore {
    profile: Option<UserProfile>,
    is_authenticated: bool,
    today_log: Option<DailyLog>,
    current_streak: u32,
    badges: Vec<UserBadge>,
    chat_sessions: Vec<ChatSession>,
    active_chat_session: Option<Uuid>,
    progress_entries: Vec<ProgressEntry>,
    observers: Vec<Box<dyn StoreObserver>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrates the persisted subset; everything else starts at its
    /// initial default.
    pub fn with_snapshot(snapshot: UserStateSnapshot) -> Self {
        Self {
            profile: snapshot.profile,
            is_authenticated: snapshot.is_authenticated,
            badges: snapshot.badges,
            progress_entries: snapshot.progress_entries,
            ..Self::default()
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn StoreObserver>) {
        self.observers.push(observer);
    }

    /// Captures the persisted subset for serialization.
    pub fn snapshot(&self) -> UserStateSnapshot {
        UserStateSnapshot {
            profile: self.profile.clone(),
            is_authenticated: self.is_authenticated,
            badges: self.badges.clone(),
            progress_entries: self.progress_entries.clone(),
        }
    }

    // ---- accessors ----

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    pub fn today_log(&self) -> Option<&DailyLog> {
        self.today_log.as_ref()
    }

    pub fn current_streak(&self) -> u32 {
        self.current_streak
    }

    pub fn badges(&self) -> &[UserBadge] {
        &self.badges
    }

    pub fn chat_sessions(&self) -> &[ChatSession] {
        &self.chat_sessions
    }

    pub fn chat_session(&self, session_id: Uuid) -> Option<&ChatSession> {
        self.chat_sessions
            .iter()
            .find(|session| session.id == session_id)
    }

    pub fn active_chat_session(&self) -> Option<Uuid> {
        self.active_chat_session
    }

    pub fn progress_entries(&self) -> &[ProgressEntry] {
        &self.progress_entries
    }

    // ---- mutations ----

    /// Replaces the profile and marks the session authenticated.
    pub fn set_profile(&mut self, profile: UserProfile) {
        self.profile = Some(profile);
        self.is_authenticated = true;
        self.notify(StateChange::ProfileReplaced);
    }

    /// Merges a partial update into the current profile, stamping
    /// `updated_at`. No-op when no profile exists.
    pub fn update_profile(&mut self, update: &ProfileUpdate) {
        let Some(profile) = self.profile.as_mut() else {
            return;
        };
        profile.apply_update(update);
        self.notify(StateChange::ProfileUpdated);
    }

    pub fn set_today_log(&mut self, log: DailyLog) {
        self.today_log = Some(log);
        self.notify(StateChange::TodayLogReplaced);
    }

    pub fn set_current_streak(&mut self, days: u32) {
        self.current_streak = days;
        self.notify(StateChange::StreakChanged);
    }

    /// Records an earned badge. Idempotent per badge id: once earned,
    /// later awards are complete no-ops and the original timestamp
    /// and progress are retained.
    pub fn add_badge(&mut self, badge: UserBadge) {
        let already_earned = self
            .badges
            .iter()
            .any(|earned| earned.badge.id == badge.badge.id);
        if already_earned {
            return;
        }
        self.badges.push(badge);
        self.notify(StateChange::BadgeEarned);
    }

    /// Prepends a session so the list stays most-recent-first.
    pub fn add_chat_session(&mut self, session: ChatSession) {
        self.chat_sessions.insert(0, session);
        self.notify(StateChange::ChatSessionAdded);
    }

    pub fn set_active_chat_session(&mut self, session_id: Option<Uuid>) {
        self.active_chat_session = session_id;
        self.notify(StateChange::ActiveChatSessionChanged);
    }

    /// Appends a message to the identified session and stamps its
    /// `updated_at`. Unknown session ids are a no-op.
    pub fn append_chat_message(&mut self, session_id: Uuid, message: ChatMessage) {
        let Some(session) = self
            .chat_sessions
            .iter_mut()
            .find(|session| session.id == session_id)
        else {
            return;
        };
        session.push_message(message);
        self.notify(StateChange::ChatMessageAppended);
    }

    /// Inserts an entry and re-sorts the collection descending by
    /// date. Relative order of entries sharing a date is unspecified.
    pub fn add_progress_entry(&mut self, entry: ProgressEntry) {
        self.progress_entries.insert(0, entry);
        self.progress_entries
            .sort_unstable_by(|a, b| b.date.cmp(&a.date));
        self.notify(StateChange::ProgressEntryAdded);
    }

    /// Resets every field to its initial default. The meal store is
    /// intentionally left untouched.
    pub fn logout(&mut self) {
        self.profile = None;
        self.is_authenticated = false;
        self.today_log = None;
        self.current_streak = 0;
        self.badges.clear();
        self.chat_sessions.clear();
        self.active_chat_session = None;
        self.progress_entries.clear();
        self.notify(StateChange::LoggedOut);
    }

    fn notify(&self, change: StateChange) {
        for observer in &self.observers {
            observer.state_changed(change, self);
        }
    }
}
