//! In-memory application state.
//!
//! Two stores hold everything the UI reads: [`UserStore`] for the
//! signed-in user's data (with a persisted subset) and [`MealStore`]
//! for session-only meal state. Store operations are synchronous and
//! infallible; all I/O and error handling live above them. Stores are
//! plain values meant to be constructed and passed explicitly, never
//! reached through globals.

mod meal;
mod user;

pub use meal::MealStore;
pub use user::{UserStateSnapshot, UserStore};

/// Which user-store mutation just happened. Emitted to observers
/// after the in-memory state has been updated; calls that turn out to
/// be no-ops (duplicate badge, update without a profile) emit nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    ProfileReplaced,
    ProfileUpdated,
    TodayLogReplaced,
    StreakChanged,
    BadgeEarned,
    ChatSessionAdded,
    ActiveChatSessionChanged,
    ChatMessageAppended,
    ProgressEntryAdded,
    LoggedOut,
}

/// Receives a notification after every effective user-store mutation.
/// The persistence layer subscribes one of these to keep the durable
/// slot in sync; the store itself stays free of I/O.
pub trait StoreObserver {
    fn state_changed(&self, change: StateChange, store: &UserStore);
}
