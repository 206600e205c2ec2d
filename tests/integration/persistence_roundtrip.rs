use chrono::Utc;
use tempfile::TempDir;
use uuid::Uuid;

use nutribase::profile::{DietaryPreference, ProfileUpdate};
use nutribase::progress::ProgressEntry;
use nutribase::storage::{SlotPersistence, UserStateSlot, USER_STATE_FILE};
use nutribase::store::{UserStateSnapshot, UserStore};

use crate::support::{earned_badge, sample_profile};

fn slot_in(dir: &TempDir) -> UserStateSlot {
    UserStateSlot::new(dir.path().join(USER_STATE_FILE))
}

#[test]
fn snapshot_round_trip_preserves_typed_dates() {
    let dir = TempDir::new().unwrap();
    let slot = slot_in(&dir);

    let profile = sample_profile();
    let badge = earned_badge("hydration_hero", Utc::now());
    let entry = ProgressEntry::new(profile.id, Utc::now().date_naive()).with_weight(69.5);
    let snapshot = UserStateSnapshot {
        profile: Some(profile.clone()),
        is_authenticated: true,
        badges: vec![badge.clone()],
        progress_entries: vec![entry.clone()],
    };

    slot.save(&snapshot).unwrap();
    let reloaded = slot.load().unwrap().expect("slot should exist");

    let reloaded_profile = reloaded.profile.unwrap();
    assert_eq!(reloaded_profile, profile);
    // Date fields come back as real timestamps, not strings.
    assert_eq!(reloaded_profile.created_at, profile.created_at);
    assert_eq!(reloaded.badges[0].earned_at, badge.earned_at);
    assert_eq!(reloaded.progress_entries[0].date, entry.date);
}

#[test]
fn missing_slot_loads_as_none() {
    let dir = TempDir::new().unwrap();
    assert!(slot_in(&dir).load().unwrap().is_none());
}

#[test]
fn corrupt_slot_surfaces_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(USER_STATE_FILE);
    std::fs::write(&path, "not json at all").unwrap();
    assert!(UserStateSlot::new(path).load().is_err());
}

#[test]
fn slot_write_outcome_reports_a_content_hash() {
    let dir = TempDir::new().unwrap();
    let slot = slot_in(&dir);
    let snapshot = UserStateSnapshot {
        profile: Some(sample_profile()),
        is_authenticated: true,
        badges: Vec::new(),
        progress_entries: Vec::new(),
    };

    let first = slot.save(&snapshot).unwrap();
    let second = slot.save(&snapshot).unwrap();
    assert_eq!(first.hash.len(), 64);
    assert_eq!(first.hash, second.hash, "same content, same hash");
}

#[test]
fn every_user_store_mutation_rewrites_the_slot() {
    let dir = TempDir::new().unwrap();
    let slot = slot_in(&dir);

    let mut store = UserStore::new();
    store.subscribe(Box::new(SlotPersistence::new(slot.clone())));

    store.set_profile(sample_profile());
    assert!(slot.path().exists(), "set_profile must write the slot");
    assert!(slot.load().unwrap().unwrap().is_authenticated);

    store.add_badge(earned_badge("meal_planner", Utc::now()));
    assert_eq!(slot.load().unwrap().unwrap().badges.len(), 1);

    store.update_profile(&ProfileUpdate::default().name("Renamed"));
    assert_eq!(
        slot.load().unwrap().unwrap().profile.unwrap().name,
        "Renamed"
    );

    store.logout();
    let after_logout = slot.load().unwrap().unwrap();
    assert!(after_logout.profile.is_none());
    assert!(!after_logout.is_authenticated);
    assert!(after_logout.badges.is_empty());
}

#[test]
fn restart_rehydrates_the_persisted_subset_only() {
    let dir = TempDir::new().unwrap();
    let slot = slot_in(&dir);

    // First run: onboard a vegan weight-loss profile and earn a badge.
    {
        let mut store = UserStore::new();
        store.subscribe(Box::new(SlotPersistence::new(slot.clone())));
        store.set_profile(sample_profile());
        store.set_current_streak(6);
        store.add_badge(earned_badge("hydration_hero", Utc::now()));
        store.add_progress_entry(
            ProgressEntry::new(Uuid::new_v4(), Utc::now().date_naive()).with_weight(70.0),
        );
        store.set_today_log(nutribase::tracking::DailyLog::new(
            Utc::now().date_naive(),
            2000,
            2500,
        ));
    }

    // "Restart": build a fresh store from the slot.
    let snapshot = slot.load().unwrap().expect("slot written on first run");
    let store = UserStore::with_snapshot(snapshot);

    let profile = store.profile().expect("profile survives the restart");
    assert_eq!(
        profile.dietary_preferences,
        vec![DietaryPreference::Vegan]
    );
    assert!(store.is_authenticated());
    assert_eq!(store.badges().len(), 1);
    assert_eq!(store.progress_entries().len(), 1);
    // Ephemeral fields start over.
    assert!(store.today_log().is_none());
    assert!(store.chat_sessions().is_empty());
    assert_eq!(store.active_chat_session(), None);
    assert_eq!(store.current_streak(), 0);
}
