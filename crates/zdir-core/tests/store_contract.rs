use std::fs;

use chrono::{DateTime, TimeDelta, Utc};
use tempfile::tempdir;
use zdir_core::store::{GROOM_LEVEL, GROOM_THRESHOLD};
use zdir_core::{Config, Entry, Store};

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).expect("timestamp")
}

#[test]
fn load_then_save_is_lossless() {
    // Given a hand-written data file mixing integer and decimal ranks
    // When it is loaded and saved back unchanged
    // Then a second load yields the same entries in the same order.
    let dir = tempdir().expect("tempdir");
    let config = Config::new(dir.path().join(".z"));
    fs::write(
        &config.data_file,
        "/home/u|17|1700000000\n/srv/www|2.5|1700000500\n/opt|1|1600000000\n",
    )
    .expect("seed");
    let store = Store::new(&config).expect("store");

    let first = store.load_all().expect("load");
    store.save_all(first.clone()).expect("save");
    let second = store.load_all().expect("reload");

    assert_eq!(first, second);
    assert_eq!(second.len(), 3);
    assert_eq!(second[1], Entry::new("/srv/www", 2.5, at(1_700_000_500)));
}

#[test]
fn repeated_visits_collapse_into_one_entry() {
    let dir = tempdir().expect("tempdir");
    let config = Config::new(dir.path().join(".z"));
    let store = Store::new(&config).expect("store");

    store.record_visit("/work/project").expect("visit");
    let once = store.load_all().expect("load");
    assert_eq!(once.len(), 1);
    assert_eq!(once[0].rank(), 1.0);

    for _ in 0..6 {
        store.record_visit("/work/project").expect("visit");
    }
    let many = store.load_all().expect("load");
    assert_eq!(many.len(), 1);
    assert_eq!(many[0].path(), "/work/project");
    assert_eq!(many[0].rank(), 7.0);
    assert!(many[0].last_access() <= Utc::now());
}

#[test]
fn visit_preserves_position_of_existing_entries() {
    let dir = tempdir().expect("tempdir");
    let config = Config::new(dir.path().join(".z"));
    let store = Store::new(&config).expect("store");
    store
        .save_all(vec![
            Entry::new("/a", 3.0, at(10)),
            Entry::new("/b", 4.0, at(20)),
        ])
        .expect("seed");

    store.record_visit_at("/a", at(30)).expect("visit");
    store.record_visit_at("/c", at(40)).expect("visit");

    assert_eq!(
        fs::read_to_string(&config.data_file).expect("read"),
        "/a|4|30\n/b|4|20\n/c|1|40\n"
    );
}

#[test]
fn oversized_store_is_groomed_once_per_save() {
    // Given 9001 entries of rank 100
    // When the store is saved
    // Then every surviving rank is floor(100 * 0.99).
    let dir = tempdir().expect("tempdir");
    let config = Config::new(dir.path().join(".z"));
    let store = Store::new(&config).expect("store");
    let entries: Vec<Entry> = (0..=GROOM_THRESHOLD)
        .map(|i| Entry::new(format!("/dirs/{i}"), 100.0, at(1_700_000_000)))
        .collect();
    assert_eq!(entries.len(), 9001);

    store.save_all(entries).expect("save");
    let groomed = store.load_all().expect("load");

    let expected = (100.0 * GROOM_LEVEL).floor();
    assert_eq!(expected, 99.0);
    assert_eq!(groomed.len(), 9001);
    assert!(groomed.iter().all(|entry| entry.rank() == expected));
}

#[test]
fn grooming_drops_rank_one_entries_on_next_load() {
    let dir = tempdir().expect("tempdir");
    let config = Config::new(dir.path().join(".z"));
    let store = Store::new(&config).expect("store");
    let mut entries: Vec<Entry> = (0..GROOM_THRESHOLD)
        .map(|i| Entry::new(format!("/dirs/{i}"), 5.0, at(1)))
        .collect();
    entries.push(Entry::new("/rarely", 1.0, at(1)));

    store.save_all(entries).expect("save");
    let loaded = store.load_all().expect("load");

    assert_eq!(loaded.len(), GROOM_THRESHOLD);
    assert!(loaded.iter().all(|entry| entry.path() != "/rarely"));
    assert!(loaded.iter().all(|entry| entry.rank() == 4.0));
}

#[test]
fn remove_leaves_other_entries_untouched() {
    let dir = tempdir().expect("tempdir");
    let config = Config::new(dir.path().join(".z"));
    let store = Store::new(&config).expect("store");
    let now = at(1_760_000_000);
    let others = vec![
        Entry::new("/home/y", 50.0, now - TimeDelta::days(10)),
        Entry::new("/var/log", 2.0, now - TimeDelta::hours(3)),
    ];
    store
        .save_all(vec![
            others[0].clone(),
            Entry::new("/home/x", 5.0, now - TimeDelta::minutes(10)),
            others[1].clone(),
        ])
        .expect("seed");

    assert!(store.remove("/home/x").expect("remove"));
    assert_eq!(store.load_all().expect("load"), others);
}

#[test]
fn corrupt_line_fails_load_and_visit() {
    let dir = tempdir().expect("tempdir");
    let config = Config::new(dir.path().join(".z"));
    fs::write(&config.data_file, "/fine|2|100\n/broken|two|100\n").expect("seed");
    let store = Store::new(&config).expect("store");

    let err = store.load_all().expect_err("load must fail");
    assert_eq!(err.code(), "STORE_CORRUPT");

    let err = store.record_visit("/fine").expect_err("visit must fail");
    assert_eq!(err.code(), "STORE_CORRUPT");
    assert_eq!(
        fs::read_to_string(&config.data_file).expect("read"),
        "/fine|2|100\n/broken|two|100\n",
        "failed visit must not rewrite the file"
    );
}

#[cfg(unix)]
#[test]
fn unwritable_directory_is_a_persistence_failure() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().expect("tempdir");
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).expect("mkdir");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o500)).expect("chmod");
    let canary = locked.join(".canary");
    if fs::write(&canary, "").is_ok() {
        // Running with privileges that bypass directory permissions.
        let _ = fs::remove_file(&canary);
        return;
    }

    let config = Config::new(locked.join(".z"));
    let store = Store::new(&config).expect("store");
    let err = store
        .save_all(vec![Entry::new("/a", 1.0, at(1))])
        .expect_err("must fail");
    assert_eq!(err.code(), "PERSISTENCE_FAILURE");

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o700)).expect("restore");
}
