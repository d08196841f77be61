use chrono::DateTime;
use zdir_core::{Entry, RankedEntry, Selection};

use super::support::write_selection;

fn render(selection: &Selection, json: bool) -> String {
    let mut out = Vec::new();
    write_selection(&mut out, selection, json).expect("write");
    String::from_utf8(out).expect("utf8")
}

fn ranked(path: &str, rank: f64, secs: i64, score: f64) -> RankedEntry {
    RankedEntry {
        entry: Entry::new(path, rank, DateTime::from_timestamp(secs, 0).expect("timestamp")),
        score,
    }
}

#[test]
fn cd_and_echo_print_the_path_alone() {
    assert_eq!(
        render(&Selection::ChangeDirectory("/home/x".to_string()), false),
        "/home/x\n"
    );
    assert_eq!(render(&Selection::Echo("/srv".to_string()), false), "/srv\n");
}

#[test]
fn list_prints_one_path_per_line() {
    let selection = Selection::List(vec![
        ranked("/home/x", 5.0, 1_700_000_000, 20.0),
        ranked("/home/y", 50.0, 1_690_000_000, 12.5),
    ]);
    assert_eq!(render(&selection, false), "/home/x\n/home/y\n");
}

#[test]
fn empty_list_prints_nothing() {
    assert_eq!(render(&Selection::List(Vec::new()), false), "");
}

#[test]
fn json_list_carries_sort_key() {
    let selection = Selection::List(vec![ranked("/home/x", 5.0, 1_700_000_000, 20.0)]);
    let value: serde_json::Value =
        serde_json::from_str(&render(&selection, true)).expect("json");
    assert_eq!(value[0]["path"], "/home/x");
    assert_eq!(value[0]["rank"], 5.0);
    assert_eq!(value[0]["score"], 20.0);
    assert_eq!(value[0]["last_access"], "2023-11-14T22:13:20Z");
}

#[test]
fn remove_prints_nothing() {
    let selection = Selection::Removed {
        path: "/home/x".to_string(),
        existed: true,
    };
    assert_eq!(render(&selection, false), "");
}
