//! Persistence and recovery tests for the axis state hub.
//!
//! These tests verify that documents survive a hub restart, that first-run
//! defaults are written exactly once, and that corrupt slots heal into
//! defaults without a read ever clobbering the file.

use axis_api::hub::Hub;
use axis_api::paths::AxisPaths;
use axis_api::store::Slot;
use serde_json::{Value, json};

fn open_hub(dir: &std::path::Path) -> Hub {
    Hub::open(AxisPaths::at(dir)).unwrap()
}

fn read_slot(dir: &std::path::Path, slot: Slot) -> Value {
    let bytes = std::fs::read(dir.join(slot.file_name())).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[test]
fn first_open_writes_defaults_for_every_slot() {
    let dir = tempfile::TempDir::new().unwrap();
    open_hub(dir.path());

    for slot in Slot::ALL {
        assert!(
            dir.path().join(slot.file_name()).exists(),
            "slot {slot} should be initialized"
        );
    }

    let today = read_slot(dir.path(), Slot::Today);
    assert_eq!(today["top3"][0]["text"], json!("Hardest task first"));
    let projects = read_slot(dir.path(), Slot::Projects);
    assert_eq!(projects["projects"][0]["key"], json!("career"));
}

#[test]
fn state_survives_restart() {
    let dir = tempfile::TempDir::new().unwrap();

    // First session: edit and persist.
    {
        let hub = open_hub(dir.path());
        hub.set_top3(&["Ship bugfix".to_string(), "Review PR".to_string()])
            .unwrap();
        hub.set_week_outcomes(&["Land the contract".to_string()]).unwrap();
    }

    // Second session: reopen and verify.
    {
        let hub = open_hub(dir.path());
        let today = hub.today();
        assert_eq!(today.top3[0].text, "Ship bugfix");
        assert_eq!(today.top3[1].text, "Review PR");
        assert_eq!(hub.week().outcomes[0].text, "Land the contract");
    }
}

#[test]
fn reopen_does_not_clobber_user_edits() {
    let dir = tempfile::TempDir::new().unwrap();
    open_hub(dir.path());

    // Hand-edit the reality slot between sessions.
    let edited = json!({"commitments": [{"id": "c9", "text": "Sat: Long run", "day": "Sat"}]});
    std::fs::write(
        dir.path().join(Slot::Reality.file_name()),
        serde_json::to_vec_pretty(&edited).unwrap(),
    )
    .unwrap();

    let hub = open_hub(dir.path());
    let reality = hub.reality();
    assert_eq!(reality.commitments.len(), 1);
    assert_eq!(reality.commitments[0].id, "c9");
}

#[test]
fn corrupt_slot_loads_as_default_and_is_rewritten_once() {
    let dir = tempfile::TempDir::new().unwrap();
    let week_path = dir.path().join(Slot::Week.file_name());
    std::fs::write(&week_path, b"{{{ definitely not json").unwrap();

    let hub = open_hub(dir.path());
    assert_eq!(hub.week().outcomes.len(), 3);

    // The constructive load path replaced the corrupt file with the default.
    let healed = read_slot(dir.path(), Slot::Week);
    assert_eq!(healed["mode"], json!("OFF"));
}

#[test]
fn stale_date_on_disk_rolls_over_on_load() {
    let dir = tempfile::TempDir::new().unwrap();
    let stored = json!({
        "date": "2000-01-01",
        "top3": [
            {"id": "t1", "text": "carry me over", "done": true},
            {"id": "t2", "text": "me too", "done": true},
            {"id": "t3", "text": "and me", "done": false}
        ]
    });
    std::fs::write(
        dir.path().join(Slot::Today.file_name()),
        serde_json::to_vec_pretty(&stored).unwrap(),
    )
    .unwrap();

    let hub = open_hub(dir.path());
    let today = hub.today();
    assert_ne!(today.date, "2000-01-01");
    assert!(today.top3.iter().all(|item| !item.done));
    assert_eq!(today.top3[0].text, "carry me over");
}

#[test]
fn writes_leave_no_tmp_siblings() {
    let dir = tempfile::TempDir::new().unwrap();
    let hub = open_hub(dir.path());
    hub.set_top3(&["one".to_string()]).unwrap();

    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "leftover tmp files: {leftovers:?}");
}

#[test]
fn slot_files_are_pretty_printed_with_literal_unicode() {
    let dir = tempfile::TempDir::new().unwrap();
    let hub = open_hub(dir.path());
    hub.set_week_blockers(&[]).unwrap();

    let text = std::fs::read_to_string(dir.path().join(Slot::Week.file_name())).unwrap();
    // 2-space indentation, placeholder glyph stored literally.
    assert!(text.contains("  \"blockers\""));
    assert!(text.contains("—"));
    assert!(!text.contains("\\u2014"));
}
