use chrono::{DateTime, Local, TimeZone};
use daynote_core::{parse_annotations, Priority};

// 2026-03-04 is a Wednesday.
fn wednesday() -> DateTime<Local> {
    at(2026, 3, 4, 10, 30)
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(year, month, day, hour, minute, 0)
        .unwrap()
}

#[test]
fn plain_text_is_trimmed_and_unannotated() {
    let parsed = parse_annotations("  call bob  ", wednesday());
    assert_eq!(parsed.text, "call bob");
    assert!(!parsed.important);
    assert_eq!(parsed.priority, Priority::Normal);
    assert!(parsed.due_date.is_none());
}

#[test]
fn importance_markers_set_flag_and_disappear_from_text() {
    for raw in ["renew passport!", "renew passport #important", "#Important renew passport!"] {
        let parsed = parse_annotations(raw, wednesday());
        assert!(parsed.important, "input: {raw}");
        assert_eq!(parsed.text, "renew passport", "input: {raw}");
        assert_eq!(parsed.priority, Priority::High, "input: {raw}");
    }
}

#[test]
fn explicit_priority_tag_overrides_importance() {
    let parsed = parse_annotations("urgent task #critical!", wednesday());
    assert!(parsed.important);
    assert_eq!(parsed.priority, Priority::Critical);
    assert_eq!(parsed.text, "urgent task");
}

#[test]
fn only_first_priority_tag_is_honored() {
    let parsed = parse_annotations("triage #low stuff #high", wednesday());
    assert_eq!(parsed.priority, Priority::Low);
    assert!(!parsed.text.contains("#low"));
    // The second tag is left in place; only the first match is consumed.
    assert!(parsed.text.contains("#high"));
}

#[test]
fn tomorrow_with_time_resolves_to_next_day_afternoon() {
    let parsed = parse_annotations("buy milk tomorrow at 5pm", wednesday());
    assert_eq!(parsed.due_date, Some(at(2026, 3, 5, 17, 0)));
    assert_eq!(parsed.text, "buy milk tomorrow at 5pm");
}

#[test]
fn today_keeps_current_date() {
    let parsed = parse_annotations("standup today", wednesday());
    assert_eq!(parsed.due_date, Some(wednesday()));
}

#[test]
fn next_week_adds_seven_days() {
    let parsed = parse_annotations("vacation next week", wednesday());
    assert_eq!(parsed.due_date, Some(at(2026, 3, 11, 10, 30)));
}

#[test]
fn weekday_name_resolves_strictly_into_the_future() {
    let parsed = parse_annotations("submit report friday", wednesday());
    assert_eq!(parsed.due_date, Some(at(2026, 3, 6, 10, 30)));
}

#[test]
fn todays_weekday_name_resolves_a_full_week_out() {
    let parsed = parse_annotations("plan wednesday", wednesday());
    assert_eq!(parsed.due_date, Some(at(2026, 3, 11, 10, 30)));
}

#[test]
fn first_keyword_in_list_order_wins() {
    // "today" precedes "tomorrow" in the scan order.
    let parsed = parse_annotations("today or tomorrow", wednesday());
    assert_eq!(parsed.due_date, Some(wednesday()));
}

#[test]
fn weekday_name_precedes_next_week_in_scan_order() {
    let parsed = parse_annotations("sunday next week", wednesday());
    assert_eq!(parsed.due_date, Some(at(2026, 3, 8, 10, 30)));
}

#[test]
fn morning_time_with_minutes_is_applied() {
    let parsed = parse_annotations("standup tomorrow 9:15am", wednesday());
    assert_eq!(parsed.due_date, Some(at(2026, 3, 5, 9, 15)));
}

#[test]
fn noon_and_midnight_meridiem_conversions() {
    let noon = parse_annotations("lunch tomorrow 12pm", wednesday());
    assert_eq!(noon.due_date, Some(at(2026, 3, 5, 12, 0)));

    let midnight = parse_annotations("backup tomorrow 12am", wednesday());
    assert_eq!(midnight.due_date, Some(at(2026, 3, 5, 0, 0)));
}

#[test]
fn time_pattern_without_date_keyword_is_ignored() {
    let parsed = parse_annotations("call bob at 5pm", wednesday());
    assert!(parsed.due_date.is_none());
}

#[test]
fn parsing_is_deterministic_for_a_fixed_reference_time() {
    let first = parse_annotations("review notes friday 8am #high", wednesday());
    let second = parse_annotations("review notes friday 8am #high", wednesday());
    assert_eq!(first, second);
}
