mod common;

use drill_terminal::report::{
    NOT_AVAILABLE, ReportRow, parse_analysis_json, report_headline, report_lines, report_sections,
};

use common::read_fixture;

fn fixture_lines() -> Vec<String> {
    let raw = read_fixture("analysis_report.json");
    let report = parse_analysis_json(&raw)
        .expect("fixture should parse")
        .expect("fixture carries a report");
    report_lines(&report)
}

fn has_line(lines: &[String], expected: &str) -> bool {
    lines.iter().any(|line| line == expected)
}

#[test]
fn renders_fixed_decimals_per_field() {
    let lines = fixture_lines();
    for expected in [
        "Player Speed Percentile: 81.46",
        "Balance Rating: 8.13",
        "Body Control Score: 7.50",
        "Coordination Score: 9.00",
        "Athleticism Score: 8.4",
        "Potential Rating: 9.0",
        "Body Positioning Score: 8.33",
        "Average Speed (km/h): 21.35",
        "Form Consistency: 0.91",
        "Processing Speed (fps): 29.96",
        "Analysis Completion Time: 41.26 seconds",
    ] {
        assert!(has_line(&lines, expected), "missing line {expected:?}");
    }
}

#[test]
fn mixed_readings_render_as_sent() {
    let lines = fixture_lines();
    for expected in [
        "Elite Jump Threshold: 60",
        "Player Jump Percentile: 78th",
        "Flexibility Rating: Good",
        "Reaction Time (ms): 245",
        "Highest Jump: 58.2 cm",
        "Detection Success Rate: 96.4%",
        "Overall Score: 84.5",
    ] {
        assert!(has_line(&lines, expected), "missing line {expected:?}");
    }
}

#[test]
fn missing_values_fall_back_to_not_available() {
    let lines = fixture_lines();
    assert!(has_line(&lines, "Download URL: N/A"));
    assert!(has_line(&lines, "Technical Ability: N/A"));

    let areas = lines
        .iter()
        .position(|line| line == "Areas For Improvement:")
        .expect("areas list");
    assert_eq!(lines[areas + 1], format!("  - {NOT_AVAILABLE}"));
}

#[test]
fn acceleration_phases_list_each_frame() {
    let lines = fixture_lines();
    assert!(has_line(
        &lines,
        "  - Frame 12: Acceleration 3.46, Speed 14.20"
    ));
    assert!(has_line(
        &lines,
        "  - Frame 48: Acceleration 2.10, Speed 27.89"
    ));
}

#[test]
fn every_section_is_present_in_order() {
    let raw = read_fixture("analysis_report.json");
    let report = parse_analysis_json(&raw).unwrap().unwrap();
    let titles = report_sections(&report)
        .into_iter()
        .map(|section| section.title)
        .collect::<Vec<_>>();
    assert_eq!(
        titles,
        vec![
            "Analysis Result",
            "Comparison to Standards",
            "Agility Analysis",
            "Endurance Analysis",
            "Jump Analysis",
            "Overall Rating",
            "Shooting Analysis",
            "Sprint Analysis",
            "Performance Highlights",
            "Player Performance Summary",
            "Technical Analysis",
            "Video Analysis Data",
        ]
    );
    assert_eq!(report_headline(&report), "Grade B | Score 84.5");
}

#[test]
fn empty_report_is_all_not_available() {
    let report = parse_analysis_json("{}").unwrap().expect("object parses");
    let sections = report_sections(&report);
    for section in &sections {
        for row in &section.rows {
            match row {
                ReportRow::Field { label, value } => {
                    assert_eq!(value, NOT_AVAILABLE, "{label} should be N/A")
                }
                ReportRow::List { items, .. } => assert_eq!(items, &vec![NOT_AVAILABLE]),
            }
        }
    }
    assert_eq!(report_headline(&report), "Grade N/A | Score N/A");
}

#[test]
fn blank_or_null_body_means_no_report() {
    assert!(parse_analysis_json("").unwrap().is_none());
    assert!(parse_analysis_json("  null ").unwrap().is_none());
    assert!(parse_analysis_json("{not json").is_err());
}
