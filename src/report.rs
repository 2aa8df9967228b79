use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub const NOT_AVAILABLE: &str = "N/A";

/// A metric the analysis service reports either as a number or as free text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Reading {
    Number(f64),
    Text(String),
    Flag(bool),
    Other(Value),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnalysisReport {
    #[serde(default, deserialize_with = "string_or_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub response: Option<AnalysisResponse>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default, deserialize_with = "string_or_none")]
    pub analysis_status: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub analysis_timestamp: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub download_url: Option<String>,
    #[serde(default)]
    pub player_analysis: Option<PlayerAnalysis>,
    #[serde(default)]
    pub performance_highlights: Option<PerformanceHighlights>,
    #[serde(default)]
    pub player_performance_summary: Option<PerformanceSummary>,
    #[serde(default)]
    pub technical_analysis: Option<TechnicalAnalysis>,
    #[serde(default)]
    pub video_analysis_data: Option<VideoAnalysisData>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlayerAnalysis {
    #[serde(default)]
    pub comparison_to_standards: Option<ComparisonToStandards>,
    #[serde(default)]
    pub detailed_metrics: Option<DetailedMetrics>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ComparisonToStandards {
    #[serde(default)]
    pub elite_jump_threshold: Option<Reading>,
    #[serde(default)]
    pub elite_speed_threshold: Option<Reading>,
    #[serde(default)]
    pub player_jump_percentile: Option<Reading>,
    #[serde(default, deserialize_with = "float_or_none")]
    pub player_speed_percentile: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DetailedMetrics {
    #[serde(default)]
    pub agility_analysis: Option<AgilityAnalysis>,
    #[serde(default)]
    pub endurance_analysis: Option<EnduranceAnalysis>,
    #[serde(default)]
    pub jump_analysis: Option<JumpAnalysis>,
    #[serde(default)]
    pub overall_rating: Option<OverallRating>,
    #[serde(default)]
    pub shooting_analysis: Option<ShootingAnalysis>,
    #[serde(default)]
    pub sprint_analysis: Option<SprintAnalysis>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AgilityAnalysis {
    #[serde(default, deserialize_with = "float_or_none")]
    pub balance_rating: Option<f64>,
    #[serde(default, deserialize_with = "float_or_none")]
    pub body_control_score: Option<f64>,
    #[serde(default)]
    pub change_direction_speed: Option<Reading>,
    #[serde(default, deserialize_with = "float_or_none")]
    pub coordination_score: Option<f64>,
    #[serde(default)]
    pub flexibility_rating: Option<Reading>,
    #[serde(default)]
    pub reaction_time_ms: Option<Reading>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EnduranceAnalysis {
    #[serde(default)]
    pub cardiovascular_efficiency: Option<Reading>,
    #[serde(default)]
    pub consistency_over_time: Option<Reading>,
    #[serde(default)]
    pub fatigue_resistance: Option<Reading>,
    #[serde(default)]
    pub recovery_rate: Option<Reading>,
    #[serde(default)]
    pub stamina_score: Option<Reading>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct JumpAnalysis {
    #[serde(default)]
    pub air_time_ms: Option<Reading>,
    #[serde(default)]
    pub average_jump_height_cm: Option<Reading>,
    #[serde(default)]
    pub explosive_power_score: Option<Reading>,
    #[serde(default)]
    pub jump_frequency: Option<Reading>,
    #[serde(default)]
    pub landing_stability: Option<Reading>,
    #[serde(default)]
    pub leg_strength_score: Option<Reading>,
    #[serde(default)]
    pub max_vertical_jump_cm: Option<Reading>,
    #[serde(default)]
    pub takeoff_technique: Option<Reading>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OverallRating {
    #[serde(default, deserialize_with = "float_or_none")]
    pub athleticism_score: Option<f64>,
    #[serde(default)]
    pub coach_recommendation: Option<Reading>,
    #[serde(default, deserialize_with = "float_or_none")]
    pub physical_condition: Option<f64>,
    #[serde(default, deserialize_with = "float_or_none")]
    pub potential_rating: Option<f64>,
    #[serde(default, deserialize_with = "float_or_none")]
    pub technical_ability: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ShootingAnalysis {
    #[serde(default)]
    pub accuracy_rating: Option<Reading>,
    #[serde(default, deserialize_with = "float_or_none")]
    pub body_positioning_score: Option<f64>,
    #[serde(default, deserialize_with = "float_or_none")]
    pub follow_through_quality: Option<f64>,
    #[serde(default)]
    pub shot_power_score: Option<Reading>,
    #[serde(default)]
    pub technique_consistency: Option<Reading>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SprintAnalysis {
    #[serde(default, deserialize_with = "vec_or_default")]
    pub acceleration_phases: Vec<AccelerationPhase>,
    #[serde(default, deserialize_with = "float_or_none")]
    pub average_speed_kmh: Option<f64>,
    #[serde(default)]
    pub deceleration_control: Option<Reading>,
    #[serde(default, deserialize_with = "float_or_none")]
    pub form_consistency: Option<f64>,
    #[serde(default, deserialize_with = "float_or_none")]
    pub max_speed_kmh: Option<f64>,
    #[serde(default)]
    pub running_efficiency: Option<Reading>,
    #[serde(default)]
    pub sprint_endurance: Option<Reading>,
    #[serde(default)]
    pub stride_frequency: Option<Reading>,
    #[serde(default)]
    pub stride_length_m: Option<Reading>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AccelerationPhase {
    #[serde(default)]
    pub frame: Option<Reading>,
    #[serde(default, deserialize_with = "float_or_none")]
    pub acceleration: Option<f64>,
    #[serde(default, deserialize_with = "float_or_none")]
    pub speed: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PerformanceHighlights {
    #[serde(default)]
    pub highest_jump: Option<Reading>,
    #[serde(default)]
    pub peak_acceleration: Option<Reading>,
    #[serde(default)]
    pub sprint_sessions: Option<Reading>,
    #[serde(default)]
    pub top_speed_achieved: Option<Reading>,
    #[serde(default)]
    pub total_jumps_recorded: Option<Reading>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PerformanceSummary {
    #[serde(default, deserialize_with = "vec_or_default")]
    pub areas_for_improvement: Vec<Reading>,
    #[serde(default)]
    pub coach_recommendation: Option<Reading>,
    #[serde(default, deserialize_with = "vec_or_default")]
    pub key_strengths: Vec<Reading>,
    #[serde(default)]
    pub overall_grade: Option<Reading>,
    #[serde(default)]
    pub overall_score: Option<Reading>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TechnicalAnalysis {
    #[serde(default)]
    pub balance_control: Option<Reading>,
    #[serde(default)]
    pub body_coordination: Option<Reading>,
    #[serde(default)]
    pub landing_technique: Option<Reading>,
    #[serde(default)]
    pub sprint_form_consistency: Option<Reading>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VideoAnalysisData {
    #[serde(default, deserialize_with = "float_or_none")]
    pub analysis_completion_time: Option<f64>,
    #[serde(default)]
    pub detection_success_rate: Option<Reading>,
    #[serde(default)]
    pub num_frames_processed: Option<Reading>,
    #[serde(default, deserialize_with = "float_or_none")]
    pub processing_speed_fps: Option<f64>,
}

/// Decodes an `/analyze` response body. An empty or `null` body yields `Ok(None)`,
/// which callers treat as an unsuccessful analysis.
pub fn parse_analysis_json(raw: &str) -> Result<Option<AnalysisReport>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(None);
    }
    let report: AnalysisReport =
        serde_json::from_str(trimmed).context("invalid analysis report json")?;
    Ok(Some(report))
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportRow {
    Field { label: &'static str, value: String },
    List { label: &'static str, items: Vec<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportSection {
    pub title: &'static str,
    pub rows: Vec<ReportRow>,
}

impl ReportSection {
    fn new(title: &'static str) -> Self {
        Self {
            title,
            rows: Vec::new(),
        }
    }

    fn field(mut self, label: &'static str, value: String) -> Self {
        self.rows.push(ReportRow::Field { label, value });
        self
    }

    fn list(mut self, label: &'static str, items: Vec<String>) -> Self {
        let items = if items.is_empty() {
            vec![NOT_AVAILABLE.to_string()]
        } else {
            items
        };
        self.rows.push(ReportRow::List { label, items });
        self
    }
}

pub fn report_sections(report: &AnalysisReport) -> Vec<ReportSection> {
    let resp = report.response.as_ref();
    let player = resp.and_then(|r| r.player_analysis.as_ref());
    let cmp = player.and_then(|p| p.comparison_to_standards.as_ref());
    let metrics = player.and_then(|p| p.detailed_metrics.as_ref());
    let agility = metrics.and_then(|m| m.agility_analysis.as_ref());
    let endurance = metrics.and_then(|m| m.endurance_analysis.as_ref());
    let jump = metrics.and_then(|m| m.jump_analysis.as_ref());
    let overall = metrics.and_then(|m| m.overall_rating.as_ref());
    let shooting = metrics.and_then(|m| m.shooting_analysis.as_ref());
    let sprint = metrics.and_then(|m| m.sprint_analysis.as_ref());
    let highlights = resp.and_then(|r| r.performance_highlights.as_ref());
    let summary = resp.and_then(|r| r.player_performance_summary.as_ref());
    let technical = resp.and_then(|r| r.technical_analysis.as_ref());
    let video = resp.and_then(|r| r.video_analysis_data.as_ref());

    vec![
        ReportSection::new("Analysis Result")
            .field("Message", text(report.message.as_ref()))
            .field(
                "Analysis Status",
                text(resp.and_then(|r| r.analysis_status.as_ref())),
            )
            .field(
                "Analysis Timestamp",
                text(resp.and_then(|r| r.analysis_timestamp.as_ref())),
            )
            .field(
                "Download URL",
                text(resp.and_then(|r| r.download_url.as_ref())),
            ),
        ReportSection::new("Comparison to Standards")
            .field(
                "Elite Jump Threshold",
                reading(cmp.and_then(|c| c.elite_jump_threshold.as_ref())),
            )
            .field(
                "Elite Speed Threshold",
                reading(cmp.and_then(|c| c.elite_speed_threshold.as_ref())),
            )
            .field(
                "Player Jump Percentile",
                reading(cmp.and_then(|c| c.player_jump_percentile.as_ref())),
            )
            .field(
                "Player Speed Percentile",
                fixed(cmp.and_then(|c| c.player_speed_percentile), 2),
            ),
        ReportSection::new("Agility Analysis")
            .field(
                "Balance Rating",
                fixed(agility.and_then(|a| a.balance_rating), 2),
            )
            .field(
                "Body Control Score",
                fixed(agility.and_then(|a| a.body_control_score), 2),
            )
            .field(
                "Change Direction Speed",
                reading(agility.and_then(|a| a.change_direction_speed.as_ref())),
            )
            .field(
                "Coordination Score",
                fixed(agility.and_then(|a| a.coordination_score), 2),
            )
            .field(
                "Flexibility Rating",
                reading(agility.and_then(|a| a.flexibility_rating.as_ref())),
            )
            .field(
                "Reaction Time (ms)",
                reading(agility.and_then(|a| a.reaction_time_ms.as_ref())),
            ),
        ReportSection::new("Endurance Analysis")
            .field(
                "Cardiovascular Efficiency",
                reading(endurance.and_then(|e| e.cardiovascular_efficiency.as_ref())),
            )
            .field(
                "Consistency Over Time",
                reading(endurance.and_then(|e| e.consistency_over_time.as_ref())),
            )
            .field(
                "Fatigue Resistance",
                reading(endurance.and_then(|e| e.fatigue_resistance.as_ref())),
            )
            .field(
                "Recovery Rate",
                reading(endurance.and_then(|e| e.recovery_rate.as_ref())),
            )
            .field(
                "Stamina Score",
                reading(endurance.and_then(|e| e.stamina_score.as_ref())),
            ),
        ReportSection::new("Jump Analysis")
            .field(
                "Air Time (ms)",
                reading(jump.and_then(|j| j.air_time_ms.as_ref())),
            )
            .field(
                "Average Jump Height (cm)",
                reading(jump.and_then(|j| j.average_jump_height_cm.as_ref())),
            )
            .field(
                "Explosive Power Score",
                reading(jump.and_then(|j| j.explosive_power_score.as_ref())),
            )
            .field(
                "Jump Frequency",
                reading(jump.and_then(|j| j.jump_frequency.as_ref())),
            )
            .field(
                "Landing Stability",
                reading(jump.and_then(|j| j.landing_stability.as_ref())),
            )
            .field(
                "Leg Strength Score",
                reading(jump.and_then(|j| j.leg_strength_score.as_ref())),
            )
            .field(
                "Max Vertical Jump (cm)",
                reading(jump.and_then(|j| j.max_vertical_jump_cm.as_ref())),
            )
            .field(
                "Takeoff Technique",
                reading(jump.and_then(|j| j.takeoff_technique.as_ref())),
            ),
        ReportSection::new("Overall Rating")
            .field(
                "Athleticism Score",
                fixed(overall.and_then(|o| o.athleticism_score), 1),
            )
            .field(
                "Coach Recommendation",
                reading(overall.and_then(|o| o.coach_recommendation.as_ref())),
            )
            .field(
                "Physical Condition",
                fixed(overall.and_then(|o| o.physical_condition), 1),
            )
            .field(
                "Potential Rating",
                fixed(overall.and_then(|o| o.potential_rating), 1),
            )
            .field(
                "Technical Ability",
                fixed(overall.and_then(|o| o.technical_ability), 1),
            ),
        ReportSection::new("Shooting Analysis")
            .field(
                "Accuracy Rating",
                reading(shooting.and_then(|s| s.accuracy_rating.as_ref())),
            )
            .field(
                "Body Positioning Score",
                fixed(shooting.and_then(|s| s.body_positioning_score), 2),
            )
            .field(
                "Follow Through Quality",
                fixed(shooting.and_then(|s| s.follow_through_quality), 2),
            )
            .field(
                "Shot Power Score",
                reading(shooting.and_then(|s| s.shot_power_score.as_ref())),
            )
            .field(
                "Technique Consistency",
                reading(shooting.and_then(|s| s.technique_consistency.as_ref())),
            ),
        ReportSection::new("Sprint Analysis")
            .list(
                "Acceleration Phases",
                sprint
                    .map(|s| s.acceleration_phases.iter().map(phase_line).collect())
                    .unwrap_or_default(),
            )
            .field(
                "Average Speed (km/h)",
                fixed(sprint.and_then(|s| s.average_speed_kmh), 2),
            )
            .field(
                "Deceleration Control",
                reading(sprint.and_then(|s| s.deceleration_control.as_ref())),
            )
            .field(
                "Form Consistency",
                fixed(sprint.and_then(|s| s.form_consistency), 2),
            )
            .field(
                "Max Speed (km/h)",
                fixed(sprint.and_then(|s| s.max_speed_kmh), 2),
            )
            .field(
                "Running Efficiency",
                reading(sprint.and_then(|s| s.running_efficiency.as_ref())),
            )
            .field(
                "Sprint Endurance",
                reading(sprint.and_then(|s| s.sprint_endurance.as_ref())),
            )
            .field(
                "Stride Frequency",
                reading(sprint.and_then(|s| s.stride_frequency.as_ref())),
            )
            .field(
                "Stride Length (m)",
                reading(sprint.and_then(|s| s.stride_length_m.as_ref())),
            ),
        ReportSection::new("Performance Highlights")
            .field(
                "Highest Jump",
                reading(highlights.and_then(|h| h.highest_jump.as_ref())),
            )
            .field(
                "Peak Acceleration",
                reading(highlights.and_then(|h| h.peak_acceleration.as_ref())),
            )
            .field(
                "Sprint Sessions",
                reading(highlights.and_then(|h| h.sprint_sessions.as_ref())),
            )
            .field(
                "Top Speed Achieved",
                reading(highlights.and_then(|h| h.top_speed_achieved.as_ref())),
            )
            .field(
                "Total Jumps Recorded",
                reading(highlights.and_then(|h| h.total_jumps_recorded.as_ref())),
            ),
        ReportSection::new("Player Performance Summary")
            .list(
                "Areas For Improvement",
                summary
                    .map(|s| s.areas_for_improvement.iter().map(render_reading).collect())
                    .unwrap_or_default(),
            )
            .field(
                "Coach Recommendation",
                reading(summary.and_then(|s| s.coach_recommendation.as_ref())),
            )
            .list(
                "Key Strengths",
                summary
                    .map(|s| s.key_strengths.iter().map(render_reading).collect())
                    .unwrap_or_default(),
            )
            .field(
                "Overall Grade",
                reading(summary.and_then(|s| s.overall_grade.as_ref())),
            )
            .field(
                "Overall Score",
                reading(summary.and_then(|s| s.overall_score.as_ref())),
            ),
        ReportSection::new("Technical Analysis")
            .field(
                "Balance Control",
                reading(technical.and_then(|t| t.balance_control.as_ref())),
            )
            .field(
                "Body Coordination",
                reading(technical.and_then(|t| t.body_coordination.as_ref())),
            )
            .field(
                "Landing Technique",
                reading(technical.and_then(|t| t.landing_technique.as_ref())),
            )
            .field(
                "Sprint Form Consistency",
                reading(technical.and_then(|t| t.sprint_form_consistency.as_ref())),
            ),
        ReportSection::new("Video Analysis Data")
            .field(
                "Analysis Completion Time",
                with_unit(fixed(video.and_then(|v| v.analysis_completion_time), 2), "seconds"),
            )
            .field(
                "Detection Success Rate",
                reading(video.and_then(|v| v.detection_success_rate.as_ref())),
            )
            .field(
                "Number of Frames Processed",
                reading(video.and_then(|v| v.num_frames_processed.as_ref())),
            )
            .field(
                "Processing Speed (fps)",
                fixed(video.and_then(|v| v.processing_speed_fps), 2),
            ),
    ]
}

/// Flattens sections into display lines: headings, `Label: value` rows and indented list items.
pub fn report_lines(report: &AnalysisReport) -> Vec<String> {
    let mut lines = Vec::new();
    for section in report_sections(report) {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(format!("== {} ==", section.title));
        for row in section.rows {
            match row {
                ReportRow::Field { label, value } => lines.push(format!("{label}: {value}")),
                ReportRow::List { label, items } => {
                    lines.push(format!("{label}:"));
                    for item in items {
                        lines.push(format!("  - {item}"));
                    }
                }
            }
        }
    }
    lines
}

/// One-line headline for the upload pane: grade and score if the service sent them.
pub fn report_headline(report: &AnalysisReport) -> String {
    let summary = report
        .response
        .as_ref()
        .and_then(|r| r.player_performance_summary.as_ref());
    let grade = reading(summary.and_then(|s| s.overall_grade.as_ref()));
    let score = reading(summary.and_then(|s| s.overall_score.as_ref()));
    format!("Grade {grade} | Score {score}")
}

pub fn fixed(value: Option<f64>, places: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.places$}"),
        _ => NOT_AVAILABLE.to_string(),
    }
}

pub fn reading(value: Option<&Reading>) -> String {
    value
        .map(render_reading)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn text(value: Option<&String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.clone(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn with_unit(value: String, unit: &str) -> String {
    if value == NOT_AVAILABLE {
        value
    } else {
        format!("{value} {unit}")
    }
}

fn phase_line(phase: &AccelerationPhase) -> String {
    format!(
        "Frame {}: Acceleration {}, Speed {}",
        reading(phase.frame.as_ref()),
        fixed(phase.acceleration, 2),
        fixed(phase.speed, 2)
    )
}

fn render_reading(value: &Reading) -> String {
    match value {
        Reading::Number(n) => n.to_string(),
        Reading::Text(s) => s.clone(),
        Reading::Flag(b) => b.to_string(),
        Reading::Other(v) => v.to_string(),
    }
}

fn vec_or_default<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let value = Option::<Vec<T>>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

fn string_or_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let rendered = match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => return Ok(None),
        other => other.to_string(),
    };
    Ok(Some(rendered))
}

fn float_or_none<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Number(n) => Ok(n.as_f64()),
        Value::String(s) => Ok(s.trim().parse::<f64>().ok()),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_formats_places_and_falls_back() {
        assert_eq!(fixed(Some(87.456), 2), "87.46");
        assert_eq!(fixed(Some(7.0), 1), "7.0");
        assert_eq!(fixed(None, 2), NOT_AVAILABLE);
        assert_eq!(fixed(Some(f64::NAN), 2), NOT_AVAILABLE);
    }

    #[test]
    fn whole_numbers_render_without_fraction() {
        assert_eq!(render_reading(&Reading::Number(42.0)), "42");
        assert_eq!(render_reading(&Reading::Number(1.5)), "1.5");
    }
}
