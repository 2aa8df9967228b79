use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use chrono::Local;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::remote::DrillApi;
use crate::report::{
    AccelerationPhase, AgilityAnalysis, AnalysisReport, AnalysisResponse, ComparisonToStandards,
    DetailedMetrics, EnduranceAnalysis, JumpAnalysis, OverallRating, PerformanceHighlights,
    PerformanceSummary, PlayerAnalysis, Reading, ShootingAnalysis, SprintAnalysis,
    TechnicalAnalysis, VideoAnalysisData,
};
use crate::session::{Credentials, Registration, User};
use crate::upload::DrillSubmission;

const STRENGTHS: [&str; 6] = [
    "Explosive first step",
    "Consistent sprint form",
    "Clean landing mechanics",
    "Strong follow-through",
    "Quick change of direction",
    "High work rate",
];

const IMPROVEMENTS: [&str; 6] = [
    "Deceleration control",
    "Arm drive during sprints",
    "Single-leg balance",
    "Shot placement under fatigue",
    "Takeoff knee drive",
    "Recovery between reps",
];

const RECOMMENDATIONS: [&str; 4] = [
    "Add plyometric work twice a week",
    "Focus on deceleration drills before match day",
    "Maintain current load and add mobility sessions",
    "Increase sprint volume gradually over four weeks",
];

/// Offline stand-in for the analysis service: fixed identity, fabricated reports.
pub struct MockDrillApi {
    analyze_delay: Duration,
}

impl MockDrillApi {
    pub fn new(analyze_delay: Duration) -> Self {
        Self { analyze_delay }
    }
}

impl DrillApi for MockDrillApi {
    fn login(&self, creds: &Credentials) -> Result<User> {
        Ok(User {
            id: "1".to_string(),
            name: "John Doe".to_string(),
            email: creds.email.clone(),
            position: "Forward".to_string(),
            team: "Eagles FC".to_string(),
        })
    }

    fn register(&self, registration: &Registration) -> Result<User> {
        let id = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis().to_string())
            .unwrap_or_else(|_| "0".to_string());
        Ok(User {
            id,
            name: registration.name.clone(),
            email: registration.email.clone(),
            position: registration.position.clone(),
            team: registration.team.clone(),
        })
    }

    fn analyze(&self, drill: &DrillSubmission) -> Result<Option<AnalysisReport>> {
        if !self.analyze_delay.is_zero() {
            thread::sleep(self.analyze_delay);
        }
        let mut rng = rand::thread_rng();
        Ok(Some(random_report(&mut rng, &drill.file_name)))
    }
}

pub fn random_report<R: Rng>(rng: &mut R, file_name: &str) -> AnalysisReport {
    let max_speed = rng.gen_range(24.0..34.0);
    let phases = (0..rng.gen_range(2..5))
        .map(|i| AccelerationPhase {
            frame: Some(Reading::Number(f64::from(i * 30 + rng.gen_range(0..30)))),
            acceleration: Some(rng.gen_range(1.5..5.5)),
            speed: Some(rng.gen_range(8.0..max_speed)),
        })
        .collect();
    let score: f64 = rng.gen_range(60.0..98.0);
    let frames = rng.gen_range(300..2400);
    let fps = rng.gen_range(18.0..60.0);

    AnalysisReport {
        message: Some(format!("Analysis complete for {file_name}")),
        response: Some(AnalysisResponse {
            analysis_status: Some("completed".to_string()),
            analysis_timestamp: Some(Local::now().format("%Y-%m-%dT%H:%M:%S").to_string()),
            download_url: None,
            player_analysis: Some(PlayerAnalysis {
                comparison_to_standards: Some(ComparisonToStandards {
                    elite_jump_threshold: Some(Reading::Number(60.0)),
                    elite_speed_threshold: Some(Reading::Number(32.0)),
                    player_jump_percentile: num(rng, 30.0, 99.0),
                    player_speed_percentile: Some(rng.gen_range(30.0..99.0)),
                }),
                detailed_metrics: Some(DetailedMetrics {
                    agility_analysis: Some(AgilityAnalysis {
                        balance_rating: Some(rng.gen_range(5.0..10.0)),
                        body_control_score: Some(rng.gen_range(5.0..10.0)),
                        change_direction_speed: num(rng, 2.0, 5.0),
                        coordination_score: Some(rng.gen_range(5.0..10.0)),
                        flexibility_rating: num(rng, 4.0, 10.0),
                        reaction_time_ms: Some(Reading::Number(f64::from(
                            rng.gen_range(180..320),
                        ))),
                    }),
                    endurance_analysis: Some(EnduranceAnalysis {
                        cardiovascular_efficiency: num(rng, 50.0, 95.0),
                        consistency_over_time: num(rng, 50.0, 95.0),
                        fatigue_resistance: num(rng, 50.0, 95.0),
                        recovery_rate: num(rng, 50.0, 95.0),
                        stamina_score: num(rng, 50.0, 95.0),
                    }),
                    jump_analysis: Some(JumpAnalysis {
                        air_time_ms: Some(Reading::Number(f64::from(rng.gen_range(350..750)))),
                        average_jump_height_cm: num(rng, 30.0, 60.0),
                        explosive_power_score: num(rng, 50.0, 95.0),
                        jump_frequency: num(rng, 0.5, 2.5),
                        landing_stability: num(rng, 50.0, 95.0),
                        leg_strength_score: num(rng, 50.0, 95.0),
                        max_vertical_jump_cm: num(rng, 40.0, 75.0),
                        takeoff_technique: pick(rng, &["Good", "Excellent", "Needs work"]),
                    }),
                    overall_rating: Some(OverallRating {
                        athleticism_score: Some(rng.gen_range(5.0..10.0)),
                        coach_recommendation: pick(rng, &RECOMMENDATIONS),
                        physical_condition: Some(rng.gen_range(5.0..10.0)),
                        potential_rating: Some(rng.gen_range(5.0..10.0)),
                        technical_ability: Some(rng.gen_range(5.0..10.0)),
                    }),
                    shooting_analysis: Some(ShootingAnalysis {
                        accuracy_rating: num(rng, 50.0, 95.0),
                        body_positioning_score: Some(rng.gen_range(5.0..10.0)),
                        follow_through_quality: Some(rng.gen_range(5.0..10.0)),
                        shot_power_score: num(rng, 50.0, 95.0),
                        technique_consistency: num(rng, 50.0, 95.0),
                    }),
                    sprint_analysis: Some(SprintAnalysis {
                        acceleration_phases: phases,
                        average_speed_kmh: Some(rng.gen_range(15.0..max_speed)),
                        deceleration_control: num(rng, 50.0, 95.0),
                        form_consistency: Some(rng.gen_range(0.6..0.98)),
                        max_speed_kmh: Some(max_speed),
                        running_efficiency: num(rng, 50.0, 95.0),
                        sprint_endurance: num(rng, 50.0, 95.0),
                        stride_frequency: num(rng, 3.5, 5.0),
                        stride_length_m: num(rng, 1.6, 2.4),
                    }),
                }),
            }),
            performance_highlights: Some(PerformanceHighlights {
                highest_jump: Some(Reading::Text(format!(
                    "{:.1} cm",
                    rng.gen_range(40.0..75.0)
                ))),
                peak_acceleration: Some(Reading::Text(format!(
                    "{:.2} m/s²",
                    rng.gen_range(3.0..6.0)
                ))),
                sprint_sessions: Some(Reading::Number(f64::from(rng.gen_range(1..6)))),
                top_speed_achieved: Some(Reading::Text(format!("{max_speed:.1} km/h"))),
                total_jumps_recorded: Some(Reading::Number(f64::from(rng.gen_range(0..12)))),
            }),
            player_performance_summary: Some(PerformanceSummary {
                areas_for_improvement: sample(rng, &IMPROVEMENTS, 2),
                coach_recommendation: pick(rng, &RECOMMENDATIONS),
                key_strengths: sample(rng, &STRENGTHS, 3),
                overall_grade: Some(Reading::Text(grade_for(score).to_string())),
                overall_score: Some(Reading::Number(round1(score))),
            }),
            technical_analysis: Some(TechnicalAnalysis {
                balance_control: pick(rng, &["Stable", "Good", "Inconsistent"]),
                body_coordination: pick(rng, &["Excellent", "Good", "Developing"]),
                landing_technique: pick(rng, &["Soft", "Stiff", "Good"]),
                sprint_form_consistency: pick(rng, &["High", "Medium", "Low"]),
            }),
            video_analysis_data: Some(VideoAnalysisData {
                analysis_completion_time: Some(f64::from(frames) / fps),
                detection_success_rate: Some(Reading::Text(format!(
                    "{:.1}%",
                    rng.gen_range(80.0..99.9)
                ))),
                num_frames_processed: Some(Reading::Number(f64::from(frames))),
                processing_speed_fps: Some(fps),
            }),
        }),
    }
}

pub fn grade_for(score: f64) -> &'static str {
    if score >= 90.0 {
        "A"
    } else if score >= 80.0 {
        "B"
    } else if score >= 70.0 {
        "C"
    } else {
        "D"
    }
}

fn pick<R: Rng>(rng: &mut R, options: &[&str]) -> Option<Reading> {
    options
        .choose(rng)
        .map(|choice| Reading::Text(choice.to_string()))
}

fn sample<R: Rng>(rng: &mut R, options: &[&str], amount: usize) -> Vec<Reading> {
    options
        .choose_multiple(rng, amount)
        .map(|choice| Reading::Text(choice.to_string()))
        .collect()
}

fn num<R: Rng>(rng: &mut R, lo: f64, hi: f64) -> Option<Reading> {
    Some(Reading::Number(round1(rng.gen_range(lo..hi))))
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::report::{NOT_AVAILABLE, report_lines};

    #[test]
    fn random_report_fills_every_list() {
        let mut rng = StdRng::seed_from_u64(7);
        let report = random_report(&mut rng, "drill.mp4");
        let lines = report_lines(&report);
        let missing = lines
            .iter()
            .filter(|line| line.ends_with(NOT_AVAILABLE))
            .count();
        // Only the download URL is left out of fabricated reports.
        assert_eq!(missing, 1);
    }

    #[test]
    fn grades_cover_the_range() {
        assert_eq!(grade_for(95.0), "A");
        assert_eq!(grade_for(85.0), "B");
        assert_eq!(grade_for(72.0), "C");
        assert_eq!(grade_for(40.0), "D");
    }
}
