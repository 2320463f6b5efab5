//! Advice generator: rounded metrics to short feedback sentences.
//!
//! Each metric has its own threshold ladder and contributes at most one
//! sentence, in the order head, torso, stability, then the short-session
//! caveat. When nothing reaches a warning tier and the session is long
//! enough, a single generic message replaces the per-metric praise.

use serde::{Deserialize, Serialize};

use crate::feature::Metrics;

pub const HEAD_FORWARD: &str = "Your head leans forward noticeably. Try gently tucking your chin and imagining a string pulling the top of your head upward.";
pub const HEAD_SLIGHTLY_FORWARD: &str = "Your head posture is slightly forward. Focus on keeping your ears aligned over your shoulders.";
pub const HEAD_GOOD: &str =
    "Your head posture looks good! Keep maintaining that neutral alignment.";
pub const TORSO_LEANING: &str = "Your upper body leans forward quite a bit. Engage your core and think about stacking your ribcage over your hips.";
pub const TORSO_DECENT: &str = "Your torso posture is decent, but you may benefit from sitting or standing a little taller.";
pub const TORSO_SOLID: &str = "Your torso posture looks solid! Keep up the good work maintaining that upright position.";
pub const STABILITY_VARIES: &str = "Your posture varies a lot during the session. Try to pause periodically and reset your posture.";
pub const STABILITY_MOSTLY: &str = "Your posture is mostly stable, but small adjustments throughout the session could help.";
pub const STABILITY_VERY: &str = "Your posture is very stable throughout the session. Great job maintaining that consistency!";
pub const SHORT_SESSION: &str = "This was a short session. Longer practice sessions will give more reliable posture feedback.";
pub const GENERIC_PRAISE: &str =
    "Nice work! Your posture metrics look solid. Keep maintaining this form.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdviceThresholds {
    pub head_major_deg: f64,
    pub head_minor_deg: f64,
    pub torso_major_deg: f64,
    pub torso_minor_deg: f64,
    pub stability_major_deg: f64,
    pub stability_minor_deg: f64,
    pub short_session_sec: f64,
}

impl Default for AdviceThresholds {
    fn default() -> Self {
        Self {
            head_major_deg: 12.0,
            head_minor_deg: 8.0,
            torso_major_deg: 10.0,
            torso_minor_deg: 6.0,
            stability_major_deg: 6.0,
            stability_minor_deg: 4.0,
            short_session_sec: 30.0,
        }
    }
}

/// Metrics the advice generator reads. Absent metrics are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AdviceInput {
    pub head_dev_deg: Option<f64>,
    pub torso_dev_deg: Option<f64>,
    pub stability_std_dev_deg: Option<f64>,
    pub session_duration_sec: Option<f64>,
}

impl From<&Metrics> for AdviceInput {
    fn from(metrics: &Metrics) -> Self {
        Self {
            head_dev_deg: Some(metrics.head_dev_deg),
            torso_dev_deg: Some(metrics.torso_dev_deg),
            stability_std_dev_deg: Some(metrics.stability_std_dev_deg),
            session_duration_sec: Some(metrics.session_duration_sec),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    Major,
    Minor,
    Fine,
}

impl Tier {
    fn of(value: f64, major: f64, minor: f64) -> Self {
        if value > major {
            Self::Major
        } else if value > minor {
            Self::Minor
        } else {
            Self::Fine
        }
    }

    fn pick(self, [major, minor, fine]: [&'static str; 3]) -> &'static str {
        match self {
            Self::Major => major,
            Self::Minor => minor,
            Self::Fine => fine,
        }
    }
}

#[must_use]
pub fn generate_advice(input: &AdviceInput, thresholds: &AdviceThresholds) -> Vec<String> {
    let t = thresholds;
    let ladders = [
        (
            input.head_dev_deg,
            t.head_major_deg,
            t.head_minor_deg,
            [HEAD_FORWARD, HEAD_SLIGHTLY_FORWARD, HEAD_GOOD],
        ),
        (
            input.torso_dev_deg,
            t.torso_major_deg,
            t.torso_minor_deg,
            [TORSO_LEANING, TORSO_DECENT, TORSO_SOLID],
        ),
        (
            input.stability_std_dev_deg,
            t.stability_major_deg,
            t.stability_minor_deg,
            [STABILITY_VARIES, STABILITY_MOSTLY, STABILITY_VERY],
        ),
    ];

    let mut advice = Vec::new();
    let mut triggered = false;
    for (value, major, minor, sentences) in ladders {
        let Some(value) = value else {
            continue;
        };
        let tier = Tier::of(value, major, minor);
        triggered |= tier != Tier::Fine;
        advice.push(tier.pick(sentences));
    }

    if input
        .session_duration_sec
        .is_some_and(|d| d < t.short_session_sec)
    {
        triggered = true;
        advice.push(SHORT_SESSION);
    }

    if !triggered {
        advice.clear();
        advice.push(GENERIC_PRAISE);
    }

    advice.into_iter().map(str::to_owned).collect()
}
