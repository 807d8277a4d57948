use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One labeled value presented to the participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stimulus {
    pub name: String,
    pub value: f64,
}

impl Stimulus {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Animation manipulation applied to stimulus presentation. Changing it
/// never affects scoring, only the presentation timing profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Static,
    #[default]
    Simple,
    Fancy,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    None,
    EaseOut,
    Spring { stiffness: f32, damping: f32 },
}

/// Timing profile a front end should apply when mounting the stimulus set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionProfile {
    pub duration_ms: u64,
    pub easing: Easing,
}

impl MotionProfile {
    pub const NONE: MotionProfile = MotionProfile {
        duration_ms: 0,
        easing: Easing::None,
    };
}

impl Condition {
    /// A reduced-motion preference overrides every condition.
    pub fn motion_profile(self, reduced_motion: bool) -> MotionProfile {
        if reduced_motion {
            return MotionProfile::NONE;
        }
        match self {
            Condition::Static => MotionProfile::NONE,
            Condition::Simple => MotionProfile {
                duration_ms: 350,
                easing: Easing::EaseOut,
            },
            Condition::Fancy => MotionProfile {
                duration_ms: 800,
                easing: Easing::Spring {
                    stiffness: 180.0,
                    damping: 18.0,
                },
            },
        }
    }
}

/// Window dimensions sampled when the participant responds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub w: u32,
    pub h: u32,
}

/// Persisted record of one presentation-and-response cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialEvent {
    pub session_id: String,
    pub participant_id: Uuid,
    pub condition: Condition,
    pub trial_index: usize,
    pub stimulus: Stimulus,
    pub response: String,
    pub correct: bool,
    /// Elapsed milliseconds from stimulus mount to click, from a monotonic
    /// clock.
    pub rt: u64,
    pub viewport: Viewport,
    pub reduced_motion: bool,
    pub timestamp: DateTime<Utc>,
}

/// Built-in stimulus set used when no data endpoint is reachable, so a
/// session is always runnable offline.
pub fn demo_stimuli() -> Vec<Stimulus> {
    vec![
        Stimulus::new("A", 30.0),
        Stimulus::new("B", 80.0),
        Stimulus::new("C", 45.0),
        Stimulus::new("D", 60.0),
        Stimulus::new("E", 20.0),
        Stimulus::new("F", 90.0),
        Stimulus::new("G", 55.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trial_event_uses_camel_case_wire_keys() {
        let event = TrialEvent {
            session_id: "pilot".into(),
            participant_id: Uuid::new_v4(),
            condition: Condition::Fancy,
            trial_index: 1,
            stimulus: Stimulus::new("B", 80.0),
            response: "B".into(),
            correct: true,
            rt: 120,
            viewport: Viewport { w: 1280, h: 720 },
            reduced_motion: false,
            timestamp: Utc::now(),
        };

        let wire = serde_json::to_value(&event).expect("serialize");
        assert_eq!(wire["sessionId"], "pilot");
        assert_eq!(wire["trialIndex"], 1);
        assert_eq!(wire["condition"], "fancy");
        assert_eq!(wire["reducedMotion"], false);
        assert_eq!(wire["stimulus"]["name"], "B");
        assert!(wire["timestamp"].is_string());
    }

    #[test]
    fn reduced_motion_overrides_every_condition() {
        for condition in [Condition::Static, Condition::Simple, Condition::Fancy] {
            assert_eq!(condition.motion_profile(true), MotionProfile::NONE);
        }
        assert_eq!(Condition::Simple.motion_profile(false).duration_ms, 350);
        assert!(matches!(
            Condition::Fancy.motion_profile(false).easing,
            Easing::Spring { .. }
        ));
    }
}
