#![forbid(unsafe_code)]

//! Timestamped input scripts and the scenarios that replay them.
//!
//! A [`Script`] is an ordered list of [`Step`]s: raw input events separated
//! by explicit waits. Time only advances through `wait`, so a script replays
//! identically on every machine.
//!
//! # JSON Schema
//!
//! ```json
//! {"name":"double_click_drag",
//!  "recognizers":[{"gesture":"drag","label":"orbit","config":{"number_of_clicks":2}}],
//!  "steps":[
//!    {"step":"input","event":{"type":"button_down","button":0,"pos":{"x":0.0,"y":0.0}}},
//!    {"step":"wait","ms":120},
//!    {"step":"reset"}
//!  ]}
//! ```

use gestura_core::{
    DragConfig, DragRecognizer, InputEvent, PanConfig, PanRecognizer, Point, Recognize, TargetId,
    TouchId, Translation,
};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One step of a script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    /// Deliver a raw input event.
    Input { event: InputEvent },
    /// Advance the synthetic clock.
    Wait { ms: u64 },
    /// Reset every recognizer and forget held input.
    Reset,
}

/// Builder for input scripts.
///
/// The builder remembers the last pointer position so relative moves can be
/// expressed with [`move_by`](Script::move_by).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    steps: Vec<Step>,
    #[serde(skip)]
    cursor: Point,
}

impl Script {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap already built steps.
    #[must_use]
    pub fn from_steps(steps: Vec<Step>) -> Self {
        let cursor = steps
            .iter()
            .rev()
            .find_map(|step| match step {
                Step::Input {
                    event:
                        InputEvent::ButtonDown { pos, .. }
                        | InputEvent::ButtonUp { pos, .. }
                        | InputEvent::PointerMove { pos },
                } => Some(*pos),
                _ => None,
            })
            .unwrap_or_default();
        Self { steps, cursor }
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[must_use]
    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Total time covered by the waits of the script, in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        self.steps
            .iter()
            .map(|step| match step {
                Step::Wait { ms } => *ms,
                _ => 0,
            })
            .sum()
    }

    /// Append a raw event.
    #[must_use]
    pub fn input(mut self, event: InputEvent) -> Self {
        self.steps.push(Step::Input { event });
        self
    }

    /// Press `button` at the current pointer position.
    #[must_use]
    pub fn down(self, button: u8) -> Self {
        let pos = self.cursor;
        self.input(InputEvent::ButtonDown { button, pos })
    }

    /// Release `button` at the current pointer position.
    #[must_use]
    pub fn up(self, button: u8) -> Self {
        let pos = self.cursor;
        self.input(InputEvent::ButtonUp { button, pos })
    }

    /// Press and release `button` in place.
    #[must_use]
    pub fn click(self, button: u8) -> Self {
        self.down(button).up(button)
    }

    /// Move the pointer to an absolute position.
    #[must_use]
    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.cursor = Point::new(x, y);
        let pos = self.cursor;
        self.input(InputEvent::PointerMove { pos })
    }

    /// Move the pointer relative to its current position.
    #[must_use]
    pub fn move_by(self, dx: f64, dy: f64) -> Self {
        let target = self.cursor + Translation::new(dx, dy);
        self.move_to(target.x, target.y)
    }

    #[must_use]
    pub fn touch_start(self, id: TouchId, x: f64, y: f64) -> Self {
        self.input(InputEvent::TouchStart {
            id,
            pos: Point::new(x, y),
        })
    }

    #[must_use]
    pub fn touch_move(self, id: TouchId, x: f64, y: f64) -> Self {
        self.input(InputEvent::TouchMove {
            id,
            pos: Point::new(x, y),
        })
    }

    #[must_use]
    pub fn touch_end(self, id: TouchId, x: f64, y: f64) -> Self {
        self.input(InputEvent::TouchEnd {
            id,
            pos: Point::new(x, y),
        })
    }

    #[must_use]
    pub fn touch_cancel(self, id: TouchId) -> Self {
        self.input(InputEvent::TouchCancel { id })
    }

    /// Advance the synthetic clock by `ms` milliseconds.
    #[must_use]
    pub fn wait(mut self, ms: u64) -> Self {
        self.steps.push(Step::Wait { ms });
        self
    }

    #[must_use]
    pub fn reset(mut self) -> Self {
        self.steps.push(Step::Reset);
        self
    }
}

// ============================================================================
// Scenarios
// ============================================================================

/// A recognizer to install before replaying a script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "gesture", rename_all = "snake_case")]
pub enum RecognizerSpec {
    Drag {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(default)]
        config: DragConfig,
    },
    Pan {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(default)]
        config: PanConfig,
    },
}

impl RecognizerSpec {
    #[must_use]
    pub fn drag(config: DragConfig) -> Self {
        Self::Drag {
            label: None,
            config,
        }
    }

    #[must_use]
    pub fn pan(config: PanConfig) -> Self {
        Self::Pan {
            label: None,
            config,
        }
    }

    #[must_use]
    pub fn labeled(mut self, name: impl Into<String>) -> Self {
        match &mut self {
            Self::Drag { label, .. } | Self::Pan { label, .. } => *label = Some(name.into()),
        }
        self
    }

    /// Build the recognizer, bound to `target`.
    ///
    /// # Errors
    ///
    /// Propagates configuration errors from the recognizer builder.
    pub fn build(&self, target: TargetId) -> Result<Box<dyn Recognize>> {
        Ok(match self {
            Self::Drag { label, config } => Box::new(
                DragRecognizer::builder()
                    .config(config.clone())
                    .target(target)
                    .maybe_name(label.clone())
                    .build()?,
            ),
            Self::Pan { label, config } => Box::new(
                PanRecognizer::builder()
                    .config(config.clone())
                    .target(target)
                    .maybe_name(label.clone())
                    .build()?,
            ),
        })
    }
}

/// Recognizers plus the script to replay through them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub recognizers: Vec<RecognizerSpec>,
    pub steps: Vec<Step>,
}

impl Scenario {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            recognizers: Vec::new(),
            steps: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_recognizer(mut self, spec: RecognizerSpec) -> Self {
        self.recognizers.push(spec);
        self
    }

    #[must_use]
    pub fn with_script(mut self, script: Script) -> Self {
        self.steps = script.into_steps();
        self
    }

    #[must_use]
    pub fn script(&self) -> Script {
        Script::from_steps(self.steps.clone())
    }

    /// Parse a scenario from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Json`](crate::error::HarnessError::Json) on
    /// malformed input.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Json`](crate::error::HarnessError::Json) if
    /// serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_by_is_relative_to_last_position() {
        let script = Script::new().move_to(10.0, 10.0).down(0).move_by(3.0, -4.0);
        assert_eq!(
            script.steps()[2],
            Step::Input {
                event: InputEvent::PointerMove {
                    pos: Point::new(13.0, 6.0)
                }
            }
        );
    }

    #[test]
    fn buttons_use_cursor_position() {
        let script = Script::new().move_to(4.0, 2.0).click(1);
        assert_eq!(
            script.steps()[1..],
            [
                Step::Input {
                    event: InputEvent::ButtonDown {
                        button: 1,
                        pos: Point::new(4.0, 2.0)
                    }
                },
                Step::Input {
                    event: InputEvent::ButtonUp {
                        button: 1,
                        pos: Point::new(4.0, 2.0)
                    }
                },
            ]
        );
    }

    #[test]
    fn duration_sums_waits() {
        let script = Script::new().wait(100).down(0).wait(50).reset().wait(5);
        assert_eq!(script.duration_ms(), 155);
        assert_eq!(script.len(), 5);
    }

    #[test]
    fn from_steps_recovers_cursor() {
        let original = Script::new().move_to(7.0, 1.0).touch_start(1, 50.0, 50.0);
        let rebuilt = Script::from_steps(original.clone().into_steps()).move_by(1.0, 0.0);
        assert_eq!(
            rebuilt.steps().last(),
            Some(&Step::Input {
                event: InputEvent::PointerMove {
                    pos: Point::new(8.0, 1.0)
                }
            })
        );
    }

    #[test]
    fn step_json_shape() {
        let json = serde_json::to_value(Step::Wait { ms: 30 }).unwrap();
        assert_eq!(json, serde_json::json!({"step": "wait", "ms": 30}));

        let json = serde_json::to_value(Step::Input {
            event: InputEvent::TouchCancel { id: 4 },
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"step": "input", "event": {"type": "touch_cancel", "id": 4}})
        );
    }

    #[test]
    fn scenario_parses_with_config_defaults() {
        let scenario = Scenario::from_json(
            r#"{
                "name": "pan_only",
                "recognizers": [{"gesture": "pan", "config": {"min_touches": 2}}],
                "steps": [{"step": "reset"}]
            }"#,
        )
        .unwrap();
        assert_eq!(
            scenario.recognizers,
            vec![RecognizerSpec::pan(PanConfig::default().with_min_touches(2))]
        );
        assert_eq!(scenario.steps, vec![Step::Reset]);
    }

    #[test]
    fn recognizer_build_reports_invalid_config() {
        let spec = RecognizerSpec::drag(DragConfig::default().with_clicks(0));
        assert!(spec.build(TargetId(1)).is_err());

        let scenario = Scenario::from_json(
            r#"{"name":"slow","recognizers":[{"gesture":"drag","config":{"number_of_clicks":2,"max_click_interval":{"secs":18446744073709551615,"nanos":0}}}],"steps":[]}"#,
        )
        .unwrap();
        assert!(scenario.recognizers[0].build(TargetId(1)).is_err());

        let built = RecognizerSpec::pan(PanConfig::default())
            .labeled("two-finger")
            .build(TargetId(1))
            .unwrap();
        assert_eq!(built.gesture(), "pan");
        assert_eq!(built.label(), Some("two-finger"));
    }
}
