//! Two-step text entry for a rotation axis: first point, then second point.

use affine3d_core::{parse_point, EngineError, Vector3};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

const DEFAULT_P2: &str = "1 1 0";

#[derive(Debug, Clone, PartialEq)]
enum Stage {
    First,
    Second { p1: String },
}

/// What happened after a key press.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptOutcome {
    Pending,
    Cancelled,
    /// Both points were entered; the texts are ready for the scene.
    Submitted { p1: String, p2: String },
    Invalid(EngineError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisPrompt {
    stage: Stage,
    buffer: String,
    default_p1: String,
}

impl AxisPrompt {
    /// Starts the prompt, offering `suggested_p1` (usually the model
    /// centroid) when the first answer is left empty.
    pub fn new(suggested_p1: Vector3) -> Self {
        Self {
            stage: Stage::First,
            buffer: String::new(),
            default_p1: format!(
                "{:.2} {:.2} {:.2}",
                suggested_p1.x, suggested_p1.y, suggested_p1.z
            ),
        }
    }

    /// The text shown on the prompt line.
    pub fn line(&self) -> String {
        let (label, default) = match &self.stage {
            Stage::First => ("P1", self.default_p1.as_str()),
            Stage::Second { .. } => ("P2", DEFAULT_P2),
        };
        format!("{label} as x y z [{default}]: {}", self.buffer)
    }

    /// Ctrl+C cancels like Esc; other Ctrl and Alt chords are not typed.
    pub fn handle_key(&mut self, key: KeyEvent) -> PromptOutcome {
        let chord = key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        match key.code {
            KeyCode::Esc => PromptOutcome::Cancelled,
            KeyCode::Char('c') | KeyCode::Char('C')
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                PromptOutcome::Cancelled
            }
            KeyCode::Char(_) if chord => PromptOutcome::Pending,
            KeyCode::Backspace => {
                self.buffer.pop();
                PromptOutcome::Pending
            }
            KeyCode::Char(c) => {
                self.buffer.push(c);
                PromptOutcome::Pending
            }
            KeyCode::Enter => self.submit(),
            _ => PromptOutcome::Pending,
        }
    }

    fn submit(&mut self) -> PromptOutcome {
        let answer = std::mem::take(&mut self.buffer);
        let answer = answer.trim();

        if let Stage::Second { p1 } = &self.stage {
            let p2 = if answer.is_empty() { DEFAULT_P2 } else { answer };
            return PromptOutcome::Submitted {
                p1: p1.clone(),
                p2: p2.to_string(),
            };
        }

        let p1 = if answer.is_empty() {
            self.default_p1.clone()
        } else {
            answer.to_string()
        };
        // reject a bad first point before asking for the second
        if let Err(err) = parse_point(&p1) {
            return PromptOutcome::Invalid(err);
        }
        self.stage = Stage::Second { p1 };
        PromptOutcome::Pending
    }
}
