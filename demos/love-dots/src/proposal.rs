use serde::Serialize;

pub const QUESTION: &str = "Will you be my valentine?";
pub const ANSWER_LINES: [&str; 2] = ["Yeah!", "I know you love me ❤️"];

/// The two buttons under the question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    Yes,
    No,
}

impl Choice {
    pub fn label(self) -> &'static str {
        match self {
            Choice::Yes => "Yes",
            Choice::No => "No",
        }
    }

    /// "No" is never an option.
    pub fn enabled(self) -> bool {
        matches!(self, Choice::Yes)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ButtonView {
    pub choice: Choice,
    pub label: &'static str,
    pub enabled: bool,
}

/// What the prompt area shows. Absent until every dot is connected.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum PromptView {
    Asking {
        question: &'static str,
        buttons: Vec<ButtonView>,
    },
    Answered {
        lines: Vec<&'static str>,
    },
}

impl PromptView {
    pub fn for_state(completed: bool, accepted: bool) -> Option<Self> {
        if !completed {
            return None;
        }
        if accepted {
            return Some(PromptView::Answered { lines: ANSWER_LINES.to_vec() });
        }
        let buttons = [Choice::Yes, Choice::No]
            .into_iter()
            .map(|choice| ButtonView {
                choice,
                label: choice.label(),
                enabled: choice.enabled(),
            })
            .collect();
        Some(PromptView::Asking { question: QUESTION, buttons })
    }
}
