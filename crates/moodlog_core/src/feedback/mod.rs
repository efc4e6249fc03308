//! Peripheral question-feedback payload and outbound boundary.
//!
//! # Responsibility
//! - Build the structured payload submitted when a user answers an
//!   in-app question slide.
//! - Define the fire-and-forget transport seam; no transport lives here.
//!
//! # Invariants
//! - Submission failure degrades silently (logged only) and never affects
//!   committed log entries.

use crate::model::settings::Settings;
use chrono::Utc;
use log::warn;
use serde::Serialize;

/// Outbound transport seam. Implemented by the app shell.
pub trait FeedbackTransport {
    /// Submits one serialized payload. Errors are advisory only.
    fn submit(&self, payload: &serde_json::Value) -> Result<(), String>;
}

/// Structured payload for one answered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionFeedback {
    /// Submission timestamp, RFC 3339.
    pub date: String,
    /// User locale, e.g. `en-US`.
    pub locale: String,
    /// Anonymous per-install id.
    pub device_id: String,
    /// Id of the answered question.
    pub question_id: String,
    /// Ids of the selected answers. Never answer display text.
    pub answer_ids: Vec<String>,
}

impl QuestionFeedback {
    /// Builds a payload stamped with the current time.
    pub fn new(
        question_id: impl Into<String>,
        answer_ids: Vec<String>,
        locale: impl Into<String>,
        settings: &Settings,
    ) -> Self {
        Self {
            date: Utc::now().to_rfc3339(),
            locale: locale.into(),
            device_id: settings.device_id.clone(),
            question_id: question_id.into(),
            answer_ids,
        }
    }
}

/// Submits feedback without surfacing failure to the caller.
pub fn submit_feedback(transport: &dyn FeedbackTransport, feedback: &QuestionFeedback) {
    let payload = match serde_json::to_value(feedback) {
        Ok(payload) => payload,
        Err(err) => {
            warn!("event=feedback_submit module=feedback status=error error={err}");
            return;
        }
    };

    if let Err(err) = transport.submit(&payload) {
        warn!(
            "event=feedback_submit module=feedback status=error question_id={} error={err}",
            feedback.question_id
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{submit_feedback, FeedbackTransport, QuestionFeedback};
    use crate::model::settings::Settings;
    use std::cell::RefCell;

    struct Recorder {
        payloads: RefCell<Vec<serde_json::Value>>,
        fail: bool,
    }

    impl FeedbackTransport for Recorder {
        fn submit(&self, payload: &serde_json::Value) -> Result<(), String> {
            if self.fail {
                return Err("network unreachable".to_string());
            }
            self.payloads.borrow_mut().push(payload.clone());
            Ok(())
        }
    }

    #[test]
    fn payload_carries_answer_ids_and_device_id() {
        let settings = Settings::new();
        let feedback = QuestionFeedback::new(
            "q-mood-check",
            vec!["a1".to_string(), "a2".to_string()],
            "en-US",
            &settings,
        );

        let recorder = Recorder {
            payloads: RefCell::new(Vec::new()),
            fail: false,
        };
        submit_feedback(&recorder, &feedback);

        let payloads = recorder.payloads.borrow();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0]["question_id"], "q-mood-check");
        assert_eq!(payloads[0]["device_id"], settings.device_id);
        assert_eq!(payloads[0]["answer_ids"][1], "a2");
    }

    #[test]
    fn transport_failure_is_absorbed() {
        let settings = Settings::new();
        let feedback = QuestionFeedback::new("q", Vec::new(), "de-DE", &settings);
        let recorder = Recorder {
            payloads: RefCell::new(Vec::new()),
            fail: true,
        };
        // Must not panic or propagate.
        submit_feedback(&recorder, &feedback);
        assert!(recorder.payloads.borrow().is_empty());
    }
}
