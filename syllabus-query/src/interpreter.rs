//! QueryInterpreter: `(raw_text, recent_turns, previous_intent)` → [`QueryIntent`].

use std::collections::BTreeSet;

use syllabus_core::config::InterpreterConfig;
use syllabus_core::models::{ChatTurn, Role};
use syllabus_core::{Confidence, IntentField, IntentKind, Penalty, QueryIntent};
use tracing::debug;

use crate::slots::{aspects, codes, constraints, departments, levels, preferences, referenced, terms, Spans};
use crate::{classifier, followup, inheritance, reflection};

/// Stateless interpreter. All context comes in through [`interpret`](Self::interpret).
#[derive(Debug, Clone, Default)]
pub struct QueryInterpreter {
    config: InterpreterConfig,
}

impl QueryInterpreter {
    pub fn new(config: InterpreterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Interpret one user turn.
    ///
    /// Deterministic: the same `(raw, recent_turns, previous)` always gives an
    /// identical intent. Only the trailing `recent_turns` turns of history are
    /// read.
    pub fn interpret(
        &self,
        raw: &str,
        recent_turns: &[ChatTurn],
        previous: Option<&QueryIntent>,
    ) -> QueryIntent {
        // ASCII lowercasing keeps byte offsets, so spans claimed on `raw`
        // line up with `lower`.
        let lower = raw.to_ascii_lowercase();
        let window = &recent_turns[recent_turns.len().saturating_sub(self.config.recent_turns)..];
        let last_assistant_codes: BTreeSet<String> = window
            .iter()
            .rev()
            .find(|t| t.role == Role::Assistant)
            .map(|t| referenced::codes_in(&t.content))
            .unwrap_or_default();
        let has_context = !window.is_empty() || previous.is_some();

        let mut spans = Spans::default();
        let code_hits = codes::extract(raw, &mut spans);
        let query_codes: BTreeSet<String> = code_hits.values.iter().cloned().collect();

        let signal = followup::detect(&lower, &query_codes, &last_assistant_codes, has_context);
        let classified = classifier::classify(&lower, !query_codes.is_empty());

        let dept_hits = departments::extract(&lower, &mut spans);
        let term_hits = terms::extract(&lower, &mut spans, &self.config);
        let constraint_hits = constraints::extract(&lower, &mut spans, &self.config);
        let level_hits = levels::extract(&lower, &mut spans);
        let preference_hits = preferences::extract(&lower);

        let mut intent = QueryIntent::new(raw);
        intent.is_followup = signal.is_followup;
        intent.set_confidence(IntentField::IsFollowup, signal.confidence);

        let (kind, kind_confidence) = match (classified, previous) {
            (Some(hit), _) => hit,
            // A follow-up with no cue of its own continues the previous turn.
            (None, Some(prev)) if signal.is_followup => (
                prev.intent_kind,
                prev.confidence_of(IntentField::Intent)
                    .penalize(Penalty::Inherited(self.config.inheritance_penalty)),
            ),
            (None, _) => (
                IntentKind::General,
                Confidence::new(self.config.default_intent_confidence),
            ),
        };
        intent.intent_kind = kind;
        intent.set_confidence(IntentField::Intent, kind_confidence);

        intent.course_codes = query_codes.clone();
        intent.set_confidence(IntentField::CourseCodes, code_hits.confidence);
        intent.departments = dept_hits.values.into_iter().collect();
        intent.set_confidence(IntentField::Departments, dept_hits.confidence);
        intent.level_ranges = level_hits.values;
        intent.set_confidence(IntentField::LevelRanges, level_hits.confidence);
        intent.terms = term_hits.values.into_iter().collect();
        intent.set_confidence(IntentField::Terms, term_hits.confidence);
        intent.constraints = constraint_hits.constraints;
        intent.set_confidence(IntentField::Constraints, constraint_hits.confidence);
        intent.preferences = preference_hits.values.into_iter().collect();
        intent.set_confidence(IntentField::Preferences, preference_hits.confidence);
        intent.aspects = aspects::extract(&lower);
        intent.implicit_preferences = aspects::implicit(&lower).into_iter().collect();

        if signal.is_followup {
            let refs = referenced::extract(&query_codes, &last_assistant_codes);
            intent.referenced_codes = refs.values.into_iter().collect();
            intent.set_confidence(IntentField::ReferencedCodes, refs.confidence);
        }

        // Codes carried from history do not count as new information.
        let supplied_new_slots = !intent.departments.is_empty()
            || !intent.level_ranges.is_empty()
            || !query_codes.is_empty();
        if signal.is_followup && !supplied_new_slots {
            if let Some(prev) = previous {
                inheritance::inherit(&mut intent, prev, self.config.inheritance_penalty);
            }
        }

        intent.reflection = reflection::reflect(&intent, &level_hits.notes, &self.config);

        debug!(
            intent = %intent.intent_kind,
            followup = intent.is_followup,
            departments = intent.departments.len(),
            levels = intent.level_ranges.len(),
            codes = intent.course_codes.len(),
            terms = intent.terms.len(),
            "query interpreted"
        );
        intent
    }
}
