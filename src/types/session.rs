use std::sync::Arc;

use super::answer::Answer;
use super::error::{StateError, SubmitError};
use super::node::Target;
use super::schema::{NodeRef, Schema};

/// One run of the engine over a schema: current node, answer history, and
/// completion flag.
///
/// A session is single-owner; it mutates through `&mut self` only and must
/// not be shared across threads. Any number of sessions may share one
/// `Arc<Schema>` read-only.
#[derive(Debug)]
pub struct Session {
    schema: Arc<Schema>,
    current: Option<usize>,
    started: bool,
    complete: bool,
    history: Vec<(String, Answer)>,
}

/// An independent snapshot of a session's progress. Mutating it never
/// affects the session it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyState {
    pub current_node_id: Option<String>,
    pub history: Vec<(String, Answer)>,
    pub complete: bool,
}

impl Session {
    /// Create an unstarted session over a compiled schema.
    #[must_use]
    pub fn new(schema: Arc<Schema>) -> Self {
        Self {
            schema,
            current: None,
            started: false,
            complete: false,
            history: Vec::new(),
        }
    }

    /// Enter the schema's entry node and return it.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::AlreadyStarted`] if the session has already been
    /// started, whether or not it has completed. Use [`reset()`](Self::reset)
    /// to run a session again.
    pub fn start(&mut self) -> Result<NodeRef<'_>, StateError> {
        if self.started {
            return Err(StateError::AlreadyStarted);
        }
        self.started = true;
        self.current = Some(0);
        Ok(self.schema.entry())
    }

    /// Validate an answer for the current node, record it, and advance.
    ///
    /// Returns the next node, or `None` when the survey is complete (no path
    /// rule matched, or a rule targeted the finish sentinel).
    ///
    /// # Errors
    ///
    /// [`SubmitError::State`] if called before `start()` or after
    /// completion. [`SubmitError::Answer`] if the answer fails the node's
    /// type or constraint checks; the session is left untouched and the
    /// caller may re-prompt and retry.
    pub fn submit_answer(&mut self, raw: impl Into<Answer>) -> Result<Option<NodeRef<'_>>, SubmitError> {
        if !self.started {
            return Err(StateError::NotStarted.into());
        }
        let Some(current) = self.current else {
            return Err(StateError::Complete.into());
        };

        let node = &self.schema.nodes[current];
        let answer = crate::evaluate::check_answer(node, raw.into())?;
        let target = crate::evaluate::next_target(node, &answer);
        let node_id = node.id.clone();

        // Revisiting a node (a schema cycle) overwrites its earlier answer in
        // place, keeping first-visit order.
        match self.history.iter_mut().find(|(id, _)| *id == node_id) {
            Some(entry) => entry.1 = answer,
            None => self.history.push((node_id, answer)),
        }

        match target {
            Some(Target::Node(next)) => {
                tracing::trace!(
                    from = %self.schema.nodes[current].id,
                    to = %self.schema.nodes[next].id,
                    "transition"
                );
                self.current = Some(next);
                Ok(Some(NodeRef {
                    node: &self.schema.nodes[next],
                }))
            }
            Some(Target::Finish) | None => {
                tracing::debug!(answers = self.history.len(), "survey complete");
                self.current = None;
                self.complete = true;
                Ok(None)
            }
        }
    }

    /// The node awaiting an answer, if the session is started and not
    /// complete.
    #[must_use]
    pub fn current_node(&self) -> Option<NodeRef<'_>> {
        self.current.map(|i| NodeRef {
            node: &self.schema.nodes[i],
        })
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// An independent snapshot of the session's progress.
    #[must_use]
    pub fn state(&self) -> SurveyState {
        SurveyState {
            current_node_id: self.current.map(|i| self.schema.nodes[i].id.clone()),
            history: self.history.clone(),
            complete: self.complete,
        }
    }

    /// The recorded answers, keyed by node id in visitation order.
    #[must_use]
    pub fn answers(&self) -> Vec<(String, Answer)> {
        self.history.clone()
    }

    /// The recorded answer for one node, if it has been visited.
    #[must_use]
    pub fn answer_for(&self, node_id: &str) -> Option<&Answer> {
        self.history
            .iter()
            .find(|(id, _)| id == node_id)
            .map(|(_, answer)| answer)
    }

    /// Clear all progress so the session can run again over the same schema.
    pub fn reset(&mut self) {
        self.current = None;
        self.started = false;
        self.complete = false;
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AnswerError, InputKind, SchemaBuilder};

    fn boolean_branch_schema() -> Arc<Schema> {
        Arc::new(
            SchemaBuilder::new()
                .node("a", "Own the property?", InputKind::Boolean, |n| {
                    n.path("answer === true", "b").path("answer === false", "c")
                })
                .node("b", "Describe the roof.", InputKind::Text, |n| n)
                .node("c", "Describe the unit.", InputKind::Text, |n| n)
                .compile()
                .unwrap(),
        )
    }

    #[test]
    fn start_enters_first_node() {
        let mut session = Session::new(boolean_branch_schema());
        let node = session.start().unwrap();
        assert_eq!(node.id(), "a");
        assert_eq!(session.state().current_node_id, Some("a".to_owned()));
    }

    #[test]
    fn start_twice_is_an_error() {
        let mut session = Session::new(boolean_branch_schema());
        session.start().unwrap();
        assert_eq!(session.start().unwrap_err(), StateError::AlreadyStarted);
    }

    #[test]
    fn submit_before_start_is_an_error() {
        let mut session = Session::new(boolean_branch_schema());
        let err = session.submit_answer(true).unwrap_err();
        assert!(matches!(err, SubmitError::State(StateError::NotStarted)));
    }

    #[test]
    fn boolean_branch_scenario() {
        let mut session = Session::new(boolean_branch_schema());
        assert_eq!(session.start().unwrap().id(), "a");

        let next = session.submit_answer(true).unwrap().unwrap();
        assert_eq!(next.id(), "b");

        let done = session.submit_answer("done").unwrap();
        assert!(done.is_none());
        assert!(session.is_complete());
        assert_eq!(
            session.answers(),
            vec![
                ("a".to_owned(), Answer::Bool(true)),
                ("b".to_owned(), Answer::Text("done".to_owned())),
            ]
        );
    }

    #[test]
    fn submit_after_completion_is_an_error() {
        let mut session = Session::new(boolean_branch_schema());
        session.start().unwrap();
        session.submit_answer(false).unwrap();
        session.submit_answer("small flat").unwrap();
        assert!(session.is_complete());

        let err = session.submit_answer("more").unwrap_err();
        assert!(matches!(err, SubmitError::State(StateError::Complete)));
    }

    #[test]
    fn rejected_answer_leaves_state_untouched() {
        let mut session = Session::new(boolean_branch_schema());
        session.start().unwrap();

        let before = session.state();
        let err = session.submit_answer("yes").unwrap_err();
        assert!(matches!(
            err,
            SubmitError::Answer(AnswerError::Type { .. })
        ));
        assert_eq!(session.state(), before);

        // Retry with a valid answer succeeds.
        assert_eq!(session.submit_answer(true).unwrap().unwrap().id(), "b");
    }

    #[test]
    fn state_snapshots_are_independent() {
        let mut session = Session::new(boolean_branch_schema());
        session.start().unwrap();
        session.submit_answer(true).unwrap();

        let mut snapshot = session.state();
        snapshot.current_node_id = Some("hijacked".to_owned());
        snapshot.history.clear();
        snapshot.complete = true;

        let fresh = session.state();
        assert_eq!(fresh.current_node_id, Some("b".to_owned()));
        assert_eq!(fresh.history.len(), 1);
        assert!(!fresh.complete);
    }

    #[test]
    fn reset_allows_a_second_run() {
        let mut session = Session::new(boolean_branch_schema());
        session.start().unwrap();
        session.submit_answer(true).unwrap();
        session.submit_answer("first run").unwrap();
        assert!(session.is_complete());

        session.reset();
        assert!(!session.is_complete());
        assert!(session.answers().is_empty());
        assert_eq!(session.start().unwrap().id(), "a");
    }

    #[test]
    fn revisited_node_overwrites_its_answer_in_place() {
        let schema = Arc::new(
            SchemaBuilder::new()
                .node("code", "Enter the code.", InputKind::Number, |n| {
                    n.path("answer == 42", "finish").path("default", "code")
                })
                .compile()
                .unwrap(),
        );
        let mut session = Session::new(schema);
        session.start().unwrap();

        let again = session.submit_answer(7.0).unwrap().unwrap();
        assert_eq!(again.id(), "code");
        let done = session.submit_answer(42.0).unwrap();
        assert!(done.is_none());
        assert_eq!(
            session.answers(),
            vec![("code".to_owned(), Answer::Number(42.0))]
        );
    }

    #[test]
    fn answer_for_finds_recorded_values() {
        let mut session = Session::new(boolean_branch_schema());
        session.start().unwrap();
        session.submit_answer(true).unwrap();

        assert_eq!(session.answer_for("a"), Some(&Answer::Bool(true)));
        assert_eq!(session.answer_for("b"), None);
    }

    #[test]
    fn current_node_tracks_progress() {
        let mut session = Session::new(boolean_branch_schema());
        assert!(session.current_node().is_none());
        session.start().unwrap();
        assert_eq!(session.current_node().unwrap().id(), "a");
        session.submit_answer(true).unwrap();
        assert_eq!(session.current_node().unwrap().id(), "b");
        session.submit_answer("done").unwrap();
        assert!(session.current_node().is_none());
    }
}
