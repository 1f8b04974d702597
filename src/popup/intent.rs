//! Intent gate: the confirm/dismiss predicate-and-event sequencing.
//!
//! A registered predicate can veto closing. The outcome event is only
//! emitted when a predicate was actually evaluated; with no predicate the
//! request proceeds silently.

use std::fmt;

use super::event::PopupEvent;

/// Caller-supplied gate. Returning `false` vetoes the close.
pub type Predicate = Box<dyn FnMut() -> bool>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Confirm,
    Dismiss,
}

impl Intent {
    fn outcome(self, proceed: bool) -> PopupEvent {
        match (self, proceed) {
            (Intent::Confirm, true) => PopupEvent::ConfirmAccept,
            (Intent::Confirm, false) => PopupEvent::ConfirmReject,
            (Intent::Dismiss, true) => PopupEvent::DismissAccept,
            (Intent::Dismiss, false) => PopupEvent::DismissReject,
        }
    }
}

/// Result of running an intent through the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub proceed: bool,
    /// Present only when a predicate was evaluated.
    pub event: Option<PopupEvent>,
}

#[derive(Default)]
pub struct IntentGate {
    confirm: Option<Predicate>,
    dismiss: Option<Predicate>,
}

impl IntentGate {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, intent: Intent) -> &mut Option<Predicate> {
        match intent {
            Intent::Confirm => &mut self.confirm,
            Intent::Dismiss => &mut self.dismiss,
        }
    }

    pub fn set(&mut self, intent: Intent, predicate: Predicate) {
        *self.slot(intent) = Some(predicate);
    }

    pub fn clear(&mut self, intent: Intent) {
        *self.slot(intent) = None;
    }

    pub fn evaluate(&mut self, intent: Intent) -> Verdict {
        match self.slot(intent) {
            Some(predicate) => {
                let proceed = predicate();
                Verdict {
                    proceed,
                    event: Some(intent.outcome(proceed)),
                }
            }
            None => Verdict {
                proceed: true,
                event: None,
            },
        }
    }
}

impl fmt::Debug for IntentGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntentGate")
            .field("confirm", &self.confirm.is_some())
            .field("dismiss", &self.dismiss.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn absent_predicate_proceeds_without_event() {
        let mut gate = IntentGate::new();
        assert_eq!(
            gate.evaluate(Intent::Confirm),
            Verdict {
                proceed: true,
                event: None
            }
        );
    }

    #[test]
    fn predicate_outcome_maps_to_intent_events() {
        let mut gate = IntentGate::new();
        gate.set(Intent::Dismiss, Box::new(|| false));
        gate.set(Intent::Confirm, Box::new(|| true));
        assert_eq!(
            gate.evaluate(Intent::Dismiss).event,
            Some(PopupEvent::DismissReject)
        );
        assert_eq!(
            gate.evaluate(Intent::Confirm).event,
            Some(PopupEvent::ConfirmAccept)
        );
    }

    #[test]
    fn predicate_runs_once_per_evaluation() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let mut gate = IntentGate::new();
        gate.set(
            Intent::Confirm,
            Box::new(move || {
                counter.set(counter.get() + 1);
                true
            }),
        );
        gate.evaluate(Intent::Confirm);
        gate.evaluate(Intent::Dismiss);
        assert_eq!(calls.get(), 1);
        gate.clear(Intent::Confirm);
        assert_eq!(
            gate.evaluate(Intent::Confirm),
            Verdict {
                proceed: true,
                event: None
            }
        );
        assert_eq!(calls.get(), 1);
    }
}
