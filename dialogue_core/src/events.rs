//! Dialogue events - notifications a session publishes to the presentation layer.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::resolver::ResolvedChoice;

/// Handle returned when registering an observer, used to remove it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub Uuid);

impl ListenerId {
    /// Create a new random listener ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ListenerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ListenerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Something a session reports as it runs.
///
/// Events are delivered synchronously. On every resolution the line comes
/// first, then the choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogueEvent<'a> {
    /// A node was (re)resolved.
    LineUpdated { speaker: &'a str, line: &'a str },

    /// The unlocked choices for the current node. Empty for nodes without
    /// choices and for missing nodes.
    ChoicesUpdated { choices: &'a [ResolvedChoice<'a>] },

    /// The dialogue reached its end.
    Ended,
}

impl DialogueEvent<'_> {
    /// Short name of the event kind, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DialogueEvent::LineUpdated { .. } => "line_updated",
            DialogueEvent::ChoicesUpdated { .. } => "choices_updated",
            DialogueEvent::Ended => "ended",
        }
    }
}

/// Receives events from a session.
///
/// Any `FnMut(&DialogueEvent)` closure is an observer.
pub trait DialogueObserver {
    fn on_event(&mut self, event: &DialogueEvent<'_>);
}

impl<F> DialogueObserver for F
where
    F: FnMut(&DialogueEvent<'_>),
{
    fn on_event(&mut self, event: &DialogueEvent<'_>) {
        self(event)
    }
}

/// Observers registered with a session, in registration order.
#[derive(Default)]
pub(crate) struct ObserverList<'o> {
    observers: Vec<(ListenerId, Box<dyn DialogueObserver + 'o>)>,
}

impl<'o> ObserverList<'o> {
    pub(crate) fn add(&mut self, observer: Box<dyn DialogueObserver + 'o>) -> ListenerId {
        let id = ListenerId::new();
        self.observers.push((id, observer));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.len()
    }

    pub(crate) fn notify(&mut self, event: &DialogueEvent<'_>) {
        for (_, observer) in &mut self.observers {
            observer.on_event(event);
        }
    }
}

impl std::fmt::Debug for ObserverList<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverList")
            .field("len", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed<'a, F>(f: F) -> Box<dyn DialogueObserver + 'a>
    where
        F: FnMut(&DialogueEvent<'_>) + 'a,
    {
        Box::new(f)
    }

    #[test]
    fn test_closures_are_observers() {
        let mut seen = Vec::new();
        {
            let mut list = ObserverList::default();
            list.add(boxed(|event| seen.push(event.kind())));
            list.notify(&DialogueEvent::Ended);
            list.notify(&DialogueEvent::LineUpdated {
                speaker: "Guard",
                line: "Halt!",
            });
        }
        assert_eq!(seen, vec!["ended", "line_updated"]);
    }

    #[test]
    fn test_remove_observer() {
        let mut count = 0;
        {
            let mut list = ObserverList::default();
            let id = list.add(boxed(|_| count += 1));
            assert_eq!(list.len(), 1);

            list.notify(&DialogueEvent::Ended);
            assert!(list.remove(id));
            assert!(!list.remove(id));
            list.notify(&DialogueEvent::Ended);
        }
        assert_eq!(count, 1);
    }

    #[test]
    fn test_listener_ids_are_unique() {
        assert_ne!(ListenerId::new(), ListenerId::new());
    }
}
