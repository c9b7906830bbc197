use crate::registry::ComponentId;

/// Outcome of feeding one pick into the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    /// First of a pair; waiting for the second.
    Pending(ComponentId),
    /// Same component picked twice in a row; nothing changes. A click on a
    /// symbol can bubble back through its own handler, this swallows that.
    Ignored,
    /// Two distinct components picked; the buffer is already reset.
    Pair(ComponentId, ComponentId),
}

/// Two-state pick buffer that turns consecutive clicks into connection
/// requests. It never holds more than one pending id and resets the moment a
/// pair completes, whether or not the connect that follows succeeds.
#[derive(Default, serde::Deserialize, serde::Serialize, Debug, Clone)]
pub struct Selection {
    pending: Option<ComponentId>,
}

impl Selection {
    pub fn pick(&mut self, id: ComponentId) -> Pick {
        match self.pending {
            None => {
                self.pending = Some(id);
                Pick::Pending(id)
            }
            Some(first) if first == id => Pick::Ignored,
            Some(first) => {
                self.pending = None;
                Pick::Pair(first, id)
            }
        }
    }

    /// Drop the pending pick if it references `id`. Deleting a component
    /// must not leave its id waiting to be paired.
    pub fn forget(&mut self, id: ComponentId) {
        if self.pending == Some(id) {
            self.pending = None;
        }
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }

    pub fn pending(&self) -> Option<ComponentId> {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{ComponentKind, Registry};
    use egui::pos2;

    fn two_ids() -> (ComponentId, ComponentId) {
        let mut reg = Registry::default();
        let a = reg.create(ComponentKind::Junction, pos2(0.0, 0.0));
        let b = reg.create(ComponentKind::Junction, pos2(1.0, 1.0));
        (a, b)
    }

    #[test]
    fn two_distinct_picks_form_a_pair() {
        let (a, b) = two_ids();
        let mut sel = Selection::default();
        assert_eq!(sel.pick(a), Pick::Pending(a));
        assert_eq!(sel.pending(), Some(a));
        assert_eq!(sel.pick(b), Pick::Pair(a, b));
        assert_eq!(sel.pending(), None);
    }

    #[test]
    fn duplicate_pick_is_ignored() {
        let (a, b) = two_ids();
        let mut sel = Selection::default();
        sel.pick(a);
        assert_eq!(sel.pick(a), Pick::Ignored);
        // Buffer still holds the original pick.
        assert_eq!(sel.pending(), Some(a));
        assert_eq!(sel.pick(b), Pick::Pair(a, b));
    }

    #[test]
    fn forget_clears_only_matching_pick() {
        let (a, b) = two_ids();
        let mut sel = Selection::default();
        sel.pick(a);
        sel.forget(b);
        assert_eq!(sel.pending(), Some(a));
        sel.forget(a);
        assert_eq!(sel.pending(), None);
    }

    #[test]
    fn buffer_is_reusable_after_a_pair() {
        let (a, b) = two_ids();
        let mut sel = Selection::default();
        sel.pick(a);
        sel.pick(b);
        assert_eq!(sel.pick(b), Pick::Pending(b));
    }
}
