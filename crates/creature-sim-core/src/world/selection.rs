use crate::creature::CreatureId;

/// World-scoped record of which creature is being viewed and which one is
/// targeted by two-party actions. Both slots are last-write-wins and never
/// validated against liveness.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<CreatureId>,
    action_target: Option<CreatureId>,
}

impl SelectionState {
    pub fn select_creature(&mut self, id: CreatureId) {
        self.selected = Some(id);
    }

    pub fn select_action_creature(&mut self, id: CreatureId) {
        self.action_target = Some(id);
    }

    pub fn is_selected_creature(&self, id: CreatureId) -> bool {
        self.selected == Some(id)
    }

    pub fn is_action_creature(&self, id: CreatureId) -> bool {
        self.action_target == Some(id)
    }

    pub fn selected(&self) -> Option<CreatureId> {
        self.selected
    }

    pub fn action_target(&self) -> Option<CreatureId> {
        self.action_target
    }
}
