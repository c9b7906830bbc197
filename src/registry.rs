use std::fmt::Display;

use egui::Pos2;
use slotmap::SlotMap;

slotmap::new_key_type! {
    pub struct ComponentId;
}

impl Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format!("{:?}", self.0))
    }
}

/// The closed set of symbols a user can place on the board.
#[derive(serde::Deserialize, serde::Serialize, PartialEq, Eq, Copy, Debug, Clone)]
pub enum ComponentKind {
    Junction,
    Resistor,
    Lamp,
    Battery,
}

impl ComponentKind {
    pub const ALL: [Self; 4] = [Self::Junction, Self::Resistor, Self::Lamp, Self::Battery];

    pub fn label(self) -> &'static str {
        match self {
            Self::Junction => "Junction point",
            Self::Resistor => "Resistor",
            Self::Lamp => "Lamp",
            Self::Battery => "Battery",
        }
    }
}

#[derive(serde::Deserialize, serde::Serialize, Copy, Debug, Clone)]
pub struct Component {
    pub kind: ComponentKind,
    /// pos is the anchor of the symbol on the board, in surface coordinates.
    /// Connector lines attach here.
    pub pos: Pos2,
}

/// Owns every placed component and is the sole allocator of their identities.
/// The drawing code reports moves and delete gestures back here through
/// commands; nothing else mutates positions.
#[derive(Default, serde::Deserialize, serde::Serialize, Debug, Clone)]
pub struct Registry {
    components: SlotMap<ComponentId, Component>,
}

impl Registry {
    pub fn create(&mut self, kind: ComponentKind, pos: Pos2) -> ComponentId {
        let id = self.components.insert(Component { kind, pos });
        log::info!("placed {} [{id}] at {pos:?}", kind.label());
        id
    }

    /// Idempotent: a second destroy of the same id is a no-op. Double-click
    /// events can race with an earlier destroy in rapid interaction.
    pub fn destroy(&mut self, id: ComponentId) {
        if self.components.remove(id).is_none() {
            log::debug!("destroy of absent component [{id}] ignored");
        }
    }

    pub fn update_position(&mut self, id: ComponentId, pos: Pos2) {
        if let Some(c) = self.components.get_mut(id) {
            c.pos = pos;
        }
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.components.contains_key(id)
    }

    pub fn position(&self, id: ComponentId) -> Option<Pos2> {
        self.components.get(id).map(|c| c.pos)
    }

    pub fn get(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(id)
    }

    pub fn ids(&self) -> Vec<ComponentId> {
        self.components.keys().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ComponentId, &Component)> {
        self.components.iter()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
