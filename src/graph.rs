use std::collections::HashMap;

use egui::Pos2;
use slotmap::SlotMap;

use crate::registry::{ComponentId, Registry};

slotmap::new_key_type! {
    pub struct ConnectionId;
}

/// An undirected edge between two distinct components, drawn as a straight
/// line. `points` caches the endpoint positions so rendering never reaches
/// back into the registry; it is recomputed whenever an endpoint moves.
#[derive(serde::Deserialize, serde::Serialize, Copy, Debug, Clone, PartialEq)]
pub struct Connection {
    pub a: ComponentId,
    pub b: ComponentId,
    pub points: [Pos2; 2],
}

impl Connection {
    pub fn involves(&self, id: ComponentId) -> bool {
        self.a == id || self.b == id
    }

    pub fn other(&self, id: ComponentId) -> ComponentId {
        if self.a == id { self.b } else { self.a }
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConnectError {
    #[error("cannot connect component {0} to itself")]
    SameComponent(ComponentId),
    #[error("connection endpoint {0} does not exist")]
    MissingEndpoint(ComponentId),
}

/// Owns the set of connections and keeps their line geometry consistent with
/// the live positions of their endpoints. Connections are indexed by endpoint
/// id so moves and deletes only ever touch incident edges.
#[derive(Default, serde::Deserialize, serde::Serialize, Debug, Clone)]
pub struct ConnectionGraph {
    connections: SlotMap<ConnectionId, Connection>,
    incident: HashMap<ComponentId, Vec<ConnectionId>>,
}

impl ConnectionGraph {
    /// Create a connection between two existing, distinct components.
    /// Duplicate edges between the same pair are allowed; the user gets two
    /// overlapping lines, which is what the product currently wants.
    pub fn connect(
        &mut self,
        registry: &Registry,
        a: ComponentId,
        b: ComponentId,
    ) -> Result<ConnectionId, ConnectError> {
        if a == b {
            return Err(ConnectError::SameComponent(a));
        }
        let pa = registry.position(a).ok_or(ConnectError::MissingEndpoint(a))?;
        let pb = registry.position(b).ok_or(ConnectError::MissingEndpoint(b))?;

        let id = self.connections.insert(Connection {
            a,
            b,
            points: [pa, pb],
        });
        self.incident.entry(a).or_default().push(id);
        self.incident.entry(b).or_default().push(id);
        log::info!("connected [{a}] - [{b}]");
        Ok(id)
    }

    /// Refresh the cached geometry of every connection incident to `id`.
    /// Recomputing both endpoints is cheaper than tracking which side moved.
    pub fn component_moved(&mut self, registry: &Registry, id: ComponentId) {
        let Some(incident) = self.incident.get(&id) else {
            return;
        };
        for &cid in incident {
            let conn = &mut self.connections[cid];
            if let (Some(pa), Some(pb)) = (registry.position(conn.a), registry.position(conn.b)) {
                conn.points = [pa, pb];
            }
        }
    }

    /// Cascade: drop every connection incident to `id`. Called before the
    /// registry forgets the component so no connection ever outlives an
    /// endpoint, not even within a single command.
    pub fn component_destroyed(&mut self, id: ComponentId) {
        let Some(incident) = self.incident.remove(&id) else {
            return;
        };
        for cid in incident {
            let Some(conn) = self.connections.remove(cid) else {
                continue;
            };
            let other = conn.other(id);
            if let Some(list) = self.incident.get_mut(&other) {
                list.retain(|&c| c != cid);
                if list.is_empty() {
                    self.incident.remove(&other);
                }
            }
        }
        log::info!("removed connections of [{id}]");
    }

    pub fn get(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(id)
    }

    pub fn connections(&self) -> impl Iterator<Item = (ConnectionId, &Connection)> {
        self.connections.iter()
    }

    pub fn incident_to(&self, id: ComponentId) -> &[ConnectionId] {
        self.incident.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
