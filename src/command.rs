use egui::{Pos2, Rect, pos2};
use rand::Rng as _;

use crate::app::App;
use crate::registry::{ComponentId, ComponentKind};
use crate::selection::Pick;

/// New components land at a random spot at least this far from the right and
/// bottom canvas edges, so the whole symbol stays visible.
pub const PLACEMENT_MARGIN: f32 = 100.0;

/// One user gesture, reduced to a mutation of the shared state. The canvas
/// and toolbar only ever queue these; `apply_command` is the single place
/// where registry, graph, and selection change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Toolbar add; position is chosen when the command is applied.
    Add(ComponentKind),
    /// Drag-move to a new anchor position.
    Move(ComponentId, Pos2),
    /// Click; feeds the pick buffer and may complete a connection.
    Pick(ComponentId),
    /// Double-click delete, cascading to incident connections.
    Remove(ComponentId),
    /// Reset the whole board.
    Clear,
}

impl App {
    pub fn push_command(&mut self, command: Command) {
        self.pending_commands.push(command);
    }

    /// Drain the frame's queue in arrival order. Runs after the draw pass so
    /// every gesture sees a consistent board and the next frame repaints the
    /// result.
    pub fn apply_pending_commands(&mut self) {
        let commands: Vec<Command> = self.pending_commands.drain(..).collect();
        for command in commands {
            self.apply_command(command);
        }
    }

    pub fn apply_command(&mut self, command: Command) {
        match command {
            Command::Add(kind) => {
                let Some(canvas) = self.canvas_rect else {
                    log::warn!("dropped add of {}: surface not ready", kind.label());
                    return;
                };
                let pos = random_position(canvas);
                self.registry.create(kind, pos);
            }
            Command::Move(id, pos) => {
                self.registry.update_position(id, pos);
                self.graph.component_moved(&self.registry, id);
            }
            Command::Pick(id) => {
                if let Pick::Pair(a, b) = self.selection.pick(id)
                    && let Err(e) = self.graph.connect(&self.registry, a, b)
                {
                    // Recoverable: the pair is discarded, the buffer is
                    // already reset, the user just clicks again.
                    log::warn!("connection discarded: {e}");
                }
            }
            Command::Remove(id) => {
                // Cascade before the registry forgets the component, so no
                // connection ever points at a missing endpoint.
                self.graph.component_destroyed(id);
                self.registry.destroy(id);
                self.selection.forget(id);
                if self.drag.is_some_and(|d| d.id == id) {
                    self.drag = None;
                }
                if self.hovered == Some(id) {
                    self.hovered = None;
                }
            }
            Command::Clear => {
                self.registry = Default::default();
                self.graph = Default::default();
                self.selection.clear();
                self.drag = None;
                self.hovered = None;
                log::info!("cleared the board");
            }
        }
    }
}

fn random_position(canvas: Rect) -> Pos2 {
    let mut rng = rand::thread_rng();
    let max = (canvas.size() - egui::Vec2::splat(PLACEMENT_MARGIN)).max(egui::vec2(1.0, 1.0));
    pos2(
        canvas.left() + rng.gen_range(0.0..max.x),
        canvas.top() + rng.gen_range(0.0..max.y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    fn app_with_canvas() -> App {
        App {
            canvas_rect: Some(Rect::from_min_size(pos2(0.0, 0.0), vec2(800.0, 600.0))),
            ..Default::default()
        }
    }

    #[test]
    fn add_before_surface_ready_is_dropped() {
        let mut app = App::default();
        app.apply_command(Command::Add(ComponentKind::Lamp));
        assert!(app.registry.is_empty());
    }

    #[test]
    fn add_places_inside_canvas() {
        let mut app = app_with_canvas();
        for kind in ComponentKind::ALL {
            app.apply_command(Command::Add(kind));
        }
        assert_eq!(app.registry.len(), 4);
        let canvas = app.canvas_rect.expect("canvas rect missing");
        for (_, c) in app.registry.iter() {
            assert!(canvas.contains(c.pos), "{:?} placed outside canvas", c.kind);
        }
    }

    #[test]
    fn pick_pair_connects_and_resets() {
        let mut app = app_with_canvas();
        let a = app.registry.create(ComponentKind::Battery, pos2(10.0, 10.0));
        let b = app.registry.create(ComponentKind::Lamp, pos2(50.0, 50.0));

        app.apply_command(Command::Pick(a));
        assert!(app.graph.is_empty());
        app.apply_command(Command::Pick(b));

        assert_eq!(app.graph.len(), 1);
        let (_, conn) = app.graph.connections().next().expect("no connection");
        assert!(conn.involves(a) && conn.involves(b));
        assert_eq!(app.selection.pending(), None);
    }

    #[test]
    fn repeated_pick_keeps_buffer_and_creates_nothing() {
        let mut app = app_with_canvas();
        let a = app.registry.create(ComponentKind::Junction, pos2(0.0, 0.0));
        app.apply_command(Command::Pick(a));
        app.apply_command(Command::Pick(a));
        assert_eq!(app.selection.pending(), Some(a));
        assert!(app.graph.is_empty());
    }

    #[test]
    fn failed_pair_still_resets_buffer() {
        let mut app = app_with_canvas();
        let a = app.registry.create(ComponentKind::Junction, pos2(0.0, 0.0));
        let b = app.registry.create(ComponentKind::Junction, pos2(5.0, 5.0));
        // Stale pick: a dies between the two clicks of the pair.
        app.apply_command(Command::Pick(a));
        app.registry.destroy(a);
        app.apply_command(Command::Pick(b));
        assert!(app.graph.is_empty());
        assert_eq!(app.selection.pending(), None);
    }

    #[test]
    fn remove_forgets_pending_pick() {
        let mut app = app_with_canvas();
        let a = app.registry.create(ComponentKind::Resistor, pos2(0.0, 0.0));
        app.apply_command(Command::Pick(a));
        app.apply_command(Command::Remove(a));
        assert_eq!(app.selection.pending(), None);
        assert!(!app.registry.contains(a));
    }

    #[test]
    fn commands_apply_in_arrival_order() {
        let mut app = app_with_canvas();
        let a = app.registry.create(ComponentKind::Battery, pos2(0.0, 0.0));
        let b = app.registry.create(ComponentKind::Lamp, pos2(10.0, 10.0));
        app.push_command(Command::Pick(a));
        app.push_command(Command::Pick(b));
        app.push_command(Command::Move(a, pos2(30.0, 30.0)));
        app.apply_pending_commands();

        assert!(app.pending_commands.is_empty());
        assert_eq!(app.graph.len(), 1);
        let (_, conn) = app.graph.connections().next().expect("no connection");
        assert_eq!(conn.points, [pos2(30.0, 30.0), pos2(10.0, 10.0)]);
    }

    #[test]
    fn clear_resets_everything() {
        let mut app = app_with_canvas();
        let a = app.registry.create(ComponentKind::Battery, pos2(0.0, 0.0));
        let b = app.registry.create(ComponentKind::Lamp, pos2(10.0, 10.0));
        app.apply_command(Command::Pick(a));
        app.apply_command(Command::Pick(b));
        app.apply_command(Command::Clear);
        assert!(app.registry.is_empty());
        assert!(app.graph.is_empty());
        assert_eq!(app.selection.pending(), None);
    }

    /// The interactive session end to end: place, connect, drag, delete.
    #[test]
    fn connect_drag_delete_scenario() {
        let mut app = app_with_canvas();
        let a = app.registry.create(ComponentKind::Battery, pos2(10.0, 10.0));
        let b = app.registry.create(ComponentKind::Lamp, pos2(50.0, 50.0));

        app.apply_command(Command::Pick(a));
        app.apply_command(Command::Pick(b));
        let (_, conn) = app.graph.connections().next().expect("no connection");
        assert_eq!(conn.points, [pos2(10.0, 10.0), pos2(50.0, 50.0)]);

        app.apply_command(Command::Move(a, pos2(20.0, 20.0)));
        let (_, conn) = app.graph.connections().next().expect("no connection");
        assert_eq!(conn.points, [pos2(20.0, 20.0), pos2(50.0, 50.0)]);

        app.apply_command(Command::Remove(b));
        assert!(app.graph.is_empty());
        assert!(app.registry.contains(a));
        assert!(!app.registry.contains(b));
    }
}
