use std::fmt::Write as _;

use egui::{
    Align, Button, CornerRadius, Layout, Rect, Sense, Stroke, StrokeKind, Ui, Vec2, Widget as _,
    vec2,
};

use crate::command::Command;
use crate::config::CanvasConfig;
use crate::graph::ConnectionGraph;
use crate::registry::{ComponentId, ComponentKind, Registry};
use crate::selection::Selection;
use crate::symbols;

pub const PANEL_BUTTON_MIN_SIZE: Vec2 = vec2(140.0, 30.0);
pub const OUTLINE_THICKNESS: f32 = 2.0;

/// A component grabbed by the pointer. The offset keeps the symbol from
/// jumping to the cursor when the grab lands off the anchor.
#[derive(Debug, Clone, Copy)]
pub struct Drag {
    pub id: ComponentId,
    pub grab_offset: Vec2,
}

#[derive(serde::Deserialize, serde::Serialize)]
pub struct App {
    pub canvas_config: CanvasConfig,
    pub registry: Registry,
    pub graph: ConnectionGraph,
    // pick buffer for wiring two components together
    #[serde(skip)]
    pub selection: Selection,
    #[serde(skip)]
    pub drag: Option<Drag>,
    #[serde(skip)]
    pub hovered: Option<ComponentId>,
    // gestures collected during the draw pass, applied afterwards
    #[serde(skip)]
    pub pending_commands: Vec<Command>,
    // known after the first frame; adds before that are dropped
    #[serde(skip)]
    pub canvas_rect: Option<Rect>,
    pub show_debug: bool,
}

impl Default for App {
    fn default() -> Self {
        Self {
            canvas_config: CanvasConfig::default(),
            registry: Registry::default(),
            graph: ConnectionGraph::default(),
            selection: Selection::default(),
            drag: None,
            hovered: None,
            pending_commands: Vec::new(),
            canvas_rect: None,
            show_debug: false,
        }
    }
}

impl eframe::App for App {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                let is_web = cfg!(target_arch = "wasm32");

                if !is_web {
                    ui.menu_button("File", |ui| {
                        if ui.button("Quit").clicked() {
                            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                    ui.add_space(16.0);
                }

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_debug, "Board Debug");
                });
                ui.add_space(16.0);

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    egui::widgets::global_theme_preference_buttons(ui);
                    ui.add_space(16.0);
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_main(ui);
        });
    }
}

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        if let Some(storage) = cc.storage {
            eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default()
        } else {
            Default::default()
        }
    }

    pub fn draw_main(&mut self, ui: &mut Ui) {
        if self.show_debug {
            egui::Window::new("Debug logs").show(ui.ctx(), |ui| {
                egui_logger::logger_ui().show(ui);
            });
        }

        ui.with_layout(Layout::left_to_right(Align::Min), |ui| {
            if self.show_debug {
                let full_h = ui.available_height();
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let mut dbg = self.debug_string();
                    ui.add_sized(vec2(260.0, full_h), egui::TextEdit::multiline(&mut dbg));
                });
            }

            ui.vertical(|ui| {
                ui.heading("Components");
                self.draw_panel(ui);
            });
            ui.separator();
            ui.vertical(|ui| {
                ui.heading("Canvas");
                ui.label("click two components to wire them");
                ui.label("double click a component to remove it");
                self.draw_canvas(ui);
            });
        });

        self.apply_pending_commands();
    }

    fn draw_panel(&mut self, ui: &mut Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink([true, false])
            .show(ui, |ui| {
                for kind in ComponentKind::ALL {
                    if Button::new(kind.label())
                        .min_size(PANEL_BUTTON_MIN_SIZE)
                        .ui(ui)
                        .clicked()
                    {
                        self.push_command(Command::Add(kind));
                    }
                    ui.add_space(8.0);
                }

                ui.add_space(8.0);

                if Button::new("Clear")
                    .min_size(PANEL_BUTTON_MIN_SIZE)
                    .ui(ui)
                    .clicked()
                {
                    self.push_command(Command::Clear);
                }
            });
    }

    fn draw_canvas(&mut self, ui: &mut Ui) {
        let (resp, painter) = ui.allocate_painter(ui.available_size(), Sense::click());
        let canvas_rect = resp.rect;

        // Keep symbols from drawing over the panel while dragged.
        ui.set_clip_rect(canvas_rect);
        self.canvas_rect = Some(canvas_rect);

        // Wires first so symbols draw over their own endpoints.
        for (_, conn) in self.graph.connections() {
            painter.line_segment(conn.points, self.canvas_config.wire_stroke());
        }

        self.hovered = None;
        for id in self.registry.ids() {
            self.draw_component(ui, id);
        }
    }

    fn draw_component(&mut self, ui: &mut Ui, id: ComponentId) {
        let Some(comp) = self.registry.get(id).copied() else {
            return;
        };
        let rect = symbols::bounds(comp.kind, comp.pos).expand(self.canvas_config.hit_padding);
        let resp = ui.allocate_rect(rect, Sense::click_and_drag());

        if resp.hovered() {
            self.hovered = Some(id);
        }

        if resp.drag_started()
            && let Some(mouse) = ui.ctx().pointer_interact_pos()
        {
            self.drag = Some(Drag {
                id,
                grab_offset: comp.pos - mouse,
            });
        }
        if resp.dragged()
            && let Some(mouse) = ui.ctx().pointer_interact_pos()
            && let Some(drag) = self.drag
            && drag.id == id
        {
            self.push_command(Command::Move(id, mouse + drag.grab_offset));
        }
        if resp.drag_stopped() {
            self.drag = None;
        }

        // A double click arrives as click-then-double_clicked; the stray
        // pick is forgotten again when the remove applies.
        if resp.double_clicked() {
            self.push_command(Command::Remove(id));
        } else if resp.clicked() {
            self.push_command(Command::Pick(id));
        }

        symbols::paint(ui.painter(), comp.kind, comp.pos);

        if self.selection.pending() == Some(id) {
            draw_outline(ui, rect, self.canvas_config.pick_outline_color);
        } else if resp.hovered() && self.drag.is_none() {
            draw_outline(ui, rect, self.canvas_config.hover_outline_color);
        }
    }

    fn debug_string(&self) -> String {
        let mut out = String::new();
        writeln!(out, "components ({})", self.registry.len()).ok();
        for (id, c) in self.registry.iter() {
            writeln!(
                out,
                "|- {} [{id}] at ({:.0}, {:.0})",
                c.kind.label(),
                c.pos.x,
                c.pos.y
            )
            .ok();
        }
        writeln!(out).ok();
        writeln!(out, "connections ({})", self.graph.len()).ok();
        for (_, conn) in self.graph.connections() {
            writeln!(out, "|- [{}] - [{}]", conn.a, conn.b).ok();
        }
        if let Some(pending) = self.selection.pending() {
            writeln!(out).ok();
            writeln!(out, "picked: [{pending}]").ok();
        }
        out
    }
}

fn draw_outline(ui: &Ui, rect: Rect, color: egui::Color32) {
    ui.painter().rect_stroke(
        rect,
        CornerRadius::default(),
        Stroke::new(OUTLINE_THICKNESS, color),
        StrokeKind::Outside,
    );
}
