use egui::{Color32, Stroke};

#[derive(Clone, serde::Deserialize, serde::Serialize)]
pub struct CanvasConfig {
    pub wire_thickness: f32,
    pub wire_color: Color32,
    /// Extra slop around each symbol's bounds so small shapes stay grabbable.
    pub hit_padding: f32,
    pub hover_outline_color: Color32,
    pub pick_outline_color: Color32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            wire_thickness: 2.0,
            wire_color: Color32::BLACK,
            hit_padding: 4.0,
            hover_outline_color: Color32::GRAY,
            pick_outline_color: Color32::LIGHT_BLUE,
        }
    }
}

impl CanvasConfig {
    pub fn wire_stroke(&self) -> Stroke {
        Stroke::new(self.wire_thickness, self.wire_color)
    }
}
