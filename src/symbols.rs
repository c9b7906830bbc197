use egui::{Align2, Color32, CornerRadius, FontId, Painter, Pos2, Rect, Stroke, StrokeKind, Vec2, vec2};

use crate::registry::ComponentKind;

// Shape dimensions, anchored at the component position.
pub const JUNCTION_RADIUS: f32 = 5.0;
pub const RESISTOR_SIZE: Vec2 = vec2(20.0, 10.0);
pub const LAMP_BULB_RADIUS: f32 = 15.0;
pub const LAMP_BASE_OFFSET: Vec2 = vec2(-10.0, 15.0);
pub const LAMP_BASE_SIZE: Vec2 = vec2(20.0, 10.0);
pub const BATTERY_BODY_SIZE: Vec2 = vec2(40.0, 20.0);
pub const BATTERY_CAP_OFFSET: Vec2 = vec2(40.0, 6.0);
pub const BATTERY_CAP_SIZE: Vec2 = vec2(5.0, 5.0);
pub const BATTERY_SIGN_SIZE: f32 = 10.0;

pub const COLOR_OUTLINE: Color32 = Color32::BLACK;
pub const COLOR_BODY_BROWN: Color32 = Color32::from_rgb(150, 75, 0);
pub const COLOR_BULB_YELLOW: Color32 = Color32::YELLOW;

/// Bounding box of a symbol, used for hit-testing on the canvas. Matches the
/// painted extent of each recipe below.
pub fn bounds(kind: ComponentKind, pos: Pos2) -> Rect {
    match kind {
        ComponentKind::Junction => {
            Rect::from_center_size(pos, Vec2::splat(JUNCTION_RADIUS * 2.0))
        }
        ComponentKind::Resistor => Rect::from_min_size(pos, RESISTOR_SIZE),
        ComponentKind::Lamp => Rect::from_min_max(
            pos - Vec2::splat(LAMP_BULB_RADIUS),
            pos + vec2(LAMP_BULB_RADIUS, LAMP_BASE_OFFSET.y + LAMP_BASE_SIZE.y),
        ),
        ComponentKind::Battery => Rect::from_min_size(
            pos,
            vec2(BATTERY_CAP_OFFSET.x + BATTERY_CAP_SIZE.x, BATTERY_BODY_SIZE.y),
        ),
    }
}

/// Paint one symbol. Pure recipes, no state: the anchor is the position the
/// connection graph sees, so wires attach exactly where these draw from.
pub fn paint(painter: &Painter, kind: ComponentKind, pos: Pos2) {
    match kind {
        ComponentKind::Junction => paint_junction(painter, pos),
        ComponentKind::Resistor => paint_resistor(painter, pos),
        ComponentKind::Lamp => paint_lamp(painter, pos),
        ComponentKind::Battery => paint_battery(painter, pos),
    }
}

fn paint_junction(painter: &Painter, pos: Pos2) {
    painter.circle(
        pos,
        JUNCTION_RADIUS,
        COLOR_OUTLINE,
        Stroke::new(1.0, COLOR_OUTLINE),
    );
}

fn paint_resistor(painter: &Painter, pos: Pos2) {
    let body = Rect::from_min_size(pos, RESISTOR_SIZE);
    painter.rect(
        body,
        CornerRadius::ZERO,
        COLOR_BODY_BROWN,
        Stroke::new(1.0, COLOR_OUTLINE),
        StrokeKind::Inside,
    );
}

fn paint_lamp(painter: &Painter, pos: Pos2) {
    // Base under the bulb first so the bulb overlaps it.
    let base = Rect::from_min_size(pos + LAMP_BASE_OFFSET, LAMP_BASE_SIZE);
    painter.rect_filled(base, CornerRadius::ZERO, COLOR_BODY_BROWN);
    painter.circle(
        pos,
        LAMP_BULB_RADIUS,
        COLOR_BULB_YELLOW,
        Stroke::new(1.0, COLOR_OUTLINE),
    );
}

fn paint_battery(painter: &Painter, pos: Pos2) {
    let body = Rect::from_min_size(pos, BATTERY_BODY_SIZE);
    painter.rect(
        body,
        CornerRadius::ZERO,
        COLOR_BULB_YELLOW,
        Stroke::new(2.0, COLOR_OUTLINE),
        StrokeKind::Inside,
    );
    let cap = Rect::from_min_size(pos + BATTERY_CAP_OFFSET, BATTERY_CAP_SIZE);
    painter.rect_filled(cap, CornerRadius::ZERO, COLOR_OUTLINE);
    painter.text(
        pos + vec2(32.0, 1.0),
        Align2::LEFT_TOP,
        "+",
        FontId::proportional(BATTERY_SIGN_SIZE),
        COLOR_OUTLINE,
    );
    painter.text(
        pos + vec2(32.0, 9.0),
        Align2::LEFT_TOP,
        "-",
        FontId::proportional(BATTERY_SIGN_SIZE),
        COLOR_OUTLINE,
    );
}
