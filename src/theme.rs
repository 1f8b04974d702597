use ratatui::style::{Color, Modifier, Style};

// Centralized popup colours. Kept as small helpers so terminal colour
// mapping stays in one place (`crate::term_color`).

pub const ACCENT_RGB: (u8, u8, u8) = (200, 100, 0);

pub fn rgb_to_color(rgb: (u8, u8, u8)) -> Color {
    crate::term_color::map_rgb_to_color(rgb.0, rgb.1, rgb.2)
}

pub fn accent() -> Color {
    rgb_to_color(ACCENT_RGB)
}

// Panel
pub fn panel_bg() -> Color {
    Color::Black
}
pub fn panel_fg() -> Color {
    Color::White
}
pub fn panel_border() -> Color {
    Color::Gray
}

/// Border while the panel is hovered, dragged or resized.
pub fn panel_border_active() -> Color {
    accent()
}

pub fn title_style() -> Style {
    Style::default().fg(panel_fg()).add_modifier(Modifier::BOLD)
}

pub fn close_button_style() -> Style {
    Style::default().fg(Color::LightRed).bg(panel_bg())
}

pub fn resize_handle_style() -> Style {
    Style::default().fg(accent()).bg(panel_bg())
}

// Backdrop
pub fn backdrop_style() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

pub fn shadow_style() -> Style {
    Style::default().bg(Color::Black).fg(Color::DarkGray)
}
