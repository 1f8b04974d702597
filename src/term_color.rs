use ratatui::style::Color;

/// Interpret a CSS colour value for the terminal.
///
/// Understands `#rgb`, `#rrggbb`, `rgb(r, g, b)` / `rgba(r, g, b, a)` and
/// whatever named colours ratatui knows (`red`, `lightblue`, `darkgray`, ...).
/// Anything else yields `None` and the caller keeps its default.
pub fn parse_css_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex).map(|(r, g, b)| map_rgb_to_color(r, g, b));
    }
    let lowered = value.to_ascii_lowercase();
    if let Some(args) = lowered
        .strip_prefix("rgba(")
        .or_else(|| lowered.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        let channels: Vec<u8> = args
            .split(',')
            .take(3)
            .map(|c| c.trim().parse::<u8>().ok())
            .collect::<Option<_>>()?;
        if let [r, g, b] = channels[..] {
            return Some(map_rgb_to_color(r, g, b));
        }
        return None;
    }
    if lowered == "transparent" || lowered == "none" {
        return None;
    }
    lowered.replace(['-', '_', ' '], "").parse::<Color>().ok()
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits: Vec<u8> = hex
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8))
        .collect::<Option<_>>()?;
    match digits[..] {
        [r, g, b] => Some((r * 17, g * 17, b * 17)),
        [r1, r0, g1, g0, b1, b0] => Some((r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0)),
        _ => None,
    }
}

/// Map an RGB triple to a `ratatui::style::Color` appropriate for the
/// current terminal. If truecolor is available (`COLORTERM` contains
/// `truecolor` or `24bit`) we return `Color::Rgb(r,g,b)`. Otherwise
/// we return the nearest xterm-256 `Color::Indexed(idx)`.
pub fn map_rgb_to_color(r: u8, g: u8, b: u8) -> Color {
    if let Ok(var) = std::env::var("COLORTERM") {
        let lv = var.to_lowercase();
        if lv.contains("truecolor") || lv.contains("24bit") {
            return Color::Rgb(r, g, b);
        }
    }
    Color::Indexed(rgb_to_xterm_index(r, g, b))
}

fn rgb_to_xterm_index(r: u8, g: u8, b: u8) -> u8 {
    // 6x6x6 cube (16..231) or the gray ramp (232..255), whichever is closer
    let cube = |v: u8| ((v as u16 * 5 + 127) / 255) as u8;
    let level = |c: u8| if c == 0 { 0 } else { 55 + c * 40 };
    let (r6, g6, b6) = (cube(r), cube(g), cube(b));
    let cube_index = 16 + 36 * r6 + 6 * g6 + b6;
    let cube_rgb = (level(r6), level(g6), level(b6));

    let avg = (r as u16 + g as u16 + b as u16) / 3;
    let gray_step = (avg.saturating_sub(8) / 10).min(23) as u8;
    let gray = 8 + gray_step * 10;

    if distance_sq((r, g, b), (gray, gray, gray)) < distance_sq((r, g, b), cube_rgb) {
        232 + gray_step
    } else {
        cube_index
    }
}

fn distance_sq(a: (u8, u8, u8), b: (u8, u8, u8)) -> i32 {
    let d = |x: u8, y: u8| x as i32 - y as i32;
    let (dr, dg, db) = (d(a.0, b.0), d(a.1, b.1), d(a.2, b.2));
    dr * dr + dg * dg + db * db
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xterm_index_hits_cube_corners_and_grays() {
        assert_eq!(rgb_to_xterm_index(255, 0, 0), 196);
        assert_eq!(rgb_to_xterm_index(0, 0, 255), 21);
        assert_eq!(rgb_to_xterm_index(128, 128, 128), 244);
    }

    #[test]
    fn parses_named_colours() {
        assert_eq!(parse_css_color("red"), Some(Color::Red));
        assert_eq!(parse_css_color(" Light-Blue "), Some(Color::LightBlue));
        assert_eq!(parse_css_color("transparent"), None);
        assert_eq!(parse_css_color("linear-gradient(red, blue)"), None);
    }

    #[test]
    fn parses_hex_and_rgb_forms() {
        let expected = map_rgb_to_color(255, 0, 0);
        assert_eq!(parse_css_color("#f00"), Some(expected));
        assert_eq!(parse_css_color("#FF0000"), Some(expected));
        assert_eq!(parse_css_color("rgb(255, 0, 0)"), Some(expected));
        assert_eq!(parse_css_color("rgba(255,0,0,0.5)"), Some(expected));
        assert_eq!(parse_css_color("#ff00"), None);
    }
}
