//! Style propagation.
//!
//! A host may assign an inline style to the popup. Only a handful of
//! properties make sense on the popup's inner nodes, so those are captured
//! once, the inline assignment is dropped, and the captured values are pushed
//! onto the backdrop and foreground every time the panel opens. The
//! `border-radius` and `background` shorthands are expanded into the
//! longhands they set. Values are opaque strings here; only the renderer
//! interprets them.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleKey {
    BackgroundColor,
    BorderTopLeftRadius,
    BorderTopRightRadius,
    BorderBottomRightRadius,
    BorderBottomLeftRadius,
    BoxShadow,
}

/// Which inner node a captured property lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleTarget {
    Backdrop,
    Foreground,
}

impl StyleKey {
    pub const ALL: [StyleKey; 6] = [
        StyleKey::BackgroundColor,
        StyleKey::BorderTopLeftRadius,
        StyleKey::BorderTopRightRadius,
        StyleKey::BorderBottomRightRadius,
        StyleKey::BorderBottomLeftRadius,
        StyleKey::BoxShadow,
    ];

    pub const RADII: [StyleKey; 4] = [
        StyleKey::BorderTopLeftRadius,
        StyleKey::BorderTopRightRadius,
        StyleKey::BorderBottomRightRadius,
        StyleKey::BorderBottomLeftRadius,
    ];

    pub fn css_name(self) -> &'static str {
        match self {
            StyleKey::BackgroundColor => "background-color",
            StyleKey::BorderTopLeftRadius => "border-top-left-radius",
            StyleKey::BorderTopRightRadius => "border-top-right-radius",
            StyleKey::BorderBottomRightRadius => "border-bottom-right-radius",
            StyleKey::BorderBottomLeftRadius => "border-bottom-left-radius",
            StyleKey::BoxShadow => "box-shadow",
        }
    }

    pub fn property_name(self) -> &'static str {
        match self {
            StyleKey::BackgroundColor => "backgroundColor",
            StyleKey::BorderTopLeftRadius => "borderTopLeftRadius",
            StyleKey::BorderTopRightRadius => "borderTopRightRadius",
            StyleKey::BorderBottomRightRadius => "borderBottomRightRadius",
            StyleKey::BorderBottomLeftRadius => "borderBottomLeftRadius",
            StyleKey::BoxShadow => "boxShadow",
        }
    }

    /// Accepts both `background-color` and `backgroundColor` spellings.
    pub fn from_name(name: &str) -> Option<StyleKey> {
        let name = name.trim();
        StyleKey::ALL.into_iter().find(|key| {
            key.css_name().eq_ignore_ascii_case(name) || key.property_name() == name
        })
    }

    pub fn target(self) -> StyleTarget {
        match self {
            StyleKey::BackgroundColor => StyleTarget::Backdrop,
            _ => StyleTarget::Foreground,
        }
    }
}

/// Split an inline style string into `(name, value)` declarations.
///
/// Splits on `;` and on the first `:` of each declaration, so values such as
/// `rgb(0, 0, 0)` or `url(a:b)` survive. A trailing `!important` is dropped.
pub fn parse_declarations(input: &str) -> Vec<(&str, &str)> {
    input
        .split(';')
        .filter_map(|decl| {
            let (name, value) = decl.split_once(':')?;
            let value = value.trim();
            let value = value
                .strip_suffix("!important")
                .map(str::trim_end)
                .unwrap_or(value);
            Some((name.trim(), value))
        })
        .filter(|(name, _)| !name.is_empty())
        .collect()
}

/// Shorthands that set allow-listed longhands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shorthand {
    Background,
    BorderRadius,
}

impl Shorthand {
    fn from_name(name: &str) -> Option<Shorthand> {
        match name.trim() {
            n if n.eq_ignore_ascii_case("background") => Some(Shorthand::Background),
            n if n.eq_ignore_ascii_case("border-radius") || n == "borderRadius" => {
                Some(Shorthand::BorderRadius)
            }
            _ => None,
        }
    }
}

/// Longhands set by one declaration. Unknown names yield nothing.
fn expand_declaration(name: &str, value: &str) -> Vec<(StyleKey, String)> {
    if let Some(key) = StyleKey::from_name(name) {
        return vec![(key, value.to_string())];
    }
    match Shorthand::from_name(name) {
        Some(Shorthand::BorderRadius) => expand_radii(value),
        Some(Shorthand::Background) => background_color(value)
            .map(|color| vec![(StyleKey::BackgroundColor, color.to_string())])
            .unwrap_or_default(),
        None => Vec::new(),
    }
}

/// `border-radius` with one to four horizontal radii, clockwise from the
/// top-left corner. The vertical half after `/` is dropped.
fn expand_radii(value: &str) -> Vec<(StyleKey, String)> {
    let horizontal = value.split('/').next().unwrap_or_default();
    let parts: Vec<&str> = horizontal.split_whitespace().collect();
    let [top_left, top_right, bottom_right, bottom_left] = match parts[..] {
        [all] => [all; 4],
        [a, b] => [a, b, a, b],
        [a, b, c] => [a, b, c, b],
        [a, b, c, d] => [a, b, c, d],
        _ => return Vec::new(),
    };
    StyleKey::RADII
        .into_iter()
        .zip([top_left, top_right, bottom_right, bottom_left])
        .map(|(key, radius)| (key, radius.to_string()))
        .collect()
}

/// Whitespace-separated tokens, keeping `rgb(0, 0, 0)` and `url(a b)`
/// whole.
fn layer_tokens(value: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut start = None;
    for (i, c) in value.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => {
                if let Some(s) = start.take() {
                    tokens.push(&value[s..i]);
                }
                continue;
            }
            _ => {}
        }
        start.get_or_insert(i);
    }
    if let Some(s) = start {
        tokens.push(&value[s..]);
    }
    tokens
}

fn is_color_token(token: &str) -> bool {
    let lowered = token.to_ascii_lowercase();
    if lowered.starts_with('#') {
        return true;
    }
    if ["rgb(", "rgba(", "hsl(", "hsla("]
        .iter()
        .any(|prefix| lowered.starts_with(prefix))
    {
        return true;
    }
    if lowered == "transparent" || lowered == "currentcolor" {
        return true;
    }
    lowered.starts_with(|c: char| c.is_ascii_alphabetic())
        && crate::term_color::parse_css_color(&lowered).is_some()
}

/// Colour component of a `background` shorthand. Only the final layer may
/// carry one.
fn background_color(value: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut layer_start = 0;
    for (i, c) in value.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => layer_start = i + 1,
            _ => {}
        }
    }
    layer_tokens(&value[layer_start..])
        .into_iter()
        .rev()
        .find(|token| is_color_token(token))
}

/// Values captured from inline style assignments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingStyles {
    values: BTreeMap<StyleKey, String>,
}

impl PendingStyles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every allow-listed, non-empty declaration. Returns how many
    /// properties were captured. Later declarations of the same property
    /// win, whether they came from a shorthand or a longhand.
    pub fn capture(&mut self, declarations: &str) -> usize {
        let mut captured = 0;
        for (name, value) in parse_declarations(declarations) {
            if value.is_empty() {
                continue;
            }
            for (key, value) in expand_declaration(name, value) {
                self.values.insert(key, value);
                captured += 1;
            }
        }
        captured
    }

    pub fn get(&self, key: StyleKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Styles for each inner node. Keys without a captured value come out
    /// unset, which clears whatever an earlier open applied.
    pub fn propagate(&self) -> AppliedStyles {
        let mut applied = AppliedStyles::default();
        for (key, value) in &self.values {
            let node = match key.target() {
                StyleTarget::Backdrop => &mut applied.backdrop,
                StyleTarget::Foreground => &mut applied.foreground,
            };
            node.values.insert(*key, value.clone());
        }
        applied
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeStyle {
    values: BTreeMap<StyleKey, String>,
}

impl NodeStyle {
    pub fn get(&self, key: StyleKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }
}

/// Inline styles currently on the backdrop and foreground nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppliedStyles {
    pub backdrop: NodeStyle,
    pub foreground: NodeStyle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_declarations_keeps_colons_in_values() {
        let decls = parse_declarations("background: url(a:b); color:red ;; bogus");
        assert_eq!(decls, vec![("background", "url(a:b)"), ("color", "red")]);
    }

    #[test]
    fn capture_filters_to_allow_list() {
        let mut styles = PendingStyles::new();
        let n = styles.capture(
            "color: blue; background-color: red; boxShadow: 0 0 4px black; width: 3px",
        );
        assert_eq!(n, 2);
        assert_eq!(styles.get(StyleKey::BackgroundColor), Some("red"));
        assert_eq!(styles.get(StyleKey::BoxShadow), Some("0 0 4px black"));
    }

    #[test]
    fn capture_skips_empty_values_and_strips_important() {
        let mut styles = PendingStyles::new();
        styles.capture("background-color: navy");
        styles.capture("background-color: ; border-top-left-radius: 4px !important");
        assert_eq!(styles.get(StyleKey::BackgroundColor), Some("navy"));
        assert_eq!(styles.get(StyleKey::BorderTopLeftRadius), Some("4px"));
    }

    #[test]
    fn border_radius_shorthand_fills_every_corner() {
        let mut styles = PendingStyles::new();
        assert_eq!(
            styles.capture("background-color: #203040; border-radius: 1px"),
            5
        );
        for key in StyleKey::RADII {
            assert_eq!(styles.get(key), Some("1px"));
        }
    }

    #[test]
    fn border_radius_follows_clockwise_value_rule() {
        let mut styles = PendingStyles::new();
        styles.capture("borderRadius: 1px 2px 3px / 9px");
        assert_eq!(styles.get(StyleKey::BorderTopLeftRadius), Some("1px"));
        assert_eq!(styles.get(StyleKey::BorderTopRightRadius), Some("2px"));
        assert_eq!(styles.get(StyleKey::BorderBottomRightRadius), Some("3px"));
        assert_eq!(styles.get(StyleKey::BorderBottomLeftRadius), Some("2px"));

        styles.capture("border-radius: 4px 0; border-top-left-radius: 8px");
        assert_eq!(styles.get(StyleKey::BorderTopLeftRadius), Some("8px"));
        assert_eq!(styles.get(StyleKey::BorderTopRightRadius), Some("0"));
        assert_eq!(styles.get(StyleKey::BorderBottomRightRadius), Some("4px"));
    }

    #[test]
    fn background_shorthand_keeps_only_the_colour() {
        let mut styles = PendingStyles::new();
        styles.capture("background: red");
        assert_eq!(styles.get(StyleKey::BackgroundColor), Some("red"));

        styles.capture("background: url(a.png) no-repeat center rgb(0, 10, 20)");
        assert_eq!(
            styles.get(StyleKey::BackgroundColor),
            Some("rgb(0, 10, 20)")
        );

        styles.capture("background: rgb(1, 2, 3), url(b.png) #abc");
        assert_eq!(styles.get(StyleKey::BackgroundColor), Some("#abc"));

        let mut none = PendingStyles::new();
        assert_eq!(none.capture("background: url(a.png) repeat-x"), 0);
        assert!(none.is_empty());
    }

    #[test]
    fn propagate_routes_background_to_backdrop() {
        let mut styles = PendingStyles::new();
        styles.capture("background-color: red; border-bottom-right-radius: 2px");
        let applied = styles.propagate();
        assert_eq!(applied.backdrop.get(StyleKey::BackgroundColor), Some("red"));
        assert_eq!(applied.foreground.get(StyleKey::BackgroundColor), None);
        assert_eq!(
            applied.foreground.get(StyleKey::BorderBottomRightRadius),
            Some("2px")
        );
    }
}
