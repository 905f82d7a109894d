use bevy::prelude::Color;
use talkgraph_core::NodeKind;

/// Fill color as a pure function of kind and selection. Selection overrides
/// the kind palette; unknown kinds share the fallback gray.
pub fn node_color(kind: NodeKind, selected: bool) -> Color {
    if selected {
        return Color::srgb(1.0, 0.84, 0.3);
    }
    match kind {
        NodeKind::User => Color::srgb(0.25, 0.47, 0.9),
        NodeKind::Agent => Color::srgb(0.86, 0.27, 0.25),
        NodeKind::Message => Color::srgb(0.55, 0.78, 0.95),
        NodeKind::Conversation => Color::srgb(0.95, 0.6, 0.2),
        NodeKind::Entity => Color::srgb(0.35, 0.72, 0.4),
        NodeKind::Other => Color::srgb(0.62, 0.62, 0.62),
    }
}

/// Rendered radius per node category; also the collision and hit-test
/// radius, so picking matches what is on screen.
pub fn node_radius(kind: NodeKind) -> f32 {
    match kind {
        NodeKind::Conversation => 24.0,
        NodeKind::User | NodeKind::Agent => 20.0,
        NodeKind::Message => 16.0,
        NodeKind::Entity => 12.0,
        NodeKind::Other => 14.0,
    }
}

/// Display text for a node: the label up to the first `:` separator.
pub fn display_label(label: &str) -> &str {
    label.split(':').next().unwrap_or(label).trim_end()
}

pub fn link_color() -> Color {
    Color::srgba(0.6, 0.6, 0.65, 0.8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_is_pure_in_kind_and_selection() {
        for kind in NodeKind::ALL {
            for selected in [false, true] {
                assert_eq!(node_color(kind, selected), node_color(kind, selected));
            }
        }
    }

    #[test]
    fn selection_overrides_every_kind_color() {
        let highlight = node_color(NodeKind::User, true);
        for kind in NodeKind::ALL {
            assert_eq!(node_color(kind, true), highlight);
            assert_ne!(node_color(kind, false), highlight);
        }
    }

    #[test]
    fn unknown_kind_uses_fallback() {
        assert_eq!(
            node_color(NodeKind::parse("widget"), false),
            node_color(NodeKind::Other, false)
        );
    }

    #[test]
    fn label_truncates_at_separator() {
        assert_eq!(display_label("Message: hi there..."), "Message");
        assert_eq!(display_label("alice"), "alice");
    }
}
