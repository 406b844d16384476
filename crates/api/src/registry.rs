//! Sidebars registered at startup for the bundled themes.

use trellis_core::sidebar::{SidebarDefinition, SidebarRegistry};

fn footer(id: &str, name: &str, description: &str) -> SidebarDefinition {
    let mut definition = SidebarDefinition::new(id, name).with_description(description);
    definition.before_widget = "<section id=\"%1$s\" class=\"widget %2$s\">".to_string();
    definition.after_widget = "</section>".to_string();
    definition.before_title = "<h2 class=\"widget-title\">".to_string();
    definition.after_title = "</h2>".to_string();
    definition
}

/// Register the sidebars of every bundled theme.
pub fn register_default_sidebars(registry: &mut SidebarRegistry) {
    registry.register(
        "twentytwentyone",
        footer("sidebar-1", "Footer", "Add widgets here to appear in your footer."),
    );
    registry.register(
        "twentytwenty",
        footer(
            "sidebar-1",
            "Footer #1",
            "Widgets in this area will be displayed in the first column in the footer.",
        ),
    );
    registry.register(
        "twentytwenty",
        footer(
            "sidebar-2",
            "Footer #2",
            "Widgets in this area will be displayed in the second column in the footer.",
        ),
    );
    tracing::debug!(count = registry.iter().count(), "Default sidebars registered");
}
