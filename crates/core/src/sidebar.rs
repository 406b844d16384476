//! Sidebars: registered widget containers, the persisted assignment of
//! widget ids to containers, and the merged view returned to callers.
//!
//! Registration data (names, markup, visibility, owning theme) lives in an
//! explicit [`SidebarRegistry`]. The widget assignment is a
//! [`SidebarAssignment`] loaded from and saved to storage by the caller. A
//! [`SidebarCatalog`] borrows both, plus the active theme and the set of live
//! widget ids, to answer reads. Status is derived on every read and never
//! stored.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::roles::{Caller, Capability};
use crate::sanitize::sanitize_description;
use crate::widget::WidgetId;

/// Id of the fallback container holding unassigned widgets.
pub const INACTIVE_SIDEBAR_ID: &str = "wp_inactive_widgets";

/// Display name of the fallback container.
pub const INACTIVE_SIDEBAR_NAME: &str = "Inactive widgets";

/// Message used for every sidebar permission failure.
pub const MANAGE_WIDGETS_DENIED: &str = "Sorry, you are not allowed to manage widgets on this site.";

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Static registration data for a sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub before_widget: String,
    #[serde(default)]
    pub after_widget: String,
    #[serde(default)]
    pub before_title: String,
    #[serde(default)]
    pub after_title: String,
    /// Readable by callers without the manage capability.
    #[serde(default)]
    pub show_in_rest: bool,
}

impl SidebarDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            class: String::new(),
            before_widget: String::new(),
            after_widget: String::new(),
            before_title: String::new(),
            after_title: String::new(),
            show_in_rest: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn public(mut self, show_in_rest: bool) -> Self {
        self.show_in_rest = show_in_rest;
        self
    }

    fn inactive() -> Self {
        Self::new(INACTIVE_SIDEBAR_ID, INACTIVE_SIDEBAR_NAME)
    }
}

#[derive(Debug, Clone)]
struct Registration {
    theme: String,
    definition: SidebarDefinition,
}

/// In-memory sidebar registrations, keyed by owning theme and sidebar id.
///
/// Held by the application for the process lifetime; tests call
/// [`SidebarRegistry::reset`] between cases.
#[derive(Debug, Clone, Default)]
pub struct SidebarRegistry {
    registrations: Vec<Registration>,
}

impl SidebarRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `definition` for `theme`, replacing an earlier registration
    /// of the same id by the same theme.
    pub fn register(&mut self, theme: &str, definition: SidebarDefinition) {
        if let Some(existing) = self
            .registrations
            .iter_mut()
            .find(|r| r.theme == theme && r.definition.id == definition.id)
        {
            existing.definition = definition;
            return;
        }
        self.registrations.push(Registration {
            theme: theme.to_string(),
            definition,
        });
    }

    /// Remove every registration of `id`. Returns `true` if any existed.
    pub fn unregister(&mut self, id: &str) -> bool {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.definition.id != id);
        self.registrations.len() != before
    }

    pub fn reset(&mut self) {
        self.registrations.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// `true` if any theme registers `id`.
    pub fn is_registered(&self, id: &str) -> bool {
        self.registrations.iter().any(|r| r.definition.id == id)
    }

    /// `true` if `theme` registers `id`.
    pub fn is_registered_for(&self, id: &str, theme: &str) -> bool {
        self.registrations
            .iter()
            .any(|r| r.theme == theme && r.definition.id == id)
    }

    /// Definition of `id`, preferring the one registered by `active_theme`.
    pub fn definition(&self, id: &str, active_theme: &str) -> Option<&SidebarDefinition> {
        self.registrations
            .iter()
            .find(|r| r.theme == active_theme && r.definition.id == id)
            .map(|r| &r.definition)
            .or_else(|| self.get(id))
    }

    /// First registration of `id` by any theme.
    pub fn get(&self, id: &str) -> Option<&SidebarDefinition> {
        self.registrations
            .iter()
            .find(|r| r.definition.id == id)
            .map(|r| &r.definition)
    }

    /// Every `(theme, definition)` pair in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SidebarDefinition)> {
        self.registrations
            .iter()
            .map(|r| (r.theme.as_str(), &r.definition))
    }

    /// Definitions registered by `theme`, in registration order.
    pub fn for_theme<'a>(&'a self, theme: &'a str) -> impl Iterator<Item = &'a SidebarDefinition> {
        self.registrations
            .iter()
            .filter(move |r| r.theme == theme)
            .map(|r| &r.definition)
    }

    /// `true` if the sidebar is the inactive bucket or registered anywhere.
    pub fn is_known(&self, id: &str) -> bool {
        id == INACTIVE_SIDEBAR_ID || self.is_registered(id)
    }

    /// Fail with [`CoreError::SidebarNotFound`] for an unknown id.
    pub fn ensure_known(&self, id: &str) -> Result<(), CoreError> {
        if self.is_known(id) {
            Ok(())
        } else {
            Err(CoreError::SidebarNotFound(id.to_string()))
        }
    }
}

// ---------------------------------------------------------------------------
// Assignment
// ---------------------------------------------------------------------------

/// Ordered mapping of sidebar id to ordered widget ids.
///
/// A widget id appears in at most one sidebar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SidebarAssignment {
    entries: Vec<(String, Vec<String>)>,
}

impl SidebarAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored entries. A widget id found in more than one
    /// sidebar is kept only at its first occurrence.
    pub fn from_entries(entries: Vec<(String, Vec<String>)>) -> Self {
        let mut seen = HashSet::new();
        let mut normalized: Vec<(String, Vec<String>)> = Vec::with_capacity(entries.len());
        for (sidebar_id, widgets) in entries {
            let widgets: Vec<String> = widgets
                .into_iter()
                .filter(|w| seen.insert(w.clone()))
                .collect();
            match normalized.iter_mut().find(|(id, _)| *id == sidebar_id) {
                Some((_, existing)) => existing.extend(widgets),
                None => normalized.push((sidebar_id, widgets)),
            }
        }
        Self {
            entries: normalized,
        }
    }

    pub fn entries(&self) -> &[(String, Vec<String>)] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<(String, Vec<String>)> {
        self.entries
    }

    pub fn contains_sidebar(&self, sidebar_id: &str) -> bool {
        self.entries.iter().any(|(id, _)| id == sidebar_id)
    }

    /// Widget ids stored for `sidebar_id`, or an empty slice.
    pub fn widgets(&self, sidebar_id: &str) -> &[String] {
        self.entries
            .iter()
            .find(|(id, _)| id == sidebar_id)
            .map(|(_, widgets)| widgets.as_slice())
            .unwrap_or(&[])
    }

    /// The sidebar currently holding `widget_id`.
    pub fn sidebar_of(&self, widget_id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, widgets)| widgets.iter().any(|w| w == widget_id))
            .map(|(id, _)| id.as_str())
    }

    fn entry_mut(&mut self, sidebar_id: &str) -> &mut Vec<String> {
        let index = match self.entries.iter().position(|(id, _)| id == sidebar_id) {
            Some(index) => index,
            None => {
                self.entries.push((sidebar_id.to_string(), Vec::new()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].1
    }

    /// Replace the widget list of `sidebar_id`.
    ///
    /// Every listed widget is taken out of whichever other sidebar held it.
    /// Widgets the sidebar held before but that are no longer assigned
    /// anywhere are appended to the inactive sidebar. Duplicates in
    /// `widgets` keep their first position. Returns the ids moved to the
    /// inactive sidebar.
    pub fn assign(&mut self, sidebar_id: &str, widgets: Vec<String>) -> Vec<String> {
        let mut seen = HashSet::new();
        let widgets: Vec<String> = widgets
            .into_iter()
            .filter(|w| seen.insert(w.clone()))
            .collect();

        let previous = self.widgets(sidebar_id).to_vec();

        for (id, held) in self.entries.iter_mut() {
            if id.as_str() != sidebar_id {
                held.retain(|w| !seen.contains(w));
            }
        }
        *self.entry_mut(sidebar_id) = widgets;

        if sidebar_id == INACTIVE_SIDEBAR_ID {
            return Vec::new();
        }

        let omitted: Vec<String> = previous
            .into_iter()
            .filter(|w| !seen.contains(w) && self.sidebar_of(w).is_none())
            .collect();
        if !omitted.is_empty() {
            self.entry_mut(INACTIVE_SIDEBAR_ID).extend(omitted.iter().cloned());
        }
        omitted
    }

    /// Remove `widget_id` from whichever sidebar holds it, keeping the
    /// relative order of the rest. Returns the sidebar it was removed from.
    pub fn remove_widget(&mut self, widget_id: &str) -> Option<String> {
        for (id, widgets) in self.entries.iter_mut() {
            if let Some(pos) = widgets.iter().position(|w| w == widget_id) {
                widgets.remove(pos);
                return Some(id.clone());
            }
        }
        None
    }

    /// Move `widget_id` to the end of the inactive sidebar.
    pub fn deactivate_widget(&mut self, widget_id: &str) {
        self.remove_widget(widget_id);
        self.entry_mut(INACTIVE_SIDEBAR_ID).push(widget_id.to_string());
    }

    /// Append every live widget that no sidebar holds to the inactive
    /// sidebar. Returns the ids swept.
    pub fn sweep_orphans<'a>(&mut self, live: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let orphans: Vec<String> = live
            .into_iter()
            .filter(|w| self.sidebar_of(w).is_none())
            .map(str::to_string)
            .collect();
        if !orphans.is_empty() {
            self.entry_mut(INACTIVE_SIDEBAR_ID).extend(orphans.iter().cloned());
        }
        orphans
    }
}

/// Parse and validate the widget ids of an update request.
pub fn parse_widget_ids(raw: &[String]) -> Result<Vec<String>, CoreError> {
    raw.iter()
        .map(|w| WidgetId::parse(w).map(|id| id.to_string()))
        .collect()
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SidebarStatus {
    Active,
    Inactive,
}

/// A sidebar as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub class: String,
    pub before_widget: String,
    pub after_widget: String,
    pub before_title: String,
    pub after_title: String,
    pub status: SidebarStatus,
    pub widgets: Vec<String>,
}

/// Read access over the registry and a loaded assignment.
pub struct SidebarCatalog<'a> {
    pub registry: &'a SidebarRegistry,
    pub assignment: &'a SidebarAssignment,
    pub active_theme: &'a str,
    /// Widget ids whose instance exists; others are hidden from views.
    pub live_widgets: &'a HashSet<String>,
}

impl SidebarCatalog<'_> {
    /// Status is derived: the inactive bucket and sidebars not registered
    /// by the active theme are inactive.
    pub fn status(&self, id: &str) -> SidebarStatus {
        if id != INACTIVE_SIDEBAR_ID && self.registry.is_registered_for(id, self.active_theme) {
            SidebarStatus::Active
        } else {
            SidebarStatus::Inactive
        }
    }

    fn is_public(&self, id: &str) -> bool {
        self.registry
            .definition(id, self.active_theme)
            .is_some_and(|d| d.show_in_rest)
    }

    fn view(&self, id: &str) -> SidebarView {
        let definition = if id == INACTIVE_SIDEBAR_ID {
            SidebarDefinition::inactive()
        } else {
            self.registry
                .definition(id, self.active_theme)
                .cloned()
                .unwrap_or_else(|| SidebarDefinition::new(id, id))
        };
        let widgets = self
            .assignment
            .widgets(id)
            .iter()
            .filter(|w| self.live_widgets.contains(w.as_str()))
            .cloned()
            .collect();

        SidebarView {
            id: definition.id,
            name: definition.name,
            description: sanitize_description(&definition.description),
            class: definition.class,
            before_widget: definition.before_widget,
            after_widget: definition.after_widget,
            before_title: definition.before_title,
            after_title: definition.after_title,
            status: self.status(id),
            widgets,
        }
    }

    /// Sidebar ids in listing order, before visibility filtering.
    ///
    /// Persisted sidebars come first in stored order, followed by the active
    /// theme's registrations not yet persisted. The inactive bucket leads
    /// the list when it is not persisted and the active theme registers at
    /// least one sidebar.
    pub fn ordered_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        let theme_has_sidebars = self.registry.for_theme(self.active_theme).next().is_some();

        if !self.assignment.contains_sidebar(INACTIVE_SIDEBAR_ID) && theme_has_sidebars {
            ids.push(INACTIVE_SIDEBAR_ID.to_string());
        }

        for (id, widgets) in self.assignment.entries() {
            let listed = if id == INACTIVE_SIDEBAR_ID {
                theme_has_sidebars || !widgets.is_empty()
            } else {
                self.registry.is_registered(id)
            };
            if listed && !ids.contains(id) {
                ids.push(id.clone());
            }
        }

        for definition in self.registry.for_theme(self.active_theme) {
            if !ids.contains(&definition.id) {
                ids.push(definition.id.clone());
            }
        }
        ids
    }

    /// Every sidebar visible to `caller`.
    ///
    /// Callers without the manage capability only see public sidebars among
    /// those listed, and are rejected when none of them is public.
    pub fn list(&self, caller: &Caller) -> Result<Vec<SidebarView>, CoreError> {
        let privileged = caller.can(Capability::EditThemeOptions);
        let views: Vec<SidebarView> = self
            .ordered_ids()
            .iter()
            .filter(|id| privileged || self.is_public(id))
            .map(|id| self.view(id))
            .collect();

        if !privileged && views.is_empty() {
            return Err(caller.denial(MANAGE_WIDGETS_DENIED));
        }
        Ok(views)
    }

    /// One sidebar. Permission is checked before existence.
    pub fn get(&self, caller: &Caller, id: &str) -> Result<SidebarView, CoreError> {
        if !caller.can(Capability::EditThemeOptions) && !self.is_public(id) {
            return Err(caller.denial(MANAGE_WIDGETS_DENIED));
        }
        self.registry.ensure_known(id)?;
        Ok(self.view(id))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::roles::{ROLE_ADMINISTRATOR, ROLE_AUTHOR};

    const THEME: &str = "classic";

    fn admin() -> Caller {
        Caller::user(1, ROLE_ADMINISTRATOR)
    }

    fn strings(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn live(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn registry(defs: Vec<SidebarDefinition>) -> SidebarRegistry {
        let mut registry = SidebarRegistry::new();
        for def in defs {
            registry.register(THEME, def);
        }
        registry
    }

    // -- assignment ---------------------------------------------------------

    #[test]
    fn moving_a_widget_removes_it_from_its_old_sidebar() {
        let mut assignment = SidebarAssignment::from_entries(vec![
            ("sidebar-1".into(), strings(&["text-1"])),
            ("sidebar-2".into(), vec![]),
        ]);
        assignment.assign("sidebar-2", strings(&["text-1"]));
        assert!(assignment.widgets("sidebar-1").is_empty());
        assert_eq!(assignment.widgets("sidebar-2"), strings(&["text-1"]).as_slice());
        assert_eq!(assignment.sidebar_of("text-1"), Some("sidebar-2"));
    }

    #[test]
    fn omitted_widgets_move_to_inactive() {
        let mut assignment =
            SidebarAssignment::from_entries(vec![("sidebar-1".into(), strings(&["text-1"]))]);
        let moved = assignment.assign("sidebar-1", strings(&["text-2"]));
        assert_eq!(moved, strings(&["text-1"]));
        assert_eq!(assignment.widgets("sidebar-1"), strings(&["text-2"]).as_slice());
        assert_eq!(
            assignment.widgets(INACTIVE_SIDEBAR_ID),
            strings(&["text-1"]).as_slice()
        );
    }

    #[test]
    fn replacing_keeps_request_order() {
        let mut assignment = SidebarAssignment::from_entries(vec![(
            "sidebar-1".into(),
            strings(&["text-1", "rss-1"]),
        )]);
        assignment.assign("sidebar-1", strings(&["text-1", "text-2"]));
        assert_eq!(
            assignment.widgets("sidebar-1"),
            strings(&["text-1", "text-2"]).as_slice()
        );
        assert_eq!(
            assignment.widgets(INACTIVE_SIDEBAR_ID),
            strings(&["rss-1"]).as_slice()
        );
    }

    #[test]
    fn duplicate_ids_in_a_request_collapse() {
        let mut assignment = SidebarAssignment::new();
        assignment.assign("sidebar-1", strings(&["text-1", "text-2", "text-1"]));
        assert_eq!(
            assignment.widgets("sidebar-1"),
            strings(&["text-1", "text-2"]).as_slice()
        );
    }

    #[test]
    fn widget_taken_from_inactive_is_not_duplicated() {
        let mut assignment = SidebarAssignment::from_entries(vec![
            ("sidebar-1".into(), vec![]),
            (INACTIVE_SIDEBAR_ID.into(), strings(&["rss-1"])),
        ]);
        assignment.assign("sidebar-1", strings(&["rss-1"]));
        assert!(assignment.widgets(INACTIVE_SIDEBAR_ID).is_empty());
    }

    #[test]
    fn stored_duplicates_keep_first_occurrence() {
        let assignment = SidebarAssignment::from_entries(vec![
            ("sidebar-1".into(), strings(&["text-1"])),
            ("sidebar-2".into(), strings(&["text-1", "text-2"])),
        ]);
        assert_eq!(assignment.sidebar_of("text-1"), Some("sidebar-1"));
        assert_eq!(assignment.widgets("sidebar-2"), strings(&["text-2"]).as_slice());
    }

    #[test]
    fn removing_widgets_keeps_relative_order() {
        let mut assignment = SidebarAssignment::from_entries(vec![(
            "sidebar-1".into(),
            strings(&["text-2", "text-3", "text-4", "text-5", "text-6"]),
        )]);
        assert_eq!(assignment.remove_widget("text-2").as_deref(), Some("sidebar-1"));
        assert_eq!(assignment.remove_widget("text-3").as_deref(), Some("sidebar-1"));
        assert_eq!(
            assignment.widgets("sidebar-1"),
            strings(&["text-4", "text-5", "text-6"]).as_slice()
        );
        assert_eq!(assignment.remove_widget("text-9"), None);
    }

    #[test]
    fn deactivating_moves_to_inactive() {
        let mut assignment =
            SidebarAssignment::from_entries(vec![("sidebar-1".into(), strings(&["text-1"]))]);
        assignment.deactivate_widget("text-1");
        assert_eq!(assignment.sidebar_of("text-1"), Some(INACTIVE_SIDEBAR_ID));
    }

    #[test]
    fn orphans_are_swept_into_inactive() {
        let mut assignment =
            SidebarAssignment::from_entries(vec![("sidebar-1".into(), strings(&["text-1"]))]);
        let swept = assignment.sweep_orphans(["text-1", "text-2"]);
        assert_eq!(swept, strings(&["text-2"]));
        assert_eq!(
            assignment.widgets(INACTIVE_SIDEBAR_ID),
            strings(&["text-2"]).as_slice()
        );
    }

    #[test]
    fn malformed_widget_ids_are_rejected() {
        assert!(parse_widget_ids(&strings(&["text-1", "rss-2"])).is_ok());
        assert_matches!(
            parse_widget_ids(&strings(&["text-1", "rss"])),
            Err(CoreError::InvalidParam { param: "widgets", .. })
        );
    }

    // -- reads ----------------------------------------------------------------

    #[test]
    fn empty_registry_lists_nothing() {
        let registry = SidebarRegistry::new();
        let assignment = SidebarAssignment::new();
        let live = live(&[]);
        let catalog = SidebarCatalog {
            registry: &registry,
            assignment: &assignment,
            active_theme: THEME,
            live_widgets: &live,
        };
        assert!(catalog.list(&admin()).unwrap().is_empty());
    }

    #[test]
    fn registered_sidebar_lists_after_inactive_bucket() {
        let registry = registry(vec![SidebarDefinition::new("sidebar-1", "Test sidebar")]);
        let assignment = SidebarAssignment::new();
        let live = live(&[]);
        let catalog = SidebarCatalog {
            registry: &registry,
            assignment: &assignment,
            active_theme: THEME,
            live_widgets: &live,
        };
        let views = catalog.list(&admin()).unwrap();
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].id, INACTIVE_SIDEBAR_ID);
        assert_eq!(views[0].name, INACTIVE_SIDEBAR_NAME);
        assert_eq!(views[0].status, SidebarStatus::Inactive);
        assert_eq!(views[1].id, "sidebar-1");
        assert_eq!(views[1].status, SidebarStatus::Active);
    }

    #[test]
    fn persisted_order_wins_and_dead_widgets_are_hidden() {
        let registry = registry(vec![SidebarDefinition::new("sidebar-1", "Test sidebar")]);
        let assignment = SidebarAssignment::from_entries(vec![
            ("sidebar-1".into(), strings(&["text-1"])),
            (INACTIVE_SIDEBAR_ID.into(), strings(&["rss-1", "rss"])),
        ]);
        let live = live(&["text-1", "rss-1"]);
        let catalog = SidebarCatalog {
            registry: &registry,
            assignment: &assignment,
            active_theme: THEME,
            live_widgets: &live,
        };
        let views = catalog.list(&admin()).unwrap();
        let ids: Vec<_> = views.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["sidebar-1", INACTIVE_SIDEBAR_ID]);
        assert_eq!(views[1].widgets, strings(&["rss-1"]));
    }

    #[test]
    fn anonymous_caller_sees_only_public_sidebars() {
        let registry = registry(vec![
            SidebarDefinition::new("sidebar-1", "Test sidebar 1").public(true),
            SidebarDefinition::new("sidebar-2", "Test sidebar 2"),
            SidebarDefinition::new("sidebar-3", "Test sidebar 3").public(true),
        ]);
        let assignment = SidebarAssignment::new();
        let live = live(&[]);
        let catalog = SidebarCatalog {
            registry: &registry,
            assignment: &assignment,
            active_theme: THEME,
            live_widgets: &live,
        };
        let views = catalog.list(&Caller::Anonymous).unwrap();
        let ids: Vec<_> = views.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["sidebar-1", "sidebar-3"]);
    }

    #[test]
    fn list_without_public_sidebars_is_denied() {
        let registry = registry(vec![SidebarDefinition::new("sidebar-1", "Test sidebar")]);
        let assignment = SidebarAssignment::new();
        let live = live(&[]);
        let catalog = SidebarCatalog {
            registry: &registry,
            assignment: &assignment,
            active_theme: THEME,
            live_widgets: &live,
        };
        assert_matches!(catalog.list(&Caller::Anonymous), Err(CoreError::Unauthorized(_)));
        assert_matches!(
            catalog.list(&Caller::user(2, ROLE_AUTHOR)),
            Err(CoreError::Forbidden(_))
        );
    }

    #[test]
    fn public_sidebar_of_another_theme_does_not_open_the_list() {
        let mut registry = registry(vec![SidebarDefinition::new("sidebar-1", "Test sidebar")]);
        registry.register(
            "other-theme",
            SidebarDefinition::new("sidebar-9", "Elsewhere").public(true),
        );
        let assignment = SidebarAssignment::new();
        let live = live(&[]);
        let catalog = SidebarCatalog {
            registry: &registry,
            assignment: &assignment,
            active_theme: THEME,
            live_widgets: &live,
        };
        assert_matches!(catalog.list(&Caller::Anonymous), Err(CoreError::Unauthorized(_)));
        assert_eq!(catalog.list(&admin()).unwrap().len(), 2);
    }

    #[test]
    fn get_checks_permission_before_existence() {
        let registry = SidebarRegistry::new();
        let assignment = SidebarAssignment::new();
        let live = live(&[]);
        let catalog = SidebarCatalog {
            registry: &registry,
            assignment: &assignment,
            active_theme: THEME,
            live_widgets: &live,
        };
        assert_matches!(
            catalog.get(&Caller::Anonymous, "nope"),
            Err(CoreError::Unauthorized(_))
        );
        assert_matches!(
            catalog.get(&admin(), "nope"),
            Err(CoreError::SidebarNotFound(id)) if id == "nope"
        );
    }

    #[test]
    fn theme_switch_deactivates_without_touching_widgets() {
        let registry = registry(vec![SidebarDefinition::new("sidebar-1", "Sidebar 1")]);
        let assignment = SidebarAssignment::from_entries(vec![(
            "sidebar-1".into(),
            strings(&["text-1", "rss-1"]),
        )]);
        let live = live(&["text-1", "rss-1"]);

        let before = SidebarCatalog {
            registry: &registry,
            assignment: &assignment,
            active_theme: THEME,
            live_widgets: &live,
        }
        .get(&admin(), "sidebar-1")
        .unwrap();
        assert_eq!(before.status, SidebarStatus::Active);

        let after = SidebarCatalog {
            registry: &registry,
            assignment: &assignment,
            active_theme: "block-theme",
            live_widgets: &live,
        }
        .get(&admin(), "sidebar-1")
        .unwrap();
        assert_eq!(after.status, SidebarStatus::Inactive);
        assert_eq!(after.widgets, strings(&["text-1", "rss-1"]));
    }

    #[test]
    fn description_markup_is_sanitized() {
        let registry = registry(vec![SidebarDefinition::new("new-sidebar", "New Sidebar")
            .with_description("<iframe></iframe>A <b>bold</b> move.<script></script>")]);
        let assignment = SidebarAssignment::new();
        let live = live(&[]);
        let catalog = SidebarCatalog {
            registry: &registry,
            assignment: &assignment,
            active_theme: THEME,
            live_widgets: &live,
        };
        let view = catalog.get(&admin(), "new-sidebar").unwrap();
        assert_eq!(view.description, "A <b>bold</b> move.");
    }

    #[test]
    fn registering_twice_replaces_definition() {
        let mut registry = SidebarRegistry::new();
        registry.register(THEME, SidebarDefinition::new("sidebar-1", "Old"));
        registry.register(THEME, SidebarDefinition::new("sidebar-1", "New"));
        assert_eq!(registry.for_theme(THEME).count(), 1);
        assert_eq!(registry.definition("sidebar-1", THEME).unwrap().name, "New");
        assert_eq!(registry.get("sidebar-1").unwrap().name, "New");
        assert_eq!(registry.iter().map(|(theme, _)| theme).collect::<Vec<_>>(), vec![THEME]);
        assert!(registry.unregister("sidebar-1"));
        assert!(registry.is_empty());
    }
}
