//! Central UI state store
//!
//! One container for everything the views read. State changes only
//! through `Store::dispatch`, which routes each typed action to the
//! reducer of its slice and recomputes the cached search results when
//! the catalog or the criteria change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::engine;
use crate::engine::radar::{RadarFilter, RadarSelection};
use crate::state::data::{Quadrant, Ring, Study, StudyCategory, StudyStatus};
use crate::state::filters::{DateRange, SearchFilters, SortKey, SortOrder};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StudiesAction {
    SetCatalog(Catalog),
    SelectStudy(Option<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchAction {
    /// Raw text box content; not applied until committed
    EditQuery(String),
    /// Apply a query to the filters
    SetQuery(String),
    ToggleCategory(StudyCategory),
    SetCategories(Vec<StudyCategory>),
    ToggleYear(i32),
    SetYears(Vec<i32>),
    ToggleStatus(StudyStatus),
    ToggleTag(String),
    SetTags(Vec<String>),
    ToggleAuthor(String),
    SetAuthors(Vec<String>),
    ToggleRegion(String),
    SetRegions(Vec<String>),
    /// Restrict to studies modified inside the window
    SetDateRange(Option<DateRange>),
    SetSortBy(SortKey),
    SetSortOrder(SortOrder),
    ResetFilters,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendsAction {
    ToggleRing(Ring),
    ToggleQuadrant(Quadrant),
    ClearFilters,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    ToggleSidebar,
    SetSidebarCollapsed(bool),
    SetViewMode(ViewMode),
    SetTheme(ThemeMode),
    SetActiveModal(Option<String>),
    Notify {
        kind: NotificationKind,
        title: String,
        message: String,
    },
    MarkNotificationRead(u64),
    ClearNotifications,
}

/// Every state change the store accepts
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Studies(StudiesAction),
    Search(SearchAction),
    /// Select a trend item; selecting the selected item clears it
    SelectTrend(String),
    Trends(TrendsAction),
    Ui(UiAction),
}

#[derive(Debug, Clone, Default)]
pub struct StudiesState {
    pub catalog: Catalog,
    pub selected: Option<String>,
}

impl StudiesState {
    fn reduce(&mut self, action: StudiesAction) {
        match action {
            StudiesAction::SetCatalog(catalog) => {
                self.catalog = catalog;
                // The selection may point at a study that no longer exists
                if let Some(id) = &self.selected {
                    if self.catalog.study(id).is_none() {
                        self.selected = None;
                    }
                }
            }
            StudiesAction::SelectStudy(id) => self.selected = id,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub filters: SearchFilters,
    /// Text box content, ahead of `filters.query` while debouncing
    pub query_input: String,
    /// Cached filter + sort output
    pub results: Vec<Study>,
}

impl SearchState {
    fn reduce(&mut self, action: SearchAction) {
        let filters = &mut self.filters;
        match action {
            SearchAction::EditQuery(text) => self.query_input = text,
            SearchAction::SetQuery(query) => {
                self.query_input = query.clone();
                filters.query = query;
            }
            SearchAction::ToggleCategory(category) => filters.toggle_category(category),
            SearchAction::SetCategories(categories) => {
                filters.categories = categories.into_iter().collect();
            }
            SearchAction::ToggleYear(year) => filters.toggle_year(year),
            SearchAction::SetYears(years) => filters.years = years.into_iter().collect(),
            SearchAction::ToggleStatus(status) => filters.toggle_status(status),
            SearchAction::ToggleTag(tag) => filters.toggle_tag(tag),
            SearchAction::SetTags(tags) => filters.tags = tags.into_iter().collect(),
            SearchAction::ToggleAuthor(author) => filters.toggle_author(author),
            SearchAction::SetAuthors(authors) => filters.authors = authors.into_iter().collect(),
            SearchAction::ToggleRegion(region) => filters.toggle_region(region),
            SearchAction::SetRegions(regions) => filters.regions = regions.into_iter().collect(),
            SearchAction::SetDateRange(range) => filters.date_range = range,
            SearchAction::SetSortBy(key) => filters.sort_by = key,
            SearchAction::SetSortOrder(order) => filters.sort_order = order,
            SearchAction::ResetFilters => {
                filters.reset();
                self.query_input.clear();
            }
        }
    }

    /// Only `EditQuery` leaves the results untouched
    fn affects_results(action: &SearchAction) -> bool {
        !matches!(action, SearchAction::EditQuery(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct TrendsState {
    pub filter: RadarFilter,
    pub selection: RadarSelection,
}

impl TrendsState {
    fn reduce(&mut self, action: TrendsAction) {
        match action {
            TrendsAction::ToggleRing(ring) => self.filter.toggle_ring(ring),
            TrendsAction::ToggleQuadrant(quadrant) => self.filter.toggle_quadrant(quadrant),
            TrendsAction::ClearFilters => {
                self.filter = RadarFilter::default();
                self.selection.clear();
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub sidebar_collapsed: bool,
    pub theme: ThemeMode,
    pub view_mode: ViewMode,
    pub active_modal: Option<String>,
    /// Newest first
    pub notifications: Vec<Notification>,
    next_notification_id: u64,
}

impl UiState {
    fn reduce(&mut self, action: UiAction) {
        match action {
            UiAction::ToggleSidebar => self.sidebar_collapsed = !self.sidebar_collapsed,
            UiAction::SetSidebarCollapsed(collapsed) => self.sidebar_collapsed = collapsed,
            UiAction::SetViewMode(mode) => self.view_mode = mode,
            UiAction::SetTheme(theme) => self.theme = theme,
            UiAction::SetActiveModal(modal) => self.active_modal = modal,
            UiAction::Notify {
                kind,
                title,
                message,
            } => {
                self.next_notification_id += 1;
                self.notifications.insert(
                    0,
                    Notification {
                        id: self.next_notification_id,
                        kind,
                        title,
                        message,
                        timestamp: Utc::now(),
                        read: false,
                    },
                );
            }
            UiAction::MarkNotificationRead(id) => {
                if let Some(notification) = self.notifications.iter_mut().find(|n| n.id == id) {
                    notification.read = true;
                }
            }
            UiAction::ClearNotifications => self.notifications.clear(),
        }
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Store {
    pub studies: StudiesState,
    pub search: SearchState,
    pub trends: TrendsState,
    pub ui: UiState,
}

impl Store {
    pub fn new(catalog: Catalog) -> Self {
        let mut store = Store::default();
        store.dispatch(Action::Studies(StudiesAction::SetCatalog(catalog)));
        store
    }

    pub fn catalog(&self) -> &Catalog {
        &self.studies.catalog
    }

    /// Apply one action. Updates are atomic per action.
    pub fn dispatch(&mut self, action: Action) {
        tracing::trace!(?action, "dispatch");

        match action {
            Action::Studies(action) => {
                self.studies.reduce(action);
                self.refresh_results();
            }
            Action::Search(action) => {
                let refresh = SearchState::affects_results(&action);
                self.search.reduce(action);
                if refresh {
                    self.refresh_results();
                }
            }
            Action::SelectTrend(id) => self.trends.selection.toggle(&id),
            Action::Trends(action) => self.trends.reduce(action),
            Action::Ui(action) => self.ui.reduce(action),
        }
    }

    fn refresh_results(&mut self) {
        self.search.results = engine::search(&self.studies.catalog.studies, &self.search.filters)
            .into_iter()
            .cloned()
            .collect();

        tracing::debug!(results = self.search.results.len(), "🔎 Search results updated");
    }

    pub fn results(&self) -> &[Study] {
        &self.search.results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::{gen_z_study, nev_study, trend_grid};

    fn store() -> Store {
        Store::new(Catalog::new(vec![nev_study(), gen_z_study()], trend_grid()).unwrap())
    }

    fn result_ids(store: &Store) -> Vec<&str> {
        store.results().iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_initial_results_are_whole_catalog_by_date() {
        let store = store();
        assert_eq!(result_ids(&store), vec!["study-a", "study-b"]);
    }

    #[test]
    fn test_edit_query_waits_for_commit() {
        let mut store = store();
        store.dispatch(Action::Search(SearchAction::EditQuery("nev".to_string())));
        assert_eq!(store.search.query_input, "nev");
        assert_eq!(store.results().len(), 2);

        store.dispatch(Action::Search(SearchAction::SetQuery("nev".to_string())));
        assert_eq!(result_ids(&store), vec!["study-a"]);
    }

    #[test]
    fn test_filters_recompute_and_reset() {
        let mut store = store();
        store.dispatch(Action::Search(SearchAction::ToggleCategory(
            StudyCategory::ConsumerInsights,
        )));
        assert_eq!(result_ids(&store), vec!["study-b"]);

        store.dispatch(Action::Search(SearchAction::ToggleYear(2023)));
        assert!(store.results().is_empty());

        store.dispatch(Action::Search(SearchAction::ResetFilters));
        assert!(store.search.filters.is_default());
        assert_eq!(store.results().len(), 2);
    }

    #[test]
    fn test_date_range_action() {
        let mut store = store();
        let modified = store.catalog().studies[0].date_modified;
        store.dispatch(Action::Search(SearchAction::SetDateRange(Some(DateRange {
            start: modified,
            end: modified,
        }))));
        assert_eq!(store.results().len(), 1);
        assert_eq!(store.search.filters.active_filter_count(), 1);

        store.dispatch(Action::Search(SearchAction::SetDateRange(None)));
        assert_eq!(store.results().len(), 2);
    }

    #[test]
    fn test_title_sort_reads_a_to_z_by_default() {
        let mut store = store();
        store.dispatch(Action::Search(SearchAction::SetSortBy(SortKey::Title)));
        assert_eq!(store.search.filters.sort_order, SortOrder::Desc);

        let titles: Vec<&str> = store.results().iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Gen Z Lifestyle", "NEV Study"]);

        store.dispatch(Action::Search(SearchAction::SetSortOrder(SortOrder::Asc)));
        assert_eq!(result_ids(&store), vec!["study-a", "study-b"]);
    }

    #[test]
    fn test_set_actions_replace_selection() {
        let mut store = store();
        store.dispatch(Action::Search(SearchAction::ToggleTag("youth".to_string())));
        store.dispatch(Action::Search(SearchAction::SetTags(vec!["EV".to_string()])));
        assert_eq!(result_ids(&store), vec!["study-a"]);
        assert_eq!(store.search.filters.tags.len(), 1);

        store.dispatch(Action::Search(SearchAction::ToggleCategory(
            StudyCategory::ConsumerInsights,
        )));
        store.dispatch(Action::Search(SearchAction::SetCategories(vec![
            StudyCategory::MarketTrends,
        ])));
        assert_eq!(store.search.filters.categories.len(), 1);
        assert_eq!(result_ids(&store), vec!["study-a"]);

        store.dispatch(Action::Search(SearchAction::SetAuthors(vec!["Nobody".to_string()])));
        assert!(store.results().is_empty());
        store.dispatch(Action::Search(SearchAction::SetAuthors(Vec::new())));
        store.dispatch(Action::Search(SearchAction::SetRegions(vec!["Germany".to_string()])));
        assert!(store.results().is_empty());
        assert_eq!(store.search.filters.active_filter_count(), 3);
    }

    #[test]
    fn test_set_catalog_drops_stale_selection() {
        let mut store = store();
        store.dispatch(Action::Studies(StudiesAction::SelectStudy(Some(
            "study-b".to_string(),
        ))));
        assert_eq!(store.studies.selected.as_deref(), Some("study-b"));

        store.dispatch(Action::Studies(StudiesAction::SetCatalog(Catalog::default())));
        assert!(store.studies.selected.is_none());
        assert!(store.results().is_empty());
    }

    #[test]
    fn test_trend_selection_toggles() {
        let mut store = store();
        let id = store.catalog().trends[0].id.clone();

        store.dispatch(Action::SelectTrend(id.clone()));
        assert!(store.trends.selection.is_selected(&id));

        store.dispatch(Action::SelectTrend(id));
        assert_eq!(store.trends.selection, RadarSelection::None);
    }

    #[test]
    fn test_clearing_trend_filters_clears_selection() {
        let mut store = store();
        store.dispatch(Action::Trends(TrendsAction::ToggleRing(Ring::Adopt)));
        store.dispatch(Action::SelectTrend("x".to_string()));

        store.dispatch(Action::Trends(TrendsAction::ClearFilters));
        assert!(!store.trends.filter.is_active());
        assert_eq!(store.trends.selection, RadarSelection::None);
    }

    #[test]
    fn test_ui_slice() {
        let mut store = store();
        store.dispatch(Action::Ui(UiAction::ToggleSidebar));
        assert!(store.ui.sidebar_collapsed);

        store.dispatch(Action::Ui(UiAction::SetViewMode(ViewMode::List)));
        assert_eq!(store.ui.view_mode, ViewMode::List);

        store.dispatch(Action::Ui(UiAction::SetActiveModal(Some("filters".to_string()))));
        assert_eq!(store.ui.active_modal.as_deref(), Some("filters"));
    }

    #[test]
    fn test_notifications_newest_first() {
        let mut store = store();
        for title in ["first", "second"] {
            store.dispatch(Action::Ui(UiAction::Notify {
                kind: NotificationKind::Info,
                title: title.to_string(),
                message: String::new(),
            }));
        }
        assert_eq!(store.ui.notifications[0].title, "second");
        assert_eq!(store.ui.unread_count(), 2);

        let id = store.ui.notifications[1].id;
        store.dispatch(Action::Ui(UiAction::MarkNotificationRead(id)));
        assert_eq!(store.ui.unread_count(), 1);

        store.dispatch(Action::Ui(UiAction::ClearNotifications));
        assert!(store.ui.notifications.is_empty());
    }
}
