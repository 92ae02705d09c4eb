use chrono::Utc;
use iced::widget::{button, column, container, row, text, vertical_rule, Column};
use iced::{Element, Length, Task, Theme};
use tracing_subscriber::EnvFilter;

mod catalog;
mod config;
mod engine;
mod error;
mod format;
mod state;
mod ui;

use catalog::Catalog;
use config::Config;
use engine::debounce::{self, Debouncer, Ticket};
use state::data::{Quadrant, Ring, StudyCategory, StudyStatus};
use state::filters::{DateRange, SortKey};
use state::prefs::{keys, Preferences};
use state::store::{
    Action, NotificationKind, SearchAction, Store, StudiesAction, ThemeMode, TrendsAction,
    UiAction, ViewMode,
};

/// Environment variable holding the log filter (e.g., "research_library=debug")
const LOG_ENV: &str = "RESEARCH_LIBRARY_LOG";

/// Where the window is pointed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Library,
    Trends,
    Analytics,
    Study(String),
}

impl Route {
    const NAVIGATION: [(Route, &'static str); 4] = [
        (Route::Dashboard, "Dashboard"),
        (Route::Library, "Library"),
        (Route::Trends, "Trends"),
        (Route::Analytics, "Analytics"),
    ];
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    Navigate(Route),

    /// Search box edited; committed after the debounce delay
    QueryChanged(String),
    /// A debounce delay elapsed
    QueryDebounced(Ticket),
    /// Enter pressed in the search box; commit right away
    SubmitQuery,
    ClearSearch,

    ToggleCategory(StudyCategory),
    ToggleYear(i32),
    ToggleStatus(StudyStatus),
    ToggleTag(String),
    ToggleAuthor(String),
    ToggleRegion(String),
    SetUpdatedWithin(Option<i64>),
    SortChanged(SortKey),
    FlipSortOrder,
    ResetFilters,
    ToggleFilterPanel,

    /// Open the library with that dimension narrowed to one value
    ShowCategory(StudyCategory),
    ShowYear(i32),
    ShowTag(String),
    ShowAuthor(String),
    ShowRegion(String),

    ToggleRing(Ring),
    ToggleQuadrant(Quadrant),
    ClearTrendFilters,
    SelectTrend(String),
    /// Open the radar with an item selected
    ShowTrend(String),

    ToggleSidebar,
    SetViewMode(ViewMode),
    ToggleTheme,
    ResetPreferences,
    MarkNotificationRead(u64),
    ClearNotifications,
}

/// Main application state
struct ResearchLibrary {
    store: Store,
    prefs: Preferences,
    config: Config,
    debouncer: Debouncer,
    route: Route,
}

impl ResearchLibrary {
    fn new() -> (Self, Task<Message>) {
        let mut startup_notices = Vec::new();

        let config = Config::load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "⚠️  Ignoring unreadable config");
            startup_notices.push((NotificationKind::Warning, "Using default settings", err.to_string()));
            Config::default()
        });

        let mut prefs = Preferences::open(config.storage.database.as_deref());

        let catalog = Catalog::builtin().unwrap_or_else(|err| {
            tracing::error!(error = %err, "❌ Catalog failed to load");
            startup_notices.push((NotificationKind::Error, "Catalog unavailable", err.to_string()));
            Catalog::default()
        });

        let mut store = Store::new(catalog);
        store.dispatch(Action::Ui(UiAction::SetSidebarCollapsed(
            prefs.get(keys::SIDEBAR_COLLAPSED, false),
        )));
        store.dispatch(Action::Ui(UiAction::SetViewMode(
            prefs.get(keys::VIEW_MODE, ViewMode::default()),
        )));
        store.dispatch(Action::Ui(UiAction::SetTheme(
            prefs.get(keys::THEME, ThemeMode::default()),
        )));

        if startup_notices.is_empty() {
            startup_notices.push((
                NotificationKind::Info,
                "Library ready",
                format!("{} studies available", store.catalog().studies.len()),
            ));
        }
        for (kind, title, message) in startup_notices {
            store.dispatch(Action::Ui(UiAction::Notify {
                kind,
                title: title.to_string(),
                message,
            }));
        }

        tracing::info!(
            studies = store.catalog().studies.len(),
            trends = store.catalog().trends.len(),
            "🔬 Research library initialized"
        );

        let debouncer = Debouncer::new(config.debounce());
        (
            ResearchLibrary {
                store,
                prefs,
                config,
                debouncer,
                route: Route::Dashboard,
            },
            Task::none(),
        )
    }

    fn search(&mut self, action: SearchAction) {
        self.store.dispatch(Action::Search(action));
    }

    /// Commit whatever is in the search box now
    fn commit_query(&mut self) {
        self.debouncer.cancel();
        let query = self.store.search.query_input.clone();
        self.search(SearchAction::SetQuery(query));
    }

    fn show_library(&mut self) {
        self.route = Route::Library;
        self.store
            .dispatch(Action::Studies(StudiesAction::SelectStudy(None)));
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navigate(route) => {
                let selected = match &route {
                    Route::Study(id) => Some(id.clone()),
                    _ => None,
                };
                self.store
                    .dispatch(Action::Studies(StudiesAction::SelectStudy(selected)));
                self.route = route;
            }

            Message::QueryChanged(text) => {
                self.search(SearchAction::EditQuery(text));
                let ticket = self.debouncer.schedule();
                return Task::perform(
                    debounce::elapsed(self.debouncer.delay(), ticket),
                    Message::QueryDebounced,
                );
            }
            Message::QueryDebounced(ticket) => {
                if self.debouncer.is_current(ticket) {
                    self.commit_query();
                } else {
                    tracing::trace!(?ticket, "Dropping superseded search");
                }
            }
            Message::SubmitQuery => self.commit_query(),
            Message::ClearSearch => {
                self.debouncer.cancel();
                self.search(SearchAction::SetQuery(String::new()));
            }

            Message::ToggleCategory(category) => self.search(SearchAction::ToggleCategory(category)),
            Message::ToggleYear(year) => self.search(SearchAction::ToggleYear(year)),
            Message::ToggleStatus(status) => self.search(SearchAction::ToggleStatus(status)),
            Message::ToggleTag(tag) => self.search(SearchAction::ToggleTag(tag)),
            Message::ToggleAuthor(author) => self.search(SearchAction::ToggleAuthor(author)),
            Message::ToggleRegion(region) => self.search(SearchAction::ToggleRegion(region)),
            Message::SetUpdatedWithin(days) => {
                let range = days.map(|days| DateRange::trailing_days(Utc::now(), days));
                self.search(SearchAction::SetDateRange(range));
            }
            Message::SortChanged(key) => self.search(SearchAction::SetSortBy(key)),
            Message::FlipSortOrder => {
                let order = self.store.search.filters.sort_order.flipped();
                self.search(SearchAction::SetSortOrder(order));
            }
            Message::ResetFilters => {
                self.debouncer.cancel();
                self.search(SearchAction::ResetFilters);
            }
            Message::ToggleFilterPanel => {
                let modal = match self.store.ui.active_modal.as_deref() {
                    Some(ui::pages::FILTER_PANEL) => None,
                    _ => Some(ui::pages::FILTER_PANEL.to_string()),
                };
                self.store.dispatch(Action::Ui(UiAction::SetActiveModal(modal)));
            }

            Message::ShowCategory(category) => {
                self.search(SearchAction::SetCategories(vec![category]));
                self.show_library();
            }
            Message::ShowYear(year) => {
                self.search(SearchAction::SetYears(vec![year]));
                self.show_library();
            }
            Message::ShowTag(tag) => {
                self.search(SearchAction::SetTags(vec![tag]));
                self.show_library();
            }
            Message::ShowAuthor(author) => {
                self.search(SearchAction::SetAuthors(vec![author]));
                self.show_library();
            }
            Message::ShowRegion(region) => {
                self.search(SearchAction::SetRegions(vec![region]));
                self.show_library();
            }

            Message::ToggleRing(ring) => {
                self.store.dispatch(Action::Trends(TrendsAction::ToggleRing(ring)))
            }
            Message::ToggleQuadrant(quadrant) => {
                self.store
                    .dispatch(Action::Trends(TrendsAction::ToggleQuadrant(quadrant)))
            }
            Message::ClearTrendFilters => {
                self.store.dispatch(Action::Trends(TrendsAction::ClearFilters))
            }
            Message::SelectTrend(id) => self.store.dispatch(Action::SelectTrend(id)),
            Message::ShowTrend(id) => {
                if !self.store.trends.selection.is_selected(&id) {
                    self.store.dispatch(Action::SelectTrend(id));
                }
                self.route = Route::Trends;
            }

            Message::ToggleSidebar => {
                self.store.dispatch(Action::Ui(UiAction::ToggleSidebar));
                self.prefs
                    .set(keys::SIDEBAR_COLLAPSED, &self.store.ui.sidebar_collapsed);
            }
            Message::SetViewMode(mode) => {
                self.store.dispatch(Action::Ui(UiAction::SetViewMode(mode)));
                self.prefs.set(keys::VIEW_MODE, &mode);
            }
            Message::ToggleTheme => {
                let theme = match self.store.ui.theme {
                    ThemeMode::Dark => ThemeMode::Light,
                    ThemeMode::Light => ThemeMode::Dark,
                };
                self.store.dispatch(Action::Ui(UiAction::SetTheme(theme)));
                self.prefs.set(keys::THEME, &theme);
            }
            Message::ResetPreferences => {
                for key in [keys::SIDEBAR_COLLAPSED, keys::VIEW_MODE, keys::THEME] {
                    self.prefs.remove(key);
                }
                for action in [
                    UiAction::SetSidebarCollapsed(false),
                    UiAction::SetViewMode(ViewMode::default()),
                    UiAction::SetTheme(ThemeMode::default()),
                    UiAction::Notify {
                        kind: NotificationKind::Success,
                        title: "Preferences restored".to_string(),
                        message: "Layout and theme are back to their defaults".to_string(),
                    },
                ] {
                    self.store.dispatch(Action::Ui(action));
                }
            }
            Message::MarkNotificationRead(id) => {
                self.store
                    .dispatch(Action::Ui(UiAction::MarkNotificationRead(id)))
            }
            Message::ClearNotifications => {
                self.store.dispatch(Action::Ui(UiAction::ClearNotifications))
            }
        }

        Task::none()
    }

    fn notifications(&self) -> Element<'_, Message> {
        let ui = &self.store.ui;
        let unread = ui
            .notifications
            .iter()
            .filter(|notification| !notification.read)
            .fold(Column::new().spacing(6), |list, notification| {
                let color = match notification.kind {
                    NotificationKind::Success => iced::Color::from_rgb8(0x10, 0xb9, 0x81),
                    NotificationKind::Error => iced::Color::from_rgb8(0xef, 0x44, 0x44),
                    NotificationKind::Warning => iced::Color::from_rgb8(0xf5, 0x9e, 0x0b),
                    NotificationKind::Info => iced::Color::from_rgb8(0x3b, 0x82, 0xf6),
                };
                list.push(
                    button(column![
                        text(&notification.title).size(13).color(color),
                        text(&notification.message).size(12),
                        text(format::relative(notification.timestamp, Utc::now())).size(11),
                    ])
                    .on_press(Message::MarkNotificationRead(notification.id))
                    .width(Length::Fill)
                    .style(button::text),
                )
            });

        column![
            text(format!("Notifications ({})", ui.unread_count())).size(14),
            unread,
            button(text("Clear all").size(12))
                .on_press(Message::ClearNotifications)
                .style(button::text),
        ]
        .spacing(8)
        .into()
    }

    fn sidebar(&self) -> Element<'_, Message> {
        let collapsed = self.store.ui.sidebar_collapsed;

        let nav = Route::NAVIGATION
            .into_iter()
            .fold(Column::new().spacing(4), |nav, (route, label)| {
                let active = match (&self.route, &route) {
                    (Route::Study(_), Route::Library) => true,
                    (current, route) => current == route,
                };
                let label = if collapsed { &label[..1] } else { label };
                nav.push(
                    button(text(label))
                        .on_press(Message::Navigate(route))
                        .width(Length::Fill)
                        .style(if active {
                            button::primary
                        } else {
                            button::text
                        }),
                )
            });

        let theme_label = match self.store.ui.theme {
            ThemeMode::Dark => "Light mode",
            ThemeMode::Light => "Dark mode",
        };

        let mut sidebar = column![
            button(text(if collapsed { "»" } else { "«  Research Library" }))
                .on_press(Message::ToggleSidebar)
                .style(button::text),
            nav,
        ]
        .spacing(24)
        .padding(16)
        .width(if collapsed {
            Length::Fixed(64.0)
        } else {
            Length::Fixed(240.0)
        });

        if !collapsed {
            sidebar = sidebar.push(self.notifications()).push(
                column![
                    button(text(theme_label).size(13))
                        .on_press(Message::ToggleTheme)
                        .style(button::secondary),
                    button(text("Restore defaults").size(13))
                        .on_press(Message::ResetPreferences)
                        .style(button::text),
                ]
                .spacing(6),
            );
        }

        sidebar.into()
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let page = match &self.route {
            Route::Dashboard => ui::pages::dashboard(&self.store, &self.config),
            Route::Library => ui::pages::library(&self.store),
            Route::Trends => ui::pages::trends(&self.store, &self.config),
            Route::Analytics => ui::pages::analytics(&self.store),
            Route::Study(id) => ui::pages::study_detail(&self.store, id, &self.config),
        };

        container(row![self.sidebar(), vertical_rule(1), page])
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        match self.store.ui.theme {
            ThemeMode::Dark => Theme::Dark,
            ThemeMode::Light => Theme::Light,
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> iced::Result {
    init_tracing();

    iced::application(
        "Research Library",
        ResearchLibrary::update,
        ResearchLibrary::view,
    )
    .theme(ResearchLibrary::theme)
    .centered()
    .run_with(ResearchLibrary::new)
}
