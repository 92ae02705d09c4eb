//! One view function per route. Pages read the store and never mutate it.

use chrono::{Datelike, Utc};
use iced::widget::{
    button, canvas, column, container, horizontal_space, progress_bar, row, scrollable, text,
    text_input, Column,
};
use iced::{Alignment, Element, Length};

use crate::config::Config;
use crate::engine::radar;
use crate::engine::views::{self, DashboardStats};
use crate::format;
use crate::state::data::{
    AccessLevel, Impact, MetricTrend, Quadrant, Ring, Study, StudyCategory, StudyStatus, TrendItem,
};
use crate::state::filters::{SortKey, SortOrder};
use crate::state::store::{Store, ViewMode};
use crate::{Message, Route};

use super::radar::RadarChart;
use super::study_card::{card, list_row};
use super::{chip, empty_state, quadrant_color, ring_color, section, stat_tile, status_color};

const GRID_COLUMNS: usize = 3;

/// Windows offered for the last-modified filter, in days
const UPDATED_WINDOWS: [(&str, i64); 3] = [
    ("Last 30 days", 30),
    ("Last 6 months", 182),
    ("Last year", 365),
];

/// Name of the filter panel in `UiState::active_modal`
pub const FILTER_PANEL: &str = "filters";

fn page<'a>(title: &'a str, content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    let content: Element<'a, Message> = content.into();
    scrollable(column![text(title).size(32), content].spacing(24).padding(32))
        .height(Length::Fill)
        .into()
}

/// Cards in rows of `GRID_COLUMNS`; the last row is padded so cards keep their width
fn grid<'a>(studies: &[&'a Study]) -> Element<'a, Message> {
    studies
        .chunks(GRID_COLUMNS)
        .fold(Column::new().spacing(16), |grid, chunk| {
            let cards = chunk
                .iter()
                .fold(row![].spacing(16), |cards, &study| cards.push(card(study)));
            let cards = (chunk.len()..GRID_COLUMNS)
                .fold(cards, |cards, _| cards.push(horizontal_space()));
            grid.push(cards)
        })
        .into()
}

fn list<'a>(studies: &[&'a Study]) -> Element<'a, Message> {
    studies
        .iter()
        .fold(Column::new().spacing(4), |list, &study| list.push(list_row(study)))
        .into()
}

fn stat_row<'a>(stats: &DashboardStats) -> Element<'a, Message> {
    row![
        stat_tile("Total studies", stats.total_studies),
        stat_tile("Active projects", stats.active_projects),
        stat_tile("Completed this year", stats.completed_this_year),
        stat_tile("Pending reviews", stats.pending_reviews),
    ]
    .spacing(16)
    .into()
}

fn category_bars<'a>(studies: &[Study]) -> Element<'a, Message> {
    views::category_distribution(studies)
        .into_iter()
        .fold(Column::new().spacing(8), |bars, share| {
            let label = row![
                text(share.category.label()).size(14).width(Length::Fill),
                text(format!(
                    "{} ({})",
                    share.count,
                    format::percentage(share.percentage)
                ))
                .size(14),
            ];
            bars.push(
                button(column![label, progress_bar(0.0..=100.0, share.percentage).height(6)].spacing(4))
                    .on_press(Message::ShowCategory(share.category))
                    .width(Length::Fill)
                    .style(button::text),
            )
        })
        .into()
}

fn trend_row(item: &TrendItem) -> Element<'_, Message> {
    button(
        row![
            text(item.momentum.symbol()).color(ring_color(item.ring)),
            text(&item.name).width(Length::Fill),
            text(item.ring.label()).size(13).color(ring_color(item.ring)),
        ]
        .spacing(10),
    )
    .on_press(Message::ShowTrend(item.id.clone()))
    .width(Length::Fill)
    .style(button::text)
    .into()
}

pub fn dashboard<'a>(store: &'a Store, config: &Config) -> Element<'a, Message> {
    let catalog = store.catalog();
    if catalog.is_empty() {
        return page(
            "Dashboard",
            empty_state("No studies yet", "The research catalog is empty"),
        );
    }

    let studies = &catalog.studies;
    let stats = DashboardStats::compute(studies, Utc::now().year());

    let featured = views::featured(studies);
    let featured: Element<'a, Message> = if featured.is_empty() {
        text("No featured studies").size(14).into()
    } else {
        grid(&featured)
    };

    let rising = views::rising_trends(&catalog.trends, config.views.rising_limit)
        .into_iter()
        .fold(Column::new().spacing(4), |rows, item| rows.push(trend_row(item)));

    page(
        "Dashboard",
        column![
            stat_row(&stats),
            section("Featured research", featured),
            row![
                container(section(
                    "Recently updated",
                    list(&views::recent(studies, config.views.recent_limit))
                ))
                .width(Length::FillPortion(2)),
                column![
                    section("By category", category_bars(studies)),
                    section("Rising trends", rising),
                ]
                .spacing(24)
                .width(Length::FillPortion(1)),
            ]
            .spacing(24),
        ]
        .spacing(32),
    )
}

fn filter_panel(store: &Store) -> Element<'_, Message> {
    let filters = &store.search.filters;
    let catalog = store.catalog();

    let categories = StudyCategory::ALL
        .into_iter()
        .fold(row![].spacing(6), |chips, category| {
            chips.push(chip(
                category.label(),
                filters.categories.contains(&category),
                Message::ToggleCategory(category),
            ))
        })
        .wrap();

    let years = catalog
        .years()
        .into_iter()
        .fold(row![].spacing(6), |chips, year| {
            chips.push(chip(year, filters.years.contains(&year), Message::ToggleYear(year)))
        })
        .wrap();

    let statuses = StudyStatus::ALL
        .into_iter()
        .fold(row![].spacing(6), |chips, status| {
            chips.push(chip(
                status.label(),
                filters.statuses.contains(&status),
                Message::ToggleStatus(status),
            ))
        })
        .wrap();

    let tags = catalog
        .tags()
        .into_iter()
        .fold(row![].spacing(6), |chips, tag| {
            chips.push(chip(
                tag,
                filters.tags.contains(tag),
                Message::ToggleTag(tag.to_string()),
            ))
        })
        .wrap();

    let window = filters.date_range.map(|range| range.span_days());
    let updated = UPDATED_WINDOWS.into_iter().fold(
        row![chip("Any time", window.is_none(), Message::SetUpdatedWithin(None))].spacing(6),
        |chips, (label, days)| {
            chips.push(chip(
                label,
                window == Some(days),
                Message::SetUpdatedWithin(Some(days)),
            ))
        },
    );

    // Authors and regions are picked from a study page; show what is active
    let picked = filters
        .authors
        .iter()
        .map(|author| chip(author, true, Message::ToggleAuthor(author.clone())))
        .chain(
            filters
                .regions
                .iter()
                .map(|region| chip(region, true, Message::ToggleRegion(region.clone()))),
        )
        .fold(row![].spacing(6), |chips, picked| chips.push(picked))
        .wrap();

    container(
        column![
            text("Category").size(14),
            categories,
            text("Year").size(14),
            years,
            text("Status").size(14),
            statuses,
            text("Tags").size(14),
            tags,
            text("Last updated").size(14),
            updated,
            picked,
            button("Reset filters")
                .on_press(Message::ResetFilters)
                .style(button::secondary),
        ]
        .spacing(10),
    )
    .padding(16)
    .width(Length::Fill)
    .style(container::rounded_box)
    .into()
}

pub fn library(store: &Store) -> Element<'_, Message> {
    let filters = &store.search.filters;
    let results: Vec<&Study> = store.results().iter().collect();
    let panel_open = store.ui.active_modal.as_deref() == Some(FILTER_PANEL);

    let input = text_input("Search studies, tags, summaries...", &store.search.query_input)
        .on_input(Message::QueryChanged)
        .on_submit(Message::SubmitQuery)
        .padding(10);
    let mut search_bar = row![input].spacing(8);
    if !store.search.query_input.is_empty() {
        search_bar = search_bar.push(button("Clear").on_press(Message::ClearSearch).padding(10));
    }

    let order = match (filters.sort_by, filters.sort_order) {
        (SortKey::Title, SortOrder::Desc) => "A → Z",
        (SortKey::Title, SortOrder::Asc) => "Z → A",
        (_, SortOrder::Desc) => "↓ Newest first",
        (_, SortOrder::Asc) => "↑ Oldest first",
    };
    let filter_label = match filters.active_filter_count() {
        0 => "Filters".to_string(),
        n => format!("Filters ({n})"),
    };

    let mut controls = SortKey::ALL
        .into_iter()
        .fold(row![text("Sort by").size(14)].spacing(6), |controls, key| {
            controls.push(chip(key, filters.sort_by == key, Message::SortChanged(key)))
        })
        .push(chip(order, false, Message::FlipSortOrder))
        .push(horizontal_space())
        .push(chip(filter_label, panel_open, Message::ToggleFilterPanel))
        .push(chip("Grid", store.ui.view_mode == ViewMode::Grid, Message::SetViewMode(ViewMode::Grid)))
        .push(chip("List", store.ui.view_mode == ViewMode::List, Message::SetViewMode(ViewMode::List)))
        .align_y(Alignment::Center);

    if !filters.is_default() {
        controls = controls.push(chip("Reset", false, Message::ResetFilters));
    }

    let summary = match filters.trimmed_query() {
        Some(query) => format!("{} results for \"{query}\"", results.len()),
        None => format!("{} studies", results.len()),
    };

    let body: Element<'_, Message> = if results.is_empty() {
        let hint = if filters.has_active_filters() {
            "Try removing some filters"
        } else {
            "Try a different search term"
        };
        empty_state("No studies found", hint)
    } else {
        match store.ui.view_mode {
            ViewMode::Grid => grid(&results),
            ViewMode::List => list(&results),
        }
    };

    let mut content = column![search_bar, controls].spacing(16);
    if panel_open {
        content = content.push(filter_panel(store));
    }

    page("Library", content.push(text(summary).size(14)).push(body))
}

fn ring_lists<'a>(visible: &[&'a TrendItem]) -> Element<'a, Message> {
    views::trends_by_ring(visible)
        .into_iter()
        .fold(Column::new().spacing(20), |lists, (ring, items)| {
            let entries = items.into_iter().fold(
                column![
                    text(ring.label()).size(18).color(ring_color(ring)),
                    text(ring.description()).size(13),
                ]
                .spacing(4),
                |entries, item| entries.push(trend_row(item)),
            );
            lists.push(entries)
        })
        .into()
}

fn trend_detail<'a>(store: &'a Store, item: &'a TrendItem) -> Element<'a, Message> {
    let catalog = store.catalog();

    let data_points = item
        .data_points
        .iter()
        .fold(Column::new().spacing(4), |points, point| {
            points.push(row![
                text(&point.label).size(13).width(Length::Fill),
                text(&point.value).size(13),
            ])
        });

    let sources = item
        .sources
        .iter()
        .fold(Column::new().spacing(2), |sources, source| {
            sources.push(text(source).size(12))
        });

    let studies = item
        .studies
        .iter()
        .filter_map(|id| catalog.study(id))
        .fold(Column::new().spacing(4), |links, study| {
            links.push(
                button(text(&study.title).size(13))
                    .on_press(Message::Navigate(Route::Study(study.id.clone())))
                    .style(button::text),
            )
        });

    container(
        column![
            row![
                text(&item.name).size(22).width(Length::Fill),
                button("Close").on_press(Message::SelectTrend(item.id.clone())),
            ],
            row![
                text(item.ring.label()).color(ring_color(item.ring)),
                text(item.quadrant.label()).color(quadrant_color(item.quadrant)),
                text(format!("{} {}", item.momentum.symbol(), item.category)),
            ]
            .spacing(12),
            text(&item.description).size(14),
            text("Insight").size(16),
            text(&item.insight).size(14),
            data_points,
            studies,
            sources,
        ]
        .spacing(12),
    )
    .padding(16)
    .style(container::rounded_box)
    .into()
}

pub fn trends<'a>(store: &'a Store, config: &Config) -> Element<'a, Message> {
    let catalog = store.catalog();
    let filter = store.trends.filter;
    let selected = store.trends.selection.selected_id();

    let rings = Ring::ALL
        .into_iter()
        .fold(row![].spacing(6), |chips, ring| {
            chips.push(chip(ring.label(), filter.ring == Some(ring), Message::ToggleRing(ring)))
        });
    let quadrants = Quadrant::ALL
        .into_iter()
        .fold(row![].spacing(6), |chips, quadrant| {
            chips.push(chip(
                quadrant.label(),
                filter.quadrant == Some(quadrant),
                Message::ToggleQuadrant(quadrant),
            ))
        });

    let mut chips = column![rings, quadrants].spacing(8);
    if filter.is_active() || selected.is_some() {
        chips = chips.push(
            button("Clear filters")
                .on_press(Message::ClearTrendFilters)
                .style(button::secondary),
        );
    }

    let chart = canvas(RadarChart {
        points: radar::layout(&catalog.trends, &filter, config.radar.jitter()),
        filter,
        selected,
    })
    .width(Length::Fixed(config.radar.size))
    .height(Length::Fixed(config.radar.size));

    let side: Element<'a, Message> = match selected.and_then(|id| catalog.trend(id)) {
        Some(item) => trend_detail(store, item),
        None => ring_lists(&radar::visible_items(&catalog.trends, &filter)),
    };

    page(
        "Trend radar",
        column![
            chips,
            row![chart, container(side).width(Length::Fill)].spacing(32),
        ]
        .spacing(24),
    )
}

pub fn analytics<'a>(store: &'a Store) -> Element<'a, Message> {
    let studies = &store.catalog().studies;
    let stats = DashboardStats::compute(studies, Utc::now().year());

    let statuses = views::status_breakdown(studies).into_iter().fold(
        Column::new().spacing(6),
        |rows, (status, count)| {
            rows.push(row![
                text(status.label())
                    .color(status_color(status))
                    .width(Length::Fill),
                text(count.to_string()),
            ])
        },
    );

    let years = views::by_year(studies)
        .into_iter()
        .rev()
        .fold(Column::new().spacing(4), |rows, (year, group)| {
            rows.push(
                button(row![
                    text(year.to_string()).width(Length::Fill),
                    text(format!("{} studies", group.len())),
                ])
                .on_press(Message::ShowYear(year))
                .width(Length::Fill)
                .style(button::text),
            )
        });

    page(
        "Analytics",
        column![
            stat_row(&stats),
            row![
                stat_tile("Documents", stats.total_documents),
                stat_tile("Researchers", stats.total_authors),
            ]
            .spacing(16),
            row![
                container(section("Category distribution", category_bars(studies)))
                    .width(Length::FillPortion(2)),
                column![section("Status", statuses), section("By year", years)]
                    .spacing(24)
                    .width(Length::FillPortion(1)),
            ]
            .spacing(24),
        ]
        .spacing(32),
    )
}

fn impact_label(impact: Impact) -> &'static str {
    match impact {
        Impact::High => "High impact",
        Impact::Medium => "Medium impact",
        Impact::Low => "Low impact",
    }
}

fn access_label(access: AccessLevel) -> &'static str {
    match access {
        AccessLevel::Public => "Public",
        AccessLevel::Internal => "Internal",
        AccessLevel::Restricted => "Restricted",
        AccessLevel::Confidential => "Confidential",
    }
}

fn metric_arrow(trend: Option<MetricTrend>) -> &'static str {
    match trend {
        Some(MetricTrend::Up) => "▲",
        Some(MetricTrend::Down) => "▼",
        Some(MetricTrend::Stable) | None => "",
    }
}

fn study_body<'a>(store: &'a Store, study: &'a Study, config: &Config) -> Element<'a, Message> {
    let catalog = store.catalog();

    let mut facts = format!("{} · {}", study.category.label(), study.year);
    if let Some(quarter) = &study.quarter {
        facts.push_str(&format!(" {quarter}"));
    }
    if let Some(sample) = study.sample_size {
        facts.push_str(&format!(" · n = {sample}"));
    }

    let mut overview = column![
        text(facts).size(14),
        row![
            text(study.status.label()).color(status_color(study.status)),
            text(access_label(study.access_level)),
            text(format!("Updated {}", format::date(study.date_modified))),
        ]
        .spacing(16),
        text(&study.description),
    ]
    .spacing(10);
    if let Some(summary) = &study.summary {
        overview = overview.push(section("Summary", text(summary)));
    }
    if let Some(methodology) = &study.methodology {
        overview = overview.push(section("Methodology", text(methodology)));
    }

    let tags = study
        .tags
        .iter()
        .fold(row![].spacing(6), |chips, tag| {
            chips.push(chip(format!("#{tag}"), false, Message::ShowTag(tag.clone())))
        })
        .wrap();
    let regions = study
        .regions
        .iter()
        .fold(row![].spacing(6), |chips, region| {
            chips.push(chip(region, false, Message::ShowRegion(region.clone())))
        })
        .wrap();

    let authors = study
        .authors
        .iter()
        .fold(Column::new().spacing(6), |authors, author| {
            authors.push(
                button(column![text(&author.name), text(&author.department).size(12)])
                    .on_press(Message::ShowAuthor(author.name.clone()))
                    .style(button::text),
            )
        });

    let findings = study
        .findings
        .iter()
        .fold(Column::new().spacing(12), |findings, finding| {
            findings.push(column![
                row![
                    text(&finding.title).size(16).width(Length::Fill),
                    text(impact_label(finding.impact)).size(12),
                ],
                text(&finding.description).size(14),
            ])
        });

    let metrics = study
        .metrics
        .iter()
        .fold(row![].spacing(16), |metrics, metric| {
            let value = match &metric.unit {
                Some(unit) => format!("{}{unit}", metric.value),
                None => metric.value.to_string(),
            };
            let change = metric
                .change
                .map(|change| format!("{} {change:+.1}%", metric_arrow(metric.trend)))
                .unwrap_or_default();
            metrics.push(
                container(column![
                    text(value).size(24),
                    text(&metric.label).size(13),
                    text(change).size(12),
                ])
                .padding(12)
                .style(container::rounded_box),
            )
        })
        .wrap();

    let documents = study
        .documents
        .iter()
        .fold(Column::new().spacing(6), |documents, document| {
            documents.push(row![
                text(&document.name).width(Length::Fill),
                text(document.kind.label()).size(13).width(Length::Fixed(100.0)),
                text(format::file_size(document.size))
                    .size(13)
                    .width(Length::Fixed(80.0)),
                text(format::date(document.date_uploaded)).size(13),
            ])
        });

    let related = views::related(&catalog.studies, study, config.views.related_limit);

    let mut body = column![
        button("← Back to library")
            .on_press(Message::Navigate(Route::Library))
            .style(button::text),
        overview,
        tags,
        regions,
        section("Authors", authors),
    ]
    .spacing(24);
    if let Some(key) = study.key_finding() {
        body = body.push(section(
            "Key finding",
            container(text(&key.title).size(18))
                .padding(16)
                .width(Length::Fill)
                .style(container::rounded_box),
        ));
    }
    if !study.findings.is_empty() {
        body = body.push(section("Findings", findings));
    }
    if !study.metrics.is_empty() {
        body = body.push(section("Metrics", metrics));
    }
    if !study.documents.is_empty() {
        body = body.push(section("Documents", documents));
    }
    if !related.is_empty() {
        body = body.push(section("Related research", grid(&related)));
    }

    page(&study.title, body)
}

pub fn study_detail<'a>(store: &'a Store, id: &str, config: &Config) -> Element<'a, Message> {
    match store.catalog().require_study(id) {
        Ok(study) => study_body(store, study, config),
        Err(err) => page(
            "Study not found",
            column![
                text(err.to_string()).size(14),
                button("Back to library").on_press(Message::Navigate(Route::Library)),
            ]
            .spacing(16),
        ),
    }
}
