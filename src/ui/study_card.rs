use iced::widget::{button, column, container, row, text, Row};
use iced::{Element, Length};

use crate::format;
use crate::state::data::Study;
use crate::{Message, Route};

use super::status_color;

const DESCRIPTION_CHARS: usize = 140;
const CARD_TAGS: usize = 3;

fn open(study: &Study) -> Message {
    Message::Navigate(Route::Study(study.id.clone()))
}

fn tag_row(study: &Study) -> Row<'_, Message> {
    study
        .tags
        .iter()
        .take(CARD_TAGS)
        .fold(row![].spacing(6), |tags, tag| {
            tags.push(text(format!("#{tag}")).size(12))
        })
}

/// Grid entry: category, title, shortened description and tags
pub fn card(study: &Study) -> Element<'_, Message> {
    let header = row![
        text(study.category.label()).size(12).width(Length::Fill),
        text(study.status.label())
            .size(12)
            .color(status_color(study.status)),
    ];

    let body = column![
        header,
        text(&study.title).size(18),
        text(format::truncate(&study.description, DESCRIPTION_CHARS)).size(13),
        tag_row(study),
        text(format!("{} · {} documents", study.year, study.documents.len())).size(12),
    ]
    .spacing(8);

    button(container(body).padding(12).width(Length::Fill))
        .on_press(open(study))
        .width(Length::Fill)
        .style(button::text)
        .into()
}

/// Single-line entry for list mode
pub fn list_row(study: &Study) -> Element<'_, Message> {
    let line = row![
        text(&study.title).size(16).width(Length::FillPortion(4)),
        text(study.category.label())
            .size(13)
            .width(Length::FillPortion(2)),
        text(study.year.to_string()).size(13).width(Length::FillPortion(1)),
        text(study.status.label())
            .size(13)
            .color(status_color(study.status))
            .width(Length::FillPortion(1)),
        text(format::date(study.date_modified))
            .size(13)
            .width(Length::FillPortion(1)),
    ]
    .spacing(12);

    button(line)
        .on_press(open(study))
        .width(Length::Fill)
        .padding(10)
        .style(button::text)
        .into()
}
