//! Presentation layer
//!
//! - `pages` - one view function per route
//! - `study_card` - grid and list entries for a study
//! - `radar` - canvas program drawing the trend radar

pub mod pages;
pub mod radar;
pub mod study_card;

use iced::widget::{button, column, container, text};
use iced::{Color, Element, Length};

use crate::state::data::{Quadrant, Ring, StudyStatus};
use crate::Message;

pub fn ring_color(ring: Ring) -> Color {
    match ring {
        Ring::Adopt => Color::from_rgb8(0x10, 0xb9, 0x81),
        Ring::Trial => Color::from_rgb8(0x3b, 0x82, 0xf6),
        Ring::Assess => Color::from_rgb8(0xf5, 0x9e, 0x0b),
        Ring::Hold => Color::from_rgb8(0x6b, 0x72, 0x80),
    }
}

pub fn quadrant_color(quadrant: Quadrant) -> Color {
    match quadrant {
        Quadrant::ConsumerBehavior => Color::from_rgb8(0xbb, 0x0a, 0x30),
        Quadrant::Technology => Color::from_rgb8(0x3b, 0x82, 0xf6),
        Quadrant::MarketDynamics => Color::from_rgb8(0x10, 0xb9, 0x81),
        Quadrant::ExperienceDesign => Color::from_rgb8(0xf5, 0x9e, 0x0b),
    }
}

pub fn status_color(status: StudyStatus) -> Color {
    match status {
        StudyStatus::Completed => Color::from_rgb8(0x10, 0xb9, 0x81),
        StudyStatus::InProgress => Color::from_rgb8(0x3b, 0x82, 0xf6),
        StudyStatus::Archived => Color::from_rgb8(0x6b, 0x72, 0x80),
        StudyStatus::Draft => Color::from_rgb8(0xf5, 0x9e, 0x0b),
    }
}

/// A toggle button that looks pressed while `active`
pub fn chip<'a>(label: impl ToString, active: bool, on_press: Message) -> Element<'a, Message> {
    button(text(label.to_string()).size(13))
        .on_press(on_press)
        .padding([4, 10])
        .style(if active {
            button::primary
        } else {
            button::secondary
        })
        .into()
}

pub fn section<'a>(title: &'a str, content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    let content: Element<'a, Message> = content.into();
    column![text(title).size(20), content].spacing(12).into()
}

/// Headline number with a caption
pub fn stat_tile<'a>(label: &'a str, value: impl ToString) -> Element<'a, Message> {
    container(
        column![text(value.to_string()).size(32), text(label).size(14)]
            .spacing(4),
    )
    .padding(16)
    .width(Length::Fill)
    .style(container::rounded_box)
    .into()
}

/// Shown instead of a list that came out empty
pub fn empty_state<'a>(title: &'a str, hint: &'a str) -> Element<'a, Message> {
    container(column![text(title).size(20), text(hint).size(14)].spacing(8))
        .padding(40)
        .width(Length::Fill)
        .center_x(Length::Fill)
        .into()
}
