//! Trend radar canvas
//! Draws rings, quadrant axes and placed trend items, and turns clicks
//! into selection messages.
use iced::mouse;
use iced::widget::canvas::{self, Path, Stroke, Text};
use iced::{Color, Point, Rectangle, Size};

use crate::engine::radar::{
    hit_test, quadrant_angle, ring_radius, RadarFilter, RadarPoint, RADAR_EXTENT,
};
use crate::state::data::{Momentum, Quadrant, Ring};
use crate::Message;

use super::{quadrant_color, ring_color};

/// Click radius around a point, in radar units
const HIT_TOLERANCE: f32 = 5.0;

const POINT_RADIUS: f32 = 7.0;
const SELECTED_POINT_RADIUS: f32 = 10.0;

pub struct RadarChart<'a> {
    pub points: Vec<RadarPoint<'a>>,
    pub filter: RadarFilter,
    pub selected: Option<&'a str>,
}

/// Maps radar units onto the canvas bounds
struct Projection {
    center: Point,
    scale: f32,
}

impl Projection {
    fn new(size: Size) -> Self {
        Self {
            center: Point::new(size.width / 2.0, size.height / 2.0),
            scale: size.width.min(size.height) / (2.0 * RADAR_EXTENT),
        }
    }

    fn to_screen(&self, x: f32, y: f32) -> Point {
        Point::new(self.center.x + x * self.scale, self.center.y + y * self.scale)
    }

    fn to_radar(&self, point: Point) -> (f32, f32) {
        (
            (point.x - self.center.x) / self.scale,
            (point.y - self.center.y) / self.scale,
        )
    }
}

impl<'a> RadarChart<'a> {
    fn item_under(&self, bounds: Rectangle, cursor: mouse::Cursor) -> Option<&'a str> {
        let position = cursor.position_in(bounds)?;
        let (x, y) = Projection::new(bounds.size()).to_radar(position);
        hit_test(&self.points, x, y, HIT_TOLERANCE).map(|item| item.id.as_str())
    }
}

impl<'a> canvas::Program<Message> for RadarChart<'a> {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (canvas::event::Status, Option<Message>) {
        if let canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) = event {
            if let Some(id) = self.item_under(bounds, cursor) {
                return (
                    canvas::event::Status::Captured,
                    Some(Message::SelectTrend(id.to_string())),
                );
            }
        }

        (canvas::event::Status::Ignored, None)
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let projection = Projection::new(bounds.size());

        // Rings, outermost first so inner fills stay visible
        for ring in Ring::ALL.iter().rev().copied() {
            let emphasised = self.filter.ring.map_or(true, |active| active == ring);
            let circle = Path::circle(projection.center, ring_radius(ring) * projection.scale);
            let color = ring_color(ring);

            frame.fill(
                &circle,
                Color {
                    a: if self.filter.ring == Some(ring) { 0.05 } else { 0.02 },
                    ..color
                },
            );
            frame.stroke(
                &circle,
                Stroke::default()
                    .with_color(Color {
                        a: if emphasised { 0.3 } else { 0.1 },
                        ..color
                    })
                    .with_width(1.0),
            );
        }

        // Quadrant axes
        let outer = ring_radius(Ring::Hold);
        for quadrant in Quadrant::ALL {
            let emphasised = self.filter.quadrant.map_or(true, |active| active == quadrant);
            let radians = quadrant_angle(quadrant).to_radians();
            let end = projection.to_screen(outer * radians.cos(), outer * radians.sin());

            frame.stroke(
                &Path::line(projection.center, end),
                Stroke::default()
                    .with_color(Color {
                        a: if emphasised { 0.5 } else { 0.2 },
                        ..quadrant_color(quadrant)
                    })
                    .with_width(1.0),
            );
            frame.fill_text(Text {
                content: quadrant.label().to_string(),
                position: projection.to_screen(
                    (outer + 8.0) * radians.cos() - 20.0,
                    (outer + 8.0) * radians.sin(),
                ),
                color: quadrant_color(quadrant),
                size: 12.0.into(),
                ..Text::default()
            });
        }

        // Center dot
        frame.fill(
            &Path::circle(projection.center, 4.0),
            Color::from_rgb8(0xbb, 0x0a, 0x30),
        );

        for point in &self.points {
            let selected = self.selected == Some(point.item.id.as_str());
            let position = projection.to_screen(point.x, point.y);
            let dot = Path::circle(
                position,
                if selected {
                    SELECTED_POINT_RADIUS
                } else {
                    POINT_RADIUS
                },
            );

            frame.fill(
                &dot,
                Color {
                    a: if selected { 1.0 } else { 0.8 },
                    ..ring_color(point.item.ring)
                },
            );
            if selected {
                frame.stroke(&dot, Stroke::default().with_color(Color::WHITE).with_width(2.0));

                // Orbit of the selected item, with its name placed outward along the angle
                frame.stroke(
                    &Path::circle(projection.center, point.radius * projection.scale),
                    Stroke::default()
                        .with_color(Color {
                            a: 0.4,
                            ..ring_color(point.item.ring)
                        })
                        .with_width(1.0),
                );
                let radians = point.angle.to_radians();
                let label_radius = point.radius + 6.0;
                frame.fill_text(Text {
                    content: point.item.name.clone(),
                    position: projection.to_screen(
                        label_radius * radians.cos(),
                        label_radius * radians.sin(),
                    ),
                    color: Color::WHITE,
                    size: 13.0.into(),
                    ..Text::default()
                });
            }

            // Rising items get a small arrow above the dot
            if point.item.momentum == Momentum::Rising {
                let arrow = Path::new(|builder| {
                    builder.move_to(Point::new(position.x, position.y - 14.0));
                    builder.line_to(Point::new(position.x - 4.0, position.y - 8.0));
                    builder.line_to(Point::new(position.x + 4.0, position.y - 8.0));
                    builder.close();
                });
                frame.fill(&arrow, ring_color(Ring::Adopt));
            }
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if self.item_under(bounds, cursor).is_some() {
            mouse::Interaction::Pointer
        } else {
            mouse::Interaction::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_round_trip() {
        let projection = Projection::new(Size::new(500.0, 400.0));
        assert_eq!(projection.scale, 2.0);

        let screen = projection.to_screen(25.0, -10.0);
        assert_eq!(screen, Point::new(300.0, 180.0));
        assert_eq!(projection.to_radar(screen), (25.0, -10.0));
    }
}
