use data::config::MapColors;
use data::config::theme;
use data::{Band, ColorMapper, ColorScale, InfoText, Interaction, Mark, Shading, ShapeStore};

use iced::widget::canvas::{self, Frame, Path, Stroke};
use iced::{Color, Point, Rectangle, Renderer, Size, Theme, mouse};

const BACKGROUND: Color = Color::from_rgb8(240, 240, 240);
const OUTLINE_WIDTH: f32 = 1.0;

const ZOOM_MAX: f32 = 1.1;

const LEGEND_RIGHT: f32 = 150.0;
const LEGEND_BOTTOM: f32 = 120.0;
const LEGEND_W: f32 = 20.0;
const LEGEND_H: f32 = 100.0;
const SWATCH_H: f32 = 20.0;
const SWATCH_PITCH: f32 = 25.0;
const LABEL_GAP: f32 = 30.0;

const LABEL_SIZE: f32 = 12.0;
const TITLE_SIZE: f32 = 14.0;

#[derive(Debug, Clone)]
pub enum Event {
    /// The pointer moved inside the canvas; carries the state under it.
    Hovered(Option<String>),
    Left,
    Clicked(Option<String>),
}

/// The map canvas. The base layer lives in `base` and is only redrawn
/// after its owner clears it.
pub struct Choropleth<'a> {
    shapes: &'a ShapeStore,
    shading: &'a Shading,
    interaction: &'a Interaction,
    mapper: &'a ColorMapper,
    colors: &'a MapColors,
    info: Option<&'a InfoText>,
    base: &'a canvas::Cache,
}

impl<'a> Choropleth<'a> {
    pub fn new(
        shapes: &'a ShapeStore,
        shading: &'a Shading,
        interaction: &'a Interaction,
        mapper: &'a ColorMapper,
        colors: &'a MapColors,
        base: &'a canvas::Cache,
    ) -> Self {
        Self {
            shapes,
            shading,
            interaction,
            mapper,
            colors,
            info: None,
            base,
        }
    }

    pub fn with_info(mut self, info: Option<&'a InfoText>) -> Self {
        self.info = info;
        self
    }

    fn fill_base(&self, frame: &mut Frame) {
        frame.fill_rectangle(Point::ORIGIN, frame.size(), BACKGROUND);

        for shape in self.shapes.iter() {
            let color = self
                .mapper
                .color_for(self.shading.rate(&shape.name), self.shading.range());

            for polygon in &shape.polygons {
                frame.fill(&outline(polygon.points().iter().copied()), color);
            }
        }

        // outlines go on top of every fill so neighbours don't cover them
        let stroke = Stroke::default()
            .with_color(Color::BLACK)
            .with_width(OUTLINE_WIDTH);
        for shape in self.shapes.iter() {
            for polygon in &shape.polygons {
                frame.stroke(&outline(polygon.points().iter().copied()), stroke);
            }
        }

        self.fill_legend(frame);
    }

    fn fill_highlights(&self, frame: &mut Frame) {
        for highlight in self.interaction.highlights() {
            let Some(shape) = self.shapes.get(highlight.state) else {
                continue;
            };

            let base = match highlight.mark {
                Mark::Hovered => self.colors.hovered,
                Mark::Clicked => self.colors.clicked,
            };
            let color = theme::mix(base, self.colors.highlight, highlight.intensity);
            let factor = zoom_factor(highlight.intensity);

            for polygon in &shape.polygons {
                frame.fill(&outline(polygon.scaled(factor)), color);
            }
        }
    }

    fn fill_legend(&self, frame: &mut Frame) {
        let size = frame.size();
        let x = size.width - LEGEND_RIGHT;
        let y = size.height - LEGEND_BOTTOM;

        label(
            frame,
            "Consumption",
            Point::new(x + LEGEND_W / 2.0, y - 20.0),
            TITLE_SIZE,
            iced::Alignment::Center,
        );

        match self.mapper.scale() {
            ColorScale::Continuous => {
                for i in 0..LEGEND_H as usize {
                    let t = i as f32 / LEGEND_H;
                    frame.fill_rectangle(
                        Point::new(x, y + i as f32),
                        Size::new(LEGEND_W, 1.0),
                        self.mapper.ramp(1.0 - t),
                    );
                }
                frame.fill_rectangle(
                    Point::new(x, y + LEGEND_H + 5.0),
                    Size::new(LEGEND_W, SWATCH_H),
                    self.mapper.no_data(),
                );

                let left = iced::Alignment::Start;
                label(frame, "High", Point::new(x + LABEL_GAP, y), LABEL_SIZE, left);
                label(frame, "Low", Point::new(x + LABEL_GAP, y + LEGEND_H), LABEL_SIZE, left);
                label(
                    frame,
                    "No data",
                    Point::new(x + LABEL_GAP, y + LEGEND_H + 15.0),
                    LABEL_SIZE,
                    left,
                );
            }
            ColorScale::Discrete => {
                let swatches = Band::DESCENDING
                    .iter()
                    .map(|band| (band.to_string(), self.mapper.band(*band)))
                    .chain(std::iter::once((
                        "No data".to_string(),
                        self.mapper.no_data(),
                    )));

                for (i, (name, color)) in swatches.enumerate() {
                    let top = y + i as f32 * SWATCH_PITCH;
                    frame.fill_rectangle(Point::new(x, top), Size::new(LEGEND_W, SWATCH_H), color);
                    label(
                        frame,
                        &name,
                        Point::new(x + LABEL_GAP, top + SWATCH_H / 2.0),
                        LABEL_SIZE,
                        iced::Alignment::Start,
                    );
                }
            }
        }
    }

    fn fill_info(&self, frame: &mut Frame, info: &InfoText) {
        let size = frame.size();
        let center_x = size.width / 2.0;

        label(
            frame,
            &info.header,
            Point::new(center_x, size.height - 40.0),
            TITLE_SIZE,
            iced::Alignment::Center,
        );
        label(
            frame,
            &info.body,
            Point::new(center_x, size.height - 20.0),
            TITLE_SIZE,
            iced::Alignment::Center,
        );
    }
}

impl canvas::Program<Event> for Choropleth<'_> {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Event>> {
        match event {
            iced::Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                let Some(position) = cursor.position_in(bounds) else {
                    return self
                        .interaction
                        .is_pointer_inside()
                        .then(|| canvas::Action::publish(Event::Left));
                };

                let target = self.shapes.state_at(position);
                if self.interaction.is_pointer_inside() && target == self.interaction.hovered() {
                    return None;
                }
                Some(canvas::Action::publish(Event::Hovered(
                    target.map(str::to_string),
                )))
            }
            iced::Event::Mouse(mouse::Event::CursorLeft) => self
                .interaction
                .is_pointer_inside()
                .then(|| canvas::Action::publish(Event::Left)),
            iced::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let position = cursor.position_in(bounds)?;
                let target = self.shapes.state_at(position).map(str::to_string);

                Some(canvas::Action::publish(Event::Clicked(target)).and_capture())
            }
            _ => None,
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let base = self.base.draw(renderer, bounds.size(), |frame| {
            self.fill_base(frame);
        });

        let mut overlay = Frame::new(renderer, bounds.size());
        self.fill_highlights(&mut overlay);
        if let Some(info) = self.info {
            self.fill_info(&mut overlay, info);
        }

        vec![base, overlay.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        match cursor.position_in(bounds) {
            Some(position) if self.shapes.state_at(position).is_some() => {
                mouse::Interaction::Pointer
            }
            _ => mouse::Interaction::default(),
        }
    }
}

/// Emphasis zoom: `1.0` at rest, `ZOOM_MAX` when fully hovered.
fn zoom_factor(intensity: f32) -> f32 {
    1.0 + (ZOOM_MAX - 1.0) * intensity.clamp(0.0, 1.0)
}

fn outline(mut points: impl Iterator<Item = Point>) -> Path {
    Path::new(|b| {
        if let Some(first) = points.next() {
            b.move_to(first);
            for p in points.by_ref() {
                b.line_to(p);
            }
            b.close();
        }
    })
}

fn label(frame: &mut Frame, content: &str, position: Point, size: f32, align_x: iced::Alignment) {
    frame.fill_text(canvas::Text {
        content: content.to_string(),
        position,
        color: Color::BLACK,
        size: size.into(),
        align_x: align_x.into(),
        align_y: iced::Alignment::Center.into(),
        ..Default::default()
    });
}
