use super::MapError;
use crate::style;
use crate::widget::choropleth::{self, Choropleth};

use data::config::MapColors;
use data::{
    AgeGroup, Atlas, ColorMapper, Drug, InfoText, Interaction, MapConfig, RateResolver, Selection,
    SelectionChange, Shading, ShapeStore, Year,
};

use iced::widget::{canvas, column, container, pick_list, row, text};
use iced::{Alignment, Element, Length, Size, Subscription, window};

#[derive(Debug, Clone)]
pub enum Message {
    SelectionChanged(SelectionChange),
    Canvas(choropleth::Event),
    Frame,
}

pub struct MapScreen {
    shapes: ShapeStore,
    resolver: RateResolver,
    selection: Selection,
    years: Vec<Year>,
    shading: Shading,
    interaction: Interaction,
    info: Option<InfoText>,
    mapper: ColorMapper,
    colors: MapColors,
    canvas_size: Size,
    base: canvas::Cache,
}

impl MapScreen {
    pub fn new(atlas: Atlas, config: &MapConfig) -> Result<Self, MapError> {
        if atlas.shapes.is_empty() {
            return Err(MapError::NoShapes);
        }

        let years = atlas.dataset.years();
        let year = if years.contains(&config.default_year) {
            config.default_year.clone()
        } else {
            let Some(first) = years.first() else {
                return Err(MapError::EmptyDataset);
            };
            log::warn!(
                "Year {} not in the survey, starting at {first}",
                config.default_year
            );
            first.clone()
        };

        let selection = Selection::new(Drug::Alcohol, AgeGroup::Teens, year);
        let mut resolver = RateResolver::new(atlas.dataset);
        let shading = Shading::compute(&mut resolver, &atlas.shapes, &selection);

        Ok(Self {
            shapes: atlas.shapes,
            resolver,
            selection,
            years,
            shading,
            interaction: Interaction::new(config.hover_step.get()),
            info: None,
            mapper: config.color_mapper(),
            colors: config.colors,
            canvas_size: config.canvas.into(),
            base: canvas::Cache::new(),
        })
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::SelectionChanged(change) => self.on_selection_changed(change),
            Message::Canvas(choropleth::Event::Hovered(target)) => {
                self.interaction.pointer_moved(target.as_deref());
            }
            Message::Canvas(choropleth::Event::Left) => self.interaction.pointer_left(),
            Message::Canvas(choropleth::Event::Clicked(target)) => {
                if self.interaction.pressed(target.as_deref()) {
                    self.refresh_info();
                }
            }
            Message::Frame => self.interaction.tick(),
        }
    }

    fn on_selection_changed(&mut self, change: SelectionChange) {
        if !self.selection.apply(change) {
            return;
        }

        self.shading = Shading::compute(&mut self.resolver, &self.shapes, &self.selection);
        self.base.clear();
        self.refresh_info();

        log::debug!(
            "{} cached rates after {} scans",
            self.resolver.cached_len(),
            self.resolver.scan_count()
        );
    }

    fn refresh_info(&mut self) {
        self.info = self
            .interaction
            .clicked()
            .map(|state| InfoText::for_state(&mut self.resolver, state, &self.selection));
    }

    pub fn view(&self) -> Element<'_, Message> {
        let controls = row![
            labeled(
                "Select Drug:",
                pick_list(Drug::ALL, Some(self.selection.drug), |drug| {
                    Message::SelectionChanged(SelectionChange::Drug(drug))
                })
                .text_size(style::CONTROL_TEXT_SIZE),
            ),
            labeled(
                "Select Age Group:",
                pick_list(AgeGroup::ALL, Some(self.selection.age_group), |age| {
                    Message::SelectionChanged(SelectionChange::AgeGroup(age))
                })
                .text_size(style::CONTROL_TEXT_SIZE),
            ),
            labeled(
                "Select Year:",
                pick_list(
                    self.years.as_slice(),
                    Some(self.selection.year.clone()),
                    |year| Message::SelectionChanged(SelectionChange::Year(year)),
                )
                .text_size(style::CONTROL_TEXT_SIZE),
            ),
        ]
        .spacing(24)
        .align_y(Alignment::Center);

        let map: Element<'_, choropleth::Event> = canvas(
            Choropleth::new(
                &self.shapes,
                &self.shading,
                &self.interaction,
                &self.mapper,
                &self.colors,
                &self.base,
            )
            .with_info(self.info.as_ref()),
        )
        .width(Length::Fixed(self.canvas_size.width))
        .height(Length::Fixed(self.canvas_size.height))
        .into();

        column![
            container(controls)
                .padding(8)
                .style(style::controls_bar),
            container(map.map(Message::Canvas)).style(style::map_frame),
        ]
        .spacing(12)
        .padding(12)
        .into()
    }

    /// Frame ticks only while the hover animation is running.
    pub fn subscription(&self) -> Subscription<Message> {
        if self.interaction.is_animating() {
            window::frames().map(|_| Message::Frame)
        } else {
            Subscription::none()
        }
    }
}

fn labeled<'a>(
    label: &'a str,
    control: impl Into<Element<'a, Message>>,
) -> Element<'a, Message> {
    row![text(label).size(style::CONTROL_TEXT_SIZE), control.into()]
        .spacing(8)
        .align_y(Alignment::Center)
        .into()
}
