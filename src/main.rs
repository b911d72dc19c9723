mod logger;
mod screen;
mod style;
mod widget;

use screen::MapError;
use screen::map::{self, MapScreen};

use data::{Atlas, MapConfig, Projector};
use iced::widget::{center, column, container, text};
use iced::{Element, Size, Subscription, Task};

fn main() -> iced::Result {
    if let Err(e) = logger::setup(cfg!(debug_assertions)) {
        eprintln!("Failed to initialize logger: {e}");
    }

    let config = data::config::load();
    let canvas = Size::from(config.canvas);

    iced::application(
        move || DrugMap::boot(config.clone()),
        DrugMap::update,
        DrugMap::view,
    )
    .title(DrugMap::title)
    .subscription(DrugMap::subscription)
    .theme(DrugMap::theme)
    .window_size(Size::new(canvas.width + 26.0, canvas.height + 90.0))
    .run()
}

enum Screen {
    Loading,
    Ready(Box<MapScreen>),
    Failed(MapError),
}

struct DrugMap {
    config: MapConfig,
    screen: Screen,
}

#[derive(Debug, Clone)]
enum Message {
    Loaded(Result<source::Sources, MapError>),
    Map(map::Message),
}

impl DrugMap {
    fn boot(config: MapConfig) -> (Self, Task<Message>) {
        let load = source::load(
            config.sources.dataset.clone(),
            config.sources.boundaries.clone(),
        );

        (
            Self {
                config,
                screen: Screen::Loading,
            },
            Task::perform(load, |result| {
                Message::Loaded(result.map_err(|e| {
                    log::error!("{e}");
                    MapError::Source(e.to_string())
                }))
            }),
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Loaded(Ok(sources)) => {
                let projector = Projector::new(self.config.canvas.into());
                let atlas = Atlas::build(sources, &projector);

                self.screen = match MapScreen::new(atlas, &self.config) {
                    Ok(map) => Screen::Ready(Box::new(map)),
                    Err(e) => {
                        log::error!("{e}");
                        Screen::Failed(e)
                    }
                };
            }
            Message::Loaded(Err(e)) => self.screen = Screen::Failed(e),
            Message::Map(message) => {
                if let Screen::Ready(map) = &mut self.screen {
                    map.update(message);
                }
            }
        }

        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        match &self.screen {
            Screen::Loading => center(text("Loading survey and boundaries...").size(16)).into(),
            Screen::Ready(map) => map.view().map(Message::Map),
            Screen::Failed(e) => center(
                container(
                    column![text("Could not start").size(18), text(e.to_string()).size(14)]
                        .spacing(8),
                )
                .padding(16)
                .style(style::error_panel),
            )
            .into(),
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        match &self.screen {
            Screen::Ready(map) => map.subscription().map(Message::Map),
            _ => Subscription::none(),
        }
    }

    fn title(&self) -> String {
        "Drug Use by State".to_string()
    }

    fn theme(&self) -> iced::Theme {
        self.config.theme.clone().into()
    }
}
