use std::time::Instant;

use iced::{Color, Element, Event, Point, Subscription, Task, event, mouse};
use iced_layershell::build_pattern::daemon;
use iced_layershell::settings::{LayerShellSettings, StartMode};
use iced_layershell::to_layer_message;

use crate::config::Config;
use crate::motion::{Geometry, Position, Size};
use crate::picker::Picker;
use crate::roster::NameList;
use crate::session::{Phase, SessionState, SlideStep};
use crate::surface::{self, margin_for, widget_settings};
use crate::theme::Palette;
use crate::ticks::{self, Ticker};

pub(crate) type IcedId = iced_layershell::reexport::IcedId;

// --- Widget State ---

pub(crate) struct RollCall {
    pub(crate) session: SessionState,
    pub(crate) surface_id: Option<IcedId>,
    pub(crate) palette: Palette,
    pub(crate) placeholder: String,
    pub(crate) button_label: String,
    pub(crate) max_name_chars: usize,
    idle_check_ms: u64,
    slide_interval_ms: u64,
    /// Last cursor position reported inside the surface.
    cursor: Option<Point>,
}

#[to_layer_message(multi)]
#[derive(Debug, Clone)]
pub(crate) enum Message {
    Pick,
    DragStart,
    CursorMoved(Point),
    DragEnd,
    /// The surface redrew; any pending margin change has been committed.
    Frame,
    IdleCheck,
    SlideTick,
}

/// Resolve the screen size: explicit config wins, otherwise ask the compositor.
fn screen_size(config: &Config, output: Option<&str>) -> Size {
    match (config.screen_width, config.screen_height) {
        (Some(w), Some(h)) => Size {
            width: w as i32,
            height: h as i32,
        },
        (w, h) => {
            let probed = surface::probe_screen(output);
            Size {
                width: w.map_or(probed.width, |w| w as i32),
                height: h.map_or(probed.height, |h| h as i32),
            }
        }
    }
}

pub(crate) fn run(names: NameList, config: Config) -> Result<(), iced_layershell::Error> {
    log::info!(
        "v{} ({}) starting with {} names",
        env!("ROLL_CALL_VERSION"),
        env!("ROLL_CALL_COMMIT"),
        names.len()
    );

    let output = config.target_output();
    if let Some(ref name) = output {
        log::info!("target output: {name}");
    }
    let screen = screen_size(&config, output.as_deref());

    let settings = LayerShellSettings {
        start_mode: StartMode::Background,
        ..Default::default()
    };

    daemon(
        move || RollCall::new(names.clone(), &config, screen, output.clone()),
        RollCall::namespace,
        RollCall::update,
        RollCall::view,
    )
    .style(RollCall::style)
    .subscription(RollCall::subscription)
    .layer_settings(settings)
    .run()
}

impl RollCall {
    fn new(
        names: NameList,
        config: &Config,
        screen: Size,
        output: Option<String>,
    ) -> (Self, Task<Message>) {
        let window = Size {
            width: config.window_width as i32,
            height: config.window_height as i32,
        };
        let geometry = Geometry {
            screen,
            window,
            hidden_y: config.hidden_offset,
        };
        let session = SessionState::new(
            Picker::new(names),
            geometry,
            geometry.home(config.lift),
            config.timing(),
            Instant::now(),
        );
        let start = session.position();
        let (id, task) =
            Message::layershell_open(widget_settings(window, start, output.as_deref()));
        log::info!("booting -> Idle at ({}, {}) (surface {id})", start.x, start.y);
        (
            Self {
                session,
                surface_id: Some(id),
                palette: Palette::default(),
                placeholder: config.placeholder.clone(),
                button_label: config.button_label.clone(),
                max_name_chars: config.max_name_chars,
                idle_check_ms: config.idle_check_ms,
                slide_interval_ms: config.slide_interval_ms,
                cursor: None,
            },
            task,
        )
    }

    fn namespace() -> String {
        String::from("roll-call")
    }

    fn move_task(&self, pos: Position) -> Task<Message> {
        match self.surface_id {
            Some(id) => Task::done(Message::MarginChange {
                id,
                margin: margin_for(pos),
            }),
            None => Task::none(),
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let now = Instant::now();
        match message {
            Message::Pick => {
                let name = self.session.pick(now);
                log::info!("picked {name}");
                Task::none()
            }
            Message::DragStart => {
                self.session.press(now, self.cursor.map(|p| (p.x, p.y)));
                Task::none()
            }
            Message::CursorMoved(point) => {
                self.cursor = Some(point);
                match self.session.drag(now, (point.x, point.y)) {
                    Some(pos) => self.move_task(pos),
                    None => Task::none(),
                }
            }
            Message::DragEnd => {
                if self.session.is_dragging() {
                    let pos = self.session.position();
                    log::debug!("dropped at ({}, {})", pos.x, pos.y);
                }
                self.session.release();
                Task::none()
            }
            Message::Frame => {
                self.session.settled();
                Task::none()
            }
            Message::IdleCheck => {
                self.session.idle_tick(now);
                Task::none()
            }
            Message::SlideTick => match self.session.slide_tick(now) {
                Some(SlideStep::Moving(pos) | SlideStep::Arrived(pos)) => self.move_task(pos),
                None => Task::none(),
            },
            _ => Task::none(),
        }
    }

    fn view(&self, _window_id: IcedId) -> Element<'_, Message> {
        self.view_widget()
    }

    fn subscription(state: &Self) -> Subscription<Message> {
        let mut subs = vec![
            Subscription::run_with(Ticker::Idle(state.idle_check_ms), ticks::tick_stream),
            event::listen_with(pointer_event),
        ];

        if state.session.is_dragging() {
            subs.push(iced::window::frames().map(|_| Message::Frame));
        }

        if state.session.phase() == Phase::Sliding {
            subs.push(Subscription::run_with(
                Ticker::Slide(state.slide_interval_ms),
                ticks::tick_stream,
            ));
        }

        Subscription::batch(subs)
    }

    fn style(&self, _theme: &iced::Theme) -> iced::theme::Style {
        iced::theme::Style {
            background_color: Color::TRANSPARENT,
            text_color: self.palette.name,
        }
    }
}

/// Pointer motion and left-button release, whether or not a widget captured
/// them; the drag must end even if the release lands on the button.
fn pointer_event(event: Event, _status: event::Status, _id: iced::window::Id) -> Option<Message> {
    match event {
        Event::Mouse(mouse::Event::CursorMoved { position }) => Some(Message::CursorMoved(position)),
        Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => Some(Message::DragEnd),
        _ => None,
    }
}
