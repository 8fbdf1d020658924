use std::time::Instant;

use iced::widget::text::Shaping;
use iced::widget::{button, column, container, mouse_area, text};
use iced::{Element, Length, mouse};

use crate::app::{Message, RollCall};
use crate::util::truncate_str;

impl RollCall {
    pub(crate) fn view_widget(&self) -> Element<'_, Message> {
        let palette = &self.palette;
        let shaped = Shaping::Advanced;

        // Name (or placeholder once the widget has tucked itself away)
        let label = match self.session.displayed() {
            Some(name) => text(truncate_str(name, self.max_name_chars))
                .size(palette.name_size)
                .color(palette.name)
                .shaping(shaped),
            None => text(self.placeholder.as_str())
                .size(palette.name_size)
                .color(palette.placeholder)
                .shaping(shaped),
        };

        let flashing = self.session.is_flashing(Instant::now());
        let pick = button(
            text(self.button_label.as_str())
                .size(palette.button_text_size)
                .shaping(shaped)
                .center(),
        )
        .width(palette.button_width)
        .height(palette.button_height)
        .padding(0)
        .style(palette.button_style(flashing))
        .on_press(Message::Pick);

        let content = column![
            container(label).center(Length::Fill),
            container(pick).center_x(Length::Fill),
        ]
        .spacing(4)
        .padding(8);

        let body = container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(palette.window_style());

        // Presses on the button are captured by it and never start a drag.
        let grab = if self.session.is_dragging() {
            mouse::Interaction::Grabbing
        } else {
            mouse::Interaction::Grab
        };
        mouse_area(body)
            .on_press(Message::DragStart)
            .on_release(Message::DragEnd)
            .interaction(grab)
            .into()
    }
}
