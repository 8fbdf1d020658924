use iced::widget::{button, container};
use iced::{Background, Border, Color};

/// Colors and sizes for the widget.
pub struct Palette {
    /// Translucent pink behind the whole widget.
    pub window_bg: Color,
    pub window_radius: f32,
    pub name: Color,
    pub name_size: f32,
    pub placeholder: Color,
    pub button_bg: Color,
    /// Button background for the brief flash after a pick.
    pub button_flash: Color,
    pub button_text: Color,
    pub button_text_size: f32,
    pub button_radius: f32,
    pub button_width: f32,
    pub button_height: f32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            window_bg: Color::from_rgba8(252, 220, 249, 0.25),
            window_radius: 10.0,
            name: Color::from_rgb8(0x10, 0x00, 0x06),
            name_size: 30.0,
            placeholder: Color::from_rgba8(0x10, 0x00, 0x06, 0.45),
            button_bg: Color::from_rgb8(0xff, 0xa6, 0xe1),
            button_flash: Color::from_rgb8(0xff, 0x6b, 0x6b),
            button_text: Color::from_rgb8(0xe9, 0x56, 0xa5),
            button_text_size: 20.0,
            button_radius: 5.0,
            button_width: 60.0,
            button_height: 30.0,
        }
    }
}

impl Palette {
    pub fn window_style(&self) -> impl Fn(&iced::Theme) -> container::Style {
        let color = self.window_bg;
        let radius = self.window_radius;
        move |_theme: &iced::Theme| container::Style {
            background: Some(Background::Color(color)),
            border: Border {
                radius: radius.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn button_style(
        &self,
        flashing: bool,
    ) -> impl Fn(&iced::Theme, button::Status) -> button::Style {
        let base = if flashing {
            self.button_flash
        } else {
            self.button_bg
        };
        let text_color = self.button_text;
        let radius = self.button_radius;
        move |_theme: &iced::Theme, status: button::Status| {
            let bg = match status {
                button::Status::Hovered => mix(base, Color::WHITE, 0.15),
                button::Status::Pressed => mix(base, Color::BLACK, 0.1),
                button::Status::Active | button::Status::Disabled => base,
            };
            button::Style {
                background: Some(Background::Color(bg)),
                text_color,
                border: Border {
                    radius: radius.into(),
                    ..Default::default()
                },
                ..Default::default()
            }
        }
    }
}

/// Linear blend of `a` toward `b` by `t` (0..=1), keeping `a`'s alpha.
fn mix(a: Color, b: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    Color {
        r: a.r + (b.r - a.r) * t,
        g: a.g + (b.g - a.g) * t,
        b: a.b + (b.b - a.b) * t,
        a: a.a,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mix_endpoints() {
        let a = Color::from_rgb(0.2, 0.4, 0.6);
        assert_eq!(mix(a, Color::WHITE, 0.0), a);
        let full = mix(a, Color::WHITE, 1.0);
        assert!((full.r - 1.0).abs() < f32::EPSILON);
        assert!((full.b - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn button_style_flash_changes_background() {
        let palette = Palette::default();
        let theme = iced::Theme::Light;
        let normal = palette.button_style(false)(&theme, button::Status::Active);
        let flash = palette.button_style(true)(&theme, button::Status::Active);
        assert_eq!(normal.background, Some(Background::Color(palette.button_bg)));
        assert_eq!(flash.background, Some(Background::Color(palette.button_flash)));
        assert_eq!(flash.text_color, palette.button_text);
    }
}
