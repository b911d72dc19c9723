use iced::widget::container;
use iced::{Border, Theme, theme};

pub const CONTROL_TEXT_SIZE: f32 = 14.0;

fn styled(pair: theme::palette::Pair) -> container::Style {
    container::Style {
        background: Some(pair.color.into()),
        text_color: pair.text.into(),
        border: Border {
            width: 1.0,
            color: pair.color,
            radius: 4.0.into(),
        },
        ..Default::default()
    }
}

/// Strip holding the drug, age group and year dropdowns.
pub fn controls_bar(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();

    container::Style {
        border: Border {
            width: 1.0,
            color: palette.background.strong.color,
            radius: 4.0.into(),
        },
        ..styled(palette.background.weak)
    }
}

pub fn error_panel(theme: &Theme) -> container::Style {
    styled(theme.extended_palette().danger.weak)
}

pub fn map_frame(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();

    container::Style {
        border: Border {
            width: 1.0,
            color: palette.background.strong.color,
            radius: 0.0.into(),
        },
        ..Default::default()
    }
}
