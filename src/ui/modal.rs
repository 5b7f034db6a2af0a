/// Overlay dialog helper
///
/// Draws `content` centered over a dimmed copy of `base`. Clicks on the
/// backdrop emit `on_blur`; clicks inside the dialog are swallowed.
use iced::widget::{center, container, mouse_area, opaque, stack};
use iced::{Color, Element};

pub fn modal<'a, Message>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_blur: Message,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    stack![
        base.into(),
        opaque(
            mouse_area(center(opaque(content)).style(|_theme| {
                container::Style {
                    background: Some(
                        Color {
                            a: 0.7,
                            ..Color::BLACK
                        }
                        .into(),
                    ),
                    ..container::Style::default()
                }
            }))
            .on_press(on_blur)
        )
    ]
    .into()
}
