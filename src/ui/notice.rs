/// Blocking notices shown after create/update/export
use iced::widget::{button, column, container, row, horizontal_space, text};
use iced::{Element, Length, Theme};

use crate::Message;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, message: message.into() }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Failure, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, message: message.into() }
    }
}

pub fn view(notice: &Notice) -> Element<'_, Message> {
    let (heading, style): (&str, fn(&Theme) -> text::Style) = match notice.kind {
        NoticeKind::Success => ("Done", text::success),
        NoticeKind::Failure => ("Something went wrong", text::danger),
        NoticeKind::Info => ("Notice", text::primary),
    };

    container(
        column![
            text(heading).size(20).style(style),
            text(&notice.message),
            row![horizontal_space(), button("OK").on_press(Message::DismissNotice)],
        ]
        .spacing(16),
    )
    .width(Length::Fixed(380.0))
    .padding(20)
    .style(container::rounded_box)
    .into()
}
