/// Pagination bar: Previous, one button per page, Next
use iced::widget::{button, text, Row};
use iced::{Element, Theme};

use crate::Message;

/// One control in the pagination bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageControl {
    pub label: String,
    /// Page selected on activation; `None` renders the control disabled
    pub target: Option<usize>,
    pub active: bool,
}

/// Controls for `total_pages` pages with `page` current; empty when there is one page or less
pub fn controls(total_pages: usize, page: usize) -> Vec<PageControl> {
    if total_pages <= 1 {
        return Vec::new();
    }

    let mut controls = Vec::with_capacity(total_pages + 2);
    controls.push(PageControl {
        label: "Previous".to_string(),
        target: (page > 1).then(|| page - 1),
        active: false,
    });
    controls.extend((1..=total_pages).map(|number| PageControl {
        label: number.to_string(),
        target: Some(number),
        active: number == page,
    }));
    controls.push(PageControl {
        label: "Next".to_string(),
        target: (page < total_pages).then(|| page + 1),
        active: false,
    });
    controls
}

pub fn view<'a>(controls: Vec<PageControl>) -> Element<'a, Message> {
    let buttons = controls.into_iter().map(|control| {
        let style: fn(&Theme, button::Status) -> button::Style = if control.active {
            button::primary
        } else {
            button::secondary
        };
        button(text(control.label))
            .padding([4, 10])
            .style(style)
            .on_press_maybe(control.target.map(Message::PageSelected))
            .into()
    });

    Row::with_children(buttons).spacing(4).into()
}
