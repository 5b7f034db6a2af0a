/// Product table: header with sort controls, one row per product
///
/// `rows` decides what each row shows; `view` binds the interaction
/// (click to open, hover for the description tooltip).
use iced::widget::{button, column, container, image, mouse_area, row, scrollable, text, tooltip, Column};
use iced::{Alignment, Element, Length};

use super::thumbnails::Thumbnails;
use crate::state::data::Product;
use crate::state::view::{SortField, ViewState};
use crate::Message;

const ID_WIDTH: f32 = 60.0;
const PRICE_WIDTH: f32 = 100.0;
const CATEGORY_WIDTH: f32 = 160.0;

/// What one table row displays
#[derive(Debug, Clone, PartialEq)]
pub struct RowModel {
    pub id: i64,
    pub title: String,
    pub price: String,
    pub category: String,
    pub thumbnail_url: String,
    /// Tooltip text; `None` when the product has no description
    pub description: Option<String>,
}

pub fn rows(window: &[Product], placeholder_url: &str) -> Vec<RowModel> {
    window
        .iter()
        .map(|product| RowModel {
            id: product.id,
            title: product.display_title().to_string(),
            price: product.display_price(),
            category: product.category_label(),
            thumbnail_url: product.thumbnail_url(placeholder_url).to_string(),
            description: Some(product.description_text())
                .filter(|description| !description.trim().is_empty())
                .map(str::to_string),
        })
        .collect()
}

pub fn view<'a>(
    view_state: &ViewState,
    thumbnails: &Thumbnails,
    placeholder_url: &str,
    thumbnail_size: f32,
) -> Element<'a, Message> {
    let models = rows(view_state.page_window(), placeholder_url);

    let body: Element<'a, Message> = if models.is_empty() {
        container(text("No data"))
            .width(Length::Fill)
            .padding(20)
            .center_x(Length::Fill)
            .into()
    } else {
        Column::with_children(
            models
                .into_iter()
                .map(|model| table_row(model, thumbnails, thumbnail_size)),
        )
        .spacing(2)
        .into()
    };

    column![header(view_state), scrollable(body).height(Length::Fill)]
        .spacing(6)
        .into()
}

fn header<'a>(view_state: &ViewState) -> Element<'a, Message> {
    let sortable = |label: &'a str, field: SortField| {
        row![
            text(label),
            button(text(view_state.sort_indicator(field)))
                .style(button::text)
                .padding([0, 6])
                .on_press(Message::SortPressed(field)),
        ]
        .align_y(Alignment::Center)
    };

    container(
        row![
            text("ID").width(Length::Fixed(ID_WIDTH)),
            sortable("Title", SortField::Title).width(Length::Fill),
            sortable("Price", SortField::Price).width(Length::Fixed(PRICE_WIDTH)),
            text("Category").width(Length::Fixed(CATEGORY_WIDTH)),
            text("Image"),
        ]
        .spacing(12)
        .align_y(Alignment::Center),
    )
    .padding(6)
    .style(container::rounded_box)
    .into()
}

fn table_row<'a>(model: RowModel, thumbnails: &Thumbnails, thumbnail_size: f32) -> Element<'a, Message> {
    let line = row![
        text(model.id.to_string()).width(Length::Fixed(ID_WIDTH)),
        text(model.title).width(Length::Fill),
        text(model.price).width(Length::Fixed(PRICE_WIDTH)),
        container(
            container(text(model.category).size(13))
                .padding([2, 8])
                .style(container::rounded_box)
        )
        .width(Length::Fixed(CATEGORY_WIDTH)),
        image(thumbnails.handle(&model.thumbnail_url))
            .width(Length::Fixed(thumbnail_size))
            .height(Length::Fixed(thumbnail_size)),
    ]
    .spacing(12)
    .padding(6)
    .align_y(Alignment::Center);

    let clickable = mouse_area(line).on_press(Message::OpenDetail(model.id));

    match model.description {
        Some(description) => tooltip(
            clickable,
            container(text(description).size(13))
                .padding(10)
                .max_width(320)
                .style(container::rounded_box),
            tooltip::Position::FollowCursor,
        )
        .into(),
        None => clickable.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::CategoryField;

    fn product(id: i64) -> Product {
        Product {
            id,
            title: format!("Product {}", id),
            price: 4.5,
            description: Some("Soft cotton".into()),
            category: Some(CategoryField::Named { id: Some(1), name: Some("Clothes".into()) }),
            category_id: None,
            images: vec!["https://a/1.png".into()],
        }
    }

    #[test]
    fn test_row_model() {
        let models = rows(&[product(1)], "placeholder");
        assert_eq!(
            models,
            vec![RowModel {
                id: 1,
                title: "Product 1".into(),
                price: "$4.5".into(),
                category: "Clothes".into(),
                thumbnail_url: "https://a/1.png".into(),
                description: Some("Soft cotton".into()),
            }]
        );
    }

    #[test]
    fn test_row_fallbacks() {
        let bare = Product {
            id: 2,
            title: String::new(),
            price: 0.0,
            description: Some("   ".into()),
            category: None,
            category_id: None,
            images: Vec::new(),
        };
        let model = rows(&[bare], "placeholder").remove(0);
        assert_eq!(model.title, "N/A");
        assert_eq!(model.price, "$0");
        assert_eq!(model.category, "N/A");
        assert_eq!(model.thumbnail_url, "placeholder");
        assert_eq!(model.description, None);
    }

    #[test]
    fn test_rows_follow_window_order() {
        let models = rows(&[product(3), product(1), product(2)], "p");
        let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}
