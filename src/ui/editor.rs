/// Detail, edit and create dialogs
use iced::widget::{button, column, container, horizontal_space, image, pick_list, row, text, text_input, Column, Row};
use iced::{Alignment, Element, Length};

use super::thumbnails::Thumbnails;
use crate::state::data::{Category, Product, MISSING_LABEL};
use crate::state::editor::{CreateSession, EditorMode, EditorSession, FormField, FormIssue, ProductForm};
use crate::Message;

const DIALOG_WIDTH: f32 = 600.0;
const LABEL_WIDTH: f32 = 110.0;

/// Detail dialog for the active session, read-only or in edit mode
pub fn detail<'a>(
    product: &'a Product,
    session: &'a EditorSession,
    categories: &'a [Category],
    thumbnails: &Thumbnails,
    gallery_size: f32,
) -> Element<'a, Message> {
    let content = match &session.mode {
        EditorMode::Detail => {
            let gallery = Row::with_children(product.images.iter().map(|url| {
                image(thumbnails.handle(url))
                    .width(Length::Fixed(gallery_size))
                    .height(Length::Fixed(gallery_size))
                    .into()
            }))
            .spacing(8)
            .wrap();

            let description = match product.description_text() {
                "" => MISSING_LABEL,
                description => description,
            };

            column![
                text("Product detail").size(22),
                field_line("ID", product.id.to_string()),
                field_line("Title", product.display_title()),
                field_line("Price", product.display_price()),
                field_line("Description", description),
                field_line("Category", product.category_label()),
                text("Images"),
                gallery,
                row![
                    horizontal_space(),
                    button("Close").style(button::secondary).on_press(Message::CloseDetail),
                    button("Edit").style(button::primary).on_press(Message::EditPressed),
                ]
                .spacing(8),
            ]
            .spacing(12)
        }
        EditorMode::Editing { form, issues, saving } => column![
            text("Edit product").size(22),
            field_line("ID", product.id.to_string()),
            form_fields(form, categories, Message::EditFieldChanged, Message::EditCategorySelected),
            issue_list(issues),
            row![
                horizontal_space(),
                button("Cancel").style(button::secondary).on_press(Message::CancelEdit),
                button(if *saving { "Saving..." } else { "Save" })
                    .style(button::primary)
                    .on_press_maybe((!*saving).then_some(Message::SavePressed)),
            ]
            .spacing(8),
        ]
        .spacing(12),
    };

    dialog(content)
}

/// Create dialog
pub fn create<'a>(session: &'a CreateSession, categories: &'a [Category]) -> Element<'a, Message> {
    let content = column![
        text("New product").size(22),
        form_fields(
            &session.form,
            categories,
            Message::CreateFieldChanged,
            Message::CreateCategorySelected
        ),
        issue_list(&session.issues),
        row![
            horizontal_space(),
            button("Cancel").style(button::secondary).on_press(Message::CloseCreate),
            button(if session.saving { "Creating..." } else { "Create" })
                .style(button::success)
                .on_press_maybe((!session.saving).then_some(Message::CreatePressed)),
        ]
        .spacing(8),
    ]
    .spacing(12);

    dialog(content)
}

fn dialog<'a>(content: Column<'a, Message>) -> Element<'a, Message> {
    container(content)
        .width(Length::Fixed(DIALOG_WIDTH))
        .padding(20)
        .style(container::rounded_box)
        .into()
}

fn field_line<'a>(label: &'a str, value: impl text::IntoFragment<'a>) -> Element<'a, Message> {
    row![text(label).width(Length::Fixed(LABEL_WIDTH)), text(value).width(Length::Fill)]
        .spacing(8)
        .into()
}

fn form_fields<'a>(
    form: &'a ProductForm,
    categories: &'a [Category],
    on_field: fn(FormField, String) -> Message,
    on_category: fn(Category) -> Message,
) -> Element<'a, Message> {
    let input = move |label: &'a str, placeholder: &'a str, value: &'a str, field: FormField| {
        row![
            text(label).width(Length::Fixed(LABEL_WIDTH)),
            text_input(placeholder, value)
                .on_input(move |value| on_field(field, value))
                .padding(6),
        ]
        .spacing(8)
        .align_y(Alignment::Center)
    };

    column![
        input("Title *", "Product title", &form.title, FormField::Title),
        input("Price *", "0.00", &form.price, FormField::Price),
        input("Description", "Optional description", &form.description, FormField::Description),
        row![
            text("Category *").width(Length::Fixed(LABEL_WIDTH)),
            pick_list(categories, form.category.as_ref(), on_category)
                .placeholder("Choose a category...")
                .width(Length::Fill),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
        input("Images", "Comma-separated URLs", &form.images, FormField::Images),
    ]
    .spacing(10)
    .into()
}

fn issue_list<'a>(issues: &[FormIssue]) -> Element<'a, Message> {
    Column::with_children(
        issues
            .iter()
            .map(|issue| text(issue.to_string()).style(text::danger).into()),
    )
    .spacing(4)
    .into()
}
