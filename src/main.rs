use iced::widget::{button, column, pick_list, row, text, text_input};
use iced::{Alignment, Element, Length, Size, Task, Theme};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod catalog;
mod config;
mod error;
mod export;
mod state;
mod ui;

use catalog::images;
use catalog::loader::{self, CatalogSnapshot};
use catalog::CatalogClient;
use config::Config;
use error::ApiError;
use state::data::{Category, Product};
use state::editor::{begin_submit, CreateSession, EditorMode, EditorSession, FormField};
use state::view::{PageSize, SortField, ViewState, PAGE_SIZE_OPTIONS};
use ui::{Notice, Thumbnails};

/// Gallery images are drawn this much larger than table thumbnails
const GALLERY_SCALE: f32 = 2.5;

/// Main application state
struct CatalogAdmin {
    config: Config,
    client: CatalogClient,
    /// Records, search, sort and pagination
    view: ViewState,
    /// Categories for the selectors; empty if they failed to load
    categories: Vec<Category>,
    /// The single open detail/edit dialog
    editor: Option<EditorSession>,
    create: Option<CreateSession>,
    notice: Option<Notice>,
    thumbnails: Thumbnails,
    /// Status line shown under the table
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// Startup load sequence finished
    CatalogLoaded(CatalogSnapshot),
    SearchChanged(String),
    PageSizeSelected(PageSize),
    SortPressed(SortField),
    PageSelected(usize),
    /// A table row was clicked
    OpenDetail(i64),
    CloseDetail,
    EditPressed,
    CancelEdit,
    EditFieldChanged(FormField, String),
    EditCategorySelected(Category),
    SavePressed,
    ProductUpdated(i64, Result<Product, ApiError>),
    OpenCreate,
    CloseCreate,
    CreateFieldChanged(FormField, String),
    CreateCategorySelected(Category),
    CreatePressed,
    ProductCreated(Result<Product, ApiError>),
    ExportPressed,
    ExportFinished(Result<Option<PathBuf>, String>),
    ThumbnailLoaded(String, Result<images::Thumbnail, String>),
    DismissNotice,
}

impl CatalogAdmin {
    /// Create a new instance of the application and start loading the catalog
    fn new(config: Config) -> (Self, Task<Message>) {
        let client = CatalogClient::new(&config);
        let gallery_size = (config.thumbnail_size as f32 * GALLERY_SCALE) as u32;

        tracing::info!(api = %config.api_base_url, "🛒 Catalog Admin starting");

        let load = Task::perform(
            loader::load_catalog(client.clone(), config.fallback_candidates()),
            Message::CatalogLoaded,
        );

        let app = CatalogAdmin {
            view: ViewState::new(config.page_size),
            thumbnails: Thumbnails::new(gallery_size),
            client,
            config,
            categories: Vec::new(),
            editor: None,
            create: None,
            notice: None,
            status: "Loading catalog...".to_string(),
        };

        (app, load)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::CatalogLoaded(snapshot) => {
                self.categories = snapshot.categories;
                self.view.load(snapshot.products);
                self.status = format!(
                    "{} products loaded from {}.",
                    self.view.all().len(),
                    snapshot.source
                );
                self.request_visible_images()
            }
            Message::SearchChanged(query) => {
                self.view.set_query(query);
                self.request_visible_images()
            }
            Message::PageSizeSelected(page_size) => {
                self.view.set_page_size(page_size);
                self.request_visible_images()
            }
            Message::SortPressed(field) => {
                self.view.toggle_sort(field);
                self.request_visible_images()
            }
            Message::PageSelected(page) => {
                if self.view.select_page(page) {
                    self.request_visible_images()
                } else {
                    Task::none()
                }
            }
            Message::OpenDetail(id) => {
                if self.view.find(id).is_none() {
                    return Task::none();
                }
                self.editor = Some(EditorSession::open(id));
                self.request_visible_images()
            }
            Message::CloseDetail => {
                self.editor = None;
                Task::none()
            }
            Message::EditPressed => {
                if let Some(session) = &mut self.editor {
                    if let Some(product) = self.view.find(session.product_id) {
                        session.begin_edit(product, &self.categories);
                    }
                }
                Task::none()
            }
            Message::CancelEdit => {
                if let Some(session) = &mut self.editor {
                    session.cancel_edit();
                }
                Task::none()
            }
            Message::EditFieldChanged(field, value) => {
                if let Some(form) = self.editor.as_mut().and_then(EditorSession::form_mut) {
                    form.set_field(field, value);
                }
                Task::none()
            }
            Message::EditCategorySelected(category) => {
                if let Some(form) = self.editor.as_mut().and_then(EditorSession::form_mut) {
                    form.category = Some(category);
                }
                Task::none()
            }
            Message::SavePressed => {
                let Some(EditorSession {
                    product_id,
                    mode: EditorMode::Editing { form, issues, saving },
                }) = &mut self.editor
                else {
                    return Task::none();
                };

                let Some(payload) = begin_submit(form, issues, saving) else {
                    return Task::none();
                };

                let id = *product_id;
                let client = self.client.clone();
                tracing::info!(id, "saving product");
                Task::perform(
                    async move { client.update_product(id, &payload).await },
                    move |result| Message::ProductUpdated(id, result),
                )
            }
            Message::ProductUpdated(id, Ok(product)) => {
                tracing::info!(id, "✅ product updated");
                self.view.apply_update(id, product);
                if self.editor.as_ref().is_some_and(|session| session.product_id == id) {
                    self.editor = None;
                }
                self.notice = Some(Notice::success("Product updated."));
                self.request_visible_images()
            }
            Message::ProductUpdated(id, Err(err)) => {
                tracing::error!(id, error = %err, "failed to update product");
                if let Some(EditorSession { mode: EditorMode::Editing { saving, .. }, .. }) = &mut self.editor {
                    *saving = false;
                }
                self.notice = Some(Notice::failure(format!("Could not update the product: {}", err)));
                Task::none()
            }
            Message::OpenCreate => {
                self.create = Some(CreateSession::default());
                Task::none()
            }
            Message::CloseCreate => {
                self.create = None;
                Task::none()
            }
            Message::CreateFieldChanged(field, value) => {
                if let Some(session) = &mut self.create {
                    session.form.set_field(field, value);
                }
                Task::none()
            }
            Message::CreateCategorySelected(category) => {
                if let Some(session) = &mut self.create {
                    session.form.category = Some(category);
                }
                Task::none()
            }
            Message::CreatePressed => {
                let Some(session) = &mut self.create else {
                    return Task::none();
                };
                let Some(payload) = begin_submit(&session.form, &mut session.issues, &mut session.saving)
                else {
                    return Task::none();
                };

                let client = self.client.clone();
                tracing::info!(title = %payload.title, "creating product");
                Task::perform(
                    async move { client.create_product(&payload).await },
                    Message::ProductCreated,
                )
            }
            Message::ProductCreated(Ok(product)) => {
                tracing::info!(id = product.id, "✅ product created");
                self.view.append_created(product);
                self.create = None;
                self.notice = Some(Notice::success("Product created."));
                self.request_visible_images()
            }
            Message::ProductCreated(Err(err)) => {
                tracing::error!(error = %err, "failed to create product");
                if let Some(session) = &mut self.create {
                    session.saving = false;
                }
                self.notice = Some(Notice::failure(format!("Could not create the product: {}", err)));
                Task::none()
            }
            Message::ExportPressed => {
                if self.view.filtered().is_empty() {
                    self.notice = Some(Notice::info("There is no data to export."));
                    return Task::none();
                }
                let products = self.view.filtered().to_vec();
                Task::perform(export::save_csv(products), |result| {
                    Message::ExportFinished(result.map_err(|e| e.to_string()))
                })
            }
            Message::ExportFinished(Ok(Some(path))) => {
                tracing::info!(path = %path.display(), "📄 exported CSV");
                self.status = format!("Exported {} products to {}.", self.view.filtered().len(), path.display());
                Task::none()
            }
            Message::ExportFinished(Ok(None)) => {
                self.status = "Export cancelled.".to_string();
                Task::none()
            }
            Message::ExportFinished(Err(err)) => {
                tracing::error!(error = %err, "CSV export failed");
                self.notice = Some(Notice::failure(format!("Export failed: {}", err)));
                Task::none()
            }
            Message::ThumbnailLoaded(url, result) => {
                self.thumbnails.resolve(url, result);
                Task::none()
            }
            Message::DismissNotice => {
                self.notice = None;
                Task::none()
            }
        }
    }

    /// Fetch images for the visible page and the open detail gallery
    fn request_visible_images(&mut self) -> Task<Message> {
        let placeholder = self.config.placeholder_url.as_str();
        let mut urls: Vec<&str> = self
            .view
            .page_window()
            .iter()
            .map(|product| product.thumbnail_url(placeholder))
            .collect();
        if let Some(product) = self.editor.as_ref().and_then(|session| self.view.find(session.product_id)) {
            urls.extend(product.images.iter().map(String::as_str));
        }

        let pending = self.thumbnails.request(urls);
        let size = (self.config.thumbnail_size as f32 * GALLERY_SCALE) as u32;
        Task::batch(pending.into_iter().map(|url| {
            let client = self.client.clone();
            Task::perform(
                async move {
                    let result = images::fetch_thumbnail(client, url.clone(), size).await;
                    (url, result)
                },
                |(url, result)| Message::ThumbnailLoaded(url, result),
            )
        }))
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let toolbar = row![
            text_input("Search by title...", self.view.query())
                .on_input(Message::SearchChanged)
                .padding(8)
                .width(Length::Fill),
            pick_list(PAGE_SIZE_OPTIONS, Some(self.view.page_size()), Message::PageSizeSelected),
            button("Add product").style(button::success).on_press(Message::OpenCreate),
            button("Export CSV").style(button::secondary).on_press(Message::ExportPressed),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let table = ui::table::view(
            &self.view,
            &self.thumbnails,
            &self.config.placeholder_url,
            self.config.thumbnail_size as f32,
        );
        let pagination = ui::pagination::view(ui::pagination::controls(
            self.view.total_pages(),
            self.view.page(),
        ));

        let content = column![
            text("Product Admin").size(28),
            toolbar,
            table,
            row![text(&self.status).size(14).width(Length::Fill), pagination]
                .spacing(10)
                .align_y(Alignment::Center),
        ]
        .spacing(16)
        .padding(24);

        let mut screen: Element<Message> = content.into();

        if let Some(session) = &self.editor {
            if let Some(product) = self.view.find(session.product_id) {
                let gallery_size = self.config.thumbnail_size as f32 * GALLERY_SCALE;
                let dialog = ui::editor::detail(product, session, &self.categories, &self.thumbnails, gallery_size);
                screen = ui::modal(screen, dialog, Message::CloseDetail);
            }
        }

        if let Some(session) = &self.create {
            screen = ui::modal(screen, ui::editor::create(session, &self.categories), Message::CloseCreate);
        }

        if let Some(notice) = &self.notice {
            screen = ui::modal(screen, ui::notice::view(notice), Message::DismissNotice);
        }

        screen
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("catalog_admin=info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> iced::Result {
    init_tracing();
    let config = Config::load();

    iced::application("Catalog Admin", CatalogAdmin::update, CatalogAdmin::view)
        .theme(CatalogAdmin::theme)
        .window_size(Size::new(1100.0, 760.0))
        .centered()
        .run_with(move || CatalogAdmin::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::loader::DataSource;
    use crate::state::data::CategoryField;
    use crate::state::editor::FormIssue;
    use crate::ui::notice::NoticeKind;

    fn product(id: i64, title: &str, price: f64) -> Product {
        Product {
            id,
            title: title.to_string(),
            price,
            description: None,
            category: Some(CategoryField::Named { id: Some(1), name: Some("Fruit".into()) }),
            category_id: None,
            images: Vec::new(),
        }
    }

    fn loaded_app() -> CatalogAdmin {
        let (mut app, _) = CatalogAdmin::new(Config::default());
        let _ = app.update(Message::CatalogLoaded(CatalogSnapshot {
            categories: vec![Category { id: 1, name: "Fruit".into() }],
            products: vec![product(1, "Apple", 10.0), product(2, "banana", 5.0)],
            source: DataSource::Remote,
        }));
        app
    }

    #[test]
    fn test_catalog_loaded_populates_view() {
        let app = loaded_app();
        assert_eq!(app.view.all().len(), 2);
        assert_eq!(app.view.filtered().len(), 2);
        assert_eq!(app.categories.len(), 1);
        assert!(app.status.contains("remote API"));
    }

    #[test]
    fn test_failed_create_leaves_records_unchanged() {
        let mut app = loaded_app();
        let _ = app.update(Message::OpenCreate);
        let _ = app.update(Message::ProductCreated(Err(ApiError::Status { status: 500 })));

        assert_eq!(app.view.all().len(), 2);
        assert_eq!(app.notice.as_ref().map(|n| n.kind), Some(NoticeKind::Failure));
        assert!(app.create.is_some());
    }

    #[test]
    fn test_successful_create_appends_and_closes() {
        let mut app = loaded_app();
        let _ = app.update(Message::OpenCreate);
        let _ = app.update(Message::ProductCreated(Ok(product(3, "Cherry", 2.0))));

        assert_eq!(app.view.all().len(), 3);
        assert_eq!(app.view.all()[2].id, 3);
        assert!(app.create.is_none());
        assert_eq!(app.notice.as_ref().map(|n| n.kind), Some(NoticeKind::Success));
    }

    #[test]
    fn test_invalid_edit_is_not_submitted() {
        let mut app = loaded_app();
        let _ = app.update(Message::OpenDetail(1));
        let _ = app.update(Message::EditPressed);
        let _ = app.update(Message::EditFieldChanged(FormField::Title, "  ".into()));
        let _ = app.update(Message::SavePressed);

        match &app.editor {
            Some(EditorSession { mode: EditorMode::Editing { issues, saving, .. }, .. }) => {
                assert_eq!(issues, &vec![FormIssue::TitleRequired]);
                assert!(!saving);
            }
            other => panic!("expected edit mode, got {:?}", other),
        }
    }

    #[test]
    fn test_successful_update_replaces_in_place_and_closes() {
        let mut app = loaded_app();
        let _ = app.update(Message::OpenDetail(1));
        let _ = app.update(Message::EditPressed);
        let _ = app.update(Message::ProductUpdated(1, Ok(product(1, "Apple Pro", 10.0))));

        assert!(app.editor.is_none());
        let titles: Vec<&str> = app.view.all().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Apple Pro", "banana"]);
        assert_eq!(app.view.filtered()[0].title, "Apple Pro");
    }

    #[test]
    fn test_failed_update_keeps_editor_open() {
        let mut app = loaded_app();
        let _ = app.update(Message::OpenDetail(2));
        let _ = app.update(Message::EditPressed);
        let _ = app.update(Message::ProductUpdated(2, Err(ApiError::Network("refused".into()))));

        assert!(matches!(
            app.editor,
            Some(EditorSession { product_id: 2, mode: EditorMode::Editing { saving: false, .. } })
        ));
        assert_eq!(app.view.all()[1].title, "banana");
        assert_eq!(app.notice.as_ref().map(|n| n.kind), Some(NoticeKind::Failure));
    }

    #[test]
    fn test_export_with_nothing_to_export() {
        let mut app = loaded_app();
        let _ = app.update(Message::SearchChanged("kiwi".into()));
        let _ = app.update(Message::ExportPressed);
        assert_eq!(app.notice.as_ref().map(|n| n.kind), Some(NoticeKind::Info));
        let _ = app.update(Message::DismissNotice);
        assert!(app.notice.is_none());
    }

    #[test]
    fn test_open_unknown_record_is_ignored() {
        let mut app = loaded_app();
        let _ = app.update(Message::OpenDetail(99));
        assert!(app.editor.is_none());
    }
}
