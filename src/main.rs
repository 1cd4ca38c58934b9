// src/main.rs
use iced::alignment::Horizontal;
use iced::widget::{button, column, container, row, scrollable, text, text_input, Column, Row, Space};
use iced::{
    executor, theme, window, Application, Background, Color, Command, Element, Length, Settings,
    Theme,
};
use rfd::AsyncFileDialog;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod ui;

use table_client::config::{API_BASE, VERSION, WINDOW_SIZE};
use table_client::{ApiClient, Display, Orchestrator, Outcome, Region, TableData, Task, TaskId};
use ui::{Styles, DARK_THEME, LIGHT_THEME};

pub fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!(version = VERSION, api_base = API_BASE, "Starting Table Client");

    TableClient::run(Settings {
        window: window::Settings {
            size: WINDOW_SIZE,
            resizable: true,
            ..Default::default()
        },
        ..Settings::default()
    })
}

struct TableClient {
    client: ApiClient,
    state: Orchestrator,
    is_dark_mode: bool,
}

#[derive(Debug, Clone)]
enum Message {
    ToggleTheme,
    UploadTableChanged(String),
    PickFile,
    FileSelected(Option<PathBuf>),
    SubmitUpload,
    FetchTableChanged(String),
    SubmitFetch,
    QueryTableChanged(String),
    FiltersChanged(String),
    LimitChanged(String),
    OffsetChanged(String),
    SubmitQuery,
    TableSelected(String),
    RefreshTables,
    LoadLogs,
    TaskFinished(TaskId, Outcome),
}

impl Application for TableClient {
    type Executor = executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = ();

    fn new(_flags: ()) -> (Self, Command<Message>) {
        let mut app = TableClient {
            client: ApiClient::new(API_BASE),
            state: Orchestrator::new(),
            is_dark_mode: true,
        };
        let tasks = app.state.init();
        let command = app.run_tasks(tasks);
        (app, command)
    }

    fn title(&self) -> String {
        format!("Table Client v{}", VERSION)
    }

    fn theme(&self) -> Theme {
        if self.is_dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        let tasks = match message {
            Message::ToggleTheme => {
                self.is_dark_mode = !self.is_dark_mode;
                Vec::new()
            }
            Message::UploadTableChanged(value) => {
                self.state.fields.upload_table = value;
                Vec::new()
            }
            Message::PickFile => {
                return Command::perform(
                    async {
                        AsyncFileDialog::new()
                            .add_filter("CSV Files", &["csv"])
                            .pick_file()
                            .await
                            .map(|handle| handle.path().to_path_buf())
                    },
                    Message::FileSelected,
                );
            }
            Message::FileSelected(path) => {
                if path.is_some() {
                    self.state.fields.upload_file = path;
                }
                Vec::new()
            }
            Message::SubmitUpload => self.state.submit_upload(),
            Message::FetchTableChanged(value) => {
                self.state.fields.fetch_table = value;
                Vec::new()
            }
            Message::SubmitFetch => self.state.fetch_data(),
            Message::QueryTableChanged(value) => {
                self.state.fields.query_table = value;
                Vec::new()
            }
            Message::FiltersChanged(value) => {
                self.state.fields.filters = value;
                Vec::new()
            }
            Message::LimitChanged(value) => {
                self.state.fields.limit = value;
                Vec::new()
            }
            Message::OffsetChanged(value) => {
                self.state.fields.offset = value;
                Vec::new()
            }
            Message::SubmitQuery => self.state.submit_query(),
            Message::TableSelected(table) => self.state.select_table(&table),
            Message::RefreshTables => self.state.refresh_tables(),
            Message::LoadLogs => self.state.load_logs(),
            Message::TaskFinished(id, outcome) => self.state.complete(id, outcome),
        };
        self.run_tasks(tasks)
    }

    fn view(&self) -> Element<Message> {
        let theme = self.styles();

        let content = row![
            self.sidebar_view(theme),
            scrollable(
                column![
                    self.upload_view(theme),
                    self.fetch_view(theme),
                    self.query_view(theme),
                    self.logs_view(theme),
                ]
                .spacing(20)
                .padding(15)
            )
            .width(Length::Fill)
            .height(Length::Fill),
        ]
        .height(Length::Fill);

        let footer = container(
            row![
                text(format!("Table Client v{}  ·  {}", VERSION, API_BASE))
                    .size(14)
                    .style(theme.footer_fg),
                Space::with_width(Length::Fill),
                button(
                    text("💡")
                        .horizontal_alignment(Horizontal::Center)
                        .size(18)
                        .style(theme.footer_fg)
                )
                .on_press(Message::ToggleTheme)
                .style(button_style(theme.footer_bg, theme.footer_fg)),
            ]
            .spacing(5),
        )
        .padding(10)
        .width(Length::Fill)
        .height(Length::Fixed(50.0))
        .style(container_style(theme.footer_bg));

        container(column![content, footer])
            .width(Length::Fill)
            .height(Length::Fill)
            .style(container_style(theme.bg))
            .into()
    }
}

impl TableClient {
    fn styles(&self) -> &'static Styles {
        if self.is_dark_mode {
            &DARK_THEME
        } else {
            &LIGHT_THEME
        }
    }

    /// Starts every task as an independent future. Nothing is cancelled or
    /// de-duplicated; each answer comes back as `TaskFinished`.
    fn run_tasks(&self, tasks: Vec<Task>) -> Command<Message> {
        Command::batch(tasks.into_iter().map(|task| {
            let client = self.client.clone();
            Command::perform(
                async move {
                    let outcome = client.execute(&task.request).await.map_err(Arc::new);
                    (task.id, outcome)
                },
                |(id, outcome)| Message::TaskFinished(id, outcome),
            )
        }))
    }

    fn sidebar_view(&self, theme: &Styles) -> Element<Message> {
        let tables = Column::with_children(
            self.state
                .tables()
                .iter()
                .map(|table| {
                    button(text(table).size(16).style(theme.link_fg))
                        .on_press(Message::TableSelected(table.clone()))
                        .width(Length::Fill)
                        .style(button_style(theme.panel_bg, theme.link_fg))
                        .into()
                })
                .collect(),
        )
        .spacing(2);

        container(
            column![
                row![
                    text("Tables").size(20).style(theme.fg),
                    Space::with_width(Length::Fill),
                    button(text("Refresh").size(14)).on_press(Message::RefreshTables),
                ],
                self.slot_view(Region::Tables, theme),
                scrollable(tables).height(Length::Fill),
            ]
            .spacing(10),
        )
        .padding(15)
        .width(Length::Fixed(220.0))
        .height(Length::Fill)
        .style(container_style(theme.panel_bg))
        .into()
    }

    fn upload_view(&self, theme: &Styles) -> Element<Message> {
        let fields = &self.state.fields;
        let file_label = fields
            .upload_file
            .as_ref()
            .and_then(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "No file selected".to_string());

        column![
            section_title("Upload CSV", theme),
            row![
                text_input("Table name", &fields.upload_table)
                    .on_input(Message::UploadTableChanged)
                    .on_submit(Message::SubmitUpload)
                    .padding(8)
                    .width(Length::Fixed(200.0)),
                button(text("Choose CSV…").size(16)).on_press(Message::PickFile),
                text(file_label).size(14).style(theme.muted_fg),
                Space::with_width(Length::Fill),
                button(text("Upload").size(16)).on_press(Message::SubmitUpload),
            ]
            .spacing(10),
            self.slot_view(Region::UploadResult, theme),
        ]
        .spacing(10)
        .into()
    }

    fn fetch_view(&self, theme: &Styles) -> Element<Message> {
        column![
            section_title("Table data", theme),
            row![
                text_input("Table name", &self.state.fields.fetch_table)
                    .on_input(Message::FetchTableChanged)
                    .on_submit(Message::SubmitFetch)
                    .padding(8)
                    .width(Length::Fixed(200.0)),
                button(text("Load data").size(16)).on_press(Message::SubmitFetch),
            ]
            .spacing(10),
            self.slot_view(Region::TableData, theme),
        ]
        .spacing(10)
        .into()
    }

    fn query_view(&self, theme: &Styles) -> Element<Message> {
        let fields = &self.state.fields;
        column![
            section_title("Query", theme),
            row![
                text_input("Table name", &fields.query_table)
                    .on_input(Message::QueryTableChanged)
                    .padding(8)
                    .width(Length::Fixed(160.0)),
                text_input("Filters, e.g. age>30", &fields.filters)
                    .on_input(Message::FiltersChanged)
                    .on_submit(Message::SubmitQuery)
                    .padding(8)
                    .width(Length::Fill),
                text_input("Limit", &fields.limit)
                    .on_input(Message::LimitChanged)
                    .padding(8)
                    .width(Length::Fixed(80.0)),
                text_input("Offset", &fields.offset)
                    .on_input(Message::OffsetChanged)
                    .padding(8)
                    .width(Length::Fixed(80.0)),
                button(text("Run query").size(16)).on_press(Message::SubmitQuery),
            ]
            .spacing(10),
            self.slot_view(Region::QueryResult, theme),
        ]
        .spacing(10)
        .into()
    }

    fn logs_view(&self, theme: &Styles) -> Element<Message> {
        column![
            row![
                section_title("Server logs", theme),
                Space::with_width(Length::Fill),
                button(text("Load logs").size(16)).on_press(Message::LoadLogs),
            ],
            self.slot_view(Region::Logs, theme),
        ]
        .spacing(10)
        .into()
    }

    fn slot_view(&self, region: Region, theme: &Styles) -> Element<Message> {
        let slot = self.state.slot(region);
        let body: Element<Message> = match &slot.content {
            Display::Empty => Space::with_height(Length::Fixed(0.0)).into(),
            Display::Busy(label) => text(format!("{} ⏳", label))
                .size(16)
                .style(theme.muted_fg)
                .into(),
            Display::Text(message) => text(message).size(16).style(theme.fg).into(),
            Display::Grid(data) => self.render_table(data, theme),
        };

        match slot.updated_at {
            Some(at) if !slot.content.is_busy() => column![
                body,
                text(format!("updated {}", at.format("%H:%M:%S")))
                    .size(12)
                    .style(theme.muted_fg),
            ]
            .spacing(4)
            .into(),
            _ => body,
        }
    }

    fn render_table(&self, data: &TableData, theme: &Styles) -> Element<Message> {
        let headers = Row::with_children(
            data.headers
                .iter()
                .map(|header| {
                    container(text(header).size(16).style(theme.header_fg))
                        .width(Length::Fixed(140.0))
                        .padding(5)
                        .style(container_style(theme.header_bg))
                        .into()
                })
                .collect(),
        )
        .spacing(1);

        let rows = data.rows.iter().map(|row| {
            Row::with_children(
                row.iter()
                    .map(|cell| {
                        container(text(cell).size(16).style(theme.fg))
                            .width(Length::Fixed(140.0))
                            .padding(5)
                            .style(container_style(theme.bg))
                            .into()
                    })
                    .collect(),
            )
            .spacing(1)
            .into()
        });

        column![headers]
            .push(Column::with_children(rows.collect()).spacing(1))
            .spacing(1)
            .into()
    }
}

fn section_title<'a>(title: &str, theme: &Styles) -> Element<'a, Message> {
    text(title).size(22).style(theme.fg).into()
}

fn container_style(bg: Color) -> theme::Container {
    theme::Container::Custom(Box::new(ContainerStyle { bg }))
}

fn button_style(bg: Color, fg: Color) -> theme::Button {
    theme::Button::Custom(Box::new(ButtonStyle {
        bg,
        fg,
        hover_bg: Color::from_rgb(0.0, 0.26, 0.5),
    }))
}

// Custom styles for containers and buttons
struct ContainerStyle {
    bg: Color,
}

impl container::StyleSheet for ContainerStyle {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            text_color: None,
            background: Some(Background::Color(self.bg)),
            border_radius: 0.0.into(),
            border_width: 0.0,
            border_color: Color::TRANSPARENT,
        }
    }
}

struct ButtonStyle {
    bg: Color,
    fg: Color,
    hover_bg: Color,
}

impl button::StyleSheet for ButtonStyle {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(self.bg)),
            border_radius: 4.0.into(),
            text_color: self.fg,
            ..button::Appearance::default()
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(self.hover_bg)),
            ..self.active(style)
        }
    }
}
