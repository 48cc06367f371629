// src/main.rs
use iced::widget::{button, column, container, row, scrollable, text, text_input, Column, Row, Space};
use iced::{
    executor, theme, window, Alignment, Application, Command, Element, Length, Settings,
    Subscription, Theme,
};
use chrono::Local;
use std::sync::Arc;
use std::time::{Duration, Instant};

mod cloud_handler;
mod csv_handler;
mod dashboard;
mod data_loader;
mod data_types;
mod error;
mod load_cache;
mod presenter;
mod record_filter;
mod refresh;
mod search_filter;
mod session;
mod settings;
mod source_resolver;
mod summary;
mod ui;
mod xlsx_handler;

use dashboard::{build_view, DashboardView};
use data_loader::DataLoader;
use data_types::{Column as OrderColumn, DataSource, Department, OrderTable};
use error::LoadError;
use load_cache::LoadCache;
use presenter::PresentedTable;
use refresh::RefreshSchedule;
use session::{AccessState, Session};
use settings::AppSettings;
use source_resolver::SourceResolver;
use ui::{BackgroundStyle, PanelStyle, Styles, DARK_THEME};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const CHECK_INTERVAL: Duration = Duration::from_secs(1);

pub fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app_settings = AppSettings::load();
    OrderTracker::run(Settings {
        window: window::Settings {
            size: (1280, 800),
            resizable: true,
            ..Default::default()
        },
        ..Settings::with_flags(app_settings)
    })
}

struct OrderTracker {
    settings: AppSettings,
    session: Session,
    secret_input: String,
    resolver: SourceResolver,
    loader: Result<DataLoader, LoadError>,
    cache: LoadCache<DataSource, Arc<OrderTable>>,
    source: Option<DataSource>,
    orders: Option<Arc<OrderTable>>,
    load_error: Option<LoadError>,
    refresh: RefreshSchedule,
}

#[derive(Debug, Clone)]
enum Message {
    SecretChanged(String),
    SubmitSecret,
    LogOut,
    SearchChanged(String),
    Refresh,
    Tick,
    DataLoaded(DataSource, Result<Arc<OrderTable>, LoadError>),
}

impl Application for OrderTracker {
    type Executor = executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = AppSettings;

    fn new(settings: AppSettings) -> (Self, Command<Message>) {
        let loader = DataLoader::new(&settings);
        if let Err(e) = &loader {
            log::error!("Could not set up the HTTP client: {}", e);
        }
        (
            OrderTracker {
                resolver: SourceResolver::new(&settings.config_file, &settings.default_workbook),
                cache: LoadCache::new(settings.cache_ttl()),
                refresh: RefreshSchedule::new(settings.cache_ttl(), Instant::now()),
                settings,
                session: Session::new(),
                secret_input: String::new(),
                loader,
                source: None,
                orders: None,
                load_error: None,
            },
            Command::none(),
        )
    }

    fn title(&self) -> String {
        format!("E.W.A.S Order Tracker v{}", VERSION)
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::SecretChanged(value) => {
                self.secret_input = value;
                Command::none()
            }

            Message::SubmitSecret => {
                let attempt = std::mem::take(&mut self.secret_input);
                if self.session.submit_secret(&attempt, &self.settings.access_secret) {
                    return self.reload();
                }
                Command::none()
            }

            Message::LogOut => {
                self.session.log_out();
                Command::none()
            }

            Message::SearchChanged(query) => {
                self.session.search = query;
                Command::none()
            }

            Message::Refresh => {
                log::info!("Manual refresh, dropping cached data");
                self.cache.invalidate();
                if self.refresh.is_loading() {
                    self.refresh.request_rerun();
                    return Command::none();
                }
                self.reload()
            }

            Message::Tick => {
                if self.session.is_unlocked() && self.refresh.is_due(Instant::now()) {
                    return self.reload();
                }
                Command::none()
            }

            Message::DataLoaded(source, result) => {
                let now = Instant::now();
                let rerun = self.refresh.finish_load(now);
                let current = self.source.as_ref() == Some(&source);
                match result {
                    Ok(orders) => {
                        if !rerun {
                            self.cache.insert(source, orders.clone(), now);
                        }
                        if current {
                            self.orders = Some(orders);
                            self.load_error = None;
                        }
                    }
                    Err(e) => {
                        log::warn!("Loading {} failed: {}", source, e);
                        if current {
                            self.orders = None;
                            self.load_error = Some(e);
                        }
                    }
                }
                if rerun {
                    return self.reload();
                }
                Command::none()
            }
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        iced::time::every(CHECK_INTERVAL).map(|_| Message::Tick)
    }

    fn view(&self) -> Element<Message> {
        let styles: &Styles = &DARK_THEME;

        let content = if self.session.is_unlocked() {
            self.dashboard_view(styles)
        } else {
            self.login_view(styles)
        };

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(20)
            .style(theme::Container::Custom(Box::new(BackgroundStyle { bg: styles.bg })))
            .into()
    }
}

impl OrderTracker {
    /// Resolves the source again and loads it, from the cache when fresh.
    fn reload(&mut self) -> Command<Message> {
        if self.refresh.is_loading() {
            return Command::none();
        }
        let now = Instant::now();
        self.source = self.resolver.resolve();

        let source = match &self.source {
            Some(source) => source.clone(),
            None => {
                self.refresh.mark_checked(now);
                self.orders = None;
                self.load_error = None;
                return Command::none();
            }
        };

        if let Some(orders) = self.cache.get(&source, now) {
            log::debug!("Serving {} from cache", source);
            self.refresh.mark_checked(now);
            self.orders = Some(orders);
            self.load_error = None;
            return Command::none();
        }

        let loader = match &self.loader {
            Ok(loader) => loader.clone(),
            Err(e) => {
                self.refresh.mark_checked(now);
                self.load_error = Some(e.clone());
                return Command::none();
            }
        };

        if !self.refresh.begin_load() {
            return Command::none();
        }
        Command::perform(
            async move {
                let result = loader.load(&source).await.map(Arc::new);
                (source, result)
            },
            |(source, result)| Message::DataLoaded(source, result),
        )
    }

    fn login_view(&self, styles: &Styles) -> Element<Message> {
        let mut form = column![
            text("E.W.A.S - Open Order Tracking").size(30).style(styles.fg),
            text("Please enter the access password:").size(16).style(styles.muted_fg),
            text_input("Password", &self.secret_input)
                .on_input(Message::SecretChanged)
                .on_submit(Message::SubmitSecret)
                .password()
                .padding(10)
                .width(Length::Fixed(320.0)),
            button(text("Log in"))
                .on_press(Message::SubmitSecret)
                .padding(10)
                .style(theme::Button::Primary),
        ]
        .spacing(14)
        .align_items(Alignment::Center);

        if self.session.access() == AccessState::Rejected {
            form = form.push(text("Incorrect password.").size(16).style(styles.error_fg));
        }

        container(form)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x()
            .center_y()
            .into()
    }

    fn dashboard_view(&self, styles: &Styles) -> Element<Message> {
        let header = row![
            column![
                text("E.W.A.S - Open Order Tracking").size(30).style(styles.fg),
                text("Production and follow-up panel").size(15).style(styles.muted_fg),
            ]
            .spacing(4),
            Space::with_width(Length::Fill),
            button(text("Log out"))
                .on_press(Message::LogOut)
                .padding(10)
                .style(theme::Button::Secondary),
        ]
        .align_items(Alignment::Center);

        let source = match &self.source {
            Some(source) => source,
            None => {
                let message = format!(
                    "No data source found! Put a file path or a Google Drive link into '{}'.",
                    self.resolver.config_file().display()
                );
                return column![
                    header,
                    text(message).size(18).style(styles.error_fg),
                    refresh_button(),
                ]
                .spacing(20)
                .into();
            }
        };

        let orders = match &self.orders {
            Some(orders) if !orders.is_empty() => orders,
            _ => return self.empty_view(header.into(), styles),
        };

        let today = Local::now().date_naive();
        let view = build_view(orders, &self.session.search, today, self.settings.due_window_days);
        let alert = view.alert();

        let controls = row![
            text_input("Quick search: receipt no, company or file name...", &self.session.search)
                .on_input(Message::SearchChanged)
                .padding(10)
                .width(Length::FillPortion(3)),
            refresh_button(),
        ]
        .spacing(10)
        .align_items(Alignment::Center);

        let mut content = column![
            header,
            controls,
            metrics_row(&view, styles),
            text("Order list").size(22).style(styles.fg),
            table_view(view.table, styles),
            text(format!(
                "Data source: {} | System time: {}{}",
                source,
                Local::now().format("%H:%M:%S"),
                if self.refresh.is_loading() { " | refreshing..." } else { "" }
            ))
            .size(13)
            .style(styles.muted_fg),
        ]
        .spacing(16);

        if let Some(alert) = alert {
            content = content.push(text(alert).size(16).style(styles.warning_fg));
        }

        content.into()
    }

    fn empty_view<'a>(&self, header: Element<'a, Message>, styles: &Styles) -> Element<'a, Message> {
        let mut content = column![header].spacing(20);

        if self.refresh.is_loading() {
            content = content.push(text("Loading...").style(styles.muted_fg));
        }
        if let Some(e) = &self.load_error {
            content = content.push(text(e.to_string()).size(16).style(styles.error_fg));
        }
        content = content
            .push(text("No data to show, or the Excel file is empty.").size(18).style(styles.warning_fg))
            .push(refresh_button());

        content.into()
    }
}

fn refresh_button<'a>() -> Element<'a, Message> {
    button(text("REFRESH LIST").horizontal_alignment(iced::alignment::Horizontal::Center))
        .on_press(Message::Refresh)
        .padding(10)
        .width(Length::Fixed(180.0))
        .style(theme::Button::Primary)
        .into()
}

fn metrics_row<'a>(view: &DashboardView, styles: &Styles) -> Element<'a, Message> {
    let mut cards: Vec<Element<'a, Message>> = vec![metric_card(
        "Total orders",
        view.summary.total,
        "pcs".to_string(),
        None,
        styles,
    )];

    for department in Department::ALL {
        cards.push(metric_card(
            &format!("{} department", department),
            view.summary.count_for(department),
            "pcs".to_string(),
            None,
            styles,
        ));
    }

    let due = view.summary.due_soon;
    cards.push(metric_card(
        "Upcoming / overdue",
        due,
        format!("{} urgent", due),
        (due > 0).then_some(styles.error_fg),
        styles,
    ));

    Row::with_children(cards).spacing(12).width(Length::Fill).into()
}

fn metric_card<'a>(
    label: &str,
    value: usize,
    note: String,
    alert: Option<iced::Color>,
    styles: &Styles,
) -> Element<'a, Message> {
    let card = column![
        text(label.to_string()).size(16).style(styles.muted_fg),
        text(value.to_string()).size(28).style(styles.header_fg),
        text(note).size(13).style(alert.unwrap_or(styles.muted_fg)),
    ]
    .spacing(4);

    container(card)
        .width(Length::FillPortion(1))
        .padding(15)
        .style(theme::Container::Custom(Box::new(PanelStyle {
            bg: styles.panel_bg,
            accent: Some(alert.unwrap_or(styles.accent)),
        })))
        .into()
}

fn column_portion(header: &str) -> u16 {
    if header == OrderColumn::Description.header() {
        4
    } else if header == OrderColumn::FileName.header() {
        3
    } else {
        2
    }
}

fn table_view<'a>(table: PresentedTable, styles: &Styles) -> Element<'a, Message> {
    let portions: Vec<u16> = table.headers.iter().map(|h| column_portion(h)).collect();

    let header_cells: Vec<Element<'a, Message>> = table
        .headers
        .into_iter()
        .zip(&portions)
        .map(|(header, &portion)| {
            container(text(header).size(15).style(styles.header_fg))
                .width(Length::FillPortion(portion))
                .padding(6)
                .style(theme::Container::Custom(Box::new(BackgroundStyle {
                    bg: styles.header_bg,
                })))
                .into()
        })
        .collect();
    let headers = Row::with_children(header_cells).spacing(1).width(Length::Fill);

    let rows: Vec<Element<'a, Message>> = table
        .rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            let bg = if i % 2 == 0 { styles.panel_bg } else { styles.bg };
            let cells: Vec<Element<'a, Message>> = row
                .into_iter()
                .zip(&portions)
                .map(|(cell, &portion)| {
                    container(text(cell).size(14).style(styles.fg))
                        .width(Length::FillPortion(portion))
                        .padding(5)
                        .into()
                })
                .collect();
            container(Row::with_children(cells).spacing(1).width(Length::Fill))
                .width(Length::Fill)
                .style(theme::Container::Custom(Box::new(BackgroundStyle { bg })))
                .into()
        })
        .collect();

    let body = scrollable(Column::with_children(rows).spacing(1)).height(Length::Fill);

    container(column![headers, body].spacing(1))
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(10)
        .style(theme::Container::Custom(Box::new(PanelStyle {
            bg: styles.panel_bg,
            accent: None,
        })))
        .into()
}
