use crate::domain::commands::{Command, SpeedLevel};
use crate::domain::models::{
    AppEvent, ConnectionState, LinkCommand, MessageSeverity, SendRequest, StatusMessage, Tab,
};
use crate::domain::settings::SettingsService;
use crate::infrastructure::bluetooth::client::GattClient;
use crate::infrastructure::bluetooth::{BleUartClient, LinkConfig, UartLink};
use crate::presentation::joystick::JoystickPad;
use eframe::egui;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tracing::error;

pub struct CarritoApp {
    // Services
    pub(crate) settings: Arc<Mutex<SettingsService>>,

    // Bluetooth worker channels
    pub(crate) link_tx: mpsc::UnboundedSender<LinkCommand>,
    pub(crate) events_rx: mpsc::UnboundedReceiver<AppEvent>,

    // State mirrored from the worker
    pub(crate) connection_state: ConnectionState,
    pub(crate) log: Vec<StatusMessage>,

    // UI state
    pub(crate) selected_tab: Tab,
    pub(crate) debug_input: String,
    pub(crate) joystick: JoystickPad,
    pub(crate) speed_slider: f32,
    pub(crate) last_speed_level: SpeedLevel,
    pub(crate) is_dark_mode: bool,

    // Logging guard
    pub(crate) _logging_guard: Option<crate::infrastructure::logging::LoggingGuard>,
}

impl CarritoApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        crate::presentation::theme::configure_style(&cc.egui_ctx, false);

        let settings_service = SettingsService::new().expect("Failed to load settings");

        let logging_guard =
            crate::infrastructure::logging::init_logger(&settings_service.get().log_settings)
                .map_err(|e| eprintln!("Failed to initialize logging: {}", e))
                .ok();

        tracing::info!("Starting Carrito Remote");

        let settings = Arc::new(Mutex::new(settings_service));
        let (event_tx, events_rx) = mpsc::unbounded_channel();
        let (link_tx, link_rx) = mpsc::unbounded_channel();
        let worker_settings = settings.clone();

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("Failed to create tokio runtime for Bluetooth");

            rt.block_on(bluetooth_worker(worker_settings, link_rx, event_tx));
        });

        Self {
            settings,
            link_tx,
            events_rx,
            connection_state: ConnectionState::Disconnected,
            log: vec![StatusMessage::new(
                "Welcome! Connect the device.",
                MessageSeverity::Info,
            )],
            selected_tab: Tab::Debugger,
            debug_input: String::new(),
            joystick: JoystickPad::new(),
            speed_slider: 1.0,
            last_speed_level: SpeedLevel::Mid,
            is_dark_mode: false,
            _logging_guard: logging_guard,
        }
    }

    pub(crate) fn is_connected(&self) -> bool {
        self.connection_state == ConnectionState::Connected
    }

    pub(crate) fn send_action(&self, command: Command) {
        let _ = self
            .link_tx
            .send(LinkCommand::Send(SendRequest::Action(command)));
    }

    pub(crate) fn send_raw(&self, text: String) {
        let _ = self.link_tx.send(LinkCommand::Send(SendRequest::Raw(text)));
    }
}

/// Command loop on the Bluetooth worker thread. The link and its state
/// machine are touched from here only.
async fn bluetooth_worker(
    settings: Arc<Mutex<SettingsService>>,
    mut link_rx: mpsc::UnboundedReceiver<LinkCommand>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
) {
    let (down_tx, mut down_rx) = mpsc::unbounded_channel();

    let initial = LinkConfig::from_settings(&crate::domain::settings::Settings::default())
        .expect("default link config");
    let mut client = BleUartClient::new();
    client.watch_link_down(down_tx.clone());
    let mut link = UartLink::new(client, initial, event_tx.clone());

    loop {
        tokio::select! {
            cmd = link_rx.recv() => {
                let Some(cmd) = cmd else { break };
                match cmd {
                    LinkCommand::Connect => {
                        // Settings may have changed since the last session.
                        let config = {
                            let guard = settings.lock().expect("settings lock");
                            LinkConfig::from_settings(guard.get())
                        };
                        match config {
                            Ok(config) => link.set_config(config),
                            Err(e) => {
                                error!("Bad link settings: {e}");
                                let _ = event_tx.send(AppEvent::Log(StatusMessage::new(
                                    format!("Error: {e}."),
                                    MessageSeverity::Error,
                                )));
                                continue;
                            }
                        }
                        link.connect().await;
                    }
                    LinkCommand::Disconnect => link.disconnect().await,
                    LinkCommand::Send(request) => link.send(&request).await,
                }
            }
            Some(()) = down_rx.recv() => link.on_link_down(),
        }
    }
}

impl eframe::App for CarritoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        while let Ok(event) = self.events_rx.try_recv() {
            match event {
                AppEvent::ConnectionState(state) => self.connection_state = state,
                AppEvent::Log(msg) => self.log.push(msg),
            }
        }

        ctx.request_repaint();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.selectable_value(&mut self.selected_tab, Tab::Drive, "Drive");
                ui.selectable_value(&mut self.selected_tab, Tab::Programming, "Programming");
                ui.selectable_value(&mut self.selected_tab, Tab::Debugger, "Debugger");
                ui.selectable_value(&mut self.selected_tab, Tab::Settings, "Settings");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let switch_icon = if self.is_dark_mode {
                        "☀ Light"
                    } else {
                        "🌙 Dark"
                    };
                    if ui.button(switch_icon).clicked() {
                        self.is_dark_mode = !self.is_dark_mode;
                        crate::presentation::theme::configure_style(ctx, self.is_dark_mode);
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_max_width(800.0);
                    ui.add_space(20.0);

                    use crate::presentation::tabs;
                    match self.selected_tab {
                        Tab::Drive => tabs::drive::render(self, ui),
                        Tab::Programming => tabs::programming::render(self, ui),
                        Tab::Debugger => tabs::debugger::render(self, ui),
                        Tab::Settings => tabs::settings::render(self, ui),
                    }

                    ui.add_space(50.0);
                });
            });
        });
    }
}
