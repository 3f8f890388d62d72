use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::host::GtkHost;
use crate::gui::logo::{self, LogoFrame};
use crate::gui::theme::{self, ThemeColors};
use crate::gui::{
    SIDEBAR_ANIMATION_MS, SIDEBAR_BUTTON_OFFSET_CLOSED, SIDEBAR_BUTTON_OFFSET_OPEN, SIDEBAR_WIDTH,
};
use cursorkit::{
    Feature, FeatureToggle, Host, IdleController, IdleInput, Point, RotationController,
    ScalingController, ScalingInput,
};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use strum::IntoEnumIterator;

pub struct AppModel {
    pub features: FeatureToggle,
    pub sidebar_open: bool,
    pub rotation: RotationController,
    pub scaling: ScalingController,
    pub idle: IdleController,
    pub frame: Rc<RefCell<LogoFrame>>,
    pub config_path: Option<PathBuf>,
    pub host: GtkHost,
    pub canvas: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    ToggleSidebar,
    CloseSidebar,
    ToggleFeature(Feature),
    CanvasClicked(Point),
    ReverseDirection,
    RotationTick,
    Scaling(ScalingInput),
    Idle(IdleInput),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

impl AppModel {
    fn idle_label(&self) -> String {
        logo::idle_text(&self.idle.state())
    }

    fn rotation_label(&self) -> String {
        logo::rotation_text(&self.rotation.state())
    }

    /// Acquires or releases the host resources behind one feature.
    fn apply_feature(&mut self, feature: Feature, enabled: bool, sender: &ComponentSender<Self>) {
        match (feature, enabled) {
            (Feature::Rotation, true) => {
                let sender = sender.clone();
                self.rotation
                    .enable(&self.host, move || sender.input(AppMsg::RotationTick));
            }
            (Feature::Rotation, false) => self.rotation.disable(),
            (Feature::Scaling, true) => {
                let sender = sender.clone();
                self.scaling.enable(
                    &self.host,
                    Rc::new(move |input| sender.input(AppMsg::Scaling(input))),
                );
            }
            (Feature::Scaling, false) => self.scaling.disable(),
            (Feature::Idle, true) => {
                let sender = sender.clone();
                self.idle.enable(
                    &self.host,
                    Rc::new(move |input| sender.input(AppMsg::Idle(input))),
                );
            }
            (Feature::Idle, false) => self.idle.disable(),
        }
        log::info!(
            "{} {}",
            feature.label(),
            if enabled { "enabled" } else { "disabled" }
        );
    }

    /// Copies controller state into the paint snapshot; redraws on change.
    fn sync_frame(&self) {
        let next = LogoFrame::new(self.scaling.icon_size(), self.rotation.state().angle);
        let changed = {
            let mut frame = self.frame.borrow_mut();
            let changed = *frame != next;
            *frame = next;
            changed
        };
        if changed {
            self.canvas.queue_draw();
        }
    }

    fn reload_config(&mut self) {
        let Some(path) = &self.config_path else {
            return;
        };
        match config::load_config(path) {
            Ok(new_config) => {
                self.scaling.set_config(new_config.scaling);
                log::info!("Configuration reloaded");
            }
            Err(e) => log::error!("Failed to reload config: {}", e),
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (
        Config,
        Option<PathBuf>,
        async_channel::Receiver<AppEvent>,
    );
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Spindle"),
            set_default_size: (960, 640),
            add_css_class: "spindle-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::CloseSidebar);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "overlay"]
            gtk::Overlay {
                #[name = "canvas"]
                gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,
                    set_focusable: true,
                    add_css_class: "spindle-canvas",
                    #[watch]
                    set_cursor_from_name: Some(if model.features.rotation { "pointer" } else { "default" }),

                    add_controller = gtk::GestureClick {
                        connect_released[sender] => move |_, _, x, y| {
                            sender.input(AppMsg::CanvasClicked(Point::new(x, y)));
                        }
                    },

                    add_controller = gtk::EventControllerKey {
                        connect_key_pressed[sender] => move |_, key, _, _| {
                            if key == gtk::gdk::Key::Return
                                || key == gtk::gdk::Key::KP_Enter
                                || key == gtk::gdk::Key::space
                            {
                                sender.input(AppMsg::ReverseDirection);
                                return glib::Propagation::Stop;
                            }
                            glib::Propagation::Proceed
                        }
                    }
                },

                add_overlay = &gtk::Label {
                    set_halign: gtk::Align::Center,
                    set_valign: gtk::Align::Start,
                    set_margin_top: 16,
                    set_can_target: false,
                    add_css_class: "spindle-readout",
                    #[watch]
                    set_label: &model.idle_label(),
                    #[watch]
                    set_opacity: if model.features.idle { 1.0 } else { 0.0 },
                },

                add_overlay = &gtk::Label {
                    set_halign: gtk::Align::Center,
                    set_valign: gtk::Align::End,
                    set_margin_bottom: 16,
                    set_can_target: false,
                    add_css_class: "spindle-readout",
                    #[watch]
                    set_label: &model.rotation_label(),
                    #[watch]
                    set_opacity: if model.features.rotation { 1.0 } else { 0.5 },
                },

                add_overlay = &gtk::Revealer {
                    set_halign: gtk::Align::Start,
                    set_valign: gtk::Align::Fill,
                    set_transition_type: gtk::RevealerTransitionType::SlideRight,
                    set_transition_duration: SIDEBAR_ANIMATION_MS,
                    #[watch]
                    set_reveal_child: model.sidebar_open,

                    #[wrap(Some)]
                    set_child = &gtk::Box {
                        set_orientation: gtk::Orientation::Vertical,
                        set_spacing: 16,
                        set_width_request: SIDEBAR_WIDTH,
                        add_css_class: "spindle-sidebar",

                        gtk::Label {
                            set_label: "Features",
                            set_xalign: 0.0,
                            add_css_class: "title-2",
                        },

                        gtk::CheckButton {
                            set_label: Some(Feature::Rotation.label()),
                            #[watch]
                            #[block_signal(rotation_toggled)]
                            set_active: model.features.rotation,
                            connect_toggled[sender] => move |_| {
                                sender.input(AppMsg::ToggleFeature(Feature::Rotation));
                            } @rotation_toggled,
                        },

                        gtk::CheckButton {
                            set_label: Some(Feature::Scaling.label()),
                            #[watch]
                            #[block_signal(scaling_toggled)]
                            set_active: model.features.scaling,
                            connect_toggled[sender] => move |_| {
                                sender.input(AppMsg::ToggleFeature(Feature::Scaling));
                            } @scaling_toggled,
                        },

                        gtk::CheckButton {
                            set_label: Some(Feature::Idle.label()),
                            #[watch]
                            #[block_signal(idle_toggled)]
                            set_active: model.features.idle,
                            connect_toggled[sender] => move |_| {
                                sender.input(AppMsg::ToggleFeature(Feature::Idle));
                            } @idle_toggled,
                        },
                    },
                },

                add_overlay = &gtk::Button {
                    set_halign: gtk::Align::Start,
                    set_valign: gtk::Align::Start,
                    set_margin_top: 16,
                    #[watch]
                    set_margin_start: if model.sidebar_open {
                        SIDEBAR_BUTTON_OFFSET_OPEN
                    } else {
                        SIDEBAR_BUTTON_OFFSET_CLOSED
                    },
                    #[watch]
                    set_label: if model.sidebar_open { "← Hide" } else { "☰ Menu" },
                    #[watch]
                    set_tooltip_text: Some(if model.sidebar_open { "Close sidebar" } else { "Open sidebar" }),
                    connect_clicked => AppMsg::ToggleSidebar,
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, config_path, rx) = init;

        theme::load_css();

        let scaling = ScalingController::new(config.scaling);
        let frame = LogoFrame::new(scaling.icon_size(), 0.0);

        let model = AppModel {
            features: config.features,
            sidebar_open: config.sidebar.open,
            rotation: RotationController::default(),
            scaling,
            idle: IdleController::default(),
            frame: Rc::new(RefCell::new(frame)),
            config_path,
            host: GtkHost::new(
                root.clone(),
                gtk::Overlay::default(),
                gtk::DrawingArea::default(),
            ),
            canvas: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.canvas = widgets.canvas.clone();
        model.host = GtkHost::new(
            root.clone(),
            widgets.overlay.clone(),
            widgets.canvas.clone(),
        );

        let frame_draw = model.frame.clone();
        widgets
            .canvas
            .set_draw_func(move |canvas, cr, width, height| {
                let style_context = canvas.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = logo::draw(
                    cr,
                    &frame_draw.borrow(),
                    width as f64,
                    height as f64,
                    &colors,
                ) {
                    log::error!("Drawing error: {}", e);
                }
            });

        for feature in Feature::iter().filter(|f| model.features.get(*f)) {
            model.apply_feature(feature, true, &sender);
        }
        model.sync_frame();

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::ToggleSidebar => self.sidebar_open = !self.sidebar_open,
            AppMsg::CloseSidebar => self.sidebar_open = false,
            AppMsg::ToggleFeature(feature) => {
                let enabled = self.features.toggle(feature);
                self.apply_feature(feature, enabled, &sender);
            }
            AppMsg::CanvasClicked(point) => {
                self.canvas.grab_focus();
                if self.frame.borrow().hit(self.host.viewport(), point) {
                    self.rotation.toggle_direction();
                }
            }
            AppMsg::ReverseDirection => {
                self.rotation.toggle_direction();
            }
            AppMsg::RotationTick => self.rotation.tick(),
            AppMsg::Scaling(input) => self.scaling.handle(&self.host, input),
            AppMsg::Idle(input) => self.idle.handle(&self.host, input),
            AppMsg::ConfigReload => self.reload_config(),
        }
        self.sync_frame();
    }
}
