use std::sync::Arc;

use egui::{Key, Modifiers};
use log::warn;

use crate::context::EditorContext;
use crate::image_io::{self, ImageError};
use crate::input::InputHandler;
use crate::layer::Layer;
use crate::mask_view_mode::MaskViewMode;
use crate::message::LogMessenger;
use crate::persistence::Snapshot;
use crate::renderer::Renderer;
use crate::tools::{ToolId, Tools};
use crate::util::worker::Job;

/// Storage key for the serialized session snapshot.
const SESSION_KEY: &str = "strata_paint_session";

/// Brush size step for the `[` / `]` shortcuts.
const BRUSH_NUDGE: f32 = 2.0;

type DecodedImage = Result<(String, egui::ColorImage), ImageError>;

enum ImageSource {
    Path(std::path::PathBuf),
    Bytes(Arc<[u8]>),
}

pub struct StrataApp {
    editor: EditorContext,
    tools: Tools,
    renderer: Renderer,
    input: InputHandler,
    /// Image decode running off the UI thread, if any.
    pending_image: Option<Job<DecodedImage>>,
}

impl StrataApp {
    /// Called once before the first frame; restores the previous session
    /// when one was saved.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut editor = EditorContext::new(Box::new(LogMessenger::new()));
        let mut tools = Tools::new();

        if let Some(json) = cc.storage.and_then(|s| s.get_string(SESSION_KEY)) {
            match Snapshot::from_json(&json) {
                Ok(snapshot) => {
                    editor.document = snapshot.document;
                    editor.view = snapshot.view;
                    // An unknown tool name leaves the default tool active.
                    if let Some(id) = Tools::by_name(&snapshot.tool_name) {
                        tools.change_to(id, &mut editor);
                    }
                    // The restored document replaced the startup one.
                    tools.comp_activated(&mut editor);
                }
                Err(err) => warn!("could not restore previous session: {err}"),
            }
        }

        Self {
            editor,
            tools,
            renderer: Renderer::new(cc),
            input: InputHandler::new(),
            pending_image: None,
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        // Undo/redo.
        if ctx.input_mut(|i| i.consume_key(Modifiers::COMMAND, Key::Z)) {
            if self.editor.history.can_undo() {
                if let Err(err) = self.editor.undo() {
                    self.editor.messenger.show_error("Undo failed", &err.to_string());
                }
            }
        }
        if ctx.input_mut(|i| i.consume_key(Modifiers::COMMAND, Key::Y))
            || ctx.input_mut(|i| i.consume_key(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z))
        {
            if self.editor.history.can_redo() {
                if let Err(err) = self.editor.redo() {
                    self.editor.messenger.show_error("Redo failed", &err.to_string());
                }
            }
        }

        // Mask view modes, Ctrl+1..Ctrl+4.
        for mode in MaskViewMode::ALL {
            let (modifiers, key) = mode.shortcut();
            if ctx.input_mut(|i| i.consume_key(modifiers, key)) {
                self.switch_mask_view_mode(mode);
            }
        }

        if ctx.wants_keyboard_input() {
            return;
        }

        // Single-key tool shortcuts.
        let pressed: Vec<Key> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        repeat: false,
                        modifiers,
                        ..
                    } if modifiers.is_none() => Some(*key),
                    _ => None,
                })
                .collect()
        });
        for key in pressed {
            if let Some(id) = Tools::by_shortcut(key) {
                self.tools.change_to(id, &mut self.editor);
            }
        }

        let plain_key = |key: Key| ctx.input(|i| i.modifiers.is_none() && i.key_pressed(key));
        if plain_key(Key::OpenBracket) {
            self.tools.nudge_brush_size(-BRUSH_NUDGE);
        }
        if plain_key(Key::CloseBracket) {
            self.tools.nudge_brush_size(BRUSH_NUDGE);
        }
    }

    fn switch_mask_view_mode(&mut self, mode: MaskViewMode) {
        let Some(layer) = self.editor.document.active_layer() else {
            return;
        };
        if !mode.can_be_assigned_to(layer) {
            self.editor
                .messenger
                .show_status("The active layer has no mask.");
            return;
        }
        let layer_id = layer.id();
        mode.activate(&mut self.editor, &mut self.tools, layer_id);
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(file) = dropped.into_iter().next() else {
            return;
        };
        if self.pending_image.is_some() {
            self.editor
                .messenger
                .show_status("Still importing the previous image.");
            return;
        }

        let name = file
            .path
            .as_ref()
            .and_then(|p| p.file_stem())
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Dropped image".to_owned());
        let source = match (file.path.clone(), file.bytes.clone()) {
            (Some(path), _) => ImageSource::Path(path),
            (None, Some(bytes)) => ImageSource::Bytes(bytes),
            (None, None) => return,
        };

        self.pending_image = Some(Job::spawn(move |_job| {
            let image = match &source {
                ImageSource::Path(path) => image_io::load_image_from_path(path),
                ImageSource::Bytes(bytes) => image_io::load_image_from_bytes(bytes),
            };
            image.map(|img| (name, img))
        }));
    }

    fn drain_pending_image(&mut self) {
        let Some(job) = &self.pending_image else {
            return;
        };
        let Some(result) = job.take_result() else {
            return;
        };
        self.pending_image = None;
        match result {
            Ok((name, image)) => {
                let size = image.size;
                let texture = self.renderer.create_texture(image, &name);
                self.editor
                    .document
                    .add_layer(Layer::new_image(&name, texture, size));
                self.editor
                    .messenger
                    .show_status(&format!("Imported \"{name}\"."));
            }
            Err(err) => self
                .editor
                .messenger
                .show_error("Image import failed", &err.to_string()),
        }
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            for id in ToolId::ALL {
                let selected = self.tools.current_is(id);
                let label = format!("{} ({})", id.display_name(), id.shortcut().name());
                if ui.selectable_label(selected, label).clicked() {
                    self.tools.change_to(id, &mut self.editor);
                }
            }

            ui.separator();

            let mut fg = self.editor.colors.fg();
            ui.label("FG:");
            if egui::color_picker::color_edit_button_srgba(
                ui,
                &mut fg,
                egui::color_picker::Alpha::Opaque,
            )
            .changed()
            {
                self.editor.colors.set_fg(fg);
            }

            let mut bg = self.editor.colors.bg();
            ui.label("BG:");
            if egui::color_picker::color_edit_button_srgba(
                ui,
                &mut bg,
                egui::color_picker::Alpha::Opaque,
            )
            .changed()
            {
                self.editor.colors.set_bg(bg);
            }

            if ui.button("Swap").clicked() {
                self.editor.colors.swap();
            }
        });
    }

    fn layers_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Layers");
        ui.separator();

        if ui.button("Add Layer").clicked() {
            let name = format!("Layer {}", self.editor.document.layers().len());
            self.editor.document.add_layer(Layer::new(&name));
        }

        let mut new_active = None;
        let mut toggled_visibility = None;
        // Topmost layer first.
        let active = self.editor.document.active_index();
        for (i, layer) in self.editor.document.layers().iter().enumerate().rev() {
            ui.horizontal(|ui| {
                let mut visible = layer.visible;
                if ui.checkbox(&mut visible, "").changed() {
                    toggled_visibility = Some(i);
                }
                let label = if layer.has_mask() {
                    format!("{} [M]", layer.name)
                } else {
                    layer.name.clone()
                };
                if ui.selectable_label(i == active, label).clicked() {
                    new_active = Some(i);
                }
            });
        }
        if let Some(i) = new_active {
            self.editor.document.set_active_index(i);
        }
        if let Some(i) = toggled_visibility {
            if let Some(layer) = self.editor.document.layers_mut().get_mut(i) {
                layer.visible = !layer.visible;
            }
        }

        ui.separator();
        self.mask_controls(ui);
        ui.separator();
        self.history_controls(ui);
    }

    fn mask_controls(&mut self, ui: &mut egui::Ui) {
        let Some(layer) = self.editor.document.active_layer() else {
            return;
        };
        let has_mask = layer.has_mask();
        let current_mode = self.editor.view.mask_view_mode();

        if !has_mask {
            if ui.button("Add Mask").clicked() {
                if let Some(layer) = self.editor.document.active_layer_mut() {
                    layer.add_mask();
                }
            }
            return;
        }

        if ui.button("Remove Mask").clicked() {
            if let Some(layer) = self.editor.document.active_layer_mut() {
                layer.remove_mask();
            }
            self.switch_mask_view_mode(MaskViewMode::Normal);
            return;
        }

        let mut selected = current_mode;
        egui::ComboBox::from_label("Mask view")
            .selected_text(selected.display_name())
            .show_ui(ui, |ui| {
                for mode in MaskViewMode::ALL {
                    ui.selectable_value(&mut selected, mode, mode.display_name());
                }
            });
        if selected != current_mode {
            self.switch_mask_view_mode(selected);
        }
    }

    fn history_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui
                .add_enabled(self.editor.history.can_undo(), egui::Button::new("Undo"))
                .clicked()
            {
                if let Err(err) = self.editor.undo() {
                    self.editor.messenger.show_error("Undo failed", &err.to_string());
                }
            }
            if ui
                .add_enabled(self.editor.history.can_redo(), egui::Button::new("Redo"))
                .clicked()
            {
                if let Err(err) = self.editor.redo() {
                    self.editor.messenger.show_error("Redo failed", &err.to_string());
                }
            }
        });
        if self.editor.fade_available() {
            ui.label("Fade available for the last edit");
        }
    }

    fn status_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if let Some(status) = self.editor.messenger.last_status() {
                ui.label(status);
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("{:.0}%", self.editor.view.zoom() * 100.0));
                ui.label(self.editor.view.mask_view_mode().display_name());
            });
        });
    }
}

impl eframe::App for StrataApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let snapshot = Snapshot::new(
            self.editor.document.clone(),
            self.editor.view.clone(),
            self.tools.current().display_name(),
        );
        match snapshot.to_json() {
            Ok(json) => storage.set_string(SESSION_KEY, json),
            Err(err) => warn!("could not save session: {err}"),
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_pending_image();
        self.handle_dropped_files(ctx);
        self.handle_shortcuts(ctx);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| self.toolbar(ui));
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| self.status_bar(ui));
        egui::SidePanel::right("layers")
            .default_width(220.0)
            .show(ctx, |ui| self.layers_panel(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
            let canvas_rect = response.rect;

            self.renderer.render(&self.editor, &painter, canvas_rect);

            let events = self.input.process(ctx, &self.editor.view, canvas_rect);
            for event in events {
                self.tools.dispatch(event, &mut self.editor);
            }
        });

        if self.pending_image.is_some() {
            // Poll the decode job next frame too.
            ctx.request_repaint();
        }
    }
}
