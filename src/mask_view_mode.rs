use egui::{Key, Modifiers};
use serde::{Deserialize, Serialize};

use crate::context::EditorContext;
use crate::layer::{Layer, LayerId};
use crate::tools::Tools;

/// Whether the layer or its mask is visible/edited, and whether mask
/// editing is shown as a rubylith overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MaskViewMode {
    #[default]
    Normal,
    ShowMask,
    EditMask,
    Rubylith,
}

/// Per-variant static properties.
struct ModeProps {
    display_name: &'static str,
    show_mask: bool,
    edit_mask: bool,
    show_ruby: bool,
    /// False restricts the mode to mask-bearing layers.
    on_any_layer: bool,
    shortcut: Key,
}

const fn props(mode: MaskViewMode) -> &'static ModeProps {
    match mode {
        MaskViewMode::Normal => &ModeProps {
            display_name: "Show and Edit Layer",
            show_mask: false,
            edit_mask: false,
            show_ruby: false,
            on_any_layer: true,
            shortcut: Key::Num1,
        },
        MaskViewMode::ShowMask => &ModeProps {
            display_name: "Show and Edit Mask",
            show_mask: true,
            edit_mask: true,
            show_ruby: false,
            on_any_layer: false,
            shortcut: Key::Num2,
        },
        MaskViewMode::EditMask => &ModeProps {
            display_name: "Show Layer, but Edit Mask",
            show_mask: false,
            edit_mask: true,
            show_ruby: false,
            on_any_layer: false,
            shortcut: Key::Num3,
        },
        MaskViewMode::Rubylith => &ModeProps {
            display_name: "Show Mask as Rubylith, Edit Mask",
            show_mask: false,
            edit_mask: true,
            show_ruby: true,
            on_any_layer: false,
            shortcut: Key::Num4,
        },
    }
}

impl MaskViewMode {
    pub const ALL: [MaskViewMode; 4] = [
        MaskViewMode::Normal,
        MaskViewMode::ShowMask,
        MaskViewMode::EditMask,
        MaskViewMode::Rubylith,
    ];

    pub fn display_name(self) -> &'static str {
        props(self).display_name
    }

    pub fn show_mask(self) -> bool {
        props(self).show_mask
    }

    pub fn edit_mask(self) -> bool {
        props(self).edit_mask
    }

    pub fn show_ruby(self) -> bool {
        props(self).show_ruby
    }

    /// The accelerator: Ctrl+1..Ctrl+4 (Cmd on mac).
    pub fn shortcut(self) -> (Modifiers, Key) {
        (Modifiers::COMMAND, props(self).shortcut)
    }

    /// Menu-construction-time restriction: the mask modes are only offered
    /// on layers that carry a mask.
    pub fn allowed_on(self, layer: &Layer) -> bool {
        props(self).on_any_layer || layer.has_mask()
    }

    /// Whether this mode may legally be installed for `layer`. Callers must
    /// check this before `activate`.
    pub fn can_be_assigned_to(self, layer: &Layer) -> bool {
        if self.edit_mask() || self.show_mask() {
            return layer.has_mask();
        }
        true
    }

    /// Installs this mode on the view and `layer` together.
    ///
    /// The layer's mask-editing flag always follows the mode; the heavier
    /// side effects (color context, active-tool reconfiguration, fade
    /// availability) only run when the view's mode actually changed.
    /// Tool reconfiguration is skipped for mock views.
    pub fn activate(self, ctx: &mut EditorContext, tools: &mut Tools, layer_id: LayerId) {
        let edit_mask = self.edit_mask();
        let changed = ctx.view.set_mask_view_mode(self);

        let Some(layer) = ctx.document.find_layer_mut(layer_id) else {
            debug_assert!(false, "mask view mode activated for unknown layer");
            log::warn!("mask view mode activated for unknown layer {layer_id}");
            return;
        };
        debug_assert!(self.can_be_assigned_to(layer));
        layer.set_mask_editing(edit_mask);

        if changed {
            log::debug!("mask view mode -> {}", self.display_name());
            ctx.colors.set_layer_mask_editing(edit_mask);
            if !ctx.view.is_mock() {
                tools.setup_mask_editing(edit_mask, ctx);
            }
            ctx.refresh_fade_availability();
        }
    }
}

impl std::fmt::Display for MaskViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
