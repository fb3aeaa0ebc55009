use egui::Color32;

/// The global foreground/background color pair used by the paint tools.
///
/// While a layer mask is being edited, painting happens in grayscale: the
/// user's colors are stashed and replaced with white/black, and restored
/// when mask editing ends.
#[derive(Debug, Clone)]
pub struct FgBgColors {
    foreground: Color32,
    background: Color32,
    saved: Option<(Color32, Color32)>,
    mask_editing: bool,
}

impl Default for FgBgColors {
    fn default() -> Self {
        Self {
            foreground: Color32::BLACK,
            background: Color32::WHITE,
            saved: None,
            mask_editing: false,
        }
    }
}

impl FgBgColors {
    pub fn fg(&self) -> Color32 {
        self.foreground
    }

    pub fn bg(&self) -> Color32 {
        self.background
    }

    pub fn set_fg(&mut self, color: Color32) {
        self.foreground = color;
    }

    pub fn set_bg(&mut self, color: Color32) {
        self.background = color;
    }

    pub fn swap(&mut self) {
        std::mem::swap(&mut self.foreground, &mut self.background);
    }

    pub fn is_mask_editing(&self) -> bool {
        self.mask_editing
    }

    /// Switches the color context in and out of mask-editing mode.
    ///
    /// Entering stashes the current pair and installs white/black; leaving
    /// restores the stashed pair. Re-applying the current mode is a no-op.
    pub fn set_layer_mask_editing(&mut self, editing: bool) {
        if editing == self.mask_editing {
            return;
        }
        self.mask_editing = editing;
        if editing {
            self.saved = Some((self.foreground, self.background));
            self.foreground = Color32::WHITE;
            self.background = Color32::BLACK;
        } else if let Some((fg, bg)) = self.saved.take() {
            self.foreground = fg;
            self.background = bg;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_editing_stashes_and_restores_colors() {
        let mut colors = FgBgColors::default();
        colors.set_fg(Color32::RED);
        colors.set_bg(Color32::BLUE);

        colors.set_layer_mask_editing(true);
        assert_eq!(colors.fg(), Color32::WHITE);
        assert_eq!(colors.bg(), Color32::BLACK);

        colors.set_layer_mask_editing(false);
        assert_eq!(colors.fg(), Color32::RED);
        assert_eq!(colors.bg(), Color32::BLUE);
    }

    #[test]
    fn reapplying_the_same_mode_keeps_user_edits() {
        let mut colors = FgBgColors::default();
        colors.set_layer_mask_editing(true);
        colors.set_fg(Color32::GRAY);

        colors.set_layer_mask_editing(true);
        assert_eq!(colors.fg(), Color32::GRAY);
    }

    #[test]
    fn swap_exchanges_the_pair() {
        let mut colors = FgBgColors::default();
        colors.swap();
        assert_eq!(colors.fg(), Color32::WHITE);
        assert_eq!(colors.bg(), Color32::BLACK);
    }
}
