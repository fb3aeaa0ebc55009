//! Mask view mode switching against a real context and tool registry.

use egui::Color32;
use strata_paint::{EditorContext, MaskViewMode, Tools};

fn context_with_mask() -> (EditorContext, Tools) {
    let (mut ctx, _) = EditorContext::new_headless();
    ctx.document.active_layer_mut().unwrap().add_mask();
    (ctx, Tools::new())
}

#[test]
fn mask_modes_require_a_mask() {
    let (ctx, _) = EditorContext::new_headless();
    let layer = ctx.document.active_layer().unwrap();

    assert!(MaskViewMode::Normal.can_be_assigned_to(layer));
    assert!(!MaskViewMode::ShowMask.can_be_assigned_to(layer));
    assert!(!MaskViewMode::EditMask.can_be_assigned_to(layer));
    assert!(!MaskViewMode::Rubylith.can_be_assigned_to(layer));
}

#[test]
fn all_modes_are_assignable_with_a_mask() {
    let (ctx, _) = context_with_mask();
    let layer = ctx.document.active_layer().unwrap();
    for mode in MaskViewMode::ALL {
        assert!(mode.can_be_assigned_to(layer), "{mode}");
        assert!(mode.allowed_on(layer), "{mode}");
    }
}

#[test]
fn only_normal_is_offered_without_a_mask() {
    let (ctx, _) = EditorContext::new_headless();
    let layer = ctx.document.active_layer().unwrap();
    let offered: Vec<_> = MaskViewMode::ALL
        .into_iter()
        .filter(|m| m.allowed_on(layer))
        .collect();
    assert_eq!(offered, vec![MaskViewMode::Normal]);
}

#[test]
fn activating_edit_mask_switches_layer_and_colors() {
    let (mut ctx, mut tools) = context_with_mask();
    ctx.colors.set_fg(Color32::RED);
    let layer_id = ctx.document.active_layer().unwrap().id();

    MaskViewMode::EditMask.activate(&mut ctx, &mut tools, layer_id);

    assert_eq!(ctx.view.mask_view_mode(), MaskViewMode::EditMask);
    assert!(ctx.document.active_layer().unwrap().is_mask_editing());
    assert_eq!(ctx.colors.fg(), Color32::WHITE);
    assert_eq!(ctx.colors.bg(), Color32::BLACK);

    MaskViewMode::Normal.activate(&mut ctx, &mut tools, layer_id);

    assert!(!ctx.document.active_layer().unwrap().is_mask_editing());
    assert_eq!(ctx.colors.fg(), Color32::RED);
}

#[test]
fn reactivating_the_current_mode_skips_the_side_effects() {
    let (mut ctx, mut tools) = context_with_mask();
    let layer_id = ctx.document.active_layer().unwrap().id();

    MaskViewMode::EditMask.activate(&mut ctx, &mut tools, layer_id);
    // The user picks a new paint color while editing the mask.
    ctx.colors.set_fg(Color32::GRAY);

    MaskViewMode::EditMask.activate(&mut ctx, &mut tools, layer_id);

    // A re-activation must not reset the color context.
    assert_eq!(ctx.colors.fg(), Color32::GRAY);
    assert!(ctx.document.active_layer().unwrap().is_mask_editing());
}

#[test]
fn mode_properties_match_their_meaning() {
    assert!(!MaskViewMode::Normal.edit_mask());
    assert!(MaskViewMode::ShowMask.show_mask());
    assert!(MaskViewMode::ShowMask.edit_mask());
    assert!(MaskViewMode::EditMask.edit_mask());
    assert!(!MaskViewMode::EditMask.show_mask());
    assert!(MaskViewMode::Rubylith.show_ruby());
    assert!(MaskViewMode::Rubylith.edit_mask());
}

#[test]
fn fade_availability_follows_the_edited_drawable() {
    use egui::Pos2;
    use strata_paint::{Command, DrawableTarget, Stroke};

    let (mut ctx, mut tools) = context_with_mask();
    let layer_id = ctx.document.active_layer().unwrap().id();

    ctx.execute(Command::AddStroke {
        target: DrawableTarget::Layer(layer_id),
        stroke: Stroke::new(Color32::BLACK, 2.0, vec![Pos2::ZERO, Pos2::new(1.0, 1.0)]),
    })
    .unwrap();
    assert!(ctx.fade_available());

    // The last edit was on the layer, not the mask.
    MaskViewMode::EditMask.activate(&mut ctx, &mut tools, layer_id);
    assert!(!ctx.fade_available());

    MaskViewMode::Normal.activate(&mut ctx, &mut tools, layer_id);
    assert!(ctx.fade_available());
}
