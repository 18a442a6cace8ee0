use crate::fetch::QueryState;
use crate::gui::State;
use crate::images::ImageCache;
use crate::route::Route;
use egui_extras::{Column, TableBuilder};
use pokedex_model::pokemon::{join_tags, Pokemon};

const DIALOG_WIDTH: f32 = 450.0;
const SPRITE_SIZE: f32 = 250.0;

/// A click that lands on the dimmed backdrop closes the overlay; one inside
/// the dialog body must not.
fn backdrop_hit(screen: egui::Rect, dialog: egui::Rect, pointer: egui::Pos2) -> bool {
    screen.contains(pointer) && !dialog.contains(pointer)
}

pub fn draw(ctx: &egui::Context, state: &mut State) {
    if state.route.pokemon_id().is_none() {
        // nothing selected: no backdrop, no dialog
        return;
    }

    let screen = ctx.screen_rect();
    let backdrop = egui::Area::new(egui::Id::new("detail_backdrop"))
        .fixed_pos(screen.min)
        .order(egui::Order::Middle)
        .show(ctx, |ui| {
            ui.painter()
                .rect_filled(screen, egui::CornerRadius::ZERO, egui::Color32::from_black_alpha(128));
            ui.allocate_rect(screen, egui::Sense::click())
        })
        .inner;

    let mut close = false;
    let window = egui::Window::new("detail_dialog")
        .title_bar(false)
        .collapsible(false)
        .resizable(false)
        .order(egui::Order::Foreground)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.set_width(DIALOG_WIDTH);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                if ui.button(egui::RichText::new("×").size(18.0)).clicked() {
                    close = true;
                }
            });
            match state.pokemon_by_id.state() {
                QueryState::Idle | QueryState::Loading => {
                    ui.label("Loading...");
                }
                QueryState::Failed(_) => {
                    ui.label("Error loading Pokémon data.");
                }
                QueryState::Ready(Some(pokemon)) => draw_pokemon(ui, &mut state.images, pokemon),
                // null creature: keep the empty shell, same as the web dialog
                QueryState::Ready(None) => {}
            }
        });

    if backdrop.clicked() {
        let dialog_rect = window.map(|w| w.response.rect).unwrap_or(egui::Rect::NOTHING);
        let pointer = ctx.input(|i| i.pointer.interact_pos());
        if pointer.map_or(true, |pos| backdrop_hit(screen, dialog_rect, pos)) {
            close = true;
        }
    }
    if close {
        state.navigate(Route::List);
    }
}

fn draw_pokemon(ui: &mut egui::Ui, images: &mut ImageCache, pokemon: &Pokemon) {
    ui.vertical_centered(|ui| {
        ui.label(
            egui::RichText::new(format!("{} #{}", pokemon.name, pokemon.number))
                .size(22.0)
                .strong(),
        );
        ui.add_space(8.0);
        match images.texture(&pokemon.image) {
            Some(texture) => {
                ui.image((texture.id(), egui::Vec2::splat(SPRITE_SIZE)));
            }
            None => {
                ui.allocate_space(egui::Vec2::splat(SPRITE_SIZE));
            }
        }
    });
    ui.add_space(12.0);

    let rows = [
        ("Classification:", pokemon.classification.clone()),
        ("Type:", join_tags(&pokemon.types)),
        ("Height:", pokemon.height.display()),
        ("Weight:", pokemon.weight.display()),
        ("Max CP:", pokemon.max_cp.to_string()),
        ("Max HP:", pokemon.max_hp.to_string()),
        ("Resistant:", join_tags(&pokemon.resistant)),
        ("Weaknesses:", join_tags(&pokemon.weaknesses)),
    ];
    TableBuilder::new(ui)
        .column(Column::exact(110.0))
        .column(Column::remainder())
        .striped(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .body(|mut body| {
            for (label, value) in rows.iter() {
                body.row(20.0, |mut row| {
                    row.col(|ui| {
                        ui.strong(*label);
                    });
                    row.col(|ui| {
                        ui.label(value);
                    });
                });
            }
        });
    ui.add_space(4.0);
}

#[test]
fn test_backdrop_hit() {
    let screen = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(800.0, 600.0));
    let dialog = egui::Rect::from_min_max(egui::pos2(200.0, 150.0), egui::pos2(600.0, 450.0));
    assert!(backdrop_hit(screen, dialog, egui::pos2(20.0, 20.0)));
    // inside the dialog body: must not close
    assert!(!backdrop_hit(screen, dialog, egui::pos2(400.0, 300.0)));
    // edges of the dialog count as inside
    assert!(!backdrop_hit(screen, dialog, egui::pos2(200.0, 150.0)));
    assert!(!backdrop_hit(screen, dialog, egui::pos2(900.0, 300.0)));
}
