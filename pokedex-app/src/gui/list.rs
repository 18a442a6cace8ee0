use crate::fetch::QueryState;
use crate::gui::State;
use crate::route::Route;
use pokedex_model::pokemon::join_tags;
use std::time::Instant;

const CARD_WIDTH: f32 = 180.0;
const SPRITE_SIZE: f32 = 100.0;

pub fn draw(ctx: &egui::Context, state: &mut State) {
    let mut clicked_id: Option<String> = None;

    egui::CentralPanel::default().show(ctx, |ui| match state.pokemons.state() {
        QueryState::Idle | QueryState::Loading => {
            ui.centered_and_justified(|ui| {
                ui.label(egui::RichText::new("Loading...").size(20.0));
            });
        }
        QueryState::Failed(_) => {
            ui.centered_and_justified(|ui| {
                ui.label(egui::RichText::new("Error loading Pokémon!").size(20.0));
            });
        }
        QueryState::Ready(items) => {
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                // always editable; only the filter lags behind the debounce
                let response = ui.add(
                    egui::TextEdit::singleline(&mut state.search)
                        .hint_text("Search Pokemon...")
                        .desired_width(400.0),
                );
                if response.changed() {
                    state.debounce.set(&state.search, Instant::now());
                }
            });
            ui.add_space(12.0);

            let visible = state.filter.query(items, state.list_revision, state.debounce.value());
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for &index in visible {
                        let pokemon = &items[index];
                        let response = egui::Frame::group(ui.style())
                            .inner_margin(egui::Margin::same(8))
                            .show(ui, |ui| {
                                ui.set_width(CARD_WIDTH);
                                ui.vertical_centered(|ui| {
                                    match state.images.texture(&pokemon.image) {
                                        Some(texture) => {
                                            ui.image((texture.id(), egui::Vec2::splat(SPRITE_SIZE)));
                                        }
                                        None => {
                                            ui.allocate_space(egui::Vec2::splat(SPRITE_SIZE));
                                        }
                                    }
                                    ui.label(egui::RichText::new(&pokemon.name).size(16.0).strong());
                                    ui.label(format!("#{}", pokemon.number));
                                    ui.label(join_tags(&pokemon.types));
                                });
                            })
                            .response
                            .interact(egui::Sense::click());
                        if response.clicked() {
                            clicked_id = Some(pokemon.id.clone());
                        }
                    }
                });
            });
        }
    });

    if let Some(id) = clicked_id {
        state.navigate(Route::Detail(id));
    }
}
