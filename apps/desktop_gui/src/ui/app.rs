use std::time::{Duration, Instant};

use eframe::egui;
use egui::TextureHandle;
use gallery::DecodedImage;
use match_core::{PlayerColor, TileId};

use crate::controller::{events::UiEvent, GameController};
use crate::ui::board::{board_side, paint_tile, tile_at, tile_rect};

const IDLE_REPAINT: Duration = Duration::from_millis(250);

pub struct MatchGameApp {
    controller: GameController,
    player_color: PlayerColor,
    tile_size: f32,
    /// Indexed by `ImageId`.
    textures: Vec<TextureHandle>,
}

impl MatchGameApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        controller: GameController,
        images: Vec<DecodedImage>,
        player_color: PlayerColor,
        tile_size: f32,
    ) -> Self {
        let textures = images
            .iter()
            .enumerate()
            .map(|(index, image)| {
                let color_image = egui::ColorImage::from_rgba_unmultiplied(
                    [image.width, image.height],
                    &image.rgba,
                );
                cc.egui_ctx.load_texture(
                    format!("tile-image-{index}"),
                    color_image,
                    egui::TextureOptions::LINEAR,
                )
            })
            .collect();

        Self {
            controller,
            player_color,
            tile_size,
            textures,
        }
    }

    fn show_board(&mut self, ui: &mut egui::Ui, now: Instant) {
        let side = board_side(self.tile_size);
        let sense = if self.controller.session().accepts_input() {
            egui::Sense::click()
        } else {
            egui::Sense::hover()
        };
        let (response, painter) = ui.allocate_painter(egui::vec2(side, side), sense);
        let origin = response.rect.min;

        let session = self.controller.session();
        for tile in session.tiles() {
            let rect = tile_rect(origin, self.tile_size, tile.id);
            paint_tile(
                &painter,
                rect,
                tile,
                self.player_color,
                self.textures.get(tile.image.0),
            );
        }

        if response.clicked() {
            if let Some(tile) = response
                .interact_pointer_pos()
                .and_then(|pos| tile_at(origin, self.tile_size, pos))
            {
                self.dispatch(UiEvent::TileClicked(tile), now);
            }
        }
    }

    fn dispatch(&mut self, event: UiEvent, now: Instant) {
        if let UiEvent::TileClicked(TileId(index)) = event {
            tracing::debug!(tile = index, "tile clicked");
        }
        self.controller.handle(event, now);
    }

    fn schedule_repaint(&self, ctx: &egui::Context, now: Instant) {
        let wait = self
            .controller
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
            .unwrap_or(IDLE_REPAINT);
        ctx.request_repaint_after(wait);
    }
}

impl eframe::App for MatchGameApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.controller.tick(now);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                if ui
                    .add(egui::Button::new("RESTART").min_size(egui::vec2(72.0, 24.0)))
                    .clicked()
                {
                    self.dispatch(UiEvent::Restart, now);
                }
                ui.add_space(6.0);

                self.show_board(ui, now);

                ui.add_space(6.0);
                ui.label(self.controller.status());
            });
        });

        self.schedule_repaint(ctx, Instant::now());
    }
}
