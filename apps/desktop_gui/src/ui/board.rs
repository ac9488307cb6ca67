//! Board geometry and tile painting.

use eframe::egui;
use match_core::{PlayerColor, Tile, TileId, GRID_SIDE, NEUTRAL_RGB};

const OUTLINE_WIDTH: f32 = 2.0;

pub fn color32(rgb: [u8; 3]) -> egui::Color32 {
    egui::Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

pub fn board_side(tile_size: f32) -> f32 {
    tile_size * GRID_SIDE as f32
}

pub fn tile_rect(origin: egui::Pos2, tile_size: f32, tile: TileId) -> egui::Rect {
    let row = (tile.0 / GRID_SIDE) as f32;
    let col = (tile.0 % GRID_SIDE) as f32;
    egui::Rect::from_min_size(
        origin + egui::vec2(col * tile_size, row * tile_size),
        egui::vec2(tile_size, tile_size),
    )
}

/// Maps a pointer position on the board to the tile under it.
pub fn tile_at(origin: egui::Pos2, tile_size: f32, pos: egui::Pos2) -> Option<TileId> {
    let offset = pos - origin;
    if offset.x < 0.0 || offset.y < 0.0 || tile_size <= 0.0 {
        return None;
    }
    let col = (offset.x / tile_size) as usize;
    let row = (offset.y / tile_size) as usize;
    if col >= GRID_SIDE || row >= GRID_SIDE {
        return None;
    }
    Some(TileId(row * GRID_SIDE + col))
}

/// Centers an image of `size` inside `rect`, shrinking it if needed.
pub fn fit_image(rect: egui::Rect, size: egui::Vec2) -> egui::Rect {
    let scale = (rect.width() / size.x)
        .min(rect.height() / size.y)
        .min(1.0);
    egui::Rect::from_center_size(rect.center(), size * scale)
}

pub fn paint_tile(
    painter: &egui::Painter,
    rect: egui::Rect,
    tile: &Tile,
    player_color: PlayerColor,
    texture: Option<&egui::TextureHandle>,
) {
    let fill = if tile.is_matched() {
        color32(player_color.rgb())
    } else {
        color32(NEUTRAL_RGB)
    };
    painter.rect(
        rect,
        0.0,
        fill,
        egui::Stroke::new(OUTLINE_WIDTH, color32(player_color.rgb())),
        egui::StrokeKind::Inside,
    );

    if !tile.is_revealed() {
        return;
    }
    if let Some(texture) = texture {
        painter.image(
            texture.id(),
            fit_image(rect.shrink(OUTLINE_WIDTH), texture.size_vec2()),
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_positions_map_to_row_major_tiles() {
        let origin = egui::pos2(10.0, 20.0);

        assert_eq!(tile_at(origin, 150.0, egui::pos2(10.0, 20.0)), Some(TileId(0)));
        assert_eq!(tile_at(origin, 150.0, egui::pos2(170.0, 20.0)), Some(TileId(1)));
        assert_eq!(tile_at(origin, 150.0, egui::pos2(10.0, 171.0)), Some(TileId(4)));
        assert_eq!(tile_at(origin, 150.0, egui::pos2(609.0, 619.0)), Some(TileId(15)));
    }

    #[test]
    fn pointer_outside_board_hits_nothing() {
        let origin = egui::pos2(0.0, 0.0);

        assert_eq!(tile_at(origin, 150.0, egui::pos2(-1.0, 5.0)), None);
        assert_eq!(tile_at(origin, 150.0, egui::pos2(600.0, 5.0)), None);
        assert_eq!(tile_at(origin, 150.0, egui::pos2(5.0, 600.0)), None);
    }

    #[test]
    fn tile_rects_tile_the_board() {
        let origin = egui::pos2(0.0, 0.0);

        let rect = tile_rect(origin, 150.0, TileId(6));

        assert_eq!(rect.min, egui::pos2(300.0, 150.0));
        assert_eq!(rect.size(), egui::vec2(150.0, 150.0));
        assert_eq!(board_side(150.0), 600.0);
        assert_eq!(tile_at(origin, 150.0, rect.center()), Some(TileId(6)));
    }

    #[test]
    fn large_images_shrink_and_small_images_keep_size() {
        let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(100.0, 100.0));

        let shrunk = fit_image(rect, egui::vec2(200.0, 50.0));
        assert_eq!(shrunk.size(), egui::vec2(100.0, 25.0));
        assert_eq!(shrunk.center(), rect.center());

        let kept = fit_image(rect, egui::vec2(40.0, 30.0));
        assert_eq!(kept.size(), egui::vec2(40.0, 30.0));
    }

    #[test]
    fn player_colors_convert_to_egui() {
        assert_eq!(color32(PlayerColor::Magenta.rgb()), egui::Color32::from_rgb(255, 0, 255));
        assert_eq!(color32(NEUTRAL_RGB), egui::Color32::from_rgb(255, 255, 0));
    }
}
