use image::{Rgb, RgbImage};

use crate::constants::BUBBLE_RADIUS;
use crate::sim::WorldSnapshot;

const BACKGROUND: Rgb<u8> = Rgb([0x12, 0x12, 0x12]);

/// Rasterizes one snapshot into the render surface: dark backdrop, the
/// static grid, and the projectile.
pub fn render(snapshot: &WorldSnapshot) -> RgbImage {
    let width = snapshot.width.max(0.0) as u32;
    let height = snapshot.height.max(0.0) as u32;
    if width == 0 || height == 0 {
        return RgbImage::new(width, height);
    }
    let mut surface = RgbImage::from_pixel(width, height, BACKGROUND);

    for bubble in snapshot.bubbles.iter().filter(|bubble| bubble.active) {
        fill_circle(
            &mut surface,
            bubble.x,
            bubble.y,
            BUBBLE_RADIUS,
            Rgb(bubble.color.rgb()),
        );
    }

    fill_circle(
        &mut surface,
        snapshot.ball_pos.x,
        snapshot.ball_pos.y,
        BUBBLE_RADIUS,
        Rgb(snapshot.ball_color.rgb()),
    );

    surface
}

fn fill_circle(surface: &mut RgbImage, cx: f32, cy: f32, radius: f32, color: Rgb<u8>) {
    let (width, height) = surface.dimensions();
    if cx + radius < 0.0 || cy + radius < 0.0 || cx - radius >= width as f32 || cy - radius >= height as f32 {
        return;
    }
    let min_x = (cx - radius).floor().max(0.0) as u32;
    let max_x = ((cx + radius).ceil() as i64).clamp(0, width as i64 - 1) as u32;
    let min_y = (cy - radius).floor().max(0.0) as u32;
    let max_y = ((cy + radius).ceil() as i64).clamp(0, height as i64 - 1) as u32;

    let radius_sq = radius * radius;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            if dx * dx + dy * dy <= radius_sq {
                surface.put_pixel(x, y, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Game;

    #[test]
    fn surface_matches_world_dimensions() {
        let game = Game::new(800, 600, 1);
        let surface = render(&game.snapshot());
        assert_eq!(surface.dimensions(), (800, 600));
    }

    #[test]
    fn bubble_centers_take_their_configured_color() {
        let game = Game::new(800, 600, 0xDEAD_BEEF);
        let snapshot = game.snapshot();
        let surface = render(&snapshot);
        let bubble = &snapshot.bubbles[0];
        let pixel = surface.get_pixel(bubble.x as u32, bubble.y as u32);
        assert_eq!(pixel.0, bubble.color.rgb());
    }

    #[test]
    fn corners_stay_background() {
        let game = Game::new(800, 600, 1);
        let surface = render(&game.snapshot());
        assert_eq!(surface.get_pixel(0, 599).0, [0x12, 0x12, 0x12]);
    }

    #[test]
    fn projectile_is_drawn_at_the_anchor() {
        let game = Game::new(800, 600, 1);
        let snapshot = game.snapshot();
        let surface = render(&snapshot);
        let pixel = surface.get_pixel(snapshot.ball_pos.x as u32, snapshot.ball_pos.y as u32);
        assert_eq!(pixel.0, snapshot.ball_color.rgb());
    }
}
