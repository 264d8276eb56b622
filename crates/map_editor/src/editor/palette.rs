//! tile 序号 → 画布颜色。
//!
//! 没有图片素材时用程序化调色板：色相按黄金角散开，
//! 饱和度/亮度分组循环，相邻序号肉眼可分。

use bevy::prelude::*;

pub fn tile_color(index: i32) -> Color {
    if index < 0 {
        return Color::NONE;
    }
    let hue = (index as f32 * 137.508) % 360.0;
    let saturation = [0.75, 0.55, 0.9][(index % 3) as usize];
    let lightness = [0.5, 0.65, 0.35][((index / 3) % 3) as usize];
    Color::hsl(hue, saturation, lightness)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_is_stable_per_index() {
        assert_eq!(tile_color(42), tile_color(42));
    }

    #[test]
    fn neighbouring_indices_differ() {
        for i in 0..32 {
            assert_ne!(tile_color(i), tile_color(i + 1));
        }
    }
}
