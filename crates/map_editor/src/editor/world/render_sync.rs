use bevy::prelude::*;

use map_core::{EditorSession, MapGrid};

use crate::editor::palette::tile_color;
use crate::editor::types::{CellEntities, CellSprite, EditorConfig};

/// 每个格子生成一个 sprite 实体（初始全部隐藏，空格子不渲染）。
pub fn setup_cell_entities(mut commands: Commands, config: Res<EditorConfig>) {
    let cols = config.map_size.x;
    let rows = config.map_size.y;
    let tile_w = config.tile_size.x as f32;
    let tile_h = config.tile_size.y as f32;

    let mut entities = Vec::with_capacity((cols * rows) as usize);
    for y in 0..rows {
        for x in 0..cols {
            let e = commands
                .spawn((
                    Sprite {
                        color: Color::WHITE,
                        // 四边留 1px，格子之间有缝，低倍率下也看得出网格
                        custom_size: Some(Vec2::new(tile_w - 1.0, tile_h - 1.0)),
                        ..default()
                    },
                    Transform::from_translation(Vec3::new(
                        (x as f32 + 0.5) * tile_w,
                        (y as f32 + 0.5) * tile_h,
                        0.0,
                    )),
                    Visibility::Hidden,
                    CellSprite,
                ))
                .id();
            entities.push(e);
        }
    }
    commands.insert_resource(CellEntities {
        cols,
        rows,
        entities,
    });
}

/// 网格内容变化（写入/撤销/重做/换会话）时全量刷新格子颜色。
/// 50×50 规模下全量刷新足够快，不值得做逐格 diff。
pub fn sync_cells_on_change(
    session: Option<Res<EditorSession>>,
    cells: Option<Res<CellEntities>>,
    mut sprites_q: Query<(&mut Sprite, &mut Visibility), With<CellSprite>>,
    mut last_revision: Local<Option<u64>>,
) {
    let (Some(session), Some(cells)) = (session, cells) else {
        return;
    };
    let revision = session.revision();
    if *last_revision == Some(revision) && !session.is_added() {
        return;
    }
    *last_revision = Some(revision);

    apply_cells_to_entities(session.grid(), &cells, &mut sprites_q);
}

pub fn apply_cells_to_entities(
    grid: &MapGrid,
    cells: &CellEntities,
    sprites_q: &mut Query<(&mut Sprite, &mut Visibility), With<CellSprite>>,
) {
    for y in 0..cells.rows.min(grid.rows()) {
        for x in 0..cells.cols.min(grid.cols()) {
            let idx = cells.idx(x, y);
            if idx >= cells.entities.len() {
                continue;
            }
            let Ok((mut sprite, mut vis)) = sprites_q.get_mut(cells.entities[idx]) else {
                continue;
            };
            match grid.get(x, y) {
                Some(v) if v >= 0 => {
                    sprite.color = tile_color(v);
                    *vis = Visibility::Visible;
                }
                _ => {
                    *vis = Visibility::Hidden;
                }
            }
        }
    }
}
