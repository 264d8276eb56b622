use bevy::prelude::*;

use map_core::EditorSession;

/// Ctrl+Z 撤销，Ctrl+Y / Ctrl+Shift+Z 重做。
///
/// 手势未提交时撤销是逐格的（先回退最近一格），提交之后按整条历史回退；
/// 撤不动/重做不了返回 false，属于正常结果，这里不提示。
pub fn undo_redo_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    session: Option<ResMut<EditorSession>>,
) {
    let ctrl = keys.pressed(KeyCode::ControlLeft) || keys.pressed(KeyCode::ControlRight);
    if !ctrl {
        return;
    }

    let Some(mut session) = session else {
        return;
    };
    let shift = keys.pressed(KeyCode::ShiftLeft) || keys.pressed(KeyCode::ShiftRight);
    let want_undo = keys.just_pressed(KeyCode::KeyZ) && !shift;
    let want_redo =
        keys.just_pressed(KeyCode::KeyY) || (keys.just_pressed(KeyCode::KeyZ) && shift);

    if want_undo {
        session.undo();
        return;
    }

    if want_redo {
        session.redo();
    }
}
