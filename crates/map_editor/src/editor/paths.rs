//! 与 workspace/assets 路径相关的工具函数。

use std::path::PathBuf;

/// workspace 的 `assets/` 目录绝对路径。
///
/// `CARGO_MANIFEST_DIR` 指向 `crates/map_editor`，因此向上两级即可到 workspace 根。
pub fn workspace_assets_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("assets")
}
