pub mod catalog;
pub mod photo;
pub mod preview;
pub mod session;

pub use catalog::{handle_adjustments, handle_presets, AdjustmentInfo, PresetResponse};
pub use catalog::{__path_handle_adjustments, __path_handle_presets};
pub use photo::{handle_delete_photo, handle_upload, UploadResponse};
pub use photo::{__path_handle_delete_photo, __path_handle_upload};
pub use preview::{handle_download, handle_preview, PreviewQuery};
pub use preview::{__path_handle_download, __path_handle_preview};
pub use session::{
    handle_apply_preset, handle_replace_adjustments, handle_reset, handle_session,
    handle_set_adjustment, SessionResponse, SetAdjustmentRequest,
};
pub use session::{
    __path_handle_apply_preset, __path_handle_replace_adjustments, __path_handle_reset,
    __path_handle_session, __path_handle_set_adjustment,
};
