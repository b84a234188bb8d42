pub mod annotations;
pub mod compositor;
pub mod decode;
pub mod png_export;

pub use annotations::AnnotationLayer;
pub use compositor::Compositor;
pub use decode::{decode_photo, fit_dimensions, PhotoFormat};
pub use png_export::{encode_png, EXPORT_FILENAME};
