pub mod cloudinary;

pub use cloudinary::{upload_image, MediaError, UploadResult};
