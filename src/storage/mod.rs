pub mod cloudinary;

use anyhow::Result;
use async_trait::async_trait;

/// Media upload seam. The production implementation forwards bytes to the
/// external media host and hands back a stable public URL; tests substitute
/// a fake that mints URLs locally.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Upload one image under the given folder partition ("projects",
    /// "experiences") and return its hosted URL.
    async fn upload_image(&self, folder: &str, filename: &str, data: Vec<u8>) -> Result<String>;
}
