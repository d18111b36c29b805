use crate::config::ExportConfig;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use image::imageops::FilterType;
use image::ImageFormat;
use std::io::Cursor;
use std::time::Duration;
use tracing::debug;
use url::Url;

// ── Source trait ──────────────────────────────────────────────────────────────

/// Where product images come from. Swapped for a stub in tests.
#[async_trait]
pub trait ThumbnailSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

// ── HTTP source ───────────────────────────────────────────────────────────────

/// One plain GET per image: no retry, no timeout unless configured.
pub struct HttpThumbnails {
    inner: reqwest::Client,
}

impl HttpThumbnails {
    pub fn new(config: &ExportConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .gzip(true);
        if let Some(secs) = config.image_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let inner = builder.build().context("Failed to build HTTP client")?;
        Ok(Self { inner })
    }
}

#[async_trait]
impl ThumbnailSource for HttpThumbnails {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let parsed = Url::parse(url).with_context(|| format!("Invalid image URL {:?}", url))?;
        debug!("GET {}", parsed);

        let resp = self.inner.get(parsed).send().await.context("Request error")?;
        let status = resp.status();
        if !status.is_success() {
            bail!("HTTP error {}", status);
        }
        let body = resp.bytes().await.context("Failed to read response body")?;
        Ok(body.to_vec())
    }
}

// ── Resize ────────────────────────────────────────────────────────────────────

/// Decode, scale to `width` keeping the aspect ratio (height truncated), re-encode as PNG.
pub fn prepare_thumbnail(bytes: &[u8], width: u32) -> Result<Vec<u8>> {
    let img = image::load_from_memory(bytes).context("Failed to decode image")?;
    if img.width() == 0 || img.height() == 0 {
        bail!("Image has no pixels");
    }

    let scale = width as f64 / img.width() as f64;
    let height = ((img.height() as f64 * scale) as u32).max(1);
    let resized = img.resize_exact(width, height, FilterType::Lanczos3);

    let mut png = Vec::new();
    resized
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .context("Failed to encode PNG")?;
    Ok(png)
}
