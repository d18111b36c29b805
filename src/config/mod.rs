use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub extractor: ExtractorConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// Where the saved search pages live and how they are named (`zem*.html`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputConfig {
    #[serde(default = "default_input_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    #[serde(default = "default_file_extension")]
    pub file_extension: String,
}

/// Field extraction configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractorConfig {
    /// Prepended to relative product hrefs.
    #[serde(default = "default_site_origin")]
    pub site_origin: String,

    #[serde(default)]
    pub selectors: SelectorConfig,
}

/// CSS selectors for the saved result page markup.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SelectorConfig {
    #[serde(default = "default_product_selector")]
    pub product: String,

    #[serde(default = "default_image_selector")]
    pub image: String,

    #[serde(default = "default_price_selector")]
    pub price: String,

    #[serde(default = "default_sold_selector")]
    pub sold: String,

    #[serde(default = "default_rating_selector")]
    pub rating: String,
}

/// Spreadsheet / thumbnail configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportConfig {
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Optional CSV copy of the exported rows.
    #[serde(default)]
    pub csv_path: Option<PathBuf>,

    #[serde(default = "default_true")]
    pub embed_images: bool,

    /// Pixel width thumbnails are resampled to before embedding.
    #[serde(default = "default_thumbnail_width")]
    pub thumbnail_width: u32,

    #[serde(default = "default_image_display_width")]
    pub image_display_width: u32,

    #[serde(default = "default_image_display_height")]
    pub image_display_height: u32,

    #[serde(default = "default_header_row_height")]
    pub header_row_height: f64,

    #[serde(default = "default_data_row_height")]
    pub data_row_height: f64,

    #[serde(default = "default_image_column_width")]
    pub image_column_width: f64,

    #[serde(default = "default_max_column_width")]
    pub max_column_width: f64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// No timeout unless set.
    #[serde(default)]
    pub image_timeout_secs: Option<u64>,
}

// ── Defaults ─────────────────────────────────────────────────────────────────

fn default_input_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_file_prefix() -> String {
    "zem".to_string()
}
fn default_file_extension() -> String {
    "html".to_string()
}
fn default_site_origin() -> String {
    "https://shopee.com.br".to_string()
}
fn default_product_selector() -> String {
    "a.contents".to_string()
}
fn default_image_selector() -> String {
    "img.object-contain".to_string()
}
fn default_price_selector() -> String {
    r#"span[class~="text-base/5"]"#.to_string()
}
fn default_sold_selector() -> String {
    r#"div[class="truncate text-shopee-black87 text-xs min-h-4"]"#.to_string()
}
fn default_rating_selector() -> String {
    r#"div[class="text-shopee-black87 text-xs/sp14 flex-none"]"#.to_string()
}
fn default_output_path() -> PathBuf {
    PathBuf::from("produtos_shopee.xlsx")
}
fn default_true() -> bool {
    true
}
fn default_thumbnail_width() -> u32 {
    100
}
fn default_image_display_width() -> u32 {
    100
}
fn default_image_display_height() -> u32 {
    75
}
fn default_header_row_height() -> f64 {
    40.0
}
fn default_data_row_height() -> f64 {
    75.0
}
fn default_image_column_width() -> f64 {
    15.0
}
fn default_max_column_width() -> f64 {
    100.0
}
fn default_user_agent() -> String {
    "shopee-sheet/0.1 (thumbnail fetch for offline listing export)".to_string()
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            dir: default_input_dir(),
            file_prefix: default_file_prefix(),
            file_extension: default_file_extension(),
        }
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            site_origin: default_site_origin(),
            selectors: SelectorConfig::default(),
        }
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            product: default_product_selector(),
            image: default_image_selector(),
            price: default_price_selector(),
            sold: default_sold_selector(),
            rating: default_rating_selector(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            csv_path: None,
            embed_images: true,
            thumbnail_width: default_thumbnail_width(),
            image_display_width: default_image_display_width(),
            image_display_height: default_image_display_height(),
            header_row_height: default_header_row_height(),
            data_row_height: default_data_row_height(),
            image_column_width: default_image_column_width(),
            max_column_width: default_max_column_width(),
            user_agent: default_user_agent(),
            image_timeout_secs: None,
        }
    }
}

// ── Loader ───────────────────────────────────────────────────────────────────

impl AppConfig {
    /// Load configuration from file + environment overrides
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let cfg = config::Config::builder()
            .add_source(
                config::File::with_name("config/default")
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(
                config::File::with_name("config/local")
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(config::Environment::with_prefix("SHOPEE_SHEET").separator("__"))
            .build()
            .context("Failed to read configuration sources")?;

        cfg.try_deserialize().context("Invalid configuration")
    }
}
