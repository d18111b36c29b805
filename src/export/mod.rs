//! Spreadsheet output: one styled header row, one row per product, a thumbnail
//! in column A when it can be fetched.

pub mod csv_export;
pub mod thumbnail;

use crate::config::ExportConfig;
use crate::models::ProductRecord;
use crate::scraper::cleaner::PRICE_UNAVAILABLE;
use crate::utils::preview;
use anyhow::{Context, Result};
use rust_xlsxwriter::{Color, Format, FormatAlign, Image, Workbook, Worksheet};
use std::path::Path;
use tracing::{debug, error, info};

use self::thumbnail::{prepare_thumbnail, ThumbnailSource};

pub const HEADERS: [&str; 6] = [
    "Imagem",
    "Nome do Produto",
    "Valor (R$)",
    "Quantidade Vendida",
    "Avaliação (⭐)",
    "Link do Produto",
];

const HEADER_FILL: u32 = 0x4F81BD;

// ── Cell values ───────────────────────────────────────────────────────────────

#[derive(Debug, PartialEq)]
enum CellValue<'a> {
    Text(&'a str),
    Integer(u64),
    Decimal(f64),
}

impl CellValue<'_> {
    /// Character count of the value as it reads in the sheet.
    fn display_len(&self) -> usize {
        match self {
            CellValue::Text(s) => s.chars().count(),
            CellValue::Integer(n) => n.to_string().len(),
            CellValue::Decimal(n) => format!("{:?}", n).len(),
        }
    }
}

/// Columns B..F for one record.
fn row_values(record: &ProductRecord) -> [CellValue<'_>; 5] {
    [
        CellValue::Text(&record.name),
        match record.price {
            Some(p) => CellValue::Decimal(p),
            None => CellValue::Text(PRICE_UNAVAILABLE),
        },
        CellValue::Integer(record.units_sold),
        CellValue::Decimal(record.rating),
        CellValue::Text(&record.link),
    ]
}

/// Widths for columns B..F: longest value (header included) + 2, capped at `max`.
pub fn column_widths(records: &[ProductRecord], max: f64) -> Vec<f64> {
    let mut longest: Vec<usize> = HEADERS[1..].iter().map(|h| h.chars().count()).collect();
    for record in records {
        for (i, value) in row_values(record).iter().enumerate() {
            longest[i] = longest[i].max(value.display_len());
        }
    }
    longest
        .into_iter()
        .map(|len| ((len + 2) as f64).min(max))
        .collect()
}

// ── Exporter ──────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct ExportReport {
    pub rows: usize,
    pub images_embedded: usize,
    pub image_failures: usize,
}

pub struct SpreadsheetExporter<'a> {
    config: &'a ExportConfig,
}

impl<'a> SpreadsheetExporter<'a> {
    pub fn new(config: &'a ExportConfig) -> Self {
        Self { config }
    }

    pub fn output_path(&self) -> &Path {
        &self.config.output_path
    }

    /// Build and save the workbook. Images are fetched one row at a time;
    /// `None` leaves every image cell empty.
    pub async fn write(
        &self,
        records: &[ProductRecord],
        thumbnails: Option<&dyn ThumbnailSource>,
    ) -> Result<ExportReport> {
        let header_fmt = Format::new()
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(Color::RGB(HEADER_FILL))
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap();
        let cell_fmt = Format::new()
            .set_align(FormatAlign::Left)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap();

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        let mut report = ExportReport::default();

        sheet.set_row_height(0, self.config.header_row_height)?;
        for (col, title) in HEADERS.iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, *title, &header_fmt)?;
        }

        for (i, record) in records.iter().enumerate() {
            let row = (i + 1) as u32;
            sheet.set_row_height(row, self.config.data_row_height)?;

            if let Some(source) = thumbnails {
                match self.thumbnail(source, &record.image_url).await {
                    Ok(image) => {
                        sheet.insert_image(row, 0, &image)?;
                        report.images_embedded += 1;
                    }
                    Err(e) => {
                        error!("Image for {:?} skipped: {:#}", preview(&record.name, 30), e);
                        report.image_failures += 1;
                    }
                }
            }

            write_row(sheet, row, record, &cell_fmt)?;
            report.rows += 1;
        }

        sheet.set_column_width(0, self.config.image_column_width)?;
        for (i, width) in column_widths(records, self.config.max_column_width)
            .into_iter()
            .enumerate()
        {
            sheet.set_column_width((i + 1) as u16, width)?;
        }

        workbook
            .save(&self.config.output_path)
            .with_context(|| format!("Failed to save {:?}", self.config.output_path))?;
        info!("Spreadsheet saved to {}", self.config.output_path.display());
        Ok(report)
    }

    async fn thumbnail(&self, source: &dyn ThumbnailSource, url: &str) -> Result<Image> {
        let raw = source.fetch(url).await?;
        let png = prepare_thumbnail(&raw, self.config.thumbnail_width)?;
        debug!("Thumbnail {} → {} bytes", url, png.len());

        let image = Image::new_from_buffer(&png)?.set_scale_to_size(
            self.config.image_display_width,
            self.config.image_display_height,
            false,
        );
        Ok(image)
    }
}

fn write_row(sheet: &mut Worksheet, row: u32, record: &ProductRecord, fmt: &Format) -> Result<()> {
    for (i, value) in row_values(record).iter().enumerate() {
        let col = (i + 1) as u16;
        match value {
            CellValue::Text(s) => sheet.write_string_with_format(row, col, *s, fmt)?,
            CellValue::Integer(n) => sheet.write_number_with_format(row, col, *n as f64, fmt)?,
            CellValue::Decimal(n) => sheet.write_number_with_format(row, col, *n, fmt)?,
        };
    }
    Ok(())
}
