//! HTML builders mimicking a saved Shopee search page.

pub struct CardSpec<'a> {
    pub name: &'a str,
    pub sold: Option<&'a str>,
    pub href: &'a str,
    pub price: Option<&'a str>,
    pub rating: Option<&'a str>,
    pub with_image: bool,
}

impl<'a> CardSpec<'a> {
    pub fn new(name: &'a str, sold: &'a str, href: &'a str) -> Self {
        Self {
            name,
            sold: Some(sold),
            href,
            price: Some("R$ 10,00"),
            rating: None,
            with_image: true,
        }
    }
}

pub fn product_card(spec: &CardSpec<'_>) -> String {
    let mut inner = String::new();
    if spec.with_image {
        inner.push_str(&format!(
            r#"<img class="inset-y-0 object-contain w-full" alt="{0}" src="https://img.example/{0}.jpg">"#,
            spec.name
        ));
    }
    if let Some(price) = spec.price {
        inner.push_str(&format!(
            r#"<span class="font-medium text-base/5 truncate">{}</span>"#,
            price
        ));
    }
    if let Some(rating) = spec.rating {
        inner.push_str(&format!(
            r#"<div class="text-shopee-black87 text-xs/sp14 flex-none">{}</div>"#,
            rating
        ));
    }
    if let Some(sold) = spec.sold {
        inner.push_str(&format!(
            r#"<div class="truncate text-shopee-black87 text-xs min-h-4">{}</div>"#,
            sold
        ));
    }
    format!(
        r#"<a class="contents" href="{}"><div class="flex flex-col">{}</div></a>"#,
        spec.href, inner
    )
}

pub fn page(cards: &[String]) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><meta charset="utf-8"><title>zem - Shopee Brasil</title></head>
<body><ul class="shopee-search-item-result__items">{}</ul></body></html>"#,
        cards
            .iter()
            .map(|c| format!("<li>{}</li>", c))
            .collect::<String>()
    )
}

// ── Images ────────────────────────────────────────────────────────────────────

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        width,
        height,
        image::Rgb([238, 77, 45]),
    ));
    let mut out = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Png)
        .unwrap();
    out
}

/// Serves one fixed image for every URL, except URLs containing "broken".
pub struct StubThumbnails {
    png: Option<Vec<u8>>,
}

impl StubThumbnails {
    pub fn serving(png: Vec<u8>) -> Self {
        Self { png: Some(png) }
    }

    pub fn offline() -> Self {
        Self { png: None }
    }
}

#[async_trait::async_trait]
impl crate::export::thumbnail::ThumbnailSource for StubThumbnails {
    async fn fetch(&self, url: &str) -> anyhow::Result<Vec<u8>> {
        if url.contains("broken") {
            anyhow::bail!("HTTP error 404 Not Found");
        }
        self.png.clone().ok_or_else(|| anyhow::anyhow!("offline"))
    }
}
