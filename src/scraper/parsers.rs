use crate::config::SelectorConfig;
use crate::models::{RawImage, RawProductCard};
use anyhow::Result;
use scraper::{ElementRef, Html, Selector};

// ── Selectors ─────────────────────────────────────────────────────────────────

/// Compiled selectors for one run; built once from config.
pub struct ProductSelectors {
    pub product: Selector,
    pub image: Selector,
    pub price: Selector,
    pub sold: Selector,
    pub rating: Selector,
}

impl ProductSelectors {
    pub fn compile(cfg: &SelectorConfig) -> Result<Self> {
        Ok(Self {
            product: compile("product", &cfg.product)?,
            image: compile("image", &cfg.image)?,
            price: compile("price", &cfg.price)?,
            sold: compile("sold", &cfg.sold)?,
            rating: compile("rating", &cfg.rating)?,
        })
    }
}

fn compile(label: &str, css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow::anyhow!("{} selector {:?}: {:?}", label, css, e))
}

// ── Result page ───────────────────────────────────────────────────────────────

/// Every product node on a saved search page, in document order.
pub fn parse_result_page(html: &str, sel: &ProductSelectors) -> Vec<RawProductCard> {
    let doc = Html::parse_document(html);
    doc.select(&sel.product)
        .enumerate()
        .map(|(i, node)| read_card(i, node, sel))
        .collect()
}

fn read_card(position: usize, node: ElementRef<'_>, sel: &ProductSelectors) -> RawProductCard {
    let image = node.select(&sel.image).next().map(|img| RawImage {
        alt: img.value().attr("alt").map(str::to_string),
        src: img.value().attr("src").map(str::to_string),
    });

    RawProductCard {
        position,
        image,
        price: first_text(node, &sel.price),
        sold: first_text(node, &sel.sold),
        rating: first_text(node, &sel.rating),
        href: node.value().attr("href").map(str::to_string),
    }
}

fn first_text(node: ElementRef<'_>, sel: &Selector) -> Option<String> {
    node.select(sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{page, product_card, CardSpec};

    fn selectors() -> ProductSelectors {
        ProductSelectors::compile(&SelectorConfig::default()).unwrap()
    }

    #[test]
    fn default_selectors_compile() {
        assert!(ProductSelectors::compile(&SelectorConfig::default()).is_ok());
    }

    #[test]
    fn bad_selector_is_reported_with_its_label() {
        let cfg = SelectorConfig {
            price: "span[".into(),
            ..SelectorConfig::default()
        };
        let err = ProductSelectors::compile(&cfg).err().unwrap();
        assert!(err.to_string().starts_with("price selector"));
    }

    #[test]
    fn reads_every_field_of_a_card() {
        let html = page(&[product_card(&CardSpec {
            price: Some("R$ 1.234,56"),
            rating: Some("4.7"),
            ..CardSpec::new("Cafeteira Elétrica", "2,3 mil vendidos", "/Cafeteira-i.9.9")
        })]);

        let cards = parse_result_page(&html, &selectors());
        assert_eq!(cards.len(), 1);

        let c = &cards[0];
        let img = c.image.as_ref().unwrap();
        assert_eq!(img.alt.as_deref(), Some("Cafeteira Elétrica"));
        assert_eq!(img.src.as_deref(), Some("https://img.example/Cafeteira Elétrica.jpg"));
        assert_eq!(c.price.as_deref(), Some("R$ 1.234,56"));
        assert_eq!(c.sold.as_deref(), Some("2,3 mil vendidos"));
        assert_eq!(c.rating.as_deref(), Some("4.7"));
        assert_eq!(c.href.as_deref(), Some("/Cafeteira-i.9.9"));
    }

    #[test]
    fn text_is_collected_across_children_and_trimmed() {
        let html = r#"<html><body>
            <a class="contents" href="/x">
              <img class="object-contain" alt="X" src="x.jpg">
              <span class="font-medium text-base/5 truncate">
                 <span>R$</span><span>19,90</span>
              </span>
            </a>
        </body></html>"#;

        let cards = parse_result_page(html, &selectors());
        assert_eq!(cards[0].price.as_deref(), Some("R$19,90"));
        assert_eq!(cards[0].sold, None);
        assert_eq!(cards[0].rating, None);
    }

    #[test]
    fn anchors_without_product_class_are_ignored() {
        let html = r#"<html><body>
            <a href="/help">Ajuda</a>
            <a class="contents" href="/p"><img class="object-contain" alt="P" src="p.jpg"></a>
            <a class="contents-extra" href="/q"><img class="object-contain" alt="Q" src="q.jpg"></a>
        </body></html>"#;

        let cards = parse_result_page(html, &selectors());
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].href.as_deref(), Some("/p"));
    }

    #[test]
    fn positions_follow_document_order() {
        let html = page(&[
            product_card(&CardSpec::new("A", "1 vendidos", "/a")),
            product_card(&CardSpec::new("B", "2 vendidos", "/b")),
        ]);
        let cards = parse_result_page(&html, &selectors());
        let positions: Vec<usize> = cards.iter().map(|c| c.position).collect();
        assert_eq!(positions, vec![0, 1]);
    }
}
