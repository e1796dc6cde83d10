//! Built-in templates.

use jsp_commerce::catalog::Product;
use jsp_commerce::search::FilterState;
use serde_json::Value;

use super::{ids, TemplateContext};
use crate::html::{Element, Node};
use crate::routes;

const RECOMMENDED_COUNT: usize = 10;
const DEFAULT_CARD_VARIANT: &str = "small";
const LOGO_SRC: &str = "/assets/mascot/icon.svg";
const SOCIALS: [&str; 4] = ["instagram", "facebook", "discord", "x"];

/// Showcase image of each category on the home page.
pub const CATEGORY_IMAGES: [(&str, &str); 13] = [
    ("CPU", "AMD Ryzen 9 9950X 16 Cores"),
    ("CPU Cooler", "Noctua NH-D15 G2"),
    ("Case", "Lian Li O11 Dynamic EVO"),
    ("GPU", "NVIDIA GeForce RTX 5090 24GB"),
    ("HDD", "WD Blue 4TB 5400RPM"),
    ("Headphones", "Audeze Penrose"),
    ("Keyboard", "Corsair K100 RGB"),
    ("Monitor", "ASUS ROG Swift PG32UQX 32 inch 4K"),
    ("Motherboard", "ASUS ROG Crosshair X870E Extreme"),
    ("Mouse", "Razer Viper V2 Pro"),
    ("Power Supply Unit", "Seasonic Prime TX-1000 Titanium"),
    ("RAM", "G.Skill Trident Z5 RGB 64GB DDR5 7200MHz"),
    ("SSD", "Samsung 990 Pro 4TB NVMe"),
];

fn lucide(name: &str) -> Element {
    Element::new("i").attr("data-lucide", name)
}

fn logo() -> Element {
    Element::new("a")
        .class("logo")
        .attr("href", routes::HOME)
        .child(Element::new("img").attr("src", LOGO_SRC).attr("alt", "Pixo"))
        .child(Element::new("span").text("JSP"))
}

fn str_field<'v>(data: Option<&'v Value>, key: &str) -> Option<&'v str> {
    data?.get(key)?.as_str()
}

pub(super) fn header(ctx: &TemplateContext<'_>, _data: Option<&Value>) -> Option<Node> {
    let mut input = Element::new("input")
        .attr("type", "search")
        .attr("name", "q")
        .attr("placeholder", "Search for parts")
        .attr("id", "search");
    if !ctx.search_query.is_empty() {
        input.set_attr("value", ctx.search_query.as_str());
    }
    let input = input.flag("required", true);

    let search = Element::new("form")
        .class("search")
        .attr("action", routes::SEARCH)
        .attr("method", "get")
        .child(
            Element::new("button")
                .class("mobile-search-toggle")
                .attr("type", "button")
                .child(lucide("search"))
                .text(" Search"),
        )
        .child(input)
        .child(Element::new("button").attr("type", "reset").child(lucide("x")))
        .child(Element::new("button").attr("type", "submit").child(lucide("search")));

    let mut cart = Element::new("a")
        .class("cart")
        .attr("href", routes::CART)
        .child(lucide("shopping-cart"));
    if ctx.cart_count > 0 {
        cart = cart.child(
            Element::new("span")
                .class("cart-count")
                .text(ctx.cart_count.to_string()),
        );
    }

    let inner = Element::new("div")
        .class("inner")
        .child(Element::new("div").child(logo()).child(search))
        .child(
            Element::new("div")
                .child(Element::new("a").attr("href", routes::ABOUT).text("About Us"))
                .child(cart),
        );
    Some(Element::new("header").child(inner).into())
}

fn link_list(title: &str, links: &[(&str, &str)]) -> Element {
    let items = links.iter().map(|(href, label)| {
        Element::new("li")
            .child(Element::new("a").attr("href", *href).text(*label))
            .into()
    });
    Element::new("section")
        .child(Element::new("div").text(title))
        .child(Element::new("ul").children(items))
}

pub(super) fn footer(_ctx: &TemplateContext<'_>, _data: Option<&Value>) -> Option<Node> {
    let links = Element::new("div")
        .class("links")
        .child(Element::new("div").child(logo()))
        .child(link_list(
            "COMPANY",
            &[
                (routes::ABOUT, "About Us"),
                ("/tos.html", "Terms of Service"),
                ("/pp.html", "Privacy Policy"),
            ],
        ))
        .child(link_list(
            "CREDIT",
            &[
                ("https://lucide.dev/", "Lucide Icons"),
                ("https://simpleicons.org/", "Simple Icons"),
            ],
        ));

    let socials = SOCIALS.iter().map(|slug| {
        Element::new("li")
            .child(
                Element::new("a")
                    .attr("href", "javascript:void(0);")
                    .child(Element::new("i").attr("data-si", *slug)),
            )
            .into()
    });

    let inner = Element::new("div")
        .class("inner")
        .child(
            Element::new("div")
                .class("footer-main")
                .child(links)
                .child(
                    Element::new("section")
                        .class("socials")
                        .child(Element::new("ul").children(socials)),
                ),
        )
        .child(
            Element::new("div")
                .class("copyright")
                .text("\u{a9} ")
                .child(Element::new("span").class("brand").text("JSP Store"))
                .text(" 2025"),
        );
    Some(Element::new("footer").child(inner).into())
}

pub(super) fn product_categories(_ctx: &TemplateContext<'_>, _data: Option<&Value>) -> Option<Node> {
    let cards = CATEGORY_IMAGES.iter().map(|(category, product)| {
        let href = routes::search_href(&FilterState::new().with_category(*category));
        Element::new("li")
            .child(
                Element::new("a")
                    .attr("href", href)
                    .child(
                        Element::new("div").class("product-image").child(
                            Element::new("img")
                                .attr("src", routes::product_image(product))
                                .attr("alt", *category),
                        ),
                    )
                    .child(Element::new("div").text(*category)),
            )
            .into()
    });
    Some(Element::new("ul").children(cards).into())
}

/// A product card linking to the product page.
///
/// `variant` ends up in `data-variant` (`small` on the home page, `wide` in
/// search results).
pub fn product_card(product: &Product, variant: &str) -> Element {
    Element::new("a")
        .attr("href", routes::product_href(&product.name))
        .attr("data-variant", variant)
        .child(
            Element::new("div").class("product-image").child(
                Element::new("img")
                    .attr("src", routes::product_image(&product.name))
                    .attr("alt", product.name.as_str()),
            ),
        )
        .child(
            Element::new("div")
                .class("product-details")
                .child(Element::new("div").class("name").text(product.name.as_str()))
                .child(Element::new("div").class("price").text(product.price.display())),
        )
}

pub(super) fn product_card_template(ctx: &TemplateContext<'_>, data: Option<&Value>) -> Option<Node> {
    let name = str_field(data, "productName")?;
    let variant = str_field(data, "variant").unwrap_or(DEFAULT_CARD_VARIANT);
    let Some(product) = ctx.catalog.find(name) else {
        tracing::debug!(name, "product card for unknown product");
        return None;
    };
    Some(product_card(product, variant).into())
}

pub(super) fn home_recommended(ctx: &TemplateContext<'_>, _data: Option<&Value>) -> Option<Node> {
    let cards = ctx
        .random_products(RECOMMENDED_COUNT)
        .into_iter()
        .map(|product| {
            product_card(product, DEFAULT_CARD_VARIANT)
                .class(ids::PRODUCT_CARD)
                .into()
        });
    Some(Element::new("div").children(cards).into())
}

pub(super) fn home_review(_ctx: &TemplateContext<'_>, data: Option<&Value>) -> Option<Node> {
    let imgsrc = str_field(data, "imgsrc").unwrap_or_default();
    let name = str_field(data, "name").unwrap_or_default();
    let message = str_field(data, "message").unwrap_or_default();

    let stars = (0..5).map(|_| lucide("star").attr("fill", "currentColor").into());
    let review = Element::new("div")
        .child(
            Element::new("div")
                .class("author")
                .child(Element::new("img").attr("src", imgsrc).attr("alt", name))
                .child(Element::new("div").class("name").text(name)),
        )
        .child(Element::new("div").class("stars").children(stars))
        .child(Element::new("div").class("message").text(message));
    Some(review.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::{find_all, find_by_class};
    use crate::templates::TemplateRegistry;
    use jsp_commerce::catalog::Catalog;
    use jsp_commerce::money::Money;
    use serde_json::json;

    fn catalog() -> Catalog {
        Catalog::new(
            (0..12)
                .map(|i| Product::new(format!("Part {i}"), "Acme", "CPU", Money::new(1_500_000)))
                .collect(),
        )
        .unwrap()
    }

    fn render(ctx: &TemplateContext<'_>, id: &str, data: Option<Value>) -> Option<Node> {
        TemplateRegistry::new().render(ctx, id, data.as_ref())
    }

    #[test]
    fn test_header_prefills_query_and_badge() {
        let catalog = catalog();
        let ctx = TemplateContext::new(&catalog)
            .with_search_query("  rtx 4090 ")
            .with_cart_count(3);
        let node = render(&ctx, ids::HEADER, None).unwrap();
        let doc = [node];

        let input = crate::html::find(&doc, |el| el.tag == "input").unwrap();
        assert_eq!(input.get_attr("value"), Some("rtx 4090"));
        assert_eq!(find_by_class(&doc, "cart-count").unwrap().text_content(), "3");
        assert!(doc[0].as_element().unwrap().has_class("header"));
    }

    #[test]
    fn test_header_without_cart_items_has_no_badge() {
        let catalog = catalog();
        let ctx = TemplateContext::new(&catalog);
        let doc = [render(&ctx, ids::HEADER, None).unwrap()];
        assert!(find_by_class(&doc, "cart-count").is_none());
        let input = crate::html::find(&doc, |el| el.tag == "input").unwrap();
        assert!(input.get_attr("value").is_none());
    }

    #[test]
    fn test_footer_has_social_icon_markers() {
        let catalog = catalog();
        let ctx = TemplateContext::new(&catalog);
        let doc = [render(&ctx, ids::FOOTER, None).unwrap()];
        let slugs: Vec<&str> = find_all(&doc, |el| el.has_attr("data-si"))
            .iter()
            .filter_map(|el| el.get_attr("data-si"))
            .collect();
        assert_eq!(slugs, vec!["instagram", "facebook", "discord", "x"]);
    }

    #[test]
    fn test_product_categories() {
        let catalog = catalog();
        let ctx = TemplateContext::new(&catalog);
        let doc = [render(&ctx, ids::PRODUCT_CATEGORIES, None).unwrap()];
        let links = find_all(&doc, |el| el.tag == "a");
        assert_eq!(links.len(), 13);
        assert_eq!(links[1].get_attr("href"), Some("/search.html?category=CPU-Cooler"));
        assert_eq!(links[1].text_content(), "CPU Cooler");
    }

    #[test]
    fn test_product_card_defaults_to_small() {
        let catalog = catalog();
        let ctx = TemplateContext::new(&catalog);
        let node = render(&ctx, ids::PRODUCT_CARD, Some(json!({"productName": "Part 2"}))).unwrap();
        let el = node.as_element().unwrap();
        assert_eq!(el.get_attr("data-variant"), Some("small"));
        assert_eq!(el.get_attr("href"), Some("/product.html?name=Part+2"));
        assert!(node.text_content().contains("Rp\u{a0}1.500.000"));
    }

    #[test]
    fn test_product_card_variant_and_missing_product() {
        let catalog = catalog();
        let ctx = TemplateContext::new(&catalog);
        let wide = render(
            &ctx,
            ids::PRODUCT_CARD,
            Some(json!({"productName": "Part 2", "variant": "wide"})),
        )
        .unwrap();
        assert_eq!(wide.as_element().unwrap().get_attr("data-variant"), Some("wide"));

        assert!(render(&ctx, ids::PRODUCT_CARD, Some(json!({"productName": "Nope"}))).is_none());
        assert!(render(&ctx, ids::PRODUCT_CARD, None).is_none());
    }

    #[test]
    fn test_home_recommended_renders_ten_distinct_cards() {
        let catalog = catalog();
        let ctx = TemplateContext::new(&catalog).with_seed(11);
        let doc = [render(&ctx, ids::HOME_RECOMMENDED, None).unwrap()];
        let cards = find_all(&doc, |el| el.has_class("product-card"));
        assert_eq!(cards.len(), 10);
        let mut hrefs: Vec<&str> = cards.iter().filter_map(|c| c.get_attr("href")).collect();
        hrefs.sort();
        hrefs.dedup();
        assert_eq!(hrefs.len(), 10);
    }

    #[test]
    fn test_home_review() {
        let catalog = catalog();
        let ctx = TemplateContext::new(&catalog);
        let data = json!({"imgsrc": "/a.webp", "name": "Joanna", "message": "Fast <b>shipping</b>"});
        let node = render(&ctx, ids::HOME_REVIEW, Some(data)).unwrap();
        let html = node.render();
        assert!(html.contains(r#"<img src="/a.webp" alt="Joanna">"#));
        assert!(html.contains("Fast &lt;b&gt;shipping&lt;/b&gt;"));
        assert_eq!(html.matches(r#"data-lucide="star""#).count(), 5);
    }
}
