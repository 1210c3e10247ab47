//! schema.org `Product` structured data.

use chrono::SecondsFormat;
use serde::Serialize;

use super::{SiteMetadata, escape_html};
use crate::domain::{Product, User};

const SCHEMA_CONTEXT: &str = "https://schema.org/";
const IN_STOCK: &str = "https://schema.org/InStock";
const BEST_RATING: u8 = 5;
const WORST_RATING: u8 = 1;

/// JSON-LD document describing a product offer.
///
/// Text taken from the product is HTML-escaped before serialisation, and
/// [`ProductJsonLd::to_script_payload`] additionally escapes `<` so the
/// payload can sit inside a `<script>` element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductJsonLd {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(rename = "@type")]
    kind: &'static str,
    name: String,
    sku: String,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    url: String,
    category: String,
    release_date: String,
    brand: Brand,
    offers: Offer,
    #[serde(skip_serializing_if = "Option::is_none")]
    aggregate_rating: Option<AggregateRating>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Brand {
    #[serde(rename = "@type")]
    kind: &'static str,
    name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct Offer {
    #[serde(rename = "@type")]
    kind: &'static str,
    availability: &'static str,
    url: String,
    price_currency: String,
    price: f64,
    seller: Seller,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Seller {
    #[serde(rename = "@type")]
    kind: &'static str,
    name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct AggregateRating {
    #[serde(rename = "@type")]
    kind: &'static str,
    rating_value: f64,
    best_rating: u8,
    worst_rating: u8,
    rating_count: u64,
}

impl ProductJsonLd {
    /// Describe `product`, sold by `owner`, as listed on `site`.
    #[must_use]
    pub fn new(site: &SiteMetadata, product: &Product, owner: &User) -> Self {
        let url = site.product_url(&product.slug);
        // Unrated products carry no rating block at all.
        let aggregate_rating = product
            .computed
            .score
            .filter(|score| score.total_ratings > 0)
            .map(|score| AggregateRating {
                kind: "AggregateRating",
                rating_value: score.mean_rating * f64::from(BEST_RATING),
                best_rating: BEST_RATING,
                worst_rating: WORST_RATING,
                rating_count: score.total_ratings,
            });

        Self {
            context: SCHEMA_CONTEXT,
            kind: "Product",
            name: escape_html(&product.title),
            sku: product.id.to_string(),
            description: escape_html(&product.description.short),
            image: product.primary_thumbnail().map(escape_html),
            url: url.clone(),
            category: site.category.clone(),
            release_date: product
                .release_date
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            brand: Brand {
                kind: "Brand",
                name: owner.name.clone(),
            },
            offers: Offer {
                kind: "Offer",
                availability: IN_STOCK,
                url,
                price_currency: site.currency.clone(),
                price: product.price_in_major_units(),
                seller: Seller {
                    kind: "Person",
                    name: owner.name.clone(),
                },
            },
            aggregate_rating,
        }
    }

    /// Serialise for embedding in `<script type="application/ld+json">`.
    ///
    /// # Errors
    /// Returns the serialiser error; with these field types it only fails on
    /// non-finite numbers.
    pub fn to_script_payload(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_string(self)?;
        Ok(json.replace('<', "\\u003c"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::fixtures::{owner, product};
    use crate::domain::Score;
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    #[fixture]
    fn site() -> SiteMetadata {
        SiteMetadata::default()
    }

    fn to_value(doc: &ProductJsonLd) -> Value {
        serde_json::to_value(doc).expect("serialise json-ld")
    }

    #[rstest]
    fn describes_the_offer(site: SiteMetadata) {
        let value = to_value(&ProductJsonLd::new(&site, &product(), &owner()));
        assert_eq!(value["@context"], "https://schema.org/");
        assert_eq!(value["@type"], "Product");
        assert_eq!(value["sku"], "6072d3a1");
        assert_eq!(value["url"], "https://orbital-market.com/product/stylized-forest-pack");
        assert_eq!(value["category"], "Unreal Engine Asset");
        assert_eq!(value["releaseDate"], "2021-04-11T08:30:00.000Z");
        assert_eq!(value["brand"], json!({ "@type": "Brand", "name": "Hugo" }));
        assert_eq!(value["offers"]["price"], json!(19.99));
        assert_eq!(value["offers"]["priceCurrency"], "USD");
        assert_eq!(value["offers"]["availability"], "https://schema.org/InStock");
        assert_eq!(value["offers"]["seller"]["@type"], "Person");
    }

    #[rstest]
    fn includes_rating_for_rated_products(site: SiteMetadata) {
        let value = to_value(&ProductJsonLd::new(&site, &product(), &owner()));
        assert_eq!(
            value["aggregateRating"],
            json!({
                "@type": "AggregateRating",
                "ratingValue": 4.5,
                "bestRating": 5,
                "worstRating": 1,
                "ratingCount": 12,
            })
        );
    }

    #[rstest]
    #[case(None)]
    #[case(Some(Score { value: 0.0, total_ratings: 0, mean_rating: 0.0 }))]
    fn omits_rating_for_unrated_products(site: SiteMetadata, #[case] score: Option<Score>) {
        let mut product = product();
        product.computed.score = score;
        let value = to_value(&ProductJsonLd::new(&site, &product, &owner()));
        assert!(value.get("aggregateRating").is_none());
    }

    #[rstest]
    fn omits_image_without_thumbnail(site: SiteMetadata) {
        let mut product = product();
        product.pictures.thumbnail.clear();
        let value = to_value(&ProductJsonLd::new(&site, &product, &owner()));
        assert!(value.get("image").is_none());
    }

    #[rstest]
    fn script_payload_cannot_close_its_element(site: SiteMetadata) {
        let mut owner = owner();
        owner.name = "</script><script>alert(1)".to_owned();
        let payload = ProductJsonLd::new(&site, &product(), &owner)
            .to_script_payload()
            .expect("payload");
        assert!(!payload.contains('<'));
        assert!(payload.contains("\\u003c/script>"));
        let parsed: Value = serde_json::from_str(&payload).expect("still valid json");
        assert_eq!(parsed["brand"]["name"], "</script><script>alert(1)");
    }

    #[rstest]
    fn escapes_product_text(site: SiteMetadata) {
        let mut product = product();
        product.title = "<script>x</script>".to_owned();
        let value = to_value(&ProductJsonLd::new(&site, &product, &owner()));
        assert_eq!(value["name"], "&lt;script&gt;x&lt;/script&gt;");
    }
}
