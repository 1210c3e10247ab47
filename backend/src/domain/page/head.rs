//! Open Graph, Twitter card and JSON-LD metadata blocks.

use chrono::SecondsFormat;
use url::Url;

use super::{ProductJsonLd, escape_html};
use crate::domain::{Product, User};

/// Open Graph namespace for product pages.
pub const ARTICLE_NAMESPACE: &str = "og: https://ogp.me/ns/article#";
/// Open Graph namespace for every other page.
pub const WEBSITE_NAMESPACE: &str = "og: https://ogp.me/ns/website#";

const PRODUCT_IMAGE_SIZE: u32 = 284;

/// Site-wide values used when a page has nothing more specific.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteMetadata {
    /// Site name, also the default page title.
    pub name: String,
    /// Public base URL.
    pub url: String,
    /// Default description.
    pub description: String,
    /// Default social preview image.
    pub image: String,
    /// Width of [`SiteMetadata::image`] in pixels.
    pub image_width: u32,
    /// Height of [`SiteMetadata::image`] in pixels.
    pub image_height: u32,
    /// Twitter handle credited on default pages.
    pub twitter_creator: String,
    /// schema.org category for listed products.
    pub category: String,
    /// ISO 4217 code prices are quoted in.
    pub currency: String,
}

/// Public URL used when none is configured.
pub const DEFAULT_PUBLIC_URL: &str = "https://orbital-market.com/";

impl Default for SiteMetadata {
    fn default() -> Self {
        Self {
            name: "Orbital Market".to_owned(),
            url: DEFAULT_PUBLIC_URL.to_owned(),
            description: "Enhanced marketplace platform for the Unreal Engine marketplace."
                .to_owned(),
            image: "https://orbital-market.com/static/opengraph.png".to_owned(),
            image_width: 64,
            image_height: 64,
            twitter_creator: "@hugoattal".to_owned(),
            category: "Unreal Engine Asset".to_owned(),
            currency: "USD".to_owned(),
        }
    }
}

impl SiteMetadata {
    /// Defaults with a different public URL.
    #[must_use]
    pub fn with_public_url(url: &Url) -> Self {
        Self {
            url: url.to_string(),
            ..Self::default()
        }
    }

    /// Canonical URL of a product page.
    #[must_use]
    pub fn product_url(&self, slug: &str) -> String {
        let base = self.url.trim_end_matches('/');
        format!("{base}/product/{}", escape_html(slug))
    }
}

/// Values spliced into the page template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageHead {
    namespace: String,
    title: String,
    head_html: String,
}

impl PageHead {
    /// Assemble a head from already-escaped parts.
    pub fn new(
        namespace: impl Into<String>,
        title: impl Into<String>,
        head_html: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            title: title.into(),
            head_html: head_html.into(),
        }
    }

    /// Open Graph namespace prefix.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Escaped title text.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Metadata markup.
    #[must_use]
    pub fn head_html(&self) -> &str {
        &self.head_html
    }
}

#[derive(Default)]
struct MetaBlock(String);

impl MetaBlock {
    fn name(mut self, name: &str, content: &str) -> Self {
        self.line(&["<meta name=\"", name, "\" content=\"", &escape_html(content), "\">"]);
        self
    }

    fn property(mut self, property: &str, content: &str) -> Self {
        self.line(&["<meta property=\"", property, "\" content=\"", &escape_html(content), "\"/>"]);
        self
    }

    fn raw(mut self, markup: &str) -> Self {
        self.line(&[markup]);
        self
    }

    fn line(&mut self, parts: &[&str]) {
        self.0.push_str("\n    ");
        for part in parts {
            self.0.push_str(part);
        }
    }

    fn finish(self) -> String {
        self.0
    }
}

/// Head for a product page.
///
/// # Errors
/// Fails only when the JSON-LD document cannot be serialised.
pub fn product_head(
    site: &SiteMetadata,
    product: &Product,
    owner: &User,
) -> Result<PageHead, serde_json::Error> {
    let json_ld = ProductJsonLd::new(site, product, owner).to_script_payload()?;
    let published = product
        .release_date
        .to_rfc3339_opts(SecondsFormat::Millis, true);
    let image_size = PRODUCT_IMAGE_SIZE.to_string();

    let mut block = MetaBlock::default()
        .name("description", &product.description.short)
        .property("og:title", &product.title)
        .property("og:site_name", &site.name)
        .property("og:url", &site.url)
        .property("og:description", &product.description.short)
        .property("og:type", "article")
        .property("article:published_time", &published)
        .property("article:author", owner.author_name());
    if let Some(thumbnail) = product.primary_thumbnail() {
        block = block
            .property("og:image", thumbnail)
            .property("og:image:width", &image_size)
            .property("og:image:height", &image_size);
    }
    block = block.name("twitter:card", "summary");
    if let Some(handle) = owner.networks.twitter_handle() {
        block = block.name("twitter:creator", &handle);
    }
    let head_html = block
        .raw(&format!(
            "<script type=\"application/ld+json\">{json_ld}</script>"
        ))
        .finish();

    Ok(PageHead::new(
        ARTICLE_NAMESPACE,
        escape_html(&product.title),
        head_html,
    ))
}

/// Head for the home page, search page and anything else without its own
/// metadata.
#[must_use]
pub fn site_head(site: &SiteMetadata) -> PageHead {
    let head_html = MetaBlock::default()
        .name("description", &site.description)
        .property("og:title", &site.name)
        .property("og:site_name", &site.name)
        .property("og:url", &site.url)
        .property("og:description", &site.description)
        .property("og:type", "website")
        .property("og:image", &site.image)
        .property("og:image:width", &site.image_width.to_string())
        .property("og:image:height", &site.image_height.to_string())
        .name("twitter:card", "summary")
        .name("twitter:creator", &site.twitter_creator)
        .finish();

    PageHead::new(WEBSITE_NAMESPACE, escape_html(&site.name), head_html)
}
