//! Server-side rendering of SEO metadata into the frontend's HTML shell.
//!
//! [`PageComposer`] classifies a request path, fetches what the page needs
//! through the ports, builds a [`PageHead`] and splices it into the shared
//! [`PageTemplate`]. The builders in [`head`] and [`json_ld`] are pure.

pub mod composer;
pub mod escape;
pub mod head;
pub mod json_ld;
pub mod template;

pub use self::composer::{PageComposer, PageRoute};
pub use self::escape::escape_html;
pub use self::head::{
    ARTICLE_NAMESPACE, DEFAULT_PUBLIC_URL, PageHead, SiteMetadata, WEBSITE_NAMESPACE,
    product_head, site_head,
};
pub use self::json_ld::ProductJsonLd;
pub use self::template::{
    HEAD_PLACEHOLDER, OG_NAMESPACE_PLACEHOLDER, PageTemplate, TITLE_PLACEHOLDER,
};
