//! Landing page: hero banner and feature list.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use score_config::{FeatureConfig, LandingConfig};

use crate::shell::Shell;
use crate::util::{asset_url, escape_html};

/// Logo used when none is configured.
pub const DEFAULT_LOGO: &str = "img/logo.png";

/// Feature list shown when the configuration lists none.
#[must_use]
pub fn default_features() -> Vec<FeatureConfig> {
    [
        (
            "Start Quickly and Scale",
            "Build your first GraphQL server in minutes and scale to production loads.",
            "img/start-quickly-and-scale.svg",
        ),
        (
            "Functional and Type-safe",
            "Use the power of Functional Programming and the compiler to build robust, correct and fully-featured GraphQL servers.",
            "img/functional-and-type-safe.svg",
        ),
        (
            "Stream with Pekko",
            "Use Pekko's feature-rich pekko-streams to create query, subscription.",
            "img/stream-with-pekkostream.svg",
        ),
        (
            "Highly Concurrent",
            "Leverage the power of Pekko to build asynchronous servers.",
            "img/highly-concurrent.svg",
        ),
    ]
    .into_iter()
    .map(|(title, description, image)| FeatureConfig {
        title: title.to_owned(),
        description: description.to_owned(),
        image: Some(image.to_owned()),
    })
    .collect()
}

/// The site's landing page.
///
/// Images are resolved against the static directory on every render and
/// are left out when the file does not exist.
#[derive(Clone, Debug)]
pub struct LandingPage {
    title: String,
    tagline: String,
    base_url: String,
    docs_root: String,
    logo: String,
    features: Vec<FeatureConfig>,
    static_dir: PathBuf,
}

impl LandingPage {
    /// Create a landing page.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        tagline: impl Into<String>,
        base_url: impl Into<String>,
        docs_root: impl Into<String>,
        static_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            title: title.into(),
            tagline: tagline.into(),
            base_url: base_url.into(),
            docs_root: docs_root.into(),
            logo: DEFAULT_LOGO.to_owned(),
            features: default_features(),
            static_dir: static_dir.into(),
        }
    }

    /// Apply the `[landing]` configuration section.
    #[must_use]
    pub fn with_config(mut self, config: &LandingConfig) -> Self {
        if let Some(logo) = &config.logo {
            self.logo.clone_from(logo);
        }
        if !config.features.is_empty() {
            self.features.clone_from(&config.features);
        }
        self
    }

    /// Features in display order.
    #[must_use]
    pub fn features(&self) -> &[FeatureConfig] {
        &self.features
    }

    /// Render the landing page.
    #[must_use]
    pub fn render(&self) -> String {
        let mut body = String::with_capacity(2048);

        body.push_str(r#"<header class="hero"><div class="container">"#);
        if let Some(src) = self.existing_asset(&self.logo) {
            let _ = write!(
                body,
                r#"<img class="hero__logo" src="{}" alt="{}">"#,
                escape_html(&src),
                escape_html(&self.title)
            );
        }
        let _ = write!(
            body,
            r#"<h1 class="hero__title">{}</h1>"#,
            escape_html(&self.title)
        );
        if !self.tagline.is_empty() {
            let _ = write!(
                body,
                r#"<p class="hero__subtitle">{}</p>"#,
                escape_html(&self.tagline)
            );
        }
        let _ = write!(
            body,
            r#"<a class="button" href="{}">Get Started</a>"#,
            escape_html(&self.docs_root)
        );
        body.push_str("</div></header>");

        body.push_str("<main>");
        if !self.features.is_empty() {
            body.push_str(r#"<section class="features">"#);
            for feature in &self.features {
                body.push_str(r#"<div class="feature">"#);
                if let Some(src) = feature
                    .image
                    .as_deref()
                    .and_then(|image| self.existing_asset(image))
                {
                    let _ = write!(
                        body,
                        r#"<img class="feature__image" src="{}" alt="{}">"#,
                        escape_html(&src),
                        escape_html(&feature.title)
                    );
                }
                let _ = write!(
                    body,
                    "<h3>{}</h3><p>{}</p></div>",
                    escape_html(&feature.title),
                    escape_html(&feature.description)
                );
            }
            body.push_str("</section>");
        }
        body.push_str("</main>");

        let shell = Shell {
            site_title: &self.title,
            base_url: &self.base_url,
            docs_root: &self.docs_root,
        };
        let description = (!self.tagline.is_empty())
            .then(|| format!("{} is {}.", self.title, lowercase_first(&self.tagline)));
        shell.wrap(&self.tagline, description.as_deref(), &body)
    }

    /// URL of an asset under the static directory, if the file exists.
    fn existing_asset(&self, asset: &str) -> Option<String> {
        let relative = asset.trim_start_matches('/');
        if relative.split('/').any(|segment| segment == "..") {
            return None;
        }
        if is_file(&self.static_dir.join(relative)) {
            Some(asset_url(&self.base_url, relative))
        } else {
            tracing::debug!(asset = %relative, "Landing asset not found, skipping");
            None
        }
    }
}

fn is_file(path: &Path) -> bool {
    path.metadata().is_ok_and(|meta| meta.is_file())
}

fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
