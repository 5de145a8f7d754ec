//! Outer HTML document shared by every page.

use std::fmt::Write;

use crate::util::escape_html;

/// Inline stylesheet. The security policy allows inline styles but not scripts.
const STYLE: &str = "\
body{margin:0;font-family:system-ui,-apple-system,sans-serif;line-height:1.6;color:#1c1e21}\
a{color:#2e8555}\
.navbar{display:flex;gap:1.5rem;align-items:center;padding:.75rem 1.5rem;border-bottom:1px solid #dadde1}\
.navbar__brand{font-weight:700;text-decoration:none;color:inherit}\
.layout{display:flex;max-width:1400px;margin:0 auto}\
.sidebar{width:260px;flex-shrink:0;padding:1rem;border-right:1px solid #dadde1}\
.menu{list-style:none;padding-left:0;margin:0}\
.menu ul{list-style:none;padding-left:1rem}\
.menu__link{display:block;padding:.2rem .5rem;border-radius:4px;text-decoration:none;color:inherit}\
.menu__link--active{background:#ebedf0;color:#2e8555;font-weight:600}\
.menu summary,.menu__category-label{font-weight:600;cursor:pointer;padding:.2rem .5rem}\
.doc{flex:1;min-width:0;padding:1rem 2rem}\
.toc{width:220px;flex-shrink:0;padding:1rem;font-size:.9rem}\
.toc ul{list-style:none;padding-left:0}\
.toc__level-3{padding-left:1rem}.toc__level-4{padding-left:2rem}\
pre{background:#f6f7f8;padding:1rem;overflow-x:auto;border-radius:6px}\
table{border-collapse:collapse}th,td{border:1px solid #dadde1;padding:.4rem .8rem}\
.pagination{display:flex;justify-content:space-between;gap:1rem;margin-top:3rem}\
.pagination a{flex:1;border:1px solid #dadde1;border-radius:6px;padding:.75rem 1rem;text-decoration:none}\
.pagination__next{text-align:right}\
.pagination__sublabel{display:block;font-size:.8rem;color:#606770}\
.hero{text-align:center;padding:4rem 1rem;background:#2e8555;color:#fff}\
.hero__logo{width:10%;min-width:80px}\
.button{display:inline-block;margin-top:1rem;padding:.6rem 1.6rem;border-radius:6px;background:#fff;color:#2e8555;font-weight:700;text-decoration:none}\
.features{display:flex;flex-wrap:wrap;justify-content:center;gap:2rem;padding:3rem 1rem}\
.feature{flex:0 1 300px;text-align:center}\
.feature__image{height:160px}\
.error{max-width:640px;margin:4rem auto;padding:0 1rem}";

/// Site-wide values needed by the page header.
#[derive(Clone, Debug)]
pub(crate) struct Shell<'a> {
    pub(crate) site_title: &'a str,
    pub(crate) base_url: &'a str,
    pub(crate) docs_root: &'a str,
}

impl Shell<'_> {
    /// Wrap `body` in a complete HTML document with the site header.
    pub(crate) fn wrap(&self, page_title: &str, description: Option<&str>, body: &str) -> String {
        let mut out = String::with_capacity(body.len() + STYLE.len() + 512);
        let title = if page_title == self.site_title || page_title.is_empty() {
            escape_html(self.site_title)
        } else {
            format!(
                "{} | {}",
                escape_html(page_title),
                escape_html(self.site_title)
            )
        };

        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        out.push_str("<meta charset=\"utf-8\">\n");
        out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
        let _ = writeln!(out, "<title>{title}</title>");
        if let Some(description) = description {
            let _ = writeln!(
                out,
                r#"<meta name="description" content="{}">"#,
                escape_html(description)
            );
        }
        let _ = writeln!(out, "<style>{STYLE}</style>");
        out.push_str("</head>\n<body>\n");
        let _ = writeln!(
            out,
            r#"<header class="navbar"><a class="navbar__brand" href="{}">{}</a><a href="{}">Docs</a></header>"#,
            escape_html(self.base_url),
            escape_html(self.site_title),
            escape_html(self.docs_root)
        );
        out.push_str(body);
        out.push_str("\n</body>\n</html>\n");
        out
    }
}

/// Standalone document without the site header.
pub(crate) fn bare(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        escape_html(title)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell() -> Shell<'static> {
        Shell {
            site_title: "SymphonyQL",
            base_url: "/SymphonyQL/",
            docs_root: "/SymphonyQL/docs/",
        }
    }

    #[test]
    fn test_wrap_composes_title() {
        let html = shell().wrap("Schema", None, "<main></main>");

        assert!(html.contains("<title>Schema | SymphonyQL</title>"));
        assert!(html.contains(r#"<a class="navbar__brand" href="/SymphonyQL/">SymphonyQL</a>"#));
        assert!(html.contains(r#"<a href="/SymphonyQL/docs/">Docs</a>"#));
        assert!(html.contains("<main></main>"));
        assert!(!html.contains("name=\"description\""));
    }

    #[test]
    fn test_wrap_site_title_only() {
        let html = shell().wrap("SymphonyQL", Some("GraphQL & Pekko"), "");

        assert!(html.contains("<title>SymphonyQL</title>"));
        assert!(html.contains(r#"<meta name="description" content="GraphQL &amp; Pekko">"#));
    }

    #[test]
    fn test_bare_has_no_header() {
        let html = bare("Error", "<p>x</p>");

        assert!(html.contains("<title>Error</title>"));
        assert!(!html.contains("navbar__brand"));
    }
}
