//! Root document shell shared by every rendered page.

pub const FONT_PRECONNECT_URL: &str = "https://cdn.fontshare.com";
pub const FONT_STYLESHEET_URL: &str =
    "https://api.fontshare.com/v2/css?f[]=satoshi@700,500,400&display=swap";

/// Document-level metadata. Page titles are substituted into `title_template`
/// at the `%s` marker; pages without a title get `default_title`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub title_template: &'static str,
    pub default_title: &'static str,
    pub description: &'static str,
}

pub const SITE_METADATA: Metadata = Metadata {
    title_template: "%s - The Hollyweb Podcast",
    default_title: "The Hollyweb Podcast - Chase and Luke discussing everything film, pop culture, and entertainment",
    description: "Chase and Luke discuss the latest in film, pop culture, and entertainment with in-depth conversations and hot takes.",
};

impl Metadata {
    pub fn resolve_title(&self, page_title: Option<&str>) -> String {
        match page_title {
            Some(title) => self.title_template.replacen("%s", title, 1),
            None => self.default_title.to_string(),
        }
    }
}

/// A page body plus the metadata it overrides.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Already-rendered HTML placed inside the shell.
    pub body: String,
}

pub fn render_layout(metadata: &Metadata, page: &Page) -> String {
    let title = metadata.resolve_title(page.title.as_deref());
    let description = page.description.as_deref().unwrap_or(metadata.description);

    let mut html = String::with_capacity(page.body.len() + 1024);
    html.push_str("<!DOCTYPE html>\n");
    html.push_str(r#"<html lang="en" class="h-full bg-white antialiased">"#);
    html.push_str("\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
    );
    html.push_str(&format!("<title>{}</title>\n", escape_html(&title)));
    html.push_str(&format!(
        "<meta name=\"description\" content=\"{}\">\n",
        escape_html(description)
    ));
    html.push_str(&format!(
        "<link rel=\"preconnect\" href=\"{}\" crossorigin=\"anonymous\">\n",
        escape_html(FONT_PRECONNECT_URL)
    ));
    html.push_str(&format!(
        "<link rel=\"stylesheet\" href=\"{}\">\n",
        escape_html(FONT_STYLESHEET_URL)
    ));
    html.push_str("</head>\n");
    html.push_str("<body class=\"flex min-h-full\">\n<div class=\"w-full\">\n");
    html.push_str(&page.body);
    html.push_str("\n</div>\n</body>\n</html>\n");
    html
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
