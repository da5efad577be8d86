use maud::{html, Markup, DOCTYPE};

use crate::models::Entry;

fn create_html_head(page_title: Option<&str>) -> Markup {
    html! {
        (DOCTYPE)
        head {
            title { (page_title.unwrap_or("pastern")) }
            meta charset="utf-8";
            meta name="viewport" content="width=device-width, initial-scale=1";
            link rel="icon" href="data:image/svg+xml,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'><text y='.9em' font-size='90'>📋</text></svg>";
            link rel="stylesheet" href="https://yree.io/mold/assets/css/main.css";
        }
    }
}

fn create_page_footer(entry_count: usize) -> Markup {
    html! {
        footer {
            div class="w" {
                p { "pastern 📋 :: " (entry_count) " entries" }
            }
        }
    }
}

fn create_entry_form() -> Markup {
    html! {
        form method="post" action="/" enctype="multipart/form-data" {
            input type="text" name="title" placeholder="Title (optional)" style="width: 100%;";
            textarea
                name="content"
                placeholder="Paste something..."
                style="width: 100%; height: 15ch; resize: vertical;"
                required="required" {}
            input type="text" name="keywords" placeholder="Keywords, comma separated (optional)" style="width: 100%;";
            input type="file" name="image" accept="image/*";
            button type="submit" { "Save" }
        }
    }
}

fn create_search_form(query: &str) -> Markup {
    html! {
        form method="get" action="/search" class="grid" {
            input type="search" name="q" value=(query) placeholder="Search keywords";
            button type="submit" { "Search" }
            @if !query.is_empty() {
                a href="/" { "clear" }
            }
        }
    }
}

/// URL for a stored `uploads/<name>` path, with the file name percent-encoded.
fn image_src(image_path: &str) -> String {
    match image_path.split_once('/') {
        Some((dir, name)) => format!("/{}/{}", dir, urlencoding::encode(name)),
        None => format!("/{}", urlencoding::encode(image_path)),
    }
}

fn create_entry_card(entry: &Entry) -> Markup {
    html! {
        article id=(format!("entry-{}", entry.id)) style="margin-bottom: 2ch; padding: 1ch; border: 1px solid #ccc;" {
            @if let Some(title) = &entry.title {
                h3 { (title) }
            }
            pre { (entry.content) }
            @if let Some(image_path) = &entry.image_path {
                img src=(image_src(image_path)) alt=(image_path) style="max-width: 100%;";
            }
            p {
                @for keyword in entry.keywords.split(',').filter(|k| !k.is_empty()) {
                    a href=(format!("/search?q={}", urlencoding::encode(keyword))) { code { (keyword) } } " "
                }
            }
            p { small { (entry.created_at.format("%Y-%m-%d %H:%M")) } }
        }
    }
}

/// The listing page. `search` is the active query, if any.
pub fn create_index_page(entries: &[Entry], search: Option<&str>) -> Markup {
    let query = search.unwrap_or_default();

    html! {
        (create_html_head(None))
        body a="auto" {
            main class="content" aria-label="Content" {
                div class="w" {
                    h1 { "pastern 📋" }
                    (create_entry_form())
                    (create_search_form(query))
                    @if !query.is_empty() {
                        p { (entries.len()) " results for " b { (query) } }
                    }
                    @if entries.is_empty() {
                        p { "Nothing here yet." }
                    }
                    @for entry in entries {
                        (create_entry_card(entry))
                    }
                }
            }
        }
        (create_page_footer(entries.len()))
    }
}

pub fn create_404_page() -> Markup {
    html! {
        (create_html_head(Some("404")))
        body a="auto" {
            main class="content" aria-label="Content" {
                div class="w" {
                    h1 { "404 - Page Not Found" }
                    p { "The page you're looking for doesn't exist." }
                    p { a href="/" { "Return to homepage" } }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entry() -> Entry {
        Entry {
            id: 7,
            title: Some("Groceries".to_string()),
            content: "<b>milk</b> and eggs".to_string(),
            image_path: Some("uploads/list.png".to_string()),
            keywords: "b,milk,eggs".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn index_page_escapes_content_and_links_keywords() {
        let html = create_index_page(&[entry()], None).into_string();
        assert!(html.contains("id=\"entry-7\""));
        assert!(html.contains("&lt;b&gt;milk&lt;/b&gt; and eggs"));
        assert!(html.contains("href=\"/search?q=milk\""));
        assert!(html.contains("src=\"/uploads/list.png\""));
        assert!(html.contains("<h3>Groceries</h3>"));
    }

    #[test]
    fn image_src_encodes_file_name() {
        assert_eq!(image_src("uploads/list.png"), "/uploads/list.png");
        assert_eq!(image_src("uploads/shot#1.png"), "/uploads/shot%231.png");
        assert_eq!(image_src("uploads/my photo?.png"), "/uploads/my%20photo%3F.png");
    }

    #[test]
    fn search_page_echoes_query() {
        let html = create_index_page(&[], Some("milk")).into_string();
        assert!(html.contains("value=\"milk\""));
        assert!(html.contains("0 results for <b>milk</b>"));
        assert!(html.contains("Nothing here yet."));
    }
}
