use super::layout::{escape_html, Page};
use crate::core::feed::{Audio, Episode};

const SUMMARY_WIDTH: usize = 100;

pub fn home_page(episodes: &[Episode]) -> Page {
    let mut body = String::from("<main class=\"mx-auto max-w-3xl px-4 py-16\">\n");
    body.push_str("<h1 class=\"text-2xl font-bold\">Episodes</h1>\n");

    if episodes.is_empty() {
        body.push_str("<p class=\"mt-8 text-slate-500\">No episodes yet. Check back soon.</p>\n");
    } else {
        body.push_str("<div class=\"divide-y divide-slate-100\">\n");
        for episode in episodes {
            episode_entry(&mut body, episode);
        }
        body.push_str("</div>\n");
    }
    body.push_str("</main>");

    Page {
        body,
        ..Page::default()
    }
}

fn episode_entry(body: &mut String, episode: &Episode) {
    body.push_str(&format!(
        "<article aria-labelledby=\"episode-{id}-title\" class=\"py-10\">\n",
        id = episode.id
    ));
    body.push_str(&format!(
        "<h2 id=\"episode-{id}-title\" class=\"mt-2 text-lg font-bold\"><a href=\"/{id}\">{title}</a></h2>\n",
        id = episode.id,
        title = escape_html(&episode.title)
    ));
    published_date(body, episode);
    body.push_str(&format!(
        "<p class=\"mt-1 text-base text-slate-700\">{}</p>\n",
        escape_html(&episode.summary_text(SUMMARY_WIDTH))
    ));
    if let Some(audio) = &episode.audio {
        audio_player(body, audio);
    }
    body.push_str(&format!(
        "<a href=\"/{}\" class=\"text-sm font-bold\">Show notes</a>\n",
        episode.id
    ));
    body.push_str("</article>\n");
}

pub fn episode_page(episode: &Episode) -> Page {
    let mut body = String::from("<article class=\"mx-auto max-w-3xl px-4 py-16\">\n<header>\n");
    body.push_str(&format!(
        "<h1 class=\"mt-2 text-4xl font-bold\">{}</h1>\n",
        escape_html(&episode.title)
    ));
    published_date(&mut body, episode);
    body.push_str(&format!(
        "<p class=\"mt-3 text-lg text-slate-700\">{}</p>\n",
        escape_html(&episode.summary_text(SUMMARY_WIDTH))
    ));
    if let Some(audio) = &episode.audio {
        audio_player(&mut body, audio);
    }
    body.push_str("</header>\n<hr class=\"my-12\">\n");
    // Show notes come from our own feed and are rendered as-is.
    body.push_str(&format!("<div class=\"prose\">{}</div>\n", episode.content));
    body.push_str("</article>");

    Page {
        title: Some(episode.title.clone()),
        description: Some(episode.description.clone()),
        body,
    }
}

pub fn not_found_page() -> Page {
    Page {
        title: Some("Page not found".to_string()),
        description: None,
        body: "<main class=\"mx-auto max-w-3xl px-4 py-16\">\n<h1 class=\"text-2xl font-bold\">Page not found</h1>\n<p class=\"mt-4\">Sorry, we couldn't find the page you're looking for.</p>\n<a href=\"/\" class=\"text-sm font-bold\">Go back home</a>\n</main>".to_string(),
    }
}

pub fn unavailable_page() -> Page {
    Page {
        title: Some("Episodes unavailable".to_string()),
        description: None,
        body: "<main class=\"mx-auto max-w-3xl px-4 py-16\">\n<h1 class=\"text-2xl font-bold\">Episodes unavailable</h1>\n<p class=\"mt-4\">The episode feed could not be loaded right now. Please try again in a moment.</p>\n</main>".to_string(),
    }
}

fn published_date(body: &mut String, episode: &Episode) {
    body.push_str(&format!(
        "<time datetime=\"{}\" class=\"text-sm text-slate-500\">{}</time>\n",
        episode.published.to_rfc3339(),
        episode.published.format("%B %-d, %Y")
    ));
}

fn audio_player(body: &mut String, audio: &Audio) {
    body.push_str(&format!(
        "<audio controls preload=\"none\" class=\"mt-4 w-full\"><source src=\"{}\" type=\"{}\"></audio>\n",
        escape_html(&audio.src),
        escape_html(&audio.mime_type)
    ));
}
