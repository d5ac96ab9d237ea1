//! Server-rendered HTML pages
//!
//! Pages share one layout: navigation, pending flash messages, body.
//! All user-supplied text goes through [`escape_html`].

use std::fmt::Write;

use super::flash::Flash;
use crate::board::Post;

/// Values typed into the new-post form, echoed back after a rejection
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: String,
    pub topic: String,
    pub content: String,
}

pub fn escape_html(s: &str) -> String {
    let mut output = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#39;"),
            c => output.push(c),
        }
    }
    output
}

fn layout(title: &str, flashes: &[Flash], body: &str) -> String {
    let mut page = String::with_capacity(body.len() + 512);

    page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(page, "<title>{} - Topic Board</title>", escape_html(title));
    page.push_str("</head>\n<body>\n<nav>\n");
    page.push_str("<a href=\"/\">Home</a> | <a href=\"/add_topic\">Add Topic</a> | <a href=\"/add_post\">New Post</a>\n");
    page.push_str("</nav>\n");

    if !flashes.is_empty() {
        page.push_str("<ul class=\"flashes\">\n");
        for flash in flashes {
            let _ = writeln!(
                page,
                "<li class=\"flash flash-{}\">{}</li>",
                flash.category.as_str(),
                escape_html(&flash.message)
            );
        }
        page.push_str("</ul>\n");
    }

    page.push_str("<main>\n");
    page.push_str(body);
    page.push_str("</main>\n</body>\n</html>\n");
    page
}

fn topic_list(topics: &[String]) -> String {
    if topics.is_empty() {
        return "<p class=\"empty\">No topics yet.</p>\n".to_string();
    }

    let mut html = String::from("<ul class=\"topics\">\n");
    for topic in topics {
        let _ = writeln!(html, "<li>{}</li>", escape_html(topic));
    }
    html.push_str("</ul>\n");
    html
}

fn post_summary(post: &Post) -> String {
    format!(
        "<article class=\"post\">\n<h3><a href=\"/post/{id}\">{title}</a></h3>\n\
         <p class=\"meta\">{topic} &middot; {timestamp}</p>\n</article>\n",
        id = post.id,
        title = escape_html(&post.title),
        topic = escape_html(&post.topic),
        timestamp = escape_html(&post.timestamp),
    )
}

/// Home page: recent posts and all topics
pub fn index_page(posts: &[Post], topics: &[String], flashes: &[Flash]) -> String {
    let mut body = String::from("<h1>Topic Board</h1>\n<section>\n<h2>Recent Posts</h2>\n");

    if posts.is_empty() {
        body.push_str("<p class=\"empty\">No posts yet.</p>\n");
    } else {
        // Newest first on the page
        for post in posts.iter().rev() {
            body.push_str(&post_summary(post));
        }
    }

    body.push_str("</section>\n<section>\n<h2>Topics</h2>\n");
    body.push_str(&topic_list(topics));
    body.push_str("</section>\n");

    layout("Home", flashes, &body)
}

pub fn add_topic_page(topics: &[String], flashes: &[Flash]) -> String {
    let mut body = String::from(
        "<h1>Add Topic</h1>\n<form method=\"post\" action=\"/add_topic\">\n\
         <label for=\"topic\">Topic name</label>\n\
         <input type=\"text\" id=\"topic\" name=\"topic\" required>\n\
         <button type=\"submit\">Add</button>\n</form>\n<h2>Existing Topics</h2>\n",
    );
    body.push_str(&topic_list(topics));

    layout("Add Topic", flashes, &body)
}

pub fn add_post_page(topics: &[String], draft: &PostDraft, flashes: &[Flash]) -> String {
    let mut body = String::from("<h1>New Post</h1>\n<form method=\"post\" action=\"/add_post\">\n");

    let _ = writeln!(
        body,
        "<label for=\"title\">Title</label>\n<input type=\"text\" id=\"title\" name=\"title\" value=\"{}\" required>",
        escape_html(&draft.title)
    );

    body.push_str("<label for=\"topic\">Topic</label>\n<select id=\"topic\" name=\"topic\" required>\n");
    for topic in topics {
        let selected = if *topic == draft.topic { " selected" } else { "" };
        let _ = writeln!(
            body,
            "<option value=\"{value}\"{selected}>{label}</option>",
            value = escape_html(topic),
            selected = selected,
            label = escape_html(topic)
        );
    }
    body.push_str("</select>\n");

    let _ = writeln!(
        body,
        "<label for=\"content\">Content</label>\n<textarea id=\"content\" name=\"content\" rows=\"8\" required>{}</textarea>",
        escape_html(&draft.content)
    );
    body.push_str("<button type=\"submit\">Publish</button>\n</form>\n");

    layout("New Post", flashes, &body)
}

pub fn post_page(post: &Post, flashes: &[Flash]) -> String {
    let body = format!(
        "<article class=\"post\">\n<h1>{title}</h1>\n\
         <p class=\"meta\">{topic} &middot; {timestamp}</p>\n\
         <div class=\"content\">{content}</div>\n</article>\n\
         <p><a href=\"/\">Back to home</a></p>\n",
        title = escape_html(&post.title),
        topic = escape_html(&post.topic),
        timestamp = escape_html(&post.timestamp),
        content = escape_html(&post.content).replace('\n', "<br>\n"),
    );

    layout(&post.title, flashes, &body)
}

pub fn not_found_page() -> String {
    layout(
        "Not Found",
        &[],
        "<h1>Not Found</h1>\n<p>The requested page does not exist.</p>\n<p><a href=\"/\">Back to home</a></p>\n",
    )
}
