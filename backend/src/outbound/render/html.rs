//! Plain HTML renderer adapter.
//!
//! Turns a [`View`] into a complete HTML document with no template engine:
//! each template is a small function over the context JSON. Handlers are
//! tested against the context contract, so this adapter only needs to keep
//! markup well-formed and every interpolated value escaped.

use serde_json::Value;

use crate::domain::ports::{RenderError, Template, View, ViewRenderer};

/// Renderer producing self-contained HTML pages.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlRenderer;

/// Escape text for interpolation into HTML content or attributes.
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn missing(path: &str) -> RenderError {
    RenderError::template(format!("context is missing {path}"))
}

fn text<'a>(context: &'a Value, path: &str) -> Result<&'a str, RenderError> {
    context
        .pointer(path)
        .and_then(Value::as_str)
        .ok_or_else(|| missing(path))
}

fn array<'a>(context: &'a Value, path: &str) -> Result<&'a [Value], RenderError> {
    context
        .pointer(path)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .ok_or_else(|| missing(path))
}

fn number(context: &Value, path: &str) -> Result<u64, RenderError> {
    context
        .pointer(path)
        .and_then(Value::as_u64)
        .ok_or_else(|| missing(path))
}

fn flag(context: &Value, path: &str) -> Result<bool, RenderError> {
    context
        .pointer(path)
        .and_then(Value::as_bool)
        .ok_or_else(|| missing(path))
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n\
         <nav><a href=\"/\">Home</a> <a href=\"/search/\">Search</a> \
         <a href=\"/contact/\">Contact</a> <a href=\"/signin/\">Sign in</a> \
         <a href=\"/signup/\">Sign up</a></nav>\n\
         {body}\n</body>\n</html>\n",
        title = escape(title),
    )
}

fn post_card(post: &Value) -> Result<String, RenderError> {
    let slug = text(post, "/slug")?;
    let heading = text(post, "/heading")?;
    let created_at = text(post, "/created_at")?;
    let tags = array(post, "/tags")?
        .iter()
        .filter_map(Value::as_str)
        .map(|name| format!("<span class=\"tag\">{}</span>", escape(name)))
        .collect::<Vec<_>>()
        .join(" ");
    Ok(format!(
        "<article><h2><a href=\"/post/{slug}/\">{heading}</a></h2>\
         <time>{created_at}</time> {tags}</article>",
        slug = escape(slug),
        heading = escape(heading),
        created_at = escape(created_at),
    ))
}

fn post_list(posts: &[Value]) -> Result<String, RenderError> {
    let cards: Result<Vec<String>, RenderError> = posts.iter().map(post_card).collect();
    Ok(cards?.join("\n"))
}

fn page_nav(context: &Value) -> Result<String, RenderError> {
    let current = number(context, "/page/number")?;
    let total = number(context, "/page/total_pages")?;
    let mut nav = String::new();
    if flag(context, "/page/has_previous")? {
        nav.push_str(&format!(
            "<a href=\"?page={}\">previous</a> ",
            current.saturating_sub(1)
        ));
    }
    nav.push_str(&format!("Page {current} of {total}"));
    if flag(context, "/page/has_next")? {
        nav.push_str(&format!(" <a href=\"?page={}\">next</a>", current + 1));
    }
    Ok(format!("<nav class=\"pages\">{nav}</nav>"))
}

fn error_list(errors: &[Value]) -> String {
    let items: Vec<String> = errors
        .iter()
        .filter_map(Value::as_str)
        .map(|message| format!("<li>{}</li>", escape(message)))
        .collect();
    if items.is_empty() {
        String::new()
    } else {
        format!("<ul class=\"errors\">{}</ul>", items.join(""))
    }
}

fn field_errors(form: &Value, field: &str) -> String {
    form.pointer(&format!("/errors/fields/{field}"))
        .and_then(Value::as_array)
        .map(|messages| error_list(messages))
        .unwrap_or_default()
}

fn form_errors(form: &Value) -> String {
    form.pointer("/errors/form")
        .and_then(Value::as_array)
        .map(|messages| error_list(messages))
        .unwrap_or_default()
}

fn field_value<'a>(form: &'a Value, field: &str) -> &'a str {
    form.pointer(&format!("/values/{field}"))
        .and_then(Value::as_str)
        .unwrap_or_default()
}

fn input_row(form: &Value, field: &str, label: &str, kind: &str) -> String {
    let value = if kind == "password" {
        String::new()
    } else {
        escape(field_value(form, field))
    };
    format!(
        "<p><label>{label} <input type=\"{kind}\" name=\"{field}\" value=\"{value}\"></label>{errors}</p>",
        label = escape(label),
        errors = field_errors(form, field),
    )
}

fn tag_cloud(context: &Value) -> Result<String, RenderError> {
    let ranks = array(context, "/common_tags")?;
    let links: Result<Vec<String>, RenderError> = ranks
        .iter()
        .map(|rank| {
            let slug = text(rank, "/tag/slug")?;
            let name = text(rank, "/tag/name")?;
            let count = number(rank, "/count")?;
            Ok(format!(
                "<a href=\"/tag/{}/\">{} ({count})</a>",
                escape(slug),
                escape(name),
            ))
        })
        .collect();
    Ok(format!("<aside class=\"tags\">{}</aside>", links?.join(" ")))
}

fn home_body(context: &Value) -> Result<String, RenderError> {
    let posts = post_list(array(context, "/page/items")?)?;
    let nav = page_nav(context)?;
    Ok(format!("<main>{posts}</main>\n{nav}"))
}

fn post_detail_body(context: &Value) -> Result<String, RenderError> {
    let heading = text(context, "/post/heading")?;
    let content = text(context, "/post/content")?;
    let created_at = text(context, "/post/created_at")?;

    let comments: Result<Vec<String>, RenderError> = array(context, "/comments")?
        .iter()
        .map(|comment| {
            let author = text(comment, "/author")?;
            let body = text(comment, "/body")?;
            Ok(format!(
                "<li><strong>{}</strong>: {}</li>",
                escape(author),
                escape(body),
            ))
        })
        .collect();

    let recent: Result<Vec<String>, RenderError> = array(context, "/last_posts")?
        .iter()
        .map(|post| {
            let slug = text(post, "/slug")?;
            let post_heading = text(post, "/heading")?;
            Ok(format!(
                "<li><a href=\"/post/{}/\">{}</a></li>",
                escape(slug),
                escape(post_heading),
            ))
        })
        .collect();

    let form = context.pointer("/comment_form").ok_or_else(|| missing("/comment_form"))?;
    let comment_form = format!(
        "<form method=\"post\"><p><label>Comment \
         <textarea name=\"text\">{}</textarea></label>{}</p>\
         <button type=\"submit\">Add comment</button></form>",
        escape(field_value(form, "text")),
        field_errors(form, "text"),
    );

    Ok(format!(
        "<article><h1>{heading}</h1><time>{created_at}</time>\
         <div class=\"content\">{content}</div></article>\n\
         <section class=\"comments\"><ul>{comments}</ul>{comment_form}</section>\n\
         {tags}\n<aside class=\"recent\"><ul>{recent}</ul></aside>",
        heading = escape(heading),
        created_at = escape(created_at),
        content = escape(content),
        comments = comments?.join(""),
        tags = tag_cloud(context)?,
        recent = recent?.join(""),
    ))
}

fn signup_body(context: &Value) -> Result<String, RenderError> {
    let form = context.pointer("/form").ok_or_else(|| missing("/form"))?;
    Ok(format!(
        "<main><h1>Sign up</h1>{}<form method=\"post\">{}{}{}{}\
         <button type=\"submit\">Sign up</button></form></main>",
        form_errors(form),
        input_row(form, "username", "Username", "text"),
        input_row(form, "email", "Email", "email"),
        input_row(form, "password1", "Password", "password"),
        input_row(form, "password2", "Confirm password", "password"),
    ))
}

fn signin_body(context: &Value) -> Result<String, RenderError> {
    let form = context.pointer("/form").ok_or_else(|| missing("/form"))?;
    Ok(format!(
        "<main><h1>Sign in</h1>{}<form method=\"post\">{}{}\
         <button type=\"submit\">Sign in</button></form></main>",
        form_errors(form),
        input_row(form, "username", "Username", "text"),
        input_row(form, "password", "Password", "password"),
    ))
}

fn contact_body(context: &Value) -> Result<String, RenderError> {
    let title = text(context, "/title")?;
    let form = context.pointer("/form").ok_or_else(|| missing("/form"))?;
    let message = escape(field_value(form, "message"));
    Ok(format!(
        "<main><h1>{}</h1>{}<form method=\"post\">{}{}{}\
         <p><label>Message <textarea name=\"message\">{message}</textarea></label>{}</p>\
         <button type=\"submit\">Send</button></form></main>",
        escape(title),
        form_errors(form),
        input_row(form, "name", "Name", "text"),
        input_row(form, "email", "Email", "email"),
        input_row(form, "subject", "Subject", "text"),
        field_errors(form, "message"),
    ))
}

fn success_body(context: &Value) -> Result<String, RenderError> {
    let title = text(context, "/title")?;
    Ok(format!("<main><h1>{}</h1></main>", escape(title)))
}

fn search_body(context: &Value) -> Result<String, RenderError> {
    let query = text(context, "/query")?;
    let count = number(context, "/count")?;
    let posts = post_list(array(context, "/page/items")?)?;
    let nav = page_nav(context)?;
    Ok(format!(
        "<main><h1>Search</h1>\
         <form method=\"get\"><input type=\"text\" name=\"q\" value=\"{query}\">\
         <button type=\"submit\">Search</button></form>\
         <p>{count} result(s)</p>{posts}</main>\n{nav}",
        query = escape(query),
    ))
}

fn tag_body(context: &Value) -> Result<String, RenderError> {
    let title = text(context, "/title")?;
    let posts = post_list(array(context, "/posts")?)?;
    Ok(format!(
        "<main><h1>{}</h1>{posts}</main>\n{}",
        escape(title),
        tag_cloud(context)?,
    ))
}

impl ViewRenderer for HtmlRenderer {
    fn render(&self, view: &View) -> Result<String, RenderError> {
        let context = view.context();
        let body = match view.template() {
            Template::Home => home_body(context)?,
            Template::PostDetail => post_detail_body(context)?,
            Template::SignUp => signup_body(context)?,
            Template::SignIn => signin_body(context)?,
            Template::Contact => contact_body(context)?,
            Template::Success => success_body(context)?,
            Template::Search => search_body(context)?,
            Template::Tag => tag_body(context)?,
        };
        let title = context
            .pointer("/title")
            .and_then(Value::as_str)
            .unwrap_or("Blog");
        Ok(layout(title, &body))
    }
}
