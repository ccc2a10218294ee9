//! HTML rendering for the human-facing pages.

use html_escape::encode_safe;

const PAGE_STYLE: &str = r#"
    body { font-family: ui-sans-serif, system-ui, -apple-system, Segoe UI, Roboto, Helvetica, Arial; margin: 0; background:#0b0f19; color:#e5e7eb; }
    .wrap { max-width: 920px; margin: 0 auto; padding: 28px 16px 56px; }
    .card { background:#111827; border:1px solid rgba(255,255,255,.08); border-radius: 12px; padding: 18px; }
    h1 { font-size: 16px; margin: 0 0 12px; color:#cbd5e1; }
    pre { white-space: pre-wrap; word-break: break-word; margin: 0; font-size: 14px; line-height: 1.5; color:#f8fafc; }
    .meta { margin-top: 12px; font-size: 12px; color:#94a3b8; }
"#;

fn document(title: &str, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>{title}</title>
  <style>{PAGE_STYLE}</style>
</head>
<body>
  <div class="wrap">
    <div class="card">
{body}
    </div>
  </div>
</body>
</html>"#
    )
}

/// Render a paste for display. Both the id and the content are escaped.
pub fn paste_page(id: &str, content: &str) -> String {
    let safe_id = encode_safe(id);
    let safe_content = encode_safe(content);
    document(
        &format!("Paste {safe_id}"),
        &format!(
            r#"      <h1>Paste</h1>
      <pre>{safe_content}</pre>
      <div class="meta">id: {safe_id}</div>"#
        ),
    )
}

/// Landing page served at `/`.
pub fn landing_page() -> String {
    document(
        "Pastebin Lite",
        r#"      <h1>Pastebin Lite</h1>
      <p>Create a paste with <code>POST /api/pastes</code> and share the returned link.</p>"#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paste_page_escapes_markup() {
        let html = paste_page("abc", "<script>alert(\"x\") & 'y'</script>");
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&amp;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn paste_page_keeps_plain_text_intact() {
        let html = paste_page("abc_DEF-12", "line one\nline two");
        assert!(html.contains("<pre>line one\nline two</pre>"));
        assert!(html.contains("id: abc_DEF-12"));
    }
}
