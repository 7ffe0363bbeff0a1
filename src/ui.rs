use crate::models::{MoodRecord, ViewState};
use std::fmt::Write;

pub fn render_index(view: &ViewState) -> String {
    let background = match view.today_image.as_deref() {
        Some(url) => format!("background-image: url('{}');", escape_html(&css_url(url))),
        None => String::new(),
    };
    let status = if view.loading_initial {
        "Loading moods..."
    } else if view.moods.is_empty() {
        "No moods yet"
    } else {
        ""
    };
    let button = if view.submitting { "Submitting..." } else { "Submit Mood" };
    let draft = escape_html(&view.draft);
    let progress = view.submit_progress.to_string();
    let gallery = render_gallery(&view.moods);

    fill_template(INDEX_HTML, |key| match key {
        "BACKGROUND" => Some(background.as_str()),
        "DRAFT" => Some(draft.as_str()),
        "PROGRESS" => Some(progress.as_str()),
        "BUTTON" => Some(button),
        "DISABLED" => Some(if view.submitting { "disabled" } else { "" }),
        "STATUS" => Some(status),
        "MOODS" => Some(gallery.as_str()),
        _ => None,
    })
}

/// Substitutes `{{KEY}}` placeholders in one pass; substituted text is never rescanned.
fn fill_template<'a>(template: &str, lookup: impl Fn(&str) -> Option<&'a str>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}").and_then(|end| lookup(&after[..end]).map(|value| (end, value))) {
            Some((end, value)) => {
                out.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Percent-encodes characters that would end a quoted CSS `url('...')`.
fn css_url(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '\'' => out.push_str("%27"),
            '"' => out.push_str("%22"),
            '(' => out.push_str("%28"),
            ')' => out.push_str("%29"),
            '\\' => out.push_str("%5C"),
            ch if ch.is_ascii_whitespace() || ch.is_ascii_control() => {
                let _ = write!(out, "%{:02X}", ch as u8);
            }
            other => out.push(other),
        }
    }
    out
}

fn render_gallery(moods: &[MoodRecord]) -> String {
    moods.iter().map(render_card).collect::<Vec<_>>().join("\n")
}

fn render_card(record: &MoodRecord) -> String {
    let image = match record.image() {
        Some(url) => format!(r#"<img src="{}" alt="" loading="lazy" />"#, escape_html(url)),
        None => String::new(),
    };
    format!(
        r#"<article class="card">{image}<div class="meta"><span class="date">{date}</span><span class="avg">{average}</span></div><p>{description}</p><span class="count">{total} submissions</span></article>"#,
        date = escape_html(&record.date),
        average = escape_html(&record.average_mood),
        description = escape_html(&record.description),
        total = record.total_submissions,
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Mood Journal</title>
  <style>
    :root {
      --bg: #eff6ff;
      --ink: #374151;
      --accent: #fbcfe8;
      --accent-strong: #f9a8d4;
      --card: #ffffff;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background-color: var(--bg);
      background-size: cover;
      background-position: center;
      color: var(--ink);
      font-family: system-ui, sans-serif;
      padding: 32px 16px;
    }

    .panel {
      max-width: 28rem;
      margin: 0 auto 32px;
      background: var(--card);
      border-radius: 12px;
      box-shadow: 0 10px 30px rgba(0, 0, 0, 0.12);
      padding: 32px;
      text-align: center;
    }

    h1 {
      font-size: 1.5rem;
      font-weight: 600;
      margin: 0 0 24px;
    }

    input[type="text"] {
      width: 100%;
      padding: 12px 16px;
      border: 1px solid #e5e7eb;
      border-radius: 8px;
      background: #f9fafb;
      color: var(--ink);
      margin-bottom: 16px;
    }

    button {
      width: 100%;
      padding: 12px 16px;
      border: 0;
      border-radius: 8px;
      background: var(--accent);
      color: var(--ink);
      font-weight: 500;
      cursor: pointer;
      transition: background 0.2s, transform 0.3s;
    }

    button:hover:not([disabled]) {
      background: var(--accent-strong);
      transform: scale(1.05);
    }

    button[disabled] {
      opacity: 0.6;
      cursor: wait;
    }

    .progress {
      height: 6px;
      margin-top: 16px;
      background: #f3f4f6;
      border-radius: 999px;
      overflow: hidden;
    }

    .progress span {
      display: block;
      height: 100%;
      background: var(--accent-strong);
      transition: width 0.2s linear;
    }

    .gallery {
      max-width: 64rem;
      margin: 0 auto;
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(220px, 1fr));
      gap: 16px;
    }

    .card {
      background: var(--card);
      border-radius: 12px;
      overflow: hidden;
      box-shadow: 0 6px 18px rgba(0, 0, 0, 0.08);
      padding-bottom: 12px;
    }

    .card img {
      width: 100%;
      height: 160px;
      object-fit: cover;
    }

    .card .meta,
    .card p,
    .card .count {
      padding: 0 12px;
    }

    .card .meta {
      display: flex;
      justify-content: space-between;
      font-size: 0.8rem;
      margin-top: 8px;
    }

    .card .count {
      font-size: 0.75rem;
      color: #6b7280;
    }

    .status {
      text-align: center;
      color: #6b7280;
    }
  </style>
</head>
<body style="{{BACKGROUND}}">
  <section class="panel">
    <h1>How are you feeling?</h1>
    <form id="mood-form" method="post" action="/mood">
      <input id="mood" name="mood" type="text" placeholder="Enter your mood..." value="{{DRAFT}}" required />
      <button id="submit" type="submit" {{DISABLED}}>{{BUTTON}}</button>
      <div class="progress"><span id="progress" style="width: {{PROGRESS}}%"></span></div>
    </form>
  </section>
  <p id="status" class="status">{{STATUS}}</p>
  <main id="gallery" class="gallery">
{{MOODS}}
  </main>
  <script>
    const form = document.getElementById('mood-form');
    const input = document.getElementById('mood');
    const button = document.getElementById('submit');
    const bar = document.getElementById('progress');

    const poll = async () => {
      try {
        const res = await fetch('/api/state');
        const view = await res.json();
        bar.style.width = `${view.submit_progress}%`;
        return view;
      } catch (err) {
        return null;
      }
    };

    form.addEventListener('submit', async (event) => {
      event.preventDefault();
      const mood = input.value.trim();
      if (!mood) {
        return;
      }
      button.disabled = true;
      button.textContent = 'Submitting...';
      const ticker = setInterval(poll, 200);
      try {
        await fetch('/api/mood', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify({ mood }),
        });
      } finally {
        clearInterval(ticker);
        await poll();
        setTimeout(() => window.location.reload(), 500);
      }
    });
  </script>
</body>
</html>
"#;
