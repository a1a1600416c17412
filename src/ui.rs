use crate::models::RecruiterSnapshot;

pub fn render_recruiter(snapshot: &RecruiterSnapshot) -> String {
    let initial = snapshot
        .user_name
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default();
    let avatar = match &snapshot.photo_url {
        Some(url) => format!(r#"<img class="avatar" src="{}" alt="Profile" />"#, escape(url)),
        None => format!(r#"<div class="avatar">{}</div>"#, escape(&initial)),
    };

    let primary = if snapshot.primary_skills.is_empty() {
        "<p class=\"muted\">No skills listed</p>".to_string()
    } else {
        let chips: String = snapshot
            .primary_skills
            .iter()
            .map(|skill| format!("<span class=\"chip\">{}</span>", escape(skill)))
            .collect();
        format!("<div class=\"chips\">{chips}</div>")
    };

    let tracked: String = snapshot
        .tracked_skills
        .iter()
        .map(|t| {
            format!(
                "<li><span>{}</span><div class=\"bar\"><div style=\"width: {}%\"></div></div><span>{}%</span></li>",
                escape(&t.skill),
                t.progress,
                t.progress
            )
        })
        .collect();

    let links: String = snapshot
        .links
        .iter()
        .map(|link| {
            format!(
                r#"<li><a href="{}" target="_blank" rel="noopener noreferrer">{}</a></li>"#,
                escape(&link.url),
                escape(&link.label)
            )
        })
        .collect();

    let summary = match &snapshot.summary {
        Some(summary) => {
            let since = summary
                .tracking_started_at
                .map(|at| format!("<p class=\"muted\">Tracking since {}</p>", at.format("%-d %B %Y")))
                .unwrap_or_default();
            format!(
                "<p>Total gain: <strong>{}%</strong></p>{since}",
                signed(summary.total_gain)
            )
        }
        None => "<p class=\"muted\">Progress tracking not started</p>".to_string(),
    };

    RECRUITER_HTML
        .replace("{{FULL_NAME}}", &escape(&snapshot.full_name))
        .replace("{{USER_NAME}}", &escape(&snapshot.user_name))
        .replace("{{ROLE}}", &escape(snapshot.role.as_deref().unwrap_or("No role defined")))
        .replace("{{BIO}}", &escape(snapshot.bio.as_deref().unwrap_or("No bio available")))
        .replace("{{AVATAR}}", &avatar)
        .replace("{{PRIMARY}}", &primary)
        .replace("{{TRACKED}}", &tracked)
        .replace("{{LINKS}}", &links)
        .replace("{{SUMMARY}}", &summary)
}

fn signed(value: i64) -> String {
    if value > 0 {
        format!("+{value}")
    } else {
        value.to_string()
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const RECRUITER_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{FULL_NAME}} | DevTrack</title>
  <style>
    :root {
      --bg-1: #f8f3e6;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(760px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    header { text-align: center; }
    h1 { margin: 12px 0 0; font-family: "Georgia", serif; }
    h2 { font-size: 1.05rem; margin: 0 0 8px; color: var(--accent-2); }
    .muted { color: #5f5c57; }

    .avatar {
      width: 112px;
      height: 112px;
      border-radius: 50%;
      margin: 0 auto;
      object-fit: cover;
      display: grid;
      place-items: center;
      background: var(--accent-2);
      color: #fff;
      font-size: 2.4rem;
    }

    .chips { display: flex; flex-wrap: wrap; gap: 8px; }
    .chip { background: #f5d3a7; border-radius: 999px; padding: 4px 12px; }

    ul { list-style: none; padding: 0; margin: 0; display: grid; gap: 8px; }
    .tracked li { display: grid; grid-template-columns: 1fr 2fr 48px; gap: 12px; align-items: center; }
    .bar { height: 10px; border-radius: 999px; background: #e6ded2; overflow: hidden; }
    .bar div { height: 100%; background: var(--accent); }
    a { color: var(--accent-2); }
  </style>
</head>
<body>
  <main class="app">
    <header>
      {{AVATAR}}
      <h1>{{FULL_NAME}}</h1>
      <p class="muted">@{{USER_NAME}}</p>
      <p>{{ROLE}}</p>
    </header>
    <section>
      <h2>Bio</h2>
      <p>{{BIO}}</p>
    </section>
    <section>
      <h2>Primary skills</h2>
      {{PRIMARY}}
    </section>
    <section>
      <h2>Tracked skills</h2>
      <ul class="tracked">{{TRACKED}}</ul>
    </section>
    <section>
      <h2>Progress</h2>
      {{SUMMARY}}
    </section>
    <section>
      <h2>Links</h2>
      <ul>{{LINKS}}</ul>
    </section>
  </main>
</body>
</html>
"#;
