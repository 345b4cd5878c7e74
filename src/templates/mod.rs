//! Server-rendered dashboard markup. Plain template constants plus small
//! render functions; widget HTML is embedded as-is, card titles are escaped.

use crate::models::dto::response::DashboardCard;

pub const NO_DATA_WIDGET: &str = "<div>No data yet</div>";

const DASHBOARD_STYLE: &str = r#"
* { box-sizing: border-box; }
body {
    margin: 0;
    padding: 24px;
    font-family: system-ui, -apple-system, sans-serif;
    background: #f4f5f7;
    color: #1f2430;
}
h1 { margin: 0 0 20px; font-size: 22px; }
.widget-grid {
    display: flex;
    flex-wrap: wrap;
    gap: 16px;
    align-items: flex-start;
}
.widget-card {
    background: #fff;
    border-radius: 10px;
    box-shadow: 0 1px 4px rgba(20, 24, 36, 0.12);
    min-width: 280px;
    max-width: 480px;
    flex: 1 1 320px;
    overflow: hidden;
}
.widget-card-header {
    display: flex;
    align-items: center;
    justify-content: space-between;
    padding: 10px 14px;
    border-bottom: 1px solid #e7e9ee;
    font-size: 14px;
    font-weight: 600;
}
.widget-card-header .controls button {
    border: none;
    background: #eef0f4;
    border-radius: 6px;
    padding: 4px 8px;
    margin-left: 6px;
    cursor: pointer;
    font-size: 12px;
}
.widget-card-header .controls button:hover { background: #dfe3ea; }
.widget-card-body { padding: 14px; }
.empty-dashboard { color: #6b7280; font-size: 15px; }
"#;

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn render_card(card: &DashboardCard) -> String {
    let title = escape_html(&card.title);

    let controls = if card.user_created {
        let widget_id = card.widget_id.as_deref().unwrap_or_default();
        format!(
            r#"<button onclick="refreshWidget('/api/user-widgets/{widget_id}/refresh')">Refresh</button>
<button onclick="refreshWidget('/api/user-widgets/{widget_id}/full-refresh')">Redesign</button>
<button onclick="deleteUserWidget('{widget_id}')">Delete</button>"#
        )
    } else {
        let app_id = card.app_id.as_deref().unwrap_or_default();
        format!(
            r#"<button onclick="refreshWidget('/api/app-widgets/{app_id}/refresh')">Refresh</button>
<button onclick="refreshWidget('/api/app-widgets/{app_id}/full-refresh')">Redesign</button>
<button onclick="deleteAppWidget('{app_id}')">Delete</button>"#
        )
    };

    let slot = match (&card.app_id, &card.widget_id) {
        (Some(app_id), _) => format!("app-{app_id}"),
        (_, Some(widget_id)) => format!("user-{widget_id}"),
        _ => "unassigned".to_string(),
    };

    format!(
        r#"<div class="widget-card" id="card-{slot}">
  <div class="widget-card-header">
    <span>{title}</span>
    <span class="controls">{controls}</span>
  </div>
  <div class="widget-card-body">{html}</div>
</div>"#,
        html = card.html
    )
}

const DASHBOARD_SCRIPT: &str = r#"
async function refreshWidget(url) {
    const response = await fetch(url, { method: 'POST' });
    if (response.ok) { window.location.reload(); }
}
async function deleteUserWidget(widgetId) {
    const response = await fetch('/api/user-widgets/delete', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ widget_id: widgetId }),
    });
    if (response.ok) { window.location.reload(); }
}
async function deleteAppWidget(appId) {
    const response = await fetch('/api/app-widgets/' + appId, { method: 'DELETE' });
    if (response.ok) { window.location.reload(); }
}
"#;

/// Full dashboard page. Cards arrive pre-ordered (user widgets first).
pub fn render_dashboard(cards: &[DashboardCard], refresh_interval_ms: u64) -> String {
    let body = if cards.is_empty() {
        "<p class=\"empty-dashboard\">No widgets yet. Register an app or create a widget to get started.</p>"
            .to_string()
    } else {
        cards.iter().map(render_card).collect::<Vec<_>>().join("\n")
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Mosaic Dashboard</title>
<style>{DASHBOARD_STYLE}</style>
</head>
<body>
<h1>Mosaic Dashboard</h1>
<div class="widget-grid">
{body}
</div>
<script>{DASHBOARD_SCRIPT}
setInterval(() => window.location.reload(), {refresh_interval_ms});
</script>
</body>
</html>"#
    )
}

/// Rendered with a 503 when the store cannot be reached while assembling the
/// dashboard.
pub fn render_db_error_page(detail: &str) -> String {
    let detail = escape_html(detail);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Database Connection Error</title>
<style>
body {{ font-family: system-ui, sans-serif; padding: 40px; background: #f5f5f5; }}
.error-box {{ background: white; padding: 30px; border-radius: 8px; max-width: 600px; margin: 0 auto; }}
h1 {{ color: #d32f2f; }}
code {{ background: #f5f5f5; padding: 2px 6px; border-radius: 4px; }}
</style>
</head>
<body>
<div class="error-box">
  <h1>⚠️ Database Connection Error</h1>
  <p>Unable to reach MongoDB. Check the connection string and that the database accepts connections from this host.</p>
  <p><strong>Error:</strong> <code>{detail}</code></p>
</div>
</body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_card() -> DashboardCard {
        DashboardCard {
            widget_id: Some("abc123".to_string()),
            app_id: None,
            title: "Clock <script>".to_string(),
            user_created: true,
            html: "<div class=\"clock\">12:00</div>".to_string(),
        }
    }

    #[test]
    fn test_dashboard_embeds_widget_html_unescaped() {
        let page = render_dashboard(&[user_card()], 30_000);
        assert!(page.contains("<div class=\"clock\">12:00</div>"));
    }

    #[test]
    fn test_dashboard_escapes_card_titles() {
        let page = render_dashboard(&[user_card()], 30_000);
        assert!(page.contains("Clock &lt;script&gt;"));
        assert!(!page.contains("Clock <script>"));
    }

    #[test]
    fn test_user_cards_target_user_widget_endpoints() {
        let page = render_dashboard(&[user_card()], 30_000);
        assert!(page.contains("/api/user-widgets/abc123/refresh"));
        assert!(page.contains("/api/user-widgets/abc123/full-refresh"));
    }

    #[test]
    fn test_app_cards_target_app_widget_endpoints() {
        let card = DashboardCard {
            widget_id: None,
            app_id: Some("app42".to_string()),
            title: "Weather".to_string(),
            user_created: false,
            html: NO_DATA_WIDGET.to_string(),
        };
        let page = render_dashboard(&[card], 30_000);
        assert!(page.contains("/api/app-widgets/app42/refresh"));
        assert!(page.contains(NO_DATA_WIDGET));
    }

    #[test]
    fn test_empty_dashboard_shows_placeholder() {
        let page = render_dashboard(&[], 30_000);
        assert!(page.contains("No widgets yet"));
    }

    #[test]
    fn test_refresh_interval_is_embedded() {
        let page = render_dashboard(&[], 15_000);
        assert!(page.contains("setInterval(() => window.location.reload(), 15000);"));
    }

    #[test]
    fn test_error_page_escapes_detail() {
        let page = render_db_error_page("timeout <tls>");
        assert!(page.contains("timeout &lt;tls&gt;"));
        assert!(page.contains("Database Connection Error"));
    }
}
