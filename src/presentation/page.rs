// Dashboard page markup
use crate::application::refresh::DashboardPage;
use crate::chart::format;
use crate::domain::dashboard::HistoryColumn;
use crate::domain::sample::Sample;
use crate::domain::server::ServerInfo;
use crate::infrastructure::svg::{self, escape_html};
use std::fmt::Write;

const LOADING_HEIGHT: f64 = 200.0;

const STYLE: &str = "body{font-family:sans-serif;margin:20px;color:#333;background:#f5f7fa}\
.toolbar{display:flex;gap:12px;align-items:center;margin-bottom:16px}\
.error-banner{background:#fdecea;color:#b71c1c;border:1px solid #ee6666;padding:10px 14px;border-radius:4px;margin-bottom:16px}\
.charts{display:flex;flex-wrap:wrap;gap:16px}\
.chart{background:#fff;border-radius:6px;padding:12px;box-shadow:0 1px 3px rgba(0,0,0,.08);overflow-x:auto}\
table{border-collapse:collapse;margin-top:20px;background:#fff;min-width:600px}\
th,td{padding:6px 12px;border-bottom:1px solid #eee;text-align:right}\
td.empty{text-align:center;color:#999}\
.server-info{display:grid;grid-template-columns:repeat(2,minmax(0,1fr));gap:8px 24px;background:#fff;border-radius:6px;padding:12px;margin-bottom:16px}\
.detail-label{color:#666;margin-right:6px}\
.status-badge{padding:2px 8px;border-radius:10px;font-size:12px;background:#eee;color:#666}\
.status-badge.online{background:#e8f5e9;color:#2e7d32}";

/// Page-level settings shared by every dashboard.
#[derive(Debug, Clone)]
pub struct PageOptions {
    /// Seconds between client-side chart reloads.
    pub reload_secs: u64,
    pub history_columns: Vec<HistoryColumn>,
    pub empty_message: String,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            reload_secs: 30,
            history_columns: Vec::new(),
            empty_message: "No historical data".to_string(),
        }
    }
}

/// Full HTML page for one server: toolbar, error banner, every surface and the sample table.
pub fn render_page(page: &DashboardPage, options: &PageOptions) -> String {
    let server_id = escape_html(&page.view.server_id);
    let mut html = String::with_capacity(16 * 1024);

    let _ = write!(
        html,
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>Server {id}</title><style>{style}</style></head><body>",
        id = server_id,
        style = STYLE
    );
    let title = page
        .view
        .server
        .as_ref()
        .and_then(|s| s.name.as_deref())
        .map(escape_html)
        .unwrap_or_else(|| format!("Server {}", server_id));
    let _ = write!(html, "<h1>{}</h1>", title);
    if let Some(server) = &page.view.server {
        server_card(&mut html, server);
    }

    let updated = page
        .view
        .refreshed_at
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    let _ = write!(
        html,
        "<div class=\"toolbar\"><button id=\"refresh\">Refresh</button><span>Last updated: {}</span></div>",
        updated
    );

    if let Some(error) = &page.last_error {
        let _ = write!(
            html,
            "<div class=\"error-banner\" role=\"alert\">Failed to refresh data: {}</div>",
            escape_html(error)
        );
    }

    html.push_str("<div class=\"charts\">");
    for surface in page.container.surfaces() {
        let markup = match surface.mounted() {
            Some(drawing) => svg::render_drawing(drawing).into_string(),
            None => svg::render_placeholder("Loading...", LOADING_HEIGHT),
        };
        let _ = write!(
            html,
            "<section class=\"chart\" id=\"{}\">{}</section>",
            escape_html(&surface.id),
            markup
        );
    }
    html.push_str("</div>");

    if !options.history_columns.is_empty() {
        history_table(&mut html, &page.view.history, options);
    }

    let _ = write!(
        html,
        "<script>{}</script></body></html>",
        script(&page.view.server_id, options.reload_secs)
    );
    html
}

/// Inventory details above the charts; `-` stands in for anything unknown.
fn server_card(html: &mut String, server: &ServerInfo) {
    let (badge_class, badge_text) = if server.is_online() {
        ("online", "Online")
    } else {
        (server.status.as_deref().unwrap_or("offline"), "Offline")
    };
    let gigabytes = |v: Option<f64>| v.map(|v| format!("{} GB", v));
    let fields = [
        ("IP", server.ip.clone()),
        ("Type", server.server_type.clone()),
        ("Environment", server.env.clone()),
        ("CPU cores", server.cpu_cores.map(|c| c.to_string())),
        ("Total memory", gigabytes(server.total_memory)),
        ("Total disk", gigabytes(server.total_disk)),
        ("Description", server.description.clone()),
        ("Created", server.created_at.map(|t| t.format("%m-%d %H:%M:%S").to_string())),
    ];

    let _ = write!(
        html,
        "<div class=\"server-info\"><div><span class=\"detail-label\">Status:</span><span class=\"status-badge {}\">{}</span></div>",
        escape_html(badge_class),
        badge_text
    );
    for (label, value) in fields {
        let value = value.filter(|v| !v.is_empty()).unwrap_or_else(|| "-".to_string());
        let _ = write!(
            html,
            "<div><span class=\"detail-label\">{}:</span><span class=\"detail-value\">{}</span></div>",
            label,
            escape_html(&value)
        );
    }
    html.push_str("</div>");
}

/// Recent samples, newest first.
fn history_table(html: &mut String, history: &[Sample], options: &PageOptions) {
    html.push_str("<table><thead><tr><th>Time</th>");
    for column in &options.history_columns {
        let _ = write!(html, "<th>{}</th>", escape_html(&column.label));
    }
    html.push_str("</tr></thead><tbody>");

    if history.is_empty() {
        let _ = write!(
            html,
            "<tr><td class=\"empty\" colspan=\"{}\">{}</td></tr>",
            options.history_columns.len() + 1,
            escape_html(&options.empty_message)
        );
    }
    for sample in history.iter().rev() {
        let _ = write!(html, "<tr><td>{}</td>", sample.timestamp.format("%m-%d %H:%M:%S"));
        for column in &options.history_columns {
            let cell = match sample.field(&column.key) {
                Some(value) => format!("{}{}", format::decimal(value, 2), column.unit),
                None => "-".to_string(),
            };
            let _ = write!(html, "<td>{}</td>", escape_html(&cell));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");
}

/// Reports the viewport width, wires the refresh button and reloads each chart periodically.
fn script(server_id: &str, reload_secs: u64) -> String {
    let base = format!("/servers/{}", urlencoding::encode(server_id));
    format!(
        "const base='{base}';\
const post=u=>fetch(u,{{method:'POST'}});\
const reportWidth=()=>post(base+'/viewport?width='+Math.max(320,window.innerWidth-80));\
window.addEventListener('resize',reportWidth);reportWidth();\
document.getElementById('refresh').addEventListener('click',()=>post(base+'/refresh'));\
const reload=()=>document.querySelectorAll('section.chart').forEach(s=>\
fetch(base+'/charts/'+encodeURIComponent(s.id)).then(r=>r.ok?r.text():null).then(t=>{{if(t!==null)s.innerHTML=t;}}));\
setInterval(reload,{ms});",
        ms = reload_secs.max(1) * 1000
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::{ChartConfig, ChartSpec, Color, GaugeConfig, SeriesConfig};
    use crate::domain::sample::{Sample, parse_timestamp};

    fn specs() -> Vec<ChartSpec> {
        vec![
            ChartSpec::Line(ChartConfig::new(
                "trend-chart",
                vec![SeriesConfig::new("cpuUsage", "CPU", Color::BLUE)],
            )),
            ChartSpec::Gauge(GaugeConfig::percent("cpu-pie-chart", "cpuUsage")),
        ]
    }

    #[test]
    fn test_unrendered_page_shows_loading() {
        let page = DashboardPage::new("web-1", &specs(), 800.0);
        let html = render_page(&page, &PageOptions::default());
        assert!(html.contains("<h1>Server web-1</h1>"));
        assert_eq!(html.matches("Loading...").count(), 2);
        assert!(html.contains("Last updated: -"));
        assert!(!html.contains("error-banner\""));
        assert!(html.contains("setInterval(reload,30000)"));
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn test_rendered_page_inlines_svg_and_error_banner() {
        let specs = specs();
        let mut page = DashboardPage::new("1", &specs, 800.0);
        let start = parse_timestamp("2024-05-01 10:00:00").unwrap();
        page.view.history = vec![
            Sample::new(start).with_field("cpuUsage", 10.0),
            Sample::new(start + chrono::Duration::seconds(30)).with_field("cpuUsage", 90.0),
        ];
        page.view.latest = page.view.history.last().cloned();
        page.container
            .render_all(&specs, &page.view, &crate::chart::theme::ChartTheme::default());
        page.last_error = Some("Failed to fetch <history>".to_string());

        let html = render_page(&page, &PageOptions::default());
        assert_eq!(html.matches("<svg").count(), 2);
        assert!(html.contains("<section class=\"chart\" id=\"trend-chart\"><svg"));
        assert!(html.contains("Failed to refresh data: Failed to fetch &lt;history&gt;"));
    }

    fn table_options() -> PageOptions {
        PageOptions {
            history_columns: vec![
                HistoryColumn {
                    key: "cpuUsage".to_string(),
                    label: "CPU".to_string(),
                    unit: "%".to_string(),
                },
                HistoryColumn {
                    key: "loadAverage".to_string(),
                    label: "Load".to_string(),
                    unit: String::new(),
                },
            ],
            ..PageOptions::default()
        }
    }

    #[test]
    fn test_history_table_lists_newest_first() {
        let mut page = DashboardPage::new("1", &specs(), 800.0);
        let start = parse_timestamp("2024-05-01 10:00:00").unwrap();
        page.view.history = vec![
            Sample::new(start).with_field("cpuUsage", 10.0),
            Sample::new(start + chrono::Duration::seconds(30))
                .with_field("cpuUsage", 12.345)
                .with_field("loadAverage", 1.5),
        ];

        let html = render_page(&page, &table_options());
        assert!(html.contains("<th>Time</th><th>CPU</th><th>Load</th>"));
        let newest = html.find("<td>05-01 10:00:30</td><td>12.35%</td><td>1.50</td>").unwrap();
        let oldest = html.find("<td>05-01 10:00:00</td><td>10.00%</td><td>-</td>").unwrap();
        assert!(newest < oldest);
    }

    #[test]
    fn test_empty_history_table_shows_message() {
        let page = DashboardPage::new("1", &specs(), 800.0);
        let html = render_page(&page, &table_options());
        assert!(html.contains("<td class=\"empty\" colspan=\"3\">No historical data</td>"));
    }

    #[test]
    fn test_server_card_fills_gaps_with_dash() {
        let mut page = DashboardPage::new("1", &specs(), 800.0);
        page.view.server = Some(ServerInfo {
            name: Some("db <primary>".to_string()),
            ip: Some("10.0.0.5".to_string()),
            cpu_cores: Some(8),
            total_memory: Some(16.0),
            status: Some("online".to_string()),
            created_at: parse_timestamp("2024-04-30 09:15:00"),
            ..ServerInfo::default()
        });

        let html = render_page(&page, &PageOptions::default());
        assert!(html.contains("<h1>db &lt;primary&gt;</h1>"));
        assert!(html.contains("<span class=\"status-badge online\">Online</span>"));
        assert!(html.contains("IP:</span><span class=\"detail-value\">10.0.0.5</span>"));
        assert!(html.contains("CPU cores:</span><span class=\"detail-value\">8</span>"));
        assert!(html.contains("Total memory:</span><span class=\"detail-value\">16 GB</span>"));
        assert!(html.contains("Total disk:</span><span class=\"detail-value\">-</span>"));
        assert!(html.contains("Type:</span><span class=\"detail-value\">-</span>"));
        assert!(html.contains("Created:</span><span class=\"detail-value\">04-30 09:15:00</span>"));
    }

    #[test]
    fn test_offline_server_badge() {
        let mut page = DashboardPage::new("1", &specs(), 800.0);
        page.view.server = Some(ServerInfo::default());

        let html = render_page(&page, &PageOptions::default());
        assert!(html.contains("<h1>Server 1</h1>"));
        assert!(html.contains("<span class=\"status-badge offline\">Offline</span>"));
    }
}
