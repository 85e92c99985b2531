//! HTML pages and flash redirects.

use serde_json::Value;

use threatlens_core::{LookupData, ScanKind, ScanReport};

/// Shared page stylesheet.
const STYLE: &str = r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 0;
            background: #10151f;
            color: #e6e9ef;
        }
        .container {
            max-width: 760px;
            margin: 0 auto;
            padding: 2rem;
        }
        h1 {
            margin: 0 0 0.5rem 0;
            font-size: 2rem;
        }
        .hint {
            opacity: 0.7;
            margin-bottom: 1.5rem;
        }
        form {
            display: flex;
            gap: 0.5rem;
        }
        input[type=text] {
            flex: 1;
            padding: 0.75rem;
            border-radius: 6px;
            border: 1px solid #3a4252;
            background: #1a2130;
            color: inherit;
            font-family: monospace;
        }
        button, .button {
            padding: 0.75rem 1.25rem;
            border-radius: 6px;
            border: none;
            background: #3d7bfd;
            color: white;
            text-decoration: none;
            cursor: pointer;
        }
        .flash {
            padding: 0.75rem 1rem;
            border-radius: 6px;
            margin-bottom: 1rem;
        }
        .flash-error { background: #5c1f24; }
        .flash-warning { background: #5c4a1f; }
        .flash-info { background: #1f3d5c; }
        .verdict {
            display: inline-block;
            padding: 0.35rem 0.75rem;
            border-radius: 999px;
            font-weight: 600;
        }
        .verdict-success { background: #1f5c34; }
        .verdict-warning { background: #5c4a1f; }
        .verdict-danger { background: #5c1f24; }
        .verdict-secondary { background: #3a4252; }
        table {
            width: 100%;
            border-collapse: collapse;
            margin: 1rem 0;
        }
        th, td {
            text-align: left;
            padding: 0.5rem;
            border-bottom: 1px solid #2a3140;
        }
        pre {
            background: #1a2130;
            padding: 1rem;
            border-radius: 6px;
            overflow-x: auto;
        }
"#;

/// Index page template.
const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>ThreatLens</title>
    <style>{{STYLE}}</style>
</head>
<body>
    <div class="container">
        <h1>ThreatLens</h1>
        <p class="hint">Check an IPv4 address on AbuseIPDB or a file hash (MD5, SHA-1, SHA-256) on VirusTotal.</p>
        {{FLASH}}
        <form method="post" action="/scan">
            <input type="text" name="scan_input" placeholder="8.8.8.8 or d41d8cd98f00b204e9800998ecf8427e" autofocus>
            <button type="submit">Scan</button>
        </form>
    </div>
</body>
</html>"#;

/// Results page template.
const RESULTS_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>ThreatLens - {{SCAN_INPUT}}</title>
    <style>{{STYLE}}</style>
</head>
<body>
    <div class="container">
        <h1>{{SCAN_TYPE}} Results</h1>
        <p class="hint"><code>{{SCAN_INPUT}}</code> &middot; scanned {{SCANNED_AT}}</p>
        <p>Threat Level: <span class="verdict verdict-{{VERDICT_CLASS}}">{{VERDICT}}</span></p>
        {{SUMMARY}}
        <h2>Raw Response</h2>
        <pre>{{PAYLOAD}}</pre>
        <a class="button" href="/">New Scan</a>
    </div>
</body>
</html>"#;

/// Flash message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Error,
    Warning,
    Info,
}

impl FlashLevel {
    /// Parses a query value. Unknown values fall back to `Info`.
    pub fn parse(s: &str) -> Self {
        match s {
            "error" => FlashLevel::Error,
            "warning" => FlashLevel::Warning,
            _ => FlashLevel::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Error => "error",
            FlashLevel::Warning => "warning",
            FlashLevel::Info => "info",
        }
    }
}

/// Threat level shown on the results page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Clean,
    LowRisk,
    MediumRisk,
    HighRisk,
    Unknown,
}

impl Verdict {
    /// Derives the verdict from a scan's provider payload.
    pub fn of(report: &ScanReport) -> Self {
        match (&report.data, report.kind) {
            (LookupData::NotFound, _) => Verdict::Unknown,
            (LookupData::Found(data), ScanKind::Ip) => data
                .get("abuseConfidenceScore")
                .and_then(Value::as_u64)
                .map(Self::from_abuse_score)
                .unwrap_or(Verdict::Unknown),
            (LookupData::Found(data), ScanKind::Hash) => data
                .get("attributes")
                .and_then(|a| a.get("last_analysis_stats"))
                .map(Self::from_analysis_stats)
                .unwrap_or(Verdict::Unknown),
        }
    }

    fn from_abuse_score(score: u64) -> Self {
        match score {
            0 => Verdict::Clean,
            1..=24 => Verdict::LowRisk,
            25..=74 => Verdict::MediumRisk,
            _ => Verdict::HighRisk,
        }
    }

    fn from_analysis_stats(stats: &Value) -> Self {
        let malicious = stats.get("malicious").and_then(Value::as_u64);
        let suspicious = stats.get("suspicious").and_then(Value::as_u64);

        match (malicious, suspicious.unwrap_or(0)) {
            (None, _) => Verdict::Unknown,
            (Some(0), 0) => Verdict::Clean,
            (Some(0), _) => Verdict::LowRisk,
            (Some(1..=4), _) => Verdict::MediumRisk,
            (Some(_), _) => Verdict::HighRisk,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Clean => "Clean",
            Verdict::LowRisk => "Low Risk",
            Verdict::MediumRisk => "Medium Risk",
            Verdict::HighRisk => "High Risk",
            Verdict::Unknown => "Unknown",
        }
    }

    fn css_class(&self) -> &'static str {
        match self {
            Verdict::Clean => "success",
            Verdict::LowRisk | Verdict::MediumRisk => "warning",
            Verdict::HighRisk => "danger",
            Verdict::Unknown => "secondary",
        }
    }
}

/// Renders the index page with an optional flash message.
pub fn render_index(flash: Option<(FlashLevel, &str)>) -> String {
    let flash_html = match flash {
        Some((level, message)) => format!(
            r#"<div class="flash flash-{}">{}</div>"#,
            level.as_str(),
            escape_html(message)
        ),
        None => String::new(),
    };

    fill_template(INDEX_HTML, &[("STYLE", STYLE), ("FLASH", &flash_html)])
}

/// Renders the results page for a successful scan.
pub fn render_results(report: &ScanReport) -> String {
    let payload = serde_json::to_string_pretty(&report.data.to_payload()).unwrap_or_default();

    let summary = match (&report.data, report.kind) {
        (LookupData::NotFound, _) => {
            r#"<div class="flash flash-info">No analysis record exists for this hash.</div>"#
                .to_string()
        }
        (LookupData::Found(data), ScanKind::Ip) => summary_table(&ip_summary(data)),
        (LookupData::Found(data), ScanKind::Hash) => summary_table(&hash_summary(data)),
    };

    let scan_type = match (report.kind, report.algorithm) {
        (ScanKind::Hash, Some(algo)) => format!("{} ({})", report.kind.name(), algo.name()),
        _ => report.kind.name().to_string(),
    };

    let verdict = Verdict::of(report);
    let scanned_at = report.scanned_at.format("%Y-%m-%d %H:%M:%S UTC").to_string();

    fill_template(
        RESULTS_HTML,
        &[
            ("STYLE", STYLE),
            ("SCAN_TYPE", &escape_html(&scan_type)),
            ("SCAN_INPUT", &escape_html(&report.input)),
            ("SCANNED_AT", &scanned_at),
            ("VERDICT", verdict.label()),
            ("VERDICT_CLASS", verdict.css_class()),
            ("SUMMARY", &summary),
            ("PAYLOAD", &escape_html(&payload)),
        ],
    )
}

/// Substitutes `{{NAME}}` placeholders in one pass over `template`.
///
/// Inserted values are never rescanned. Unknown placeholders are kept as is.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let Some(end) = after.find("}}") else {
            rest = &rest[start..];
            break;
        };

        let name = &after[..end];
        match values.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + end + 4]),
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}

/// Picks the headline fields of an AbuseIPDB `data` object.
fn ip_summary(data: &Value) -> Vec<(&'static str, String)> {
    [
        ("Abuse Confidence Score", "abuseConfidenceScore"),
        ("Total Reports", "totalReports"),
        ("Country", "countryCode"),
        ("ISP", "isp"),
        ("Domain", "domain"),
        ("Usage Type", "usageType"),
        ("Last Reported", "lastReportedAt"),
    ]
    .into_iter()
    .filter_map(|(label, key)| display_value(data.get(key)?).map(|v| (label, v)))
    .collect()
}

/// Picks the headline fields of a VirusTotal file `data` object.
fn hash_summary(data: &Value) -> Vec<(&'static str, String)> {
    let attributes = match data.get("attributes") {
        Some(attributes) => attributes,
        None => return Vec::new(),
    };

    let mut rows = Vec::new();
    if let Some(stats) = attributes.get("last_analysis_stats") {
        for (label, key) in [
            ("Malicious", "malicious"),
            ("Suspicious", "suspicious"),
            ("Harmless", "harmless"),
            ("Undetected", "undetected"),
        ] {
            if let Some(v) = stats.get(key).and_then(display_value) {
                rows.push((label, v));
            }
        }
    }
    for (label, key) in [
        ("Name", "meaningful_name"),
        ("Type", "type_description"),
        ("Size (bytes)", "size"),
    ] {
        if let Some(v) = attributes.get(key).and_then(display_value) {
            rows.push((label, v));
        }
    }
    rows
}

fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn summary_table(rows: &[(&'static str, String)]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let mut html = String::from("<table>");
    for (label, value) in rows {
        html.push_str(&format!(
            "<tr><th>{}</th><td>{}</td></tr>",
            label,
            escape_html(value)
        ));
    }
    html.push_str("</table>");
    html
}

/// Escapes text for HTML element and attribute content.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

/// Percent-encodes a query component. Only unreserved characters pass through.
pub fn encode_query_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// Location of the index page carrying a flash message.
pub fn flash_location(level: FlashLevel, message: &str) -> String {
    format!(
        "/?flash={}&level={}",
        encode_query_component(message),
        level.as_str()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use threatlens_core::HashAlgorithm;

    fn report(kind: ScanKind, data: LookupData) -> ScanReport {
        ScanReport {
            input: "8.8.8.8".to_string(),
            kind,
            algorithm: None,
            data,
            scanned_at: Utc::now(),
        }
    }

    #[test]
    fn escape_html_special_characters() {
        assert_eq!(
            escape_html(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn encode_query_component_basic() {
        assert_eq!(encode_query_component("Page not found."), "Page%20not%20found.");
        assert_eq!(encode_query_component("a&b=c"), "a%26b%3Dc");
        assert_eq!(encode_query_component("é"), "%C3%A9");
    }

    #[test]
    fn flash_location_format() {
        assert_eq!(
            flash_location(FlashLevel::Warning, "Try again"),
            "/?flash=Try%20again&level=warning"
        );
    }

    #[test]
    fn flash_level_parse() {
        assert_eq!(FlashLevel::parse("error"), FlashLevel::Error);
        assert_eq!(FlashLevel::parse("warning"), FlashLevel::Warning);
        assert_eq!(FlashLevel::parse("bogus"), FlashLevel::Info);
    }

    #[test]
    fn index_renders_escaped_flash() {
        let html = render_index(Some((FlashLevel::Error, "<b>bad</b>")));
        assert!(html.contains(r#"class="flash flash-error""#));
        assert!(html.contains("&lt;b&gt;bad&lt;/b&gt;"));
        assert!(!html.contains("<b>bad</b>"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn index_without_flash() {
        let html = render_index(None);
        assert!(!html.contains(r#"<div class="flash"#));
        assert!(html.contains(r#"name="scan_input""#));
    }

    #[test]
    fn ip_results_show_summary() {
        let data = json!({
            "ipAddress": "8.8.8.8",
            "abuseConfidenceScore": 0,
            "countryCode": "US",
            "isp": "Google LLC",
            "domain": null
        });
        let html = render_results(&report(ScanKind::Ip, LookupData::Found(data)));

        assert!(html.contains("IP Address Results"));
        assert!(html.contains("<th>Abuse Confidence Score</th><td>0</td>"));
        assert!(html.contains("<th>ISP</th><td>Google LLC</td>"));
        assert!(!html.contains("<th>Domain</th>"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn hash_results_show_stats() {
        let data = json!({
            "attributes": {
                "last_analysis_stats": {"malicious": 5, "suspicious": 0, "harmless": 0, "undetected": 60},
                "meaningful_name": "evil.exe"
            }
        });
        let mut report = report(ScanKind::Hash, LookupData::Found(data));
        report.algorithm = Some(HashAlgorithm::Md5);
        let html = render_results(&report);

        assert!(html.contains("File Hash (MD5) Results"));
        assert!(html.contains("<th>Malicious</th><td>5</td>"));
        assert!(html.contains(r#"<span class="verdict verdict-danger">High Risk</span>"#));
        assert!(html.contains("<th>Name</th><td>evil.exe</td>"));
    }

    #[test]
    fn not_found_results_explain_missing_record() {
        let html = render_results(&report(ScanKind::Hash, LookupData::NotFound));
        assert!(html.contains("No analysis record exists"));
        assert!(html.contains("Not Found"));
        assert!(html.contains(r#"<span class="verdict verdict-secondary">Unknown</span>"#));
    }

    #[test]
    fn provider_text_with_placeholders_is_literal() {
        let data = json!({
            "attributes": {
                "last_analysis_stats": {"malicious": 0},
                "meaningful_name": "{{PAYLOAD}}",
                "type_description": "{{STYLE}}"
            }
        });
        let html = render_results(&report(ScanKind::Hash, LookupData::Found(data)));

        assert!(html.contains("<th>Name</th><td>{{PAYLOAD}}</td>"));
        assert!(html.contains("<th>Type</th><td>{{STYLE}}</td>"));
        assert_eq!(html.matches("<style>").count(), 1);
    }

    #[test]
    fn fill_template_is_single_pass() {
        let filled = fill_template("{{A}}-{{B}}-{{C}}", &[("A", "{{B}}"), ("B", "b")]);
        assert_eq!(filled, "{{B}}-b-{{C}}");
        assert_eq!(fill_template("open {{A", &[("A", "x")]), "open {{A");
    }

    #[test]
    fn ip_verdict_from_abuse_score() {
        let verdict = |score: u64| {
            Verdict::of(&report(
                ScanKind::Ip,
                LookupData::Found(json!({"abuseConfidenceScore": score})),
            ))
        };
        assert_eq!(verdict(0), Verdict::Clean);
        assert_eq!(verdict(10), Verdict::LowRisk);
        assert_eq!(verdict(50), Verdict::MediumRisk);
        assert_eq!(verdict(100), Verdict::HighRisk);
        assert_eq!(
            Verdict::of(&report(ScanKind::Ip, LookupData::Found(json!({})))),
            Verdict::Unknown
        );
    }

    #[test]
    fn hash_verdict_from_analysis_stats() {
        let verdict = |stats: serde_json::Value| {
            Verdict::of(&report(
                ScanKind::Hash,
                LookupData::Found(json!({"attributes": {"last_analysis_stats": stats}})),
            ))
        };
        assert_eq!(verdict(json!({"malicious": 0, "suspicious": 0})), Verdict::Clean);
        assert_eq!(verdict(json!({"malicious": 0, "suspicious": 2})), Verdict::LowRisk);
        assert_eq!(verdict(json!({"malicious": 3})), Verdict::MediumRisk);
        assert_eq!(verdict(json!({"malicious": 40})), Verdict::HighRisk);
        assert_eq!(verdict(json!({"undetected": 70})), Verdict::Unknown);
    }
}
