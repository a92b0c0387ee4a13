//! HTML pages around the SVG chart.
//!
//! Two surfaces: a standalone chart page for direct linking, and the
//! interactive viewer with a person dropdown and CSV upload control. The
//! viewer talks to the JSON/SVG endpoints served under `/api`.

use crate::render::svg::{html_escape, TimelineRenderer};
use crate::timeline::{PersonTimeline, TimelineSummary};

const PAGE_CSS: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #f4f6f8; color: #2c3e50; }
.container { max-width: 1220px; margin: 24px auto; padding: 0 16px; }
.card { background: #ffffff; border-radius: 8px; padding: 16px; box-shadow: 0 1px 3px rgba(0,0,0,0.12); }
.controls { display: flex; gap: 16px; align-items: center; margin-bottom: 16px; flex-wrap: wrap; }
.controls label { font-weight: 600; }
select { padding: 6px 10px; font-size: 14px; }
.legend { margin-top: 12px; font-size: 13px; }
.legend-item { margin-right: 18px; }
.legend-box { display: inline-block; width: 14px; height: 14px; margin-right: 6px; vertical-align: text-bottom; }
.legend-box.busy { background: #3498db; }
.legend-box.gap { background: #e74c3c; }
.summary { margin-top: 8px; font-size: 13px; color: #5d6d7e; }
.error { color: #c0392b; font-weight: 600; }
"#;

const VIEWER_JS: &str = r#"
const select = document.getElementById('person-select');
const chart = document.getElementById('chart');
const summary = document.getElementById('summary');
const status = document.getElementById('upload-status');

async function loadChart() {
    const id = select.value;
    if (!id) { chart.innerHTML = ''; summary.textContent = ''; return; }
    const encoded = encodeURIComponent(id);
    const [svgRes, jsonRes] = await Promise.all([
        fetch(`/api/timeline/${encoded}/svg`),
        fetch(`/api/timeline/${encoded}`),
    ]);
    if (!svgRes.ok) {
        const body = await svgRes.json().catch(() => ({ error: svgRes.statusText }));
        chart.innerHTML = `<p class="error">${body.error}</p>`;
        summary.textContent = '';
        return;
    }
    chart.innerHTML = await svgRes.text();
    if (jsonRes.ok) {
        const s = (await jsonRes.json()).summary;
        summary.textContent = `${s.busy_count} activities (${s.busy_minutes} min), `
            + `${s.gap_count} gaps (${s.gap_minutes} min), longest gap ${s.longest_gap_minutes} min`;
    } else {
        summary.textContent = '';
    }
}

async function refreshPeople(keep) {
    const res = await fetch('/api/people');
    const body = await res.json();
    select.innerHTML = '';
    for (const id of body.people) {
        const option = document.createElement('option');
        option.value = id;
        option.textContent = id;
        select.appendChild(option);
    }
    if (keep && body.people.includes(keep)) select.value = keep;
}

select.addEventListener('change', loadChart);

document.getElementById('upload-input').addEventListener('change', async (event) => {
    const file = event.target.files[0];
    if (!file) return;
    status.textContent = 'Uploading...';
    const text = await file.text();
    const res = await fetch('/api/upload', {
        method: 'POST',
        headers: { 'Content-Type': 'text/csv' },
        body: text,
    });
    if (!res.ok) {
        const body = await res.json().catch(() => ({ error: res.statusText }));
        status.textContent = body.error;
        return;
    }
    const body = await res.json();
    status.textContent = `Loaded ${body.record_count} records for ${body.person_count} people.`;
    await refreshPeople(select.value);
    loadChart();
});

loadChart();
"#;

/// The interactive viewer: dropdown, upload control, chart area.
pub fn viewer_page(people: &[String], selected: Option<&str>) -> String {
    let mut options = String::new();
    for person in people {
        let marker = if Some(person.as_str()) == selected {
            " selected"
        } else {
            ""
        };
        options.push_str(&format!(
            "                <option value=\"{id}\"{marker}>{id}</option>\n",
            id = html_escape(person),
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Daily Activity Timeline</title>
    <style>{css}</style>
</head>
<body>
    <div class="container">
        <div class="card">
            <h1>Daily Activity Timeline</h1>
            <div class="controls">
                <label for="person-select">Person</label>
                <select id="person-select">
{options}                </select>
                <label for="upload-input">Upload CSV</label>
                <input type="file" id="upload-input" accept=".csv,text/csv">
                <span id="upload-status"></span>
            </div>
            <div id="chart"></div>
            <div class="legend">
                <span class="legend-item"><span class="legend-box busy"></span>Recorded activity</span>
                <span class="legend-item"><span class="legend-box gap"></span>Unaccounted gap</span>
            </div>
            <p class="summary" id="summary"></p>
        </div>
    </div>
    <script>{js}</script>
</body>
</html>
"#,
        css = PAGE_CSS,
        options = options,
        js = VIEWER_JS,
    )
}

/// A standalone page for one rendered timeline, with its summary line.
pub fn chart_page(
    timeline: &PersonTimeline,
    summary: &TimelineSummary,
    renderer: &TimelineRenderer,
) -> String {
    let svg = renderer.render_svg(timeline);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{person} - Daily Timeline</title>
    <style>{css}</style>
</head>
<body>
    <div class="container">
        <div class="card">
{svg}
            <div class="legend">
                <span class="legend-item"><span class="legend-box busy"></span>Recorded activity</span>
                <span class="legend-item"><span class="legend-box gap"></span>Unaccounted gap</span>
            </div>
            <p class="summary">{busy_count} activities ({busy_minutes} min), {gap_count} gaps ({gap_minutes} min), longest gap {longest_gap} min</p>
        </div>
    </div>
</body>
</html>
"#,
        person = html_escape(&timeline.person_id),
        css = PAGE_CSS,
        svg = svg,
        busy_count = summary.busy_count,
        busy_minutes = summary.busy_minutes,
        gap_count = summary.gap_count,
        gap_minutes = summary.gap_minutes,
        longest_gap = summary.longest_gap_minutes,
    )
}
