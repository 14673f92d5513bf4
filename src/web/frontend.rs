//! Embedded HTML/CSS/JS frontend for the BioSpace Explorer page.
//!
//! The whole page is compiled into the binary as a string constant. All
//! state lives server-side in the session; the page only holds the two
//! input values and asks `/api/view` for a fresh frame on every change.

/// The complete single-page explorer HTML.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>BioSpace Explorer</title>
<style>
:root {
  --bg: #0d1117;
  --surface: #161b22;
  --border: #30363d;
  --text: #e6edf3;
  --text-muted: #8b949e;
  --accent: #58a6ff;
  --yellow: #d29922;
  --radius: 8px;
  --font: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body {
  background: var(--bg);
  color: var(--text);
  font-family: var(--font);
  font-size: 14px;
  line-height: 1.5;
}

.banner {
  background: var(--yellow);
  color: #0d1117;
  font-weight: 600;
  padding: 6px 0;
  overflow: hidden;
  white-space: nowrap;
}
.banner span {
  display: inline-block;
  padding-left: 100%;
  animation: scroll 20s linear infinite;
}
@keyframes scroll {
  from { transform: translateX(0); }
  to { transform: translateX(-100%); }
}

.app {
  max-width: 1200px;
  margin: 0 auto;
  padding: 24px;
}

header {
  margin-bottom: 24px;
  padding-bottom: 16px;
  border-bottom: 1px solid var(--border);
}
header h1 { font-size: 26px; font-weight: 600; }
header .subtitle { color: var(--text-muted); font-size: 13px; }

/* Controls */
.controls {
  display: flex;
  gap: 12px;
  margin-bottom: 24px;
}
.controls input, .controls select {
  padding: 8px 12px;
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: 6px;
  color: var(--text);
  font-size: 14px;
}
.controls input { flex: 1; }
.controls input:focus, .controls select:focus { outline: none; border-color: var(--accent); }

/* Status */
.status {
  text-align: center;
  color: var(--text-muted);
  padding: 48px 0;
}

/* Cards */
.cards {
  display: grid;
  grid-template-columns: repeat(auto-fill, minmax(280px, 1fr));
  gap: 16px;
  margin-bottom: 32px;
}
.card {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 16px;
  display: flex;
  flex-direction: column;
  gap: 6px;
}
.card h3 { font-size: 15px; font-weight: 600; }
.card p { color: var(--text-muted); font-size: 13px; }
.card p strong { color: var(--text); font-weight: 500; }
.card a { color: var(--accent); text-decoration: none; margin-top: auto; }
.card a:hover { text-decoration: underline; }

/* Chart */
.chart-panel {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 16px;
}
.chart-panel h2 { font-size: 16px; font-weight: 600; margin-bottom: 12px; }
.chart-wrap { position: relative; width: 100%; height: 300px; }
.chart-wrap svg { width: 100%; height: 100%; display: block; }
.chart-wrap text { fill: var(--text-muted); font-size: 11px; }
.chart-wrap .grid { stroke: var(--border); stroke-dasharray: 3 3; }
.chart-wrap .axis { stroke: var(--text-muted); }
.chart-wrap rect:hover { opacity: 0.8; }
.chart-tooltip {
  position: absolute;
  pointer-events: none;
  background: var(--bg);
  border: 1px solid var(--border);
  border-radius: 4px;
  padding: 4px 8px;
  font-size: 12px;
  white-space: nowrap;
  display: none;
}
</style>
</head>
<body>
<div class="banner"><span>⚠️ This project is a prototype (for demonstration purposes only) — data summaries may not be fully accurate. ⚠️</span></div>

<div class="app">
  <header>
    <h1>🧬 BioSpace Explorer</h1>
    <div class="subtitle" id="subtitle">Exploring 0 NASA Bioscience Publications 🚀</div>
  </header>

  <div class="controls">
    <input id="search" type="text" placeholder="🔍 Search by Title or Organism..." autocomplete="off">
    <select id="category">
      <option value="All">All Categories</option>
    </select>
  </div>

  <div id="status" class="status"></div>
  <div id="cards" class="cards"></div>

  <div id="chart-panel" class="chart-panel" style="display:none">
    <h2>Publication Categories Overview</h2>
    <div class="chart-wrap" id="chart-wrap">
      <svg id="chart"></svg>
      <div class="chart-tooltip" id="tooltip"></div>
    </div>
  </div>
</div>

<script>
// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------
let lastView = null;
let requestSeq = 0;
let pollTimer = null;

const searchEl = document.getElementById('search');
const categoryEl = document.getElementById('category');

// ---------------------------------------------------------------------------
// Fetch a frame for the current inputs
// ---------------------------------------------------------------------------
async function refresh() {
  const seq = ++requestSeq;
  const params = new URLSearchParams({
    search: searchEl.value,
    category: categoryEl.value,
  });
  let view;
  try {
    const res = await fetch('/api/view?' + params.toString());
    view = await res.json();
  } catch (e) {
    console.error('Error fetching view:', e);
    // Keep polling until a frame shows the fetch has settled.
    if (seq === requestSeq && (!lastView || lastView.loading)) schedulePoll();
    return;
  }
  // A newer keystroke already asked for a fresher frame.
  if (seq !== requestSeq) return;
  lastView = view;
  render(view);

  if (view.loading) schedulePoll();
  else clearTimeout(pollTimer);
}

function schedulePoll() {
  clearTimeout(pollTimer);
  pollTimer = setTimeout(refresh, 500);
}

searchEl.addEventListener('input', refresh);
categoryEl.addEventListener('change', refresh);
window.addEventListener('resize', () => { if (lastView) renderChart(lastView); });

// ---------------------------------------------------------------------------
// Render
// ---------------------------------------------------------------------------
function render(view) {
  document.getElementById('subtitle').textContent =
    `Exploring ${view.total.toLocaleString()} NASA Bioscience Publications 🚀`;

  renderOptions(view.options, view.category);

  const status = document.getElementById('status');
  const cards = document.getElementById('cards');
  if (view.body === 'cards') {
    status.style.display = 'none';
    cards.innerHTML = view.cards.map(renderCard).join('');
  } else {
    status.style.display = 'block';
    status.textContent = view.message;
    cards.innerHTML = '';
  }

  renderChart(view);
}

function renderOptions(options, selected) {
  const current = Array.from(categoryEl.options).map(o => o.value);
  const same = current.length === options.length && current.every((v, i) => v === options[i]);
  if (!same) {
    categoryEl.innerHTML = options.map(o =>
      `<option value="${esc(o)}">${o === 'All' ? 'All Categories' : esc(o)}</option>`
    ).join('');
  }
  if (options.includes(selected)) categoryEl.value = selected;
}

function renderCard(c) {
  return `<div class="card" data-id="${esc(c.id)}">
    <h3>${esc(c.title)}</h3>
    <p><strong>Organism:</strong> ${esc(c.organism)}</p>
    <p><strong>Category:</strong> ${esc(c.category)}</p>
    <p><strong>Impact:</strong> ${esc(c.impact)}</p>
    <a href="${esc(c.url)}" target="_blank" rel="noopener noreferrer">🔗 Read Full Publication</a>
  </div>`;
}

// ---------------------------------------------------------------------------
// Chart
// ---------------------------------------------------------------------------
function renderChart(view) {
  const panel = document.getElementById('chart-panel');
  const svg = document.getElementById('chart');
  if (!view.chart) {
    panel.style.display = 'none';
    svg.innerHTML = '';
    return;
  }
  panel.style.display = 'block';

  const data = view.chart;
  const wrap = document.getElementById('chart-wrap');
  const width = wrap.clientWidth;
  const height = wrap.clientHeight;
  const m = { top: 10, right: 16, bottom: 48, left: 48 };
  const w = Math.max(width - m.left - m.right, 1);
  const h = Math.max(height - m.top - m.bottom, 1);

  const max = Math.max(...data.map(d => d.count), 1);
  const step = niceStep(max);
  const top = Math.ceil(max / step) * step;
  const band = w / data.length;
  const barW = Math.max(band * 0.7, 1);

  let out = '';
  for (let v = 0; v <= top; v += step) {
    const y = m.top + h - (v / top) * h;
    out += `<line class="grid" x1="${m.left}" x2="${m.left + w}" y1="${y}" y2="${y}"/>`;
    out += `<text x="${m.left - 6}" y="${y + 4}" text-anchor="end">${v}</text>`;
  }
  data.forEach((d, i) => {
    const bh = (d.count / top) * h;
    const x = m.left + i * band + (band - barW) / 2;
    const y = m.top + h - bh;
    out += `<rect x="${x}" y="${y}" width="${barW}" height="${bh}" fill="${esc(view.bar_color)}"`
      + ` data-label="${esc(d.category)}" data-count="${d.count}"/>`;
    out += `<text x="${x + barW / 2}" y="${m.top + h + 16}" text-anchor="middle">${esc(truncate(d.category, band))}</text>`;
  });
  out += `<line class="axis" x1="${m.left}" x2="${m.left + w}" y1="${m.top + h}" y2="${m.top + h}"/>`;
  out += `<line class="axis" x1="${m.left}" x2="${m.left}" y1="${m.top}" y2="${m.top + h}"/>`;
  out += `<text x="${m.left + w / 2}" y="${height - 6}" text-anchor="middle">Category</text>`;
  out += `<text transform="translate(12 ${m.top + h / 2}) rotate(-90)" text-anchor="middle">Count</text>`;

  svg.setAttribute('viewBox', `0 0 ${width} ${height}`);
  svg.innerHTML = out;
  svg.querySelectorAll('rect').forEach(r => {
    r.addEventListener('mousemove', showTooltip);
    r.addEventListener('mouseleave', hideTooltip);
  });
}

function niceStep(max) {
  const raw = max / 5;
  if (raw <= 1) return 1;
  const mag = Math.pow(10, Math.floor(Math.log10(raw)));
  for (const f of [1, 2, 5, 10]) {
    if (raw <= f * mag) return f * mag;
  }
  return 10 * mag;
}

function truncate(label, band) {
  const max = Math.max(Math.floor(band / 7), 3);
  return label.length > max ? label.slice(0, max - 1) + '…' : label;
}

function showTooltip(e) {
  const tip = document.getElementById('tooltip');
  const box = document.getElementById('chart-wrap').getBoundingClientRect();
  tip.textContent = `${e.target.dataset.label}: ${e.target.dataset.count}`;
  tip.style.left = (e.clientX - box.left + 12) + 'px';
  tip.style.top = (e.clientY - box.top - 12) + 'px';
  tip.style.display = 'block';
}

function hideTooltip() {
  document.getElementById('tooltip').style.display = 'none';
}

// ---------------------------------------------------------------------------
// Utility
// ---------------------------------------------------------------------------
function esc(s) {
  if (!s) return '';
  return String(s).replace(/&/g,'&amp;').replace(/</g,'&lt;').replace(/>/g,'&gt;').replace(/"/g,'&quot;');
}

// ---------------------------------------------------------------------------
// Init
// ---------------------------------------------------------------------------
refresh();
</script>
</body>
</html>"##;
