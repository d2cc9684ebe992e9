//! The dashboard page.
//!
//! A single static document: the script reads `/api/layout` to build the
//! controls, then re-fetches a plotly figure whenever a control changes.

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{{TITLE}}</title>
  <script src="https://cdn.plot.ly/plotly-2.35.2.min.js"></script>
  <style>
    body { font-family: sans-serif; margin: 2em; }
    h1 { text-align: center; color: #503D36; font-size: 40px; }
    .slider-row { display: flex; gap: 1em; align-items: center; }
    .slider-row input { flex: 1; }
  </style>
</head>
<body>
  <h1>{{TITLE}}</h1>
  <br>
  <div>
    <select id="site-dropdown" aria-label="Select a Launch Site here"></select>
  </div>
  <br>
  <div id="success-pie-chart"></div>
  <br>
  <p>Payload range (Kg): <span id="payload-label"></span></p>
  <div class="slider-row">
    <input id="payload-low" type="range" list="payload-marks">
    <input id="payload-high" type="range" list="payload-marks">
  </div>
  <datalist id="payload-marks"></datalist>
  <br>
  <div id="success-payload-scatter-chart"></div>
  <script>
    const state = { site: "ALL", low: 0, high: 0 };

    async function getJson(url) {
      const response = await fetch(url);
      if (!response.ok) {
        throw new Error(url + " returned " + response.status);
      }
      return response.json();
    }

    async function refreshPie() {
      const params = new URLSearchParams({ site: state.site });
      const figure = await getJson("/api/figures/pie?" + params);
      Plotly.react("success-pie-chart", figure.data, figure.layout);
    }

    async function refreshScatter() {
      const params = new URLSearchParams({ site: state.site, low: state.low, high: state.high });
      const figure = await getJson("/api/figures/scatter?" + params);
      Plotly.react("success-payload-scatter-chart", figure.data, figure.layout);
      document.getElementById("payload-label").textContent = state.low + " - " + state.high;
    }

    async function init() {
      const layout = await getJson("/api/layout");

      const dropdown = document.getElementById("site-dropdown");
      for (const option of layout.site_options) {
        const element = document.createElement("option");
        element.value = option.value;
        element.textContent = option.label;
        dropdown.appendChild(element);
      }
      dropdown.value = layout.default_site;
      state.site = layout.default_site;

      const marks = document.getElementById("payload-marks");
      for (const mark of layout.slider.marks) {
        const element = document.createElement("option");
        element.value = mark.value;
        element.label = mark.label;
        marks.appendChild(element);
      }

      const low = document.getElementById("payload-low");
      const high = document.getElementById("payload-high");
      for (const input of [low, high]) {
        input.min = layout.slider.min;
        input.max = layout.slider.max;
        input.step = layout.slider.step;
      }
      state.low = layout.slider.value.low;
      state.high = layout.slider.value.high;
      low.value = state.low;
      high.value = state.high;

      dropdown.addEventListener("change", () => {
        state.site = dropdown.value;
        refreshPie();
        refreshScatter();
      });
      // The two handles never cross
      low.addEventListener("input", () => {
        low.value = Math.min(Number(low.value), Number(high.value));
        state.low = Number(low.value);
        refreshScatter();
      });
      high.addEventListener("input", () => {
        high.value = Math.max(Number(high.value), Number(low.value));
        state.high = Number(high.value);
        refreshScatter();
      });

      await Promise.all([refreshPie(), refreshScatter()]);
    }

    init().catch((err) => console.error(err));
  </script>
</body>
</html>
"#;

/// Render the page with the given heading.
#[must_use]
pub fn render(title: &str) -> String {
    PAGE_TEMPLATE.replace("{{TITLE}}", &escape_html(title))
}

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
