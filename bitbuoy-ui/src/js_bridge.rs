//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The D3.js line chart and the Leaflet map live in `assets/js/*.js`. They are
//! evaluated as globals (no ES modules) and exposed via `window.*`.
//! This module provides Rust wrappers that serialize data and call those globals.

use bitbuoy_core::chart::{ChartConfig, ChartPoint};
use bitbuoy_core::map::MapView;
use log::warn;

// Embed the JS sources at compile time
static LINE_CHART_JS: &str = include_str!("../assets/js/line-chart.js");
static BUOY_MAP_JS: &str = include_str!("../assets/js/buoy-map.js");

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('BitBuoy JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Initialize chart and map scripts once D3 and Leaflet are loaded.
///
/// The scripts define functions like `renderBuoyChart(...)` via `function`
/// declarations. They are evaluated at global scope via an indirect `eval()`
/// once both libraries are ready, then each function is promoted to `window.*`.
pub fn init_scripts() {
    let all_js = [LINE_CHART_JS, BUOY_MAP_JS].join("\n");

    let store_js = match serde_json::to_string(&all_js) {
        Ok(encoded) => format!("window.__bitbuoyScripts = {};", encoded),
        Err(e) => {
            warn!("Failed to encode chart scripts: {}", e);
            return;
        }
    };
    let _ = js_sys::eval(&store_js);

    let init_js = r#"
        (function() {
            var waitForLibs = setInterval(function() {
                if (typeof d3 !== 'undefined' && typeof L !== 'undefined') {
                    clearInterval(waitForLibs);
                    (0, eval)(window.__bitbuoyScripts);
                    delete window.__bitbuoyScripts;
                    if (typeof renderBuoyChart !== 'undefined') window.renderBuoyChart = renderBuoyChart;
                    if (typeof renderBuoyMap !== 'undefined') window.renderBuoyMap = renderBuoyMap;
                    window.__bitbuoyReady = true;
                    console.log('BitBuoy charts initialized');
                }
            }, 100);
        })();
    "#;
    let _ = js_sys::eval(init_js);
}

/// Poll until the scripts are ready and the container exists, then call
/// `window.{function}(container_id, ...args)`.
///
/// Only the latest call per container runs: a newer call retires any poll
/// still waiting for the same container, so a slow script load can never
/// draw superseded data over a newer render.
///
/// The arguments are embedded as JSON string literals, so no manual escaping
/// is needed.
fn call_when_ready(function: &str, container_id: &str, args: &[String]) {
    call_js(&ready_call_script(function, container_id, args));
}

fn ready_call_script(function: &str, container_id: &str, args: &[String]) -> String {
    let encoded: Vec<String> = args
        .iter()
        .map(|a| serde_json::to_string(a).unwrap_or_else(|_| "\"\"".to_string()))
        .collect();
    let id = serde_json::to_string(container_id).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        r#"
        (function() {{
            var pending = window.__bitbuoyPending = window.__bitbuoyPending || {{}};
            var ticket = (pending[{id}] || 0) + 1;
            pending[{id}] = ticket;
            var poll = setInterval(function() {{
                if (pending[{id}] !== ticket) {{
                    clearInterval(poll);
                    return;
                }}
                if (window.__bitbuoyReady &&
                    typeof window.{function} !== 'undefined' &&
                    document.getElementById({id})) {{
                    clearInterval(poll);
                    try {{
                        window.{function}({id}, {args});
                    }} catch(e) {{ console.error('[BitBuoy] {function} error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
        function = function,
        id = id,
        args = encoded.join(", "),
    )
}

/// Render one measurement chart (one line per buoy). An empty `points`
/// clears the container.
pub fn render_line_chart(container_id: &str, points: &[ChartPoint], config: &ChartConfig) {
    let (data_json, config_json) = match (serde_json::to_string(points), serde_json::to_string(config)) {
        (Ok(data), Ok(config)) => (data, config),
        _ => {
            warn!("Failed to serialize chart data for {}", container_id);
            return;
        }
    };
    call_when_ready("renderBuoyChart", container_id, &[data_json, config_json]);
}

/// Render (or refresh) the buoy map.
pub fn render_map(container_id: &str, view: &MapView) {
    match serde_json::to_string(view) {
        Ok(view_json) => call_when_ready("renderBuoyMap", container_id, &[view_json]),
        Err(e) => warn!("Failed to serialize map view: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_call_retires_older_polls() {
        let script = ready_call_script("renderBuoyChart", "chart-temperature", &["[]".to_string()]);
        // Each call takes a fresh ticket and stops polling once a newer one exists.
        assert!(script.contains(r#"pending["chart-temperature"] = ticket;"#));
        assert!(script.contains(r#"if (pending["chart-temperature"] !== ticket)"#));
        // The check runs before the draw.
        let retire = script.find("!== ticket").unwrap();
        let draw = script.find("window.renderBuoyChart(").unwrap();
        assert!(retire < draw);
    }

    #[test]
    fn test_ready_call_embeds_args_as_string_literals() {
        let script = ready_call_script("renderBuoyMap", "buoy-map", &[r#"{"a":"</script>"}"#.to_string()]);
        assert!(script.contains(r#"window.renderBuoyMap("buoy-map", "{\"a\":\"</script>\"}")"#));
    }
}
