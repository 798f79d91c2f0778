//! Card title with an optional unit.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartHeaderProps {
    pub title: String,
    /// Unit shown after the title (e.g. "°C")
    #[props(default = String::new())]
    pub unit: String,
}

#[component]
pub fn ChartHeader(props: ChartHeaderProps) -> Element {
    rsx! {
        div {
            style: "display: flex; align-items: baseline; gap: 6px; margin-bottom: 8px;",
            h3 {
                style: "margin: 0; font-size: 16px;",
                "{props.title}"
            }
            if !props.unit.is_empty() {
                span {
                    style: "font-size: 12px; color: #666;",
                    "({props.unit})"
                }
            }
        }
    }
}
