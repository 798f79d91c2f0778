//! Chart container component with loading and empty states.

use dioxus::prelude::*;

/// Props for ChartContainer
#[derive(Props, Clone, PartialEq)]
pub struct ChartContainerProps {
    /// The DOM id for the chart container (D3/Leaflet render into this)
    pub id: String,
    /// Whether the data behind the chart is still loading
    #[props(default = false)]
    pub loading: bool,
    /// Shown over the container when there is nothing to draw
    #[props(default = None)]
    pub empty_message: Option<String>,
    #[props(default = 200)]
    pub min_height: u32,
}

/// A container div for charts and maps with a loading/empty overlay.
#[component]
pub fn ChartContainer(props: ChartContainerProps) -> Element {
    let style = format!(
        "height: {}px; position: relative; width: 100%;",
        props.min_height
    );
    let overlay = if props.loading {
        Some("Loading...".to_string())
    } else {
        props.empty_message.clone()
    };

    rsx! {
        div {
            style: "{style}",
            if let Some(text) = overlay {
                div {
                    style: "position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%); color: #666; font-size: 13px;",
                    "{text}"
                }
            }
            div {
                id: "{props.id}",
                style: "width: 100%; height: 100%;",
            }
        }
    }
}
