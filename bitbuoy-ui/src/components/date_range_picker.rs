//! Date range picker with independent from/to inputs.

use crate::state::AppState;
use bitbuoy_core::date_range::DateRange;
use bitbuoy_core::format::{input_date, parse_input_date};
use dioxus::prelude::*;

/// Date range picker for filtering the charts. Clearing an input removes
/// that bound.
#[component]
pub fn DateRangePicker() -> Element {
    let mut state = use_context::<AppState>();
    let range = state.store.read().date_range();
    let from = input_date(range.from.as_ref());
    let to = input_date(range.to.as_ref());
    let label = range.label();

    let on_from_change = move |evt: Event<FormData>| {
        let mut store = state.store.write();
        let current = store.date_range();
        store.set_date_range(DateRange::new(parse_input_date(&evt.value()), current.to));
    };

    let on_to_change = move |evt: Event<FormData>| {
        let mut store = state.store.write();
        let current = store.date_range();
        store.set_date_range(DateRange::new(current.from, parse_input_date(&evt.value())));
    };

    let on_clear = move |_: Event<MouseData>| {
        state.store.write().set_date_range(DateRange::default());
    };

    rsx! {
        div {
            style: "display: flex; gap: 12px; align-items: center; padding: 6px 12px; border: 1px solid #ddd; border-radius: 6px;",
            span {
                style: "min-width: 220px; font-size: 14px;",
                color: if range.is_unbounded() { "#888" } else { "inherit" },
                "📅 {label}"
            }
            label {
                style: "font-size: 13px;",
                "From: "
                input {
                    r#type: "date",
                    value: "{from}",
                    max: "{to}",
                    onchange: on_from_change,
                }
            }
            label {
                style: "font-size: 13px;",
                "To: "
                input {
                    r#type: "date",
                    value: "{to}",
                    min: "{from}",
                    onchange: on_to_change,
                }
            }
            if !range.is_unbounded() {
                button {
                    style: "border: none; background: none; color: #1565C0; cursor: pointer;",
                    onclick: on_clear,
                    "Clear"
                }
            }
        }
    }
}
