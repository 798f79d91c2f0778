use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The set of buoy serial numbers the operator has chosen to view.
///
/// Backed by a `BTreeSet` so duplicates cannot exist and the serial list
/// sent to the API is stable for a given set.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection(BTreeSet<String>);

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove `serial` if present, add it otherwise.
    /// Returns true when the serial is selected afterwards.
    pub fn toggle(&mut self, serial: &str) -> bool {
        if self.0.remove(serial) {
            false
        } else {
            self.0.insert(serial.to_string());
            true
        }
    }

    pub fn contains(&self, serial: &str) -> bool {
        self.0.contains(serial)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn serial_numbers(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }

    /// Comma-joined serial list for the `serial_numbers` query parameter.
    pub fn query_value(&self) -> String {
        self.0.iter().map(String::as_str).collect::<Vec<_>>().join(",")
    }

    /// Text of the selector button.
    pub fn selector_label(&self) -> String {
        match self.len() {
            0 => "Select Buoys".to_string(),
            n => format!("{} Buoys Selected", n),
        }
    }
}

impl<S: Into<String>> FromIterator<S> for Selection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Selection(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::Selection;

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut selection = Selection::new();
        assert!(selection.toggle("B001"));
        assert!(selection.contains("B001"));
        assert!(!selection.toggle("B001"));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_twice_restores_original() {
        let original: Selection = ["B001", "B003"].into_iter().collect();
        for serial in ["B001", "B002", "B003"] {
            let mut selection = original.clone();
            selection.toggle(serial);
            selection.toggle(serial);
            assert_eq!(selection, original, "toggle pair on {serial}");
        }
    }

    #[test]
    fn test_no_duplicates() {
        let selection: Selection = ["B002", "B001", "B002"].into_iter().collect();
        assert_eq!(selection.len(), 2);
        assert_eq!(selection.query_value(), "B001,B002");
    }

    #[test]
    fn test_selector_label() {
        let mut selection = Selection::new();
        assert_eq!(selection.selector_label(), "Select Buoys");
        selection.toggle("B001");
        selection.toggle("B002");
        assert_eq!(selection.selector_label(), "2 Buoys Selected");
    }
}
