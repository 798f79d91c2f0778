//! Data-access actions: run a fetch and apply the outcome to the store.
//!
//! These are the only functions that move data from the API into a
//! [`DashboardStore`]. The UI calls them from event handlers; rendering only
//! reads the store.

use crate::client::BuoyApi;
use bitbuoy_core::store::{BuoyRequest, DashboardStore, MeasurementRequest, StoreHandle};
use log::debug;

/// Fetch the buoy list and replace the store's copy. Returns true if the
/// result was applied.
pub async fn load_buoys<A: BuoyApi, S: StoreHandle>(api: &A, store: &S) -> bool {
    let request = store.update(DashboardStore::begin_buoy_fetch);
    fetch_buoys(api, store, request).await
}

/// Run the buoy fetch for `request`, started earlier with
/// [`DashboardStore::begin_buoy_fetch`]. A sign-out or a newer fetch in the
/// meantime makes the result stale and it is dropped.
pub async fn fetch_buoys<A: BuoyApi, S: StoreHandle>(api: &A, store: &S, request: BuoyRequest) -> bool {
    let result = api.fetch_buoys().await.map(|list| list.buoys);
    store.update(|s| s.finish_buoy_fetch(&request, result))
}

/// Run the fetch for `request`. Returns true if the result was applied,
/// false if the request was superseded before or after the fetch.
pub async fn fetch_measurements<A: BuoyApi, S: StoreHandle>(
    api: &A,
    store: &S,
    request: MeasurementRequest,
) -> bool {
    if !store.read(|s| s.is_current(&request)) {
        debug!("Skipping superseded request for [{}]", request.query_value());
        return false;
    }
    let result = api.fetch_measurements(&request.serial_numbers).await;
    store.update(|s| s.finish_measurement_fetch(&request, result))
}

/// Toggle `serial` and fetch measurements for the new selection.
pub async fn toggle_buoy<A: BuoyApi, S: StoreHandle>(api: &A, store: &S, serial: &str) -> bool {
    match store.update(|s| s.toggle_buoy(serial)) {
        Some(request) => fetch_measurements(api, store, request).await,
        None => false,
    }
}

/// Drop credentials, any cached token and all dashboard state.
pub fn sign_out<A: BuoyApi, S: StoreHandle>(api: &A, store: &S) {
    api.sign_out();
    store.update(DashboardStore::reset);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitbuoy_core::buoy::{Buoy, BuoyList};
    use bitbuoy_core::error::FetchError;
    use bitbuoy_core::measurement::Measurement;
    use crate::config::Credentials;
    use bitbuoy_core::store::Loadable;
    use chrono::{DateTime, TimeZone, Utc};
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::rc::Rc;
    use tokio::sync::oneshot;

    type MeasurementResult = Result<Vec<Measurement>, FetchError>;

    /// Serves canned buoy lists and hands each measurement request a
    /// channel so tests decide when (and in what order) fetches complete.
    #[derive(Default)]
    struct FakeApi {
        buoys: RefCell<Option<Result<BuoyList, FetchError>>>,
        pending_buoys: RefCell<Option<oneshot::Receiver<Result<BuoyList, FetchError>>>>,
        pending: RefCell<HashMap<String, oneshot::Receiver<MeasurementResult>>>,
        calls: RefCell<Vec<String>>,
        credentials: RefCell<Option<Credentials>>,
        signed_out: Cell<bool>,
    }

    impl FakeApi {
        fn expect(&self, serials: &str) -> oneshot::Sender<MeasurementResult> {
            let (tx, rx) = oneshot::channel();
            self.pending.borrow_mut().insert(serials.to_string(), rx);
            tx
        }

        fn expect_buoys(&self) -> oneshot::Sender<Result<BuoyList, FetchError>> {
            let (tx, rx) = oneshot::channel();
            *self.pending_buoys.borrow_mut() = Some(rx);
            tx
        }
    }

    impl BuoyApi for FakeApi {
        async fn fetch_buoys(&self) -> Result<BuoyList, FetchError> {
            let rx = self.pending_buoys.borrow_mut().take();
            if let Some(rx) = rx {
                return rx
                    .await
                    .unwrap_or_else(|_| Err(FetchError::Network("sender dropped".into())));
            }
            self.buoys
                .borrow_mut()
                .take()
                .unwrap_or(Err(FetchError::Status(404)))
        }

        async fn fetch_measurements(&self, serial_numbers: &[String]) -> MeasurementResult {
            let key = serial_numbers.join(",");
            self.calls.borrow_mut().push(key.clone());
            let rx = self.pending.borrow_mut().remove(&key);
            match rx {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(FetchError::Network("sender dropped".into()))),
                None => Err(FetchError::Status(404)),
            }
        }

        fn sign_in(&self, credentials: Credentials) {
            *self.credentials.borrow_mut() = Some(credentials);
        }

        fn sign_out(&self) {
            *self.credentials.borrow_mut() = None;
            self.signed_out.set(true);
        }
    }

    fn ts(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 4, 1, hour, 0, 0).unwrap()
    }

    fn measurement(serial: &str, hour: u32) -> Measurement {
        Measurement {
            buoy_serial_number: serial.to_string(),
            ambient_temp: 25.5,
            water_temp: 20.3,
            water_pollution: 0.05,
            humidity: 65.0,
            lat: Some(50.7),
            long: Some(18.1),
            timestamp: ts(hour),
        }
    }

    fn new_store() -> Rc<RefCell<DashboardStore>> {
        Rc::new(RefCell::new(DashboardStore::new()))
    }

    #[tokio::test]
    async fn test_load_buoys_success() {
        let api = FakeApi::default();
        let buoys: Vec<Buoy> = (1..=4)
            .map(|i| Buoy {
                serial_number: format!("B00{}", i),
                last_measurement_timestamp: None,
                latitude: None,
                longitude: None,
            })
            .collect();
        *api.buoys.borrow_mut() = Some(Ok(BuoyList { user_id: 1, buoys }));
        let store = new_store();
        assert!(load_buoys(&api, &store).await);
        assert_eq!(store.borrow().buoy_entries(Utc::now(), &Utc).len(), 4);
    }

    #[tokio::test]
    async fn test_load_buoys_failure_sets_error_state() {
        let api = FakeApi::default();
        *api.buoys.borrow_mut() = Some(Err(FetchError::Malformed("eof".into())));
        let store = new_store();
        load_buoys(&api, &store).await;
        assert_eq!(store.borrow().buoys().error(), Some("malformed response: eof"));
    }

    #[tokio::test]
    async fn test_toggle_fetches_and_charts_every_record() {
        let api = FakeApi::default();
        let tx = api.expect("B001");
        let records: Vec<Measurement> = (10..15).map(|h| measurement("B001", h)).collect();
        tx.send(Ok(records.clone())).unwrap();

        let store = new_store();
        assert!(toggle_buoy(&api, &store, "B001").await);
        let store = store.borrow();
        for dimension in bitbuoy_core::measurement::Dimension::ALL {
            let points = store.chart_series(dimension, &Utc);
            let timestamps: Vec<String> = points.iter().map(|p| p.timestamp.clone()).collect();
            let expected: Vec<String> = records.iter().map(|m| m.timestamp.to_rfc3339()).collect();
            assert_eq!(timestamps, expected);
        }
    }

    #[tokio::test]
    async fn test_deselecting_last_buoy_issues_no_fetch() {
        let api = FakeApi::default();
        api.expect("B001").send(Ok(vec![measurement("B001", 12)])).unwrap();
        let store = new_store();
        toggle_buoy(&api, &store, "B001").await;
        assert!(!toggle_buoy(&api, &store, "B001").await);
        assert_eq!(*api.calls.borrow(), vec!["B001".to_string()]);
        assert_eq!(store.borrow().measurements(), &Loadable::Idle);
        assert!(store.borrow().visible_measurements(&Utc).is_empty());
    }

    #[tokio::test]
    async fn test_out_of_order_completion_keeps_latest_selection() {
        let api = FakeApi::default();
        let tx_first = api.expect("B001");
        let tx_second = api.expect("B001,B002");
        let store = new_store();

        let latest = vec![measurement("B001", 12), measurement("B002", 12)];
        let stale = vec![measurement("B001", 9)];
        let driver = async {
            tokio::task::yield_now().await;
            tx_second.send(Ok(latest.clone())).unwrap();
            tokio::task::yield_now().await;
            tx_first.send(Ok(stale)).unwrap();
        };

        let (first_applied, second_applied, ()) = tokio::join!(
            toggle_buoy(&api, &store, "B001"),
            toggle_buoy(&api, &store, "B002"),
            driver
        );

        assert!(!first_applied);
        assert!(second_applied);
        assert_eq!(store.borrow().measurements(), &Loadable::Loaded(latest));
        assert_eq!(
            *api.calls.borrow(),
            vec!["B001".to_string(), "B001,B002".to_string()]
        );
    }

    #[tokio::test]
    async fn test_superseded_request_is_not_sent() {
        let api = FakeApi::default();
        let store = new_store();
        let request = store.update(|s| s.toggle_buoy("B001")).unwrap();
        store.update(|s| s.toggle_buoy("B002"));
        assert!(!fetch_measurements(&api, &store, request).await);
        assert!(api.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_measurement_failure_is_recorded() {
        let api = FakeApi::default();
        let store = new_store();
        assert!(toggle_buoy(&api, &store, "B404").await);
        assert_eq!(
            store.borrow().measurements().error(),
            Some("server responded with status 404")
        );
    }

    #[test]
    fn test_sign_out_resets_store() {
        let api = FakeApi::default();
        api.sign_in(Credentials::Token("abc".into()));
        let store = new_store();
        store.update(|s| s.toggle_buoy("B001"));
        sign_out(&api, &store);
        assert!(api.signed_out.get());
        assert_eq!(*api.credentials.borrow(), None);
        assert!(store.borrow().selection().is_empty());
    }

    #[tokio::test]
    async fn test_sign_out_during_buoy_fetch_keeps_store_reset() {
        let api = FakeApi::default();
        let tx = api.expect_buoys();
        let store = new_store();
        let list = BuoyList {
            user_id: 1,
            buoys: vec![Buoy {
                serial_number: "B001".to_string(),
                last_measurement_timestamp: None,
                latitude: None,
                longitude: None,
            }],
        };

        let driver = async {
            tokio::task::yield_now().await;
            sign_out(&api, &store);
            tx.send(Ok(list)).unwrap();
        };
        let (applied, ()) = tokio::join!(load_buoys(&api, &store), driver);

        assert!(!applied);
        assert_eq!(store.borrow().buoys(), &Loadable::Idle);
    }

    #[tokio::test]
    async fn test_buoy_list_is_loading_before_the_fetch_runs() {
        let api = FakeApi::default();
        let tx = api.expect_buoys();
        let store = new_store();
        let request = store.update(DashboardStore::begin_buoy_fetch);
        assert!(store.borrow().buoys().is_loading());
        tx.send(Ok(BuoyList { user_id: 1, buoys: Vec::new() })).unwrap();
        assert!(fetch_buoys(&api, &store, request).await);
        assert_eq!(store.borrow().buoys(), &Loadable::Loaded(Vec::new()));
    }
}
