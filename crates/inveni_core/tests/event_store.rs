use inveni_core::{Coordinate, Event, EventStore, StoreChange, EVENT_PIN_MARKER};
use std::cell::RefCell;
use std::rc::Rc;

fn event(title: &str, latitude: f64, longitude: f64) -> Event {
    Event::new(title, "", Coordinate::new(latitude, longitude))
}

#[test]
fn list_preserves_call_order_and_count() {
    let mut store = EventStore::new();
    let titles = ["one", "two", "three", "four", "five"];
    for (i, title) in titles.iter().enumerate() {
        store
            .add_event(event(title, i as f64, -(i as f64)))
            .expect("add should succeed");
        assert_eq!(store.list_events().len(), i + 1);
    }

    let listed: Vec<&str> = store
        .list_events()
        .iter()
        .map(|event| event.title.as_str())
        .collect();
    assert_eq!(listed, titles);
}

#[test]
fn focus_follows_last_added_event() {
    let mut store = EventStore::new();
    assert_eq!(store.focus_coordinate(), None);

    for (lat, lon) in [(1.0, 2.0), (-33.87, 151.21), (64.14, -21.94)] {
        let added = event("pin", lat, lon);
        let coordinates = added.coordinates;
        store.add_event(added).expect("add should succeed");
        assert_eq!(store.focus_coordinate(), Some(coordinates));
    }
}

#[test]
fn names_and_markers_align_with_events() {
    let mut store = EventStore::new();
    assert!(store.names_and_marker_styles().is_empty());

    for title in ["Meetup", "Fair", "Concert"] {
        store
            .add_event(event(title, 0.0, 0.0))
            .expect("add should succeed");
    }

    let pairs = store.names_and_marker_styles();
    assert_eq!(pairs.len(), store.list_events().len());
    for ((title, marker), event) in pairs.iter().zip(store.list_events()) {
        assert_eq!(title, &event.title);
        assert_eq!(*marker, EVENT_PIN_MARKER);
    }
}

#[test]
fn list_is_stable_without_mutation() {
    let mut store = EventStore::new();
    store
        .add_event(event("Meetup", 37.77, -122.41))
        .expect("add should succeed");

    let first = store.list_events().to_vec();
    let second = store.list_events().to_vec();
    assert_eq!(first, second);
}

#[test]
fn meetup_then_fair_scenario() {
    let mut store = EventStore::new();
    store
        .add_event(event("Meetup", 37.77, -122.41))
        .expect("meetup should be added");
    store
        .add_event(event("Fair", 40.0, -75.0))
        .expect("fair should be added");

    let titles: Vec<&str> = store
        .list_events()
        .iter()
        .map(|event| event.title.as_str())
        .collect();
    assert_eq!(titles, ["Meetup", "Fair"]);
    assert_eq!(store.focus_coordinate(), Some(Coordinate::new(40.0, -75.0)));
}

#[test]
fn out_of_range_coordinates_pass_through() {
    let mut store = EventStore::new();
    store
        .add_event(event("Nowhere", 123.0, 456.0))
        .expect("coordinates are not range-checked");
    assert_eq!(store.focus_coordinate(), Some(Coordinate::new(123.0, 456.0)));
}

#[test]
fn map_annotations_mirror_events() {
    let mut store = EventStore::new();
    let meetup = store
        .add_event(event("Meetup", 37.77, -122.41))
        .expect("add should succeed");
    let fair = store
        .add_event(event("Fair", 40.0, -75.0))
        .expect("add should succeed");

    let annotations = store.map_annotations();
    assert_eq!(annotations.len(), 2);
    assert_eq!(annotations[0].event_id, meetup);
    assert_eq!(annotations[0].title, "Meetup");
    assert_eq!(annotations[1].event_id, fair);
    assert_eq!(annotations[1].coordinate, Coordinate::new(40.0, -75.0));
}

#[test]
fn subscribers_are_notified_in_order_until_unsubscribed() {
    let mut store = EventStore::new();
    let log = Rc::new(RefCell::new(Vec::new()));

    let first_log = Rc::clone(&log);
    let first = store.subscribe(move |change, _| {
        let StoreChange::EventAdded { index, .. } = *change;
        first_log.borrow_mut().push(("map", index));
    });
    let second_log = Rc::clone(&log);
    store.subscribe(move |change, _| {
        let StoreChange::EventAdded { index, .. } = *change;
        second_log.borrow_mut().push(("list", index));
    });

    store
        .add_event(event("Meetup", 0.0, 0.0))
        .expect("add should succeed");
    assert!(store.unsubscribe(first));
    assert!(!store.unsubscribe(first));
    store
        .add_event(event("Fair", 0.0, 0.0))
        .expect("add should succeed");

    assert_eq!(
        log.borrow().as_slice(),
        &[("map", 0), ("list", 0), ("list", 1)]
    );
}

#[test]
fn get_event_finds_by_id() {
    let mut store = EventStore::new();
    let id = store
        .add_event(event("Meetup", 0.0, 0.0))
        .expect("add should succeed");
    assert_eq!(
        store.get_event(id).map(|event| event.title.as_str()),
        Some("Meetup")
    );
    assert!(store.get_event(uuid::Uuid::new_v4()).is_none());
}
