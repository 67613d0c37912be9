//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `inveni_core` linkage without a mobile host.
//! - Drive one scripted creation session and print the map state.
//!
//! Usage: `inveni_cli [config.json]`

use inveni_core::{
    location_channel, Coordinate, CoreConfig, EventDraft, EventService, LocationUpdate,
    SimulatedLocationService,
};
use log::info;
use std::process::ExitCode;
use std::time::Instant;

fn main() -> ExitCode {
    println!("inveni_core ping={}", inveni_core::ping());
    println!("inveni_core version={}", inveni_core::core_version());

    let config = match load_config(std::env::args().nth(1)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config error: {err}");
            return ExitCode::FAILURE;
        }
    };
    match inveni_core::init_logging_from_config(&config) {
        Ok(true) => println!("logging dir={}", config.log_dir.as_deref().unwrap_or("")),
        Ok(false) => {}
        Err(err) => eprintln!("logging disabled: {err}"),
    }

    let (sender, inbox) = location_channel();
    let location = SimulatedLocationService::granted(sender)
        .with_fix(Coordinate::new(37.77, -122.41))
        .with_fix(Coordinate::new(40.0, -75.0));
    let mut service = match EventService::new(location, inbox, &config) {
        Ok(service) => service,
        Err(err) => {
            eprintln!("config error: {err}");
            return ExitCode::FAILURE;
        }
    };

    service.location_mut().subscribe(|update| {
        if let LocationUpdate::Error(err) = update {
            println!("location error: {err}");
        }
    });
    service.store_mut().subscribe(|_, store| {
        println!("store updated events={}", store.len());
    });

    println!("map center={}", service.map_center());
    for (title, description) in [("Meetup", "rust meetup"), ("Fair", "county fair")] {
        service.begin_creation(Instant::now());
        service.pump_location(Instant::now());
        if let Err(err) = service.create_event(EventDraft::new(title, description)) {
            eprintln!("create failed: {err}");
            return ExitCode::FAILURE;
        }
    }

    for pin in service.store().map_annotations() {
        println!("pin id={} title={} at={}", pin.event_id, pin.title, pin.coordinate);
    }
    for (title, marker) in service.store().names_and_marker_styles() {
        println!("card title={title} marker={marker}");
    }
    if let Some(focus) = service.store().focus_coordinate() {
        println!("focus={focus}");
    }
    info!(
        "event=cli_probe module=cli status=ok events={}",
        service.store().len()
    );
    ExitCode::SUCCESS
}

fn load_config(path: Option<String>) -> Result<CoreConfig, String> {
    let Some(path) = path else {
        return Ok(CoreConfig::default());
    };
    let raw = std::fs::read_to_string(&path)
        .map_err(|err| format!("failed to read `{path}`: {err}"))?;
    CoreConfig::from_json_str(&raw).map_err(|err| err.to_string())
}
