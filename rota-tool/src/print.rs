//! Plain-text output for the one-shot commands.

use std::fmt::Write;

use rota_core::{Banner, DAY_OFF, LoadStatus, ReferenceData, WeekView};

pub fn render_week(view: &WeekView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Week {}", view.week());

    match view.status() {
        LoadStatus::Loading => {
            let _ = writeln!(out, "Loading duties...");
            return out;
        }
        LoadStatus::Failed(error) => {
            let _ = writeln!(out, "Failed to load duties: {}", error);
            return out;
        }
        LoadStatus::Loaded(_) => {}
    }

    for column in view.columns() {
        let marker = if column.is_selected { " *" } else { "" };
        let _ = writeln!(out, "\n{} {}{}", column.weekday_name(), column.date, marker);

        if column.is_day_off() {
            let _ = writeln!(out, "  {}", DAY_OFF);
            continue;
        }

        for duty in &column.duties {
            let _ = writeln!(
                out,
                "  [{}] {}  vehicle: {}  driver: {}  conductor: {}  duration: {}",
                duty.id,
                duty.time_range(),
                duty.vehicle,
                duty.driver,
                duty.conductor,
                duty.duration_label()
            );
        }
    }

    out
}

pub fn render_vehicles(data: &ReferenceData) -> String {
    let mut out = String::new();
    for vehicle in &data.vehicles {
        let _ = writeln!(out, "{}\t{}", vehicle.id, vehicle.label());
    }
    out
}

pub fn render_crew(data: &ReferenceData) -> String {
    let mut out = String::from("Drivers:\n");
    for driver in &data.drivers {
        let _ = writeln!(out, "  {}\t{}", driver.id, driver.name);
    }
    out.push_str("Conductors:\n");
    for conductor in &data.conductors {
        let _ = writeln!(out, "  {}\t{}", conductor.id, conductor.name);
    }
    out
}

pub fn render_banner(banner: &Banner) -> &str {
    match banner {
        Banner::Success(message) | Banner::Error(message) => message.as_str(),
    }
}
