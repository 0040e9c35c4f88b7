//! Terminal rendering of an assessment for the `report` command

use std::fmt::Write;

use crate::assistant::Assessment;
use crate::heat::{HospitalAdvisory, heat_index};
use crate::models::{Place, PlaceCategory};
use crate::schedule::THEATRE_SCHEDULE;

const HOTEL_SPECIAL: &str = "Special Today: No specific special item today";

fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn place_line(category: PlaceCategory, place: &Place, temperature: f64, hour: u8) -> String {
    let base = format!("{} - {}", place.name, place.formatted);
    match category {
        PlaceCategory::Hotel => format!("{base} → {HOTEL_SPECIAL}"),
        PlaceCategory::Hospital => format!(
            "{base} → {}",
            HospitalAdvisory::for_temperature(temperature).message()
        ),
        PlaceCategory::MovieTheater => format!(
            "{base} → Movies Now: {}",
            THEATRE_SCHEDULE.describe_now(&place.name, hour)
        ),
        PlaceCategory::ShoppingMall | PlaceCategory::Cafe => base,
    }
}

/// Render the report as printed by the CLI; `hour` is the local hour (0-23).
#[must_use]
pub fn render(city: &str, assessment: &Assessment, hour: u8) -> String {
    let weather = &assessment.weather;
    let mut out = String::new();

    let _ = writeln!(out, "🌤 Weather in {}: {}", title_case(city), weather.description);
    let _ = writeln!(out, "🌡 Temperature: {}", weather.format_temperature());
    let _ = writeln!(out, "💧 Humidity: {}", weather.format_humidity());
    let _ = writeln!(
        out,
        "🌞 Heat Index (Feels like): {:.1}°C",
        heat_index(weather.temperature, weather.humidity)
    );

    match assessment.advice.fallback {
        None => {
            let _ = writeln!(out, "\n✅ AI Health Suggestions:");
        }
        Some(failure) => {
            let _ = writeln!(out, "\n⚠ Could not reach the advice service ({failure}); general tips:");
        }
    }
    for (i, tip) in assessment.advice.tips.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, tip);
    }

    for category in PlaceCategory::ALL {
        let places = assessment.places.get(category);
        if places.is_empty() {
            let _ = writeln!(out, "\nNo {} found nearby.", category.key());
            continue;
        }
        let _ = writeln!(out, "\n{}:", category.heading());
        for place in places {
            let _ = writeln!(
                out,
                "{}",
                place_line(category, place, weather.temperature, hour)
            );
        }
    }

    out
}
