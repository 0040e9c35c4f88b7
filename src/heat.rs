//! Heat index and hospital visit advisory

/// Simplified "feels like" temperature in Celsius.
///
/// Linear approximation: `temperature + 0.33 * humidity - 0.7`. Inputs are
/// not range-checked; out-of-range humidity propagates into the result.
#[must_use]
pub fn heat_index(temperature: f64, humidity: f64) -> f64 {
    temperature + 0.33 * humidity - 0.7
}

/// Whether it is advisable to travel to a hospital at the current temperature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HospitalAdvisory {
    Safe,
    Caution,
    UrgentOnly,
}

impl HospitalAdvisory {
    #[must_use]
    pub fn for_temperature(temperature: f64) -> Self {
        if temperature < 30.0 {
            HospitalAdvisory::Safe
        } else if temperature < 40.0 {
            HospitalAdvisory::Caution
        } else {
            HospitalAdvisory::UrgentOnly
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            HospitalAdvisory::Safe => "Safe to visit",
            HospitalAdvisory::Caution => "Caution: stay hydrated while going",
            HospitalAdvisory::UrgentOnly => "Only go if urgent; stay indoors otherwise",
        }
    }
}
