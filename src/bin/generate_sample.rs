use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use weather_dashboard::settings::DATA_DIR_NAME;

/// One output row; field names become the CSV header.
#[derive(Serialize)]
struct SampleRow {
    city: &'static str,
    date_time: String,
    temperature: Option<f64>,
    humidity: Option<f64>,
    pressure: Option<f64>,
    wind_speed: Option<f64>,
    precipitation: Option<f64>,
    snowfall: Option<f64>,
    visibility: Option<f64>,
}

/// Rough January climate per city: (name, mean °C, mean humidity %).
const CITIES: [(&str, f64, f64); 5] = [
    ("Paris", 5.0, 85.0),
    ("Vienna", 0.5, 80.0),
    ("Prague", -0.5, 82.0),
    ("Rome", 9.0, 75.0),
    ("Lisbon", 12.0, 78.0),
];

const DAYS: i64 = 30;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// `Some(value)` except for roughly `missing_rate` of the calls.
    fn maybe(&mut self, missing_rate: f64, value: f64) -> Option<f64> {
        (self.next_f64() >= missing_rate).then_some(value)
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).context("invalid start date")?;

    let mut rows = Vec::new();
    for day in 0..DAYS {
        let date = start + Duration::days(day);
        for &(city, mean_temp, mean_humidity) in &CITIES {
            let temperature = round1(rng.gauss(mean_temp, 3.0));
            let precipitation = round1(rng.gauss(0.0, 4.0).max(0.0));
            let snowfall = if temperature < 1.0 && precipitation > 0.0 {
                round1(precipitation * 0.8)
            } else {
                0.0
            };
            let visibility = round1((10.0 - precipitation * 0.5).clamp(0.5, 10.0));
            let humidity = round1(rng.gauss(mean_humidity, 6.0).clamp(20.0, 100.0));
            let pressure = round1(rng.gauss(1015.0, 8.0));
            let wind_speed = round1(rng.gauss(12.0, 5.0).max(0.0));

            rows.push(SampleRow {
                city,
                date_time: format!("{date} 12:00:00"),
                temperature: Some(temperature),
                humidity: rng.maybe(0.05, humidity),
                pressure: Some(pressure),
                wind_speed: Some(wind_speed),
                precipitation: Some(precipitation),
                snowfall: Some(snowfall),
                visibility: rng.maybe(0.1, visibility),
            });
        }
    }

    // One row the dashboard cannot place on the time axis.
    rows.push(SampleRow {
        city: "Paris",
        date_time: "not-a-date".to_string(),
        temperature: Some(6.0),
        humidity: None,
        pressure: None,
        wind_speed: None,
        precipitation: None,
        snowfall: None,
        visibility: None,
    });

    let dir = Path::new(DATA_DIR_NAME);
    std::fs::create_dir_all(dir).context("creating data folder")?;
    let output_path = dir.join("europe_weather.csv");
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    for row in &rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;

    println!(
        "Wrote {} observations for {} cities to {}",
        rows.len(),
        CITIES.len(),
        output_path.display()
    );
    Ok(())
}
