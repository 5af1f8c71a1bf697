//! Writes a small, deterministic sales CSV for trying out the dashboard.
//!
//! Usage: `generate_sample [output.csv]` (default `sample_sales.csv`).

use anyhow::{Context, Result};

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
}

/// Region name, base advertising spend, stores per region.
const REGIONS: [(&str, f64, u32); 4] = [
    ("North", 900.0, 5),
    ("South", 650.0, 5),
    ("East", 1100.0, 5),
    ("West", 780.0, 5),
];
const MONTHS: u32 = 24;
/// Share of revenue cells left blank to exercise missing-value handling.
const MISSING_RATE: f64 = 0.03;

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_sales.csv".to_string());

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;

    writer.write_record([
        "month",
        "region",
        "stores",
        "ad_spend",
        "visitors",
        "revenue",
    ])?;

    let mut rows = 0;
    for month in 1..=MONTHS {
        // Mild seasonality on top of each region's base spend.
        let season = 1.0 + 0.15 * (month as f64 / 12.0 * std::f64::consts::TAU).sin();
        for &(region, base_spend, stores) in &REGIONS {
            let ad_spend = (rng.gauss(base_spend, 120.0) * season).max(0.0);
            let visitors = (ad_spend * 4.5 + rng.gauss(800.0, 150.0)).max(0.0);
            let revenue = 1200.0 + 3.2 * ad_spend + rng.gauss(0.0, 400.0);

            let revenue_cell = if rng.next_f64() < MISSING_RATE {
                String::new()
            } else {
                format!("{revenue:.2}")
            };

            writer.write_record([
                month.to_string(),
                region.to_string(),
                stores.to_string(),
                format!("{ad_spend:.2}"),
                format!("{visitors:.0}"),
                revenue_cell,
            ])?;
            rows += 1;
        }
    }
    writer.flush().context("flushing CSV writer")?;

    println!("Wrote {rows} rows to {output_path}");
    Ok(())
}
