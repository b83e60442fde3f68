use chrono::NaiveDate;

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

    fn pick<'a>(&mut self, options: &[&'a str]) -> &'a str {
        options[(self.next_u64() % options.len() as u64) as usize]
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let regions = ["North", "South", "East", "West"];
    let products = ["Widget", "Gadget", "Gizmo"];
    // Per-region price profile so the categorical and numeric columns
    // correlate visibly in the box plot.
    let region_mean = [20.0, 35.0, 27.0, 42.0];

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid calendar date");

    let output_path = "sample_data.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record(["order_id", "region", "product", "price", "units", "order_date", "priority"])
        .expect("Failed to write header");

    let n_rows = 500;
    for order_id in 0..n_rows {
        let region_idx = (rng.next_u64() % regions.len() as u64) as usize;
        let region = regions[region_idx];
        let product = rng.pick(&products);
        let price = rng.gauss(region_mean[region_idx], 6.0).max(1.0);
        let units = 1 + (rng.next_u64() % 20) as i64;
        let date = start + chrono::Days::new(rng.next_u64() % 365);
        let priority = if rng.next_f64() < 0.3 { "true" } else { "false" };

        writer
            .write_record([
                order_id.to_string(),
                region.to_string(),
                product.to_string(),
                format!("{price:.2}"),
                units.to_string(),
                date.format("%Y-%m-%d").to_string(),
                priority.to_string(),
            ])
            .expect("Failed to write row");
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {n_rows} rows to {output_path}");
}
