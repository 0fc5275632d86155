use chrono::{Duration, NaiveDate};

const HEADER: [&str; 16] = [
    "Neo Reference ID",
    "Name",
    "Absolute Magnitude",
    "Est Dia in KM(min)",
    "Est Dia in KM(max)",
    "Close Approach Date",
    "Epoch Date Close Approach",
    "Relative Velocity km per sec",
    "Miles per hour",
    "Miss Dist.(Astronomical)",
    "Miss Dist.(kilometers)",
    "Orbiting Body",
    "Orbit ID",
    "Minimum Orbit Intersection",
    "Equinox",
    "Hazardous",
];

const KM_PER_AU: f64 = 149_597_870.7;
const MPH_PER_KPS: f64 = 2236.936;

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

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Diameter estimate in km for absolute magnitude `h` and geometric albedo `p`.
fn diameter_km(h: f64, albedo: f64) -> f64 {
    1329.0 / albedo.sqrt() * 10f64.powf(-h / 5.0)
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let rows = 2000;
    let first_day = NaiveDate::from_ymd_opt(1995, 1, 1).expect("valid start date");

    let output_path = "nasa.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer.write_record(HEADER).expect("Failed to write header");

    for i in 0..rows {
        let reference_id = 2_000_000 + i * 37;
        let magnitude = rng.gauss(22.0, 2.8).clamp(11.0, 33.0);
        let magnitude = (magnitude * 10.0).round() / 10.0;

        let day = first_day + Duration::days((rng.next_f64() * 8400.0) as i64);
        let epoch_ms = day
            .and_hms_opt(0, 0, 0)
            .expect("midnight exists")
            .and_utc()
            .timestamp_millis();

        let miss_km = rng.uniform(1.0e5, 7.5e7);
        // Slower encounters tend to be recorded further out.
        let kps = (rng.gauss(14.0, 6.0) + miss_km / 2.0e7).clamp(0.3, 45.0);

        let orbit_id = (rng.next_f64().powi(3) * 60.0) as u32 + 1;
        let moid_au = rng.uniform(0.0, 0.5).powi(2);
        let moid = match rng.next_f64() {
            r if r < 0.01 => String::new(),
            r if r < 0.03 => "n/a".to_string(),
            _ => format!("{moid_au:.6}"),
        };
        let hazardous = magnitude <= 22.0 && moid_au <= 0.05;

        // A few records miss their speed or distance entirely.
        let speed = if rng.next_f64() < 0.01 {
            String::new()
        } else {
            format!("{:.4}", kps * MPH_PER_KPS)
        };
        let distance = if rng.next_f64() < 0.01 {
            String::new()
        } else {
            format!("{miss_km:.1}")
        };

        writer
            .write_record([
                reference_id.to_string(),
                reference_id.to_string(),
                format!("{magnitude:.1}"),
                format!("{:.6}", diameter_km(magnitude, 0.25)),
                format!("{:.6}", diameter_km(magnitude, 0.05)),
                day.to_string(),
                epoch_ms.to_string(),
                format!("{kps:.6}"),
                speed,
                format!("{:.9}", miss_km / KM_PER_AU),
                distance,
                "Earth".to_string(),
                orbit_id.to_string(),
                moid,
                "J2000".to_string(),
                if hazardous { "True" } else { "False" }.to_string(),
            ])
            .expect("Failed to write record");
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {rows} close-approach records to {output_path}");
}
