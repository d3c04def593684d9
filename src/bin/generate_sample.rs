use anyhow::{Context, Result};
use serde_json::json;

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

    /// Uniform value in `[lo, hi)`.
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

/// Header of the published SBDB export. `pdes`, `name`, `pha` and
/// `diameter` sit at positions 3, 4, 7 and 15, so the generated file
/// satisfies both the by-name and the by-position loaders.
const NEO_HEADER: [&str; 17] = [
    "id", "spkid", "full_name", "pdes", "name", "prefix", "neo", "pha", "H", "G", "M1", "M2",
    "K1", "K2", "PC", "diameter", "diameter_sigma",
];

/// Manifest of the published close-approach document; `des`, `cd`, `dist`
/// and `v_rel` sit at positions 0, 3, 4 and 7.
const CAD_FIELDS: [&str; 11] = [
    "des", "orbit_id", "jd", "cd", "dist", "dist_min", "dist_max", "v_rel", "v_inf",
    "t_sigma_f", "h",
];

const NAMED: [(&str, &str); 4] = [
    ("433", "Eros"),
    ("1566", "Icarus"),
    ("2101", "Adonis"),
    ("99942", "Apophis"),
];

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn main() -> Result<()> {
    env_logger::init();
    let mut rng = SimpleRng::new(42);

    // Designations: a few named objects plus anonymous provisional ones.
    let mut designations: Vec<(String, String)> = NAMED
        .iter()
        .map(|&(des, name)| (des.to_string(), name.to_string()))
        .collect();
    for i in 0..8 {
        let year = 1998 + (rng.next_u64() % 25) as u32;
        designations.push((format!("{year} XB{i}"), String::new()));
    }

    write_neo_csv("neos.csv", &designations, &mut rng)?;
    let approach_count = write_cad_json("cad.json", &designations, &mut rng)?;

    println!(
        "Wrote {} NEOs to neos.csv and {approach_count} close approaches to cad.json",
        designations.len()
    );
    Ok(())
}

fn write_neo_csv(
    output_path: &str,
    designations: &[(String, String)],
    rng: &mut SimpleRng,
) -> Result<()> {
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record(NEO_HEADER).context("writing header")?;

    for (i, (des, name)) in designations.iter().enumerate() {
        let mut row = vec![String::new(); NEO_HEADER.len()];
        row[0] = format!("a{i:07}");
        row[1] = format!("{}", 2000433 + i as u64);
        row[2] = format!("   {des} {name}").trim_end().to_string();
        row[3] = des.clone();
        row[4] = name.clone();
        row[6] = "Y".to_string();
        row[7] = if rng.next_f64() < 0.25 { "Y" } else { "N" }.to_string();
        row[8] = format!("{:.2}", rng.range(9.0, 28.0));
        // Every third object has no measured diameter.
        if i % 3 != 0 {
            row[15] = format!("{:.3}", rng.range(0.05, 17.0));
        }
        writer.write_record(&row).with_context(|| format!("writing row {i}"))?;
    }

    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_cad_json(
    output_path: &str,
    designations: &[(String, String)],
    rng: &mut SimpleRng,
) -> Result<usize> {
    let mut data = Vec::new();
    for (des, _) in designations {
        let approaches = 1 + (rng.next_u64() % 4) as usize;
        for _ in 0..approaches {
            let year = 1990 + (rng.next_u64() % 40) as u32;
            let month = MONTHS[(rng.next_u64() % 12) as usize];
            let day = 1 + (rng.next_u64() % 28) as u32;
            let cd = format!(
                "{year}-{month}-{day:02} {:02}:{:02}",
                rng.next_u64() % 24,
                rng.next_u64() % 60
            );
            let jd = rng.range(2_448_000.0, 2_462_000.0);
            // Some entries in the real feed carry blank measurements.
            let dist = if rng.next_f64() < 0.1 {
                String::new()
            } else {
                format!("{:.6}", rng.range(0.0002, 0.5))
            };
            let v_rel = if rng.next_f64() < 0.1 {
                String::new()
            } else {
                format!("{:.4}", rng.range(3.0, 40.0))
            };
            data.push(json!([
                des,
                format!("{}", rng.next_u64() % 700),
                format!("{jd:.3}"),
                cd,
                dist,
                dist,
                dist,
                v_rel,
                v_rel,
                "00:01",
                format!("{:.1}", rng.range(9.0, 28.0)),
            ]));
        }
    }

    let count = data.len();
    let doc = json!({
        "signature": { "source": "generate_sample", "version": "1.0" },
        "count": count.to_string(),
        "fields": CAD_FIELDS,
        "data": data,
    });
    let file = std::fs::File::create(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    serde_json::to_writer_pretty(file, &doc).context("writing JSON")?;
    Ok(count)
}
