use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

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

struct Row {
    vehicle: String,
    fuel: String,
    kmpl: String,
    created: String,
}

/// Simulate a fleet: each vehicle has a base efficiency; per transaction the
/// fuel figure follows from the kmpl figure plus noise.
fn generate_rows(rng: &mut SimpleRng) -> Vec<Row> {
    let fleet: [(&str, f64); 5] = [
        ("KA01AB1234", 14.0),
        ("ka02cd5678", 11.5),
        (" MH12EF9012 ", 9.0),
        ("DL03GH3456", 16.5),
        ("TN07JK7890", 12.0),
    ];

    let mut rows = Vec::new();
    let mut day = 1u32;
    for (vehicle, base_kmpl) in fleet {
        for _ in 0..12 {
            let kmpl = (base_kmpl + rng.gauss(0.0, 1.2)).max(2.0);
            let fuel = (450.0 / kmpl + rng.gauss(0.0, 2.0)).max(5.0);
            let created = format!("2024-{:02}-{:02} 08:30:00", 1 + day / 28, 1 + day % 28);
            rows.push(Row {
                vehicle: vehicle.to_string(),
                fuel: format!("{fuel:.2}"),
                kmpl: format!("{kmpl:.2}"),
                created,
            });
            day += 3;
        }
    }

    // A few dirty rows the loader is expected to drop or tolerate.
    rows.push(Row {
        vehicle: "KA01AB1234".to_string(),
        fuel: "n/a".to_string(),
        kmpl: "13.10".to_string(),
        created: "2024-03-01 08:30:00".to_string(),
    });
    rows.push(Row {
        vehicle: "  ".to_string(),
        fuel: "31.00".to_string(),
        kmpl: "12.40".to_string(),
        created: "2024-03-02 08:30:00".to_string(),
    });
    rows.push(Row {
        vehicle: "TN07JK7890".to_string(),
        fuel: "35.20".to_string(),
        kmpl: "12.80".to_string(),
        created: "sometime".to_string(),
    });

    rows
}

fn write_csv(rows: &[Row], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    writer.write_record(["Vehicle_no", "Est_fuel_Consumed", "Last_Tnx_Kmpl", "Created_date"])?;
    for row in rows {
        writer.write_record([&row.vehicle, &row.fuel, &row.kmpl, &row.created])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(rows: &[Row], path: &str) -> Result<()> {
    // Parquet gets the clean subset with typed numeric columns; the dirty
    // rows only make sense as text.
    let clean: Vec<&Row> = rows
        .iter()
        .filter(|r| r.fuel.parse::<f64>().is_ok() && !r.vehicle.trim().is_empty())
        .collect();

    let vehicle = StringArray::from(
        clean.iter().map(|r| r.vehicle.as_str()).collect::<Vec<_>>(),
    );
    let fuel = Float64Array::from(
        clean
            .iter()
            .map(|r| r.fuel.parse::<f64>().unwrap_or(0.0))
            .collect::<Vec<_>>(),
    );
    let kmpl = Float64Array::from(
        clean
            .iter()
            .map(|r| r.kmpl.parse::<f64>().unwrap_or(0.0))
            .collect::<Vec<_>>(),
    );
    let created = StringArray::from(
        clean.iter().map(|r| r.created.as_str()).collect::<Vec<_>>(),
    );

    let schema = Arc::new(Schema::new(vec![
        Field::new("Vehicle_no", DataType::Utf8, false),
        Field::new("Est_fuel_Consumed", DataType::Float64, false),
        Field::new("Last_Tnx_Kmpl", DataType::Float64, false),
        Field::new("Created_date", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(vehicle),
            Arc::new(fuel),
            Arc::new(kmpl),
            Arc::new(created),
        ],
    )
    .context("creating record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate_rows(&mut rng);

    write_csv(&rows, "sample_fleet.csv")?;
    write_parquet(&rows, "sample_fleet.parquet")?;

    println!(
        "Wrote {} transactions to sample_fleet.csv and sample_fleet.parquet",
        rows.len()
    );
    Ok(())
}
