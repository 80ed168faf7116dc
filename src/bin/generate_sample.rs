use std::path::Path;
use std::sync::Arc;

use arrow::array::{Date32Array, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

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

// ---------------------------------------------------------------------------
// Synthetic business data
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SampleRow {
    #[serde(rename = "Month")]
    month: NaiveDate,
    #[serde(rename = "Region")]
    region: String,
    #[serde(rename = "Product_Category")]
    product_category: String,
    #[serde(rename = "Revenue")]
    revenue: f64,
    #[serde(rename = "Units_Sold")]
    units_sold: i64,
    #[serde(rename = "Inventory_Turnover")]
    inventory_turnover: f64,
}

/// Region name and monthly revenue baseline across all categories.
const REGIONS: [(&str, f64); 4] = [
    ("North America", 420_000.0),
    ("EMEA", 310_000.0),
    ("Asia Pacific", 260_000.0),
    ("Latin America", 140_000.0),
];

/// Category name, revenue share, average selling price, typical turnover.
const CATEGORIES: [(&str, f64, f64, f64); 4] = [
    ("Footwear", 0.38, 95.0, 4.2),
    ("Apparel", 0.32, 55.0, 5.1),
    ("Equipment", 0.18, 140.0, 3.3),
    ("Accessories", 0.12, 25.0, 6.0),
];

/// Monthly demand factors with a holiday-season peak in Nov/Dec.
const SEASONALITY: [f64; 12] = [
    0.92, 0.88, 0.95, 1.00, 1.02, 0.97, 0.94, 0.98, 1.06, 1.08, 1.18, 1.30,
];

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// 24 months × 4 regions × 4 categories of plausible monthly figures.
fn generate_rows() -> Vec<SampleRow> {
    let mut rng = SimpleRng::new(42);
    let mut rows = Vec::new();

    for month_offset in 0..24 {
        let year = 2023 + month_offset / 12;
        let month = month_offset % 12 + 1;
        let date = NaiveDate::from_ymd_opt(year, month as u32, 1).expect("valid month");
        let seasonal = SEASONALITY[(month - 1) as usize];

        for (region, region_base) in REGIONS {
            for (category, share, price, turnover_base) in CATEGORIES {
                let revenue =
                    (region_base * share * seasonal * (1.0 + rng.gauss(0.0, 0.08))).max(1_000.0);
                let units = (revenue / price * (1.0 + rng.gauss(0.0, 0.05)))
                    .round()
                    .max(1.0);
                let turnover = (turnover_base + rng.gauss(0.0, 0.35)).max(0.5);

                rows.push(SampleRow {
                    month: date,
                    region: region.to_string(),
                    product_category: category.to_string(),
                    revenue: round2(revenue),
                    units_sold: units as i64,
                    inventory_turnover: round2(turnover),
                });
            }
        }
    }

    rows
}

// ---------------------------------------------------------------------------
// Writers
// ---------------------------------------------------------------------------

fn write_csv(path: &str, rows: &[SampleRow]) {
    let mut writer = csv::Writer::from_path(path).expect("Failed to create output file");
    for row in rows {
        writer.serialize(row).expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush CSV");
}

fn write_json(path: &str, rows: &[SampleRow]) {
    let file = std::fs::File::create(path).expect("Failed to create output file");
    serde_json::to_writer_pretty(file, rows).expect("Failed to write JSON");
}

fn write_parquet(path: &str, rows: &[SampleRow]) {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).expect("epoch");
    let month_array = Date32Array::from(
        rows.iter()
            .map(|r| r.month.signed_duration_since(epoch).num_days() as i32)
            .collect::<Vec<_>>(),
    );
    let region_array =
        StringArray::from(rows.iter().map(|r| r.region.as_str()).collect::<Vec<_>>());
    let category_array = StringArray::from(
        rows.iter()
            .map(|r| r.product_category.as_str())
            .collect::<Vec<_>>(),
    );
    let revenue_array = Float64Array::from(rows.iter().map(|r| r.revenue).collect::<Vec<_>>());
    let units_array = Int64Array::from(rows.iter().map(|r| r.units_sold).collect::<Vec<_>>());
    let turnover_array = Float64Array::from(
        rows.iter()
            .map(|r| r.inventory_turnover)
            .collect::<Vec<_>>(),
    );

    let schema = Arc::new(Schema::new(vec![
        Field::new("Month", DataType::Date32, false),
        Field::new("Region", DataType::Utf8, false),
        Field::new("Product_Category", DataType::Utf8, false),
        Field::new("Revenue", DataType::Float64, false),
        Field::new("Units_Sold", DataType::Int64, false),
        Field::new("Inventory_Turnover", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(month_array),
            Arc::new(region_array),
            Arc::new(category_array),
            Arc::new(revenue_array),
            Arc::new(units_array),
            Arc::new(turnover_array),
        ],
    )
    .expect("Failed to create RecordBatch");

    let file = std::fs::File::create(path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}

fn main() {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "business_performance.csv".to_string());

    let rows = generate_rows();

    let ext = Path::new(&output_path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => write_csv(&output_path, &rows),
        "json" => write_json(&output_path, &rows),
        "parquet" | "pq" => write_parquet(&output_path, &rows),
        other => {
            eprintln!("Unsupported output extension: .{other} (use csv, json, or parquet)");
            std::process::exit(2);
        }
    }

    println!("Wrote {} records to {output_path}", rows.len());
}
