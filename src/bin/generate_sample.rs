use std::sync::Arc;

use arrow::array::StringArray;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const COLUMNS: [&str; 12] = [
    "show_id",
    "type",
    "title",
    "director",
    "cast",
    "country",
    "date_added",
    "release_year",
    "rating",
    "duration",
    "listed_in",
    "description",
];

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

const TITLE_WORDS: [&str; 16] = [
    "Midnight", "River", "Echoes", "Crown", "Lost", "City", "Summer", "Signal", "Paper", "Ghost",
    "Harbor", "Wild", "Silent", "Empire", "Garden", "Storm",
];

const DIRECTORS: [&str; 8] = [
    "Rajiv Chilaka",
    "Raúl Campos, Jan Suter",
    "Marcus Raboy",
    "Suhas Kadav",
    "Jay Karas",
    "Cathy Garcia-Molina",
    "Martin Scorsese",
    "Youssef Chahine",
];

const COUNTRIES: [&str; 9] = [
    "United States",
    "India",
    "United Kingdom",
    "Japan",
    "South Korea",
    "Canada",
    "Spain",
    "France",
    "United States, Canada",
];

const MOVIE_RATINGS: [&str; 6] = ["TV-MA", "TV-14", "R", "PG-13", "TV-PG", "PG"];
const SHOW_RATINGS: [&str; 4] = ["TV-MA", "TV-14", "TV-PG", "TV-Y7"];

const MOVIE_GENRES: [&str; 7] = [
    "Dramas",
    "Comedies",
    "Documentaries",
    "Action & Adventure",
    "International Movies",
    "Thrillers",
    "Romantic Movies",
];
const SHOW_GENRES: [&str; 5] = [
    "International TV Shows",
    "TV Dramas",
    "TV Comedies",
    "Crime TV Shows",
    "Kids' TV",
];

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

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }

    /// True with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// `None` with probability `p_missing`.
    fn maybe(&mut self, p_missing: f64, value: String) -> Option<String> {
        if self.chance(p_missing) {
            None
        } else {
            Some(value)
        }
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn generate_row(id: usize, rng: &mut SimpleRng) -> Vec<Option<String>> {
    let is_movie = rng.chance(0.7);

    let title = format!("{} {}", rng.pick(&TITLE_WORDS), rng.pick(&TITLE_WORDS));

    let year_added = 2008 + rng.below(14);
    let date_added = format!(
        "{} {}, {}",
        MONTHS[rng.below(12)],
        1 + rng.below(28),
        year_added
    );
    let release_year = year_added - rng.below(10);

    let (rating, duration, genres) = if is_movie {
        let minutes = rng.gauss(100.0, 25.0).clamp(3.0, 312.0) as u32;
        (
            rng.pick(&MOVIE_RATINGS),
            format!("{minutes} min"),
            [rng.pick(&MOVIE_GENRES), rng.pick(&MOVIE_GENRES)],
        )
    } else {
        let seasons = 1 + rng.below(5);
        let unit = if seasons == 1 { "Season" } else { "Seasons" };
        (
            rng.pick(&SHOW_RATINGS),
            format!("{seasons} {unit}"),
            [rng.pick(&SHOW_GENRES), rng.pick(&SHOW_GENRES)],
        )
    };
    let listed_in = if genres[0] == genres[1] {
        genres[0].to_string()
    } else {
        genres.join(", ")
    };

    let director = rng.pick(&DIRECTORS).to_string();
    let country = rng.pick(&COUNTRIES).to_string();

    // Sprinkle in the gaps a real export has.
    vec![
        Some(format!("s{}", id + 1)),
        Some(if is_movie { "Movie" } else { "TV Show" }.to_string()),
        Some(title),
        rng.maybe(if is_movie { 0.2 } else { 0.9 }, director),
        rng.maybe(0.1, "Various Artists".to_string()),
        rng.maybe(0.1, country),
        rng.maybe(0.02, date_added),
        Some(release_year.to_string()),
        rng.maybe(0.01, rating.to_string()),
        rng.maybe(0.005, duration),
        Some(listed_in),
        Some(format!("Synthetic title number {}.", id + 1)),
    ]
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let n_titles = 2000;

    let rows: Vec<Vec<Option<String>>> = (0..n_titles).map(|i| generate_row(i, &mut rng)).collect();

    // Write CSV
    let csv_path = "sample_catalog.csv";
    let mut writer = csv::Writer::from_path(csv_path).expect("Failed to create CSV file");
    writer.write_record(COLUMNS).expect("Failed to write CSV header");
    for row in &rows {
        writer
            .write_record(row.iter().map(|c| c.as_deref().unwrap_or("")))
            .expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV file");

    // Build Arrow arrays, one nullable string column per catalog field
    let schema = Arc::new(Schema::new(
        COLUMNS
            .iter()
            .map(|name| Field::new(*name, DataType::Utf8, true))
            .collect::<Vec<_>>(),
    ));

    let arrays = (0..COLUMNS.len())
        .map(|col| {
            let values: Vec<Option<&str>> = rows.iter().map(|r| r[col].as_deref()).collect();
            Arc::new(StringArray::from(values)) as arrow::array::ArrayRef
        })
        .collect();

    let batch = RecordBatch::try_new(schema.clone(), arrays).expect("Failed to create RecordBatch");

    // Write Parquet
    let parquet_path = "sample_catalog.parquet";
    let file = std::fs::File::create(parquet_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!("Wrote {n_titles} titles to {csv_path} and {parquet_path}");
}
