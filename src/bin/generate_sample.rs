use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use brickset::LegoSet;
use log::info;

const DEFAULT_OUTPUT: &str = "sample_brickset.json";
const DEFAULT_COUNT: usize = 200;

const THEMES: [(&str, &[&str]); 5] = [
    ("City", &["Fire", "Police", "Trains", "Space"]),
    ("Duplo", &["Town", "Learning"]),
    ("Technic", &["Construction", "Racing"]),
    ("Star Wars", &["Original Trilogy", "Sequel Trilogy"]),
    ("Friends", &["Camping"]),
];
const ADJECTIVES: [&str; 8] = [
    "Fire", "Forest", "Deluxe", "Mini", "Family", "Ultimate", "Harbour", "Mountain",
];
const NOUNS: [&str; 8] = [
    "Station", "Truck", "House", "Cruiser", "Crane", "Tower", "Outpost", "Rescue Team",
];
const TAGS: [&str; 10] = [
    "vehicle", "building", "rescue", "licensed", "display", "animals", "train", "house",
    "remote control", "toddler",
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

    /// Uniform index in `0..n`.
    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    /// True with probability `percent / 100`.
    fn chance(&mut self, percent: u64) -> bool {
        self.next_u64() % 100 < percent
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }
}

fn generate_set(rng: &mut SimpleRng) -> LegoSet {
    let (theme, subthemes) = THEMES[rng.below(THEMES.len())];
    let name = format!("{} {}", rng.pick(&ADJECTIVES), rng.pick(&NOUNS));
    let mut set = LegoSet::new(name, theme);

    // Roughly one in five sets has no subtheme, piece count or tags.
    if !rng.chance(20) {
        set = set.with_subtheme(rng.pick(subthemes));
    }
    if !rng.chance(20) {
        set = set.with_pieces(20 + rng.below(4000) as u32);
    }
    if !rng.chance(20) {
        let n_tags = 1 + rng.below(3);
        let tags: BTreeSet<&str> = (0..n_tags).map(|_| rng.pick(&TAGS)).collect();
        set = set.with_tags(tags);
    }
    set
}

/// Serialize `sets` as pretty JSON and flush the writer.
fn write_sets<W: Write>(mut writer: W, sets: &[LegoSet]) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, sets).context("serializing lego sets")?;
    writer.flush().context("flushing output")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let output_path = args.next().unwrap_or_else(|| DEFAULT_OUTPUT.to_string());
    let count = match args.next() {
        Some(raw) => raw
            .parse::<usize>()
            .with_context(|| format!("'{raw}' is not a valid record count"))?,
        None => DEFAULT_COUNT,
    };

    let mut rng = SimpleRng::new(42);
    let sets: Vec<LegoSet> = (0..count).map(|_| generate_set(&mut rng)).collect();

    let file = File::create(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    write_sets(BufWriter::new(file), &sets)
        .with_context(|| format!("writing {output_path}"))?;

    info!("generated {} lego sets", sets.len());
    println!("Wrote {} lego sets to {output_path}", sets.len());
    Ok(())
}
