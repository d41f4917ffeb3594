use std::io::{self, Write};

use anyhow::{Context, Result};
use brickset::data::query::lookup;
use brickset::LegoSetRepository;
use log::info;

fn main() -> Result<()> {
    env_logger::init();

    let repository = LegoSetRepository::bundled().context("loading bundled brickset")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "{}", repository.has_set_without_subtheme())?;
    repository.print_distinct_tags_starting_with("F", &mut out)?;
    writeln!(out, "Total pieces of the lego sets: {}", repository.total_pieces())?;

    let count_by_theme = repository.count_by_theme();
    writeln!(out, "Number of Duplo sets: {}", lookup(&count_by_theme, "Duplo")?)?;

    let longest_name_by_theme = repository.longest_name_by_theme();
    writeln!(
        out,
        "Longest name of the Duplo theme: {}",
        lookup(&longest_name_by_theme, "Duplo")?
    )?;

    info!("queried {} lego sets", repository.len());
    Ok(())
}
