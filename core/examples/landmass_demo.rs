use landmass_core::render::format_symbols;
use landmass_core::{RandomSource, TerrainParams, generate};

fn main() -> Result<(), landmass_core::TerrainError> {
    // 60×24 island chain, seed 2025
    let params = TerrainParams {
        width: 60,
        height: 24,
        water_level: 110,
        radius: 6,
        power: 12,
        deposits: 90,
    };
    let landmass = generate(&params, &mut RandomSource::new(2025))?;

    println!("max raw elevation: {}", landmass.normalized.source_max());
    print!("{}", format_symbols(&landmass.symbols));
    Ok(())
}
