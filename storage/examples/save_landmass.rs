use landmass_core::{RandomSource, TerrainParams, generate};
use landmass_storage::TextStore;
use landmass_storage::models::DumpKind;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate a 60×30 landmass with a fixed seed
    let params = TerrainParams {
        width: 60,
        height: 30,
        deposits: 120,
        ..TerrainParams::default()
    };
    let landmass = generate(&params, &mut RandomSource::new(2025))?;

    // Dump the three grids next to each other
    let store = TextStore::init("landmass_out")?;
    let report = store.save_landmass(&landmass);
    for path in &report.saved {
        println!("Map saved to {}", path.display());
    }
    for (path, e) in &report.failed {
        println!("Failed to save the map to {}: {e}", path.display());
    }

    // Read the symbol grid back
    let symbols = store.load_symbols()?;
    println!(
        "Round-trip {}: {} rows in {}",
        if symbols == landmass.symbols { "ok" } else { "MISMATCH" },
        symbols.height(),
        store.path_for(DumpKind::Final).display()
    );
    Ok(())
}
