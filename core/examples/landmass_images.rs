// Saves two 128×128 previews of the same landmass:
// terrain bands (flat colour per symbol)
// normalized heights (gradient)

use image::{RgbImage, Rgb};
use landmass_core::render::{heights_to_rgb, symbols_to_image};
use landmass_core::{RandomSource, TerrainParams, generate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let size = 128;
    let params = TerrainParams {
        width: size,
        height: size,
        water_level: 100,
        radius: 10,
        power: 20,
        deposits: 400,
    };
    let landmass = generate(&params, &mut RandomSource::new(42))?;

    // 1) Terrain bands
    symbols_to_image(&landmass.symbols, 4).save("landmass_bands.png")?;
    println!("Saved landmass_bands.png");

    // 2) Normalized heights
    let rgb = heights_to_rgb(&landmass.normalized);
    let img = RgbImage::from_fn(size as u32, size as u32, |x, y| {
        let i = (y as usize * size + x as usize) * 3;
        Rgb([rgb[i], rgb[i + 1], rgb[i + 2]])
    });
    img.save("landmass_heights.png")?;
    println!("Saved landmass_heights.png");
    Ok(())
}
