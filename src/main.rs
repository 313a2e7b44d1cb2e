use std::fs;

use partcost::costing::{mass_breakdown, Material};
use partcost::features;
use partcost::geometry::{GeometryError, Solid};
use partcost::stock::{self, StockDimensions};
use partcost::tools::{ToolLibrary, ToolLibraryError};

#[derive(Debug)]
enum Error {
    Io(std::io::Error),
    Geometry(GeometryError),
    Tools(ToolLibraryError),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<GeometryError> for Error {
    fn from(e: GeometryError) -> Self {
        Error::Geometry(e)
    }
}

impl From<ToolLibraryError> for Error {
    fn from(e: ToolLibraryError) -> Self {
        Error::Tools(e)
    }
}

fn main() -> Result<(), Error> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: partcost <part.json> [tools.csv]");
        eprintln!();
        eprintln!("Example:");
        eprintln!("  partcost part.json tools.csv");
        std::process::exit(1);
    }

    let part_path = &args[1];
    let tools_path = args.get(2).map(|s| s.as_str());

    // Load the part snapshot
    let json = fs::read_to_string(part_path)?;
    let solid = Solid::from_json(&json)?;

    // Detect milling features
    let detected = features::detect(&solid);

    println!("=== Milling features ===");
    println!("Horizontal planes:  {}", detected.planes.len());
    println!("Vertical flanks:    {}", detected.flanks.len());
    println!("Cylindrical holes:  {}", detected.holes.len());

    for (i, plane) in detected.planes.iter().enumerate() {
        println!(
            "[Plane {}] Z={} area={:.1} mm² ({})",
            i + 1,
            plane.z,
            plane.area,
            plane.kind
        );
    }
    for (i, hole) in detected.holes.iter().enumerate() {
        println!(
            "[Hole {}] Ø={} mm XY=({}, {}) Ztop={} Zbottom={} ({})",
            i + 1,
            2.0 * hole.radius,
            hole.center.x,
            hole.center.y,
            hole.ztop,
            hole.zbottom,
            hole.kind
        );
    }

    // Propose a stock blank
    let spec = stock::propose(&solid);
    println!();
    println!("=== Stock proposal ===");
    println!("Type: {} ({})", spec.stock_type, spec.orientation);
    match spec.dimensions {
        StockDimensions::Block {
            length,
            width,
            height,
        } => println!("Block {:.1} x {:.1} x {:.1} mm", length, width, height),
        StockDimensions::Cylinder { diameter, height } => {
            println!("Cylinder Ø{:.1} x {:.1} mm", diameter, height)
        }
    }
    println!(
        "Origin: ({:.1}, {:.1}, {:.1})",
        spec.origin.x, spec.origin.y, spec.origin.z
    );

    // Part mass per material
    println!();
    println!("=== Part mass ===");
    for material in Material::ALL {
        let masses = mass_breakdown(solid.volume, None, material);
        println!("{:<10} {:.3} kg", material.to_string(), masses.part_kg);
    }

    // Optional tool library summary
    if let Some(path) = tools_path {
        let library = ToolLibrary::from_csv_path(path)?;
        println!();
        println!("=== Tool library ===");
        for name in library.names() {
            if let Some(tool) = library.get(&name) {
                println!(
                    "{:<24} Ø{:.1} Z{} Vc={:.0} Fz={:.3}",
                    tool.name, tool.diameter, tool.teeth, tool.vc, tool.fz
                );
            }
        }
        if library.skipped_rows() > 0 {
            eprintln!(
                "warning: {} malformed tool row(s) skipped",
                library.skipped_rows()
            );
        }
    }

    Ok(())
}
