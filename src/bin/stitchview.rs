/// stitchview CLI - Design record extraction and TrueView previews
///
/// Usage:
///   stitchview record <input> [options]   - Build the JSON design record
///   stitchview preview <input> [options]  - Render a TrueView PNG preview
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use stitchview::prelude::*;
use stitchview::render::render_png;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = &args[1];

    let result = match command.as_str() {
        "record" => {
            if args.len() < 3 {
                eprintln!("Error: record requires <input> argument");
                print_usage();
                process::exit(1);
            }
            run_record(&args[2], &args[3..])
        },
        "preview" => {
            if args.len() < 3 {
                eprintln!("Error: preview requires <input> argument");
                print_usage();
                process::exit(1);
            }
            run_preview(&args[2], &args[3..])
        },
        "version" => {
            println!("stitchview v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        },
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        },
        _ => {
            eprintln!("Error: Unknown command '{}'", command);
            print_usage();
            process::exit(1);
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn print_usage() {
    println!(
        "stitchview - Embroidery Design Inspector v{}",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    stitchview <COMMAND> [ARGS]");
    println!();
    println!("COMMANDS:");
    println!("    record <input>     Build the JSON design record");
    println!("        -o <file>          Output path (default: <input>.json)");
    println!("        --no-preview       Skip the embedded preview payload");
    println!("        --cache <file>     Needle cache file (default: needle_cache.json)");
    println!("        --no-cache         Disable the needle cache");
    println!("        -v, --verbose      Print a summary after conversion");
    println!("    preview <input>    Render a TrueView PNG preview");
    println!("        -o <file>          Output path (default: <input>.png)");
    println!("        --background <c>   #RRGGBB, #AARRGGBB, or a color name");
    println!("        --linewidth <n>    Stroke width in pixels (default: 2)");
    println!("        --scale <f>        Fixed scale instead of auto-fit");
    println!("        --margin <n>       Margin in pixels (default: 20)");
    println!("        --max-size <n>     Max rendered dimension (default: 1200)");
    println!("        --native-size      Render at the 0.35 baseline scale");
    println!("        --base64           Also print the PNG as base64");
    println!("    version            Show version information");
    println!("    help               Show this help message");
    println!();
    println!("EXAMPLES:");
    println!("    stitchview record design.json -o design-record.json");
    println!("    stitchview preview design.json --background white --native-size");
}

fn take_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str> {
    *i += 1;
    args.get(*i)
        .map(|s| s.as_str())
        .ok_or_else(|| Error::UnsupportedFormat(format!("{} requires a value", flag)))
}

fn run_record(input: &str, args: &[String]) -> Result<()> {
    let mut output: Option<PathBuf> = None;
    let mut include_preview = true;
    let mut cache_path: Option<PathBuf> = Some(PathBuf::from("needle_cache.json"));
    let mut verbose = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => output = Some(PathBuf::from(take_value(args, &mut i, "-o")?)),
            "--no-preview" => include_preview = false,
            "--cache" => cache_path = Some(PathBuf::from(take_value(args, &mut i, "--cache")?)),
            "--no-cache" => cache_path = None,
            "-v" | "--verbose" => verbose = true,
            other => {
                return Err(Error::UnsupportedFormat(format!(
                    "Unknown record option: {}",
                    other
                )))
            },
        }
        i += 1;
    }

    let output = output.unwrap_or_else(|| {
        let default = Path::new(input).with_extension("json");
        // Never clobber the input when it is itself a .json design
        if default == Path::new(input) {
            Path::new(input).with_extension("record.json")
        } else {
            default
        }
    });

    let library = JsonPatternLibrary::new();
    let options = ProcessOptions {
        include_preview,
        cache_path,
        ..ProcessOptions::default()
    };
    let record = DesignProcessor::new(&library)
        .with_options(options)
        .process(input)?;

    let mut file = fs::File::create(&output)?;
    record.write_json(&mut file)?;

    println!("Wrote {}", output.display());

    if verbose {
        println!();
        println!("Design: {}", record.file_info.filename);
        println!("  Stitches: {}", record.file_info.stitch_count);
        println!(
            "  Dimensions: {} x {} mm",
            record.file_info.width_mm, record.file_info.height_mm
        );
        println!("  Colors: {}", record.file_info.color_count);
        for color in &record.colors {
            let needle = color
                .needle_number
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string());
            println!(
                "  {:2}. Code {:>6}  Needle {:>2}  {} ({})",
                color.sequence, color.code, needle, color.name, color.chart
            );
        }
    }

    Ok(())
}

fn run_preview(input: &str, args: &[String]) -> Result<()> {
    let mut output: Option<PathBuf> = None;
    let mut settings = RenderSettings::default();
    let mut base64_out = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => output = Some(PathBuf::from(take_value(args, &mut i, "-o")?)),
            "--background" => {
                settings.background = Some(take_value(args, &mut i, "--background")?.to_string())
            },
            "--linewidth" => {
                settings.line_width = parse_number(take_value(args, &mut i, "--linewidth")?)?
            },
            "--scale" => {
                settings.scale = Some(
                    take_value(args, &mut i, "--scale")?
                        .parse::<f64>()
                        .map_err(|_| Error::UnsupportedFormat("Invalid --scale".to_string()))?,
                )
            },
            "--margin" => settings.margin = parse_number(take_value(args, &mut i, "--margin")?)?,
            "--max-size" => {
                settings.max_size = parse_number(take_value(args, &mut i, "--max-size")?)?
            },
            "--native-size" => settings.native_size = true,
            "--base64" => base64_out = true,
            other => {
                return Err(Error::UnsupportedFormat(format!(
                    "Unknown preview option: {}",
                    other
                )))
            },
        }
        i += 1;
    }

    let output = output.unwrap_or_else(|| Path::new(input).with_extension("png"));

    let library = JsonPatternLibrary::new();
    let design = Loader::new(&library).load(input)?;
    let png = render_png(&design.pattern, &settings)?;

    fs::write(&output, &png)?;
    println!("Wrote {}", output.display());

    if base64_out {
        use base64::engine::general_purpose::STANDARD;
        use base64::Engine as _;
        println!("{}", STANDARD.encode(&png));
    }

    Ok(())
}

fn parse_number(value: &str) -> Result<u32> {
    value
        .parse::<u32>()
        .map_err(|_| Error::UnsupportedFormat(format!("Invalid numeric option: {}", value)))
}
