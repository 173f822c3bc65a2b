// main.rs - CLI entry point

use std::path::Path;
use std::time::Instant;
use groupdist::cli::Config;
use groupdist::prelude::*;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<(), String> {
    let mut args: Args = argh::from_env();
    let command_line = std::env::args().collect::<Vec<String>>().join(" ");

    // Handle generate config first
    if args.generate_config {
        let sample_config = Config::generate_sample();
        println!("{}", sample_config);
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args.with_config_file(&config_path)?;
    }

    let distances = args.distances.clone().ok_or("--distances is required")?;
    let groups = args.groups.clone().ok_or("--groups is required")?;
    let output = if args.dry_run {
        None
    } else {
        Some(args.output.clone().ok_or("--output is required")?)
    };

    println!("🚀 groupdist v{}", env!("CARGO_PKG_VERSION"));

    let validation_result = validate_args(&args)?;

    // Configure thread pool
    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
        println!("🧵 Threads: {}", n);
    } else {
        println!("🧵 Threads: {} (auto-detected)", rayon::current_num_threads());
    }

    let total_start = Instant::now();

    let matrix = DistanceMatrix::from_file(Path::new(&distances), validation_result.matrix_format)
        .map_err(|e| format!("loading distance matrix: {}", e))?;

    let mut table = GroupingTable::from_file(Path::new(&groups), validation_result.delimiter)
        .map_err(|e| format!("loading grouping table: {}", e))?;

    table.apply_exclusions(
        validation_result.sample_exclude_regex.as_ref(),
        validation_result.samples_exclude_set.as_ref(),
    );

    if args.drop_missing {
        let dropped = table.drop_missing(&matrix);
        for id in dropped.iter().take(10) {
            println!("  • {}", id);
        }
        if dropped.len() > 10 {
            println!("  ... and {} more", dropped.len() - 10);
        }
    }

    println!("\n🔄 Summarizing pairwise distances by group...");
    let summary = summarize_with(&matrix, &table, &validation_result.summary_options)
        .map_err(|e| e.to_string())?;

    for warning in &summary.warnings {
        println!("⚠️  Warning: {}", warning);
    }

    let intra = summary.records.iter().filter(|r| r.is_intra_group()).count();
    println!(
        "✅ {} comparisons ({} intra-group, {} inter-group)",
        summary.records.len(),
        intra,
        summary.records.len() - intra
    );

    let Some(output_path) = output else {
        println!("✅ Dry run completed successfully");
        return Ok(());
    };

    write_summary(
        &output_path,
        validation_result.output_format,
        &summary.records,
        &validation_result.render_options,
        &command_line,
    )?;

    let total_elapsed = total_start.elapsed();
    println!("\n🎉 === GROUPDIST COMPLETED SUCCESSFULLY ===");
    println!(
        "⏱️  Total execution time: {:.2}s",
        total_elapsed.as_secs_f64()
    );
    println!("📁 Output written to: {}", output_path);
    println!("🔧 Command: {}", command_line);

    Ok(())
}
