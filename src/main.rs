use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use prettytable::{row, Table};
use std::time::Instant;

use seqmerge::cli::Args;
use seqmerge::compositing::{
    layout_options, save_composite, white_to_transparent, LayoutOption, MergeConfig, MergeEngine,
};
use seqmerge::utils::{create_progress_bar, format_duration, validate_inputs, verbose_println};

fn main() -> Result<()> {
    let start_time = Instant::now();
    let mut args = Args::parse();
    args.load_and_merge_config()?;

    // Print banner
    println!("{}", style("Sequence Image Merger").bold().blue());
    println!(
        "{}",
        style("Grid compositor for numbered image folders").dim()
    );
    println!();

    validate_inputs(&args)?;

    let input_dir = args.input_dir.clone().context(
        "No input directory given. Pass -i <DIR> or set inputPath in the config file",
    )?;

    let config = MergeConfig {
        extensions: args.extensions(),
        verbose: args.verbose,
    };

    if config.verbose {
        println!("{}", style("Configuration:").bold());
        println!("  Input directory: {}", input_dir.display());
        println!("  Output path: {}", args.output_path.display());
        println!("  Extensions: {:?}", config.extensions);
        println!("  Reverse order: {}", args.reverse);
        println!("  Auto-fill blanks: {}", args.auto_fill);
        println!("  White to transparent: {}", args.white_to_transparent);
        if args.dry_run {
            println!("  Dry run mode: enabled (no files will be written)");
        }
        println!();
    }

    let engine = MergeEngine::new(config);

    // Discover and order the source files
    let files = engine.discover_images(&input_dir)?;
    println!(
        "{}",
        style(format!("✓ Found {} images", files.len())).green()
    );

    let options = layout_options(files.len());

    if args.list_layouts {
        println!();
        print_layout_table(&options, files.len());
        return Ok(());
    }

    let layout = match args.parse_layout().map_err(anyhow::Error::msg)? {
        Some(layout) => layout,
        // Options are ranked most compact first; the head is the default.
        None => *options
            .first()
            .context("no layout available for this image count")?,
    };
    verbose_println(
        args.verbose,
        &format!(
            "Using layout {} ({} cells, {} blank)",
            layout,
            layout.cell_count(),
            layout.blank_cells(files.len())
        ),
    );

    if args.dry_run {
        let first = engine.load_asset(&files[0])?;
        let (cell_w, cell_h) = first.dimensions();
        println!();
        println!("{}", style("Dry Run Summary:").bold().cyan());
        println!("  Source images: {}", style(files.len()).bold());
        println!("  Grid: {} rows x {} columns", layout.rows, layout.cols);
        println!("  Cell size: {}x{} (from the first image)", cell_w, cell_h);
        println!(
            "  Would write a {}x{} composite to: {}",
            layout.cols * cell_w,
            layout.rows * cell_h,
            args.output_path.display()
        );
        println!();
        println!("{}", style("💡 Remove --dry-run to write the file").yellow());
        return Ok(());
    }

    // Decode every source into the in-memory asset cache
    let pb = create_progress_bar(files.len() as u64);
    pb.set_message("Decoding images");
    let mut assets = Vec::with_capacity(files.len());
    for path in &files {
        assets.push(engine.load_asset(path)?);
        pb.inc(1);
    }
    pb.finish_with_message("✓ All images decoded");

    let mut merged = if args.reverse {
        engine.reverse_and_composite(&mut assets, layout)?
    } else {
        engine.composite(&assets, layout)?
    };

    if args.auto_fill {
        verbose_println(args.verbose, "Filling blank cells with the first image");
        merged = engine.auto_fill(&merged, &assets, layout)?;
    }

    if args.white_to_transparent {
        verbose_println(args.verbose, "Recoloring pure white to transparent");
        merged = white_to_transparent(&merged);
    }

    save_composite(&merged, &args.output_path).with_context(|| {
        format!(
            "Failed to save composite to {}",
            args.output_path.display()
        )
    })?;

    // Print results summary
    let (cell_w, cell_h) = assets[0].dimensions();
    println!();
    println!("{}", style("Results Summary:").bold().green());
    println!("  Source images: {}", style(assets.len()).bold());
    println!("  Cell size: {}x{}", cell_w, cell_h);
    println!(
        "  Grid: {} rows x {} columns ({} cells, {} blank)",
        layout.rows,
        layout.cols,
        layout.cell_count(),
        layout.blank_cells(assets.len())
    );
    println!(
        "  Composite size: {}x{}",
        merged.width(),
        merged.height()
    );
    println!("  Output: {}", style(args.output_path.display()).bold());

    println!();
    println!("{}", style("Performance:").bold().blue());
    println!(
        "  Total time: {}",
        style(format_duration(start_time.elapsed())).bold()
    );

    Ok(())
}

/// Render the ranked layout choices the way the folder's image count
/// allows them, most compact first.
fn print_layout_table(options: &[LayoutOption], count: usize) {
    println!(
        "{}",
        style(format!("Layout options for {} images:", count)).bold()
    );

    let mut table = Table::new();
    table.add_row(row!["#", "Rows", "Columns", "Cells", "Blank cells"]);
    for (rank, option) in options.iter().enumerate() {
        table.add_row(row![
            rank + 1,
            option.rows,
            option.cols,
            option.cell_count(),
            option.blank_cells(count)
        ]);
    }
    table.printstd();

    println!();
    println!(
        "{}",
        style("Pass --layout ROWSxCOLS to pick one; the first is used by default").dim()
    );
}
