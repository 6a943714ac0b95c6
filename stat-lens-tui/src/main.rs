mod tui;

use clap::{Args, Parser, Subcommand};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, path::{Path, PathBuf}, time::Duration};
use tui::app::App;
use tui::events::handle_key;
use tui::ui::render;
use stat_lens_common::Config;
use stat_lens_core::{
    compute_with, export_csv, export_json, parse, print_summary, profile_columns, read_csv_file,
    write_png, ColumnReport, PngHistogramRenderer, StatisticsRecord,
};

#[derive(Parser)]
#[command(name = "stat-lens", version, about = "Descriptive statistics and confidence intervals with an annotated histogram")]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct OutputArgs {
    /// Write the histogram PNG here
    #[arg(long)]
    png: Option<PathBuf>,
    /// Print the histogram as a data URI
    #[arg(long)]
    data_uri: bool,
    /// Write the record as JSON here
    #[arg(long)]
    json: Option<PathBuf>,
    /// Leave the embedded image out of the JSON
    #[arg(long)]
    no_image: bool,
    /// Open the result in the terminal viewer
    #[arg(long)]
    view: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Comma-separated numbers, e.g. "1, 2, 3"
    Manual {
        text: String,
        #[command(flatten)]
        out: OutputArgs,
    },
    /// One numeric column of a CSV file
    Csv {
        path: PathBuf,
        #[arg(long)]
        column: String,
        #[command(flatten)]
        out: OutputArgs,
    },
    /// Every column (or the listed ones) of a CSV file
    Columns {
        path: PathBuf,
        #[arg(long, value_delimiter = ',')]
        columns: Option<Vec<String>>,
        /// CSV summary destination (default: <export.output_dir>/summary.csv)
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        view: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
    let config = Config::load().unwrap_or_default();
    let renderer = PngHistogramRenderer::new(config.render.clone());
    match cli.command {
        Commands::Manual { text, out } => {
            let data = parse(&text)?;
            let record = compute_with(&data, &renderer)?;
            emit(record, "input".into(), "manual input".into(), &out, config)?
        }
        Commands::Csv { path, column, out } => {
            let table = read_csv_file(&path)?;
            let data = table.column(&column)?;
            let record = compute_with(&data, &renderer)?;
            emit(record, column.trim().to_string(), path.display().to_string(), &out, config)?
        }
        Commands::Columns { path, columns, output, view } => {
            run_columns(&path, columns, output, view, &renderer, config)?
        }
    }
    Ok(())
}

fn emit(record: StatisticsRecord, column: String, source: String, out: &OutputArgs, config: Config) -> anyhow::Result<()> {
    if let Some(png) = &out.png {
        ensure_parent(png)?;
        write_png(png, &record)?;
        eprintln!("Histogram written to {}", png.display());
    }
    if let Some(json) = &out.json {
        ensure_parent(json)?;
        export_json(json, &record, !out.no_image)?;
        eprintln!("Exported to {}", json.display());
    }
    if out.view {
        let reports = vec![ColumnReport { column, outcome: Ok(record) }];
        return run_tui(App::new(source, reports, config));
    }
    print_summary(&record, config.display.decimals);
    if out.data_uri {
        println!("{}", record.histogram());
    }
    Ok(())
}

fn run_columns(
    path: &Path,
    columns: Option<Vec<String>>,
    output: Option<PathBuf>,
    view: bool,
    renderer: &PngHistogramRenderer,
    config: Config,
) -> anyhow::Result<()> {
    let table = read_csv_file(path)?;
    let reports = profile_columns(&table, columns.as_deref(), renderer);
    if reports.iter().all(|r| r.outcome.is_err()) {
        for r in &reports {
            if let Err(msg) = &r.outcome { eprintln!("{}: {msg}", r.column); }
        }
        anyhow::bail!("no column of {} produced statistics", path.display());
    }
    let out_path = output.unwrap_or_else(|| Path::new(&config.export.output_dir).join("summary.csv"));
    ensure_parent(&out_path)?;
    export_csv(&out_path, &reports)?;
    println!("Exported to {}", out_path.display());
    if view {
        return run_tui(App::new(path.display().to_string(), reports, config));
    }
    for r in &reports {
        match &r.outcome {
            Ok(rec) => println!("{:<24} n={:<6} mean={:.4} sd={:.4}", r.column, rec.count(), rec.mean(), rec.std_dev()),
            Err(msg) => println!("{:<24} {msg}", r.column),
        }
    }
    Ok(())
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() { std::fs::create_dir_all(parent)?; }
    }
    Ok(())
}

fn run_tui(mut app: App) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let tick = Duration::from_millis(66); // 15Hz
    loop {
        terminal.draw(|f| render(f, &app))?;
        if event::poll(tick)? {
            if let Event::Key(key) = event::read()? { handle_key(&mut app, key); }
        }
        if app.should_quit { break; }
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
