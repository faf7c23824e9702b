//! Command-line interface for generating terrain maps

use crate::algorithm::collapse::CollapseMode;
use crate::algorithm::session::{GeneratedMap, MapSession};
use crate::analysis::patterns::ExamplePattern;
use crate::analysis::statistics::DistributionReport;
use crate::io::configuration::{
    DEFAULT_CELL_SIZE, DEFAULT_HEIGHT, DEFAULT_MAX_ATTEMPTS, DEFAULT_SEED, DEFAULT_WIDTH,
    GenerationConfig, base_tile_index,
};
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::io::image::{category_color, export_preview_png};
use crate::io::progress::ProgressManager;
use crate::spatial::direction::Direction;
use clap::Parser;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "wavetile")]
#[command(
    author,
    version,
    about = "Generate terrain maps by wave function collapse over an example pattern"
)]
/// Command-line arguments for the map generator
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Map width in cells
    #[arg(short = 'W', long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Map height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Collapse policy
    #[arg(short, long, value_enum, default_value = "base")]
    pub mode: CollapseMode,

    /// Attempts allowed before giving up on contradictions
    #[arg(short = 'a', long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,

    /// Example pattern text file (one row per line, one label per character)
    #[arg(short, long, value_name = "FILE")]
    pub pattern: Option<PathBuf>,

    /// Number of maps to generate
    #[arg(short, long, default_value_t = 1)]
    pub count: usize,

    /// Write a PNG preview to this path
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Edge length of one cell in the PNG preview
    #[arg(long, default_value_t = DEFAULT_CELL_SIZE)]
    pub cell_size: u32,

    /// Skip the decoration pass
    #[arg(long)]
    pub no_decorations: bool,

    /// Print rules, example frequencies and output distribution
    #[arg(long)]
    pub stats: bool,

    /// Suppress progress and log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Log level selected by `--verbose`, or `None` when quiet
    pub const fn log_level(&self) -> Option<Level> {
        if self.quiet {
            return None;
        }
        Some(match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        })
    }

    /// Generation configuration from the arguments
    pub const fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            width: self.width,
            height: self.height,
            mode: self.mode,
            max_attempts: self.max_attempts,
        }
    }
}

/// Runs a session for the requested number of maps and writes the results
pub struct MapProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl MapProcessor {
    /// Create a new map processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Generate maps according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern cannot be loaded, generation fails, or
    /// a preview cannot be written
    // Allow print for the generated maps, which are the program's output
    #[allow(clippy::print_stdout)]
    pub fn process(&mut self) -> Result<()> {
        if self.cli.count == 0 {
            return Err(invalid_parameter("count", &0, &"must be at least 1"));
        }

        let pattern = self.load_pattern()?;
        let mut session = MapSession::new(pattern, self.cli.generation_config(), self.cli.seed)?
            .with_decorating(!self.cli.no_decorations);

        if self.cli.stats {
            print!("{}", describe_rules(&session));
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(self.cli.count);
        }

        for index in 0..self.cli.count {
            let start_time = Instant::now();
            let total = self.cli.width * self.cli.height;
            if let Some(ref mut pm) = self.progress_manager {
                pm.start_map(index, format!("map {}", index + 1), total);
            }

            match self.progress_manager.as_mut() {
                Some(pm) => {
                    session.regenerate_observed(&mut |report| pm.update_step(index, report))?;
                }
                None => {
                    session.regenerate()?;
                }
            }
            let Some(map) = session.current() else {
                continue;
            };

            if let Some(ref mut pm) = self.progress_manager {
                pm.complete_map(index, start_time.elapsed());
            }

            println!("{}", render_text(map));
            if self.cli.stats {
                println!("{}", DistributionReport::new(session.frequencies(), &map.grid));
            }

            if let Some(ref output) = self.cli.output {
                let path = Self::output_path(output, index, self.cli.count);
                export_preview_png(&map.grid, &map.decorations, self.cli.cell_size, &path)?;
            }
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn load_pattern(&self) -> Result<ExamplePattern> {
        match &self.cli.pattern {
            Some(path) => {
                let text =
                    std::fs::read_to_string(path).map_err(|e| AlgorithmError::FileSystem {
                        path: path.clone(),
                        operation: "read pattern",
                        source: e,
                    })?;
                ExamplePattern::parse(&text)
            }
            None => Ok(ExamplePattern::terrain()),
        }
    }

    /// Output path for map `index` of `count`, suffixing the stem in batches
    pub fn output_path(output: &Path, index: usize, count: usize) -> PathBuf {
        if count <= 1 {
            return output.to_path_buf();
        }

        let stem = output.file_stem().unwrap_or_default().to_string_lossy();
        let name = match output.extension() {
            Some(extension) => format!("{stem}_{index:03}.{}", extension.to_string_lossy()),
            None => format!("{stem}_{index:03}"),
        };

        match output.parent() {
            Some(parent) => parent.join(name),
            None => PathBuf::from(name),
        }
    }
}

/// Text rendering of a map: one label per cell, lowercase where decorated
pub fn render_text(map: &GeneratedMap) -> String {
    let mut out = String::with_capacity(map.grid.rows() * (map.grid.cols() + 1));
    for row in 0..map.grid.rows() {
        for col in 0..map.grid.cols() {
            if let Some(category) = map.grid.get([row, col]) {
                let label = category.label();
                if map.decorations.get([row, col]).is_some() {
                    out.extend(label.to_lowercase());
                } else {
                    out.push(label);
                }
            }
        }
        out.push('\n');
    }
    let _ = write!(
        out,
        "seed {} | {} attempt(s) | {} decoration(s)",
        map.seed,
        map.attempts,
        map.decorations.len()
    );
    out
}

/// Rule table with example counts, tile indices and preview colours
pub fn describe_rules(session: &MapSession) -> String {
    let rules = session.rules();
    let frequencies = session.frequencies();
    let mut out = String::new();

    let _ = writeln!(out, "mode: {}", session.mode());
    for &category in rules.alphabet().categories() {
        let tile = base_tile_index(category).map_or_else(|| "-".to_string(), |t| t.to_string());
        let [r, g, b, _] = category_color(category);
        let _ = writeln!(
            out,
            "{category}: count {} | tile {tile} | colour #{r:02x}{g:02x}{b:02x}",
            frequencies.count(category)
        );
        for direction in Direction::ALL {
            let allowed: String = rules
                .allowed_categories(category, direction)
                .iter()
                .map(ToString::to_string)
                .collect();
            let _ = writeln!(out, "  {direction:?}: {{{allowed}}}");
        }
    }
    out
}
