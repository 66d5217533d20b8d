use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::info;
use tracktools::board::{ActionReport, Board};
use tracktools::settings::{Config, FenceForm};
use tracktools::{
    fence_selected_tracks, init_logging_with, square_selected_tracks, DedupSeed, FenceOptions,
    LogFormat, ViaType,
};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Emit log records as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replace selected tracks with square-ended filled polygons
    Square {
        /// Board file (JSON)
        #[arg(value_name = "BOARD")]
        board: PathBuf,

        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Place a via fence along both sides of selected tracks
    Fence {
        /// Board file (JSON)
        #[arg(value_name = "BOARD")]
        board: PathBuf,

        /// Settings file (JSON or TOML); defaults to the user config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Via pad diameter, in the configured unit
        #[arg(long, value_name = "LENGTH", allow_hyphen_values = true)]
        via_diameter: Option<String>,

        /// Via drill diameter, in the configured unit
        #[arg(long, value_name = "LENGTH", allow_hyphen_values = true)]
        via_drill: Option<String>,

        /// Track-to-via clearance, in the configured unit; may be negative
        #[arg(long, value_name = "LENGTH", allow_hyphen_values = true)]
        clearance: Option<String>,

        /// Use the selected net's zone clearance instead of --clearance
        #[arg(long, conflicts_with = "clearance")]
        zone_clearance: bool,

        /// Net for the new vias; must belong to a zone on the board
        #[arg(long, value_name = "NAME")]
        net: Option<String>,

        #[arg(long, value_enum)]
        via_type: Option<CliViaType>,

        /// Keep new vias clear of vias already on the board
        #[arg(long)]
        avoid_existing: bool,

        /// Store the choices as defaults in the settings file
        #[arg(long)]
        save_settings: bool,

        #[command(flatten)]
        selection: SelectionArgs,
    },
}

#[derive(clap::Args)]
struct SelectionArgs {
    /// Act on every track instead of the selected ones
    #[arg(long)]
    all: bool,

    /// Output board file; defaults to overwriting the input
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum CliViaType {
    Through,
    Micro,
    BlindBuried,
}

impl From<CliViaType> for ViaType {
    fn from(value: CliViaType) -> Self {
        match value {
            CliViaType::Through => ViaType::Through,
            CliViaType::Micro => ViaType::Microvia,
            CliViaType::BlindBuried => ViaType::BlindBuried,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging_with(if cli.json {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    })?;
    info!(
        version = tracktools::VERSION,
        built = tracktools::BUILD_DATE,
        "TrackTools starting"
    );

    match cli.command {
        Command::Square { board, selection } => {
            let mut doc = load_board(&board, &selection)?;
            let report = square_selected_tracks(&mut doc).context("Failed to square tracks")?;
            finish(&doc, &board, &selection, &report)
        }
        Command::Fence {
            board,
            config,
            via_diameter,
            via_drill,
            clearance,
            zone_clearance,
            net,
            via_type,
            avoid_existing,
            save_settings,
            selection,
        } => {
            let config_path = match config {
                Some(path) => path,
                None => Config::default_path()?,
            };
            let mut config = Config::load_or_default(&config_path)
                .with_context(|| format!("Failed to load settings from {:?}", config_path))?;

            let mut doc = load_board(&board, &selection)?;
            let mut form = FenceForm::new(
                doc.fence_dialog_context(),
                &config.fence,
                config.ui.measurement_system,
            );

            if let Some(via_type) = via_type {
                form.set_via_type(via_type.into())?;
            }
            if let Some(name) = net {
                let index = form
                    .offered_nets()
                    .iter()
                    .position(|zone| zone.net.name() == name);
                let Some(index) = index else {
                    let offered: Vec<&str> =
                        form.offered_nets().iter().map(|z| z.net.name()).collect();
                    bail!("Net {:?} has no zone on this board (offered: {:?})", name, offered);
                };
                form.select_net(index)?;
            }
            if let Some(text) = via_diameter {
                form.edit_via_diameter_text(text);
            }
            if let Some(text) = via_drill {
                form.edit_via_drill_text(text);
            }
            if let Some(text) = clearance {
                form.edit_clearance_text(text);
            }
            if zone_clearance {
                form.set_use_zone_clearance(true)?;
            }

            let params = form.to_parameters().context("Invalid fence settings")?;
            let mut options = FenceOptions::from(&config.fence);
            if avoid_existing {
                options.seed = DedupSeed::ExistingVias;
            }

            let report = fence_selected_tracks(&mut doc, &params, options)
                .context("Failed to build via fence")?;

            if save_settings {
                config.fence = form.to_settings(&config.fence);
                config.fence.avoid_existing_vias = options.seed == DedupSeed::ExistingVias;
                config
                    .save_to_file(&config_path)
                    .with_context(|| format!("Failed to save settings to {:?}", config_path))?;
            }
            finish(&doc, &board, &selection, &report)
        }
    }
}

fn load_board(path: &Path, selection: &SelectionArgs) -> Result<Board> {
    let mut board = Board::load_from_file(path)
        .with_context(|| format!("Failed to read board file: {:?}", path))?;
    if selection.all {
        board.select_all_tracks();
    }
    if !board.has_selection() {
        bail!("No tracks selected in {:?} (use --all to process every track)", path);
    }
    Ok(board)
}

fn finish(board: &Board, input: &Path, selection: &SelectionArgs, report: &ActionReport) -> Result<()> {
    let output = selection.output.as_deref().unwrap_or(input);
    board
        .save_to_file(output)
        .with_context(|| format!("Failed to write board file: {:?}", output))?;

    println!("{}", report.summary());
    for skipped in &report.skipped {
        println!("  skipped {}: {}", skipped.track, skipped.error);
    }
    Ok(())
}
