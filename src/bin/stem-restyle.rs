use clap::{Parser, Subcommand};
use std::{path::PathBuf, process};
use stem_restyle_core::{
    core::envelope::bar_count_for_width, extract_envelope, layout_waveform, read_audio,
    restyle, set_restyle_progress_callback, write_audio, GeminiTransformer, MockSeparator,
    MusicStyle, RemoteConfig, RestyleProgress, Rgba, StemSeparator, TrimWindow, WaveformStyle,
};

#[derive(Parser)]
#[command(name = "stem-restyle")]
#[command(about = "Waveforms, mock stems and AI restyling for audio tracks", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the peak envelope of a track as a text bar chart
    Waveform {
        #[arg(short, long)]
        input: PathBuf,

        /// Canvas width in pixels; one bar per 3 px
        #[arg(short, long, default_value_t = 240)]
        width: u32,

        #[arg(long, default_value_t = 0.0)]
        start: f32,

        #[arg(long, default_value_t = 1.0)]
        end: f32,

        /// Print raw peak values instead of the chart
        #[arg(long)]
        raw: bool,
    },

    /// Split a track into (mock) stems
    Split {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Send a track (optionally trimmed) to the remote model and save the result
    Restyle {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        /// Style to apply; repeat for several (e.g. -s lofi -s jazz)
        #[arg(short, long = "style", required = true)]
        styles: Vec<String>,

        #[arg(long, default_value_t = 0.0)]
        start: f32,

        #[arg(long, default_value_t = 1.0)]
        end: f32,

        #[arg(long)]
        model: Option<String>,

        #[arg(long)]
        base_url: Option<String>,

        #[arg(short, long)]
        quiet: bool,
    },

    /// List available styles
    Styles,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Waveform {
            input,
            width,
            start,
            end,
            raw,
        } => handle_waveform(input, width, start, end, raw),
        Commands::Split { input, output } => handle_split(input, output),
        Commands::Restyle {
            input,
            output,
            styles,
            start,
            end,
            model,
            base_url,
            quiet,
        } => handle_restyle(input, output, styles, start, end, model, base_url, quiet),
        Commands::Styles => handle_styles(),
    };

    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

const CHART_ROWS: usize = 8;

fn handle_waveform(
    input: PathBuf,
    width: u32,
    start: f32,
    end: f32,
    raw: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let audio = read_audio(&input)?;
    let trim = TrimWindow::new(start, end)?;
    let samples = audio.channel(0).unwrap_or(&[]);

    if raw {
        for peak in extract_envelope(samples, bar_count_for_width(width)) {
            println!("{peak:.6}");
        }
        return Ok(());
    }

    let style = WaveformStyle::new(width, CHART_ROWS as u32 * 2, Rgba::rgb(0xe5, 0xe7, 0xeb));
    let layout = layout_waveform(samples, &style, &trim);

    // each text row covers two pixel rows
    for row in 0..CHART_ROWS {
        let y = (row * 2) as f32 + 1.0;
        let line: String = layout
            .bars
            .iter()
            .map(|bar| {
                let r = bar.rect;
                if y >= r.y && y <= r.y + r.height {
                    if bar.dimmed {
                        '.'
                    } else {
                        '#'
                    }
                } else {
                    ' '
                }
            })
            .collect();
        println!("{line}");
    }

    eprintln!(
        "{} bars, {:.2}s, trim {:.2}..{:.2}",
        layout.bars.len(),
        audio.duration_secs(),
        trim.start(),
        trim.end()
    );
    Ok(())
}

fn handle_split(input: PathBuf, output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input file not found: {}", input.display()).into());
    }

    let audio = read_audio(&input)?;
    let stems = MockSeparator.separate(&audio)?;

    std::fs::create_dir_all(&output)?;
    let base = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    for stem in &stems {
        let path = output.join(format!("{}_{}.wav", base, stem.kind.label()));
        write_audio(&path, &stem.audio)?;
        println!("{}\t{}\t{}", stem.kind.label(), stem.name, path.display());
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn handle_restyle(
    input: PathBuf,
    output: PathBuf,
    styles: Vec<String>,
    start: f32,
    end: f32,
    model: Option<String>,
    base_url: Option<String>,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let styles = styles
        .iter()
        .map(|s| s.parse::<MusicStyle>())
        .collect::<Result<Vec<_>, _>>()?;

    let mut cfg = RemoteConfig::from_env();
    if let Some(model) = model {
        cfg.model = model;
    }
    if let Some(url) = base_url {
        cfg = cfg.with_base_url(url);
    }

    let audio = read_audio(&input)?;
    let trimmed = TrimWindow::new(start, end)?.apply(&audio);

    if !quiet {
        eprintln!("🎛  Restyling {} as {}", input.display(), join_labels(&styles));
        set_restyle_progress_callback(|p| match p {
            RestyleProgress::Encode { bytes } => eprintln!("⏳ Encoded {bytes} bytes of WAV"),
            RestyleProgress::Upload => eprintln!("⏳ Waiting for the model"),
            RestyleProgress::Decode { bytes } => eprintln!("⏳ Decoding {bytes} bytes"),
            RestyleProgress::Finished { frames } => eprintln!("✅ {frames} frames generated"),
        });
    }

    let transformer = GeminiTransformer::new(cfg)?;
    let result = restyle(&transformer, &trimmed, &styles)?;
    write_audio(&output, &result)?;

    if quiet {
        println!("{}", output.display());
    } else {
        eprintln!("💾 Saved {}", output.display());
    }
    Ok(())
}

fn handle_styles() -> Result<(), Box<dyn std::error::Error>> {
    for style in MusicStyle::ALL {
        println!("{style}");
    }
    Ok(())
}

fn join_labels(styles: &[MusicStyle]) -> String {
    styles
        .iter()
        .map(MusicStyle::label)
        .collect::<Vec<_>>()
        .join(", ")
}
