use anyhow::{bail, Context, Result};
use clap::Parser;
use handsign::capture::{CaptureSource, WebcamCapture};
use handsign::classifier::{LetterClassifier, NoClassifier, OnnxLetterClassifier};
use handsign::landmarks::OnnxHandLandmarker;
use handsign::output::{self, FileSink};
use handsign::pipeline::{CameraSource, FrameObserver, ObservationSource, ReplaySource};
use handsign::text::{self, CasePreserving, Commit, TextConfig, TextSession, WordListCorrector};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input webcam device index
    #[arg(short, long, default_value_t = 0)]
    input_device: u32,

    /// Processing resolution width
    #[arg(long, default_value_t = 320)]
    width: u32,

    /// Processing resolution height
    #[arg(long, default_value_t = 240)]
    height: u32,

    /// Target frames per second (live camera only)
    #[arg(long, default_value_t = 10)]
    fps: u32,

    /// Path to the hand landmark model (ONNX file), required for live camera
    #[arg(long)]
    hand_model: Option<PathBuf>,

    /// Minimum hand presence score to accept a detection
    #[arg(long, default_value_t = 0.7)]
    min_presence: f32,

    /// Path to the letter classifier (ONNX file)
    /// If not provided, only recorded labels and the space gesture produce text
    #[arg(long)]
    classifier_model: Option<PathBuf>,

    /// Word list (one word per line, optional count) for correcting words as they end
    #[arg(long, value_name = "FILE")]
    dictionary: Option<PathBuf>,

    /// Replay a JSON-lines landmark recording instead of using the camera
    #[arg(long)]
    replay: Option<PathBuf>,

    /// Seconds a letter must be held before it is added
    #[arg(long, default_value_t = 1.5)]
    hold_time: f64,

    /// Seconds without a hand before the word is ended
    #[arg(long, default_value_t = 3.0)]
    space_delay: f64,

    /// Seconds the space gesture must be held
    #[arg(long, default_value_t = 1.5)]
    space_hold_time: f64,

    /// Seconds the space gesture is ignored after firing
    #[arg(long, default_value_t = 1.5)]
    space_cooldown: f64,

    /// Directory for saved sentences
    #[arg(long, default_value = "saved_sentences")]
    save_dir: PathBuf,

    /// Don't save the sentence on exit
    #[arg(long)]
    no_save: bool,

    /// Print the fingerspelling sequence for some text and exit
    #[arg(long, value_name = "TEXT")]
    to_signs: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

impl Args {
    fn text_config(&self) -> Result<TextConfig> {
        let secs = |name: &str, value: f64| {
            Duration::try_from_secs_f64(value)
                .with_context(|| format!("--{} must be a non-negative number of seconds", name))
        };
        Ok(TextConfig {
            hold_time: secs("hold-time", self.hold_time)?,
            space_delay: secs("space-delay", self.space_delay)?,
            space_hold_time: secs("space-hold-time", self.space_hold_time)?,
            space_cooldown: secs("space-cooldown", self.space_cooldown)?,
        })
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    if let Some(input) = &args.to_signs {
        for sign in text::text_to_signs(input) {
            println!("{:?}", sign);
        }
        return Ok(());
    }

    let config = args.text_config()?;
    tracing::info!("handsign starting");
    tracing::info!(
        "Hold {:?}, space delay {:?}, space gesture {:?} (cooldown {:?})",
        config.hold_time,
        config.space_delay,
        config.space_hold_time,
        config.space_cooldown
    );

    let classifier: Box<dyn LetterClassifier> = if let Some(path) = &args.classifier_model {
        Box::new(OnnxLetterClassifier::new(path).context("Failed to load letter classifier")?)
    } else {
        tracing::info!("No classifier model; letters come from recorded labels only");
        Box::new(NoClassifier)
    };

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = running.clone();
        ctrlc::set_handler(move || running.store(false, Ordering::SeqCst))
            .context("Failed to install Ctrl+C handler")?;
    }

    let started_at = Instant::now();
    let mut session = TextSession::new(config, started_at);
    if let Some(path) = &args.dictionary {
        let dictionary = WordListCorrector::open(path)?;
        session = session.with_corrector(CasePreserving::new(dictionary));
    }
    let mut observer = FrameObserver::new(classifier);

    let result = if let Some(replay) = &args.replay {
        let mut source = ReplaySource::open(replay, started_at)?;
        run_pipeline(&mut source, &mut observer, &mut session, None, &running)
    } else {
        let Some(hand_model) = &args.hand_model else {
            bail!("--hand-model is required for live camera input (or use --replay)");
        };
        let capture = WebcamCapture::new(args.input_device, args.width, args.height)
            .context("Failed to initialize webcam capture")?;
        let (width, height) = capture.resolution();
        tracing::info!("Processing frames at {}x{}", width, height);
        let detector = OnnxHandLandmarker::new(hand_model, args.min_presence)
            .context("Failed to load hand landmark model")?;
        let mut source = CameraSource::new(capture, detector);
        let frame_duration = Duration::from_secs_f32(1.0 / args.fps.max(1) as f32);
        run_pipeline(&mut source, &mut observer, &mut session, Some(frame_duration), &running)
    };
    if let Err(e) = &result {
        tracing::error!("Pipeline stopped: {:#}", e);
    }

    // Keep whatever was signed even if the input broke
    let text = session.finalize();
    tracing::info!("Final text: {:?}", text);
    println!("{}", text.trim());

    if !args.no_save {
        let mut sink = FileSink::new(&args.save_dir);
        output::save_sentence(&mut sink, &text, chrono::Local::now())?;
    }

    result
}

fn run_pipeline<S>(
    source: &mut S,
    observer: &mut FrameObserver,
    session: &mut TextSession,
    frame_duration: Option<Duration>,
    running: &AtomicBool,
) -> Result<()>
where
    S: ObservationSource,
{
    let mut frame_count = 0u64;
    let mut hand_frames = 0u64;
    let mut total_detect_time = Duration::ZERO;

    tracing::info!("Starting main pipeline loop");
    tracing::info!("Press Ctrl+C to stop");

    while running.load(Ordering::SeqCst) {
        let loop_start = Instant::now();

        let Some(observation) = source
            .next_observation()
            .context("Failed to read observation")?
        else {
            tracing::info!("Input exhausted");
            break;
        };
        total_detect_time += loop_start.elapsed();

        let event = observer.observe(&observation);
        let snapshot = session.process(&event, observation.at);

        for commit in &snapshot.committed {
            match commit {
                Commit::Letter(letter) => {
                    tracing::info!("Letter {} -> word {:?}", letter, snapshot.current_word)
                }
                Commit::Word { raw, corrected } if raw != corrected => {
                    tracing::info!(
                        "Word {:?} (corrected to {:?}) -> {:?}",
                        raw,
                        corrected,
                        snapshot.current_sentence
                    )
                }
                Commit::Word { raw, .. } => {
                    tracing::info!("Word {:?} -> {:?}", raw, snapshot.current_sentence)
                }
                Commit::Space => tracing::info!("Space -> {:?}", snapshot.current_sentence),
            }
        }
        tracing::debug!(
            "hand={} letter={:?} gesture={} progress letter={:.2} space={:.2} gesture={:.2}",
            event.hand_present,
            event.letter,
            event.is_space_gesture,
            snapshot.letter_progress,
            snapshot.space_progress,
            snapshot.gesture_progress
        );

        frame_count += 1;
        if event.hand_present {
            hand_frames += 1;
        }

        // Log stats every 30 frames
        if frame_count % 30 == 0 {
            let avg_detect_ms = total_detect_time.as_secs_f64() * 1000.0 / frame_count as f64;
            tracing::info!(
                "Frame {}: detect={:.1}ms, hand in {:.0}% of frames",
                frame_count,
                avg_detect_ms,
                hand_frames as f64 * 100.0 / frame_count as f64
            );
        }

        // Frame rate limiting
        if let Some(frame_duration) = frame_duration {
            let elapsed = loop_start.elapsed();
            if elapsed < frame_duration {
                std::thread::sleep(frame_duration - elapsed);
            }
        }
    }

    Ok(())
}
