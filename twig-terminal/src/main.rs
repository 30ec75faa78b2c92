/// Twig Terminal Viewer - procedural tree on a stage
///
/// Builds the scene once, then either dumps its segments or shows a
/// rotating wireframe.
/// Controls:
///   - WASD / Arrow Keys: Rotate the scene
///   - Space: Toggle spin
///   - R: Reset rotation
///   - Q/ESC: Quit
use clap::Parser;
use std::io;
use std::path::PathBuf;
use twig_core::{AttachmentPolicy, Preset, Scene, SceneConfig};
use twig_terminal::{dump_segments, TerminalApp};

#[derive(Parser, Debug)]
#[command(name = "twig", version, about = "Procedural tree skeletons in the terminal")]
struct Args {
    /// Scene config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tree preset: static, declarative, combinator or spokes
    #[arg(short, long)]
    preset: Option<Preset>,

    /// Branch attachment policy: even or fixed
    #[arg(long)]
    policy: Option<AttachmentPolicy>,

    /// Number of spokes per level for the spokes preset
    #[arg(long)]
    spokes: Option<usize>,

    /// Hide the stage
    #[arg(long)]
    no_stage: bool,

    /// Print the tree segments and exit
    #[arg(long)]
    dump: bool,
}

fn main() -> io::Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SceneConfig::load(path)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?,
        None => SceneConfig::default(),
    };
    if let Some(preset) = args.preset {
        config.tree.preset = preset;
    }
    if let Some(policy) = args.policy {
        config.tree.policy = policy;
    }
    if let Some(count) = args.spokes {
        config.tree.spokes.count = count;
    }
    if args.no_stage {
        config.stage.enabled = false;
    }

    let scene = Scene::build(&config);
    log::info!(
        "{} preset, {} policy: {} segments",
        config.tree.preset,
        config.tree.policy,
        scene.tree_segments().len()
    );

    if args.dump {
        return dump_segments(&mut io::stdout().lock(), scene.tree_segments());
    }

    let title = format!("{} / {}", config.tree.preset, config.tree.policy);
    let mut app = TerminalApp::new(title, &scene, config.view.clone())?;
    app.run()
}
