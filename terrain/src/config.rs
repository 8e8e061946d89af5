use backend::logging::LoggingConfig;
use backend::WindowConfig;
use clap::Parser;
use std::path::PathBuf;

const DEFAULT_VERTEX_SHADER: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/shaders/basic.vert");
const DEFAULT_FRAGMENT_SHADER: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/shaders/terrain.frag");

#[derive(Parser, Debug)]
#[command(name = "terrain", about = "Procedural terrain heightmap viewer")]
pub struct Cli {
    /// Vertex stage source.
    #[arg(long, default_value = DEFAULT_VERTEX_SHADER)]
    pub vertex: PathBuf,

    /// Fragment stage source; reads `iResolution` and `iTime`.
    #[arg(long, default_value = DEFAULT_FRAGMENT_SHADER)]
    pub fragment: PathBuf,

    /// Exit after this many frames.
    #[arg(long)]
    pub max_frames: Option<u64>,

    /// Present immediately instead of waiting for vertical sync.
    #[arg(long)]
    pub no_vsync: bool,

    /// Log filter, `env_logger` syntax (overrides RUST_LOG).
    #[arg(long = "log")]
    pub log_filter: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub window: WindowConfig,
    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,
    pub max_frames: Option<u64>,
    pub logging: LoggingConfig,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            window: WindowConfig {
                vsync: !cli.no_vsync,
                ..WindowConfig::default()
            },
            vertex_shader: cli.vertex,
            fragment_shader: cli.fragment,
            max_frames: cli.max_frames,
            logging: LoggingConfig {
                env_filter: cli.log_filter,
            },
        }
    }
}
