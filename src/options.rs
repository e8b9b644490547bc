use std::str::FromStr;

use isolife::{CanvasOptions, Config, Fill, GifOptions, Pattern, PatternError};
use thiserror::Error;

const DEFAULT_OUTPUT: &str = "animated.gif";

#[derive(Debug, Error)]
pub enum ArgError {
    #[error(transparent)]
    Parse(#[from] getopts::Fail),

    #[error("invalid value {value:?} for --{name}")]
    Value { name: &'static str, value: String },

    #[error("unknown fill mode {0:?}, expected random, alternating, all or empty")]
    Fill(String),

    #[error("reading pattern {path}: {source}")]
    Input {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("pattern {path}: {source}")]
    Pattern {
        path: String,
        #[source]
        source: PatternError,
    },
}

pub struct Args {
    matches: getopts::Matches,
}

impl Args {
    fn new<T: AsRef<str>>(args: &[T]) -> Result<Option<Self>, ArgError> {
        let mut opts = getopts::Options::new();
        opts.optflag("", "help", "print this help menu");
        opts.optopt("w", "width", "set grid width", "WIDTH");
        opts.optopt("h", "height", "set grid height", "HEIGHT");
        opts.optopt("g", "frames", "number of generations to render", "COUNT");
        opts.optopt("p", "probability", "chance of a cell starting alive", "P");
        opts.optopt("f", "fill", "set fill type", "TYPE");
        opts.optopt("i", "input", "start from an RLE pattern file", "FILE");
        opts.optopt("s", "seed", "seed the random fill", "SEED");
        opts.optflag("t", "threads", "enables multi-threading");
        opts.optopt("", "max-layers", "only keep the newest layers", "COUNT");
        opts.optopt("", "cell-size", "size of a cell in scene units", "SIZE");
        opts.optopt("", "canvas-width", "output width in pixels", "PIXELS");
        opts.optopt("", "canvas-height", "output height in pixels", "PIXELS");
        opts.optopt("", "scale", "pixels per scene unit", "SCALE");
        opts.optopt("d", "delay", "delay between frames", "MILLIS");
        opts.optflag("", "no-loop", "play the animation once");
        opts.optopt("", "speed", "gif quantizer speed, 1 (best) to 30", "SPEED");
        opts.optopt("o", "output", "output file", "FILE");
        opts.optopt("", "stats", "write stats csv to file", "FILE");

        let matches = opts.parse(args.iter().map(T::as_ref))?;
        if matches.opt_present("help") {
            println!("{}", opts.usage("usage: isolife [options]"));
            Ok(None)
        } else {
            Ok(Some(Self { matches }))
        }
    }
    pub fn from_env() -> Result<Option<Self>, ArgError> {
        let env = std::env::args().collect::<Vec<_>>();
        Self::new(&env[1..])
    }

    fn get<T: FromStr>(&self, name: &'static str) -> Result<Option<T>, ArgError> {
        match self.matches.opt_str(name) {
            Some(value) => value
                .parse()
                .map(Some)
                .map_err(|_| ArgError::Value { name, value }),
            None => Ok(None),
        }
    }

    pub fn config(&self) -> Result<Config, ArgError> {
        let defaults = Config::default();
        Ok(Config {
            width: self.get("width")?.unwrap_or(defaults.width),
            height: self.get("height")?.unwrap_or(defaults.height),
            frames: self.get("frames")?.unwrap_or(defaults.frames),
            alive_probability: self.get("probability")?.unwrap_or(defaults.alive_probability),
            cell_size: self.get("cell-size")?.unwrap_or(defaults.cell_size),
            fill: self.fill()?,
            max_layers: self.get("max-layers")?,
            parallel: self.matches.opt_present("threads"),
        })
    }

    fn fill(&self) -> Result<Fill, ArgError> {
        if let Some(path) = self.matches.opt_str("input") {
            let text = match std::fs::read_to_string(&path) {
                Ok(text) => text,
                Err(source) => return Err(ArgError::Input { path, source }),
            };
            return match Pattern::parse_rle(&text) {
                Ok(pattern) => Ok(Fill::Pattern(pattern)),
                Err(source) => Err(ArgError::Pattern { path, source }),
            };
        }

        match self.matches.opt_str("fill") {
            Some(name) => Fill::from_name(&name).ok_or(ArgError::Fill(name)),
            None => Ok(Fill::Random),
        }
    }

    pub fn seed(&self) -> Result<Option<u64>, ArgError> {
        self.get("seed")
    }

    pub fn canvas_options(&self) -> Result<CanvasOptions, ArgError> {
        let defaults = CanvasOptions::default();
        Ok(CanvasOptions {
            width: self.get("canvas-width")?.unwrap_or(defaults.width),
            height: self.get("canvas-height")?.unwrap_or(defaults.height),
            scale: self.get("scale")?.unwrap_or(defaults.scale),
            ..defaults
        })
    }

    pub fn gif_options(&self) -> Result<GifOptions, ArgError> {
        let defaults = GifOptions::default();
        Ok(GifOptions {
            frame_delay_ms: self.get("delay")?.unwrap_or(defaults.frame_delay_ms),
            repeat: !self.matches.opt_present("no-loop"),
            speed: self.get("speed")?.unwrap_or(defaults.speed),
        })
    }

    pub fn output_file(&self) -> String {
        self.matches
            .opt_str("output")
            .unwrap_or_else(|| DEFAULT_OUTPUT.to_owned())
    }

    pub fn stats_file(&self) -> Option<String> {
        self.matches.opt_str("stats")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Args {
        Args::new(list).expect("valid args").expect("not --help")
    }

    #[test]
    fn defaults_match_library() {
        let args = args(&[]);

        assert_eq!(args.config().unwrap(), Config::default());
        assert_eq!(args.canvas_options().unwrap(), CanvasOptions::default());
        assert_eq!(args.gif_options().unwrap(), GifOptions::default());
        assert_eq!(args.output_file(), "animated.gif");
        assert_eq!(args.seed().unwrap(), None);
    }

    #[test]
    fn parses_grid_and_run_options() {
        let args = args(&[
            "-w", "10", "-h", "8", "--frames", "5", "-p", "0.5", "--max-layers", "3", "-t", "-s", "7",
        ]);
        let config = args.config().unwrap();

        assert_eq!((config.width, config.height, config.frames), (10, 8, 5));
        assert_eq!(config.alive_probability, 0.5);
        assert_eq!(config.max_layers, Some(3));
        assert!(config.parallel);
        assert_eq!(args.seed().unwrap(), Some(7));
    }

    #[test]
    fn fill_mode_parses() {
        let args = args(&["--fill", "alternating"]);

        assert_eq!(args.config().unwrap().fill, Fill::Alternating);
    }

    #[test]
    fn unknown_fill_is_rejected() {
        let args = args(&["--fill", "sparse"]);

        assert!(matches!(args.config(), Err(ArgError::Fill(name)) if name == "sparse"));
    }

    #[test]
    fn bad_number_names_option() {
        let args = args(&["--width", "wide"]);

        assert!(matches!(
            args.config(),
            Err(ArgError::Value { name: "width", .. })
        ));
    }

    #[test]
    fn gif_options_parse() {
        let args = args(&["--delay", "50", "--no-loop", "--speed", "20"]);

        assert_eq!(
            args.gif_options().unwrap(),
            GifOptions {
                frame_delay_ms: 50,
                repeat: false,
                speed: 20,
            }
        );
    }

    #[test]
    fn missing_input_file_is_reported() {
        let args = args(&["--input", "/nonexistent/pattern.rle"]);

        assert!(matches!(args.config(), Err(ArgError::Input { .. })));
    }

    #[test]
    fn help_returns_none() {
        assert!(Args::new(&["--help"]).unwrap().is_none());
    }
}
