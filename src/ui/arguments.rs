use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Window shown when the app starts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Screen {
    #[default]
    Settings,
    SleepTimer,
}

#[derive(Debug, Parser)]
#[command(name = "voice", version = crate::VERSION_STRING, about = "Voice audiobook player settings")]
pub struct Args {
    /// Directory holding preferences.json and theme.json. Defaults to the platform data dir.
    #[arg(long, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Screen::Settings)]
    pub screen: Screen,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_settings() {
        let args = Args::try_parse_from(["voice"]).unwrap();
        assert_eq!(args.screen, Screen::Settings);
        assert!(args.data_dir.is_none());
    }

    #[test]
    fn parses_screen_and_data_dir() {
        let args =
            Args::try_parse_from(["voice", "--screen", "sleep-timer", "--data-dir", "/tmp/voice"])
                .unwrap();
        assert_eq!(args.screen, Screen::SleepTimer);
        assert_eq!(args.data_dir, Some(PathBuf::from("/tmp/voice")));
    }
}
