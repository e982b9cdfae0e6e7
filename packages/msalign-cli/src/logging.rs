use log::LevelFilter;

/// Installs `env_logger` at a level derived from `-v`/`--silent`, mirroring the common
/// "repeat a short flag for more detail" convention.
pub fn setup_logger(verbose: u8, silent: bool) {
  let level = if silent {
    LevelFilter::Off
  } else {
    match verbose {
      0 => LevelFilter::Warn,
      1 => LevelFilter::Info,
      2 => LevelFilter::Debug,
      _ => LevelFilter::Trace,
    }
  };

  env_logger::Builder::new().filter_level(level).format_timestamp_millis().init();
}
