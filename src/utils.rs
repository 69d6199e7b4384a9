use log::LevelFilter;
use std::sync::Once;
static INIT_LOGGER: Once = Once::new();

pub fn initialize_logger(level: LevelFilter) {
    INIT_LOGGER.call_once(|| {
        let _ = env_logger::Builder::new().filter_level(level).try_init();
    });
}
