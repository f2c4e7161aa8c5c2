use log::LevelFilter;

fn main() -> Result<(), elevator::Error> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    elevator::modules::run()
}
