use std::process::ExitCode;

fn main() -> ExitCode {
    // `.env` may carry RUNNER_LOG, so it has to be loaded before the subscriber.
    dotenvy::dotenv().ok();
    tecogan_runner::logging::init();

    match tecogan_runner::app::run(std::env::args().collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
